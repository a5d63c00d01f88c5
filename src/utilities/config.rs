use std::env;
use std::time::Duration;

use log::error;

use super::constants::{
    DEBOUNCE_MS, DEFAULT_CARD_SELECTOR, DEFAULT_MAX_SEARCH_PAGES, DEFAULT_PURCHASE_VENDOR,
    DEFAULT_SESSION_SECONDS, DEFAULT_VIEW_MODE, DEFAULT_VIEW_MODE_SELECTOR, SCRYFALL_API_URL,
    STARTUP_DELAY_MS,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub page_source: String,
    pub output_path: String,
    pub scryfall_url: String,
    pub view_mode: String,
    pub view_mode_selector: String,
    pub card_selector: String,
    pub startup_delay_ms: u64,
    pub debounce_ms: u64,
    pub session_seconds: u64,
    pub negative_cache: bool,
    pub purchase_vendor: String,
    pub max_search_pages: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_source: "".to_string(),
            output_path: "".to_string(),
            scryfall_url: SCRYFALL_API_URL.to_string(),
            view_mode: DEFAULT_VIEW_MODE.to_string(),
            view_mode_selector: DEFAULT_VIEW_MODE_SELECTOR.to_string(),
            card_selector: DEFAULT_CARD_SELECTOR.to_string(),
            startup_delay_ms: STARTUP_DELAY_MS,
            debounce_ms: DEBOUNCE_MS,
            session_seconds: DEFAULT_SESSION_SECONDS,
            negative_cache: true,
            purchase_vendor: DEFAULT_PURCHASE_VENDOR.to_string(),
            max_search_pages: DEFAULT_MAX_SEARCH_PAGES,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.update_from_env();
        config
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn session_length(&self) -> Duration {
        Duration::from_secs(self.session_seconds)
    }

    fn update_from_env(&mut self) {
        self.update_from(|key| env::var(key).ok());
    }

    fn update_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(page_source) = lookup("PAGE_SOURCE") {
            self.page_source = page_source;
        }
        if let Some(output_path) = lookup("OUTPUT_PATH") {
            self.output_path = output_path;
        }
        if let Some(scryfall_url) = lookup("SCRYFALL_URL") {
            self.scryfall_url = scryfall_url.trim_end_matches('/').to_string();
        }
        if let Some(view_mode) = lookup("VIEW_MODE") {
            self.view_mode = view_mode;
        }
        if let Some(selector) = lookup("VIEW_MODE_SELECTOR") {
            self.view_mode_selector = selector;
        }
        if let Some(selector) = lookup("CARD_SELECTOR") {
            self.card_selector = selector;
        }
        if let Some(delay) = lookup("STARTUP_DELAY_MS") {
            self.startup_delay_ms = delay.parse().unwrap_or(STARTUP_DELAY_MS);
        }
        if let Some(debounce) = lookup("DEBOUNCE_MS") {
            self.debounce_ms = debounce.parse().unwrap_or(DEBOUNCE_MS);
        }
        if let Some(session) = lookup("SESSION_SECONDS") {
            self.session_seconds = session.parse().unwrap_or(DEFAULT_SESSION_SECONDS);
        }
        if let Some(negative_cache) = lookup("NEGATIVE_CACHE") {
            self.negative_cache = negative_cache == "1";
        }
        if let Some(vendor) = lookup("PURCHASE_VENDOR") {
            if vendor.is_empty() {
                error!("PURCHASE_VENDOR is empty, keeping {}", self.purchase_vendor);
            } else {
                self.purchase_vendor = vendor;
            }
        }
        if let Some(pages) = lookup("MAX_SEARCH_PAGES") {
            self.max_search_pages = match pages.parse::<usize>() {
                Ok(0) | Err(_) => {
                    error!("Supplied incorrect MAX_SEARCH_PAGES: '{}'", pages);
                    DEFAULT_MAX_SEARCH_PAGES
                }
                Ok(pages) => pages,
            };
        }
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: Config = Config::new();
}
