use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;
use url::Url;

use crate::cards::cardname::CardName;
use crate::cards::printing::{PrintingList, RemotePrinting};
use crate::utilities::constants::{SCRYFALL_API_URL, SCRYFALL_SEARCH_PATH};

pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Every printing of the card, in the order the catalog returned them.
    Printings(Vec<RemotePrinting>),
    NoMatch,
}

/// Exact-name printing search against a card catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn search_printings(&self, name: &CardName) -> Result<SearchOutcome, FetchError>;
}

pub struct ScryfallClient {
    client: reqwest::Client,
    base_url: String,
    max_pages: usize,
}

impl ScryfallClient {
    pub fn new(base_url: Option<&str>, client: reqwest::Client, max_pages: usize) -> Self {
        ScryfallClient {
            client,
            base_url: base_url
                .unwrap_or(SCRYFALL_API_URL)
                .trim_end_matches('/')
                .to_string(),
            max_pages: max_pages.max(1),
        }
    }

    fn setup_http_headers() -> reqwest::header::HeaderMap {
        let mut header_map = reqwest::header::HeaderMap::new();
        header_map.insert(
            reqwest::header::ACCEPT,
            "application/json;q=0.9,*/*;q=0.8".parse().unwrap(),
        );
        header_map.insert(
            reqwest::header::USER_AGENT,
            concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .parse()
                .unwrap(),
        );
        header_map
    }

    fn search_url(&self, name: &CardName) -> Result<Url, FetchError> {
        let exact_name_query = format!("!\"{}\"", name.as_str());
        let url = Url::parse_with_params(
            &format!("{}{}", self.base_url, SCRYFALL_SEARCH_PATH),
            &[
                ("q", exact_name_query.as_str()),
                ("unique", "prints"),
                ("order", "released"),
            ],
        )?;
        Ok(url)
    }

    /// Fetches one page of search results. `None` means the catalog answered
    /// that nothing matched.
    async fn fetch_page(&self, url: &str) -> Result<Option<PrintingList>, FetchError> {
        debug!("Fetching printings from {}", url);
        let response = self
            .client
            .get(url)
            .headers(Self::setup_http_headers())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(format!("Catalog search {} failed with status {}", url, status).into());
        }

        let body = response.text().await?;
        let list: PrintingList = serde_json::from_str(&body)?;
        Ok(Some(list))
    }
}

#[async_trait]
impl CatalogSource for ScryfallClient {
    async fn search_printings(&self, name: &CardName) -> Result<SearchOutcome, FetchError> {
        info!("Searching printings for card: {}", name);
        let first_url = self.search_url(name)?;

        let Some(mut page) = self.fetch_page(first_url.as_str()).await? else {
            debug!("No printings found for: {}", name);
            return Ok(SearchOutcome::NoMatch);
        };

        let mut printings = std::mem::take(&mut page.data);
        let mut pages_fetched = 1;
        while page.has_more {
            let Some(next_page) = page.next_page.take() else {
                break;
            };
            if pages_fetched >= self.max_pages {
                warn!(
                    "Stopping after {} result pages for {}, {} printings collected",
                    pages_fetched,
                    name,
                    printings.len()
                );
                break;
            }
            page = match self.fetch_page(&next_page).await? {
                Some(next) => next,
                None => break,
            };
            printings.append(&mut page.data);
            pages_fetched += 1;
        }

        if printings.is_empty() {
            return Ok(SearchOutcome::NoMatch);
        }
        debug!("Found {} printings for {}", printings.len(), name);
        Ok(SearchOutcome::Printings(printings))
    }
}
