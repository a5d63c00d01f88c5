mod annotator;
mod cards;
mod coordinator;
mod page;
mod price;
mod test;
mod utilities;

use std::sync::Arc;

use log::{info, warn};
use reqwest::Client;

use coordinator::scanner::Scanner;
use coordinator::view_mode::ViewModeGate;
use coordinator::{MutationCoordinator, Timing};
use page::{parse_selector, shared, Page};
use price::cache::PriceCache;
use price::resolver::PriceResolver;
use price::scryfall_client::ScryfallClient;
use utilities::config::{Config, CONFIG};
use utilities::constants::OUTPUT_FILE_PREFIX;
use utilities::file_management::{load_page_source, save_page};
use utilities::string_manipulators::date_time_as_string;

fn output_path(config: &Config) -> String {
    if config.output_path.is_empty() {
        format!("{}{}.html", OUTPUT_FILE_PREFIX, date_time_as_string(None, None))
    } else {
        config.output_path.clone()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let start_time = chrono::prelude::Local::now();
    info!("Starting at {}", start_time);

    if CONFIG.page_source.is_empty() {
        return Err("PAGE_SOURCE must name an HTML file or URL".into());
    }

    let client = Client::new();
    let html = load_page_source(&CONFIG.page_source, &client).await?;
    let page = shared(Page::parse(&html));

    let source = ScryfallClient::new(Some(&CONFIG.scryfall_url), client, CONFIG.max_search_pages);
    let resolver = PriceResolver::new(source, PriceCache::new())
        .with_negative_cache(CONFIG.negative_cache)
        .with_purchase_vendor(&CONFIG.purchase_vendor);
    let scanner = Scanner::new(
        Arc::clone(&page),
        Arc::new(resolver),
        ViewModeGate::new(&CONFIG.view_mode_selector, &CONFIG.view_mode)?,
        parse_selector(&CONFIG.card_selector)?,
    );
    let coordinator = MutationCoordinator::new(Arc::new(scanner), Timing::from_config(&CONFIG));

    if tokio::time::timeout(CONFIG.session_length(), coordinator.run())
        .await
        .is_ok()
    {
        warn!("Page observer closed before the session ended");
    }

    let path = output_path(&CONFIG);
    let annotated = {
        let mut page = page.lock().await;
        page.disconnect();
        page.to_html()
    };
    save_page(&path, &annotated)?;

    let end_time = chrono::prelude::Local::now();
    info!(
        "Annotation started at: {}. Finished at: {}. Took: {} seconds. Output: {}",
        start_time,
        end_time,
        (end_time - start_time).num_seconds(),
        path
    );
    Ok(())
}
