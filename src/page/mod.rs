pub mod dom;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use dom::{Mutation, Page};
pub use ego_tree::NodeId;
pub use scraper::Selector;

/// The page shared between the scan loop and the per-card annotation tasks.
pub type SharedPage = Arc<Mutex<Page>>;

pub fn shared(page: Page) -> SharedPage {
    Arc::new(Mutex::new(page))
}

/// Parses a CSS selector, turning the parser's borrowed error into a message.
pub fn parse_selector(input: &str) -> Result<Selector, String> {
    Selector::parse(input).map_err(|e| format!("Invalid selector '{}': {}", input, e))
}
