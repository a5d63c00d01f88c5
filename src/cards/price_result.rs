use serde::{Deserialize, Serialize};

use super::price::Price;
use super::printing::PriceFacet;

/// Cheapest price found for a card and where to buy it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub price: Price,
    pub purchase_url: String,
    pub facet: PriceFacet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    /// None when no printing had a usable price.
    pub quote: Option<PriceQuote>,
    /// Catalog page of the first printing returned.
    pub catalog_url: Option<String>,
    pub companion_url: String,
}

impl PriceResult {
    pub fn has_price(&self) -> bool {
        self.quote.is_some()
    }
}
