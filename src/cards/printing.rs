use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Finish specific price field of a printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceFacet {
    Base,
    Foil,
    Etched,
}

impl PriceFacet {
    /// Order in which facets are compared when looking for the cheapest price.
    pub const ALL: [PriceFacet; 3] = [PriceFacet::Base, PriceFacet::Foil, PriceFacet::Etched];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetPrices {
    #[serde(default)]
    pub usd: Option<String>,
    #[serde(default)]
    pub usd_foil: Option<String>,
    #[serde(default)]
    pub usd_etched: Option<String>,
}

/// One printing of a card as returned by the Scryfall search endpoint.
/// Only the fields used for pricing are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemotePrinting {
    #[serde(default)]
    pub prices: FacetPrices,
    #[serde(default)]
    pub purchase_uris: Option<HashMap<String, String>>,
    #[serde(default)]
    pub scryfall_uri: Option<String>,
}

impl RemotePrinting {
    pub fn facet_price(&self, facet: PriceFacet) -> Option<&str> {
        match facet {
            PriceFacet::Base => self.prices.usd.as_deref(),
            PriceFacet::Foil => self.prices.usd_foil.as_deref(),
            PriceFacet::Etched => self.prices.usd_etched.as_deref(),
        }
    }

    /// Where to buy this printing: the given vendor's link, or the catalog
    /// page when the vendor has no listing.
    pub fn purchase_url(&self, vendor: &str) -> Option<&str> {
        self.purchase_uris
            .as_ref()
            .and_then(|uris| uris.get(vendor))
            .map(String::as_str)
            .or(self.scryfall_uri.as_deref())
    }
}

/// A page of the Scryfall list object.
#[derive(Debug, Clone, Deserialize)]
pub struct PrintingList {
    #[serde(default)]
    pub data: Vec<RemotePrinting>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
}
