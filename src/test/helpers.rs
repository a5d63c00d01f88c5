use std::collections::HashMap;

use crate::cards::cardname::CardName;
use crate::cards::printing::{FacetPrices, RemotePrinting};
use crate::page::{NodeId, Page, Selector};

pub static GALLERY_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Deck gallery</title></head>
<body>
    <select id="viewMode">
        <option value="list">List</option>
        <option value="grid" selected>Grid</option>
    </select>
    <div class="gallery">
        <div class="tile"><div class="card-container"><img src="bolt.jpg" alt="Lightning Bolt"></div></div>
        <div class="tile"><div class="card-container"><img src="rk.jpg" title="Reaper King"></div></div>
        <div class="tile"><div class="card-container"><img src="front.jpg" alt="Front"></div></div>
        <div class="tile">
            <div class="card-container"><img src="fire-ice.jpg"></div>
            <span class="card-name"> Fire // Ice </span>
        </div>
        <div class="tile"><div class="card-container"><img src="loading.gif"></div></div>
    </div>
</body>
</html>"#;

pub fn card_name(raw: &str) -> CardName {
    CardName::new(raw.to_string()).unwrap()
}

/// A printing with a tcgplayer link. Prices are given as base, foil, etched.
pub fn printing(scryfall_uri: &str, purchase_url: &str, prices: [Option<&str>; 3]) -> RemotePrinting {
    let mut card = printing_without_vendor(scryfall_uri, prices);
    card.purchase_uris = Some(HashMap::from([(
        "tcgplayer".to_string(),
        purchase_url.to_string(),
    )]));
    card
}

pub fn printing_without_vendor(scryfall_uri: &str, prices: [Option<&str>; 3]) -> RemotePrinting {
    let [usd, usd_foil, usd_etched] = prices.map(|price| price.map(str::to_string));
    RemotePrinting {
        prices: FacetPrices {
            usd,
            usd_foil,
            usd_etched,
        },
        purchase_uris: None,
        scryfall_uri: Some(scryfall_uri.to_string()),
    }
}

pub fn select(page: &Page, selector: &str) -> Vec<NodeId> {
    page.select(&Selector::parse(selector).unwrap())
}

pub fn select_first(page: &Page, selector: &str) -> NodeId {
    select(page, selector)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("nothing matches {}", selector))
}
