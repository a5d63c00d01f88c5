use std::sync::Arc;

use log::{debug, info};
use tokio::task::JoinHandle;

use crate::annotator::{Annotator, NameExtractor};
use crate::cards::cardname::CardName;
use crate::page::{NodeId, Page, Selector, SharedPage};
use crate::price::resolver::PriceResolver;
use crate::price::scryfall_client::CatalogSource;

use super::view_mode::ViewModeGate;

/// One pass over the page: finds cards nobody has taken yet and starts a
/// price lookup for each of them.
pub struct Scanner<S> {
    page: SharedPage,
    resolver: Arc<PriceResolver<S>>,
    gate: ViewModeGate,
    cards: Selector,
    extractor: NameExtractor,
    annotator: Annotator,
}

impl<S: CatalogSource + 'static> Scanner<S> {
    pub fn new(
        page: SharedPage,
        resolver: Arc<PriceResolver<S>>,
        gate: ViewModeGate,
        cards: Selector,
    ) -> Self {
        Scanner {
            page,
            resolver,
            gate,
            cards,
            extractor: NameExtractor::default(),
            annotator: Annotator::new(),
        }
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    /// Returns one handle per card claimed by this scan. Dropping the handles
    /// does not cancel the lookups.
    pub async fn scan(&self) -> Vec<JoinHandle<()>> {
        let claimed = {
            let mut page = self.page.lock().await;
            self.claim_cards(&mut page)
        };
        if !claimed.is_empty() {
            info!("Scan claimed {} new cards", claimed.len());
        }

        claimed
            .into_iter()
            .map(|(card, name)| {
                let page = Arc::clone(&self.page);
                let resolver = Arc::clone(&self.resolver);
                let annotator = self.annotator.clone();
                tokio::spawn(async move {
                    let result = resolver.resolve(&name).await;
                    let mut page = page.lock().await;
                    annotator.annotate(&mut page, card, result.as_ref());
                })
            })
            .collect()
    }

    /// Runs with the page locked so no other scan can claim the same card.
    fn claim_cards(&self, page: &mut Page) -> Vec<(NodeId, CardName)> {
        if !self.gate.is_open(page) {
            return Vec::new();
        }

        let candidates: Vec<NodeId> = page
            .select(&self.cards)
            .into_iter()
            .filter(|card| !Annotator::is_processed(page, *card))
            .collect();

        candidates
            .into_iter()
            .filter_map(|card| {
                let Some(name) = self.extractor.extract(page, card) else {
                    debug!("No card name on element {:?} yet", card);
                    return None;
                };
                self.annotator.claim(page, card).then_some((card, name))
            })
            .collect()
    }
}
