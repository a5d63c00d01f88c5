use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cards::cardname::CardName;
use crate::cards::price_result::PriceResult;

#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    Resolved(PriceResult),
    /// The catalog confirmed it has no printings with this exact name.
    NoMatch,
}

/// Lookups already made this session, keyed by exact card name. Clones share
/// the same storage. Entries are never evicted.
#[derive(Debug, Clone, Default)]
pub struct PriceCache {
    entries: Arc<Mutex<HashMap<CardName, CacheEntry>>>,
}

impl PriceCache {
    pub fn new() -> Self {
        PriceCache::default()
    }

    pub async fn get(&self, name: &CardName) -> Option<CacheEntry> {
        let entries = self.entries.lock().await;
        entries.get(name).cloned()
    }

    pub async fn insert(&self, name: CardName, entry: CacheEntry) {
        let mut entries = self.entries.lock().await;
        entries.insert(name, entry);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
