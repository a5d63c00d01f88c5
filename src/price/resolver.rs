use log::{debug, error, info};

use crate::cards::cardname::CardName;
use crate::cards::price::Price;
use crate::cards::price_result::{PriceQuote, PriceResult};
use crate::cards::printing::{PriceFacet, RemotePrinting};
use crate::utilities::constants::{DEFAULT_PURCHASE_VENDOR, EDHREC_CARDS_URL};
use crate::utilities::string_manipulators::slugify;

use super::cache::{CacheEntry, PriceCache};
use super::scryfall_client::{CatalogSource, SearchOutcome};

pub struct PriceResolver<S> {
    source: S,
    cache: PriceCache,
    negative_cache: bool,
    purchase_vendor: String,
}

impl<S: CatalogSource> PriceResolver<S> {
    pub fn new(source: S, cache: PriceCache) -> Self {
        PriceResolver {
            source,
            cache,
            negative_cache: true,
            purchase_vendor: DEFAULT_PURCHASE_VENDOR.to_string(),
        }
    }

    /// When disabled, names without a match or without any price are looked
    /// up again on every request instead of being remembered.
    pub fn with_negative_cache(mut self, enabled: bool) -> Self {
        self.negative_cache = enabled;
        self
    }

    pub fn with_purchase_vendor(mut self, vendor: &str) -> Self {
        self.purchase_vendor = vendor.to_string();
        self
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    /// Cheapest price and reference links for `name`. Returns None when the
    /// catalog has no such card or the lookup failed; only the latter is
    /// retried on a later call.
    pub async fn resolve(&self, name: &CardName) -> Option<PriceResult> {
        if let Some(entry) = self.cache.get(name).await {
            debug!("Returning cached price for card: {}", name);
            return match entry {
                CacheEntry::Resolved(result) => Some(result),
                CacheEntry::NoMatch => None,
            };
        }

        let outcome = match self.source.search_printings(name).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Price fetch failed for {}: {}", name, e);
                return None;
            }
        };

        let printings = match outcome {
            SearchOutcome::Printings(printings) if !printings.is_empty() => printings,
            _ => {
                info!("No printings found for card: {}", name);
                if self.negative_cache {
                    self.cache.insert(name.clone(), CacheEntry::NoMatch).await;
                }
                return None;
            }
        };

        let result = build_price_result(name, &printings, &self.purchase_vendor);
        match &result.quote {
            Some(quote) => debug!("Cheapest price for {} is {:?}", name, quote),
            None => info!("No usable price among {} printings of {}", printings.len(), name),
        }
        if result.has_price() || self.negative_cache {
            self.cache
                .insert(name.clone(), CacheEntry::Resolved(result.clone()))
                .await;
        }
        Some(result)
    }
}

pub fn build_price_result(
    name: &CardName,
    printings: &[RemotePrinting],
    purchase_vendor: &str,
) -> PriceResult {
    PriceResult {
        quote: cheapest_quote(printings, purchase_vendor),
        catalog_url: printings
            .first()
            .and_then(|printing| printing.scryfall_uri.clone()),
        companion_url: companion_url(name),
    }
}

/// Walks printings in catalog order and facets in `PriceFacet::ALL` order.
/// Only a strictly lower price replaces the current pick, so the first of
/// several equal prices wins.
pub fn cheapest_quote(printings: &[RemotePrinting], purchase_vendor: &str) -> Option<PriceQuote> {
    let mut cheapest: Option<PriceQuote> = None;

    for printing in printings {
        let Some(purchase_url) = printing.purchase_url(purchase_vendor) else {
            continue;
        };
        for facet in PriceFacet::ALL {
            let Some(raw) = printing.facet_price(facet) else {
                continue;
            };
            let Some(price) = Price::parse(raw) else {
                debug!("Skipping malformed {:?} price '{}'", facet, raw);
                continue;
            };
            if cheapest.as_ref().map_or(true, |current| price < current.price) {
                cheapest = Some(PriceQuote {
                    price,
                    purchase_url: purchase_url.to_string(),
                    facet,
                });
            }
        }
    }

    cheapest
}

pub fn companion_url(name: &CardName) -> String {
    format!("{}/{}", EDHREC_CARDS_URL, slugify(name.as_str()))
}

#[cfg(test)]
mod tests {
    use crate::price::scryfall_client::{FetchError, MockCatalogSource};
    use crate::test::helpers::{card_name, printing, printing_without_vendor};

    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_cheapest_facet_within_printing() {
        let printings = vec![printing(
            "https://scryfall.com/card/a/1",
            "https://shop.example/a-1",
            [Some("12.50"), Some("9.99"), None],
        )];

        let quote = cheapest_quote(&printings, "tcgplayer").unwrap();

        assert_eq!(quote.price, Price::new(9.99));
        assert_eq!(quote.facet, PriceFacet::Foil);
        assert_eq!(quote.purchase_url, "https://shop.example/a-1");
    }

    #[test]
    fn test_cheapest_across_printings_pairs_url_with_variant() {
        let printings = vec![
            printing(
                "https://scryfall.com/card/a/1",
                "https://shop.example/a-1",
                [Some("12.50"), None, None],
            ),
            printing(
                "https://scryfall.com/card/b/2",
                "https://shop.example/b-2",
                [None, Some("9.99"), None],
            ),
            printing(
                "https://scryfall.com/card/c/3",
                "https://shop.example/c-3",
                [Some("10.00"), None, Some("11.00")],
            ),
        ];

        let quote = cheapest_quote(&printings, "tcgplayer").unwrap();

        assert_eq!(quote.price, Price::new(9.99));
        assert_eq!(quote.purchase_url, "https://shop.example/b-2");
    }

    #[test]
    fn test_equal_prices_keep_first_printing() {
        let printings = vec![
            printing(
                "https://scryfall.com/card/a/1",
                "https://shop.example/first",
                [Some("5.00"), None, None],
            ),
            printing(
                "https://scryfall.com/card/b/2",
                "https://shop.example/second",
                [Some("5.00"), None, None],
            ),
        ];

        let quote = cheapest_quote(&printings, "tcgplayer").unwrap();

        assert_eq!(quote.purchase_url, "https://shop.example/first");
    }

    #[test]
    fn test_malformed_prices_are_skipped() {
        let printings = vec![printing(
            "https://scryfall.com/card/a/1",
            "https://shop.example/a-1",
            [Some("oops"), Some(""), Some("3.25")],
        )];

        let quote = cheapest_quote(&printings, "tcgplayer").unwrap();

        assert_eq!(quote.price, Price::new(3.25));
        assert_eq!(quote.facet, PriceFacet::Etched);
    }

    #[test]
    fn test_falls_back_to_catalog_page_without_vendor_link() {
        let printings = vec![printing_without_vendor(
            "https://scryfall.com/card/a/1",
            [Some("0.25"), None, None],
        )];

        let quote = cheapest_quote(&printings, "tcgplayer").unwrap();

        assert_eq!(quote.purchase_url, "https://scryfall.com/card/a/1");
    }

    #[test]
    fn test_catalog_url_comes_from_first_printing() {
        let printings = vec![
            printing(
                "https://scryfall.com/card/a/1",
                "https://shop.example/a-1",
                [Some("20.00"), None, None],
            ),
            printing(
                "https://scryfall.com/card/b/2",
                "https://shop.example/b-2",
                [Some("1.00"), None, None],
            ),
        ];

        let result = build_price_result(&card_name("Reaper King"), &printings, "tcgplayer");

        assert_eq!(
            result.catalog_url.as_deref(),
            Some("https://scryfall.com/card/a/1")
        );
        assert_eq!(result.quote.unwrap().purchase_url, "https://shop.example/b-2");
        assert_eq!(result.companion_url, "https://edhrec.com/cards/reaper-king");
    }

    #[test]
    fn test_companion_url_slug() {
        assert_eq!(
            companion_url(&card_name("Fire // Ice")),
            "https://edhrec.com/cards/fire-ice"
        );
    }

    #[tokio::test]
    async fn test_cached_name_makes_no_network_call() {
        init();
        let cache = PriceCache::new();
        let stored = build_price_result(
            &card_name("Lightning Bolt"),
            &[printing(
                "https://scryfall.com/card/a/1",
                "https://shop.example/a-1",
                [Some("1.00"), None, None],
            )],
            "tcgplayer",
        );
        cache
            .insert(card_name("Lightning Bolt"), CacheEntry::Resolved(stored.clone()))
            .await;

        let mut source = MockCatalogSource::new();
        source.expect_search_printings().never();
        let resolver = PriceResolver::new(source, cache);

        assert_eq!(resolver.resolve(&card_name("Lightning Bolt")).await, Some(stored));
    }

    #[tokio::test]
    async fn test_no_match_is_cached() {
        init();
        let mut source = MockCatalogSource::new();
        source
            .expect_search_printings()
            .times(1)
            .returning(|_| Ok(SearchOutcome::NoMatch));
        let resolver = PriceResolver::new(source, PriceCache::new());
        let name = card_name("Not A Card");

        assert_eq!(resolver.resolve(&name).await, None);
        assert_eq!(resolver.resolve(&name).await, None);
        assert_eq!(resolver.cache().get(&name).await, Some(CacheEntry::NoMatch));
    }

    #[tokio::test]
    async fn test_empty_printing_list_is_a_no_match() {
        init();
        let mut source = MockCatalogSource::new();
        source
            .expect_search_printings()
            .times(1)
            .returning(|_| Ok(SearchOutcome::Printings(Vec::new())));
        let resolver = PriceResolver::new(source, PriceCache::new());

        assert_eq!(resolver.resolve(&card_name("Ghost")).await, None);
        assert_eq!(resolver.resolve(&card_name("Ghost")).await, None);
    }

    #[tokio::test]
    async fn test_negative_cache_can_be_disabled() {
        init();
        let mut source = MockCatalogSource::new();
        source
            .expect_search_printings()
            .times(2)
            .returning(|_| Ok(SearchOutcome::NoMatch));
        let resolver = PriceResolver::new(source, PriceCache::new()).with_negative_cache(false);

        assert_eq!(resolver.resolve(&card_name("Not A Card")).await, None);
        assert_eq!(resolver.resolve(&card_name("Not A Card")).await, None);
        assert!(resolver.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_priceless_result_follows_negative_cache_policy() {
        init();
        let unpriced = || -> Result<SearchOutcome, FetchError> {
            Ok(SearchOutcome::Printings(vec![printing(
                "https://scryfall.com/card/a/1",
                "https://shop.example/a-1",
                [None, None, None],
            )]))
        };

        let mut source = MockCatalogSource::new();
        source
            .expect_search_printings()
            .times(1)
            .returning(move |_| unpriced());
        let resolver = PriceResolver::new(source, PriceCache::new());
        let first = resolver.resolve(&card_name("Oddity")).await.unwrap();
        let second = resolver.resolve(&card_name("Oddity")).await.unwrap();
        assert_eq!(first.quote, None);
        assert_eq!(first.catalog_url.as_deref(), Some("https://scryfall.com/card/a/1"));
        assert_eq!(first, second);

        let mut source = MockCatalogSource::new();
        source
            .expect_search_printings()
            .times(2)
            .returning(move |_| unpriced());
        let resolver = PriceResolver::new(source, PriceCache::new()).with_negative_cache(false);
        assert!(resolver.resolve(&card_name("Oddity")).await.is_some());
        assert!(resolver.resolve(&card_name("Oddity")).await.is_some());
    }

    #[tokio::test]
    async fn test_fetch_errors_are_not_cached() {
        init();
        let mut source = MockCatalogSource::new();
        source
            .expect_search_printings()
            .times(2)
            .returning(|_| Err("connection refused".into()));
        let resolver = PriceResolver::new(source, PriceCache::new());

        assert_eq!(resolver.resolve(&card_name("Lightning Bolt")).await, None);
        assert_eq!(resolver.resolve(&card_name("Lightning Bolt")).await, None);
        assert!(resolver.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_resolved_price_is_cached_by_exact_name() {
        init();
        let mut source = MockCatalogSource::new();
        source
            .expect_search_printings()
            .withf(|name| name.as_str() == "Bolt")
            .times(1)
            .returning(|_| {
                Ok(SearchOutcome::Printings(vec![printing(
                    "https://scryfall.com/card/a/1",
                    "https://shop.example/a-1",
                    [Some("1.50"), None, None],
                )]))
            });
        source
            .expect_search_printings()
            .withf(|name| name.as_str() == "bolt")
            .times(1)
            .returning(|_| Ok(SearchOutcome::NoMatch));
        let resolver = PriceResolver::new(source, PriceCache::new());

        let result = resolver.resolve(&card_name("Bolt")).await.unwrap();
        assert_eq!(result.quote.unwrap().price, Price::new(1.5));
        assert!(resolver.resolve(&card_name("Bolt")).await.is_some());
        assert_eq!(resolver.resolve(&card_name("bolt")).await, None);
        assert_eq!(resolver.cache().len().await, 2);
    }

    #[tokio::test]
    async fn test_purchase_vendor_is_configurable() {
        init();
        let mut source = MockCatalogSource::new();
        source.expect_search_printings().returning(|_| {
            let mut card = printing(
                "https://scryfall.com/card/a/1",
                "https://shop.example/a-1",
                [Some("2.00"), None, None],
            );
            if let Some(uris) = card.purchase_uris.as_mut() {
                uris.insert(
                    "cardmarket".to_string(),
                    "https://cardmarket.example/a-1".to_string(),
                );
            }
            Ok(SearchOutcome::Printings(vec![card]))
        });
        let resolver =
            PriceResolver::new(source, PriceCache::new()).with_purchase_vendor("cardmarket");

        let result = resolver.resolve(&card_name("Lightning Bolt")).await.unwrap();
        assert_eq!(
            result.quote.unwrap().purchase_url,
            "https://cardmarket.example/a-1"
        );
    }
}
