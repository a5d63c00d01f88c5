use log::debug;

use crate::cards::price_result::PriceResult;
use crate::page::{NodeId, Page};
use crate::utilities::constants::{
    CATALOG_LINK_CLASS, CATALOG_LINK_LABEL, COMPANION_LINK_CLASS, COMPANION_LINK_LABEL,
    LINK_CLUSTER_CLASS, MARKER_DONE, MARKER_PENDING, PRICE_LINK_CLASS, PROCESSED_MARKER_ATTR,
};

/// Puts price links under card elements and keeps track of which elements
/// have been handled through the processed marker attribute.
#[derive(Debug, Clone, Default)]
pub struct Annotator;

impl Annotator {
    pub fn new() -> Self {
        Annotator
    }

    pub fn is_processed(page: &Page, element: NodeId) -> bool {
        page.attr(element, PROCESSED_MARKER_ATTR).is_some()
    }

    /// Marks `element` as taken before its price is looked up. Returns false
    /// if some earlier scan already took it.
    pub fn claim(&self, page: &mut Page, element: NodeId) -> bool {
        if Self::is_processed(page, element) {
            return false;
        }
        page.set_attr(element, PROCESSED_MARKER_ATTR, MARKER_PENDING);
        true
    }

    /// Inserts the link cluster for `result`. Does nothing for an element that
    /// was already annotated, or when there is no price to show.
    pub fn annotate(&self, page: &mut Page, element: NodeId, result: Option<&PriceResult>) {
        if page.attr(element, PROCESSED_MARKER_ATTR) == Some(MARKER_DONE) {
            return;
        }
        page.set_attr(element, PROCESSED_MARKER_ATTR, MARKER_DONE);

        let Some(result) = result else {
            return;
        };
        let Some(quote) = &result.quote else {
            debug!("No price to show for element {:?}", element);
            return;
        };

        let cluster = page.create_element("div", &[("class", LINK_CLUSTER_CLASS)]);
        let price_label = quote.price.to_string();
        let price_link = Self::link(page, PRICE_LINK_CLASS, &quote.purchase_url, &price_label);
        page.append_child(cluster, price_link);

        if let Some(catalog_url) = &result.catalog_url {
            let catalog_link = Self::link(page, CATALOG_LINK_CLASS, catalog_url, CATALOG_LINK_LABEL);
            page.append_child(cluster, catalog_link);
        }
        if !result.companion_url.is_empty() {
            let companion_link = Self::link(
                page,
                COMPANION_LINK_CLASS,
                &result.companion_url,
                COMPANION_LINK_LABEL,
            );
            page.append_child(cluster, companion_link);
        }

        if !page.insert_after(element, cluster) {
            page.append_child(element, cluster);
        }
    }

    fn link(page: &mut Page, class: &str, href: &str, label: &str) -> NodeId {
        let anchor = page.create_element(
            "a",
            &[
                ("class", class),
                ("href", href),
                ("target", "_blank"),
                ("rel", "noopener noreferrer"),
            ],
        );
        page.set_text(anchor, label);
        anchor
    }
}
