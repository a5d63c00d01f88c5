use log::debug;

use crate::cards::cardname::CardName;
use crate::page::{NodeId, Page, Selector};

/// One way of reading a card label off an element.
pub type Extractor = fn(&Page, NodeId) -> Option<String>;

const IMAGE_LABEL_ATTRIBUTES: [&str; 3] = ["alt", "title", "data-name"];

lazy_static::lazy_static! {
    static ref IMAGE: Selector = Selector::parse("img").unwrap();
    static ref NAME_LABEL: Selector =
        Selector::parse(r#"[class*="name"], [class*="card-name"]"#).unwrap();
}

/// Reads card names from gallery elements by trying each extractor in turn.
/// The first label found is used even if it turns out to be a face label.
pub struct NameExtractor {
    extractors: Vec<(&'static str, Extractor)>,
}

impl Default for NameExtractor {
    fn default() -> Self {
        NameExtractor {
            extractors: vec![
                ("own image", from_own_image as Extractor),
                ("nested image", from_nested_image as Extractor),
                ("name label", from_name_label as Extractor),
            ],
        }
    }
}

impl NameExtractor {
    pub fn new(extractors: Vec<(&'static str, Extractor)>) -> Self {
        NameExtractor { extractors }
    }

    pub fn extract(&self, page: &Page, element: NodeId) -> Option<CardName> {
        let (source, label) = self
            .extractors
            .iter()
            .find_map(|(source, extractor)| extractor(page, element).map(|label| (source, label)))?;

        if CardName::is_face_indicator(&label) {
            debug!("Ignoring face label '{}' from {}", label, source);
            return None;
        }
        CardName::new(label).ok()
    }
}

fn image_label(page: &Page, image: NodeId) -> Option<String> {
    IMAGE_LABEL_ATTRIBUTES
        .iter()
        .filter_map(|attribute| page.attr(image, attribute))
        .map(str::trim)
        .find(|label| !label.is_empty())
        .map(str::to_string)
}

pub fn from_own_image(page: &Page, element: NodeId) -> Option<String> {
    if page.tag(element) != Some("img") {
        return None;
    }
    image_label(page, element)
}

pub fn from_nested_image(page: &Page, element: NodeId) -> Option<String> {
    let image = page.find_descendant(element, &IMAGE)?;
    image_label(page, image)
}

pub fn from_name_label(page: &Page, element: NodeId) -> Option<String> {
    std::iter::once(Some(element))
        .chain(std::iter::once(page.parent(element)))
        .flatten()
        .find_map(|scope| {
            let label = page.find_descendant(scope, &NAME_LABEL)?;
            let text = page.text_content(label).trim().to_string();
            (!text.is_empty()).then_some(text)
        })
}
