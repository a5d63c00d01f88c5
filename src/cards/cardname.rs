use std::fmt;

use crate::utilities::constants::FACE_INDICATOR_LABELS;

/// Card name as shown on the page. Used as-is for the catalog query and as
/// the cache key, so the comparison is case sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardName {
    raw: String,
}

impl CardName {
    pub fn new(raw: String) -> Result<Self, String> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err("Card name cannot be empty".to_string());
        }

        if Self::is_face_indicator(trimmed) {
            return Err(format!("'{}' is a face label, not a card name", trimmed));
        }

        Ok(CardName {
            raw: trimmed.to_string(),
        })
    }

    pub fn is_face_indicator(label: &str) -> bool {
        let lowercase = label.trim().to_lowercase();
        FACE_INDICATOR_LABELS.contains(&lowercase.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
