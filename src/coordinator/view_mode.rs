use log::debug;

use crate::page::{parse_selector, NodeId, Page, Selector};

/// Lets scans run only while the page's view control shows the card gallery.
#[derive(Debug, Clone)]
pub struct ViewModeGate {
    control: Selector,
    mode: String,
}

impl ViewModeGate {
    pub fn new(control_selector: &str, mode: &str) -> Result<Self, String> {
        Ok(ViewModeGate {
            control: parse_selector(control_selector)?,
            mode: mode.to_string(),
        })
    }

    pub fn is_open(&self, page: &Page) -> bool {
        let Some(control) = page.select_first(&self.control) else {
            debug!("View mode control not found, skipping scan");
            return false;
        };
        let value = current_value(page, control);
        if value.as_deref() != Some(self.mode.as_str()) {
            debug!("View mode is {:?}, waiting for '{}'", value, self.mode);
            return false;
        }
        true
    }
}

/// Value a form control currently holds. For a `<select>` that is the value
/// of the selected option, falling back to the first option.
fn current_value(page: &Page, control: NodeId) -> Option<String> {
    if page.tag(control) != Some("select") {
        return page.attr(control, "value").map(str::to_string);
    }

    let options: Vec<NodeId> = page
        .descendants(control)
        .into_iter()
        .filter(|node| page.tag(*node) == Some("option"))
        .collect();
    let chosen = options
        .iter()
        .copied()
        .find(|option| page.attr(*option, "selected").is_some())
        .or_else(|| options.first().copied())?;

    Some(match page.attr(chosen, "value") {
        Some(value) => value.to_string(),
        None => page.text_content(chosen).trim().to_string(),
    })
}
