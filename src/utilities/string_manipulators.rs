use chrono::{DateTime, Local};
use regex::Regex;

lazy_static::lazy_static! {
    static ref NON_ALPHANUMERIC_RUN: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

pub fn date_time_as_string(dt: Option<DateTime<Local>>, format: Option<&str>) -> String {
    dt.unwrap_or(Local::now())
        .format(format.unwrap_or("%d_%m_%Y-%H-%M"))
        .to_string()
}

/// Lowercases and joins alphanumeric runs with single hyphens,
/// e.g. "Fire // Ice" becomes "fire-ice".
pub fn slugify(input: &str) -> String {
    let lowercase = input.to_lowercase();
    NON_ALPHANUMERIC_RUN
        .replace_all(&lowercase, "-")
        .trim_matches('-')
        .to_string()
}
