pub const SCRYFALL_API_URL: &str = "https://api.scryfall.com";
pub const SCRYFALL_SEARCH_PATH: &str = "/cards/search";
pub const EDHREC_CARDS_URL: &str = "https://edhrec.com/cards";

pub const DEFAULT_PURCHASE_VENDOR: &str = "tcgplayer";
pub const DEFAULT_MAX_SEARCH_PAGES: usize = 1;

pub const STARTUP_DELAY_MS: u64 = 2000;
pub const DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_SESSION_SECONDS: u64 = 30;

pub const DEFAULT_VIEW_MODE: &str = "grid";
pub const DEFAULT_VIEW_MODE_SELECTOR: &str = "select#viewMode";
pub const DEFAULT_CARD_SELECTOR: &str = ".card-container";

pub const FACE_INDICATOR_LABELS: [&str; 3] = ["front", "back", "transform"];

pub const PROCESSED_MARKER_ATTR: &str = "data-price-annotator";
pub const MARKER_PENDING: &str = "pending";
pub const MARKER_DONE: &str = "done";

pub const LINK_CLUSTER_CLASS: &str = "mtg-price-links";
pub const PRICE_LINK_CLASS: &str = "mtg-price-link";
pub const CATALOG_LINK_CLASS: &str = "mtg-price-scryfall";
pub const COMPANION_LINK_CLASS: &str = "mtg-price-edhrec";
pub const CATALOG_LINK_LABEL: &str = "Scryfall";
pub const COMPANION_LINK_LABEL: &str = "EDHREC";

pub const OUTPUT_FILE_PREFIX: &str = "annotated_";
