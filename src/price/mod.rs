pub mod cache;
pub mod resolver;
pub mod scryfall_client;
