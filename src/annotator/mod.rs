pub mod link_cluster;
pub mod name_extractor;

pub use link_cluster::Annotator;
pub use name_extractor::NameExtractor;
