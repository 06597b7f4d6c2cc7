pub mod document;
pub mod fetcher;
pub mod tree;

pub use document::{FeedDocument, FeedFormatError, FeedItem};
pub use fetcher::{fetch, FetchError};
pub use tree::XmlError;
