pub mod client;
pub mod error;
pub mod query;

pub use client::CmsClient;
pub use error::CmsError;
pub use query::{CategoryFilter, ListingQuery};
