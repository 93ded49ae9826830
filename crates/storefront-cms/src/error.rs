use thiserror::Error;

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed as JSON but carried no `docs` array.
    #[error("listing response for \"{relation}\" has no docs array")]
    MalformedListing { relation: String },

    #[error("invalid CMS base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl CmsError {
    /// Returns `true` for a listing payload that parsed but is not listing-shaped.
    #[must_use]
    pub fn is_malformed_listing(&self) -> bool {
        matches!(self, CmsError::MalformedListing { .. })
    }
}
