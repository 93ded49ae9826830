//! Single-document and bulk-document lookups used by page loaders.

use serde::de::DeserializeOwned;
use storefront_core::ListingResult;

use crate::error::CmsError;
use crate::query::slug_query;

use super::{decode_listing, CmsClient};

/// Upper bound on documents returned by [`CmsClient::fetch_docs`].
pub(super) const BULK_LIMIT: u32 = 300;

impl CmsClient {
    /// Looks up one document of `collection` by slug.
    ///
    /// Returns `Ok(None)` when no document matches. `draft` asks the CMS for
    /// the latest draft version instead of the published one.
    ///
    /// # Errors
    ///
    /// Propagates any error from the listing request (see
    /// [`CmsClient::fetch_listing`]).
    pub async fn fetch_doc<T: DeserializeOwned>(
        &self,
        collection: &str,
        slug: &str,
        draft: bool,
    ) -> Result<Option<T>, CmsError> {
        let url = self.collection_url(collection, &slug_query(slug, draft))?;
        tracing::debug!(collection, slug, draft, "fetching document by slug");
        let body = self.get_listing_json(&url, collection).await?;
        let listing: ListingResult<T> = decode_listing(collection, body)?;
        Ok(listing.docs.into_iter().next())
    }

    /// Fetches every document of `collection`, up to [`BULK_LIMIT`], without
    /// populating relationships.
    ///
    /// # Errors
    ///
    /// Propagates any error from the listing request.
    pub async fn fetch_docs<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, CmsError> {
        let url =
            self.collection_url(collection, &format!("limit={BULK_LIMIT}&depth=0"))?;
        let body = self.get_listing_json(&url, collection).await?;
        let listing: ListingResult<T> = decode_listing(collection, body)?;
        if listing.has_next_page {
            tracing::warn!(
                collection,
                total_docs = listing.total_docs,
                limit = BULK_LIMIT,
                "bulk fetch truncated; only the first page was returned"
            );
        }
        Ok(listing.docs)
    }
}
