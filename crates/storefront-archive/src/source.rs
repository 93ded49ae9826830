use std::future::Future;

use storefront_cms::{CmsClient, CmsError, ListingQuery};
use storefront_core::{ListingResult, Product};

/// Where an archive gets its pages from.
///
/// [`CmsClient`] is the production implementation; tests script their own.
pub trait ListingSource: Send + Sync + 'static {
    fn fetch_page(
        &self,
        relation: &str,
        query: &ListingQuery,
    ) -> impl Future<Output = Result<ListingResult<Product>, CmsError>> + Send;
}

impl ListingSource for CmsClient {
    fn fetch_page(
        &self,
        relation: &str,
        query: &ListingQuery,
    ) -> impl Future<Output = Result<ListingResult<Product>, CmsError>> + Send {
        self.fetch_listing::<Product>(relation, query)
    }
}
