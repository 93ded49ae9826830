//! Collection archive: a paginated, filterable grid of CMS documents.
//!
//! [`ArchiveController`] owns the listing state and keeps it current as the
//! page, the shared filters, or its own configuration change. Views are
//! derived on demand with [`ArchiveController::render`].

pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod page_range;
pub mod source;
pub mod view;

pub use config::{ArchiveConfig, PopulationMode, ResultCallback};
pub use controller::{ArchiveController, ArchiveSnapshot};
pub use error::ArchiveError;
pub use filter::{FilterContext, FilterSource, FilterState};
pub use page_range::PageRange;
pub use source::ListingSource;
pub use storefront_cms::CategoryFilter;
pub use view::{ArchiveView, CardView, Grid, PaginationView};
