//! Render-ready view models derived from archive state.

use storefront_core::Product;

use crate::page_range::PageRange;

/// Placeholder shown instead of an empty grid.
pub const EMPTY_GRID_MESSAGE: &str = "No products available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveView {
    pub is_loading: bool,
    /// Set only while not loading.
    pub error: Option<String>,
    pub page_range: Option<PageRange>,
    pub grid: Grid,
    /// Present only when there is more than one page.
    pub pagination: Option<PaginationView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grid {
    Cards(Vec<CardView>),
    Empty { message: String },
}

impl Grid {
    #[must_use]
    pub fn from_docs(relation: &str, docs: &[Product]) -> Self {
        if docs.is_empty() {
            return Grid::Empty {
                message: EMPTY_GRID_MESSAGE.to_owned(),
            };
        }
        Grid::Cards(
            docs.iter()
                .map(|doc| CardView::from_product(relation, doc))
                .collect(),
        )
    }

    #[must_use]
    pub fn cards(&self) -> &[CardView] {
        match self {
            Grid::Cards(cards) => cards,
            Grid::Empty { .. } => &[],
        }
    }
}

/// One product tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub slug: String,
    pub href: String,
    pub categories: Vec<String>,
}

impl CardView {
    #[must_use]
    pub fn from_product(relation: &str, product: &Product) -> Self {
        let title = product
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "Untitled".to_owned());
        Self {
            title,
            slug: product.slug.clone(),
            href: format!("/{relation}/{}", product.slug),
            categories: product.category_titles(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub page: u32,
    pub total_pages: u32,
}

impl PaginationView {
    /// Controls are only shown for multi-page results.
    #[must_use]
    pub fn for_results(page: u32, total_pages: u32) -> Option<Self> {
        (total_pages > 1).then_some(Self { page, total_pages })
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub fn prev_page(&self) -> Option<u32> {
        self.has_prev().then(|| self.page - 1)
    }

    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }
}
