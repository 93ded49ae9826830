//! "Showing 11 - 20 of 42 Products" summaries.

use std::fmt;

/// Which slice of a listing is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    /// 1-based index of the first doc shown, or 0 when the page is past the end.
    pub start: u64,
    /// 1-based index of the last doc shown.
    pub end: u64,
    pub total_docs: u64,
    pub plural: String,
    pub singular: String,
}

impl PageRange {
    #[must_use]
    pub fn compute(total_docs: u64, current_page: u32, relation: &str, limit: u32) -> Self {
        let page = u64::from(current_page.max(1));
        let limit = u64::from(limit);

        let mut start = (page - 1).saturating_mul(limit).saturating_add(1);
        if start > total_docs {
            start = 0;
        }
        let end = page.saturating_mul(limit).min(total_docs);

        let (plural, singular) = collection_labels(relation);
        Self {
            start,
            end,
            total_docs,
            plural,
            singular,
        }
    }

    fn label(&self) -> &str {
        if self.total_docs > 1 {
            &self.plural
        } else {
            &self.singular
        }
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_docs == 0 {
            return write!(f, "Search produced no results.");
        }
        write!(f, "Showing {}", self.start)?;
        if self.start > 0 {
            write!(f, " - {}", self.end)?;
        }
        write!(f, " of {} {}", self.total_docs, self.label())
    }
}

fn collection_labels(relation: &str) -> (String, String) {
    match relation {
        "products" => ("Products".to_owned(), "Product".to_owned()),
        "categories" => ("Categories".to_owned(), "Category".to_owned()),
        "pages" => ("Pages".to_owned(), "Page".to_owned()),
        other => (other.to_owned(), other.to_owned()),
    }
}
