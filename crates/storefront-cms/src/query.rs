//! Query-string construction for the CMS collection endpoints.
//!
//! The CMS accepts nested `where` clauses in bracket notation. Reserved
//! characters are left unencoded so the query reads the same as the one the
//! storefront has always sent:
//!
//! ```text
//! sort=-createdAt&where[categories][in]=cat-a,cat-b&limit=10&page=2&depth=1
//! ```
//!
//! A single category filter is sent as a one-element array instead:
//!
//! ```text
//! where[categories][in][0]=cat-a
//! ```
//!
//! Only characters that would change the structure of the URL (`&`, `=`,
//! `#`, `%`, `+`, whitespace and controls) are percent-encoded inside values.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside query values. Brackets and commas pass through.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`');

/// Characters escaped inside a single URL path segment.
pub(crate) const PATH_SEGMENT: &AsciiSet = &QUERY_VALUE.add(b'/').add(b'?').add(b'{').add(b'}');

/// Default page size for collection listings.
pub const DEFAULT_LIMIT: u32 = 10;

/// Relation depth for archive listings: referenced documents are populated
/// one level deep.
pub const ARCHIVE_DEPTH: u32 = 1;

/// The category filter currently applied to an archive.
///
/// The shared filter context hands over either one id or a list of ids; the
/// two serialize differently, so the distinction is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    None,
    Single(String),
    Many(Vec<String>),
}

impl CategoryFilter {
    /// Builds a filter from a list of ids; an empty list means no filter.
    #[must_use]
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            CategoryFilter::None
        } else {
            CategoryFilter::Many(ids)
        }
    }

    /// `true` when no `where[categories]` clause should be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            CategoryFilter::None => true,
            CategoryFilter::Single(id) => id.is_empty(),
            CategoryFilter::Many(ids) => ids.is_empty(),
        }
    }

    /// The filter's members in order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        match self {
            CategoryFilter::None => Vec::new(),
            CategoryFilter::Single(id) => vec![id.as_str()],
            CategoryFilter::Many(ids) => ids.iter().map(String::as_str).collect(),
        }
    }
}

/// Parameters for one page of a collection listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub sort: Option<String>,
    pub categories: CategoryFilter,
    pub limit: u32,
    pub page: u32,
    pub depth: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            sort: None,
            categories: CategoryFilter::None,
            limit: DEFAULT_LIMIT,
            page: 1,
            depth: ARCHIVE_DEPTH,
        }
    }
}

impl ListingQuery {
    /// Serializes the query in bracket notation, without a leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(String, String)> = Vec::with_capacity(5);

        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_owned(), sort.clone()));
        }

        if !self.categories.is_empty() {
            match &self.categories {
                CategoryFilter::Single(id) => {
                    pairs.push(("where[categories][in][0]".to_owned(), id.clone()));
                }
                filter => {
                    pairs.push(("where[categories][in]".to_owned(), filter.ids().join(",")));
                }
            }
        }

        pairs.push(("limit".to_owned(), self.limit.to_string()));
        pairs.push(("page".to_owned(), self.page.to_string()));
        pairs.push(("depth".to_owned(), self.depth.to_string()));

        join_pairs(&pairs)
    }
}

/// Query for a single document looked up by slug.
#[must_use]
pub fn slug_query(slug: &str, draft: bool) -> String {
    let mut pairs = vec![
        ("where[slug][equals]".to_owned(), slug.to_owned()),
        ("limit".to_owned(), "1".to_owned()),
        ("depth".to_owned(), ARCHIVE_DEPTH.to_string()),
    ];
    if draft {
        pairs.push(("draft".to_owned(), "true".to_owned()));
    }
    join_pairs(&pairs)
}

fn join_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", utf8_percent_encode(value, QUERY_VALUE)))
        .collect::<Vec<_>>()
        .join("&")
}
