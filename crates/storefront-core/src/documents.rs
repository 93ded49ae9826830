//! CMS document shapes consumed by the storefront.
//!
//! Relationship fields arrive either as a bare document id (when the request
//! depth did not reach them) or as the populated document. [`RefValue`] models
//! both; callers decide whether an unresolved id is skipped or fetched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A relationship value: either an unresolved id or the populated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefValue<T> {
    Id(String),
    Doc(T),
}

impl<T> RefValue<T> {
    /// Returns the populated document, or `None` if only the id is known.
    #[must_use]
    pub fn as_doc(&self) -> Option<&T> {
        match self {
            RefValue::Doc(doc) => Some(doc),
            RefValue::Id(_) => None,
        }
    }

    #[must_use]
    pub fn into_doc(self) -> Option<T> {
        match self {
            RefValue::Doc(doc) => Some(doc),
            RefValue::Id(_) => None,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, RefValue::Doc(_))
    }
}

/// A polymorphic relationship entry, as used by archive blocks for
/// `selectedDocs` and `populatedDocs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocReference<T> {
    pub relation_to: String,
    pub value: RefValue<T>,
}

impl<T> DocReference<T> {
    #[must_use]
    pub fn resolved(relation_to: &str, doc: T) -> Self {
        Self {
            relation_to: relation_to.to_owned(),
            value: RefValue::Doc(doc),
        }
    }

    #[must_use]
    pub fn unresolved(relation_to: &str, id: &str) -> Self {
        Self {
            relation_to: relation_to.to_owned(),
            value: RefValue::Id(id.to_owned()),
        }
    }
}

/// Keeps only the populated documents from a list of references, preserving order.
#[must_use]
pub fn resolved_docs<T: Clone>(refs: &[DocReference<T>]) -> Vec<T> {
    refs.iter()
        .filter_map(|r| r.value.as_doc().cloned())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// A product document. Fields the storefront does not read are ignored on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub categories: Vec<RefValue<Category>>,
    /// When set, the product page renders its paywall-gated blocks.
    #[serde(default)]
    pub enable_paywall: bool,
    #[serde(default)]
    pub related_products: Vec<RefValue<Product>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Titles of the populated categories; unresolved ids are skipped.
    #[must_use]
    pub fn category_titles(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter_map(RefValue::as_doc)
            .map(|c| {
                c.title
                    .clone()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| "Untitled category".to_owned())
            })
            .collect()
    }

    /// Populated related products, in CMS order.
    #[must_use]
    pub fn resolved_related(&self) -> Vec<&Product> {
        self.related_products
            .iter()
            .filter_map(RefValue::as_doc)
            .collect()
    }
}
