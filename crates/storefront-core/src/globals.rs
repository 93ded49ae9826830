//! Site-wide header and footer globals.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A CMS link field. `reference` links point at another document; `custom`
/// links carry a literal URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub new_tab: Option<bool>,
    #[serde(default)]
    pub reference: Option<LinkReference>,
    /// Only populated on footer social links.
    #[serde(default)]
    pub icon: Option<crate::documents::RefValue<Media>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReference {
    pub relation_to: String,
    pub value: crate::documents::RefValue<ReferencedPage>,
}

/// Minimal view of a linked document: only its slug is needed to build a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencedPage {
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub link: Link,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[serde(default)]
    pub nav_items: Option<Vec<NavItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub nav_items: Option<Vec<NavItem>>,
}

impl Link {
    /// Resolves the link target.
    ///
    /// Reference links map to `/{slug}` (pages) or `/{relation}/{slug}` for
    /// other collections; the home page slug `home` maps to `/`. Custom links
    /// return their URL as-is.
    #[must_use]
    pub fn href(&self) -> Option<String> {
        if self.kind.as_deref() == Some("reference") {
            let reference = self.reference.as_ref()?;
            let slug = reference.value.as_doc()?.slug.as_deref()?;
            return Some(match (reference.relation_to.as_str(), slug) {
                ("pages", "home") => "/".to_owned(),
                ("pages", slug) => format!("/{slug}"),
                (relation, slug) => format!("/{relation}/{slug}"),
            });
        }
        self.url.clone()
    }
}
