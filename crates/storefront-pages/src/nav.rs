use storefront_core::Header;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    pub new_tab: bool,
}

/// Header navigation links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavView {
    pub links: Vec<NavLink>,
}

impl NavView {
    /// Builds the nav from the header global. A missing header or item list
    /// yields an empty nav; items without a resolvable target are skipped.
    #[must_use]
    pub fn from_header(header: Option<&Header>) -> Self {
        let items = header
            .and_then(|h| h.nav_items.as_deref())
            .unwrap_or_default();
        tracing::debug!(nav_items = items.len(), "building header nav");

        let links = items
            .iter()
            .filter_map(|item| {
                let href = item.link.href()?;
                Some(NavLink {
                    label: item.link.label.clone().unwrap_or_else(|| href.clone()),
                    href,
                    new_tab: item.link.new_tab.unwrap_or(false),
                })
            })
            .collect();
        Self { links }
    }
}
