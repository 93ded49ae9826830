use storefront_core::{Footer, RefValue};

pub const DEFAULT_COPYRIGHT: &str = "© Rumor by Lisa Nunes, 2024";
pub const DEFAULT_SOCIAL_ICON: &str = "/default-icon.svg";

/// Routes rendered without header and footer.
pub const NO_HEADER_FOOTER_URLS: &[&str] = &["/create-account", "/login"];

/// A store promise shown above the footer bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inclusion {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const INCLUSIONS: &[Inclusion] = &[
    Inclusion {
        title: "Free Shipping",
        description: "Free shipping for orders above $50",
        icon: "/assets/icons/shipping.svg",
    },
    Inclusion {
        title: "Guaranteed Satisfaction",
        description: "Guaranteed satisfaction with every purchase",
        icon: "/assets/icons/dollar.svg",
    },
    Inclusion {
        title: "Secure Payments",
        description: "Secure payments handled by Stripe",
        icon: "/assets/icons/secure.svg",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    pub hidden: bool,
    pub inclusions: &'static [Inclusion],
    pub copyright: String,
    /// Always opened in a new tab.
    pub social_links: Vec<SocialLink>,
}

impl FooterView {
    #[must_use]
    pub fn build(footer: Option<&Footer>, pathname: &str) -> Self {
        let copyright = footer
            .and_then(|f| f.copyright.clone())
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COPYRIGHT.to_owned());

        let social_links = footer
            .and_then(|f| f.nav_items.as_deref())
            .unwrap_or_default()
            .iter()
            .filter_map(|item| {
                let href = item.link.href()?;
                let icon_url = item
                    .link
                    .icon
                    .as_ref()
                    .and_then(RefValue::as_doc)
                    .and_then(|media| media.url.clone())
                    .unwrap_or_else(|| DEFAULT_SOCIAL_ICON.to_owned());
                Some(SocialLink {
                    label: item.link.label.clone().unwrap_or_default(),
                    href,
                    icon_url,
                })
            })
            .collect();

        Self {
            hidden: NO_HEADER_FOOTER_URLS.contains(&pathname),
            inclusions: INCLUSIONS,
            copyright,
            social_links,
        }
    }
}
