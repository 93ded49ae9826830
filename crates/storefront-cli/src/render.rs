//! Plain-text rendering of storefront views.

use std::fmt::{self, Write};

use storefront_archive::{ArchiveView, Grid};
use storefront_pages::{FooterView, NavView, ProductPage};

pub fn archive(out: &mut impl Write, view: &ArchiveView) -> fmt::Result {
    if view.is_loading {
        writeln!(out, "Loading...")?;
    }
    if let Some(error) = &view.error {
        writeln!(out, "{error}")?;
    }
    if let Some(range) = &view.page_range {
        writeln!(out, "{range}")?;
    }
    match &view.grid {
        Grid::Cards(cards) => {
            for card in cards {
                write!(out, "- {} ({})", card.title, card.href)?;
                if !card.categories.is_empty() {
                    write!(out, " [{}]", card.categories.join(", "))?;
                }
                writeln!(out)?;
            }
        }
        Grid::Empty { message } => writeln!(out, "{message}")?,
    }
    if let Some(pagination) = &view.pagination {
        let prev = if pagination.has_prev() { "< prev" } else { "" };
        let next = if pagination.has_next() { "next >" } else { "" };
        writeln!(
            out,
            "{prev} Page {}/{} {next}",
            pagination.page, pagination.total_pages
        )?;
    }
    Ok(())
}

pub fn product(out: &mut impl Write, page: &ProductPage) -> fmt::Result {
    writeln!(out, "# {}", page.hero.title)?;
    if !page.hero.categories.is_empty() {
        writeln!(out, "{}", page.hero.categories.join(", "))?;
    }
    if page.show_paywall {
        writeln!(out, "[paywall content]")?;
    }
    if !page.related.cards.is_empty() {
        writeln!(out, "\n## {}", page.related.heading)?;
        for card in &page.related.cards {
            writeln!(out, "- {} ({})", card.title, card.href)?;
        }
    }
    Ok(())
}

pub fn nav(out: &mut impl Write, view: &NavView) -> fmt::Result {
    for link in &view.links {
        let suffix = if link.new_tab { " (new tab)" } else { "" };
        writeln!(out, "{} -> {}{suffix}", link.label, link.href)?;
    }
    Ok(())
}

pub fn footer(out: &mut impl Write, view: &FooterView) -> fmt::Result {
    if view.hidden {
        return Ok(());
    }
    for inclusion in view.inclusions {
        writeln!(out, "* {}: {}", inclusion.title, inclusion.description)?;
    }
    writeln!(out, "{}", view.copyright)?;
    for link in &view.social_links {
        writeln!(out, "{} -> {} [{}]", link.label, link.href, link.icon_url)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_archive::{CardView, PageRange, PaginationView};
    use storefront_pages::NavLink;

    fn rendered(render: impl FnOnce(&mut String) -> fmt::Result) -> String {
        let mut out = String::new();
        render(&mut out).unwrap();
        out
    }

    fn card(title: &str, slug: &str) -> CardView {
        CardView {
            title: title.to_owned(),
            slug: slug.to_owned(),
            href: format!("/products/{slug}"),
            categories: vec!["Accessories".to_owned()],
        }
    }

    #[test]
    fn archive_lists_cards_range_and_pagination() {
        let view = ArchiveView {
            is_loading: false,
            error: None,
            page_range: Some(PageRange::compute(12, 1, "products", 10)),
            grid: Grid::Cards(vec![card("Silk Scarf", "silk-scarf")]),
            pagination: PaginationView::for_results(1, 2),
        };
        assert_eq!(
            rendered(|out| archive(out, &view)),
            "Showing 1 - 10 of 12 Products\n\
             - Silk Scarf (/products/silk-scarf) [Accessories]\n \
             Page 1/2 next >\n"
        );
    }

    #[test]
    fn archive_shows_error_and_placeholder() {
        let view = ArchiveView {
            is_loading: false,
            error: Some("Unable to load \"products archive\" data at this time.".to_owned()),
            page_range: None,
            grid: Grid::Empty {
                message: "No products available".to_owned(),
            },
            pagination: None,
        };
        let text = rendered(|out| archive(out, &view));
        assert!(text.starts_with("Unable to load"));
        assert!(text.ends_with("No products available\n"));
    }

    #[test]
    fn hidden_footer_renders_nothing() {
        assert!(rendered(|out| footer(out, &FooterView::build(None, "/login"))).is_empty());
    }

    #[test]
    fn footer_includes_fallback_copyright() {
        let text = rendered(|out| footer(out, &FooterView::build(None, "/")));
        assert!(text.contains("© Rumor by Lisa Nunes, 2024"));
        assert!(text.contains("* Free Shipping"));
    }

    #[test]
    fn nav_marks_new_tab_links() {
        let view = NavView {
            links: vec![
                NavLink {
                    label: "Shop".to_owned(),
                    href: "/products".to_owned(),
                    new_tab: false,
                },
                NavLink {
                    label: "Journal".to_owned(),
                    href: "https://journal.example.com".to_owned(),
                    new_tab: true,
                },
            ],
        };
        assert_eq!(
            rendered(|out| nav(out, &view)),
            "Shop -> /products\nJournal -> https://journal.example.com (new tab)\n"
        );
    }
}
