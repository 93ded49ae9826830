//! Product detail page.

use storefront_archive::CardView;
use storefront_cms::CmsClient;
use storefront_core::Product;

const PRODUCTS: &str = "products";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductHero {
    pub title: String,
    pub categories: Vec<String>,
}

/// The "Related Products" block under the hero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedProducts {
    pub heading: String,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub slug: String,
    pub hero: ProductHero,
    /// Render the paywall-gated blocks for this product.
    pub show_paywall: bool,
    pub related: RelatedProducts,
    pub product: Product,
}

impl ProductPage {
    #[must_use]
    pub fn from_product(product: Product) -> Self {
        let card = CardView::from_product(PRODUCTS, &product);
        let related = product
            .resolved_related()
            .into_iter()
            .map(|p| CardView::from_product(PRODUCTS, p))
            .collect();

        Self {
            slug: product.slug.clone(),
            hero: ProductHero {
                title: card.title,
                categories: card.categories,
            },
            show_paywall: product.enable_paywall,
            related: RelatedProducts {
                heading: "Related Products".to_owned(),
                cards: related,
            },
            product,
        }
    }
}

/// Loads the product page for `slug`.
///
/// Returns `None` when the page should 404: either no product has that slug
/// or the CMS could not be reached. Failures are logged, not propagated.
pub async fn load_product_page(client: &CmsClient, slug: &str, draft: bool) -> Option<ProductPage> {
    let product = match client.fetch_doc::<Product>(PRODUCTS, slug, draft).await {
        Ok(product) => product,
        Err(e) => {
            tracing::error!(slug, draft, error = %e, "error fetching product");
            None
        }
    };

    let Some(product) = product else {
        tracing::warn!(slug, "product not found");
        return None;
    };

    tracing::debug!(
        slug,
        related = product.related_products.len(),
        paywall = product.enable_paywall,
        "fetched product"
    );
    Some(ProductPage::from_product(product))
}

/// Every product slug, for pre-rendering product routes.
///
/// Returns an empty list (and logs) if the CMS request fails.
pub async fn product_slugs(client: &CmsClient) -> Vec<String> {
    match client.fetch_docs::<Product>(PRODUCTS).await {
        Ok(products) => products.into_iter().map(|p| p.slug).collect(),
        Err(e) => {
            tracing::error!(error = %e, "error listing product slugs");
            Vec::new()
        }
    }
}
