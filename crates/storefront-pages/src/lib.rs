//! Page-level loaders and the site chrome around the archive.

pub mod footer;
pub mod nav;
pub mod product;

pub use footer::{FooterView, Inclusion, SocialLink};
pub use nav::{NavLink, NavView};
pub use product::{load_product_page, product_slugs, ProductHero, ProductPage, RelatedProducts};
