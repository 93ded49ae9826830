mod render;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use storefront_archive::{ArchiveConfig, ArchiveController, CategoryFilter, FilterContext, FilterState};
use storefront_cms::CmsClient;
use storefront_core::{Footer, Header};
use storefront_pages::{load_product_page, product_slugs, FooterView, NavView};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Render storefront views from the CMS")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render one page of the product archive.
    Archive {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Category id to filter by; repeat for several.
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long)]
        sort: Option<String>,
        /// Page size; defaults to STOREFRONT_ARCHIVE_LIMIT.
        #[arg(long)]
        limit: Option<u32>,
        /// Print the raw listing as JSON instead of the rendered view.
        #[arg(long)]
        json: bool,
    },
    /// Render a product detail page.
    Product {
        slug: String,
        #[arg(long)]
        draft: bool,
    },
    /// List every product slug.
    Slugs,
    /// Render the header navigation.
    Nav,
    /// Render the footer as seen on `path`.
    Footer {
        #[arg(long, default_value = "/")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = Arc::new(CmsClient::from_config(&config)?);
    tracing::debug!(env = %config.env, server_url = %config.server_url, "storefront cli starting");

    match cli.command {
        Commands::Archive {
            page,
            categories,
            sort,
            limit,
            json,
        } => {
            let mut archive_config = ArchiveConfig::from_app_config(&config);
            if let Some(limit) = limit {
                archive_config = archive_config.with_limit(limit);
            }
            let archive = ArchiveController::new(Arc::clone(&client), archive_config)?;
            let filters = FilterContext::new(FilterState::new(
                CategoryFilter::from_ids(categories),
                sort.as_deref(),
            ));

            archive.set_page(page);
            archive.mount(&filters);
            archive.settled().await;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&archive.snapshot().results)?
                );
            } else {
                let mut out = String::new();
                render::archive(&mut out, &archive.render())?;
                print!("{out}");
            }
            archive.unmount();
        }
        Commands::Product { slug, draft } => match load_product_page(&client, &slug, draft).await {
            Some(page) => {
                let mut out = String::new();
                render::product(&mut out, &page)?;
                print!("{out}");
            }
            None => anyhow::bail!("product \"{slug}\" not found"),
        },
        Commands::Slugs => {
            for slug in product_slugs(&client).await {
                println!("{slug}");
            }
        }
        Commands::Nav => {
            let header = fetch_global_or_log::<Header>(&client, "header").await;
            let mut out = String::new();
            render::nav(&mut out, &NavView::from_header(header.as_ref()))?;
            print!("{out}");
        }
        Commands::Footer { path } => {
            let footer = fetch_global_or_log::<Footer>(&client, "footer").await;
            let mut out = String::new();
            render::footer(&mut out, &FooterView::build(footer.as_ref(), &path))?;
            print!("{out}");
        }
    }

    Ok(())
}

/// Globals are optional chrome: a failed fetch renders the fallbacks.
async fn fetch_global_or_log<T: serde::de::DeserializeOwned>(
    client: &CmsClient,
    slug: &str,
) -> Option<T> {
    match client.fetch_global::<T>(slug).await {
        Ok(global) => Some(global),
        Err(e) => {
            tracing::warn!(slug, error = %e, "could not load global; using fallbacks");
            None
        }
    }
}
