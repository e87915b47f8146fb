mod helpers;

use anyhow::{Context, Result, bail};
use std::{env, path::PathBuf, sync::Arc};
use tracing_subscriber::EnvFilter;

use compat_tree::{Config, FlatDataDownloader, Item, TreeDownloader};
use helpers::{choose_item, choose_one, item_label};

const CONFIG_ENV: &str = "COMPAT_TREE_CONFIG";

fn construct_config_file_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources").join("config.json")
}

/// `COMPAT_TREE_CONFIG` (inline JSON) wins, then a path given as the first
/// argument, then the bundled `resources/config.json`.
fn load_config() -> Result<Config> {
    if env::var_os(CONFIG_ENV).is_some() {
        return Config::from_env(CONFIG_ENV).with_context(|| format!("read config from ${CONFIG_ENV}"));
    }

    let path = env::args_os().nth(1).map(PathBuf::from).unwrap_or_else(construct_config_file_path);
    Config::from_file(&path).with_context(|| format!("read config from {}", path.display()))
}

/// A tiny wrapper to render the final selection cleanly
fn print_selection(item: &Item) {
    println!("\n=== Selection ===");
    println!("Name:        {}", item.name());
    println!("Type:        {}", item.item_type());
    println!("URL:         {}", if item.url().is_empty() { "<none>" } else { item.url() });
    println!("Breadcrumbs: {}", item.breadcrumbs().join(" > "));
    if let Some(root) = item.root_parent() {
        println!("Root:        {}", root.name());
    }
}

/// Descend one fetch at a time until a file is picked. Every level stays
/// alive in `path` so back-references keep resolving.
async fn browse_tree(config: Arc<Config>) -> Result<()> {
    let tokens = config.env_token_provider();
    let downloader = TreeDownloader::new(config.clone(), tokens);

    let mut path: Vec<Arc<Item>> = Vec::new();
    tracing::debug!(url = %config.root_url(), "fetching top-level entries");
    let mut level = downloader.download_tree_data(None).await?;

    loop {
        let title = match path.last() {
            Some(current) => current.breadcrumbs().join(" > "),
            None => config.higher_level_label().to_string(),
        };

        let Some(chosen) = choose_item(&title, &level)? else {
            println!("No selection made");
            return Ok(());
        };

        if !chosen.is_directory() {
            print_selection(&chosen);
            return Ok(());
        }

        tracing::debug!(url = chosen.url(), "fetching children");
        let children = downloader
            .download_tree_data(Some(&chosen))
            .await
            .with_context(|| format!("fetch children of '{}'", chosen.name()))?;
        if children.is_empty() {
            bail!("'{}' has no entries", item_label(&chosen));
        }

        tracing::debug!(count = children.len(), "level downloaded");
        path.push(chosen);
        level = children;
    }
}

async fn list_flat_index(config: Arc<Config>) -> Result<()> {
    let tokens = config.env_token_provider();
    let downloader = FlatDataDownloader::new(config.clone(), tokens);

    let items = downloader.download_flat_data().await?;
    tracing::info!(cache_key = config.cache_key(), count = items.len(), "flat index loaded");

    for item in &items {
        println!("{}  [{}]", item.breadcrumbs().join(" > "), item_label(item));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Arc::new(load_config()?);

    match choose_one("Select Source", vec!["Browse tree", "Flat index"])?.as_deref() {
        Some("Browse tree") => browse_tree(config).await,
        Some("Flat index") => list_flat_index(config).await,
        Some(other) => bail!("Unsupported source '{other}'"),
        None => {
            println!("No selection made");
            Ok(())
        }
    }
}
