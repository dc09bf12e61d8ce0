//! PackIndex CLI
//!
//! Fetches the pack catalog once, groups the packs by genre and prints the
//! result.

pub mod config;
pub mod logging;
pub mod output;

pub use config::PackIndexConfig;
pub use output::OutputMode;

use anyhow::Context;
use packindex_egress::PackFetcher;
use std::io::Write;
use tracing::info;

/// Fetch, group and print according to `mode`
pub async fn run(
    config: &PackIndexConfig,
    mode: &OutputMode,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let fetcher = PackFetcher::new(&config.source.url, &config.client_config())?;
    let groups = fetcher
        .fetch_and_group()
        .await
        .with_context(|| format!("Failed to index packs from {}", config.source.url))?;

    info!(genres = groups.len(), placements = groups.placements(), "Grouped catalog");

    output::render(&groups, mode, out)?;
    out.flush()?;
    Ok(())
}
