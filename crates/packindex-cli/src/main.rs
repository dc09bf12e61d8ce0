//! PackIndex command-line entry point
//!
//! Usage:
//! ```bash
//! # Print every genre with its packs
//! packindex
//!
//! # List genre names only
//! packindex --genres
//!
//! # Show the packs of one genre
//! packindex --genre hip-hop
//! ```

use clap::Parser;
use packindex_cli::{OutputMode, PackIndexConfig, logging};
use tracing::debug;

/// PackIndex - group a sample pack catalog by genre
#[derive(Parser)]
#[command(name = "packindex")]
#[command(about = "Fetch the pack catalog and group packs by genre", long_about = None)]
struct Cli {
    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "PACKINDEX_CONFIG")]
    config: Option<String>,

    /// Catalog URL (overrides config file and PACKINDEX_URL)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Pretty-print the full mapping
    #[arg(long)]
    pretty: bool,

    /// Print genre names only
    #[arg(long, conflicts_with = "genre")]
    genres: bool,

    /// Print the packs of a single genre
    #[arg(long, value_name = "GENRE")]
    genre: Option<String>,
}

impl Cli {
    fn output_mode(&self, config: &PackIndexConfig) -> OutputMode {
        if self.genres {
            OutputMode::Genres
        } else if let Some(genre) = &self.genre {
            OutputMode::Genre(genre.clone())
        } else {
            OutputMode::Full {
                pretty: self.pretty || config.output.pretty,
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PackIndexConfig::from_file(path)?,
        None => PackIndexConfig::default(),
    };

    // Environment overrides the file, flags override both
    config.merge_env();
    if let Some(url) = &cli.url {
        config.source.url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    logging::init(&config.logging.level)?;
    debug!(url = %config.source.url, "Configuration loaded");

    let mode = cli.output_mode(&config);
    let stdout = std::io::stdout();
    packindex_cli::run(&config, &mode, &mut stdout.lock()).await
}
