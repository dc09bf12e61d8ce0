use anyhow::Context;
use packindex_egress::{DEFAULT_PACKS_URL, HttpClientConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackIndexConfig {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_false")]
    pub pretty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl PackIndexConfig {
    /// Load a config file, TOML if the extension says so, YAML otherwise
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid YAML in {}", path.display()))?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("PACKINDEX_URL") {
            self.source.url = val;
        }

        if let Ok(val) = std::env::var("PACKINDEX_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) => self.source.timeout_secs = secs,
                Err(_) => eprintln!(
                    "Warning: Invalid PACKINDEX_TIMEOUT_SECS '{}', using {}",
                    val, self.source.timeout_secs
                ),
            }
        }

        if let Ok(val) = std::env::var("PACKINDEX_LOG_LEVEL") {
            self.logging.level = val;
        }
    }

    pub fn client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout_secs: self.source.timeout_secs,
            connect_timeout_secs: self.source.connect_timeout_secs,
            ..HttpClientConfig::default()
        }
    }
}

fn default_url() -> String {
    DEFAULT_PACKS_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_false() -> bool {
    false
}
