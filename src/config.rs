//! TOML configuration.
//!
//! ```toml
//! [db]
//! path = "./data/wear.sqlite"
//! max_connections = 5
//! busy_timeout_ms = 5000
//!
//! [server]
//! bind = "127.0.0.1:9000"
//!
//! [engine]
//! freshness_hours = 24
//! accessory_cap = 2
//!
//! # Optional: replaces the built-in palette entirely.
//! [palette]
//! groups = { navy = "cool-dark", white = "neutral" }
//! compatible = [["cool-dark", "neutral"], ["neutral", "neutral"]]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use wearsuggest_core::assembler::{DEFAULT_ACCESSORY_CAP, DEFAULT_FRESHNESS_HOURS};
use wearsuggest_core::{AssemblyPolicy, ColorTable};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub palette: Option<PaletteConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long a writer waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_max_connections() -> u32 {
    5
}
fn default_busy_timeout_ms() -> u64 {
    5_000
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:9000".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_freshness_hours")]
    pub freshness_hours: i64,
    #[serde(default = "default_accessory_cap")]
    pub accessory_cap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            freshness_hours: DEFAULT_FRESHNESS_HOURS,
            accessory_cap: DEFAULT_ACCESSORY_CAP,
        }
    }
}

fn default_freshness_hours() -> i64 {
    DEFAULT_FRESHNESS_HOURS
}
fn default_accessory_cap() -> usize {
    DEFAULT_ACCESSORY_CAP
}

/// Custom palette. Both fields are required when the section is present.
#[derive(Debug, Deserialize, Clone)]
pub struct PaletteConfig {
    pub groups: HashMap<String, String>,
    pub compatible: Vec<(String, String)>,
}

impl EngineConfig {
    /// Fails when `freshness_hours` does not fit a `chrono::Duration`.
    pub fn policy(&self) -> Result<AssemblyPolicy> {
        let freshness_window = chrono::Duration::try_hours(self.freshness_hours)
            .with_context(|| {
                format!(
                    "engine.freshness_hours is out of range: {}",
                    self.freshness_hours
                )
            })?;
        Ok(AssemblyPolicy {
            freshness_window,
            accessory_cap: self.accessory_cap,
        })
    }
}

impl Config {
    /// Builds the palette: the `[palette]` section when present, otherwise
    /// the built-in table.
    pub fn color_table(&self) -> Result<Arc<ColorTable>> {
        let table = match &self.palette {
            Some(p) => ColorTable::new(p.groups.clone(), p.compatible.clone())
                .context("Invalid [palette] section")?,
            None => ColorTable::default(),
        };
        Ok(Arc::new(table))
    }

    /// Default configuration around a database path, without a config file.
    pub fn minimal(db_path: PathBuf) -> Self {
        Self {
            db: DbConfig {
                path: db_path,
                max_connections: default_max_connections(),
                busy_timeout_ms: default_busy_timeout_ms(),
            },
            server: ServerConfig {
                bind: default_bind(),
            },
            engine: EngineConfig::default(),
            palette: None,
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.db.max_connections == 0 {
        anyhow::bail!("db.max_connections must be >= 1");
    }

    // Validate engine
    if config.engine.freshness_hours < 0 {
        anyhow::bail!("engine.freshness_hours must be >= 0");
    }
    if config.engine.accessory_cap > 10 {
        anyhow::bail!("engine.accessory_cap must be <= 10");
    }
    config.engine.policy()?;

    // Validate palette
    config.color_table()?;

    Ok(config)
}
