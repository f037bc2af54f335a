//! Configuration loader - YAML settings + .env overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration loaded from trios.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog file with one valid triple per row
    pub csv_path: PathBuf,
    /// Field delimiter of the catalog file
    pub delimiter: char,
    pub columns: Columns,
    /// Tiles per row in the viewer
    pub grid_columns: usize,
    pub title: String,
}

/// Header names of the catalog columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub first: String,
    pub second: String,
    pub third: String,
    pub color_first: String,
    pub color_second: String,
    pub color_third: String,
}

/// Overrides loaded from .env and the process environment
#[derive(Debug, Clone, Default)]
pub struct Env {
    pub csv_path: Option<PathBuf>,
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("TestAppliThesaurus.csv"),
            delimiter: ',',
            columns: Columns::default(),
            grid_columns: 7,
            title: "Flavour Trios".to_string(),
        }
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            first: "A".to_string(),
            second: "B".to_string(),
            third: "C".to_string(),
            color_first: "Color_A".to_string(),
            color_second: "Color_B".to_string(),
            color_third: "Color_C".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("parse config: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }

    fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            anyhow::bail!("delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        if self.grid_columns == 0 {
            anyhow::bail!("grid_columns must be at least 1");
        }
        Ok(())
    }

    /// Apply environment overrides on top of the file settings
    pub fn apply_env(&mut self, env: &Env) {
        if let Some(path) = &env.csv_path {
            tracing::debug!("TRIOS_CSV overrides csv_path: {:?}", path);
            self.csv_path = path.clone();
        }
    }
}

impl Env {
    /// Load overrides from .env file
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        Env {
            csv_path: std::env::var("TRIOS_CSV").ok().map(PathBuf::from),
            log_dir: std::env::var("TRIOS_LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        }
    }
}
