use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Where exam assets are fetched from
    pub source: SourceConfig,

    /// Session flag store settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Exam source type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    // @source: Static site over HTTP(S)
    #[default]
    Http,
    // @source: Local directory of JSON files
    Directory,
}

impl SourceKind {
    // @returns: Lowercase source identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Http => "http".to_string(),
            Self::Directory => "directory".to_string(),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "directory" | "dir" => Ok(Self::Directory),
            _ => Err(anyhow!("Invalid source type: {}", s)),
        }
    }
}

/// Exam source configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SourceConfig {
    // @field: Source type
    #[serde(rename = "type", default)]
    pub kind: SourceKind,

    // @field: Base URL or directory
    #[serde(default = "default_location")]
    pub location: String,

    // @field: Manifest path relative to the location
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            location: default_location(),
            index_file: default_index_file(),
        }
    }
}

/// Session store configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SessionConfig {
    /// SQLite file holding the session flags; the user data directory is used when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_location() -> String {
    "http://localhost:8000/data".to_string()
}

fn default_index_file() -> String {
    "index.json".to_string()
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.source.location.trim().is_empty() {
            return Err(anyhow!("Source location must not be empty"));
        }

        if self.source.index_file.trim().is_empty() {
            return Err(anyhow!("Index file path must not be empty"));
        }

        if self.source.kind == SourceKind::Http {
            url::Url::parse(&self.source.location)
                .with_context(|| format!("Source location is not a valid URL: {}", self.source.location))?;
        }

        Ok(())
    }

    /// Load a configuration file, writing a default one if it does not exist yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: SourceConfig::default(),
            session: SessionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
