//! # Configuration
//!
//! TOML configuration for the catalog: where the store lives, which source files the
//! importer reads, and how logging is set up.
//!
//! ```toml
//! [catalog]
//! name = "Risk of Rain 2 Wiki"
//!
//! [storage]
//! data_dir = "./data"
//!
//! [import]
//! monster_file = "./data-dump/monster-data.csv"
//! item_file = "./data-dump/item-data.csv"
//! survivor_file = "./data-dump/survivor-data.csv"
//! delimiter = ","
//!
//! [logging]
//! level = "info"
//! file = "ror2wiki.log"
//! ```
//!
//! Source paths can be overridden per run on the command line; CLI args take precedence
//! over the config file, which takes precedence over defaults.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

use crate::catalog::{CatalogError, ImportSources};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Site title shown on the landing page and in `status`.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    /// Optional override for the sled database path; defaults to `<data_dir>/catalog`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub monster_file: String,
    pub item_file: String,
    pub survivor_file: String,
    /// Field separator for all three sources. Must be a single ASCII character.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_delimiter() -> String {
    ",".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub import: ImportConfig,
    pub logging: LoggingConfig,
}

impl ImportConfig {
    pub fn sources(&self) -> ImportSources {
        ImportSources {
            monsters: PathBuf::from(&self.monster_file),
            items: PathBuf::from(&self.item_file),
            survivors: PathBuf::from(&self.survivor_file),
        }
    }

    /// The delimiter as a byte. `"\t"` and `"tab"` both mean a tab.
    pub fn delimiter_byte(&self) -> Result<u8, CatalogError> {
        match self.delimiter.as_str() {
            "\\t" | "tab" => Ok(b'\t'),
            s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
            other => Err(CatalogError::InvalidDelimiter(other.to_string())),
        }
    }
}

impl LoggingConfig {
    /// Parsed level filter; unknown values fall back to `info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Location of the sled database.
    pub fn db_path(&self) -> PathBuf {
        match &self.storage.db_path {
            Some(p) => PathBuf::from(p),
            None => PathBuf::from(&self.storage.data_dir).join("catalog"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog: CatalogConfig {
                name: "Risk of Rain 2 Wiki".to_string(),
            },
            storage: StorageConfig {
                data_dir: "./data".to_string(),
                db_path: None,
            },
            import: ImportConfig {
                monster_file: "./data-dump/monster-data.csv".to_string(),
                item_file: "./data-dump/item-data.csv".to_string(),
                survivor_file: "./data-dump/survivor-data.csv".to_string(),
                delimiter: default_delimiter(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("ror2wiki.log".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_db_path_is_under_data_dir() {
        let config = Config::default();
        assert_eq!(config.db_path(), PathBuf::from("./data").join("catalog"));
    }

    #[test]
    fn db_path_override() {
        let mut config = Config::default();
        config.storage.db_path = Some("/var/lib/ror2wiki".to_string());
        assert_eq!(config.db_path(), PathBuf::from("/var/lib/ror2wiki"));
    }

    #[test]
    fn delimiter_parsing() {
        let mut import = Config::default().import;
        assert_eq!(import.delimiter_byte().unwrap(), b',');
        import.delimiter = "tab".to_string();
        assert_eq!(import.delimiter_byte().unwrap(), b'\t');
        import.delimiter = ";".to_string();
        assert_eq!(import.delimiter_byte().unwrap(), b';');
        import.delimiter = ";;".to_string();
        assert!(import.delimiter_byte().is_err());
        import.delimiter = "é".to_string();
        assert!(import.delimiter_byte().is_err());
    }

    #[test]
    fn toml_round_trip_and_defaults() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("[import]"));
        assert!(!text.contains("db_path"));

        let minimal = r#"
            [catalog]
            name = "Test"

            [storage]
            data_dir = "/tmp/x"

            [import]
            monster_file = "m.csv"
            item_file = "i.csv"
            survivor_file = "s.csv"

            [logging]
            level = "debug"
        "#;
        let config: Config = toml::from_str(minimal).unwrap();
        assert_eq!(config.import.delimiter, ",");
        assert_eq!(config.logging.file, None);
        assert_eq!(config.logging.level_filter(), log::LevelFilter::Debug);
        let sources = config.import.sources();
        assert_eq!(sources.items, PathBuf::from("i.csv"));
    }

    #[tokio::test]
    async fn create_default_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();
        Config::create_default(path).await.unwrap();
        let loaded = Config::load(path).await.unwrap();
        assert_eq!(loaded.catalog.name, "Risk of Rain 2 Wiki");
        assert!(Config::load("/definitely/not/here.toml").await.is_err());
    }
}
