use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::CliArgs;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Config {
    pub version: u32,
    /// Path of the TOML repository catalog.
    pub catalog_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            catalog_path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    ProjectDirs::from("", "", "gitrelay")
        .map(|dirs| dirs.config_dir().join("catalog.toml"))
        .unwrap_or_else(|| PathBuf::from("catalog.toml"))
}

pub fn get_default_config_path() -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from("", "", "gitrelay").context("Failed to determine project directories")?;

    let config_dir = proj_dirs.config_dir();
    Ok(config_dir.join("gitrelay.toml"))
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p,
            None => get_default_config_path()?,
        };

        if !path.exists() {
            let default_config = Config::default();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
            default_config.save(&path)?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn from_cli_and_file(cli_args: &CliArgs) -> Result<Self> {
        let mut config = Self::load(cli_args.config.clone())?;

        // CLI args override config file
        if let Some(catalog) = &cli_args.catalog {
            config.catalog_path = catalog.clone();
        }

        Ok(config)
    }
}
