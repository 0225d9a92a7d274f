use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidIgnorePattern {
        pattern: String,
        source: glob::PatternError,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Vault scanned when no path is given on the command line.
    pub vault_path: PathBuf,
    /// Glob patterns, relative to the vault, of notes to skip.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
}

impl Config {
    pub fn new(vault_path: PathBuf) -> Self {
        Self {
            vault_path,
            ignore: Vec::new(),
        }
    }

    /// Loads the config at `config_path`, or `None` if there is no file.
    ///
    /// Ignore globs are compiled here as well, so a bad pattern is reported
    /// against the config file instead of in the middle of a vault scan.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded vault path
        config.vault_path = Self::expand_path(&config.vault_path).unwrap_or(config.vault_path);
        config.ignore_matcher()?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/arete");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Compiles the ignore globs into a matcher.
    pub fn ignore_matcher(&self) -> Result<IgnoreMatcher, ConfigError> {
        let patterns = self
            .ignore
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|source| ConfigError::InvalidIgnorePattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(IgnoreMatcher { patterns })
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

/// Compiled ignore globs, matched against vault-relative paths.
#[derive(Debug, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<glob::Pattern>,
}

impl IgnoreMatcher {
    pub fn is_ignored(&self, relative_path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(relative_path))
    }
}
