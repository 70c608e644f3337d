use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::SlugError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Thresholds for the matching strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub fuzzy: FuzzyConfig,
    pub token: TokenConfig,
    pub ngram: NgramConfig,
    pub trim: TrimConfig,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyConfig {
    pub min_similarity: f64,
    pub max_length_delta: usize,
    pub tie_breaker_top_n: usize,
    pub min_query_length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub min_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NgramConfig {
    pub min_similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub min_secondary_slug_length: usize,
}

impl MatchConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, SlugError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Self::from_toml_str("")
        }
    }

    /// Load a specific file merged over the built-in defaults.
    pub fn load_from(path: &Path) -> Result<Self, SlugError> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loading match config");
        Self::from_toml_str(&content)
    }

    /// Parse TOML, filling every key it leaves out from the defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, SlugError> {
        let mut merged: toml::Table =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| SlugError::Config(e.to_string()))?;
        let user: toml::Table = toml::from_str(s).map_err(|e| SlugError::Config(e.to_string()))?;
        merge_tables(&mut merged, user);

        let config: MatchConfig = toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| SlugError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds outside their meaningful range.
    pub fn validate(&self) -> Result<(), SlugError> {
        let ratios = [
            ("fuzzy.min_similarity", self.fuzzy.min_similarity),
            ("token.min_score", self.token.min_score),
            ("ngram.min_similarity", self.ngram.min_similarity),
        ];
        for (key, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(SlugError::Config(format!(
                    "{key} must be between 0 and 1, got {value}"
                )));
            }
        }
        if self.fuzzy.tie_breaker_top_n == 0 {
            return Err(SlugError::Config(
                "fuzzy.tie_breaker_top_n must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), SlugError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SlugError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SlugError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "mediaslug")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(overlay_table) => match base.get_mut(&key) {
                Some(toml::Value::Table(base_table)) => merge_tables(base_table, overlay_table),
                _ => {
                    base.insert(key, toml::Value::Table(overlay_table));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}
