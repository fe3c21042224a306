//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `$GLOVE_CONFIG` environment variable
//! 2. `~/.config/glove/config.toml`
//! 3. Built-in defaults (everything is optional)

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub models: ModelsConfig,
    pub encode: EncodeConfig,
}

/// Where extracted model files live and which one to use.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Directory holding one sub-directory per model name.
    /// Default: platform-specific data dir.
    pub dir: Option<String>,
    /// Catalog name used when `--model` is not given.
    pub default: String,
}

/// Encoding defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    pub pooling: String,
    /// JSON file of `{token: weight}` for `tf-idf-sum` pooling.
    pub tfidf: Option<String>,
}

// --- Defaults ---

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            default: "wiki_50".into(),
        }
    }
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            pooling: "mean".into(),
            tfidf: None,
        }
    }
}

impl ModelsConfig {
    /// Directory for `model`: `<dir>/<model>`.
    pub fn model_path(&self, model: &str) -> PathBuf {
        let base = match &self.dir {
            Some(dir) => PathBuf::from(dir),
            None => default_models_dir(),
        };
        base.join(model)
    }
}

fn default_models_dir() -> PathBuf {
    directories::ProjectDirs::from("dev", "glove", "glove")
        .map(|dirs| dirs.data_dir().join("models"))
        .unwrap_or_else(|| PathBuf::from("models"))
}

/// Load config from disk. Returns defaults if no config file exists.
pub fn load_config() -> Result<Config> {
    let path = config_path();

    if let Some(p) = &path {
        if p.exists() {
            let content =
                std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            let config: Config =
                toml::from_str(&content).with_context(|| format!("parsing {}", p.display()))?;
            tracing::debug!(path = %p.display(), "config loaded");
            return Ok(config);
        }
    }

    Ok(Config::default())
}

/// Resolve the config file path.
fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("GLOVE_CONFIG") {
        return Some(PathBuf::from(p));
    }

    if let Some(home) = dirs_home() {
        let p = home.join(".config").join("glove").join("config.toml");
        return Some(p);
    }

    None
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Show the active config path (for `glove config`).
pub fn show_config_path() -> String {
    match config_path() {
        Some(p) if p.exists() => format!("{} (loaded)", p.display()),
        Some(p) => format!("{} (not found, using defaults)", p.display()),
        None => "no config path resolved (using defaults)".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.models.default, "wiki_50");
        assert!(config.models.dir.is_none());
        assert_eq!(config.encode.pooling, "mean");
        assert!(config.encode.tfidf.is_none());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[encode]
pooling = "max"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.encode.pooling, "max");
        // Other fields should be defaults
        assert_eq!(config.models.default, "wiki_50");
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[models]
dir = "/srv/glove"
default = "twitter_200"

[encode]
pooling = "tf-idf-sum"
tfidf = "/srv/glove/idf.json"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.models.dir.as_deref(), Some("/srv/glove"));
        assert_eq!(config.models.default, "twitter_200");
        assert_eq!(config.encode.pooling, "tf-idf-sum");
        assert_eq!(config.encode.tfidf.as_deref(), Some("/srv/glove/idf.json"));
    }

    #[test]
    fn test_model_path_uses_configured_dir() {
        let models = ModelsConfig {
            dir: Some("/srv/glove".into()),
            ..ModelsConfig::default()
        };
        assert_eq!(
            models.model_path("wiki_100"),
            PathBuf::from("/srv/glove/wiki_100")
        );
    }

    #[test]
    fn test_model_path_default_dir() {
        let path = ModelsConfig::default().model_path("wiki_50");
        assert!(path.ends_with("wiki_50"));
    }
}
