use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Locations searched, in order, when no explicit config path is given.
pub const CONFIG_PATHS: [&str; 4] = [
    ".slidegenius/config.toml",
    ".slidegenius/config.json",
    "slidegenius.toml",
    "slidegenius.json",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },
    #[error("Failed to read config file: {source}")]
    IoError { source: std::io::Error },
    #[error("Failed to parse config file: {source}")]
    ParseError { source: serde_json::Error },
    #[error("Failed to parse TOML config: {source}")]
    TomlParseError { source: toml::de::Error },
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Service root, without the `/api/...` path.
    pub base_url: String,
    /// Provider preselected in the form.
    pub provider: String,
    /// API key preselected in the form. Never written back to disk by this crate.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Where downloads are saved.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            provider: "openai".to_string(),
            api_key: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from a `.toml` or `.json` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError { source: e })?;

        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::TomlParseError { source: e })
        } else {
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError { source: e })
        }
    }

    /// Load from the first config file found under `root`, else defaults
    pub fn load_with_fallback(root: &Path) -> Self {
        for path in CONFIG_PATHS {
            let candidate = root.join(path);
            if candidate.exists() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", candidate.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {e}", candidate.display());
                    }
                }
            }
        }

        tracing::debug!("Using default configuration");
        Self::default()
    }

    /// Apply `SLIDEGENIUS_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup("SLIDEGENIUS_BASE_URL") {
            self.base_url = url;
        }
        if let Some(provider) = lookup("SLIDEGENIUS_PROVIDER") {
            self.provider = provider;
        }
        if let Some(key) = lookup("SLIDEGENIUS_API_KEY").or_else(|| lookup("OPENAI_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(dir) = lookup("SLIDEGENIUS_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_load_toml_with_partial_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("slidegenius.toml");
        std::fs::write(&path, "base_url = \"https://slides.example.com\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.base_url, "https://slides.example.com");
        assert_eq!(config.provider, "openai");
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_load_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("slidegenius.json");
        std::fs::write(&path, r#"{"provider":"anthropic","output_dir":"decks"}"#).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.provider, "anthropic");
        assert_eq!(config.output_dir, PathBuf::from("decks"));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = Config::load_from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_fallback_prefers_dot_directory() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join(".slidegenius")).unwrap();
        std::fs::write(
            tmp.path().join(".slidegenius/config.toml"),
            "provider = \"first\"\n",
        )
        .unwrap();
        std::fs::write(tmp.path().join("slidegenius.toml"), "provider = \"second\"\n").unwrap();

        assert_eq!(Config::load_with_fallback(tmp.path()).provider, "first");
    }

    #[test]
    fn test_fallback_skips_broken_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("slidegenius.toml"), "base_url = [").unwrap();
        assert_eq!(Config::load_with_fallback(tmp.path()), Config::default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SLIDEGENIUS_BASE_URL", "http://10.0.0.5:8000"),
            ("OPENAI_API_KEY", "sk-openai"),
            ("SLIDEGENIUS_PROVIDER", "  "),
        ]);
        let mut config = Config::default();
        config.apply_env_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.api_key.as_deref(), Some("sk-openai"));
        assert_eq!(config.provider, "openai");
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = Config {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
