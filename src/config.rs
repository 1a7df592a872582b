use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PAGE_SIZE_VAR: &str = "JUCEDOC_PAGE_SIZE";
pub const PAGE_CACHE_SIZE_VAR: &str = "JUCEDOC_PAGE_CACHE_SIZE";
pub const AUTO_REGISTER_VAR: &str = "JUCEDOC_AUTO_REGISTER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Items per result page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Paged results remembered per tenant
    #[serde(default = "default_page_cache_size")]
    pub page_cache_size: usize,
    /// Create tenant storage on first use instead of requiring registration
    #[serde(default = "default_auto_register")]
    pub auto_register_tenants: bool,
}

fn default_page_size() -> usize {
    5
}

fn default_page_cache_size() -> usize {
    30
}

fn default_auto_register() -> bool {
    true
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_cache_size: default_page_cache_size(),
            auto_register_tenants: default_auto_register(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QueryConfig {
    /// Defaults overridden by `JUCEDOC_*` variables, reading `.env` if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut cfg = Self::default();
        cfg.apply_overrides(|key| std::env::var(key).ok());
        cfg
    }

    /// Apply overrides from `lookup`. Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(size) = parse_override::<usize>(&lookup, PAGE_SIZE_VAR) {
            self.page_size = size;
        }
        if let Some(size) = parse_override::<usize>(&lookup, PAGE_CACHE_SIZE_VAR) {
            self.page_cache_size = size;
        }
        if let Some(raw) = lookup(AUTO_REGISTER_VAR) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => self.auto_register_tenants = true,
                "false" | "0" | "no" | "off" => self.auto_register_tenants = false,
                _ => tracing::warn!(
                    var = AUTO_REGISTER_VAR,
                    value = %raw,
                    "ignoring invalid override"
                ),
            }
        }
        self.normalize();
    }

    /// Sizes are at least 1.
    pub fn normalize(&mut self) {
        self.page_size = self.page_size.max(1);
        self.page_cache_size = self.page_cache_size.max(1);
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = key, value = %raw, "ignoring invalid override");
            None
        }
    }
}

pub fn default_config_path() -> PathBuf {
    let Some(dirs) = ProjectDirs::from("com", "zaguan", "jucedoc") else {
        return Path::new("jucedoc.json").to_path_buf();
    };
    dirs.config_dir().join("config.json")
}

/// Missing or malformed files fall back to the defaults.
pub fn load_config(path: &Path) -> QueryConfig {
    let Ok(bytes) = fs::read(path) else {
        return QueryConfig::default();
    };
    match serde_json::from_slice::<QueryConfig>(&bytes) {
        Ok(mut cfg) => {
            cfg.normalize();
            cfg
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "invalid config, using defaults: {}", e);
            QueryConfig::default()
        }
    }
}

pub fn save_config(path: &Path, cfg: &QueryConfig) -> Result<(), ConfigError> {
    let json = serde_json::to_vec_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let cfg = QueryConfig::default();
        assert_eq!(cfg.page_size, 5);
        assert_eq!(cfg.page_cache_size, 30);
        assert!(cfg.auto_register_tenants);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let cfg = QueryConfig {
            page_size: 8,
            page_cache_size: 4,
            auto_register_tenants: false,
        };

        save_config(&path, &cfg).unwrap();
        assert_eq!(load_config(&path), cfg);
    }

    #[test]
    fn test_load_missing_or_invalid_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(load_config(&path), QueryConfig::default());

        fs::write(&path, b"{ page_size: ").unwrap();
        assert_eq!(load_config(&path), QueryConfig::default());
    }

    #[test]
    fn test_partial_file_and_zero_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "page_size": 0 }"#).unwrap();

        let cfg = load_config(&path);
        assert_eq!(cfg.page_size, 1);
        assert_eq!(cfg.page_cache_size, 30);
    }

    #[test]
    fn test_from_env_matches_process_overrides() {
        let cfg = QueryConfig::from_env();

        let mut expected = QueryConfig::default();
        expected.apply_overrides(|key| std::env::var(key).ok());
        assert_eq!(cfg, expected);
        assert!(cfg.page_size >= 1 && cfg.page_cache_size >= 1);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (PAGE_SIZE_VAR, "12"),
            (PAGE_CACHE_SIZE_VAR, "lots"),
            (AUTO_REGISTER_VAR, "off"),
        ]
        .into_iter()
        .collect();

        let mut cfg = QueryConfig::default();
        cfg.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(cfg.page_size, 12);
        assert_eq!(cfg.page_cache_size, 30);
        assert!(!cfg.auto_register_tenants);
    }
}
