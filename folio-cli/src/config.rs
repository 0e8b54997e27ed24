//! Runtime configuration from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use folio_cache::CacheConfig;
use folio_core::constants::DEFAULT_TIMEOUT_SECS;
use folio_core::error::{FolioError, Result};

/// Default local asset directory
pub const DEFAULT_ASSETS_DIR: &str = "./assets";

/// Default public prefix for local asset handles
pub const DEFAULT_PUBLIC_PREFIX: &str = "/assets";

/// CLI configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolioConfig {
    /// Directory local assets are served from
    pub assets_dir: PathBuf,
    /// Prefix for handles of local assets
    pub public_prefix: String,
    /// Remote asset host; selects the HTTP fetcher when set
    pub asset_base_url: Option<String>,
    /// Cache TTLs
    pub cache: CacheConfig,
    /// Remote request timeout in seconds
    pub fetch_timeout_secs: u64,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            public_prefix: DEFAULT_PUBLIC_PREFIX.into(),
            asset_base_url: None,
            cache: CacheConfig::default(),
            fetch_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FolioConfig {
    /// Loads `.env` if present, then reads the `FOLIO_*` variables.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let number = |key: &str| -> Result<Option<u64>> {
            get(key)
                .map(|raw| {
                    raw.trim().parse::<u64>().map_err(|e| {
                        FolioError::ConfigError(format!("{} must be a whole number, got '{}': {}", key, raw, e))
                    })
                })
                .transpose()
        };

        let mut config = Self::default();
        if let Some(dir) = get("FOLIO_ASSETS_DIR") {
            config.assets_dir = PathBuf::from(dir);
        }
        if let Some(prefix) = get("FOLIO_PUBLIC_PREFIX") {
            config.public_prefix = prefix;
        }
        config.asset_base_url = get("FOLIO_ASSET_BASE_URL");

        if let Some(ms) = number("FOLIO_DEFAULT_TTL_MS")? {
            config.cache.default_ttl_ms = ms;
        }
        if let Some(ms) = number("FOLIO_IMAGE_TTL_MS")? {
            config.cache.image_ttl_ms = ms;
        }
        if let Some(ms) = number("FOLIO_DATA_TTL_MS")? {
            config.cache.data_ttl_ms = ms;
        }
        if let Some(secs) = number("FOLIO_FETCH_TIMEOUT_SECS")? {
            config.fetch_timeout_secs = secs;
        }

        Ok(config)
    }

    /// Overrides the local asset directory.
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Points the loader at a remote asset host.
    pub fn with_asset_base_url(mut self, url: impl Into<String>) -> Self {
        self.asset_base_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| env.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = FolioConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, FolioConfig::default());
        assert_eq!(config.assets_dir, PathBuf::from("./assets"));
        assert!(config.asset_base_url.is_none());
    }

    #[test]
    fn test_reads_variables() {
        let config = FolioConfig::from_lookup(lookup(&[
            ("FOLIO_ASSETS_DIR", "/srv/site/public"),
            ("FOLIO_PUBLIC_PREFIX", "/static"),
            ("FOLIO_ASSET_BASE_URL", "https://cdn.example.com/"),
            ("FOLIO_IMAGE_TTL_MS", "1000"),
            ("FOLIO_FETCH_TIMEOUT_SECS", " 5 "),
        ]))
        .unwrap();

        assert_eq!(config.assets_dir, PathBuf::from("/srv/site/public"));
        assert_eq!(config.public_prefix, "/static");
        assert_eq!(config.asset_base_url.as_deref(), Some("https://cdn.example.com/"));
        assert_eq!(config.cache.image_ttl_ms, 1000);
        assert_eq!(config.cache.data_ttl_ms, CacheConfig::default().data_ttl_ms);
        assert_eq!(config.fetch_timeout_secs, 5);
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = FolioConfig::from_lookup(lookup(&[
            ("FOLIO_ASSET_BASE_URL", ""),
            ("FOLIO_DEFAULT_TTL_MS", "  "),
        ]))
        .unwrap();
        assert!(config.asset_base_url.is_none());
        assert_eq!(config.cache.default_ttl_ms, CacheConfig::default().default_ttl_ms);
    }

    #[test]
    fn test_bad_number_rejected() {
        let err = FolioConfig::from_lookup(lookup(&[("FOLIO_DATA_TTL_MS", "ten minutes")])).unwrap_err();
        assert!(matches!(err, FolioError::ConfigError(msg) if msg.contains("FOLIO_DATA_TTL_MS")));
    }
}
