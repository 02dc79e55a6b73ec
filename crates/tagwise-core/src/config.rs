//! Store configuration for tagwise
//!
//! Configuration is stored in `<store>/config.toml`. A missing file means defaults.

pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{Result, TagwiseError};

pub use types::{
    RecommendConfig, StoreConfig, UserPatternKey, MAX_ACTIVITY_WINDOW_DAYS, MAX_RECOMMENDATIONS,
    STORE_FORMAT_VERSION,
};

/// Config file name inside a store directory
pub const CONFIG_FILE: &str = "config.toml";

impl StoreConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&content)?;
        config.recommend.validate()?;
        Ok(config)
    }

    /// Load `<store_dir>/config.toml`, falling back to defaults when absent
    pub fn load_or_default(store_dir: &Path) -> Result<Self> {
        let path = store_dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TagwiseError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl RecommendConfig {
    /// Reject values that would break the engine's output contract
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 || self.max_results > MAX_RECOMMENDATIONS {
            bail_invalid!(
                "recommend.max_results",
                format!("{} (expected 1..={})", self.max_results, MAX_RECOMMENDATIONS)
            );
        }
        if !(0.0..=1.0).contains(&self.content_threshold) {
            bail_invalid!("recommend.content_threshold", self.content_threshold);
        }
        if !(1..=MAX_ACTIVITY_WINDOW_DAYS).contains(&self.activity_window_days) {
            bail_invalid!(
                "recommend.activity_window_days",
                format!(
                    "{} (expected 1..={})",
                    self.activity_window_days, MAX_ACTIVITY_WINDOW_DAYS
                )
            );
        }
        Ok(())
    }

    /// Same config with a smaller result limit
    pub fn with_max_results(mut self, max_results: usize) -> Result<Self> {
        self.max_results = max_results;
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.version, STORE_FORMAT_VERSION);
        assert_eq!(config.recommend.max_results, 5);
        assert_eq!(config.recommend.content_threshold, 0.5);
        assert_eq!(config.recommend.activity_window_days, 30);
        assert_eq!(config.recommend.similar_items_limit, 5);
        assert_eq!(config.recommend.user_pattern_key, UserPatternKey::Tag);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = StoreConfig::default();
        config.recommend.user_pattern_key = UserPatternKey::Entity;
        config.recommend.max_results = 3;
        config.save(&path).unwrap();

        let loaded = StoreConfig::load(&path).unwrap();
        assert_eq!(loaded.recommend, config.recommend);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[recommend]\ncontent_threshold = 0.7\n").unwrap();

        let loaded = StoreConfig::load(&path).unwrap();
        assert_eq!(loaded.recommend.content_threshold, 0.7);
        assert_eq!(loaded.recommend.max_results, 5);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let loaded = StoreConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(loaded.recommend, RecommendConfig::default());
    }

    #[test]
    fn test_max_results_above_five_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[recommend]\nmax_results = 8\n").unwrap();

        let err = StoreConfig::load(&path).unwrap_err();
        assert!(matches!(err, TagwiseError::InvalidValue { .. }));
    }

    #[test]
    fn test_activity_window_bounds() {
        let mut config = RecommendConfig::default();
        config.activity_window_days = MAX_ACTIVITY_WINDOW_DAYS;
        assert!(config.validate().is_ok());

        for days in [0, -1, MAX_ACTIVITY_WINDOW_DAYS + 1, i64::MAX] {
            config.activity_window_days = days;
            let err = config.validate().unwrap_err();
            assert!(matches!(err, TagwiseError::InvalidValue { .. }), "{days}");
        }
    }

    #[test]
    fn test_huge_window_in_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "[recommend]\nactivity_window_days = 9223372036854775807\n",
        )
        .unwrap();

        let err = StoreConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("activity_window_days"));
    }

    #[test]
    fn test_with_max_results() {
        let config = RecommendConfig::default().with_max_results(2).unwrap();
        assert_eq!(config.max_results, 2);
        assert!(RecommendConfig::default().with_max_results(0).is_err());
    }
}
