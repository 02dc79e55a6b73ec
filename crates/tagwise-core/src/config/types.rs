//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Current store format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Upper bound on the number of recommendations returned per call
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Longest accepted user-pattern look-back, in days
pub const MAX_ACTIVITY_WINDOW_DAYS: i64 = 36_500;

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Recommendation tuning
    #[serde(default)]
    pub recommend: RecommendConfig,
}

/// Aggregation key for the user-pattern signal
///
/// `Tag` counts how often the user applied each tag. `Entity` reproduces the
/// legacy behaviour that counted per tagged entity, which only scores a
/// candidate when an entity id happens to equal a tag id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserPatternKey {
    #[default]
    Tag,
    Entity,
}

impl std::fmt::Display for UserPatternKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserPatternKey::Tag => write!(f, "tag"),
            UserPatternKey::Entity => write!(f, "entity"),
        }
    }
}

/// Tuning knobs for the recommendation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Number of recommendations to return (at most 5)
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Minimum content similarity that counts as a match (default 0.5)
    #[serde(default = "default_content_threshold")]
    pub content_threshold: f64,

    /// Look-back window for the user-pattern signal in days (default 30)
    #[serde(default = "default_activity_window_days")]
    pub activity_window_days: i64,

    /// Similar items attached per recommendation (default 5)
    #[serde(default = "default_similar_items_limit")]
    pub similar_items_limit: usize,

    /// Aggregation key for the user-pattern signal
    #[serde(default)]
    pub user_pattern_key: UserPatternKey,
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

fn default_max_results() -> usize {
    MAX_RECOMMENDATIONS
}

fn default_content_threshold() -> f64 {
    0.5
}

fn default_activity_window_days() -> i64 {
    30
}

fn default_similar_items_limit() -> usize {
    5
}

impl Default for RecommendConfig {
    fn default() -> Self {
        RecommendConfig {
            max_results: default_max_results(),
            content_threshold: default_content_threshold(),
            activity_window_days: default_activity_window_days(),
            similar_items_limit: default_similar_items_limit(),
            user_pattern_key: UserPatternKey::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            version: STORE_FORMAT_VERSION,
            recommend: RecommendConfig::default(),
        }
    }
}
