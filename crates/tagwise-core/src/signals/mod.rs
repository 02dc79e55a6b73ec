//! Signal calculators
//!
//! Each calculator scores the candidate tags of one request independently and
//! returns a map of tag id to a score in `[0, 1]`. Tags it has nothing to say
//! about are simply absent from the map.

mod content;
mod cooccurrence;
mod popularity;
mod user_pattern;

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::{EntityRef, SignalType, Tag};

pub use content::ContentSimilarity;
pub use cooccurrence::CoOccurrence;
pub use popularity::Popularity;
pub use user_pattern::UserPattern;

/// Per-tag scores produced by one signal
pub type SignalScores = HashMap<String, f64>;

/// Everything a calculator may look at for one request
#[derive(Debug, Clone, Copy)]
pub struct SignalContext<'a> {
    pub workspace_id: &'a str,
    pub entity: &'a EntityRef,
    pub current_tag_ids: &'a [String],
    pub user_id: &'a str,
    pub candidates: &'a [Tag],
    pub now: DateTime<Utc>,
}

impl SignalContext<'_> {
    pub fn candidate_ids(&self) -> Vec<String> {
        self.candidates.iter().map(|t| t.id.clone()).collect()
    }

    pub fn is_candidate(&self, tag_id: &str) -> bool {
        self.candidates.iter().any(|t| t.id == tag_id)
    }
}

/// One independent scoring heuristic
pub trait SignalCalculator: Send + Sync {
    fn signal(&self) -> SignalType;

    fn score(&self, ctx: &SignalContext<'_>) -> Result<SignalScores>;
}

/// Divide every count by the largest one so the top key scores 1.0
pub fn normalize_counts(counts: HashMap<String, usize>) -> SignalScores {
    let max = counts.values().copied().max().unwrap_or(0);
    if max == 0 {
        return counts.into_keys().map(|k| (k, 0.0)).collect();
    }
    counts
        .into_iter()
        .map(|(k, count)| (k, count as f64 / max as f64))
        .collect()
}
