//! Signal weighting constants
//!
//! The combined score is `content*0.4 + co_occurrence*0.3 + user_pattern*0.2
//! + popularity*0.1`. The weights sum to 1.0 so the total stays in `[0, 1]`.

use crate::model::SignalType;

/// Weight of the content similarity signal
pub const CONTENT_WEIGHT: f64 = 0.4;

/// Weight of the co-occurrence signal
pub const CO_OCCURRENCE_WEIGHT: f64 = 0.3;

/// Weight of the user-pattern signal
pub const USER_PATTERN_WEIGHT: f64 = 0.2;

/// Weight of the popularity signal
pub const POPULARITY_WEIGHT: f64 = 0.1;

pub fn signal_weight(signal: SignalType) -> f64 {
    match signal {
        SignalType::SimilarContent => CONTENT_WEIGHT,
        SignalType::CoOccurrence => CO_OCCURRENCE_WEIGHT,
        SignalType::UserPattern => USER_PATTERN_WEIGHT,
        SignalType::Popularity => POPULARITY_WEIGHT,
    }
}
