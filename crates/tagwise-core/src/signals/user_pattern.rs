use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};

use super::{normalize_counts, SignalCalculator, SignalContext, SignalScores};
use crate::config::UserPatternKey;
use crate::error::Result;
use crate::model::{ActivityKind, SignalType};
use crate::store::ActivityStore;

/// The acting user's recent `add_tag` activity
pub struct UserPattern<'a> {
    activities: &'a dyn ActivityStore,
    window: Option<TimeDelta>,
    key: UserPatternKey,
}

impl<'a> UserPattern<'a> {
    pub fn new(activities: &'a dyn ActivityStore, window_days: i64, key: UserPatternKey) -> Self {
        Self {
            activities,
            window: TimeDelta::try_days(window_days),
            key,
        }
    }

    /// Start of the look-back window, clamped to the earliest representable time
    fn since(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.window
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl SignalCalculator for UserPattern<'_> {
    fn signal(&self) -> SignalType {
        SignalType::UserPattern
    }

    fn score(&self, ctx: &SignalContext<'_>) -> Result<SignalScores> {
        let since = self.since(ctx.now);
        let records = self.activities.list_activities(
            ctx.user_id,
            ctx.workspace_id,
            ActivityKind::AddTag,
            since,
        )?;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for record in &records {
            let key = match self.key {
                UserPatternKey::Tag => record.activity.tag_id(),
                UserPatternKey::Entity => record.entity_id.as_str(),
            };
            *counts.entry(key.to_string()).or_insert(0) += 1;
        }

        // Normalized over the whole batch, then narrowed to the candidates
        let mut scores = normalize_counts(counts);
        scores.retain(|id, _| ctx.is_candidate(id));
        Ok(scores)
    }
}
