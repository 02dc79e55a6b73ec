use std::collections::{HashMap, HashSet};

use super::{normalize_counts, SignalCalculator, SignalContext, SignalScores};
use crate::error::Result;
use crate::model::{EntityRef, SignalType};
use crate::store::AssociationStore;

/// Workspace-wide usage of each candidate across projects, folders and templates
pub struct Popularity<'a> {
    associations: &'a dyn AssociationStore,
}

impl<'a> Popularity<'a> {
    pub fn new(associations: &'a dyn AssociationStore) -> Self {
        Self { associations }
    }
}

impl SignalCalculator for Popularity<'_> {
    fn signal(&self) -> SignalType {
        SignalType::Popularity
    }

    fn score(&self, ctx: &SignalContext<'_>) -> Result<SignalScores> {
        let candidate_ids = ctx.candidate_ids();
        if candidate_ids.is_empty() {
            return Ok(SignalScores::new());
        }

        let mut counts: HashMap<String, usize> =
            candidate_ids.iter().map(|id| (id.clone(), 0)).collect();

        let pairs: HashSet<(String, EntityRef)> = self
            .associations
            .associations_for_tags(ctx.workspace_id, &candidate_ids)?
            .into_iter()
            .map(|a| (a.tag_id, a.entity))
            .collect();

        for (tag_id, _) in pairs {
            if let Some(count) = counts.get_mut(&tag_id) {
                *count += 1;
            }
        }

        Ok(normalize_counts(counts))
    }
}
