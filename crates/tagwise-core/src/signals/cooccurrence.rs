use std::collections::{BTreeSet, HashMap, HashSet};

use super::{normalize_counts, SignalCalculator, SignalContext, SignalScores};
use crate::error::Result;
use crate::model::{EntityRef, SignalType};
use crate::store::AssociationStore;

/// How often a candidate appears on entities that carry a current tag
pub struct CoOccurrence<'a> {
    associations: &'a dyn AssociationStore,
}

impl<'a> CoOccurrence<'a> {
    pub fn new(associations: &'a dyn AssociationStore) -> Self {
        Self { associations }
    }
}

impl SignalCalculator for CoOccurrence<'_> {
    fn signal(&self) -> SignalType {
        SignalType::CoOccurrence
    }

    fn score(&self, ctx: &SignalContext<'_>) -> Result<SignalScores> {
        if ctx.current_tag_ids.is_empty() {
            return Ok(SignalScores::new());
        }

        // Entities carrying at least one seed tag, excluding the target
        let seeded: BTreeSet<EntityRef> = self
            .associations
            .associations_for_tags(ctx.workspace_id, ctx.current_tag_ids)?
            .into_iter()
            .map(|a| a.entity)
            .filter(|e| e != ctx.entity)
            .collect();

        if seeded.is_empty() {
            return Ok(SignalScores::new());
        }

        let seeded: Vec<EntityRef> = seeded.into_iter().collect();
        let seeds: HashSet<&str> = ctx.current_tag_ids.iter().map(String::as_str).collect();

        // Distinct (entity, tag) pairs so duplicate rows do not inflate counts
        let pairs: HashSet<(EntityRef, String)> = self
            .associations
            .associations_for_entities(ctx.workspace_id, &seeded)?
            .into_iter()
            .filter(|a| !seeds.contains(a.tag_id.as_str()) && ctx.is_candidate(&a.tag_id))
            .map(|a| (a.entity, a.tag_id))
            .collect();

        let mut counts: HashMap<String, usize> = HashMap::new();
        for (_, tag_id) in pairs {
            *counts.entry(tag_id).or_insert(0) += 1;
        }

        Ok(normalize_counts(counts))
    }
}
