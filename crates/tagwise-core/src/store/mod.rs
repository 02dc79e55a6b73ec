//! Collaborator contracts consumed by the recommendation engine
//!
//! Every store is read-only from the engine's point of view. Implementations
//! must be `Send + Sync` because the signal calculators query them from
//! scoped threads.

mod dataset;
mod memory;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::{ActivityKind, ActivityRecord, Entity, EntityRef, Tag, TagAssociation};

pub use dataset::{Dataset, EntityVector, VectorSet};
pub use memory::MemoryStore;

/// Workspace tag lookups
pub trait TagStore: Send + Sync {
    /// All tags of a workspace except the given ids
    fn list_tags(&self, workspace_id: &str, exclude_ids: &[String]) -> Result<Vec<Tag>>;

    /// The tags of a workspace with the given ids; unknown ids are skipped
    fn get_tags(&self, workspace_id: &str, ids: &[String]) -> Result<Vec<Tag>>;
}

/// General-purpose queries over the tag/entity relation
pub trait AssociationStore: Send + Sync {
    /// Every association of the given tags within a workspace
    fn associations_for_tags(
        &self,
        workspace_id: &str,
        tag_ids: &[String],
    ) -> Result<Vec<TagAssociation>>;

    /// Every association of the given entities within a workspace
    fn associations_for_entities(
        &self,
        workspace_id: &str,
        entities: &[EntityRef],
    ) -> Result<Vec<TagAssociation>>;
}

/// Append-only activity log
pub trait ActivityStore: Send + Sync {
    /// A user's activities of one kind in a workspace created at or after `since`
    fn list_activities(
        &self,
        user_id: &str,
        workspace_id: &str,
        kind: ActivityKind,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityRecord>>;
}

/// Content vectors for entities and tags
pub trait VectorStore: Send + Sync {
    fn entity_vector(&self, entity: &EntityRef) -> Result<Option<Vec<f32>>>;

    fn tag_vector(&self, tag_id: &str) -> Result<Option<Vec<f32>>>;
}

/// Vector backend used when no embedding service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVectors;

impl VectorStore for NoVectors {
    fn entity_vector(&self, _entity: &EntityRef) -> Result<Option<Vec<f32>>> {
        Ok(None)
    }

    fn tag_vector(&self, _tag_id: &str) -> Result<Option<Vec<f32>>> {
        Ok(None)
    }
}

/// An entity returned by a similar-name lookup, with its tags
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarEntity {
    pub entity: Entity,
    pub tag_ids: Vec<String>,
}

/// Entity lookups
pub trait EntityStore: Send + Sync {
    fn get_entity(&self, workspace_id: &str, entity: &EntityRef) -> Result<Option<Entity>>;

    /// Up to `limit` entities of the target's kind in the workspace whose names
    /// share at least one term with the target's name. The target itself is
    /// never returned. Ordered by shared term count, then name.
    fn find_similar_entities(
        &self,
        workspace_id: &str,
        target: &Entity,
        limit: usize,
    ) -> Result<Vec<SimilarEntity>>;
}

/// Rank name-matching candidates the same way for every backend
pub(crate) fn rank_similar_entities(
    target: &Entity,
    candidates: impl IntoIterator<Item = Entity>,
    limit: usize,
) -> Vec<Entity> {
    let target_terms = crate::text::name_terms(&target.name);
    if target_terms.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(usize, Entity)> = candidates
        .into_iter()
        .filter(|e| e.kind == target.kind && e.id != target.id)
        .filter_map(|e| {
            let shared =
                crate::text::shared_term_count(&target_terms, &crate::text::name_terms(&e.name));
            (shared > 0).then_some((shared, e))
        })
        .collect();

    matches.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| a.name.cmp(&b.name)));
    matches.truncate(limit);
    matches.into_iter().map(|(_, e)| e).collect()
}
