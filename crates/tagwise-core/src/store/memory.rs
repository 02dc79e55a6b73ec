//! In-memory implementation of every store contract

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::{
    rank_similar_entities, ActivityStore, AssociationStore, Dataset, EntityStore, SimilarEntity,
    TagStore, VectorStore,
};
use crate::error::Result;
use crate::model::{ActivityKind, ActivityRecord, Entity, EntityRef, Tag, TagAssociation};

/// Store backed by a [`Dataset`] held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Dataset,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataset(data: Dataset) -> Self {
        Self { data }
    }

    pub fn add_tag(&mut self, id: &str, workspace_id: &str, name: &str) -> &mut Self {
        self.data.tags.push(Tag {
            id: id.to_string(),
            workspace_id: workspace_id.to_string(),
            name: name.to_string(),
            color: None,
        });
        self
    }

    pub fn add_entity(&mut self, entity: Entity) -> &mut Self {
        self.data.entities.push(entity);
        self
    }

    /// Attach a tag to an entity
    pub fn tag_entity(&mut self, workspace_id: &str, entity: EntityRef, tag_id: &str) -> &mut Self {
        self.data.associations.push(TagAssociation {
            tag_id: tag_id.to_string(),
            workspace_id: workspace_id.to_string(),
            entity,
        });
        self
    }

    pub fn add_activity(&mut self, record: ActivityRecord) -> &mut Self {
        self.data.activities.push(record);
        self
    }

    pub fn set_entity_vector(&mut self, entity: EntityRef, vector: Vec<f32>) -> &mut Self {
        self.data.vectors.set_entity(entity, vector);
        self
    }

    pub fn set_tag_vector(&mut self, tag_id: &str, vector: Vec<f32>) -> &mut Self {
        self.data.vectors.tags.insert(tag_id.to_string(), vector);
        self
    }

    fn tag_ids_of(&self, workspace_id: &str, entity: &EntityRef) -> Vec<String> {
        self.data
            .associations
            .iter()
            .filter(|a| a.workspace_id == workspace_id && &a.entity == entity)
            .map(|a| a.tag_id.clone())
            .collect()
    }
}

impl TagStore for MemoryStore {
    fn list_tags(&self, workspace_id: &str, exclude_ids: &[String]) -> Result<Vec<Tag>> {
        Ok(self
            .data
            .tags
            .iter()
            .filter(|t| t.workspace_id == workspace_id && !exclude_ids.contains(&t.id))
            .cloned()
            .collect())
    }

    fn get_tags(&self, workspace_id: &str, ids: &[String]) -> Result<Vec<Tag>> {
        Ok(self
            .data
            .tags
            .iter()
            .filter(|t| t.workspace_id == workspace_id && ids.contains(&t.id))
            .cloned()
            .collect())
    }
}

impl AssociationStore for MemoryStore {
    fn associations_for_tags(
        &self,
        workspace_id: &str,
        tag_ids: &[String],
    ) -> Result<Vec<TagAssociation>> {
        Ok(self
            .data
            .associations
            .iter()
            .filter(|a| a.workspace_id == workspace_id && tag_ids.contains(&a.tag_id))
            .cloned()
            .collect())
    }

    fn associations_for_entities(
        &self,
        workspace_id: &str,
        entities: &[EntityRef],
    ) -> Result<Vec<TagAssociation>> {
        let wanted: HashSet<&EntityRef> = entities.iter().collect();
        Ok(self
            .data
            .associations
            .iter()
            .filter(|a| a.workspace_id == workspace_id && wanted.contains(&a.entity))
            .cloned()
            .collect())
    }
}

impl ActivityStore for MemoryStore {
    fn list_activities(
        &self,
        user_id: &str,
        workspace_id: &str,
        kind: ActivityKind,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityRecord>> {
        Ok(self
            .data
            .activities
            .iter()
            .filter(|r| {
                r.user_id == user_id
                    && r.workspace_id == workspace_id
                    && r.activity.kind() == kind
                    && r.created_at >= since
            })
            .cloned()
            .collect())
    }
}

impl VectorStore for MemoryStore {
    fn entity_vector(&self, entity: &EntityRef) -> Result<Option<Vec<f32>>> {
        Ok(self.data.vectors.entity(entity).map(<[f32]>::to_vec))
    }

    fn tag_vector(&self, tag_id: &str) -> Result<Option<Vec<f32>>> {
        Ok(self.data.vectors.tags.get(tag_id).cloned())
    }
}

impl EntityStore for MemoryStore {
    fn get_entity(&self, workspace_id: &str, entity: &EntityRef) -> Result<Option<Entity>> {
        Ok(self
            .data
            .entities
            .iter()
            .find(|e| e.workspace_id == workspace_id && e.id == entity.id && e.kind == entity.kind)
            .cloned())
    }

    fn find_similar_entities(
        &self,
        workspace_id: &str,
        target: &Entity,
        limit: usize,
    ) -> Result<Vec<SimilarEntity>> {
        let in_workspace = self
            .data
            .entities
            .iter()
            .filter(|e| e.workspace_id == workspace_id)
            .cloned();

        Ok(rank_similar_entities(target, in_workspace, limit)
            .into_iter()
            .map(|entity| {
                let tag_ids = self.tag_ids_of(workspace_id, &entity.to_ref());
                SimilarEntity { entity, tag_ids }
            })
            .collect())
    }
}
