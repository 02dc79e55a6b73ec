//! Serialized snapshot of everything the engine reads

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TagwiseError};
use crate::model::{ActivityRecord, Entity, EntityRef, Tag, TagAssociation};

/// Content vector of one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityVector {
    pub entity: EntityRef,
    pub vector: Vec<f32>,
}

/// Precomputed vectors: entities keyed by id and kind, tags by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorSet {
    #[serde(default)]
    pub entities: Vec<EntityVector>,
    #[serde(default)]
    pub tags: BTreeMap<String, Vec<f32>>,
}

/// Tags, entities, associations, activities and vectors in one JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub associations: Vec<TagAssociation>,
    #[serde(default)]
    pub activities: Vec<ActivityRecord>,
    #[serde(default)]
    pub vectors: VectorSet,
}

impl VectorSet {
    /// Vector of an entity; the last entry wins when an entity is listed twice
    pub fn entity(&self, entity: &EntityRef) -> Option<&[f32]> {
        self.entities
            .iter()
            .rev()
            .find(|v| &v.entity == entity)
            .map(|v| v.vector.as_slice())
    }

    /// Insert or replace the vector of an entity
    pub fn set_entity(&mut self, entity: EntityRef, vector: Vec<f32>) {
        self.entities.retain(|v| v.entity != entity);
        self.entities.push(EntityVector { entity, vector });
    }
}

impl Dataset {
    /// Read a dataset from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TagwiseError::Other(format!("failed to read dataset {}: {}", path.display(), e))
        })?;
        let dataset: Dataset = serde_json::from_str(&content)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Check that every association points at a known tag in the same workspace
    pub fn validate(&self) -> Result<()> {
        for assoc in &self.associations {
            let known = self
                .tags
                .iter()
                .any(|t| t.id == assoc.tag_id && t.workspace_id == assoc.workspace_id);
            if !known {
                return Err(TagwiseError::invalid_value(
                    "association",
                    format!(
                        "tag {} is not defined in workspace {}",
                        assoc.tag_id, assoc.workspace_id
                    ),
                ));
            }
        }
        Ok(())
    }
}
