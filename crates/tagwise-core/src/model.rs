//! Data model shared by the stores, the signal calculators and the engine

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TagwiseError;

/// A user-defined label scoped to one workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Kind of item a tag can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Project,
    Folder,
    /// Templates only contribute to popularity counts
    Template,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Folder => "folder",
            EntityKind::Template => "template",
        }
    }
}

impl FromStr for EntityKind {
    type Err = TagwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "project" => Ok(EntityKind::Project),
            "folder" => Ok(EntityKind::Folder),
            "template" => Ok(EntityKind::Template),
            other => Err(TagwiseError::invalid_value("entity kind", other)),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a taggable item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
}

impl EntityRef {
    pub fn new(id: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// A taggable item with the fields the engine needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub name: String,
    pub workspace_id: String,
}

impl Entity {
    pub fn to_ref(&self) -> EntityRef {
        EntityRef::new(self.id.clone(), self.kind)
    }
}

/// One row of the tag/entity relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagAssociation {
    pub tag_id: String,
    pub workspace_id: String,
    pub entity: EntityRef,
}

/// Activity type filter for the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    AddTag,
    RemoveTag,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::AddTag => "add_tag",
            ActivityKind::RemoveTag => "remove_tag",
        }
    }
}

/// Typed payload of an activity log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Activity {
    AddTag {
        #[serde(rename = "tagId")]
        tag_id: String,
    },
    RemoveTag {
        #[serde(rename = "tagId")]
        tag_id: String,
    },
}

impl Activity {
    pub fn kind(&self) -> ActivityKind {
        match self {
            Activity::AddTag { .. } => ActivityKind::AddTag,
            Activity::RemoveTag { .. } => ActivityKind::RemoveTag,
        }
    }

    pub fn tag_id(&self) -> &str {
        match self {
            Activity::AddTag { tag_id } | Activity::RemoveTag { tag_id } => tag_id,
        }
    }
}

/// Append-only activity log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(flatten)]
    pub activity: Activity,
    pub user_id: String,
    pub workspace_id: String,
    pub entity_id: String,
    pub created_at: DateTime<Utc>,
}

/// One independent scoring heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    SimilarContent,
    CoOccurrence,
    UserPattern,
    Popularity,
}

impl SignalType {
    /// All signals in reason order
    pub const ALL: [SignalType; 4] = [
        SignalType::SimilarContent,
        SignalType::CoOccurrence,
        SignalType::UserPattern,
        SignalType::Popularity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::SimilarContent => "similar_content",
            SignalType::CoOccurrence => "co_occurrence",
            SignalType::UserPattern => "user_pattern",
            SignalType::Popularity => "popularity",
        }
    }

    /// Fixed human-readable description shown in tooltips
    pub fn description(&self) -> &'static str {
        match self {
            SignalType::SimilarContent => "Similar to the content of this item",
            SignalType::CoOccurrence => "Often used together with the current tags",
            SignalType::UserPattern => "You frequently use this tag",
            SignalType::Popularity => "Popular in this workspace",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a tag was recommended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    pub signal_type: SignalType,
    pub description: String,
    pub score: f64,
}

impl Reason {
    pub fn new(signal_type: SignalType, score: f64) -> Self {
        Self {
            signal_type,
            description: signal_type.description().to_string(),
            score,
        }
    }
}

/// An entity offered as supporting evidence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
}

impl From<&Entity> for SimilarItem {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id.clone(),
            name: entity.name.clone(),
            kind: entity.kind,
        }
    }
}

/// Combined score of one candidate tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagScore {
    pub tag_id: String,
    pub score: f64,
    pub reasons: Vec<Reason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooccurring_tag_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_items: Option<Vec<SimilarItem>>,
}

/// A ranked recommendation as handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub tag: Tag,
    pub score: f64,
    /// Description of the dominant reason
    pub reason: String,
    pub reasons: Vec<Reason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooccurring_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_items: Option<Vec<SimilarItem>>,
}

/// Input of a single recommendation call
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub workspace_id: String,
    pub entity: EntityRef,
    pub current_tag_ids: Vec<String>,
    pub user_id: String,
    /// Reference time for the activity window
    pub now: DateTime<Utc>,
}

impl RecommendationRequest {
    pub fn new(
        workspace_id: impl Into<String>,
        entity: EntityRef,
        current_tag_ids: Vec<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            entity,
            current_tag_ids,
            user_id: user_id.into(),
            now: Utc::now(),
        }
    }

    /// Pin the reference time
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}
