
use chrono::{DateTime, Utc};

use crate::model::{Activity, ActivityRecord, Entity, EntityKind, EntityRef, Tag, TagAssociation};
use crate::store::Dataset;

pub(super) fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
}

pub(super) fn tag(id: &str, name: &str) -> Tag {
    Tag {
        id: id.to_string(),
        workspace_id: "w-1".to_string(),
        name: name.to_string(),
        color: None,
    }
}

pub(super) fn entity(id: &str, kind: EntityKind, name: &str) -> Entity {
    Entity {
        id: id.to_string(),
        kind,
        name: name.to_string(),
        workspace_id: "w-1".to_string(),
    }
}

pub(super) fn assoc(tag_id: &str, entity_id: &str, kind: EntityKind) -> TagAssociation {
    TagAssociation {
        tag_id: tag_id.to_string(),
        workspace_id: "w-1".to_string(),
        entity: EntityRef::new(entity_id, kind),
    }
}

pub(super) fn added(tag_id: &str, entity_id: &str, at: &str) -> ActivityRecord {
    ActivityRecord {
        activity: Activity::AddTag {
            tag_id: tag_id.to_string(),
        },
        user_id: "u-1".to_string(),
        workspace_id: "w-1".to_string(),
        entity_id: entity_id.to_string(),
        created_at: ts(at),
    }
}

/// Three tags, four projects, one folder and a template
pub(super) fn sample_dataset() -> Dataset {
    let mut dataset = Dataset {
        tags: vec![tag("t-a", "design"), tag("t-b", "frontend"), tag("t-c", "archive")],
        entities: vec![
            entity("p-1", EntityKind::Project, "Website redesign"),
            entity("p-2", EntityKind::Project, "Website launch"),
            entity("p-3", EntityKind::Project, "Quarterly budget"),
            entity("p-4", EntityKind::Project, "Mobile app"),
            entity("f-1", EntityKind::Folder, "Website assets"),
        ],
        associations: vec![
            assoc("t-a", "p-2", EntityKind::Project),
            assoc("t-b", "p-2", EntityKind::Project),
            assoc("t-a", "p-3", EntityKind::Project),
            assoc("t-c", "p-4", EntityKind::Project),
            assoc("t-c", "tpl-1", EntityKind::Template),
        ],
        activities: vec![
            added("t-b", "p-2", "2026-10-10T09:00:00Z"),
            added("t-b", "p-4", "2026-09-01T09:00:00Z"),
        ],
        ..Default::default()
    };
    dataset
        .vectors
        .set_entity(EntityRef::new("p-1", EntityKind::Project), vec![1.0, 0.0]);
    dataset.vectors.tags.insert("t-b".to_string(), vec![0.9, 0.1]);
    dataset
}
