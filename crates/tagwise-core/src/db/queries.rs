//! Store contract implementations over SQLite

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, OptionalExtension, ToSql};

use super::load::format_timestamp;
use super::Database;
use crate::error::{Result, TagwiseError};
use crate::model::{
    Activity, ActivityKind, ActivityRecord, Entity, EntityKind, EntityRef, Tag, TagAssociation,
};
use crate::store::{
    rank_similar_entities, ActivityStore, AssociationStore, EntityStore, SimilarEntity, TagStore,
    VectorStore,
};

/// `?2, ?3, ...` for an IN list following `count_before` fixed parameters
fn placeholders(count_before: usize, len: usize) -> String {
    (0..len)
        .map(|i| format!("?{}", count_before + i + 1))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_kind(raw: &str) -> Result<EntityKind> {
    raw.parse()
        .map_err(|_| TagwiseError::lookup("sqlite", format!("unknown entity kind '{}'", raw)))
}

fn parse_vector(raw: &str) -> Result<Vec<f32>> {
    serde_json::from_str(raw)
        .map_err(|e| TagwiseError::lookup("vectors", format!("malformed vector: {}", e)))
}

fn row_to_tag(row: &rusqlite::Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        workspace_id: row.get(1)?,
        name: row.get(2)?,
        color: row.get(3)?,
    })
}

impl Database {
    fn query_tags(&self, sql: &str, values: &[&dyn ToSql]) -> Result<Vec<Tag>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(sql)?;
        let rows = stmt.query_map(values, row_to_tag)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn query_associations(&self, sql: &str, values: &[&dyn ToSql]) -> Result<Vec<TagAssociation>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(sql)?;
        let rows = stmt
            .query_map(values, |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(tag_id, workspace_id, entity_id, kind)| {
                Ok(TagAssociation {
                    tag_id,
                    workspace_id,
                    entity: EntityRef::new(entity_id, parse_kind(&kind)?),
                })
            })
            .collect()
    }

    fn tag_ids_of(&self, workspace_id: &str, entity: &EntityRef) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT tag_id FROM tag_associations
             WHERE workspace_id = ?1 AND entity_id = ?2 AND entity_kind = ?3
             ORDER BY tag_id",
        )?;
        let ids = stmt
            .query_map(
                params![workspace_id, entity.id, entity.kind.as_str()],
                |row| row.get(0),
            )?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(ids)
    }

    fn vector(&self, sql: &str, key: &[&dyn ToSql]) -> Result<Option<Vec<f32>>> {
        let conn = self.conn()?;
        let raw: Option<String> = conn.query_row(sql, key, |row| row.get(0)).optional()?;
        raw.as_deref().map(parse_vector).transpose()
    }
}

impl TagStore for Database {
    fn list_tags(&self, workspace_id: &str, exclude_ids: &[String]) -> Result<Vec<Tag>> {
        let sql = if exclude_ids.is_empty() {
            "SELECT id, workspace_id, name, color FROM tags WHERE workspace_id = ?1 ORDER BY name, id"
                .to_string()
        } else {
            format!(
                "SELECT id, workspace_id, name, color FROM tags
                 WHERE workspace_id = ?1 AND id NOT IN ({})
                 ORDER BY name, id",
                placeholders(1, exclude_ids.len())
            )
        };

        let mut values: Vec<&dyn ToSql> = vec![&workspace_id as &dyn ToSql];
        values.extend(exclude_ids.iter().map(|id| id as &dyn ToSql));
        self.query_tags(&sql, &values)
    }

    fn get_tags(&self, workspace_id: &str, ids: &[String]) -> Result<Vec<Tag>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT id, workspace_id, name, color FROM tags
             WHERE workspace_id = ?1 AND id IN ({})",
            placeholders(1, ids.len())
        );

        let mut values: Vec<&dyn ToSql> = vec![&workspace_id as &dyn ToSql];
        values.extend(ids.iter().map(|id| id as &dyn ToSql));
        self.query_tags(&sql, &values)
    }
}

impl AssociationStore for Database {
    fn associations_for_tags(
        &self,
        workspace_id: &str,
        tag_ids: &[String],
    ) -> Result<Vec<TagAssociation>> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT tag_id, workspace_id, entity_id, entity_kind FROM tag_associations
             WHERE workspace_id = ?1 AND tag_id IN ({})",
            placeholders(1, tag_ids.len())
        );

        let mut values: Vec<&dyn ToSql> = vec![&workspace_id as &dyn ToSql];
        values.extend(tag_ids.iter().map(|id| id as &dyn ToSql));
        self.query_associations(&sql, &values)
    }

    fn associations_for_entities(
        &self,
        workspace_id: &str,
        entities: &[EntityRef],
    ) -> Result<Vec<TagAssociation>> {
        let mut found = Vec::new();
        for entity in entities {
            let kind = entity.kind.as_str();
            let values: [&dyn ToSql; 3] = [&workspace_id, &entity.id, &kind];
            found.extend(self.query_associations(
                "SELECT tag_id, workspace_id, entity_id, entity_kind FROM tag_associations
                 WHERE workspace_id = ?1 AND entity_id = ?2 AND entity_kind = ?3",
                &values,
            )?);
        }
        Ok(found)
    }
}

impl ActivityStore for Database {
    fn list_activities(
        &self,
        user_id: &str,
        workspace_id: &str,
        kind: ActivityKind,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT tag_id, entity_id, created_at FROM activities
             WHERE user_id = ?1 AND workspace_id = ?2 AND type = ?3 AND created_at >= ?4
             ORDER BY created_at",
        )?;
        let rows = stmt
            .query_map(
                params![user_id, workspace_id, kind.as_str(), format_timestamp(&since)],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(tag_id, entity_id, created_at)| {
                let created_at = DateTime::parse_from_rfc3339(&created_at)
                    .map_err(|e| TagwiseError::lookup("activities", e))?
                    .with_timezone(&Utc);
                let activity = match kind {
                    ActivityKind::AddTag => Activity::AddTag { tag_id },
                    ActivityKind::RemoveTag => Activity::RemoveTag { tag_id },
                };
                Ok(ActivityRecord {
                    activity,
                    user_id: user_id.to_string(),
                    workspace_id: workspace_id.to_string(),
                    entity_id,
                    created_at,
                })
            })
            .collect()
    }
}

impl VectorStore for Database {
    fn entity_vector(&self, entity: &EntityRef) -> Result<Option<Vec<f32>>> {
        let kind = entity.kind.as_str();
        let key: [&dyn ToSql; 2] = [&entity.id, &kind];
        self.vector(
            "SELECT vector FROM entity_vectors WHERE entity_id = ?1 AND entity_kind = ?2",
            &key,
        )
    }

    fn tag_vector(&self, tag_id: &str) -> Result<Option<Vec<f32>>> {
        self.vector("SELECT vector FROM tag_vectors WHERE tag_id = ?1", &[&tag_id as &dyn ToSql])
    }
}

impl EntityStore for Database {
    fn get_entity(&self, workspace_id: &str, entity: &EntityRef) -> Result<Option<Entity>> {
        let conn = self.conn()?;
        let name: Option<String> = conn
            .query_row(
                "SELECT name FROM entities WHERE workspace_id = ?1 AND id = ?2 AND kind = ?3",
                params![workspace_id, entity.id, entity.kind.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(name.map(|name| Entity {
            id: entity.id.clone(),
            kind: entity.kind,
            name,
            workspace_id: workspace_id.to_string(),
        }))
    }

    fn find_similar_entities(
        &self,
        workspace_id: &str,
        target: &Entity,
        limit: usize,
    ) -> Result<Vec<SimilarEntity>> {
        let candidates: Vec<Entity> = {
            let conn = self.conn()?;
            let mut stmt = conn.prepare_cached(
                "SELECT id, name FROM entities WHERE workspace_id = ?1 AND kind = ?2 AND id != ?3",
            )?;
            let rows = stmt.query_map(
                params_from_iter([workspace_id, target.kind.as_str(), target.id.as_str()]),
                |row| {
                    Ok(Entity {
                        id: row.get(0)?,
                        kind: target.kind,
                        name: row.get(1)?,
                        workspace_id: workspace_id.to_string(),
                    })
                },
            )?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };

        rank_similar_entities(target, candidates, limit)
            .into_iter()
            .map(|entity| {
                let tag_ids = self.tag_ids_of(workspace_id, &entity.to_ref())?;
                Ok(SimilarEntity { entity, tag_ids })
            })
            .collect()
    }
}
