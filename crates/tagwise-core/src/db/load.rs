//! Dataset import

use chrono::SecondsFormat;
use rusqlite::params;
use serde::Serialize;

use super::Database;
use crate::error::{Result, TagwiseError};
use crate::store::Dataset;

/// Number of rows written per table by one import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub tags: usize,
    pub entities: usize,
    pub associations: usize,
    pub activities: usize,
    pub vectors: usize,
}

impl Database {
    /// Import a dataset in a single transaction
    ///
    /// Tags and entities are upserted by workspace and id, vectors by id
    /// (entity vectors by id and kind). Associations and activities already
    /// present are left alone.
    #[tracing::instrument(skip(self, dataset), fields(tags = dataset.tags.len(), entities = dataset.entities.len()))]
    pub fn load_dataset(&self, dataset: &Dataset) -> Result<LoadSummary> {
        dataset.validate()?;

        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| TagwiseError::Other(format!("failed to start transaction: {}", e)))?;
        let mut summary = LoadSummary::default();

        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO tags (id, workspace_id, name, color) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(workspace_id, id) DO UPDATE SET
                     name = excluded.name,
                     color = excluded.color",
            )?;
            for tag in &dataset.tags {
                summary.tags += stmt.execute(params![tag.id, tag.workspace_id, tag.name, tag.color])?;
            }
        }

        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO entities (id, kind, workspace_id, name) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(workspace_id, id, kind) DO UPDATE SET
                     name = excluded.name",
            )?;
            for entity in &dataset.entities {
                summary.entities += stmt.execute(params![
                    entity.id,
                    entity.kind.as_str(),
                    entity.workspace_id,
                    entity.name
                ])?;
            }
        }

        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR IGNORE INTO tag_associations (tag_id, workspace_id, entity_id, entity_kind)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for assoc in &dataset.associations {
                summary.associations += stmt.execute(params![
                    assoc.tag_id,
                    assoc.workspace_id,
                    assoc.entity.id,
                    assoc.entity.kind.as_str()
                ])?;
            }
        }

        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR IGNORE INTO activities (type, tag_id, user_id, workspace_id, entity_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for record in &dataset.activities {
                summary.activities += stmt.execute(params![
                    record.activity.kind().as_str(),
                    record.activity.tag_id(),
                    record.user_id,
                    record.workspace_id,
                    record.entity_id,
                    format_timestamp(&record.created_at)
                ])?;
            }
        }

        {
            let mut entity_stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO entity_vectors (entity_id, entity_kind, vector)
                 VALUES (?1, ?2, ?3)",
            )?;
            for entry in &dataset.vectors.entities {
                summary.vectors += entity_stmt.execute(params![
                    entry.entity.id,
                    entry.entity.kind.as_str(),
                    serde_json::to_string(&entry.vector)?
                ])?;
            }

            let mut tag_stmt = tx
                .prepare_cached("INSERT OR REPLACE INTO tag_vectors (tag_id, vector) VALUES (?1, ?2)")?;
            for (id, vector) in &dataset.vectors.tags {
                summary.vectors += tag_stmt.execute(params![id, serde_json::to_string(vector)?])?;
            }
        }

        tx.commit()
            .map_err(|e| TagwiseError::Other(format!("failed to commit dataset: {}", e)))?;

        tracing::debug!(?summary, "dataset loaded");
        Ok(summary)
    }
}

/// Fixed-width UTC timestamps so string comparison matches time order
pub(crate) fn format_timestamp(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
