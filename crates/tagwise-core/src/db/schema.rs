//! SQLite database schema for tagwise

use rusqlite::{Connection, Result};

pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Result of schema creation
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaCreateResult {
    /// Schema already current
    Ok,
    /// Schema was created or recreated from scratch; previously loaded data is gone
    Created,
}

const SCHEMA_SQL: &str = r#"
-- Workspace tags
CREATE TABLE IF NOT EXISTS tags (
    workspace_id TEXT NOT NULL,
    id TEXT NOT NULL,
    name TEXT NOT NULL,
    color TEXT,
    PRIMARY KEY (workspace_id, id)
);

-- Taggable items (projects, folders, templates)
CREATE TABLE IF NOT EXISTS entities (
    id TEXT NOT NULL,
    kind TEXT NOT NULL,
    workspace_id TEXT NOT NULL,
    name TEXT NOT NULL,
    PRIMARY KEY (workspace_id, id, kind)
);
CREATE INDEX IF NOT EXISTS idx_entities_workspace ON entities(workspace_id, kind);

-- Tag/entity relation
CREATE TABLE IF NOT EXISTS tag_associations (
    tag_id TEXT NOT NULL,
    workspace_id TEXT NOT NULL,
    entity_id TEXT NOT NULL,
    entity_kind TEXT NOT NULL,
    PRIMARY KEY (workspace_id, tag_id, entity_id, entity_kind)
);
CREATE INDEX IF NOT EXISTS idx_assoc_entity ON tag_associations(workspace_id, entity_id, entity_kind);

-- Activity log
CREATE TABLE IF NOT EXISTS activities (
    type TEXT NOT NULL,
    tag_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    workspace_id TEXT NOT NULL,
    entity_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (type, tag_id, user_id, workspace_id, entity_id, created_at)
);
CREATE INDEX IF NOT EXISTS idx_activities_user ON activities(user_id, workspace_id, type, created_at);

-- Precomputed vectors (JSON arrays)
CREATE TABLE IF NOT EXISTS entity_vectors (
    entity_id TEXT NOT NULL,
    entity_kind TEXT NOT NULL,
    vector TEXT NOT NULL,
    PRIMARY KEY (entity_id, entity_kind)
);
CREATE TABLE IF NOT EXISTS tag_vectors (
    tag_id TEXT PRIMARY KEY,
    vector TEXT NOT NULL
);

-- Store metadata
CREATE TABLE IF NOT EXISTS store_meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

fn drop_all_tables(conn: &Connection) -> Result<()> {
    for table in [
        "tag_associations",
        "activities",
        "entity_vectors",
        "tag_vectors",
        "entities",
        "tags",
        "store_meta",
    ] {
        conn.execute(&format!("DROP TABLE IF EXISTS {}", table), [])?;
    }
    Ok(())
}

fn write_version(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO store_meta (key, value) VALUES ('schema_version', ?1)",
        [&CURRENT_SCHEMA_VERSION.to_string()],
    )?;
    Ok(())
}

pub fn create_schema(conn: &Connection) -> Result<SchemaCreateResult> {
    let current_version: Option<i32> = conn
        .query_row(
            "SELECT value FROM store_meta WHERE key = 'schema_version'",
            [],
            |r| r.get::<_, String>(0).map(|s| s.parse().unwrap_or(0)),
        )
        .ok();

    let result = match current_version {
        Some(v) if v == CURRENT_SCHEMA_VERSION => SchemaCreateResult::Ok,
        None => {
            conn.execute_batch(SCHEMA_SQL)?;
            write_version(conn)?;
            SchemaCreateResult::Created
        }
        Some(v) => {
            drop_all_tables(conn)?;
            conn.execute_batch(SCHEMA_SQL)?;
            write_version(conn)?;
            tracing::info!(
                "Database schema recreated from version {} to {}; reload your dataset",
                v,
                CURRENT_SCHEMA_VERSION
            );
            SchemaCreateResult::Created
        }
    };

    Ok(result)
}
