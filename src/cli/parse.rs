//! Value parsers for CLI arguments

use chrono::{DateTime, Utc};
use tagwise_core::model::EntityKind;

/// Parse an entity kind that can receive recommendations
pub fn parse_recommendable_kind(s: &str) -> Result<EntityKind, String> {
    match s.parse::<EntityKind>().map_err(|e| e.to_string())? {
        EntityKind::Template => {
            Err("templates cannot receive recommendations (expected: project or folder)".into())
        }
        kind => Ok(kind),
    }
}

/// Parse an RFC 3339 timestamp
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp '{}': {}", s, e))
}
