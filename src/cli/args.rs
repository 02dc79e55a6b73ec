use super::parse::{parse_recommendable_kind, parse_timestamp};
use chrono::{DateTime, Utc};
use clap::Args;
use tagwise_core::model::EntityKind;

#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    /// Workspace ID
    #[arg(long, short)]
    pub workspace: String,

    /// Entity ID
    #[arg(long, short)]
    pub entity: String,

    /// Entity kind (project or folder)
    #[arg(long, short, value_parser = parse_recommendable_kind)]
    pub kind: EntityKind,

    /// Acting user ID
    #[arg(long, short)]
    pub user: String,

    /// Tags already applied (can be specified multiple times)
    #[arg(long, short, action = clap::ArgAction::Append)]
    pub tag: Vec<String>,

    /// Maximum number of recommendations (1-5)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Reference time for the activity window (RFC 3339, defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub at: Option<DateTime<Utc>>,
}
