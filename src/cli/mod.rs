//! CLI argument parsing for tagwise
//!
//! Global flags: --store, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod format;
pub mod output;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::RecommendArgs;
pub use output::OutputFormat;

/// Default store directory, relative to the working directory
pub const DEFAULT_STORE_DIR: &str = ".tagwise";

/// Tagwise - tag recommendations for workspace projects and folders
#[derive(Parser, Debug)]
#[command(name = "tagwise")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Store directory
    #[arg(long, global = true, env = "TAGWISE_STORE", default_value = DEFAULT_STORE_DIR)]
    pub store: PathBuf,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Log debug events, including timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. "debug", "tagwise_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new tagwise store
    Init,

    /// Import tags, entities, associations, activities and vectors from a JSON file
    Load {
        /// Dataset file
        file: PathBuf,
    },

    /// List the tags of a workspace
    Tags {
        /// Workspace ID
        #[arg(long, short)]
        workspace: String,
    },

    /// Recommend tags for a project or folder
    Recommend(RecommendArgs),
}
