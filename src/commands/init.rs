//! `tagwise init` command - create a new store
//!
//! Idempotent: an existing database and config are left in place.

use std::fs;

use crate::commands::dispatch::{Command, CommandContext};
use crate::output_by_format_result;
use tagwise_core::config::{StoreConfig, CONFIG_FILE};
use tagwise_core::db::Database;
use tagwise_core::error::{Result, TagwiseError};

pub struct InitCommand;

impl Command for InitCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let store_dir = ctx.store_dir();
        fs::create_dir_all(store_dir).map_err(|e| {
            TagwiseError::Other(format!(
                "failed to create store directory {}: {}",
                store_dir.display(),
                e
            ))
        })?;

        let config_path = store_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            StoreConfig::default().save(&config_path)?;
        }

        let db = Database::open(store_dir)?;
        let counts = db.counts()?;

        output_by_format_result!(ctx.cli.format,
            json => {
                let output = serde_json::json!({
                    "status": "ok",
                    "store": store_dir.display().to_string(),
                    "counts": counts,
                    "message": "Store initialized"
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
                Ok::<(), TagwiseError>(())
            },
            human => {
                println!("Initialized tagwise store at {}", store_dir.display());
                if !ctx.cli.quiet {
                    println!();
                    println!("Run `tagwise load <FILE>` to import a dataset.");
                }
            }
        )
    }
}
