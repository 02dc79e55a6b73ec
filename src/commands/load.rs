//! `tagwise load` command - import a JSON dataset into the store

use std::path::Path;
use std::time::Instant;

use crate::commands::dispatch::{Command, CommandContext};
use crate::output_by_format_result;
use tagwise_core::error::{Result, TagwiseError};
use tagwise_core::store::Dataset;
use tagwise_core::trace_time;

pub struct LoadCommand<'a> {
    pub file: &'a Path,
}

impl Command for LoadCommand<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let db = ctx.open_database()?;
        let dataset = Dataset::from_path(self.file)?;

        let start = Instant::now();
        let summary = db.load_dataset(&dataset)?;
        trace_time!(start, "load_dataset");

        output_by_format_result!(ctx.cli.format,
            json => {
                let output = serde_json::json!({
                    "status": "ok",
                    "file": self.file.display().to_string(),
                    "loaded": summary,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
                Ok::<(), TagwiseError>(())
            },
            human => {
                println!(
                    "Loaded {} tags, {} entities, {} associations, {} activities, {} vectors",
                    summary.tags,
                    summary.entities,
                    summary.associations,
                    summary.activities,
                    summary.vectors
                );
            }
        )
    }
}
