//! `tagwise tags` command - list the tags of a workspace

use crate::commands::dispatch::{Command, CommandContext};
use crate::output_by_format_result;
use tagwise_core::error::{Result, TagwiseError};
use tagwise_core::store::TagStore;

pub struct TagsCommand<'a> {
    pub workspace: &'a str,
}

impl Command for TagsCommand<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let db = ctx.open_database()?;
        let tags = db.list_tags(self.workspace, &[])?;

        output_by_format_result!(ctx.cli.format,
            json => {
                println!("{}", serde_json::to_string_pretty(&tags)?);
                Ok::<(), TagwiseError>(())
            },
            human => {
                if tags.is_empty() {
                    if !ctx.cli.quiet {
                        println!("No tags in workspace {}", self.workspace);
                    }
                } else {
                    for tag in &tags {
                        match &tag.color {
                            Some(color) => println!("{} {} ({})", tag.id, tag.name, color),
                            None => println!("{} {}", tag.id, tag.name),
                        }
                    }
                }
            }
        )
    }
}
