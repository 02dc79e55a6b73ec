//! Command dispatch logic for tagwise

mod command;

use crate::cli::{Cli, Commands};
use crate::commands;
use tagwise_core::error::Result;

pub use command::{Command, CommandContext, NoCommand};

pub fn run(cli: &Cli) -> Result<()> {
    let ctx = CommandContext::new(cli);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(Commands::Init) => commands::init::InitCommand.execute(&ctx),
        Some(Commands::Load { file }) => commands::load::LoadCommand { file }.execute(&ctx),
        Some(Commands::Tags { workspace }) => {
            commands::tags::TagsCommand { workspace }.execute(&ctx)
        }
        Some(Commands::Recommend(args)) => {
            commands::recommend::RecommendCommand { args }.execute(&ctx)
        }
    }
}
