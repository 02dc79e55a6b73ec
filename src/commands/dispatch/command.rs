//! Command trait and context for dispatching commands

use std::path::Path;

use crate::cli::Cli;
use tagwise_core::config::StoreConfig;
use tagwise_core::db::Database;
use tagwise_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self { cli }
    }

    pub fn store_dir(&self) -> &Path {
        &self.cli.store
    }

    /// Open the database of an existing store
    pub fn open_database(&self) -> Result<Database> {
        let db = Database::open(self.store_dir())?;
        tracing::debug!(store = %self.store_dir().display(), "open_store");
        Ok(db)
    }

    pub fn load_config(&self) -> Result<StoreConfig> {
        StoreConfig::load_or_default(self.store_dir())
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("tagwise {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Tag recommendations for workspace projects and folders.");
        println!();
        println!("Run `tagwise --help` for usage information.");
        Ok(())
    }
}
