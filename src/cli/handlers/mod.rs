mod migrate;

pub use migrate::{MigrateParams, handle_migrate};

use crate::config::MigrateConfig;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: MigrateConfig,
}

impl CommandContext {
    pub fn new(config: MigrateConfig) -> Self {
        Self { config }
    }
}
