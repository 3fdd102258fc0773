use chrono::{DateTime, Utc};
use crm_core::CrmResult;
use serde::Serialize;

pub mod customer_commands;
pub mod table_commands;
pub mod task_commands;

pub use customer_commands::*;
pub use table_commands::*;
pub use task_commands::*;

/// Whether a command changed the data it was given.
///
/// A command aimed at a missing table, customer or task is not an error: it
/// leaves everything as it was and reports `Unchanged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    Unchanged,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }

    fn from_changed(changed: bool) -> Self {
        if changed {
            Outcome::Applied
        } else {
            Outcome::Unchanged
        }
    }
}

/// Trait for store commands that mutate state
/// Commands represent intent; the store executes them against a working copy
pub trait Command {
    /// Execute this command against the working copy
    fn execute(&self, context: &mut CommandContext) -> CrmResult<Outcome>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Context passed to commands for mutation
pub struct CommandContext<'a> {
    pub tables: &'a mut Vec<crate::Table>,
    pub tasks: &'a mut Vec<crate::Task>,
    /// Name prefix for tables created by `AddTable`.
    pub table_name_prefix: &'a str,
    /// Clock reading for timestamps set during this command.
    pub now: DateTime<Utc>,
}
