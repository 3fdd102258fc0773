use std::path::Path;

use anyhow::Context;
use crm_core::{LogEntry, Loggable};
use crm_domain::{Outcome, Snapshot, StoreAction};
use serde::Serialize;

use crate::context::CliContext;
use crate::output;

#[derive(Serialize)]
struct ActionResult {
    index: usize,
    description: String,
    outcome: Outcome,
}

#[derive(Serialize)]
struct RunReport<'a> {
    results: Vec<ActionResult>,
    snapshot: &'a Snapshot,
    log: &'a [LogEntry],
    can_undo: bool,
    can_redo: bool,
}

/// Replay every action in order. The first rejected action aborts the run.
pub fn handle_run(ctx: &mut CliContext, script: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let actions: Vec<StoreAction> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid action script {}", script.display()))?;

    let mut results = Vec::with_capacity(actions.len());
    for (index, action) in actions.into_iter().enumerate() {
        let description = action.description();
        match ctx.shell.apply(action) {
            Ok(outcome) => results.push(ActionResult {
                index,
                description,
                outcome,
            }),
            Err(e) => {
                let message = format!("Action {} ('{}') failed: {}", index, description, e);
                output::output_error(&message)
            }
        }
    }

    let snapshot = ctx.shell.snapshot();
    let store = ctx.shell.store();
    output::output_success(RunReport {
        results,
        snapshot: &snapshot,
        log: store.get_logs(),
        can_undo: store.can_undo(),
        can_redo: store.can_redo(),
    })
}
