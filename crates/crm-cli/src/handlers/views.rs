use chrono::Utc;
use crm_domain::{CompositeFilter, FilterLogic, SortDescriptor, TableId};
use crm_views::analytics;
use serde::Serialize;

use crate::cli::{DataStateArgs, GridArgs};
use crate::context::CliContext;
use crate::output;

#[derive(Serialize)]
struct TableSummary {
    id: TableId,
    name: String,
    customer_count: usize,
}

/// Fold the filter flags into one composite; `--any` switches And to Or.
fn data_state(args: DataStateArgs) -> (Vec<SortDescriptor>, CompositeFilter) {
    let logic = if args.any { FilterLogic::Or } else { FilterLogic::And };
    let filter = args
        .filter
        .into_iter()
        .fold(CompositeFilter::new(logic), CompositeFilter::with_filter);
    (args.sort, filter)
}

pub fn handle_tables(ctx: &CliContext) -> anyhow::Result<()> {
    let snapshot = ctx.shell.snapshot();
    let tables = snapshot
        .tables
        .iter()
        .map(|t| TableSummary {
            id: t.id,
            name: t.name.clone(),
            customer_count: t.customers.len(),
        })
        .collect();
    output::output_list(tables)
}

pub fn handle_grid(ctx: &mut CliContext, args: GridArgs) -> anyhow::Result<()> {
    let snapshot = ctx.shell.snapshot();
    let first_table = snapshot.table_ids().first().copied();
    let table_id = match args.table.or(first_table) {
        Some(id) => id,
        None => output::output_error("No tables to show"),
    };
    let (sort, filter) = data_state(args.data);

    let projection = ctx
        .shell
        .grid_action(table_id, |grid, _| {
            grid.set_data_state(sort, filter);
            grid.project(&snapshot)
        })
        .flatten();
    match projection {
        Some(projection) => output::output_success(projection),
        None => output::output_error(&format!("Table not found: {}", table_id)),
    }
}

pub fn handle_kanban(ctx: &mut CliContext, search: Option<String>) -> anyhow::Result<()> {
    let snapshot = ctx.shell.snapshot();
    let board = ctx.shell.kanban_action(|kanban, _| {
        kanban.set_search(search.as_deref().unwrap_or_default());
        kanban.board(&snapshot)
    });
    output::output_success(board)
}

pub fn handle_gantt(
    ctx: &mut CliContext,
    search: Option<String>,
    data: DataStateArgs,
) -> anyhow::Result<()> {
    let snapshot = ctx.shell.snapshot();
    let (sort, filter) = data_state(data);
    let rows = ctx.shell.gantt_action(|gantt, _| {
        gantt.set_search(search.as_deref().unwrap_or_default());
        gantt.set_data_state(sort, filter);
        gantt.rows(&snapshot, Utc::now())
    });
    output::output_list(rows)
}

pub fn handle_analytics(ctx: &CliContext) -> anyhow::Result<()> {
    output::output_success(analytics::report(&ctx.shell.snapshot()))
}
