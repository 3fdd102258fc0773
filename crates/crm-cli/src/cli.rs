use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use crm_domain::{FilterDescriptor, SortDescriptor, TableId};

#[derive(Parser)]
#[command(name = "crm")]
#[command(about = "Inspect CRM dashboard views", long_about = None)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Config file to read instead of the platform default (or set CRM_CONFIG)
    #[arg(long, global = true, value_name = "FILE", env = "CRM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Name prefix for newly added tables, overriding the config
    #[arg(long, global = true, value_name = "PREFIX")]
    pub table_prefix: Option<String>,

    /// Start from an empty store instead of the demo data
    #[arg(long, global = true)]
    pub empty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tables with their customer counts
    Tables,
    /// Print the customer grid of a table
    Grid(GridArgs),
    /// Print the kanban board
    Kanban {
        /// Only tasks whose title contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Print the gantt chart rows
    Gantt {
        /// Only tasks whose title contains this text
        #[arg(long)]
        search: Option<String>,

        #[command(flatten)]
        data: DataStateArgs,
    },
    /// Print task and customer status distributions
    Analytics,
    /// Replay a JSON array of store actions and print the result
    Run {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct GridArgs {
    /// Table to show; defaults to the first table
    #[arg(long)]
    pub table: Option<TableId>,

    #[command(flatten)]
    pub data: DataStateArgs,
}

/// Sort and filter descriptors shared by the grid and the gantt task list
#[derive(Args)]
pub struct DataStateArgs {
    /// Sort key as FIELD or FIELD:asc|desc; repeat for tie-breakers
    #[arg(long, value_name = "FIELD[:DIR]")]
    pub sort: Vec<SortDescriptor>,

    /// Filter as FIELD:OP:VALUE (OP: eq, neq, contains, doesnotcontain,
    /// startswith, endswith, isempty, isnotempty)
    #[arg(long, value_name = "FIELD:OP:VALUE")]
    pub filter: Vec<FilterDescriptor>,

    /// Keep records matching any filter instead of all of them
    #[arg(long)]
    pub any: bool,
}
