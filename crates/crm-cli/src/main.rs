mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use tracing_subscriber::EnvFilter;

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("CRM_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        // stdout carries the JSON envelope, so logs go to stderr
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_env("CRM_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut ctx = CliContext::from_cli(&cli);

    match cli.command {
        Commands::Tables => handlers::views::handle_tables(&ctx),
        Commands::Grid(args) => handlers::views::handle_grid(&mut ctx, args),
        Commands::Kanban { search } => handlers::views::handle_kanban(&mut ctx, search),
        Commands::Gantt { search, data } => {
            handlers::views::handle_gantt(&mut ctx, search, data)
        }
        Commands::Analytics => handlers::views::handle_analytics(&ctx),
        Commands::Run { script } => handlers::script::handle_run(&mut ctx, &script),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "crm", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        output::output_error(&format!("{:#}", e));
    }
    Ok(())
}
