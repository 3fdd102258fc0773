use crm_core::AppConfig;
use crm_views::Shell;

use crate::cli::Cli;

/// Everything a handler needs: the shell built from config and flags.
pub struct CliContext {
    pub shell: Shell,
}

impl CliContext {
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = match &cli.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(),
        };
        if let Some(prefix) = &cli.table_prefix {
            config.table_name_prefix = Some(prefix.clone());
        }
        if cli.empty {
            config.seed_demo_data = Some(false);
        }
        tracing::debug!("Effective config: {:?}", config);

        Self {
            shell: Shell::from_config(&config),
        }
    }
}
