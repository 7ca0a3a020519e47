use salesdash_client::commands;
use salesdash_client::commands::dashboard::DashboardRunOptions;
use salesdash_client::commands::filters::FiltersRunOptions;
use salesdash_client::{ClientError, ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Dash { data, filters, .. } => commands::dashboard::run(DashboardRunOptions {
            data_path: data.clone(),
            selection: filters.to_selection(),
        }),
        Commands::Filters { demo: true, .. } => commands::demo::filters(),
        Commands::Filters { data, .. } => commands::filters::run(FiltersRunOptions {
            data_path: data.clone(),
        }),
        Commands::Demo { filters, .. } => commands::demo::run(&filters.to_selection()),
        Commands::Explore { .. } => Err(ClientError::invalid_argument(
            "`explore` is interactive and cannot be dispatched as a one-shot command.",
        )),
    }
}
