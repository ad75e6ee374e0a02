use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod error;
mod fetch;
mod github;
mod services;

pub use cli::*;
pub use commands::*;
pub use domain::constants::*;
pub use domain::models::*;
pub use services::config::load_config;
pub use services::output::{print_error, print_one, print_out};
pub use services::pipeline::{
    load_voters, run_merge, run_owners_report, run_teams_report, run_voter_emails,
    voter_case_mismatches, ApiUse, OwnersParts, ReportContext,
};
pub use services::registry::{group_names, leaders, meetings};
pub use services::search::{find_files, search_query, Pacing};
pub use services::storage::{dated_output_path, write_lines};
pub use std::path::PathBuf;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        print_error(cli.json, &err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if handle_report_commands(cli)? {
        return Ok(());
    }
    if handle_lookup_commands(cli)? {
        return Ok(());
    }
    anyhow::bail!("unhandled command: {:?}", cli.command)
}
