//! `mealplan` - weekly meal planner on the command line
//!
//! Records are stored as JSON files under the data directory. Log output is
//! controlled with `RUST_LOG` and goes to stderr.

mod cli;
mod commands;
mod config;
mod feedback;

use anyhow::Result;
use chrono::Local;
use clap::ArgMatches;
use config::CliConfig;
use feedback::{PromptConfirm, StderrNotifier};
use meal_planner::Planner;
use meal_storage::DirectoryBackend;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = CliConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let data_dir = config.resolve_data_dir(matches.get_one::<PathBuf>("data-dir"));

    let planner = Planner::new(DirectoryBackend::new(&data_dir), config.planner)
        .with_notifier(StderrNotifier)
        .with_confirm(PromptConfirm::new(matches.get_flag("yes")));

    let today = Local::now().date_naive();
    let outcome = planner.bootstrap(today)?;
    tracing::debug!(?outcome, data_dir = %data_dir.display(), "planner ready");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&planner, matches, today, &mut out)
}

fn main() -> ExitCode {
    let matches = cli::command().get_matches();
    init_tracing();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
