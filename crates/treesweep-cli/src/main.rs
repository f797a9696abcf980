mod commands;
mod logging;
mod progress;

use std::process;

use clap::Parser;
use colored::*;
use commands::Cli;
use progress::CliReporter;
use tracing::error;
use treesweep_core::{
    AppConfig, Error, ReconcileEngine, RunOutcome, RunSummary, StdinConfirmer,
};

fn main() {
    let _guard = logging::init_logger();

    let args = Cli::parse();

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            error!("Error: {}", err);
            process::exit(1);
        }
    }
}

fn run(args: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let defaults = treesweep_core::config::load_file_defaults()?;
    let config = AppConfig::resolve(
        args.internal.clone(),
        args.externals.clone(),
        args.overrides(),
        defaults,
    )?;

    let engine = ReconcileEngine::new(config);
    let reporter = CliReporter::new();
    let mut confirmer = StdinConfirmer::new();

    let summary = match engine.run(&reporter, &mut confirmer) {
        Ok(summary) => summary,
        Err(Error::Aborted) => {
            println!("{}", "Aborted; no changes made.".yellow());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!(
        "Scanned {} internal and {} external files in {}",
        format!("{}", summary.internal_files).cyan(),
        format!("{}", summary.external_files).cyan(),
        format!("{:.2}s", summary.scan_duration.as_secs_f64()).green(),
    );
    println!(
        "{} issue(s) found, {} confirmed",
        format!("{}", summary.issues_found).yellow(),
        format!("{}", summary.issues_confirmed).yellow(),
    );

    match summary.outcome {
        RunOutcome::NothingToDo => {
            println!("{}", "Nothing to do.".green());
        }
        RunOutcome::Declined => {
            println!("{}", "Declined; no filesystem changes made.".yellow());
        }
        RunOutcome::Applied => {
            println!(
                "{} action(s) performed, {} failed",
                format!("{}", summary.actions_performed).green(),
                if summary.actions_failed > 0 {
                    format!("{}", summary.actions_failed).red()
                } else {
                    format!("{}", summary.actions_failed).green()
                },
            );
        }
    }
}
