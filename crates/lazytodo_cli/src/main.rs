//! `lazytodo` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, start file logging, load the task file.
//! - Hand the chosen command to the dispatcher and map failures to exit codes.

mod args;
mod commands;
mod output;
mod shell;

use anyhow::{Context, Result};
use args::{Cli, Command};
use clap::Parser;
use lazytodo_core::{default_log_level, init_logging, CsvTaskRepository, TaskService};
use log::error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_LOG_DIR_NAME: &str = "lazytodo-logs";

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = start_logging(&cli) {
        eprintln!("warning: file logging disabled: {err:#}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=command module=cli status=error error={err}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let repo = CsvTaskRepository::new(&cli.file);
    let mut service = TaskService::open(repo)
        .with_context(|| format!("failed to load tasks from `{}`", cli.file.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let command = cli.command.unwrap_or(Command::Shell);
    commands::execute(&mut service, command, stdin.lock(), &mut stdout.lock())
}

fn start_logging(cli: &Cli) -> Result<()> {
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let dir = match &cli.log_dir {
        Some(dir) => dir.clone(),
        None => std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
    };
    let dir = absolutize(dir)?;
    init_logging(level, &dir)?;
    Ok(())
}

fn absolutize(dir: PathBuf) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir);
    }
    let cwd = std::env::current_dir().context("cannot resolve current directory")?;
    Ok(cwd.join(dir))
}
