//! Command-line surface.
//!
//! Every option has an environment fallback so a wrapper script can pin the
//! task file once.

use clap::{Parser, Subcommand};
use lazytodo_core::ListFilter;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lazytodo", version, about = "Personal task list kept in a CSV file")]
pub struct Cli {
    /// Task file to load on start and save after changes.
    #[arg(long, env = "LAZYTODO_FILE", default_value = "tasks.csv", global = true)]
    pub file: PathBuf,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "LAZYTODO_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Directory for rolling log files. Defaults to a temp subdirectory.
    #[arg(long, env = "LAZYTODO_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Runs the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a task.
    Add {
        description: String,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,
        /// low|medium|high (default medium).
        #[arg(long, short)]
        priority: Option<String>,
    },
    /// List tasks with their positions.
    List {
        /// all|completed|pending.
        #[arg(long, short, default_value = "all")]
        filter: ListFilter,
        /// Print JSON instead of text lines.
        #[arg(long)]
        json: bool,
    },
    /// Mark a task as completed.
    Done { index: usize },
    /// Delete a task.
    Delete { index: usize },
    /// Replace a task's description and due date.
    Edit {
        index: usize,
        description: String,
        /// New due date as YYYY-MM-DD; omit to clear it.
        #[arg(long)]
        due: Option<String>,
    },
    /// Sort tasks by due date, undated last.
    Sort,
    /// Set a task's priority.
    Priority { index: usize, level: String },
    /// Interactive menu.
    Shell,
}
