//! One-shot subcommand dispatch.
//!
//! Mutating commands save right after a successful change; failed commands
//! leave the file untouched.

use crate::args::Command;
use crate::output::{write_listing, write_listing_json};
use crate::shell::run_shell;
use anyhow::Result;
use lazytodo_core::{TaskRepository, TaskService};
use std::io::{BufRead, Write};

pub fn execute<R, I, W>(
    service: &mut TaskService<R>,
    command: Command,
    input: I,
    out: &mut W,
) -> Result<()>
where
    R: TaskRepository,
    I: BufRead,
    W: Write,
{
    match command {
        Command::Add {
            description,
            due,
            priority,
        } => {
            let position = service.add_task(
                &description,
                due.as_deref().unwrap_or_default(),
                priority.as_deref(),
            )?;
            service.save()?;
            writeln!(out, "Added task {position}.")?;
        }
        Command::List { filter, json } => {
            let entries = service.list_tasks(filter);
            if json {
                write_listing_json(out, &entries)?;
            } else {
                write_listing(out, &entries)?;
            }
        }
        Command::Done { index } => {
            service.complete_task(index)?;
            service.save()?;
            writeln!(out, "Task {index} marked as completed.")?;
        }
        Command::Delete { index } => {
            service.delete_task(index)?;
            service.save()?;
            writeln!(out, "Task {index} deleted.")?;
        }
        Command::Edit {
            index,
            description,
            due,
        } => {
            service.edit_task(index, &description, due.as_deref().unwrap_or_default())?;
            service.save()?;
            writeln!(out, "Task {index} updated.")?;
        }
        Command::Sort => {
            service.sort_by_due_date();
            service.save()?;
            writeln!(out, "Tasks sorted by due date.")?;
        }
        Command::Priority { index, level } => {
            service.set_priority(index, &level)?;
            service.save()?;
            writeln!(out, "Task {index} priority set.")?;
        }
        Command::Shell => run_shell(service, input, out)?,
    }
    Ok(())
}
