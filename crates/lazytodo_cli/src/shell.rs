//! Interactive menu loop.
//!
//! # Invariants
//! - Core errors are reported and the loop keeps running.
//! - Leaving the loop, through option 8 or end of input, saves the list.

use crate::output::write_listing;
use anyhow::Result;
use lazytodo_core::{ListFilter, TaskRepository, TaskService};
use log::info;
use std::io::{self, BufRead, Write};

const MENU: &str = "
--- Task manager ---
1. Add task
2. List tasks
3. Mark task as completed
4. Delete task
5. Edit task
6. Sort tasks by due date
7. Set task priority
8. Save and quit
";

struct Prompt<'a, I, W> {
    input: I,
    out: &'a mut W,
}

impl<I: BufRead, W: Write> Prompt<'_, I, W> {
    /// Returns `None` at end of input.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.out, "{question}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask_index(&mut self, question: &str) -> io::Result<Option<Option<usize>>> {
        let Some(answer) = self.ask(question)? else {
            return Ok(None);
        };
        let index = answer.trim().parse::<usize>().ok();
        if index.is_none() {
            writeln!(self.out, "Please enter a valid number.")?;
        }
        Ok(Some(index))
    }

    fn report<T>(&mut self, result: lazytodo_core::StoreResult<T>, success: &str) -> io::Result<()> {
        match result {
            Ok(_) => writeln!(self.out, "{success}"),
            Err(err) => writeln!(self.out, "Error: {err}"),
        }
    }
}

/// Runs the menu until the user quits or input ends.
pub fn run_shell<R, I, W>(service: &mut TaskService<R>, input: I, out: &mut W) -> Result<()>
where
    R: TaskRepository,
    I: BufRead,
    W: Write,
{
    info!("event=shell_start module=cli status=ok");
    let mut prompt = Prompt { input, out };

    loop {
        write!(prompt.out, "{MENU}")?;
        let Some(choice) = prompt.ask("Choose an option: ")? else {
            break;
        };

        match choice.trim() {
            "1" => {
                let Some(description) = prompt.ask("Task description: ")? else {
                    break;
                };
                let Some(due) = prompt.ask("Due date (YYYY-MM-DD) or blank: ")? else {
                    break;
                };
                let Some(priority) = prompt.ask("Priority (low/medium/high) or blank: ")? else {
                    break;
                };
                let priority = Some(priority.trim()).filter(|text| !text.is_empty());
                match service.add_task(&description, &due, priority) {
                    Ok(position) => writeln!(prompt.out, "Task added at position {position}.")?,
                    Err(err) => writeln!(prompt.out, "Error: {err}")?,
                }
            }
            "2" => {
                let Some(filter) = prompt.ask("Filter (all/completed/pending): ")? else {
                    break;
                };
                let filter = filter.parse::<ListFilter>().unwrap_or_default();
                write_listing(&mut *prompt.out, &service.list_tasks(filter))?;
            }
            "3" => {
                let Some(index) = prompt.ask_index("Task number to complete: ")? else {
                    break;
                };
                if let Some(index) = index {
                    let result = service.complete_task(index);
                    prompt.report(result, &format!("Task {index} marked as completed."))?;
                }
            }
            "4" => {
                let Some(index) = prompt.ask_index("Task number to delete: ")? else {
                    break;
                };
                if let Some(index) = index {
                    let result = service.delete_task(index);
                    prompt.report(result, &format!("Task {index} deleted."))?;
                }
            }
            "5" => {
                let Some(index) = prompt.ask_index("Task number to edit: ")? else {
                    break;
                };
                let Some(index) = index else {
                    continue;
                };
                let Some(description) = prompt.ask("New description: ")? else {
                    break;
                };
                let Some(due) = prompt.ask("New due date (YYYY-MM-DD) or blank: ")? else {
                    break;
                };
                let result = service.edit_task(index, &description, &due);
                prompt.report(result, &format!("Task {index} updated."))?;
            }
            "6" => {
                service.sort_by_due_date();
                writeln!(prompt.out, "Tasks sorted by due date.")?;
            }
            "7" => {
                let Some(index) = prompt.ask_index("Task number: ")? else {
                    break;
                };
                let Some(index) = index else {
                    continue;
                };
                let Some(priority) = prompt.ask("Priority (low/medium/high): ")? else {
                    break;
                };
                let result = service.set_priority(index, &priority);
                prompt.report(result, &format!("Task {index} priority set."))?;
            }
            "8" => match service.save() {
                Ok(()) => {
                    writeln!(prompt.out, "Tasks saved. Goodbye!")?;
                    return Ok(());
                }
                Err(err) => writeln!(prompt.out, "Error: {err}")?,
            },
            _ => writeln!(prompt.out, "Invalid option, please try again.")?,
        }
    }

    service.save()?;
    writeln!(prompt.out, "\nTasks saved. Goodbye!")?;
    Ok(())
}
