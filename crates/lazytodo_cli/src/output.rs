//! Console rendering for task listings.

use lazytodo_core::Task;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
struct ListedTask<'a> {
    index: usize,
    #[serde(flatten)]
    task: &'a Task,
}

/// One `N. <task>` line per entry, or a placeholder when empty.
pub fn write_listing<W: Write>(out: &mut W, entries: &[(usize, &Task)]) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No tasks.");
    }
    for (position, task) in entries {
        writeln!(out, "{position}. {task}")?;
    }
    Ok(())
}

pub fn write_listing_json<W: Write>(out: &mut W, entries: &[(usize, &Task)]) -> io::Result<()> {
    let items: Vec<ListedTask<'_>> = entries
        .iter()
        .map(|&(index, task)| ListedTask { index, task })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &items)?;
    writeln!(out)
}
