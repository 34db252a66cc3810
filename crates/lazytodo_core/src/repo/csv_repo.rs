//! Task repository contract and delimited-file implementation.
//!
//! # Responsibility
//! - Persist the ordered task list as comma-delimited text, one row per task.
//! - Keep row encoding details inside the persistence boundary.
//!
//! # Invariants
//! - Rows carry exactly four fields: description, due date, completed,
//!   priority. No header row.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Writes land through a temp file + rename; readers never see a partial
//!   file.
//! - A missing file is reported as `Ok(None)`, not as an error.

use crate::model::task::{
    parse_due_date, validate_description, Priority, Task, TaskValidationError, DUE_DATE_FORMAT,
};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

const FIELD_DELIMITER: char = ',';
const QUOTE: char = '"';
const FIELDS_PER_RECORD: usize = 4;
const TRUE_LITERAL: &str = "True";
const FALSE_LITERAL: &str = "False";
const BYTE_ORDER_MARK: char = '\u{feff}';

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for task files.
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: io::Error },
    /// Row shape or literal is not decodable. `line` is 1-based.
    InvalidRecord { line: usize, message: String },
    /// Row decoded but a field breaks task invariants. `line` is 1-based.
    Validation {
        line: usize,
        source: TaskValidationError,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "task file `{}`: {source}", path.display()),
            Self::InvalidRecord { line, message } => {
                write!(f, "invalid task record at line {line}: {message}")
            }
            Self::Validation { line, source } => {
                write!(f, "invalid task record at line {line}: {source}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Validation { source, .. } => Some(source),
            Self::InvalidRecord { .. } => None,
        }
    }
}

/// Storage contract for the whole task list.
pub trait TaskRepository {
    /// Returns `None` when nothing has been persisted yet.
    fn load_tasks(&self) -> RepoResult<Option<Vec<Task>>>;
    /// Replaces persisted state with `tasks`, preserving order.
    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// Comma-delimited file repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTaskRepository {
    path: PathBuf,
}

impl CsvTaskRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomically(&self, contents: &str) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)?;
        // The staged file starts out 0600; keep whatever mode the target had.
        match fs::metadata(&self.path) {
            Ok(existing) => staged.as_file().set_permissions(existing.permissions())?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        staged.write_all(contents.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl TaskRepository for CsvTaskRepository {
    fn load_tasks(&self) -> RepoResult<Option<Vec<Task>>> {
        let started_at = Instant::now();
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=tasks_load module=repo status=missing");
                return Ok(None);
            }
            Err(err) => {
                error!(
                    "event=tasks_load module=repo status=error error_code=read_failed error={}",
                    err
                );
                return Err(self.io_error(err));
            }
        };

        match decode_tasks(&text) {
            Ok(tasks) => {
                info!(
                    "event=tasks_load module=repo status=ok count={} duration_ms={}",
                    tasks.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Some(tasks))
            }
            Err(err) => {
                error!(
                    "event=tasks_load module=repo status=error error_code=decode_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let started_at = Instant::now();
        let contents = encode_tasks(tasks);
        if let Err(err) = self.write_atomically(&contents) {
            error!(
                "event=tasks_save module=repo status=error error_code=write_failed error={}",
                err
            );
            return Err(self.io_error(err));
        }
        info!(
            "event=tasks_save module=repo status=ok count={} bytes={} duration_ms={}",
            tasks.len(),
            contents.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

/// Encodes tasks as delimited text, one `\n`-terminated row per task.
pub fn encode_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        let due = task
            .due_date
            .map(|date| date.format(DUE_DATE_FORMAT).to_string())
            .unwrap_or_default();
        let fields = [
            task.description.as_str(),
            due.as_str(),
            bool_to_text(task.completed),
            task.priority.label(),
        ];
        for (position, field) in fields.iter().enumerate() {
            if position > 0 {
                out.push(FIELD_DELIMITER);
            }
            push_field(&mut out, field);
        }
        out.push('\n');
    }
    out
}

/// Decodes delimited text into tasks, in file order.
///
/// # Errors
/// - `InvalidRecord` for unterminated quotes, wrong field counts or an
///   unknown completion literal.
/// - `Validation` for empty descriptions, malformed dates or unknown
///   priority labels.
///
/// A byte-order mark at the very start of the file is dropped. Fields that
/// begin with one are always written quoted, so this never eats data.
pub fn decode_tasks(text: &str) -> RepoResult<Vec<Task>> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    split_records(text)?
        .into_iter()
        .map(|record| parse_record(record.line, record.fields))
        .collect()
}

#[derive(Debug)]
struct RawRecord {
    line: usize,
    fields: Vec<String>,
}

fn split_records(text: &str) -> RepoResult<Vec<RawRecord>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                QUOTE if chars.peek() == Some(&QUOTE) => {
                    chars.next();
                    field.push(QUOTE);
                }
                QUOTE => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            QUOTE if field.is_empty() => in_quotes = true,
            FIELD_DELIMITER => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                finish_record(&mut records, &mut fields, &mut field, record_line);
                line += 1;
                record_line = line;
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(RepoError::InvalidRecord {
            line: record_line,
            message: "unterminated quoted field".to_string(),
        });
    }
    finish_record(&mut records, &mut fields, &mut field, record_line);
    Ok(records)
}

fn finish_record(
    records: &mut Vec<RawRecord>,
    fields: &mut Vec<String>,
    field: &mut String,
    line: usize,
) {
    // Blank lines carry no record.
    if fields.is_empty() && field.is_empty() {
        return;
    }
    fields.push(std::mem::take(field));
    records.push(RawRecord {
        line,
        fields: std::mem::take(fields),
    });
}

fn parse_record(line: usize, fields: Vec<String>) -> RepoResult<Task> {
    if fields.len() != FIELDS_PER_RECORD {
        return Err(RepoError::InvalidRecord {
            line,
            message: format!(
                "expected {FIELDS_PER_RECORD} fields, found {}",
                fields.len()
            ),
        });
    }
    let mut fields = fields.into_iter();
    let mut next_field = || fields.next().unwrap_or_default();
    let description = next_field();
    let due_text = next_field();
    let completed_text = next_field();
    let priority_text = next_field();

    let validation = |source| RepoError::Validation { line, source };
    validate_description(&description).map_err(validation)?;
    let due_date = parse_due_date(&due_text).map_err(validation)?;
    let completed = parse_bool(&completed_text).ok_or_else(|| RepoError::InvalidRecord {
        line,
        message: format!("invalid completed value `{completed_text}`"),
    })?;
    let priority = priority_text.parse::<Priority>().map_err(validation)?;

    Ok(Task {
        description,
        due_date,
        completed,
        priority,
    })
}

fn push_field(out: &mut String, field: &str) {
    let needs_quotes = field.starts_with(BYTE_ORDER_MARK)
        || field
            .chars()
            .any(|ch| matches!(ch, FIELD_DELIMITER | QUOTE | '\r' | '\n'));
    if !needs_quotes {
        out.push_str(field);
        return;
    }
    out.push(QUOTE);
    for ch in field.chars() {
        if ch == QUOTE {
            out.push(QUOTE);
        }
        out.push(ch);
    }
    out.push(QUOTE);
}

fn bool_to_text(value: bool) -> &'static str {
    if value {
        TRUE_LITERAL
    } else {
        FALSE_LITERAL
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case(TRUE_LITERAL) {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case(FALSE_LITERAL) {
        Some(false)
    } else {
        None
    }
}
