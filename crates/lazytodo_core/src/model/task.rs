//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record and its closed priority set.
//! - Own text parsing for due dates and priority labels.
//!
//! # Invariants
//! - `description` is never empty or whitespace-only.
//! - `mark_completed` is the only transition this module offers for
//!   `completed`; it never clears the flag. `TaskStore` hands out shared
//!   references only, so stored tasks cannot be un-completed.
//! - Unknown priority labels are rejected, never coerced.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Wire format for due dates in files and user input.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// Validation error for task fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyDescription,
    InvalidPriority(String),
    MalformedDate(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "task description cannot be empty"),
            Self::InvalidPriority(value) => write!(
                f,
                "invalid priority `{value}`; expected low|medium|high"
            ),
            Self::MalformedDate(value) => {
                write!(f, "malformed due date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Task urgency. Closed set; ordering is `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Canonical lowercase label used in files and output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = TaskValidationError;

    /// Case-insensitive. The Spanish labels written by older task files
    /// (`baja|media|alta`) are accepted as aliases.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "low" | "baja" => Ok(Self::Low),
            "medium" | "media" => Ok(Self::Medium),
            "high" | "alta" => Ok(Self::High),
            _ => Err(TaskValidationError::InvalidPriority(value.to_string())),
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses optional due-date text.
///
/// Blank input means "no due date". Anything else must be a real calendar
/// date in strict `YYYY-MM-DD` form.
///
/// # Errors
/// - `MalformedDate` when the text is not zero-padded ISO or names a
///   non-existent day (for example `2023-02-30`).
pub fn parse_due_date(text: &str) -> Result<Option<NaiveDate>, TaskValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !ISO_DATE_RE.is_match(trimmed) {
        return Err(TaskValidationError::MalformedDate(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| TaskValidationError::MalformedDate(trimmed.to_string()))
}

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub priority: Priority,
}

impl Task {
    /// Creates a pending task.
    ///
    /// # Errors
    /// - `EmptyDescription` when `description` is blank.
    pub fn new(
        description: impl Into<String>,
        due_date: Option<NaiveDate>,
        priority: Priority,
    ) -> Result<Self, TaskValidationError> {
        let description = description.into();
        validate_description(&description)?;
        Ok(Self {
            description,
            due_date,
            completed: false,
            priority,
        })
    }

    /// Marks the task done. Calling it again is a no-op.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    /// Human-readable status label.
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Pending"
        }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} - ", self.description, self.status_label())?;
        match self.due_date {
            Some(date) => write!(f, "due {}", date.format(DUE_DATE_FORMAT))?,
            None => write!(f, "no due date")?,
        }
        write!(f, " - priority: {}", self.priority)
    }
}

pub(crate) fn validate_description(description: &str) -> Result<(), TaskValidationError> {
    if description.trim().is_empty() {
        return Err(TaskValidationError::EmptyDescription);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_due_date, Priority, TaskValidationError};
    use chrono::NaiveDate;

    #[test]
    fn parse_due_date_rejects_unpadded_and_impossible_days() {
        assert!(matches!(
            parse_due_date("2024-3-1"),
            Err(TaskValidationError::MalformedDate(_))
        ));
        assert!(matches!(
            parse_due_date("2023-02-30"),
            Err(TaskValidationError::MalformedDate(_))
        ));
    }

    #[test]
    fn parse_due_date_treats_blank_as_absent() {
        assert_eq!(parse_due_date("   ").unwrap(), None);
        assert_eq!(
            parse_due_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn priority_accepts_legacy_aliases() {
        assert_eq!("ALTA".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("media".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!(" Low ".parse::<Priority>().unwrap(), Priority::Low);
    }
}
