//! Ordered, index-addressed task collection.
//!
//! # Responsibility
//! - Own the in-memory task list and its CRUD/sort operations.
//! - Translate 1-based external positions into list slots.
//! - Bridge whole-list persistence through `TaskRepository`.
//!
//! # Invariants
//! - Every index-taking operation accepts positions in `[1, len]` only.
//! - Validation precedes mutation; a failed call leaves the list untouched.
//! - `sort_by_due_date` is stable: undated tasks keep their relative order
//!   and land after every dated task.

use crate::model::task::{validate_description, Priority, Task, TaskValidationError};
use crate::repo::csv_repo::{CsvTaskRepository, RepoError, TaskRepository};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store operations.
#[derive(Debug)]
pub enum StoreError {
    /// `index` is the caller's 1-based position.
    InvalidIndex { index: usize, len: usize },
    Validation(TaskValidationError),
    Repo(RepoError),
}

impl StoreError {
    pub fn is_invalid_index(&self) -> bool {
        matches!(self, Self::InvalidIndex { .. })
    }

    /// True for unknown priority labels from input or from a loaded file.
    pub fn is_invalid_priority(&self) -> bool {
        matches!(
            self.validation_error(),
            Some(TaskValidationError::InvalidPriority(_))
        )
    }

    /// True for bad due dates from input or from a loaded file.
    pub fn is_malformed_date(&self) -> bool {
        matches!(
            self.validation_error(),
            Some(TaskValidationError::MalformedDate(_))
        )
    }

    fn validation_error(&self) -> Option<&TaskValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(RepoError::Validation { source, .. }) => Some(source),
            _ => None,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIndex { index, len: 0 } => {
                write!(f, "invalid task index {index}: the list is empty")
            }
            Self::InvalidIndex { index, len } => {
                write!(f, "invalid task index {index}: expected 1..={len}")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidIndex { .. } => None,
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Completion filter for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl ListFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
        }
    }
}

/// Unrecognized list filter text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl Display for UnknownFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown filter `{}`; expected all|completed|pending",
            self.0
        )
    }
}

impl Error for UnknownFilter {}

impl FromStr for ListFilter {
    type Err = UnknownFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "" | "all" | "todas" => Ok(Self::All),
            "completed" | "done" | "completadas" => Ok(Self::Completed),
            "pending" | "pendientes" => Ok(Self::Pending),
            _ => Err(UnknownFilter(value.to_string())),
        }
    }
}

/// In-memory ordered task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task at 1-based `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Task> {
        index.checked_sub(1).and_then(|slot| self.tasks.get(slot))
    }

    /// Appends a pending task and returns its 1-based position.
    pub fn add(
        &mut self,
        description: impl Into<String>,
        due_date: Option<NaiveDate>,
        priority: Priority,
    ) -> StoreResult<usize> {
        let task = Task::new(description, due_date, priority)?;
        self.tasks.push(task);
        Ok(self.tasks.len())
    }

    /// Lazily yields `(position, task)` pairs matching `filter`.
    ///
    /// `position` is the 1-based place in the whole list, so it can be passed
    /// straight back to index-taking operations.
    pub fn list(&self, filter: ListFilter) -> impl Iterator<Item = (usize, &Task)> + '_ {
        self.tasks
            .iter()
            .enumerate()
            .filter(move |(_, task)| filter.matches(task))
            .map(|(slot, task)| (slot + 1, task))
    }

    pub fn complete(&mut self, index: usize) -> StoreResult<()> {
        let slot = self.slot(index)?;
        self.tasks[slot].mark_completed();
        Ok(())
    }

    /// Removes and returns the task; later positions shift down by one.
    pub fn delete(&mut self, index: usize) -> StoreResult<Task> {
        let slot = self.slot(index)?;
        Ok(self.tasks.remove(slot))
    }

    /// Replaces description and due date. Completion and priority are kept.
    pub fn edit(
        &mut self,
        index: usize,
        description: impl Into<String>,
        due_date: Option<NaiveDate>,
    ) -> StoreResult<()> {
        let slot = self.slot(index)?;
        let description = description.into();
        validate_description(&description)?;

        let task = &mut self.tasks[slot];
        task.description = description;
        task.due_date = due_date;
        Ok(())
    }

    /// Sets priority from a label; the old priority survives any failure.
    pub fn set_priority(&mut self, index: usize, priority_text: &str) -> StoreResult<()> {
        let slot = self.slot(index)?;
        let priority = priority_text.parse::<Priority>()?;
        self.tasks[slot].priority = priority;
        Ok(())
    }

    /// Dated tasks first in ascending date order, then undated tasks.
    pub fn sort_by_due_date(&mut self) {
        // `sort_by_key` is stable, so equal keys keep insertion order.
        self.tasks
            .sort_by_key(|task| (task.due_date.is_none(), task.due_date));
    }

    /// Writes the list to a delimited file at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        self.save_to(&CsvTaskRepository::new(path.as_ref()))
    }

    /// Replaces the list with the contents of `path`.
    ///
    /// A missing file yields an empty store. On any error the current list
    /// is left as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> StoreResult<()> {
        self.load_from(&CsvTaskRepository::new(path.as_ref()))
    }

    pub fn save_to<R: TaskRepository + ?Sized>(&self, repo: &R) -> StoreResult<()> {
        repo.save_tasks(&self.tasks)?;
        Ok(())
    }

    pub fn load_from<R: TaskRepository + ?Sized>(&mut self, repo: &R) -> StoreResult<()> {
        self.tasks = repo.load_tasks()?.unwrap_or_default();
        Ok(())
    }

    fn slot(&self, index: usize) -> StoreResult<usize> {
        if index == 0 || index > self.tasks.len() {
            return Err(StoreError::InvalidIndex {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(index - 1)
    }
}
