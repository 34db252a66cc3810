//! Task use-case service.
//!
//! # Responsibility
//! - Provide the collaborator-facing API over raw user text.
//! - Bind one `TaskStore` to one `TaskRepository` for load/save.
//! - Emit metadata-only diagnostics for every use-case call.
//!
//! # Invariants
//! - All text is parsed before the store is touched.
//! - Task descriptions never reach the log.

use crate::model::task::{parse_due_date, Priority, Task, TaskValidationError};
use crate::repo::csv_repo::{RepoError, TaskRepository};
use crate::store::task_store::{ListFilter, StoreError, StoreResult, TaskStore};
use log::{info, warn};

/// Use-case service wrapper for task list operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    store: TaskStore,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service with an empty store. Nothing is read yet.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            store: TaskStore::new(),
        }
    }

    /// Creates a service and loads persisted tasks.
    ///
    /// A repository with nothing persisted yields an empty list.
    pub fn open(repo: R) -> StoreResult<Self> {
        let mut service = Self::new(repo);
        service.load()?;
        Ok(service)
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Adds a task from raw input and returns its 1-based position.
    ///
    /// # Contract
    /// - Blank `due_text` means no due date.
    /// - `priority_text = None` uses `Priority::default()`.
    pub fn add_task(
        &mut self,
        description: &str,
        due_text: &str,
        priority_text: Option<&str>,
    ) -> StoreResult<usize> {
        let result = parse_add_input(due_text, priority_text).and_then(|(due_date, priority)| {
            self.store.add(description.trim(), due_date, priority)
        });
        self.log_outcome("task_add", &result);
        result
    }

    /// Materialized listing with 1-based store positions.
    pub fn list_tasks(&self, filter: ListFilter) -> Vec<(usize, &Task)> {
        self.store.list(filter).collect()
    }

    pub fn complete_task(&mut self, index: usize) -> StoreResult<()> {
        let result = self.store.complete(index);
        self.log_outcome("task_complete", &result);
        result
    }

    pub fn delete_task(&mut self, index: usize) -> StoreResult<Task> {
        let result = self.store.delete(index);
        self.log_outcome("task_delete", &result);
        result
    }

    /// Replaces description and due date from raw input.
    pub fn edit_task(&mut self, index: usize, description: &str, due_text: &str) -> StoreResult<()> {
        let result = parse_due_date(due_text)
            .map_err(StoreError::from)
            .and_then(|due_date| self.store.edit(index, description.trim(), due_date));
        self.log_outcome("task_edit", &result);
        result
    }

    pub fn sort_by_due_date(&mut self) {
        self.store.sort_by_due_date();
        self.log_outcome("task_sort", &Ok(()));
    }

    pub fn set_priority(&mut self, index: usize, priority_text: &str) -> StoreResult<()> {
        let result = self.store.set_priority(index, priority_text);
        self.log_outcome("task_set_priority", &result);
        result
    }

    pub fn save(&self) -> StoreResult<()> {
        let result = self.store.save_to(&self.repo);
        self.log_outcome("tasks_save", &result);
        result
    }

    /// Replaces in-memory tasks with persisted state.
    pub fn load(&mut self) -> StoreResult<()> {
        let result = self.store.load_from(&self.repo);
        self.log_outcome("tasks_load", &result);
        result
    }

    fn log_outcome<T>(&self, event: &str, result: &StoreResult<T>) {
        match result {
            Ok(_) => info!(
                "event={event} module=service status=ok count={}",
                self.store.len()
            ),
            Err(err) => warn!(
                "event={event} module=service status=error error_code={}",
                error_code(err)
            ),
        }
    }
}

fn parse_add_input(
    due_text: &str,
    priority_text: Option<&str>,
) -> StoreResult<(Option<chrono::NaiveDate>, Priority)> {
    let due_date = parse_due_date(due_text)?;
    let priority = match priority_text {
        Some(text) => text.parse::<Priority>()?,
        None => Priority::default(),
    };
    Ok((due_date, priority))
}

fn error_code(err: &StoreError) -> &'static str {
    match err {
        StoreError::InvalidIndex { .. } => "invalid_index",
        StoreError::Validation(source) | StoreError::Repo(RepoError::Validation { source, .. }) => {
            match source {
                TaskValidationError::EmptyDescription => "empty_description",
                TaskValidationError::InvalidPriority(_) => "invalid_priority",
                TaskValidationError::MalformedDate(_) => "malformed_date",
            }
        }
        StoreError::Repo(RepoError::InvalidRecord { .. }) => "invalid_record",
        StoreError::Repo(RepoError::Io { .. }) => "io",
    }
}
