//! Core domain logic for lazytodo.
//! This crate is the single source of truth for task list invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::task::{parse_due_date, Priority, Task, TaskValidationError, DUE_DATE_FORMAT};
pub use repo::csv_repo::{CsvTaskRepository, RepoError, RepoResult, TaskRepository};
pub use service::task_service::TaskService;
pub use store::task_store::{ListFilter, StoreError, StoreResult, TaskStore, UnknownFilter};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
