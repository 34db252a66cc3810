//! In-memory task collection.
//!
//! # Responsibility
//! - Hold the ordered task list between load and save.
//! - Enforce 1-based addressing for every positional operation.

pub mod task_store;
