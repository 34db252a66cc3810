//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and repository calls into use-case level APIs.
//! - Keep the CLI decoupled from storage details.

pub mod task_service;
