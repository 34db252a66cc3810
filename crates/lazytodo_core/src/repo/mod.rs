//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-list storage contract used by store and service.
//! - Isolate file format details from business orchestration.
//!
//! # Invariants
//! - Persisted rows are validated on read with the same rules as user input.

pub mod csv_repo;
