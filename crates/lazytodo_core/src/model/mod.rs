//! Task domain model.
//!
//! # Responsibility
//! - Define the value types shared by store, repository and service layers.
//! - Keep text parsing of user/file input next to the types it produces.
//!
//! # Invariants
//! - Model values carry no storage or position information; addressing is
//!   owned by `store::TaskStore`.

pub mod task;
