//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task/subtask records used by core business logic.
//! - Own the in-memory store and its mutation invariants.
//!
//! # Invariants
//! - Every record is identified by a store-allocated numeric id.
//! - Deletion is immediate removal; this domain has no tombstones.

pub mod list;
pub mod task;
