//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the snapshot persistence contract used by the service layer.
//! - Isolate SQLite query details from store/business orchestration.
//!
//! # Invariants
//! - Repository reads distinguish an absent snapshot from a malformed one.
//! - Repository APIs return semantic errors (`InvalidSnapshot`) in addition
//!   to DB transport errors.

pub mod snapshot_repo;
