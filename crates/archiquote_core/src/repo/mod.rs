//! Persistence medium abstractions and implementations.
//!
//! # Responsibility
//! - Define the key-value slot contract the store writes snapshots into.
//! - Isolate SQLite details from the service layer.
//!
//! # Invariants
//! - Storage failures surface as `RepoError`, never panics.

pub mod slot_repo;
