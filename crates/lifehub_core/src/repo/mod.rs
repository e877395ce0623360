//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the generic per-kind data-access contract.
//! - Isolate SQLite query details from the store.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `Duplicate`) in
//!   addition to DB transport errors.

pub mod record_repo;
