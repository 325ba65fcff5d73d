//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Soft-deleted rows are invisible to every repository operation.
//! - Repository APIs return semantic errors (`NotFound`, `EmptyPatch`)
//!   in addition to DB transport errors.

pub mod task_repo;
