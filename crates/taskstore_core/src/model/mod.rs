//! Domain model for the task store.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep one row-shaped record for the single `tasks` table.
//!
//! # Invariants
//! - Every task is identified by a store-assigned, never-reused `TaskId`.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

pub mod task;
