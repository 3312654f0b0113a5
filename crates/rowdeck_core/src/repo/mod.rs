//! Repository layer over the key-value store.
//!
//! # Responsibility
//! - Define the collection-level persistence contract (`load`, `save`,
//!   `clear`).
//! - Isolate blob serialization from service orchestration.
//!
//! # Invariants
//! - The whole collection is read and written as one unit.
//! - Malformed persisted data is reported, never masked.

pub mod row_repo;
