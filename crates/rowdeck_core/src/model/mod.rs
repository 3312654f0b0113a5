//! Table domain model.
//!
//! # Responsibility
//! - Define the row record and the column keys shared by render/export.
//! - Provide the clock used to stamp new rows.
//!
//! # Invariants
//! - Collection order is display order and storage order.
//! - Every row carries a stable `RowId`.

pub mod clock;
pub mod row;
