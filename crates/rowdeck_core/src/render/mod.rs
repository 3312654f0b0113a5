//! Table rendering.
//!
//! # Responsibility
//! - Project the row collection into an editable view (`RenderedTable`).
//! - Serialize that view into table body markup.
//! - Read edited cell text back into a fresh collection on save.
//!
//! # Invariants
//! - One rendered row per stored row, in storage order.
//! - Rendering is deterministic: same rows, byte-identical markup.
//! - Control cells never contribute to a snapshot.

mod html;
mod view;

pub use html::{escape_html, CONTROL_CLUSTER};
pub use view::{
    render_table, CellFocus, RenderError, RenderResult, RenderedCell, RenderedRow, RenderedTable,
};
