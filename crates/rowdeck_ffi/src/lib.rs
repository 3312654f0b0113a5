//! Flutter-facing bindings for Rowdeck core.

pub mod api;
