//! Core domain logic for Rowdeck, the editable table store.
//! This crate is the single source of truth for table invariants.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::TableConfig;
pub use export::{export_csv, export_json, ExportError, ExportFile, ExportFormat};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::clock::{Clock, FixedClock, LocalClock};
pub use model::row::{FieldKey, Row, RowId, UnknownFieldError};
pub use render::{render_table, CellFocus, RenderError, RenderedRow, RenderedTable};
pub use repo::row_repo::{
    KvRowRepository, RepoError, RepoResult, RowRepository, DEFAULT_STORAGE_KEY,
};
pub use service::action::{ActionParseError, TableAction};
pub use service::table_service::{
    DispatchOutcome, SaveAck, TableError, TableResult, TableService, SAVE_ACK_MESSAGE,
};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
