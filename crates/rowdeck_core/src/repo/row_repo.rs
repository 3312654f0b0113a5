//! Row collection repository contracts and key-value implementation.
//!
//! # Responsibility
//! - Persist the full ordered row collection as one JSON array under a
//!   single storage key.
//!
//! # Invariants
//! - An absent key loads as an empty collection.
//! - A present but unparsable value is `RepoError::MalformedData`.
//! - Rows stored without an `id` get one on first load, written back
//!   before `load` returns, so later loads see the same ids.
//! - `save` overwrites the previous collection with a single write.

use crate::model::row::{Row, RowId};
use crate::storage::{KeyValueStore, StorageError};
use log::{debug, error, info};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Storage key the collection lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "editableTableData";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for row collection persistence.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    /// Stored blob exists but is not a JSON array of rows.
    MalformedData {
        key: String,
        source: serde_json::Error,
    },
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::MalformedData { key, source } => {
                write!(f, "malformed row data under `{key}`: {source}")
            }
            Self::Serialize(err) => write!(f, "failed to serialize rows: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::MalformedData { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Collection-level persistence for table rows.
pub trait RowRepository {
    /// Reads the full collection in storage order.
    ///
    /// Takes `&mut self` because a first load may persist backfilled ids.
    fn load(&mut self) -> RepoResult<Vec<Row>>;
    /// Replaces the stored collection with `rows`.
    fn save(&mut self, rows: &[Row]) -> RepoResult<()>;
    /// Removes the stored collection entirely.
    fn clear(&mut self) -> RepoResult<()>;
}

/// Persisted row shape; `id` is absent in blobs written before rows
/// carried identity.
#[derive(Deserialize)]
struct StoredRow {
    #[serde(default)]
    id: Option<RowId>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    value: String,
}

impl StoredRow {
    /// Returns the row and whether its id was freshly assigned.
    fn into_row(self) -> (Row, bool) {
        let assigned = self.id.is_none();
        let row = Row {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            title: self.title,
            date: self.date,
            description: self.description,
            tags: self.tags,
            value: self.value,
        };
        (row, assigned)
    }
}

/// Row repository persisting through any `KeyValueStore`.
pub struct KvRowRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvRowRepository<S> {
    /// Uses `DEFAULT_STORAGE_KEY`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Gives back the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> RowRepository for KvRowRepository<S> {
    fn load(&mut self) -> RepoResult<Vec<Row>> {
        let Some(raw) = self.store.get_item(&self.key)? else {
            debug!("event=rows_load module=repo status=ok rows=0 source=absent");
            return Ok(Vec::new());
        };

        let stored = match serde_json::from_str::<Vec<StoredRow>>(&raw) {
            Ok(stored) => stored,
            Err(source) => {
                error!(
                    "event=rows_load module=repo status=error error_code=malformed_data line={} column={}",
                    source.line(),
                    source.column()
                );
                return Err(RepoError::MalformedData {
                    key: self.key.clone(),
                    source,
                });
            }
        };

        let mut backfilled = 0usize;
        let rows: Vec<Row> = stored
            .into_iter()
            .map(|stored| {
                let (row, assigned) = stored.into_row();
                backfilled += usize::from(assigned);
                row
            })
            .collect();

        if backfilled > 0 {
            self.save(&rows)?;
            info!(
                "event=rows_backfill_ids module=repo status=ok rows={} backfilled={}",
                rows.len(),
                backfilled
            );
        }

        debug!(
            "event=rows_load module=repo status=ok rows={} bytes={}",
            rows.len(),
            raw.len()
        );
        Ok(rows)
    }

    fn save(&mut self, rows: &[Row]) -> RepoResult<()> {
        let raw = serde_json::to_string(rows).map_err(RepoError::Serialize)?;
        self.store.set_item(&self.key, &raw)?;
        debug!(
            "event=rows_save module=repo status=ok rows={} bytes={}",
            rows.len(),
            raw.len()
        );
        Ok(())
    }

    fn clear(&mut self) -> RepoResult<()> {
        self.store.remove_item(&self.key)?;
        debug!("event=rows_clear module=repo status=ok");
        Ok(())
    }
}
