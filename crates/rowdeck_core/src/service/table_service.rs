//! Table use-case service.
//!
//! # Responsibility
//! - Run add/delete/save against a collection read fresh from storage.
//! - Own the rendered view that in-table edits act on.
//! - Route delegated control actions through one dispatcher.
//!
//! # Invariants
//! - Every mutation reloads, writes the full collection, then re-renders
//!   from storage.
//! - Cell edits touch the view only; `save` is the single path from view
//!   to storage and replaces the stored collection wholesale.
//! - Failed mutations leave storage untouched.

use crate::export::{self, ExportError, ExportFile, ExportFormat};
use crate::model::clock::{Clock, LocalClock};
use crate::model::row::{FieldKey, Row, RowId};
use crate::render::{render_table, RenderError, RenderedTable};
use crate::repo::row_repo::{RepoError, RowRepository};
use crate::service::action::TableAction;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Acknowledgment shown once the save action completes.
pub const SAVE_ACK_MESSAGE: &str = "Data saved!";

pub type TableResult<T> = Result<T, TableError>;

/// Service error for table use-cases.
#[derive(Debug)]
pub enum TableError {
    Repo(RepoError),
    Render(RenderError),
    Export(ExportError),
    RowNotFound(RowId),
    /// Positional delete with a non-numeric or out-of-range index.
    InvalidIndex { raw: String, len: usize },
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
            Self::RowNotFound(id) => write!(f, "row not found: {id}"),
            Self::InvalidIndex { raw, len } => {
                write!(f, "invalid row index `{raw}` for table of {len} row(s)")
            }
        }
    }
}

impl Error for TableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Render(err) => Some(err),
            Self::Export(err) => Some(err),
            Self::RowNotFound(_) | Self::InvalidIndex { .. } => None,
        }
    }
}

impl From<RepoError> for TableError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<RenderError> for TableError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<ExportError> for TableError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

/// Result of the save action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveAck {
    pub message: &'static str,
    pub saved_rows: usize,
}

/// What a dispatched action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Storage changed and the view was re-rendered.
    Rendered,
    Saved(SaveAck),
    Exported(ExportFile),
}

/// Table facade over a row repository.
pub struct TableService<R: RowRepository, C: Clock = LocalClock> {
    repo: R,
    clock: C,
    view: RenderedTable,
}

impl<R: RowRepository> TableService<R> {
    /// Creates a service stamping new rows with the local wall clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, LocalClock)
    }
}

impl<R: RowRepository, C: Clock> TableService<R, C> {
    /// Creates a service with an explicit clock. The view starts empty
    /// until the first `render`.
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self {
            repo,
            clock,
            view: RenderedTable::default(),
        }
    }

    /// Current rendered view, including unsaved edits.
    pub fn view(&self) -> &RenderedTable {
        &self.view
    }

    /// Reads the stored collection.
    pub fn rows(&mut self) -> TableResult<Vec<Row>> {
        Ok(self.repo.load()?)
    }

    /// Rebuilds the view from storage, discarding unsaved edits.
    pub fn render(&mut self) -> TableResult<&RenderedTable> {
        let rows = self.repo.load()?;
        self.view = render_table(&rows);
        Ok(&self.view)
    }

    /// Appends an empty row stamped with the current time and focuses its
    /// title cell.
    pub fn add_row(&mut self) -> TableResult<RowId> {
        let mut rows = self.repo.load()?;
        let row = Row::new(self.clock.now_label());
        let row_id = row.id;
        rows.push(row);
        self.repo.save(&rows)?;

        self.render()?;
        self.view.focus_last_title();
        info!(
            "event=row_add module=table status=ok rows={}",
            self.view.len()
        );
        Ok(row_id)
    }

    /// Removes the row with `id` from storage.
    pub fn delete_row(&mut self, id: RowId) -> TableResult<()> {
        let mut rows = self.repo.load()?;
        let position = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(TableError::RowNotFound(id))?;
        self.remove_at(&mut rows, position)
    }

    /// Removes the row at a zero-based index given as attribute text.
    pub fn delete_row_at(&mut self, index: &str) -> TableResult<()> {
        let mut rows = self.repo.load()?;
        let position = match index.trim().parse::<usize>() {
            Ok(position) if position < rows.len() => position,
            _ => {
                warn!(
                    "event=row_delete module=table status=rejected error_code=invalid_index rows={}",
                    rows.len()
                );
                return Err(TableError::InvalidIndex {
                    raw: index.to_string(),
                    len: rows.len(),
                });
            }
        };
        self.remove_at(&mut rows, position)
    }

    fn remove_at(&mut self, rows: &mut Vec<Row>, position: usize) -> TableResult<()> {
        rows.remove(position);
        self.repo.save(rows)?;
        self.render()?;
        info!(
            "event=row_delete module=table status=ok index={} rows={}",
            position,
            rows.len()
        );
        Ok(())
    }

    /// Edits one cell in the view. Storage is untouched until `save`.
    pub fn edit_cell(
        &mut self,
        id: RowId,
        key: FieldKey,
        text: impl Into<String>,
    ) -> TableResult<()> {
        self.view.set_cell(id, key, text)?;
        Ok(())
    }

    /// Writes the rendered view to storage, replacing the stored
    /// collection.
    pub fn save(&mut self) -> TableResult<SaveAck> {
        let rows = self.view.snapshot();
        self.repo.save(&rows)?;
        info!(
            "event=table_save module=table status=ok rows={}",
            rows.len()
        );
        Ok(SaveAck {
            message: SAVE_ACK_MESSAGE,
            saved_rows: rows.len(),
        })
    }

    /// Adopts a view captured by the UI shell and saves it.
    ///
    /// Used when the page, not this service, holds the edited cells.
    pub fn save_view(&mut self, view: RenderedTable) -> TableResult<SaveAck> {
        self.view = view;
        self.save()
    }

    /// Builds a download from the stored collection.
    pub fn export(&mut self, format: ExportFormat) -> TableResult<ExportFile> {
        let rows = self.repo.load()?;
        let file = export::export(&rows, format)?;
        info!(
            "event=table_export module=table status=ok file={} rows={} bytes={}",
            file.file_name,
            rows.len(),
            file.content.len()
        );
        Ok(file)
    }

    /// Drops the stored collection and renders an empty table.
    pub fn clear(&mut self) -> TableResult<()> {
        self.repo.clear()?;
        self.render()?;
        info!("event=table_clear module=table status=ok");
        Ok(())
    }

    /// Single entry point for delegated control actions.
    pub fn dispatch(&mut self, action: TableAction) -> TableResult<DispatchOutcome> {
        let outcome = match action {
            TableAction::AddRow => self.add_row().map(|_| DispatchOutcome::Rendered),
            TableAction::Save => self.save().map(DispatchOutcome::Saved),
            TableAction::Delete(id) => self.delete_row(id).map(|()| DispatchOutcome::Rendered),
            TableAction::DownloadJson => self
                .export(ExportFormat::Json)
                .map(DispatchOutcome::Exported),
            TableAction::DownloadCsv => self
                .export(ExportFormat::Csv)
                .map(DispatchOutcome::Exported),
        };
        if let Err(err) = &outcome {
            warn!(
                "event=table_dispatch module=table status=error action={} error={}",
                action.name(),
                err
            );
        }
        outcome
    }

    /// Gives back the repository.
    pub fn into_repo(self) -> R {
        self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::{TableError, TableService};
    use crate::model::clock::FixedClock;
    use crate::model::row::FieldKey;
    use crate::repo::row_repo::{KvRowRepository, RepoError, DEFAULT_STORAGE_KEY};
    use crate::storage::MemoryKeyValueStore;
    use uuid::Uuid;

    fn service() -> TableService<KvRowRepository<MemoryKeyValueStore>, FixedClock> {
        TableService::with_clock(
            KvRowRepository::new(MemoryKeyValueStore::new()),
            FixedClock("d1".to_string()),
        )
    }

    #[test]
    fn add_row_into_empty_table_is_the_only_row() {
        let mut service = service();
        let id = service.add_row().unwrap();
        let rows = service.rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].date, "d1");
        assert_eq!(service.view().focus().map(|f| f.row_id), Some(id));
    }

    #[test]
    fn unsaved_edits_do_not_reach_storage() {
        let mut service = service();
        let id = service.add_row().unwrap();
        service.edit_cell(id, FieldKey::Title, "draft").unwrap();
        assert_eq!(service.rows().unwrap()[0].title, "");

        service.render().unwrap();
        assert_eq!(
            service.view().rows()[0].cell_text(FieldKey::Title),
            Some("")
        );
    }

    #[test]
    fn negative_index_is_rejected() {
        let mut service = service();
        service.add_row().unwrap();
        let err = service.delete_row_at("-1").unwrap_err();
        assert!(matches!(err, TableError::InvalidIndex { len: 1, .. }));
    }

    #[test]
    fn storage_failures_stay_repo_errors_and_unknown_ids_are_row_not_found() {
        let store = MemoryKeyValueStore::new().with_item(DEFAULT_STORAGE_KEY, "[");
        let mut broken = TableService::with_clock(
            KvRowRepository::new(store),
            FixedClock("d1".to_string()),
        );
        let err = broken.delete_row(Uuid::nil()).unwrap_err();
        assert!(matches!(
            err,
            TableError::Repo(RepoError::MalformedData { .. })
        ));

        let mut service = service();
        service.add_row().unwrap();
        let err = service.delete_row(Uuid::nil()).unwrap_err();
        assert!(matches!(err, TableError::RowNotFound(id) if id.is_nil()));
        assert_eq!(service.rows().unwrap().len(), 1);
    }
}
