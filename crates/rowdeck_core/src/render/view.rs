//! Editable table view.

use crate::model::row::{FieldKey, Row, RowId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RenderResult<T> = Result<T, RenderError>;

/// Rejected edit against the rendered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    RowNotRendered(RowId),
    ReadOnlyField(FieldKey),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RowNotRendered(id) => write!(f, "row is not rendered: {id}"),
            Self::ReadOnlyField(key) => write!(f, "field `{key}` is not editable"),
        }
    }
}

impl Error for RenderError {}

/// One data cell of a rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    key: FieldKey,
    text: String,
}

impl RenderedCell {
    pub fn key(&self) -> FieldKey {
        self.key
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One rendered table row: data cells in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    id: RowId,
    cells: Vec<RenderedCell>,
}

impl RenderedRow {
    fn from_row(row: &Row) -> Self {
        let cells = FieldKey::ALL
            .iter()
            .map(|key| RenderedCell {
                key: *key,
                text: row.field(*key).to_string(),
            })
            .collect();
        Self { id: row.id, cells }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn cells(&self) -> &[RenderedCell] {
        &self.cells
    }

    /// Text currently shown in the cell for `key`.
    pub fn cell_text(&self, key: FieldKey) -> Option<&str> {
        self.cells
            .iter()
            .find(|cell| cell.key == key)
            .map(|cell| cell.text.as_str())
    }

    fn to_row(&self) -> Row {
        let mut row = Row::with_id(self.id, String::new());
        for cell in &self.cells {
            row.set_field(cell.key, cell.text.clone());
        }
        row
    }
}

/// Cell holding input focus after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFocus {
    pub row_id: RowId,
    pub key: FieldKey,
}

/// In-memory editable view of the stored collection.
///
/// Edits land here only; storage changes on an explicit save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTable {
    rows: Vec<RenderedRow>,
    focus: Option<CellFocus>,
}

/// Builds the view for `rows`, one rendered row per entry.
pub fn render_table(rows: &[Row]) -> RenderedTable {
    RenderedTable {
        rows: rows.iter().map(RenderedRow::from_row).collect(),
        focus: None,
    }
}

impl RenderedTable {
    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn focus(&self) -> Option<CellFocus> {
        self.focus
    }

    /// Moves focus to the title cell of the last row, if any.
    pub fn focus_last_title(&mut self) -> Option<CellFocus> {
        self.focus = self.rows.last().map(|row| CellFocus {
            row_id: row.id,
            key: FieldKey::Title,
        });
        self.focus
    }

    /// Replaces the text of one editable cell in the view.
    pub fn set_cell(
        &mut self,
        row_id: RowId,
        key: FieldKey,
        text: impl Into<String>,
    ) -> RenderResult<()> {
        if !key.is_editable() {
            return Err(RenderError::ReadOnlyField(key));
        }
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == row_id)
            .ok_or(RenderError::RowNotRendered(row_id))?;
        if let Some(cell) = row.cells.iter_mut().find(|cell| cell.key == key) {
            cell.text = text.into();
        }
        Ok(())
    }

    /// Reads every rendered row's data cells into a fresh collection.
    pub fn snapshot(&self) -> Vec<Row> {
        self.rows.iter().map(RenderedRow::to_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{render_table, RenderError};
    use crate::model::row::{FieldKey, Row};

    fn sample() -> Vec<Row> {
        let mut first = Row::new("d1");
        first.title = "first".to_string();
        let mut second = Row::new("d2");
        second.value = "42".to_string();
        vec![first, second]
    }

    #[test]
    fn snapshot_reflects_edits_and_keeps_date() {
        let rows = sample();
        let mut view = render_table(&rows);
        view.set_cell(rows[1].id, FieldKey::Tags, "urgent").unwrap();

        let snapshot = view.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0], rows[0]);
        assert_eq!(snapshot[1].tags, "urgent");
        assert_eq!(snapshot[1].date, "d2");
        assert_eq!(snapshot[1].id, rows[1].id);
    }

    #[test]
    fn date_cell_rejects_edits() {
        let rows = sample();
        let mut view = render_table(&rows);
        let err = view.set_cell(rows[0].id, FieldKey::Date, "later").unwrap_err();
        assert_eq!(err, RenderError::ReadOnlyField(FieldKey::Date));
    }

    #[test]
    fn unknown_row_rejects_edits() {
        let mut view = render_table(&sample());
        let stranger = Row::new("d9");
        let err = view.set_cell(stranger.id, FieldKey::Title, "x").unwrap_err();
        assert_eq!(err, RenderError::RowNotRendered(stranger.id));
    }

    #[test]
    fn focus_targets_last_title() {
        let rows = sample();
        let mut view = render_table(&rows);
        let focus = view.focus_last_title().unwrap();
        assert_eq!(focus.row_id, rows[1].id);
        assert_eq!(focus.key, FieldKey::Title);
        assert!(render_table(&[]).focus_last_title().is_none());
    }
}
