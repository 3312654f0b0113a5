//! Delegated table actions.
//!
//! Controls in rendered markup carry `data-action` (and `data-row-id` for
//! row-scoped controls). One dispatcher turns those attributes into a
//! `TableAction`, so nothing has to be rebound after a render.

use crate::model::row::RowId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// User action routed through `TableService::dispatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    AddRow,
    Save,
    Delete(RowId),
    DownloadJson,
    DownloadCsv,
}

/// Control attributes that do not name a known action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionParseError {
    UnknownAction(String),
    MissingRowId(&'static str),
    InvalidRowId(String),
}

impl Display for ActionParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAction(value) => write!(f, "unknown table action `{value}`"),
            Self::MissingRowId(action) => write!(f, "action `{action}` requires data-row-id"),
            Self::InvalidRowId(value) => write!(f, "invalid row id `{value}`"),
        }
    }
}

impl Error for ActionParseError {}

impl TableAction {
    /// Builds an action from a control's `data-action` / `data-row-id`.
    pub fn parse(action: &str, row_id: Option<&str>) -> Result<Self, ActionParseError> {
        match action.trim() {
            "add-row" => Ok(Self::AddRow),
            "save" => Ok(Self::Save),
            "download-json" => Ok(Self::DownloadJson),
            "download-csv" => Ok(Self::DownloadCsv),
            "delete" => {
                let raw = row_id
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .ok_or(ActionParseError::MissingRowId("delete"))?;
                Uuid::parse_str(raw)
                    .map(Self::Delete)
                    .map_err(|_| ActionParseError::InvalidRowId(raw.to_string()))
            }
            other => Err(ActionParseError::UnknownAction(other.to_string())),
        }
    }

    /// Stable name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddRow => "add-row",
            Self::Save => "save",
            Self::Delete(_) => "delete",
            Self::DownloadJson => "download-json",
            Self::DownloadCsv => "download-csv",
        }
    }
}
