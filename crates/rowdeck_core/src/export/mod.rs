//! Collection export to downloadable files.
//!
//! # Responsibility
//! - Serialize the stored collection to pretty JSON or CSV.
//! - Describe the resulting download (name, mime type, body).
//!
//! # Invariants
//! - Exports never include row ids; only the five data fields.
//! - CSV fields are quote-wrapped verbatim; embedded quotes, commas and
//!   newlines are not escaped.

use crate::model::row::{FieldKey, Row};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const JSON_FILE_NAME: &str = "table-data.json";
pub const CSV_FILE_NAME: &str = "table-data.csv";

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    Serialize(serde_json::Error),
    Write { path: PathBuf, source: std::io::Error },
    UnknownFormat(String),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize export: {err}"),
            Self::Write { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::UnknownFormat(value) => {
                write!(f, "unknown export format `{value}`; expected json|csv")
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Write { source, .. } => Some(source),
            Self::UnknownFormat(_) => None,
        }
    }
}

/// Supported download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(ExportError::UnknownFormat(value.to_string())),
        }
    }
}

/// One downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub content: String,
}

impl ExportFile {
    /// Writes the file into `dir` under its download name.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> ExportResult<PathBuf> {
        let path = dir.as_ref().join(self.file_name);
        std::fs::write(&path, &self.content).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Export projection: the persisted row minus identity.
#[derive(Serialize)]
struct ExportRow<'a> {
    title: &'a str,
    date: &'a str,
    description: &'a str,
    tags: &'a str,
    value: &'a str,
}

impl<'a> From<&'a Row> for ExportRow<'a> {
    fn from(row: &'a Row) -> Self {
        Self {
            title: &row.title,
            date: &row.date,
            description: &row.description,
            tags: &row.tags,
            value: &row.value,
        }
    }
}

/// Builds the file for `format`.
pub fn export(rows: &[Row], format: ExportFormat) -> ExportResult<ExportFile> {
    match format {
        ExportFormat::Json => export_json(rows),
        ExportFormat::Csv => Ok(export_csv(rows)),
    }
}

/// Pretty JSON array with two-space indentation.
pub fn export_json(rows: &[Row]) -> ExportResult<ExportFile> {
    let projected: Vec<ExportRow<'_>> = rows.iter().map(ExportRow::from).collect();
    let content = serde_json::to_string_pretty(&projected).map_err(ExportError::Serialize)?;
    Ok(ExportFile {
        file_name: JSON_FILE_NAME,
        mime_type: "application/json",
        content,
    })
}

/// Header line plus one quote-wrapped line per row, newline-joined.
pub fn export_csv(rows: &[Row]) -> ExportFile {
    let header = FieldKey::ALL
        .iter()
        .map(|key| key.header())
        .collect::<Vec<_>>()
        .join(",");
    let lines = rows.iter().map(|row| {
        FieldKey::ALL
            .iter()
            .map(|key| format!("\"{}\"", row.field(*key)))
            .collect::<Vec<_>>()
            .join(",")
    });

    let content = std::iter::once(header)
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n");
    ExportFile {
        file_name: CSV_FILE_NAME,
        mime_type: "text/csv",
        content,
    }
}
