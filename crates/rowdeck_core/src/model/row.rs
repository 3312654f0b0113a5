//! Row domain model.
//!
//! # Responsibility
//! - Define the single editable record persisted by the table store.
//! - Name the data fields that render as table cells.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused for another row.
//! - `date` is fixed at creation and is never editable through the table.
//! - All data fields are free text; no validation is applied.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for one row.
pub type RowId = Uuid;

/// One editable table record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub value: String,
}

impl Row {
    /// Creates an empty row stamped with `date` and a generated id.
    pub fn new(date: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), date)
    }

    /// Creates an empty row with a caller-provided id.
    pub fn with_id(id: RowId, date: impl Into<String>) -> Self {
        Self {
            id,
            title: String::new(),
            date: date.into(),
            description: String::new(),
            tags: String::new(),
            value: String::new(),
        }
    }

    /// Returns the text stored under `key`.
    pub fn field(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Title => &self.title,
            FieldKey::Date => &self.date,
            FieldKey::Description => &self.description,
            FieldKey::Tags => &self.tags,
            FieldKey::Value => &self.value,
        }
    }

    /// Replaces the text stored under `key`.
    pub fn set_field(&mut self, key: FieldKey, text: impl Into<String>) {
        let text = text.into();
        match key {
            FieldKey::Title => self.title = text,
            FieldKey::Date => self.date = text,
            FieldKey::Description => self.description = text,
            FieldKey::Tags => self.tags = text,
            FieldKey::Value => self.value = text,
        }
    }

    /// Returns whether every editable field is empty.
    pub fn is_blank(&self) -> bool {
        FieldKey::ALL
            .iter()
            .filter(|key| key.is_editable())
            .all(|key| self.field(*key).is_empty())
    }
}

/// Data column of the table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Title,
    Date,
    Description,
    Tags,
    Value,
}

impl FieldKey {
    /// Every data column in display order.
    pub const ALL: [FieldKey; 5] = [
        FieldKey::Title,
        FieldKey::Date,
        FieldKey::Description,
        FieldKey::Tags,
        FieldKey::Value,
    ];

    /// Attribute value used as `data-key` in markup and as the JSON name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Date => "date",
            Self::Description => "description",
            Self::Tags => "tags",
            Self::Value => "value",
        }
    }

    /// Column header used by CSV export.
    pub fn header(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Date => "Date",
            Self::Description => "Description",
            Self::Tags => "Tags",
            Self::Value => "Value",
        }
    }

    /// Only `date` is read-only.
    pub fn is_editable(self) -> bool {
        !matches!(self, Self::Date)
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a field name is not a known column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError(pub String);

impl Display for UnknownFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown field `{}`; expected title|date|description|tags|value",
            self.0
        )
    }
}

impl std::error::Error for UnknownFieldError {}

impl FromStr for FieldKey {
    type Err = UnknownFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "date" => Ok(Self::Date),
            "description" => Ok(Self::Description),
            "tags" => Ok(Self::Tags),
            "value" => Ok(Self::Value),
            _ => Err(UnknownFieldError(value.to_string())),
        }
    }
}
