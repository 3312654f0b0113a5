use clap::{Parser, Subcommand, ValueEnum};
use rowdeck_core::config::{DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV, STORAGE_KEY_ENV};
use rowdeck_core::{ExportFormat, FieldKey};
use std::path::PathBuf;

/// rowdeck — editable table kept in one local storage blob
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// SQLite file holding the table.
    #[arg(long, global = true, env = DB_PATH_ENV)]
    pub db: Option<PathBuf>,
    /// Storage key the rows are kept under.
    #[arg(long, global = true, env = STORAGE_KEY_ENV)]
    pub storage_key: Option<String>,
    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = LOG_LEVEL_ENV)]
    pub log_level: Option<String>,
    /// Absolute directory for log files.
    #[arg(long, global = true, env = LOG_DIR_ENV)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prints the table body markup.
    Render,
    /// Lists rows as `index  id  title | date | description | tags | value`.
    List,
    /// Appends an empty row stamped with the current time.
    Add,
    /// Deletes a row by id.
    Delete { id: uuid::Uuid },
    /// Deletes a row by zero-based position.
    DeleteAt { index: String },
    /// Edits one cell and saves the table.
    Edit {
        id: uuid::Uuid,
        #[arg(value_enum)]
        field: EditableField,
        text: String,
    },
    /// Exports the table; prints to stdout unless `--out` is given.
    Export {
        #[arg(value_enum)]
        format: FormatArg,
        /// Directory to write `table-data.<ext>` into.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Removes the stored table.
    Clear,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditableField {
    Title,
    Description,
    Tags,
    Value,
}

impl From<EditableField> for FieldKey {
    fn from(value: EditableField) -> Self {
        match value {
            EditableField::Title => FieldKey::Title,
            EditableField::Description => FieldKey::Description,
            EditableField::Tags => FieldKey::Tags,
            EditableField::Value => FieldKey::Value,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, EditableField};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn edit_parses_field_and_text() {
        let id = uuid::Uuid::new_v4().to_string();
        let cli = Cli::try_parse_from(["rowdeck", "edit", id.as_str(), "tags", "a b"]).unwrap();
        match cli.command {
            Command::Edit { field, text, .. } => {
                assert_eq!(field, EditableField::Tags);
                assert_eq!(text, "a b");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn edit_rejects_date_field() {
        let id = uuid::Uuid::new_v4().to_string();
        assert!(Cli::try_parse_from(["rowdeck", "edit", id.as_str(), "date", "x"]).is_err());
    }
}
