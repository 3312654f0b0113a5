//! FFI use-case API for the table page.
//!
//! # Responsibility
//! - Expose table render/add/delete/save/export calls to the UI shell.
//! - Keep error semantics simple: envelopes with `ok` and a message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens storage, runs one use-case, and returns; no state is
//!   cached between calls besides the resolved database path.

use log::warn;
use rowdeck_core::db::open_db;
use rowdeck_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    render_table, ExportFormat, KvRowRepository, RenderedTable, Row, SqliteKeyValueStore,
    TableConfig, TableError, TableService,
};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use uuid::Uuid;

static TABLE_CONFIG: OnceLock<TableConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error`, case-insensitive.
/// - `log_dir`: absolute directory for rolling logs.
/// - Returns empty string on success, error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.trim()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database file used by every table call.
///
/// Must run before the first table call to take effect. Returns empty
/// string on success, or an error when a different path is already active.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = TABLE_CONFIG.get_or_init(|| TableConfig {
        db_path: requested.clone(),
        ..TableConfig::from_env()
    });
    if active.db_path == requested {
        String::new()
    } else {
        format!(
            "table database already configured at `{}`",
            active.db_path.display()
        )
    }
}

/// Rendered table returned after render and row mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableViewResponse {
    pub ok: bool,
    /// `<tbody>` inner markup; empty on failure.
    pub html: String,
    /// Row ids in display order.
    pub row_ids: Vec<String>,
    /// Row whose title cell should receive focus.
    pub focus_row_id: Option<String>,
    pub message: String,
}

impl TableViewResponse {
    fn from_view(view: &RenderedTable, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            html: view.to_html(),
            row_ids: view.rows().iter().map(|row| row.id().to_string()).collect(),
            focus_row_id: view.focus().map(|focus| focus.row_id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            html: String::new(),
            row_ids: Vec::new(),
            focus_row_id: None,
            message: message.into(),
        }
    }
}

/// Generic action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableActionResponse {
    pub ok: bool,
    pub message: String,
}

/// One rendered row as read back from the page cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRowInput {
    pub row_id: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub tags: String,
    pub value: String,
}

/// Download produced by an export call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExportResponse {
    pub ok: bool,
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
    /// Set when `out_dir` was given and the file was written there.
    pub written_path: Option<String>,
    pub message: String,
}

/// Renders the stored collection.
#[flutter_rust_bridge::frb(sync)]
pub fn table_render() -> TableViewResponse {
    render_at(&resolve_config())
}

/// Appends an empty row and focuses its title cell.
#[flutter_rust_bridge::frb(sync)]
pub fn table_add_row() -> TableViewResponse {
    add_row_at(&resolve_config())
}

/// Deletes the row with `row_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn table_delete_row(row_id: String) -> TableViewResponse {
    delete_row_at_id(&resolve_config(), &row_id)
}

/// Deletes the row at the zero-based `index` attribute value.
#[flutter_rust_bridge::frb(sync)]
pub fn table_delete_row_at(index: String) -> TableViewResponse {
    delete_row_at_index(&resolve_config(), &index)
}

/// Replaces storage with the rows currently shown on the page.
///
/// Success message is the save acknowledgment to show the user.
#[flutter_rust_bridge::frb(sync)]
pub fn table_save(rows: Vec<TableRowInput>) -> TableActionResponse {
    save_at(&resolve_config(), rows)
}

/// Exports the stored collection as `json` or `csv`.
#[flutter_rust_bridge::frb(sync)]
pub fn table_export(format: String, out_dir: Option<String>) -> TableExportResponse {
    export_at(&resolve_config(), &format, out_dir.as_deref())
}

/// Removes the stored collection.
#[flutter_rust_bridge::frb(sync)]
pub fn table_clear() -> TableActionResponse {
    clear_at(&resolve_config())
}

fn render_at(config: &TableConfig) -> TableViewResponse {
    view_call(config, "table_render", |service| {
        service.render()?;
        Ok("Rendered.")
    })
}

fn add_row_at(config: &TableConfig) -> TableViewResponse {
    view_call(config, "table_add_row", |service| {
        service.add_row()?;
        Ok("Row added.")
    })
}

fn delete_row_at_id(config: &TableConfig, row_id: &str) -> TableViewResponse {
    let Ok(id) = Uuid::parse_str(row_id.trim()) else {
        return TableViewResponse::failure(format!(
            "table_delete_row failed: invalid row id `{row_id}`"
        ));
    };
    view_call(config, "table_delete_row", |service| {
        service.delete_row(id)?;
        Ok("Row deleted.")
    })
}

fn delete_row_at_index(config: &TableConfig, index: &str) -> TableViewResponse {
    view_call(config, "table_delete_row_at", |service| {
        service.delete_row_at(index)?;
        Ok("Row deleted.")
    })
}

fn save_at(config: &TableConfig, rows: Vec<TableRowInput>) -> TableActionResponse {
    let rows = match rows.into_iter().map(to_row).collect::<Result<Vec<_>, _>>() {
        Ok(rows) => rows,
        Err(err) => {
            return TableActionResponse {
                ok: false,
                message: format!("table_save failed: {err}"),
            }
        }
    };

    match with_table_service(config, |service| service.save_view(render_table(&rows))) {
        Ok(ack) => TableActionResponse {
            ok: true,
            message: ack.message.to_string(),
        },
        Err(err) => TableActionResponse {
            ok: false,
            message: format!("table_save failed: {err}"),
        },
    }
}

fn export_at(config: &TableConfig, format: &str, out_dir: Option<&str>) -> TableExportResponse {
    let result = format
        .parse::<ExportFormat>()
        .map_err(|err| err.to_string())
        .and_then(|format| {
            with_table_service(config, |service| service.export(format))
        })
        .and_then(|file| {
            let written = match out_dir.map(str::trim).filter(|dir| !dir.is_empty()) {
                Some(dir) => Some(file.write_to(dir).map_err(|err| err.to_string())?),
                None => None,
            };
            Ok((file, written))
        });

    match result {
        Ok((file, written)) => TableExportResponse {
            ok: true,
            file_name: file.file_name.to_string(),
            mime_type: file.mime_type.to_string(),
            content: file.content,
            written_path: written.map(|path| path.display().to_string()),
            message: "Export ready.".to_string(),
        },
        Err(err) => TableExportResponse {
            ok: false,
            file_name: String::new(),
            mime_type: String::new(),
            content: String::new(),
            written_path: None,
            message: format!("table_export failed: {err}"),
        },
    }
}

fn clear_at(config: &TableConfig) -> TableActionResponse {
    match with_table_service(config, |service| service.clear()) {
        Ok(()) => TableActionResponse {
            ok: true,
            message: "Table cleared.".to_string(),
        },
        Err(err) => TableActionResponse {
            ok: false,
            message: format!("table_clear failed: {err}"),
        },
    }
}

fn resolve_config() -> TableConfig {
    TABLE_CONFIG.get_or_init(TableConfig::from_env).clone()
}

type SqliteTableService<'conn> = TableService<KvRowRepository<SqliteKeyValueStore<'conn>>>;

fn view_call(
    config: &TableConfig,
    call: &'static str,
    f: impl FnOnce(&mut SqliteTableService<'_>) -> Result<&'static str, TableError>,
) -> TableViewResponse {
    let outcome = with_table_service(config, |service| {
        let message = f(service)?;
        Ok(TableViewResponse::from_view(service.view(), message))
    });
    outcome.unwrap_or_else(|err| {
        warn!("event=ffi_call module=ffi status=error call={call}");
        TableViewResponse::failure(format!("{call} failed: {err}"))
    })
}

fn with_table_service<T>(
    config: &TableConfig,
    f: impl FnOnce(&mut SqliteTableService<'_>) -> Result<T, TableError>,
) -> Result<T, String> {
    let conn = open_db(db_path(config)).map_err(|err| format!("table DB open failed: {err}"))?;
    let store = SqliteKeyValueStore::try_new(&conn)
        .map_err(|err| format!("table store init failed: {err}"))?;
    let repo = KvRowRepository::with_key(store, config.storage_key.as_str());
    let mut service = TableService::new(repo);
    f(&mut service).map_err(|err| err.to_string())
}

fn db_path(config: &TableConfig) -> &Path {
    config.db_path.as_path()
}

fn to_row(input: TableRowInput) -> Result<Row, String> {
    let id = Uuid::parse_str(input.row_id.trim())
        .map_err(|_| format!("invalid row id `{}`", input.row_id))?;
    Ok(Row {
        id,
        title: input.title,
        date: input.date,
        description: input.description,
        tags: input.tags,
        value: input.value,
    })
}

#[cfg(test)]
mod tests {
    use super::{
        add_row_at, clear_at, core_version, delete_row_at_id, delete_row_at_index, export_at,
        init_logging, ping, render_at, save_at, TableRowInput,
    };
    use rowdeck_core::TableConfig;

    fn temp_config(dir: &tempfile::TempDir) -> TableConfig {
        TableConfig {
            db_path: dir.path().join("rowdeck.sqlite3"),
            ..TableConfig::from_lookup(|_| None)
        }
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn add_then_render_returns_focused_row_markup() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);

        let added = add_row_at(&config);
        assert!(added.ok, "{}", added.message);
        assert_eq!(added.row_ids.len(), 1);
        assert_eq!(added.focus_row_id.as_deref(), Some(added.row_ids[0].as_str()));

        let rendered = render_at(&config);
        assert!(rendered.ok, "{}", rendered.message);
        assert_eq!(rendered.row_ids, added.row_ids);
        assert!(rendered.focus_row_id.is_none());
        assert_eq!(rendered.html, added.html);
    }

    #[test]
    fn save_replaces_collection_with_page_rows() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        let first = add_row_at(&config).row_ids[0].clone();
        add_row_at(&config);

        let saved = save_at(
            &config,
            vec![TableRowInput {
                row_id: first.clone(),
                title: "Edited".to_string(),
                date: "d1".to_string(),
                description: String::new(),
                tags: "t".to_string(),
                value: "1".to_string(),
            }],
        );
        assert!(saved.ok, "{}", saved.message);
        assert_eq!(saved.message, "Data saved!");

        let rendered = render_at(&config);
        assert_eq!(rendered.row_ids, vec![first]);
        assert!(rendered.html.contains(">Edited</td>"));
    }

    #[test]
    fn save_rejects_rows_without_valid_ids() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        let response = save_at(
            &config,
            vec![TableRowInput {
                row_id: "0".to_string(),
                title: String::new(),
                date: String::new(),
                description: String::new(),
                tags: String::new(),
                value: String::new(),
            }],
        );
        assert!(!response.ok);
        assert!(response.message.contains("invalid row id"));
    }

    #[test]
    fn delete_by_id_and_index_report_failures_in_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        let id = add_row_at(&config).row_ids[0].clone();
        add_row_at(&config);

        let bad_index = delete_row_at_index(&config, "7");
        assert!(!bad_index.ok);
        assert!(bad_index.message.contains("invalid row index"));

        let by_index = delete_row_at_index(&config, "1");
        assert!(by_index.ok, "{}", by_index.message);
        assert_eq!(by_index.row_ids, vec![id.clone()]);

        let by_id = delete_row_at_id(&config, &id);
        assert!(by_id.ok, "{}", by_id.message);
        assert!(by_id.row_ids.is_empty());

        assert!(!delete_row_at_id(&config, "not-a-uuid").ok);
    }

    #[test]
    fn export_writes_file_when_directory_given() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        add_row_at(&config);

        let csv = export_at(&config, "csv", Some(dir.path().to_str().unwrap()));
        assert!(csv.ok, "{}", csv.message);
        assert_eq!(csv.file_name, "table-data.csv");
        assert!(csv.content.starts_with("Title,Date,Description,Tags,Value\n"));
        let written = csv.written_path.expect("csv should be written");
        assert!(std::path::Path::new(&written).exists());

        let json = export_at(&config, "json", None);
        assert!(json.ok, "{}", json.message);
        assert!(json.written_path.is_none());

        assert!(!export_at(&config, "xml", None).ok);
    }

    #[test]
    fn clear_empties_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        add_row_at(&config);

        assert!(clear_at(&config).ok);
        assert!(render_at(&config).row_ids.is_empty());
    }
}
