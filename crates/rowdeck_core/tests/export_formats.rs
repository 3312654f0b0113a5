use rowdeck_core::{
    export_csv, export_json, ExportFormat, FixedClock, KvRowRepository, MemoryKeyValueStore, Row,
    RowRepository, TableService,
};

fn scenario_row() -> Row {
    let mut row = Row::new("d1");
    row.title = "A".to_string();
    row.description = "x".to_string();
    row.tags = "t".to_string();
    row.value = "1".to_string();
    row
}

#[test]
fn json_export_matches_scenario_without_ids() {
    let file = export_json(&[scenario_row()]).unwrap();

    assert_eq!(file.file_name, "table-data.json");
    assert_eq!(file.mime_type, "application/json");
    assert_eq!(
        file.content,
        "[\n  {\n    \"title\": \"A\",\n    \"date\": \"d1\",\n    \"description\": \"x\",\n    \"tags\": \"t\",\n    \"value\": \"1\"\n  }\n]"
    );
}

#[test]
fn csv_export_matches_scenario() {
    let file = export_csv(&[scenario_row()]);

    assert_eq!(file.file_name, "table-data.csv");
    assert_eq!(file.mime_type, "text/csv");
    assert_eq!(
        file.content,
        "Title,Date,Description,Tags,Value\n\"A\",\"d1\",\"x\",\"t\",\"1\""
    );
}

#[test]
fn service_export_reads_storage_not_unsaved_edits() {
    let mut repo = KvRowRepository::new(MemoryKeyValueStore::new());
    let row = scenario_row();
    repo.save(std::slice::from_ref(&row)).unwrap();
    let mut service = TableService::with_clock(repo, FixedClock("d2".to_string()));
    service.render().unwrap();
    service
        .edit_cell(row.id, rowdeck_core::FieldKey::Title, "unsaved")
        .unwrap();

    let file = service.export(ExportFormat::Csv).unwrap();
    assert!(file.content.contains("\"A\""));
    assert!(!file.content.contains("unsaved"));
}

#[test]
fn export_file_writes_download_name_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = export_json(&[scenario_row()]).unwrap();

    let path = file.write_to(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("table-data.json"));
    let written = std::fs::read_to_string(path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed[0]["title"], "A");
}
