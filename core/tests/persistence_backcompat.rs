use errtrack_core::ErrorStore;
use errtrack_core::FileKvStore;
use errtrack_core::NewErrorInput;
use errtrack_core::STORAGE_KEY;
use errtrack_core::StatusDev;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::tempdir;

fn blob_path(dir: &Path) -> std::path::PathBuf {
    dir.join(format!("{STORAGE_KEY}.json"))
}

#[test]
fn legacy_blob_is_upgraded_on_first_load() {
    let dir = tempdir().unwrap_or_else(|e| panic!("tempdir failed: {e}"));
    // Blob written by the pre-rename tracker: errorCode/description, no
    // provenance or browser fields.
    std::fs::write(
        blob_path(dir.path()),
        br#"[{"id":"old-1","errorCode":"E1","description":"d1","statusDev":"in_progress","createdAt":"2025-05-01T10:00:00.000Z","updatedAt":"2025-05-02T10:00:00.000Z"}]"#,
    )
    .unwrap_or_else(|e| panic!("write blob: {e}"));

    let store = ErrorStore::with_defaults(Box::new(FileKvStore::new(dir.path())));
    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "old-1");
    assert_eq!(records[0].error_message, "E1");
    assert_eq!(records[0].context, "d1");
    assert_eq!(records[0].source_file, "");
    assert_eq!(records[0].line, None);
    assert_eq!(records[0].column, None);
    assert_eq!(records[0].browser, "Chrome");
    assert_eq!(records[0].status_dev, StatusDev::InProgress);
    assert_eq!(records[0].created_at, "2025-05-01T10:00:00.000Z");
}

#[test]
fn saving_rewrites_the_blob_in_current_shape() {
    let dir = tempdir().unwrap_or_else(|e| panic!("tempdir failed: {e}"));
    std::fs::write(
        blob_path(dir.path()),
        br#"[{"id":"old-1","errorCode":"E1","description":"d1"}]"#,
    )
    .unwrap_or_else(|e| panic!("write blob: {e}"));

    let mut store = ErrorStore::with_defaults(Box::new(FileKvStore::new(dir.path())));
    store
        .add_error(&NewErrorInput {
            error_message: "E2".to_string(),
            interpretation: String::new(),
            status_dev: StatusDev::Open,
            notes_link: None,
        })
        .unwrap();

    let raw = std::fs::read_to_string(blob_path(dir.path()))
        .unwrap_or_else(|e| panic!("read blob: {e}"));
    assert!(raw.contains(r#""errorMessage":"E1""#), "migrated field: {raw}");
    assert!(!raw.contains("errorCode"), "legacy field gone: {raw}");
}

#[test]
fn malformed_blob_starts_empty_and_recovers_on_next_save() {
    let dir = tempdir().unwrap_or_else(|e| panic!("tempdir failed: {e}"));
    std::fs::write(blob_path(dir.path()), b"{definitely not json")
        .unwrap_or_else(|e| panic!("write blob: {e}"));

    let mut store = ErrorStore::with_defaults(Box::new(FileKvStore::new(dir.path())));
    assert!(store.records().is_empty());

    store
        .add_error(&NewErrorInput {
            error_message: "Err1".to_string(),
            interpretation: String::new(),
            status_dev: StatusDev::Open,
            notes_link: None,
        })
        .unwrap();

    let reopened = ErrorStore::with_defaults(Box::new(FileKvStore::new(dir.path())));
    assert_eq!(reopened.records().len(), 1);
    assert_eq!(reopened.records()[0].error_message, "Err1");
}
