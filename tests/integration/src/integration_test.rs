//! End-to-end integration tests for the document-to-store flow
//!
//! These tests exercise the complete path: document on disk -> load ->
//! synchronizer -> in-memory store -> export rendered back to disk.

use pretty_assertions::assert_eq;
use pstore_core::{
    DeleteOptions, EncryptionDirective, ImportOptions, KeyAction, MemoryStore, StorageClass,
    Synchronizer,
};
use pstore_fs::{DeletionDocument, ImportDocument, ParameterValue, io, render_export};
use pstore_test_utils::{TestDocuments, bulk_names, seeded_store};
use serde_json::json;

#[test]
fn test_import_then_export_round_trip_through_files() {
    let docs = TestDocuments::new();
    let source = docs.write_json(
        "import.json",
        &json!({
            "/app/db/host": "db.internal",
            "/app/db/port": "5432",
            "/app/hosts": ["web1", "web2"],
        }),
    );
    let store = MemoryStore::with_page_size(2);
    let sync = Synchronizer::new(&store);

    let report = sync
        .import(&ImportDocument::load(&source).unwrap(), &ImportOptions::default())
        .unwrap();
    assert_eq!(report.added.len(), 3);

    let exported = sync.export("/app").unwrap();
    let target = docs.path("exports/app.json");
    io::write_text(&target, &render_export(&exported).unwrap()).unwrap();

    let reloaded = ImportDocument::load(&target).unwrap();
    let entries: Vec<(&str, &ParameterValue)> = reloaded.iter().collect();
    assert_eq!(
        entries,
        vec![
            ("/app/db/host", &ParameterValue::from("db.internal")),
            ("/app/db/port", &ParameterValue::from("5432")),
            ("/app/hosts", &ParameterValue::from("web1,web2")),
        ]
    );
    docs.assert_file_contains("exports/app.json", "    \"/app/db/host\": \"db.internal\"");
}

#[test]
fn test_reimporting_an_export_changes_nothing() {
    let docs = TestDocuments::new();
    let store = seeded_store(3, &[("/svc/a", "1"), ("/svc/b", "2"), ("/svc/c", "3")]);
    let sync = Synchronizer::new(&store);

    let exported = render_export(&sync.export("/svc").unwrap()).unwrap();
    let path = docs.write_raw("svc.json", &exported);
    let report = sync
        .import(&ImportDocument::load(&path).unwrap(), &ImportOptions::default())
        .unwrap();

    assert_eq!(report.unchanged, vec!["/svc/a", "/svc/b", "/svc/c"]);
    assert_eq!(store.calls().put, 0);
}

#[test]
fn test_yaml_import_with_default_key() {
    let docs = TestDocuments::new();
    let path = docs.write_raw(
        "secrets.yaml",
        "/app/password: hunter2\n/app/token: abc123\n",
    );
    let store = MemoryStore::new();
    let sync = Synchronizer::new(&store);
    let options = ImportOptions {
        encryption: EncryptionDirective::from_flag(Some("default")).unwrap(),
        dry_run: false,
    };
    let mut actions = Vec::new();

    sync.import_with(&ImportDocument::load(&path).unwrap(), &options, |outcome| {
        actions.push((outcome.name.clone(), outcome.action))
    })
    .unwrap();

    assert_eq!(
        actions,
        vec![
            ("/app/password".to_string(), KeyAction::Added),
            ("/app/token".to_string(), KeyAction::Added),
        ]
    );
    assert_eq!(store.storage("/app/password"), Some(StorageClass::Encrypted));
    assert_eq!(store.storage("/app/token"), Some(StorageClass::Encrypted));
}

#[test]
fn test_delete_document_from_toml() {
    let docs = TestDocuments::new();
    let path = docs.write_raw("gone.toml", "\"/app/a\" = \"\"\n\"/app/b\" = 0\n");
    let store = seeded_store(10, &[("/app/a", "1"), ("/app/b", "2"), ("/app/keep", "3")]);
    let sync = Synchronizer::new(&store);

    let report = sync
        .delete(&DeletionDocument::load(&path).unwrap(), &DeleteOptions::default())
        .unwrap();

    assert_eq!(report.deleted.iter().collect::<Vec<_>>(), vec!["/app/a", "/app/b"]);
    assert_eq!(store.names(), vec!["/app/keep"]);
}

#[test]
fn test_bulk_delete_of_an_export() {
    let docs = TestDocuments::new();
    let names = bulk_names("/bulk", 23);
    let seeded: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "v")).collect();
    let store = seeded_store(4, &seeded);
    let sync = Synchronizer::new(&store);

    let exported = render_export(&sync.export("/bulk").unwrap()).unwrap();
    let path = docs.write_raw("bulk.json", &exported);
    let report = sync
        .delete(&DeletionDocument::load(&path).unwrap(), &DeleteOptions::default())
        .unwrap();

    assert_eq!(store.calls().delete_batches, vec![10, 10, 3]);
    assert_eq!(report.deleted.len(), 23);
    assert!(store.is_empty());
}

#[test]
fn test_dry_run_leaves_store_untouched() {
    let docs = TestDocuments::new();
    let import = docs.write_json("import.json", &json!({"/app/a": "2", "/app/new": "x"}));
    let delete = docs.write_json("delete.json", &json!({"/app/a": null}));
    let store = seeded_store(10, &[("/app/a", "1")]);
    let sync = Synchronizer::new(&store);

    let imported = sync
        .import(
            &ImportDocument::load(&import).unwrap(),
            &ImportOptions {
                dry_run: true,
                ..ImportOptions::default()
            },
        )
        .unwrap();
    let deleted = sync
        .delete(
            &DeletionDocument::load(&delete).unwrap(),
            &DeleteOptions { dry_run: true },
        )
        .unwrap();

    assert_eq!(imported.written(), 2);
    assert_eq!(deleted.batches, 1);
    assert_eq!(store.names(), vec!["/app/a"]);
    assert_eq!(store.value("/app/a").as_deref(), Some("1"));
}
