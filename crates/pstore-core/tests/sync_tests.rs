//! Tests for the Synchronizer against the in-memory store

use pretty_assertions::assert_eq;
use pstore_core::{
    DeleteOptions, EncryptionDirective, ImportOptions, KeyAction, MemoryStore, StorageClass,
    Synchronizer,
};
use pstore_fs::{DeletionDocument, ImportDocument};
use pstore_test_utils::{bulk_names, seeded_store};
use std::collections::BTreeSet;

fn plain() -> ImportOptions {
    ImportOptions::default()
}

#[test]
fn test_import_into_empty_store_adds_everything() {
    let store = MemoryStore::new();
    let sync = Synchronizer::new(&store);
    let document = ImportDocument::from_entries([("/app/a", "1"), ("/app/b", "2")]);
    let mut actions = Vec::new();

    sync.import_with(&document, &plain(), |o| actions.push(o.action))
        .unwrap();

    assert_eq!(actions, vec![KeyAction::Added, KeyAction::Added]);
    assert_eq!(store.names(), vec!["/app/a", "/app/b"]);
}

#[test]
fn test_reimport_reports_no_update() {
    // Importing the same document twice must be idempotent for plain keys
    let store = MemoryStore::new();
    let sync = Synchronizer::new(&store);
    let document = ImportDocument::from_entries([("/app/a", "1"), ("/app/b", "2")]);

    sync.import(&document, &plain()).unwrap();
    let second = sync.import(&document, &plain()).unwrap();

    assert_eq!(second.unchanged, vec!["/app/a", "/app/b"]);
    assert_eq!(second.written(), 0);
    assert_eq!(store.calls().put, 2);
}

#[test]
fn test_changed_value_updates_and_exports() {
    let store = seeded_store(10, &[("/app/a", "1")]);
    let sync = Synchronizer::new(&store);

    let report = sync
        .import(&ImportDocument::from_entries([("/app/a", "3")]), &plain())
        .unwrap();
    assert_eq!(report.updated, vec!["/app/a"]);

    let exported = sync.export("/app").unwrap();
    assert_eq!(exported.get("/app/a").map(String::as_str), Some("3"));
}

#[test]
fn test_delete_removes_named_parameters() {
    let store = seeded_store(10, &[("/app/a", "1"), ("/app/b", "2"), ("/app/c", "3")]);
    let sync = Synchronizer::new(&store);

    let report = sync
        .delete(
            &DeletionDocument::from_names(["/app/a", "/app/b"]),
            &DeleteOptions::default(),
        )
        .unwrap();

    let expected: BTreeSet<String> = ["/app/a", "/app/b"].into_iter().map(String::from).collect();
    assert_eq!(report.deleted, expected);
    assert_eq!(store.names(), vec!["/app/c"]);
}

#[test]
fn test_export_round_trips_imported_document() {
    let store = MemoryStore::with_page_size(3);
    let sync = Synchronizer::new(&store);
    let names = bulk_names("/svc", 8);
    let document = ImportDocument::from_entries(
        names.iter().enumerate().map(|(i, n)| (n.clone(), format!("value-{}", i))),
    );

    sync.import(&document, &plain()).unwrap();
    let exported = sync.export("/svc").unwrap();

    let imported: Vec<(String, String)> = document
        .iter()
        .map(|(n, v)| match v {
            pstore_fs::ParameterValue::Text(t) => (n.to_string(), t.clone()),
            pstore_fs::ParameterValue::List(_) => unreachable!(),
        })
        .collect();
    let exported: Vec<(String, String)> = exported.into_iter().collect();
    assert_eq!(exported, imported);
}

#[test]
fn test_encrypted_reimport_always_writes() {
    let store = MemoryStore::new();
    let sync = Synchronizer::new(&store);
    let document = ImportDocument::from_entries([("/app/secret", "hunter2")]);
    let options = ImportOptions {
        encryption: EncryptionDirective::Key("alias/app".into()),
        dry_run: false,
    };

    let first = sync.import(&document, &options).unwrap();
    let second = sync.import(&document, &options).unwrap();

    assert_eq!(first.added, vec!["/app/secret"]);
    assert_eq!(second.updated, vec!["/app/secret"]);
    assert_eq!(store.version("/app/secret"), Some(2));
    assert_eq!(
        store.storage("/app/secret"),
        Some(StorageClass::EncryptedWithKey("alias/app".into()))
    );
}

#[test]
fn test_plain_import_over_encrypted_value_skips_when_equal() {
    // Comparison uses the decrypted value; without a key directive an equal
    // value is left alone even though its storage class differs
    let store = MemoryStore::new();
    store.insert("/app/secret", "hunter2", StorageClass::Encrypted);
    let sync = Synchronizer::new(&store);

    let report = sync
        .import(&ImportDocument::from_entries([("/app/secret", "hunter2")]), &plain())
        .unwrap();

    assert_eq!(report.unchanged, vec!["/app/secret"]);
    assert_eq!(store.storage("/app/secret"), Some(StorageClass::Encrypted));
}

#[test]
fn test_list_describes_metadata_without_values() {
    let store = seeded_store(2, &[("/a", "1"), ("/b", "2"), ("/c", "3")]);
    store.insert("/d", "secret", StorageClass::EncryptedWithKey("k".into()));
    let sync = Synchronizer::new(&store);

    let listed = sync.list().unwrap();

    let names: Vec<_> = listed.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["/a", "/b", "/c", "/d"]);
    assert_eq!(listed[3].key_id.as_deref(), Some("k"));
    assert_eq!(store.calls().describe_pages, 2);
}
