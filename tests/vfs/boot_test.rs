/*!
 * Boot Policy Tests
 */

use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::TempDir;

use shell_os_kernel::persistence::{Document, LocalStore, MemoryStore, Store};
use shell_os_kernel::vfs::{boot, BootOutcome, VfsError};

#[test]
fn test_first_run_writes_default() {
    let store = MemoryStore::new();
    let booted = boot(Arc::new(store.clone())).unwrap();

    assert_eq!(booted.outcome, BootOutcome::FirstRun);
    assert!(!booted.vfs.is_installed());

    let written: Document = serde_json::from_slice(&store.contents().unwrap()).unwrap();
    assert_eq!(written, Document::default_install());

    let vfs = booted.vfs;
    let home = vfs.home().unwrap();
    let names: Vec<_> = vfs.list(home).unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["Desktop"]);
    assert_eq!(vfs.list(vfs.root()).unwrap().len(), 2);
}

#[test]
fn test_malformed_document_recovers_without_writing() {
    let store = MemoryStore::with_contents(b"{ not json".to_vec());
    let booted = boot(Arc::new(store.clone())).unwrap();

    assert!(matches!(
        booted.outcome,
        BootOutcome::Recovered(VfsError::StorageCorrupt(_))
    ));
    assert!(booted.outcome.notice().unwrap().starts_with("Unable to parse"));
    assert_eq!(store.contents_string().unwrap(), "{ not json");

    booted.vfs.flush().unwrap();
    let written: Document = serde_json::from_slice(&store.contents().unwrap()).unwrap();
    assert_eq!(written, Document::default_install());
}

#[test]
fn test_existing_document_loaded() {
    let json = r#"{
        "isInstalled": true,
        "username": "ada",
        "root": [
            {"name": "Home", "folders": [{"name": "Desktop"}], "files": [
                {"name": "todo", "type": "txt", "contents": ["one", "two"]}
            ]}
        ]
    }"#;
    let store = MemoryStore::with_contents(json);
    let booted = boot(Arc::new(store)).unwrap();

    assert_eq!(booted.outcome, BootOutcome::Loaded);
    assert_eq!(booted.outcome.notice(), None);
    assert!(booted.vfs.is_installed());
    assert_eq!(booted.vfs.username(), "ada");

    let home = booted.vfs.home().unwrap();
    let file = booted.vfs.tree().child_file(home, "todo.txt").unwrap();
    assert_eq!(booted.vfs.file_contents(file).unwrap(), "one\ntwo\n");
}

#[test]
fn test_local_store_first_run_then_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state").join("osinfo.json");

    let store: Arc<dyn Store> = Arc::new(LocalStore::new(&path));
    let mut vfs = boot(Arc::clone(&store)).unwrap().vfs;
    assert!(path.exists());

    vfs.complete_installation("grace");
    let home = vfs.home().unwrap();
    vfs.create_folder(home, "Music").unwrap();
    vfs.flush().unwrap();

    let booted = boot(Arc::new(LocalStore::new(&path))).unwrap();
    assert_eq!(booted.outcome, BootOutcome::Loaded);
    assert_eq!(booted.vfs.username(), "grace");
    let home = booted.vfs.home().unwrap();
    assert!(booted.vfs.tree().child_folder(home, "Music").is_some());

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"isInstalled\": true,\n  \"username\": \"grace\",\n  \"root\": ["));
}
