use fluxnote_ffi::api::{
    notes_clear_error, notes_create, notes_delete, notes_init, notes_load, notes_snapshot,
    notes_update,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

fn setup() {
    let path = DB_PATH.get_or_init(|| {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "fluxnote-ffi-{}-{nanos}.db",
            std::process::id()
        ))
    });
    let error = notes_init(path.to_string_lossy().into_owned());
    assert!(error.is_empty(), "{error}");
}

#[test]
fn init_is_idempotent_and_rejects_other_paths() {
    setup();
    setup();
    let other = std::env::temp_dir().join("fluxnote-ffi-other.db");
    let error = notes_init(other.to_string_lossy().into_owned());
    assert!(error.contains("refusing to switch"));
}

#[test]
fn create_update_delete_flow_is_reflected_in_snapshots() {
    setup();
    let created = notes_create("Groceries".to_string(), String::new());
    assert!(created.ok, "{}", created.message);
    let id = created.note_id.clone().expect("create returns note id");
    let snapshot = created.snapshot.expect("snapshot after create");
    assert_eq!(snapshot.notes[0].id, id);
    assert_eq!(snapshot.notes[0].title, "Groceries");
    assert!(snapshot.notes[0].collaborators.is_empty());

    let updated = notes_update(
        id.clone(),
        None,
        Some("milk, eggs".to_string()),
        None,
        Some(vec!["a".to_string(), "b".to_string()]),
    );
    assert!(updated.ok, "{}", updated.message);
    let snapshot = updated.snapshot.expect("snapshot after update");
    let note = snapshot
        .notes
        .iter()
        .find(|note| note.id == id)
        .expect("updated note present");
    assert_eq!(note.title, "Groceries");
    assert_eq!(note.content, "milk, eggs");
    assert_eq!(note.collaborators, vec!["a".to_string(), "b".to_string()]);

    let deleted = notes_delete(id.clone());
    assert!(deleted.ok, "{}", deleted.message);

    let loaded = notes_load();
    assert!(loaded.ok, "{}", loaded.message);
    let snapshot = loaded.snapshot.expect("snapshot after load");
    assert!(!snapshot.loading);
    assert!(snapshot.notes.iter().all(|note| note.id != id));
}

#[test]
fn blank_title_is_rejected_with_message() {
    setup();
    let response = notes_create("   ".to_string(), "body".to_string());
    assert!(!response.ok);
    assert!(response.message.contains("title"));
    assert!(response.snapshot.is_some());
}

#[test]
fn delete_of_unknown_id_succeeds() {
    setup();
    let response = notes_delete("does-not-exist".to_string());
    assert!(response.ok, "{}", response.message);
}

#[test]
fn snapshot_and_clear_error_succeed_after_init() {
    setup();
    assert!(notes_snapshot().ok);
    let cleared = notes_clear_error();
    assert!(cleared.ok);
    assert_eq!(cleared.snapshot.and_then(|s| s.error), None);
}
