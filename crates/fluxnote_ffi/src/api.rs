//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the notes state snapshot and intents to Dart via FRB.
//! - Own the one process-wide notes session behind `notes_init`.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every intent returns an envelope with `ok` + human-readable `message`.
//! - Intents called before `notes_init` fail with a not-initialized message.

use fluxnote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CoreConfig, NewNote, Note, NoteId, NotePatch, NoteService, NotesState, SqliteNoteRepository,
    SystemClock,
};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

const NOT_INITIALIZED: &str = "notes store not initialized; call notes_init first";

static NOTES_SESSION: OnceLock<NotesSession> = OnceLock::new();

struct NotesSession {
    db_path: PathBuf,
    service: Mutex<NoteService<SqliteNoteRepository>>,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Note as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiNote {
    pub id: String,
    pub title: String,
    pub content: String,
    pub language: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub user_id: String,
    pub collaborators: Vec<String>,
}

/// Read-only copy of `{notes, loading, error}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesSnapshot {
    pub notes: Vec<FfiNote>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Result envelope for every notes intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesActionResponse {
    /// Whether the intent reached its fulfilled phase.
    pub ok: bool,
    /// Note the intent acted on, when known.
    pub note_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// State after the intent ran; `None` before `notes_init`.
    pub snapshot: Option<NotesSnapshot>,
}

impl NotesActionResponse {
    fn success(message: impl Into<String>, note_id: Option<String>, state: &NotesState) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
            snapshot: Some(to_snapshot(state)),
        }
    }

    fn failure(message: impl Into<String>, state: Option<&NotesState>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
            snapshot: state.map(to_snapshot),
        }
    }
}

/// Opens the notes database and loads nothing yet.
///
/// Input semantics:
/// - `db_path`: SQLite file path; blank falls back to `FLUXNOTE_DB_PATH`
///   and then to the temp directory.
///
/// # FFI contract
/// - Idempotent for the same resolved path.
/// - A second call with another path is rejected.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_init(db_path: String) -> String {
    let mut config = CoreConfig::from_env();
    let trimmed = db_path.trim();
    if !trimmed.is_empty() {
        config.db_path = PathBuf::from(trimmed);
    }

    if let Some(session) = NOTES_SESSION.get() {
        return same_path_or_error(session, &config.db_path);
    }

    let repo = match SqliteNoteRepository::open(&config.db_path, SystemClock::shared()) {
        Ok(repo) => repo,
        Err(err) => return format!("notes_init failed: {err}"),
    };
    let session = NotesSession {
        db_path: config.db_path.clone(),
        service: Mutex::new(NoteService::new(repo)),
    };
    // Losing a concurrent init race drops our connection; the winner's path
    // decides the outcome below.
    if NOTES_SESSION.set(session).is_ok() {
        info!(
            "event=notes_init module=ffi status=ok db_path={}",
            config.db_path.display()
        );
    }
    match NOTES_SESSION.get() {
        Some(active) => same_path_or_error(active, &config.db_path),
        None => NOT_INITIALIZED.to_string(),
    }
}

/// Returns the current state without running any intent.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_snapshot() -> NotesActionResponse {
    match lock_service() {
        Ok(service) => NotesActionResponse::success("Snapshot.", None, service.state()),
        Err(message) => NotesActionResponse::failure(message, None),
    }
}

/// Runs the load intent.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_load() -> NotesActionResponse {
    run_intent(|service| {
        service
            .load()
            .map(|notes| (format!("Loaded {} note(s).", notes.len()), None))
    })
}

/// Runs the create intent with trimmed-title validation.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_create(title: String, content: String) -> NotesActionResponse {
    run_intent(|service| {
        service
            .create(NewNote { title, content })
            .map(|note| ("Note created.".to_string(), Some(note.id.to_string())))
    })
}

/// Runs the update intent. `None` arguments leave the field untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_update(
    id: String,
    title: Option<String>,
    content: Option<String>,
    language: Option<String>,
    collaborators: Option<Vec<String>>,
) -> NotesActionResponse {
    let patch = NotePatch {
        title,
        content,
        language,
        collaborators,
    };
    run_intent(|service| {
        service
            .update(NoteId::from(id), patch)
            .map(|update| ("Note updated.".to_string(), Some(update.id.to_string())))
    })
}

/// Runs the delete intent. Unknown ids succeed.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(id: String) -> NotesActionResponse {
    run_intent(|service| {
        service
            .delete(NoteId::from(id))
            .map(|id| ("Note deleted.".to_string(), Some(id.to_string())))
    })
}

/// Clears the error slot shown by the UI.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_clear_error() -> NotesActionResponse {
    run_intent(|service| {
        service.clear_error();
        Ok(("Error cleared.".to_string(), None))
    })
}

fn run_intent(
    f: impl FnOnce(
        &mut NoteService<SqliteNoteRepository>,
    ) -> fluxnote_core::IntentResult<(String, Option<String>)>,
) -> NotesActionResponse {
    let mut service = match lock_service() {
        Ok(service) => service,
        Err(message) => return NotesActionResponse::failure(message, None),
    };
    match f(&mut service) {
        Ok((message, note_id)) => NotesActionResponse::success(message, note_id, service.state()),
        Err(err) => NotesActionResponse::failure(err.to_string(), Some(service.state())),
    }
}

fn lock_service() -> Result<MutexGuard<'static, NoteService<SqliteNoteRepository>>, String> {
    let session = NOTES_SESSION.get().ok_or(NOT_INITIALIZED)?;
    // Reducer updates are never half-applied, so a poisoned lock is usable.
    Ok(session
        .service
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner()))
}

fn same_path_or_error(session: &NotesSession, requested: &Path) -> String {
    if session.db_path == *requested {
        String::new()
    } else {
        format!(
            "notes already initialized at `{}`; refusing to switch to `{}`",
            session.db_path.display(),
            requested.display()
        )
    }
}

fn to_snapshot(state: &NotesState) -> NotesSnapshot {
    NotesSnapshot {
        notes: state.notes.iter().map(to_ffi_note).collect(),
        loading: state.loading,
        error: state.error.clone(),
    }
}

fn to_ffi_note(note: &Note) -> FfiNote {
    FfiNote {
        id: note.id.to_string(),
        title: note.title.clone(),
        content: note.content.clone(),
        language: note.language.clone(),
        created_at: note.created_at.clone(),
        updated_at: note.updated_at.clone(),
        user_id: note.user_id.clone(),
        collaborators: note.collaborators.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{core_version, init_logging, ping};

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
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(!error.is_empty());
    }
}
