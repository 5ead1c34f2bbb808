//! Core domain logic for FluxNote.
//! This crate owns note persistence and the in-memory notes state.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use clock::{Clock, SharedClock, SteppingClock, SystemClock};
pub use config::CoreConfig;
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogDestination,
    LoggingError,
};
pub use model::note::{NewNote, Note, NoteId, NotePatch, NoteUpdate, PLACEHOLDER_USER_ID};
pub use model::operation::{Operation, OperationKind};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::{RepoError, RepoResult};
pub use service::note_service::{IntentError, IntentResult, NoteService};
pub use store::state::NotesState;
pub use store::SubscriptionId;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Opens the notes database at `config.db_path` and wires a service around
/// it with a fresh system clock.
pub fn open_notes(config: &CoreConfig) -> RepoResult<NoteService<SqliteNoteRepository>> {
    let repo = SqliteNoteRepository::open(&config.db_path, SystemClock::shared())?;
    Ok(NoteService::new(repo))
}
