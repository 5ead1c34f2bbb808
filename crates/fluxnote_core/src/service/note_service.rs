//! Note intents: load/create/update/delete driven through the state store.
//!
//! # Responsibility
//! - Run each intent's lifecycle: pending, side effect, fulfilled/rejected.
//! - Validate user input before it reaches storage.
//! - Hand every caller a typed result, success or failure-with-reason.
//!
//! # Invariants
//! - Store state only changes through dispatched `NotesAction`s.
//! - The update payload merged into state is exactly what was persisted.
//! - Note content never appears in log lines.

use crate::clock::SharedClock;
use crate::model::note::{NewNote, Note, NoteId, NotePatch, NoteUpdate};
use crate::repo::note_repo::NoteRepository;
use crate::repo::RepoError;
use crate::store::action::NotesAction;
use crate::store::state::NotesState;
use crate::store::{NotesStore, SubscriptionId};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type IntentResult<T> = Result<T, IntentError>;

/// Failure reason returned by an intent.
#[derive(Debug)]
pub enum IntentError {
    /// Input rejected before touching storage.
    Validation(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for IntentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "invalid note input: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IntentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for IntentError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Intent dispatcher owning the repository handle and the state store.
pub struct NoteService<R: NoteRepository> {
    repo: R,
    store: NotesStore,
    clock: SharedClock,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service with an empty state.
    ///
    /// New notes are stamped with the repository's own clock.
    pub fn new(repo: R) -> Self {
        let clock = repo.clock();
        Self {
            repo,
            store: NotesStore::new(),
            clock,
        }
    }

    /// Current state snapshot reference.
    pub fn state(&self) -> &NotesState {
        self.store.state()
    }

    /// Owned state snapshot.
    pub fn snapshot(&self) -> NotesState {
        self.store.snapshot()
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&NotesState) + Send + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Read access to the repository for lookups outside the state slice.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Replaces the in-memory list with storage contents.
    ///
    /// Failures are recorded in `state.error` and also returned.
    pub fn load(&mut self) -> IntentResult<Vec<Note>> {
        let started_at = Instant::now();
        self.store.dispatch(NotesAction::LoadPending);

        match self.repo.list_notes() {
            Ok(notes) => {
                info!(
                    "event=notes_load module=service status=ok count={} duration_ms={}",
                    notes.len(),
                    started_at.elapsed().as_millis()
                );
                self.store.dispatch(NotesAction::LoadFulfilled(notes.clone()));
                Ok(notes)
            }
            Err(err) => {
                error!(
                    "event=notes_load module=service status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                self.store
                    .dispatch(NotesAction::LoadRejected(Some(err.to_string())));
                Err(err.into())
            }
        }
    }

    /// Creates and persists a new note, then prepends it to the list.
    pub fn create(&mut self, input: NewNote) -> IntentResult<Note> {
        validate_title(&input.title)?;
        let note = Note::new(input.title, input.content, self.clock.now_iso());

        match self.repo.insert_note(&note) {
            Ok(()) => {
                info!(
                    "event=note_create module=service status=ok note_id={}",
                    note.id
                );
                self.store.dispatch(NotesAction::CreateFulfilled(note.clone()));
                Ok(note)
            }
            Err(err) => {
                error!(
                    "event=note_create module=service status=error note_id={} error={}",
                    note.id, err
                );
                self.store
                    .dispatch(NotesAction::CreateRejected(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Applies a partial update to storage and merges it into state.
    ///
    /// An unknown `id` is not an error: storage and state are left as-is and
    /// the stamped payload is still returned.
    pub fn update(&mut self, id: NoteId, patch: NotePatch) -> IntentResult<NoteUpdate> {
        if let Some(title) = patch.title.as_deref() {
            validate_title(title)?;
        }

        match self.repo.update_note(&id, &patch) {
            Ok(updated_at) => {
                info!(
                    "event=note_update module=service status=ok note_id={} fields={}",
                    id,
                    patch_field_names(&patch)
                );
                let update = NoteUpdate {
                    id,
                    updates: patch,
                    updated_at,
                };
                self.store
                    .dispatch(NotesAction::UpdateFulfilled(update.clone()));
                Ok(update)
            }
            Err(err) => {
                error!(
                    "event=note_update module=service status=error note_id={} error={}",
                    id, err
                );
                self.store.dispatch(NotesAction::UpdateRejected {
                    id,
                    message: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// Deletes a note from storage and from the list. Absent ids are a no-op.
    pub fn delete(&mut self, id: NoteId) -> IntentResult<NoteId> {
        match self.repo.delete_note(&id) {
            Ok(()) => {
                info!("event=note_delete module=service status=ok note_id={id}");
                self.store.dispatch(NotesAction::DeleteFulfilled(id.clone()));
                Ok(id)
            }
            Err(err) => {
                error!(
                    "event=note_delete module=service status=error note_id={} error={}",
                    id, err
                );
                self.store.dispatch(NotesAction::DeleteRejected {
                    id,
                    message: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// Clears the error slot.
    pub fn clear_error(&mut self) {
        self.store.dispatch(NotesAction::ClearError);
    }

    /// Wipes storage. The in-memory list is left until the next `load`.
    pub fn clear_storage(&mut self) -> IntentResult<usize> {
        let removed = self.repo.clear_all()?;
        warn!("event=notes_clear module=service status=ok removed={removed}");
        Ok(removed)
    }
}

/// Rejects empty or whitespace-only titles.
pub fn validate_title(title: &str) -> IntentResult<()> {
    if title.trim().is_empty() {
        return Err(IntentError::Validation(
            "title must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn patch_field_names(patch: &NotePatch) -> String {
    if patch.is_empty() {
        return "none".to_string();
    }
    let mut names = Vec::new();
    if patch.title.is_some() {
        names.push("title");
    }
    if patch.content.is_some() {
        names.push("content");
    }
    if patch.language.is_some() {
        names.push("language");
    }
    if patch.collaborators.is_some() {
        names.push("collaborators");
    }
    names.join(",")
}

#[cfg(test)]
mod tests {
    use super::{patch_field_names, validate_title, IntentError};
    use crate::model::note::NotePatch;

    #[test]
    fn blank_titles_are_rejected() {
        assert!(matches!(validate_title(""), Err(IntentError::Validation(_))));
        assert!(matches!(
            validate_title(" \t\n"),
            Err(IntentError::Validation(_))
        ));
        assert!(validate_title("Groceries").is_ok());
    }

    #[test]
    fn patch_field_names_lists_only_supplied_fields() {
        assert_eq!(patch_field_names(&NotePatch::default()), "none");
        let patch = NotePatch {
            title: Some("a".to_string()),
            collaborators: Some(vec![]),
            ..NotePatch::default()
        };
        assert_eq!(patch_field_names(&patch), "title,collaborators");
    }
}
