use crate::model::note::{Note, NoteId};
use serde::Serialize;

/// Snapshot of the notes slice rendered by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotesState {
    /// Presentation order. Equals storage order right after a load; creates
    /// prepend and updates merge in place without re-sorting.
    pub notes: Vec<Note>,
    pub loading: bool,
    pub error: Option<String>,
}

impl NotesState {
    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.find(id).is_some()
    }
}
