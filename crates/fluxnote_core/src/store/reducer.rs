//! Pure state transitions for the notes slice.

use super::action::NotesAction;
use super::state::NotesState;

pub const LOAD_FAILED_FALLBACK: &str = "Failed to load notes";

/// Applies one action to the state in place.
pub fn reduce(state: &mut NotesState, action: NotesAction) {
    match action {
        NotesAction::LoadPending => {
            state.loading = true;
            state.error = None;
        }
        NotesAction::LoadFulfilled(notes) => {
            state.loading = false;
            state.notes = notes;
        }
        NotesAction::LoadRejected(message) => {
            state.loading = false;
            state.error = Some(
                message
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| LOAD_FAILED_FALLBACK.to_string()),
            );
        }
        NotesAction::CreateFulfilled(note) => {
            if !state.contains(&note.id) {
                state.notes.insert(0, note);
            }
        }
        NotesAction::UpdateFulfilled(update) => {
            if let Some(note) = state.notes.iter_mut().find(|n| n.id == update.id) {
                note.apply_patch(&update.updates, &update.updated_at);
            }
        }
        NotesAction::DeleteFulfilled(id) => {
            state.notes.retain(|note| note.id != id);
        }
        NotesAction::ClearError => {
            state.error = None;
        }
        // Mutation failures are returned to the caller as typed errors.
        NotesAction::CreateRejected(_)
        | NotesAction::UpdateRejected { .. }
        | NotesAction::DeleteRejected { .. } => {}
    }
}
