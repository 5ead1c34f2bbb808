use crate::model::note::{Note, NoteId, NoteUpdate};

/// Phase of an intent's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Fulfilled,
    Rejected,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fulfilled => "fulfilled",
            Self::Rejected => "rejected",
        }
    }
}

/// Everything the reducer understands.
///
/// Mutation intents carry their rejection reason so observers see the same
/// lifecycle as for `load`, even though the reducer leaves state alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesAction {
    LoadPending,
    LoadFulfilled(Vec<Note>),
    LoadRejected(Option<String>),
    CreateFulfilled(Note),
    CreateRejected(String),
    UpdateFulfilled(NoteUpdate),
    UpdateRejected { id: NoteId, message: String },
    DeleteFulfilled(NoteId),
    DeleteRejected { id: NoteId, message: String },
    ClearError,
}

impl NotesAction {
    /// Stable action type name, `notes/<intent>/<phase>`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::LoadPending => "notes/loadNotes/pending",
            Self::LoadFulfilled(_) => "notes/loadNotes/fulfilled",
            Self::LoadRejected(_) => "notes/loadNotes/rejected",
            Self::CreateFulfilled(_) => "notes/createNote/fulfilled",
            Self::CreateRejected(_) => "notes/createNote/rejected",
            Self::UpdateFulfilled(_) => "notes/updateNote/fulfilled",
            Self::UpdateRejected { .. } => "notes/updateNote/rejected",
            Self::DeleteFulfilled(_) => "notes/deleteNote/fulfilled",
            Self::DeleteRejected { .. } => "notes/deleteNote/rejected",
            Self::ClearError => "notes/clearError",
        }
    }

    /// Lifecycle phase, `None` for synchronous actions.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::LoadPending => Some(Phase::Pending),
            Self::LoadFulfilled(_)
            | Self::CreateFulfilled(_)
            | Self::UpdateFulfilled(_)
            | Self::DeleteFulfilled(_) => Some(Phase::Fulfilled),
            Self::LoadRejected(_)
            | Self::CreateRejected(_)
            | Self::UpdateRejected { .. }
            | Self::DeleteRejected { .. } => Some(Phase::Rejected),
            Self::ClearError => None,
        }
    }
}
