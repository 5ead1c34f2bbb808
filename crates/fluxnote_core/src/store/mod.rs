//! Observable application state for notes.
//!
//! # Responsibility
//! - Hold the single in-memory `NotesState`.
//! - Route every change through `reducer::reduce` and notify observers.
//!
//! # Invariants
//! - State changes only via `dispatch`, which is crate-private; UI code
//!   reads snapshots and goes through intents.
//! - Observers run synchronously after each reduction, in subscription order.

pub mod action;
pub mod reducer;
pub mod state;

use action::{NotesAction, Phase};
use log::debug;
use state::NotesState;

/// Handle returned by [`NotesStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&NotesState) + Send>;

/// State container for the notes slice.
#[derive(Default)]
pub struct NotesStore {
    state: NotesState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl NotesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &NotesState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> NotesState {
        self.state.clone()
    }

    /// Registers an observer called after every reduction.
    pub fn subscribe(&mut self, listener: impl FnMut(&NotesState) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(current, _)| *current != id);
        self.listeners.len() != before
    }

    pub(crate) fn dispatch(&mut self, action: NotesAction) {
        debug!(
            "event=state_dispatch module=store action={} phase={} notes={}",
            action.type_name(),
            action.phase().map_or("sync", Phase::as_str),
            self.state.notes.len()
        );
        reducer::reduce(&mut self.state, action);
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }
}
