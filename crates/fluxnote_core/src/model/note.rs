//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record shared by storage and state.
//! - Define the partial-update shape used by update intents.
//!
//! # Invariants
//! - `id` is generated once at creation and never changes.
//! - `created_at` is set once; `updated_at` moves on every mutation.
//! - `collaborators` keeps insertion order.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Owner id stamped on every note until real accounts exist.
pub const PLACEHOLDER_USER_ID: &str = "temp-user";

/// Opaque note identifier.
///
/// New ids are UUID v4 text, but stored ids are treated as plain strings so
/// rows written by other clients stay addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a fresh unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Display title. Non-blank by intent-level validation only.
    pub title: String,
    pub content: String,
    /// Optional syntax tag for code notes.
    pub language: Option<String>,
    /// ISO-8601 UTC timestamp, millisecond precision.
    pub created_at: String,
    /// ISO-8601 UTC timestamp, millisecond precision.
    pub updated_at: String,
    pub user_id: String,
    pub collaborators: Vec<String>,
}

impl Note {
    /// Builds a brand-new note owned by the placeholder user.
    ///
    /// # Invariants
    /// - `created_at == updated_at == now`.
    /// - `collaborators` starts empty and `language` unset.
    pub fn new(title: impl Into<String>, content: impl Into<String>, now: impl Into<String>) -> Self {
        let now = now.into();
        Self {
            id: NoteId::generate(),
            title: title.into(),
            content: content.into(),
            language: None,
            created_at: now.clone(),
            updated_at: now,
            user_id: PLACEHOLDER_USER_ID.to_string(),
            collaborators: Vec::new(),
        }
    }

    /// Shallow-merges supplied patch fields and moves `updated_at`.
    pub fn apply_patch(&mut self, patch: &NotePatch, updated_at: &str) {
        if let Some(title) = patch.title.as_ref() {
            self.title = title.clone();
        }
        if let Some(content) = patch.content.as_ref() {
            self.content = content.clone();
        }
        if let Some(language) = patch.language.as_ref() {
            self.language = Some(language.clone());
        }
        if let Some(collaborators) = patch.collaborators.as_ref() {
            self.collaborators = collaborators.clone();
        }
        self.updated_at = updated_at.to_string();
    }
}

/// Input for the create intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<Vec<String>>,
}

impl NotePatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn content(value: impl Into<String>) -> Self {
        Self {
            content: Some(value.into()),
            ..Self::default()
        }
    }

    /// Returns whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.language.is_none()
            && self.collaborators.is_none()
    }
}

/// Payload of a fulfilled update: exactly what was persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdate {
    pub id: NoteId,
    pub updates: NotePatch,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::{Note, NotePatch, PLACEHOLDER_USER_ID};

    #[test]
    fn new_note_uses_single_timestamp_and_placeholder_owner() {
        let note = Note::new("T", "", "2024-01-01T00:00:00.000Z");
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(note.user_id, PLACEHOLDER_USER_ID);
        assert!(note.collaborators.is_empty());
        assert!(!note.id.as_str().is_empty());
    }

    #[test]
    fn apply_patch_only_touches_supplied_fields() {
        let mut note = Note::new("T", "body", "2024-01-01T00:00:00.000Z");
        note.language = Some("rust".to_string());
        note.apply_patch(&NotePatch::title("T2"), "2024-01-01T00:00:01.000Z");

        assert_eq!(note.title, "T2");
        assert_eq!(note.content, "body");
        assert_eq!(note.language.as_deref(), Some("rust"));
        assert_eq!(note.updated_at, "2024-01-01T00:00:01.000Z");
        assert_eq!(note.created_at, "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn note_serializes_with_camel_case_fields() {
        let note = Note::new("T", "", "2024-01-01T00:00:00.000Z");
        let value = serde_json::to_value(&note).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("userId").is_some());
        assert_eq!(value["collaborators"], serde_json::json!([]));
    }
}
