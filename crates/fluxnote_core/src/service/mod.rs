//! Intent layer: use-case orchestration over repository and state store.

pub mod note_service;
