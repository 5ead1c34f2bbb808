//! Edit operation record.
//!
//! Reserved for a future collaborative editing log. Nothing in core produces
//! or consumes these yet; the shape is kept so persisted/exchanged payloads
//! have a stable schema once that work lands.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Insert,
    Delete,
    Retain,
}

/// One positional edit authored by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub position: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub user_id: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}
