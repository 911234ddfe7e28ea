use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A posted note ("tweet" in the API naming).
///
/// Append-only: once created a note is never mutated or deleted. `id` is
/// assigned by the store and grows with insertion order, so descending id
/// is newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Input for posting a note.
///
/// Both fields default to empty so that an absent field is reported by the
/// validation layer as "required" instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteInput {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub text: String,
}
