use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::OwnerId;

/// A stored text note.
///
/// Notes have no edit operation. They are created by a successful add and
/// destroyed only by a delete that references their `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identity, stable for the note's lifetime.
    pub id: Uuid,
    pub owner_id: OwnerId,
    /// Trimmed note content.
    pub text: String,
    pub created_at: DateTime<Utc>,
}
