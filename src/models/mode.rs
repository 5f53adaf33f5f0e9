use serde::{Deserialize, Serialize};

/// The conversation step an owner is currently in.
///
/// - `Idle`: No multi-step command is pending
/// - `AwaitingNoteText`: `/add` was sent; the next message is the note body
/// - `AwaitingDeleteChoice`: `/delete` listed the notes; the next message is a 1-based index
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Idle,
    AwaitingNoteText,
    AwaitingDeleteChoice,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingNoteText => "awaiting_note_text",
            Self::AwaitingDeleteChoice => "awaiting_delete_choice",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
