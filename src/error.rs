//! Error types for note operations.
//!
//! A [`ValidationError`] is the user's fault and its `Display` text is what
//! gets sent back. A storage failure is ours: it is logged and replaced by a
//! generic message before it reaches the user.

use thiserror::Error;

/// Rejected input. The message is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The note is empty. Please send some text.")]
    EmptyNote,

    #[error("The note is too long. Please limit it to {max} characters.")]
    TooLong { max: usize },

    #[error("Please send a valid number.")]
    InvalidNumber,

    #[error("Invalid choice. Please try again.")]
    InvalidChoice,
}

/// Failure of a note operation.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage fault: {0:#}")]
    Storage(anyhow::Error),
}

impl NoteError {
    pub fn storage(e: impl Into<anyhow::Error>) -> Self {
        Self::Storage(e.into())
    }
}

pub type NoteResult<T> = std::result::Result<T, NoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_long_message_names_the_limit() {
        let e = ValidationError::TooLong { max: 1000 };
        assert_eq!(
            e.to_string(),
            "The note is too long. Please limit it to 1000 characters."
        );
    }

    #[test]
    fn validation_converts_into_note_error() {
        let e: NoteError = ValidationError::EmptyNote.into();
        assert!(matches!(e, NoteError::Validation(ValidationError::EmptyNote)));
        assert_eq!(e.to_string(), "The note is empty. Please send some text.");
    }
}
