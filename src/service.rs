//! Note operations driven by user intents.
//!
//! Each operation runs inside a [`Turn`] and always produces a [`Reply`].
//! Failures are matched here: validation errors become their own message,
//! storage faults are logged and replaced by a generic message.
//!
//! The two submit steps end differently on failure. A rejected note keeps
//! the owner in `AwaitingNoteText` so they can resend it, while a delete
//! choice always returns the owner to `Idle`, whatever happened.

use std::num::IntErrorKind;
use std::sync::Arc;

use uuid::Uuid;

use crate::conversation::Turn;
use crate::db::NoteStore;
use crate::error::{NoteError, NoteResult, ValidationError};
use crate::models::{Mode, Note, OwnerId, Reply};

pub const WELCOME: &str = "Hi! I'm your note bot. You can add, view, and delete notes.";
pub const ADD_PROMPT: &str = "Please send me the note text.";
pub const NOTE_ADDED: &str = "Note added successfully!";
pub const NO_NOTES: &str = "You have no notes.";
pub const LIST_HEADER: &str = "Your notes:\n";
pub const DELETE_HEADER: &str = "Select a note to delete. Send the number of the note:\n";
pub const NOTE_DELETED: &str = "Note deleted successfully.";
pub const DELETE_FAILED: &str = "An error occurred while deleting your note.";
pub const REQUEST_FAILED: &str = "An error occurred while processing your request.";

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
    max_note_length: usize,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>, max_note_length: usize) -> Self {
        Self {
            store,
            max_note_length,
        }
    }

    pub fn welcome(&self) -> Reply {
        Reply::with_keyboard(WELCOME)
    }

    // ============================================================
    // Add
    // ============================================================

    pub fn add_note_begin(&self, turn: &mut Turn) -> Reply {
        turn.set(Mode::AwaitingNoteText);
        Reply::text(ADD_PROMPT)
    }

    pub fn add_note_submit(&self, turn: &mut Turn, raw_text: &str) -> Reply {
        match self.add_note(turn.owner_id(), raw_text) {
            Ok(note) => {
                tracing::info!(owner = %turn.owner_id(), note_id = %note.id, "Note added");
                turn.clear();
                Reply::with_keyboard(NOTE_ADDED)
            }
            Err(NoteError::Validation(e)) => {
                tracing::debug!(owner = %turn.owner_id(), "Note rejected: {:?}", e);
                Reply::text(e.to_string())
            }
            Err(NoteError::Storage(e)) => {
                tracing::error!(owner = %turn.owner_id(), "Error adding note: {:#}", e);
                turn.clear();
                Reply::text(REQUEST_FAILED)
            }
        }
    }

    fn add_note(&self, owner_id: &OwnerId, raw_text: &str) -> NoteResult<Note> {
        let text = validate_note(raw_text, self.max_note_length)?;
        self.store.insert(owner_id, text).map_err(NoteError::storage)
    }

    // ============================================================
    // List
    // ============================================================

    pub fn list_notes(&self, turn: &mut Turn) -> Reply {
        match self.store.list(turn.owner_id()) {
            Ok(notes) if notes.is_empty() => Reply::text(NO_NOTES),
            Ok(notes) => Reply::with_keyboard(numbered(LIST_HEADER, &notes)),
            Err(e) => {
                tracing::error!(owner = %turn.owner_id(), "Error listing notes: {:#}", e);
                turn.clear();
                Reply::text(REQUEST_FAILED)
            }
        }
    }

    // ============================================================
    // Delete
    // ============================================================

    pub fn delete_note_begin(&self, turn: &mut Turn) -> Reply {
        match self.store.list(turn.owner_id()) {
            Ok(notes) if notes.is_empty() => Reply::text(NO_NOTES),
            Ok(notes) => {
                turn.set(Mode::AwaitingDeleteChoice);
                Reply::with_keyboard(numbered(DELETE_HEADER, &notes))
            }
            Err(e) => {
                tracing::error!(owner = %turn.owner_id(), "Error listing notes: {:#}", e);
                turn.clear();
                Reply::text(REQUEST_FAILED)
            }
        }
    }

    pub fn delete_note_submit(&self, turn: &mut Turn, raw_choice: &str) -> Reply {
        let outcome = self.delete_chosen_note(turn.owner_id(), raw_choice);
        turn.clear();

        match outcome {
            Ok(id) => {
                tracing::info!(owner = %turn.owner_id(), note_id = %id, "Note deleted");
                Reply::with_keyboard(NOTE_DELETED)
            }
            Err(NoteError::Validation(e)) => {
                tracing::debug!(owner = %turn.owner_id(), "Delete choice rejected: {:?}", e);
                Reply::text(e.to_string())
            }
            Err(NoteError::Storage(e)) => {
                tracing::error!(owner = %turn.owner_id(), "Error deleting note: {:#}", e);
                Reply::text(DELETE_FAILED)
            }
        }
    }

    fn delete_chosen_note(&self, owner_id: &OwnerId, raw_choice: &str) -> NoteResult<Uuid> {
        let choice = parse_choice(raw_choice)?;
        let notes = self.store.list(owner_id).map_err(NoteError::storage)?;

        let note = choice
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| notes.get(index))
            .ok_or(ValidationError::InvalidChoice)?;

        // Delete by identity: the position only selected it.
        if !self.store.delete(note.id).map_err(NoteError::storage)? {
            tracing::warn!(owner = %owner_id, note_id = %note.id, "Note was already gone");
        }
        Ok(note.id)
    }
}

/// Trim a submitted note and check it against the length limit.
///
/// Length is counted in characters, not bytes.
pub fn validate_note(raw_text: &str, max_len: usize) -> Result<&str, ValidationError> {
    let text = raw_text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyNote);
    }
    if text.chars().count() > max_len {
        return Err(ValidationError::TooLong { max: max_len });
    }
    Ok(text)
}

/// Parse a 1-based note number. Range is checked against the live note list.
///
/// A well-formed integer too large for `i64` can never be in range, so it is
/// an invalid choice rather than an invalid number.
pub fn parse_choice(raw_choice: &str) -> Result<i64, ValidationError> {
    raw_choice.trim().parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ValidationError::InvalidChoice,
        _ => ValidationError::InvalidNumber,
    })
}

fn numbered(header: &str, notes: &[Note]) -> String {
    let mut reply = header.to_string();
    for (idx, note) in notes.iter().enumerate() {
        reply.push_str(&format!("{}: {}\n", idx + 1, note.text));
    }
    reply
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_trims_whitespace() {
        assert_eq!(validate_note("  buy milk \n", 1000), Ok("buy milk"));
    }

    #[test]
    fn validate_rejects_blank_text() {
        assert_eq!(validate_note("", 1000), Err(ValidationError::EmptyNote));
        assert_eq!(validate_note(" \t\n ", 1000), Err(ValidationError::EmptyNote));
    }

    #[test]
    fn validate_limit_is_inclusive() {
        let exact = "a".repeat(1000);
        let over = "a".repeat(1001);
        assert!(validate_note(&exact, 1000).is_ok());
        assert_eq!(
            validate_note(&over, 1000),
            Err(ValidationError::TooLong { max: 1000 })
        );
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        let text = "é".repeat(1000);
        assert!(text.len() > 1000);
        assert!(validate_note(&text, 1000).is_ok());
    }

    #[test]
    fn parse_choice_accepts_padded_numbers() {
        assert_eq!(parse_choice(" 2 "), Ok(2));
        assert_eq!(parse_choice("-1"), Ok(-1));
    }

    #[test]
    fn parse_choice_rejects_non_numbers() {
        assert_eq!(parse_choice("abc"), Err(ValidationError::InvalidNumber));
        assert_eq!(parse_choice("1.5"), Err(ValidationError::InvalidNumber));
        assert_eq!(parse_choice(""), Err(ValidationError::InvalidNumber));
    }

    #[test]
    fn parse_choice_treats_overflow_as_out_of_range() {
        assert_eq!(
            parse_choice("99999999999999999999"),
            Err(ValidationError::InvalidChoice)
        );
        assert_eq!(
            parse_choice("-99999999999999999999"),
            Err(ValidationError::InvalidChoice)
        );
    }
}
