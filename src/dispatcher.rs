//! Routes inbound messages to note operations.
//!
//! Routing is decided by the owner's current [`Mode`] first. While a submit
//! step is pending, the whole message is that step's input, even if it looks
//! like a command. Only an idle owner's messages are checked for commands,
//! and anything that is not a known command gets no reply.

use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::conversation::ConversationTracker;
use crate::models::{Command, Mode, OwnerId, Reply};
use crate::service::NoteService;

/// A text message delivered by a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub owner_id: OwnerId,
    pub text: String,
}

impl InboundMessage {
    pub fn new(owner_id: impl Into<OwnerId>, text: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            text: text.into(),
        }
    }

    pub fn command(&self) -> Option<Command> {
        Command::parse(&self.text)
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    service: NoteService,
    conversations: ConversationTracker,
}

impl Dispatcher {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            service: ctx.note_service(),
            conversations: ctx.conversations().clone(),
        }
    }

    /// Handle one message to completion. `None` means the message is ignored.
    pub async fn dispatch(&self, message: &InboundMessage) -> Option<Reply> {
        let mut turn = self.conversations.begin_turn(&message.owner_id).await;

        match turn.mode() {
            Mode::AwaitingNoteText => {
                Some(self.service.add_note_submit(&mut turn, &message.text))
            }
            Mode::AwaitingDeleteChoice => {
                Some(self.service.delete_note_submit(&mut turn, &message.text))
            }
            Mode::Idle => {
                let command = message.command()?;
                tracing::debug!(
                    owner = %message.owner_id,
                    command = command.as_str(),
                    "Command received"
                );

                let reply = match command {
                    Command::Start | Command::Help => self.service.welcome(),
                    Command::Add => self.service.add_note_begin(&mut turn),
                    Command::Notes => self.service.list_notes(&mut turn),
                    Command::Delete => self.service.delete_note_begin(&mut turn),
                };
                Some(reply)
            }
        }
    }
}
