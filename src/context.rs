//! Process-wide application context.
//!
//! Built once at startup and handed to whatever needs the store or the
//! conversation state. Tests build a fresh one each for isolation.

use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::conversation::ConversationTracker;
use crate::db::{Database, NoteStore};
use crate::dispatcher::Dispatcher;
use crate::service::NoteService;

#[derive(Clone)]
pub struct AppContext {
    config: Config,
    store: Arc<dyn NoteStore>,
    conversations: ConversationTracker,
}

impl AppContext {
    pub fn new(config: Config, store: Arc<dyn NoteStore>) -> Self {
        Self {
            config,
            store,
            conversations: ConversationTracker::new(),
        }
    }

    /// Open and migrate the configured database.
    pub fn open(config: Config) -> Result<Self> {
        let db = match &config.database_path {
            Some(path) => Database::open(path.clone())?,
            None => Database::open_default()?,
        };
        db.migrate()?;
        Ok(Self::new(config, Arc::new(db)))
    }

    /// Context over a fresh in-memory database.
    pub fn in_memory(config: Config) -> Result<Self> {
        let db = Database::open_memory()?;
        db.migrate()?;
        Ok(Self::new(config, Arc::new(db)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn NoteStore> {
        &self.store
    }

    pub fn conversations(&self) -> &ConversationTracker {
        &self.conversations
    }

    pub fn note_service(&self) -> NoteService {
        NoteService::new(self.store.clone(), self.config.max_note_length)
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self)
    }
}
