mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use crate::models::{Note, OwnerId};

/// Persistent collection of notes keyed by owner.
///
/// Insert and delete are independent atomic operations. `list` must return an
/// owner's notes in insertion order, because users pick notes to delete by
/// their position in that list.
pub trait NoteStore: Send + Sync {
    /// Store a new note and return it with its assigned identity.
    fn insert(&self, owner_id: &OwnerId, text: &str) -> Result<Note>;

    /// All notes of `owner_id`, oldest first.
    fn list(&self, owner_id: &OwnerId) -> Result<Vec<Note>>;

    /// Remove a note by identity. `Ok(false)` means it was not found.
    fn delete(&self, id: Uuid) -> Result<bool>;
}

/// SQLite-backed [`NoteStore`].
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Location used when no path is configured.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "notebot")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("notebot.db"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }

    // ============================================================
    // Note operations
    // ============================================================

    pub fn create_note(&self, owner_id: &OwnerId, text: &str) -> Result<Note> {
        let conn = self.lock()?;
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO notes (id, owner_id, text, created_at) VALUES (?, ?, ?, ?)",
            (id.to_string(), owner_id.as_str(), text, now.to_rfc3339()),
        )?;

        Ok(Note {
            id,
            owner_id: owner_id.clone(),
            text: text.to_string(),
            created_at: now,
        })
    }

    pub fn get_notes_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Note>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, text, created_at
             FROM notes WHERE owner_id = ? ORDER BY seq",
        )?;

        let notes = stmt
            .query_map([owner_id.as_str()], |row| {
                Ok(Note {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    owner_id: OwnerId::new(row.get::<_, String>(1)?),
                    text: row.get(2)?,
                    created_at: parse_datetime(row.get::<_, String>(3)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    pub fn delete_note(&self, id: Uuid) -> Result<bool> {
        let conn = self.lock()?;
        let rows = conn.execute("DELETE FROM notes WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }
}

impl NoteStore for Database {
    fn insert(&self, owner_id: &OwnerId, text: &str) -> Result<Note> {
        self.create_note(owner_id, text)
    }

    fn list(&self, owner_id: &OwnerId) -> Result<Vec<Note>> {
        self.get_notes_by_owner(owner_id)
    }

    fn delete(&self, id: Uuid) -> Result<bool> {
        self.delete_note(id)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
