//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over the `notes` table.
//! - Translate snake_case rows into `Note` values and back.
//!
//! # Invariants
//! - `list_notes` is ordered by `updated_at DESC, id ASC`.
//! - `update_note` always stamps `updated_at` from the repository clock,
//!   whatever the patch carries, and the stamp is strictly later than the
//!   row's previous value.
//! - Opening a store advances the clock past every stored `updated_at`.
//! - `collaborators` is stored as JSON array text; NULL/empty reads as `[]`.

use crate::clock::{parse_iso_millis, SharedClock};
use crate::db::{open_db, open_db_in_memory};
use crate::model::note::{Note, NoteId, NotePatch};
use crate::repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    language,
    created_at,
    updated_at,
    user_id,
    collaborators
FROM notes";

const REQUIRED_COLUMNS: [&str; 8] = [
    "id",
    "title",
    "content",
    "language",
    "created_at",
    "updated_at",
    "user_id",
    "collaborators",
];

/// Repository interface for note persistence.
pub trait NoteRepository {
    /// Returns every note, most recently updated first.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Persists a fully-formed note. Duplicate ids fail at the storage layer.
    fn insert_note(&self, note: &Note) -> RepoResult<()>;
    /// Applies supplied patch fields and refreshes `updated_at`.
    ///
    /// Returns the `updated_at` value written. Zero matched rows is not an
    /// error.
    fn update_note(&self, id: &NoteId, patch: &NotePatch) -> RepoResult<String>;
    /// Removes one note; absent ids are a no-op.
    fn delete_note(&self, id: &NoteId) -> RepoResult<()>;
    /// Gets one note by id.
    fn get_note_by_id(&self, id: &NoteId) -> RepoResult<Option<Note>>;
    /// Removes every note and returns how many rows went away.
    fn clear_all(&self) -> RepoResult<usize>;
    /// Clock that stamps this repository's rows.
    fn clock(&self) -> SharedClock;
}

/// SQLite-backed note repository owning its connection.
///
/// Holding a value of this type means the schema is migrated and verified;
/// dropping it closes the connection.
pub struct SqliteNoteRepository {
    conn: Connection,
    clock: SharedClock,
}

impl std::fmt::Debug for SqliteNoteRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteNoteRepository").finish_non_exhaustive()
    }
}

impl SqliteNoteRepository {
    /// Opens the database file at `path`, migrating it if needed.
    pub fn open(path: impl AsRef<Path>, clock: SharedClock) -> RepoResult<Self> {
        let conn = open_db(path)?;
        Self::try_new(conn, clock)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory(clock: SharedClock) -> RepoResult<Self> {
        let conn = open_db_in_memory()?;
        Self::try_new(conn, clock)
    }

    /// Wraps an already-migrated connection after checking the notes schema.
    pub fn try_new(conn: Connection, clock: SharedClock) -> RepoResult<Self> {
        ensure_notes_table_ready(&conn)?;
        let latest: Option<String> =
            conn.query_row("SELECT MAX(updated_at) FROM notes;", [], |row| row.get(0))?;
        if let Some(millis) = latest.as_deref().and_then(parse_iso_millis) {
            clock.observe(millis);
        }
        Ok(Self { conn, clock })
    }

    /// Borrow of the underlying connection, for diagnostics.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl NoteRepository for SqliteNoteRepository {
    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY updated_at DESC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn insert_note(&self, note: &Note) -> RepoResult<()> {
        let collaborators = encode_collaborators(&note.collaborators)?;
        self.conn.execute(
            "INSERT INTO notes (
                id,
                title,
                content,
                language,
                created_at,
                updated_at,
                user_id,
                collaborators
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                note.id.as_str(),
                note.title.as_str(),
                note.content.as_str(),
                note.language.as_deref(),
                note.created_at.as_str(),
                note.updated_at.as_str(),
                note.user_id.as_str(),
                collaborators,
            ],
        )?;
        Ok(())
    }

    fn update_note(&self, id: &NoteId, patch: &NotePatch) -> RepoResult<String> {
        let mut assignments: Vec<&'static str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = patch.title.as_ref() {
            assignments.push("title = ?");
            bind_values.push(Value::Text(title.clone()));
        }
        if let Some(content) = patch.content.as_ref() {
            assignments.push("content = ?");
            bind_values.push(Value::Text(content.clone()));
        }
        if let Some(language) = patch.language.as_ref() {
            assignments.push("language = ?");
            bind_values.push(Value::Text(language.clone()));
        }
        if let Some(collaborators) = patch.collaborators.as_ref() {
            assignments.push("collaborators = ?");
            bind_values.push(Value::Text(encode_collaborators(collaborators)?));
        }

        let previous: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM notes WHERE id = ?1;",
                [id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(millis) = previous.as_deref().and_then(parse_iso_millis) {
            self.clock.observe(millis);
        }
        let updated_at = self.clock.now_iso();
        assignments.push("updated_at = ?");
        bind_values.push(Value::Text(updated_at.clone()));
        bind_values.push(Value::Text(id.as_str().to_string()));

        let sql = format!("UPDATE notes SET {} WHERE id = ?;", assignments.join(", "));
        self.conn.execute(&sql, params_from_iter(bind_values))?;
        Ok(updated_at)
    }

    fn delete_note(&self, id: &NoteId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.as_str()])?;
        Ok(())
    }

    fn get_note_by_id(&self, id: &NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.as_str()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_note_row(row)?)),
            None => Ok(None),
        }
    }

    fn clear_all(&self) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM notes;", [])?;
        Ok(removed)
    }

    fn clock(&self) -> SharedClock {
        self.clock.clone()
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id: String = row.get("id")?;
    let collaborators_text: Option<String> = row.get("collaborators")?;
    let collaborators = decode_collaborators(&id, collaborators_text.as_deref())?;

    Ok(Note {
        title: row.get("title")?,
        content: row.get("content")?,
        language: row.get("language")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        user_id: row.get("user_id")?,
        collaborators,
        id: NoteId::from(id),
    })
}

fn encode_collaborators(collaborators: &[String]) -> RepoResult<String> {
    serde_json::to_string(collaborators).map_err(RepoError::Encode)
}

/// Decodes the stored collaborators column.
///
/// NULL and blank text read as an empty list. Anything else must be a JSON
/// array of strings.
pub fn decode_collaborators(note_id: &str, raw: Option<&str>) -> RepoResult<Vec<String>> {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(Vec::new());
    };
    serde_json::from_str::<Vec<String>>(text).map_err(|err| RepoError::CorruptColumn {
        note_id: note_id.to_string(),
        column: "collaborators",
        message: err.to_string(),
    })
}

fn ensure_notes_table_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "notes")? {
        return Err(RepoError::MissingRequiredTable("notes"));
    }
    let present = table_columns(conn, "notes")?;
    for column in REQUIRED_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}
