//! Notes table operations
//!
//! Every method returns rows the way the table hands them back
//! (`RETURNING` shape), so create/update/delete all yield a vector.

use notes_types::{Note, Position};
use rusqlite::{params, Row};

use crate::db::Database;
use crate::error::StorageError;

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        note_id: row.get(0)?,
        note_body: row.get(1)?,
        position_x: row.get(2)?,
        position_y: row.get(3)?,
    })
}

impl Database {
    /// All notes, in storage order
    pub fn list_notes(&self) -> Result<Vec<Note>, StorageError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT note_id, note_body, position_x, position_y FROM notes")?;
        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    /// Insert a note at the default position and return the created row
    pub fn create_note(&self, note_body: &str) -> Result<Vec<Note>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "INSERT INTO notes (note_body)
             VALUES (?1)
             RETURNING note_id, note_body, position_x, position_y",
        )?;
        let notes = stmt
            .query_map(params![note_body], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    /// Overwrite body and position. Empty when no row has `note_id`.
    pub fn update_note(
        &self,
        note_id: i64,
        note_body: &str,
        position: Position,
    ) -> Result<Vec<Note>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "UPDATE notes
             SET note_body = ?1,
                 position_x = ?2,
                 position_y = ?3
             WHERE note_id = ?4
             RETURNING note_id, note_body, position_x, position_y",
        )?;
        let notes = stmt
            .query_map(params![note_body, position.x, position.y, note_id], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    /// Remove a note. Succeeds with no rows whether or not it existed.
    pub fn delete_note(&self, note_id: i64) -> Result<Vec<Note>, StorageError> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM notes WHERE note_id = ?1", params![note_id])?;
        log::debug!("[NOTES] delete {} removed {} row(s)", note_id, removed);
        Ok(Vec::new())
    }
}
