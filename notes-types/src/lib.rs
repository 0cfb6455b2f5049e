//! Shared types for the notes backend and its HTTP clients.

use serde::{Deserialize, Serialize};

// =====================================================
// Domain Types
// =====================================================

/// A note as stored in the `notes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub note_id: i64,
    pub note_body: String,
    pub position_x: f64,
    pub position_y: f64,
}

/// Placement of a note on the 2D canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Note {
    pub fn position(&self) -> Position {
        Position {
            x: self.position_x,
            y: self.position_y,
        }
    }
}

// =====================================================
// Request Types
// =====================================================

/// POST /notes
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub note_body: String,
}

/// The `note` object inside a PUT /notes body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub note_id: i64,
    pub note_body: String,
    pub position: Position,
}

/// PUT /notes
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    pub note: NoteUpdate,
}

/// DELETE /notes (the id travels in the body, not the path)
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteNoteRequest {
    pub note_id: i64,
}

// =====================================================
// Response Types
// =====================================================

/// Body returned for any failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_uses_nested_position() {
        let raw = r#"{"note":{"note_id":1,"note_body":"moved","position":{"x":5,"y":10}}}"#;
        let req: UpdateNoteRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.note.note_id, 1);
        assert_eq!(req.note.note_body, "moved");
        assert_eq!(req.note.position, Position { x: 5.0, y: 10.0 });
    }

    #[test]
    fn test_note_serializes_flat_columns() {
        let note = Note {
            note_id: 3,
            note_body: "hello".to_string(),
            position_x: 1.5,
            position_y: -2.0,
        };
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["note_id"], 3);
        assert_eq!(value["position_x"], 1.5);
        assert_eq!(value["position_y"], -2.0);
        assert!(value.get("position").is_none());
        assert_eq!(note.position(), Position { x: 1.5, y: -2.0 });
    }

    #[test]
    fn test_delete_request_rejects_missing_id() {
        assert!(serde_json::from_str::<DeleteNoteRequest>("{}").is_err());
    }
}
