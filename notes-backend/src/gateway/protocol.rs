use serde::{Deserialize, Serialize};

/// Topic published after every successful read of the full note list
pub const NOTES_CHANGED: &str = "notes changed";

/// A server-pushed event frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub event: String,
    pub data: serde_json::Value,
    pub timestamp: String,
}

impl GatewayEvent {
    pub fn new(event: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            kind: "event".to_string(),
            event: event.into(),
            data,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// "notes changed" carrying the full note list
    pub fn notes_changed(notes: &[notes_types::Note]) -> Result<Self, serde_json::Error> {
        Ok(Self::new(NOTES_CHANGED, serde_json::to_value(notes)?))
    }
}
