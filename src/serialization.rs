use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::graph_state::{
    NewThought, Position, ThoughtId, ThoughtKind, ThoughtNode,
};

// ------------------------------------------------------------------
// Wire structures for the /api/thoughts collection
// ------------------------------------------------------------------

// Fallbacks mirror the document store's schema defaults.
fn default_kind() -> SerializableKind {
    SerializableKind::Note
}

fn default_coordinate() -> f32 {
    100.0
}

fn default_color() -> String {
    String::from("#f0f0f0")
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializableKind {
    Task,
    Note,
    File,
}

impl From<ThoughtKind> for SerializableKind {
    fn from(kind: ThoughtKind) -> Self {
        match kind {
            ThoughtKind::Task => SerializableKind::Task,
            ThoughtKind::Note => SerializableKind::Note,
            ThoughtKind::File => SerializableKind::File,
        }
    }
}

impl From<SerializableKind> for ThoughtKind {
    fn from(kind: SerializableKind) -> Self {
        match kind {
            SerializableKind::Task => ThoughtKind::Task,
            SerializableKind::Note => ThoughtKind::Note,
            SerializableKind::File => ThoughtKind::File,
        }
    }
}

/// A stored thought as returned by the service.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializableThought {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: SerializableKind,
    #[serde(default = "default_coordinate")]
    pub x: f32,
    #[serde(default = "default_coordinate")]
    pub y: f32,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub connections: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a thought: everything but the id.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializableNewThought {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: SerializableKind,
    pub x: f32,
    pub y: f32,
    pub color: String,
    pub connections: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update body carrying only the coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SerializablePositionPatch {
    pub x: f32,
    pub y: f32,
}

// ------------------------------------------------------------------
// Conversion functions
// ------------------------------------------------------------------

impl From<SerializableThought> for ThoughtNode {
    fn from(record: SerializableThought) -> Self {
        ThoughtNode {
            id: ThoughtId::new(record.id),
            title: record.title,
            content: record.content,
            kind: record.kind.into(),
            position: Position::new(record.x, record.y),
            color: record.color,
            connections: record
                .connections
                .into_iter()
                .map(ThoughtId::new)
                .collect(),
            created_at: record.created_at,
        }
    }
}

impl From<&NewThought> for SerializableNewThought {
    fn from(draft: &NewThought) -> Self {
        SerializableNewThought {
            title: draft.title.clone(),
            content: draft.content.clone(),
            kind: draft.kind.into(),
            x: draft.position.x,
            y: draft.position.y,
            color: draft.color.clone(),
            connections: draft
                .connections
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
            created_at: draft.created_at,
        }
    }
}

impl From<Position> for SerializablePositionPatch {
    fn from(position: Position) -> Self {
        SerializablePositionPatch {
            x: position.x,
            y: position.y,
        }
    }
}

pub fn decode_thoughts(
    bytes: &[u8],
) -> Result<Vec<ThoughtNode>, serde_json::Error> {
    let records: Vec<SerializableThought> =
        serde_json::from_slice(bytes)?;
    Ok(records.into_iter().map(ThoughtNode::from).collect())
}

/// Decode a single record. The service answers `null` when an update
/// targets an id it does not know.
pub fn decode_thought(
    bytes: &[u8],
) -> Result<Option<ThoughtNode>, serde_json::Error> {
    let record: Option<SerializableThought> =
        serde_json::from_slice(bytes)?;
    Ok(record.map(ThoughtNode::from))
}
