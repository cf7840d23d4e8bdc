//! In-memory score board keyed by connection, kept in insertion order.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use crate::dto::ws::{PlayerScore, ScoreSubmission};

/// Opaque identifier the server assigns to every WebSocket connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Generate a fresh, unique identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConnectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Latest submission received from one connection.
pub struct ScoreRecord {
    /// Connection owning the record.
    pub connection_id: ConnectionId,
    /// Player name as submitted.
    pub name: String,
    /// Score as submitted.
    pub score: String,
}

impl From<&ScoreRecord> for PlayerScore {
    fn from(record: &ScoreRecord) -> Self {
        Self {
            id: record.connection_id.to_string(),
            name: record.name.clone(),
            score: record.score.clone(),
        }
    }
}

/// Ordered collection of score records, at most one per connection.
#[derive(Debug, Default)]
pub struct ScoreBoard {
    records: IndexMap<ConnectionId, ScoreRecord>,
}

impl ScoreBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `submission` for `id`, replacing a previous record in place or
    /// appending a new one at the end.
    pub fn upsert(&mut self, id: &ConnectionId, submission: ScoreSubmission) {
        let record = ScoreRecord {
            connection_id: id.clone(),
            name: submission.name,
            score: submission.score,
        };
        // `insert` keeps the existing slot for a known key.
        self.records.insert(id.clone(), record);
    }

    /// Remove the record owned by `id`, preserving the order of the others.
    pub fn remove(&mut self, id: &ConnectionId) -> Option<ScoreRecord> {
        self.records.shift_remove(id)
    }

    /// Look up the record owned by `id`.
    pub fn get(&self, id: &ConnectionId) -> Option<&ScoreRecord> {
        self.records.get(id)
    }

    /// Number of records, one per connection that submitted.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no connection has submitted yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Wire representation of the whole board, in insertion order.
    pub fn snapshot(&self) -> Vec<PlayerScore> {
        self.records.values().map(PlayerScore::from).collect()
    }
}
