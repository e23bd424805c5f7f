//! Append-only game log.
//!
//! Every state transition the engine makes writes one `LogEntry`. Entries
//! are also mirrored to `tracing` and broadcast as `GameEvent::Log`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One line of the game log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the log, starting at 0.
    pub sequence: u64,
    pub turn: u32,
    pub timestamp: DateTime<Utc>,
    /// Short human-readable name, e.g. "Familiar summoned".
    pub event: String,
    pub data: Value,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.timestamp.to_rfc3339(), self.event, self.data)
    }
}

/// The log of one game.
#[derive(Clone, Debug, Default)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return a reference to it.
    pub fn append(&mut self, turn: u32, event: impl Into<String>, data: Value) -> &LogEntry {
        let entry = LogEntry {
            sequence: self.entries.len() as u64,
            turn,
            timestamp: Utc::now(),
            event: event.into(),
            data,
        };
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with a given event name.
    pub fn find<'a>(&'a self, event: &'a str) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries.iter().filter(move |e| e.event == event)
    }
}
