use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use blendfeed_core::FeedHost;
use blendfeed_domain::{EntryNote, Feed, NoteKind, Result};
use tracing::{info, warn};

/// What the orchestrator reported for an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRecord {
    Note { entry_id: String, note: EntryNote },
    FeedError { feed: String, entry_id: String, message: String },
}

impl fmt::Display for HostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note { entry_id, note } => {
                write!(f, "[{}] entry {entry_id}: {}", note.kind, note.message)
            }
            Self::FeedError { feed, entry_id, message } => {
                write!(f, "[feed error] {feed} / entry {entry_id}: {message}")
            }
        }
    }
}

/// `FeedHost` for the command line: logs every report and keeps it until
/// the caller drains it.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    records: Mutex<Vec<HostRecord>>,
}

impl ConsoleHost {
    /// Take every record reported so far.
    pub fn drain(&self) -> Vec<HostRecord> {
        std::mem::take(&mut *self.records())
    }

    fn push(&self, record: HostRecord) -> Result<()> {
        self.records().push(record);
        Ok(())
    }

    /// Records survive a panic in another holder; each push is a single
    /// append, so a poisoned list is still consistent.
    fn records(&self) -> MutexGuard<'_, Vec<HostRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl FeedHost for ConsoleHost {
    async fn add_note(&self, entry_id: &str, note: EntryNote) -> Result<()> {
        match note.kind {
            NoteKind::Success => info!(entry_id, message = %note.message, "Entry note"),
            NoteKind::Error => warn!(entry_id, message = %note.message, "Entry note"),
        }
        self.push(HostRecord::Note { entry_id: entry_id.to_string(), note })
    }

    async fn add_feed_error(&self, feed: &Feed, entry_id: &str, message: &str) -> Result<()> {
        warn!(feed = %feed.name, entry_id, message, "Feed processing error");
        self.push(HostRecord::FeedError {
            feed: feed.name.clone(),
            entry_id: entry_id.to_string(),
            message: message.to_string(),
        })
    }
}
