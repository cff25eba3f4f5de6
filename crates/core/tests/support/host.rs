//! Recording `FeedHost` mock

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blendfeed_core::FeedHost;
use blendfeed_domain::{EntryNote, Feed, NoteKind, Result as DomainResult};

/// Something the orchestrator reported to the host, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Note { entry_id: String, note: EntryNote },
    FeedError { feed_id: String, entry_id: String, message: String },
}

#[derive(Clone, Default)]
pub struct RecordingHost {
    events: Arc<Mutex<Vec<HostEvent>>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn notes_of(&self, kind: NoteKind) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Note { note, .. } if note.kind == kind => Some(note.message),
                _ => None,
            })
            .collect()
    }

    pub fn feed_errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::FeedError { message, .. } => Some(message),
                HostEvent::Note { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl FeedHost for RecordingHost {
    async fn add_note(&self, entry_id: &str, note: EntryNote) -> DomainResult<()> {
        self.events
            .lock()
            .unwrap()
            .push(HostEvent::Note { entry_id: entry_id.to_string(), note });
        Ok(())
    }

    async fn add_feed_error(&self, feed: &Feed, entry_id: &str, message: &str) -> DomainResult<()> {
        self.events.lock().unwrap().push(HostEvent::FeedError {
            feed_id: feed.id.clone(),
            entry_id: entry_id.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}
