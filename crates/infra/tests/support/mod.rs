//! Shared helpers for `blendfeed-infra` integration tests.
//!
//! Each test binary uses a different subset of these.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use blendfeed_core::FeedHost;
use blendfeed_domain::{ApiEnvironment, ApiSettings, EntryNote, Feed, HttpSettings, Result};
use blendfeed_infra::BlendClient;
use wiremock::{MockServer, Request};

pub const USERNAME: &str = "api-user";
pub const PASSWORD: &str = "api-pass";
/// `Basic base64("api-user:api-pass")`
pub const AUTHORIZATION: &str = "Basic YXBpLXVzZXI6YXBpLXBhc3M=";

/// Settings pointing at `server`, global target `global~blue`.
pub fn settings_for(server: &MockServer) -> ApiSettings {
    ApiSettings {
        tenant_name: "global".to_string(),
        instance_id: "blue".to_string(),
        username: USERNAME.to_string(),
        password: PASSWORD.to_string(),
        environment: ApiEnvironment::from(format!("{}/", server.uri())),
    }
}

pub fn client_for(server: &MockServer) -> BlendClient {
    BlendClient::from_settings(&settings_for(server), &HttpSettings { timeout_seconds: 5 })
        .expect("blend client")
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|value| value.to_str().ok())
}

pub fn json_body(request: &Request) -> serde_json::Value {
    serde_json::from_slice(&request.body).expect("request body should be JSON")
}

/// Host event in the order it was reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Note { entry_id: String, note: EntryNote },
    FeedError { feed: String, entry_id: String, message: String },
}

#[derive(Default)]
pub struct RecordingHost {
    events: Mutex<Vec<HostEvent>>,
}

impl RecordingHost {
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().expect("host mutex poisoned").clone()
    }
}

#[async_trait]
impl FeedHost for RecordingHost {
    async fn add_note(&self, entry_id: &str, note: EntryNote) -> Result<()> {
        self.events
            .lock()
            .expect("host mutex poisoned")
            .push(HostEvent::Note { entry_id: entry_id.to_string(), note });
        Ok(())
    }

    async fn add_feed_error(&self, feed: &Feed, entry_id: &str, message: &str) -> Result<()> {
        self.events.lock().expect("host mutex poisoned").push(HostEvent::FeedError {
            feed: feed.name.clone(),
            entry_id: entry_id.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}
