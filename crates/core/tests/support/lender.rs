//! Scripted `LenderApi` mock
//!
//! Responses are consumed in order; every call is recorded with the target
//! instance that was in effect for it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blendfeed_core::{ApiResult, HttpMethod, LenderApi, LenderConnector};
use blendfeed_domain::{ApiError, ApiSettings, FeedError, Result as DomainResult, TargetInstance};

/// One call observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub route: String,
    pub body: String,
    /// `tenant~instance` header the call would have carried.
    pub target_header: String,
}

impl RecordedCall {
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("recorded body should be JSON")
    }
}

#[derive(Default)]
struct Script {
    responses: VecDeque<ApiResult<String>>,
    calls: Vec<RecordedCall>,
}

/// Connector handing out clients that share one script.
#[derive(Clone, Default)]
pub struct ScriptedConnector {
    script: Arc<Mutex<Script>>,
    fail_connect: bool,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response body.
    pub fn respond_ok(self, body: &str) -> Self {
        self.script.lock().unwrap().responses.push_back(Ok(body.to_string()));
        self
    }

    /// Queue a failure.
    pub fn respond_err(self, err: ApiError) -> Self {
        self.script.lock().unwrap().responses.push_back(Err(err));
        self
    }

    /// Make `connect` fail.
    pub fn failing() -> Self {
        Self { fail_connect: true, ..Self::default() }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script.lock().unwrap().calls.clone()
    }
}

impl LenderConnector for ScriptedConnector {
    fn connect(&self, settings: &ApiSettings) -> DomainResult<Box<dyn LenderApi>> {
        if self.fail_connect {
            return Err(FeedError::Config("missing credentials".to_string()));
        }
        let mut api = ScriptedApi {
            script: self.script.clone(),
            default: TargetInstance::new("", None),
            default_instance: String::new(),
            override_target: None,
        };
        api.configure(settings);
        Ok(Box::new(api))
    }
}

/// Client returned by [`ScriptedConnector`].
pub struct ScriptedApi {
    script: Arc<Mutex<Script>>,
    default: TargetInstance,
    default_instance: String,
    override_target: Option<TargetInstance>,
}

#[async_trait]
impl LenderApi for ScriptedApi {
    fn configure(&mut self, settings: &ApiSettings) {
        self.default = TargetInstance::new(settings.tenant_name.clone(), None);
        self.default_instance = settings.instance_id.clone();
    }

    fn set_target_instance(&mut self, value: &str) {
        if let Some(target) = TargetInstance::parse(value) {
            self.override_target = Some(target);
        }
    }

    async fn request(
        &self,
        method: HttpMethod,
        route: &str,
        body: String,
        target: Option<&TargetInstance>,
    ) -> ApiResult<String> {
        let effective = target.or(self.override_target.as_ref()).unwrap_or(&self.default);
        let mut script = self.script.lock().unwrap();
        script.calls.push(RecordedCall {
            method,
            route: route.to_string(),
            body,
            target_header: effective.header_value(&self.default_instance),
        });
        script
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport("no scripted response")))
    }
}
