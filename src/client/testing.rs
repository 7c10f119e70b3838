use std::collections::VecDeque;
use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use url::Url;

use super::{Credentials, HttpResponse, HttpTransport, VoipMsClient};
use crate::domain::Params;

#[derive(Debug, Default)]
struct State {
    requests: Vec<Url>,
    responses: VecDeque<HttpResponse>,
}

/// Replays queued responses and records every URL it was asked for.
#[derive(Debug, Clone, Default)]
pub(super) struct FakeTransport {
    state: Arc<Mutex<State>>,
}

impl FakeTransport {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn respond(&self, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(HttpResponse {
                status,
                body: body.to_owned(),
            });
    }

    pub(super) fn respond_json(&self, body: Value) {
        self.respond(200, &body.to_string());
    }

    pub(super) fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub(super) fn last_url(&self) -> Option<Url> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    /// Query parameters of every recorded request, in order.
    pub(super) fn requests(&self) -> Vec<Params> {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .map(|url| url.query_pairs().collect())
            .collect()
    }

    pub(super) fn last_request(&self) -> Params {
        self.requests().pop().unwrap()
    }

    pub(super) fn methods(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|params| params.get("method").map(str::to_owned))
            .collect()
    }
}

impl HttpTransport for FakeTransport {
    fn get(&self, url: &Url) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(url.clone());
        state
            .responses
            .pop_front()
            .ok_or_else(|| "no response queued".into())
    }
}

pub(super) fn make_client(transport: &FakeTransport) -> VoipMsClient {
    VoipMsClient {
        credentials: Arc::new(Credentials::new("user@example.com", "apipass").unwrap()),
        endpoint: "https://example.invalid/api/v1/rest.php".to_owned(),
        http: Arc::new(transport.clone()),
    }
}
