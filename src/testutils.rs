//! Test utilities for `swagger_petstore`.
//!
//! Helpers for unit and integration tests that need to exercise the SDK without
//! a network: an in-memory [`HttpClient`] that records what it was asked to send
//! and replays queued responses, and a fixed [`BaseUri`] resolver for pointing
//! the auth manager at an arbitrary authorization server. External test crates
//! reach them through `use swagger_petstore::testutils::*`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{
    config::{BaseUri, ClientConfig, Server},
    error::{Error, Result},
    http::{HttpClient, HttpRequest, HttpResponse},
    PetstoreClient,
};

/// An [`HttpClient`] that never touches the network.
///
/// Every executed request is recorded. Responses are served from a queue in
/// FIFO order; once the queue is empty a `200` with an empty body is returned.
#[derive(Debug, Default)]
pub struct MockHttpClient {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to be returned by the next unanswered request.
    pub fn push_response(&self, response: HttpResponse) {
        self.lock_responses().push_back(Ok(response));
    }

    /// Queue a JSON response with the given status.
    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        let mut response = HttpResponse::new(status, body.to_string());
        response
            .headers
            .insert("content-type".to_string(), "application/json".to_string());
        self.push_response(response);
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: Error) {
        self.lock_responses().push_back(Err(error));
    }

    /// All requests executed so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// The most recently executed request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests().pop()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<HttpResponse>>> {
        match self.responses.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        match self.requests.lock() {
            Ok(mut requests) => requests.push(request),
            Err(poisoned) => poisoned.into_inner().push(request),
        }
        self.lock_responses()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "")))
    }
}

/// A [`BaseUri`] resolver that returns the same URI for every server.
#[derive(Debug, Clone)]
pub struct StaticBaseUri {
    uri: String,
}

impl StaticBaseUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

impl BaseUri for StaticBaseUri {
    fn base_uri(&self, _server: Server) -> Result<String> {
        Ok(self.uri.clone())
    }
}

/// Build a client that sends everything to `http_client`.
pub fn client_with_mock(
    config: ClientConfig,
    http_client: Arc<MockHttpClient>,
) -> Result<PetstoreClient> {
    PetstoreClient::new(config.with_http_client(http_client))
}

/// Initialize a tracing subscriber for tests.
/// It is safe to call this multiple times.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}
