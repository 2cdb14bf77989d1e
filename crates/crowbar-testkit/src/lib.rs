//! Test utilities for exercising crowbar endpoints without an admin node.
//!
//! [`MockSession`] implements [`Session`] in memory: it records every request
//! it receives and answers from a table of canned responses keyed by method
//! and path. [`Fake`] builds deterministic attribute records.

pub mod fake;

pub use fake::Fake;

use async_trait::async_trait;
use crowbar_api::{ApiRequest, ApiResponse, HttpMethod, Session, SessionError};
use serde_json::Value;
use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, MutexGuard, PoisonError},
};

///
/// MockSession
///
/// Unmatched requests get a 404 with no body. Responses queued for the same
/// method + path are served in order; the last one is repeated.
///

#[derive(Debug, Default)]
pub struct MockSession {
    routes: Mutex<HashMap<(HttpMethod, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

#[derive(Clone, Debug)]
enum Reply {
    Response(ApiResponse),
    Fail(String),
}

impl MockSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method path`.
    pub fn respond(&self, method: HttpMethod, path: &str, response: ApiResponse) -> &Self {
        self.push(method, path, Reply::Response(response));
        self
    }

    /// Queue a 200 JSON response for `method path`.
    pub fn respond_json(&self, method: HttpMethod, path: &str, body: Value) -> &Self {
        self.respond(method, path, ApiResponse::ok(body))
    }

    /// Queue a transport failure for `method path`.
    pub fn fail(&self, method: HttpMethod, path: &str, message: &str) -> &Self {
        self.push(method, path, Reply::Fail(message.to_string()));
        self
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    #[must_use]
    pub fn last_request(&self) -> Option<ApiRequest> {
        lock(&self.requests).last().cloned()
    }

    fn push(&self, method: HttpMethod, path: &str, reply: Reply) {
        lock(&self.routes)
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    fn next_reply(&self, method: HttpMethod, path: &str) -> Option<Reply> {
        let mut routes = lock(&self.routes);
        let queue = routes.get_mut(&(method, path.to_string()))?;

        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Session for MockSession {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, SessionError> {
        let reply = self.next_reply(request.method, &request.path);
        lock(&self.requests).push(request);

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(SessionError::Transport(message)),
            None => Ok(ApiResponse::new(404, None)),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

///
/// TESTS
///
