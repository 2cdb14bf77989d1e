//! Transport seam.
//!
//! A [`Session`] is an authenticated handle to one admin node. The crate
//! never opens connections itself: callers plug in whatever HTTP client and
//! digest-auth handling they use, and every endpoint forwards its requests
//! through the session it was built with.

use async_trait::async_trait;
use derive_more::Display;
use serde_json::Value;
use thiserror::Error as ThisError;

///
/// SessionError
///
/// Failures reported by a session implementation. Endpoints pass these
/// through unchanged.
///

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

///
/// HttpMethod
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum HttpMethod {
    #[display("GET")]
    Get,
    #[display("POST")]
    Post,
    #[display("PUT")]
    Put,
    #[display("DELETE")]
    Delete,
}

///
/// ApiRequest
///

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Absolute URL for this request against `base_url`.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

///
/// ApiResponse
///

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    #[must_use]
    pub const fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub const fn ok(body: Value) -> Self {
        Self::new(200, Some(body))
    }

    #[must_use]
    pub const fn no_content() -> Self {
        Self::new(204, None)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

///
/// Session
///

#[async_trait]
pub trait Session: Send + Sync {
    ///
    /// Perform one request against the admin node.
    /// - `request.path` is absolute on the server (`/api/v2/...`).
    /// - Any HTTP status is returned as a response; only failures to get a
    ///   response at all are errors.
    ///
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, SessionError>;
}

///
/// TESTS
///
