use crate::{attribute::AttributeError, config::ConfigError, session::SessionError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Aggregate error returned by every public operation.
///
/// Session failures are carried through untouched so callers can see exactly
/// what the transport reported.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot decode {resource_type} response: {source}")]
    Decode {
        resource_type: &'static str,
        source: serde_json::Error,
    },

    #[error("{method} {path} returned an empty body")]
    EmptyBody { method: String, path: String },

    #[error("cannot encode {resource_type} request: {source}")]
    Encode {
        resource_type: &'static str,
        source: serde_json::Error,
    },

    #[error("{method} {path} failed with http status {status}")]
    HttpStatus {
        method: String,
        path: String,
        status: u16,
    },

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl Error {
    /// HTTP status carried by the error, if the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}

///
/// TESTS
///
