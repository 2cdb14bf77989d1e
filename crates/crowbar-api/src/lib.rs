//! Client bindings for the OpenCrowbar v2 management API.
//!
//! Each remote collection is addressed by an endpoint descriptor that owns a
//! fixed path, a resource type tag and a shared [`Session`]. The descriptor
//! composes the generic [`Endpoint`] capability, which provides the
//! list/get/create/update/delete verbs for any [`Resource`] record type.
//!
//! ## Layering
//!
//! - `session/` is the transport seam; callers bring their own HTTP client.
//! - `endpoint/` builds requests and decodes responses.
//! - `attribute`, `resource` and `ids` hold the record types.
//! - `config/` and `log` are the ambient client configuration and logging.

pub mod attribute;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod ids;
pub mod log;
pub mod resource;
pub mod session;

pub use {
    attribute::{Attribute, AttributeEnum, AttributeError},
    endpoint::{AttributeEndpoint, Endpoint},
    error::Error,
    ids::ResourceId,
    resource::{Field, Resource},
    session::{ApiRequest, ApiResponse, HttpMethod, Session, SessionError},
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Attribute, AttributeEndpoint, Endpoint, Error, Field, Resource, ResourceId, Session,
        log,
        log::{Level, Topic},
    };
}

///
/// Crate Version
///

pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// init and validate config
pub fn init_config(toml: &str) -> Result<(), Error> {
    config::Config::init_from_toml(toml)
        .map(|_| ())
        .map_err(Error::from)
}
