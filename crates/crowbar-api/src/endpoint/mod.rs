mod attribute;

pub use attribute::AttributeEndpoint;

use crate::{
    Error,
    ids::ResourceId,
    log,
    log::Topic,
    resource::Resource,
    session::{ApiRequest, HttpMethod, Session},
};
use serde_json::Value;
use std::{fmt, marker::PhantomData, sync::Arc};

///
/// Endpoint
///
/// Generic collection capability: a fixed path, a resource type tag and the
/// session requests go through. Resource descriptors compose one of these
/// rather than re-implementing the verbs.
///

pub struct Endpoint<T> {
    session: Arc<dyn Session>,
    path: &'static str,
    resource_type: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T: Resource> Endpoint<T> {
    #[must_use]
    pub fn new(session: Arc<dyn Session>, path: &'static str, resource_type: &'static str) -> Self {
        Self {
            session,
            path,
            resource_type,
            _record: PhantomData,
        }
    }

    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[must_use]
    pub const fn resource_type(&self) -> &'static str {
        self.resource_type
    }

    #[must_use]
    pub const fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    /// Path of a single record in this collection.
    #[must_use]
    pub fn member_path(&self, id: &ResourceId) -> String {
        format!("{}/{}", self.path, id.to_path_segment())
    }

    // -------------------------------------------------------------------------
    // Verbs
    // -------------------------------------------------------------------------

    /// Fetch every record in the collection.
    pub async fn list(&self) -> Result<Vec<T>, Error> {
        let request = ApiRequest::new(HttpMethod::Get, self.path);
        let body = self.send_expecting_body(request).await?;

        self.decode(body)
    }

    /// Fetch one record by id or key.
    pub async fn get(&self, id: impl Into<ResourceId>) -> Result<T, Error> {
        let request = ApiRequest::new(HttpMethod::Get, self.member_path(&id.into()));
        let body = self.send_expecting_body(request).await?;

        self.decode(body)
    }

    /// Create a record; returns the record as stored by the server.
    pub async fn create(&self, record: &T) -> Result<T, Error> {
        let request = ApiRequest::new(HttpMethod::Post, self.path).with_body(self.encode(record)?);
        let body = self.send_expecting_body(request).await?;

        self.decode(body)
    }

    /// Replace a record; returns the record as stored by the server.
    pub async fn update(&self, id: impl Into<ResourceId>, record: &T) -> Result<T, Error> {
        let request = ApiRequest::new(HttpMethod::Put, self.member_path(&id.into()))
            .with_body(self.encode(record)?);
        let body = self.send_expecting_body(request).await?;

        self.decode(body)
    }

    /// Delete a record. Whatever body the server returns is discarded.
    pub async fn delete(&self, id: impl Into<ResourceId>) -> Result<(), Error> {
        let request = ApiRequest::new(HttpMethod::Delete, self.member_path(&id.into()));
        self.send(request).await?;

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Core execution
    // -------------------------------------------------------------------------

    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, Error> {
        let method = request.method;
        let path = request.path.clone();

        log!(Topic::Endpoint, Debug, "{method} {path} ({})", self.resource_type);

        let response = match self.session.request(request).await {
            Ok(response) => response,
            Err(err) => {
                log!(Topic::Endpoint, Warn, "{method} {path}: {err}");
                return Err(err.into());
            }
        };

        if !response.is_success() {
            log!(
                Topic::Endpoint,
                Warn,
                "{method} {path}: http status {}",
                response.status
            );
            return Err(Error::HttpStatus {
                method: method.to_string(),
                path,
                status: response.status,
            });
        }

        Ok(response.body)
    }

    async fn send_expecting_body(&self, request: ApiRequest) -> Result<Value, Error> {
        let method = request.method.to_string();
        let path = request.path.clone();

        self.send(request)
            .await?
            .ok_or(Error::EmptyBody { method, path })
    }

    ///
    /// helpers
    ///

    fn decode<R: serde::de::DeserializeOwned>(&self, body: Value) -> Result<R, Error> {
        serde_json::from_value(body).map_err(|source| Error::Decode {
            resource_type: self.resource_type,
            source,
        })
    }

    fn encode(&self, record: &T) -> Result<Value, Error> {
        serde_json::to_value(record).map_err(|source| Error::Encode {
            resource_type: self.resource_type,
            source,
        })
    }
}

impl<T> Clone for Endpoint<T> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            path: self.path,
            resource_type: self.resource_type,
            _record: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Endpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("path", &self.path)
            .field("resource_type", &self.resource_type)
            .finish_non_exhaustive()
    }
}

///
/// TESTS
///
