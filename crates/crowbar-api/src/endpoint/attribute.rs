use crate::{
    attribute::Attribute,
    endpoint::Endpoint,
    resource::Resource,
    session::Session,
};
use derive_more::Deref;
use std::sync::Arc;

///
/// AttributeEndpoint
///
/// Descriptor for the `/api/v2/attribs` collection. Every verb comes from the
/// composed [`Endpoint`], reachable through `Deref`.
///

#[derive(Clone, Debug, Deref)]
pub struct AttributeEndpoint {
    endpoint: Endpoint<Attribute>,
}

impl AttributeEndpoint {
    pub const PATH: &'static str = "/api/v2/attribs";
    pub const RESOURCE_TYPE: &'static str = <Attribute as Resource>::RESOURCE_TYPE;

    /// Bind the collection to `session`. No request is made.
    #[must_use]
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self {
            endpoint: Endpoint::new(session, Self::PATH, Self::RESOURCE_TYPE),
        }
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint<Attribute> {
        &self.endpoint
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ApiRequest, ApiResponse, SessionError};
    use async_trait::async_trait;

    struct OfflineSession;

    #[async_trait]
    impl Session for OfflineSession {
        async fn request(&self, _: ApiRequest) -> Result<ApiResponse, SessionError> {
            Err(SessionError::Transport("offline".to_string()))
        }
    }

    #[test]
    fn descriptor_reports_fixed_path_and_type() {
        let session: Arc<dyn Session> = Arc::new(OfflineSession);
        let ep = AttributeEndpoint::new(Arc::clone(&session));

        assert_eq!(ep.path(), "/api/v2/attribs");
        assert_eq!(ep.resource_type(), "Attribute");
        assert!(Arc::ptr_eq(ep.session(), &session));
        assert_eq!(ep.endpoint().path(), AttributeEndpoint::PATH);
    }
}
