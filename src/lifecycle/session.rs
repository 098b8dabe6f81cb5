use crate::config::ResourceConfig;
use crate::framework::{LinkTable, ParentResource, PlainParent, Resource, ResourceEntity};
use crate::transport::Transport;
use std::sync::Arc;
use tracing::debug;

/// Entry point that wires resources to one transport and one configuration.
///
/// `Session` is responsible for:
/// - **Dependency Wiring**: every resource it builds shares the same [`Transport`]
/// - **Configuration**: every resource gets the same [`ResourceConfig`]
/// - **Parent Chains**: children are handed their parent as a [`ParentResource`]
///
/// # Example
///
/// ```
/// use rest_resource::framework::LinkTable;
/// use rest_resource::lifecycle::Session;
/// use rest_resource::model::{Review, ReviewRequest};
/// use rest_resource::transport::mock::MockTransport;
///
/// let mock = MockTransport::new();
/// let session = Session::new(mock.transport());
///
/// let root = session.root(LinkTable::new().with("review_requests", "/api/review-requests/"));
/// let request = session.child_of(root, ReviewRequest::new("Fix crash on startup"));
/// let review = session.child_of(request.clone(), Review::default());
/// # let _ = review;
/// ```
#[derive(Clone)]
pub struct Session {
    transport: Arc<dyn Transport>,
    config: ResourceConfig,
}

impl Session {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_config(transport, ResourceConfig::default())
    }

    pub fn with_config(transport: Arc<dyn Transport>, config: ResourceConfig) -> Self {
        debug!(?config, "Session created");
        Self { transport, config }
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// A link-only parent, typically the API root.
    pub fn root(&self, links: LinkTable) -> Arc<dyn ParentResource> {
        Arc::new(PlainParent::new(links))
    }

    /// A standalone new resource.
    pub fn resource<E: ResourceEntity>(&self, entity: E) -> Arc<Resource<E>> {
        Arc::new(self.build(entity))
    }

    /// A new resource created under `parent`'s collection.
    pub fn child_of<E: ResourceEntity>(
        &self,
        parent: Arc<dyn ParentResource>,
        entity: E,
    ) -> Arc<Resource<E>> {
        Arc::new(self.build(entity).with_parent(parent))
    }

    /// A resource known to exist under `parent`. It is fetched on first use.
    pub fn existing<E: ResourceEntity>(
        &self,
        parent: Arc<dyn ParentResource>,
        id: E::Id,
        entity: E,
    ) -> Arc<Resource<E>> {
        Arc::new(self.build(entity).with_parent(parent).with_id(id))
    }

    fn build<E: ResourceEntity>(&self, entity: E) -> Resource<E> {
        Resource::new(self.transport.clone(), entity).with_config(self.config.clone())
    }
}
