//! # Parent Capability
//!
//! A resource only needs three things from its parent: make sure it is usable, make sure
//! it exists server side, and hand over its link table. Both full resources and legacy
//! plain objects that only carry `links` provide this capability.

use crate::framework::entity::ResourceEntity;
use crate::framework::error::ResourceError;
use crate::framework::resource::Resource;
use crate::framework::state::LinkTable;
use async_trait::async_trait;

/// Capability a child resource depends on. Callers never see the concrete parent shape.
#[async_trait]
pub trait ParentResource: Send + Sync {
    /// Resolve readiness of the parent (and transitively its own parents).
    async fn ready(&self) -> Result<(), ResourceError>;

    /// Make sure the parent has been persisted, creating it if needed.
    async fn ensure_exists(&self) -> Result<(), ResourceError>;

    /// Current link table, if the parent has one yet.
    async fn link_table(&self) -> Option<LinkTable>;
}

#[async_trait]
impl<E: ResourceEntity> ParentResource for Resource<E> {
    async fn ready(&self) -> Result<(), ResourceError> {
        Resource::ready(self).await
    }

    async fn ensure_exists(&self) -> Result<(), ResourceError> {
        self.ensure_created().await
    }

    async fn link_table(&self) -> Option<LinkTable> {
        self.links().await
    }
}

/// Legacy parent: a plain object exposing a `links` field and nothing else.
///
/// It has no lifecycle of its own, so it is always ready and always exists.
#[derive(Debug, Clone, Default)]
pub struct PlainParent {
    links: LinkTable,
}

impl PlainParent {
    pub fn new(links: LinkTable) -> Self {
        Self { links }
    }
}

#[async_trait]
impl ParentResource for PlainParent {
    async fn ready(&self) -> Result<(), ResourceError> {
        Ok(())
    }

    async fn ensure_exists(&self) -> Result<(), ResourceError> {
        Ok(())
    }

    async fn link_table(&self) -> Option<LinkTable> {
        Some(self.links.clone())
    }
}
