//! # Resource Lifecycle Manager
//!
//! [`Resource<E>`] is the local stand-in for one remote entity. It decides whether it has
//! to be fetched, created, or is already usable, and applies the same rules up its parent
//! chain before any fetch, save, or delete goes out.
//!
//! ## Readiness
//!
//! | State                      | `ready()` does                         |
//! |----------------------------|----------------------------------------|
//! | loaded                     | nothing                                |
//! | has an id, not loaded      | fetches itself                         |
//! | new, has a parent          | resolves the parent's readiness only   |
//! | new, no parent             | nothing                                |
//!
//! ## Concurrency Model
//! State sits behind a `tokio::sync::Mutex` that is released before every transport call.
//! Each resource, parents included, is driven by one call chain at a time: two children
//! saved concurrently under the same new parent would both create it. Parent work always
//! finishes before the dependent child step starts.

use crate::config::ResourceConfig;
use crate::framework::entity::ResourceEntity;
use crate::framework::error::{ResourceError, UsageError};
use crate::framework::events::LifecycleEvent;
use crate::framework::parent::ParentResource;
use crate::framework::state::{LinkTable, Persistence, ResourceState};
use crate::payload::build_payload;
use crate::transport::{Method, Response, Transport};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, instrument, warn};

/// A remote resource with lazy materialization.
pub struct Resource<E: ResourceEntity> {
    state: Mutex<ResourceState<E>>,
    parent: Option<Arc<dyn ParentResource>>,
    transport: Arc<dyn Transport>,
    config: ResourceConfig,
    events: broadcast::Sender<LifecycleEvent>,
}

impl<E: ResourceEntity> Resource<E> {
    /// A new, never-persisted resource.
    pub fn new(transport: Arc<dyn Transport>, entity: E) -> Self {
        let config = ResourceConfig::default();
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            state: Mutex::new(ResourceState::new(entity)),
            parent: None,
            transport,
            config,
            events,
        }
    }

    /// Mark the resource as existing server side. It is fetched on first use.
    pub fn with_id(mut self, id: E::Id) -> Self {
        self.state.get_mut().persistence = Persistence::Persisted(id);
        self
    }

    /// Attach the parent that supplies this resource's collection link.
    pub fn with_parent(mut self, parent: Arc<dyn ParentResource>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_config(mut self, config: ResourceConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        self.events = events;
        self.config = config;
        self
    }

    // --- Accessors ---

    pub async fn id(&self) -> Option<E::Id> {
        self.state.lock().await.persistence.id().cloned()
    }

    pub async fn is_new(&self) -> bool {
        self.state.lock().await.persistence.is_new()
    }

    pub async fn is_loaded(&self) -> bool {
        self.state.lock().await.loaded
    }

    pub async fn links(&self) -> Option<LinkTable> {
        self.state.lock().await.links.clone()
    }

    /// Snapshot of the entity fields.
    pub async fn entity(&self) -> E {
        self.state.lock().await.entity.clone()
    }

    /// Mutate entity fields in place. Nothing is sent until [`save`](Self::save).
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut E),
    {
        f(&mut self.state.lock().await.entity);
    }

    pub fn parent(&self) -> Option<&Arc<dyn ParentResource>> {
        self.parent.as_ref()
    }

    /// Observe lifecycle events. Only events sent after subscribing are received.
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: LifecycleEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// URL of this resource.
    ///
    /// The `self` link once loaded; otherwise derived from the parent's collection link
    /// (the collection itself for a new resource, `<collection><id>/` for a known id).
    pub async fn url(&self) -> Option<String> {
        let (links, id) = {
            let state = self.state.lock().await;
            (state.links.clone(), state.persistence.id().cloned())
        };

        if let Some(links) = links {
            return links.self_href().map(str::to_string);
        }

        let parent_links = self.parent.as_ref()?.link_table().await?;
        let base = &parent_links.get(&E::list_key())?.href;
        Some(match id {
            None => base.clone(),
            Some(id) => format!("{}{}/", base, id),
        })
    }

    // --- Readiness & Creation ---

    /// Make the resource usable.
    ///
    /// On `Ok`, the resource has either loaded its data or is legitimately new with
    /// nothing to load, and the same holds for its parent chain.
    #[instrument(skip(self), fields(namespace = E::NAMESPACE))]
    pub async fn ready(&self) -> Result<(), ResourceError> {
        let (loaded, is_new) = {
            let state = self.state.lock().await;
            (state.loaded, state.persistence.is_new())
        };

        if loaded {
            return Ok(());
        }
        if !is_new {
            debug!("Not loaded, fetching");
            return self.fetch().await;
        }
        match &self.parent {
            Some(parent) => {
                debug!("New resource, resolving parent");
                parent.ready().await
            }
            None => Ok(()),
        }
    }

    /// Make sure the resource exists server side, creating it if it was never saved.
    #[instrument(skip(self), fields(namespace = E::NAMESPACE))]
    pub async fn ensure_created(&self) -> Result<(), ResourceError> {
        self.ready().await?;
        if self.is_loaded().await {
            return Ok(());
        }
        info!("Creating missing resource");
        self.save().await.map(|_| ())
    }

    // --- Persistence Operations ---

    /// Load server data for a resource with a known id.
    #[instrument(skip(self), fields(namespace = E::NAMESPACE))]
    pub async fn fetch(&self) -> Result<(), ResourceError> {
        if self.is_new().await {
            warn!("Fetch on a new resource");
            return Err(UsageError::FetchNew.into());
        }
        if let Some(parent) = &self.parent {
            parent.ready().await?;
        }

        let url = self.url().await.ok_or(UsageError::NoFetchUrl)?;
        debug!(%url, "Read");
        let response = self.transport.read(&url).await.map_err(|e| {
            warn!(%url, error = %e, "Fetch failed");
            e
        })?;
        self.apply_response(&response.body).await?;
        info!(%url, "Fetched");
        self.emit(LifecycleEvent::Fetched);
        Ok(())
    }

    /// Create or update the resource on the server.
    ///
    /// A new resource is POSTed to its parent's collection, so the parent is created first
    /// if it does not exist yet. A persisted resource is PUT to its own URL.
    #[instrument(skip(self), fields(namespace = E::NAMESPACE))]
    pub async fn save(&self) -> Result<Response, ResourceError> {
        self.emit(LifecycleEvent::Saving);

        self.ready().await?;
        if let Some(parent) = &self.parent {
            parent.ensure_exists().await?;
        }
        self.save_object().await
    }

    async fn save_object(&self) -> Result<Response, ResourceError> {
        let url = self.url().await.ok_or_else(|| {
            warn!("No URL to save to");
            UsageError::NoSaveUrl
        })?;

        let (attrs, upload, method) = {
            let state = self.state.lock().await;
            (
                state.entity.to_json(),
                state.entity.upload().cloned(),
                state.persistence.method(),
            )
        };
        let binary_supported = self.config.file_uploads && self.transport.supports_binary_bodies();
        let payload = build_payload(
            attrs,
            upload.as_ref(),
            binary_supported,
            self.config.boundary.as_deref(),
        )
        .await?;

        debug!(%url, %method, content_type = %payload.content_type, "Write");
        let response = self
            .transport
            .write(&url, method, Some(payload))
            .await
            .map_err(|e| {
                warn!(%url, %method, error = %e, "Save failed");
                e
            })?;

        self.apply_response(&response.body).await?;
        info!(%url, %method, "Saved");
        self.emit(LifecycleEvent::Saved);
        Ok(response)
    }

    /// Delete the resource and reset it to the new state.
    ///
    /// The object stays usable afterwards and can be saved again to recreate it. A resource
    /// that was never persisted is reset without a request and yields `Ok(None)`.
    #[instrument(skip(self), fields(namespace = E::NAMESPACE))]
    pub async fn destroy(&self) -> Result<Option<Response>, ResourceError> {
        if let Some(parent) = &self.parent {
            parent.ready().await?;
        }

        let url = self.url().await.ok_or_else(|| {
            warn!("No URL to delete");
            UsageError::NoDestroyUrl
        })?;

        if self.is_new().await {
            debug!("Nothing persisted, resetting only");
            self.state.lock().await.reset();
            self.emit(LifecycleEvent::Destroyed);
            return Ok(None);
        }

        debug!(%url, "Delete");
        let response = self
            .transport
            .write(&url, Method::Delete, None)
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "Delete failed");
                e
            })?;

        self.state.lock().await.reset();
        info!(%url, "Deleted");
        self.emit(LifecycleEvent::Destroyed);
        Ok(Some(response))
    }

    /// Apply a server payload: `{<namespace>: {id, links, ...fields}}`.
    async fn apply_response(&self, raw: &Value) -> Result<(), ResourceError> {
        if E::NAMESPACE.is_empty() {
            return Err(UsageError::MissingNamespace.into());
        }

        let object = raw
            .get(E::NAMESPACE)
            .and_then(Value::as_object)
            .ok_or_else(|| ResourceError::parse(E::NAMESPACE, "missing namespace object"))?;

        let id = object
            .get("id")
            .cloned()
            .map(serde_json::from_value::<E::Id>)
            .transpose()
            .map_err(|e| ResourceError::parse(E::NAMESPACE, format!("bad id: {}", e)))?;
        let links = object
            .get("links")
            .cloned()
            .map(serde_json::from_value::<LinkTable>)
            .transpose()
            .map_err(|e| ResourceError::parse(E::NAMESPACE, format!("bad links: {}", e)))?;

        let mut state = self.state.lock().await;
        if id.is_none() && state.persistence.is_new() {
            // A loaded resource always has an id.
            return Err(ResourceError::parse(E::NAMESPACE, "missing id"));
        }
        let mut entity = state.entity.clone();
        entity.parse_fields(object)?;

        if let Some(id) = id {
            state.persistence = Persistence::Persisted(id);
        }
        if links.is_some() {
            state.links = links;
        }
        state.entity = entity;
        state.loaded = true;
        Ok(())
    }
}

impl<E: ResourceEntity> std::fmt::Debug for Resource<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("namespace", &E::NAMESPACE)
            .field("has_parent", &self.parent.is_some())
            .finish_non_exhaustive()
    }
}
