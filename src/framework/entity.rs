//! # ResourceEntity Trait
//!
//! The `ResourceEntity` trait is the contract a concrete resource type (review request,
//! review, file attachment, ...) implements to be managed by the generic [`Resource`].
//! It names the response namespace and supplies the hooks the lifecycle manager calls
//! when parsing responses and building request bodies.
//!
//! # Provided Methods (Hooks)
//! Every hook has a default implementation:
//! - [`ResourceEntity::list_key`] pluralizes the namespace.
//! - [`ResourceEntity::parse_fields`] ignores extra fields.
//! - [`ResourceEntity::to_json`] persists nothing.
//! - [`ResourceEntity::upload`] has no file attribute.
//!
//! You do **not** need to implement these unless the resource carries data of its own.
//!
//! [`Resource`]: crate::framework::Resource

use crate::framework::error::ResourceError;
use crate::payload::UploadFile;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt::{Debug, Display};

/// Trait that any remote resource type must implement to be managed by [`Resource`].
///
/// [`Resource`]: crate::framework::Resource
pub trait ResourceEntity: Clone + Debug + Send + Sync + 'static {
    /// Server-assigned identifier (e.g., u64 or String).
    type Id: DeserializeOwned + Clone + PartialEq + Display + Debug + Send + Sync;

    /// Key of the resource object in response payloads. Pluralized, it names the
    /// collection link on the parent.
    const NAMESPACE: &'static str;

    /// Link relation on the parent that points at this resource's collection.
    fn list_key() -> String {
        format!("{}s", Self::NAMESPACE)
    }

    /// Pull resource-specific fields out of the namespaced response object.
    /// `id` and `links` have already been consumed by the framework.
    fn parse_fields(&mut self, _payload: &Map<String, Value>) -> Result<(), ResourceError> {
        Ok(())
    }

    /// Attributes sent when saving.
    fn to_json(&self) -> Map<String, Value> {
        Map::new()
    }

    /// The file-bearing attribute, if one is set.
    fn upload(&self) -> Option<&UploadFile> {
        None
    }
}
