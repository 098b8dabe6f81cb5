//! Generic resource framework.
//!
//! This module provides the building blocks for modeling remote REST resources as local
//! objects that know how to become usable: fetched, created, or already loaded.
//!
//! # Main Components
//!
//! - [`ResourceEntity`] - Trait that concrete resource types implement
//! - [`Resource`] - Generic lifecycle manager (ready / ensure_created / fetch / save / destroy)
//! - [`ParentResource`] - Capability a child needs from its parent, with [`PlainParent`] for link-only parents
//! - [`ResourceError`] - Usage, transport, and parse errors
//!
//! # Testing
//!
//! See [`crate::transport::mock`] for a transport that answers from expectations.

pub mod entity;
pub mod error;
pub mod events;
pub mod parent;
pub mod resource;
pub mod state;

// Re-export core types for convenience
pub use entity::ResourceEntity;
pub use error::{ResourceError, UsageError};
pub use events::LifecycleEvent;
pub use parent::{ParentResource, PlainParent};
pub use resource::Resource;
pub use state::{Link, LinkTable, Persistence, ResourceState};
