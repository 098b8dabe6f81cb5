//! # Resource State
//!
//! The data model shared by every resource: the new/persisted tag, the link table
//! handed out by the server, and the loaded flag.

use crate::framework::entity::ResourceEntity;
use crate::transport::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether a resource has ever been persisted.
///
/// Write operations branch on this tag: a `New` resource is created against its
/// parent's collection, a `Persisted` one is updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence<Id> {
    New,
    Persisted(Id),
}

impl<Id> Persistence<Id> {
    pub fn is_new(&self) -> bool {
        matches!(self, Persistence::New)
    }

    pub fn id(&self) -> Option<&Id> {
        match self {
            Persistence::New => None,
            Persistence::Persisted(id) => Some(id),
        }
    }

    /// HTTP method used when saving.
    pub fn method(&self) -> Method {
        match self {
            Persistence::New => Method::Post,
            Persistence::Persisted(_) => Method::Put,
        }
    }
}

/// A single entry of a link table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            method: None,
        }
    }
}

/// Relation name to link, as found under `links` in a resource payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkTable(HashMap<String, Link>);

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for constructing API roots.
    pub fn with(mut self, rel: impl Into<String>, href: impl Into<String>) -> Self {
        self.insert(rel, Link::new(href));
        self
    }

    pub fn insert(&mut self, rel: impl Into<String>, link: Link) {
        self.0.insert(rel.into(), link);
    }

    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.get(rel)
    }

    pub fn self_href(&self) -> Option<&str> {
        self.get("self").map(|link| link.href.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Mutable state of one resource.
#[derive(Debug, Clone)]
pub struct ResourceState<E: ResourceEntity> {
    pub persistence: Persistence<E::Id>,
    pub links: Option<LinkTable>,
    pub loaded: bool,
    pub entity: E,
}

impl<E: ResourceEntity> ResourceState<E> {
    pub fn new(entity: E) -> Self {
        Self {
            persistence: Persistence::New,
            links: None,
            loaded: false,
            entity,
        }
    }

    /// Back to the new-state triple. Entity fields are kept so the object can be saved again.
    pub fn reset(&mut self) {
        self.persistence = Persistence::New;
        self.links = None;
        self.loaded = false;
    }
}
