//! # Resource Errors
//!
//! Every lifecycle operation returns [`ResourceError`]. Usage errors are raised before any
//! request is sent; transport errors come back from the [`Transport`](crate::transport::Transport).

use crate::transport::TransportError;

/// Misuse of the resource API. No request is attempted when one of these is returned.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum UsageError {
    #[error("The object must have an ID before it can be fetched")]
    FetchNew,
    #[error("The object must either be loaded from the server or have a parent object before it can be fetched")]
    NoFetchUrl,
    #[error("The object must either be loaded from the server or have a parent object before it can be saved")]
    NoSaveUrl,
    #[error("The object must either be loaded from the server or have a parent object before it can be deleted")]
    NoDestroyUrl,
    #[error("Resource type has no response namespace configured")]
    MissingNamespace,
}

/// Errors surfaced by resource operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ResourceError {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Malformed {namespace} response: {reason}")]
    Parse { namespace: String, reason: String },
    #[error("Failed to read upload {name}: {reason}")]
    FileRead { name: String, reason: String },
    #[error("Payload encoding failed: {0}")]
    Encode(String),
}

impl ResourceError {
    pub(crate) fn parse(namespace: &str, reason: impl Into<String>) -> Self {
        ResourceError::Parse {
            namespace: namespace.to_string(),
            reason: reason.into(),
        }
    }

    /// True when the error was raised locally, before anything reached the transport.
    pub fn is_usage(&self) -> bool {
        matches!(self, ResourceError::Usage(_))
    }
}
