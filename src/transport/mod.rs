//! # Transport Contract
//!
//! The lifecycle manager never talks HTTP itself. It hands URLs, methods, and finished
//! [`Payload`]s to a [`Transport`] and gets JSON [`Response`]s back.
//!
//! See [`mock`] for a test double with an expectation queue.

pub mod mock;

use crate::payload::Payload;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded server response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }
}

/// Failures reported by the network layer.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum TransportError {
    /// The server explained the failure with a structured error payload.
    #[error("{message}")]
    Server {
        status: u16,
        code: Option<i64>,
        message: String,
    },
    #[error("HTTP {status} {status_text}")]
    Http { status: u16, status_text: String },
    #[error("Connection failed: {0}")]
    Connection(String),
}

#[derive(Deserialize)]
struct ErrorPayload {
    err: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<i64>,
    msg: String,
}

impl TransportError {
    /// Build an error from a failed HTTP exchange.
    ///
    /// Uses the server's `{"stat": "fail", "err": {"code": .., "msg": ..}}` payload when the
    /// body parses as one, otherwise falls back to the status line.
    pub fn from_failure(status: u16, status_text: &str, body: &str) -> Self {
        match serde_json::from_str::<ErrorPayload>(body) {
            Ok(payload) => TransportError::Server {
                status,
                code: payload.err.code,
                message: payload.err.msg,
            },
            Err(_) => TransportError::Http {
                status,
                status_text: status_text.to_string(),
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Server { status, .. } | TransportError::Http { status, .. } => {
                Some(*status)
            }
            TransportError::Connection(_) => None,
        }
    }
}

/// Low-level request execution supplied by the application.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url`.
    async fn read(&self, url: &str) -> Result<Response, TransportError>;

    /// Send `payload` to `url` with `method`. `payload` is `None` for deletes.
    ///
    /// Multipart payloads must go out as literal bytes with the payload's content type.
    async fn write(
        &self,
        url: &str,
        method: Method,
        payload: Option<Payload>,
    ) -> Result<Response, TransportError>;

    /// Whether raw binary request bodies can be sent.
    fn supports_binary_bodies(&self) -> bool {
        true
    }
}
