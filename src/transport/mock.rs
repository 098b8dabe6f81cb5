//! # Mock Transport
//!
//! An in-memory [`Transport`] that answers from a queue of expectations and records every
//! request it sees. It lets you test resource chains deterministically without a server.
//!
//! ```
//! use rest_resource::transport::mock::MockTransport;
//! use serde_json::json;
//!
//! let mock = MockTransport::new();
//! mock.expect_read("/api/things/5/")
//!     .return_ok(json!({ "thing": { "id": 5, "links": { "self": { "href": "/api/things/5/" } } } }));
//!
//! let transport = mock.transport();
//! // Hand `transport` to resources, exercise them, then:
//! // mock.verify();
//! # let _ = transport;
//! ```
//!
//! A request that does not match the next expectation panics, failing the test.

use crate::payload::Payload;
use crate::transport::{Method, Response, Transport, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A request as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub payload: Option<Payload>,
}

/// Represents an expected request and the canned answer for it.
struct Expectation {
    method: Method,
    url: String,
    response: Result<Response, TransportError>,
}

#[derive(Default)]
struct Shared {
    expectations: Mutex<VecDeque<Expectation>>,
    requests: Mutex<Vec<RecordedRequest>>,
    binary_unsupported: AtomicBool,
}

/// A mock transport with expectation tracking for fluent testing.
#[derive(Clone, Default)]
pub struct MockTransport {
    shared: Arc<Shared>,
}

impl MockTransport {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Same mock, as the trait object resources take.
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    /// Pretend the underlying client cannot send raw binary bodies.
    pub fn without_binary_bodies(self) -> Self {
        self.shared.binary_unsupported.store(true, Ordering::SeqCst);
        self
    }

    /// Expects a GET of `url`.
    pub fn expect_read(&self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, url)
    }

    /// Expects a write of `url` with `method`.
    pub fn expect_write(&self, method: Method, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(method, url)
    }

    /// Expects a DELETE of `url`.
    pub fn expect_delete(&self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Delete, url)
    }

    fn expect(&self, method: Method, url: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            url: url.into(),
            shared: self.shared.clone(),
        }
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.shared.requests.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.shared.expectations.lock().unwrap();
        if !exps.is_empty() {
            let pending: Vec<String> = exps
                .iter()
                .map(|e| format!("{} {}", e.method, e.url))
                .collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                exps.len(),
                pending
            );
        }
    }

    fn answer(
        &self,
        method: Method,
        url: &str,
        payload: Option<Payload>,
    ) -> Result<Response, TransportError> {
        self.shared.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            payload,
        });

        let expectation = self.shared.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(exp) if exp.method == method && exp.url == url => exp.response,
            Some(exp) => panic!(
                "Unexpected request {} {}, expected {} {}",
                method, url, exp.method, exp.url
            ),
            None => panic!("Unexpected request {} {}, no expectations left", method, url),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn read(&self, url: &str) -> Result<Response, TransportError> {
        self.answer(Method::Get, url, None)
    }

    async fn write(
        &self,
        url: &str,
        method: Method,
        payload: Option<Payload>,
    ) -> Result<Response, TransportError> {
        self.answer(method, url, payload)
    }

    fn supports_binary_bodies(&self) -> bool {
        !self.shared.binary_unsupported.load(Ordering::SeqCst)
    }
}

/// Builder for one expectation.
pub struct ExpectationBuilder {
    method: Method,
    url: String,
    shared: Arc<Shared>,
}

impl ExpectationBuilder {
    /// Answer with status 200 and `body`.
    pub fn return_ok(self, body: Value) {
        self.return_response(Response::ok(body));
    }

    pub fn return_response(self, response: Response) {
        self.push(Ok(response));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Response, TransportError>) {
        self.shared.expectations.lock().unwrap().push_back(Expectation {
            method: self.method,
            url: self.url,
            response,
        });
    }
}
