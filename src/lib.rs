#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # REST Resource
//!
//! > **Remote REST resources as local objects that know how to become usable.**
//!
//! A [`Resource`](framework::Resource) stands in for one remote entity. It starts out
//! *new*, becomes *loaded* when fetched or first saved, and goes back to *new* when
//! destroyed. Resources hang off parents that hand them their collection URL, and every
//! operation first makes sure the whole parent chain is ready.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Readiness Before Action
//!
//! Each mutating operation resolves readiness first:
//! - **Loaded**: nothing to do.
//! - **Has an id**: fetch it.
//! - **New with a parent**: make the parent ready (a new child has no data of its own).
//! - **New without a parent**: trivially ready.
//!
//! Saving goes one step further and makes the parent *exist* server side, since a new
//! child is POSTed to the parent's real collection URL.
//!
//! ### Generics: The Power of `E`
//! You'll see `Resource<E: ResourceEntity>` everywhere. The lifecycle protocol is written
//! **once**; a concrete type only names its namespace and says how to read and write its
//! own fields.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! [`ResourceError`](framework::ResourceError) separates usage errors (raised before any
//! request goes out) from transport errors. Errors short-circuit the chain: a failed parent
//! step never lets the child step run.
//!
//! ### 2. Explicit State
//! New versus persisted is a tag ([`Persistence`](framework::Persistence)), and it picks
//! POST or PUT. Observers subscribe to [`LifecycleEvent`](framework::LifecycleEvent)s on the
//! resource itself instead of listening on a global bus.
//!
//! ### 3. Observability
//! We use `tracing` everywhere with structured logging. Every lifecycle operation opens a
//! span tagged with the resource namespace. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: readiness, creation, fetch / save / destroy over any [`ResourceEntity`](framework::ResourceEntity).
//! - **Key items**: [`Resource`](framework::Resource), [`ParentResource`](framework::ParentResource).
//!
//! ### 2. The Body ([`payload`])
//! - **Role**: URL-encoded forms and multipart file uploads, as opaque bytes plus a content type.
//!
//! ### 3. The Wire ([`transport`])
//! - **Role**: the contract the application's HTTP client implements, plus a mock for tests.
//!
//! ### 4. The Wiring ([`lifecycle`], [`config`])
//! - **Role**: [`Session`](lifecycle::Session) builds resource chains on one transport; tracing setup.
//!
//! ### 5. The Implementation ([`model`])
//! - **Role**: review requests, reviews, and file attachments built with the recipe.
//!
//! ## 🚀 Quick Start
//!
//! ```
//! use rest_resource::framework::LinkTable;
//! use rest_resource::lifecycle::Session;
//! use rest_resource::model::ReviewRequest;
//! use rest_resource::transport::{mock::MockTransport, Method};
//! use serde_json::json;
//!
//! # tokio_test();
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn tokio_test() {
//! let mock = MockTransport::new();
//! mock.expect_write(Method::Post, "/api/review-requests/").return_ok(json!({
//!     "review_request": {
//!         "id": 1,
//!         "summary": "Fix crash on startup",
//!         "links": { "self": { "href": "/api/review-requests/1/" } }
//!     }
//! }));
//!
//! let session = Session::new(mock.transport());
//! let root = session.root(LinkTable::new().with("review_requests", "/api/review-requests/"));
//! let request = session.child_of(root, ReviewRequest::new("Fix crash on startup"));
//!
//! request.save().await.unwrap();
//! assert_eq!(request.id().await, Some(1));
//! mock.verify();
//! # }
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! RUST_LOG=debug cargo test
//! ```

pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod payload;
pub mod transport;
