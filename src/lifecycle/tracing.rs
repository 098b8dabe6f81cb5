//! # Observability & Tracing
//!
//! Every public lifecycle operation on [`Resource`](crate::framework::Resource) opens a span
//! carrying the resource `namespace`, so a save that cascades into its parents shows up as
//! nested spans:
//!
//! ```text
//! INFO save{namespace="review"}:ready{namespace="review"}: ...
//! INFO save{namespace="review"}:ensure_created{namespace="review_request"}: Creating missing resource
//! INFO save{namespace="review"}:ensure_created{namespace="review_request"}:save{namespace="review_request"}: Saved url=/api/review-requests/ method=POST
//! INFO save{namespace="review"}: Saved url=/api/review-requests/1/reviews/ method=POST
//! ```
//!
//! ## Usage Examples
//!
//! ```bash
//! # Requests and outcomes
//! RUST_LOG=info cargo test
//!
//! # Readiness decisions, URLs, and payload content types
//! RUST_LOG=debug cargo test
//!
//! # Filter to the framework
//! RUST_LOG=rest_resource::framework=debug cargo test
//! ```

/// Initializes structured logging controlled by `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs the subscriber.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // namespace field identifies the resource
        .compact()
        .try_init();
}
