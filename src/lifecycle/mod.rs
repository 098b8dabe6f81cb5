//! Wiring and observability: [`Session`] builds resource chains, [`setup_tracing`]
//! installs the log subscriber.

mod session;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use session::Session;
