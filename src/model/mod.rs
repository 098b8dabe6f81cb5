//! Concrete resources built on [`ResourceEntity`](crate::framework::ResourceEntity).

pub mod file_attachment;
pub mod review;
pub mod review_request;

pub use file_attachment::*;
pub use review::*;
pub use review_request::*;
