//! # Resource Configuration
//!
//! Knobs shared by every resource created from a [`Session`](crate::lifecycle::Session).
//! The struct deserializes with defaults, so it can sit inside a larger application config:
//!
//! ```
//! use rest_resource::config::ResourceConfig;
//!
//! let config: ResourceConfig = serde_json::from_str(r#"{ "file_uploads": false }"#).unwrap();
//! assert!(!config.file_uploads);
//! assert_eq!(config.event_capacity, 16);
//! ```

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Allow multipart file uploads. When false, file attributes are never sent.
    pub file_uploads: bool,
    /// Fixed multipart boundary. A timestamp-based one is generated per request when unset.
    pub boundary: Option<String>,
    /// Buffer of the lifecycle event channel.
    pub event_capacity: usize,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            file_uploads: true,
            boundary: None,
            event_capacity: 16,
        }
    }
}
