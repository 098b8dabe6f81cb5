//! # Payload Builder
//!
//! Turns a resource's serialized attributes into a request body. The save path only ever
//! sees the resulting [`Payload`]: a content type plus opaque bytes.
//!
//! - Default: URL-encoded form ([`form`]).
//! - File upload: multipart ([`multipart`]), used only when the resource carries an
//!   [`UploadFile`] and binary bodies can be sent.

pub mod file;
pub mod form;
pub mod multipart;

pub use file::{FileSource, UploadFile};
pub use multipart::MultipartEncoder;

use crate::framework::ResourceError;
use bytes::Bytes;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Encoded request body.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub content_type: String,
    pub body: Bytes,
}

impl Payload {
    pub fn is_multipart(&self) -> bool {
        self.content_type.starts_with("multipart/form-data")
    }
}

/// Build the body for a save.
///
/// `boundary` overrides the timestamp-based multipart boundary. The file read is the
/// only suspension point here.
pub async fn build_payload(
    attrs: Map<String, Value>,
    upload: Option<&UploadFile>,
    binary_supported: bool,
    boundary: Option<&str>,
) -> Result<Payload, ResourceError> {
    match upload {
        Some(file) if binary_supported => {
            let data = file.read().await?;
            let mut encoder = MultipartEncoder::new(
                boundary.map_or_else(multipart::timestamp_boundary, str::to_string),
            );
            debug!(field = %file.field, size = data.len(), boundary = encoder.boundary(), "Multipart payload");
            encoder.file_part(&file.field, &file.name, &file.content_type, &data);
            encoder.text_parts(&attrs, &file.field);
            Ok(encoder.finish())
        }
        _ => {
            let mut attrs = attrs;
            if let Some(file) = upload {
                warn!(field = %file.field, "Binary bodies unavailable, sending without file");
                attrs.remove(&file.field);
            }
            Ok(Payload {
                content_type: form::FORM_CONTENT_TYPE.to_string(),
                body: Bytes::from(form::encode(&attrs)?),
            })
        }
    }
}
