use crate::framework::{ResourceEntity, ResourceError};
use crate::payload::UploadFile;
use bytes::Bytes;
use serde_json::{Map, Value};

/// Form field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "path";

/// A file attached to a review request. Saving it with a file set sends a multipart upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileAttachment {
    pub caption: Option<String>,
    pub file: Option<UploadFile>,
    /// Server-side name, filled in from responses.
    pub filename: Option<String>,
    pub url: Option<String>,
}

impl FileAttachment {
    pub fn with_file(
        caption: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            caption: Some(caption.into()),
            file: Some(UploadFile::from_bytes(UPLOAD_FIELD, filename, content_type, data)),
            ..Self::default()
        }
    }
}

impl ResourceEntity for FileAttachment {
    type Id = u64;
    const NAMESPACE: &'static str = "file_attachment";

    fn parse_fields(&mut self, payload: &Map<String, Value>) -> Result<(), ResourceError> {
        self.caption = payload.get("caption").and_then(Value::as_str).map(str::to_string);
        self.filename = payload.get("filename").and_then(Value::as_str).map(str::to_string);
        self.url = payload.get("url").and_then(Value::as_str).map(str::to_string);
        Ok(())
    }

    fn to_json(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert(
            "caption".into(),
            self.caption.as_deref().map_or(Value::Null, Value::from),
        );
        data
    }

    fn upload(&self) -> Option<&UploadFile> {
        self.file.as_ref()
    }
}
