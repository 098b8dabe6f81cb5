//! File attributes for multipart uploads.

use crate::framework::ResourceError;
use bytes::Bytes;
use std::path::PathBuf;
use tracing::debug;

/// Where an upload's bytes come from.
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    Bytes(Bytes),
    Path(PathBuf),
}

/// A file-bearing attribute: the form field it goes under, the file name and media type
/// declared to the server, and its contents.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub field: String,
    pub name: String,
    pub content_type: String,
    pub source: FileSource,
}

impl UploadFile {
    pub fn from_bytes(
        field: impl Into<String>,
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            field: field.into(),
            name: name.into(),
            content_type: content_type.into(),
            source: FileSource::Bytes(data.into()),
        }
    }

    /// Upload read lazily from disk. The declared file name is the path's last component.
    pub fn from_path(
        field: impl Into<String>,
        path: impl Into<PathBuf>,
        content_type: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            field: field.into(),
            name,
            content_type: content_type.into(),
            source: FileSource::Path(path),
        }
    }

    /// Raw file contents.
    pub async fn read(&self) -> Result<Bytes, ResourceError> {
        match &self.source {
            FileSource::Bytes(data) => Ok(data.clone()),
            FileSource::Path(path) => {
                debug!(path = %path.display(), "Reading upload");
                tokio::fs::read(path)
                    .await
                    .map(Bytes::from)
                    .map_err(|e| ResourceError::FileRead {
                        name: self.name.clone(),
                        reason: e.to_string(),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_from_path() {
        let path = std::env::temp_dir().join(format!("rest-resource-upload-{}.txt", std::process::id()));
        tokio::fs::write(&path, b"diff --git a b").await.unwrap();

        let upload = UploadFile::from_path("path", &path, "text/x-patch");
        assert_eq!(upload.name, path.file_name().unwrap().to_string_lossy());
        assert_eq!(upload.read().await.unwrap(), Bytes::from_static(b"diff --git a b"));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let upload = UploadFile::from_path("path", "/nonexistent/upload.png", "image/png");
        let err = upload.read().await.unwrap_err();
        assert!(matches!(err, ResourceError::FileRead { ref name, .. } if name == "upload.png"));
    }
}
