//! # Multipart Encoder
//!
//! Hand-built `multipart/form-data` bodies: one file part followed by plain text parts,
//! all separated by the same boundary token.
//!
//! ```text
//! --<boundary>\r\n
//! Content-Disposition: form-data; name="path"; filename="shot.png"\r\n
//! Content-Type: image/png\r\n
//! \r\n
//! <raw bytes>\r\n
//! --<boundary>\r\n
//! Content-Disposition: form-data; name="caption"\r\n
//! \r\n
//! Login page\r\n
//! --<boundary>--\r\n
//! ```

use crate::payload::form::field_text;
use crate::payload::Payload;
use bytes::{BufMut, BytesMut};
use serde_json::{Map, Value};

const BOUNDARY_PREFIX: &str = "-----multipartformboundary";

/// Header-safe form of a name or media type: quotes escaped, CR/LF dropped.
fn header_value(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .flat_map(|c| match c {
            '"' => vec!['\\', '"'],
            '\\' => vec!['\\', '\\'],
            other => vec![other],
        })
        .collect()
}

/// Boundary derived from the current time in milliseconds.
pub fn timestamp_boundary() -> String {
    format!("{}{}", BOUNDARY_PREFIX, chrono::Utc::now().timestamp_millis())
}

/// Accumulates parts of one multipart body.
#[derive(Debug)]
pub struct MultipartEncoder {
    boundary: String,
    buf: BytesMut,
}

impl MultipartEncoder {
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            buf: BytesMut::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    fn open_part(&mut self) {
        self.buf.put_slice(b"--");
        self.buf.put_slice(self.boundary.as_bytes());
        self.buf.put_slice(b"\r\n");
    }

    pub fn file_part(&mut self, field: &str, filename: &str, content_type: &str, data: &[u8]) {
        self.open_part();
        self.buf.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                header_value(field),
                header_value(filename)
            )
            .as_bytes(),
        );
        self.buf
            .put_slice(format!("Content-Type: {}\r\n\r\n", header_value(content_type)).as_bytes());
        self.buf.put_slice(data);
        self.buf.put_slice(b"\r\n");
    }

    pub fn text_part(&mut self, name: &str, value: &str) {
        self.open_part();
        self.buf.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                header_value(name)
            )
            .as_bytes(),
        );
        self.buf.put_slice(value.as_bytes());
        self.buf.put_slice(b"\r\n");
    }

    /// One text part per attribute, skipping nulls and `skip_field`.
    pub fn text_parts(&mut self, attrs: &Map<String, Value>, skip_field: &str) {
        for (key, value) in attrs {
            if key == skip_field || value.is_null() {
                continue;
            }
            self.text_part(key, &field_text(value));
        }
    }

    /// Closing boundary marker.
    pub fn finish(mut self) -> Payload {
        self.buf.put_slice(b"--");
        self.buf.put_slice(self.boundary.as_bytes());
        self.buf.put_slice(b"--\r\n");
        Payload {
            content_type: format!("multipart/form-data; boundary={}", self.boundary),
            body: self.buf.freeze(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use serde_json::json;

    #[test]
    fn test_timestamp_boundary_prefix() {
        let boundary = timestamp_boundary();
        assert!(boundary.starts_with(BOUNDARY_PREFIX));
        assert!(boundary[BOUNDARY_PREFIX.len()..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_header_values_are_escaped() {
        let mut encoder = MultipartEncoder::new("XYZ");
        encoder.file_part("path", "a\".png\r\nX-Injected: 1", "image/png\r\n", b"");
        encoder.text_part("cap\"tion", "v");
        let payload = encoder.finish();

        let text = String::from_utf8_lossy(&payload.body);
        assert!(text.contains("name=\"path\"; filename=\"a\\\".pngX-Injected: 1\"\r\n"));
        assert!(text.contains("Content-Type: image/png\r\n\r\n"));
        assert!(text.contains("name=\"cap\\\"tion\"\r\n"));
        assert!(!text.contains("\r\nX-Injected"));
    }

    #[test]
    fn test_full_body_layout() {
        let mut encoder = MultipartEncoder::new("XYZ");
        encoder.file_part("path", "a.txt", "text/plain", b"hello");
        let attrs = json!({ "caption": "Hi", "path": "ignored", "revision": 2, "gone": null });
        encoder.text_parts(attrs.as_object().unwrap(), "path");
        let payload = encoder.finish();

        assert_eq!(payload.content_type, "multipart/form-data; boundary=XYZ");
        let expected = concat!(
            "--XYZ\r\n",
            "Content-Disposition: form-data; name=\"path\"; filename=\"a.txt\"\r\n",
            "Content-Type: text/plain\r\n\r\n",
            "hello\r\n",
            "--XYZ\r\n",
            "Content-Disposition: form-data; name=\"caption\"\r\n\r\n",
            "Hi\r\n",
            "--XYZ\r\n",
            "Content-Disposition: form-data; name=\"revision\"\r\n\r\n",
            "2\r\n",
            "--XYZ--\r\n",
        );
        assert_eq!(payload.body, Bytes::from(expected));
    }
}
