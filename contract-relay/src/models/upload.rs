use axum::body::Bytes;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// The inbound `file` part, held in memory for the length of one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content_type: Option<String>,
    /// Number of bytes received; forwarded as the outbound part length.
    pub declared_size: u64,
    pub content: Bytes,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, content_type: Option<String>, content: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            declared_size: content.len() as u64,
            content,
        }
    }

    pub fn content_type_or_default(&self) -> &str {
        self.content_type
            .as_deref()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}
