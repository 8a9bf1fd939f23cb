//! Image uploads written to local disk and served as static files.

use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::StoredFile;

/// 5 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// URL path the upload directory is served under.
pub const UPLOADS_ROUTE: &str = "/public/uploads";

/// Stem used when the client's file name has nothing usable left.
const FALLBACK_STEM: &str = "image";

/// Names tried per upload before giving up on a free one.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// File extension for an accepted image MIME type.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type.trim().to_ascii_lowercase().as_str() {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpeg"),
        "image/jpg" => Some("jpg"),
        _ => None,
    }
}

/// `<stem>-<millis>.<ext>`, where `stem` is the client's name without its
/// extension, whitespace turned into `-` and anything outside
/// `[A-Za-z0-9._-]` dropped. Leading dots are stripped so no hidden files
/// are created. A non-zero `attempt` becomes a `-<attempt>` suffix after the
/// timestamp.
pub fn stored_file_name(original: &str, extension: &str, millis: i64, attempt: u32) -> String {
    // Browsers on Windows send full paths
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let stem = match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    };

    let sanitized: String = stem
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let sanitized = sanitized.trim_start_matches('.');

    let stem = if sanitized.is_empty() {
        FALLBACK_STEM
    } else {
        sanitized
    };
    match attempt {
        0 => format!("{stem}-{millis}.{extension}"),
        n => format!("{stem}-{millis}-{n}.{extension}"),
    }
}

/// An image part read from the request and checked, not yet written.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    file_name: String,
    extension: &'static str,
    bytes: Vec<u8>,
}

impl PendingUpload {
    /// Check the MIME type before any bytes are read.
    pub fn new(file_name: Option<&str>, content_type: Option<&str>) -> ProductResult<Self> {
        let content_type = content_type.unwrap_or_default();
        let extension = extension_for(content_type)
            .ok_or_else(|| ProductError::UnsupportedMediaType(content_type.to_string()))?;

        Ok(Self {
            file_name: file_name.unwrap_or_default().to_string(),
            extension,
            bytes: Vec::new(),
        })
    }

    pub fn with_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.bytes = bytes.into();
        self
    }
}

/// Writes accepted images into the upload directory.
#[derive(Debug, Clone)]
pub struct UploadSink {
    dir: PathBuf,
    public_url: String,
    max_bytes: usize,
}

impl UploadSink {
    /// `public_url` is the externally visible origin, e.g. `http://localhost:8080`.
    pub fn new(dir: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Request body limit for upload routes.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Create the directory tree if it is missing.
    pub async fn ensure_dir(&self) -> ProductResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}{}/{}", self.public_url, UPLOADS_ROUTE, file_name)
    }

    /// Persist one checked image. Existing files are never overwritten; a
    /// taken name is retried with a counter suffix.
    #[instrument(skip(self, upload), fields(original = %upload.file_name, size = upload.bytes.len()))]
    pub async fn store(&self, upload: PendingUpload) -> ProductResult<StoredFile> {
        let millis = Utc::now().timestamp_millis();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = stored_file_name(&upload.file_name, upload.extension, millis, attempt);
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&file_name))
                .await;

            let mut file = match opened {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            file.write_all(&upload.bytes).await?;
            file.flush().await?;
            tracing::info!(file_name = %file_name, "Image stored");

            return Ok(StoredFile {
                url: self.url_for(&file_name),
                file_name,
            });
        }

        Err(ProductError::Storage(format!(
            "no free file name for {}",
            upload.file_name
        )))
    }

    /// Persist several images in order.
    pub async fn store_all(&self, uploads: Vec<PendingUpload>) -> ProductResult<Vec<StoredFile>> {
        let mut stored = Vec::with_capacity(uploads.len());
        for upload in uploads {
            stored.push(self.store(upload).await?);
        }
        Ok(stored)
    }
}
