//! # Image Upload Side-Channel
//!
//! Uploading runs outside the editor: [`upload_image`] only needs the
//! uploader, so the document stays editable while the request is in flight.
//! The result comes back as an [`UploadOutcome`] that
//! [`crate::PageEditor::complete_upload`] writes into the target element.
//!
//! Uploads are not coordinated with each other or with edits. A response
//! that arrives late overwrites whatever the element's `value` holds by then.

use std::path::Path;

use async_trait::async_trait;
use pagecraft_document::ElementPath;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::csrf::CSRF_HEADER;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} is not an image")]
    NotAnImage(String),

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("upload response did not contain a url")]
    MissingUrl,
}

/// Image file chosen for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Accepts only files whose extension maps to an image MIME type
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        let mime_type =
            image_mime_type(&file_name).ok_or_else(|| UploadError::NotAnImage(file_name.clone()))?;

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| UploadError::NotAnImage(path.display().to_string()))?;

        // Check the type before reading a possibly large non-image file
        if image_mime_type(&file_name).is_none() {
            return Err(UploadError::NotAnImage(file_name));
        }

        Self::new(file_name, std::fs::read(path)?)
    }
}

/// `image/*` MIME type for a file name, by extension
pub fn image_mime_type(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();

    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => return None,
    };

    Some(mime)
}

/// Pull the stored file's URL out of an upload response body
pub fn parse_upload_response(body: &str) -> Result<String, UploadError> {
    let value: Value = serde_json::from_str(body).map_err(|_| UploadError::MissingUrl)?;

    value
        .get("url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or(UploadError::MissingUrl)
}

/// Stores an image and returns its URL
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, file: &ImageFile) -> Result<String, UploadError>;
}

/// Multipart upload to an HTTP endpoint
pub struct HttpUploader {
    http: reqwest::Client,
    endpoint: String,
    csrf_token: Option<String>,
}

impl HttpUploader {
    pub fn new(endpoint: impl Into<String>, csrf_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            csrf_token,
        }
    }
}

#[async_trait]
impl ImageUploader for HttpUploader {
    async fn upload(&self, file: &ImageFile) -> Result<String, UploadError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(file.mime_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form);
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        debug!(endpoint = %self.endpoint, file = %file.file_name, "uploading image");
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(UploadError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let url = parse_upload_response(&body)?;
        info!(%url, "image uploaded");
        Ok(url)
    }
}

/// Finished upload, addressed to the element that requested it
#[derive(Debug)]
pub struct UploadOutcome {
    pub target: ElementPath,
    pub result: Result<String, UploadError>,
}

/// Upload one file for one element. Exactly one request; no retry.
pub async fn upload_image<U>(uploader: &U, target: ElementPath, file: ImageFile) -> UploadOutcome
where
    U: ImageUploader + ?Sized,
{
    let result = uploader.upload(&file).await;
    UploadOutcome { target, result }
}

/// Blocking user notification
pub trait Notifier {
    fn alert(&self, message: &str);
}
