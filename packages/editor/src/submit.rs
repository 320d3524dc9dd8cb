//! # Page Submit
//!
//! Sends the whole page record as one update request. No partial saves and
//! no version check against what the backend holds: the last submit wins.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::csrf::CSRF_HEADER;
use crate::record::StoredPage;

/// Validation messages per form field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages for one field, shown beneath its input
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("encode: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },
}

/// Client-side checks; only the title is required
pub fn validate(page: &StoredPage) -> Result<(), SubmitError> {
    let mut errors = FieldErrors::default();

    if page.title.trim().is_empty() {
        errors.add("title", "The title field is required.");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SubmitError::Validation(errors))
    }
}

#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, page: &StoredPage) -> Result<(), SubmitError>;
}

#[derive(Deserialize)]
struct ValidationBody {
    #[serde(default)]
    errors: FieldErrors,
}

/// `PUT {endpoint}/{id or slug}` with the page as JSON
pub struct HttpSubmitter {
    http: reqwest::Client,
    endpoint: String,
    csrf_token: Option<String>,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>, csrf_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            csrf_token,
        }
    }

    fn url_for(&self, page: &StoredPage) -> String {
        match page.id {
            Some(id) => format!("{}/{}", self.endpoint, id),
            None => format!("{}/{}", self.endpoint, page.slug),
        }
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, page: &StoredPage) -> Result<(), SubmitError> {
        let url = self.url_for(page);

        let mut request = self
            .http
            .put(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(page);
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        debug!(%url, "submitting page");
        let resp = request.send().await?;
        let status = resp.status();

        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            let body = resp.text().await.unwrap_or_default();
            let errors = serde_json::from_str::<ValidationBody>(&body)
                .map(|b| b.errors)
                .unwrap_or_default();
            return Err(SubmitError::Validation(errors));
        }

        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SubmitError::Server {
                status: status.as_u16(),
                message,
            });
        }

        info!(slug = %page.slug, "page saved");
        Ok(())
    }
}
