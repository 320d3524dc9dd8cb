//! Error types for the editor

use pagecraft_document::{ElementPath, ElementType, MutationError};
use thiserror::Error;

use crate::submit::SubmitError;
use crate::upload::UploadError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Element not found: {0}")]
    ElementNotFound(ElementPath),

    #[error("{path} is a {element_type} element, not an image")]
    NotAnImageElement {
        path: ElementPath,
        element_type: ElementType,
    },

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Submit error: {0}")]
    Submit(#[from] SubmitError),
}
