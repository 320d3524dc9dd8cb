//! # Pagecraft Editor
//!
//! Editing session for one page on top of `pagecraft-document`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ StoredPage (backend record, content string) │
//! └─────────────────────────────────────────────┘
//!                     ↓ load
//! ┌─────────────────────────────────────────────┐
//! │ PageEditor                                  │
//! │  - apply mutations (atomic replace)         │
//! │  - undo/redo snapshots                      │
//! │  - complete image uploads                   │
//! └─────────────────────────────────────────────┘
//!        ↑ UploadOutcome           ↓ StoredPage
//! ┌────────────────────┐   ┌────────────────────┐
//! │ ImageUploader      │   │ Submitter          │
//! │ (multipart + CSRF) │   │ (PUT page + CSRF)  │
//! └────────────────────┘   └────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{upload_image, HttpSubmitter, HttpUploader, ImageFile, PageEditor};
//!
//! let mut editor = PageEditor::open(stored);
//! editor.apply(Mutation::AddSection { layout: "2-equal".into() })?;
//!
//! // Upload without holding the editor
//! let uploader = HttpUploader::new(upload_url, csrf_token.clone());
//! let outcome = upload_image(&uploader, target, ImageFile::from_path(&path)?).await;
//! editor.complete_upload(outcome, &notifier);
//!
//! editor.submit(&HttpSubmitter::new(submit_url, csrf_token)).await?;
//! ```

mod csrf;
mod editor;
mod errors;
mod record;
mod submit;
mod undo_stack;
mod upload;

pub use csrf::{csrf_token_from_meta, CSRF_HEADER};
pub use editor::PageEditor;
pub use errors::EditorError;
pub use record::{PageRecord, StoredPage};
pub use submit::{validate, FieldErrors, HttpSubmitter, SubmitError, Submitter};
pub use undo_stack::{HistoryEntry, UndoStack};
pub use upload::{
    image_mime_type, parse_upload_response, upload_image, HttpUploader, ImageFile, ImageUploader,
    Notifier, UploadError, UploadOutcome,
};

// Re-export the document crate for convenience
pub use pagecraft_document as document;
