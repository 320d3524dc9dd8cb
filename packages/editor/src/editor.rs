//! # Page Editor
//!
//! Editing state for one page: the record's form fields, its document, and
//! the history of document edits.
//!
//! ## Lifecycle
//!
//! ```text
//! Open → Load → Edit (apply / undo / redo / upload) → Submit
//!   ↓      ↓                 ↓                          ↓
//! Stored  Document      new Document per edit       Stored
//! ```
//!
//! Every edit produces a whole new document and swaps it in at once; a
//! failed edit leaves the current document in place.

use std::path::Path;

use chrono::{DateTime, Utc};
use pagecraft_document::{Document, ElementPath, ElementType, ElementUpdate, IdGenerator, Mutation};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::record::{PageRecord, StoredPage};
use crate::submit::{validate, SubmitError, Submitter};
use crate::undo_stack::UndoStack;
use crate::upload::{ImageFile, Notifier, UploadOutcome};
use crate::EditorError;

#[derive(Debug)]
pub struct PageEditor {
    record: PageRecord,

    /// Current version number (increments on each change)
    pub version: u64,

    saved_version: u64,
    last_saved_at: Option<DateTime<Utc>>,
    history: UndoStack,
    ids: IdGenerator,
}

impl PageEditor {
    /// Open a stored page with a fresh id seed
    pub fn open(stored: StoredPage) -> Self {
        Self::with_ids(stored, IdGenerator::new())
    }

    pub fn with_ids(stored: StoredPage, mut ids: IdGenerator) -> Self {
        let record = PageRecord::from_stored(stored, &mut ids);

        Self {
            record,
            version: 0,
            saved_version: 0,
            last_saved_at: None,
            history: UndoStack::new(),
            ids,
        }
    }

    pub fn with_history_limit(mut self, levels: usize) -> Self {
        self.history = UndoStack::with_max_levels(levels);
        self
    }

    pub fn document(&self) -> &Document {
        &self.record.content
    }

    pub fn record(&self) -> &PageRecord {
        &self.record
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.record.title = title.into();
        self.version += 1;
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.record.slug = slug.into();
        self.version += 1;
    }

    pub fn set_published(&mut self, published: bool) {
        self.record.published = published;
        self.version += 1;
    }

    pub fn set_order(&mut self, order: i64) {
        self.record.order = order;
        self.version += 1;
    }

    /// Apply a mutation and record it for undo
    pub fn apply(&mut self, mutation: Mutation) -> Result<u64, EditorError> {
        let next = mutation.apply(&self.record.content, &mut self.ids)?;
        self.history
            .record(&self.record.content, Some(mutation.name().to_string()));
        self.replace(next);
        Ok(self.version)
    }

    /// Apply a string-keyed field update as sent by a form input
    pub fn update_field(&mut self, path: ElementPath, key: &str, value: &Value) -> Result<u64, EditorError> {
        let element = self
            .record
            .content
            .element(&path)
            .ok_or(EditorError::ElementNotFound(path))?;
        let update = ElementUpdate::from_field(element, key, value)?;

        self.apply(Mutation::UpdateElement { path, update })
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.record.content) {
            Some(doc) => {
                self.replace(doc);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.record.content) {
            Some(doc) => {
                self.replace(doc);
                true
            }
            None => false,
        }
    }

    /// Group the following edits into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    fn replace(&mut self, doc: Document) {
        self.record.content = doc;
        self.version += 1;
        debug!(version = self.version, "document replaced");
    }

    /// Check that `target` is an image element and read the file for it
    pub fn image_for_upload(&self, target: ElementPath, file: &Path) -> Result<ImageFile, EditorError> {
        let element = self
            .record
            .content
            .element(&target)
            .ok_or(EditorError::ElementNotFound(target))?;

        let element_type = element.element_type();
        if element_type != ElementType::Image {
            return Err(EditorError::NotAnImageElement {
                path: target,
                element_type,
            });
        }

        Ok(ImageFile::from_path(file)?)
    }

    /// Write a finished upload into its element.
    ///
    /// On failure the user is alerted and the document is left unchanged.
    /// Returns whether the element was updated.
    pub fn complete_upload(&mut self, outcome: UploadOutcome, notifier: &dyn Notifier) -> bool {
        let UploadOutcome { target, result } = outcome;

        let url = match result {
            Ok(url) => url,
            Err(err) => {
                error!(%err, %target, "image upload failed");
                notifier.alert(&format!("Image upload failed: {}", err));
                return false;
            }
        };

        let mutation = Mutation::UpdateElement {
            path: target,
            update: ElementUpdate::Value(url),
        };

        match self.apply(mutation) {
            Ok(_) => true,
            Err(err) => {
                // The element went away while the upload was in flight
                warn!(%err, %target, "uploaded image has no target");
                notifier.alert(&format!("Image upload failed: {}", err));
                false
            }
        }
    }

    /// Check if there are changes since the last successful submit
    pub fn is_dirty(&self) -> bool {
        self.version != self.saved_version
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    /// Validated submit payload for the current state
    pub fn prepare_submit(&self) -> Result<StoredPage, SubmitError> {
        let page = self.record.to_stored()?;
        validate(&page)?;
        Ok(page)
    }

    /// Mark `version` as persisted
    pub fn mark_saved(&mut self, version: u64) {
        self.saved_version = version;
        self.last_saved_at = Some(Utc::now());
    }

    /// Send the whole page; on success the editor is clean again
    pub async fn submit<S>(&mut self, submitter: &S) -> Result<(), EditorError>
    where
        S: Submitter + ?Sized,
    {
        let version = self.version;
        let page = self.prepare_submit()?;

        if let Err(err) = submitter.submit(&page).await {
            error!(%err, slug = %page.slug, "submit failed");
            return Err(err.into());
        }

        self.mark_saved(version);
        Ok(())
    }
}
