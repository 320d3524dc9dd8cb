//! # Page History
//!
//! Whole-document snapshots for undo and redo.
//!
//! Each edit records the document it replaces. Undo hands that snapshot
//! back and keeps the current document for redo; a fresh edit drops the
//! redo side. A batch records only the state before its first edit, so the
//! whole batch undoes in one step.
//!
//! Snapshots are cheap: documents share every node an edit did not touch.

use pagecraft_document::Document;

/// A document state that undo/redo can return to
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub document: Document,

    /// Optional description of the edit that left this state
    pub description: Option<String>,
}

/// Edits grouped under one undo step
#[derive(Debug, Default)]
struct Batch {
    description: Option<String>,

    /// State before the batch's first edit
    before: Option<HistoryEntry>,
}

/// Snapshot history of one editing session
#[derive(Debug)]
pub struct UndoStack {
    /// States replaced by applied edits, oldest first
    undo_stack: Vec<HistoryEntry>,

    /// States left by undo, oldest first
    redo_stack: Vec<HistoryEntry>,

    /// Oldest states are dropped past this many (0 keeps all)
    max_levels: usize,

    current_batch: Option<Batch>,
}

impl UndoStack {
    /// Keeps 100 levels
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record the state an edit is about to replace
    pub fn record(&mut self, previous: &Document, description: Option<String>) {
        let entry = HistoryEntry {
            document: previous.clone(),
            description,
        };

        match &mut self.current_batch {
            // A batch only keeps the state from before its first edit
            Some(batch) => {
                if batch.before.is_none() {
                    batch.before = Some(entry);
                }
            }
            None => self.push_entry(entry),
        }
    }

    /// Following edits undo as one step until [`UndoStack::end_batch`]
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(Batch::default());
    }

    /// Close the batch; an empty batch leaves no undo step
    pub fn end_batch(&mut self) {
        let Some(batch) = self.current_batch.take() else {
            return;
        };

        if let Some(mut entry) = batch.before {
            if batch.description.is_some() {
                entry.description = batch.description;
            }
            self.push_entry(entry);
        }
    }

    /// Name the open batch; ignored outside a batch
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // Redo only follows undo
        self.redo_stack.clear();
    }

    /// Step back. Returns the document to restore, if any.
    pub fn undo(&mut self, current: &Document) -> Option<Document> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(HistoryEntry {
            document: current.clone(),
            description: entry.description.clone(),
        });
        Some(entry.document)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: &Document) -> Option<Document> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(HistoryEntry {
            document: current.clone(),
            description: entry.description.clone(),
        });
        Some(entry.document)
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
