//! # Pagecraft Document
//!
//! Page layout document model and the pure operations over it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ loader: stored content (any shape) → Doc    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutations: Doc + Mutation → new Doc         │
//! │  - index-addressed (ColumnPath/ElementPath) │
//! │  - structural sharing via Arc               │
//! │  - typed field updates per element variant  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ serde: Doc → JSON payload                   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_document::{load, ColumnPath, ElementType, IdGenerator, Mutation};
//!
//! let mut ids = IdGenerator::new();
//! let doc = load(Some("hello"), &mut ids);
//!
//! let doc = Mutation::AddElement {
//!     column: ColumnPath::top(0, 0),
//!     element_type: ElementType::Heading,
//! }
//! .apply(&doc, &mut ids)
//! .unwrap();
//!
//! assert_eq!(doc.sections[0].columns[0].elements.len(), 2);
//! ```

mod fields;
mod id_generator;
mod layout;
mod loader;
mod model;
mod mutations;
mod path;
mod visitor;

pub use fields::{BackgroundField, ContainerField, ElementUpdate, SpacingKey, SpacingTarget};
pub use id_generator::IdGenerator;
pub use layout::{column_widths, template, LayoutTemplate, DEFAULT_LAYOUT, LAYOUTS};
pub use loader::{load, load_value};
pub use model::*;
pub use mutations::{Mutation, MutationError, NEW_COLUMN_WIDTH, NEW_LIST_ITEM};
pub use path::{ColumnPath, ElementPath};
pub use visitor::{walk_column, walk_document, walk_section, DocumentStats, Visitor};
