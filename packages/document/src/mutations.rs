//! # Document Mutations
//!
//! Index-addressed edit operations on a page document.
//!
//! ## Semantics
//!
//! - `apply` never touches its input. It returns a new document that shares
//!   every node off the edited path with the old one, so callers replace
//!   their state in one step.
//! - Removing a node removes it and its subtree, nothing else.
//! - Ordering of sections, columns, elements and list items is preserved
//!   except where a move explicitly changes it.
//! - Bad indices, widths outside 1..=12 and fields the element variant does
//!   not own are reported as errors; the document is left as it was.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::fields::{BackgroundField, ContainerField, ElementUpdate, SpacingKey};
use crate::id_generator::IdGenerator;
use crate::layout::column_widths;
use crate::model::{
    Breakpoint, Column, Document, Element, ElementType, Section, MAX_WIDTH, MIN_WIDTH,
};
use crate::path::{ColumnPath, ElementPath};

/// Width given to columns added by hand
pub const NEW_COLUMN_WIDTH: u8 = 6;

/// Text given to list items appended by hand
pub const NEW_LIST_ITEM: &str = "New item";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a section with one column per width of the layout template
    AddSection { layout: String },

    RemoveSection { section: usize },

    MoveSection { section: usize, to: usize },

    SetBackground { section: usize, field: BackgroundField },

    SetContainer { section: usize, field: ContainerField },

    /// Append a column to a section, or to the nested list of column `parent`
    AddColumn {
        section: usize,
        #[serde(default)]
        parent: Option<usize>,
    },

    RemoveColumn { path: ColumnPath },

    MoveColumn { path: ColumnPath, to: usize },

    SetColumnWidth {
        path: ColumnPath,
        breakpoint: Breakpoint,
        width: u8,
    },

    SetColumnSpacing {
        path: ColumnPath,
        key: SpacingKey,
        value: Option<String>,
    },

    ToggleCard { path: ColumnPath },

    AddElement {
        column: ColumnPath,
        element_type: ElementType,
    },

    RemoveElement { path: ElementPath },

    MoveElement { path: ElementPath, to: usize },

    UpdateElement { path: ElementPath, update: ElementUpdate },

    UpdateListItem {
        path: ElementPath,
        item: usize,
        text: String,
    },

    RemoveListItem { path: ElementPath, item: usize },

    AppendListItem { path: ElementPath },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Column {0} has no nested columns")]
    NoNestedColumns(String),

    #[error("Width {0} outside 1..=12")]
    WidthOutOfRange(u8),

    #[error("Field {field} does not exist on {element_type} elements")]
    FieldNotOnVariant {
        field: &'static str,
        element_type: ElementType,
    },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl Mutation {
    /// Apply to a copy of `doc` and return the copy
    pub fn apply(&self, doc: &Document, ids: &mut IdGenerator) -> Result<Document, MutationError> {
        let mut next = doc.clone();

        match self {
            Mutation::AddSection { layout } => {
                let columns = column_widths(layout)
                    .iter()
                    .map(|width| Column::new(ids.new_id(), *width))
                    .collect();
                next.sections
                    .push(Arc::new(Section::new(ids.new_id(), layout.clone(), columns)));
            }

            Mutation::RemoveSection { section } => {
                remove_at(&mut next.sections, *section, "section")?;
            }

            Mutation::MoveSection { section, to } => {
                move_within(&mut next.sections, *section, *to, "section")?;
            }

            Mutation::SetBackground { section, field } => {
                field.apply(&mut section_mut(&mut next, *section)?.background);
            }

            Mutation::SetContainer { section, field } => {
                field.apply(&mut section_mut(&mut next, *section)?.container);
            }

            Mutation::AddColumn { section, parent } => {
                let columns = column_list_mut(&mut next, *section, *parent, true)?;
                columns.push(Arc::new(Column::new(ids.new_id(), NEW_COLUMN_WIDTH)));
            }

            Mutation::RemoveColumn { path } => {
                let (parent, index) = split_column_path(path);
                let columns = column_list_mut(&mut next, path.section, parent, false)?;
                remove_at(columns, index, "column")?;
            }

            Mutation::MoveColumn { path, to } => {
                let (parent, index) = split_column_path(path);
                let columns = column_list_mut(&mut next, path.section, parent, false)?;
                move_within(columns, index, *to, "column")?;
            }

            Mutation::SetColumnWidth { path, breakpoint, width } => {
                if !(MIN_WIDTH..=MAX_WIDTH).contains(width) {
                    return Err(MutationError::WidthOutOfRange(*width));
                }
                let column = column_mut(&mut next, path)?;
                match breakpoint {
                    Breakpoint::Desktop => column.width = *width,
                    Breakpoint::Tablet => column.width_tablet = *width,
                    Breakpoint::Mobile => column.width_mobile = *width,
                }
            }

            Mutation::SetColumnSpacing { path, key, value } => {
                let column = column_mut(&mut next, path)?;
                key.apply(&mut column.margin, &mut column.padding, value.clone());
            }

            Mutation::ToggleCard { path } => {
                let column = column_mut(&mut next, path)?;
                column.card = !column.card;
            }

            Mutation::AddElement { column, element_type } => {
                let column = column_mut(&mut next, column)?;
                column
                    .elements
                    .push(Arc::new(Element::new(ids.new_id(), *element_type)));
            }

            Mutation::RemoveElement { path } => {
                let column = column_mut(&mut next, &path.column)?;
                remove_at(&mut column.elements, path.element, "element")?;
            }

            Mutation::MoveElement { path, to } => {
                let column = column_mut(&mut next, &path.column)?;
                move_within(&mut column.elements, path.element, *to, "element")?;
            }

            Mutation::UpdateElement { path, update } => {
                update.apply(element_mut(&mut next, path)?)?;
            }

            Mutation::UpdateListItem { path, item, text } => {
                let element = element_mut(&mut next, path)?;
                let mut items = list_items(element)?;
                let len = items.len();
                let slot = items.get_mut(*item).ok_or(MutationError::IndexOutOfRange {
                    kind: "list item",
                    index: *item,
                    len,
                })?;
                *slot = text.clone();
                ElementUpdate::Items(items).apply(element)?;
            }

            Mutation::RemoveListItem { path, item } => {
                let element = element_mut(&mut next, path)?;
                let mut items = list_items(element)?;
                check_index(*item, items.len(), "list item")?;
                items.remove(*item);
                ElementUpdate::Items(items).apply(element)?;
            }

            Mutation::AppendListItem { path } => {
                let element = element_mut(&mut next, path)?;
                let mut items = list_items(element)?;
                items.push(NEW_LIST_ITEM.to_string());
                ElementUpdate::Items(items).apply(element)?;
            }
        }

        debug!(mutation = self.name(), sections = next.sections.len(), "applied mutation");
        Ok(next)
    }

    /// Debug name
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddSection { .. } => "AddSection",
            Mutation::RemoveSection { .. } => "RemoveSection",
            Mutation::MoveSection { .. } => "MoveSection",
            Mutation::SetBackground { .. } => "SetBackground",
            Mutation::SetContainer { .. } => "SetContainer",
            Mutation::AddColumn { .. } => "AddColumn",
            Mutation::RemoveColumn { .. } => "RemoveColumn",
            Mutation::MoveColumn { .. } => "MoveColumn",
            Mutation::SetColumnWidth { .. } => "SetColumnWidth",
            Mutation::SetColumnSpacing { .. } => "SetColumnSpacing",
            Mutation::ToggleCard { .. } => "ToggleCard",
            Mutation::AddElement { .. } => "AddElement",
            Mutation::RemoveElement { .. } => "RemoveElement",
            Mutation::MoveElement { .. } => "MoveElement",
            Mutation::UpdateElement { .. } => "UpdateElement",
            Mutation::UpdateListItem { .. } => "UpdateListItem",
            Mutation::RemoveListItem { .. } => "RemoveListItem",
            Mutation::AppendListItem { .. } => "AppendListItem",
        }
    }
}

fn check_index(index: usize, len: usize, kind: &'static str) -> Result<(), MutationError> {
    if index < len {
        Ok(())
    } else {
        Err(MutationError::IndexOutOfRange { kind, index, len })
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize, kind: &'static str) -> Result<T, MutationError> {
    check_index(index, items.len(), kind)?;
    Ok(items.remove(index))
}

fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize, kind: &'static str) -> Result<(), MutationError> {
    check_index(to, items.len(), kind)?;
    let item = remove_at(items, from, kind)?;
    items.insert(to, item);
    Ok(())
}

fn section_mut(doc: &mut Document, index: usize) -> Result<&mut Section, MutationError> {
    let len = doc.sections.len();
    doc.sections
        .get_mut(index)
        .map(Arc::make_mut)
        .ok_or(MutationError::IndexOutOfRange {
            kind: "section",
            index,
            len,
        })
}

/// Parent list and index of the addressed column
fn split_column_path(path: &ColumnPath) -> (Option<usize>, usize) {
    match path.nested {
        None => (None, path.column),
        Some(nested) => (Some(path.column), nested),
    }
}

/// Column list of a section, or the nested list of one of its columns.
/// With `create`, a missing nested list is started empty.
fn column_list_mut(
    doc: &mut Document,
    section: usize,
    parent: Option<usize>,
    create: bool,
) -> Result<&mut Vec<Arc<Column>>, MutationError> {
    let section = section_mut(doc, section)?;

    let Some(parent) = parent else {
        return Ok(&mut section.columns);
    };

    let len = section.columns.len();
    let column = section
        .columns
        .get_mut(parent)
        .map(Arc::make_mut)
        .ok_or(MutationError::IndexOutOfRange {
            kind: "column",
            index: parent,
            len,
        })?;

    if create {
        return Ok(column.columns.get_or_insert_with(Vec::new));
    }

    let id = column.id.clone();
    column
        .columns
        .as_mut()
        .ok_or(MutationError::NoNestedColumns(id))
}

fn column_mut<'a>(doc: &'a mut Document, path: &ColumnPath) -> Result<&'a mut Column, MutationError> {
    let (parent, index) = split_column_path(path);
    let columns = column_list_mut(doc, path.section, parent, false)?;
    let len = columns.len();
    columns
        .get_mut(index)
        .map(Arc::make_mut)
        .ok_or(MutationError::IndexOutOfRange {
            kind: "column",
            index,
            len,
        })
}

fn element_mut<'a>(doc: &'a mut Document, path: &ElementPath) -> Result<&'a mut Element, MutationError> {
    let column = column_mut(doc, &path.column)?;
    let len = column.elements.len();
    column
        .elements
        .get_mut(path.element)
        .map(Arc::make_mut)
        .ok_or(MutationError::IndexOutOfRange {
            kind: "element",
            index: path.element,
            len,
        })
}

fn list_items(element: &Element) -> Result<Vec<String>, MutationError> {
    element
        .items()
        .map(<[String]>::to_vec)
        .ok_or(MutationError::FieldNotOnVariant {
            field: "items",
            element_type: element.element_type(),
        })
}
