use crate::model::*;

/// Visitor pattern for traversing a page document
///
/// Default implementations walk the entire tree, nested columns included.
/// Override specific visit_* methods to act on nodes. Nodes are borrowed for
/// `'doc`, so a visitor may keep references into the document.
pub trait Visitor<'doc>: Sized {
    fn visit_document(&mut self, doc: &'doc Document) {
        walk_document(self, doc);
    }

    fn visit_section(&mut self, section: &'doc Section) {
        walk_section(self, section);
    }

    fn visit_column(&mut self, column: &'doc Column, depth: usize) {
        walk_column(self, column, depth);
    }

    fn visit_element(&mut self, _element: &'doc Element) {
        // Leaf node, no children to walk
    }
}

pub fn walk_document<'doc, V: Visitor<'doc>>(visitor: &mut V, doc: &'doc Document) {
    for section in &doc.sections {
        visitor.visit_section(section);
    }
}

pub fn walk_section<'doc, V: Visitor<'doc>>(visitor: &mut V, section: &'doc Section) {
    for column in &section.columns {
        visitor.visit_column(column, 0);
    }
}

pub fn walk_column<'doc, V: Visitor<'doc>>(visitor: &mut V, column: &'doc Column, depth: usize) {
    for element in &column.elements {
        visitor.visit_element(element);
    }

    if let Some(nested) = &column.columns {
        for child in nested {
            visitor.visit_column(child, depth + 1);
        }
    }
}

/// Node counts for a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub sections: usize,
    pub columns: usize,
    pub nested_columns: usize,
    pub elements: usize,
    pub images: usize,
}

impl<'doc> Visitor<'doc> for DocumentStats {
    fn visit_section(&mut self, section: &'doc Section) {
        self.sections += 1;
        walk_section(self, section);
    }

    fn visit_column(&mut self, column: &'doc Column, depth: usize) {
        if depth == 0 {
            self.columns += 1;
        } else {
            self.nested_columns += 1;
        }
        walk_column(self, column, depth);
    }

    fn visit_element(&mut self, element: &'doc Element) {
        self.elements += 1;
        if element.element_type() == ElementType::Image {
            self.images += 1;
        }
    }
}

/// Collects non-empty image sources
#[derive(Default)]
struct ImageUrls<'doc> {
    urls: Vec<&'doc str>,
}

impl<'doc> Visitor<'doc> for ImageUrls<'doc> {
    fn visit_element(&mut self, element: &'doc Element) {
        if element.element_type() == ElementType::Image && !element.value.is_empty() {
            self.urls.push(&element.value);
        }
    }
}

impl Document {
    pub fn stats(&self) -> DocumentStats {
        let mut stats = DocumentStats::default();
        stats.visit_document(self);
        stats
    }

    /// Non-empty image sources, in document order
    pub fn image_urls(&self) -> Vec<&str> {
        let mut collector = ImageUrls::default();
        collector.visit_document(self);
        collector.urls
    }
}
