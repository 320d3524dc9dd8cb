//! Index-based addresses into a [`crate::Document`].
//!
//! A column path can point at a top-level column or at one nested column
//! below it, never deeper.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnPath {
    pub section: usize,
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<usize>,
}

impl ColumnPath {
    pub fn top(section: usize, column: usize) -> Self {
        Self {
            section,
            column,
            nested: None,
        }
    }

    pub fn nested(section: usize, column: usize, nested: usize) -> Self {
        Self {
            section,
            column,
            nested: Some(nested),
        }
    }

    pub fn element(self, element: usize) -> ElementPath {
        ElementPath {
            column: self,
            element,
        }
    }
}

impl fmt::Display for ColumnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sections[{}].columns[{}]", self.section, self.column)?;
        if let Some(nested) = self.nested {
            write!(f, ".columns[{}]", nested)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementPath {
    #[serde(flatten)]
    pub column: ColumnPath,
    pub element: usize,
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.elements[{}]", self.column, self.element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ColumnPath::top(0, 1).to_string(), "sections[0].columns[1]");
        assert_eq!(
            ColumnPath::nested(2, 0, 1).element(3).to_string(),
            "sections[2].columns[0].columns[1].elements[3]"
        );
    }

    #[test]
    fn test_element_path_json_is_flat() {
        let path = ColumnPath::top(1, 2).element(0);
        let json = serde_json::to_value(path).unwrap();
        assert_eq!(json, serde_json::json!({ "section": 1, "column": 2, "element": 0 }));
    }
}
