//! Layout templates: named presets of column desktop widths.

use serde::Serialize;

pub const DEFAULT_LAYOUT: &str = "full-width";

const FALLBACK_WIDTHS: &[u8] = &[12];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutTemplate {
    pub key: &'static str,
    pub label: &'static str,
    pub widths: &'static [u8],
}

pub const LAYOUTS: &[LayoutTemplate] = &[
    LayoutTemplate {
        key: "full-width",
        label: "Full width",
        widths: &[12],
    },
    LayoutTemplate {
        key: "2-equal",
        label: "Two equal columns",
        widths: &[6, 6],
    },
    LayoutTemplate {
        key: "3-equal",
        label: "Three equal columns",
        widths: &[4, 4, 4],
    },
    LayoutTemplate {
        key: "4-equal",
        label: "Four equal columns",
        widths: &[3, 3, 3, 3],
    },
    LayoutTemplate {
        key: "2-sidebar-left",
        label: "Sidebar left",
        widths: &[4, 8],
    },
    LayoutTemplate {
        key: "2-sidebar-right",
        label: "Sidebar right",
        widths: &[8, 4],
    },
    LayoutTemplate {
        key: "3-wide-center",
        label: "Wide center",
        widths: &[3, 6, 3],
    },
];

pub fn template(key: &str) -> Option<&'static LayoutTemplate> {
    LAYOUTS.iter().find(|t| t.key == key)
}

/// Desktop widths for a layout key; unknown keys get one full-width column.
pub fn column_widths(key: &str) -> &'static [u8] {
    template(key).map(|t| t.widths).unwrap_or(FALLBACK_WIDTHS)
}
