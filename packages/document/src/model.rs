//! # Page Document Model
//!
//! The canonical tree a page is composed of:
//!
//! ```text
//! Document
//!   └─ Section (layout, background, container)
//!        └─ Column (widths per breakpoint, card flag, spacing)
//!             ├─ Element (heading | text | image | card | list)
//!             └─ Column (optional, one nesting level)
//!                  └─ Element
//! ```
//!
//! Children are stored behind `Arc`. Cloning a document is cheap and the
//! clone shares every node with the original; mutations copy only the nodes
//! on the path they touch (see [`crate::mutations`]).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::path::{ColumnPath, ElementPath};

pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_GRADIENT_TO: &str = "#e5e7eb";
pub const DEFAULT_GRADIENT_ANGLE: u16 = 90;
pub const DEFAULT_MAX_WIDTH: &str = "max-w-7xl";
pub const DEFAULT_PADDING_X: u16 = 16;
pub const DEFAULT_PADDING_Y: u16 = 32;

pub const TEXT_BLACK: &str = "#000000";
pub const TEXT_GRAY: &str = "#4b5563";

pub const MIN_WIDTH: u8 = 1;
pub const MAX_WIDTH: u8 = 12;

/// Root of a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub sections: Vec<Arc<Section>>,
}

/// Top-level horizontal band of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub layout: String,
    pub background: Background,
    pub container: Container,
    #[serde(default)]
    pub columns: Vec<Arc<Column>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    Solid,
    Gradient,
}

/// Section background: a solid color or a two-color gradient.
///
/// Both sets of fields are always carried so switching `kind` back and forth
/// does not lose the values entered for the other mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    #[serde(rename = "type", default)]
    pub kind: BackgroundKind,
    #[serde(default = "default_background_color")]
    pub color: String,
    #[serde(default = "default_background_color")]
    pub gradient_from: String,
    #[serde(default = "default_gradient_to")]
    pub gradient_to: String,
    #[serde(default = "default_gradient_angle")]
    pub gradient_angle: u16,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Solid,
            color: default_background_color(),
            gradient_from: default_background_color(),
            gradient_to: default_gradient_to(),
            gradient_angle: DEFAULT_GRADIENT_ANGLE,
        }
    }
}

fn default_background_color() -> String {
    DEFAULT_BACKGROUND_COLOR.to_string()
}

fn default_gradient_to() -> String {
    DEFAULT_GRADIENT_TO.to_string()
}

fn default_gradient_angle() -> u16 {
    DEFAULT_GRADIENT_ANGLE
}

/// Inner content box of a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default = "default_max_width")]
    pub max_width: String,
    #[serde(default = "default_padding_x")]
    pub padding_x: u16,
    #[serde(default = "default_padding_y")]
    pub padding_y: u16,

    /// Per-side overrides of `padding_x` / `padding_y`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<u16>,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            padding_x: DEFAULT_PADDING_X,
            padding_y: DEFAULT_PADDING_Y,
            padding_top: None,
            padding_right: None,
            padding_bottom: None,
            padding_left: None,
        }
    }
}

fn default_max_width() -> String {
    DEFAULT_MAX_WIDTH.to_string()
}

fn default_padding_x() -> u16 {
    DEFAULT_PADDING_X
}

fn default_padding_y() -> u16 {
    DEFAULT_PADDING_Y
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Margin or padding values per side. `None` means unset (auto).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
}

impl Spacing {
    pub fn is_unset(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }

    pub fn get(&self, side: Side) -> Option<&str> {
        match side {
            Side::Top => self.top.as_deref(),
            Side::Right => self.right.as_deref(),
            Side::Bottom => self.bottom.as_deref(),
            Side::Left => self.left.as_deref(),
        }
    }

    pub fn set(&mut self, side: Side, value: Option<String>) {
        let slot = match side {
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
        };
        *slot = value;
    }
}

/// Layout slot within a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub width: u8,
    pub width_tablet: u8,
    pub width_mobile: u8,
    pub card: bool,
    #[serde(default, skip_serializing_if = "Spacing::is_unset")]
    pub margin: Spacing,
    #[serde(default, skip_serializing_if = "Spacing::is_unset")]
    pub padding: Spacing,
    #[serde(default)]
    pub elements: Vec<Arc<Element>>,

    /// Nested columns. Only one level is addressable by [`ColumnPath`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Arc<Column>>>,
}

impl Column {
    /// Fresh column: tablet and mobile widths span the full row.
    pub fn new(id: String, width: u8) -> Self {
        Self {
            id,
            width,
            width_tablet: MAX_WIDTH,
            width_mobile: MAX_WIDTH,
            card: false,
            margin: Spacing::default(),
            padding: Spacing::default(),
            elements: Vec::new(),
            columns: None,
        }
    }

    pub fn width_at(&self, breakpoint: Breakpoint) -> u8 {
        match breakpoint {
            Breakpoint::Desktop => self.width,
            Breakpoint::Tablet => self.width_tablet,
            Breakpoint::Mobile => self.width_mobile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Desktop,
    Tablet,
    Mobile,
}

impl FromStr for Breakpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" | "width" => Ok(Breakpoint::Desktop),
            "tablet" | "widthTablet" => Ok(Breakpoint::Tablet),
            "mobile" | "widthMobile" => Ok(Breakpoint::Mobile),
            other => Err(format!("unknown breakpoint: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

/// Styling fields shared by every element variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    #[serde(default, skip_serializing_if = "Spacing::is_unset")]
    pub margin: Spacing,
    #[serde(default, skip_serializing_if = "Spacing::is_unset")]
    pub padding: Spacing,
}

/// Leaf content unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,

    /// Text for heading/text/card, URL for image; unused by lists.
    #[serde(default)]
    pub value: String,

    #[serde(flatten)]
    pub style: ElementStyle,

    #[serde(flatten)]
    pub kind: ElementKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Heading,
    Text,
    Image(ImageProps),
    Card(CardProps),
    List(ListProps),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProps {
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default = "default_card_radius")]
    pub border_radius: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Default for CardProps {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            border_radius: default_card_radius(),
            href: None,
            target: None,
        }
    }
}

fn default_card_radius() -> String {
    "8px".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    #[default]
    Bullet,
    Numbered,
    Checklist,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProps {
    #[serde(default)]
    pub list_kind: ListKind,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Variant selector used when creating elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Heading,
    Text,
    Image,
    Card,
    List,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Heading => "heading",
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Card => "card",
            ElementType::List => "list",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heading" => Ok(ElementType::Heading),
            "text" => Ok(ElementType::Text),
            "image" => Ok(ElementType::Image),
            "card" => Ok(ElementType::Card),
            "list" => Ok(ElementType::List),
            other => Err(format!("unknown element type: {}", other)),
        }
    }
}

pub const LIST_PLACEHOLDER_ITEMS: [&str; 3] = ["Item 1", "Item 2", "Item 3"];

impl Element {
    /// New element with the defaults for its variant
    pub fn new(id: String, element_type: ElementType) -> Self {
        let (value, style, kind) = match element_type {
            ElementType::Heading => (
                "Heading".to_string(),
                ElementStyle {
                    color: Some(TEXT_BLACK.to_string()),
                    font_size: Some("text-3xl".to_string()),
                    font_weight: Some("bold".to_string()),
                    ..Default::default()
                },
                ElementKind::Heading,
            ),
            ElementType::Text => (
                "Text".to_string(),
                body_style(TEXT_GRAY),
                ElementKind::Text,
            ),
            ElementType::Image => (
                String::new(),
                body_style(TEXT_GRAY),
                ElementKind::Image(ImageProps {
                    width: Some("100%".to_string()),
                    object_fit: Some("cover".to_string()),
                    ..Default::default()
                }),
            ),
            ElementType::Card => (
                "Card content".to_string(),
                body_style(TEXT_BLACK),
                ElementKind::Card(CardProps::default()),
            ),
            ElementType::List => (
                String::new(),
                body_style(TEXT_GRAY),
                ElementKind::List(ListProps {
                    list_kind: ListKind::Bullet,
                    items: LIST_PLACEHOLDER_ITEMS.iter().map(|s| s.to_string()).collect(),
                }),
            ),
        };

        Self { id, value, style, kind }
    }

    /// Plain text element holding `value` verbatim
    pub fn text(id: String, value: impl Into<String>) -> Self {
        let mut element = Self::new(id, ElementType::Text);
        element.value = value.into();
        element
    }

    pub fn element_type(&self) -> ElementType {
        match self.kind {
            ElementKind::Heading => ElementType::Heading,
            ElementKind::Text => ElementType::Text,
            ElementKind::Image(_) => ElementType::Image,
            ElementKind::Card(_) => ElementType::Card,
            ElementKind::List(_) => ElementType::List,
        }
    }

    pub fn items(&self) -> Option<&[String]> {
        match &self.kind {
            ElementKind::List(list) => Some(&list.items),
            _ => None,
        }
    }
}

fn body_style(color: &str) -> ElementStyle {
    ElementStyle {
        color: Some(color.to_string()),
        font_size: Some("text-base".to_string()),
        ..Default::default()
    }
}

impl Section {
    pub fn new(id: String, layout: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            id,
            layout: layout.into(),
            background: Background::default(),
            container: Container::default(),
            columns: columns.into_iter().map(Arc::new).collect(),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index).map(|s| s.as_ref())
    }

    pub fn column(&self, path: &ColumnPath) -> Option<&Column> {
        let column = self.section(path.section)?.columns.get(path.column)?;
        match path.nested {
            None => Some(column),
            Some(nested) => column.columns.as_ref()?.get(nested).map(|c| c.as_ref()),
        }
    }

    pub fn element(&self, path: &ElementPath) -> Option<&Element> {
        self.column(&path.column)?
            .elements
            .get(path.element)
            .map(|e| e.as_ref())
    }
}
