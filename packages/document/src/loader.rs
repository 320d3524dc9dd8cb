//! # Content Loader
//!
//! Turns whatever the backend has stored for a page into a canonical
//! [`Document`]. Accepted inputs:
//!
//! - nothing / empty string → empty document
//! - `{"sections": [...]}` → canonical, gaps back-filled
//! - `{"rows": [...]}` → legacy rows, each becomes a `full-width` section
//! - any other JSON → empty document
//! - text that is not JSON → one section, one column, one text element
//!
//! Loading never fails. Running it on its own serialized output yields the
//! same document.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::id_generator::IdGenerator;
use crate::layout::DEFAULT_LAYOUT;
use crate::model::{
    Background, BackgroundKind, CardProps, Column, Container, Document, Element, ElementKind,
    ElementStyle, ElementType, ImageProps, ListKind, ListProps, Section, Side, Spacing, TextAlign,
    MAX_WIDTH, MIN_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Sections,
    LegacyRows,
}

/// Load stored page content
pub fn load(raw: Option<&str>, ids: &mut IdGenerator) -> Document {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Document::new(),
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(value) => load_value(&value, ids),
        Err(err) => {
            debug!(%err, "content is not JSON, wrapping as plain text");
            plain_text(raw, ids)
        }
    }
}

/// Load already-parsed JSON content
pub fn load_value(value: &Value, ids: &mut IdGenerator) -> Document {
    let (entries, shape) = if let Some(sections) = value.get("sections").and_then(Value::as_array) {
        (sections, Shape::Sections)
    } else if let Some(rows) = value.get("rows").and_then(Value::as_array) {
        debug!(rows = rows.len(), "migrating legacy rows");
        (rows, Shape::LegacyRows)
    } else {
        warn!("content has neither sections nor rows, discarding");
        return Document::new();
    };

    let sections = entries
        .iter()
        .filter_map(|entry| normalize_section(entry, shape, ids))
        .map(Arc::new)
        .collect();

    Document { sections }
}

fn plain_text(raw: &str, ids: &mut IdGenerator) -> Document {
    let mut column = Column::new(ids.new_id(), MAX_WIDTH);
    column.elements.push(Arc::new(Element::text(ids.new_id(), raw)));

    Document {
        sections: vec![Arc::new(Section::new(ids.new_id(), DEFAULT_LAYOUT, vec![column]))],
    }
}

fn normalize_section(value: &Value, shape: Shape, ids: &mut IdGenerator) -> Option<Section> {
    let Some(obj) = value.as_object() else {
        warn!("skipping section that is not an object");
        return None;
    };

    let id = id_field(obj).unwrap_or_else(|| ids.new_id());

    let (layout, background, container) = match shape {
        Shape::Sections => (
            string_field(obj, "layout").unwrap_or_else(|| DEFAULT_LAYOUT.to_string()),
            normalize_background(obj.get("background")),
            normalize_container(obj.get("container")),
        ),
        Shape::LegacyRows => (
            DEFAULT_LAYOUT.to_string(),
            Background::default(),
            Container::default(),
        ),
    };

    Some(Section {
        id,
        layout,
        background,
        container,
        columns: normalize_columns(obj.get("columns"), ids),
    })
}

fn normalize_columns(value: Option<&Value>, ids: &mut IdGenerator) -> Vec<Arc<Column>> {
    value
        .and_then(Value::as_array)
        .map(|columns| {
            columns
                .iter()
                .filter_map(|c| normalize_column(c, ids))
                .map(Arc::new)
                .collect()
        })
        .unwrap_or_default()
}

fn normalize_column(value: &Value, ids: &mut IdGenerator) -> Option<Column> {
    let Some(obj) = value.as_object() else {
        warn!("skipping column that is not an object");
        return None;
    };

    let id = id_field(obj).unwrap_or_else(|| ids.new_id());
    let width = width_field(obj, "width").unwrap_or(MAX_WIDTH);

    let elements = obj
        .get("elements")
        .and_then(Value::as_array)
        .map(|elements| {
            elements
                .iter()
                .filter_map(|e| normalize_element(e, ids))
                .map(Arc::new)
                .collect()
        })
        .unwrap_or_default();

    let columns = match obj.get("columns") {
        Some(nested) if nested.is_array() => Some(normalize_columns(Some(nested), ids)),
        _ => None,
    };

    Some(Column {
        id,
        width,
        width_tablet: width_field(obj, "widthTablet").unwrap_or(width),
        width_mobile: width_field(obj, "widthMobile").unwrap_or(MAX_WIDTH),
        card: obj.get("card").and_then(Value::as_bool).unwrap_or(false),
        margin: spacing_field(obj, "margin"),
        padding: spacing_field(obj, "padding"),
        elements,
        columns,
    })
}

/// Back-fill a background one field at a time
fn normalize_background(value: Option<&Value>) -> Background {
    let mut background = Background::default();
    let Some(obj) = value.and_then(Value::as_object) else {
        return background;
    };

    match obj.get("type").and_then(Value::as_str) {
        Some("gradient") => background.kind = BackgroundKind::Gradient,
        Some("solid") | None => {}
        Some(other) => warn!(kind = other, "unknown background type, using solid"),
    }
    if let Some(color) = string_field(obj, "color") {
        background.color = color;
    }
    if let Some(from) = string_field(obj, "gradientFrom") {
        background.gradient_from = from;
    }
    if let Some(to) = string_field(obj, "gradientTo") {
        background.gradient_to = to;
    }
    if let Some(angle) = number_field(obj, "gradientAngle") {
        background.gradient_angle = angle.round().rem_euclid(360.0) as u16;
    }

    background
}

/// Back-fill a container one field at a time
fn normalize_container(value: Option<&Value>) -> Container {
    let mut container = Container::default();
    let Some(obj) = value.and_then(Value::as_object) else {
        return container;
    };

    if let Some(max_width) = string_field(obj, "maxWidth") {
        container.max_width = max_width;
    }
    if let Some(x) = padding_field(obj, "paddingX") {
        container.padding_x = x;
    }
    if let Some(y) = padding_field(obj, "paddingY") {
        container.padding_y = y;
    }
    container.padding_top = padding_field(obj, "paddingTop");
    container.padding_right = padding_field(obj, "paddingRight");
    container.padding_bottom = padding_field(obj, "paddingBottom");
    container.padding_left = padding_field(obj, "paddingLeft");

    container
}

/// Rebuild an element from its fields. Only a missing or unknown `type`
/// drops it; badly typed style fields fall back to unset.
fn normalize_element(value: &Value, ids: &mut IdGenerator) -> Option<Element> {
    let Some(obj) = value.as_object() else {
        warn!("dropping element that is not an object");
        return None;
    };

    let element_type = match obj.get("type").and_then(Value::as_str).map(str::parse::<ElementType>) {
        Some(Ok(element_type)) => element_type,
        Some(Err(err)) => {
            warn!(%err, "dropping element");
            return None;
        }
        None => {
            warn!("dropping element without a type");
            return None;
        }
    };

    let style = ElementStyle {
        color: scalar_field(obj, "color"),
        font_size: scalar_field(obj, "fontSize"),
        align: align_field(obj),
        font_weight: scalar_field(obj, "fontWeight"),
        line_height: scalar_field(obj, "lineHeight"),
        letter_spacing: scalar_field(obj, "letterSpacing"),
        margin: spacing_field(obj, "margin"),
        padding: spacing_field(obj, "padding"),
    };

    let kind = match element_type {
        ElementType::Heading => ElementKind::Heading,
        ElementType::Text => ElementKind::Text,
        ElementType::Image => ElementKind::Image(ImageProps {
            width: scalar_field(obj, "width"),
            aspect_ratio: scalar_field(obj, "aspectRatio"),
            object_fit: scalar_field(obj, "objectFit"),
            border_radius: scalar_field(obj, "borderRadius"),
        }),
        ElementType::Card => {
            let mut card = CardProps::default();
            if let Some(background) = scalar_field(obj, "backgroundColor") {
                card.background_color = background;
            }
            if let Some(radius) = scalar_field(obj, "borderRadius") {
                card.border_radius = radius;
            }
            card.href = scalar_field(obj, "href");
            card.target = scalar_field(obj, "target");
            ElementKind::Card(card)
        }
        ElementType::List => ElementKind::List(ListProps {
            list_kind: list_kind_field(obj),
            items: items_field(obj),
        }),
    };

    Some(Element {
        id: id_field(obj).unwrap_or_else(|| ids.new_id()),
        value: scalar_field(obj, "value").unwrap_or_default(),
        style,
        kind,
    })
}

fn align_field(obj: &Map<String, Value>) -> Option<TextAlign> {
    let raw = obj.get("align")?.as_str()?;
    let align = match raw.to_ascii_lowercase().as_str() {
        "left" => TextAlign::Left,
        "center" => TextAlign::Center,
        "right" => TextAlign::Right,
        "justify" => TextAlign::Justify,
        "" => return None,
        _ => {
            debug!(align = raw, "unknown alignment, leaving unset");
            return None;
        }
    };
    Some(align)
}

fn list_kind_field(obj: &Map<String, Value>) -> ListKind {
    match obj.get("listKind").and_then(Value::as_str) {
        Some("numbered") => ListKind::Numbered,
        Some("checklist") => ListKind::Checklist,
        _ => ListKind::Bullet,
    }
}

fn items_field(obj: &Map<String, Value>) -> Vec<String> {
    let Some(items) = obj.get("items").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

/// Ids may have been stored as numbers by older editors
fn id_field(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Text field that may have been stored as a number
fn scalar_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Number, or a string holding one
fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let raw = match obj.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    raw.is_finite().then_some(raw)
}

/// Widths are clamped into 1..=12
fn width_field(obj: &Map<String, Value>, key: &str) -> Option<u8> {
    let raw = number_field(obj, key)?;
    Some(raw.round().clamp(MIN_WIDTH as f64, MAX_WIDTH as f64) as u8)
}

fn padding_field(obj: &Map<String, Value>, key: &str) -> Option<u16> {
    let raw = number_field(obj, key)?;
    Some(raw.round().clamp(0.0, u16::MAX as f64) as u16)
}

fn spacing_field(obj: &Map<String, Value>, key: &str) -> Spacing {
    let mut spacing = Spacing::default();

    if let Some(sides) = obj.get(key).and_then(Value::as_object) {
        for (name, side) in [
            ("top", Side::Top),
            ("right", Side::Right),
            ("bottom", Side::Bottom),
            ("left", Side::Left),
        ] {
            let value = match sides.get(name) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };
            spacing.set(side, value);
        }
    }

    spacing
}
