//! Typed field updates.
//!
//! Every settable field is a variant of a closed enum, so an update can only
//! name a field its target actually owns. String-keyed updates (as sent by
//! form inputs) go through [`ElementUpdate::from_field`] and
//! [`SpacingKey::from_str`], which reject unknown keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{
    Background, BackgroundKind, Container, Element, ElementKind, ListKind, Side, Spacing, TextAlign,
};
use crate::mutations::MutationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BackgroundField {
    Kind(BackgroundKind),
    Color(String),
    GradientFrom(String),
    GradientTo(String),
    GradientAngle(u16),
}

impl BackgroundField {
    pub(crate) fn apply(&self, background: &mut Background) {
        match self {
            BackgroundField::Kind(kind) => background.kind = *kind,
            BackgroundField::Color(color) => background.color = color.clone(),
            BackgroundField::GradientFrom(color) => background.gradient_from = color.clone(),
            BackgroundField::GradientTo(color) => background.gradient_to = color.clone(),
            BackgroundField::GradientAngle(angle) => background.gradient_angle = *angle % 360,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContainerField {
    MaxWidth(String),
    PaddingX(u16),
    PaddingY(u16),
    /// Per-side override; `None` falls back to the axis padding
    PaddingSide(Side, Option<u16>),
}

impl ContainerField {
    pub(crate) fn apply(&self, container: &mut Container) {
        match self {
            ContainerField::MaxWidth(max_width) => container.max_width = max_width.clone(),
            ContainerField::PaddingX(px) => container.padding_x = *px,
            ContainerField::PaddingY(py) => container.padding_y = *py,
            ContainerField::PaddingSide(side, value) => {
                let slot = match side {
                    Side::Top => &mut container.padding_top,
                    Side::Right => &mut container.padding_right,
                    Side::Bottom => &mut container.padding_bottom,
                    Side::Left => &mut container.padding_left,
                };
                *slot = *value;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingTarget {
    Margin,
    Padding,
}

/// One side of a margin or padding box, e.g. `marginTop`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpacingKey {
    pub target: SpacingTarget,
    pub side: Side,
}

impl SpacingKey {
    pub fn new(target: SpacingTarget, side: Side) -> Self {
        Self { target, side }
    }

    pub(crate) fn apply(&self, margin: &mut Spacing, padding: &mut Spacing, value: Option<String>) {
        match self.target {
            SpacingTarget::Margin => margin.set(self.side, value),
            SpacingTarget::Padding => padding.set(self.side, value),
        }
    }
}

impl FromStr for SpacingKey {
    type Err = MutationError;

    /// Accepts `marginTop`, `margin-top` and `margin_top` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        let (target, rest) = if let Some(rest) = normalized.strip_prefix("margin") {
            (SpacingTarget::Margin, rest)
        } else if let Some(rest) = normalized.strip_prefix("padding") {
            (SpacingTarget::Padding, rest)
        } else {
            return Err(MutationError::UnknownField(s.to_string()));
        };

        let side = match rest {
            "top" => Side::Top,
            "right" => Side::Right,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            _ => return Err(MutationError::UnknownField(s.to_string())),
        };

        Ok(Self { target, side })
    }
}

impl fmt::Display for SpacingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.target {
            SpacingTarget::Margin => "margin",
            SpacingTarget::Padding => "padding",
        };
        let side = match self.side {
            Side::Top => "Top",
            Side::Right => "Right",
            Side::Bottom => "Bottom",
            Side::Left => "Left",
        };
        write!(f, "{}{}", target, side)
    }
}

/// A single-field update on an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementUpdate {
    Value(String),
    Color(Option<String>),
    FontSize(Option<String>),
    Align(Option<TextAlign>),
    FontWeight(Option<String>),
    LineHeight(Option<String>),
    LetterSpacing(Option<String>),
    Spacing { key: SpacingKey, value: Option<String> },

    ImageWidth(Option<String>),
    AspectRatio(Option<String>),
    ObjectFit(Option<String>),
    ImageBorderRadius(Option<String>),

    CardBackground(String),
    CardBorderRadius(String),
    CardHref(Option<String>),
    CardTarget(Option<String>),

    ListKind(ListKind),
    Items(Vec<String>),
}

impl ElementUpdate {
    /// Wire name of the field this update sets
    pub fn field_name(&self) -> &'static str {
        match self {
            ElementUpdate::Value(_) => "value",
            ElementUpdate::Color(_) => "color",
            ElementUpdate::FontSize(_) => "fontSize",
            ElementUpdate::Align(_) => "align",
            ElementUpdate::FontWeight(_) => "fontWeight",
            ElementUpdate::LineHeight(_) => "lineHeight",
            ElementUpdate::LetterSpacing(_) => "letterSpacing",
            ElementUpdate::Spacing { key, .. } => match key.target {
                SpacingTarget::Margin => "margin",
                SpacingTarget::Padding => "padding",
            },
            ElementUpdate::ImageWidth(_) => "width",
            ElementUpdate::AspectRatio(_) => "aspectRatio",
            ElementUpdate::ObjectFit(_) => "objectFit",
            ElementUpdate::ImageBorderRadius(_) | ElementUpdate::CardBorderRadius(_) => "borderRadius",
            ElementUpdate::CardBackground(_) => "backgroundColor",
            ElementUpdate::CardHref(_) => "href",
            ElementUpdate::CardTarget(_) => "target",
            ElementUpdate::ListKind(_) => "listKind",
            ElementUpdate::Items(_) => "items",
        }
    }

    /// Build an update from a string key, resolving variant-specific keys
    /// (`width`, `borderRadius`) against the element being edited.
    pub fn from_field(element: &Element, key: &str, value: &Value) -> Result<Self, MutationError> {
        let update = match key {
            "value" => ElementUpdate::Value(required_text(key, value)?),
            "color" => ElementUpdate::Color(optional_text(key, value)?),
            "fontSize" => ElementUpdate::FontSize(optional_text(key, value)?),
            "align" => ElementUpdate::Align(parse_json(key, value)?),
            "fontWeight" => ElementUpdate::FontWeight(optional_text(key, value)?),
            "lineHeight" => ElementUpdate::LineHeight(optional_text(key, value)?),
            "letterSpacing" => ElementUpdate::LetterSpacing(optional_text(key, value)?),
            "width" => ElementUpdate::ImageWidth(optional_text(key, value)?),
            "aspectRatio" => ElementUpdate::AspectRatio(optional_text(key, value)?),
            "objectFit" => ElementUpdate::ObjectFit(optional_text(key, value)?),
            "borderRadius" => match element.kind {
                ElementKind::Card(_) => ElementUpdate::CardBorderRadius(required_text(key, value)?),
                _ => ElementUpdate::ImageBorderRadius(optional_text(key, value)?),
            },
            "backgroundColor" => ElementUpdate::CardBackground(required_text(key, value)?),
            "href" => ElementUpdate::CardHref(optional_text(key, value)?),
            "target" => ElementUpdate::CardTarget(optional_text(key, value)?),
            "listKind" => ElementUpdate::ListKind(parse_json(key, value)?),
            "items" => ElementUpdate::Items(parse_json(key, value)?),
            other => ElementUpdate::Spacing {
                key: other.parse()?,
                value: optional_text(key, value)?,
            },
        };

        Ok(update)
    }

    pub(crate) fn apply(&self, element: &mut Element) -> Result<(), MutationError> {
        let element_type = element.element_type();
        let not_owned = || MutationError::FieldNotOnVariant {
            field: self.field_name(),
            element_type,
        };

        match (self, &mut element.kind) {
            (ElementUpdate::Value(v), _) => element.value = v.clone(),
            (ElementUpdate::Color(v), _) => element.style.color = v.clone(),
            (ElementUpdate::FontSize(v), _) => element.style.font_size = v.clone(),
            (ElementUpdate::Align(v), _) => element.style.align = *v,
            (ElementUpdate::FontWeight(v), _) => element.style.font_weight = v.clone(),
            (ElementUpdate::LineHeight(v), _) => element.style.line_height = v.clone(),
            (ElementUpdate::LetterSpacing(v), _) => element.style.letter_spacing = v.clone(),
            (ElementUpdate::Spacing { key, value }, _) => {
                key.apply(&mut element.style.margin, &mut element.style.padding, value.clone())
            }

            (ElementUpdate::ImageWidth(v), ElementKind::Image(image)) => image.width = v.clone(),
            (ElementUpdate::AspectRatio(v), ElementKind::Image(image)) => image.aspect_ratio = v.clone(),
            (ElementUpdate::ObjectFit(v), ElementKind::Image(image)) => image.object_fit = v.clone(),
            (ElementUpdate::ImageBorderRadius(v), ElementKind::Image(image)) => {
                image.border_radius = v.clone()
            }

            (ElementUpdate::CardBackground(v), ElementKind::Card(card)) => card.background_color = v.clone(),
            (ElementUpdate::CardBorderRadius(v), ElementKind::Card(card)) => card.border_radius = v.clone(),
            (ElementUpdate::CardHref(v), ElementKind::Card(card)) => card.href = v.clone(),
            (ElementUpdate::CardTarget(v), ElementKind::Card(card)) => card.target = v.clone(),

            (ElementUpdate::ListKind(v), ElementKind::List(list)) => list.list_kind = *v,
            (ElementUpdate::Items(v), ElementKind::List(list)) => list.items = v.clone(),

            _ => return Err(not_owned()),
        }

        Ok(())
    }
}

fn optional_text(key: &str, value: &Value) -> Result<Option<String>, MutationError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(invalid(key, "expected a string")),
    }
}

fn required_text(key: &str, value: &Value) -> Result<String, MutationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(invalid(key, "expected a string")),
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(key: &str, value: &Value) -> Result<T, MutationError> {
    serde_json::from_value(value.clone()).map_err(|e| invalid(key, &e.to_string()))
}

fn invalid(key: &str, reason: &str) -> MutationError {
    MutationError::InvalidValue {
        field: key.to_string(),
        reason: reason.to_string(),
    }
}
