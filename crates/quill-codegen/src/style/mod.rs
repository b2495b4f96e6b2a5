//! Canonical, dialect-neutral style representation.

mod resolver;
mod tree;

pub use resolver::StyleResolver;
pub use tree::StyledNode;

use indexmap::IndexMap;
use quill_core::{format_number, Color};
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

/// Canonical property names.
pub mod props {
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const DISPLAY: &str = "display";
    pub const FLEX_DIRECTION: &str = "flexDirection";
    pub const GAP: &str = "gap";
    pub const PADDING: &str = "padding";
    pub const BACKGROUND_COLOR: &str = "backgroundColor";
    pub const BACKGROUND: &str = "background";
    pub const BORDER: &str = "border";
    pub const BORDER_RADIUS: &str = "borderRadius";
    pub const BOX_SHADOW: &str = "boxShadow";
    pub const FILTER: &str = "filter";
    pub const OPACITY: &str = "opacity";
    pub const FONT_FAMILY: &str = "fontFamily";
    pub const FONT_SIZE: &str = "fontSize";
    pub const FONT_WEIGHT: &str = "fontWeight";
    pub const LINE_HEIGHT: &str = "lineHeight";
    pub const LETTER_SPACING: &str = "letterSpacing";
    pub const TEXT_ALIGN: &str = "textAlign";
    pub const COLOR: &str = "color";
}

/// A style value. Renders to CSS text through `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Length in pixels.
    Px(f64),
    /// Unitless number (opacity, font weight).
    Number(f64),
    Color(Color),
    /// Top/right/bottom/left lengths in pixels.
    Edges(SmallVec<[f64; 4]>),
    /// Anything already in final textual form.
    Keyword(String),
}

impl StyleValue {
    pub fn keyword(value: impl Into<String>) -> Self {
        Self::Keyword(value.into())
    }

    pub fn as_px(&self) -> Option<f64> {
        match self {
            Self::Px(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Px(v) | Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(k) => Some(k),
            _ => None,
        }
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{}px", format_number(*v)),
            Self::Number(v) => f.write_str(&format_number(*v)),
            Self::Color(c) => f.write_str(&c.to_css()),
            Self::Edges(edges) => {
                let parts: Vec<String> =
                    edges.iter().map(|v| format!("{}px", format_number(*v))).collect();
                f.write_str(&parts.join(" "))
            }
            Self::Keyword(k) => f.write_str(k),
        }
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Flat map from canonical property name to value.
///
/// An absent key means "not specified". Iteration follows insertion order,
/// which keeps emitted text stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleBag {
    entries: IndexMap<String, StyleValue>,
}

impl StyleBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn set(&mut self, property: &str, value: StyleValue) {
        self.entries.insert(property.to_string(), value);
    }

    pub fn with(mut self, property: &str, value: StyleValue) -> Self {
        self.set(property, value);
        self
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.entries.get(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.entries.contains_key(property)
    }

    pub fn remove(&mut self, property: &str) -> Option<StyleValue> {
        self.entries.shift_remove(property)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries of `self` that are new or different compared to `base`.
    pub fn diff(&self, base: &StyleBag) -> StyleBag {
        let entries = self
            .entries
            .iter()
            .filter(|(k, v)| base.get(k) != Some(*v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        StyleBag { entries }
    }
}
