//! Value types attached to scene nodes: colors, paints, effects, text style,
//! auto-layout and constraints.
//!
//! Field names follow the design tool's file API so a node fetched from the
//! API deserializes without a translation layer.

use serde::{Deserialize, Serialize};

/// RGBA color with channels in the `0.0..=1.0` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "one")]
    pub a: f64,
}

fn one() -> f64 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Create from hex string (e.g., "#3B82F6" or "3B82F6CC").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?)),
            8 => {
                let base = Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?);
                Some(base.with_alpha(channel(6)? as f64 / 255.0))
            }
            _ => None,
        }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// 8-bit channel values, rounded.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// CSS `rgba()` quadruple. Alpha is always present.
    pub fn to_css(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgba({}, {}, {}, {})", r, g, b, format_number(self.a.clamp(0.0, 1.0)))
    }

    /// WCAG 2.x relative luminance.
    pub fn relative_luminance(&self) -> f64 {
        fn linear(c: f64) -> f64 {
            let c = c.clamp(0.0, 1.0);
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// WCAG contrast ratio between two colors, in `1.0..=21.0`.
    pub fn contrast_ratio(&self, other: &Color) -> f64 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
        (hi + 0.05) / (lo + 0.05)
    }
}

/// Format a number for CSS output: integers without a fraction, everything
/// else rounded to three decimals with trailing zeros removed.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let rounded = format!("{:.3}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// 2D vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Absolute bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    pub fn sized(width: f64, height: f64) -> Self {
        Self { x: 0.0, y: 0.0, width, height }
    }
}

/// Paint type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    #[serde(other)]
    Unknown,
}

/// A gradient color stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: Color,
    #[serde(default)]
    pub position: f64,
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: PaintKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gradient_stops: Vec<ColorStop>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gradient_handle_positions: Vec<Vector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl Paint {
    fn of_kind(kind: PaintKind) -> Self {
        Self {
            kind,
            color: None,
            opacity: None,
            visible: None,
            gradient_stops: Vec::new(),
            gradient_handle_positions: Vec::new(),
            image_ref: None,
        }
    }

    /// A solid color paint.
    pub fn solid(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::of_kind(PaintKind::Solid)
        }
    }

    /// A linear gradient paint through the given stops.
    pub fn linear_gradient(stops: Vec<ColorStop>) -> Self {
        Self {
            gradient_stops: stops,
            ..Self::of_kind(PaintKind::GradientLinear)
        }
    }

    /// An image paint referencing an uploaded asset.
    pub fn image(image_ref: impl Into<String>) -> Self {
        Self {
            image_ref: Some(image_ref.into()),
            ..Self::of_kind(PaintKind::Image)
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = Some(false);
        self
    }

    /// Paints are visible unless explicitly hidden.
    pub fn is_visible(&self) -> bool {
        self.visible != Some(false)
    }

    pub fn is_gradient(&self) -> bool {
        matches!(
            self.kind,
            PaintKind::GradientLinear
                | PaintKind::GradientRadial
                | PaintKind::GradientAngular
                | PaintKind::GradientDiamond
        )
    }

    /// Solid color with paint-level opacity folded into alpha.
    pub fn effective_color(&self) -> Option<Color> {
        if self.kind != PaintKind::Solid {
            return None;
        }
        let color = self.color?;
        Some(color.with_alpha(color.a * self.opacity.unwrap_or(1.0)))
    }
}

/// Effect type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[serde(other)]
    Unknown,
}

/// A shadow or blur effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default)]
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Vector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Effect {
    /// A visible drop shadow.
    pub fn drop_shadow(x: f64, y: f64, radius: f64, color: Color) -> Self {
        Self {
            kind: EffectKind::DropShadow,
            visible: Some(true),
            radius,
            spread: None,
            offset: Some(Vector { x, y }),
            color: Some(color),
        }
    }

    /// A visible layer blur.
    pub fn layer_blur(radius: f64) -> Self {
        Self {
            kind: EffectKind::LayerBlur,
            visible: Some(true),
            radius,
            spread: None,
            offset: None,
            color: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = Some(false);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible != Some(false)
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justified,
}

impl TextAlign {
    pub fn to_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justified => "justify",
        }
    }
}

/// Text style of a text node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
}

impl Typography {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            font_family: Some(family.into()),
            font_size: Some(size),
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }
}

/// Auto-layout axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    Horizontal,
    Vertical,
    #[default]
    #[serde(other)]
    None,
}

/// Four-sided padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    #[serde(rename = "paddingTop", default)]
    pub top: f64,
    #[serde(rename = "paddingRight", default)]
    pub right: f64,
    #[serde(rename = "paddingBottom", default)]
    pub bottom: f64,
    #[serde(rename = "paddingLeft", default)]
    pub left: f64,
}

impl Padding {
    pub fn uniform(value: f64) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }

    pub fn is_uniform(&self) -> bool {
        self.top == self.right && self.right == self.bottom && self.bottom == self.left
    }
}

/// Auto-layout settings of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default)]
    pub layout_mode: LayoutMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,
    #[serde(flatten)]
    pub padding: Padding,
}

impl Layout {
    pub fn is_auto_layout(&self) -> bool {
        self.layout_mode != LayoutMode::None
    }
}

/// Horizontal anchoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HorizontalConstraint {
    #[default]
    #[serde(alias = "MIN")]
    Left,
    #[serde(alias = "MAX")]
    Right,
    Center,
    #[serde(alias = "STRETCH")]
    LeftRight,
    Scale,
}

/// Vertical anchoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerticalConstraint {
    #[default]
    #[serde(alias = "MIN")]
    Top,
    #[serde(alias = "MAX")]
    Bottom,
    Center,
    #[serde(alias = "STRETCH")]
    TopBottom,
    Scale,
}

/// Resize constraints relative to the parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default)]
    pub horizontal: HorizontalConstraint,
    #[serde(default)]
    pub vertical: VerticalConstraint,
}

impl Constraints {
    /// Anything other than top-left pinning.
    pub fn is_non_default(&self) -> bool {
        self.horizontal != HorizontalConstraint::Left || self.vertical != VerticalConstraint::Top
    }
}
