//! Quill core: the scene graph model consumed by the code generator.
//!
//! A scene graph is a tree of visual nodes (frames, text, shapes, component
//! instances) carrying geometry, paints, effects, typography and auto-layout
//! metadata. This crate only models and loads that tree; everything derived
//! from it lives in `quill-codegen`.

pub mod document;
pub mod errors;
pub mod scene;
pub mod types;

pub use document::{ComponentMeta, SceneDocument};
pub use errors::{Result, SceneError};
pub use scene::{NodeKind, SceneNode, Walk};
pub use types::{
    format_number, Color, ColorStop, Constraints, Effect, EffectKind, HorizontalConstraint, Layout,
    LayoutMode, Padding, Paint, PaintKind, Rect, TextAlign, Typography, Vector, VerticalConstraint,
};
