//! Structural analysis of scene nodes for code generation.

mod category;
mod classifier;

pub use category::{ComponentCategory, Complexity};
pub use classifier::{Classifier, ClassifierConfig, ComponentClassification};
