//! Semantic component categories and complexity classes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    Button,
    Card,
    Text,
    Input,
    Layout,
    Image,
    Icon,
    /// Fallback when nothing more specific applies.
    Complex,
}

impl ComponentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Card => "card",
            Self::Text => "text",
            Self::Input => "input",
            Self::Layout => "layout",
            Self::Image => "image",
            Self::Icon => "icon",
            Self::Complex => "complex",
        }
    }

    /// Categories a user acts on directly.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Button | Self::Input)
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse complexity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    /// Bucket a weighted score: `<= simple_max` simple, `<= medium_max`
    /// medium, complex above.
    pub fn from_score(score: u32, simple_max: u32, medium_max: u32) -> Self {
        if score <= simple_max {
            Self::Simple
        } else if score <= medium_max {
            Self::Medium
        } else {
            Self::Complex
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Medium => "medium",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_buckets() {
        assert_eq!(Complexity::from_score(0, 3, 8), Complexity::Simple);
        assert_eq!(Complexity::from_score(3, 3, 8), Complexity::Simple);
        assert_eq!(Complexity::from_score(4, 3, 8), Complexity::Medium);
        assert_eq!(Complexity::from_score(8, 3, 8), Complexity::Medium);
        assert_eq!(Complexity::from_score(9, 3, 8), Complexity::Complex);
    }

    #[test]
    fn test_category_is_interactive() {
        assert!(ComponentCategory::Button.is_interactive());
        assert!(ComponentCategory::Input.is_interactive());
        assert!(!ComponentCategory::Card.is_interactive());
    }
}
