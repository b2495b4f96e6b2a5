//! Identifier derivation for components and generated class names.

use convert_case::{Case, Casing};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| {
        Regex::new(r"[^A-Za-z0-9]+").expect("BUG: invalid SEPARATORS regex literal")
    })
}

/// Split a free-form layer name into space-separated alphanumeric words.
fn words(name: &str) -> String {
    separators().replace_all(name, " ").trim().to_string()
}

/// PascalCase component identifier for a node name.
///
/// Non-alphanumerics are dropped. Names that end up empty or start with a
/// digit get a `Component` prefix so the result is a valid identifier in
/// every target dialect.
pub fn sanitize_component_name(name: &str) -> String {
    let pascal = words(name).to_case(Case::Pascal);
    match pascal.chars().next() {
        None => "Component".to_string(),
        Some(c) if c.is_ascii_digit() => format!("Component{}", pascal),
        Some(_) => pascal,
    }
}

/// Hands out unique kebab-case class names within one component.
#[derive(Debug, Default)]
pub struct ClassNamer {
    /// Every name handed out so far.
    used: HashSet<String>,
    /// Next suffix to try per base name.
    next_suffix: HashMap<String, usize>,
}

impl ClassNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Class name for a node, deduplicated with a numeric suffix.
    /// `fallback` is used when the name has no usable characters.
    pub fn class_for(&mut self, name: &str, fallback: &str) -> String {
        let mut base = words(name).to_case(Case::Kebab);
        if base.is_empty() {
            base = fallback.to_case(Case::Kebab);
        }
        if base.starts_with(|c: char| c.is_ascii_digit()) {
            base = format!("{}-{}", fallback.to_case(Case::Kebab), base);
        }

        let mut candidate = base.clone();
        if self.used.contains(&candidate) {
            let suffix = self.next_suffix.entry(base.clone()).or_insert(2);
            loop {
                candidate = format!("{}-{}", base, suffix);
                *suffix += 1;
                if !self.used.contains(&candidate) {
                    break;
                }
            }
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

/// camelCase form of a kebab class name, used for module bindings.
pub fn module_binding(class_name: &str) -> String {
    class_name.to_case(Case::Camel)
}
