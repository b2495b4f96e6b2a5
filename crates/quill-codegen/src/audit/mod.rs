//! Rule-based accessibility audit.
//!
//! Rules run over every node of the component subtree in a fixed order,
//! followed by category checks on the component root. The report score
//! starts at 100 and loses a per-severity penalty for each issue.

mod rules;

pub use rules::{default_rules, AccessibilityRule, AltTextRule, ContrastRule, FocusRule, SemanticStructureRule};

use crate::analyzer::{ComponentCategory, ComponentClassification};
use crate::config::{default_interactive_keywords, KeywordSet};
use quill_core::SceneNode;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Issue severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Label under the given profile. The simplified profile folds
    /// critical and high into "error".
    pub fn label(&self, profile: AuditProfile) -> &'static str {
        match (profile, self) {
            (AuditProfile::Full, Self::Critical) => "critical",
            (AuditProfile::Full, Self::High) => "high",
            (AuditProfile::Full, Self::Medium) => "medium",
            (AuditProfile::Full, Self::Low) => "low",
            (AuditProfile::Simplified, Self::Critical | Self::High) => "error",
            (AuditProfile::Simplified, Self::Medium) => "warning",
            (AuditProfile::Simplified, Self::Low) => "info",
        }
    }
}

/// Scoring profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditProfile {
    #[default]
    Full,
    Simplified,
}

/// WCAG conformance estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceTier {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "Non-compliant")]
    NonCompliant,
}

impl ComplianceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::A => "A",
            Self::NonCompliant => "Non-compliant",
        }
    }
}

impl fmt::Display for ComplianceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityIssue {
    pub severity: Severity,
    /// Severity label under the report's profile.
    pub level: &'static str,
    pub message: String,
    /// Name (or id) of the offending node.
    pub element: String,
    pub fix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
}

impl AccessibilityIssue {
    pub fn new(severity: Severity, message: String, element: String, fix: String) -> Self {
        Self {
            severity,
            level: severity.label(AuditProfile::Full),
            message,
            element,
            fix,
            rule: None,
        }
    }

    pub fn with_rule(mut self, rule: &'static str) -> Self {
        self.rule = Some(rule);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityReport {
    /// 0..=100.
    pub score: u8,
    pub issues: Vec<AccessibilityIssue>,
    pub suggestions: Vec<String>,
    pub compliance_tier: ComplianceTier,
    pub profile: AuditProfile,
}

impl AccessibilityReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn has_rule(&self, rule: &str) -> bool {
        self.issues.iter().any(|i| i.rule == Some(rule))
    }
}

/// Score deductions per severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Penalties {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl Penalties {
    pub fn for_severity(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}

/// Keyword lists, thresholds, penalties and suggestion texts.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub interactive_keywords: KeywordSet,
    pub heading_keywords: KeywordSet,
    /// Heading level names, matched as whole words.
    pub heading_levels: KeywordSet,
    pub image_keywords: KeywordSet,
    /// Minimum fill/stroke contrast ratio.
    pub min_contrast: f64,
    pub full_penalties: Penalties,
    pub simplified_penalties: Penalties,
    /// Scores below this land in the lowest tier.
    pub lowest_tier_below: u8,
    /// Scores below this (and above the lowest tier) are AA.
    pub aa_below: u8,
    pub general_suggestions: Vec<String>,
    pub category_suggestions: Vec<(ComponentCategory, Vec<String>)>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            interactive_keywords: default_interactive_keywords(),
            heading_keywords: KeywordSet::new(["heading", "title"]),
            heading_levels: KeywordSet::new(["h1", "h2", "h3", "h4", "h5", "h6"]),
            image_keywords: KeywordSet::new(["image", "img", "photo", "avatar"]),
            min_contrast: 4.5,
            full_penalties: Penalties {
                critical: 20,
                high: 15,
                medium: 10,
                low: 5,
            },
            simplified_penalties: Penalties {
                critical: 15,
                high: 15,
                medium: 10,
                low: 0,
            },
            lowest_tier_below: 60,
            aa_below: 80,
            general_suggestions: strings(&[
                "Test the component with a screen reader",
                "Verify every interactive element is reachable with the keyboard",
            ]),
            category_suggestions: vec![
                (
                    ComponentCategory::Button,
                    strings(&["Give the button an accessible name that describes its action"]),
                ),
                (
                    ComponentCategory::Input,
                    strings(&[
                        "Associate the input with a visible <label>",
                        "Announce validation errors with aria-describedby",
                    ]),
                ),
                (
                    ComponentCategory::Image,
                    strings(&["Describe the image content in its alt text"]),
                ),
                (
                    ComponentCategory::Card,
                    strings(&["Use a heading inside the card so it can be navigated by outline"]),
                ),
            ],
        }
    }
}

impl AuditConfig {
    pub fn penalties(&self, profile: AuditProfile) -> &Penalties {
        match profile {
            AuditProfile::Full => &self.full_penalties,
            AuditProfile::Simplified => &self.simplified_penalties,
        }
    }
}

/// Runs the rule list and scores the result.
#[derive(Debug)]
pub struct Auditor {
    rules: Vec<Box<dyn AccessibilityRule>>,
    config: AuditConfig,
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new(AuditConfig::default())
    }
}

impl Auditor {
    pub fn new(config: AuditConfig) -> Self {
        Self {
            rules: default_rules(),
            config,
        }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Audit a component subtree. `markup` is the emitted markup, used for
    /// markup-level suggestions.
    pub fn audit(
        &self,
        node: &SceneNode,
        classification: &ComponentClassification,
        markup: &str,
        profile: AuditProfile,
    ) -> AccessibilityReport {
        let mut issues: Vec<AccessibilityIssue> = node
            .walk()
            .flat_map(|n| self.rules.iter().flat_map(move |rule| rule.evaluate(n, &self.config)))
            .collect();
        issues.extend(self.category_checks(node, classification));

        for issue in &mut issues {
            issue.level = issue.severity.label(profile);
        }

        let penalties = self.config.penalties(profile);
        let deducted: u32 = issues.iter().map(|i| penalties.for_severity(i.severity)).sum();
        let score = 100u32.saturating_sub(deducted) as u8;

        let compliance_tier = self.tier(&issues, score, profile);
        let suggestions = self.suggestions(&issues, classification, markup);

        log::debug!(
            "audited '{}': {} issues, score {}, tier {}",
            node.name,
            issues.len(),
            score,
            compliance_tier
        );

        AccessibilityReport {
            score,
            issues,
            suggestions,
            compliance_tier,
            profile,
        }
    }

    fn category_checks(
        &self,
        node: &SceneNode,
        classification: &ComponentClassification,
    ) -> Vec<AccessibilityIssue> {
        let element = if node.name.trim().is_empty() {
            node.id.clone()
        } else {
            node.name.clone()
        };
        match classification.category {
            ComponentCategory::Button if !node.walk().any(|n| n.text_content().is_some()) => {
                vec![AccessibilityIssue::new(
                    Severity::High,
                    "Button lacks descriptive text".to_string(),
                    element,
                    "Add a visible label or an aria-label".to_string(),
                )]
            }
            ComponentCategory::Input => vec![AccessibilityIssue::new(
                Severity::Medium,
                "Input needs an associated label".to_string(),
                element,
                "Connect a <label> through the for/id pair or aria-labelledby".to_string(),
            )],
            ComponentCategory::Card if !node.children.is_empty() => {
                vec![AccessibilityIssue::new(
                    Severity::Low,
                    "Card content could be exposed as a landmark".to_string(),
                    element,
                    "Wrap the card in <article> or give it role=\"region\" with a label".to_string(),
                )]
            }
            _ => Vec::new(),
        }
    }

    /// Tiers key on severity, not on the profile label: a simplified "error"
    /// only reaches the lowest tier when its severity is critical.
    fn tier(&self, issues: &[AccessibilityIssue], score: u8, profile: AuditProfile) -> ComplianceTier {
        let any = |severity: Severity| issues.iter().any(|i| i.severity == severity);
        if any(Severity::Critical) || score < self.config.lowest_tier_below {
            match profile {
                AuditProfile::Full => ComplianceTier::A,
                AuditProfile::Simplified => ComplianceTier::NonCompliant,
            }
        } else if any(Severity::High) || score < self.config.aa_below {
            ComplianceTier::Aa
        } else {
            ComplianceTier::Aaa
        }
    }

    fn suggestions(
        &self,
        issues: &[AccessibilityIssue],
        classification: &ComponentClassification,
        markup: &str,
    ) -> Vec<String> {
        let mut suggestions = self.config.general_suggestions.clone();

        if let Some((_, extra)) = self
            .config
            .category_suggestions
            .iter()
            .find(|(category, _)| *category == classification.category)
        {
            suggestions.extend(extra.iter().cloned());
        }

        let has_rule = |rule: &str| issues.iter().any(|i| i.rule == Some(rule));
        if has_rule("color-contrast") {
            suggestions.push("Check color pairs with a WCAG contrast checker".to_string());
        }
        if has_rule("focus-management") {
            suggestions.push("Add :focus-visible styling for keyboard users".to_string());
        }
        if has_rule("alt-text") {
            suggestions.push("Write alt text that conveys the purpose of each image".to_string());
        }
        if has_non_native_button_role(markup) {
            suggestions.push("Prefer a native <button> element over role=\"button\"".to_string());
        }

        suggestions
    }
}

fn role_button_tag() -> &'static Regex {
    static ROLE_BUTTON_TAG: OnceLock<Regex> = OnceLock::new();
    ROLE_BUTTON_TAG.get_or_init(|| {
        Regex::new(r#"<([A-Za-z][\w.-]*)[^>]*\srole="button""#)
            .expect("BUG: invalid ROLE_BUTTON_TAG regex literal")
    })
}

/// Whether some element other than a native `<button>` carries `role="button"`.
fn has_non_native_button_role(markup: &str) -> bool {
    role_button_tag()
        .captures_iter(markup)
        .any(|caps| !caps[1].eq_ignore_ascii_case("button"))
}
