//! Generated output records.

use crate::analyzer::{ComponentCategory, Complexity};
use crate::audit::AccessibilityReport;
use crate::options::{MarkupDialect, StyleDialect};
use crate::responsive::ResponsiveVariants;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use std::time::Duration;

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

/// Facts about how a component was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    pub source_node_id: String,
    pub category: ComponentCategory,
    pub complexity: Complexity,
    /// Heuristic fidelity estimate in `0.5..=1.0`.
    pub estimated_accuracy: f64,
    #[serde(rename = "generationTimeMs", serialize_with = "as_millis")]
    pub generation_time: Duration,
    /// Packages the emitted code imports.
    pub dependencies: Vec<String>,
    pub suggested_props: Vec<String>,
    pub warnings: Vec<String>,
    pub markup_dialect: MarkupDialect,
    pub style_dialect: StyleDialect,
    pub engine_version: String,
}

/// One generated component. Never mutated after construction; cache hits
/// hand out the stored value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedComponent {
    pub id: String,
    pub sanitized_name: String,
    pub markup: String,
    pub stylesheet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_declarations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<AccessibilityReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive: Option<ResponsiveVariants>,
    pub metadata: ComponentMetadata,
}

/// Aggregate result of a multi-component run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub components: Vec<Arc<GeneratedComponent>>,
    pub total_nodes_analyzed: usize,
    pub component_count: usize,
    pub cache_hits: usize,
    pub average_accuracy: f64,
}

impl GenerationReport {
    pub fn from_components(components: Vec<Arc<GeneratedComponent>>, total_nodes_analyzed: usize, cache_hits: usize) -> Self {
        let component_count = components.len();
        let average_accuracy = if component_count == 0 {
            0.0
        } else {
            components
                .iter()
                .map(|c| c.metadata.estimated_accuracy)
                .sum::<f64>()
                / component_count as f64
        };
        Self {
            components,
            total_nodes_analyzed,
            component_count,
            cache_hits,
            average_accuracy,
        }
    }
}
