//! The generation pipeline.
//!
//! classify -> resolve styles -> emit -> audit -> responsive variants ->
//! integrate custom code -> metadata -> cache. Every stage is a pure tree
//! walk; the result cache is the only shared state.

use crate::analyzer::{Classifier, ComponentClassification, Complexity};
use crate::audit::Auditor;
use crate::cache::{CacheKeyParts, ResultCache};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::generators::{props_for, EmitOptions, Emitter};
use crate::integrate::Integrator;
use crate::model::{ComponentMetadata, GeneratedComponent, GenerationReport};
use crate::naming::sanitize_component_name;
use crate::options::{CustomCode, Dialect, GenerationOptions, MarkupDialect, StyleDialect};
use crate::responsive::{Breakpoints, ResponsiveGenerator};
use crate::style::{StyleResolver, StyledNode};
use quill_core::{SceneDocument, SceneNode};
use std::sync::Arc;
use std::time::Instant;

const CACHE_SCOPE: &str = "component";

const BASE_ACCURACY: f64 = 0.95;
const COMPLEX_PENALTY: f64 = 0.10;
const MEDIUM_PENALTY: f64 = 0.05;
const IMAGE_PENALTY: f64 = 0.05;
const WARNING_PENALTY: f64 = 0.02;

/// Heuristic estimate of how faithfully the output reproduces the design.
pub fn estimate_accuracy(classification: &ComponentClassification, node: &SceneNode, warnings: usize) -> f64 {
    let mut accuracy = BASE_ACCURACY;
    accuracy -= match classification.complexity {
        Complexity::Complex => COMPLEX_PENALTY,
        Complexity::Medium => MEDIUM_PENALTY,
        Complexity::Simple => 0.0,
    };
    if node.walk().any(SceneNode::has_image_fill) {
        accuracy -= IMAGE_PENALTY;
    }
    accuracy -= WARNING_PENALTY * warnings as f64;
    accuracy.clamp(0.5, 1.0)
}

/// Packages the emitted code depends on.
pub fn dependencies(dialect: Dialect, typescript: bool) -> Vec<String> {
    let mut deps = Vec::new();
    match dialect.markup {
        MarkupDialect::Componentized => deps.push("react"),
        MarkupDialect::Templated => deps.push("vue"),
        MarkupDialect::Static => {}
    }
    match dialect.style {
        StyleDialect::Utility => deps.push("tailwindcss"),
        StyleDialect::CssInJs => deps.push("styled-components"),
        StyleDialect::Plain | StyleDialect::ScopedModule => {}
    }
    if typescript {
        deps.push("typescript");
    }
    deps.into_iter().map(String::from).collect()
}

/// Turns scene nodes into [`GeneratedComponent`]s.
#[derive(Debug)]
pub struct CodegenEngine {
    version: String,
    classifier: Classifier,
    resolver: StyleResolver,
    emitter: Emitter,
    auditor: Auditor,
    responsive: ResponsiveGenerator,
    integrator: Integrator,
    cache: ResultCache,
}

impl CodegenEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self {
            emitter: Emitter::new(config.tags, config.utility)?,
            version: config.version,
            classifier: Classifier::new(config.classifier),
            resolver: StyleResolver::new(),
            auditor: Auditor::new(config.audit),
            responsive: ResponsiveGenerator::new(config.responsive),
            integrator: Integrator::new(),
            cache: ResultCache::new(),
        })
    }

    /// Engine with the default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(EngineConfig::default())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Generate the component for `target`, a node id or a component index
    /// name or key.
    pub fn generate(
        &self,
        document: &SceneDocument,
        target: &str,
        options: &GenerationOptions,
        custom: &CustomCode,
    ) -> Result<Arc<GeneratedComponent>> {
        let node = document.resolve_target(target)?;
        self.generate_node(node, options, custom)
    }

    /// Generate the component rooted at `node`.
    pub fn generate_node(
        &self,
        node: &SceneNode,
        options: &GenerationOptions,
        custom: &CustomCode,
    ) -> Result<Arc<GeneratedComponent>> {
        self.generate_tracked(node, options, custom).map(|(component, _)| component)
    }

    /// Generate every target and aggregate the results. Fails on the first
    /// target that cannot be generated.
    pub fn generate_many<I, S>(
        &self,
        document: &SceneDocument,
        targets: I,
        options: &GenerationOptions,
        custom: &CustomCode,
    ) -> Result<GenerationReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut components = Vec::new();
        let mut total_nodes = 0;
        let mut cache_hits = 0;

        for target in targets {
            let node = document.resolve_target(target.as_ref())?;
            let (component, hit) = self.generate_tracked(node, options, custom)?;
            total_nodes += node.walk().count();
            if hit {
                cache_hits += 1;
            }
            components.push(component);
        }

        let report = GenerationReport::from_components(components, total_nodes, cache_hits);
        log::debug!(
            "generated {} components ({} nodes, {} cache hits, accuracy {:.2})",
            report.component_count,
            report.total_nodes_analyzed,
            report.cache_hits,
            report.average_accuracy
        );
        Ok(report)
    }

    /// Generate every entry of the document's component index, in index
    /// order.
    pub fn generate_components(
        &self,
        document: &SceneDocument,
        options: &GenerationOptions,
        custom: &CustomCode,
    ) -> Result<GenerationReport> {
        self.generate_many(document, document.components.keys(), options, custom)
    }

    fn generate_tracked(
        &self,
        node: &SceneNode,
        options: &GenerationOptions,
        custom: &CustomCode,
    ) -> Result<(Arc<GeneratedComponent>, bool)> {
        let dialect = Dialect::from_options(options)?;

        let key = ResultCache::generate_key(
            CACHE_SCOPE,
            CacheKeyParts {
                node,
                options,
                custom,
                version: &self.version,
            },
        )?;
        if let Some(component) = self.cache.get(&key) {
            return Ok((component, true));
        }

        let component = Arc::new(self.build(node, dialect, options, custom)?);
        self.cache.set(key, Arc::clone(&component));
        Ok((component, false))
    }

    fn build(
        &self,
        node: &SceneNode,
        dialect: Dialect,
        options: &GenerationOptions,
        custom: &CustomCode,
    ) -> Result<GeneratedComponent> {
        let started = Instant::now();
        let name = sanitize_component_name(&node.name);

        let classification = self.classifier.classify(node);
        log::debug!(
            "classified '{}' as {} ({})",
            node.name,
            classification.category,
            classification.complexity
        );

        let responsive = options.include_responsive.then_some(&self.responsive);
        let styled = StyledNode::build(node, &classification, &self.resolver, responsive);

        let emit_options = EmitOptions {
            typescript: options.typescript,
            optimize_images: options.optimize_images,
            breakpoints: options
                .include_responsive
                .then(|| Breakpoints::from_overrides(options.breakpoints.as_ref())),
        };
        let emitted = self.emitter.emit(&styled, &name, dialect, &emit_options)?;
        log::debug!("emitted {} for '{}' as {}/{}", name, node.id, dialect.markup, dialect.style);

        let accessibility = options.include_accessibility.then(|| {
            self.auditor
                .audit(node, &classification, &emitted.markup, options.audit_profile)
        });

        let integration = self
            .integrator
            .integrate(&emitted.markup, &emitted.stylesheet, custom, dialect.markup);

        let metadata = ComponentMetadata {
            source_node_id: node.id.clone(),
            category: classification.category,
            complexity: classification.complexity,
            estimated_accuracy: estimate_accuracy(&classification, node, integration.warnings.len()),
            generation_time: started.elapsed(),
            dependencies: dependencies(dialect, options.typescript),
            suggested_props: props_for(&classification)
                .iter()
                .map(|p| p.name.to_string())
                .collect(),
            warnings: integration.warnings,
            markup_dialect: dialect.markup,
            style_dialect: dialect.style,
            engine_version: self.version.clone(),
        };

        Ok(GeneratedComponent {
            id: node.id.clone(),
            sanitized_name: name,
            markup: integration.markup,
            stylesheet: integration.stylesheet,
            type_declarations: emitted.type_declarations,
            accessibility,
            responsive: styled.responsive.clone(),
            metadata,
        })
    }
}
