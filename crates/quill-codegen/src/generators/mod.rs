//! Code emitters for the supported markup and stylesheet dialects.
//!
//! The dialect pair is validated once and dispatched once per call. Markup
//! backends render the shared element tree; stylesheet backends serialize
//! the styled tree.

mod css;
mod html;
mod jsx;
mod tailwind;
mod templates;
mod types;
mod vue;

pub use css::kebab_property;
pub use tailwind::UtilityScale;
pub use templates::{indent_lines, TemplateEngine};
pub use types::{props_for, PropSpec};

use crate::element::{ClassRef, Element, ElementOptions, TagTable};
use crate::error::Result;
use crate::naming::module_binding;
use crate::options::{Dialect, MarkupDialect, StyleDialect};
use crate::responsive::Breakpoints;
use crate::style::StyledNode;
use serde::Serialize;

/// Switches that shape emitted code.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitOptions {
    /// Emit static type declarations.
    pub typescript: bool,
    pub optimize_images: bool,
    /// Breakpoints for responsive output; `None` disables it.
    pub breakpoints: Option<Breakpoints>,
}

/// Output of one emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmittedCode {
    pub markup: String,
    pub stylesheet: String,
    pub type_declarations: Option<String>,
}

/// Everything a markup backend needs to assemble a component file.
pub(crate) struct ComponentParts<'p> {
    pub name: &'p str,
    /// Root element rendered at indent zero.
    pub body: String,
    pub props: &'p [PropSpec],
    pub typescript: bool,
    pub style: StyleDialect,
    pub stylesheet: &'p str,
    /// The component forwards clicks.
    pub interactive: bool,
}

/// Dispatches a styled tree to the markup and stylesheet backends.
#[derive(Debug)]
pub struct Emitter {
    templates: TemplateEngine,
    tags: TagTable,
    utility: UtilityScale,
}

impl Emitter {
    pub fn new(tags: TagTable, utility: UtilityScale) -> Result<Self> {
        Ok(Self {
            templates: TemplateEngine::with_component_templates()?,
            tags,
            utility,
        })
    }

    pub fn utility_scale(&self) -> &UtilityScale {
        &self.utility
    }

    /// Emit markup, stylesheet and optional type declarations for a
    /// component rooted at `root`.
    pub fn emit(
        &self,
        root: &StyledNode<'_>,
        name: &str,
        dialect: Dialect,
        options: &EmitOptions,
    ) -> Result<EmittedCode> {
        // Breakpoint output only for designs that adapt to the viewport.
        let breakpoints = options
            .breakpoints
            .as_ref()
            .filter(|_| root.has_responsive_design());
        let element_options = ElementOptions {
            optimize_images: options.optimize_images,
        };

        let mut element = match dialect.style {
            StyleDialect::Utility => Element::build(root, &self.tags, element_options, &|s: &StyledNode<'_>| {
                ClassRef::Static(self.utility.node_classes(s, breakpoints))
            }),
            StyleDialect::Plain => Element::build(root, &self.tags, element_options, &|s: &StyledNode<'_>| {
                ClassRef::Static(s.class_name.clone())
            }),
            StyleDialect::ScopedModule => {
                Element::build(root, &self.tags, element_options, &|s: &StyledNode<'_>| {
                    ClassRef::Module(module_binding(&s.class_name))
                })
            }
            StyleDialect::CssInJs => Element::build(root, &self.tags, element_options, &|s: &StyledNode<'_>| {
                if std::ptr::eq(s.node, root.node) {
                    ClassRef::None
                } else {
                    ClassRef::Static(s.class_name.clone())
                }
            }),
        };

        let stylesheet = match dialect.style {
            StyleDialect::Utility => tailwind::stylesheet(),
            StyleDialect::Plain => css::plain(root, breakpoints),
            StyleDialect::ScopedModule => css::scoped_module(root, breakpoints),
            StyleDialect::CssInJs => {
                let sheet = css::styled_root(root, name, &element.tag, breakpoints);
                element.tag = format!("{}Root", name);
                sheet
            }
        };

        let props = props_for(root.classification);
        let parts = ComponentParts {
            name,
            body: element.render(dialect.markup, 0),
            props: &props,
            typescript: options.typescript,
            style: dialect.style,
            stylesheet: &stylesheet,
            interactive: root.classification.has_interactivity,
        };

        let markup = match dialect.markup {
            MarkupDialect::Componentized => jsx::render(&self.templates, &parts)?,
            MarkupDialect::Templated => vue::render(&self.templates, &parts)?,
            MarkupDialect::Static => html::render(&self.templates, &parts)?,
        };

        let type_declarations = options
            .typescript
            .then(|| types::declaration_file(name, &props));

        Ok(EmittedCode {
            markup,
            stylesheet,
            type_declarations,
        })
    }
}
