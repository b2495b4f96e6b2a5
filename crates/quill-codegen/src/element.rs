//! Dialect-neutral markup tree.
//!
//! The element tree sits between the styled tree and the markup emitters.
//! It decides tags, attributes and text once; each emitter only differs in
//! how it spells them.

use crate::options::MarkupDialect;
use crate::style::StyledNode;
use quill_core::PaintKind;

/// Tags that never have content.
const VOID_TAGS: &[&str] = &["img", "input"];

/// Tags that are focusable and interactive without extra attributes.
const NATIVE_INTERACTIVE: &[&str] = &["button", "a", "input", "select", "textarea"];

/// Ordered name keyword to tag mapping. First match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTable {
    entries: Vec<(String, String)>,
}

impl Default for TagTable {
    fn default() -> Self {
        Self::new([
            ("button", "button"),
            ("link", "a"),
            ("nav", "nav"),
            ("header", "header"),
            ("footer", "footer"),
            ("input", "input"),
            ("field", "input"),
            ("image", "img"),
            ("img", "img"),
            ("photo", "img"),
            ("heading", "h2"),
            ("title", "h2"),
        ])
    }
}

impl TagTable {
    pub fn new<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, t)| (k.into().to_lowercase(), t.into()))
                .collect(),
        }
    }

    /// Tag implied by a node name.
    pub fn tag_for(&self, name: &str) -> Option<&str> {
        let lower = name.to_lowercase();
        self.entries
            .iter()
            .find(|(keyword, _)| lower.contains(keyword.as_str()))
            .map(|(_, tag)| tag.as_str())
    }
}

/// How an element refers to its style rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassRef {
    None,
    /// Literal class list.
    Static(String),
    /// Binding into an imported style module.
    Module(String),
}

/// Element attribute, spelled per dialect on render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    Class(ClassRef),
    Role(&'static str),
    TabIndex(i32),
    ButtonType,
    Alt(String),
    Src(String),
    Placeholder(String),
    LazyLoading,
    AsyncDecoding,
    /// Forward clicks to the component's `onClick` prop.
    ClickHandler,
}

impl Attribute {
    fn render(&self, dialect: MarkupDialect) -> Option<String> {
        use MarkupDialect::*;
        Some(match (self, dialect) {
            (Self::Class(ClassRef::None), _) => return None,
            (Self::Class(ClassRef::Static(c)), Componentized) => format!("className=\"{}\"", escape_attr(c)),
            (Self::Class(ClassRef::Static(c)), _) => format!("class=\"{}\"", escape_attr(c)),
            (Self::Class(ClassRef::Module(b)), Componentized) => format!("className={{styles.{}}}", b),
            (Self::Class(ClassRef::Module(b)), Templated) => format!(":class=\"$style.{}\"", b),
            (Self::Class(ClassRef::Module(b)), Static) => format!("class=\"{}\"", b),
            (Self::Role(role), _) => format!("role=\"{}\"", role),
            (Self::TabIndex(i), Componentized) => format!("tabIndex={{{}}}", i),
            (Self::TabIndex(i), _) => format!("tabindex=\"{}\"", i),
            (Self::ButtonType, _) => "type=\"button\"".to_string(),
            (Self::Alt(alt), _) => format!("alt=\"{}\"", escape_attr(alt)),
            (Self::Src(src), _) => format!("src=\"{}\"", escape_attr(src)),
            (Self::Placeholder(p), _) => format!("placeholder=\"{}\"", escape_attr(p)),
            (Self::LazyLoading, _) => "loading=\"lazy\"".to_string(),
            (Self::AsyncDecoding, _) => "decoding=\"async\"".to_string(),
            (Self::ClickHandler, Componentized) => "onClick={props.onClick}".to_string(),
            (Self::ClickHandler, Templated) => "@click=\"$emit('click')\"".to_string(),
            (Self::ClickHandler, Static) => return None,
        })
    }
}

/// One markup element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

/// Switches that affect element construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementOptions {
    pub optimize_images: bool,
}

impl Element {
    /// Build the element tree for a styled tree. `class_of` decides the class
    /// reference of each node.
    pub fn build<F>(styled: &StyledNode<'_>, tags: &TagTable, options: ElementOptions, class_of: &F) -> Element
    where
        F: Fn(&StyledNode<'_>) -> ClassRef,
    {
        let mut root = Self::build_node(styled, tags, options, class_of, false);
        if styled.classification.has_interactivity {
            root.attributes.push(Attribute::ClickHandler);
        }
        root
    }

    fn build_node<F>(
        styled: &StyledNode<'_>,
        tags: &TagTable,
        options: ElementOptions,
        class_of: &F,
        inside_interactive: bool,
    ) -> Element
    where
        F: Fn(&StyledNode<'_>) -> ClassRef,
    {
        let node = styled.node;
        // Void tags cannot hold children, so containers keep a container tag.
        let mut tag = tags
            .tag_for(&node.name)
            .filter(|tag| node.children.is_empty() || !VOID_TAGS.contains(tag))
            .map(str::to_string)
            .unwrap_or_else(|| {
                if node.has_image_fill() && node.children.is_empty() {
                    "img".to_string()
                } else if node.is_text() {
                    "span".to_string()
                } else {
                    "div".to_string()
                }
            });

        // Interactive content cannot nest.
        if inside_interactive && NATIVE_INTERACTIVE.contains(&tag.as_str()) {
            tag = "span".to_string();
        }

        let native = NATIVE_INTERACTIVE.contains(&tag.as_str());
        let mut attributes = vec![Attribute::Class(class_of(styled))];

        if tag == "button" {
            attributes.push(Attribute::ButtonType);
        }
        if styled.classification.interactive_name {
            let role = if node.name.to_lowercase().contains("link") {
                "link"
            } else {
                "button"
            };
            attributes.push(Attribute::Role(role));
            attributes.push(Attribute::TabIndex(0));
        }

        if VOID_TAGS.contains(&tag.as_str()) {
            if tag == "img" {
                let source = node
                    .fills
                    .iter()
                    .filter(|p| p.kind == PaintKind::Image)
                    .find_map(|p| p.image_ref.as_deref())
                    .unwrap_or(&styled.class_name);
                attributes.push(Attribute::Src(format!("assets/{}.png", source)));
                attributes.push(Attribute::Alt(node.name.trim().to_string()));
                if options.optimize_images {
                    attributes.push(Attribute::LazyLoading);
                    attributes.push(Attribute::AsyncDecoding);
                }
            } else if let Some(placeholder) = node.walk().find_map(|n| n.text_content()) {
                attributes.push(Attribute::Placeholder(placeholder.to_string()));
            }
            return Element {
                tag,
                attributes,
                text: None,
                children: Vec::new(),
            };
        }

        let nested = inside_interactive || native;
        let children = styled
            .children
            .iter()
            .map(|child| Self::build_node(child, tags, options, class_of, nested))
            .collect();

        Element {
            tag,
            attributes,
            text: node.text_content().map(str::to_string),
            children,
        }
    }

    pub fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.tag.as_str())
    }

    /// Render the element as indented lines.
    pub fn render(&self, dialect: MarkupDialect, indent: usize) -> String {
        let mut lines = Vec::new();
        self.render_into(dialect, indent, &mut lines);
        lines.join("\n")
    }

    fn render_into(&self, dialect: MarkupDialect, indent: usize, lines: &mut Vec<String>) {
        let spaces = " ".repeat(indent);
        let attrs: String = self
            .attributes
            .iter()
            .filter_map(|a| a.render(dialect))
            .map(|a| format!(" {}", a))
            .collect();
        let open = format!("{}<{}{}", spaces, self.tag, attrs);

        if self.is_void() {
            match dialect {
                MarkupDialect::Static => lines.push(format!("{}>", open)),
                _ => lines.push(format!("{} />", open)),
            }
            return;
        }

        if self.children.is_empty() {
            match (&self.text, dialect) {
                (Some(text), _) => lines.push(format!(
                    "{}>{}</{}>",
                    open,
                    escape_text(text, dialect),
                    self.tag
                )),
                (None, MarkupDialect::Static) => lines.push(format!("{}></{}>", open, self.tag)),
                (None, _) => lines.push(format!("{} />", open)),
            }
            return;
        }

        lines.push(format!("{}>", open));
        if let Some(text) = &self.text {
            lines.push(format!("{}  {}", spaces, escape_text(text, dialect)));
        }
        for child in &self.children {
            child.render_into(dialect, indent + 2, lines);
        }
        lines.push(format!("{}</{}>", spaces, self.tag));
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape literal text content for the target dialect.
fn escape_text(text: &str, dialect: MarkupDialect) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match (c, dialect) {
            ('&', _) => out.push_str("&amp;"),
            ('<', _) => out.push_str("&lt;"),
            ('>', _) => out.push_str("&gt;"),
            ('{', MarkupDialect::Componentized) => out.push_str("{'{'}"),
            ('}', MarkupDialect::Componentized) => out.push_str("{'}'}"),
            ('{', MarkupDialect::Templated) => out.push_str("&#123;"),
            ('}', MarkupDialect::Templated) => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}
