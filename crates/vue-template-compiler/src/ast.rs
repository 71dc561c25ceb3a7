//! AST types for Vue templates.
//!
//! The tree is deliberately small: elements with an ordered attribute map,
//! raw interpolation expressions, and text (comments are text with a flag).
//! Directive attributes are kept verbatim under their source keys; giving
//! them meaning is left to the consumer.

use indexmap::IndexMap;
use smol_str::SmolStr;
use source_map::Span;

/// A node in the template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateNode {
    /// An element.
    Element(ElementNode),
    /// An interpolation (`{{ expr }}`).
    Expression(ExpressionNode),
    /// Literal text or a comment.
    Text(TextNode),
}

impl TemplateNode {
    /// Get the span of this node.
    pub fn span(&self) -> Span {
        match self {
            Self::Element(n) => n.span,
            Self::Expression(n) => n.span,
            Self::Text(n) => n.span,
        }
    }

    /// Create an interpolation node holding `raw` as written between the
    /// delimiters.
    pub fn expression(raw: impl Into<String>) -> Self {
        Self::Expression(ExpressionNode {
            raw: raw.into(),
            span: Span::default(),
        })
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(TextNode {
            content: content.into(),
            is_comment: false,
            span: Span::default(),
        })
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Self::Text(TextNode {
            content: content.into(),
            is_comment: true,
            span: Span::default(),
        })
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl From<ElementNode> for TemplateNode {
    fn from(el: ElementNode) -> Self {
        Self::Element(el)
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementNode {
    /// The tag name as written.
    pub tag: SmolStr,
    /// Attributes keyed by their source key (`class`, `:src`, `@click.stop`),
    /// in source order.
    pub attrs: IndexMap<SmolStr, Attribute>,
    /// Child nodes.
    pub children: Vec<TemplateNode>,
    /// Whether the tag was written as `<tag />`.
    pub self_closing: bool,
    /// Source span.
    pub span: Span,
    /// Span of the tag name.
    pub tag_span: Span,
}

impl ElementNode {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl Into<SmolStr>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
            self_closing: false,
            span: Span::default(),
            tag_span: Span::default(),
        }
    }

    /// Add an attribute with a value.
    pub fn with_attr(mut self, key: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        self.attrs
            .insert(key.into(), Attribute::new(Some(value.into()), Span::default()));
        self
    }

    /// Add a boolean attribute.
    pub fn with_flag(mut self, key: impl Into<SmolStr>) -> Self {
        self.attrs
            .insert(key.into(), Attribute::new(None, Span::default()));
        self
    }

    pub fn with_child(mut self, child: impl Into<TemplateNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Get an attribute value by key. Boolean attributes yield `Some("")`.
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .get(key)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }
}

/// An attribute value and where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    /// The value (None for boolean attributes).
    pub value: Option<String>,
    /// Span of the whole `key="value"` pair.
    pub span: Span,
}

impl Attribute {
    pub fn new(value: Option<String>, span: Span) -> Self {
        Self { value, span }
    }
}

/// An interpolation node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpressionNode {
    /// The text between `{{` and `}}`, untrimmed.
    pub raw: String,
    /// Source span, delimiters included.
    pub span: Span,
}

/// A text or comment node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextNode {
    /// The text content (without comment delimiters).
    pub content: String,
    pub is_comment: bool,
    pub span: Span,
}

/// Check if a source tag never has children or a closing tag in HTML.
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Tags whose content is raw text rather than markup.
pub fn is_raw_text_element(tag: &str) -> bool {
    matches!(tag.to_ascii_lowercase().as_str(), "script" | "style")
}
