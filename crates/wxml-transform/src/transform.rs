//! Depth-first rewrite of a template tree into flat WXML.

use crate::attrs::convert_attributes;
use crate::error::{TranslateError, TranslateResult};
use crate::expr::reject_filters;
use crate::rules::{classify_element, is_void_tag};
use crate::stack::{CloseOutcome, OpenTagStack};
use smol_str::SmolStr;
use tracing::{debug, warn};
use vue_template_compiler::{ElementNode, ExpressionNode, TemplateNode, TextNode};

/// Options for the tree transformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Emit template comments as `<!-- -->`. When false they are dropped.
    pub comments: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self { comments: true }
    }
}

/// Transform a template tree into flat WXML with default options.
pub fn transform(root: &TemplateNode) -> TranslateResult<String> {
    transform_with(root, &TransformOptions::default())
}

/// Transform a template tree into flat WXML.
///
/// The first unsupported construct aborts the whole transform; no partial
/// output is returned.
pub fn transform_with(root: &TemplateNode, options: &TransformOptions) -> TranslateResult<String> {
    let mut transformer = Transformer::new(options);
    transformer.visit_node(root)?;
    Ok(transformer.finish())
}

/// Traversal state for one transform call.
pub(crate) struct Transformer<'o> {
    out: String,
    stack: OpenTagStack,
    options: &'o TransformOptions,
}

impl<'o> Transformer<'o> {
    pub(crate) fn new(options: &'o TransformOptions) -> Self {
        Self {
            out: String::new(),
            stack: OpenTagStack::new(),
            options,
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn visit_node(&mut self, node: &TemplateNode) -> TranslateResult<()> {
        match node {
            TemplateNode::Element(el) => self.visit_element(el),
            TemplateNode::Expression(expr) => self.visit_expression(expr),
            TemplateNode::Text(text) => {
                self.visit_text(text);
                Ok(())
            }
        }
    }

    fn visit_element(&mut self, el: &ElementNode) -> TranslateResult<()> {
        let dest = classify_element(el)?;
        let attrs = convert_attributes(el)?;
        debug!(source = %el.tag, dest = %dest, "converting element");

        self.out.push('<');
        self.out.push_str(&dest);
        self.out.push_str(&attrs.markup());

        if is_void_tag(&el.tag) || is_void_tag(&dest) {
            if attrs.inserted.is_some() {
                let span = el.attrs.get("v-text").map_or(el.span, |attr| attr.span);
                return Err(TranslateError::directive(
                    "v-text",
                    format!("<{dest}> is a void element and cannot hold content"),
                    span,
                ));
            }
            self.out.push_str(" />");
            if !el.children.is_empty() {
                debug!(tag = %dest, count = el.children.len(), "dropping children of void element");
            }
            return Ok(());
        }

        self.out.push('>');
        if let Some(inserted) = &attrs.inserted {
            self.out.push_str(inserted);
        }
        self.open(dest.clone());
        for child in &el.children {
            self.visit_node(child)?;
        }
        self.close(&dest);
        Ok(())
    }

    fn visit_expression(&mut self, expr: &ExpressionNode) -> TranslateResult<()> {
        reject_filters(&expr.raw, expr.span)?;
        self.out.push_str("{{");
        self.out.push_str(&expr.raw);
        self.out.push_str("}}");
        Ok(())
    }

    fn visit_text(&mut self, text: &TextNode) {
        if !text.is_comment {
            self.out.push_str(&text.content);
        } else if self.options.comments {
            self.out.push_str("<!--");
            self.out.push_str(&text.content);
            self.out.push_str("-->");
        }
    }

    pub(crate) fn open(&mut self, tag: SmolStr) {
        self.stack.push(tag);
    }

    /// Emit the closing tag for the innermost open `tag`.
    pub(crate) fn close(&mut self, tag: &str) {
        match self.stack.close(tag) {
            CloseOutcome::Closed { orphans } => {
                if orphans > 0 {
                    warn!(tag, orphans, "discarded open tags without closing them");
                }
                self.out.push_str("</");
                self.out.push_str(tag);
                self.out.push('>');
            }
            CloseOutcome::Unmatched => {
                warn!(tag, "no open tag to close; nothing emitted");
            }
        }
    }
}
