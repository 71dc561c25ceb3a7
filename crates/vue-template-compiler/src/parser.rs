//! Parser for Vue templates.

use crate::ast::*;
use crate::error::{CompileError, CompileErrorCode, CompileResult};
use indexmap::IndexMap;
use smol_str::SmolStr;
use source_map::Span;
use vue_parser::scanner::Scanner;

/// Parse a Vue template into its single root node.
///
/// Whitespace-only text between tags is dropped and comments are kept. The
/// template must contain exactly one root element; comments around it are
/// discarded.
pub fn parse_template(source: &str) -> CompileResult<TemplateNode> {
    TemplateParser::new(source).parse()
}

/// Parser for Vue templates.
struct TemplateParser<'a> {
    scanner: Scanner<'a>,
    source: &'a str,
}

impl<'a> TemplateParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            scanner: Scanner::new(source),
            source,
        }
    }

    fn parse(mut self) -> CompileResult<TemplateNode> {
        let nodes = self.parse_children(None)?;
        let mut root: Option<ElementNode> = None;

        for node in nodes {
            match node {
                TemplateNode::Element(el) => {
                    if root.is_some() {
                        return Err(CompileError::new(
                            "Component template should contain exactly one root element",
                            el.span,
                            CompileErrorCode::InvalidRoot,
                        ));
                    }
                    root = Some(el);
                }
                TemplateNode::Text(text) if text.is_comment => {}
                other => {
                    return Err(CompileError::new(
                        "Text outside the root element is not allowed",
                        other.span(),
                        CompileErrorCode::InvalidRoot,
                    ));
                }
            }
        }

        root.map(TemplateNode::Element).ok_or_else(|| {
            CompileError::new(
                "Template is empty: expected one root element",
                Span::new(0, self.source.len() as u32),
                CompileErrorCode::InvalidRoot,
            )
        })
    }

    /// Parse children until the closing tag of `open` or EOF.
    fn parse_children(&mut self, open: Option<(&str, Span)>) -> CompileResult<Vec<TemplateNode>> {
        let mut children = Vec::new();

        loop {
            if self.scanner.is_eof() {
                return match open {
                    Some((tag, span)) => Err(CompileError::unclosed_element(tag, span)),
                    None => Ok(children),
                };
            }

            if self.scanner.starts_with("</") {
                let start = self.scanner.pos();
                let found = self.peek_closing_tag_name();
                let span = Span::new(start as u32, (start + 2 + found.len()) as u32);
                return match open {
                    Some((tag, _)) if found == tag => Ok(children),
                    Some((tag, _)) => {
                        Err(CompileError::mismatched_closing_tag(Some(tag), found, span))
                    }
                    None => Err(CompileError::mismatched_closing_tag(None, found, span)),
                };
            }

            if let Some(node) = self.parse_node()? {
                children.push(node);
            }
        }
    }

    /// Parse a single node. Returns `None` for dropped whitespace.
    fn parse_node(&mut self) -> CompileResult<Option<TemplateNode>> {
        if self.scanner.starts_with("<!--") {
            return self.parse_comment().map(Some);
        }

        if self.at_element_start() {
            return self.parse_element().map(Some);
        }

        if self.scanner.starts_with("{{") {
            return self.parse_interpolation().map(Some);
        }

        self.parse_text()
    }

    fn parse_comment(&mut self) -> CompileResult<TemplateNode> {
        let start = self.scanner.pos();
        let content = self.scanner.read_comment().ok_or_else(|| {
            CompileError::new(
                "Unterminated comment",
                Span::new(start as u32, start as u32 + 4),
                CompileErrorCode::UnterminatedComment,
            )
        })?;
        Ok(TemplateNode::Text(TextNode {
            content: content.to_string(),
            is_comment: true,
            span: self.scanner.span_from(start),
        }))
    }

    fn parse_interpolation(&mut self) -> CompileResult<TemplateNode> {
        let start = self.scanner.pos();
        self.scanner.consume("{{");
        let raw = self.scanner.consume_until("}}");
        if !self.scanner.consume("}}") {
            return Err(CompileError::new(
                "Unterminated interpolation: missing `}}`",
                Span::new(start as u32, start as u32 + 2),
                CompileErrorCode::UnterminatedInterpolation,
            ));
        }
        Ok(TemplateNode::Expression(ExpressionNode {
            raw: raw.to_string(),
            span: self.scanner.span_from(start),
        }))
    }

    fn parse_text(&mut self) -> CompileResult<Option<TemplateNode>> {
        let start = self.scanner.pos();
        // The first character is never markup here, so always take it
        self.scanner.next_char();
        while !self.scanner.is_eof() && !self.at_markup() {
            self.scanner.next_char();
        }

        let span = self.scanner.span_from(start);
        let content = &self.source[span.to_range()];
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(TemplateNode::Text(TextNode {
            content: content.to_string(),
            is_comment: false,
            span,
        })))
    }

    fn parse_element(&mut self) -> CompileResult<TemplateNode> {
        let start = self.scanner.pos();
        self.scanner.consume("<");

        let tag_start = self.scanner.pos();
        let tag = self
            .scanner
            .read_tag_name()
            .ok_or_else(|| {
                CompileError::new(
                    "Expected tag name",
                    Span::new(start as u32, tag_start as u32),
                    CompileErrorCode::MissingTagName,
                )
            })?
            .to_string();
        let tag_span = self.scanner.span_from(tag_start);

        let attrs = self.parse_attributes()?;

        self.scanner.skip_whitespace();

        let self_closing = self.scanner.consume("/>");
        if !self_closing && !self.scanner.consume(">") {
            return Err(CompileError::unclosed_element(
                &tag,
                self.scanner.span_from(start),
            ));
        }

        let open_span = self.scanner.span_from(start);
        let is_void = is_void_element(&tag);

        let children = if self_closing || is_void {
            Vec::new()
        } else if is_raw_text_element(&tag) {
            self.parse_raw_text(&tag, open_span)?
        } else {
            self.parse_children(Some((tag.as_str(), open_span)))?
        };

        if !self_closing {
            // A void element may still be followed by a redundant `</img>`
            let closing = format!("</{}", tag);
            if !is_void || self.scanner.starts_with(&closing) {
                self.scanner.consume("</");
                self.scanner.read_tag_name();
                self.scanner.consume_until(">");
                self.scanner.consume(">");
            }
        }

        Ok(TemplateNode::Element(ElementNode {
            tag: tag.into(),
            attrs,
            children,
            self_closing,
            span: self.scanner.span_from(start),
            tag_span,
        }))
    }

    /// Read the body of a `<script>`/`<style>` element as a single text node.
    fn parse_raw_text(&mut self, tag: &str, open_span: Span) -> CompileResult<Vec<TemplateNode>> {
        let start = self.scanner.pos();
        let content = self.scanner.read_block_content(tag);
        if self.scanner.is_eof() {
            return Err(CompileError::unclosed_element(tag, open_span));
        }
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![TemplateNode::Text(TextNode {
            content: content.to_string(),
            is_comment: false,
            span: self.scanner.span_from(start),
        })])
    }

    fn parse_attributes(&mut self) -> CompileResult<IndexMap<SmolStr, Attribute>> {
        let mut attrs = IndexMap::new();

        loop {
            self.scanner.skip_whitespace();

            if self.scanner.is_eof() || self.scanner.starts_with(">") || self.scanner.starts_with("/>")
            {
                break;
            }

            let attr_start = self.scanner.pos();

            let name = match self.scanner.read_attr_name() {
                Some(name) => name,
                None => {
                    self.scanner.next_char();
                    continue;
                }
            };

            self.scanner.skip_whitespace();

            let value = if self.scanner.consume("=") {
                self.scanner.skip_whitespace();
                Some(self.parse_attribute_value(name, attr_start)?)
            } else {
                None
            };

            let span = self.scanner.span_from(attr_start);
            if attrs.contains_key(name) {
                return Err(CompileError::duplicate_attribute(name, span));
            }
            attrs.insert(SmolStr::from(name), Attribute::new(value, span));
        }

        Ok(attrs)
    }

    fn parse_attribute_value(&mut self, name: &str, attr_start: usize) -> CompileResult<String> {
        if self.scanner.starts_with("\"") || self.scanner.starts_with("'") {
            let (value, _quote) = self.scanner.read_quoted_string().ok_or_else(|| {
                CompileError::new(
                    format!("Unterminated value for attribute `{}`", name),
                    self.scanner.span_from(attr_start),
                    CompileErrorCode::UnterminatedAttribute,
                )
            })?;
            Ok(value.to_string())
        } else {
            Ok(self.scanner.read_unquoted_value().to_string())
        }
    }

    /// Read the tag name after `</` without consuming anything.
    fn peek_closing_tag_name(&self) -> &'a str {
        let rest = &self.scanner.remaining()[2..];
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':'))
            .unwrap_or(rest.len());
        &rest[..len]
    }

    fn at_element_start(&self) -> bool {
        let mut chars = self.scanner.remaining().chars();
        chars.next() == Some('<') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
    }

    fn at_markup(&self) -> bool {
        self.scanner.starts_with("{{")
            || self.scanner.starts_with("</")
            || self.scanner.starts_with("<!--")
            || self.at_element_start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn root(source: &str) -> ElementNode {
        match parse_template(source).unwrap() {
            TemplateNode::Element(el) => el,
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_element() {
        let el = root("<div>Hello</div>");
        assert_eq!(el.tag, "div");
        assert_eq!(el.children, vec![TemplateNode::Text(TextNode {
            content: "Hello".into(),
            is_comment: false,
            span: Span::new(5, 10),
        })]);
    }

    #[test]
    fn test_interpolation_keeps_raw_whitespace() {
        let el = root("<span>{{ msg }}</span>");
        match &el.children[0] {
            TemplateNode::Expression(expr) => {
                assert_eq!(expr.raw, " msg ");
                assert_eq!(expr.span, Span::new(6, 15));
            }
            other => panic!("Expected expression, got {:?}", other),
        }
    }

    #[test]
    fn test_text_and_interpolation_are_split() {
        let el = root("<p>Hello {{ name }}!</p>");
        assert_eq!(el.children.len(), 3);
        assert!(matches!(&el.children[0], TemplateNode::Text(t) if t.content == "Hello "));
        assert!(matches!(&el.children[1], TemplateNode::Expression(e) if e.raw == " name "));
        assert!(matches!(&el.children[2], TemplateNode::Text(t) if t.content == "!"));
    }

    #[test]
    fn test_attributes_keep_source_order_and_keys() {
        let el = root(r#"<button class="btn" @click.stop="onTap" :disabled="busy" plain>Go</button>"#);
        let keys: Vec<&str> = el.attrs.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["class", "@click.stop", ":disabled", "plain"]);
        assert_eq!(el.get_attr("@click.stop"), Some("onTap"));
        assert_eq!(el.attrs["plain"].value, None);
    }

    #[test]
    fn test_whitespace_only_text_is_dropped() {
        let el = root("<div>\n  <span>a</span>\n  <span>b</span>\n</div>");
        assert_eq!(el.children.len(), 2);
    }

    #[test]
    fn test_comments_are_text_with_flag() {
        let el = root("<div><!-- note --></div>");
        match &el.children[0] {
            TemplateNode::Text(text) => {
                assert!(text.is_comment);
                assert_eq!(text.content, " note ");
            }
            other => panic!("Expected comment, got {:?}", other),
        }
    }

    #[test]
    fn test_void_and_self_closing_elements() {
        let el = root(r#"<div><img :src="url"><input/><br></br></div>"#);
        let tags: Vec<&str> = el
            .children
            .iter()
            .filter_map(|c| c.as_element())
            .map(|e| e.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["img", "input", "br"]);
        assert!(el.children[1].as_element().unwrap().self_closing);
    }

    #[test]
    fn test_quoted_value_may_contain_angle_brackets() {
        let el = root(r#"<div v-if="a > b">x</div>"#);
        assert_eq!(el.get_attr("v-if"), Some("a > b"));
    }

    #[test]
    fn test_root_comment_is_ignored() {
        let el = root("<!-- page -->\n<div></div>");
        assert_eq!(el.tag, "div");
    }

    #[test]
    fn test_lone_angle_bracket_is_text() {
        let el = root("<p>a < b</p>");
        assert!(matches!(&el.children[0], TemplateNode::Text(t) if t.content == "a < b"));
    }

    #[test]
    fn test_unclosed_element() {
        let err = parse_template("<div><span>text</div>").unwrap_err();
        assert_eq!(err.code, CompileErrorCode::MismatchedClosingTag);
        assert_eq!(err.message, "Expected </span>, found </div>");

        let err = parse_template("<div><span>text</span>").unwrap_err();
        assert_eq!(err.code, CompileErrorCode::UnclosedElement);
    }

    #[test]
    fn test_unterminated_constructs() {
        assert_eq!(
            parse_template("<div>{{ msg </div>").unwrap_err().code,
            CompileErrorCode::UnterminatedInterpolation
        );
        assert_eq!(
            parse_template("<div><!-- x </div>").unwrap_err().code,
            CompileErrorCode::UnterminatedComment
        );
        assert_eq!(
            parse_template("<div class=\"a></div>").unwrap_err().code,
            CompileErrorCode::UnterminatedAttribute
        );
    }

    #[test]
    fn test_duplicate_attribute() {
        let err = parse_template(r#"<div class="a" class="b"></div>"#).unwrap_err();
        assert_eq!(err.code, CompileErrorCode::DuplicateAttribute);
    }

    #[test]
    fn test_root_must_be_single_element() {
        assert_eq!(
            parse_template("<div></div><div></div>").unwrap_err().code,
            CompileErrorCode::InvalidRoot
        );
        assert_eq!(parse_template("  ").unwrap_err().code, CompileErrorCode::InvalidRoot);
        assert_eq!(parse_template("hello").unwrap_err().code, CompileErrorCode::InvalidRoot);
    }

    #[test]
    fn test_stray_closing_tag() {
        let err = parse_template("<div></div></span>").unwrap_err();
        assert_eq!(err.message, "Unexpected closing tag </span>");
    }
}
