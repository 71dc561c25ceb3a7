//! Parser for Vue Single File Components.

use crate::ast::*;
use crate::error::{ErrorCode, ParseError, ParseResult};
use crate::scanner::Scanner;
use source_map::Span;

/// Parse a Vue SFC from source code.
pub fn parse_sfc(source: &str) -> ParseResult<Sfc> {
    SfcParser::new(source).parse()
}

/// Parser for Vue SFC files.
struct SfcParser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> SfcParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            scanner: Scanner::new(source),
        }
    }

    fn parse(mut self) -> ParseResult<Sfc> {
        let mut sfc = Sfc::default();

        while !self.scanner.is_eof() {
            self.scanner.skip_whitespace();

            if self.scanner.is_eof() {
                break;
            }

            if self.scanner.starts_with("<!--") {
                let comment = self.parse_comment()?;
                sfc.comments.push(comment);
                continue;
            }

            if self.scanner.starts_with("<") && !self.scanner.starts_with("</") {
                self.parse_block(&mut sfc)?;
                continue;
            }

            // Stray text between blocks is ignored
            self.scanner.next_char();
        }

        Ok(sfc)
    }

    fn parse_comment(&mut self) -> ParseResult<Comment> {
        let start = self.scanner.pos();
        let content = self.scanner.read_comment().ok_or_else(|| {
            ParseError::new(
                "Unterminated comment",
                Span::new(start as u32, start as u32 + 4),
                ErrorCode::SyntaxError,
            )
        })?;
        Ok(Comment {
            content: content.to_string(),
            span: self.scanner.span_from(start),
        })
    }

    /// Parse a block (template, script, style, or custom).
    fn parse_block(&mut self, sfc: &mut Sfc) -> ParseResult<()> {
        let start = self.scanner.pos();
        self.scanner.consume("<");
        self.scanner.skip_whitespace();

        let tag_name = match self.scanner.read_tag_name() {
            Some(name) => name.to_lowercase(),
            None => return Ok(()),
        };

        let attrs = self.parse_attributes()?;

        self.scanner.skip_whitespace();

        let is_self_closing = self.scanner.consume("/>");
        if !is_self_closing {
            self.scanner.consume(">");
        }

        let (content, content_span) = if is_self_closing {
            (String::new(), Span::empty(self.scanner.pos() as u32))
        } else {
            let content_start = self.scanner.pos();
            let content = self.scanner.read_block_content(&tag_name);
            (
                content.to_string(),
                self.scanner.span_from(content_start),
            )
        };

        if !is_self_closing {
            if self.scanner.is_eof() {
                return Err(ParseError::unclosed_tag(
                    &tag_name,
                    Span::new(start as u32, content_span.start),
                ));
            }
            self.scanner.consume_until(">");
            self.scanner.consume(">");
        }

        let span = self.scanner.span_from(start);
        let block = SfcBlock {
            span,
            content_span,
            content,
            attrs,
        };

        match tag_name.as_str() {
            "template" => {
                if sfc.template.is_some() {
                    return Err(ParseError::duplicate_block("template", span));
                }
                let lang = block.get_attr("lang").map(String::from);
                sfc.template = Some(TemplateBlock { block, lang });
            }
            "script" => {
                if sfc.script.is_some() {
                    return Err(ParseError::duplicate_block("script", span));
                }
                let lang = block.get_attr("lang").map(String::from);
                sfc.script = Some(ScriptBlock { block, lang });
            }
            "style" => {
                let lang = block.get_attr("lang").map(String::from);
                let scoped = block.has_attr("scoped");
                sfc.styles.push(StyleBlock {
                    block,
                    lang,
                    scoped,
                });
            }
            _ => {
                sfc.custom_blocks.push(CustomBlock {
                    block,
                    block_type: tag_name.into(),
                });
            }
        }

        Ok(())
    }

    fn parse_attributes(&mut self) -> ParseResult<Vec<BlockAttr>> {
        let mut attrs = Vec::new();

        loop {
            self.scanner.skip_whitespace();

            if self.scanner.starts_with(">") || self.scanner.starts_with("/>") || self.scanner.is_eof()
            {
                break;
            }

            let attr_start = self.scanner.pos();

            let name = match self.scanner.read_attr_name() {
                Some(n) => n,
                None => {
                    self.scanner.next_char();
                    continue;
                }
            };

            self.scanner.skip_whitespace();

            let value = if self.scanner.consume("=") {
                self.scanner.skip_whitespace();
                if self.scanner.starts_with("\"") || self.scanner.starts_with("'") {
                    let (v, _quote) = self.scanner.read_quoted_string().ok_or_else(|| {
                        ParseError::new(
                            format!("Unterminated value for attribute `{}`", name),
                            self.scanner.span_from(attr_start),
                            ErrorCode::SyntaxError,
                        )
                    })?;
                    Some(v.to_string())
                } else {
                    Some(self.scanner.read_unquoted_value().to_string())
                }
            } else {
                None
            };

            attrs.push(BlockAttr {
                name: name.into(),
                value,
                span: self.scanner.span_from(attr_start),
            });
        }

        Ok(attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty() {
        let sfc = parse_sfc("").unwrap();
        assert!(sfc.template.is_none());
        assert!(sfc.script.is_none());
        assert!(sfc.styles.is_empty());
    }

    #[test]
    fn test_parse_template_only() {
        let sfc = parse_sfc("<template><div>Hello</div></template>").unwrap();
        let template = sfc.template.unwrap();
        assert_eq!(template.content, "<div>Hello</div>");
        assert_eq!(template.content_span, Span::new(10, 26));
    }

    #[test]
    fn test_parse_template_with_nested_template() {
        let source = "<template>\n<div><template v-if=\"ok\"><span>a</span></template></div>\n</template>\n<script>\nexport default {}\n</script>";
        let sfc = parse_sfc(source).unwrap();
        let template = sfc.template.unwrap();
        assert_eq!(
            template.content.trim(),
            "<div><template v-if=\"ok\"><span>a</span></template></div>"
        );
        assert!(sfc.script.is_some());
    }

    #[test]
    fn test_parse_template_lang() {
        let sfc = parse_sfc("<template lang=\"pug\">div</template>").unwrap();
        assert_eq!(sfc.template.unwrap().lang.as_deref(), Some("pug"));
    }

    #[test]
    fn test_parse_multiple_styles() {
        let source = r#"<style scoped>
.foo { color: red; }
</style>
<style lang="scss">
.bar { color: blue; }
</style>"#;
        let sfc = parse_sfc(source).unwrap();
        assert_eq!(sfc.styles.len(), 2);
        assert!(sfc.styles[0].scoped);
        assert!(!sfc.styles[1].scoped);
        assert_eq!(sfc.styles[1].lang.as_deref(), Some("scss"));
    }

    #[test]
    fn test_parse_custom_block() {
        let source = r#"<i18n lang="json">
{ "en": { "hello": "Hello" } }
</i18n>"#;
        let sfc = parse_sfc(source).unwrap();
        assert_eq!(sfc.custom_blocks.len(), 1);
        assert_eq!(sfc.custom_blocks[0].block_type.as_str(), "i18n");
        assert_eq!(sfc.custom_blocks[0].get_attr("lang"), Some("json"));
    }

    #[test]
    fn test_parse_with_comments() {
        let source = "<!-- page header -->\n<template>\n  <div>Hello</div>\n</template>";
        let sfc = parse_sfc(source).unwrap();
        assert_eq!(sfc.comments.len(), 1);
        assert!(sfc.comments[0].content.contains("page header"));
        assert!(sfc.template.is_some());
    }

    #[test]
    fn test_duplicate_template_is_an_error() {
        let err = parse_sfc("<template><a/></template><template><b/></template>").unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateBlock);
    }

    #[test]
    fn test_unclosed_template_is_an_error() {
        let err = parse_sfc("<template><div></div>").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnclosedTag);
        assert_eq!(err.message, "Unclosed tag: <template>");
    }
}
