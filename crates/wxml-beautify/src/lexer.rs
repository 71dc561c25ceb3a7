//! Splits flat markup into tags, text and raw blocks.

use crate::options::FormatOptions;

/// Tags whose content is script or style text.
const RAW_TEXT_TAGS: &[&str] = &["script", "wxs", "style"];

/// Tags that never take a closing tag, even when written without `/>`.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr", "image", "icon",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name ...>`
    Open { name: &'a str, markup: &'a str },
    /// `<name ... />` or a void tag.
    SelfClosing { markup: &'a str },
    /// `</name>`
    Close { name: &'a str, markup: &'a str },
    /// `<!-- ... -->`, delimiters included.
    Comment(&'a str),
    Text(&'a str),
    /// Content of a raw-text or unformatted element.
    Raw { content: &'a str, script: bool },
}

pub struct Lexer<'a, 'o> {
    source: &'a str,
    pos: usize,
    options: &'o FormatOptions,
    /// Set after opening a raw or unformatted element.
    raw_until: Option<(&'a str, bool)>,
}

impl<'a, 'o> Lexer<'a, 'o> {
    pub fn new(source: &'a str, options: &'o FormatOptions) -> Self {
        Self {
            source,
            pos: 0,
            options,
            raw_until: None,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn take(&mut self, len: usize) -> &'a str {
        let text = &self.source[self.pos..self.pos + len];
        self.pos += len;
        text
    }

    fn lex_raw(&mut self, tag: &str, script: bool) -> Token<'a> {
        let closing = format!("</{tag}");
        let len = self.rest().find(&closing).unwrap_or(self.rest().len());
        Token::Raw {
            content: self.take(len),
            script,
        }
    }

    fn lex_comment(&mut self) -> Token<'a> {
        let len = self
            .rest()
            .find("-->")
            .map_or(self.rest().len(), |i| i + 3);
        Token::Comment(self.take(len))
    }

    /// Scan a tag up to its `>`, skipping quoted attribute values.
    fn lex_tag(&mut self) -> Option<Token<'a>> {
        let rest = self.rest();
        let mut quote = None;
        let mut end = None;
        for (i, b) in rest.bytes().enumerate().skip(1) {
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'>') => {
                    end = Some(i + 1);
                    break;
                }
                _ => {}
            }
        }
        let markup = self.take(end?);

        if let Some(body) = markup.strip_prefix("</") {
            return Some(Token::Close {
                name: tag_name(body),
                markup,
            });
        }
        let name = tag_name(&markup[1..]);
        if name.is_empty() || markup.ends_with("/>") || VOID_TAGS.contains(&name) {
            return Some(Token::SelfClosing { markup });
        }
        if RAW_TEXT_TAGS.contains(&name) {
            self.raw_until = Some((name, true));
        } else if self.options.is_unformatted(name) {
            self.raw_until = Some((name, false));
        }
        Some(Token::Open { name, markup })
    }

    /// Text up to the next tag. `<` inside `{{ }}` does not start a tag.
    fn lex_text(&mut self) -> Token<'a> {
        let rest = self.rest();
        let bytes = rest.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i..].starts_with(b"{{") {
                i = rest[i..].find("}}").map_or(bytes.len(), |end| i + end + 2);
                continue;
            }
            if i > 0 && bytes[i] == b'<' && starts_markup(&rest[i..]) {
                break;
            }
            i += 1;
        }
        Token::Text(self.take(i))
    }
}

impl<'a> Iterator for Lexer<'a, '_> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.pos >= self.source.len() {
            return None;
        }
        if let Some((tag, script)) = self.raw_until.take() {
            let token = self.lex_raw(tag, script);
            if let Token::Raw { content, .. } = token {
                if !content.is_empty() {
                    return Some(token);
                }
            }
        }

        let rest = self.rest();
        if rest.starts_with("<!--") {
            return Some(self.lex_comment());
        }
        if starts_markup(rest) {
            if let Some(token) = self.lex_tag() {
                return Some(token);
            }
            // unterminated tag: the rest is text
            return Some(Token::Text(self.take(rest.len())));
        }
        Some(self.lex_text())
    }
}

fn starts_markup(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next() == Some('<')
        && matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!')
}

fn tag_name(text: &str) -> &str {
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')))
        .unwrap_or(text.len());
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(source: &str) -> Vec<Token<'_>> {
        let options = FormatOptions::default();
        Lexer::new(source, &options).collect()
    }

    #[test]
    fn test_tags_and_text() {
        assert_eq!(
            lex(r#"<view class="a">hi<image src="x" /></view>"#),
            vec![
                Token::Open {
                    name: "view",
                    markup: r#"<view class="a">"#
                },
                Token::Text("hi"),
                Token::SelfClosing {
                    markup: r#"<image src="x" />"#
                },
                Token::Close {
                    name: "view",
                    markup: "</view>"
                },
            ]
        );
    }

    #[test]
    fn test_quoted_angle_brackets() {
        let tokens = lex(r#"<view wx:if="{{a > b}}">x</view>"#);
        assert_eq!(
            tokens[0],
            Token::Open {
                name: "view",
                markup: r#"<view wx:if="{{a > b}}">"#
            }
        );
    }

    #[test]
    fn test_comparison_inside_interpolation_is_text() {
        let tokens = lex("<text>{{a <b}}</text>");
        assert_eq!(tokens[1], Token::Text("{{a <b}}"));
    }

    #[test]
    fn test_raw_script_content() {
        let tokens = lex("<wxs module=\"m\">var a = '<b>';</wxs>");
        assert_eq!(
            tokens[1],
            Token::Raw {
                content: "var a = '<b>';",
                script: true
            }
        );
        assert!(matches!(tokens[2], Token::Close { name: "wxs", .. }));
    }

    #[test]
    fn test_void_tag_without_slash() {
        let tokens = lex("<input type=\"text\"><view></view>");
        assert!(matches!(tokens[0], Token::SelfClosing { .. }));
    }

    #[test]
    fn test_comment() {
        assert_eq!(
            lex("<!-- a <b> -->x"),
            vec![Token::Comment("<!-- a <b> -->"), Token::Text("x")]
        );
    }

    #[test]
    fn test_unterminated_tag_is_text() {
        assert_eq!(lex("a<view"), vec![Token::Text("a"), Token::Text("<view")]);
    }
}
