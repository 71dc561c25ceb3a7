//! Character scanner shared by the SFC and template parsers.

use source_map::Span;

/// A cursor over markup source text.
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Get the current byte position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Get the remaining source.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consume and return the next character.
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip whitespace and return the number of bytes skipped.
    pub fn skip_whitespace(&mut self) -> usize {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
        self.pos - start
    }

    pub fn starts_with(&self, s: &str) -> bool {
        self.remaining().starts_with(s)
    }

    /// Consume a string if the remaining source starts with it.
    pub fn consume(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consume characters while the predicate is true.
    pub fn consume_while<F>(&mut self, pred: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if pred(c) {
                self.next_char();
            } else {
                break;
            }
        }
        &self.source[start..self.pos]
    }

    /// Consume until the given string is found, or to the end of input.
    pub fn consume_until(&mut self, s: &str) -> &'a str {
        let start = self.pos;
        match self.remaining().find(s) {
            Some(idx) => self.pos += idx,
            None => self.pos = self.source.len(),
        }
        &self.source[start..self.pos]
    }

    /// Read a tag name.
    pub fn read_tag_name(&mut self) -> Option<&'a str> {
        let start = self.pos;
        match self.peek_char() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                self.next_char();
            }
            _ => return None,
        }
        self.consume_while(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':');
        Some(&self.source[start..self.pos])
    }

    /// Read an attribute name, including the `:`, `@`, `#` and `v-` shorthands.
    pub fn read_attr_name(&mut self) -> Option<&'a str> {
        let start = self.pos;
        match self.peek_char() {
            Some(c) if c.is_ascii_alphabetic() || matches!(c, '_' | ':' | '@' | '#') => {
                self.next_char();
            }
            _ => return None,
        }
        self.consume_while(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.' | '[' | ']' | '$')
        });
        Some(&self.source[start..self.pos])
    }

    /// Read a quoted string value. Returns `None` if the quote is never closed.
    pub fn read_quoted_string(&mut self) -> Option<(&'a str, char)> {
        let quote = self.peek_char()?;
        if quote != '"' && quote != '\'' {
            return None;
        }
        let open = self.pos;
        self.next_char();

        let start = self.pos;
        match self.remaining().find(quote) {
            Some(idx) => {
                let value = &self.source[start..start + idx];
                self.pos = start + idx + 1;
                Some((value, quote))
            }
            None => {
                self.pos = open;
                None
            }
        }
    }

    /// Read an unquoted attribute value.
    pub fn read_unquoted_value(&mut self) -> &'a str {
        self.consume_while(|c| !c.is_whitespace() && c != '>' && c != '=' && c != '"' && c != '\'')
    }

    /// Read a comment body. Returns `None` when the comment is unterminated.
    pub fn read_comment(&mut self) -> Option<&'a str> {
        if !self.starts_with("<!--") {
            return None;
        }
        let body = &self.remaining()[4..];
        let end = body.find("-->")?;
        let content = &body[..end];
        self.pos += 4 + end + 3;
        Some(content)
    }

    /// Read block content up to the matching closing tag.
    ///
    /// Elements with the same name nested inside the block (a `<template v-if>`
    /// inside the `<template>` block) are balanced, so they do not end it.
    pub fn read_block_content(&mut self, tag: &str) -> &'a str {
        let start = self.pos;
        let open = format!("<{}", tag);
        let close = format!("</{}", tag);
        let mut depth = 0usize;

        while !self.remaining().is_empty() {
            if self.starts_with("<!--") {
                if self.read_comment().is_none() {
                    self.pos = self.source.len();
                }
                continue;
            }
            if self.tag_boundary_at(&close) {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                self.pos += close.len();
                continue;
            }
            if self.tag_boundary_at(&open) {
                self.pos += open.len();
                if !self.skip_open_tag_rest() {
                    depth += 1;
                }
                continue;
            }
            self.next_char();
        }
        &self.source[start..self.pos]
    }

    /// Skip the rest of an opening tag, past its `>`, stepping over quoted
    /// attribute values. Returns whether the tag was self-closing.
    fn skip_open_tag_rest(&mut self) -> bool {
        while let Some(c) = self.peek_char() {
            match c {
                '"' | '\'' => {
                    if self.read_quoted_string().is_none() {
                        self.next_char();
                    }
                }
                '/' if self.starts_with("/>") => {
                    self.pos += 2;
                    return true;
                }
                '>' => {
                    self.pos += 1;
                    return false;
                }
                _ => {
                    self.next_char();
                }
            }
        }
        false
    }

    /// Check for `pattern` (case-insensitive) followed by a tag-name boundary.
    fn tag_boundary_at(&self, pattern: &str) -> bool {
        let rest = self.remaining();
        if rest.len() < pattern.len() || !rest.is_char_boundary(pattern.len()) {
            return false;
        }
        if !rest[..pattern.len()].eq_ignore_ascii_case(pattern) {
            return false;
        }
        matches!(
            rest[pattern.len()..].chars().next(),
            Some('>' | '/' | ' ' | '\t' | '\n' | '\r') | None
        )
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Get a span from start to current position.
    pub fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32, self.pos as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_tag_name() {
        let mut scanner = Scanner::new("scroll-view>");
        assert_eq!(scanner.read_tag_name(), Some("scroll-view"));
    }

    #[test]
    fn test_read_attr_name_shorthands() {
        let mut scanner = Scanner::new("@click.stop=");
        assert_eq!(scanner.read_attr_name(), Some("@click.stop"));
        let mut scanner = Scanner::new(":src=");
        assert_eq!(scanner.read_attr_name(), Some(":src"));
    }

    #[test]
    fn test_read_quoted_string() {
        let mut scanner = Scanner::new("\"a > b\" rest");
        assert_eq!(scanner.read_quoted_string(), Some(("a > b", '"')));
        assert_eq!(scanner.remaining(), " rest");
    }

    #[test]
    fn test_unterminated_quote_does_not_move() {
        let mut scanner = Scanner::new("'open");
        assert_eq!(scanner.read_quoted_string(), None);
        assert_eq!(scanner.pos(), 0);
    }

    #[test]
    fn test_read_comment() {
        let mut scanner = Scanner::new("<!-- note -->tail");
        assert_eq!(scanner.read_comment(), Some(" note "));
        assert_eq!(scanner.remaining(), "tail");
        assert_eq!(Scanner::new("<!-- open").read_comment(), None);
    }

    #[test]
    fn test_read_block_content() {
        let mut scanner = Scanner::new("<div>Hello</div></template>");
        assert_eq!(scanner.read_block_content("template"), "<div>Hello</div>");
    }

    #[test]
    fn test_read_block_content_balances_nested_tags() {
        let source = "<div><template v-if=\"a\"><span/></template></div></template>";
        let mut scanner = Scanner::new(source);
        assert_eq!(
            scanner.read_block_content("template"),
            "<div><template v-if=\"a\"><span/></template></div>"
        );
        assert!(scanner.starts_with("</template>"));
    }

    #[test]
    fn test_read_block_content_skips_self_closing_nested_tags() {
        let source = "<div><template v-if=\"a > b\"/><template v-else /></div></template>";
        let mut scanner = Scanner::new(source);
        assert_eq!(
            scanner.read_block_content("template"),
            "<div><template v-if=\"a > b\"/><template v-else /></div>"
        );
        assert!(scanner.starts_with("</template>"));
    }
}
