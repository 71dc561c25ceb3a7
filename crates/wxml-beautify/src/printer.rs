//! Line-oriented printer over the token stream.

use crate::lexer::Token;
use crate::options::{FormatOptions, ScriptIndent};

pub struct Printer<'o> {
    options: &'o FormatOptions,
    unit: String,
    lines: Vec<String>,
    level: usize,
    pending_blank: usize,
}

impl<'o> Printer<'o> {
    pub fn new(options: &'o FormatOptions) -> Self {
        Self {
            options,
            unit: options.indent_unit(),
            lines: Vec::new(),
            level: 0,
            pending_blank: 0,
        }
    }

    pub fn print(mut self, tokens: &[Token<'_>]) -> String {
        let mut i = 0;
        while i < tokens.len() {
            i += self.token(&tokens[i], &tokens[i + 1..]);
        }

        let mut out = self.lines.join(&self.options.eol);
        if self.options.end_with_newline && !out.is_empty() {
            out.push_str(&self.options.eol);
        }
        out
    }

    /// Print one token, returning how many tokens were consumed.
    fn token(&mut self, token: &Token<'_>, ahead: &[Token<'_>]) -> usize {
        match *token {
            Token::Open { name, markup } => {
                if let Some((line, used)) = inline_element(name, markup, ahead) {
                    self.line(&line);
                    return used + 1;
                }
                self.line(markup);
                self.level += 1;
            }
            Token::Close { markup, .. } => {
                self.level = self.level.saturating_sub(1);
                self.line(markup);
            }
            Token::SelfClosing { markup } | Token::Comment(markup) => self.line(markup),
            Token::Text(text) => self.text(text),
            Token::Raw { content, script } => self.raw(content, script),
        }
        1
    }

    fn line(&mut self, content: &str) {
        if !self.lines.is_empty() {
            for _ in 0..self.pending_blank {
                self.lines.push(String::new());
            }
        }
        self.pending_blank = 0;
        self.lines
            .push(format!("{}{}", self.unit.repeat(self.level), content));
    }

    fn note_newlines(&mut self, newlines: usize) {
        if self.options.preserve_newlines && newlines > 1 {
            let kept = newlines.min(self.options.max_preserve_newlines);
            self.pending_blank = self.pending_blank.max(kept.saturating_sub(1));
        }
    }

    fn text(&mut self, text: &str) {
        let mut newlines = 0;
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                newlines += 1;
            }
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.note_newlines(newlines);
            newlines = 0;
            self.line(trimmed);
        }
        self.note_newlines(newlines);
    }

    fn raw(&mut self, content: &str, script: bool) {
        let body: Vec<&str> = content
            .trim_matches('\n')
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect();
        if body.iter().all(|l| l.trim().is_empty()) {
            return;
        }

        let mode = if script {
            self.options.indent_scripts
        } else {
            ScriptIndent::Keep
        };
        if mode == ScriptIndent::Keep {
            for l in body {
                self.lines.push(l.to_string());
            }
            return;
        }

        let common = body
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.len() - l.trim_start().len())
            .min()
            .unwrap_or(0);
        let indent = match mode {
            ScriptIndent::Normal => self.unit.repeat(self.level),
            _ => String::new(),
        };
        for l in body {
            if l.trim().is_empty() {
                self.lines.push(String::new());
            } else {
                let stripped = l.get(common..).unwrap_or_else(|| l.trim_start());
                self.lines.push(format!("{indent}{stripped}"));
            }
        }
    }
}

/// An element whose only content is a single line of text, or nothing,
/// printed on one line. Spaces inside `<text>` are content and are kept.
fn inline_element(name: &str, open: &str, ahead: &[Token<'_>]) -> Option<(String, usize)> {
    match ahead {
        [Token::Close { name: n, markup: close }, ..] if *n == name => {
            Some((format!("{open}{close}"), 1))
        }
        [Token::Text(text), Token::Close { name: n, markup: close }, ..]
            if *n == name && name == "text" && !text.is_empty() && !text.contains('\n') =>
        {
            Some((format!("{open}{text}{close}"), 2))
        }
        [Token::Text(text), Token::Close { name: n, markup: close }, ..]
            if *n == name && !text.trim().is_empty() && !text.trim().contains('\n') =>
        {
            Some((format!("{open}{}{close}", text.trim()), 2))
        }
        _ => None,
    }
}
