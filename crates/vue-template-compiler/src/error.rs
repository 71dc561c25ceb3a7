//! Error types for Vue template parsing.

use source_map::Span;
use std::fmt;

/// Result type for template parsing.
pub type CompileResult<T> = Result<T, CompileError>;

/// An error that occurred while parsing a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// The error message.
    pub message: String,
    /// The span where the error occurred, relative to the template text.
    pub span: Span,
    /// The error code.
    pub code: CompileErrorCode,
}

impl CompileError {
    /// Create a new compile error.
    pub fn new(message: impl Into<String>, span: Span, code: CompileErrorCode) -> Self {
        Self {
            message: message.into(),
            span,
            code,
        }
    }

    /// Create an unclosed element error.
    pub fn unclosed_element(tag: &str, span: Span) -> Self {
        Self::new(
            format!("Element <{}> is missing its closing tag", tag),
            span,
            CompileErrorCode::UnclosedElement,
        )
    }

    /// Create a mismatched closing tag error.
    pub fn mismatched_closing_tag(expected: Option<&str>, found: &str, span: Span) -> Self {
        let message = match expected {
            Some(expected) => format!("Expected </{}>, found </{}>", expected, found),
            None => format!("Unexpected closing tag </{}>", found),
        };
        Self::new(message, span, CompileErrorCode::MismatchedClosingTag)
    }

    /// Create a duplicate attribute error.
    pub fn duplicate_attribute(name: &str, span: Span) -> Self {
        Self::new(
            format!("Duplicate attribute: {}", name),
            span,
            CompileErrorCode::DuplicateAttribute,
        )
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CompileError {}

/// Error codes for template parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileErrorCode {
    /// `<` not followed by a tag name where one is required.
    MissingTagName,
    /// Element still open at the end of input.
    UnclosedElement,
    /// Closing tag does not match the open element.
    MismatchedClosingTag,
    /// `<!--` without `-->`.
    UnterminatedComment,
    /// `{{` without `}}`.
    UnterminatedInterpolation,
    /// Quoted attribute value without a closing quote.
    UnterminatedAttribute,
    /// The same attribute key written twice on one element.
    DuplicateAttribute,
    /// The template does not consist of exactly one root element.
    InvalidRoot,
}

impl CompileErrorCode {
    /// Get the error code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingTagName => "missing-tag-name",
            Self::UnclosedElement => "unclosed-element",
            Self::MismatchedClosingTag => "mismatched-closing-tag",
            Self::UnterminatedComment => "unterminated-comment",
            Self::UnterminatedInterpolation => "unterminated-interpolation",
            Self::UnterminatedAttribute => "unterminated-attribute",
            Self::DuplicateAttribute => "duplicate-attribute",
            Self::InvalidRoot => "invalid-root",
        }
    }
}

impl fmt::Display for CompileErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
