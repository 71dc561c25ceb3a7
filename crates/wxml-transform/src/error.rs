//! Translation and conversion errors.

use smol_str::SmolStr;
use source_map::Span;
use std::fmt;
use std::path::PathBuf;
use vue_template_compiler::CompileError;

/// Result type for translation operations.
pub type TranslateResult<T> = Result<T, TranslateError>;

/// A construct with no valid WXML translation.
///
/// Spans are relative to the template text the tree was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("unsupported tag <{tag}>: {reason}")]
    UnsupportedTag {
        tag: SmolStr,
        reason: String,
        span: Span,
    },

    #[error("unsupported modifier `.{modifier}` on `{attribute}`")]
    UnsupportedModifier {
        attribute: SmolStr,
        modifier: SmolStr,
        span: Span,
    },

    #[error("unsupported event `{event}`: it has no WXML counterpart")]
    UnsupportedEvent { event: SmolStr, span: Span },

    #[error("unsupported directive `{directive}`: {hint}")]
    UnsupportedDirective {
        directive: SmolStr,
        hint: String,
        span: Span,
    },

    #[error("unsupported expression `{expression}`: {reason}")]
    UnsupportedExpression {
        expression: String,
        reason: String,
        span: Span,
    },

    #[error("{0}")]
    Parse(#[from] CompileError),
}

impl TranslateError {
    pub fn span(&self) -> Span {
        match self {
            Self::UnsupportedTag { span, .. }
            | Self::UnsupportedModifier { span, .. }
            | Self::UnsupportedEvent { span, .. }
            | Self::UnsupportedDirective { span, .. }
            | Self::UnsupportedExpression { span, .. } => *span,
            Self::Parse(err) => err.span,
        }
    }

    pub fn code(&self) -> TranslateErrorCode {
        match self {
            Self::UnsupportedTag { .. } => TranslateErrorCode::UnsupportedTag,
            Self::UnsupportedModifier { .. } => TranslateErrorCode::UnsupportedModifier,
            Self::UnsupportedEvent { .. } => TranslateErrorCode::UnsupportedEvent,
            Self::UnsupportedDirective { .. } => TranslateErrorCode::UnsupportedDirective,
            Self::UnsupportedExpression { .. } => TranslateErrorCode::UnsupportedExpression,
            Self::Parse(_) => TranslateErrorCode::ParseError,
        }
    }

    pub(crate) fn expression(expression: &str, reason: impl Into<String>, span: Span) -> Self {
        Self::UnsupportedExpression {
            expression: expression.to_string(),
            reason: reason.into(),
            span,
        }
    }

    pub(crate) fn directive(directive: &str, hint: impl Into<String>, span: Span) -> Self {
        Self::UnsupportedDirective {
            directive: directive.into(),
            hint: hint.into(),
            span,
        }
    }

    pub(crate) fn modifier(attribute: &str, modifier: &str, span: Span) -> Self {
        Self::UnsupportedModifier {
            attribute: attribute.into(),
            modifier: modifier.into(),
            span,
        }
    }
}

/// Error codes for translation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslateErrorCode {
    UnsupportedTag,
    UnsupportedModifier,
    UnsupportedEvent,
    UnsupportedDirective,
    UnsupportedExpression,
    ParseError,
}

impl TranslateErrorCode {
    /// Get the error code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedTag => "unsupported-tag",
            Self::UnsupportedModifier => "unsupported-modifier",
            Self::UnsupportedEvent => "unsupported-event",
            Self::UnsupportedDirective => "unsupported-directive",
            Self::UnsupportedExpression => "unsupported-expression",
            Self::ParseError => "parse-error",
        }
    }
}

impl fmt::Display for TranslateErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A failure converting a whole `.vue` file.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid single-file component: {0}")]
    Sfc(#[from] vue_parser::ParseError),

    #[error("no <template> block found")]
    MissingTemplate,

    #[error("template language `{0}` is not supported; only HTML templates can be converted")]
    UnsupportedTemplateLang(String),

    /// A translation error; `template_offset` is where the template content
    /// starts in the file.
    #[error("{error}")]
    Translate {
        error: TranslateError,
        template_offset: u32,
    },
}

impl ConvertError {
    /// The offending span in file coordinates, when there is one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Sfc(err) => Some(err.span),
            Self::Translate {
                error,
                template_offset,
            } => Some(error.span().shifted(*template_offset)),
            Self::Io { .. } | Self::MissingTemplate | Self::UnsupportedTemplateLang(_) => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io-error",
            Self::Sfc(_) => "invalid-sfc",
            Self::MissingTemplate => "missing-template",
            Self::UnsupportedTemplateLang(_) => "unsupported-template-lang",
            Self::Translate { error, .. } => error.code().as_str(),
        }
    }

    /// The translation error, if this is one.
    pub fn as_translate(&self) -> Option<&TranslateError> {
        match self {
            Self::Translate { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages_name_the_offender() {
        let err = TranslateError::modifier("@click.once", "once", Span::new(5, 16));
        assert_eq!(err.to_string(), "unsupported modifier `.once` on `@click.once`");
        assert_eq!(err.code().as_str(), "unsupported-modifier");

        let err = TranslateError::UnsupportedEvent {
            event: "dblclick".into(),
            span: Span::default(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported event `dblclick`: it has no WXML counterpart"
        );
    }

    #[test]
    fn test_convert_error_span_is_shifted_into_file() {
        let err = ConvertError::Translate {
            error: TranslateError::expression("a | b", "filters are not supported", Span::new(5, 14)),
            template_offset: 10,
        };
        assert_eq!(err.span(), Some(Span::new(15, 24)));
        assert_eq!(err.code(), "unsupported-expression");
    }
}
