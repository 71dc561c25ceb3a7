//! Checks on embedded expressions and `v-for` clause parsing.

use crate::error::{TranslateError, TranslateResult};
use once_cell::sync::Lazy;
use regex::Regex;
use source_map::Span;

/// A `|` with whitespace on both sides: a Vue filter pipeline.
static FILTER_PIPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s\|\s").expect("filter pattern is valid"));

/// `item in list`, `(item, index) in list`, or the same with `of`.
static FOR_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:\(\s*([A-Za-z_$][\w$]*)\s*(?:,\s*([A-Za-z_$][\w$]*)\s*)?\)|([A-Za-z_$][\w$]*))\s+(?:in|of)\s+(\S.*?)\s*$",
    )
    .expect("for-clause pattern is valid")
});

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][\w$]*$").expect("identifier pattern is valid"));

/// Reject filter pipelines, which WXML cannot evaluate.
pub fn reject_filters(expression: &str, span: Span) -> TranslateResult<()> {
    if FILTER_PIPE.is_match(expression) {
        return Err(TranslateError::expression(
            expression,
            "filters are not supported",
            span,
        ));
    }
    Ok(())
}

pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// A parsed `v-for` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForClause<'a> {
    pub item: &'a str,
    pub index: Option<&'a str>,
    pub source: &'a str,
}

impl<'a> ForClause<'a> {
    pub fn parse(value: &'a str, span: Span) -> TranslateResult<Self> {
        let caps = FOR_CLAUSE.captures(value).ok_or_else(|| {
            TranslateError::expression(
                value,
                "expected `item in list` or `(item, index) in list`",
                span,
            )
        })?;

        let text = |i: usize| caps.get(i).map(|m| m.as_str());
        let (item, index) = match text(3) {
            Some(item) => (item, None),
            None => (text(1).unwrap_or_default(), text(2)),
        };
        let source = text(4).unwrap_or_default();

        reject_filters(source, span)?;
        Ok(Self {
            item,
            index,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filter_pipe_detection() {
        assert!(reject_filters(" name | upper ", Span::default()).is_err());
        assert!(reject_filters("a\t|\tb", Span::default()).is_err());
        assert!(reject_filters("a || b", Span::default()).is_ok());
        assert!(reject_filters("a|b", Span::default()).is_ok());
    }

    #[test]
    fn test_for_clause_forms() {
        let clause = ForClause::parse("item in items", Span::default()).unwrap();
        assert_eq!(
            clause,
            ForClause {
                item: "item",
                index: None,
                source: "items"
            }
        );

        let clause = ForClause::parse("(row, i) of table.rows", Span::default()).unwrap();
        assert_eq!(clause.item, "row");
        assert_eq!(clause.index, Some("i"));
        assert_eq!(clause.source, "table.rows");

        let clause = ForClause::parse("(n) in 10", Span::default()).unwrap();
        assert_eq!(clause.item, "n");
        assert_eq!(clause.index, None);
    }

    #[test]
    fn test_malformed_for_clause() {
        for value in ["items", "(v, k, i) in obj", "in list", "item in "] {
            let err = ForClause::parse(value, Span::new(1, 2)).unwrap_err();
            assert!(
                matches!(err, TranslateError::UnsupportedExpression { .. }),
                "{value}"
            );
        }
    }

    #[test]
    fn test_for_source_with_filter_is_rejected() {
        assert!(ForClause::parse("x in list | sorted", Span::default()).is_err());
    }
}
