//! Vue Single File Component parser.
//!
//! Splits a `.vue` file into its template, script, style and custom blocks.
//! The [`scanner`] module is also the character cursor used by the template
//! parser.

pub mod ast;
pub mod error;
pub mod parser;
pub mod scanner;

pub use ast::*;
pub use error::{ErrorCode, ParseError, ParseResult};
pub use parser::parse_sfc;

/// Parse a Vue SFC file and return the parsed result.
pub fn parse(source: &str) -> ParseResult<Sfc> {
    parse_sfc(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_sfc() {
        let source = r#"<template>
  <div>Hello {{ name }}</div>
</template>

<script>
export default { data: () => ({ name: 'World' }) }
</script>

<style scoped>
div { color: red; }
</style>
"#;
        let result = parse(source).unwrap();
        assert!(result.template.is_some());
        assert!(result.script.is_some());
        assert_eq!(result.styles.len(), 1);
        assert!(result.styles[0].scoped);
    }

    #[test]
    fn test_parse_script_only() {
        let source = r#"<script lang="ts">
export default {
  name: 'MyComponent'
}
</script>
"#;
        let result = parse(source).unwrap();
        assert!(result.template.is_none());
        assert_eq!(result.script.unwrap().lang.as_deref(), Some("ts"));
    }
}
