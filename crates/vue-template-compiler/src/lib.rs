//! Vue template parser.
//!
//! Turns the text of a `<template>` block into a [`TemplateNode`] tree:
//! elements with their attributes exactly as written, raw interpolation
//! expressions, and text/comment nodes. No directive is interpreted here.

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::*;
pub use error::{CompileError, CompileErrorCode, CompileResult};
pub use parser::parse_template;

/// Parse a Vue template to its root node.
pub fn compile(source: &str) -> CompileResult<TemplateNode> {
    parse_template(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_simple_template() {
        let node = compile("<div>Hello {{ name }}</div>").unwrap();
        assert_eq!(node.as_element().unwrap().children.len(), 2);
    }

    #[test]
    fn test_compile_with_directives() {
        let source = r#"<div v-if="show" v-for="item in items" :class="cls">
            {{ item.name }}
        </div>"#;
        let node = compile(source).unwrap();
        let el = node.as_element().unwrap();
        assert_eq!(el.attrs.len(), 3);
        assert_eq!(el.get_attr("v-for"), Some("item in items"));
    }
}
