//! File-level conversion: SFC text in, formatted WXML out.

use crate::error::{ConvertError, TranslateResult};
use crate::transform::{transform_with, TransformOptions};
use std::fs;
use std::path::Path;
use tracing::debug;
use vue_template_compiler::parse_template;
use wxml_beautify::{beautify, FormatOptions};

/// Options for converting a whole file.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub transform: TransformOptions,
    pub format: FormatOptions,
}

/// Parse template text and transform it to flat WXML.
pub fn transform_template(source: &str, options: &TransformOptions) -> TranslateResult<String> {
    let root = parse_template(source)?;
    transform_with(&root, options)
}

/// Convert the `<template>` block of an in-memory `.vue` file.
pub fn convert_source(source: &str, options: &ConvertOptions) -> Result<String, ConvertError> {
    let sfc = vue_parser::parse_sfc(source)?;
    let template = sfc.template.ok_or(ConvertError::MissingTemplate)?;
    if let Some(lang) = template.lang.as_deref() {
        if lang != "html" {
            return Err(ConvertError::UnsupportedTemplateLang(lang.to_string()));
        }
    }

    let template_offset = template.content_span.start;
    let flat = transform_template(&template.content, &options.transform).map_err(|error| {
        ConvertError::Translate {
            error,
            template_offset,
        }
    })?;
    Ok(beautify(&flat, &options.format))
}

/// Read and convert a `.vue` file.
pub fn convert_file(path: &Path, options: &ConvertOptions) -> Result<String, ConvertError> {
    debug!(path = %path.display(), "converting file");
    let source = fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    convert_source(&source, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateErrorCode;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const COMPONENT: &str = r#"<template>
  <div class="box">
    <span>{{ msg }}</span>
  </div>
</template>

<script>
export default { data: () => ({ msg: 'hi' }) }
</script>

<style scoped>
.box { color: red; }
</style>
"#;

    #[test]
    fn test_transform_template_is_flat() {
        let out = transform_template(
            r#"<div><img src="a.png"></div>"#,
            &TransformOptions::default(),
        )
        .unwrap();
        assert_eq!(out, r#"<view><image src="a.png" /></view>"#);
    }

    #[test]
    fn test_transform_template_propagates_parse_errors() {
        let err = transform_template("<div><p></div>", &TransformOptions::default()).unwrap_err();
        assert_eq!(err.code(), TranslateErrorCode::ParseError);
    }

    #[test]
    fn test_convert_source_formats_output() {
        let out = convert_source(COMPONENT, &ConvertOptions::default()).unwrap();
        assert_eq!(out, "<view class=\"box\">\n  <text>{{ msg }}</text>\n</view>");
    }

    #[test]
    fn test_self_closing_nested_template() {
        let source = "<template>\n<div><template v-if=\"a\"/></div>\n</template>\n<script>x</script>";
        let out = convert_source(source, &ConvertOptions::default()).unwrap();
        assert_eq!(out, "<view>\n  <block wx:if=\"{{a}}\"></block>\n</view>");
    }

    #[test]
    fn test_missing_template() {
        let err = convert_source("<script>export default {}</script>", &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConvertError::MissingTemplate));
    }

    #[test]
    fn test_template_lang_must_be_html() {
        let source = "<template lang=\"pug\">div</template>";
        let err = convert_source(source, &ConvertOptions::default()).unwrap_err();
        assert_eq!(err.code(), "unsupported-template-lang");

        let source = "<template lang=\"html\"><div></div></template>";
        assert_eq!(
            convert_source(source, &ConvertOptions::default()).unwrap(),
            "<view></view>"
        );
    }

    #[test]
    fn test_error_span_points_into_file() {
        let source = "<template>\n  <div>{{ a | b }}</div>\n</template>\n";
        let err = convert_source(source, &ConvertOptions::default()).unwrap_err();
        let span = err.span().unwrap();
        assert_eq!(&source[span.to_range()], "{{ a | b }}");
        assert_eq!(err.code(), "unsupported-expression");
    }

    #[test]
    fn test_convert_file() {
        let mut file = tempfile::Builder::new().suffix(".vue").tempfile().unwrap();
        file.write_all(COMPONENT.as_bytes()).unwrap();

        let out = convert_file(file.path(), &ConvertOptions::default()).unwrap();
        assert!(out.starts_with("<view class=\"box\">"));
    }

    #[test]
    fn test_convert_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_file(&dir.path().join("nope.vue"), &ConvertOptions::default())
            .unwrap_err();
        assert_eq!(err.code(), "io-error");
    }
}
