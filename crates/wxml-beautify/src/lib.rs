//! Pretty-printer for WXML.
//!
//! Takes the single-line markup produced by the transformer and lays it out
//! one element per line, indenting children. Elements holding only a short
//! run of text stay on one line; `script`, `wxs` and `style` content is left
//! to [`ScriptIndent`].

mod lexer;
mod options;
mod printer;

pub use options::{FormatOptions, ScriptIndent};

/// Reformat `source` with `options`.
pub fn beautify(source: &str, options: &FormatOptions) -> String {
    let tokens: Vec<_> = lexer::Lexer::new(source, options).collect();
    printer::Printer::new(options).print(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn fmt(source: &str) -> String {
        beautify(source, &FormatOptions::default())
    }

    #[test]
    fn test_nested_elements() {
        assert_snapshot!(fmt(r#"<view class="a"><view><text>{{ msg }}</text><image src="{{url}}" /></view><button catch:tap="go">Go</button></view>"#), @r#"
<view class="a">
  <view>
    <text>{{ msg }}</text>
    <image src="{{url}}" />
  </view>
  <button catch:tap="go">Go</button>
</view>
"#);
    }

    #[test]
    fn test_mixed_content() {
        assert_snapshot!(fmt("<view>{{title}}<text>!</text>tail</view>"), @r"
<view>
  {{title}}
  <text>!</text>
  tail
</view>
");
    }

    #[test]
    fn test_blank_lines_are_preserved() {
        assert_snapshot!(fmt("<view>one\n\n\ntwo</view>"), @r"
<view>
  one


  two
</view>
");
    }

    #[test]
    fn test_blank_lines_are_capped() {
        let options = FormatOptions {
            max_preserve_newlines: 2,
            ..Default::default()
        };
        assert_eq!(
            beautify("<view>one\n\n\n\n\ntwo</view>", &options),
            "<view>\n  one\n\n  two\n</view>"
        );

        let options = FormatOptions {
            preserve_newlines: false,
            ..Default::default()
        };
        assert_eq!(
            beautify("<view>one\n\n\ntwo</view>", &options),
            "<view>\n  one\n  two\n</view>"
        );
    }

    #[test]
    fn test_script_content_is_kept() {
        assert_snapshot!(fmt("<view><wxs module=\"m\">\n  var a = 1;\n    var b = 2;\n</wxs></view>"), @r#"
<view>
  <wxs module="m">
  var a = 1;
    var b = 2;
  </wxs>
</view>
"#);
    }

    #[test]
    fn test_script_content_normal_and_separate() {
        let source = "<view><wxs module=\"m\">\n      var a = 1;\n        var b = 2;\n</wxs></view>";

        let normal = FormatOptions {
            indent_scripts: ScriptIndent::Normal,
            ..Default::default()
        };
        assert_eq!(
            beautify(source, &normal),
            "<view>\n  <wxs module=\"m\">\n    var a = 1;\n      var b = 2;\n  </wxs>\n</view>"
        );

        let separate = FormatOptions {
            indent_scripts: ScriptIndent::Separate,
            ..Default::default()
        };
        assert_eq!(
            beautify(source, &separate),
            "<view>\n  <wxs module=\"m\">\nvar a = 1;\n  var b = 2;\n  </wxs>\n</view>"
        );
    }

    #[test]
    fn test_unformatted_tags() {
        let options = FormatOptions {
            unformatted: vec!["text".to_string()],
            ..Default::default()
        };
        assert_eq!(
            beautify("<view><text>a <b>c</b></text></view>", &options),
            "<view>\n  <text>\na <b>c</b>\n  </text>\n</view>"
        );
    }

    #[test]
    fn test_indentation_and_line_endings() {
        let options = FormatOptions {
            indent_with_tabs: true,
            eol: "\r\n".to_string(),
            end_with_newline: true,
            ..Default::default()
        };
        assert_eq!(
            beautify("<view><text>x</text></view>", &options),
            "<view>\r\n\t<text>x</text>\r\n</view>\r\n"
        );
    }

    #[test]
    fn test_comments_and_empty_elements() {
        assert_eq!(
            fmt("<view><!-- note --><view></view></view>"),
            "<view>\n  <!-- note -->\n  <view></view>\n</view>"
        );
    }

    #[test]
    fn test_text_keeps_inner_spaces() {
        assert_eq!(
            fmt("<view><text> a </text><view> b </view></view>"),
            "<view>\n  <text> a </text>\n  <view>b</view>\n</view>"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(fmt(""), "");
        let options = FormatOptions {
            end_with_newline: true,
            ..Default::default()
        };
        assert_eq!(beautify("", &options), "");
    }
}
