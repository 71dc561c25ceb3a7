//! Formatting options.

/// How the content of `<script>`, `<wxs>` and `<style>` is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScriptIndent {
    /// Leave the content exactly as written.
    #[default]
    Keep,
    /// Strip the common indentation and start at column zero.
    Separate,
    /// Strip the common indentation and indent one level below the tag.
    Normal,
}

/// Options for [`beautify`](crate::beautify).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "snake_case"))]
pub struct FormatOptions {
    /// Indentation width per level.
    pub indent_size: usize,
    pub indent_char: char,
    /// Indent with one tab per level instead of `indent_size` characters.
    pub indent_with_tabs: bool,
    /// Keep blank lines found in text runs.
    pub preserve_newlines: bool,
    /// Line breaks kept from a single run when `preserve_newlines` is set.
    pub max_preserve_newlines: usize,
    pub indent_scripts: ScriptIndent,
    /// Tags whose content is copied verbatim.
    pub unformatted: Vec<String>,
    pub end_with_newline: bool,
    pub eol: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            indent_char: ' ',
            indent_with_tabs: false,
            preserve_newlines: true,
            max_preserve_newlines: 10,
            indent_scripts: ScriptIndent::Keep,
            unformatted: Vec::new(),
            end_with_newline: false,
            eol: "\n".to_string(),
        }
    }
}

impl FormatOptions {
    /// The text for one indentation level.
    pub fn indent_unit(&self) -> String {
        if self.indent_with_tabs {
            "\t".to_string()
        } else {
            self.indent_char.to_string().repeat(self.indent_size)
        }
    }

    pub(crate) fn is_unformatted(&self, tag: &str) -> bool {
        self.unformatted.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indent_unit() {
        assert_eq!(FormatOptions::default().indent_unit(), "  ");

        let tabs = FormatOptions {
            indent_with_tabs: true,
            ..Default::default()
        };
        assert_eq!(tabs.indent_unit(), "\t");

        let dots = FormatOptions {
            indent_size: 3,
            indent_char: '.',
            ..Default::default()
        };
        assert_eq!(dots.indent_unit(), "...");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_options_from_json() {
        let options: FormatOptions =
            serde_json::from_str(r#"{ "indent_size": 4, "indent_scripts": "normal" }"#).unwrap();
        assert_eq!(options.indent_size, 4);
        assert_eq!(options.indent_scripts, ScriptIndent::Normal);
        assert_eq!(options.max_preserve_newlines, 10);
    }
}
