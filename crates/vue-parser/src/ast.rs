//! Block-level AST for Vue Single File Components.

use smol_str::SmolStr;
use source_map::Span;

/// A parsed Vue Single File Component.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sfc {
    /// The template block, if present.
    pub template: Option<TemplateBlock>,
    /// The script block, if present.
    pub script: Option<ScriptBlock>,
    /// All style blocks.
    pub styles: Vec<StyleBlock>,
    /// Custom blocks (e.g., <i18n>, <docs>).
    pub custom_blocks: Vec<CustomBlock>,
    /// Comments found at the root level.
    pub comments: Vec<Comment>,
}

/// Properties shared by every top-level block.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SfcBlock {
    /// The span of the entire block including tags.
    pub span: Span,
    /// The span of the content only (excluding tags).
    pub content_span: Span,
    pub content: String,
    pub attrs: Vec<BlockAttr>,
}

impl SfcBlock {
    /// Get an attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .and_then(|a| a.value.as_deref())
    }

    /// Check if an attribute exists (for boolean attributes).
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name.eq_ignore_ascii_case(name))
    }
}

/// An attribute on a block tag.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockAttr {
    pub name: SmolStr,
    /// The attribute value (None for boolean attributes).
    pub value: Option<String>,
    pub span: Span,
}

/// The `<template>` block.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateBlock {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub block: SfcBlock,
    /// The template language; only plain HTML templates can be converted.
    pub lang: Option<String>,
}

impl std::ops::Deref for TemplateBlock {
    type Target = SfcBlock;
    fn deref(&self) -> &Self::Target {
        &self.block
    }
}

/// The `<script>` block.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptBlock {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub block: SfcBlock,
    pub lang: Option<String>,
}

impl std::ops::Deref for ScriptBlock {
    type Target = SfcBlock;
    fn deref(&self) -> &Self::Target {
        &self.block
    }
}

/// A `<style>` block.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleBlock {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub block: SfcBlock,
    pub lang: Option<String>,
    pub scoped: bool,
}

impl std::ops::Deref for StyleBlock {
    type Target = SfcBlock;
    fn deref(&self) -> &Self::Target {
        &self.block
    }
}

/// A custom block (e.g., <i18n>, <docs>).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomBlock {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub block: SfcBlock,
    /// The block type (tag name).
    pub block_type: SmolStr,
}

impl std::ops::Deref for CustomBlock {
    type Target = SfcBlock;
    fn deref(&self) -> &Self::Target {
        &self.block
    }
}

/// A root-level comment.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    /// The comment content (without delimiters).
    pub content: String,
    pub span: Span,
}
