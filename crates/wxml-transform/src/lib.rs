//! Vue template to WXML transformer.
//!
//! The core of vue2wxml: walks a parsed template tree depth-first and writes
//! WeChat mini-program markup, failing on the first construct that has no
//! WXML translation.
//!
//! ```text
//! .vue text ──parse_sfc──▶ template ──parse_template──▶ TemplateNode
//!     ──transform──▶ flat WXML ──beautify──▶ formatted WXML
//! ```

pub mod attrs;
pub mod convert;
pub mod error;
pub mod expr;
pub mod rules;
pub mod stack;
pub mod transform;

pub use attrs::{convert_attributes, AttributeDescriptor, ConvertedAttributes, DirectiveKind};
pub use convert::{convert_file, convert_source, transform_template, ConvertOptions};
pub use error::{ConvertError, TranslateError, TranslateErrorCode, TranslateResult};
pub use rules::{classify_element, TagRule};
pub use stack::{CloseOutcome, OpenTagStack};
pub use transform::{transform, transform_with, TransformOptions};
pub use wxml_beautify::{FormatOptions, ScriptIndent};
