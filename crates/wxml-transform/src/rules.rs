//! Static tag and event tables.
//!
//! Every source tag belongs to at most one bucket. Lookups are exact,
//! case-sensitive string matches.

use crate::error::{TranslateError, TranslateResult};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use vue_template_compiler::ElementNode;

/// HTML tags that collapse into `<view>`.
pub const VIEW_SOURCES: &[&str] = &[
    "aside", "footer", "header", "h1", "h2", "h3", "h4", "h5", "h6", "nav", "section", "div",
    "dd", "dl", "dt", "ol", "ul", "li", "p", "main", "i", "table", "thead", "tbody", "td", "th",
    "tr", "fieldset", "legend", "a",
];

/// Tags that already exist in WXML and are emitted unchanged.
pub const NATIVE_TAGS: &[&str] = &[
    "view",
    "text",
    "block",
    "image",
    "rich-text",
    "web-view",
    "scroll-view",
    "swiper",
    "swiper-item",
    "movable-area",
    "movable-view",
    "cover-view",
    "cover-image",
    "icon",
    "progress",
    "button",
    "checkbox",
    "checkbox-group",
    "form",
    "input",
    "label",
    "picker",
    "picker-view",
    "picker-view-column",
    "radio",
    "radio-group",
    "slider",
    "switch",
    "textarea",
    "navigator",
    "audio",
    "video",
    "camera",
    "live-player",
    "live-pusher",
    "map",
    "canvas",
    "open-data",
];

/// HTML tags with no WXML equivalent.
pub const HTML_REJECTED: &[&str] = &[
    "html", "head", "body", "title", "base", "link", "meta", "style", "script", "noscript",
    "object", "embed", "param", "frame", "frameset", "applet", "br", "hr", "area", "col",
    "colgroup", "wbr", "track", "source", "select", "option", "optgroup", "datalist", "output",
];

/// Vue built-in elements, which rely on component and slot machinery.
pub const VUE_BUILTINS: &[&str] = &[
    "slot",
    "component",
    "keep-alive",
    "transition",
    "transition-group",
];

/// Tags emitted self-closing. Checked against both the source and the
/// destination name.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr", "image", "icon",
];

/// Source event name to WXML event name.
pub const EVENT_TABLE: &[(&str, &str)] = &[
    ("click", "tap"),
    ("longpress", "longpress"),
    ("touchstart", "touchstart"),
    ("touchmove", "touchmove"),
    ("touchcancel", "touchcancel"),
    ("touchend", "touchend"),
    ("submit", "submit"),
    ("reset", "reset"),
    ("input", "input"),
    ("change", "change"),
    ("focus", "focus"),
    ("blur", "blur"),
    ("scroll", "scroll"),
    ("play", "play"),
    ("pause", "pause"),
    ("ended", "ended"),
    ("transitionend", "transitionend"),
    ("animationstart", "animationstart"),
    ("animationiteration", "animationiteration"),
    ("animationend", "animationend"),
];

/// How a source tag is translated.
#[derive(Debug, Clone, Copy)]
pub enum TagRule {
    /// Native WXML tag, emitted as written.
    PassThrough,
    /// Renamed to a fixed destination tag.
    Remap(&'static str),
    /// Destination depends on the element's attributes.
    Select(fn(&ElementNode) -> &'static str),
    /// No translation; carries the reason.
    Reject(&'static str),
}

static TAG_RULES: Lazy<FxHashMap<&'static str, TagRule>> = Lazy::new(|| {
    let mut rules = FxHashMap::default();
    for tag in NATIVE_TAGS {
        rules.insert(*tag, TagRule::PassThrough);
    }
    for tag in VIEW_SOURCES {
        rules.insert(*tag, TagRule::Remap("view"));
    }
    rules.insert("span", TagRule::Remap("text"));
    rules.insert("template", TagRule::Remap("block"));
    rules.insert("img", TagRule::Remap("image"));
    rules.insert("iframe", TagRule::Select(select_iframe));
    for tag in HTML_REJECTED {
        rules.insert(*tag, TagRule::Reject("it has no WXML equivalent"));
    }
    for tag in VUE_BUILTINS {
        rules.insert(
            *tag,
            TagRule::Reject("Vue built-in components and slots are not translated"),
        );
    }
    rules
});

static EVENTS: Lazy<FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| EVENT_TABLE.iter().copied().collect());

/// An iframe pointing at a page becomes a `web-view`; an inline one renders
/// its document through `rich-text`.
fn select_iframe(el: &ElementNode) -> &'static str {
    if el.has_attr("src") || el.has_attr(":src") || el.has_attr("v-bind:src") {
        "web-view"
    } else {
        "rich-text"
    }
}

/// Look up the rule for a source tag.
pub fn tag_rule(tag: &str) -> Option<TagRule> {
    TAG_RULES.get(tag).copied()
}

/// Resolve the destination tag for an element.
pub fn classify_element(el: &ElementNode) -> TranslateResult<SmolStr> {
    match tag_rule(&el.tag) {
        Some(TagRule::PassThrough) => Ok(el.tag.clone()),
        Some(TagRule::Remap(dest)) => Ok(SmolStr::new_static(dest)),
        Some(TagRule::Select(select)) => Ok(SmolStr::new_static(select(el))),
        Some(TagRule::Reject(reason)) => Err(TranslateError::UnsupportedTag {
            tag: el.tag.clone(),
            reason: reason.to_string(),
            span: el.tag_span,
        }),
        None => Err(TranslateError::UnsupportedTag {
            tag: el.tag.clone(),
            reason: "unknown tag; custom components are not translated".to_string(),
            span: el.tag_span,
        }),
    }
}

pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Translate a source event name.
pub fn translate_event(name: &str) -> Option<&'static str> {
    EVENTS.get(name).copied()
}
