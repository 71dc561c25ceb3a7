//! Attribute and directive conversion.
//!
//! Each source attribute key is classified into a [`DirectiveKind`]; the
//! kind selects exactly one conversion function from a static table. The
//! functions append WXML attribute text to a [`ConvertedAttributes`] or fail
//! with a [`TranslateError`].

use crate::error::{TranslateError, TranslateResult};
use crate::expr::{is_identifier, reject_filters, ForClause};
use crate::rules::translate_event;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use source_map::Span;
use vue_template_compiler::{Attribute, ElementNode};

/// Kind of a source attribute, decided from its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `:name` / `v-bind:name`
    Bind,
    /// `@event` / `v-on:event`
    On,
    Text,
    Html,
    If,
    ElseIf,
    Else,
    For,
    /// `:key` on an element that also carries `v-for`.
    Key,
    /// A directive with no WXML translation.
    Unsupported,
    /// Anything else; copied as written.
    Literal,
}

/// One source attribute, split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor<'a> {
    /// The key as written.
    pub key: &'a str,
    pub kind: DirectiveKind,
    /// Property or event name with prefix and modifiers removed.
    pub binding_name: &'a str,
    /// Suffixes introduced by `.`.
    pub modifiers: Vec<&'a str>,
    /// `None` for boolean attributes.
    pub value: Option<&'a str>,
    pub span: Span,
}

impl<'a> AttributeDescriptor<'a> {
    pub fn parse(key: &'a str, attr: &'a Attribute) -> Self {
        let (kind, rest) = classify_key(key);
        let (binding_name, modifiers) = match kind {
            DirectiveKind::Literal => (key, Vec::new()),
            _ => split_modifiers(rest),
        };
        let kind = match kind {
            DirectiveKind::Bind | DirectiveKind::On
                if binding_name.is_empty() || binding_name.starts_with('[') =>
            {
                DirectiveKind::Unsupported
            }
            other => other,
        };

        Self {
            key,
            kind,
            binding_name,
            modifiers,
            value: attr.value.as_deref(),
            span: attr.span,
        }
    }

    fn reject_modifiers(&self) -> TranslateResult<()> {
        match self.modifiers.first() {
            Some(modifier) => Err(TranslateError::modifier(self.key, modifier, self.span)),
            None => Ok(()),
        }
    }

    fn require_value(&self) -> TranslateResult<&'a str> {
        self.value.ok_or_else(|| {
            TranslateError::expression(self.key, "the directive needs a value", self.span)
        })
    }
}

/// Split a key into its kind and the text after the directive prefix.
fn classify_key(key: &str) -> (DirectiveKind, &str) {
    if let Some(rest) = key.strip_prefix(':') {
        return (DirectiveKind::Bind, rest);
    }
    if let Some(rest) = key.strip_prefix('@') {
        return (DirectiveKind::On, rest);
    }
    if key.starts_with('#') {
        return (DirectiveKind::Unsupported, key);
    }
    let Some(directive) = key.strip_prefix("v-") else {
        return (DirectiveKind::Literal, key);
    };

    let name_end = directive.find([':', '.']).unwrap_or(directive.len());
    let (name, rest) = directive.split_at(name_end);
    let argument = rest.strip_prefix(':');
    match (name, argument) {
        ("bind", Some(arg)) => (DirectiveKind::Bind, arg),
        ("on", Some(arg)) => (DirectiveKind::On, arg),
        ("bind" | "on", None) => (DirectiveKind::Unsupported, directive),
        ("text", _) => (DirectiveKind::Text, directive),
        ("html", _) => (DirectiveKind::Html, directive),
        ("if", _) => (DirectiveKind::If, directive),
        ("else-if", _) => (DirectiveKind::ElseIf, directive),
        ("else", _) => (DirectiveKind::Else, directive),
        ("for", _) => (DirectiveKind::For, directive),
        ("model" | "pre" | "cloak" | "once" | "slot", _) => {
            (DirectiveKind::Unsupported, directive)
        }
        _ => (DirectiveKind::Literal, key),
    }
}

fn split_modifiers(rest: &str) -> (&str, Vec<&str>) {
    // dynamic arguments may contain dots
    if rest.starts_with('[') {
        return (rest, Vec::new());
    }
    let mut parts = rest.split('.');
    let name = parts.next().unwrap_or_default();
    (name, parts.collect())
}

/// Per-element facts the rules need beyond a single attribute.
#[derive(Debug, Default)]
pub struct AttrContext<'a> {
    /// The element's parsed `v-for`, if it has one. A malformed clause is
    /// reported when the loop over attributes reaches `v-for` itself.
    pub for_clause: Option<TranslateResult<ForClause<'a>>>,
}

impl<'a> AttrContext<'a> {
    pub fn for_element(el: &'a ElementNode) -> Self {
        let for_clause = el.attrs.get("v-for").map(|attr| {
            let value = attr.value.as_deref().unwrap_or_default();
            ForClause::parse(value, attr.span)
        });
        Self { for_clause }
    }

    fn valid_for_clause(&self) -> Option<&ForClause<'a>> {
        self.for_clause.as_ref().and_then(|clause| clause.as_ref().ok())
    }
}

/// One emitted WXML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WxmlAttribute {
    pub name: String,
    /// `None` for boolean attributes.
    pub value: Option<String>,
    /// Whether the value came from a binding.
    pub bound: bool,
}

/// WXML attributes for one element.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConvertedAttributes {
    /// Attributes in emission order. Names are unique.
    pub attributes: Vec<WxmlAttribute>,
    /// Content to write right after the opening tag (from `v-text`).
    pub inserted: Option<String>,
}

impl ConvertedAttributes {
    /// Attribute text, each entry with a leading space.
    pub fn markup(&self) -> String {
        let mut markup = String::new();
        for attr in &self.attributes {
            markup.push(' ');
            markup.push_str(&attr.name);
            if let Some(value) = &attr.value {
                let quote = if value.contains('"') { '\'' } else { '"' };
                markup.push('=');
                markup.push(quote);
                markup.push_str(value);
                markup.push(quote);
            }
        }
        markup
    }

    fn push_flag(&mut self, desc: &AttributeDescriptor<'_>, name: &str) -> TranslateResult<()> {
        self.insert(desc, name, None, false)
    }

    fn push(
        &mut self,
        desc: &AttributeDescriptor<'_>,
        name: &str,
        value: &str,
    ) -> TranslateResult<()> {
        self.insert(desc, name, Some(value.to_string()), false)
    }

    fn push_binding(
        &mut self,
        desc: &AttributeDescriptor<'_>,
        name: &str,
        expression: &str,
    ) -> TranslateResult<()> {
        self.insert(desc, name, Some(format!("{{{{{expression}}}}}")), true)
    }

    /// Add an attribute. A static `class` or `style` and its bound form merge
    /// into one value with the static part first; any other repeated name is
    /// an error.
    fn insert(
        &mut self,
        desc: &AttributeDescriptor<'_>,
        name: &str,
        value: Option<String>,
        bound: bool,
    ) -> TranslateResult<()> {
        let Some(existing) = self.attributes.iter_mut().find(|a| a.name == name) else {
            self.attributes.push(WxmlAttribute {
                name: name.to_string(),
                value,
                bound,
            });
            return Ok(());
        };

        let separator = match name {
            "class" => " ",
            "style" => "; ",
            _ => "",
        };
        match (existing.value.take(), value) {
            (Some(current), Some(added)) if !separator.is_empty() && existing.bound != bound => {
                let (first, second) = if existing.bound {
                    (added, current)
                } else {
                    (current, added)
                };
                let first = match name {
                    "style" => first.trim_end().trim_end_matches(';').to_string(),
                    _ => first,
                };
                existing.value = Some(format!("{first}{separator}{second}"));
                existing.bound = true;
                Ok(())
            }
            (current, _) => {
                existing.value = current;
                Err(TranslateError::directive(
                    desc.key,
                    format!("`{name}` is already set on this element"),
                    desc.span,
                ))
            }
        }
    }
}

pub type DirectiveRule =
    fn(&AttributeDescriptor<'_>, &AttrContext<'_>, &mut ConvertedAttributes) -> TranslateResult<()>;

static ATTRIBUTE_RULES: Lazy<FxHashMap<DirectiveKind, DirectiveRule>> = Lazy::new(|| {
    let mut rules: FxHashMap<DirectiveKind, DirectiveRule> = FxHashMap::default();
    rules.insert(DirectiveKind::Bind, convert_binding);
    rules.insert(DirectiveKind::On, convert_event);
    rules.insert(DirectiveKind::Text, convert_text);
    rules.insert(DirectiveKind::Html, convert_html);
    rules.insert(DirectiveKind::If, convert_if);
    rules.insert(DirectiveKind::ElseIf, convert_else_if);
    rules.insert(DirectiveKind::Else, convert_else);
    rules.insert(DirectiveKind::For, convert_for);
    rules.insert(DirectiveKind::Key, convert_key);
    rules.insert(DirectiveKind::Unsupported, convert_unsupported);
    rules.insert(DirectiveKind::Literal, convert_literal);
    rules
});

/// Convert every attribute of `el`, in source order.
pub fn convert_attributes(el: &ElementNode) -> TranslateResult<ConvertedAttributes> {
    let ctx = AttrContext::for_element(el);
    let mut converted = ConvertedAttributes::default();

    for (key, attr) in &el.attrs {
        let mut desc = AttributeDescriptor::parse(key, attr);
        if desc.kind == DirectiveKind::Bind
            && desc.binding_name == "key"
            && ctx.for_clause.is_some()
        {
            desc.kind = DirectiveKind::Key;
        }
        let rule = ATTRIBUTE_RULES
            .get(&desc.kind)
            .copied()
            .unwrap_or(convert_literal as DirectiveRule);
        rule(&desc, &ctx, &mut converted)?;
    }

    Ok(converted)
}

fn convert_binding(
    desc: &AttributeDescriptor<'_>,
    _ctx: &AttrContext<'_>,
    out: &mut ConvertedAttributes,
) -> TranslateResult<()> {
    desc.reject_modifiers()?;
    let value = desc.require_value()?;
    let trimmed = value.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Err(TranslateError::expression(
            value,
            "object and array bindings are not supported",
            desc.span,
        ));
    }
    reject_filters(value, desc.span)?;
    out.push_binding(desc, desc.binding_name, value)
}

fn convert_event(
    desc: &AttributeDescriptor<'_>,
    _ctx: &AttrContext<'_>,
    out: &mut ConvertedAttributes,
) -> TranslateResult<()> {
    let event = translate_event(desc.binding_name).ok_or_else(|| {
        TranslateError::UnsupportedEvent {
            event: desc.binding_name.into(),
            span: desc.span,
        }
    })?;

    let mut stop = false;
    let mut capture = false;
    for modifier in &desc.modifiers {
        match *modifier {
            "stop" => stop = true,
            "capture" => capture = true,
            other => return Err(TranslateError::modifier(desc.key, other, desc.span)),
        }
    }
    let prefix = match (capture, stop) {
        (false, false) => "bind:",
        (false, true) => "catch:",
        (true, false) => "capture-bind:",
        (true, true) => "capture-catch:",
    };

    let handler = desc.value.ok_or_else(|| {
        TranslateError::expression(desc.key, "event bindings need a handler", desc.span)
    })?;
    out.push(desc, &format!("{prefix}{event}"), handler)
}

fn convert_text(
    desc: &AttributeDescriptor<'_>,
    _ctx: &AttrContext<'_>,
    out: &mut ConvertedAttributes,
) -> TranslateResult<()> {
    desc.reject_modifiers()?;
    let value = desc.require_value()?;
    reject_filters(value, desc.span)?;
    out.inserted = Some(format!("{{{{{value}}}}}"));
    Ok(())
}

fn convert_html(
    desc: &AttributeDescriptor<'_>,
    _ctx: &AttrContext<'_>,
    _out: &mut ConvertedAttributes,
) -> TranslateResult<()> {
    Err(TranslateError::directive(
        desc.key,
        "use a <rich-text> element with a `nodes` binding instead",
        desc.span,
    ))
}

fn convert_condition(
    name: &str,
    desc: &AttributeDescriptor<'_>,
    out: &mut ConvertedAttributes,
) -> TranslateResult<()> {
    desc.reject_modifiers()?;
    let value = desc.require_value()?;
    reject_filters(value, desc.span)?;
    out.push_binding(desc, name, value)
}

fn convert_if(
    desc: &AttributeDescriptor<'_>,
    _ctx: &AttrContext<'_>,
    out: &mut ConvertedAttributes,
) -> TranslateResult<()> {
    convert_condition("wx:if", desc, out)
}

fn convert_else_if(
    desc: &AttributeDescriptor<'_>,
    _ctx: &AttrContext<'_>,
    out: &mut ConvertedAttributes,
) -> TranslateResult<()> {
    convert_condition("wx:elif", desc, out)
}

fn convert_else(
    desc: &AttributeDescriptor<'_>,
    _ctx: &AttrContext<'_>,
    out: &mut ConvertedAttributes,
) -> TranslateResult<()> {
    desc.reject_modifiers()?;
    out.push_flag(desc, "wx:else")
}

fn convert_for(
    desc: &AttributeDescriptor<'_>,
    ctx: &AttrContext<'_>,
    out: &mut ConvertedAttributes,
) -> TranslateResult<()> {
    desc.reject_modifiers()?;
    let clause = match &ctx.for_clause {
        Some(Ok(clause)) => clause,
        Some(Err(err)) => return Err(err.clone()),
        None => {
            return Err(TranslateError::expression(
                desc.value.unwrap_or_default(),
                "expected `item in list` or `(item, index) in list`",
                desc.span,
            ))
        }
    };
    out.push_binding(desc, "wx:for", clause.source)?;
    out.push(desc, "wx:for-item", clause.item)?;
    if let Some(index) = clause.index {
        out.push(desc, "wx:for-index", index)?;
    }
    Ok(())
}

fn convert_key(
    desc: &AttributeDescriptor<'_>,
    ctx: &AttrContext<'_>,
    out: &mut ConvertedAttributes,
) -> TranslateResult<()> {
    desc.reject_modifiers()?;
    let value = desc.require_value()?;
    // a malformed `v-for` is reported at its own position
    let Some(clause) = ctx.valid_for_clause() else {
        return Ok(());
    };
    let item = clause.item;
    let expr = value.trim();

    let key = if expr == item {
        "*this"
    } else {
        match expr.strip_prefix(item).and_then(|r| r.strip_prefix('.')) {
            Some(property) if is_identifier(property) => property,
            _ => {
                return Err(TranslateError::expression(
                    value,
                    format!("wx:key must be `{item}` or a property of `{item}`"),
                    desc.span,
                ))
            }
        }
    };
    out.push(desc, "wx:key", key)
}

fn convert_unsupported(
    desc: &AttributeDescriptor<'_>,
    _ctx: &AttrContext<'_>,
    _out: &mut ConvertedAttributes,
) -> TranslateResult<()> {
    let hint = match desc.binding_name.split([':', '.']).next().unwrap_or_default() {
        "model" => "two-way binding is not supported; bind the value and handle `input` instead",
        "pre" | "cloak" | "once" => "compile-time directives are not supported",
        "slot" => "slots are not translated",
        "bind" | "on" => "object syntax is not supported",
        name if name.starts_with('#') => "slots are not translated",
        name if name.starts_with('[') => "dynamic arguments are not supported",
        _ => "the directive has no WXML counterpart",
    };
    Err(TranslateError::directive(desc.key, hint, desc.span))
}

fn convert_literal(
    desc: &AttributeDescriptor<'_>,
    _ctx: &AttrContext<'_>,
    out: &mut ConvertedAttributes,
) -> TranslateResult<()> {
    match desc.value {
        Some(value) => out.push(desc, desc.key, value),
        None => out.push_flag(desc, desc.key),
    }
}
