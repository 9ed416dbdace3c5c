//! Control materialization: turning `input`/`textarea`/`button` attributes
//! into [`Control`] records, and composing the one-line summary both
//! serializers show for them.
//!
//! Attribute fallback chains live here so their order is a single tested
//! unit: label is `aria-label` then `title`; placeholder falls back to the
//! label; the subtype defaults per kind.

use crate::segment::{Control, ControlKind};

/// Longest inline value shown in a summary before truncation kicks in.
const INLINE_LIMIT: usize = 60;

pub(crate) type Attrs = [(String, Option<String>)];

/// First value of the named attribute, if it has one.
pub(crate) fn attr<'a>(attrs: &'a Attrs, name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, value)| value.as_deref())
}

/// Numeric attribute (`width`, `rows`, …); anything non-numeric is ignored.
pub(crate) fn numeric_attr(attrs: &Attrs, name: &str) -> Option<u32> {
    attr(attrs, name)?.trim().parse().ok()
}

/// Materialize an `input`. Hidden inputs carry no user-visible state and
/// are dropped entirely.
pub(crate) fn input_control(attrs: &Attrs) -> Option<Control> {
    let subtype = subtype(attrs, ControlKind::Input);
    if subtype == "hidden" {
        return None;
    }
    let label = label(attrs);
    Some(Control {
        kind: ControlKind::Input,
        subtype,
        name: plain(attrs, "name"),
        placeholder: placeholder(attrs, &label),
        label,
        value: plain(attrs, "value"),
        rows: None,
        cols: None,
    })
}

/// Materialize a `textarea` with an empty value; nested text accumulates
/// into it until the end tag.
pub(crate) fn textarea_control(attrs: &Attrs) -> Control {
    let label = label(attrs);
    Control {
        kind: ControlKind::Textarea,
        subtype: subtype(attrs, ControlKind::Textarea),
        name: plain(attrs, "name"),
        placeholder: placeholder(attrs, &label),
        label,
        value: String::new(),
        rows: numeric_attr(attrs, "rows"),
        cols: numeric_attr(attrs, "cols"),
    }
}

/// Materialize a `button`; nested text accumulates into its value and, once
/// collapsed, doubles as the label when none was given.
pub(crate) fn button_control(attrs: &Attrs) -> Control {
    let label = label(attrs);
    Control {
        kind: ControlKind::Button,
        subtype: subtype(attrs, ControlKind::Button),
        name: plain(attrs, "name"),
        placeholder: placeholder(attrs, &label),
        label,
        value: String::new(),
        rows: None,
        cols: None,
    }
}

fn plain(attrs: &Attrs, name: &str) -> String {
    attr(attrs, name).unwrap_or_default().to_string()
}

fn subtype(attrs: &Attrs, kind: ControlKind) -> String {
    attr(attrs, "type")
        .map(|t| t.trim().to_ascii_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| kind.default_subtype().to_string())
}

fn label(attrs: &Attrs) -> String {
    attr(attrs, "aria-label")
        .or_else(|| attr(attrs, "title"))
        .unwrap_or_default()
        .to_string()
}

fn placeholder(attrs: &Attrs, label: &str) -> String {
    attr(attrs, "placeholder")
        .map(str::to_string)
        .unwrap_or_else(|| label.to_string())
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub(crate) fn collapse_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Clean an inline value for display: collapsed whitespace, capped length,
/// truncation marked with an ellipsis.
fn clean_inline(s: &str) -> String {
    let collapsed = collapse_ws(s);
    if collapsed.chars().count() <= INLINE_LIMIT {
        return collapsed;
    }
    let mut out: String = collapsed.chars().take(INLINE_LIMIT - 3).collect();
    out.push('…');
    out
}

/// Summary pieces in their fixed order: kind, subtype when non-default,
/// name, placeholder, label when distinct from the placeholder, value.
/// Empty fields are omitted.
pub(crate) fn summary_parts(control: &Control) -> Vec<String> {
    let mut parts = vec![control.kind.as_str().to_string()];
    if !control.subtype.is_empty() && control.subtype != control.kind.default_subtype() {
        parts.push(format!("type={}", control.subtype));
    }
    if !control.name.is_empty() {
        parts.push(format!("name=\"{}\"", clean_inline(&control.name)));
    }
    if !control.placeholder.is_empty() {
        parts.push(format!("placeholder=\"{}\"", clean_inline(&control.placeholder)));
    }
    if !control.label.is_empty() && control.label != control.placeholder {
        parts.push(format!("label=\"{}\"", clean_inline(&control.label)));
    }
    if !control.value.is_empty() {
        parts.push(format!("value=\"{}\"", clean_inline(&control.value)));
    }
    parts
}

pub(crate) fn summary(control: &Control) -> String {
    summary_parts(control).join(" ")
}
