// Render targets: patches written to the board, markup helpers, field bindings

use serde::{Deserialize, Serialize};

/// One write to one display target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Patch {
    /// Literal text; never interpreted as markup.
    Text { target: String, text: String },
    Class { target: String, class: String },
    /// Pre-built markup. Only produced from escaped fragments in this module.
    Markup { target: String, html: String },
    Width { target: String, percent: f64 },
    Series { target: String, series: Series },
}

impl Patch {
    pub fn target(&self) -> &str {
        match self {
            Patch::Text { target, .. }
            | Patch::Class { target, .. }
            | Patch::Markup { target, .. }
            | Patch::Width { target, .. }
            | Patch::Series { target, .. } => target,
        }
    }

    pub fn text(target: impl Into<String>, text: impl Into<String>) -> Self {
        Patch::Text {
            target: target.into(),
            text: text.into(),
        }
    }

    pub fn class(target: impl Into<String>, class: impl Into<String>) -> Self {
        Patch::Class {
            target: target.into(),
            class: class.into(),
        }
    }
}

/// Chart data: every dataset carries its own points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: XValue,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Value(f64),
    Label(String),
}

/// Escapes text for insertion into HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<div class="{class}">{escaped text}</div>` for each line, in order.
pub fn line_block<'a>(class: &str, lines: impl IntoIterator<Item = &'a str>) -> String {
    lines
        .into_iter()
        .map(|line| format!("<div class=\"{}\">{}</div>", class, escape_html(line)))
        .collect()
}

/// What a field binding writes to its target.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Text(String),
    /// Text plus a replacement class list.
    Styled { text: String, class: String },
    Markup(String),
}

/// Declarative mapping of one snapshot field to the target `{prefix}-{suffix}`.
pub struct FieldBinding<S> {
    pub suffix: &'static str,
    pub render: fn(&S) -> Rendered,
}

impl<S> FieldBinding<S> {
    pub const fn new(suffix: &'static str, render: fn(&S) -> Rendered) -> Self {
        Self { suffix, render }
    }
}

/// Applies every binding in `bindings` to `snapshot`.
pub fn render_fields<S>(prefix: &str, snapshot: &S, bindings: &[FieldBinding<S>]) -> Vec<Patch> {
    let mut patches = Vec::with_capacity(bindings.len());
    for binding in bindings {
        let target = format!("{}-{}", prefix, binding.suffix);
        match (binding.render)(snapshot) {
            Rendered::Text(text) => patches.push(Patch::text(target, text)),
            Rendered::Styled { text, class } => {
                patches.push(Patch::text(target.clone(), text));
                patches.push(Patch::class(target, class));
            }
            Rendered::Markup(html) => patches.push(Patch::Markup { target, html }),
        }
    }
    patches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_script_tags() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & \"b\""), "a &amp; &quot;b&quot;");
        assert_eq!(escape_html("[PHY] frame 12"), "[PHY] frame 12");
    }

    #[test]
    fn line_block_keeps_order_and_escapes() {
        let html = line_block("terminal-line", ["first", "<b>second</b>"]);
        assert_eq!(
            html,
            "<div class=\"terminal-line\">first</div>\
             <div class=\"terminal-line\">&lt;b&gt;second&lt;/b&gt;</div>"
        );
    }

    struct Probe {
        value: u32,
    }

    type ProbeField = FieldBinding<Probe>;

    const PROBE_FIELDS: &[ProbeField] = &[
        ProbeField::new("value", |p| Rendered::Text(p.value.to_string())),
        ProbeField::new("badge", |p| Rendered::Styled {
            text: "on".into(),
            class: format!("badge b{}", p.value),
        }),
    ];

    #[test]
    fn render_fields_prefixes_targets_and_expands_styled() {
        let patches = render_fields("node", &Probe { value: 7 }, PROBE_FIELDS);
        assert_eq!(
            patches,
            vec![
                Patch::text("node-value", "7"),
                Patch::text("node-badge", "on"),
                Patch::class("node-badge", "badge b7"),
            ]
        );
    }
}
