//! Sanitized-HTML serialization of a segment sequence.
//!
//! The fragment is rooted at a single container carrying a fixed class so a
//! host can apply its own stylesheet; nothing from the source document
//! reaches the output unescaped.

use crate::control;
use crate::segment::Segment;

/// Class of the fragment's container element.
pub const CONTAINER_CLASS: &str = "emberview-doc";

const CONTROL_CLASS: &str = "emberview-control";
const FIGURE_CLASS: &str = "emberview-figure";
const BR: &str = "<br/>";

/// Render segments to an HTML fragment. Empty input yields an empty string;
/// the result never contains three or more consecutive `<br/>` elements.
pub fn render(segments: &[Segment]) -> String {
    let mut body = String::new();
    // True until something other than a break is emitted; leading and
    // doubled separators are suppressed through it.
    let mut at_break = true;

    for segment in segments {
        match segment {
            Segment::Break { hard } => {
                if at_break {
                    continue;
                }
                body.push_str(BR);
                if *hard {
                    body.push_str(BR);
                }
                at_break = true;
                continue;
            }
            Segment::Rule => body.push_str("<hr/>"),
            Segment::Text { prefix, content } => {
                push_escaped(&mut body, prefix);
                push_escaped(&mut body, content);
            }
            Segment::Link {
                prefix,
                content,
                href,
            } => {
                push_escaped(&mut body, prefix);
                push_anchor(&mut body, href, content);
            }
            Segment::Preformatted { prefix, content } => {
                body.push_str("<pre>");
                push_escaped(&mut body, prefix);
                push_escaped(&mut body, content);
                body.push_str("</pre>");
            }
            Segment::LinkPreformatted {
                prefix,
                content,
                href,
            } => {
                body.push_str("<pre>");
                push_escaped(&mut body, prefix);
                push_anchor(&mut body, href, content);
                body.push_str("</pre>");
            }
            Segment::Download {
                prefix,
                content,
                href,
                filename,
            } => {
                push_escaped(&mut body, prefix);
                push_download(&mut body, href, content, filename.as_deref());
            }
            Segment::Image {
                src,
                alt,
                title,
                width,
                height,
            } => push_figure(&mut body, src, alt, title, *width, *height),
            Segment::Control(control) => {
                body.push_str("<div class=\"");
                body.push_str(CONTROL_CLASS);
                body.push_str("\">");
                let parts = control::summary_parts(control);
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        body.push(' ');
                    }
                    push_escaped(&mut body, part);
                }
                body.push_str("</div>");
            }
        }
        at_break = false;
    }

    if body.is_empty() {
        return String::new();
    }
    format!(
        "<div class=\"{CONTAINER_CLASS}\">{}</div>",
        collapse_break_runs(&body)
    )
}

fn push_anchor(out: &mut String, href: &str, text: &str) {
    if href.is_empty() {
        push_escaped(out, text);
        return;
    }
    out.push_str("<a href=\"");
    push_attr_escaped(out, href);
    out.push_str("\">");
    push_escaped(out, text);
    out.push_str("</a>");
}

fn push_download(out: &mut String, href: &str, text: &str, filename: Option<&str>) {
    out.push_str("<a");
    if !href.is_empty() {
        out.push_str(" href=\"");
        push_attr_escaped(out, href);
        out.push('"');
    }
    match filename {
        Some(name) => {
            out.push_str(" download=\"");
            push_attr_escaped(out, name);
            out.push('"');
        }
        None => out.push_str(" download"),
    }
    out.push('>');
    push_escaped(out, text);
    out.push_str("</a>");
}

fn push_figure(
    out: &mut String,
    src: &str,
    alt: &str,
    title: &str,
    width: Option<u32>,
    height: Option<u32>,
) {
    out.push_str("<figure class=\"");
    out.push_str(FIGURE_CLASS);
    out.push_str("\"><img src=\"");
    push_attr_escaped(out, src);
    out.push_str("\" alt=\"");
    push_attr_escaped(out, if alt.is_empty() { title } else { alt });
    out.push('"');
    // Dimensions are parsed integers, so the attributes stay numeric-only.
    if let Some(w) = width {
        out.push_str(&format!(" width=\"{w}\""));
    }
    if let Some(h) = height {
        out.push_str(&format!(" height=\"{h}\""));
    }
    out.push_str("/>");
    if !title.is_empty() {
        out.push_str("<figcaption>");
        push_escaped(out, title);
        out.push_str("</figcaption>");
    }
    out.push_str("<a href=\"");
    push_attr_escaped(out, src);
    out.push_str("\" download>download image</a></figure>");
}

fn push_escaped(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn push_attr_escaped(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Cap `<br/>` runs at two.
fn collapse_break_runs(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    let mut run = 0usize;
    while let Some(pos) = rest.find(BR) {
        if pos > 0 {
            run = 0;
            out.push_str(&rest[..pos]);
        }
        run += 1;
        if run <= 2 {
            out.push_str(BR);
        }
        rest = &rest[pos + BR.len()..];
    }
    out.push_str(rest);
    out
}
