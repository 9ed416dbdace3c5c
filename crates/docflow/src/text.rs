//! Plain-text serialization of a segment sequence.

use crate::control;
use crate::segment::Segment;

const RULE_WIDTH: usize = 40;

/// Render segments to normalized text. Empty input yields an empty string;
/// the result never contains three or more consecutive line breaks.
pub fn render(segments: &[Segment]) -> String {
    let mut out = String::new();

    for segment in segments {
        match segment {
            Segment::Break { hard } => push_break(&mut out, *hard),
            Segment::Rule => {
                ensure_line_start(&mut out);
                out.extend(std::iter::repeat_n('-', RULE_WIDTH));
                out.push('\n');
            }
            Segment::Text { prefix, content } => push_inline(&mut out, prefix, content),
            Segment::Link {
                prefix,
                content,
                href,
            } => {
                push_inline(&mut out, prefix, content);
                push_href(&mut out, href);
            }
            Segment::Preformatted { prefix, content } => {
                ensure_line_start(&mut out);
                out.push_str(prefix);
                out.push_str(content);
            }
            Segment::LinkPreformatted {
                prefix,
                content,
                href,
            } => {
                ensure_line_start(&mut out);
                out.push_str(prefix);
                out.push_str(content);
                push_href(&mut out, href);
            }
            Segment::Download {
                prefix,
                content,
                href,
                filename,
            } => {
                push_inline(&mut out, prefix, content);
                let target = filename.as_deref().unwrap_or(href);
                if !target.is_empty() {
                    out.push_str(" [download ");
                    out.push_str(target);
                    out.push(']');
                }
            }
            Segment::Image {
                src,
                alt,
                title,
                width,
                height,
            } => {
                ensure_line_start(&mut out);
                push_image_descriptor(&mut out, src, alt, title, *width, *height);
            }
            Segment::Control(control) => {
                ensure_line_start(&mut out);
                out.push('[');
                out.push_str(&control::summary(control));
                out.push(']');
            }
        }
    }

    finalize(out)
}

/// Hard breaks leave exactly one blank line, soft breaks exactly one line
/// break. A break with no prior content is dropped.
fn push_break(out: &mut String, hard: bool) {
    if out.is_empty() {
        return;
    }
    if hard {
        trim_trailing_ws(out);
        out.push_str("\n\n");
    } else if !out.ends_with('\n') {
        out.push('\n');
    }
}

fn push_inline(out: &mut String, prefix: &str, content: &str) {
    if out.chars().last().is_some_and(|c| !c.is_whitespace()) {
        out.push(' ');
    }
    out.push_str(prefix);
    out.push_str(content);
}

fn push_href(out: &mut String, href: &str) {
    if !href.is_empty() {
        out.push_str(" [");
        out.push_str(href);
        out.push(']');
    }
}

fn push_image_descriptor(
    out: &mut String,
    src: &str,
    alt: &str,
    title: &str,
    width: Option<u32>,
    height: Option<u32>,
) {
    out.push_str("[image");
    let caption = if alt.is_empty() { title } else { alt };
    if !caption.is_empty() {
        out.push_str(" alt=\"");
        out.push_str(caption);
        out.push('"');
    }
    match (width, height) {
        (Some(w), Some(h)) => out.push_str(&format!(" {w}×{h}")),
        (Some(w), None) => out.push_str(&format!(" {w}")),
        (None, Some(h)) => out.push_str(&format!(" {h}")),
        (None, None) => {}
    }
    out.push_str(" src=\"");
    out.push_str(src);
    out.push_str("\"]");
}

fn ensure_line_start(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn trim_trailing_ws(out: &mut String) {
    while out
        .as_bytes()
        .last()
        .is_some_and(|b| b.is_ascii_whitespace())
    {
        out.pop();
    }
}

/// Cap newline runs at two and trim the outer edges.
fn finalize(text: String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newline_run = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                out.push(ch);
            }
        } else {
            newline_run = 0;
            out.push(ch);
        }
    }
    out.trim().to_string()
}
