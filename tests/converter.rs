//! End-to-end conversion properties over the tokenizer → builder →
//! serializer pipeline.

use emberview::{Segment, segments, to_html_fragment, to_plain_text};

const BASE: &str = "https://h/";

#[test]
fn empty_document_renders_empty_in_both_serializers() {
    assert_eq!(to_plain_text("", BASE), "");
    assert_eq!(to_html_fragment("", BASE), "");
}

#[test]
fn soft_break_runs_collapse_to_a_single_break() {
    let segs = segments("a<br><br><br>b", BASE);
    let breaks: Vec<bool> = segs
        .iter()
        .filter_map(|s| match s {
            Segment::Break { hard } => Some(*hard),
            _ => None,
        })
        .collect();
    assert_eq!(breaks, vec![false]);
}

#[test]
fn a_hard_break_anywhere_upgrades_the_whole_run() {
    let segs = segments("a<br><p>b", BASE);
    let breaks: Vec<bool> = segs
        .iter()
        .filter_map(|s| match s {
            Segment::Break { hard } => Some(*hard),
            _ => None,
        })
        .collect();
    assert_eq!(breaks, vec![true]);
}

#[test]
fn plain_text_never_has_three_consecutive_line_breaks() {
    let input = "<div><p></p></div><section><article><p>deep</p></article></section>\
                 <p>a</p><br><br><hr><pre>x\n\n\n\ny</pre><p>tail</p>";
    let out = to_plain_text(input, BASE);
    assert!(!out.contains("\n\n\n"), "got: {out:?}");
}

#[test]
fn html_never_has_three_consecutive_brs() {
    let input = "<p>a</p><br><br><div></div><p>b</p><br><section>c</section>";
    let out = to_html_fragment(input, BASE);
    assert!(!out.contains("<br/><br/><br/>"), "got: {out:?}");
}

#[test]
fn nested_ordered_lists_scope_their_counters() {
    let out = to_plain_text(
        "<ol><li>A</li><ol><li>B</li></ol><li>C</li></ol>",
        BASE,
    );
    assert!(out.contains("1. A"), "got: {out:?}");
    assert!(out.contains("1. B"), "got: {out:?}");
    assert!(out.contains("2. C"), "got: {out:?}");
}

#[test]
fn relative_hrefs_resolve_against_the_base() {
    let out = to_plain_text("<a href=\"z\">link</a>", "https://x/y/");
    assert_eq!(out, "link [https://x/y/z]");
}

#[test]
fn long_control_values_truncate_with_an_ellipsis() {
    let long = "v".repeat(80);
    let input = format!("<input name=\"f\" value=\"{long}\">");
    let out = to_plain_text(&input, BASE);
    let expected = format!("[input name=\"f\" value=\"{}…\"]", "v".repeat(57));
    assert_eq!(out, expected);
}

#[test]
fn author_escaped_entities_decode_exactly_once() {
    let text = to_plain_text("<p>&amp;lt;</p>", BASE);
    assert_eq!(text, "&lt;");
    let html = to_html_fragment("<p>&amp;lt;</p>", BASE);
    assert!(html.contains("&amp;lt;"), "got: {html:?}");
}

#[test]
fn paragraphs_separate_with_a_blank_line() {
    let out = to_plain_text("<p>Hello <b>World</b></p><p>Second</p>", BASE);
    assert_eq!(out, "Hello World\n\nSecond");
}

#[test]
fn unordered_list_items_get_bullets_on_separate_lines() {
    let out = to_plain_text("<ul><li>One</li><li>Two</li></ul>", BASE);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines.contains(&"• One"), "got: {out:?}");
    assert!(lines.contains(&"• Two"), "got: {out:?}");
}

#[test]
fn ordered_list_items_are_numbered_in_order() {
    let out = to_plain_text("<ol><li>A</li><li>B</li></ol>", BASE);
    let a = out.find("1. A");
    let b = out.find("2. B");
    assert!(a.is_some() && b.is_some() && a < b, "got: {out:?}");
}

#[test]
fn links_render_text_then_bracketed_href() {
    let out = to_plain_text("<a href=\"/x\">go</a>", BASE);
    assert_eq!(out, "go [https://h/x]");
}

#[test]
fn images_render_a_bracketed_descriptor() {
    let out = to_plain_text("<img src=\"pic.png\" alt=\"Cat\">", BASE);
    assert!(
        out.contains("[image alt=\"Cat\" src=\"https://h/pic.png\"]"),
        "got: {out:?}"
    );
}

#[test]
fn headings_are_uppercased_and_block_separated() {
    let out = to_plain_text("<h1>Page title</h1><p>body</p>", BASE);
    assert_eq!(out, "PAGE TITLE\n\nbody");
}

#[test]
fn script_and_style_content_never_reaches_the_output() {
    let input = "keep<script>var hidden = '<p>no</p>';</script>\
                 <style>body { color: red }</style>keep too";
    let text = to_plain_text(input, BASE);
    let html = to_html_fragment(input, BASE);
    assert!(!text.contains("hidden") && !text.contains("color"), "got: {text:?}");
    assert!(!html.contains("hidden") && !html.contains("color"), "got: {html:?}");
}

#[test]
fn hidden_inputs_are_dropped_from_both_outputs() {
    let input = "<input type=\"hidden\" name=\"csrf\" value=\"tok\"><p>visible</p>";
    assert_eq!(to_plain_text(input, BASE), "visible");
    assert!(!to_html_fragment(input, BASE).contains("csrf"));
}

#[test]
fn textarea_and_button_text_accumulate_into_their_controls() {
    let input = "<textarea name=\"msg\">first\nsecond</textarea>\
                 <button> Send <span>now</span> </button>";
    let out = to_plain_text(input, BASE);
    assert!(out.contains("[textarea name=\"msg\" value=\"first second\"]"), "got: {out:?}");
    assert!(out.contains("label=\"Send now\""), "got: {out:?}");
}

#[test]
fn download_links_render_with_their_intent() {
    let input = "<a href=\"f.bin\" download=\"saved.bin\">get</a>";
    let text = to_plain_text(input, BASE);
    assert_eq!(text, "get [download saved.bin]");
    let html = to_html_fragment(input, BASE);
    assert!(html.contains("download=\"saved.bin\""), "got: {html:?}");
}

#[test]
fn preformatted_blocks_keep_their_line_structure() {
    let out = to_plain_text("<p>intro</p><pre>fn main() {\n    body\n}</pre>", BASE);
    assert!(out.contains("fn main() {\n    body\n}"), "got: {out:?}");
}

#[test]
fn malformed_markup_degrades_without_failing() {
    let inputs = [
        "</p></div></a></ol>",
        "<a href=",
        "<p <p <p",
        "<ul><li>x",
        "<<<<>>>>",
        "<textarea>never closed",
    ];
    for input in inputs {
        let _ = to_plain_text(input, BASE);
        let _ = to_html_fragment(input, BASE);
    }
}

#[test]
fn html_fragment_uses_the_stable_container_class() {
    let out = to_html_fragment("<p>x</p>", BASE);
    assert!(out.starts_with("<div class=\"emberview-doc\">"), "got: {out:?}");
}
