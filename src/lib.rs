//! Fallback document renderer: converts fetched HTML into typed layout
//! segments and renders them as plain text or as a sanitized, styleable
//! fragment — no layout engine, no CSS, no scripts.
//!
//! One conversion is one [`SegmentBuilder`] fed by one tokenizer pass;
//! independent conversions share nothing and may run on separate threads.

pub use docflow::{Control, ControlKind, Segment, SegmentBuilder, html, text};
pub use markup::{Token, tokenize};

/// Convert a document into its segment sequence.
pub fn segments(input: &str, base_url: &str) -> Vec<Segment> {
    let mut builder = SegmentBuilder::new(base_url);
    for token in tokenize(input) {
        match token {
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                builder.start_tag(&name, &attributes);
                // Self-closing tags surface as a start immediately followed
                // by an end.
                if self_closing {
                    builder.end_tag(&name);
                }
            }
            Token::EndTag(name) => builder.end_tag(&name),
            Token::Text(data) => builder.text(&data),
            Token::Comment(_) | Token::Doctype(_) => {}
        }
    }
    builder.finish()
}

/// Render a document as normalized plain text.
pub fn to_plain_text(input: &str, base_url: &str) -> String {
    text::render(&segments(input, base_url))
}

/// Render a document as a sanitized HTML fragment rooted at a container
/// with the [`html::CONTAINER_CLASS`] class.
pub fn to_html_fragment(input: &str, base_url: &str) -> String {
    html::render(&segments(input, base_url))
}
