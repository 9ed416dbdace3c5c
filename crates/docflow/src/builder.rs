//! Event-driven segment builder: one instance converts one document's parse
//! events into an ordered [`Segment`] sequence.
//!
//! There is no global mode enum; behavior is fully determined by the stacks
//! the builder carries (ignore regions, open lists, open anchors, open
//! controls) plus the heading flag and preformatted depth. All transitions
//! are LIFO-nested, and unmatched end tags are ignored after checking the
//! relevant stack, so unbalanced markup degrades instead of failing.

use crate::control::{self, attr};
use crate::segment::Segment;
use crate::url::resolve;
use std::borrow::Cow;

const BULLET_PREFIX: &str = "• ";

/// Recognized tag vocabulary. Everything else maps to `Unknown`, which is
/// transparent: it produces no segment, but its text flows through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tag {
    Script,
    Style,
    Br,
    Hr,
    Paragraph,
    Pre,
    Heading,
    Article,
    Section,
    Blockquote,
    Div,
    Table,
    TableRow,
    Form,
    Header,
    Footer,
    Nav,
    Aside,
    Main,
    Figure,
    FigCaption,
    Fieldset,
    Address,
    Details,
    Summary,
    Ul,
    Ol,
    Li,
    Dl,
    Dt,
    Dd,
    Input,
    Textarea,
    Button,
    Img,
    Anchor,
    Unknown,
}

impl Tag {
    fn from_name(name: &str) -> Tag {
        if is_heading_name(name) {
            return Tag::Heading;
        }
        match name {
            "script" => Tag::Script,
            "style" => Tag::Style,
            "br" => Tag::Br,
            "hr" => Tag::Hr,
            "p" => Tag::Paragraph,
            "pre" => Tag::Pre,
            "article" => Tag::Article,
            "section" => Tag::Section,
            "blockquote" => Tag::Blockquote,
            "div" => Tag::Div,
            "table" => Tag::Table,
            "tr" => Tag::TableRow,
            "form" => Tag::Form,
            "header" => Tag::Header,
            "footer" => Tag::Footer,
            "nav" => Tag::Nav,
            "aside" => Tag::Aside,
            "main" => Tag::Main,
            "figure" => Tag::Figure,
            "figcaption" => Tag::FigCaption,
            "fieldset" => Tag::Fieldset,
            "address" => Tag::Address,
            "details" => Tag::Details,
            "summary" => Tag::Summary,
            "ul" => Tag::Ul,
            "ol" => Tag::Ol,
            "li" => Tag::Li,
            "dl" => Tag::Dl,
            "dt" => Tag::Dt,
            "dd" => Tag::Dd,
            "input" => Tag::Input,
            "textarea" => Tag::Textarea,
            "button" => Tag::Button,
            "img" => Tag::Img,
            "a" => Tag::Anchor,
            _ => Tag::Unknown,
        }
    }

    /// Break emitted when entering the tag: `Some(true)` for the
    /// double-break (blank line) tags, `Some(false)` for plain blocks.
    fn entry_break(self) -> Option<bool> {
        match self {
            Tag::Paragraph
            | Tag::Pre
            | Tag::Heading
            | Tag::Article
            | Tag::Section
            | Tag::Blockquote => Some(true),
            Tag::Div
            | Tag::Table
            | Tag::TableRow
            | Tag::Form
            | Tag::Header
            | Tag::Footer
            | Tag::Nav
            | Tag::Aside
            | Tag::Main
            | Tag::Figure
            | Tag::FigCaption
            | Tag::Fieldset
            | Tag::Address
            | Tag::Details
            | Tag::Summary
            | Tag::Ul
            | Tag::Ol
            | Tag::Li
            | Tag::Dl
            | Tag::Dt
            | Tag::Dd => Some(false),
            _ => None,
        }
    }
}

fn is_heading_name(name: &str) -> bool {
    let b = name.as_bytes();
    b.len() == 2 && b[0] == b'h' && (b'1'..=b'6').contains(&b[1])
}

fn fold_name(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

struct ListState {
    ordered: bool,
    counter: u32,
}

struct AnchorState {
    href: String,
    download: bool,
    filename: Option<String>,
}

/// Single-pass converter state, scoped to exactly one document: create it,
/// feed events until the document ends, take the segments with
/// [`finish`](SegmentBuilder::finish), discard it.
///
/// No event ever fails, whatever the input.
pub struct SegmentBuilder {
    base_url: String,
    segments: Vec<Segment>,
    ignore: Vec<Tag>,
    lists: Vec<ListState>,
    anchors: Vec<AnchorState>,
    heading: bool,
    pre_depth: u32,
    pending_prefix: Option<String>,
    open_textareas: Vec<usize>,
    open_buttons: Vec<usize>,
}

impl SegmentBuilder {
    /// `base_url` anchors relative `href`/`src` resolution for the whole
    /// conversion.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            segments: Vec::new(),
            ignore: Vec::new(),
            lists: Vec::new(),
            anchors: Vec::new(),
            heading: false,
            pre_depth: 0,
            pending_prefix: None,
            open_textareas: Vec::new(),
            open_buttons: Vec::new(),
        }
    }

    pub fn start_tag(&mut self, name: &str, attrs: &[(String, Option<String>)]) {
        let name = fold_name(name);
        let tag = Tag::from_name(&name);

        if matches!(tag, Tag::Script | Tag::Style) {
            self.ignore.push(tag);
            return;
        }
        if !self.ignore.is_empty() {
            return;
        }

        if let Some(hard) = tag.entry_break() {
            self.push_break(hard);
        }

        match tag {
            Tag::Br => self.push_break(false),
            Tag::Hr => self.push_rule(),
            Tag::Ul => self.lists.push(ListState {
                ordered: false,
                counter: 1,
            }),
            Tag::Ol => self.lists.push(ListState {
                ordered: true,
                counter: 1,
            }),
            // The entry break above already cleared any stale prefix; the
            // new one survives until the next content segment.
            Tag::Li => {
                if let Some(list) = self.lists.last_mut() {
                    self.pending_prefix = Some(if list.ordered {
                        let n = list.counter;
                        list.counter += 1;
                        format!("{n}. ")
                    } else {
                        BULLET_PREFIX.to_string()
                    });
                }
            }
            Tag::Heading => self.heading = true,
            Tag::Pre => self.pre_depth += 1,
            Tag::Input => match control::input_control(attrs) {
                Some(input) => self.segments.push(Segment::Control(input)),
                None => log::trace!(target: "docflow.builder", "dropping hidden input"),
            },
            Tag::Textarea => {
                self.segments
                    .push(Segment::Control(control::textarea_control(attrs)));
                self.open_textareas.push(self.segments.len() - 1);
            }
            Tag::Button => {
                self.segments
                    .push(Segment::Control(control::button_control(attrs)));
                self.open_buttons.push(self.segments.len() - 1);
            }
            Tag::Img => self.push_image(attrs),
            Tag::Anchor => self.push_anchor(attrs),
            _ => {}
        }
    }

    pub fn end_tag(&mut self, name: &str) {
        let name = fold_name(name);
        let tag = Tag::from_name(&name);

        if matches!(tag, Tag::Script | Tag::Style) {
            if self.ignore.last() == Some(&tag) {
                self.ignore.pop();
            }
            return;
        }
        if !self.ignore.is_empty() {
            return;
        }

        match tag {
            Tag::Li => self.push_break(false),
            Tag::Textarea => self.close_textarea(),
            Tag::Button => self.close_button(),
            Tag::Pre => {
                if self.pre_depth > 0 {
                    self.pre_depth -= 1;
                    self.push_break(true);
                }
            }
            Tag::Ul | Tag::Ol => {
                if self.lists.pop().is_some() {
                    self.push_break(true);
                }
            }
            Tag::Heading => {
                if self.heading {
                    self.heading = false;
                    self.push_break(true);
                }
            }
            Tag::Anchor => {
                if self.anchors.pop().is_none() {
                    log::trace!(target: "docflow.builder", "ignoring unmatched </a>");
                }
            }
            _ => {}
        }
    }

    /// Feed a text run. Events arrive already entity-decoded; the builder
    /// never unescapes, so author-escaped text survives verbatim.
    pub fn text(&mut self, data: &str) {
        if !self.ignore.is_empty() {
            return;
        }

        // Open controls swallow text verbatim; collapsing happens when the
        // control closes.
        if let Some(index) = self.open_control_index() {
            if let Some(Segment::Control(open)) = self.segments.get_mut(index) {
                open.value.push_str(data);
            }
            return;
        }

        let data = if self.heading {
            data.to_uppercase()
        } else {
            data.to_string()
        };

        if self.pre_depth > 0 {
            let content = normalize_newlines(&data);
            if !content.is_empty() {
                self.emit_content(content, true);
            }
        } else {
            let content = control::collapse_ws(&data);
            if !content.is_empty() {
                self.emit_content(content, false);
            }
        }
    }

    /// Take the finished sequence. Controls left open by unbalanced markup
    /// are closed as if their end tags had arrived.
    pub fn finish(mut self) -> Vec<Segment> {
        while !self.open_buttons.is_empty() {
            self.close_button();
        }
        while !self.open_textareas.is_empty() {
            self.close_textarea();
        }
        self.segments
    }

    fn emit_content(&mut self, content: String, preformatted: bool) {
        let prefix = self.pending_prefix.take().unwrap_or_default();
        let segment = match self.anchors.last() {
            Some(anchor) if anchor.download => Segment::Download {
                prefix,
                content,
                href: anchor.href.clone(),
                filename: anchor.filename.clone(),
            },
            Some(anchor) if preformatted => Segment::LinkPreformatted {
                prefix,
                content,
                href: anchor.href.clone(),
            },
            Some(anchor) => Segment::Link {
                prefix,
                content,
                href: anchor.href.clone(),
            },
            None if preformatted => Segment::Preformatted { prefix, content },
            None => Segment::Text { prefix, content },
        };
        self.segments.push(segment);
    }

    /// Record a break, collapsing into the previous one when present.
    /// A hard break, once recorded, never downgrades. Breaks also cancel
    /// any pending list prefix, and a leading break is never recorded.
    fn push_break(&mut self, hard: bool) {
        self.pending_prefix = None;
        match self.segments.last_mut() {
            None => {}
            Some(Segment::Break { hard: recorded }) => *recorded |= hard,
            Some(_) => self.segments.push(Segment::Break { hard }),
        }
    }

    fn push_rule(&mut self) {
        self.pending_prefix = None;
        if !self.segments.is_empty() {
            self.push_break(true);
        }
        self.segments.push(Segment::Rule);
    }

    fn push_anchor(&mut self, attrs: &[(String, Option<String>)]) {
        let href = attr(attrs, "href")
            .map(|h| resolve(&self.base_url, h.trim()))
            .unwrap_or_default();
        let download_attr = attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("download"));
        let (download, filename) = match download_attr {
            Some((_, Some(value))) if !value.trim().is_empty() => {
                (true, Some(value.trim().to_string()))
            }
            Some(_) => (true, None),
            None => (false, None),
        };
        self.anchors.push(AnchorState {
            href,
            download,
            filename,
        });
    }

    fn push_image(&mut self, attrs: &[(String, Option<String>)]) {
        let Some(source) = image_source(attrs) else {
            log::trace!(target: "docflow.builder", "skipping img without a resolvable source");
            return;
        };
        self.segments.push(Segment::Image {
            src: resolve(&self.base_url, source),
            alt: attr(attrs, "alt").unwrap_or_default().to_string(),
            title: attr(attrs, "title").unwrap_or_default().to_string(),
            width: control::numeric_attr(attrs, "width"),
            height: control::numeric_attr(attrs, "height"),
        });
    }

    fn close_textarea(&mut self) {
        let Some(index) = self.open_textareas.pop() else {
            return;
        };
        if let Some(Segment::Control(open)) = self.segments.get_mut(index) {
            open.value = normalize_newlines(open.value.trim());
        }
        self.push_break(false);
    }

    fn close_button(&mut self) {
        let Some(index) = self.open_buttons.pop() else {
            return;
        };
        if let Some(Segment::Control(open)) = self.segments.get_mut(index) {
            open.value = control::collapse_ws(&open.value);
            if open.label.is_empty() && !open.value.is_empty() {
                open.label = open.value.clone();
            }
        }
        self.push_break(false);
    }

    /// The control currently swallowing text: the most recently
    /// materialized of any open textarea or button.
    fn open_control_index(&self) -> Option<usize> {
        match (self.open_textareas.last(), self.open_buttons.last()) {
            (Some(&t), Some(&b)) => Some(t.max(b)),
            (Some(&t), None) => Some(t),
            (None, Some(&b)) => Some(b),
            (None, None) => None,
        }
    }
}

/// Image source fallback chain: `src`, then the lazy-loading attributes,
/// then the first `srcset` candidate.
fn image_source(attrs: &[(String, Option<String>)]) -> Option<&str> {
    for key in ["src", "data-src", "data-lazy-src"] {
        if let Some(value) = attr(attrs, key) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    let srcset = attr(attrs, "srcset")?;
    let candidate = srcset.split(',').next()?.trim().split_whitespace().next()?;
    (!candidate.is_empty()).then_some(candidate)
}

fn normalize_newlines(s: &str) -> String {
    if !s.contains('\r') {
        return s.to_string();
    }
    s.replace("\r\n", "\n").replace('\r', "\n")
}
