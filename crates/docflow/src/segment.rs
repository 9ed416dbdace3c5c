/// Kind of a materialized form control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    Input,
    Textarea,
    Button,
}

impl ControlKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlKind::Input => "input",
            ControlKind::Textarea => "textarea",
            ControlKind::Button => "button",
        }
    }

    /// Subtype implied when the markup carries no `type` attribute; the
    /// summary omits a subtype equal to this.
    pub(crate) fn default_subtype(self) -> &'static str {
        match self {
            ControlKind::Input => "text",
            ControlKind::Button => "submit",
            ControlKind::Textarea => "",
        }
    }
}

/// Summary of an `input`/`textarea`/`button` element.
///
/// `value` accumulates nested text for textareas and buttons until the
/// matching end tag; every other field is fixed at materialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Control {
    pub kind: ControlKind,
    pub subtype: String,
    pub name: String,
    pub placeholder: String,
    pub label: String,
    pub value: String,
    pub rows: Option<u32>,
    pub cols: Option<u32>,
}

/// One typed unit of the builder's output sequence.
///
/// Segments are emitted in document order of first-observed content and are
/// immutable once the builder finishes. `prefix` carries a pending list
/// bullet or number and is attached to at most one content segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Separator between blocks. A hard break renders as a blank line, a
    /// soft break as a single line break.
    Break { hard: bool },
    /// Horizontal divider.
    Rule,
    /// Whitespace-collapsed inline run.
    Text { prefix: String, content: String },
    /// Verbatim run inside a `pre` region.
    Preformatted { prefix: String, content: String },
    /// Anchor text.
    Link {
        prefix: String,
        content: String,
        href: String,
    },
    /// Anchor text inside a `pre` region.
    LinkPreformatted {
        prefix: String,
        content: String,
        href: String,
    },
    /// Anchor carrying a download intent.
    Download {
        prefix: String,
        content: String,
        href: String,
        filename: Option<String>,
    },
    /// Image with its source resolved against the document base URL.
    Image {
        src: String,
        alt: String,
        title: String,
        width: Option<u32>,
        height: Option<u32>,
    },
    /// Form-control summary.
    Control(Control),
}
