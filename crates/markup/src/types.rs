/// One parse event reported by the tokenizer.
///
/// Tag and attribute names are ASCII-lowercased; attribute values keep their
/// original casing. A valueless attribute carries `None`. Self-closing tags
/// (explicit `/>` or void elements) set `self_closing`; a consumer is
/// expected to treat them as a start immediately followed by an end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}
