//! Simplified markup tokenizer with a constrained, practical tag-name
//! character set.
//!
//! Supported tag/attribute name characters (ASCII only): `[A-Za-z0-9:_-]`.
//! Names are interned as lowercase `String`s; attribute values and text
//! runs are entity-decoded here, exactly once — consumers receive them
//! unescaped. `<script>`/`<style>` bodies are scanned as rawtext up to
//! their matching close tag.
//!
//! Known limitations (intentional):
//! - Not an HTML5 state machine; no spec parse-error recovery.
//! - A `<` that opens no recognizable construct is treated as literal text.
//! - Rawtext close tags accept only ASCII whitespace before `>`.

use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Tokenize a whole document into an event sequence.
///
/// Never fails; malformed input degrades to text or truncated constructs.
pub fn tokenize(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    // Slices are cut only at ASCII structural bytes, so every endpoint is a
    // UTF-8 char boundary.
    while i < bytes.len() {
        if bytes[i] != b'<' {
            let end = next_lt(bytes, i + 1);
            push_text(&mut tokens, &input[i..end]);
            i = end;
            continue;
        }
        if input[i..].starts_with(COMMENT_OPEN) {
            i = scan_comment(input, i, &mut tokens);
        } else if starts_with_ignore_ascii_case(bytes, i, b"<!doctype") {
            i = scan_doctype(input, i, &mut tokens);
        } else if bytes.get(i + 1) == Some(&b'/') {
            i = scan_end_tag(input, i, &mut tokens);
        } else if bytes.get(i + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
            i = scan_start_tag(input, i, &mut tokens);
        } else {
            // Literal '<' with no construct behind it.
            let end = next_lt(bytes, i + 1);
            push_text(&mut tokens, &input[i..end]);
            i = end;
        }
    }

    tokens
}

fn next_lt(bytes: &[u8], from: usize) -> usize {
    memchr(b'<', &bytes[from..]).map_or(bytes.len(), |rel| from + rel)
}

fn push_text(tokens: &mut Vec<Token>, raw: &str) {
    let decoded = decode_entities(raw);
    if !decoded.is_empty() {
        tokens.push(Token::Text(decoded));
    }
}

fn starts_with_ignore_ascii_case(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes
        .get(at..at + needle.len())
        .is_some_and(|s| s.eq_ignore_ascii_case(needle))
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn scan_comment(input: &str, at: usize, tokens: &mut Vec<Token>) -> usize {
    let body = at + COMMENT_OPEN.len();
    match input[body..].find(COMMENT_CLOSE) {
        Some(rel) => {
            tokens.push(Token::Comment(input[body..body + rel].to_string()));
            body + rel + COMMENT_CLOSE.len()
        }
        None => {
            // Unterminated comment swallows the rest of the input.
            tokens.push(Token::Comment(input[body..].to_string()));
            input.len()
        }
    }
}

fn scan_doctype(input: &str, at: usize, tokens: &mut Vec<Token>) -> usize {
    let body = at + 2;
    match input[body..].find('>') {
        Some(rel) => {
            tokens.push(Token::Doctype(input[body..body + rel].trim().to_string()));
            body + rel + 1
        }
        None => input.len(),
    }
}

fn scan_end_tag(input: &str, at: usize, tokens: &mut Vec<Token>) -> usize {
    let bytes = input.as_bytes();
    let start = at + 2;
    let mut j = start;
    while j < bytes.len() && is_name_byte(bytes[j]) {
        j += 1;
    }
    let name = input[start..j].to_ascii_lowercase();
    // Anything between the name and '>' is discarded.
    while j < bytes.len() && bytes[j] != b'>' {
        j += 1;
    }
    if j < bytes.len() {
        j += 1;
    }
    if !name.is_empty() {
        tokens.push(Token::EndTag(name));
    }
    j
}

fn scan_start_tag(input: &str, at: usize, tokens: &mut Vec<Token>) -> usize {
    let bytes = input.as_bytes();
    let start = at + 1;
    let mut j = start;
    while j < bytes.len() && is_name_byte(bytes[j]) {
        j += 1;
    }
    let name = input[start..j].to_ascii_lowercase();

    let (attributes, mut self_closing, after) = scan_attributes(input, j);
    if is_void_element(&name) {
        self_closing = true;
    }

    let rawtext = !self_closing && (name == "script" || name == "style");
    tokens.push(Token::StartTag {
        name: name.clone(),
        attributes,
        self_closing,
    });

    if !rawtext {
        return after;
    }

    // Rawtext body: everything up to the matching close tag, undecoded.
    match find_rawtext_close(&input[after..], &name) {
        Some((body_len, consumed)) => {
            let body = &input[after..after + body_len];
            if !body.is_empty() {
                tokens.push(Token::Text(body.to_string()));
            }
            tokens.push(Token::EndTag(name));
            after + consumed
        }
        None => {
            // Close tag never appears: emit the remainder and an implicit end.
            let body = &input[after..];
            if !body.is_empty() {
                tokens.push(Token::Text(body.to_string()));
            }
            tokens.push(Token::EndTag(name));
            input.len()
        }
    }
}

/// Parse the attribute list starting at `at` (just past the tag name).
/// Returns the attributes, the explicit self-closing flag, and the index
/// just past the closing `>`.
fn scan_attributes(input: &str, at: usize) -> (Vec<(String, Option<String>)>, bool, usize) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut attributes = Vec::new();
    let mut self_closing = false;
    let mut k = at;

    loop {
        while k < len && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        if k >= len {
            break;
        }
        if bytes[k] == b'>' {
            k += 1;
            break;
        }
        if bytes[k] == b'/' {
            if bytes.get(k + 1) == Some(&b'>') {
                self_closing = true;
                k += 2;
                break;
            }
            k += 1;
            continue;
        }

        let name_start = k;
        while k < len && is_name_byte(bytes[k]) {
            k += 1;
        }
        if name_start == k {
            // Junk byte; skip it so the scan always advances.
            k += 1;
            continue;
        }
        let name = input[name_start..k].to_ascii_lowercase();

        while k < len && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        if k >= len || bytes[k] != b'=' {
            attributes.push((name, None));
            continue;
        }
        k += 1;
        while k < len && bytes[k].is_ascii_whitespace() {
            k += 1;
        }

        let value = if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
            let quote = bytes[k];
            k += 1;
            let vstart = k;
            while k < len && bytes[k] != quote {
                k += 1;
            }
            let raw = &input[vstart..k];
            if k < len {
                k += 1;
            }
            decode_entities(raw)
        } else {
            let vstart = k;
            while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                if bytes[k] == b'/' && bytes.get(k + 1) == Some(&b'>') {
                    break;
                }
                k += 1;
            }
            decode_entities(&input[vstart..k])
        };
        attributes.push((name, Some(value)));
    }

    (attributes, self_closing, k)
}

/// Find `</name …>` case-insensitively in `haystack`. Returns the body
/// length before the close tag and the bytes consumed including it.
fn find_rawtext_close(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let name_bytes = name.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        let rel = memchr(b'<', &bytes[i..])?;
        i += rel;
        if bytes.get(i + 1) != Some(&b'/')
            || !starts_with_ignore_ascii_case(bytes, i + 2, name_bytes)
        {
            i += 1;
            continue;
        }
        let mut k = i + 2 + name_bytes.len();
        while k < len && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        if k < len && bytes[k] == b'>' {
            return Some((i, k + 1));
        }
        i += 1;
    }
    None
}

fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
