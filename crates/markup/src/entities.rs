use memchr::memchr;

// Digit caps keep numeric scans bounded: 1114111 / 0x10FFFF.
const MAX_DEC_DIGITS: usize = 7;
const MAX_HEX_DIGITS: usize = 6;
const MAX_NAME_LEN: usize = 8;

/// Decode a practical subset of HTML entities.
///
/// Contract:
/// - Named entities cover the set a text-mode renderer actually meets:
///   the XML five, `&nbsp;`, and common typographic names (dashes, quotes,
///   ellipsis, bullet, `&times;`, …).
/// - Numeric entities (`&#215;`, `&#xD7;`) decode only when
///   semicolon-terminated, within the digit caps, and mapping to a valid
///   Unicode scalar.
/// - Everything else — unknown names, missing semicolons, malformed or
///   overlong numerics — passes through unchanged.
///
/// Intentionally not HTML5-complete; the behavior is narrow and stable.
pub fn decode_entities(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut rest = 0usize;

    while let Some(rel) = memchr(b'&', &bytes[rest..]) {
        let amp = rest + rel;
        out.push_str(&input[rest..amp]);
        match decode_one(input, amp) {
            Some((ch, after)) => {
                out.push(ch);
                rest = after;
            }
            None => {
                out.push('&');
                rest = amp + 1;
            }
        }
    }

    out.push_str(&input[rest..]);
    out
}

/// Try to decode the entity whose `&` sits at byte `amp`. Returns the decoded
/// char and the index just past the terminating semicolon.
fn decode_one(input: &str, amp: usize) -> Option<(char, usize)> {
    let bytes = input.as_bytes();
    let body = amp + 1;

    if bytes.get(body) == Some(&b'#') {
        let (radix, digits_at, max_digits) = if matches!(bytes.get(body + 1), Some(b'x' | b'X')) {
            (16u32, body + 2, MAX_HEX_DIGITS)
        } else {
            (10u32, body + 1, MAX_DEC_DIGITS)
        };
        let mut end = digits_at;
        while end < bytes.len() && (bytes[end] as char).is_digit(radix) {
            end += 1;
        }
        let digits = end - digits_at;
        if digits == 0 || digits > max_digits || bytes.get(end) != Some(&b';') {
            return None;
        }
        let value = u32::from_str_radix(&input[digits_at..end], radix).ok()?;
        return Some((char::from_u32(value)?, end + 1));
    }

    let mut end = body;
    while end < bytes.len() && end - body <= MAX_NAME_LEN && bytes[end].is_ascii_alphanumeric() {
        end += 1;
    }
    if bytes.get(end) != Some(&b';') {
        return None;
    }
    Some((named(&input[body..end])?, end + 1))
}

fn named(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "shy" => '\u{00AD}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "deg" => '°',
        "middot" => '·',
        "bull" => '•',
        "hellip" => '…',
        "ndash" => '–',
        "mdash" => '—',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "laquo" => '«',
        "raquo" => '»',
        "times" => '×',
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_common_named_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(decode_entities("&apos;x&apos;"), "'x'");
        assert_eq!(decode_entities("a&nbsp;b"), "a\u{00A0}b");
    }

    #[test]
    fn decodes_typographic_names() {
        assert_eq!(decode_entities("wait&hellip;"), "wait…");
        assert_eq!(decode_entities("1&ndash;2 &mdash; 3"), "1–2 — 3");
        assert_eq!(decode_entities("&bull; item"), "• item");
        assert_eq!(decode_entities("120&times;32"), "120×32");
    }

    #[test]
    fn decodes_numeric_entities() {
        assert_eq!(decode_entities("&#215;"), "×");
        assert_eq!(decode_entities("&#xD7;"), "×");
        assert_eq!(decode_entities("&#X1F4A9;"), "\u{1F4A9}");
        assert_eq!(decode_entities("&#1114111;"), "\u{10FFFF}");
    }

    #[test]
    fn preserves_utf8_around_entities() {
        assert_eq!(decode_entities("π &amp; σ"), "π & σ");
        assert_eq!(decode_entities("120×32"), "120×32");
    }

    #[test]
    fn passes_through_unknown_and_unterminated() {
        assert_eq!(
            decode_entities("before &notanentity; after"),
            "before &notanentity; after"
        );
        assert_eq!(decode_entities("&amp"), "&amp");
        assert_eq!(decode_entities("loose &amp space"), "loose &amp space");
        assert_eq!(decode_entities("&#215 "), "&#215 ");
        assert_eq!(decode_entities("&#xD7 "), "&#xD7 ");
    }

    #[test]
    fn passes_through_malformed_numerics() {
        assert_eq!(decode_entities("&#;"), "&#;");
        assert_eq!(decode_entities("&#x;"), "&#x;");
        assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
        assert_eq!(decode_entities("&#-1;"), "&#-1;");
        assert_eq!(decode_entities("&#99999999;"), "&#99999999;");
        assert_eq!(decode_entities("&#x110000;"), "&#x110000;");
    }

    #[test]
    fn rejects_surrogate_scalars() {
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#xDFFF;"), "&#xDFFF;");
        assert_eq!(decode_entities("&#55296;"), "&#55296;");
    }

    #[test]
    fn malformed_entity_does_not_swallow_the_next_one() {
        assert_eq!(decode_entities("&#xZZ;&amp;"), "&#xZZ;&");
        assert_eq!(decode_entities("&&lt;"), "&<");
    }

    #[test]
    fn adversarial_inputs_stay_stable() {
        let unchanged = [
            "",
            "plain text",
            "&",
            "&&",
            "&;",
            "&#;",
            "&unknown;",
            "&#9999999;",
        ];
        for s in unchanged {
            assert_eq!(decode_entities(s), s);
        }

        let noisy = "&#123456789;".repeat(100);
        assert_eq!(decode_entities(&noisy), noisy);
    }
}
