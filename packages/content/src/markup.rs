//! String-level helpers for stored HTML.
//!
//! Stored rich content is authored in a browser editor or produced by an LLM,
//! so it is HTML of uneven quality. These helpers cover the few places where
//! the raw text itself has to be touched: removing document skeletons,
//! escaping, and the entity encoding used inside marker attributes.

use std::sync::LazyLock;

use regex::Regex;

static DOCTYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!DOCTYPE[^>]*>").expect("DOCTYPE_RE is valid"));

// The name must be followed by whitespace or `>`, which keeps `<html-snippet>`,
// `<header>` and friends out of the match.
static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*/?\s*html(?:\s[^>]*)?>").expect("HTML_TAG_RE is valid")
});

static HEAD_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*/?\s*head(?:\s[^>]*)?>").expect("HEAD_TAG_RE is valid")
});

static BODY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*/?\s*body(?:\s[^>]*)?>").expect("BODY_TAG_RE is valid")
});

/// Remove `<!DOCTYPE>`, `<html>`, `<head>` and `<body>` tags (opening and
/// closing), leaving their contents in place.
pub fn strip_document_wrappers(content: &str) -> String {
    let out = DOCTYPE_RE.replace_all(content, "");
    let out = HTML_TAG_RE.replace_all(&out, "");
    let out = HEAD_TAG_RE.replace_all(&out, "");
    BODY_TAG_RE.replace_all(&out, "").into_owned()
}

/// Whether any document wrapper tag is present.
pub fn has_document_wrappers(content: &str) -> bool {
    DOCTYPE_RE.is_match(content)
        || HTML_TAG_RE.is_match(content)
        || HEAD_TAG_RE.is_match(content)
        || BODY_TAG_RE.is_match(content)
}

/// Escape text for use as element content or a double-quoted attribute.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Encode arbitrary HTML so it can live inside an attribute value.
pub fn encode_attribute(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 4);
    for c in s.chars() {
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

/// Decode HTML entities in a single left-to-right pass.
///
/// Handles the named entities `lt gt quot apos amp nbsp` and numeric
/// references. Unknown or unterminated references are kept verbatim.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match decode_one(tail) {
            Some((decoded, consumed)) => {
                out.push(decoded);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode the reference at the start of `s` (which begins with `&`).
/// Returns the character and the number of bytes consumed.
fn decode_one(s: &str) -> Option<(char, usize)> {
    // Longest reference we accept is `&#x10FFFF;`
    let semi = s.char_indices().take(12).find(|&(_, c)| c == ';')?.0;
    let name = &s[1..semi];
    let c = match name {
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "amp" => '&',
        "nbsp" => '\u{a0}',
        _ => {
            let num = name.strip_prefix('#')?;
            let code = if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                num.parse::<u32>().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some((c, semi + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squash(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn strips_full_document_skeleton() {
        let input = "<!DOCTYPE html><html><head></head><body>Content</body></html>";
        assert_eq!(strip_document_wrappers(input), "Content");
    }

    #[test]
    fn strips_wrappers_around_markup() {
        assert_eq!(
            strip_document_wrappers("<html><body><p>Test</p></body></html>"),
            "<p>Test</p>"
        );
        assert_eq!(strip_document_wrappers("<html lang=\"en\">Content</html>"), "Content");
        assert_eq!(strip_document_wrappers("<HTML><BODY class=\"x\">Hi</BODY></HTML>"), "Hi");
    }

    #[test]
    fn strips_tags_with_stray_whitespace() {
        assert_eq!(squash(&strip_document_wrappers("<  html  >Content<  /  html  >")), "Content");
        assert_eq!(strip_document_wrappers("< html >"), "");
    }

    #[test]
    fn keeps_html_snippet_markers() {
        for input in [
            "<html-snippet>Keep me</html-snippet>",
            "<div><html-snippet html=\"...\"></html-snippet></div>",
            "< html-snippet >",
            "<header>Top</header><bodyguard></bodyguard>",
        ] {
            assert_eq!(strip_document_wrappers(input), input);
        }
    }

    #[test]
    fn detects_wrappers() {
        assert!(has_document_wrappers("<body>x</body>"));
        assert!(!has_document_wrappers("<html-snippet html=\"\"></html-snippet>"));
    }

    #[test]
    fn decodes_the_five_escaped_characters() {
        assert_eq!(
            decode_entities("&lt;div&gt;&amp;&quot;x&quot;&#39;&lt;/div&gt;"),
            "<div>&\"x\"'</div>"
        );
    }

    #[test]
    fn decodes_in_a_single_pass() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&#x41;&#66;&apos;"), "AB'");
    }

    #[test]
    fn leaves_unknown_references_alone() {
        assert_eq!(decode_entities("a & b &bogus; &#zz; &"), "a & b &bogus; &#zz; &");
    }

    #[test]
    fn attribute_encoding_is_reversible() {
        let html = "<div class=\"card\" data-x='1'>Tom & Jerry</div>";
        let encoded = encode_attribute(html);
        assert!(!encoded.contains('"') && !encoded.contains('<'));
        assert_eq!(decode_entities(&encoded), html);
    }
}
