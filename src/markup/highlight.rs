//! Structured removal of highlight markers.
//!
//! The fragment is split into tokens that remember their byte ranges in the
//! source. Marker start tags are paired with their end tags on a stack and
//! only paired tags are dropped; every other byte is copied through as-is.

/// Element name the backend wraps matched query terms in.
pub const HIGHLIGHT_TAG: &str = "mark";

/// Elements whose content is text, never markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Text,
    StartTag,
    EndTag,
    /// Comments, doctypes and processing instructions.
    Other,
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    kind: TokenKind,
    name: &'a str,
    self_closing: bool,
    start: usize,
    end: usize,
}

impl<'a> Token<'a> {
    fn text(start: usize, end: usize) -> Self {
        Self {
            kind: TokenKind::Text,
            name: "",
            self_closing: false,
            start,
            end,
        }
    }

    fn is_marker(&self) -> bool {
        self.name.eq_ignore_ascii_case(HIGHLIGHT_TAG)
    }
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn tokenize(mut self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut text_start = 0;

        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] != b'<' {
                self.pos += 1;
                continue;
            }

            let lt = self.pos;
            let Some(token) = self.scan_markup(lt) else {
                // A '<' that does not open a tag is plain text
                self.pos += 1;
                continue;
            };

            if text_start < lt {
                tokens.push(Token::text(text_start, lt));
            }
            self.pos = token.end;
            text_start = token.end;

            let enters_raw_text = token.kind == TokenKind::StartTag
                && !token.self_closing
                && RAW_TEXT_ELEMENTS
                    .iter()
                    .any(|raw| token.name.eq_ignore_ascii_case(raw));
            let name = token.name;
            tokens.push(token);

            if enters_raw_text {
                let close = self.find_raw_text_end(name);
                if text_start < close {
                    tokens.push(Token::text(text_start, close));
                }
                self.pos = close;
                text_start = close;
            }
        }

        if text_start < self.bytes.len() {
            tokens.push(Token::text(text_start, self.bytes.len()));
        }
        tokens
    }

    /// Try to read a tag, comment or declaration starting at `lt`.
    fn scan_markup(&self, lt: usize) -> Option<Token<'a>> {
        let rest = &self.bytes[lt + 1..];

        if rest.starts_with(b"!--") {
            // `<!-->` and `<!--->` are complete empty comments
            for empty in [&b"!-->"[..], &b"!--->"[..]] {
                if rest.starts_with(empty) {
                    return Some(self.other(lt, lt + 1 + empty.len()));
                }
            }
            // Unterminated comments run to the end of the input
            let end = find(self.bytes, lt + 4, b"-->")
                .map(|i| i + 3)
                .unwrap_or(self.bytes.len());
            return Some(self.other(lt, end));
        }

        match rest.first() {
            Some(b'!') | Some(b'?') => {
                let end = find(self.bytes, lt + 1, b">")? + 1;
                Some(self.other(lt, end))
            }
            Some(b'/') if rest.get(1).is_some_and(u8::is_ascii_alphabetic) => {
                let name_end = self.name_end(lt + 2);
                let end = find(self.bytes, name_end, b">")? + 1;
                Some(Token {
                    kind: TokenKind::EndTag,
                    name: &self.src[lt + 2..name_end],
                    self_closing: false,
                    start: lt,
                    end,
                })
            }
            Some(b) if b.is_ascii_alphabetic() => {
                let name_end = self.name_end(lt + 1);
                let close = self.attributes_end(name_end)?;
                Some(Token {
                    kind: TokenKind::StartTag,
                    name: &self.src[lt + 1..name_end],
                    self_closing: close > name_end && self.bytes[close - 1] == b'/',
                    start: lt,
                    end: close + 1,
                })
            }
            _ => None,
        }
    }

    fn other(&self, start: usize, end: usize) -> Token<'a> {
        Token {
            kind: TokenKind::Other,
            name: "",
            self_closing: false,
            start,
            end,
        }
    }

    fn name_end(&self, from: usize) -> usize {
        let mut i = from;
        while i < self.bytes.len()
            && (self.bytes[i].is_ascii_alphanumeric() || matches!(self.bytes[i], b'-' | b'_' | b':'))
        {
            i += 1;
        }
        i
    }

    /// Index of the '>' closing a start tag. Quotes only delimit attribute
    /// values, so a '>' inside `title="a>b"` does not end the tag.
    fn attributes_end(&self, from: usize) -> Option<usize> {
        let mut i = from;
        let mut after_eq = false;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'>' => return Some(i),
                b'=' => after_eq = true,
                q @ (b'"' | b'\'') if after_eq => {
                    i = find(self.bytes, i + 1, &[q])?;
                    after_eq = false;
                }
                b if b.is_ascii_whitespace() => {}
                _ => after_eq = false,
            }
            i += 1;
        }
        None
    }

    /// Position of the `</name` that closes a raw text element, or the end.
    fn find_raw_text_end(&self, name: &str) -> usize {
        let mut from = self.pos;
        while let Some(i) = find(self.bytes, from, b"</") {
            let candidate = i + 2;
            let name_end = candidate + name.len();
            if name_end <= self.bytes.len()
                && self.bytes[candidate..name_end].eq_ignore_ascii_case(name.as_bytes())
                && self
                    .bytes
                    .get(name_end)
                    .map_or(true, |&b| b.is_ascii_whitespace() || matches!(b, b'>' | b'/'))
            {
                return i;
            }
            from = candidate;
        }
        self.bytes.len()
    }
}

fn find(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

/// Pair marker start tags with their end tags. Returns a drop mask.
fn paired_markers(tokens: &[Token<'_>]) -> Vec<bool> {
    let mut drop = vec![false; tokens.len()];
    let mut open = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::StartTag if token.is_marker() && !token.self_closing => open.push(i),
            TokenKind::EndTag if token.is_marker() => {
                if let Some(j) = open.pop() {
                    drop[i] = true;
                    drop[j] = true;
                }
            }
            _ => {}
        }
    }
    drop
}

/// Remove highlight markers from a fragment, keeping their content.
///
/// Only `<mark ...>`/`</mark>` pairs are removed. Unpaired markers,
/// markers inside comments or raw text elements, and all other markup
/// are preserved byte for byte.
pub fn unwrap_highlights(markup: &str) -> String {
    let tokens = Scanner::new(markup).tokenize();
    let drop = paired_markers(&tokens);

    if !drop.iter().any(|d| *d) {
        return markup.to_string();
    }

    let mut out = String::with_capacity(markup.len());
    for (token, dropped) in tokens.iter().zip(drop) {
        if !dropped {
            out.push_str(&markup[token.start..token.end]);
        }
    }
    out
}

/// Whether the fragment contains at least one complete highlight marker.
pub fn contains_highlights(markup: &str) -> bool {
    let tokens = Scanner::new(markup).tokenize();
    paired_markers(&tokens).into_iter().any(|d| d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_simple_marker() {
        assert_eq!(
            unwrap_highlights("<mark>بغداد</mark> هي عاصمة"),
            "بغداد هي عاصمة"
        );
    }

    #[test]
    fn test_unwrap_marker_with_attributes() {
        let input = r#"a <mark class="search-highlight" title="x>y">term</mark> b"#;
        assert_eq!(unwrap_highlights(input), "a term b");
    }

    #[test]
    fn test_unwrap_keeps_unrelated_markup() {
        let input = r#"<p id="1"><b><mark>one</mark></b> <i>two</i><br/></p>"#;
        assert_eq!(
            unwrap_highlights(input),
            r#"<p id="1"><b>one</b> <i>two</i><br/></p>"#
        );
    }

    #[test]
    fn test_unwrap_nested_markers() {
        assert_eq!(
            unwrap_highlights("<mark>a <mark>b</mark> c</mark>"),
            "a b c"
        );
    }

    #[test]
    fn test_unwrap_case_insensitive() {
        assert_eq!(unwrap_highlights("<MARK>x</Mark>"), "x");
    }

    #[test]
    fn test_similar_names_untouched() {
        let input = "<marker>x</marker><marked>y</marked>";
        assert_eq!(unwrap_highlights(input), input);
    }

    #[test]
    fn test_unpaired_markers_kept() {
        assert_eq!(unwrap_highlights("a</mark>b"), "a</mark>b");
        assert_eq!(unwrap_highlights("<mark>open"), "<mark>open");
        assert_eq!(
            unwrap_highlights("<mark>a<mark>b</mark>"),
            "<mark>ab"
        );
    }

    #[test]
    fn test_self_closing_marker_kept() {
        assert_eq!(unwrap_highlights("a<mark/>b"), "a<mark/>b");
    }

    #[test]
    fn test_comment_and_raw_text_untouched() {
        let input = "<!-- <mark>x</mark> --><script>let s = '<mark>y</mark>';</script>";
        assert_eq!(unwrap_highlights(input), input);

        let input = "<style>p > mark { color: red }</style><mark>z</mark>";
        assert_eq!(
            unwrap_highlights(input),
            "<style>p > mark { color: red }</style>z"
        );
    }

    #[test]
    fn test_empty_comments_are_closed() {
        assert_eq!(unwrap_highlights("<!--><mark>a</mark> b"), "<!-->a b");
        assert_eq!(unwrap_highlights("<!---><mark>a</mark> b"), "<!--->a b");
        assert!(contains_highlights("<!--><mark>a</mark>"));

        // A regular comment still hides what it contains
        let input = "<!-- x --><!-- <mark>a</mark> -->";
        assert_eq!(unwrap_highlights(input), input);
    }

    #[test]
    fn test_stray_angle_brackets_are_text() {
        assert_eq!(
            unwrap_highlights("1 < 2 and <mark>3</mark> > 2"),
            "1 < 2 and 3 > 2"
        );
        assert_eq!(unwrap_highlights("trailing <"), "trailing <");
    }

    #[test]
    fn test_no_markers_returns_input() {
        let input = "<div>plain <em>text</em></div>";
        assert_eq!(unwrap_highlights(input), input);
        assert_eq!(unwrap_highlights(""), "");
    }

    #[test]
    fn test_contains_highlights() {
        assert!(contains_highlights("x <mark>y</mark>"));
        assert!(!contains_highlights("x y"));
        assert!(!contains_highlights("<mark>unclosed"));
        assert!(!contains_highlights(&unwrap_highlights("<mark>a</mark><mark>b</mark>")));
    }
}
