// src/scanner.rs
//
// Lexical tag/comment scanner.
//
// - Splits a document into text chunks and markup tokens, left to right, with no
//   gaps and no overlaps: concatenating every token's text yields the input.
// - Comments: `<!--` up to the FIRST following `-->`.
// - Everything else: `<` up to the FIRST following `>`. Quotes are NOT tracked, so
//   an attribute value containing `>` ends the tag early. This is a known
//   limitation; the token is still passed through unchanged.
// - A `<` with no `>` anywhere after it starts trailing text, not a token.
// - Empty text chunks are never produced.

use memchr::{memchr, memmem};

/* ================================ Tokens ================================= */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Text,
    OpeningTag,
    ClosingTag,
    SelfClosingTag,
    Comment,
    /// `<!DOCTYPE ...>`, `<?xml ...?>`, or a generic `<!...>` match. Never has a name.
    Declaration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Byte offset of `text` in the scanned document.
    pub start: usize,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn is_markup(&self) -> bool {
        self.kind != TokenKind::Text
    }

    /// Element name as written in the source (not case-normalized).
    ///
    /// Only opening, closing and self-closing tags carry a name, and only when an
    /// identifier (`[A-Za-z0-9:-]+`) follows `<` or `</`.
    pub fn name(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::OpeningTag | TokenKind::ClosingTag | TokenKind::SelfClosingTag => {
                tag_name(self.text)
            }
            _ => None,
        }
    }
}

/* ============================ Utility predicates ========================= */

#[inline]
fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b':'
}

/// Leading identifier after `<`, `</`, `< /` etc.
fn tag_name(tag: &str) -> Option<&str> {
    let rest = tag.strip_prefix('<')?.trim_start();
    let rest = rest.strip_prefix('/').unwrap_or(rest).trim_start();
    let len = rest.bytes().take_while(|&b| is_name_char(b)).count();
    (len > 0).then(|| &rest[..len])
}

/// Kind of a `<...>` token matched by the generic (non-comment) rule.
fn classify_tag(tag: &str) -> TokenKind {
    if tag.starts_with("<!") || tag.starts_with("<?") {
        return TokenKind::Declaration;
    }
    if tag[1..].trim_start().starts_with('/') {
        return TokenKind::ClosingTag;
    }
    let inner = tag.strip_suffix('>').unwrap_or(tag);
    if inner.trim_end().ends_with('/') {
        TokenKind::SelfClosingTag
    } else {
        TokenKind::OpeningTag
    }
}

/* ================================ Matching =============================== */

/// Find the next markup token at or after `from`.
/// Returns (start, end_exclusive, is_comment).
fn find_markup(s: &[u8], from: usize) -> Option<(usize, usize, bool)> {
    let lt = from + memchr(b'<', &s[from..])?;
    if s[lt..].starts_with(b"<!--") {
        if let Some(p) = memmem::find(&s[lt + 4..], b"-->") {
            return Some((lt, lt + 4 + p + 3, true));
        }
    }
    // If this '<' has no '>' after it, no later '<' has one either.
    let gt = lt + 1 + memchr(b'>', &s[lt + 1..])?;
    Some((lt, gt + 1, false))
}

/* ================================ Scanner ================================ */

/// Iterator over the tokens of a document, in source order.
#[derive(Clone, Debug)]
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    pending: Option<Token<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Scanner {
            src,
            pos: 0,
            pending: None,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(tok) = self.pending.take() {
            return Some(tok);
        }
        let text_start = self.pos;
        if text_start >= self.src.len() {
            return None;
        }

        let Some((start, end, is_comment)) = find_markup(self.src.as_bytes(), text_start) else {
            self.pos = self.src.len();
            return Some(Token {
                kind: TokenKind::Text,
                start: text_start,
                text: &self.src[text_start..],
            });
        };

        // Safe slicing: '<' and '>' are ASCII, so both ends sit on char boundaries.
        let markup_text = &self.src[start..end];
        let markup = Token {
            kind: if is_comment {
                TokenKind::Comment
            } else {
                classify_tag(markup_text)
            },
            start,
            text: markup_text,
        };
        self.pos = end;

        if start > text_start {
            self.pending = Some(markup);
            return Some(Token {
                kind: TokenKind::Text,
                start: text_start,
                text: &self.src[text_start..start],
            });
        }
        Some(markup)
    }
}

pub fn scan(src: &str) -> Scanner<'_> {
    Scanner::new(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(src: &str) -> Vec<(TokenKind, &str)> {
        scan(src).map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn splits_text_and_tags() {
        assert_eq!(
            kinds("<p>jdu v lese</p>"),
            vec![
                (TokenKind::OpeningTag, "<p>"),
                (TokenKind::Text, "jdu v lese"),
                (TokenKind::ClosingTag, "</p>"),
            ]
        );
    }

    #[test]
    fn byte_ranges_cover_input() {
        let src = "a <b>č</b><!-- x -->\n<br/>tail";
        let mut next = 0;
        for tok in scan(src) {
            assert_eq!(tok.start, next);
            assert_eq!(&src[tok.start..tok.end()], tok.text);
            next = tok.end();
        }
        assert_eq!(next, src.len());
        assert_eq!(scan(src).map(|t| t.text).collect::<String>(), src);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(scan("").count(), 0);
    }

    #[test]
    fn adjacent_tags_produce_no_empty_text() {
        assert_eq!(
            kinds("<b><i></i></b>"),
            vec![
                (TokenKind::OpeningTag, "<b>"),
                (TokenKind::OpeningTag, "<i>"),
                (TokenKind::ClosingTag, "</i>"),
                (TokenKind::ClosingTag, "</b>"),
            ]
        );
    }

    #[test]
    fn comment_may_contain_gt() {
        assert_eq!(
            kinds("a<!-- x > <pre> -->b"),
            vec![
                (TokenKind::Text, "a"),
                (TokenKind::Comment, "<!-- x > <pre> -->"),
                (TokenKind::Text, "b"),
            ]
        );
    }

    #[test]
    fn shortest_comment_forms() {
        assert_eq!(kinds("<!---->"), vec![(TokenKind::Comment, "<!---->")]);
        // "<!-->" has no terminator after the opener; it falls back to the generic rule.
        assert_eq!(kinds("<!-->"), vec![(TokenKind::Declaration, "<!-->")]);
    }

    #[test]
    fn unterminated_comment_falls_back_to_first_gt() {
        assert_eq!(
            kinds("<!-- x > y"),
            vec![(TokenKind::Declaration, "<!-- x >"), (TokenKind::Text, " y")]
        );
    }

    #[test]
    fn unterminated_tag_is_trailing_text() {
        assert_eq!(
            kinds("x <p>a <b"),
            vec![
                (TokenKind::Text, "x "),
                (TokenKind::OpeningTag, "<p>"),
                (TokenKind::Text, "a <b"),
            ]
        );
    }

    #[test]
    fn gt_inside_quoted_attribute_ends_tag() {
        assert_eq!(
            kinds(r#"<a title="1 > 0">x</a>"#),
            vec![
                (TokenKind::OpeningTag, r#"<a title="1 >"#),
                (TokenKind::Text, r#" 0">x"#),
                (TokenKind::ClosingTag, "</a>"),
            ]
        );
    }

    #[test]
    fn tag_kinds_and_names() {
        let cases = [
            ("<PRE class=x>", TokenKind::OpeningTag, Some("PRE")),
            ("</code>", TokenKind::ClosingTag, Some("code")),
            ("< / pre >", TokenKind::ClosingTag, Some("pre")),
            ("<br/>", TokenKind::SelfClosingTag, Some("br")),
            ("<code / >", TokenKind::SelfClosingTag, Some("code")),
            ("<svg:rect x=\"1\"/>", TokenKind::SelfClosingTag, Some("svg:rect")),
            ("<my-widget>", TokenKind::OpeningTag, Some("my-widget")),
            ("<!DOCTYPE html>", TokenKind::Declaration, None),
            ("<?xml version=\"1.0\"?>", TokenKind::Declaration, None),
            ("<>", TokenKind::OpeningTag, None),
            ("<=3>", TokenKind::OpeningTag, None),
        ];
        for (src, kind, name) in cases {
            let tok = scan(src).next().unwrap();
            assert_eq!((tok.kind, tok.name()), (kind, name), "{src}");
        }
    }

    #[test]
    fn comment_has_no_name() {
        let tok = scan("<!--pre-->").next().unwrap();
        assert_eq!(tok.kind, TokenKind::Comment);
        assert_eq!(tok.name(), None);
    }
}
