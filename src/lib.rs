// src/lib.rs
//
// czech-nbsp — join Czech one-letter prepositions to the following word with NBSP
//
// - Lexical, never re-serializes: every byte of markup is copied as-is.
// - Only text BETWEEN tags is rewritten; comments and declarations are markup.
// - Text inside excluded elements (script, style, pre, code, noscript, svg,
//   textarea, template) is left untouched, including when the input ends inside one.
// - `{{ ... }}` interpolation spans inside text are left untouched.
//
// `preprocess` is the hook for a host formatter: call it on the document source
// before parsing, and hand the returned text to the parser instead.

pub mod exclusion;
pub mod rewrite;
pub mod scanner;

use log::debug;

pub use exclusion::{ExclusionStack, EXCLUDED_ELEMENTS};
pub use rewrite::{apply_nbsp, rewrite_text, split_interpolations, TextSpan, NBSP, PREPOSITIONS};
pub use scanner::{scan, Scanner, Token, TokenKind};

/* =============================== Segments ================================ */

/// A scanner token together with its classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    pub token: Token<'a>,
    /// Must be copied through unchanged: all markup, and text inside an
    /// excluded element.
    pub opaque: bool,
}

/// Classifying walk over a document. Text is classified with the exclusion
/// state left by the tokens before it.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    scanner: Scanner<'a>,
    stack: ExclusionStack,
}

impl<'a> Segments<'a> {
    /// Exclusion state after the tokens yielded so far.
    pub fn exclusion(&self) -> &ExclusionStack {
        &self.stack
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let token = self.scanner.next()?;
        let opaque = if token.is_markup() {
            self.stack.observe(&token);
            true
        } else {
            self.stack.is_opaque()
        };
        Some(Segment { token, opaque })
    }
}

pub fn segments(src: &str) -> Segments<'_> {
    Segments {
        scanner: scan(src),
        stack: ExclusionStack::new(),
    }
}

/* ============================== Transform =============================== */

/// Rewrite `src` for the host parser. Total over all inputs.
pub fn preprocess(src: &str) -> String {
    let mut out = String::with_capacity(src.len() + src.len() / 20 + 16);
    let mut rewritten = 0usize;

    let mut walk = segments(src);
    for seg in walk.by_ref() {
        if seg.opaque {
            out.push_str(seg.token.text);
        } else {
            rewrite::rewrite_text_into(seg.token.text, &mut out);
            rewritten += 1;
        }
    }

    if let Some(name) = walk.exclusion().open_elements().last() {
        debug!(
            "input ended inside <{name}> (depth {}); trailing text left untouched",
            walk.exclusion().depth()
        );
    }
    debug!(
        "rewrote {rewritten} text chunk(s); {} -> {} bytes",
        src.len(),
        out.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classified(src: &str) -> Vec<(&str, bool)> {
        segments(src).map(|s| (s.token.text, s.opaque)).collect()
    }

    #[test]
    fn text_uses_depth_before_following_tag() {
        assert_eq!(
            classified("a<pre>b</pre>c"),
            vec![
                ("a", false),
                ("<pre>", true),
                ("b", true),
                ("</pre>", true),
                ("c", false),
            ]
        );
    }

    #[test]
    fn unterminated_excluded_region_stays_opaque() {
        assert_eq!(
            classified("<script>x"),
            vec![("<script>", true), ("x", true)]
        );
        assert_eq!(preprocess("<textarea>k lesu"), "<textarea>k lesu");
    }

    #[test]
    fn exclusion_state_is_visible_after_walk() {
        let mut walk = segments("<svg><code>");
        walk.by_ref().for_each(drop);
        assert_eq!(walk.exclusion().open_elements(), &["svg", "code"]);
    }

    #[test]
    fn markup_is_never_rewritten() {
        let src = r#"<img alt="a v b"><!-- k lesu --><!DOCTYPE a b>"#;
        assert_eq!(preprocess(src), src);
    }

    #[test]
    fn empty_document() {
        assert_eq!(preprocess(""), "");
    }
}
