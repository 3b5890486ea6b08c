// src/rewrite.rs
//
// Text rewriting for non-opaque chunks.
//
// - `{{ ... }}` interpolation spans (shortest match, may span lines) are kept verbatim.
// - In plain spans, a one-letter preposition that starts the span or follows
//   whitespace, and is itself followed by whitespace, gets that whole whitespace
//   run replaced by a single NBSP. The letter keeps its original case.
// - Whitespace here means ASCII whitespace only, so an NBSP is never a boundary
//   or a trailing run and rewriting is idempotent.
// - Matches do not overlap: in "a v lese" only "a" is joined, because the space
//   after it is consumed and cannot also serve as the boundary before "v".

use memchr::memmem;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

/* =============================== Core sets =============================== */

pub const PREPOSITIONS: [char; 8] = ['k', 's', 'v', 'z', 'o', 'u', 'i', 'a'];

pub const NBSP: char = '\u{00A0}';

// (?-u): ASCII-only \s and case folding; 'k' must not match U+212A KELVIN SIGN.
// (?R): `^` also matches after a bare '\r'.
static PREPOSITION_RE: Lazy<Regex> = Lazy::new(|| {
    let letters: String = PREPOSITIONS.iter().collect();
    Regex::new(&format!(r"(?mRi-u)(^|\s)([{letters}])\s+")).expect("valid preposition pattern")
});

static INTERPOLATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{.*?\}\}").expect("valid interpolation pattern"));

/* ================================ Spans ================================== */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSpan<'a> {
    Plain(&'a str),
    /// Includes the `{{` and `}}` delimiters.
    Interpolation(&'a str),
}

impl<'a> TextSpan<'a> {
    pub fn as_str(&self) -> &'a str {
        match *self {
            TextSpan::Plain(s) | TextSpan::Interpolation(s) => s,
        }
    }
}

/// Partition `text` into alternating plain and interpolation spans. Empty plain
/// spans are omitted; an unclosed `{{` stays in plain text.
pub fn split_interpolations(text: &str) -> Vec<TextSpan<'_>> {
    if memmem::find(text.as_bytes(), b"{{").is_none() {
        return if text.is_empty() {
            Vec::new()
        } else {
            vec![TextSpan::Plain(text)]
        };
    }
    let mut spans = Vec::new();
    let mut last = 0usize;
    for m in INTERPOLATION_RE.find_iter(text) {
        if m.start() > last {
            spans.push(TextSpan::Plain(&text[last..m.start()]));
        }
        spans.push(TextSpan::Interpolation(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        spans.push(TextSpan::Plain(&text[last..]));
    }
    spans
}

/* =============================== Rewriting =============================== */

/// Join one-letter prepositions to the following word in a plain span.
pub fn apply_nbsp(plain: &str) -> Cow<'_, str> {
    PREPOSITION_RE.replace_all(plain, |caps: &Captures<'_>| {
        format!("{}{}{NBSP}", &caps[1], &caps[2])
    })
}

/// Rewrite one non-opaque text chunk, appending the result to `out`.
pub fn rewrite_text_into(text: &str, out: &mut String) {
    for span in split_interpolations(text) {
        match span {
            TextSpan::Plain(s) => out.push_str(&apply_nbsp(s)),
            TextSpan::Interpolation(s) => out.push_str(s),
        }
    }
}

pub fn rewrite_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    rewrite_text_into(text, &mut out);
    out
}
