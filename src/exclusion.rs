// src/exclusion.rs
//
// Excluded-region tracking on top of the scanner's token stream.
//
// - EXCLUDED elements have raw or non-prose content; text inside them is opaque.
// - Opening tag of an excluded element (not self-closing) pushes its name.
// - Closing tag of an excluded element pops from the top until the matching name
//   has been popped or the stack is empty. Mis-nested markup never fails the pass.
// - Closing tags with nothing open, and all non-excluded tags, are ignored.

use crate::scanner::{Token, TokenKind};
use log::trace;

/* =============================== Core sets =============================== */

pub const EXCLUDED_ELEMENTS: [&str; 8] = [
    "script", "style", "pre", "code", "noscript", "svg", "textarea", "template",
];

/// Canonical (lowercase) entry of [`EXCLUDED_ELEMENTS`] matching `name`, if any.
pub fn excluded_element(name: &str) -> Option<&'static str> {
    EXCLUDED_ELEMENTS
        .iter()
        .copied()
        .find(|excluded| name.eq_ignore_ascii_case(excluded))
}

/* ================================= Stack ================================= */

#[derive(Clone, Debug, Default)]
pub struct ExclusionStack {
    open: Vec<&'static str>,
}

impl ExclusionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Text seen now must be passed through untouched.
    pub fn is_opaque(&self) -> bool {
        !self.open.is_empty()
    }

    /// Excluded elements currently open, outermost first.
    pub fn open_elements(&self) -> &[&'static str] {
        &self.open
    }

    /// Update the stack for one token. Text and non-excluded markup are no-ops.
    pub fn observe(&mut self, token: &Token<'_>) {
        let Some(name) = token.name().and_then(excluded_element) else {
            return;
        };
        match token.kind {
            TokenKind::OpeningTag => {
                self.open.push(name);
                trace!("enter <{name}> at byte {} (depth {})", token.start, self.depth());
            }
            TokenKind::ClosingTag => {
                while let Some(popped) = self.open.pop() {
                    if popped == name {
                        break;
                    }
                    trace!("discard unclosed <{popped}> at </{name}>");
                }
                trace!("leave <{name}> at byte {} (depth {})", token.start, self.depth());
            }
            _ => {}
        }
    }
}
