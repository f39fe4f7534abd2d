// Copyright 2026 The tree-sitter-htmlx-scanner contributors. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The driver-facing interface a scanner is handed at each call.
//!
//! A generated GLR parser owns the actual input stream and the decision of
//! which token kinds are acceptable at the current parse state. It exposes
//! both to the scanner through a single `Lexer` handle and a `ValidSymbols`
//! bitset, and commits only the bytes the scanner explicitly marks via
//! [`Lexer::mark_end`]. Everything else advanced over but never marked is
//! lookahead the scanner discards on its next call.

/// A cursor over the parser's input stream.
///
/// `lookahead` never advances on its own; callers step it forward with
/// [`advance`](Lexer::advance). The token actually produced by a scan spans
/// from wherever the previous call left off up to the most recent
/// [`mark_end`](Lexer::mark_end) call -- bytes read past that point are
/// speculative and are not committed if the scan returns no match.
pub trait Lexer {
    /// The current lookahead codepoint, or `None` at end of input.
    fn lookahead(&self) -> Option<char>;

    /// Consumes the current lookahead codepoint and advances to the next.
    ///
    /// `skip` marks the codepoint as insignificant whitespace/"extra": it is
    /// excluded from whatever token is eventually produced, and remains
    /// consumed even if the enclosing scan ultimately reports no match.
    fn advance(&mut self, skip: bool);

    /// Commits the token's end to the current stream position.
    ///
    /// May be called more than once; only the last call before a successful
    /// return has any effect. A scan that never calls this produces a
    /// zero-width token at the position it was entered.
    fn mark_end(&mut self);

    /// Whether the lookahead position is at the end of input.
    fn eof(&self) -> bool;
}

/// The set of token kinds the parser will currently accept.
///
/// Indices are the token ordinals of whichever layer is being asked, per
/// [`crate::html::HtmlToken`], [`crate::htmlx::HtmlxToken::id`], or
/// [`crate::svelte::SvelteToken::id`]. Delegating layers pass this slice
/// through unchanged to the inner scanner they own, since the ordinals of an
/// inner layer's tokens are a fixed prefix of the outer layer's.
#[derive(Clone, Copy)]
pub struct ValidSymbols<'a>(pub &'a [bool]);

impl<'a> ValidSymbols<'a> {
    pub fn is_valid(&self, token_id: usize) -> bool {
        self.0.get(token_id).copied().unwrap_or(false)
    }
}

/// An in-memory [`Lexer`] over a borrowed `&str`, for tests.
///
/// A real grammar driver resumes each scan call from wherever the previous
/// call last marked the end; this harness reproduces that by snapshotting
/// the "committed" position before every call and rolling back to it if the
/// scan returns no match, except for bytes consumed via `advance(true)`
/// (skip advances commit regardless of the outcome).
pub struct StrLexer<'a> {
    bytes: &'a [u8],
    pos: usize,
    end_mark: usize,
    committed: usize,
}

impl<'a> StrLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        StrLexer {
            bytes: input.as_bytes(),
            pos: 0,
            end_mark: 0,
            committed: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.committed
    }

    /// Runs one scan call, rolling back non-`skip` advances on failure.
    ///
    /// Returns the scanner's result together with the byte span of the
    /// token it produced (empty when no match, or when the token is
    /// zero-width).
    pub fn call<T>(
        &mut self,
        valid: &ValidSymbols,
        mut scan: impl FnMut(&mut Self, &ValidSymbols) -> Option<T>,
    ) -> (Option<T>, std::ops::Range<usize>) {
        self.pos = self.committed;
        self.end_mark = self.committed;
        let start = self.committed;
        let result = scan(self, valid);
        match result {
            Some(tok) => {
                self.committed = self.end_mark;
                (Some(tok), start..self.end_mark)
            }
            None => {
                self.pos = self.committed;
                (None, start..start)
            }
        }
    }
}

impl<'a> Lexer for StrLexer<'a> {
    fn lookahead(&self) -> Option<char> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        std::str::from_utf8(&self.bytes[self.pos..])
            .ok()
            .and_then(|s| s.chars().next())
    }

    fn advance(&mut self, skip: bool) {
        if let Some(c) = self.lookahead() {
            self.pos += c.len_utf8();
            if skip {
                self.committed = self.pos;
                self.end_mark = self.pos;
            }
        }
    }

    fn mark_end(&mut self) {
        self.end_mark = self.pos;
    }

    fn eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}
