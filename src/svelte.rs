// Copyright 2026 The tree-sitter-htmlx-scanner contributors. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The Svelte dialect layer: block-expression tokens for `{#each}`,
//! `{#key}`, `{#await}`, and `{@html}`-style tag expressions, layered over
//! [`crate::htmlx`].
//!
//! Unlike [`crate::htmlx::HtmlxScanner`], this layer never needs to look at
//! tag names or the open-element stack directly -- every token it adds is a
//! flavor of balanced-expression scan reached only when the grammar asks for
//! one of its four symbols. Everything else falls straight through to HTMLX.

use crate::htmlx::{is_space, skip_string, HtmlxScanner, HtmlxToken, HTMLX_TOKEN_COUNT};
use crate::lexer::{Lexer, ValidSymbols};

/// Token kinds the Svelte layer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvelteToken {
    Htmlx(HtmlxToken),
    IteratorExpression,
    BindingPattern,
    KeyExpression,
    TagExpression,
}

impl SvelteToken {
    pub fn id(self) -> usize {
        match self {
            SvelteToken::Htmlx(t) => t.id(),
            SvelteToken::IteratorExpression => HTMLX_TOKEN_COUNT,
            SvelteToken::BindingPattern => HTMLX_TOKEN_COUNT + 1,
            SvelteToken::KeyExpression => HTMLX_TOKEN_COUNT + 2,
            SvelteToken::TagExpression => HTMLX_TOKEN_COUNT + 3,
        }
    }
}

/// Number of token kinds the Svelte layer owns, inherited tokens included.
pub const SVELTE_TOKEN_COUNT: usize = HTMLX_TOKEN_COUNT + 4;

#[derive(Debug, Default, Clone)]
pub struct SvelteScanner {
    pub htmlx: HtmlxScanner,
}

impl SvelteScanner {
    pub fn new() -> Self {
        SvelteScanner { htmlx: HtmlxScanner::new() }
    }

    pub fn scan(&mut self, lexer: &mut dyn Lexer, valid: &ValidSymbols) -> Option<SvelteToken> {
        if valid.is_valid(SvelteToken::IteratorExpression.id()) {
            return scan_iterator(lexer);
        }
        if valid.is_valid(SvelteToken::BindingPattern.id()) {
            return scan_binding(lexer);
        }
        if valid.is_valid(SvelteToken::KeyExpression.id()) {
            return scan_key(lexer);
        }
        if valid.is_valid(SvelteToken::TagExpression.id()) {
            return scan_tag_expression(lexer);
        }

        self.htmlx.scan(lexer, valid).map(SvelteToken::Htmlx)
    }

    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        self.htmlx.serialize(buf)
    }

    pub fn deserialize(&mut self, buf: &[u8]) {
        self.htmlx.deserialize(buf);
    }
}

/// Balanced-expression scan shared by [`scan_binding`] and [`scan_key`]:
/// stops at depth 0 on `}` always, plus `stop_char`, plus `,` when
/// `stop_comma` is set (the binding-pattern case, so that `{#each x as a, i}`
/// doesn't swallow the index variable).
fn scan_balanced(lexer: &mut dyn Lexer, stop_char: char, stop_comma: bool) -> bool {
    let mut depth = 0i32;
    let mut has_content = false;

    while let Some(c) = lexer.lookahead() {
        if depth == 0 && (c == stop_char || c == '}') {
            break;
        }
        if depth == 0 && stop_comma && c == ',' {
            break;
        }

        if skip_string(lexer) {
            has_content = true;
            continue;
        }

        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth -= 1;
                if depth < 0 {
                    return has_content;
                }
            }
            _ => {}
        }

        lexer.advance(false);
        has_content = true;
    }

    has_content
}

/// Matches a bare keyword (`as`, `then`, or `catch`) at the current
/// position, consuming it, and requires it be followed by whitespace or `{`
/// -- a word boundary, so `asNumber` doesn't false-match on `as`.
fn check_keyword(lexer: &mut dyn Lexer, keyword: &str) -> bool {
    for expected in keyword.chars() {
        if lexer.lookahead() != Some(expected) {
            return false;
        }
        lexer.advance(false);
    }
    matches!(lexer.lookahead(), Some(c) if is_space(c)) || lexer.lookahead() == Some('{')
}

/// The expression preceding `as`/`then`/`catch` in a Svelte block head:
/// `{#each items as item}`, `{#await promise then value}`. Speculatively
/// marks the end at each whitespace run at depth 0 and probes for one of
/// the three keywords; if none matches, the whitespace becomes ordinary
/// expression content and scanning continues.
fn scan_iterator(lexer: &mut dyn Lexer) -> Option<SvelteToken> {
    let mut depth = 0i32;
    let mut has_content = false;

    while matches!(lexer.lookahead(), Some(c) if is_space(c)) {
        lexer.advance(true);
    }

    while let Some(c) = lexer.lookahead() {
        if depth == 0 && c == '}' {
            break;
        }

        if depth == 0 && is_space(c) {
            lexer.mark_end();

            while matches!(lexer.lookahead(), Some(c) if is_space(c)) {
                lexer.advance(false);
            }

            match lexer.lookahead() {
                Some('a') => {
                    lexer.advance(false);
                    if check_keyword(lexer, "s") {
                        return Some(SvelteToken::IteratorExpression);
                    }
                }
                Some('t') => {
                    if check_keyword(lexer, "then") {
                        return Some(SvelteToken::IteratorExpression);
                    }
                }
                Some('c') => {
                    if check_keyword(lexer, "catch") {
                        return Some(SvelteToken::IteratorExpression);
                    }
                }
                _ => {}
            }
            has_content = true;
            continue;
        }

        if skip_string(lexer) {
            has_content = true;
            continue;
        }

        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ => {}
        }

        lexer.advance(false);
        has_content = true;
    }

    if has_content {
        lexer.mark_end();
        return Some(SvelteToken::IteratorExpression);
    }
    None
}

/// The pattern bound by `as` in `{#each items as pattern, index (key)}`:
/// stops at a top-level `,` (the index variable) or `(` (the key
/// expression), in addition to the closing `}`.
fn scan_binding(lexer: &mut dyn Lexer) -> Option<SvelteToken> {
    while matches!(lexer.lookahead(), Some(c) if is_space(c)) {
        lexer.advance(false);
    }

    if !scan_balanced(lexer, '(', true) {
        return None;
    }

    lexer.mark_end();
    Some(SvelteToken::BindingPattern)
}

/// The key expression in `{#each items as item (item.id)}`, entered just
/// after the opening `(`; stops at the matching `)`.
fn scan_key(lexer: &mut dyn Lexer) -> Option<SvelteToken> {
    while matches!(lexer.lookahead(), Some(c) if is_space(c)) {
        lexer.advance(false);
    }

    if !scan_balanced(lexer, ')', false) {
        return None;
    }

    lexer.mark_end();
    Some(SvelteToken::KeyExpression)
}

/// The expression in a raw tag like `{@html markup}` or `{@debug x, y}`.
/// Requires at least one leading whitespace character so that `{@html}`
/// with no expression at all isn't mistaken for one with an empty body.
fn scan_tag_expression(lexer: &mut dyn Lexer) -> Option<SvelteToken> {
    let mut has_space = false;
    while matches!(lexer.lookahead(), Some(c) if is_space(c)) {
        lexer.advance(true);
        has_space = true;
    }

    if !has_space || lexer.lookahead() == Some('}') {
        return None;
    }

    if !scan_balanced(lexer, '}', false) {
        return None;
    }

    lexer.mark_end();
    Some(SvelteToken::TagExpression)
}
