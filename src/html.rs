// Copyright 2026 The tree-sitter-htmlx-scanner contributors. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The base HTML scanner layer.
//!
//! Owns the open-element stack and everything that depends on tag-name
//! identity: raw-text content scanning, implicit end-tag insertion, and
//! lenient comment scanning. Outer dialects (see [`crate::htmlx`] and
//! [`crate::svelte`]) hold one of these and delegate to it for every token
//! it already knows how to produce.

use crate::lexer::{Lexer, ValidSymbols};
use crate::tag::{can_contain, Tag, TagCategory, TagId};
use log::trace;

/// Token kinds the base HTML layer can produce.
///
/// Ordinals are load-bearing: outer layers address these tokens by
/// `as usize` when delegating a `ValidSymbols` slice unchanged, so the
/// indices here must stay put once a grammar depends on them.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlToken {
    StartTagName = 0,
    ScriptStartTagName = 1,
    StyleStartTagName = 2,
    TextareaStartTagName = 3,
    TitleStartTagName = 4,
    EndTagName = 5,
    ErroneousEndTagName = 6,
    SelfClosingTagDelimiter = 7,
    ImplicitEndTag = 8,
    RawText = 9,
    Comment = 10,
}

/// Number of token kinds the base layer owns; outer layers number their own
/// additions starting here.
pub const HTML_TOKEN_COUNT: usize = 11;

/// The open-element stack, shared across token boundaries within one parse.
///
/// A thin `Vec<Tag>` wrapper: this scanner only ever needs top-of-stack,
/// push, and pop, so unlike a full tree builder's element stack it carries
/// no by-name index.
#[derive(Debug, Default, Clone)]
pub struct OpenElementStack {
    tags: Vec<Tag>,
}

impl OpenElementStack {
    pub fn new() -> Self {
        OpenElementStack { tags: Vec::new() }
    }

    pub fn push(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    pub fn pop(&mut self) -> Option<Tag> {
        self.tags.pop()
    }

    pub fn top(&self) -> Option<&Tag> {
        self.tags.last()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

/// The base HTML scanner: an open-element stack plus the procedures that
/// read and mutate it.
#[derive(Debug, Default, Clone)]
pub struct HtmlScanner {
    pub stack: OpenElementStack,
}

impl HtmlScanner {
    pub fn new() -> Self {
        HtmlScanner { stack: OpenElementStack::new() }
    }

    pub fn scan(&mut self, lexer: &mut dyn Lexer, valid: &ValidSymbols) -> Option<HtmlToken> {
        use HtmlToken::*;

        let start_tag_name_valid = valid.is_valid(StartTagName as usize)
            || valid.is_valid(ScriptStartTagName as usize)
            || valid.is_valid(StyleStartTagName as usize)
            || valid.is_valid(TextareaStartTagName as usize)
            || valid.is_valid(TitleStartTagName as usize);
        let end_tag_name_valid = valid.is_valid(EndTagName as usize);
        let tag_name_token_valid = start_tag_name_valid || end_tag_name_valid;

        if valid.is_valid(RawText as usize) && !tag_name_token_valid {
            return self.scan_raw_text(lexer);
        }

        skip_ascii_whitespace(lexer);

        if lexer.lookahead() == Some('<') {
            lexer.mark_end();
            lexer.advance(false);
            if lexer.lookahead() == Some('!') {
                lexer.advance(false);
                return if valid.is_valid(Comment as usize) { scan_comment(lexer) } else { None };
            }
            if valid.is_valid(ImplicitEndTag as usize) {
                return self.implicit_end_tag(lexer);
            }
            return None;
        }

        if lexer.eof() {
            if valid.is_valid(ImplicitEndTag as usize) {
                return self.implicit_end_tag(lexer);
            }
            return None;
        }

        if lexer.lookahead() == Some('/') && valid.is_valid(SelfClosingTagDelimiter as usize) {
            try_scan!(self.scan_self_closing(lexer));
        }

        if start_tag_name_valid {
            try_scan!(self.scan_start_tag_name(lexer));
        }
        if end_tag_name_valid {
            try_scan!(self.scan_end_tag_name(lexer));
        }

        None
    }

    fn scan_start_tag_name(&mut self, lexer: &mut dyn Lexer) -> Option<HtmlToken> {
        let name = scan_tag_name_chars(lexer);
        if name.is_empty() {
            return None;
        }
        lexer.mark_end();
        let tag = Tag::from_name(&name);
        let token = match tag.id {
            TagId::Script => HtmlToken::ScriptStartTagName,
            TagId::Style => HtmlToken::StyleStartTagName,
            TagId::Textarea => HtmlToken::TextareaStartTagName,
            TagId::Title => HtmlToken::TitleStartTagName,
            _ => HtmlToken::StartTagName,
        };
        trace!("pushing <{}>", name);
        self.stack.push(tag);
        Some(token)
    }

    fn scan_end_tag_name(&mut self, lexer: &mut dyn Lexer) -> Option<HtmlToken> {
        let name = scan_tag_name_chars(lexer);
        if name.is_empty() {
            return None;
        }
        lexer.mark_end();
        let tag = Tag::from_name(&name);
        if self.stack.top() == Some(&tag) {
            trace!("popping </{}>", name);
            self.stack.pop();
            Some(HtmlToken::EndTagName)
        } else {
            Some(HtmlToken::ErroneousEndTagName)
        }
    }

    fn scan_self_closing(&mut self, lexer: &mut dyn Lexer) -> Option<HtmlToken> {
        lexer.advance(false);
        if lexer.lookahead() != Some('>') {
            return None;
        }
        lexer.advance(false);
        lexer.mark_end();
        self.stack.pop();
        Some(HtmlToken::SelfClosingTagDelimiter)
    }

    /// WHATWG §13.2.6.4-style implicit end-tag insertion.
    ///
    /// Entered right after the introducing `<` has been peeked past (but not
    /// committed -- the caller already marked end *before* that peek), or at
    /// EOF. Never consumes the `<` or `</` itself; on success the token's
    /// span stays pinned to the zero-width position the caller marked.
    fn implicit_end_tag(&mut self, lexer: &mut dyn Lexer) -> Option<HtmlToken> {
        if lexer.eof() {
            let top = self.stack.top()?;
            if top.category() == TagCategory::Void
                || matches!(top.id, TagId::Html | TagId::Head | TagId::Body)
            {
                self.stack.pop();
                return Some(HtmlToken::ImplicitEndTag);
            }
            return None;
        }

        let closing = lexer.lookahead() == Some('/');
        if closing {
            lexer.advance(false);
        } else if let Some(top) = self.stack.top() {
            if top.category() == TagCategory::Void {
                self.stack.pop();
                return Some(HtmlToken::ImplicitEndTag);
            }
        }

        let name = scan_tag_name_chars(lexer);
        let next = Tag::from_name(&name);

        if closing {
            if self.stack.top() == Some(&next) {
                return None;
            }
            let found = self
                .stack
                .iter()
                .rev()
                .any(|t| t.category() == next.category());
            if found {
                self.stack.pop();
                Some(HtmlToken::ImplicitEndTag)
            } else {
                None
            }
        } else {
            let top = self.stack.top()?;
            if !can_contain(top.id, next.id) {
                self.stack.pop();
                Some(HtmlToken::ImplicitEndTag)
            } else {
                None
            }
        }
    }

    /// Scans raw-text (or escapable-raw-text) content up to, but not
    /// including, the case-insensitive closing delimiter for whatever
    /// element is on top of the stack.
    fn scan_raw_text(&mut self, lexer: &mut dyn Lexer) -> Option<HtmlToken> {
        let top = self.stack.top()?;
        let delimiter: &[u8] = match top.id {
            TagId::Script => b"</SCRIPT",
            TagId::Style => b"</STYLE",
            TagId::Textarea => b"</TEXTAREA",
            TagId::Title => b"</TITLE",
            _ => return None,
        };

        lexer.mark_end();
        let mut matched = 0usize;

        loop {
            let Some(c) = lexer.lookahead() else { break };
            let upper = c.to_ascii_uppercase();
            if matched < delimiter.len() && upper as u32 == delimiter[matched] as u32 {
                matched += 1;
                lexer.advance(false);
                if matched == delimiter.len() {
                    break;
                }
            } else {
                matched = 0;
                lexer.advance(false);
                lexer.mark_end();
            }
        }

        Some(HtmlToken::RawText)
    }

    /// Writes `[serialized_count: u16][declared_count: u16]` followed by
    /// one `[id: u8]` (plus `[len: u8][bytes]` when `id == Custom`) per tag,
    /// walking the stack top-down and stopping once `buf` is full.
    ///
    /// `declared_count` always reflects the true depth; `serialized_count`
    /// may be smaller when `buf` can't hold the whole stack, in which case
    /// the innermost (most recently opened) tags are kept and the outermost
    /// ones are the first to be dropped.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < 4 {
            return 0;
        }
        let declared = self.stack.len() as u16;
        let mut offset = 4usize;
        let mut written = 0u16;

        for tag in self.stack.iter().rev() {
            let name_len = tag.custom_name.as_deref().map_or(0, |s| s.len().min(255));
            let need = if tag.id == TagId::Custom { 2 + name_len } else { 1 };
            if offset + need > buf.len() {
                break;
            }
            buf[offset] = tag.id as u8;
            offset += 1;
            if tag.id == TagId::Custom {
                let name = tag.custom_name.as_deref().unwrap_or("");
                buf[offset] = name_len as u8;
                offset += 1;
                buf[offset..offset + name_len].copy_from_slice(&name.as_bytes()[..name_len]);
                offset += name_len;
            }
            written += 1;
        }

        buf[0..2].copy_from_slice(&written.to_ne_bytes());
        buf[2..4].copy_from_slice(&declared.to_ne_bytes());
        offset
    }

    /// Reconstructs the stack from a buffer written by [`serialize`](Self::serialize).
    ///
    /// If `declared_count` exceeds the number of tags actually present, the
    /// missing (outermost) depth is padded with [`Tag::placeholder`] entries
    /// so that downstream depth-sensitive checks stay consistent even
    /// though the truncated tags' real identity is gone.
    pub fn deserialize(&mut self, buf: &[u8]) {
        self.stack.clear();
        if buf.len() < 4 {
            return;
        }
        let serialized = u16::from_ne_bytes([buf[0], buf[1]]) as usize;
        let declared = u16::from_ne_bytes([buf[2], buf[3]]) as usize;

        let mut offset = 4usize;
        let mut innermost_first = Vec::with_capacity(serialized);
        for _ in 0..serialized {
            if offset >= buf.len() {
                break;
            }
            let id = TagId::from_u8(buf[offset]);
            offset += 1;
            let tag = if id == TagId::Custom {
                if offset >= buf.len() {
                    break;
                }
                let len = buf[offset] as usize;
                offset += 1;
                if offset + len > buf.len() {
                    break;
                }
                let name = std::str::from_utf8(&buf[offset..offset + len])
                    .unwrap_or("")
                    .to_string();
                offset += len;
                Tag { id, custom_name: Some(name.into_boxed_str()) }
            } else {
                Tag { id, custom_name: None }
            };
            innermost_first.push(tag);
        }

        let missing = declared.saturating_sub(innermost_first.len());
        for _ in 0..missing {
            self.stack.push(Tag::placeholder());
        }
        for tag in innermost_first.into_iter().rev() {
            self.stack.push(tag);
        }
    }
}

fn skip_ascii_whitespace(lexer: &mut dyn Lexer) {
    while matches!(lexer.lookahead(), Some(' ' | '\t' | '\n' | '\x0c' | '\r')) {
        lexer.advance(true);
    }
}

/// ASCII alphanumeric, `-`, and `:`, uppercased as scanned.
fn scan_tag_name_chars(lexer: &mut dyn Lexer) -> String {
    let mut name = String::new();
    while let Some(c) = lexer.lookahead() {
        if c.is_ascii_alphanumeric() || c == '-' || c == ':' {
            name.push(c.to_ascii_uppercase());
            lexer.advance(false);
        } else {
            break;
        }
    }
    name
}

/// Lenient comment scanning: requires `--` immediately after `<!`, then
/// reads until `-->`, tolerating bare `--` runs that aren't followed by `>`.
/// Entered with the `<!` already consumed.
fn scan_comment(lexer: &mut dyn Lexer) -> Option<HtmlToken> {
    if lexer.lookahead() != Some('-') {
        return None;
    }
    lexer.advance(false);
    if lexer.lookahead() != Some('-') {
        return None;
    }
    lexer.advance(false);

    let mut dash_run = 0u32;
    loop {
        match lexer.lookahead() {
            None => return None,
            Some('-') => {
                dash_run += 1;
                lexer.advance(false);
            }
            Some('>') => {
                if dash_run >= 2 {
                    lexer.advance(false);
                    lexer.mark_end();
                    return Some(HtmlToken::Comment);
                }
                dash_run = 0;
                lexer.advance(false);
            }
            Some(_) => {
                dash_run = 0;
                lexer.advance(false);
            }
        }
    }
}
