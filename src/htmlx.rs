// Copyright 2026 The tree-sitter-htmlx-scanner contributors. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The HTMLX dialect layer: namespaced/dotted tags, brace expressions, and
//! the sticky TypeScript `lang` marker, layered over [`crate::html`].
//!
//! This layer intercepts tag-name scanning itself (rather than delegating
//! it wholesale to [`HtmlScanner`]) because it needs to notice a trailing
//! `:` or `.` after the name before the base scanner would have already
//! committed to an ordinary start/end tag token.

use crate::html::{HtmlScanner, HtmlToken, HTML_TOKEN_COUNT};
use crate::lexer::{Lexer, ValidSymbols};
use crate::tag::{Tag, TagId};

/// Token kinds the HTMLX layer can produce.
///
/// `Html` passes through a token the inner [`HtmlScanner`] produced
/// unchanged; its ordinal is the wrapped [`HtmlToken`]'s own, so the two
/// token spaces share the low end of the same index range. HTMLX's own
/// additions are numbered immediately after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlxToken {
    Html(HtmlToken),
    TagNamespace,
    TagLocalName,
    TsLangMarker,
    ExpressionJs,
    ExpressionTs,
    DirectiveMarker,
    MemberTagObject,
    MemberTagProperty,
    Text,
}

impl HtmlxToken {
    pub fn id(self) -> usize {
        match self {
            HtmlxToken::Html(t) => t as usize,
            HtmlxToken::TagNamespace => HTML_TOKEN_COUNT,
            HtmlxToken::TagLocalName => HTML_TOKEN_COUNT + 1,
            HtmlxToken::TsLangMarker => HTML_TOKEN_COUNT + 2,
            HtmlxToken::ExpressionJs => HTML_TOKEN_COUNT + 3,
            HtmlxToken::ExpressionTs => HTML_TOKEN_COUNT + 4,
            HtmlxToken::DirectiveMarker => HTML_TOKEN_COUNT + 5,
            HtmlxToken::MemberTagObject => HTML_TOKEN_COUNT + 6,
            HtmlxToken::MemberTagProperty => HTML_TOKEN_COUNT + 7,
            HtmlxToken::Text => HTML_TOKEN_COUNT + 8,
        }
    }
}

/// Number of token kinds HTMLX owns (its own additions plus everything it
/// inherits from the base layer); Svelte numbers its own tokens from here.
pub const HTMLX_TOKEN_COUNT: usize = HTML_TOKEN_COUNT + 9;

#[derive(Debug, Default, Clone)]
pub struct HtmlxScanner {
    pub html: HtmlScanner,
    awaiting_local_name: bool,
    is_typescript: bool,
}

impl HtmlxScanner {
    pub fn new() -> Self {
        HtmlxScanner { html: HtmlScanner::new(), awaiting_local_name: false, is_typescript: false }
    }

    pub fn scan(&mut self, lexer: &mut dyn Lexer, valid: &ValidSymbols) -> Option<HtmlxToken> {
        if valid.is_valid(HtmlxToken::TsLangMarker.id()) {
            try_scan!(self.scan_ts_lang_marker(lexer));
        }

        if valid.is_valid(HtmlxToken::DirectiveMarker.id()) {
            match check_directive_marker(lexer) {
                DirectiveCheck::Matched => return Some(HtmlxToken::DirectiveMarker),
                DirectiveCheck::IdentifierNoColon => return None,
                DirectiveCheck::NotIdentifier => {}
            }
        }

        if valid.is_valid(HtmlxToken::Text.id()) {
            if let Some(tok) = scan_htmlx_text(lexer) {
                return Some(tok);
            }
            if lexer.lookahead() == Some('{') {
                return None;
            }
        }

        skip_space(lexer);

        if valid.is_valid(HtmlxToken::ExpressionJs.id()) || valid.is_valid(HtmlxToken::ExpressionTs.id()) {
            try_scan!(self.scan_expression(lexer));
        }

        if valid.is_valid(HtmlToken::RawText as usize)
            && !start_tag_name_any_valid(valid)
            && !valid.is_valid(HtmlToken::EndTagName as usize)
        {
            return self.html.scan(lexer, valid).map(HtmlxToken::Html);
        }

        if self.awaiting_local_name && valid.is_valid(HtmlxToken::TagLocalName.id()) {
            try_scan!(self.scan_local_name(lexer));
        }

        if lexer.lookahead() == Some('/') && valid.is_valid(HtmlToken::SelfClosingTagDelimiter as usize) {
            try_scan!(self.scan_self_closing(lexer));
        }

        if valid.is_valid(HtmlxToken::MemberTagProperty.id()) {
            try_scan!(scan_member_tag_property(lexer));
        }

        if matches!(lexer.lookahead(), Some(c) if c.is_ascii_alphabetic()) {
            if valid.is_valid(HtmlxToken::TagNamespace.id())
                || start_tag_name_any_valid(valid)
                || valid.is_valid(HtmlxToken::MemberTagObject.id())
            {
                try_scan!(self.scan_start_tag(lexer, valid));
            }
            if valid.is_valid(HtmlxToken::TagNamespace.id())
                || valid.is_valid(HtmlToken::EndTagName as usize)
                || valid.is_valid(HtmlxToken::MemberTagObject.id())
            {
                try_scan!(self.scan_end_tag(lexer, valid));
            }
        }

        self.html.scan(lexer, valid).map(HtmlxToken::Html)
    }

    fn scan_start_tag(&mut self, lexer: &mut dyn Lexer, valid: &ValidSymbols) -> Option<HtmlxToken> {
        match lexer.lookahead() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return None,
        }

        let mut name = String::new();
        while let Some(c) = lexer.lookahead() {
            if is_name_char(c) {
                name.push(c.to_ascii_uppercase());
                lexer.advance(false);
            } else {
                break;
            }
        }

        if lexer.lookahead() == Some(':') && valid.is_valid(HtmlxToken::TagNamespace.id()) {
            lexer.mark_end();
            self.awaiting_local_name = true;
            return Some(HtmlxToken::TagNamespace);
        }

        if lexer.lookahead() == Some('.') && valid.is_valid(HtmlxToken::MemberTagObject.id()) {
            lexer.mark_end();
            return Some(HtmlxToken::MemberTagObject);
        }

        if !name.is_empty() && start_tag_name_any_valid(valid) {
            lexer.mark_end();
            let tag = Tag::from_name(&name);
            let token = HtmlxToken::Html(raw_text_start_token(&tag));
            self.html.stack.push(tag);
            return Some(token);
        }

        None
    }

    fn scan_end_tag(&mut self, lexer: &mut dyn Lexer, valid: &ValidSymbols) -> Option<HtmlxToken> {
        match lexer.lookahead() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return None,
        }

        let mut name = String::new();
        while let Some(c) = lexer.lookahead() {
            if is_name_char(c) {
                name.push(c.to_ascii_uppercase());
                lexer.advance(false);
            } else {
                break;
            }
        }

        if lexer.lookahead() == Some(':') && valid.is_valid(HtmlxToken::TagNamespace.id()) {
            lexer.mark_end();
            self.awaiting_local_name = true;
            return Some(HtmlxToken::TagNamespace);
        }

        if lexer.lookahead() == Some('.') && valid.is_valid(HtmlxToken::MemberTagObject.id()) {
            lexer.mark_end();
            return Some(HtmlxToken::MemberTagObject);
        }

        if name.is_empty() {
            return None;
        }

        lexer.mark_end();

        if !valid.is_valid(HtmlToken::EndTagName as usize) {
            return None;
        }

        let tag = Tag::from_name(&name);
        if self.html.stack.top() == Some(&tag) {
            self.html.stack.pop();
            Some(HtmlxToken::Html(HtmlToken::EndTagName))
        } else {
            Some(HtmlxToken::Html(HtmlToken::ErroneousEndTagName))
        }
    }

    fn scan_local_name(&mut self, lexer: &mut dyn Lexer) -> Option<HtmlxToken> {
        match lexer.lookahead() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return None,
        }
        while let Some(c) = lexer.lookahead() {
            if is_name_char(c) {
                lexer.advance(false);
            } else {
                break;
            }
        }
        lexer.mark_end();
        self.awaiting_local_name = false;
        Some(HtmlxToken::TagLocalName)
    }

    fn scan_self_closing(&mut self, lexer: &mut dyn Lexer) -> Option<HtmlxToken> {
        lexer.advance(false);
        if lexer.lookahead() != Some('>') {
            return None;
        }
        lexer.advance(false);
        lexer.mark_end();
        self.html.stack.pop();
        Some(HtmlxToken::Html(HtmlToken::SelfClosingTagDelimiter))
    }

    fn scan_ts_lang_marker(&mut self, lexer: &mut dyn Lexer) -> Option<HtmlxToken> {
        lexer.mark_end();
        if !check_ts_lang_attr(lexer) {
            return None;
        }
        self.is_typescript = true;
        Some(HtmlxToken::TsLangMarker)
    }

    fn scan_expression(&mut self, lexer: &mut dyn Lexer) -> Option<HtmlxToken> {
        skip_space(lexer);
        if matches!(lexer.lookahead(), Some('#' | ':' | '@' | '/')) {
            return None;
        }
        if !scan_balanced_expr(lexer) {
            return None;
        }
        Some(if self.is_typescript { HtmlxToken::ExpressionTs } else { HtmlxToken::ExpressionJs })
    }

    /// Writes a flags byte (bit 0: awaiting a local name after a namespace
    /// marker, bit 1: sticky TypeScript mode) followed by the inner HTML
    /// scanner's own serialized stack.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        buf[0] = (self.awaiting_local_name as u8) | ((self.is_typescript as u8) << 1);
        1 + self.html.serialize(&mut buf[1..])
    }

    pub fn deserialize(&mut self, buf: &[u8]) {
        if buf.is_empty() {
            self.awaiting_local_name = false;
            self.is_typescript = false;
            self.html.deserialize(&[]);
            return;
        }
        self.awaiting_local_name = buf[0] & 1 != 0;
        self.is_typescript = buf[0] & 2 != 0;
        self.html.deserialize(&buf[1..]);
    }
}

fn raw_text_start_token(tag: &Tag) -> HtmlToken {
    match tag.id {
        TagId::Script => HtmlToken::ScriptStartTagName,
        TagId::Style => HtmlToken::StyleStartTagName,
        TagId::Textarea => HtmlToken::TextareaStartTagName,
        TagId::Title => HtmlToken::TitleStartTagName,
        _ => HtmlToken::StartTagName,
    }
}

fn start_tag_name_any_valid(valid: &ValidSymbols) -> bool {
    use HtmlToken::*;
    valid.is_valid(StartTagName as usize)
        || valid.is_valid(ScriptStartTagName as usize)
        || valid.is_valid(StyleStartTagName as usize)
        || valid.is_valid(TextareaStartTagName as usize)
        || valid.is_valid(TitleStartTagName as usize)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn skip_space(lexer: &mut dyn Lexer) {
    while matches!(lexer.lookahead(), Some(c) if is_space(c)) {
        lexer.advance(true);
    }
}

/// Text content for HTMLX: extends HTML's §13.1.3 text scanning to also
/// stop at `{`, the start of a brace expression. Whitespace is significant
/// and included in the token.
fn scan_htmlx_text(lexer: &mut dyn Lexer) -> Option<HtmlxToken> {
    let mut has_content = false;
    while let Some(c) = lexer.lookahead() {
        if matches!(c, '<' | '&' | '{') {
            break;
        }
        lexer.advance(false);
        has_content = true;
    }
    if has_content {
        lexer.mark_end();
        Some(HtmlxToken::Text)
    } else {
        None
    }
}

/// Skips a `"`/`'`/`` ` `` delimited string, recursing into `${...}`
/// template-literal interpolations (which may themselves contain further
/// nested strings and braces). Returns `false` without consuming anything
/// if not positioned at a quote.
pub(crate) fn skip_string(lexer: &mut dyn Lexer) -> bool {
    let quote = match lexer.lookahead() {
        Some(c @ ('"' | '\'' | '`')) => c,
        _ => return false,
    };
    lexer.advance(false);

    while let Some(c) = lexer.lookahead() {
        if c == quote {
            break;
        }
        if c == '\\' {
            lexer.advance(false);
            if lexer.lookahead().is_some() {
                lexer.advance(false);
            }
        } else if quote == '`' && c == '$' {
            lexer.advance(false);
            if lexer.lookahead() == Some('{') {
                lexer.advance(false);
                let mut depth = 1i32;
                while depth > 0 {
                    let Some(c2) = lexer.lookahead() else { break };
                    if matches!(c2, '"' | '\'' | '`') {
                        skip_string(lexer);
                    } else {
                        match c2 {
                            '{' => depth += 1,
                            '}' => depth -= 1,
                            _ => {}
                        }
                        lexer.advance(false);
                    }
                }
            }
        } else {
            lexer.advance(false);
        }
    }

    if lexer.lookahead() == Some(quote) {
        lexer.advance(false);
    }
    true
}

/// Scans a balanced brace/bracket/paren expression up to an unbalanced `}`,
/// stopping there without consuming it. Trailing whitespace at depth 0 is
/// excluded from the marked span (but still consumed, so the next token
/// starts after it).
fn scan_balanced_expr(lexer: &mut dyn Lexer) -> bool {
    let mut depth = 0i32;
    let mut has_content = false;
    let mut needs_mark = false;

    while let Some(c) = lexer.lookahead() {
        if depth == 0 && c == '}' {
            break;
        }

        if skip_string(lexer) {
            has_content = true;
            needs_mark = true;
            continue;
        }

        if depth == 0 && is_space(c) {
            if needs_mark {
                lexer.mark_end();
                needs_mark = false;
            }
            loop {
                lexer.advance(false);
                if !matches!(lexer.lookahead(), Some(c) if is_space(c)) {
                    break;
                }
            }
            continue;
        }

        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth -= 1;
                if depth < 0 {
                    break;
                }
            }
            _ => {}
        }

        lexer.advance(false);
        has_content = true;
        needs_mark = true;
    }

    if needs_mark {
        lexer.mark_end();
    }

    has_content
}

fn check_ts_lang_attr(lexer: &mut dyn Lexer) -> bool {
    skip_space(lexer);

    for expected in "lang".chars() {
        match lexer.lookahead() {
            Some(c) if c.to_ascii_lowercase() == expected => lexer.advance(false),
            _ => return false,
        }
    }

    skip_space(lexer);
    if lexer.lookahead() != Some('=') {
        return false;
    }
    lexer.advance(false);
    skip_space(lexer);

    let quote = match lexer.lookahead() {
        Some(c @ ('"' | '\'')) => c,
        _ => return false,
    };
    lexer.advance(false);

    match lexer.lookahead() {
        Some(c) if c.to_ascii_lowercase() == 't' => lexer.advance(false),
        _ => return false,
    }
    match lexer.lookahead() {
        Some(c) if c.to_ascii_lowercase() == 's' => lexer.advance(false),
        _ => return false,
    }

    if lexer.lookahead() == Some(quote) {
        return true;
    }

    for expected in "cript".chars() {
        match lexer.lookahead() {
            Some(c) if c.to_ascii_lowercase() == expected => lexer.advance(false),
            _ => return false,
        }
    }

    lexer.lookahead() == Some(quote)
}

enum DirectiveCheck {
    NotIdentifier,
    IdentifierNoColon,
    Matched,
}

fn check_directive_marker(lexer: &mut dyn Lexer) -> DirectiveCheck {
    skip_space(lexer);
    lexer.mark_end();

    match lexer.lookahead() {
        Some(c) if is_ident_start(c) => {}
        _ => return DirectiveCheck::NotIdentifier,
    }
    while let Some(c) = lexer.lookahead() {
        if is_ident_char(c) {
            lexer.advance(false);
        } else {
            break;
        }
    }
    if lexer.lookahead() != Some(':') {
        return DirectiveCheck::IdentifierNoColon;
    }
    DirectiveCheck::Matched
}

fn scan_member_tag_property(lexer: &mut dyn Lexer) -> Option<HtmlxToken> {
    skip_space(lexer);
    match lexer.lookahead() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return None,
    }
    while let Some(c) = lexer.lookahead() {
        if is_ident_char(c) {
            lexer.advance(false);
        } else {
            break;
        }
    }
    lexer.mark_end();
    Some(HtmlxToken::MemberTagProperty)
}
