// Copyright 2026 The tree-sitter-htmlx-scanner contributors. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end scenarios driving the composed scanner stack the way a real
//! grammar would: a fixed sequence of `scan` calls, each with its own
//! `valid_symbols`, threading a single scanner instance across all of them.
//!
//! Literal punctuation the context-free grammar matches itself (`<`, `</`,
//! `>`, and plain text) is never handed to the scanner -- it is "consumed"
//! here with [`advance_committed`], standing in for the grammar shifting
//! its own anonymous tokens between scanner calls. The one exception is the
//! byte right after `<`/`</`, which [`HtmlScanner::scan`] peeks at itself
//! (without committing) to decide on a comment or an implicit end tag
//! before the grammar has committed to either production.

use htmlx_scanner::html::{HtmlScanner, HtmlToken, HTML_TOKEN_COUNT};
use htmlx_scanner::htmlx::{HtmlxScanner, HtmlxToken, HTMLX_TOKEN_COUNT};
use htmlx_scanner::lexer::{StrLexer, ValidSymbols};
use htmlx_scanner::svelte::{SvelteScanner, SvelteToken};
use htmlx_scanner::tag::Tag;

/// `RUST_LOG=trace cargo test --test scenarios` then shows every push/pop
/// traced by [`htmlx_scanner::html`].
fn init_logger() {
    let _ = env_logger::try_init();
}

fn html_valid(tokens: &[HtmlToken]) -> Vec<bool> {
    let mut v = vec![false; HTML_TOKEN_COUNT];
    for t in tokens {
        v[*t as usize] = true;
    }
    v
}

fn htmlx_valid(tokens: &[HtmlxToken]) -> Vec<bool> {
    let mut v = vec![false; HTMLX_TOKEN_COUNT];
    for t in tokens {
        v[t.id()] = true;
    }
    v
}

fn svelte_valid(tokens: &[SvelteToken]) -> Vec<bool> {
    let mut v = vec![false; htmlx_scanner::svelte::SVELTE_TOKEN_COUNT];
    for t in tokens {
        v[t.id()] = true;
    }
    v
}

/// Advances the lexer by one committed byte, the way a test harness stands
/// in for the grammar consuming a literal token the scanner itself never
/// produces (`<`, `</`, `>`, plain text). Goes through `call` so that any
/// speculative overrun left by the previous scan is first rolled back to
/// its committed position.
fn advance_committed(lexer: &mut StrLexer) {
    lexer.call::<()>(&ValidSymbols(&[]), |l, _| {
        l.advance(true);
        None
    });
}

fn advance_n(lexer: &mut StrLexer, n: usize) {
    for _ in 0..n {
        advance_committed(lexer);
    }
}

/// `<p>hi<p>bye</p>` -- an unclosed `<p>` is implicitly closed by the second
/// `<p>` opening, per scenario 1.
#[test]
fn unclosed_p_is_implicitly_closed_by_a_sibling_p() {
    init_logger();
    let mut scanner = HtmlScanner::new();
    let mut lexer = StrLexer::new("<p>hi<p>bye</p>");

    // Before the first '<': no open element, so no implicit close is offered.
    let implicit = html_valid(&[HtmlToken::ImplicitEndTag]);
    let (tok, _) = lexer.call(&ValidSymbols(&implicit), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, None);

    advance_committed(&mut lexer); // '<'
    let start = html_valid(&[HtmlToken::StartTagName]);
    let (tok, _) = lexer.call(&ValidSymbols(&start), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlToken::StartTagName));
    assert_eq!(scanner.stack.len(), 1);

    advance_committed(&mut lexer); // '>'
    advance_n(&mut lexer, "hi".len());

    // At the second '<': P cannot contain another P, so it closes implicitly.
    let (tok, span) = lexer.call(&ValidSymbols(&implicit), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlToken::ImplicitEndTag));
    assert_eq!(span.len(), 0);
    assert!(scanner.stack.is_empty());

    advance_committed(&mut lexer); // '<'
    let (tok, _) = lexer.call(&ValidSymbols(&start), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlToken::StartTagName));
    assert_eq!(scanner.stack.len(), 1);

    advance_committed(&mut lexer); // '>'
    advance_n(&mut lexer, "bye".len());
    advance_n(&mut lexer, "</".len());

    let end = html_valid(&[HtmlToken::EndTagName]);
    let (tok, _) = lexer.call(&ValidSymbols(&end), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlToken::EndTagName));
    assert!(scanner.stack.is_empty());
}

/// `<img><br>` -- a void element never receives an explicit end tag; the
/// next start tag flushes it via an implicit end, per scenario 2.
#[test]
fn void_element_is_implicitly_closed_before_the_next_sibling() {
    init_logger();
    let mut scanner = HtmlScanner::new();
    let mut lexer = StrLexer::new("<img><br>");

    advance_committed(&mut lexer); // '<'
    let start = html_valid(&[HtmlToken::StartTagName]);
    let (tok, _) = lexer.call(&ValidSymbols(&start), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlToken::StartTagName));
    assert_eq!(scanner.stack.top(), Some(&Tag::from_name("IMG")));

    advance_committed(&mut lexer); // '>'

    let implicit = html_valid(&[HtmlToken::ImplicitEndTag]);
    let (tok, _) = lexer.call(&ValidSymbols(&implicit), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlToken::ImplicitEndTag));
    assert!(scanner.stack.is_empty());

    advance_committed(&mut lexer); // '<'
    let (tok, _) = lexer.call(&ValidSymbols(&start), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlToken::StartTagName));
    assert_eq!(scanner.stack.top(), Some(&Tag::from_name("BR")));
}

/// `<script>var x = "</script>";</script>` -- the closing delimiter inside
/// the string literal is ambiguous per the HTML spec; raw-text scanning
/// terminates at the first case-insensitive `</script` regardless, per
/// scenario 3.
#[test]
fn script_raw_text_stops_at_the_first_case_insensitive_delimiter() {
    init_logger();
    let mut scanner = HtmlScanner::new();
    let input = "<script>var x = \"</script>\";</script>";
    let mut lexer = StrLexer::new(input);

    advance_committed(&mut lexer); // '<'
    let start = html_valid(&[HtmlToken::ScriptStartTagName]);
    let (tok, _) = lexer.call(&ValidSymbols(&start), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlToken::ScriptStartTagName));

    advance_committed(&mut lexer); // '>'

    let raw = html_valid(&[HtmlToken::RawText]);
    let (tok, span) = lexer.call(&ValidSymbols(&raw), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlToken::RawText));
    assert_eq!(&input[span], "var x = \"");

    advance_n(&mut lexer, "</".len());
    let end = html_valid(&[HtmlToken::EndTagName]);
    let (tok, _) = lexer.call(&ValidSymbols(&end), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlToken::EndTagName));
    assert!(scanner.stack.is_empty());
}

/// `<!-- a -- b -->` -- the lenient comment scanner tolerates an inner `--`
/// run that isn't followed by `>`, per scenario 4.
#[test]
fn lenient_comment_spans_the_whole_comment_despite_inner_double_dash() {
    init_logger();
    let mut scanner = HtmlScanner::new();
    let input = "<!-- a -- b -->";
    let mut lexer = StrLexer::new(input);

    // scan() itself peeks past the still-uncommitted '<' to decide between a
    // comment and an implicit end tag, so both must be offered here -- the
    // grammar hasn't chosen a production yet.
    let valid = html_valid(&[HtmlToken::ImplicitEndTag, HtmlToken::Comment]);
    let (tok, span) = lexer.call(&ValidSymbols(&valid), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlToken::Comment));
    assert_eq!(&input[span], "<!-- a -- b -->");
}

/// `{foo + \`a${b}c\`}` with the TypeScript flag off emits `EXPRESSION_JS`
/// spanning the whole interpolated template literal, per scenario 5.
#[test]
fn brace_expression_with_template_interpolation_emits_js_when_ts_flag_unset() {
    init_logger();
    let mut scanner = HtmlxScanner::new();
    let input = "foo + `a${b}c`}";
    let mut lexer = StrLexer::new(input);

    let expr = htmlx_valid(&[HtmlxToken::ExpressionJs, HtmlxToken::ExpressionTs]);
    let (tok, span) = lexer.call(&ValidSymbols(&expr), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlxToken::ExpressionJs));
    assert_eq!(&input[span], "foo + `a${b}c`");
}

/// Once a `<script lang="ts">` marker has fired, subsequent brace
/// expressions classify as TypeScript -- "sticky" per §4.3.
#[test]
fn ts_lang_marker_makes_subsequent_expressions_typescript() {
    init_logger();
    let mut scanner = HtmlxScanner::new();
    let mut lexer = StrLexer::new("lang=\"ts\"");

    let marker = htmlx_valid(&[HtmlxToken::TsLangMarker]);
    let (tok, span) = lexer.call(&ValidSymbols(&marker), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlxToken::TsLangMarker));
    assert_eq!(span.len(), 0);

    let mut lexer2 = StrLexer::new("a+b}");
    let expr = htmlx_valid(&[HtmlxToken::ExpressionJs, HtmlxToken::ExpressionTs]);
    let (tok, _) = lexer2.call(&ValidSymbols(&expr), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlxToken::ExpressionTs));
}

/// `{#each items as item, i (item.id)}` splits into an iterator expression,
/// a binding pattern (stopping before the index variable), and a key
/// expression, per scenario 6. The grammar itself consumes the literal
/// `as`, `,`, and parens between them.
#[test]
fn each_block_head_splits_into_iterator_binding_and_key() {
    init_logger();
    let mut scanner = SvelteScanner::new();
    let input = "items as item, i (item.id)}";
    let mut lexer = StrLexer::new(input);

    let iter = svelte_valid(&[SvelteToken::IteratorExpression]);
    let (tok, span) = lexer.call(&ValidSymbols(&iter), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(SvelteToken::IteratorExpression));
    assert_eq!(&input[span], "items");

    advance_n(&mut lexer, " as ".len());

    let binding = svelte_valid(&[SvelteToken::BindingPattern]);
    let (tok, span) = lexer.call(&ValidSymbols(&binding), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(SvelteToken::BindingPattern));
    assert_eq!(&input[span], "item");

    advance_n(&mut lexer, ", i (".len());

    let key = svelte_valid(&[SvelteToken::KeyExpression]);
    let (tok, span) = lexer.call(&ValidSymbols(&key), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(SvelteToken::KeyExpression));
    assert_eq!(&input[span], "item.id");
}

/// Serializing and deserializing a scanner that has an open custom element
/// and a sticky TypeScript flag round-trips both, across all three layers.
#[test]
fn serialize_round_trip_preserves_stack_and_dialect_flags_across_layers() {
    init_logger();
    let mut scanner = SvelteScanner::new();
    scanner.htmlx.html.stack.push(Tag::from_name("DIV"));
    scanner.htmlx.html.stack.push(Tag::from_name("MY-APP"));

    let mut lexer = StrLexer::new("lang=\"typescript\"");
    let marker = svelte_valid(&[SvelteToken::Htmlx(HtmlxToken::TsLangMarker)]);
    let (tok, _) = lexer.call(&ValidSymbols(&marker), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(SvelteToken::Htmlx(HtmlxToken::TsLangMarker)));

    let mut buf = [0u8; 256];
    let len = scanner.serialize(&mut buf);

    let mut restored = SvelteScanner::new();
    restored.deserialize(&buf[..len]);

    assert_eq!(restored.htmlx.html.stack.len(), 2);
    assert_eq!(restored.htmlx.html.stack.top(), Some(&Tag::from_name("MY-APP")));

    let mut lexer2 = StrLexer::new("a}");
    let expr = svelte_valid(&[
        SvelteToken::Htmlx(HtmlxToken::ExpressionJs),
        SvelteToken::Htmlx(HtmlxToken::ExpressionTs),
    ]);
    let (tok, _) = lexer2.call(&ValidSymbols(&expr), |l, vs| restored.scan(l, vs));
    assert_eq!(tok, Some(SvelteToken::Htmlx(HtmlxToken::ExpressionTs)));
}

/// A namespaced tag (`svelte:head`) and a dotted/member tag (`UI.Button`)
/// don't share any mutable state beyond the stack itself -- scanning one
/// right after the other doesn't leave `awaiting_local_name` or any other
/// flag in a state that corrupts the next.
#[test]
fn namespaced_and_dotted_tags_do_not_interfere_with_each_other() {
    init_logger();
    let mut scanner = HtmlxScanner::new();

    let mut lexer = StrLexer::new("svelte:head");
    let ns = htmlx_valid(&[HtmlxToken::TagNamespace]);
    let (tok, _) = lexer.call(&ValidSymbols(&ns), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlxToken::TagNamespace));

    let local = htmlx_valid(&[HtmlxToken::TagLocalName]);
    let (tok, _) = lexer.call(&ValidSymbols(&local), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlxToken::TagLocalName));

    let mut lexer2 = StrLexer::new("UI.Button");
    let member = htmlx_valid(&[HtmlxToken::MemberTagObject]);
    let (tok, _) = lexer2.call(&ValidSymbols(&member), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlxToken::MemberTagObject));
}

/// `on:click` matches `DIRECTIVE_MARKER`; a bare `disabled` (no trailing
/// colon) must NOT fall through to any other alternative the grammar might
/// offer -- it reports "identifier without colon" and the whole scan fails,
/// per the negative internal signal in §4.3.
#[test]
fn directive_marker_rejects_bare_identifier_without_falling_through() {
    init_logger();
    let mut scanner = HtmlxScanner::new();

    let mut lexer = StrLexer::new("on:click");
    let v = htmlx_valid(&[HtmlxToken::DirectiveMarker]);
    let (tok, span) = lexer.call(&ValidSymbols(&v), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, Some(HtmlxToken::DirectiveMarker));
    assert_eq!(&"on:click"[span], "on");

    let mut lexer2 = StrLexer::new("disabled");
    let v2 = htmlx_valid(&[HtmlxToken::DirectiveMarker, HtmlxToken::Text]);
    let (tok2, _) = lexer2.call(&ValidSymbols(&v2), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok2, None);
}

/// HTMLX `TEXT` stops at a `{` with zero content scanned so far and reports
/// no match, leaving the grammar (not the HTML text scanner) to dispatch the
/// expression that follows.
#[test]
fn htmlx_text_declines_to_match_a_bare_expression_start() {
    init_logger();
    let mut scanner = HtmlxScanner::new();
    let mut lexer = StrLexer::new("{foo}");
    let v = htmlx_valid(&[HtmlxToken::Text]);
    let (tok, _) = lexer.call(&ValidSymbols(&v), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, None);
}

/// `{@html}` with no leading-whitespace-delimited body must not be mistaken
/// for a tag expression with empty content, per §4.4.
#[test]
fn tag_expression_rejects_an_empty_body() {
    init_logger();
    let mut scanner = SvelteScanner::new();
    let mut lexer = StrLexer::new("}");
    let v = svelte_valid(&[SvelteToken::TagExpression]);
    let (tok, _) = lexer.call(&ValidSymbols(&v), |l, vs| scanner.scan(l, vs));
    assert_eq!(tok, None);
}

/// Serializing a stack deeper than the buffer can hold truncates the
/// outermost entries; deserializing pads that missing depth back in as
/// placeholder tags so depth-sensitive logic downstream doesn't desync, per
/// §6/§7 -- exercised here through the full `SvelteScanner`, not just the
/// inner `HtmlScanner` directly.
#[test]
fn svelte_scanner_serialize_truncation_round_trips_depth() {
    init_logger();
    let mut scanner = SvelteScanner::new();
    scanner.htmlx.html.stack.push(Tag::from_name("HTML"));
    scanner.htmlx.html.stack.push(Tag::from_name("BODY"));
    scanner.htmlx.html.stack.push(Tag::from_name("DIV"));

    let mut buf = [0u8; 6]; // dialect byte + header, room for at most one tag
    let len = scanner.serialize(&mut buf);

    let mut restored = SvelteScanner::new();
    restored.deserialize(&buf[..len]);

    assert_eq!(restored.htmlx.html.stack.len(), 3);
    assert_eq!(restored.htmlx.html.stack.top(), Some(&Tag::from_name("DIV")));
}
