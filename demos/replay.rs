// Copyright 2026 The tree-sitter-htmlx-scanner contributors. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A standalone replay harness for exercising a scanner layer outside the
//! GLR parser it's meant to sit under.
//!
//! The real driver feeds the scanner a `valid_symbols` bitset computed from
//! its own parse table state; this harness has no parse table, so it simply
//! marks every token of the chosen dialect valid on every call and prints
//! whatever the scanner decides to match. That makes it useful for poking at
//! an isolated construct -- a raw-text body, a `lang="ts"` marker, a brace
//! expression -- but it is not a parser: it never re-derives which tokens a
//! real grammar state would actually accept, so constructs whose scanning
//! depends on the grammar having already consumed a literal `<` or `:`
//! (most of start/end tag scanning) won't replay meaningfully here. Use
//! `tests/scenarios.rs` for that; this binary is for ad hoc inspection.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use htmlx_scanner::html::{HtmlScanner, HTML_TOKEN_COUNT};
use htmlx_scanner::htmlx::{HtmlxScanner, HTMLX_TOKEN_COUNT};
use htmlx_scanner::lexer::{StrLexer, ValidSymbols};
use htmlx_scanner::svelte::{SvelteScanner, SVELTE_TOKEN_COUNT};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Dialect {
    Html,
    Htmlx,
    Svelte,
}

/// Replay a scanner layer over a file and print every token it emits.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Which scanner layer to drive.
    #[arg(long, value_enum, default_value_t = Dialect::Html)]
    dialect: Dialect,

    /// File to scan.
    input: PathBuf,
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    match args.dialect {
        Dialect::Html => replay_html(&text),
        Dialect::Htmlx => replay_htmlx(&text),
        Dialect::Svelte => replay_svelte(&text),
    }

    Ok(())
}

fn replay_html(text: &str) {
    let mut scanner = HtmlScanner::new();
    let valid = ValidSymbols(&ALL_TRUE[..HTML_TOKEN_COUNT]);
    let mut lexer = StrLexer::new(text);

    loop {
        if lexer.eof() {
            break;
        }
        let before = lexer.position();
        let (tok, span) = lexer.call(&valid, |l, vs| scanner.scan(l, vs));
        if let Some(t) = tok {
            println!("{:>3}..{:<3} {:?} {:?}", span.start, span.end, t, &text[span]);
        }
        force_progress(&mut lexer, before);
    }
}

fn replay_htmlx(text: &str) {
    let mut scanner = HtmlxScanner::new();
    let valid = ValidSymbols(&ALL_TRUE[..HTMLX_TOKEN_COUNT]);
    let mut lexer = StrLexer::new(text);

    loop {
        if lexer.eof() {
            break;
        }
        let before = lexer.position();
        let (tok, span) = lexer.call(&valid, |l, vs| scanner.scan(l, vs));
        if let Some(t) = tok {
            println!("{:>3}..{:<3} {:?} {:?}", span.start, span.end, t, &text[span]);
        }
        force_progress(&mut lexer, before);
    }
}

fn replay_svelte(text: &str) {
    let mut scanner = SvelteScanner::new();
    let valid = ValidSymbols(&ALL_TRUE[..SVELTE_TOKEN_COUNT]);
    let mut lexer = StrLexer::new(text);

    loop {
        if lexer.eof() {
            break;
        }
        let before = lexer.position();
        let (tok, span) = lexer.call(&valid, |l, vs| scanner.scan(l, vs));
        if let Some(t) = tok {
            println!("{:>3}..{:<3} {:?} {:?}", span.start, span.end, t, &text[span]);
        }
        force_progress(&mut lexer, before);
    }
}

/// Every token bit permissively set; the largest dialect's count covers the
/// others since earlier ordinals are a stable prefix across layers.
const ALL_TRUE: [bool; SVELTE_TOKEN_COUNT] = [true; SVELTE_TOKEN_COUNT];

/// Some tokens are legitimately zero-width and don't consume input even on a
/// match -- the sticky TS lang marker is pure lookahead by design, and a
/// drained implicit-end-tag sequence can report several pops before the tag
/// stack runs dry. A real grammar reenters the scanner with a different
/// `valid_symbols` mask after each of those; this harness has only one fixed
/// mask, so left unchecked it would retry the same zero-width match forever.
/// If a scan call (matched or not) left the position unchanged, force one
/// codepoint of literal "grammar" text so the loop always makes progress --
/// the same role `advance_committed` plays in `tests/scenarios.rs`.
fn force_progress(lexer: &mut StrLexer, before: usize) {
    if lexer.position() == before {
        lexer.call::<()>(&ValidSymbols(&[]), |l, _| {
            l.advance(true);
            None
        });
    }
}
