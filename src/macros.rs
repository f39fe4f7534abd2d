// Copyright 2026 The tree-sitter-htmlx-scanner contributors. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Returns from the enclosing `scan` method unless `$e` holds a value.
///
/// Mirrors the early-return idiom used throughout the scanner layers: most
/// sub-procedures are "try this, and if it didn't match, let the caller try
/// something else" rather than hard errors.
macro_rules! try_scan {
    ($e:expr) => {
        match $e {
            Some(tok) => return Some(tok),
            None => {}
        }
    };
}
