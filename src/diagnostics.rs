/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * File:      diagnostics.rs
 * Purpose:   Renders the error taxonomy in error.rs as `[line N] message`
 *            diagnostics on stderr. No source-map level detail (column,
 *            caret, source-line excerpt) is attempted — line numbers are
 *            the only location data the lexer/parser/resolver carry.
 *
 * Author:    Sam Wilcox
 * Email:     sam@pawx-lang.com
 * Website:   https://www.pawx-lang.com
 * GitHub:    https://github.com/samwilcox/pawx
 *
 * License:
 * This file is part of the CLAWSCRIPT programming language project.
 *
 * CLAWSCRIPT is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fmt::Display;

/// Prints `[line N] message` to stderr, matching the format every static
/// and runtime error in this crate is reported with.
pub fn report(line: usize, message: impl Display) {
    eprintln!("[line {}] Error: {}", line, message);
}

pub fn report_all<E: Display>(errors: &[E], line_of: impl Fn(&E) -> usize) {
    for error in errors {
        report(line_of(error), error);
    }
}
