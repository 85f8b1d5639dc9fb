/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * A small dynamically-typed, class-based scripting language. This crate is
 * the evaluator core: lexer, parser, resolver, and tree-walking
 * interpreter, plus the CLI driver in main.rs.
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

pub mod ast;
pub mod callable;
pub mod class;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod token;
pub mod value;

use std::collections::HashMap;

use error::{LexError, ParseError, ResolveError, RuntimeError};
use interpreter::Interpreter;

/// What went wrong running a ClawScript program, tagged by the pipeline
/// stage that caught it. The CLI driver maps each variant to a sysexits
/// exit code.
pub enum ClawError {
    Lex(Vec<LexError>),
    Parse(Vec<ParseError>),
    Resolve(Vec<ResolveError>),
    Runtime(RuntimeError),
}

/// Runs a complete ClawScript source string end to end: lex, parse,
/// resolve, evaluate. Returns the first stage's errors if a stage fails;
/// later stages never run on a source that failed an earlier one.
pub fn run(source: &str) -> Result<(), ClawError> {
    let tokens = lexer::tokenize(source).map_err(ClawError::Lex)?;
    let statements = parser::parse(tokens).map_err(ClawError::Parse)?;
    let locals: HashMap<_, _> = resolver::resolve(&statements).map_err(ClawError::Resolve)?;

    Interpreter::new(locals)
        .run(&statements)
        .map_err(ClawError::Runtime)
}
