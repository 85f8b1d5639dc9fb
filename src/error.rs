/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/pawx
 *
 * License:
 * This file is part of the CLAWSCRIPT programming language project.
 *
 * CLAWSCRIPT is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

//! The error taxonomy shared by every stage of the pipeline.
//!
//! Lexing and parsing raise static errors ([`LexError`], [`ParseError`]); the
//! evaluator raises [`RuntimeError`]. All three carry a source line so the
//! CLI driver can render `[line N] ...` diagnostics without threading a
//! formatter through every stage.

use thiserror::Error;

/// A lexical error: an unterminated string or an unrecognized character.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct LexError {
    pub message: String,
    pub line: usize,
}

impl LexError {
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

/// A syntax error raised by the parser while building the AST.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

/// A static error raised by the resolver pass (self-referencing initializer,
/// `break`/`continue` outside a loop).
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct ResolveError {
    pub message: String,
    pub line: usize,
}

impl ResolveError {
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

/// The runtime error-kind taxonomy. Each variant corresponds to exactly one
/// of the evaluator's documented failure modes; none of these are raised for
/// break/continue/return, which are non-local transfers, not errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// Operand typing violation: wrong variant for an operator, `.name` on a
    /// non-instance, calling a non-callable.
    #[error("{message}")]
    TypeError { message: String, line: usize },

    /// Argument count did not match a callable's arity.
    #[error("{message}")]
    ArityError { message: String, line: usize },

    /// `/` with a right operand equal to `0`.
    #[error("Division by zero.")]
    DivisionByZero { line: usize },

    /// Name lookup or assignment failed in the environment chain.
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable { name: String, line: usize },

    /// Field not present on an instance.
    #[error("Undefined property '{name}'.")]
    UndefinedProperty { name: String, line: usize },

    /// An AST node was observed that the evaluator does not (yet)
    /// implement: `this`, `super`, array literals/indexing.
    #[error("{message}")]
    Unimplemented { message: String, line: usize },
}

impl RuntimeError {
    pub fn line(&self) -> usize {
        match self {
            RuntimeError::TypeError { line, .. }
            | RuntimeError::ArityError { line, .. }
            | RuntimeError::DivisionByZero { line }
            | RuntimeError::UndefinedVariable { line, .. }
            | RuntimeError::UndefinedProperty { line, .. }
            | RuntimeError::Unimplemented { line, .. } => *line,
        }
    }
}
