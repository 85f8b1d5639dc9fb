/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * Core Recursive-Descent Parser Entry Point
 * -------------------------------------------
 * Defines the `Parser` structure and the public `parse()` driver that turns
 * a token stream into a full statement list. The grammar itself is split
 * across:
 *
 *  - statements.rs  -> declarations and statement forms
 *  - expressions.rs -> expression grammar & operator precedence
 *  - helpers.rs     -> token matching, consumption, and navigation
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

mod expressions;
mod helpers;
mod statements;

use crate::ast::Stmt;
use crate::error::ParseError;
use crate::token::Token;

/// The core ClawScript recursive-descent parser.
///
/// Holds the full token stream and a cursor into it; the grammar logic
/// lives in extension `impl Parser` blocks in the sibling modules.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    next_expr_id: u32,
}

/// Parses `tokens` into a program. Does not stop at the first syntax
/// error: each failed declaration is synchronized past and parsing resumes,
/// so a single pass can report every syntax error in the source.
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Stmt>, Vec<ParseError>> {
    let mut parser = Parser {
        tokens,
        current: 0,
        next_expr_id: 0,
    };

    let mut statements = Vec::new();
    let mut errors = Vec::new();

    while !parser.is_at_end() {
        match parser.declaration() {
            Ok(stmt) => statements.push(stmt),
            Err(err) => {
                errors.push(err);
                parser.synchronize();
            }
        }
    }

    if errors.is_empty() {
        Ok(statements)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Stmt};
    use crate::lexer::tokenize;

    fn parse_source(source: &str) -> Vec<Stmt> {
        parse(tokenize(source).unwrap()).unwrap()
    }

    #[test]
    fn parses_a_var_declaration_with_initializer() {
        let statements = parse_source("var a = 1 + 2;");
        assert!(matches!(statements.as_slice(), [Stmt::Var { initializer: Some(_), .. }]));
    }

    #[test]
    fn ternary_is_right_associative() {
        let statements = parse_source("true ? 1 : false ? 2 : 3;");
        match &statements[0] {
            Stmt::Expression(Expr::Ternary { else_branch, .. }) => {
                assert!(matches!(**else_branch, Expr::Ternary { .. }));
            }
            other => panic!("expected a ternary expression statement, got {:?}", other),
        }
    }

    #[test]
    fn collects_every_syntax_error_in_one_pass() {
        let tokens = tokenize("var ; var ;").unwrap();
        let errors = parse(tokens).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn for_loop_parses_into_a_for_statement_node() {
        let statements = parse_source("for (var i = 0; i < 3; i = i + 1) print i;");
        assert!(matches!(
            statements.as_slice(),
            [Stmt::For {
                initializer: Some(_),
                condition: Some(_),
                increment: Some(_),
                ..
            }]
        ));
    }

    #[test]
    fn class_declaration_collects_its_methods() {
        let statements = parse_source("class Cat { speak() { print 1; } purr() { print 2; } }");
        assert!(matches!(statements.as_slice(), [Stmt::Class { methods, .. }] if methods.len() == 2));
    }
}
