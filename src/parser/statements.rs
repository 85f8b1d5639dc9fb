/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * Statement grammar: declarations, control flow, and the remaining
 * statement forms (print, break, continue, return).
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

use std::rc::Rc;

use crate::ast::{FunctionStmt, Stmt};
use crate::error::ParseError;
use crate::token::TokenKind;

use super::Parser;

impl Parser {
    /// `declaration -> classDecl | funDecl | varDecl | statement`
    pub(super) fn declaration(&mut self) -> Result<Stmt, ParseError> {
        if self.matches(&[TokenKind::Class]) {
            return self.class_declaration();
        }
        if self.matches(&[TokenKind::Fun]) {
            return self.function_declaration("function");
        }
        if self.matches(&[TokenKind::Var]) {
            return self.var_declaration();
        }
        self.statement()
    }

    fn class_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self.consume(TokenKind::Identifier, "Expect class name.")?;

        let superclass = if self.matches(&[TokenKind::Less]) {
            let superclass_name = self.consume(TokenKind::Identifier, "Expect superclass name.")?;
            Some(crate::ast::Expr::Variable {
                id: self.next_id(),
                name: superclass_name,
            })
        } else {
            None
        };

        self.consume(TokenKind::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            match self.function_declaration("method")? {
                Stmt::Function(function) => methods.push(function),
                _ => unreachable!("function_declaration always returns Stmt::Function"),
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after class body.")?;

        Ok(Stmt::Class {
            name,
            superclass,
            methods,
        })
    }

    fn function_declaration(&mut self, kind: &str) -> Result<Stmt, ParseError> {
        let name = self.consume(TokenKind::Identifier, &format!("Expect {} name.", kind))?;
        self.consume(TokenKind::LeftParen, &format!("Expect '(' after {} name.", kind))?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() >= 255 {
                    let token = self.peek();
                    return Err(ParseError::new("Cannot have more than 255 parameters.", token.line));
                }
                params.push(self.consume(TokenKind::Identifier, "Expect parameter name.")?);
                if !self.matches(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')' after parameters.")?;

        self.consume(TokenKind::LeftBrace, &format!("Expect '{{' before {} body.", kind))?;
        let body = self.block()?;

        Ok(Stmt::Function(Rc::new(FunctionStmt { name, params, body })))
    }

    fn var_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.")?;

        let initializer = if self.matches(&[TokenKind::Equal]) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var { name, initializer })
    }

    /// `statement -> exprStmt | forStmt | ifStmt | printStmt | returnStmt
    ///             | whileStmt | breakStmt | continueStmt | block`
    fn statement(&mut self) -> Result<Stmt, ParseError> {
        if self.matches(&[TokenKind::Print]) {
            return self.print_statement();
        }
        if self.matches(&[TokenKind::If]) {
            return self.if_statement();
        }
        if self.matches(&[TokenKind::While]) {
            return self.while_statement();
        }
        if self.matches(&[TokenKind::For]) {
            return self.for_statement();
        }
        if self.matches(&[TokenKind::Break]) {
            let token = self.previous();
            self.consume(TokenKind::Semicolon, "Expect ';' after 'break'.")?;
            return Ok(Stmt::Break(token));
        }
        if self.matches(&[TokenKind::Continue]) {
            let token = self.previous();
            self.consume(TokenKind::Semicolon, "Expect ';' after 'continue'.")?;
            return Ok(Stmt::Continue(token));
        }
        if self.matches(&[TokenKind::Return]) {
            return self.return_statement();
        }
        if self.matches(&[TokenKind::LeftBrace]) {
            return Ok(Stmt::Block(self.block()?));
        }

        self.expression_statement()
    }

    fn print_statement(&mut self) -> Result<Stmt, ParseError> {
        let mut arguments = vec![self.assignment()?];
        while self.matches(&[TokenKind::Comma]) {
            arguments.push(self.assignment()?);
        }
        self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(arguments))
    }

    fn if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.matches(&[TokenKind::Else]) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn while_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after while condition.")?;
        let body = Box::new(self.statement()?);
        Ok(Stmt::While { condition, body })
    }

    fn for_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if self.matches(&[TokenKind::Semicolon]) {
            None
        } else if self.matches(&[TokenKind::Var]) {
            Some(Box::new(self.var_declaration()?))
        } else {
            Some(Box::new(self.expression_statement()?))
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses.")?;

        let body = Box::new(self.statement()?);

        Ok(Stmt::For {
            initializer,
            condition,
            increment,
            body,
        })
    }

    fn return_statement(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.previous();
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return { keyword, value })
    }

    fn expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    pub(super) fn block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.declaration()?);
        }
        self.consume(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }
}
