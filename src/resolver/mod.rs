/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * File:      resolver/mod.rs
 * Purpose:   A static pass between parsing and evaluation that assigns each
 *            variable reference a lexical distance, and rejects a handful
 *            of programs that are syntactically valid but never correct:
 *            a variable used in its own initializer, `break`/`continue`
 *            outside any loop.
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

use std::collections::HashMap;

use crate::ast::{Expr, ExprId, Stmt};
use crate::error::ResolveError;

/// Scopes are stored explicitly as a stack of maps, one per lexical block,
/// mirroring the interpreter's own environment chain. The global scope is
/// never pushed here: a name the stack doesn't resolve is assumed global
/// and left unannotated, exactly as the interpreter's name-walking fallback
/// expects.
pub struct Resolver {
    scopes: Vec<HashMap<String, bool>>,
    locals: HashMap<ExprId, usize>,
    loop_depth: usize,
    errors: Vec<ResolveError>,
}

/// Resolves `statements` and returns the distance map the interpreter
/// consults for every `Variable`/`Assign`/`This`/`Super` node, or every
/// static error collected along the way.
pub fn resolve(statements: &[Stmt]) -> Result<HashMap<ExprId, usize>, Vec<ResolveError>> {
    let mut resolver = Resolver {
        scopes: Vec::new(),
        locals: HashMap::new(),
        loop_depth: 0,
        errors: Vec::new(),
    };

    resolver.resolve_stmts(statements);

    if resolver.errors.is_empty() {
        Ok(resolver.locals)
    } else {
        Err(resolver.errors)
    }
}

impl Resolver {
    fn resolve_stmts(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.resolve_stmt(stmt);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) => self.resolve_expr(expr),

            Stmt::Print(arguments) => {
                for argument in arguments {
                    self.resolve_expr(argument);
                }
            }

            Stmt::Var { name, initializer } => {
                self.declare(&name.lexeme, name.line);
                if let Some(initializer) = initializer {
                    self.resolve_expr(initializer);
                }
                self.define(&name.lexeme);
            }

            Stmt::Block(body) => {
                self.begin_scope();
                self.resolve_stmts(body);
                self.end_scope();
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }

            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.loop_depth += 1;
                self.resolve_stmt(body);
                self.loop_depth -= 1;
            }

            Stmt::For {
                initializer,
                condition,
                increment,
                body,
            } => {
                if let Some(initializer) = initializer {
                    self.resolve_stmt(initializer);
                }
                if let Some(condition) = condition {
                    self.resolve_expr(condition);
                }
                if let Some(increment) = increment {
                    self.resolve_expr(increment);
                }
                self.loop_depth += 1;
                self.resolve_stmt(body);
                self.loop_depth -= 1;
            }

            Stmt::Break(token) => {
                if self.loop_depth == 0 {
                    self.errors.push(ResolveError::new(
                        "Cannot use 'break' outside of a loop.",
                        token.line,
                    ));
                }
            }

            Stmt::Continue(token) => {
                if self.loop_depth == 0 {
                    self.errors.push(ResolveError::new(
                        "Cannot use 'continue' outside of a loop.",
                        token.line,
                    ));
                }
            }

            Stmt::Return { value, .. } => {
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }

            Stmt::Function(declaration) => {
                self.declare(&declaration.name.lexeme, declaration.name.line);
                self.define(&declaration.name.lexeme);
                self.resolve_function(&declaration.params, &declaration.body);
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => {
                self.declare(&name.lexeme, name.line);
                self.define(&name.lexeme);

                if let Some(superclass) = superclass {
                    self.resolve_expr(superclass);
                }

                for method in methods {
                    self.resolve_function(&method.params, &method.body);
                }
            }
        }
    }

    fn resolve_function(&mut self, params: &[crate::token::Token], body: &[Stmt]) {
        self.begin_scope();
        for param in params {
            self.declare(&param.lexeme, param.line);
            self.define(&param.lexeme);
        }
        self.resolve_stmts(body);
        self.end_scope();
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => {}

            Expr::Grouping(inner) => self.resolve_expr(inner),

            Expr::Variable { id, name } => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&name.lexeme) == Some(&false) {
                        self.errors.push(ResolveError::new(
                            format!(
                                "Cannot read local variable '{}' in its own initializer.",
                                name.lexeme
                            ),
                            name.line,
                        ));
                    }
                }
                self.resolve_local(*id, &name.lexeme);
            }

            Expr::Assign { id, name, value } => {
                self.resolve_expr(value);
                self.resolve_local(*id, &name.lexeme);
            }

            Expr::Unary { right, .. } => self.resolve_expr(right),

            Expr::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }

            Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }

            Expr::Ternary {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_expr(then_branch);
                self.resolve_expr(else_branch);
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                self.resolve_expr(callee);
                for argument in arguments {
                    self.resolve_expr(argument);
                }
            }

            Expr::Get { object, .. } => self.resolve_expr(object),

            Expr::Set { object, value, .. } => {
                self.resolve_expr(object);
                self.resolve_expr(value);
            }

            Expr::This { id, .. } => self.resolve_local(*id, "this"),

            Expr::Super { id, .. } => self.resolve_local(*id, "super"),

            Expr::Array { elements, .. } => {
                for element in elements {
                    self.resolve_expr(element);
                }
            }

            Expr::ArrayGet { array, index, .. } => {
                self.resolve_expr(array);
                self.resolve_expr(index);
            }

            Expr::ArraySet {
                array, index, value, ..
            } => {
                self.resolve_expr(array);
                self.resolve_expr(index);
                self.resolve_expr(value);
            }
        }
    }

    /// Marks `name` as declared but not yet defined in the innermost scope,
    /// so a reference to it found before `define` runs is caught as a
    /// self-referencing initializer.
    fn declare(&mut self, name: &str, _line: usize) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), false);
        }
    }

    fn define(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), true);
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Walks the scope stack from innermost outward; the distance is how
    /// many scopes up from the current one the name was declared in. Not
    /// found here means it is assumed global and left unannotated.
    fn resolve_local(&mut self, id: ExprId, name: &str) {
        for (distance, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(name) {
                self.locals.insert(id, distance);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn resolve_source(source: &str) -> Result<HashMap<ExprId, usize>, Vec<ResolveError>> {
        let tokens = tokenize(source).unwrap();
        let statements = parse(tokens).unwrap();
        resolve(&statements)
    }

    #[test]
    fn rejects_self_referencing_initializer() {
        let errors = resolve_source("{ var a = a; }").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("own initializer"));
    }

    #[test]
    fn rejects_break_outside_loop() {
        let errors = resolve_source("break;").unwrap_err();
        assert!(errors[0].message.contains("'break'"));
    }

    #[test]
    fn rejects_continue_outside_loop() {
        let errors = resolve_source("continue;").unwrap_err();
        assert!(errors[0].message.contains("'continue'"));
    }

    #[test]
    fn allows_break_inside_while_loop() {
        assert!(resolve_source("while (true) { break; }").is_ok());
    }

    #[test]
    fn resolves_a_local_to_distance_zero() {
        let locals = resolve_source("{ var a = 1; print a; }").unwrap();
        assert_eq!(locals.values().next().copied(), Some(0));
    }
}
