/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * Statement Executor
 * -------------------
 * Executes every statement form in [`crate::ast::Stmt`]. Does not evaluate
 * expressions itself (see expressions.rs) beyond the single expression a
 * statement directly carries (a condition, an initializer, ...).
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

use crate::ast::Stmt;
use crate::callable::FunctionDef;
use crate::class::ClassObject;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::value::Value;

use super::{Interpreter, Signal};

pub fn exec_stmt(interpreter: &mut Interpreter, stmt: &Stmt) -> Result<Signal, RuntimeError> {
    match stmt {
        Stmt::Expression(expr) => {
            interpreter.eval(expr)?;
            Ok(Signal::None)
        }

        Stmt::Print(arguments) => {
            for argument in arguments {
                let value = interpreter.eval(argument)?;
                print!("{} ", value.stringify());
            }
            println!();
            Ok(Signal::None)
        }

        Stmt::Var { name, initializer } => {
            let value = match initializer {
                Some(expr) => interpreter.eval(expr)?,
                None => Value::Nil,
            };
            interpreter
                .environment
                .borrow_mut()
                .define(name.lexeme.clone(), value);
            Ok(Signal::None)
        }

        Stmt::Block(body) => {
            let env = Environment::with_enclosing(Rc::clone(&interpreter.environment));
            interpreter.execute_block(body, env)
        }

        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            if interpreter.eval(condition)?.is_truthy() {
                exec_stmt(interpreter, then_branch)
            } else if let Some(else_branch) = else_branch {
                exec_stmt(interpreter, else_branch)
            } else {
                Ok(Signal::None)
            }
        }

        Stmt::While { condition, body } => {
            while interpreter.eval(condition)?.is_truthy() {
                match exec_stmt(interpreter, body)? {
                    Signal::None | Signal::Continue => {}
                    Signal::Break => break,
                    signal @ Signal::Return(_) => return Ok(signal),
                }
            }
            Ok(Signal::None)
        }

        Stmt::For {
            initializer,
            condition,
            increment,
            body,
        } => {
            if let Some(initializer) = initializer {
                exec_stmt(interpreter, initializer)?;
            }

            loop {
                if let Some(condition) = condition {
                    if !interpreter.eval(condition)?.is_truthy() {
                        break;
                    }
                }

                match exec_stmt(interpreter, body)? {
                    Signal::None | Signal::Continue => {}
                    Signal::Break => break,
                    signal @ Signal::Return(_) => return Ok(signal),
                }

                if let Some(increment) = increment {
                    interpreter.eval(increment)?;
                }
            }

            Ok(Signal::None)
        }

        Stmt::Break(_) => Ok(Signal::Break),
        Stmt::Continue(_) => Ok(Signal::Continue),

        Stmt::Return { value, .. } => {
            let value = match value {
                Some(expr) => interpreter.eval(expr)?,
                None => Value::Nil,
            };
            Ok(Signal::Return(value))
        }

        Stmt::Function(declaration) => {
            let function = FunctionDef::new(Rc::clone(declaration), Rc::clone(&interpreter.environment));
            interpreter.environment.borrow_mut().define(
                declaration.name.lexeme.clone(),
                Value::Callable(Rc::new(function)),
            );
            Ok(Signal::None)
        }

        Stmt::Class { name, .. } => {
            // Defined as `Nil` first and then assigned the real class value,
            // so a method body referencing the class by name resolves
            // against a slot that already exists by the time it runs.
            interpreter.environment.borrow_mut().define(name.lexeme.clone(), Value::Nil);
            let class = ClassObject::new(name.lexeme.clone());
            interpreter
                .environment
                .borrow_mut()
                .assign(&name.lexeme, Value::Class(Rc::new(class)), name.line)?;
            Ok(Signal::None)
        }
    }
}
