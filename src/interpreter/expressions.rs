/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * Expression Evaluator
 * ---------------------
 * Reduces every expression form in [`crate::ast::Expr`] to a [`Value`].
 * Call dispatch (function vs. class vs. non-callable) lives here too,
 * rather than in its own module, since it is a single match arm wide.
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

use std::cmp::Ordering;
use std::rc::Rc;

use crate::ast::Expr;
use crate::class::Instance;
use crate::error::RuntimeError;
use crate::token::TokenKind;
use crate::value::Value;

use super::Interpreter;

pub fn eval_expr(interpreter: &mut Interpreter, expr: &Expr) -> Result<Value, RuntimeError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),

        Expr::Grouping(inner) => eval_expr(interpreter, inner),

        Expr::Variable { id, name } => interpreter.lookup_variable(*id, &name.lexeme, name.line),

        Expr::Assign { id, name, value } => {
            let value = eval_expr(interpreter, value)?;
            interpreter.assign_variable(*id, &name.lexeme, value.clone(), name.line)?;
            Ok(value)
        }

        Expr::Unary { operator, right } => {
            let right = eval_expr(interpreter, right)?;
            match operator.kind {
                TokenKind::Minus => Ok(Value::Number(-expect_number(&right, operator.line)?)),
                TokenKind::Bang => Ok(Value::Bool(!right.is_truthy())),
                _ => unreachable!("unary operator token kind not produced by the parser"),
            }
        }

        Expr::Binary { left, operator, right } => {
            let left = eval_expr(interpreter, left)?;
            let right = eval_expr(interpreter, right)?;
            eval_binary(operator.kind, &left, &right, operator.line)
        }

        Expr::Logical { left, operator, right } => {
            let left = eval_expr(interpreter, left)?;
            match operator.kind {
                TokenKind::Or if left.is_truthy() => Ok(left),
                TokenKind::And if !left.is_truthy() => Ok(left),
                _ => eval_expr(interpreter, right),
            }
        }

        Expr::Ternary {
            condition,
            then_branch,
            else_branch,
        } => {
            if eval_expr(interpreter, condition)?.is_truthy() {
                eval_expr(interpreter, then_branch)
            } else {
                eval_expr(interpreter, else_branch)
            }
        }

        Expr::Call { callee, paren, arguments } => {
            let callee_value = eval_expr(interpreter, callee)?;

            let mut args = Vec::with_capacity(arguments.len());
            for argument in arguments {
                args.push(eval_expr(interpreter, argument)?);
            }

            call_value(interpreter, callee_value, args, paren.line)
        }

        Expr::Get { object, name } => match eval_expr(interpreter, object)? {
            Value::Instance(instance) => instance.get(&name.lexeme, name.line),
            other => Err(RuntimeError::TypeError {
                message: format!("Only instances have properties, got {}.", other.type_name()),
                line: name.line,
            }),
        },

        Expr::Set { object, name, value } => match eval_expr(interpreter, object)? {
            Value::Instance(instance) => {
                let value = eval_expr(interpreter, value)?;
                instance.set(&name.lexeme, value.clone());
                Ok(value)
            }
            other => Err(RuntimeError::TypeError {
                message: format!("Only instances have fields, got {}.", other.type_name()),
                line: name.line,
            }),
        },

        Expr::This { keyword, .. } => Err(unimplemented_node("this", keyword.line)),
        Expr::Super { keyword, .. } => Err(unimplemented_node("super", keyword.line)),
        Expr::Array { bracket, .. } => Err(unimplemented_node("array literals", bracket.line)),
        Expr::ArrayGet { bracket, .. } => Err(unimplemented_node("array indexing", bracket.line)),
        Expr::ArraySet { bracket, .. } => Err(unimplemented_node("array indexing", bracket.line)),
    }
}

fn call_value(
    interpreter: &mut Interpreter,
    callee: Value,
    arguments: Vec<Value>,
    line: usize,
) -> Result<Value, RuntimeError> {
    match callee {
        Value::Callable(callable) => {
            if arguments.len() != callable.arity() {
                return Err(RuntimeError::ArityError {
                    message: format!(
                        "Expected {} argument(s) but got {}.",
                        callable.arity(),
                        arguments.len()
                    ),
                    line,
                });
            }
            callable.call(interpreter, arguments)
        }

        // Calling a class constructs an instance directly: this needs the
        // class's own `Rc` handle so every instance shares identity with
        // the class that made it, which the `Callable` trait's `&self`
        // receiver cannot hand back.
        Value::Class(class) => {
            if !arguments.is_empty() {
                return Err(RuntimeError::ArityError {
                    message: format!("Expected 0 argument(s) but got {}.", arguments.len()),
                    line,
                });
            }
            Ok(Value::Instance(Rc::new(Instance::new(class))))
        }

        other => Err(RuntimeError::TypeError {
            message: format!("Can only call functions and classes, got {}.", other.type_name()),
            line,
        }),
    }
}

fn eval_binary(operator: TokenKind, left: &Value, right: &Value, line: usize) -> Result<Value, RuntimeError> {
    match operator {
        TokenKind::Plus => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(a), Value::String(b)) => Ok(Value::string(format!("{}{}", a, b))),
            _ => Err(RuntimeError::TypeError {
                message: "Operands must be two numbers or two strings.".to_string(),
                line,
            }),
        },
        TokenKind::Minus => Ok(Value::Number(expect_number(left, line)? - expect_number(right, line)?)),
        TokenKind::Star => Ok(Value::Number(expect_number(left, line)? * expect_number(right, line)?)),
        TokenKind::Slash => {
            let divisor = expect_number(right, line)?;
            if divisor == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Ok(Value::Number(expect_number(left, line)? / divisor))
        }
        TokenKind::Greater => compare(left, right, line, |o| o == Ordering::Greater),
        TokenKind::GreaterEqual => compare(left, right, line, |o| o != Ordering::Less),
        TokenKind::Less => compare(left, right, line, |o| o == Ordering::Less),
        TokenKind::LessEqual => compare(left, right, line, |o| o != Ordering::Greater),
        TokenKind::EqualEqual => Ok(Value::Bool(left.is_equal(right))),
        TokenKind::BangEqual => Ok(Value::Bool(!left.is_equal(right))),
        // The comma operator: both operands are already evaluated by the
        // caller before dispatch reaches here, so all that is left is to
        // discard the left value and yield the right.
        TokenKind::Comma => Ok(right.clone()),
        _ => unreachable!("binary operator token kind not produced by the parser"),
    }
}

/// `<`, `<=`, `>`, `>=` accept two numbers or two strings (compared
/// lexicographically); mixed or other variants are a `TypeError`.
fn compare(left: &Value, right: &Value, line: usize, accept: impl Fn(Ordering) -> bool) -> Result<Value, RuntimeError> {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.as_ref().cmp(b.as_ref())),
        _ => None,
    };

    match ordering {
        Some(ordering) => Ok(Value::Bool(accept(ordering))),
        None => Err(RuntimeError::TypeError {
            message: "Operands must be two numbers or two strings.".to_string(),
            line,
        }),
    }
}

fn expect_number(value: &Value, line: usize) -> Result<f64, RuntimeError> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(RuntimeError::TypeError {
            message: format!("Operand must be a number, got {}.", other.type_name()),
            line,
        }),
    }
}

fn unimplemented_node(what: &str, line: usize) -> RuntimeError {
    RuntimeError::Unimplemented {
        message: format!("{} are not supported by this evaluator.", what),
        line,
    }
}
