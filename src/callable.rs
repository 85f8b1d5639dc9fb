/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * File:      callable.rs
 * Purpose:   The uniform calling convention shared by user-defined
 *            functions, native built-ins, and classes (construction).
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

use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use crate::ast::FunctionStmt;
use crate::environment::{EnvRef, Environment};
use crate::error::RuntimeError;
use crate::interpreter::{Interpreter, Signal};
use crate::value::Value;

/// Anything that can appear on the left of a call expression: user-defined
/// functions, native built-ins, and classes (calling a class constructs an
/// instance, see [`crate::class::ClassObject`]).
pub trait Callable: fmt::Debug {
    fn arity(&self) -> usize;
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError>;
    fn name(&self) -> &str;
}

/// A user-defined function or method: its declaration plus the environment
/// that was live when the declaration was evaluated, i.e. its closure.
pub struct FunctionDef {
    declaration: Rc<FunctionStmt>,
    closure: EnvRef,
}

impl FunctionDef {
    pub fn new(declaration: Rc<FunctionStmt>, closure: EnvRef) -> Self {
        Self { declaration, closure }
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

impl Callable for FunctionDef {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        let call_env = Environment::with_enclosing(Rc::clone(&self.closure));

        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            call_env.borrow_mut().define(param.lexeme.clone(), argument);
        }

        match interpreter.execute_block(&self.declaration.body, call_env)? {
            Signal::Return(value) => Ok(value),
            _ => Ok(Value::Nil),
        }
    }

    fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }
}

/// A built-in function implemented in the host language rather than in
/// ClawScript. `clock` is the only one the evaluator registers; it needs no
/// interpreter access, so the function pointer only sees the argument list.
pub struct NativeFunction {
    name: &'static str,
    arity: usize,
    func: fn(&[Value]) -> Result<Value, RuntimeError>,
}

impl NativeFunction {
    pub fn new(
        name: &'static str,
        arity: usize,
        func: fn(&[Value]) -> Result<Value, RuntimeError>,
    ) -> Self {
        Self { name, arity, func }
    }

    /// `clock()` — seconds elapsed since the interpreter process started.
    /// The classic minimal native callable: proof that the call path works
    /// without the evaluator needing a broader standard library.
    pub fn clock() -> Self {
        Self::new("clock", 0, |_args| {
            let elapsed = PROCESS_START.with(|start| start.elapsed());
            Ok(Value::Number(elapsed.as_secs_f64()))
        })
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl Callable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, _interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        (self.func)(&arguments)
    }

    fn name(&self) -> &str {
        self.name
    }
}

thread_local! {
    /// Fixed on first access, so `clock()` measures elapsed wall time since
    /// the interpreter began running rather than since some arbitrary epoch.
    static PROCESS_START: Instant = Instant::now();
}
