/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * Interpreter Entry & Runtime Bootstrap
 * -------------------------------------
 * This module is the primary runtime entrypoint for the ClawScript
 * evaluator. It is responsible for:
 *
 *  - Creating the global execution environment
 *  - Installing the native globals (currently just `clock`)
 *  - Driving the top-level statement execution loop
 *  - Holding the resolver's variable-distance table and consulting it on
 *    every variable read/write
 *
 * All actual evaluation logic is delegated to the following submodules:
 *
 *  - statements.rs  -> statement execution (exec_stmt)
 *  - expressions.rs -> expression evaluation (eval_expr)
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
mod statements;

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{Expr, ExprId, Stmt};
use crate::callable::NativeFunction;
use crate::environment::{EnvRef, Environment};
use crate::error::RuntimeError;
use crate::value::Value;

/// Non-local control transfers a statement can produce, short of an error
/// (which is carried by the `Result` the statement/expression functions
/// return). Mirrors the "result sum" called out as the non-exception way to
/// model `break`/`continue`/`return` in a tree-walking evaluator.
#[derive(Debug)]
pub enum Signal {
    None,
    Break,
    Continue,
    Return(Value),
}

/// The tree-walking evaluator. Owns the global scope and the current
/// environment pointer, plus the resolver's distance table so variable
/// lookups can skip straight to the right frame instead of walking names.
pub struct Interpreter {
    pub globals: EnvRef,
    pub environment: EnvRef,
    locals: HashMap<ExprId, usize>,
}

impl Interpreter {
    pub fn new(locals: HashMap<ExprId, usize>) -> Self {
        let globals = Environment::new();
        globals.borrow_mut().define(
            "clock",
            Value::Callable(Rc::new(NativeFunction::clock())),
        );

        Self {
            environment: Rc::clone(&globals),
            globals,
            locals,
        }
    }

    /// Runs a full program: every top-level statement in order. A `break`,
    /// `continue`, or `return` reaching the top level is a resolver bug (the
    /// resolver rejects them statically), so it is treated as a no-op rather
    /// than surfaced to the caller.
    pub fn run(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in statements {
            statements::exec_stmt(self, stmt)?;
        }
        Ok(())
    }

    /// Executes `body` in a fresh child of `env`, restoring the previous
    /// environment afterward even if execution returns early or errors —
    /// the restoration is unconditional so a thrown error never leaves the
    /// interpreter pointed at a stale, already-exited scope.
    pub fn execute_block(&mut self, body: &[Stmt], env: EnvRef) -> Result<Signal, RuntimeError> {
        let previous = Rc::clone(&self.environment);
        self.environment = env;

        let result = (|| {
            for stmt in body {
                match statements::exec_stmt(self, stmt)? {
                    Signal::None => {}
                    signal => return Ok(signal),
                }
            }
            Ok(Signal::None)
        })();

        self.environment = previous;
        result
    }

    pub fn eval(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        expressions::eval_expr(self, expr)
    }

    fn distance(&self, id: ExprId) -> Option<usize> {
        self.locals.get(&id).copied()
    }

    /// Reads a variable, using the resolver's distance when one was
    /// recorded for `id` and falling back to a name-walk of the environment
    /// chain otherwise (globals are never given a distance).
    fn lookup_variable(&self, id: ExprId, name: &str, line: usize) -> Result<Value, RuntimeError> {
        match self.distance(id) {
            Some(distance) => Ok(Environment::get_at(&self.environment, distance, name)),
            None => self.globals.borrow().get(name, line),
        }
    }

    fn assign_variable(&mut self, id: ExprId, name: &str, value: Value, line: usize) -> Result<(), RuntimeError> {
        match self.distance(id) {
            Some(distance) => {
                Environment::assign_at(&self.environment, distance, name, value);
                Ok(())
            }
            None => self.globals.borrow_mut().assign(name, value, line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use crate::resolver::resolve;

    fn run_source(source: &str) -> Result<(), RuntimeError> {
        let tokens = tokenize(source).unwrap();
        let statements = parse(tokens).unwrap();
        let locals = resolve(&statements).unwrap();
        Interpreter::new(locals).run(&statements)
    }

    #[test]
    fn runs_a_trivial_program() {
        assert!(run_source("var a = 1; var b = 2; print a + b;").is_ok());
    }

    #[test]
    fn division_by_zero_is_a_runtime_error() {
        let err = run_source("print 1 / 0;").unwrap_err();
        assert!(matches!(err, RuntimeError::DivisionByZero { .. }));
    }

    #[test]
    fn strings_compare_lexicographically() {
        assert!(run_source(r#"print "a" < "b";"#).is_ok());
        let err = run_source(r#"print "a" < 1;"#).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeError { .. }));
    }

    #[test]
    fn continue_still_runs_the_for_loop_increment() {
        let source = "for (var i = 0; i < 3; i = i + 1) { if (i == 1) continue; print i; }";
        assert!(run_source(source).is_ok());
    }

    #[test]
    fn block_scoping_shadows_and_restores_the_outer_binding() {
        assert!(run_source("var a = 1; { var a = 2; print a; } print a;").is_ok());
    }

    #[test]
    fn calling_a_class_constructs_an_instance_with_dynamic_fields() {
        let source = r#"
            class Cat {}
            var cat = Cat();
            cat.name = "Mittens";
            print cat.name;
        "#;
        assert!(run_source(source).is_ok());
    }

    #[test]
    fn reading_an_undefined_field_is_a_runtime_error() {
        let err = run_source("class Cat {} print Cat().name;").unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedProperty { .. }));
    }

    #[test]
    fn this_is_parsed_but_unimplemented_at_evaluation() {
        let err = run_source("print this;").unwrap_err();
        assert!(matches!(err, RuntimeError::Unimplemented { .. }));
    }

    #[test]
    fn ternary_and_comma_operators_evaluate() {
        assert!(run_source("print true ? 1 : 2;").is_ok());
        assert!(run_source("print (1, 2, 3);").is_ok());
    }

    #[test]
    fn closures_capture_their_defining_environment() {
        let source = r#"
            fun makeCounter() {
                var count = 0;
                fun counter() {
                    count = count + 1;
                    return count;
                }
                return counter;
            }
            var counter = makeCounter();
            print counter();
            print counter();
        "#;
        assert!(run_source(source).is_ok());
    }
}
