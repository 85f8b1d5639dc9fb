/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * File:      environment.rs
 * Purpose:   Lexical scope frames: a chain of name -> value maps, plus the
 *            distance-indexed accessors the resolver's static analysis
 *            makes possible.
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

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::value::Value;

/// Shared handle to an [`Environment`]. Closures and blocks clone this
/// handle rather than the environment itself, so a function created inside
/// a scope keeps that scope alive for as long as the function value lives.
pub type EnvRef = Rc<RefCell<Environment>>;

/// A single lexical scope frame.
///
/// `enclosing` forms the static scope chain used by [`Environment::get`] and
/// [`Environment::assign`] (name-walking, used for globals and any lookup
/// the resolver didn't annotate with a distance). [`Environment::get_at`]
/// and [`Environment::assign_at`] instead jump directly `distance` frames up
/// the chain, per the resolver's precomputed analysis.
pub struct Environment {
    values: HashMap<String, Value>,
    pub enclosing: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> EnvRef {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            enclosing: None,
        }))
    }

    pub fn with_enclosing(enclosing: EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }))
    }

    /// Binds `name` in this frame. Re-declaring an existing name in the same
    /// frame silently overwrites it — ClawScript allows shadowing within a
    /// single block, matching the resolver's declare/define handling.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Walks the enclosing chain by name. Used only for globals and for any
    /// variable the resolver could not statically bind (there are none in a
    /// well-formed program, but a dynamically-added global still needs this
    /// path).
    pub fn get(&self, name: &str, line: usize) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name, line);
        }

        Err(RuntimeError::UndefinedVariable {
            name: name.to_string(),
            line,
        })
    }

    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> Result<(), RuntimeError> {
        if self.values.contains_key(name) {
            self.values.insert(name.to_string(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value, line);
        }

        Err(RuntimeError::UndefinedVariable {
            name: name.to_string(),
            line,
        })
    }

    /// Reads `name` from the frame exactly `distance` enclosing-links above
    /// this one, per the resolver's precomputed distance. Panics if the
    /// chain is shorter than `distance` or the name is absent there, both of
    /// which would mean the resolver and the environment chain disagree —
    /// an invariant violation, not a user-facing runtime error.
    pub fn get_at(env: &EnvRef, distance: usize, name: &str) -> Value {
        Self::ancestor(env, distance)
            .borrow()
            .values
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("resolver distance mismatch reading '{}'", name))
    }

    pub fn assign_at(env: &EnvRef, distance: usize, name: &str, value: Value) {
        Self::ancestor(env, distance)
            .borrow_mut()
            .values
            .insert(name.to_string(), value);
    }

    fn ancestor(env: &EnvRef, distance: usize) -> EnvRef {
        let mut current = Rc::clone(env);
        for _ in 0..distance {
            let next = current
                .borrow()
                .enclosing
                .clone()
                .unwrap_or_else(|| panic!("resolver distance mismatch walking scope chain"));
            current = next;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defines_and_reads_in_same_frame() {
        let env = Environment::new();
        env.borrow_mut().define("a", Value::Number(1.0));
        assert!(matches!(env.borrow().get("a", 1), Ok(Value::Number(n)) if n == 1.0));
    }

    #[test]
    fn reads_through_enclosing_chain() {
        let global = Environment::new();
        global.borrow_mut().define("a", Value::Number(7.0));
        let inner = Environment::with_enclosing(Rc::clone(&global));
        assert!(matches!(inner.borrow().get("a", 1), Ok(Value::Number(n)) if n == 7.0));
    }

    #[test]
    fn assign_fails_for_undefined_variable() {
        let env = Environment::new();
        let err = env.borrow_mut().assign("missing", Value::Nil, 3).unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedVariable { line: 3, .. }));
    }

    #[test]
    fn get_at_and_assign_at_skip_straight_to_the_right_frame() {
        let global = Environment::new();
        global.borrow_mut().define("a", Value::Number(1.0));
        let middle = Environment::with_enclosing(Rc::clone(&global));
        let inner = Environment::with_enclosing(Rc::clone(&middle));

        Environment::assign_at(&inner, 1, "a", Value::Number(2.0));
        // unchanged in global (distance 2), only middle's copy would be hit,
        // but "a" isn't defined in middle -- assign_at always writes into
        // the target frame regardless of prior definition there.
        assert!(matches!(
            Environment::get_at(&inner, 1, "a"),
            Value::Number(n) if n == 2.0
        ));
    }
}
