/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * File:      class.rs
 * Purpose:   Class values and the instances calling them produces.
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

/// A class value. Per the evaluator's current scope, a class carries only a
/// name: no method table and no superclass link, even though the parser
/// accepts both in the declaration syntax (see [`crate::ast::Stmt::Class`]).
///
/// Calling a class is handled directly by the interpreter's call-expression
/// evaluation rather than through the [`crate::callable::Callable`] trait:
/// constructing an [`Instance`] needs the class's own `Rc` handle (so every
/// instance shares identity with the class that made it), which a `&self`
/// receiver on a trait object cannot recover.
#[derive(Debug)]
pub struct ClassObject {
    pub name: String,
}

impl ClassObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// A fieldless class takes no constructor arguments.
    pub fn arity(&self) -> usize {
        0
    }
}

/// An object constructed from a class: a class reference plus an open field
/// map. Fields are assigned dynamically by `set` expressions; there is no
/// declared field list to pre-populate.
#[derive(Debug)]
pub struct Instance {
    pub class: Rc<ClassObject>,
    fields: RefCell<HashMap<String, Value>>,
}

impl Instance {
    pub fn new(class: Rc<ClassObject>) -> Self {
        Self {
            class,
            fields: RefCell::new(HashMap::new()),
        }
    }

    pub fn get(&self, name: &str, line: usize) -> Result<Value, RuntimeError> {
        self.fields
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedProperty {
                name: name.to_string(),
                line,
            })
    }

    pub fn set(&self, name: &str, value: Value) {
        self.fields.borrow_mut().insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_field_is_a_runtime_error() {
        let instance = Instance::new(Rc::new(ClassObject::new("Cat")));
        let err = instance.get("name", 4).unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedProperty { line: 4, .. }));
    }

    #[test]
    fn set_then_get_round_trips() {
        let instance = Instance::new(Rc::new(ClassObject::new("Cat")));
        instance.set("name", Value::string("Mittens"));
        let value = instance.get("name", 1).unwrap();
        assert_eq!(value.stringify(), "Mittens");
    }
}
