use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::Token, value::core::Value},
};

/// Shared handle to a scope.
///
/// A scope is shared by the block or call executing in it and by every
/// closure declared in it, so it lives behind `Rc<RefCell<_>>`.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One node of the scope chain: a name to value mapping plus an optional link
/// to the enclosing scope.
///
/// A child never copies its parent's bindings; lookups and assignments walk
/// the chain outward.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    parent: Option<EnvRef>,
}

impl Environment {
    /// Creates a root scope with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scope nested inside `parent`, ready to share.
    #[must_use]
    pub fn child(parent: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Self { values: HashMap::new(),
                                    parent: Some(Rc::clone(parent)) }))
    }

    /// Wraps the scope in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Binds `name` in this scope, replacing any binding it already has here.
    ///
    /// Never touches enclosing scopes, so redeclaring a name shadows it.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Resolves `name` in the nearest scope that binds it.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned().or_else(|| {
                                           self.parent
                                               .as_ref()
                                               .and_then(|p| p.borrow().lookup(name))
                                       })
    }

    /// Reads the variable `name`.
    ///
    /// # Errors
    /// [`RuntimeError::UndefinedVariable`] if no scope in the chain binds it.
    pub fn get(&self, name: &Token) -> EvalResult<Value> {
        self.lookup(&name.lexeme)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone() })
    }

    /// Overwrites the nearest existing binding of `name`.
    ///
    /// Assignment never creates a binding.
    ///
    /// # Errors
    /// [`RuntimeError::UndefinedVariable`] if no scope in the chain binds it.
    pub fn assign(&mut self, name: &Token, value: Value) -> EvalResult<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(RuntimeError::UndefinedVariable { name: name.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::TokenKind;

    fn name(lexeme: &str) -> Token {
        Token::new(TokenKind::Identifier, lexeme, 1, 1)
    }

    #[test]
    fn define_always_targets_the_local_scope() {
        let root = Environment::new().into_ref();
        root.borrow_mut().define("x", Value::Number(1.0));
        let child = Environment::child(&root);
        child.borrow_mut().define("x", Value::Number(2.0));

        assert_eq!(child.borrow().get(&name("x")), Ok(Value::Number(2.0)));
        assert_eq!(root.borrow().get(&name("x")), Ok(Value::Number(1.0)));
    }

    #[test]
    fn assign_climbs_to_the_declaring_scope() {
        let root = Environment::new().into_ref();
        root.borrow_mut().define("x", Value::Number(1.0));
        let child = Environment::child(&root);
        child.borrow_mut().assign(&name("x"), Value::Number(5.0)).unwrap();

        assert_eq!(root.borrow().lookup("x"), Some(Value::Number(5.0)));
        assert_eq!(child.borrow().lookup("x"), Some(Value::Number(5.0)));
    }

    #[test]
    fn missing_names_fault_instead_of_being_created() {
        let root = Environment::new().into_ref();
        let child = Environment::child(&root);

        let error = child.borrow_mut().assign(&name("y"), Value::Nil).unwrap_err();
        assert_eq!(error.to_string(), "Undefined variable 'y'.");
        assert!(child.borrow().get(&name("y")).is_err());
        assert_eq!(root.borrow().lookup("y"), None);
    }
}
