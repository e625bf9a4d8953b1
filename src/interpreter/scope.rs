use std::{cell::RefCell, rc::Rc};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    error::RuntimeErrorKind,
    interpreter::value::core::Value,
};

/// A namespace frame mapping names to values.
///
/// Each scope records which of its names were bound as function
/// parameters and holds a shared link to its parent. The parent chain is
/// acyclic and terminates at exactly one root (the global scope), which
/// has no parent and lives for the whole program run.
#[derive(Debug, Default)]
pub struct Scope {
    bindings:   FxHashMap<String, Value>,
    parameters: FxHashSet<String>,
    parent:     Option<ScopeRef>,
}

/// A shared, mutable handle to a [`Scope`].
///
/// Scopes are deliberately reference-counted: the lexical nesting chain
/// and any closure capturing a scope all hold the same allocation, and
/// the scope stays alive as long as any holder needs it: a closure's
/// defining scope outlives the block that created it. `Rc<RefCell<_>>`
/// rather than `Arc` because evaluation is strictly single-threaded.
#[derive(Debug, Clone, Default)]
pub struct ScopeRef(Rc<RefCell<Scope>>);

impl ScopeRef {
    /// Creates the root (global) scope.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a fresh child scope whose parent is `self`.
    ///
    /// ## Example
    /// ```
    /// use kestrel::interpreter::{scope::ScopeRef, value::core::Value};
    ///
    /// let root = ScopeRef::root();
    /// root.declare("x", Value::Integer(1), false);
    ///
    /// let child = root.child();
    /// assert_eq!(child.lookup("x"), Some(Value::Integer(1)));
    /// ```
    #[must_use]
    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(Scope { bindings:   FxHashMap::default(),
                                          parameters: FxHashSet::default(),
                                          parent:     Some(self.clone()), })))
    }

    /// The parent scope, if `self` is not the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.borrow().parent.clone()
    }

    /// Whether two handles refer to the same scope.
    #[must_use]
    pub fn same_scope(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Binds `name` directly in this scope, marking it as a parameter
    /// when `is_param` holds.
    ///
    /// Redeclaration rules are enforced by the statement executor, not
    /// here; `declare` overwrites unconditionally.
    pub fn declare(&self, name: &str, value: Value, is_param: bool) {
        let mut scope = self.0.borrow_mut();
        if is_param {
            scope.parameters.insert(name.to_string());
        }
        scope.bindings.insert(name.to_string(), value);
    }

    /// Whether this scope itself (ignoring ancestors) binds `name`.
    #[must_use]
    pub fn has_local(&self, name: &str) -> bool {
        self.0.borrow().bindings.contains_key(name)
    }

    /// Looks `name` up along the chain, nearest scope first.
    ///
    /// Returns `None` after walking to the root without finding it; the
    /// evaluator raises `UndefinedVariable` in that case.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.0.borrow().bindings.get(name) {
            return Some(value.clone());
        }
        self.parent().and_then(|parent| parent.lookup(name))
    }

    /// Whether `name` was bound as a parameter in this scope or any
    /// ancestor.
    #[must_use]
    pub fn is_parameter(&self, name: &str) -> bool {
        if self.0.borrow().parameters.contains(name) {
            return true;
        }
        self.parent().is_some_and(|parent| parent.is_parameter(name))
    }

    /// Mutates `name` in the nearest scope already containing it.
    ///
    /// ## Example
    /// ```
    /// use kestrel::interpreter::{scope::ScopeRef, value::core::Value};
    ///
    /// let root = ScopeRef::root();
    /// root.declare("x", Value::Integer(1), false);
    ///
    /// let child = root.child();
    /// child.reassign("x", Value::Integer(2)).unwrap();
    ///
    /// // The mutation landed in the root scope, not the child.
    /// assert!(!child.has_local("x"));
    /// assert_eq!(root.lookup("x"), Some(Value::Integer(2)));
    /// ```
    ///
    /// # Errors
    /// `UndeclaredAssignment` when no scope on the chain binds `name`.
    pub fn reassign(&self, name: &str, value: Value) -> Result<(), RuntimeErrorKind> {
        {
            let mut scope = self.0.borrow_mut();
            if scope.bindings.contains_key(name) {
                scope.bindings.insert(name.to_string(), value);
                return Ok(());
            }
        }
        match self.parent() {
            Some(parent) => parent.reassign(name, value),
            None => Err(RuntimeErrorKind::UndeclaredAssignment { name: name.to_string(), }),
        }
    }

    /// Walks up exactly `levels` parents and returns that scope.
    ///
    /// Used by explicit-parent references for both reads and writes,
    /// bypassing any shadowing by nearer declarations.
    ///
    /// # Errors
    /// `ScopeDepthExceeded` when fewer than `levels` ancestors exist.
    pub fn ancestor(&self, levels: usize, name: &str) -> Result<Self, RuntimeErrorKind> {
        let mut scope = self.clone();
        for _ in 0..levels {
            scope = scope.parent()
                         .ok_or_else(|| RuntimeErrorKind::ScopeDepthExceeded { name:
                                                                                   name.to_string(),
                                                                               levels })?;
        }
        Ok(scope)
    }

    /// Whether any scope from `self` up to, but not including, `target`
    /// binds `name`.
    ///
    /// Guards explicit-parent declarations: declaring into an ancestor is
    /// rejected while a nearer scope still shadows the name, so a single
    /// statement can never both keep a local shadow and redefine the
    /// ancestor binding.
    #[must_use]
    pub fn shadows_before(&self, target: &Self, name: &str) -> bool {
        let mut scope = self.clone();
        while !scope.same_scope(target) {
            if scope.has_local(name) {
                return true;
            }
            match scope.parent() {
                Some(parent) => scope = parent,
                None => return false,
            }
        }
        false
    }
}
