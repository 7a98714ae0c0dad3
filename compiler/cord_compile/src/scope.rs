//! Persistent lexical scopes.
//!
//! A scope is an immutable binary search tree ordered by definition
//! name. Insertion copies the root-to-leaf path to the touched node and
//! shares every other subtree, so any number of older scopes stay valid
//! after an insert. That persistence is what definition snapshots rely
//! on: each binding captures the scope its body was compiled in, and
//! later definitions can never alter it.

use std::cmp::Ordering;
use std::rc::Rc;

use cord_eval::{Builtin, FnDef, Value};

/// What a name resolves to.
#[derive(Clone, Debug)]
pub enum Def {
    Builtin(Rc<Builtin>),
    Fn(Rc<FnDef>),
}

impl Def {
    pub fn name(&self) -> &str {
        match self {
            Def::Builtin(builtin) => builtin.name(),
            Def::Fn(fndef) => fndef.name(),
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Def::Builtin(builtin) => Value::Builtin(Rc::clone(builtin)),
            Def::Fn(fndef) => Value::Fn(Rc::clone(fndef)),
        }
    }
}

/// A definition plus the scope it was compiled in.
#[derive(Debug)]
pub struct Binding {
    def: Def,
    snapshot: Scope,
}

impl Binding {
    pub fn new(def: Def, snapshot: Scope) -> Self {
        Binding { def, snapshot }
    }

    pub fn name(&self) -> &str {
        self.def.name()
    }

    pub fn def(&self) -> &Def {
        &self.def
    }

    /// The scope visible to this definition's body.
    pub fn snapshot(&self) -> &Scope {
        &self.snapshot
    }

    pub fn value(&self) -> Value {
        self.def.value()
    }
}

#[derive(Debug)]
struct ScopeNode {
    binding: Rc<Binding>,
    left: Scope,
    right: Scope,
}

/// An immutable name-to-binding map. Cloning is one reference count.
#[derive(Clone, Debug, Default)]
pub struct Scope(Option<Rc<ScopeNode>>);

impl Scope {
    pub fn new() -> Self {
        Scope(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        let mut cur = self;
        while let Some(node) = cur.0.as_deref() {
            match name.cmp(node.binding.name()) {
                Ordering::Equal => return Some(&node.binding),
                Ordering::Less => cur = &node.left,
                Ordering::Greater => cur = &node.right,
            }
        }
        None
    }

    /// Produce a scope with `binding` added, replacing any binding of
    /// the same name. `self` is unchanged. Iterative path copy, so
    /// unbalanced trees cannot overflow the call stack.
    #[must_use]
    pub fn insert(&self, binding: Rc<Binding>) -> Scope {
        let mut path: Vec<(Rc<ScopeNode>, Ordering)> = Vec::new();
        let mut cur = self.clone();

        let leaf = loop {
            let Some(node) = cur.0.as_ref().map(Rc::clone) else {
                break ScopeNode { binding, left: Scope::new(), right: Scope::new() };
            };
            match binding.name().cmp(node.binding.name()) {
                Ordering::Equal => {
                    break ScopeNode {
                        binding,
                        left: node.left.clone(),
                        right: node.right.clone(),
                    };
                }
                ord @ Ordering::Less => {
                    cur = node.left.clone();
                    path.push((node, ord));
                }
                ord @ Ordering::Greater => {
                    cur = node.right.clone();
                    path.push((node, ord));
                }
            }
        };

        let mut rebuilt = Scope(Some(Rc::new(leaf)));
        for (node, ord) in path.into_iter().rev() {
            let next = match ord {
                Ordering::Less => ScopeNode {
                    binding: Rc::clone(&node.binding),
                    left: rebuilt,
                    right: node.right.clone(),
                },
                _ => ScopeNode {
                    binding: Rc::clone(&node.binding),
                    left: node.left.clone(),
                    right: rebuilt,
                },
            };
            rebuilt = Scope(Some(Rc::new(next)));
        }
        rebuilt
    }

    /// Bind a builtin, snapshotting the scope as it stands. Builtins
    /// registered later are not visible to bodies compiled against this
    /// binding's snapshot.
    #[must_use]
    pub fn with_builtin(&self, builtin: Rc<Builtin>) -> Scope {
        self.insert(Rc::new(Binding::new(Def::Builtin(builtin), self.clone())))
    }
}
