// ABOUTME: Environment module managing symbol bindings and the parent lookup chain

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

pub type EnvRef = Rc<RefCell<Env>>;

/// A symbol-to-value map with an optional parent. Lookup walks the chain;
/// the nearest binding wins. The parent link is weak: a lambda's captured
/// environment is reparented to the caller on every call and must never own
/// the environment it points at.
#[derive(Debug, Default)]
pub struct Env {
    bindings: HashMap<String, Value>,
    parent: Option<Weak<RefCell<Env>>>,
}

impl Env {
    /// Creates an environment with no parent: the root environment, or the
    /// captured environment of a fresh lambda.
    pub fn new() -> EnvRef {
        Rc::new(RefCell::new(Env::default()))
    }

    /// Creates a child environment whose lookups fall through to `parent`.
    pub fn with_parent(parent: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Env {
            bindings: HashMap::new(),
            parent: Some(Rc::downgrade(parent)),
        }))
    }

    /// Looks a name up here and then along the parent chain, returning a
    /// copy of the first binding found.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.parent
            .as_ref()
            .and_then(Weak::upgrade)
            .and_then(|parent| parent.borrow().get(name))
    }

    /// Binds a name locally, replacing any existing local binding.
    pub fn put(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Binds a name in the topmost ancestor of `env`: the global scope.
    pub fn def(env: &EnvRef, name: impl Into<String>, value: Value) {
        let mut current = env.clone();
        loop {
            let parent = current.borrow().parent.as_ref().and_then(Weak::upgrade);
            match parent {
                Some(p) => current = p,
                None => break,
            }
        }
        current.borrow_mut().put(name, value);
    }

    /// Points `env`'s lookups at `parent`; installed on every call for the
    /// duration of a lambda body. A stale link from a previous call is
    /// overwritten here before it could ever be traversed.
    pub fn set_parent(env: &EnvRef, parent: &EnvRef) {
        env.borrow_mut().parent = Some(Rc::downgrade(parent));
    }

    /// Deep-copies an environment's bindings. The parent link is shared,
    /// not copied, matching ownership: environments own bindings, never
    /// their parents.
    pub fn duplicate(env: &EnvRef) -> EnvRef {
        let inner = env.borrow();
        Rc::new(RefCell::new(Env {
            bindings: inner.bindings.clone(),
            parent: inner.parent.clone(),
        }))
    }
}
