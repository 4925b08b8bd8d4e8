use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::value::{Arguments, CallError, Value};

/// A shared handle to a named namespace of members.
///
/// Clones alias the same member registry: a member replaced through one
/// handle is visible through every other.
#[derive(Clone)]
pub struct Module {
    inner: Rc<ModuleInner>,
}

struct ModuleInner {
    name: String,
    members: RefCell<IndexMap<String, Value>>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_members(name, std::iter::empty::<(String, Value)>())
    }

    pub fn with_members<K: Into<String>>(
        name: impl Into<String>,
        members: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        Self {
            inner: Rc::new(ModuleInner {
                name: name.into(),
                members: RefCell::new(
                    members
                        .into_iter()
                        .map(|(name, value)| (name.into(), value))
                        .collect(),
                ),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn get(&self, member: &str) -> Option<Value> {
        self.inner.members.borrow().get(member).cloned()
    }

    pub fn contains(&self, member: &str) -> bool {
        self.inner.members.borrow().contains_key(member)
    }

    /// Sets `member`, returning the value it replaced.
    pub fn set(&self, member: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.inner
            .members
            .borrow_mut()
            .insert(member.into(), value.into())
    }

    pub fn member_names(&self) -> Vec<String> {
        self.inner.members.borrow().keys().cloned().collect()
    }

    /// Calls the callable stored under `member`.
    pub fn call(&self, member: &str, arguments: &Arguments) -> Result<Value, CallError> {
        let value = self.get(member).ok_or_else(|| {
            CallError::failed(format!("module `{}` has no member `{member}`", self.name()))
        })?;

        let Value::Callable(callable) = value else {
            return Err(CallError::failed(format!(
                "member `{member}` of module `{}` is not callable, got `{}`",
                self.name(),
                value.type_name()
            )));
        };

        callable.call(arguments)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn downgrade(&self) -> WeakModule {
        WeakModule {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.inner.name)
            .field("members", &self.member_names())
            .finish()
    }
}

/// A non-owning [`Module`] handle, for members that refer back to their module.
#[derive(Clone)]
pub struct WeakModule {
    inner: Weak<ModuleInner>,
}

impl WeakModule {
    pub fn upgrade(&self) -> Option<Module> {
        self.inner.upgrade().map(|inner| Module { inner })
    }
}

impl fmt::Debug for WeakModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakModule").finish_non_exhaustive()
    }
}
