//! Call interception for callable members of a module.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::value::{Arguments, CallError, Callable, CallableKind, Invocable, Module, Struct, Value};

/// One call routed through a [`MockProxy`].
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    args: Vec<Value>,
    kwargs: IndexMap<String, Value>,
}

impl CallRecord {
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub const fn kwargs(&self) -> &IndexMap<String, Value> {
        &self.kwargs
    }

    /// The record as seen by scripts: `struct(args = [...], kwargs = {...})`.
    pub fn to_value(&self) -> Value {
        Struct::new([
            ("args", Value::List(self.args.clone())),
            ("kwargs", Value::Dict(self.kwargs.clone())),
        ])
        .into()
    }
}

impl From<&Arguments> for CallRecord {
    fn from(arguments: &Arguments) -> Self {
        Self {
            args: arguments.args().to_vec(),
            kwargs: arguments.kwargs().clone(),
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<CallRecord>,
    return_values: Vec<Value>,
    stub: Option<Value>,
}

/// A recording proxy installed in place of a callable module member.
///
/// Every call through the proxy is recorded. When a stub is set the stub is
/// returned and the original callable is not invoked; otherwise the call is
/// delegated to the original callable and its result is recorded and returned
/// unchanged. A failing original call is propagated and leaves no return value.
#[derive(Debug, Clone)]
pub struct MockProxy {
    target: Module,
    method_name: String,
    original: Callable,
    proxy: Callable,
    state: Rc<RefCell<MockState>>,
}

impl MockProxy {
    /// Replaces `target.<method_name>` with a recording proxy.
    ///
    /// Mocking an already mocked member replaces it again. The newest proxy
    /// wins; the previous proxy becomes its original.
    pub fn install(target: &Value, method_name: &str) -> Result<Self, MockError> {
        let Value::Module(module) = target else {
            return Err(MockError::TargetNotMockable {
                type_name: target.type_name(),
            });
        };

        let member = module
            .get(method_name)
            .filter(|_| !method_name.is_empty())
            .ok_or_else(|| MockError::MemberNotFound {
                module: module.name().to_string(),
                member: method_name.to_string(),
            })?;

        let Value::Callable(original) = member else {
            return Err(MockError::TargetNotCallable {
                module: module.name().to_string(),
                member: method_name.to_string(),
                type_name: member.type_name(),
            });
        };

        let state = Rc::new(RefCell::new(MockState::default()));

        let proxy = Callable::new(Interceptor {
            original: original.clone(),
            state: Rc::clone(&state),
        });

        module.set(method_name, proxy.clone());

        tracing::debug!("Mocked '{method_name}' of module '{}'", module.name());

        Ok(Self {
            target: module.clone(),
            method_name: method_name.to_string(),
            original,
            proxy,
            state,
        })
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Every call made through the proxy, in call order.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.state.borrow().calls.clone()
    }

    /// Every value the proxy produced, in call order.
    pub fn return_values(&self) -> Vec<Value> {
        self.state.borrow().return_values.clone()
    }

    /// Sets the value returned by future calls, or resumes delegation with `None`.
    pub fn stub(&self, value: Option<Value>) {
        self.state.borrow_mut().stub = value;
    }

    /// The callable the proxy replaced.
    pub const fn original(&self) -> &Callable {
        &self.original
    }

    /// Puts the original callable back.
    ///
    /// Returns `false`, leaving the module untouched, when the member no
    /// longer holds this proxy.
    pub fn restore(&self) -> bool {
        let installed = self.target.get(&self.method_name).is_some_and(|member| {
            member
                .as_callable()
                .is_some_and(|callable| callable.ptr_eq(&self.proxy))
        });

        if installed {
            self.target
                .set(self.method_name.as_str(), self.original.clone());
        }

        installed
    }
}

struct Interceptor {
    original: Callable,
    state: Rc<RefCell<MockState>>,
}

impl Invocable for Interceptor {
    fn name(&self) -> &str {
        self.original.name()
    }

    fn kind(&self) -> CallableKind {
        CallableKind::Builtin
    }

    fn parameters(&self) -> &[String] {
        self.original.parameters()
    }

    fn invoke(&self, arguments: &Arguments) -> Result<Value, CallError> {
        let stub = {
            let mut state = self.state.borrow_mut();
            state.calls.push(CallRecord::from(arguments));
            state.stub.clone()
        };

        if let Some(value) = stub {
            self.state.borrow_mut().return_values.push(value.clone());
            return Ok(value);
        }

        // The original may call back into this proxy, so no borrow is held here.
        let value = self.original.call(arguments)?;

        self.state.borrow_mut().return_values.push(value.clone());

        Ok(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    #[error("mock target must be a module, got `{type_name}`")]
    TargetNotMockable { type_name: &'static str },

    #[error("module `{module}` has no member `{member}`")]
    MemberNotFound { module: String, member: String },

    #[error("member `{member}` of module `{module}` is not callable, got `{type_name}`")]
    TargetNotCallable {
        module: String,
        member: String,
        type_name: &'static str,
    },
}
