use std::fmt;
use std::rc::Rc;

use crate::value::{Arguments, CallError, Value};

type HostFunction = dyn Fn(&Arguments) -> Result<Value, CallError>;

/// Something the scripting runtime can call with positional and keyword arguments.
pub trait Invocable {
    fn name(&self) -> &str;

    fn kind(&self) -> CallableKind;

    /// Declared parameter names, when known.
    fn parameters(&self) -> &[String] {
        &[]
    }

    fn invoke(&self, arguments: &Arguments) -> Result<Value, CallError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableKind {
    /// Implemented by the host.
    Builtin,

    /// Defined in a script.
    Function,
}

/// A type-erased, shared handle to an [`Invocable`].
#[derive(Clone)]
pub struct Callable(Rc<dyn Invocable>);

impl Callable {
    pub fn new(invocable: impl Invocable + 'static) -> Self {
        Self(Rc::new(invocable))
    }

    pub fn builtin(
        name: impl Into<String>,
        function: impl Fn(&Arguments) -> Result<Value, CallError> + 'static,
    ) -> Self {
        Self::new(Builtin::new(name, function))
    }

    pub fn function<P: Into<String>>(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = P>,
        body: impl Fn(&Arguments) -> Result<Value, CallError> + 'static,
    ) -> Self {
        Self::new(Function::new(name, parameters, body))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn kind(&self) -> CallableKind {
        self.0.kind()
    }

    pub fn parameters(&self) -> &[String] {
        self.0.parameters()
    }

    pub fn call(&self, arguments: &Arguments) -> Result<Value, CallError> {
        tracing::trace!("Calling '{}' with {arguments}", self.name());
        self.0.invoke(arguments)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            CallableKind::Builtin => write!(f, "<built-in function {}>", self.name()),
            CallableKind::Function => write!(f, "<function {}>", self.name()),
        }
    }
}

/// A callable implemented by a host closure.
pub struct Builtin {
    name: String,
    function: Box<HostFunction>,
}

impl Builtin {
    pub fn new(
        name: impl Into<String>,
        function: impl Fn(&Arguments) -> Result<Value, CallError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            function: Box::new(function),
        }
    }
}

impl Invocable for Builtin {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> CallableKind {
        CallableKind::Builtin
    }

    fn invoke(&self, arguments: &Arguments) -> Result<Value, CallError> {
        (self.function)(arguments)
    }
}

/// A function defined in a script, as handed over by the interpreter.
pub struct Function {
    name: String,
    parameters: Vec<String>,
    body: Box<HostFunction>,
}

impl Function {
    pub fn new<P: Into<String>>(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = P>,
        body: impl Fn(&Arguments) -> Result<Value, CallError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
            body: Box::new(body),
        }
    }
}

impl Invocable for Function {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> CallableKind {
        CallableKind::Function
    }

    fn parameters(&self) -> &[String] {
        &self.parameters
    }

    fn invoke(&self, arguments: &Arguments) -> Result<Value, CallError> {
        if arguments.args().len() > self.parameters.len() {
            return Err(CallError::invalid_arguments(
                &self.name,
                format!(
                    "accepts at most {} positional argument(s) ({} given)",
                    self.parameters.len(),
                    arguments.args().len()
                ),
            ));
        }

        (self.body)(arguments)
    }
}
