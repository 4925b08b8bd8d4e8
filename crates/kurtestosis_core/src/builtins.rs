//! Built-ins predeclared for test scripts.

use indexmap::IndexMap;

use crate::reporter::ErrorSink;
use crate::value::{Module, Value};

mod debug;
mod expect;
mod harness;
mod mock;

pub const EXPECT_MODULE_NAME: &str = "expect";
pub const MOCK_BUILTIN_NAME: &str = "mock";
pub const DEBUG_BUILTIN_NAME: &str = "debug";
pub const KURTESTOSIS_MODULE_NAME: &str = "kurtestosis";

/// The harness built-ins for one test function.
///
/// Assertion failures go to the [`ErrorSink`] of that function, which is the
/// only channel between a running script and its reporter.
#[derive(Debug, Clone)]
pub struct Predeclared {
    members: IndexMap<String, Value>,
    sink: ErrorSink,
}

impl Predeclared {
    /// `locator` names the test function in `debug` output.
    pub fn new(sink: ErrorSink, locator: impl Into<String>) -> Self {
        let members = IndexMap::from([
            (
                EXPECT_MODULE_NAME.to_string(),
                Value::Module(expect::module(&sink)),
            ),
            (
                MOCK_BUILTIN_NAME.to_string(),
                Value::Callable(mock::builtin()),
            ),
            (
                DEBUG_BUILTIN_NAME.to_string(),
                Value::Callable(debug::builtin(locator.into())),
            ),
            (
                KURTESTOSIS_MODULE_NAME.to_string(),
                Value::Module(harness::module()),
            ),
        ]);

        Self { members, sink }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }

    pub fn module(&self, name: &str) -> Option<Module> {
        self.get(name).and_then(Value::as_module).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub const fn sink(&self) -> &ErrorSink {
        &self.sink
    }

    /// Adds the harness built-ins to an interpreter's predeclared names.
    ///
    /// Harness names win over existing ones.
    pub fn merge_into(&self, predeclared: &mut IndexMap<String, Value>) {
        for (name, value) in &self.members {
            if predeclared.insert(name.clone(), value.clone()).is_some() {
                tracing::trace!("Predeclared '{name}' is shadowed by the harness");
            }
        }
    }
}

/// Text of a message argument: strings verbatim, anything else in repr form.
fn message_text(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), ToString::to_string)
}
