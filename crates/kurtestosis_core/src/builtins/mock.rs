use crate::builtins::MOCK_BUILTIN_NAME;
use crate::mock::{CallRecord, MockProxy};
use crate::value::{Arguments, CallError, Callable, Module, Value};

/// `mock(target, method_name)`: installs a [`MockProxy`] and returns its handle.
pub(super) fn builtin() -> Callable {
    Callable::builtin(MOCK_BUILTIN_NAME, |arguments| {
        let [target, method_name] =
            arguments.bind(MOCK_BUILTIN_NAME, ["target", "method_name"], 2)?;
        let target = target.unwrap_or_default();
        let method_name = method_name.unwrap_or_default();

        let method_name = match method_name.as_str() {
            Some("") => {
                return Err(CallError::invalid_arguments(
                    MOCK_BUILTIN_NAME,
                    "`method_name` must not be empty",
                ));
            }
            Some(method_name) => method_name,
            None => {
                return Err(CallError::invalid_arguments(
                    MOCK_BUILTIN_NAME,
                    format!(
                        "`method_name` must be a string, got `{}`",
                        method_name.type_name()
                    ),
                ));
            }
        };

        let proxy = MockProxy::install(&target, method_name)?;

        Ok(Value::Module(handle(proxy)))
    })
}

/// The script-facing control handle of a mock, the module `mock[<method>]`.
fn handle(proxy: MockProxy) -> Module {
    let handle = Module::new(format!("mock[{}]", proxy.method_name()));

    handle.set(
        "calls",
        Callable::builtin("calls", {
            let proxy = proxy.clone();
            move |arguments| {
                arguments.bind("calls", [], 0)?;
                Ok(Value::List(
                    proxy.calls().iter().map(CallRecord::to_value).collect(),
                ))
            }
        }),
    );

    handle.set(
        "return_values",
        Callable::builtin("return_values", {
            let proxy = proxy.clone();
            move |arguments| {
                arguments.bind("return_values", [], 0)?;
                Ok(Value::List(proxy.return_values()))
            }
        }),
    );

    // A weak handle, the module owns this member.
    let weak = handle.downgrade();
    handle.set(
        "mock_return_value",
        Callable::builtin("mock_return_value", move |arguments: &Arguments| {
            let [value] = arguments.bind("mock_return_value", ["value"], 0)?;
            proxy.stub(value);
            weak.upgrade()
                .map(Value::Module)
                .ok_or_else(|| CallError::failed("mock handle is no longer available"))
        }),
    );

    handle
}
