use crate::builtins::KURTESTOSIS_MODULE_NAME;
use crate::value::{Arguments, CallError, Callable, Module, Value};

/// The `kurtestosis` module, called by the wrapper script of every test.
pub(super) fn module() -> Module {
    Module::with_members(
        KURTESTOSIS_MODULE_NAME,
        [("test", Value::Callable(Callable::builtin("test", test)))],
    )
}

/// `test(plan, module, function_name)`: runs one test function of the module under test.
///
/// The function receives `plan` when it declares parameters.
fn test(arguments: &Arguments) -> Result<Value, CallError> {
    let [plan, module, function_name] =
        arguments.bind("test", ["plan", "module", "function_name"], 3)?;
    let plan = plan.unwrap_or_default();
    let module = module.unwrap_or_default();
    let function_name = function_name.unwrap_or_default();

    let Some(module) = module.as_module() else {
        return Err(CallError::invalid_arguments(
            "test",
            format!("`module` must be a module, got `{}`", module.type_name()),
        ));
    };

    let Some(function_name) = function_name.as_str() else {
        return Err(CallError::invalid_arguments(
            "test",
            format!(
                "`function_name` must be a string, got `{}`",
                function_name.type_name()
            ),
        ));
    };

    let function = module
        .get(function_name)
        .and_then(|member| member.as_callable().cloned())
        .ok_or_else(|| {
            CallError::failed(format!(
                "module `{}` has no test function `{function_name}`",
                module.name()
            ))
        })?;

    tracing::debug!("Calling test function '{function_name}'");

    let arguments = if function.parameters().is_empty() {
        Arguments::default()
    } else {
        Arguments::positional([plan])
    };

    function.call(&arguments)
}
