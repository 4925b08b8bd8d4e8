use kurtestosis_collector::TestFunction;

use crate::engine::MAIN_FUNCTION_NAME;

/// Builds the script that runs `function` through the `kurtestosis.test` helper.
///
/// The module under test is imported by its package-absolute path.
pub fn wrap_test_function(function: &TestFunction) -> String {
    format!(
        r#"sut = import_module("/{path}")

def {MAIN_FUNCTION_NAME}(plan):
    return kurtestosis.test(plan, sut, "{name}")
"#,
        path = function.file().path(),
        name = function.name(),
    )
}
