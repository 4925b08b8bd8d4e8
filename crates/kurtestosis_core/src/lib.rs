pub mod builtins;
pub mod engine;
pub mod mock;
pub mod reporter;
pub mod runner;
pub mod testing;
pub mod value;
mod wrapper;

#[cfg(test)]
mod test_utils;

pub use builtins::Predeclared;
pub use engine::{
    EMPTY_INPUT_ARGS, Engine, InterpretRequest, InterpretationError, Interpreted,
    MAIN_FUNCTION_NAME, NoEngine, ProvisioningError, Release,
};
pub use mock::{CallRecord, MockError, MockProxy};
pub use reporter::{
    DisplayReport, ErrorSink, FileReporter, FunctionReporter, ReportStats, ReportSummary,
    ReportedError, Reporter, ReporterBase, ReporterKind, SuiteReporter,
};
pub use runner::{
    RunError, TestSuiteConfig, TestSuiteRunner, run_test_file, run_test_function, run_test_suite,
};
pub use value::{Arguments, CallError, Callable, Module, Value};
pub use wrapper::wrap_test_function;
