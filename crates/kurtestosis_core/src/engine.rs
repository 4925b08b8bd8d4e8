//! The boundary with the external interpreter.

use std::error::Error;
use std::fmt;

use camino::Utf8Path;
use kurtestosis_collector::TestFunction;
use kurtestosis_project::{PackageReplaceOptions, Project};
use thiserror::Error;

use crate::builtins::Predeclared;
use crate::value::{CallError, Value};
use crate::wrapper::wrap_test_function;

/// The entry function of every wrapper script.
pub const MAIN_FUNCTION_NAME: &str = "run";

/// Serialized input arguments of every wrapper script: none.
pub const EMPTY_INPUT_ARGS: &str = "{}";

/// Entry path handed to the interpreter for the standalone wrapper script.
pub const STANDALONE_SCRIPT_PATH: &str = "__kurtestosis__.star";

/// An interpreter able to evaluate wrapper scripts in isolated contexts.
///
/// The harness acquires one context per test function and releases it before
/// acquiring the next.
pub trait Engine {
    /// Per-test-function interpretation state: value stores, content providers.
    type Context;

    fn acquire_context(
        &self,
        temp_dir: &Utf8Path,
        project: &Project,
    ) -> Result<(Self::Context, Release), ProvisioningError>;

    /// Evaluates the request with `predeclared` merged over the engine's own built-ins.
    fn interpret(
        &self,
        context: &mut Self::Context,
        predeclared: &Predeclared,
        request: &InterpretRequest,
    ) -> Result<Interpreted, InterpretationError>;
}

/// Releases an interpretation context.
///
/// Releasing is idempotent, and a guard that was never released explicitly
/// releases when dropped.
#[must_use = "dropping the guard releases the context immediately"]
pub struct Release {
    release: Option<Box<dyn FnOnce()>>,
}

impl Release {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A guard with nothing to release.
    pub fn noop() -> Self {
        Self { release: None }
    }

    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Release {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Release")
            .field("released", &self.release.is_none())
            .finish()
    }
}

/// Everything the interpreter needs to run one wrapper script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretRequest {
    pub package_id: String,
    pub main_function_name: String,
    pub package_replace_options: PackageReplaceOptions,
    pub entry_path: String,
    pub script: String,
    pub input_args: String,
}

impl InterpretRequest {
    pub fn for_test_function(function: &TestFunction) -> Self {
        let project = function.file().project();

        Self {
            package_id: project.package_name().to_string(),
            main_function_name: MAIN_FUNCTION_NAME.to_string(),
            package_replace_options: project.package_replace_options().clone(),
            entry_path: STANDALONE_SCRIPT_PATH.to_string(),
            script: wrap_test_function(function),
            input_args: EMPTY_INPUT_ARGS.to_string(),
        }
    }
}

/// The outcome of a successful interpretation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interpreted {
    /// The value returned by the entry function.
    pub result: Value,

    /// Descriptions of the instructions the script planned.
    pub facts: Vec<String>,
}

/// The interpretation context could not be set up. The harness is broken, not the test.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProvisioningError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl ProvisioningError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// The scripted test failed to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretationError {
    /// Rejected by the interpreter: syntax errors, unknown names, failed imports.
    #[error("{0}")]
    Script(String),

    #[error(transparent)]
    Call(#[from] CallError),
}

/// The engine linked into the stock binary: there is no interpreter to provision.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEngine;

impl Engine for NoEngine {
    type Context = ();

    fn acquire_context(
        &self,
        _temp_dir: &Utf8Path,
        _project: &Project,
    ) -> Result<(Self::Context, Release), ProvisioningError> {
        Err(ProvisioningError::new(
            "no Starlark interpreter is linked into this build of kurtestosis",
        ))
    }

    fn interpret(
        &self,
        _context: &mut Self::Context,
        _predeclared: &Predeclared,
        _request: &InterpretRequest,
    ) -> Result<Interpreted, InterpretationError> {
        Err(InterpretationError::Script(
            "no Starlark interpreter is linked into this build of kurtestosis".to_string(),
        ))
    }
}
