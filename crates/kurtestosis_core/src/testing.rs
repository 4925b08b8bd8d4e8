//! An in-memory [`Engine`] for exercising the harness without an interpreter.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use kurtestosis_project::Project;
use regex::Regex;

use crate::builtins::{KURTESTOSIS_MODULE_NAME, Predeclared};
use crate::engine::{
    Engine, InterpretRequest, InterpretationError, Interpreted, ProvisioningError, Release,
};
use crate::value::{Arguments, Module, Value};

static IMPORT_MODULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+)\s*=\s*import_module\(\s*"([^"]+)"\s*\)"#)
        .expect("import regex is valid")
});

static HARNESS_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"kurtestosis\.test\(\s*plan\s*,\s*(\w+)\s*,\s*"([^"]+)"\s*\)"#)
        .expect("harness call regex is valid")
});

type ModuleFactory = Box<dyn Fn(&Predeclared) -> Module>;

/// Something the engine did, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Acquired { context: usize, temp_dir: Utf8PathBuf },
    Interpreted { context: usize },
    Released { context: usize },
}

/// The context handed out by [`ScriptedEngine`].
#[derive(Debug)]
pub struct ScriptedContext {
    id: usize,
    plan: Module,
}

impl ScriptedContext {
    pub const fn id(&self) -> usize {
        self.id
    }
}

/// Evaluates wrapper scripts against modules built in Rust.
///
/// Each module is registered under its import path (for example
/// `/lib/math_test.star`) as a factory receiving the harness built-ins of
/// the test function being run.
#[derive(Default)]
pub struct ScriptedEngine {
    modules: IndexMap<String, ModuleFactory>,
    events: Rc<RefCell<Vec<EngineEvent>>>,
    acquired: Cell<usize>,
    provisioning_limit: Option<usize>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_module(
        mut self,
        path: impl Into<String>,
        factory: impl Fn(&Predeclared) -> Module + 'static,
    ) -> Self {
        self.modules.insert(path.into(), Box::new(factory));
        self
    }

    /// Fails every acquisition after the first `limit` ones.
    #[must_use]
    pub const fn with_provisioning_limit(mut self, limit: usize) -> Self {
        self.provisioning_limit = Some(limit);
        self
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.borrow().clone()
    }

    fn record(&self, event: EngineEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl std::fmt::Debug for ScriptedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedEngine")
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .field("events", &self.events.borrow())
            .finish_non_exhaustive()
    }
}

impl Engine for ScriptedEngine {
    type Context = ScriptedContext;

    fn acquire_context(
        &self,
        temp_dir: &Utf8Path,
        _project: &Project,
    ) -> Result<(Self::Context, Release), ProvisioningError> {
        let id = self.acquired.get();

        if self.provisioning_limit.is_some_and(|limit| id >= limit) {
            return Err(ProvisioningError::new(format!(
                "failed to create the enclave database for context {id}"
            )));
        }

        self.acquired.set(id + 1);
        self.record(EngineEvent::Acquired {
            context: id,
            temp_dir: temp_dir.to_path_buf(),
        });

        let events = Rc::clone(&self.events);
        let release = Release::new(move || {
            events
                .borrow_mut()
                .push(EngineEvent::Released { context: id });
        });

        let context = ScriptedContext {
            id,
            plan: Module::new("plan"),
        };

        Ok((context, release))
    }

    fn interpret(
        &self,
        context: &mut Self::Context,
        predeclared: &Predeclared,
        request: &InterpretRequest,
    ) -> Result<Interpreted, InterpretationError> {
        self.record(EngineEvent::Interpreted {
            context: context.id,
        });

        let (binding, path) = IMPORT_MODULE
            .captures(&request.script)
            .map(|captures| (captures[1].to_string(), captures[2].to_string()))
            .ok_or_else(|| InterpretationError::Script("no module is imported".to_string()))?;

        let function_name = HARNESS_CALL
            .captures(&request.script)
            .filter(|captures| captures[1] == binding)
            .map(|captures| captures[2].to_string())
            .ok_or_else(|| {
                InterpretationError::Script(format!(
                    "`{}` does not call the test harness",
                    request.main_function_name
                ))
            })?;

        let factory = self.modules.get(&path).ok_or_else(|| {
            InterpretationError::Script(format!(
                "cannot load module `{path}` in package `{}`",
                request.package_id
            ))
        })?;

        let mut globals = IndexMap::from([("plan".to_string(), Value::Module(context.plan.clone()))]);
        predeclared.merge_into(&mut globals);

        let harness = globals
            .get(KURTESTOSIS_MODULE_NAME)
            .and_then(Value::as_module)
            .cloned()
            .ok_or_else(|| {
                InterpretationError::Script(format!("name `{KURTESTOSIS_MODULE_NAME}` is not defined"))
            })?;

        let module_under_test = factory(predeclared);

        let result = harness.call(
            "test",
            &Arguments::positional([
                Value::Module(context.plan.clone()),
                Value::Module(module_under_test),
                Value::String(function_name),
            ]),
        )?;

        Ok(Interpreted {
            result,
            facts: Vec::new(),
        })
    }
}
