use kurtestosis_collector::GlobDiscovery;
use kurtestosis_core::testing::{EngineEvent, ScriptedEngine};
use kurtestosis_core::{
    Arguments, CallError, Callable, DisplayReport, Module, Predeclared, Reporter, RunError,
    TestSuiteConfig, TestSuiteRunner, Value,
};
use kurtestosis_system::OsSystem;
use kurtestosis_test::TestContext;
use pretty_assertions::assert_eq;

use crate::load_project;

const MATH_TEST: &str = r"
def test_add(plan):
    expect.eq(1 + 1, 2)

def test_remove(plan):
    expect.eq(2 - 1, 2)
";

/// Mirrors `MATH_TEST`: one passing and one failing assertion.
fn math_test(predeclared: &Predeclared) -> Module {
    let expect = predeclared.module("expect").unwrap();

    let check = move |left: i64, right: i64| {
        let expect = expect.clone();
        move |_: &Arguments| {
            expect.call("eq", &Arguments::positional([Value::Int(left), Value::Int(right)]))
        }
    };

    Module::with_members(
        "math_test",
        [
            ("test_add", Callable::function("test_add", ["plan"], check(2, 2)).into()),
            ("test_remove", Callable::function("test_remove", ["plan"], check(1, 2)).into()),
        ],
    )
}

fn config(context: &TestContext) -> TestSuiteConfig {
    TestSuiteConfig {
        test_file_pattern: "**/*_test.star".to_string(),
        test_pattern: "test_*".to_string(),
        temp_dir: context.temp_path("tmp"),
    }
}

#[test]
fn test_failed_assertion_does_not_stop_siblings() {
    let context = TestContext::with_file("math_test.star", MATH_TEST);
    let system = OsSystem::new(context.cwd());
    let project = load_project(&context, &system);
    let discovery = GlobDiscovery::new(&system);
    let engine = ScriptedEngine::new().with_module("/math_test.star", math_test);

    let suite = TestSuiteRunner::new(&engine, &discovery, config(&context))
        .run(&project)
        .unwrap();

    let file = suite.children()[0].as_ref();
    assert_eq!(file.children().len(), 2);
    assert!(file.children()[0].success());
    assert_eq!(file.children()[1].errors()[0].message(), "1 != 2");
    assert!(!suite.success());

    colored::control::set_override(false);
    insta::assert_snapshot!(DisplayReport::new(&suite, suite.elapsed()), @r"
    math_test.star
    test test_add ... ok
    test test_remove ... FAILED
        1 != 2

    test result: FAILED. 1 passed; 1 failed; finished in [TIME]
    ");
}

#[test]
fn test_contexts_are_released_before_the_next_is_acquired() {
    let context = TestContext::with_file("math_test.star", MATH_TEST);
    let system = OsSystem::new(context.cwd());
    let project = load_project(&context, &system);
    let discovery = GlobDiscovery::new(&system);
    let engine = ScriptedEngine::new().with_module("/math_test.star", math_test);

    TestSuiteRunner::new(&engine, &discovery, config(&context))
        .run(&project)
        .unwrap();

    let temp_dir = context.temp_path("tmp");
    assert_eq!(
        engine.events(),
        [
            EngineEvent::Acquired { context: 0, temp_dir: temp_dir.clone() },
            EngineEvent::Interpreted { context: 0 },
            EngineEvent::Released { context: 0 },
            EngineEvent::Acquired { context: 1, temp_dir },
            EngineEvent::Interpreted { context: 1 },
            EngineEvent::Released { context: 1 },
        ]
    );
}

#[test]
fn test_interpretation_error_is_recorded_and_context_released() {
    let context = TestContext::with_file("math_test.star", MATH_TEST);
    let system = OsSystem::new(context.cwd());
    let project = load_project(&context, &system);
    let discovery = GlobDiscovery::new(&system);
    let engine = ScriptedEngine::new();

    let suite = TestSuiteRunner::new(&engine, &discovery, config(&context))
        .run(&project)
        .unwrap();

    let file = suite.children()[0].as_ref();
    assert_eq!(file.children().len(), 2);
    insta::assert_snapshot!(
        file.children()[0].errors()[0],
        @"cannot load module `/math_test.star` in package `github.com/kurtestosis/example`"
    );
    assert_eq!(
        engine
            .events()
            .iter()
            .filter(|event| matches!(event, EngineEvent::Released { .. }))
            .count(),
        2
    );
}

#[test]
fn test_provisioning_failure_aborts_the_run() {
    let context = TestContext::with_file("math_test.star", MATH_TEST);
    let system = OsSystem::new(context.cwd());
    let project = load_project(&context, &system);
    let discovery = GlobDiscovery::new(&system);
    let engine = ScriptedEngine::new()
        .with_module("/math_test.star", math_test)
        .with_provisioning_limit(1);

    let error = TestSuiteRunner::new(&engine, &discovery, config(&context))
        .run(&project)
        .unwrap_err();

    let RunError::TestFile { file, source } = &error else {
        panic!("expected a test file error, got {error:?}");
    };
    assert_eq!(file, "math_test.star");
    assert!(matches!(**source, RunError::Provisioning { ref function, .. } if function == "math_test.star::test_remove"));

    assert_eq!(
        engine.events().last(),
        Some(&EngineEvent::Released { context: 0 })
    );
}

#[test]
fn test_mocking_through_the_builtins() {
    let context = TestContext::with_file(
        "mock_test.star",
        r#"
        def test_mock(plan):
            handle = mock(lib, "f")
            expect.eq(lib.f(1, 2, key = "v"), 7)
            expect.eq(len(handle.calls()), 1)
        "#,
    );
    let system = OsSystem::new(context.cwd());
    let project = load_project(&context, &system);
    let discovery = GlobDiscovery::new(&system);

    let engine = ScriptedEngine::new().with_module("/mock_test.star", |predeclared| {
        let expect = predeclared.module("expect").unwrap();
        let mock = predeclared
            .get("mock")
            .and_then(Value::as_callable)
            .cloned()
            .unwrap();
        let lib = Module::with_members(
            "lib",
            [("f", Callable::function("f", ["a", "b"], |_| Ok(Value::Int(7))).into())],
        );

        let test_mock = Callable::function("test_mock", ["plan"], move |_| {
            let handle = mock.call(&Arguments::positional([lib.clone().into(), "f".into()]))?;
            let handle = handle
                .as_module()
                .cloned()
                .ok_or_else(|| CallError::failed("mock did not return a handle"))?;

            let result = lib.call(
                "f",
                &Arguments::positional([Value::Int(1), Value::Int(2)]).with_keyword("key", "v"),
            )?;
            expect.call("eq", &Arguments::positional([result, Value::Int(7)]))?;

            let calls = handle.call("calls", &Arguments::default())?;
            let Value::List(calls) = calls else {
                return Err(CallError::failed("calls() did not return a list"));
            };
            expect.call(
                "eq",
                &Arguments::positional([Value::Int(i64::try_from(calls.len()).unwrap_or(-1)), Value::Int(1)]),
            )?;

            // A stubbed proxy no longer reaches `f`.
            handle.call("mock_return_value", &Arguments::positional([Value::Int(0)]))?;
            let stubbed = lib.call("f", &Arguments::default())?;
            expect.call("eq", &Arguments::positional([stubbed, Value::Int(7)]))
        });

        Module::with_members("mock_test", [("test_mock", test_mock.into())])
    });

    let suite = TestSuiteRunner::new(&engine, &discovery, config(&context))
        .run(&project)
        .unwrap();

    let function = suite.children()[0].children()[0].as_ref();
    assert_eq!(function.name(), "test_mock");
    assert_eq!(
        function
            .errors()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        ["0 != 7"]
    );
}

#[test]
fn test_mock_contract_violation_is_a_test_failure() {
    let context = TestContext::with_file(
        "mock_test.star",
        r#"
        def test_mock(plan):
            mock(lib, "missing")
        "#,
    );
    let system = OsSystem::new(context.cwd());
    let project = load_project(&context, &system);
    let discovery = GlobDiscovery::new(&system);

    let engine = ScriptedEngine::new().with_module("/mock_test.star", |predeclared| {
        let mock = predeclared
            .get("mock")
            .and_then(Value::as_callable)
            .cloned()
            .unwrap();
        let lib = Module::new("lib");

        let test_mock = Callable::function("test_mock", ["plan"], move |_| {
            mock.call(&Arguments::positional([lib.clone().into(), "missing".into()]))
        });

        Module::with_members("mock_test", [("test_mock", test_mock.into())])
    });

    let suite = TestSuiteRunner::new(&engine, &discovery, config(&context))
        .run(&project)
        .unwrap();

    assert!(!suite.success());
    insta::assert_snapshot!(
        suite.children()[0].children()[0].errors()[0],
        @"module `lib` has no member `missing`"
    );
}

#[test]
fn test_collect_lists_tests_in_execution_order() {
    let context = TestContext::with_files([
        ("b_test.star", MATH_TEST),
        ("a_test.star", "def test_only():\n    pass\n"),
    ]);
    let system = OsSystem::new(context.cwd());
    let project = load_project(&context, &system);
    let discovery = GlobDiscovery::new(&system);
    let engine = ScriptedEngine::new();

    let functions = TestSuiteRunner::new(&engine, &discovery, config(&context))
        .collect(&project)
        .unwrap();

    assert_eq!(
        functions.iter().map(ToString::to_string).collect::<Vec<_>>(),
        [
            "a_test.star::test_only",
            "b_test.star::test_add",
            "b_test.star::test_remove"
        ]
    );
    assert!(engine.events().is_empty());
}
