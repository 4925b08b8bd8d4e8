use std::cell::RefCell;

use kurtestosis_collector::{Discovery, GlobDiscovery};
use kurtestosis_core::{
    FileReporter, FunctionReporter, ProvisioningError, ReportedError, Reporter, RunError,
    run_test_file, run_test_suite,
};
use kurtestosis_system::OsSystem;
use kurtestosis_test::TestContext;
use pretty_assertions::assert_eq;

use crate::load_project;

fn names(reporter: &dyn Reporter) -> Vec<&str> {
    reporter.children().iter().map(|child| child.name()).collect()
}

#[test]
fn test_two_files_one_failing_function() {
    let context = TestContext::with_files([
        (
            "a_test.star",
            r"
            def test_pass(plan):
                pass

            def test_fail(plan):
                pass
            ",
        ),
        (
            "b_test.star",
            r"
            def helper():
                pass
            ",
        ),
    ]);
    let system = OsSystem::new(context.cwd());
    let project = load_project(&context, &system);
    let discovery = GlobDiscovery::new(&system);

    let suite = run_test_suite(&project, "**/*_test.star", &discovery, |file| {
        run_test_file(file, "test_*", &discovery, |function| {
            let mut reporter = FunctionReporter::for_function(function);
            if function.name() == "test_fail" {
                reporter.record_error(ReportedError::new("1 != 2"));
            }
            Ok(reporter)
        })
    })
    .unwrap();

    assert_eq!(names(&suite), ["a_test.star", "b_test.star"]);

    let file_a = suite.children()[0].as_ref();
    assert_eq!(names(file_a), ["test_pass", "test_fail"]);
    assert!(file_a.children()[0].success());
    assert!(!file_a.children()[1].success());
    assert!(!file_a.success());

    let file_b = suite.children()[1].as_ref();
    assert!(file_b.children().is_empty());
    assert!(file_b.success());

    assert!(!suite.success());
}

#[test]
fn test_no_matching_files_is_a_vacuous_success() {
    let context = TestContext::with_file("main.star", "def run(plan):\n    pass\n");
    let system = OsSystem::new(context.cwd());
    let project = load_project(&context, &system);
    let discovery = GlobDiscovery::new(&system);

    let suite = run_test_suite(&project, "**/*_test.star", &discovery, |_| {
        Ok::<_, RunError>(FileReporter::new("unreachable"))
    })
    .unwrap();

    assert!(suite.success());
    assert!(suite.children().is_empty());
}

#[test]
fn test_failing_file_runner_aborts_the_suite() {
    let context = TestContext::with_files([
        ("a_test.star", ""),
        ("b_test.star", ""),
        ("c_test.star", ""),
    ]);
    let system = OsSystem::new(context.cwd());
    let project = load_project(&context, &system);
    let discovery = GlobDiscovery::new(&system);
    let visited = RefCell::new(Vec::new());

    let error = run_test_suite(&project, "*_test.star", &discovery, |file| {
        visited.borrow_mut().push(file.to_string());
        if file.path().as_str() == "b_test.star" {
            return Err(RunError::Provisioning {
                function: format!("{file}::test_b"),
                source: ProvisioningError::new("database is locked"),
            });
        }
        Ok(FileReporter::for_file(file))
    })
    .unwrap_err();

    assert_eq!(*visited.borrow(), ["a_test.star", "b_test.star"]);
    insta::assert_snapshot!(error, @"failed to run test file `b_test.star`");
}

#[test]
fn test_failing_function_runner_aborts_the_file() {
    let context = TestContext::with_file(
        "a_test.star",
        r"
        def test_one(plan):
            pass

        def test_two(plan):
            pass

        def test_three(plan):
            pass
        ",
    );
    let system = OsSystem::new(context.cwd());
    let project = load_project(&context, &system);
    let discovery = GlobDiscovery::new(&system);
    let files = discovery
        .list_matching_files(&project, "*_test.star")
        .unwrap();

    let mut runs = 0;
    let result = run_test_file(&files[0], "test_*", &discovery, |function| {
        runs += 1;
        if function.name() == "test_two" {
            Err(RunError::Provisioning {
                function: function.to_string(),
                source: ProvisioningError::new("database is locked"),
            })
        } else {
            Ok(FunctionReporter::for_function(function))
        }
    });

    assert_eq!(runs, 2);
    insta::assert_snapshot!(
        result.unwrap_err(),
        @"failed to provision an interpretation context for `a_test.star::test_two`"
    );
}

#[test]
fn test_invalid_file_pattern_is_a_discovery_fault() {
    let context = TestContext::with_package();
    let system = OsSystem::new(context.cwd());
    let project = load_project(&context, &system);
    let discovery = GlobDiscovery::new(&system);

    let error = run_test_suite(&project, "[", &discovery, |file| {
        Ok(FileReporter::for_file(file))
    })
    .unwrap_err();

    assert!(matches!(error, RunError::Discovery(_)));
}
