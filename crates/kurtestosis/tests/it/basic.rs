use insta_cmd::assert_cmd_snapshot;
use kurtestosis_test::TestContext;

use crate::{MATH_TEST, command};

#[test]
fn test_version() {
    let context = TestContext::new();

    assert_cmd_snapshot!(command(&context, "version"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    kurtestosis 0.1.0

    ----- stderr -----
    ");
}

#[test]
fn test_list_discovered_tests() {
    let context = TestContext::with_files([
        ("math_test.star", MATH_TEST),
        (
            "net/ports_test.star",
            r"
            def test_ports(plan):
                expect.true(True)
            ",
        ),
        ("main.star", "def test_not_collected():\n    pass\n"),
    ]);

    assert_cmd_snapshot!(command(&context, "list"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    math_test.star::test_add
    math_test.star::test_sub
    net/ports_test.star::test_ports

    ----- stderr -----
    ");
}

#[test]
fn test_list_with_test_pattern() {
    let context = TestContext::with_file("math_test.star", MATH_TEST);

    assert_cmd_snapshot!(command(&context, "list").args(["--test-pattern", "*_sub"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    math_test.star::test_sub

    ----- stderr -----
    ");
}

#[test]
fn test_project_argument_is_resolved_against_cwd() {
    let mut context = TestContext::new();
    context.write_file("package/kurtosis.yml", "name: github.com/kurtestosis/nested\n");
    context.write_file("package/math_test.star", MATH_TEST);

    assert_cmd_snapshot!(command(&context, "list").arg("package"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    math_test.star::test_add
    math_test.star::test_sub

    ----- stderr -----
    ");
}

#[test]
fn test_no_test_files_is_a_success() {
    let context = TestContext::with_package();

    assert_cmd_snapshot!(command(&context, "test").arg("-q"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    test result: ok. 0 passed; 0 failed; finished in [TIME]

    ----- stderr -----
    ");
}

#[test]
fn test_no_test_files_as_json() {
    let context = TestContext::with_package();

    assert_cmd_snapshot!(command(&context, "test").args(["-q", "--output-format", "json"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {
      "name": "github.com/kurtestosis/example",
      "kind": "suite",
      "success": true,
      "errors": [],
      "children": []
    }

    ----- stderr -----
    "#);
}

#[test]
fn test_without_interpreter_fails_to_provision() {
    let context = TestContext::with_file("math_test.star", MATH_TEST);

    assert_cmd_snapshot!(command(&context, "test"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Kurtestosis failed
      Cause: failed to run test file `math_test.star`
      Cause: failed to provision an interpretation context for `math_test.star::test_add`
      Cause: no Starlark interpreter is linked into this build of kurtestosis
    ");
}

#[test]
fn test_missing_manifest() {
    let context = TestContext::new();

    let output = command(&context, "test").output().unwrap();

    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Kurtestosis failed\n"));
    assert!(stderr.contains("Failed to load the Kurtosis package at"));
    assert!(stderr.contains("kurtosis.yml"));
}

#[test]
fn test_invalid_test_file_pattern() {
    let context = TestContext::with_file("math_test.star", MATH_TEST);

    let output = command(&context, "list")
        .args(["--test-file-pattern", "["])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid pattern `[`"));
}

#[test]
fn test_arguments_from_file() {
    let context = TestContext::with_files([
        ("math_test.star", MATH_TEST),
        ("args.txt", "list\n--test-pattern\ntest_add\n"),
    ]);

    assert_cmd_snapshot!(command(&context, "@args.txt"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    math_test.star::test_add

    ----- stderr -----
    ");
}
