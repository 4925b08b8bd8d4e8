use insta_cmd::assert_cmd_snapshot;
use kurtestosis_test::TestContext;

use crate::{MATH_TEST, command};

fn context() -> TestContext {
    TestContext::with_files([
        ("math_test.star", MATH_TEST),
        (
            "checks/math_check.star",
            r"
            def check_add(plan):
                expect.eq(1 + 1, 2)

            def test_ignored():
                pass
            ",
        ),
    ])
}

#[test]
fn test_configuration_file_at_root() {
    let mut context = context();
    context.write_file(
        "kurtestosis.toml",
        r#"
        test-file-pattern = "checks/*_check.star"
        test-pattern = "check_*"
        "#,
    );

    assert_cmd_snapshot!(command(&context, "list"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    checks/math_check.star::check_add

    ----- stderr -----
    ");
}

#[test]
fn test_command_line_overrides_configuration_file() {
    let mut context = context();
    context.write_file(
        "kurtestosis.toml",
        r#"
        test-file-pattern = "checks/*_check.star"
        test-pattern = "check_*"
        "#,
    );

    assert_cmd_snapshot!(command(&context, "list").args(["--test-pattern", "test_*"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    checks/math_check.star::test_ignored

    ----- stderr -----
    ");
}

#[test]
fn test_config_file_flag() {
    let mut context = context();
    context.write_file("ci/kurtestosis.toml", "test-pattern = \"test_sub\"\n");

    assert_cmd_snapshot!(command(&context, "list").args(["--config-file", "ci/kurtestosis.toml"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    math_test.star::test_sub

    ----- stderr -----
    ");
}

#[test]
fn test_config_file_from_environment() {
    let mut context = context();
    context.write_file("ci/kurtestosis.toml", "test-pattern = \"test_add\"\n");

    assert_cmd_snapshot!(
        command(&context, "list").env("KURTESTOSIS_CONFIG_FILE", "ci/kurtestosis.toml"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    math_test.star::test_add

    ----- stderr -----
    "
    );
}

#[test]
fn test_gitignored_files_are_skipped() {
    let mut context = context();
    context.write_file(".gitignore", "math_test.star\n");

    assert_cmd_snapshot!(command(&context, "list").args(["--test-file-pattern", "**/*.star"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    checks/math_check.star::test_ignored

    ----- stderr -----
    ");
}

#[test]
fn test_no_ignore_includes_gitignored_files() {
    let mut context = context();
    context.write_file(".gitignore", "math_test.star\n");

    assert_cmd_snapshot!(
        command(&context, "list").args(["--test-file-pattern", "**/*.star", "--no-ignore"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    checks/math_check.star::test_ignored
    math_test.star::test_add
    math_test.star::test_sub

    ----- stderr -----
    "
    );
}

#[test]
fn test_invalid_configuration_file() {
    let mut context = context();
    context.write_file("kurtestosis.toml", "test-patern = \"x\"\n");

    let output = command(&context, "list").output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("test-patern"));
}
