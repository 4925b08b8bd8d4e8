use std::process::Command;

use insta_cmd::get_cargo_bin;
use kurtestosis_test::TestContext;

mod basic;
mod configuration;

const MATH_TEST: &str = r"
    def test_add(plan):
        expect.eq(1 + 1, 2)

    def test_sub():
        expect.eq(2 - 1, 1)

    def helper():
        return None
";

fn command(context: &TestContext, subcommand: &str) -> Command {
    let mut command = Command::new(get_cargo_bin("kurtestosis"));
    command
        .current_dir(context.root())
        .env_remove("KURTESTOSIS_CONFIG_FILE")
        .env_remove("KURTESTOSIS_LOG")
        .arg(subcommand);
    command
}
