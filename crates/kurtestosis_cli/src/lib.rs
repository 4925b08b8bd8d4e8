use camino::Utf8PathBuf;
use clap::Parser;
use kurtestosis_logging::{TerminalColor, Verbosity};
use kurtestosis_project::{Options, OutputFormat, ProjectOptionsOverrides};
use kurtestosis_system::EnvVars;

#[derive(Debug, Parser)]
#[command(
    author,
    name = "kurtestosis",
    about = "A test runner for Kurtosis Starlark packages."
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Run tests.
    Test(TestCommand),

    /// List the tests that would run, without running them.
    List(ListCommand),

    /// Display Kurtestosis's version
    Version,
}

/// Arguments shared by every command that discovers tests.
#[derive(Debug, Clone, clap::Args)]
pub struct ProjectArgs {
    #[clap(
        help = "Root of the Kurtosis package to test [default: the current directory]",
        value_name = "PROJECT"
    )]
    pub project: Option<Utf8PathBuf>,

    /// Glob matched against package-relative paths to select test files.
    #[clap(long, value_name = "GLOB")]
    pub test_file_pattern: Option<String>,

    /// Glob matched against function names to select tests within a file.
    #[clap(long, value_name = "GLOB")]
    pub test_pattern: Option<String>,

    /// Path to a `kurtestosis.toml` to use instead of the one at the package root.
    #[clap(long, value_name = "PATH", env = EnvVars::KURTESTOSIS_CONFIG_FILE)]
    pub config_file: Option<Utf8PathBuf>,

    /// When set, .gitignore and .ignore files will not be respected.
    #[clap(long)]
    pub no_ignore: bool,
}

impl ProjectArgs {
    fn options(&self) -> Options {
        Options {
            test_file_pattern: self.test_file_pattern.clone(),
            test_pattern: self.test_pattern.clone(),
            respect_ignore_files: self.no_ignore.then_some(false),
            ..Options::default()
        }
    }
}

#[derive(Debug, Parser)]
pub struct TestCommand {
    #[clap(flatten)]
    pub project: ProjectArgs,

    /// Directory for the interpreter's temporary files.
    #[clap(long, value_name = "DIR")]
    pub temp_dir: Option<Utf8PathBuf>,

    /// How the report is printed.
    #[clap(long, value_enum)]
    pub output_format: Option<OutputFormatArg>,

    /// Control when colored output is used.
    #[clap(long, value_name = "WHEN")]
    pub color: Option<TerminalColor>,

    #[clap(flatten)]
    pub verbosity: Verbosity,
}

impl TestCommand {
    pub fn into_overrides(self) -> ProjectOptionsOverrides {
        let options = Options {
            temp_dir: self.temp_dir,
            output_format: self.output_format.map(OutputFormat::from),
            ..self.project.options()
        };

        ProjectOptionsOverrides::new(self.project.config_file, options)
    }
}

#[derive(Debug, Parser)]
pub struct ListCommand {
    #[clap(flatten)]
    pub project: ProjectArgs,

    #[clap(flatten)]
    pub verbosity: Verbosity,
}

impl ListCommand {
    pub fn into_overrides(self) -> ProjectOptionsOverrides {
        let options = self.project.options();
        ProjectOptionsOverrides::new(self.project.config_file, options)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormatArg {
    /// Each test on its own line, followed by a one-line summary.
    Full,

    /// The report tree as JSON.
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(value: OutputFormatArg) -> Self {
        match value {
            OutputFormatArg::Full => Self::Full,
            OutputFormatArg::Json => Self::Json,
        }
    }
}
