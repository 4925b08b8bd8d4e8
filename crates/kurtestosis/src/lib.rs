use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::process::{ExitCode, Termination};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use colored::Colorize;
use kurtestosis_cli::{Args, Command, ListCommand, ProjectArgs, TestCommand};
use kurtestosis_collector::GlobDiscovery;
use kurtestosis_core::{
    DisplayReport, Engine, ReportSummary, Reporter, TestSuiteConfig, TestSuiteRunner,
};
use kurtestosis_logging::{VerbosityLevel, set_colored_override, setup_tracing};
use kurtestosis_project::{OutputFormat, Project, ProjectOptionsOverrides};
use kurtestosis_system::OsSystem;
use kurtestosis_system::path::absolute;

/// Runs the command line against `engine`.
///
/// The stock binary links [`kurtestosis_core::NoEngine`]; embedders that
/// bundle a Starlark interpreter call this with their own [`Engine`].
#[must_use]
pub fn kurtestosis_main<E: Engine>(engine: &E) -> ExitStatus {
    run(engine).unwrap_or_else(|error| {
        let mut stderr = io::stderr().lock();

        writeln!(stderr, "{}", "Kurtestosis failed".red().bold()).ok();
        for cause in error.chain() {
            if let Some(ioerr) = cause.downcast_ref::<io::Error>() {
                if ioerr.kind() == io::ErrorKind::BrokenPipe {
                    return ExitStatus::Success;
                }
            }

            writeln!(stderr, "  {} {cause}", "Cause:".bold()).ok();
        }

        ExitStatus::Error
    })
}

fn run<E: Engine>(engine: &E) -> Result<ExitStatus> {
    let args = wild::args_os();

    let args = argfile::expand_args_from(args, argfile::parse_fromfile, argfile::PREFIX)
        .context("Failed to read CLI arguments from file")?;

    let args = try_parse_args(args)?;

    match args.command {
        Command::Test(test_args) => test(engine, test_args),
        Command::List(list_args) => list(list_args),
        Command::Version => version().map(|()| ExitStatus::Success),
    }
}

// Some launchers prepend their own arguments, so drop leading arguments until the rest parses.
fn try_parse_args(mut args: Vec<OsString>) -> Result<Args> {
    loop {
        match Args::try_parse_from(args.clone()) {
            Ok(args) => {
                break Ok(args);
            }
            Err(e) => {
                if args.is_empty() {
                    return Err(anyhow!("No arguments provided"));
                }
                match e.kind() {
                    clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayVersion
                    | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        break Ok(Args::parse_from(args.clone()));
                    }
                    _ => {
                        args.remove(0);
                    }
                }
            }
        }
    }
}

pub(crate) fn version() -> Result<()> {
    let mut stdout = BufWriter::new(io::stdout().lock());
    writeln!(stdout, "kurtestosis {}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

pub(crate) fn test<E: Engine>(engine: &E, args: TestCommand) -> Result<ExitStatus> {
    set_colored_override(args.color);
    init_tracing(args.verbosity.level())?;

    let cwd = current_directory()?;
    let root = project_root(&args.project, &cwd);
    let system = OsSystem::new(&cwd);

    let overrides = resolve_against(args.into_overrides(), &cwd);
    let project = load_project(&root, &system, &overrides)?;

    ctrlc::set_handler(on_interrupt).context("Failed to install the Ctrl+C handler")?;

    let discovery = GlobDiscovery::new(&system);
    let runner = TestSuiteRunner::new(
        engine,
        &discovery,
        TestSuiteConfig::from_settings(project.settings()),
    );

    let reporter = runner.run(&project)?;

    let mut stdout = BufWriter::new(io::stdout().lock());

    match project.settings().output_format() {
        OutputFormat::Full => {
            write!(stdout, "{}", DisplayReport::new(&reporter, reporter.elapsed()))?;
        }
        OutputFormat::Json => {
            let summary = ReportSummary::from_reporter(&reporter);
            writeln!(stdout, "{}", summary.to_json()?)?;
        }
    }

    stdout.flush()?;

    Ok(if reporter.success() {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    })
}

pub(crate) fn list(args: ListCommand) -> Result<ExitStatus> {
    init_tracing(args.verbosity.level())?;

    let cwd = current_directory()?;
    let root = project_root(&args.project, &cwd);
    let system = OsSystem::new(&cwd);

    let overrides = resolve_against(args.into_overrides(), &cwd);
    let project = load_project(&root, &system, &overrides)?;

    let discovery = GlobDiscovery::new(&system);
    let runner = TestSuiteRunner::new(
        &kurtestosis_core::NoEngine,
        &discovery,
        TestSuiteConfig::from_settings(project.settings()),
    );

    let functions = runner.collect(&project)?;

    let mut stdout = BufWriter::new(io::stdout().lock());
    for function in &functions {
        writeln!(stdout, "{function}")?;
    }
    stdout.flush()?;

    tracing::debug!("Listed {} test(s)", functions.len());

    Ok(ExitStatus::Success)
}

fn init_tracing(level: VerbosityLevel) -> Result<()> {
    setup_tracing(level).context("Failed to initialize logging")
}

fn current_directory() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to get the current working directory")?;
    Utf8PathBuf::from_path_buf(cwd).map_err(|path| {
        anyhow!(
            "The current working directory `{}` contains non-Unicode characters. Kurtestosis only supports Unicode paths.",
            path.display()
        )
    })
}

fn project_root(args: &ProjectArgs, cwd: &Utf8Path) -> Utf8PathBuf {
    args.project.as_ref().map_or_else(
        || {
            tracing::debug!("No project provided, using current working directory");
            cwd.to_path_buf()
        },
        |project| absolute(project, cwd),
    )
}

/// Paths given on the command line are relative to the working directory,
/// not to the project root like those in `kurtestosis.toml`.
fn resolve_against(
    mut overrides: ProjectOptionsOverrides,
    cwd: &Utf8Path,
) -> ProjectOptionsOverrides {
    overrides.config_file_override = overrides
        .config_file_override
        .map(|path| absolute(path, cwd));
    overrides.options.temp_dir = overrides.options.temp_dir.map(|path| absolute(path, cwd));
    overrides
}

fn load_project(
    root: &Utf8Path,
    system: &OsSystem,
    overrides: &ProjectOptionsOverrides,
) -> Result<Arc<Project>> {
    let project = Project::load(root, system, overrides)
        .with_context(|| format!("Failed to load the Kurtosis package at `{root}`"))?;
    Ok(Arc::new(project))
}

#[allow(clippy::exit)]
fn on_interrupt() {
    std::process::exit(ExitStatus::Error.to_i32());
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every discovered test passed, or there was nothing to run.
    Success = 0,

    /// The run completed and at least one test failed.
    Failure = 1,

    /// The run could not complete: bad configuration, discovery or provisioning faults.
    Error = 2,
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self as i32
    }
}
