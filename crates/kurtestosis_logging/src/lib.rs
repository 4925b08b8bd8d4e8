use std::fmt::Write as _;

use kurtestosis_system::EnvVars;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_tree::HierarchicalLayer;

pub use verbosity::{TerminalColor, Verbosity, VerbosityLevel};

pub mod time;
mod verbosity;

/// Installs the global tracing subscriber for the given verbosity.
///
/// `KURTESTOSIS_LOG` takes precedence over the verbosity flags when set.
pub fn setup_tracing(level: VerbosityLevel) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_env(EnvVars::KURTESTOSIS_LOG)
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.level_filter().into()));

    let ansi = colored::control::SHOULD_COLORIZE.should_colorize();

    let registry = tracing_subscriber::registry().with(filter);

    if level.is_trace() {
        registry
            .with(
                HierarchicalLayer::default()
                    .with_indent_lines(true)
                    .with_indent_amount(2)
                    .with_bracketed_fields(true)
                    .with_targets(true)
                    .with_ansi(ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else if level >= VerbosityLevel::Verbose {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_timer(WallClock)
                    .with_target(level.is_extra_verbose())
                    .with_ansi(ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_target(false)
                    .with_ansi(ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    }
}

/// Local wall-clock timestamps for verbose output.
struct WallClock;

impl FormatTime for WallClock {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

pub fn set_colored_override(color: Option<TerminalColor>) {
    let Some(color) = color else {
        return;
    };

    match color {
        TerminalColor::Auto => {
            colored::control::unset_override();
        }
        TerminalColor::Always => {
            colored::control::set_override(true);
        }
        TerminalColor::Never => {
            colored::control::set_override(false);
        }
    }
}
