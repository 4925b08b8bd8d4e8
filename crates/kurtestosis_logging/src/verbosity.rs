use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Default)]
pub enum VerbosityLevel {
    /// Only shows errors. Corresponds to `-q`.
    Quiet,

    /// Default output level. Only shows events up to the [`WARN`](tracing::Level::WARN).
    #[default]
    Default,

    /// Enables verbose output. Emits events up to the [`INFO`](tracing::Level::INFO),
    /// which includes the reporter lifecycle lines. Corresponds to `-v`.
    Verbose,

    /// Enables a more verbose tracing format and emits events up to [`DEBUG`](tracing::Level::DEBUG).
    /// Corresponds to `-vv`
    ExtraVerbose,

    /// Enables all tracing events and uses a tree-like output format. Corresponds to `-vvv`.
    Trace,
}

impl VerbosityLevel {
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Default => LevelFilter::WARN,
            Self::Verbose => LevelFilter::INFO,
            Self::ExtraVerbose => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    pub const fn is_trace(self) -> bool {
        matches!(self, Self::Trace)
    }

    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }

    pub const fn is_extra_verbose(self) -> bool {
        matches!(self, Self::ExtraVerbose)
    }
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct Verbosity {
    #[arg(
        long,
        short = 'v',
        help = "Use verbose output (or `-vv` and `-vvv` for more verbose output)",
        action = clap::ArgAction::Count,
        global = true,
        overrides_with = "quiet",
    )]
    verbose: u8,

    #[arg(
        long,
        short = 'q',
        help = "Only print errors",
        action = clap::ArgAction::SetTrue,
        global = true,
        overrides_with = "verbose",
    )]
    quiet: bool,
}

impl Verbosity {
    /// Returns the verbosity level based on the number of `-v` flags.
    pub const fn level(&self) -> VerbosityLevel {
        if self.quiet {
            return VerbosityLevel::Quiet;
        }

        match self.verbose {
            0 => VerbosityLevel::Default,
            1 => VerbosityLevel::Verbose,
            2 => VerbosityLevel::ExtraVerbose,
            _ => VerbosityLevel::Trace,
        }
    }
}

/// Controls when coloured output is used.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TerminalColor {
    /// Display colors if the output goes to an interactive terminal.
    #[default]
    Auto,

    /// Always display colors.
    Always,

    /// Never display colors.
    Never,
}
