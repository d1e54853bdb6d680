use super::args::Cli;
use super::error::InputError;
use super::headers::parse_headers;
use super::mode::MeasurementMode;
use super::uri::resolve_target;
use crate::http::HeaderSet;
use crate::stat::DEFAULT_TIMEOUT;
use std::time::Duration;
use url::Url;

/// How much of the report to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Standard,
    Basic,
    Verbose,
    Quiet,
}

impl Verbosity {
    /// At most one of the three flags may be set.
    pub fn select(basic: bool, verbose: bool, quiet: bool) -> Result<Self, InputError> {
        match (basic, verbose, quiet) {
            (false, false, false) => Ok(Verbosity::Standard),
            (true, false, false) => Ok(Verbosity::Basic),
            (false, true, false) => Ok(Verbosity::Verbose),
            (false, false, true) => Ok(Verbosity::Quiet),
            _ => Err(InputError::ConflictingVerbosity),
        }
    }
}

/// A validated invocation. Built once from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub target: Url,
    pub headers: HeaderSet,
    pub mode: MeasurementMode,
    pub verbosity: Verbosity,
    pub response_only: bool,
    pub raw: bool,
    pub color: bool,
    pub timeout: Duration,
}

impl Config {
    pub fn new(target: Url, mode: MeasurementMode) -> Self {
        Self {
            target,
            headers: HeaderSet::new(),
            mode,
            verbosity: Verbosity::Standard,
            response_only: false,
            raw: false,
            color: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Validate the command line. Verbosity and message flags are checked
    /// before the target so conflicting flags are reported first.
    pub fn from_cli(cli: &Cli) -> Result<Self, InputError> {
        let verbosity = Verbosity::select(cli.basic, cli.verbose, cli.quiet)?;
        let mode = MeasurementMode::select(
            cli.text.as_deref(),
            cli.json.as_deref(),
            cli.method.as_deref(),
            cli.burst,
        )?;
        let target = resolve_target(&cli.target, cli.insecure)?;
        let headers = parse_headers(&cli.headers)?;

        let timeout = if cli.timeout.is_finite() && cli.timeout > 0.0 {
            Duration::from_secs_f64(cli.timeout)
        } else {
            DEFAULT_TIMEOUT
        };

        Ok(Self {
            target,
            headers,
            mode,
            verbosity,
            response_only: cli.response_only,
            raw: cli.raw,
            color: !cli.no_color,
            timeout,
        })
    }

    /// Response-only takes effect only when a response is expected.
    pub fn response_only(&self) -> bool {
        self.response_only && self.mode.expects_response()
    }

    /// Whether the details block and the timing diagram are printed.
    pub fn shows_report(&self) -> bool {
        self.verbosity != Verbosity::Quiet && !self.response_only()
    }
}
