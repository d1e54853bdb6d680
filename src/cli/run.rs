use super::args::Cli;
use super::classify::classify;
use super::config::{Config, Verbosity};
use super::error::AppError;
use super::invoker::{invoke, probe_request};
use crate::report::{details, format_response, write_response, Palette, ResponseStyle, TimingReport};
use crate::stat::{Measurement, Probe, Response};
use std::io::Write;

/// Validate `cli`, then build the probe from the resulting config and run it.
///
/// `build_probe` is only called once the command line is known to be valid,
/// so an [`AppError::Input`] never follows any network activity.
pub async fn execute<P, F>(cli: &Cli, build_probe: F, out: &mut impl Write) -> Result<(), AppError>
where
    P: Probe,
    F: FnOnce(&Config) -> P,
{
    let config = Config::from_cli(cli)?;
    let probe = build_probe(&config);
    run(&config, &probe, out).await
}

/// Probe the configured target once and print the report to `out`.
///
/// Nothing is written unless the probe succeeds.
pub async fn run(config: &Config, probe: &dyn Probe, out: &mut impl Write) -> Result<(), AppError> {
    let request = probe_request(&config.target, &config.headers, &config.mode)?;
    tracing::debug!(
        target_url = %config.target,
        count = request.count,
        "probing"
    );

    let (measurement, response) = invoke(probe, request, !config.raw)
        .await
        .map_err(|e| classify(e, &config.target))?;

    write_report(config, &measurement, &response, out)
}

/// Print details, timings and the response as `config` asks.
pub fn write_report(
    config: &Config,
    measurement: &Measurement,
    response: &Response,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let palette = Palette::new(config.color);

    if config.shows_report() {
        match config.verbosity {
            Verbosity::Basic => details::write_basic(out, measurement, palette)?,
            Verbosity::Standard => details::write_standard(out, measurement, palette)?,
            Verbosity::Verbose => details::write_verbose(out, measurement, palette)?,
            Verbosity::Quiet => {}
        }

        let timing = TimingReport::new(measurement, palette);
        if config.verbosity == Verbosity::Basic {
            timing.write_basic(out)?;
        } else {
            timing.write_tiered(out)?;
        }
    }

    let style = ResponseStyle {
        raw: config.raw,
        json: config.mode.is_json(),
        response_only: config.response_only() || config.verbosity == Verbosity::Quiet,
    };
    if let Some(body) = format_response(response, style)? {
        write_response(out, &body, style, palette)?;
    }

    out.flush()?;
    Ok(())
}
