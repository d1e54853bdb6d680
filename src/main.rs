use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};
use wsstat::cli::{execute, AppError, Cli, Config, InputError};
use wsstat::stat::WsProbe;

/// Logs go to stderr so they never interleave with the report on stdout.
fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_default();
    let log_layer = match log_format.as_str() {
        "json" => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
        _ => tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
    };

    tracing_subscriber::registry().with(log_layer).init();
}

fn usage_error(err: InputError) -> ! {
    let kind = match err {
        InputError::ConflictingMessages | InputError::ConflictingVerbosity => {
            ErrorKind::ArgumentConflict
        }
        _ => ErrorKind::ValueValidation,
    };
    Cli::command().error(kind, err).exit()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }
    let build_probe = |config: &Config| WsProbe::new().with_timeout(config.timeout);
    match execute(&cli, build_probe, &mut std::io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Input(e)) => usage_error(e),
        Err(e) => {
            tracing::debug!(error = ?e, "run failed");
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
