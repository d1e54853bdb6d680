use clap::Parser;

/// Measure the latency of establishing and using a WebSocket connection.
#[derive(Debug, Parser)]
#[command(name = "wsstat")]
#[command(version)]
#[command(about = "Measure and visualize WebSocket connection latency")]
pub struct Cli {
    /// Target URL; a bare host gets `wss://`, or `ws://` with --insecure
    #[arg(value_name = "URL")]
    pub target: String,

    /// Text message to send; the reply is printed
    #[arg(short, long, value_name = "MSG")]
    pub text: Option<String>,

    /// JSON object to send as is; the reply is printed as JSON
    #[arg(short, long, value_name = "JSON")]
    pub json: Option<String>,

    /// JSON-RPC method to call without params; the reply is printed as JSON
    #[arg(short, long, value_name = "METHOD")]
    pub method: Option<String>,

    /// Comma-separated `name:value` headers for the upgrade request
    #[arg(short = 'H', long, value_name = "LIST", default_value = "")]
    pub headers: String,

    /// Use `ws://` when the target has no scheme
    #[arg(short = 'k', long)]
    pub insecure: bool,

    /// Send the message N times over the same connection and report the mean round trip
    #[arg(short = 'n', long, value_name = "N", default_value_t = 1)]
    pub burst: u32,

    /// Print only basic output
    #[arg(short, long)]
    pub basic: bool,

    /// Print verbose output, including TLS details and all headers
    #[arg(short, long)]
    pub verbose: bool,

    /// Print nothing but the response
    #[arg(short, long)]
    pub quiet: bool,

    /// Print only the response; no effect when no response is expected
    #[arg(long = "response-only", visible_alias = "ro")]
    pub response_only: bool,

    /// Print the response as received, without decoding it
    #[arg(long)]
    pub raw: bool,

    /// Deadline for the whole probe, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5.0)]
    pub timeout: f64,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
