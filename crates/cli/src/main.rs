//! opsprobe - one-shot version check against the control plane
//!
//! Opens a channel (TLS by default, certificate verification skipped unless
//! told otherwise), issues a single version call bounded by a deadline, and
//! prints the reply. Any failure is fatal.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use opsprobe_client::options::DEFAULT_SERVER;
use opsprobe_client::report::render;
use opsprobe_client::{ConnectOptions, GrpcVersionClient, VersionProvider};

#[derive(Parser)]
#[command(name = "opsprobe")]
#[command(about = "Check a control plane's version over gRPC", long_about = None)]
#[command(version)]
struct Cli {
    /// Server address (host:port)
    #[arg(long, default_value = DEFAULT_SERVER)]
    server: String,

    /// Bearer token for authentication (optional)
    #[arg(long)]
    token: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true, value_name = "BOOL")]
    insecure: bool,

    /// Use a plaintext connection (no TLS)
    #[arg(long)]
    plaintext: bool,

    /// Request timeout (e.g. 10s, 1m)
    #[arg(long, value_parser = humantime::parse_duration, default_value = "10s")]
    timeout: Duration,

    /// Show bundled tool versions and connection progress
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let options = ConnectOptions {
        server: cli.server,
        token: cli.token,
        insecure_skip_verify: cli.insecure,
        plaintext: cli.plaintext,
        timeout: cli.timeout,
    };

    debug!(
        server = %options.server,
        plaintext = options.plaintext,
        insecure = options.insecure_skip_verify,
        timeout = ?options.timeout,
        "connecting"
    );

    let client = GrpcVersionClient::connect(&options)
        .await
        .context("failed to establish channel")?;

    let reply = client.version().await.context("version call failed")?;

    println!();
    println!("{}", "✓ SUCCESS! Version information:".green().bold());
    print!("{}", render(&reply, cli.verbose));

    Ok(())
}

/// Console logging on stderr; stdout stays reserved for the report.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = format!("opsprobe_cli={level},opsprobe_client={level}");

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_filter))
        .expect("Failed to create env filter");

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_defaults() {
        let cli = Cli::parse_from(["opsprobe"]);

        assert_eq!(cli.server, "localhost:443");
        assert!(cli.token.is_none());
        assert!(cli.insecure);
        assert!(!cli.plaintext);
        assert_eq!(cli.timeout, Duration::from_secs(10));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_insecure_can_be_disabled() {
        let cli = Cli::parse_from(["opsprobe", "--insecure", "false"]);
        assert!(!cli.insecure);
    }

    #[test]
    fn test_timeout_accepts_humantime() {
        let cli = Cli::parse_from(["opsprobe", "--timeout", "1m"]);
        assert_eq!(cli.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_full_flag_set() {
        let cli = Cli::parse_from([
            "opsprobe",
            "--server",
            "cp.internal:8080",
            "--token",
            "secret",
            "--plaintext",
            "--verbose",
        ]);

        assert_eq!(cli.server, "cp.internal:8080");
        assert_eq!(cli.token.as_deref(), Some("secret"));
        assert!(cli.plaintext);
        assert!(cli.verbose);
    }
}
