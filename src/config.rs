use anyhow::{bail, Context, Result};
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_SECRET_URL: &str = "https://careers.example.com/api/token";
pub const DEFAULT_APPLY_URL: &str = "https://careers.example.com/api/apply";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Command-line flags. Anything left unset falls back to the environment,
/// then to the built-in defaults.
#[derive(Parser, Debug, Default)]
#[command(name = "job-apply", version, about = "Interactively submit job applications")]
pub struct Cli {
    /// URL the authorization token is fetched from
    #[arg(long, value_name = "URL")]
    pub secret_url: Option<String>,

    /// URL applications are POSTed to
    #[arg(long, value_name = "URL")]
    pub apply_url: Option<String>,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<String>,
}

/// Settings for one run, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub secret_url: String,
    pub apply_url: String,
    pub timeout: Duration,
    pub log_filter: String,
}

impl Config {
    /// Resolve from flags, the process environment and an optional `.env`.
    pub fn resolve(cli: Cli) -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_sources(cli, |key| std::env::var(key).ok())
    }

    /// Resolution with an injectable environment lookup.
    pub fn from_sources<F>(cli: Cli, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_url = cli
            .secret_url
            .or_else(|| env("JOB_APPLY_SECRET_URL"))
            .unwrap_or_else(|| DEFAULT_SECRET_URL.to_string());
        let apply_url = cli
            .apply_url
            .or_else(|| env("JOB_APPLY_URL"))
            .unwrap_or_else(|| DEFAULT_APPLY_URL.to_string());
        let timeout = match cli.timeout_secs.or_else(|| env("JOB_APPLY_TIMEOUT_SECS")) {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        let log_filter = env("JOB_APPLY_LOG")
            .or_else(|| env("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Config {
            secret_url,
            apply_url,
            timeout,
            log_filter,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("timeout must be a whole number of seconds, got '{raw}'"))?;
    if secs == 0 {
        bail!("timeout must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}
