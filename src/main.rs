// Entrypoint for the CLI application.
// - Resolves configuration once, sets up logging, hands a terminal console
//   and an API client to the session loop.
// - Exit codes: 0 on normal termination, 1 when startup fails, 2 when the
//   session is aborted (a field ran out of attempts or input closed).

use clap::Parser;
use job_apply_cli::{
    api::ApiClient,
    config::{Cli, Config},
    session::Session,
    ui::{print_fatal, TerminalConsole},
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let config = match Config::resolve(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            print_fatal(&format!("Configuration error: {:#}", e));
            return ExitCode::from(1);
        }
    };

    // Logs go to stderr so they never interleave with the prompts.
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(
        secret_url = %config.secret_url,
        apply_url = %config.apply_url,
        timeout_secs = config.timeout.as_secs(),
        "configuration resolved"
    );

    let api = match ApiClient::new(&config) {
        Ok(api) => api,
        Err(e) => {
            print_fatal(&format!("{:#}", e));
            return ExitCode::from(1);
        }
    };

    // Blocks until the user declines another submission.
    let mut session = Session::new(TerminalConsole::new(), api);
    match session.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "session aborted");
            print_fatal(&format!("Fatal: {}", e));
            ExitCode::from(2)
        }
    }
}
