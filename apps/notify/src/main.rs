//! `slack-notify`: GitHub Actions step that posts a deployment approval
//! request or a plain notification to Slack.

mod cli;

use std::env;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use notify_core::actions::WorkflowReporter;
use notify_core::{EnvInputs, Notifier, Reporter, SlackClient};
use notify_telemetry::install as init_telemetry;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_telemetry("slack-notify")?;
    let cli = Cli::parse();

    let mut fallback = WorkflowReporter::stdout(None);
    let Some(config) = cli.load_config(|key| env::var(key).ok(), &mut fallback) else {
        notify_telemetry::shutdown();
        return Ok(ExitCode::FAILURE);
    };
    let mut reporter = config.reporter();

    if let Some(token) = cli.command.command_line_token() {
        reporter.set_secret(token.trim());
    }

    let invocation = match cli.command.resolve(&EnvInputs) {
        Ok(invocation) => invocation,
        Err(err) => {
            reporter.set_failed(&err.to_string());
            notify_telemetry::shutdown();
            return Ok(ExitCode::FAILURE);
        }
    };

    let client = SlackClient::new(
        reqwest::Client::new(),
        invocation.token(),
        config.api_base.clone(),
    );
    tracing::debug!(
        api_base = client.api_base(),
        sink = %config.log_sink,
        otel = notify_telemetry::telemetry_enabled(),
        "slack-notify starting"
    );

    let mut notifier = Notifier::new(client, reporter);
    let outcome = invocation.run(&mut notifier).await;
    notify_telemetry::shutdown();

    if outcome.is_sent() && !notifier.reporter().failed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
