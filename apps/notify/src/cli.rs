use clap::{Args, Parser, Subcommand};
use notify_core::actions::{InputError, InputOptions, InputSource, get_input};
use notify_core::{LogSink, MessagePoster, Notifier, NotifyConfig, Outcome, Reporter};

#[derive(Parser, Debug)]
#[command(
    name = "slack-notify",
    author,
    version,
    about = "Post deployment approval requests and notifications to Slack from CI"
)]
pub struct Cli {
    /// Slack Web API base URL (default: $SLACK_API_BASE or https://slack.com/api)
    #[arg(long, global = true)]
    pub api_base: Option<String>,
    /// Where status lines go: `runner` (workflow commands) or `tracing`
    #[arg(long, global = true)]
    pub log_sink: Option<LogSink>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask for approval to push a Docker image tag to production
    Approval {
        #[command(flatten)]
        target: Target,
        /// Image tag to approve (falls back to INPUT_IMAGE_TAG)
        #[arg(long)]
        image_tag: Option<String>,
    },
    /// Post a plain text message
    Simple {
        #[command(flatten)]
        target: Target,
        /// Message text (falls back to INPUT_MESSAGE)
        #[arg(long)]
        message: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct Target {
    /// Bot token (falls back to INPUT_SLACK_TOKEN)
    #[arg(long)]
    pub slack_token: Option<String>,
    /// Channel id (falls back to INPUT_CHANNEL_ID)
    #[arg(long)]
    pub channel_id: Option<String>,
}

/// A fully resolved invocation: every input present and non-empty.
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Approval {
        token: String,
        channel: String,
        image_tag: String,
    },
    Simple {
        token: String,
        channel: String,
        message: String,
    },
}

impl Cli {
    /// Reads the environment config and layers the global flags on top. A
    /// bad value fails the step through `fallback`, since no configured
    /// reporter exists yet.
    pub fn load_config<F, R>(&self, lookup: F, fallback: &mut R) -> Option<NotifyConfig>
    where
        F: Fn(&str) -> Option<String>,
        R: Reporter + ?Sized,
    {
        match NotifyConfig::from_lookup(lookup) {
            Ok(mut config) => {
                self.apply(&mut config);
                Some(config)
            }
            Err(err) => {
                fallback.set_failed(&err.to_string());
                None
            }
        }
    }

    pub fn apply(&self, config: &mut NotifyConfig) {
        if let Some(base) = &self.api_base {
            config.api_base = Some(base.clone());
        }
        if let Some(sink) = self.log_sink {
            config.log_sink = sink;
        }
    }
}

impl Commands {
    pub fn resolve<S>(self, inputs: &S) -> Result<Invocation, InputError>
    where
        S: InputSource + ?Sized,
    {
        match self {
            Commands::Approval { target, image_tag } => Ok(Invocation::Approval {
                token: pick(target.slack_token, inputs, "slack_token")?,
                channel: pick(target.channel_id, inputs, "channel_id")?,
                image_tag: pick(image_tag, inputs, "image_tag")?,
            }),
            Commands::Simple { target, message } => Ok(Invocation::Simple {
                token: pick(target.slack_token, inputs, "slack_token")?,
                channel: pick(target.channel_id, inputs, "channel_id")?,
                message: pick(message, inputs, "message")?,
            }),
        }
    }

    /// The token if it came in on the command line rather than from the
    /// runner's secret-backed inputs.
    pub fn command_line_token(&self) -> Option<&str> {
        match self {
            Commands::Approval { target, .. } | Commands::Simple { target, .. } => target
                .slack_token
                .as_deref()
                .filter(|token| !token.trim().is_empty()),
        }
    }
}

impl Invocation {
    pub fn token(&self) -> &str {
        match self {
            Invocation::Approval { token, .. } | Invocation::Simple { token, .. } => token,
        }
    }

    pub async fn run<P, R>(&self, notifier: &mut Notifier<P, R>) -> Outcome
    where
        P: MessagePoster,
        R: Reporter,
    {
        match self {
            Invocation::Approval {
                channel, image_tag, ..
            } => notifier.send_approval(channel, image_tag).await,
            Invocation::Simple {
                channel, message, ..
            } => notifier.send_simple(channel, message).await,
        }
    }
}

fn pick<S>(explicit: Option<String>, inputs: &S, name: &str) -> Result<String, InputError>
where
    S: InputSource + ?Sized,
{
    match explicit.filter(|v| !v.trim().is_empty()) {
        Some(value) => Ok(value.trim().to_string()),
        None => get_input(inputs, name, InputOptions::required()),
    }
}
