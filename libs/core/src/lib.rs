//! Core of the Slack deployment notifier.
//!
//! The crate builds `chat.postMessage` requests (plain notifications and
//! approve/reject deployment gates), posts them with a bot token, and reports
//! the result to the GitHub Actions runner through workflow commands and step
//! outputs.
pub mod actions;
pub mod config;
pub mod notifier;
pub mod slack;

pub use actions::{EnvInputs, InputError, InputSource, LogSink, Reporter};
pub use config::NotifyConfig;
pub use notifier::{Mode, Notifier, Outcome};
pub use slack::{MessagePoster, PostMessageRequest, PostedMessage, SlackClient, SlackError};
