use std::env;
use std::path::PathBuf;

use crate::actions::{GITHUB_OUTPUT, LogSink, Reporter, UnknownLogSink};

pub const SLACK_API_BASE: &str = "SLACK_API_BASE";
pub const NOTIFY_LOG_SINK: &str = "NOTIFY_LOG_SINK";

/// Runtime settings resolved from the environment. CLI flags are applied on
/// top by the binary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotifyConfig {
    pub api_base: Option<String>,
    pub log_sink: LogSink,
    pub output_file: Option<PathBuf>,
}

impl NotifyConfig {
    pub fn from_env() -> Result<Self, UnknownLogSink> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, UnknownLogSink>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_sink = match non_empty(NOTIFY_LOG_SINK) {
            Some(value) => value.parse()?,
            None => LogSink::default(),
        };

        Ok(Self {
            api_base: non_empty(SLACK_API_BASE),
            log_sink,
            output_file: non_empty(GITHUB_OUTPUT).map(PathBuf::from),
        })
    }

    pub fn reporter(&self) -> Box<dyn Reporter> {
        self.log_sink.reporter(self.output_file.clone())
    }
}
