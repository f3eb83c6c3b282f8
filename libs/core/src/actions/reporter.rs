//! Where the notifier's status lines end up.
//!
//! [`WorkflowReporter`] speaks the runner's workflow-command protocol on
//! stdout. [`TracingReporter`] sends the same lines through `tracing`
//! instead. Pick one with [`LogSink`].

use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::actions::command::WorkflowCommand;
use crate::actions::output::append_output;

pub trait Reporter: Send {
    fn info(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    /// Marks the step failed. The process should exit non-zero afterwards.
    fn set_failed(&mut self, message: &str);
    fn set_output(&mut self, name: &str, value: &str);
    /// Registers a value the runner must redact from logs.
    fn set_secret(&mut self, value: &str);
    fn failed(&self) -> bool;
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn info(&mut self, message: &str) {
        (**self).info(message)
    }

    fn warning(&mut self, message: &str) {
        (**self).warning(message)
    }

    fn set_failed(&mut self, message: &str) {
        (**self).set_failed(message)
    }

    fn set_output(&mut self, name: &str, value: &str) {
        (**self).set_output(name, value)
    }

    fn set_secret(&mut self, value: &str) {
        (**self).set_secret(value)
    }

    fn failed(&self) -> bool {
        (**self).failed()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogSink {
    #[default]
    Runner,
    Tracing,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown log sink `{0}` (expected `runner` or `tracing`)")]
pub struct UnknownLogSink(pub String);

impl LogSink {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogSink::Runner => "runner",
            LogSink::Tracing => "tracing",
        }
    }

    pub fn reporter(self, output_file: Option<PathBuf>) -> Box<dyn Reporter> {
        match self {
            LogSink::Runner => Box::new(WorkflowReporter::stdout(output_file)),
            LogSink::Tracing => Box::new(TracingReporter::new(output_file)),
        }
    }
}

impl FromStr for LogSink {
    type Err = UnknownLogSink;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "runner" | "actions" => Ok(LogSink::Runner),
            "tracing" | "console" => Ok(LogSink::Tracing),
            other => Err(UnknownLogSink(other.to_string())),
        }
    }
}

impl fmt::Display for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writes workflow commands to `out` (stdout in production).
pub struct WorkflowReporter<W> {
    out: W,
    output_file: Option<PathBuf>,
    failed: bool,
}

impl WorkflowReporter<std::io::Stdout> {
    pub fn stdout(output_file: Option<PathBuf>) -> Self {
        Self::new(std::io::stdout(), output_file)
    }
}

impl<W: Write + Send> WorkflowReporter<W> {
    pub fn new(out: W, output_file: Option<PathBuf>) -> Self {
        Self {
            out,
            output_file,
            failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, line: &dyn fmt::Display) {
        if let Err(err) = writeln!(self.out, "{line}") {
            tracing::warn!(error = %err, "failed to write runner output");
        }
    }
}

impl<W: Write + Send> Reporter for WorkflowReporter<W> {
    fn info(&mut self, message: &str) {
        self.line(&message);
    }

    fn warning(&mut self, message: &str) {
        self.line(&WorkflowCommand::warning(message));
    }

    fn set_failed(&mut self, message: &str) {
        self.failed = true;
        self.line(&WorkflowCommand::error(message));
    }

    fn set_output(&mut self, name: &str, value: &str) {
        match self.output_file.clone() {
            Some(path) => {
                if let Err(err) = append_output(&path, name, value) {
                    self.warning(&err.to_string());
                }
            }
            None => self.line(&WorkflowCommand::set_output(name, value)),
        }
    }

    fn set_secret(&mut self, value: &str) {
        self.line(&WorkflowCommand::add_mask(value));
    }

    fn failed(&self) -> bool {
        self.failed
    }
}

/// Sends status lines to the installed `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingReporter {
    output_file: Option<PathBuf>,
    failed: bool,
}

impl TracingReporter {
    pub fn new(output_file: Option<PathBuf>) -> Self {
        Self {
            output_file,
            failed: false,
        }
    }
}

impl Reporter for TracingReporter {
    fn info(&mut self, message: &str) {
        tracing::info!("{message}");
    }

    fn warning(&mut self, message: &str) {
        tracing::warn!("{message}");
    }

    fn set_failed(&mut self, message: &str) {
        self.failed = true;
        tracing::error!("{message}");
    }

    fn set_output(&mut self, name: &str, value: &str) {
        match self.output_file.as_deref() {
            Some(path) => {
                if let Err(err) = append_output(path, name, value) {
                    tracing::warn!(error = %err, output = name, "failed to write step output");
                }
            }
            None => tracing::info!(output = name, value, "step output"),
        }
    }

    // Secrets never reach tracing output, nothing to register.
    fn set_secret(&mut self, _value: &str) {}

    fn failed(&self) -> bool {
        self.failed
    }
}
