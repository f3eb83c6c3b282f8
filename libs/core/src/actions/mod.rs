//! The slice of the GitHub Actions runner protocol the notifier needs: step
//! inputs, workflow commands, step outputs and failure reporting.

pub mod command;
pub mod inputs;
pub mod output;
pub mod reporter;

pub use command::{WorkflowCommand, escape_data, escape_property};
pub use inputs::{EnvInputs, InputError, InputOptions, InputSource, get_input, input_env_key};
pub use output::{CommandError, GITHUB_OUTPUT, append_output, key_value_message};
pub use reporter::{LogSink, Reporter, TracingReporter, UnknownLogSink, WorkflowReporter};
