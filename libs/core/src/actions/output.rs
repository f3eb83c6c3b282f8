//! File commands: `GITHUB_OUTPUT` and friends take heredoc-style records.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unexpected input: name should not contain the delimiter {0}")]
    DelimiterInName(String),
    #[error("unexpected input: value should not contain the delimiter {0}")]
    DelimiterInValue(String),
    #[error("unable to write file command {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Formats `name<<delim\nvalue\ndelim\n` with a random delimiter.
pub fn key_value_message(name: &str, value: &str) -> Result<String, CommandError> {
    key_value_message_with(name, value, &format!("ghadelimiter_{}", Uuid::new_v4()))
}

fn key_value_message_with(
    name: &str,
    value: &str,
    delimiter: &str,
) -> Result<String, CommandError> {
    if name.contains(delimiter) {
        return Err(CommandError::DelimiterInName(delimiter.to_string()));
    }
    if value.contains(delimiter) {
        return Err(CommandError::DelimiterInValue(delimiter.to_string()));
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

pub fn append_output(path: &Path, name: &str, value: &str) -> Result<(), CommandError> {
    let record = key_value_message(name, value)?;
    let io_err = |source| CommandError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(io_err)?;
    file.write_all(record.as_bytes()).map_err(io_err)
}
