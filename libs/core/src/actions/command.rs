//! Workflow commands: `::name key=value,key=value::message` lines the runner
//! picks out of stdout.

use std::fmt;

const CMD_STRING: &str = "::";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkflowCommand {
    name: &'static str,
    properties: Vec<(&'static str, String)>,
    message: String,
}

impl WorkflowCommand {
    pub fn new(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            properties: Vec::new(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("error", message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new("warning", message)
    }

    pub fn add_mask(value: impl Into<String>) -> Self {
        Self::new("add-mask", value)
    }

    /// Legacy output command, used when no `GITHUB_OUTPUT` file is available.
    pub fn set_output(name: &str, value: impl Into<String>) -> Self {
        Self::new("set-output", value).with_property("name", name)
    }

    pub fn with_property(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.properties.push((key, value.into()));
        self
    }
}

impl fmt::Display for WorkflowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CMD_STRING}{}", self.name)?;
        let mut first = true;
        for (key, value) in &self.properties {
            if value.is_empty() {
                continue;
            }
            f.write_str(if first { " " } else { "," })?;
            first = false;
            write!(f, "{key}={}", escape_property(value))?;
        }
        write!(f, "{CMD_STRING}{}", escape_data(&self.message))
    }
}

pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_command_escapes_newlines_and_percent() {
        let cmd = WorkflowCommand::error("100% broken\nsecond line\r");
        assert_eq!(cmd.to_string(), "::error::100%25 broken%0Asecond line%0D");
    }

    #[test]
    fn set_output_carries_escaped_name_property() {
        let cmd = WorkflowCommand::set_output("ts", "1700.1");
        assert_eq!(cmd.to_string(), "::set-output name=ts::1700.1");

        let cmd = WorkflowCommand::new("notice", "done")
            .with_property("title", "a:b")
            .with_property("file", "x,y");
        assert_eq!(cmd.to_string(), "::notice title=a%3Ab,file=x%2Cy::done");
    }

    #[test]
    fn empty_properties_are_skipped() {
        let cmd = WorkflowCommand::warning("careful").with_property("title", "");
        assert_eq!(cmd.to_string(), "::warning::careful");
        assert_eq!(
            WorkflowCommand::add_mask("xoxb-1").to_string(),
            "::add-mask::xoxb-1"
        );
    }
}
