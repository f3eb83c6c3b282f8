//! Step inputs as the GitHub runner exposes them: `with: { channel_id: C1 }`
//! reaches the process as `INPUT_CHANNEL_ID=C1`.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Input required and not supplied: {0}")]
    Missing(String),
}

pub trait InputSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads inputs from the process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvInputs;

impl InputSource for EnvInputs {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl InputSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputOptions {
    pub required: bool,
    pub trim_whitespace: bool,
}

impl InputOptions {
    pub const fn required() -> Self {
        Self {
            required: true,
            trim_whitespace: true,
        }
    }
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            required: false,
            trim_whitespace: true,
        }
    }
}

pub fn input_env_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Returns the input value, or an empty string for an absent optional input.
pub fn get_input<S>(source: &S, name: &str, options: InputOptions) -> Result<String, InputError>
where
    S: InputSource + ?Sized,
{
    let value = source.var(&input_env_key(name)).unwrap_or_default();
    if options.required && value.is_empty() {
        return Err(InputError::Missing(name.to_string()));
    }
    if options.trim_whitespace {
        let trimmed = value.trim();
        if options.required && trimmed.is_empty() {
            return Err(InputError::Missing(name.to_string()));
        }
        return Ok(trimmed.to_string());
    }
    Ok(value)
}
