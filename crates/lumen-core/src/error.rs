//! Crate-level error types.

use std::fmt;

/// Errors produced by the lumen crates.
#[derive(Debug, Clone, PartialEq)]
pub enum LumenError {
    /// Bad construction argument. Fatal to the call that received it.
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// A reactive input (audio, pointer, DOM element) could not be obtained.
    ExternalInputUnavailable(String),
    /// Demo configuration could not be parsed.
    Config(String),
}

impl LumenError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LumenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{name}`: {reason}")
            }
            Self::ExternalInputUnavailable(msg) => {
                write!(f, "external input unavailable: {msg}")
            }
            Self::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for LumenError {}

impl From<serde_json::Error> for LumenError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LumenError>;
