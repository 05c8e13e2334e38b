//! Error types for argument binding, command bodies and option loading.
//!
//! Binding errors never escape the resolver: they degrade to command help
//! annotated with the error message.

use command_dispatch_core::ValueMismatch;
use thiserror::Error;

/// Why a token stream could not be bound to a command's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A required parameter received no value.
    #[error("missing required argument '{parameter}'")]
    MissingArgument { parameter: String },

    /// A token could not be converted, or an option had no value after it.
    #[error("invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: String,
        value: Option<String>,
        reason: String,
    },

    /// A plain value arrived after every positional slot was filled.
    #[error("unexpected argument '{token}'")]
    UnexpectedArgument { token: String },

    /// The same option was given twice.
    #[error("option '{parameter}' specified more than once")]
    DuplicateOption { parameter: String },

    /// A dash-prefixed token matched no option (strict mode only).
    #[error("unknown option '{token}'")]
    UnknownOption { token: String },
}

impl BindError {
    /// Name of the parameter the error concerns, if any.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            BindError::MissingArgument { parameter }
            | BindError::InvalidValue { parameter, .. }
            | BindError::DuplicateOption { parameter } => Some(parameter.as_str()),
            BindError::UnexpectedArgument { .. } | BindError::UnknownOption { .. } => None,
        }
    }
}

/// Errors returned by command bodies.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A bound argument could not be extracted as the requested type.
    #[error("argument '{name}': {source}")]
    Argument {
        name: String,
        #[source]
        source: ArgumentLookup,
    },

    /// Writing command output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The command failed with a message.
    #[error("{0}")]
    Failed(String),

    /// The command requests a specific process exit code.
    #[error("exit code {0}")]
    Exit(i32),
}

/// Failure looking up a bound argument by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentLookup {
    #[error("no such parameter")]
    Unknown,
    #[error(transparent)]
    Mismatch(#[from] ValueMismatch),
}

/// Errors loading [`AppOptions`](crate::AppOptions).
#[derive(Debug, Error)]
pub enum OptionsError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
