//! Construction-time validation of command descriptors.
//!
//! Catches configuration mistakes (ambiguous default commands, duplicate or
//! reserved names, clashing positional ordinals, defaults of the wrong type)
//! when the [`CommandTable`](crate::CommandTable) is built, so they surface
//! as a startup failure rather than a per-invocation parse error.
//!
//! # Examples
//!
//! ```
//! use command_dispatch_core::*;
//!
//! let hello = CommandDescriptor::named("hello");
//! assert!(validate_command(&hello).is_empty());
//!
//! // Invalid: `-help` is reserved for the dispatcher.
//! let bad = CommandDescriptor::named("hello")
//!     .with_parameter(ParameterDescriptor::named("help", ValueType::Bool));
//! assert!(!validate_command(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{CommandDescriptor, HELP_COMMAND, ParameterKind, RESERVED_OPTION_NAMES};

/// Fatal descriptor table configuration errors.
///
/// Each variant describes a problem that prevents the application from
/// starting. The `Display` impl provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No commands were registered.
    #[error("no commands registered")]
    NoCommands,
    /// More than one descriptor lacks a command name.
    #[error("more than one candidate without an explicit command name")]
    AmbiguousDefaultCommand,
    /// Command name or alias is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Command name or alias collides with the `help` command word.
    #[error("command name is reserved: {0}")]
    ReservedCommandName(String),
    /// Two commands share a name or alias (case-insensitive).
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),
    /// Parameter name or alias is empty or starts with a dash.
    #[error("invalid parameter name in {command}: '{parameter}'")]
    InvalidParameterName { command: String, parameter: String },
    /// Option name collides with a global flag (`help`, `h`, `version`).
    #[error("parameter name is reserved in {command}: {parameter}")]
    ReservedParameterName { command: String, parameter: String },
    /// Two parameters share a name or alias (case-insensitive).
    #[error("duplicate parameter in {command}: {parameter}")]
    DuplicateParameter { command: String, parameter: String },
    /// Two positional parameters share an ordinal.
    #[error("duplicate positional index {index} in {command}")]
    DuplicatePosition { command: String, index: usize },
    /// Aliases were declared on a positional parameter.
    #[error("positional parameter cannot have aliases in {command}: {parameter}")]
    PositionalAlias { command: String, parameter: String },
    /// Declared default does not fit the declared value type.
    #[error("default for {parameter} in {command} is not a valid {expected}")]
    DefaultTypeMismatch {
        command: String,
        parameter: String,
        expected: String,
    },
}

/// Validates a full set of command descriptors.
///
/// Checks table-level invariants (at least one command, at most one default,
/// unique non-reserved names) and then validates each command individually.
/// Stops at the first problem found.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::*;
///
/// let commands = vec![CommandDescriptor::named("a"), CommandDescriptor::named("b")];
/// assert!(validate_commands(&commands).is_empty());
///
/// // Two unnamed candidates → ambiguous
/// let commands = vec![CommandDescriptor::default(), CommandDescriptor::default()];
/// assert_eq!(
///     validate_commands(&commands),
///     vec![ConfigurationError::AmbiguousDefaultCommand]
/// );
/// ```
pub fn validate_commands(commands: &[CommandDescriptor]) -> Vec<ConfigurationError> {
    let mut errors = Vec::new();

    if commands.is_empty() {
        errors.push(ConfigurationError::NoCommands);
        return errors;
    }

    if commands.iter().filter(|c| c.name.is_none()).count() > 1 {
        errors.push(ConfigurationError::AmbiguousDefaultCommand);
        return errors;
    }

    let mut seen: HashSet<String> = HashSet::new();
    for command in commands {
        let names = command.name.iter().chain(command.aliases.iter());
        for name in names {
            let key = name.trim().to_ascii_lowercase();
            if key.is_empty() {
                errors.push(ConfigurationError::EmptyCommandName);
                return errors;
            }
            if key == HELP_COMMAND {
                errors.push(ConfigurationError::ReservedCommandName(name.clone()));
                return errors;
            }
            if !seen.insert(key) {
                errors.push(ConfigurationError::DuplicateCommand(name.clone()));
                return errors;
            }
        }

        errors.extend(validate_command(command));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

/// Validates the parameters of one command.
pub fn validate_command(command: &CommandDescriptor) -> Vec<ConfigurationError> {
    let mut errors = Vec::new();
    let label = command.display_name().to_string();
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut seen_positions: HashSet<usize> = HashSet::new();

    for param in &command.parameters {
        if let ParameterKind::Positional(index) = param.kind {
            if !param.aliases.is_empty() {
                errors.push(ConfigurationError::PositionalAlias {
                    command: label,
                    parameter: param.name.clone(),
                });
                return errors;
            }
            if !seen_positions.insert(index) {
                errors.push(ConfigurationError::DuplicatePosition {
                    command: label,
                    index,
                });
                return errors;
            }
        }

        for name in std::iter::once(&param.name).chain(param.aliases.iter()) {
            if name.trim().is_empty() || name.starts_with('-') {
                errors.push(ConfigurationError::InvalidParameterName {
                    command: label,
                    parameter: name.clone(),
                });
                return errors;
            }

            let key = name.to_ascii_lowercase();
            if param.is_named() && RESERVED_OPTION_NAMES.contains(&key.as_str()) {
                errors.push(ConfigurationError::ReservedParameterName {
                    command: label,
                    parameter: name.clone(),
                });
                return errors;
            }
            if !seen_names.insert(key) {
                errors.push(ConfigurationError::DuplicateParameter {
                    command: label,
                    parameter: name.clone(),
                });
                return errors;
            }
        }

        if let Some(default) = &param.default {
            if !param.value_type.accepts(default) {
                errors.push(ConfigurationError::DefaultTypeMismatch {
                    command: label,
                    parameter: param.name.clone(),
                    expected: param.value_type.to_string(),
                });
                return errors;
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use crate::{ParameterDescriptor, Value, ValueType};

    use super::*;

    #[test]
    fn test_validate_rejects_two_unnamed_commands() {
        let commands = vec![
            CommandDescriptor::default_command(),
            CommandDescriptor::default_command(),
        ];
        assert_eq!(
            validate_commands(&commands),
            vec![ConfigurationError::AmbiguousDefaultCommand]
        );
    }

    #[test]
    fn test_validate_accepts_default_beside_named() {
        let commands = vec![
            CommandDescriptor::default_command(),
            CommandDescriptor::named("hello"),
        ];
        assert!(validate_commands(&commands).is_empty());
    }

    #[test]
    fn test_validate_rejects_duplicate_command_case_insensitive() {
        let commands = vec![
            CommandDescriptor::named("hello"),
            CommandDescriptor::named("konnichiwa").with_alias("HELLO"),
        ];
        assert_eq!(
            validate_commands(&commands),
            vec![ConfigurationError::DuplicateCommand("HELLO".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_help_command_name() {
        let commands = vec![CommandDescriptor::named("Help")];
        assert_eq!(
            validate_commands(&commands),
            vec![ConfigurationError::ReservedCommandName("Help".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_reserved_option_alias() {
        let command = CommandDescriptor::named("hello")
            .with_parameter(ParameterDescriptor::named("height", ValueType::Integer).with_alias("h"));
        assert_eq!(
            validate_command(&command),
            vec![ConfigurationError::ReservedParameterName {
                command: "hello".to_string(),
                parameter: "h".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_allows_positional_named_help() {
        // Positional names are never matched as options.
        let command = CommandDescriptor::named("man")
            .with_parameter(ParameterDescriptor::positional(0, "help", ValueType::String));
        assert!(validate_command(&command).is_empty());
    }

    #[test]
    fn test_validate_rejects_duplicate_position() {
        let command = CommandDescriptor::named("copy")
            .with_parameter(ParameterDescriptor::positional(0, "source", ValueType::Path))
            .with_parameter(ParameterDescriptor::positional(0, "dest", ValueType::Path));
        assert_eq!(
            validate_command(&command),
            vec![ConfigurationError::DuplicatePosition {
                command: "copy".to_string(),
                index: 0,
            }]
        );
    }

    #[test]
    fn test_validate_rejects_mistyped_default() {
        let command = CommandDescriptor::named("hello").with_parameter(
            ParameterDescriptor::named("age", ValueType::Integer)
                .with_default(Value::String("eighteen".into())),
        );
        assert_eq!(
            validate_command(&command),
            vec![ConfigurationError::DefaultTypeMismatch {
                command: "hello".to_string(),
                parameter: "age".to_string(),
                expected: "integer".to_string(),
            }]
        );
    }
}
