//! The immutable command descriptor table.

use serde::Serialize;

use crate::CommandDescriptor;
use crate::validate::{ConfigurationError, validate_commands};

/// Registry of every command and its parameter shapes.
///
/// Built once at startup through the fallible [`CommandTable::new`] and
/// read-only afterwards.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::*;
///
/// let table = CommandTable::new(vec![
///     CommandDescriptor::named("hello"),
///     CommandDescriptor::named("konnichiwa"),
/// ])
/// .unwrap();
///
/// assert!(table.default_command().is_none());
/// assert_eq!(table.find("KONNICHIWA").unwrap().name.as_deref(), Some("konnichiwa"));
///
/// // A sole command is the default, even when named.
/// let single = CommandTable::new(vec![CommandDescriptor::named("hello")]).unwrap();
/// assert!(single.default_command().is_some());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CommandTable {
    commands: Vec<CommandDescriptor>,
}

impl CommandTable {
    /// Builds the table, validating every descriptor.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found, most notably
    /// [`AmbiguousDefaultCommand`](ConfigurationError::AmbiguousDefaultCommand)
    /// when more than one descriptor lacks a name.
    pub fn new(commands: Vec<CommandDescriptor>) -> Result<Self, ConfigurationError> {
        if let Some(err) = validate_commands(&commands).into_iter().next() {
            return Err(err);
        }
        Ok(Self { commands })
    }

    /// All descriptors in declaration order.
    pub fn commands(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    /// The command that runs without a leading command-name token.
    ///
    /// This is the unnamed descriptor if there is one, or the only
    /// descriptor when the table holds exactly one.
    pub fn default_command(&self) -> Option<&CommandDescriptor> {
        self.commands
            .iter()
            .find(|c| c.name.is_none())
            .or_else(|| match self.commands.as_slice() {
                [only] => Some(only),
                _ => None,
            })
    }

    /// Finds a command by name or alias, ignoring case.
    pub fn find(&self, token: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.matches(token))
    }

    /// Index of `command` within [`commands`](Self::commands).
    pub fn index_of(&self, command: &CommandDescriptor) -> Option<usize> {
        self.commands.iter().position(|c| std::ptr::eq(c, command))
    }

    /// Returns `true` when exactly one command is registered.
    pub fn is_single_command(&self) -> bool {
        self.commands.len() == 1
    }

    /// Returns `true` when at least one command has a name.
    pub fn has_named_commands(&self) -> bool {
        self.commands.iter().any(|c| c.name.is_some())
    }

    /// Serializes the table as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.commands)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
