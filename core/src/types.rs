//! Descriptor type definitions for command dispatch.
//!
//! This module defines the static metadata the dispatcher works from: which
//! commands exist, which parameters each command takes, and how each
//! parameter is bound (by position or by `-name`). The types serialize with
//! [`serde`] so a table can be exported for inspection.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Option names reserved for the dispatcher's global flags.
///
/// Matched case-insensitively after stripping one or two leading dashes.
pub const RESERVED_OPTION_NAMES: &[&str] = &["help", "h", "version"];

/// Command word that introduces help (`app help [command]`).
pub const HELP_COMMAND: &str = "help";

/// Declared type of a parameter.
///
/// Each variant selects one of the typed parsers in
/// [`ValueType::parse`](crate::ValueType::parse).
///
/// # Examples
///
/// ```
/// use command_dispatch_core::ValueType;
///
/// let vt = ValueType::default();
/// assert_eq!(vt, ValueType::String);
///
/// let format = ValueType::Choice(vec!["json".into(), "text".into()]);
/// assert_eq!(format.to_string(), "json|text");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ValueType {
    /// Verbatim string (the default).
    #[default]
    String,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit float.
    Float,
    /// `true` / `false`. Named boolean parameters also act as switches.
    Bool,
    /// Filesystem path.
    Path,
    /// One of a fixed set of spellings, matched case-insensitively.
    Choice(Vec<String>),
    /// JSON array or comma-separated list of the inner type.
    List(Box<ValueType>),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => f.write_str("string"),
            ValueType::Integer => f.write_str("integer"),
            ValueType::Float => f.write_str("float"),
            ValueType::Bool => f.write_str("bool"),
            ValueType::Path => f.write_str("path"),
            ValueType::Choice(choices) => f.write_str(&choices.join("|")),
            ValueType::List(inner) => write!(f, "{inner}[]"),
        }
    }
}

/// A concrete, typed argument value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Path(PathBuf),
    List(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Path(p) => write!(f, "{}", p.display()),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// How a parameter receives its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    /// Bound by order among plain values; lower ordinals bind first.
    Positional(usize),
    /// Bound by a preceding `-name` token.
    Named,
}

/// Schema for a single command parameter.
///
/// Use [`positional`](ParameterDescriptor::positional) or
/// [`named`](ParameterDescriptor::named) to create one, then chain builder
/// methods.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{ParameterDescriptor, ParameterKind, Value, ValueType};
///
/// let name = ParameterDescriptor::positional(0, "name", ValueType::String);
/// assert_eq!(name.kind, ParameterKind::Positional(0));
/// assert!(!name.has_default());
///
/// let age = ParameterDescriptor::named("age", ValueType::Integer)
///     .with_alias("a")
///     .with_default(Value::Integer(18));
/// assert!(age.has_default());
/// assert!(age.matches_option("AGE"));
/// assert!(age.matches_option("a"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name, used as the option name for [`ParameterKind::Named`].
    pub name: String,
    pub kind: ParameterKind,
    pub value_type: ValueType,
    /// Value used when no token binds the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Alternative option names (Named parameters only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl ParameterDescriptor {
    /// Creates a positional parameter bound at ordinal `index`.
    pub fn positional(index: usize, name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            kind: ParameterKind::Positional(index),
            value_type,
            default: None,
            description: None,
            aliases: Vec::new(),
        }
    }

    /// Creates a parameter bound by `-name`.
    pub fn named(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            kind: ParameterKind::Named,
            value_type,
            default: None,
            description: None,
            aliases: Vec::new(),
        }
    }

    /// Sets the default value, making the parameter optional.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Adds an alternative option name.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn is_named(&self) -> bool {
        self.kind == ParameterKind::Named
    }

    /// Returns the positional ordinal, if any.
    pub fn position(&self) -> Option<usize> {
        match self.kind {
            ParameterKind::Positional(index) => Some(index),
            ParameterKind::Named => None,
        }
    }

    /// Checks a dash-stripped option name against the name and aliases.
    ///
    /// Always `false` for positional parameters.
    pub fn matches_option(&self, option: &str) -> bool {
        self.is_named()
            && (self.name.eq_ignore_ascii_case(option)
                || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(option)))
    }
}

/// Schema for a dispatchable command.
///
/// A descriptor without a name is the *default* command: it runs when no
/// command-name token leads the argument vector.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::*;
///
/// let hello = CommandDescriptor::named("hello")
///     .with_summary("Say hello")
///     .with_parameter(ParameterDescriptor::positional(0, "name", ValueType::String))
///     .with_parameter(
///         ParameterDescriptor::named("age", ValueType::Integer).with_default(Value::Integer(18)),
///     );
///
/// assert!(hello.matches("HELLO"));
/// assert_eq!(hello.positional_parameters().len(), 1);
/// assert_eq!(hello.named_parameters().len(), 1);
/// assert!(hello.find_option("age").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Command name; `None` marks the default command.
    pub name: Option<String>,
    /// One-line summary for root help.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Alternative command names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterDescriptor>,
}

impl CommandDescriptor {
    /// Creates the unnamed default command.
    pub fn default_command() -> Self {
        Self::default()
    }

    /// Creates a command invoked by `name`.
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Returns `true` if `token` equals the name or an alias, ignoring case.
    pub fn matches(&self, token: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.eq_ignore_ascii_case(token))
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(token))
    }

    /// Positional parameters sorted by ordinal.
    pub fn positional_parameters(&self) -> Vec<&ParameterDescriptor> {
        let mut positional: Vec<&ParameterDescriptor> = self
            .parameters
            .iter()
            .filter(|p| p.position().is_some())
            .collect();
        positional.sort_by_key(|p| p.position());
        positional
    }

    /// Named parameters in declaration order.
    pub fn named_parameters(&self) -> Vec<&ParameterDescriptor> {
        self.parameters.iter().filter(|p| p.is_named()).collect()
    }

    /// Index (into `parameters`) of the Named parameter matching `option`.
    pub fn find_option(&self, option: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.matches_option(option))
    }

    /// Name used in help and log output.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(default)")
    }
}
