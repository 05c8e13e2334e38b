//! Binding classified tokens to a command's parameters.
//!
//! The binder walks the token stream once, left to right:
//!
//! - an option introducer consumes the following token as its value
//!   (boolean options are switches and only consume a `true`/`false`);
//! - any other token fills the next unfilled positional slot, lowest ordinal
//!   first;
//! - afterwards, unbound parameters take their defaults, and a parameter
//!   without one fails the bind.
//!
//! A lone `-help`/`-h` short-circuits to a help request before any binding
//! happens. With more tokens present it is an ordinary value.

use command_dispatch_core::{
    CommandDescriptor, FromValue, ParameterDescriptor, Value, ValueType, parse_bool,
};
use tracing::debug;

use crate::error::{ArgumentLookup, BindError, CommandError};
use crate::scanner::{GlobalOption, TokenClass, is_numeric, option_name, scan};

/// Concrete values for every parameter of one command.
///
/// Values are kept in parameter declaration order. Parameters that received
/// no token hold their declared default.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArguments {
    command: Option<String>,
    entries: Vec<(String, Value)>,
}

impl BoundArguments {
    /// Name of the command these arguments were bound for (`None` for the
    /// unnamed default command).
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Looks up a value by parameter name, ignoring case.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Extracts a value by parameter name as a concrete type.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Argument`] when no such parameter exists or
    /// its value has a different type.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T, CommandError> {
        let value = self.value(name).ok_or_else(|| CommandError::Argument {
            name: name.to_string(),
            source: ArgumentLookup::Unknown,
        })?;
        T::from_value(value).map_err(|err| CommandError::Argument {
            name: name.to_string(),
            source: err.into(),
        })
    }

    /// Iterates `(parameter name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of a successful pass over the token stream.
#[derive(Debug, Clone, PartialEq)]
pub enum BindOutcome {
    /// Every parameter has a value.
    Bound(BoundArguments),
    /// The stream was exactly one help flag.
    HelpRequested,
}

/// Binds token streams to one command's parameters.
///
/// # Examples
///
/// ```
/// use command_dispatch::{BindOutcome, Binder};
/// use command_dispatch_core::*;
///
/// let hello = CommandDescriptor::named("hello")
///     .with_parameter(ParameterDescriptor::positional(0, "name", ValueType::String))
///     .with_parameter(
///         ParameterDescriptor::named("age", ValueType::Integer).with_default(Value::Integer(18)),
///     );
///
/// let tokens: Vec<String> = ["Cysharp", "-age", "-128"].iter().map(|s| s.to_string()).collect();
/// let BindOutcome::Bound(args) = Binder::new(&hello).bind(&tokens).unwrap() else {
///     panic!("expected bound arguments");
/// };
/// assert_eq!(args.get::<String>("name").unwrap(), "Cysharp");
/// assert_eq!(args.get::<i64>("age").unwrap(), -128);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Binder<'a> {
    command: &'a CommandDescriptor,
    strict: bool,
}

impl<'a> Binder<'a> {
    pub fn new(command: &'a CommandDescriptor) -> Self {
        Self {
            command,
            strict: false,
        }
    }

    /// Rejects unknown dash-prefixed tokens instead of binding them as values.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Binds `tokens` to the command's parameters.
    ///
    /// # Errors
    ///
    /// Returns the first [`BindError`] encountered; binding stops there.
    pub fn bind(&self, tokens: &[String]) -> Result<BindOutcome, BindError> {
        let scanned = scan(tokens, self.command);
        let command = self.command.display_name();

        if let [only] = scanned.as_slice() {
            if only.class == TokenClass::Global(GlobalOption::Help) {
                debug!(command, "Sole help token, skipping bind");
                return Ok(BindOutcome::HelpRequested);
            }
        }

        let parameters = &self.command.parameters;
        let mut slots: Vec<Option<Value>> = vec![None; parameters.len()];
        let mut positional: Vec<usize> = (0..parameters.len())
            .filter(|&i| parameters[i].position().is_some())
            .collect();
        positional.sort_by_key(|&i| parameters[i].position());
        let mut next_positional = positional.iter();

        let mut cursor = 0;
        while let Some(token) = scanned.get(cursor) {
            match token.class {
                TokenClass::Option(index) => {
                    let param = &parameters[index];
                    if slots[index].is_some() {
                        return Err(BindError::DuplicateOption {
                            parameter: param.name.clone(),
                        });
                    }

                    let next = scanned.get(cursor + 1);
                    if param.value_type == ValueType::Bool {
                        match next.and_then(|t| parse_bool(t.raw)) {
                            Some(flag) => {
                                slots[index] = Some(Value::Bool(flag));
                                cursor += 2;
                            }
                            None => {
                                slots[index] = Some(Value::Bool(true));
                                cursor += 1;
                            }
                        }
                        continue;
                    }

                    let Some(raw) = next else {
                        return Err(BindError::InvalidValue {
                            parameter: param.name.clone(),
                            value: None,
                            reason: format!("expected a value after '{}'", token.raw),
                        });
                    };
                    slots[index] = Some(convert(param, raw.raw)?);
                    cursor += 2;
                }
                TokenClass::Global(_) | TokenClass::Value => {
                    if self.strict && option_name(token.raw).is_some() && !is_numeric(token.raw) {
                        return Err(BindError::UnknownOption {
                            token: token.raw.to_string(),
                        });
                    }
                    let Some(&index) = next_positional.next() else {
                        return Err(BindError::UnexpectedArgument {
                            token: token.raw.to_string(),
                        });
                    };
                    slots[index] = Some(convert(&parameters[index], token.raw)?);
                    cursor += 1;
                }
            }
        }

        let mut entries = Vec::with_capacity(parameters.len());
        for (param, slot) in parameters.iter().zip(slots) {
            let value = match (slot, &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => default.clone(),
                (None, None) => {
                    return Err(BindError::MissingArgument {
                        parameter: param.name.clone(),
                    });
                }
            };
            entries.push((param.name.clone(), value));
        }

        debug!(command, bound = entries.len(), "Bound arguments");
        Ok(BindOutcome::Bound(BoundArguments {
            command: self.command.name.clone(),
            entries,
        }))
    }
}

fn convert(param: &ParameterDescriptor, raw: &str) -> Result<Value, BindError> {
    param
        .value_type
        .parse(raw)
        .map_err(|err| BindError::InvalidValue {
            parameter: param.name.clone(),
            value: Some(raw.to_string()),
            reason: err.to_string(),
        })
}
