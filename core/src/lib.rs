//! Core descriptor types and validation for command dispatch.
//!
//! This crate defines the static side of the dispatcher:
//!
//! - [`CommandDescriptor`]: a named (or default) command with its ordered
//!   parameters.
//! - [`ParameterDescriptor`]: a positional or `-named` parameter with a
//!   declared [`ValueType`] and optional default.
//! - [`CommandTable`]: the immutable registry of descriptors, built through
//!   a fallible constructor that rejects ambiguous configurations.
//! - [`Value`] and [`FromValue`]: typed values produced by the per-type
//!   parsers in [`ValueType::parse`].
//!
//! # Example
//!
//! ```
//! use command_dispatch_core::*;
//!
//! let table = CommandTable::new(vec![
//!     CommandDescriptor::named("hello")
//!         .with_parameter(ParameterDescriptor::positional(0, "name", ValueType::String))
//!         .with_parameter(
//!             ParameterDescriptor::named("age", ValueType::Integer)
//!                 .with_default(Value::Integer(18)),
//!         ),
//!     CommandDescriptor::named("konnichiwa"),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert!(table.find("hello").unwrap().find_option("age").is_some());
//!
//! // Two unnamed commands cannot be told apart.
//! let err = CommandTable::new(vec![CommandDescriptor::default(), CommandDescriptor::default()])
//!     .unwrap_err();
//! assert_eq!(err, ConfigurationError::AmbiguousDefaultCommand);
//! ```

mod table;
mod types;
mod validate;
mod value;

pub use table::CommandTable;
pub use types::*;
pub use validate::{ConfigurationError, validate_command, validate_commands};
pub use value::{ConversionError, FromValue, ValueMismatch, parse_bool};
