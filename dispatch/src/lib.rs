//! Command-line dispatch over a declarative command table.
//!
//! Given a process's argument vector and a validated
//! [`CommandTable`](command_dispatch_core::CommandTable), this crate decides
//! which of *root help*, *command help*, *version* or *invoke* applies, binds
//! tokens to typed parameters, and renders usage text whenever it cannot
//! (or should not) invoke anything.
//!
//! # Main entry points
//!
//! - [`ConsoleApp`]: register commands with their bodies, then
//!   [`run`](ConsoleApp::run) against the process arguments.
//! - [`Resolver`]: pure resolution of an argument vector to a
//!   [`Resolution`].
//! - [`Binder`]: bind a token stream to one command's parameters.
//! - [`HelpRenderer`]: root and command usage text.
//!
//! # Example
//!
//! ```
//! use command_dispatch::ConsoleApp;
//! use command_dispatch_core::*;
//!
//! let app = ConsoleApp::builder("greeter")
//!     .command(
//!         CommandDescriptor::named("hello")
//!             .with_parameter(ParameterDescriptor::positional(0, "name", ValueType::String))
//!             .with_parameter(
//!                 ParameterDescriptor::named("age", ValueType::Integer)
//!                     .with_default(Value::Integer(18)),
//!             ),
//!         |args, out| {
//!             let name: String = args.get("name")?;
//!             let age: i64 = args.get("age")?;
//!             writeln!(out, "Hello {name} ({age})")?;
//!             Ok(())
//!         },
//!     )
//!     .command(CommandDescriptor::named("konnichiwa"), |_, out| {
//!         writeln!(out, "Konnichiwa")?;
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! let args: Vec<String> = ["hello", "Cysharp", "-age", "-128"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let mut out = Vec::new();
//! app.run_with(&args, &mut out, &mut std::io::sink());
//! assert_eq!(String::from_utf8(out).unwrap(), "Hello Cysharp (-128)\n");
//! ```

mod app;
pub mod binder;
mod error;
pub mod help;
mod options;
pub mod resolver;
pub mod scanner;

pub use app::{CommandHandler, ConsoleApp, ConsoleAppBuilder, EXIT_FAILURE, EXIT_SUCCESS};
pub use binder::{BindOutcome, Binder, BoundArguments};
pub use error::{ArgumentLookup, BindError, CommandError, OptionsError};
pub use help::HelpRenderer;
pub use options::AppOptions;
pub use resolver::{Resolution, Resolver};
