//! Application host: registration, dispatch and exit codes.
//!
//! Commands are registered explicitly as descriptor/handler pairs. The
//! builder validates the resulting [`CommandTable`] once; a configuration
//! error there is the only fatal outcome. Every per-run problem ends in
//! rendered help text instead.

use std::fmt;
use std::io::{self, Write};
use std::process::ExitCode;

use command_dispatch_core::{CommandDescriptor, CommandTable, ConfigurationError};
use tracing::{debug, info, warn};

use crate::binder::BoundArguments;
use crate::error::CommandError;
use crate::help::HelpRenderer;
use crate::options::AppOptions;
use crate::resolver::{Resolution, Resolver};

/// Exit code for a completed command or requested help.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for a failed command or a bind failure.
pub const EXIT_FAILURE: i32 = 1;

/// A command body.
pub type CommandHandler =
    Box<dyn Fn(&BoundArguments, &mut dyn Write) -> Result<(), CommandError>>;

/// Collects commands before the table is validated.
///
/// # Examples
///
/// ```
/// use command_dispatch::ConsoleApp;
/// use command_dispatch_core::*;
///
/// let app = ConsoleApp::builder("greeter")
///     .version("1.2.3")
///     .command(
///         CommandDescriptor::named("hello")
///             .with_parameter(ParameterDescriptor::positional(0, "name", ValueType::String)),
///         |args, out| {
///             writeln!(out, "Hello {}", args.get::<String>("name")?)?;
///             Ok(())
///         },
///     )
///     .build()
///     .unwrap();
///
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let args = ["hello".to_string(), "Cysharp".to_string()];
/// let code = app.run_with(&args, &mut out, &mut err);
/// assert_eq!(code, 0);
/// assert_eq!(String::from_utf8(out).unwrap(), "Hello Cysharp\n");
/// ```
pub struct ConsoleAppBuilder {
    name: String,
    version: String,
    options: AppOptions,
    commands: Vec<CommandDescriptor>,
    handlers: Vec<CommandHandler>,
}

impl ConsoleAppBuilder {
    /// Version string printed for `-version`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn options(mut self, options: AppOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers a command and its body.
    pub fn command<F>(mut self, descriptor: CommandDescriptor, handler: F) -> Self
    where
        F: Fn(&BoundArguments, &mut dyn Write) -> Result<(), CommandError> + 'static,
    {
        self.commands.push(descriptor);
        self.handlers.push(Box::new(handler));
        self
    }

    /// Validates the command table.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when the registered commands are
    /// ambiguous or malformed; the application must not start.
    pub fn build(self) -> Result<ConsoleApp, ConfigurationError> {
        let table = CommandTable::new(self.commands)?;
        debug!(app = %self.name, commands = table.len(), "Built command table");
        Ok(ConsoleApp {
            name: self.name,
            version: self.version,
            options: self.options,
            table,
            handlers: self.handlers,
        })
    }
}

/// A validated command table with its command bodies.
pub struct ConsoleApp {
    name: String,
    version: String,
    options: AppOptions,
    table: CommandTable,
    handlers: Vec<CommandHandler>,
}

impl fmt::Debug for ConsoleApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleApp")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("options", &self.options)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl ConsoleApp {
    /// Starts registering commands for an application called `name`.
    pub fn builder(name: &str) -> ConsoleAppBuilder {
        ConsoleAppBuilder {
            name: name.to_string(),
            version: "0.0.0".to_string(),
            options: AppOptions::default(),
            commands: Vec::new(),
            handlers: Vec::new(),
        }
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn options(&self) -> &AppOptions {
        &self.options
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Program name used in usage lines.
    pub fn app_name(&self) -> &str {
        self.options
            .application_name
            .as_deref()
            .unwrap_or(self.name.as_str())
    }

    pub fn resolve(&self, args: &[String]) -> Resolution<'_> {
        Resolver::new(&self.table, &self.options).resolve(args)
    }

    pub fn help(&self) -> HelpRenderer<'_> {
        HelpRenderer::new(&self.table, self.app_name(), &self.options)
    }

    /// Resolves `args` and either renders text to `out` or runs a command.
    ///
    /// Command failures are reported on `err`. Returns the process exit
    /// code.
    pub fn run_with<W, E>(&self, args: &[String], out: &mut W, err: &mut E) -> i32
    where
        W: Write,
        E: Write,
    {
        let resolution = self.resolve(args);
        debug!(outcome = resolution.label(), "Resolved arguments");

        let (command, arguments) = match resolution {
            Resolution::Invoke { command, arguments } => (command, arguments),
            other => {
                let code = match other {
                    Resolution::CommandHelp {
                        failure: Some(_), ..
                    } => EXIT_FAILURE,
                    _ => EXIT_SUCCESS,
                };
                let text = self.help().render(&other, &self.version).unwrap_or_default();
                if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
                    let _ = writeln!(err, "error: {e}");
                    return EXIT_FAILURE;
                }
                return code;
            }
        };

        let Some(handler) = self
            .table
            .index_of(command)
            .and_then(|index| self.handlers.get(index))
        else {
            let _ = writeln!(err, "error: no handler for {}", command.display_name());
            return EXIT_FAILURE;
        };

        info!(command = command.display_name(), "Invoking command");
        let result = handler(&arguments, out).and_then(|()| out.flush().map_err(CommandError::from));
        match result {
            Ok(()) => EXIT_SUCCESS,
            Err(CommandError::Exit(code)) => code,
            Err(e) => {
                warn!(command = command.display_name(), error = %e, "Command failed");
                let _ = writeln!(err, "error: {e}");
                EXIT_FAILURE
            }
        }
    }

    /// Runs against the process arguments, stdout and stderr.
    pub fn run(&self) -> ExitCode {
        let args: Vec<String> = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        let mut out = io::stdout().lock();
        let mut err = io::stderr().lock();
        let code = self.run_with(&args, &mut out, &mut err);
        ExitCode::from(u8::try_from(code).unwrap_or(1))
    }
}

#[cfg(test)]
mod tests {
    use command_dispatch_core::{ParameterDescriptor, Value, ValueType};

    use super::*;

    fn app() -> ConsoleApp {
        ConsoleApp::builder("greeter")
            .version("1.0.0")
            .command(
                CommandDescriptor::named("hello")
                    .with_parameter(ParameterDescriptor::positional(0, "name", ValueType::String))
                    .with_parameter(
                        ParameterDescriptor::named("age", ValueType::Integer)
                            .with_default(Value::Integer(18)),
                    ),
                |args, out| {
                    let name: String = args.get("name")?;
                    let age: i64 = args.get("age")?;
                    writeln!(out, "Hello {name} ({age})")?;
                    Ok(())
                },
            )
            .command(CommandDescriptor::named("fail"), |_, _| {
                Err(CommandError::Failed("boom".to_string()))
            })
            .command(CommandDescriptor::named("exit"), |_, _| {
                Err(CommandError::Exit(3))
            })
            .build()
            .unwrap()
    }

    fn run(app: &ConsoleApp, tokens: &[&str]) -> (i32, String, String) {
        let args: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = app.run_with(&args, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_invokes_handler() {
        let (code, out, err) = run(&app(), &["hello", "Cysharp", "-age", "-128"]);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, "Hello Cysharp (-128)\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_bind_failure_renders_help_with_failure_code() {
        let (code, out, _) = run(&app(), &["hello"]);
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.starts_with("error: missing required argument 'name'"));
        assert!(out.contains("Arguments:"));
    }

    #[test]
    fn test_help_paths_succeed() {
        for tokens in [&["-help"][..], &["help", "hello"][..], &["nope"][..], &[][..]] {
            let (code, out, _) = run(&app(), tokens);
            assert_eq!(code, EXIT_SUCCESS, "{tokens:?}");
            assert!(out.starts_with("Usage:"), "{tokens:?}");
        }
    }

    #[test]
    fn test_version() {
        let (code, out, _) = run(&app(), &["-version"]);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, "1.0.0\n");
    }

    #[test]
    fn test_handler_errors() {
        let (code, out, err) = run(&app(), &["fail"]);
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(err, "error: boom\n");

        let (code, _, err) = run(&app(), &["exit"]);
        assert_eq!(code, 3);
        assert!(err.is_empty());
    }

    #[test]
    fn test_application_name_option() {
        let app = ConsoleApp::builder("greeter")
            .options(AppOptions {
                application_name: Some("hi".to_string()),
                ..Default::default()
            })
            .command(CommandDescriptor::named("a"), |_, _| Ok(()))
            .command(CommandDescriptor::named("b"), |_, _| Ok(()))
            .build()
            .unwrap();
        let (_, out, _) = run(&app, &[]);
        assert!(out.starts_with("Usage: hi <command>"));
    }

    #[test]
    fn test_ambiguous_configuration_fails_build() {
        let result = ConsoleApp::builder("greeter")
            .command(CommandDescriptor::default_command(), |_, _| Ok(()))
            .command(CommandDescriptor::default_command(), |_, _| Ok(()))
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::AmbiguousDefaultCommand
        );
    }
}
