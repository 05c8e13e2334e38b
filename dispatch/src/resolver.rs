//! Top-level dispatch: from a raw argument vector to a terminal state.
//!
//! Rules are evaluated in order against the leading tokens:
//!
//! 1. No arguments: invoke the default command, or show root help.
//! 2. `-help` / `-h`: root help.
//! 3. `-version`: version.
//! 4. `help [command]`: that command's help, or root help.
//! 5. A known command name: bind the remaining tokens and invoke.
//! 6. An unknown word while named commands exist: root help.
//! 7. Anything else: the default command receives every token; without a
//!    default command, root help.
//!
//! Binding failures degrade to command help annotated with the error.
//! Nothing here fails; resolution is pure given the same table and
//! arguments.

use command_dispatch_core::{CommandDescriptor, CommandTable, HELP_COMMAND};
use tracing::debug;

use crate::binder::{BindOutcome, Binder, BoundArguments};
use crate::error::BindError;
use crate::options::AppOptions;
use crate::scanner::GlobalOption;

/// Terminal state reached for one argument vector.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// Render usage for the whole application.
    RootHelp,
    /// Emit the application version.
    Version,
    /// Render usage for one command, optionally explaining a bind failure.
    CommandHelp {
        command: &'a CommandDescriptor,
        failure: Option<BindError>,
    },
    /// Call the command body with fully bound arguments.
    Invoke {
        command: &'a CommandDescriptor,
        arguments: BoundArguments,
    },
}

impl Resolution<'_> {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Resolution::RootHelp => "root-help",
            Resolution::Version => "version",
            Resolution::CommandHelp { failure: None, .. } => "command-help",
            Resolution::CommandHelp { failure: Some(_), .. } => "bind-failure",
            Resolution::Invoke { .. } => "invoke",
        }
    }
}

/// Resolves argument vectors against a [`CommandTable`].
///
/// # Examples
///
/// ```
/// use command_dispatch::{AppOptions, Resolution, Resolver};
/// use command_dispatch_core::*;
///
/// let table = CommandTable::new(vec![
///     CommandDescriptor::named("hello"),
///     CommandDescriptor::named("konnichiwa"),
/// ])
/// .unwrap();
/// let options = AppOptions::default();
/// let resolver = Resolver::new(&table, &options);
///
/// assert_eq!(resolver.resolve(&[]), Resolution::RootHelp);
/// assert_eq!(resolver.resolve(&["-version".to_string()]), Resolution::Version);
/// assert!(matches!(
///     resolver.resolve(&["hello".to_string()]),
///     Resolution::Invoke { .. }
/// ));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    table: &'a CommandTable,
    strict: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a CommandTable, options: &AppOptions) -> Self {
        Self {
            table,
            strict: options.strict_options,
        }
    }

    /// Resolves `args` (without the program name) to a terminal state.
    pub fn resolve(&self, args: &[String]) -> Resolution<'a> {
        let Some(first) = args.first() else {
            return match self.table.default_command() {
                Some(command) => self.invoke(command, &[]),
                None => {
                    debug!("No arguments and no default command");
                    Resolution::RootHelp
                }
            };
        };

        match GlobalOption::from_token(first) {
            Some(GlobalOption::Help) => return Resolution::RootHelp,
            Some(GlobalOption::Version) => return Resolution::Version,
            None => {}
        }

        if first.eq_ignore_ascii_case(HELP_COMMAND) {
            return match args.get(1).and_then(|name| self.table.find(name)) {
                Some(command) => Resolution::CommandHelp {
                    command,
                    failure: None,
                },
                None => Resolution::RootHelp,
            };
        }

        if let Some(command) = self.table.find(first) {
            return self.invoke(command, &args[1..]);
        }

        // A mistyped command name must not reach the default command.
        if self.is_multi_command() && !first.starts_with('-') {
            debug!(token = %first, "Unknown command");
            return Resolution::RootHelp;
        }

        match self.table.default_command() {
            Some(command) => self.invoke(command, args),
            None => {
                debug!(token = %first, "Unknown command");
                Resolution::RootHelp
            }
        }
    }

    fn is_multi_command(&self) -> bool {
        self.table.has_named_commands() && !self.table.is_single_command()
    }

    fn invoke(&self, command: &'a CommandDescriptor, tokens: &[String]) -> Resolution<'a> {
        debug!(
            command = command.display_name(),
            tokens = tokens.len(),
            "Selected command"
        );
        match Binder::new(command).strict(self.strict).bind(tokens) {
            Ok(BindOutcome::Bound(arguments)) => Resolution::Invoke { command, arguments },
            Ok(BindOutcome::HelpRequested) => Resolution::CommandHelp {
                command,
                failure: None,
            },
            Err(err) => {
                debug!(command = command.display_name(), error = %err, "Binding failed");
                Resolution::CommandHelp {
                    command,
                    failure: Some(err),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use command_dispatch_core::{ParameterDescriptor, Value, ValueType};

    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn multiple() -> CommandTable {
        CommandTable::new(vec![
            CommandDescriptor::named("hello")
                .with_parameter(ParameterDescriptor::positional(0, "name", ValueType::String))
                .with_parameter(
                    ParameterDescriptor::named("age", ValueType::Integer)
                        .with_default(Value::Integer(18)),
                ),
            CommandDescriptor::named("konnichiwa"),
        ])
        .unwrap()
    }

    fn single() -> CommandTable {
        CommandTable::new(vec![CommandDescriptor::default_command().with_parameter(
            ParameterDescriptor::positional(0, "name", ValueType::String),
        )])
        .unwrap()
    }

    fn resolve<'a>(table: &'a CommandTable, tokens: &[&str]) -> Resolution<'a> {
        Resolver::new(table, &AppOptions::default()).resolve(&args(tokens))
    }

    fn invoked_name(resolution: &Resolution<'_>) -> Option<String> {
        match resolution {
            Resolution::Invoke { arguments, .. } => arguments.get::<String>("name").ok(),
            _ => None,
        }
    }

    #[test]
    fn test_empty_multi_command_is_root_help() {
        assert_eq!(resolve(&multiple(), &[]), Resolution::RootHelp);
    }

    #[test]
    fn test_empty_single_command_binds_nothing() {
        let table = single();
        assert!(matches!(
            resolve(&table, &[]),
            Resolution::CommandHelp {
                failure: Some(BindError::MissingArgument { .. }),
                ..
            }
        ));
    }

    #[test]
    fn test_global_flags_first() {
        let table = multiple();
        assert_eq!(resolve(&table, &["-help"]), Resolution::RootHelp);
        assert_eq!(resolve(&table, &["-h", "hello"]), Resolution::RootHelp);
        assert_eq!(resolve(&table, &["--version"]), Resolution::Version);
    }

    #[test]
    fn test_help_command_word() {
        let table = multiple();
        let Resolution::CommandHelp { command, failure } = resolve(&table, &["help", "HELLO", "x"])
        else {
            panic!("expected command help");
        };
        assert_eq!(command.name.as_deref(), Some("hello"));
        assert!(failure.is_none());

        assert_eq!(resolve(&table, &["help"]), Resolution::RootHelp);
        assert_eq!(resolve(&table, &["help", "-foo", "-bar"]), Resolution::RootHelp);
    }

    #[test]
    fn test_unknown_command_is_root_help() {
        assert_eq!(
            resolve(&multiple(), &["unknown-command"]),
            Resolution::RootHelp
        );
    }

    #[test]
    fn test_command_args_follow_name() {
        let table = multiple();
        let resolution = resolve(&table, &["hello", "Cysharp", "-age", "-128"]);
        assert_eq!(invoked_name(&resolution).as_deref(), Some("Cysharp"));
    }

    #[test]
    fn test_sole_help_after_command_is_command_help() {
        let table = multiple();
        assert!(matches!(
            resolve(&table, &["hello", "-help"]),
            Resolution::CommandHelp { failure: None, .. }
        ));
        let resolution = resolve(&table, &["hello", "help"]);
        assert_eq!(invoked_name(&resolution).as_deref(), Some("help"));
    }

    #[test]
    fn test_default_command_takes_unknown_first_token() {
        let table = single();
        let resolution = resolve(&table, &["Cysharp"]);
        assert_eq!(invoked_name(&resolution).as_deref(), Some("Cysharp"));
    }

    #[test]
    fn test_mixed_table_unknown_word_is_root_help() {
        let table = CommandTable::new(vec![
            CommandDescriptor::default_command().with_parameter(
                ParameterDescriptor::named("path", ValueType::String)
                    .with_default(Value::String(".".to_string())),
            ),
            CommandDescriptor::named("hello"),
            CommandDescriptor::named("konnichiwa"),
        ])
        .unwrap();

        assert_eq!(resolve(&table, &["helo"]), Resolution::RootHelp);
        assert_eq!(resolve(&table, &["helo", "-path", "x"]), Resolution::RootHelp);

        let Resolution::Invoke { command, arguments } = resolve(&table, &["-path", "src"]) else {
            panic!("expected the default command");
        };
        assert!(command.name.is_none());
        assert_eq!(arguments.get::<String>("path").unwrap(), "src");

        assert!(matches!(
            resolve(&table, &[]),
            Resolution::Invoke { command, .. } if command.name.is_none()
        ));
    }

    #[test]
    fn test_sole_named_command_is_default() {
        let table = CommandTable::new(vec![CommandDescriptor::named("hello").with_parameter(
            ParameterDescriptor::positional(0, "name", ValueType::String),
        )])
        .unwrap();
        assert_eq!(
            invoked_name(&resolve(&table, &["hello", "a"])).as_deref(),
            Some("a")
        );
        assert_eq!(
            invoked_name(&resolve(&table, &["a"])).as_deref(),
            Some("a")
        );
    }

    #[test]
    fn test_strict_option_from_app_options() {
        let table = multiple();
        let options = AppOptions {
            strict_options: true,
            ..Default::default()
        };
        let resolution = Resolver::new(&table, &options).resolve(&args(&["hello", "-nmae"]));
        assert_eq!(resolution.label(), "bind-failure");
    }
}
