//! Usage text rendering.
//!
//! Rendering is pure text construction from the [`CommandTable`]; writing
//! the result anywhere is the caller's job.

use std::fmt::Write;

use command_dispatch_core::{CommandDescriptor, CommandTable, ParameterDescriptor, ValueType};

use crate::options::AppOptions;
use crate::resolver::Resolution;

const HELP_ROW: (&str, &str) = ("-help, -h", "Show help.");
const VERSION_ROW: (&str, &str) = ("-version", "Show version.");

/// Formats root help, command help and version text.
///
/// # Examples
///
/// ```
/// use command_dispatch::{AppOptions, HelpRenderer};
/// use command_dispatch_core::*;
///
/// let table = CommandTable::new(vec![
///     CommandDescriptor::named("hello").with_summary("Say hello"),
///     CommandDescriptor::named("konnichiwa"),
/// ])
/// .unwrap();
/// let options = AppOptions::default();
/// let help = HelpRenderer::new(&table, "greeter", &options).root_help();
///
/// assert!(help.starts_with("Usage: greeter <command>"));
/// assert!(help.contains("Commands:"));
/// assert!(help.contains("  hello       Say hello"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HelpRenderer<'a> {
    table: &'a CommandTable,
    app_name: &'a str,
    sort_commands: bool,
}

impl<'a> HelpRenderer<'a> {
    pub fn new(table: &'a CommandTable, app_name: &'a str, options: &AppOptions) -> Self {
        Self {
            table,
            app_name,
            sort_commands: options.sort_commands,
        }
    }

    /// Text for a terminal state, or `None` for [`Resolution::Invoke`].
    pub fn render(&self, resolution: &Resolution<'_>, version: &str) -> Option<String> {
        match resolution {
            Resolution::RootHelp => Some(self.root_help()),
            Resolution::Version => Some(self.version(version)),
            Resolution::CommandHelp {
                command,
                failure: None,
            } => Some(self.command_help(command)),
            Resolution::CommandHelp {
                command,
                failure: Some(err),
            } => Some(format!("error: {err}\n\n{}", self.command_help(command))),
            Resolution::Invoke { .. } => None,
        }
    }

    pub fn version(&self, version: &str) -> String {
        format!("{version}\n")
    }

    /// Usage for the whole application.
    ///
    /// Lists named commands under `Commands:`. When a default command
    /// exists, its arguments and options are shown as well.
    pub fn root_help(&self) -> String {
        let mut out = String::new();
        let default = self.table.default_command();
        let mut named: Vec<&CommandDescriptor> = self
            .table
            .commands()
            .iter()
            .filter(|c| c.name.is_some())
            .collect();
        if self.sort_commands {
            named.sort_by_key(|c| c.display_name().to_ascii_lowercase());
        }

        let mut usage = Vec::new();
        if let Some(command) = default {
            usage.push(self.usage_line(None, command));
        }
        if !named.is_empty() {
            usage.push(format!(
                "{} <command> [arguments...] [options...]",
                self.app_name
            ));
        }
        let _ = writeln!(out, "Usage: {}", usage.join("\n       "));

        if let Some(summary) = default.and_then(|c| c.summary.as_deref()) {
            let _ = writeln!(out, "\n{summary}");
        }

        if let Some(command) = default {
            write_section(&mut out, "Arguments:", &argument_rows(command));
        }

        if !named.is_empty() {
            let rows: Vec<(String, String)> = named
                .iter()
                .map(|c| {
                    let mut label = c.display_name().to_string();
                    for alias in &c.aliases {
                        label.push_str(", ");
                        label.push_str(alias);
                    }
                    (label, c.summary.clone().unwrap_or_default())
                })
                .collect();
            write_section(&mut out, "Commands:", &rows);
        }

        let mut options = default.map(option_rows).unwrap_or_default();
        options.push(row(HELP_ROW));
        options.push(row(VERSION_ROW));
        write_section(&mut out, "Options:", &options);

        out
    }

    /// Usage for one command: `Usage:`, `Arguments:` and `Options:`.
    pub fn command_help(&self, command: &CommandDescriptor) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Usage: {}",
            self.usage_line(command.name.as_deref(), command)
        );
        if let Some(summary) = &command.summary {
            let _ = writeln!(out, "\n{summary}");
        }

        let arguments = argument_rows(command);
        if arguments.is_empty() {
            let _ = write!(out, "\nArguments:\n  (none)\n");
        } else {
            write_section(&mut out, "Arguments:", &arguments);
        }

        let mut options = option_rows(command);
        options.push(row(HELP_ROW));
        write_section(&mut out, "Options:", &options);

        out
    }

    fn usage_line(&self, command_name: Option<&str>, command: &CommandDescriptor) -> String {
        let mut line = self.app_name.to_string();
        if let Some(name) = command_name {
            line.push(' ');
            line.push_str(name);
        }
        for param in command.positional_parameters() {
            if param.has_default() {
                let _ = write!(line, " [{}]", param.name);
            } else {
                let _ = write!(line, " <{}>", param.name);
            }
        }
        line.push_str(" [options...]");
        line
    }
}

fn row((left, right): (&str, &str)) -> (String, String) {
    (left.to_string(), right.to_string())
}

fn argument_rows(command: &CommandDescriptor) -> Vec<(String, String)> {
    command
        .positional_parameters()
        .into_iter()
        .map(|param| {
            let index = param.position().unwrap_or_default();
            (
                format!("[{index}] {} <{}>", param.name, param.value_type),
                details(param),
            )
        })
        .collect()
}

fn option_rows(command: &CommandDescriptor) -> Vec<(String, String)> {
    command
        .named_parameters()
        .into_iter()
        .map(|param| {
            let mut label = format!("-{}", param.name);
            for alias in &param.aliases {
                let _ = write!(label, ", -{alias}");
            }
            if param.value_type != ValueType::Bool {
                let _ = write!(label, " <{}>", param.value_type);
            }
            (label, details(param))
        })
        .collect()
}

fn details(param: &ParameterDescriptor) -> String {
    let mut parts: Vec<String> = param.description.iter().cloned().collect();
    match &param.default {
        Some(default) => parts.push(format!("(Default: {default})")),
        None if param.is_named() => parts.push("(Required)".to_string()),
        None => {}
    }
    parts.join(" ")
}

fn write_section(out: &mut String, title: &str, rows: &[(String, String)]) {
    if rows.is_empty() {
        return;
    }
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    let _ = write!(out, "\n{title}\n");
    for (left, right) in rows {
        let line = format!("  {left:<width$}  {right}");
        let _ = writeln!(out, "{}", line.trim_end());
    }
}
