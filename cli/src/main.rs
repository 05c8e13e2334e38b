use std::io::Write;
use std::process::ExitCode;

use command_dispatch::{AppOptions, BoundArguments, CommandError, ConsoleApp};
use command_dispatch_core::{CommandDescriptor, ParameterDescriptor, Value, ValueType};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming an optional YAML options file.
const CONFIG_ENV: &str = "GREETER_CONFIG";

/// Upper bound for `echo -repeat`.
const MAX_REPEAT: usize = 10_000;

/// Exit code when the application cannot start.
const EXIT_CONFIGURATION: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = match load_options() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(EXIT_CONFIGURATION);
        }
    };

    match build_app(options) {
        Ok(app) => app.run(),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_CONFIGURATION)
        }
    }
}

fn load_options() -> Result<AppOptions, String> {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return Ok(AppOptions::default());
    };
    debug!(path = ?path, "Loading application options");
    AppOptions::load(&path)
        .map_err(|err| format!("failed to load {}: {err}", path.to_string_lossy()))
}

fn build_app(options: AppOptions) -> Result<ConsoleApp, command_dispatch_core::ConfigurationError> {
    ConsoleApp::builder("greeter")
        .version(PACKAGE_VERSION)
        .options(options)
        .command(
            CommandDescriptor::named("hello")
                .with_summary("Greet someone by name.")
                .with_parameter(
                    ParameterDescriptor::positional(0, "name", ValueType::String)
                        .with_description("Who to greet."),
                )
                .with_parameter(
                    ParameterDescriptor::named("age", ValueType::Integer)
                        .with_alias("a")
                        .with_default(Value::Integer(18)),
                ),
            hello,
        )
        .command(
            CommandDescriptor::named("konnichiwa").with_summary("Say konnichiwa."),
            |_, out| {
                writeln!(out, "Konnichiwa")?;
                Ok(())
            },
        )
        .command(
            CommandDescriptor::named("sum")
                .with_summary("Add a list of integers.")
                .with_parameter(
                    ParameterDescriptor::positional(
                        0,
                        "values",
                        ValueType::List(Box::new(ValueType::Integer)),
                    )
                    .with_description("Comma separated or a JSON array."),
                ),
            sum,
        )
        .command(
            CommandDescriptor::named("echo")
                .with_summary("Print a message.")
                .with_alias("say")
                .with_parameter(ParameterDescriptor::positional(0, "message", ValueType::String))
                .with_parameter(
                    ParameterDescriptor::named("repeat", ValueType::Integer)
                        .with_alias("n")
                        .with_default(Value::Integer(1)),
                )
                .with_parameter(
                    ParameterDescriptor::named("upper", ValueType::Bool)
                        .with_description("Upper-case the message.")
                        .with_default(Value::Bool(false)),
                )
                .with_parameter(
                    ParameterDescriptor::named(
                        "format",
                        ValueType::Choice(vec!["plain".to_string(), "json".to_string()]),
                    )
                    .with_default(Value::String("plain".to_string())),
                ),
            echo,
        )
        .build()
}

fn hello(args: &BoundArguments, out: &mut dyn Write) -> Result<(), CommandError> {
    let name: String = args.get("name")?;
    let age: i64 = args.get("age")?;
    writeln!(out, "Hello {name} ({age})")?;
    Ok(())
}

fn sum(args: &BoundArguments, out: &mut dyn Write) -> Result<(), CommandError> {
    let values: Vec<i64> = args.get("values")?;
    let total = values
        .iter()
        .try_fold(0i64, |acc, v| acc.checked_add(*v))
        .ok_or_else(|| CommandError::Failed("sum overflows a 64-bit integer".to_string()))?;
    writeln!(out, "{total}")?;
    Ok(())
}

fn echo(args: &BoundArguments, out: &mut dyn Write) -> Result<(), CommandError> {
    let mut message: String = args.get("message")?;
    let repeat: usize = args.get("repeat")?;
    if repeat > MAX_REPEAT {
        return Err(CommandError::Failed(format!(
            "repeat too large: {repeat} (maximum {MAX_REPEAT})"
        )));
    }
    if args.get::<bool>("upper")? {
        message = message.to_uppercase();
    }

    match args.get::<String>("format")?.as_str() {
        "json" => {
            let lines = vec![message; repeat];
            let body = serde_json::json!({ "lines": lines });
            writeln!(out, "{body}")?;
        }
        _ => {
            for _ in 0..repeat {
                writeln!(out, "{message}")?;
            }
        }
    }
    Ok(())
}
