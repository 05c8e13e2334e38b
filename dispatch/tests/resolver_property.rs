use command_dispatch::{AppOptions, HelpRenderer, Resolution, Resolver};
use command_dispatch_core::{
    CommandDescriptor, CommandTable, ParameterDescriptor, Value, ValueType,
};
use proptest::collection::vec;
use proptest::prelude::*;

fn table() -> CommandTable {
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

/// A default command beside named ones.
fn mixed_table() -> CommandTable {
    CommandTable::new(vec![
        CommandDescriptor::default_command()
            .with_parameter(ParameterDescriptor::positional(0, "path", ValueType::Path)),
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

fn is_reserved_word(token: &str) -> bool {
    ["hello", "konnichiwa", "help"]
        .iter()
        .any(|word| word.eq_ignore_ascii_case(token))
}

fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("hello".to_string()),
        Just("konnichiwa".to_string()),
        Just("help".to_string()),
        Just("-help".to_string()),
        Just("-h".to_string()),
        Just("-version".to_string()),
        Just("-age".to_string()),
        Just("--age".to_string()),
        Just("-".to_string()),
        Just(String::new()),
        any::<i64>().prop_map(|n| n.to_string()),
        "-?[a-zA-Z][a-zA-Z0-9_-]{0,8}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn resolution_is_deterministic(args in vec(token(), 0..6)) {
        for table in [table(), mixed_table()] {
            let options = AppOptions::default();
            let resolver = Resolver::new(&table, &options);
            let renderer = HelpRenderer::new(&table, "app", &options);

            let first = resolver.resolve(&args);
            let second = resolver.resolve(&args);
            prop_assert_eq!(
                renderer.render(&first, "1.0.0"),
                renderer.render(&second, "1.0.0")
            );
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn every_terminal_state_renders(args in vec(token(), 0..6)) {
        let table = table();
        let options = AppOptions::default();
        let resolution = Resolver::new(&table, &options).resolve(&args);
        let rendered = HelpRenderer::new(&table, "app", &options).render(&resolution, "1.0.0");

        match &resolution {
            Resolution::Invoke { .. } => prop_assert!(rendered.is_none()),
            Resolution::CommandHelp { failure: Some(_), .. } => {
                let text = rendered.unwrap_or_default();
                prop_assert!(text.starts_with("error: "));
                prop_assert!(text.contains("Usage: app "));
            }
            Resolution::Version => prop_assert_eq!(rendered.as_deref(), Some("1.0.0\n")),
            _ => prop_assert!(rendered.unwrap_or_default().starts_with("Usage: app")),
        }
    }

    #[test]
    fn unknown_first_token_shows_root_help(
        first in "[a-zA-Z][a-zA-Z0-9]{0,12}",
        rest in vec(token(), 0..4),
    ) {
        prop_assume!(!is_reserved_word(&first));
        let options = AppOptions::default();
        let mut args = vec![first];
        args.extend(rest);
        for table in [table(), mixed_table()] {
            prop_assert_eq!(Resolver::new(&table, &options).resolve(&args), Resolution::RootHelp);
        }
    }

    #[test]
    fn hello_binds_any_name_and_age(name in "[a-zA-Z][a-zA-Z0-9 ]{0,16}", age in any::<i64>()) {
        let table = table();
        let options = AppOptions::default();
        let args = vec!["hello".to_string(), name.clone(), "-age".to_string(), age.to_string()];

        let Resolution::Invoke { arguments, .. } = Resolver::new(&table, &options).resolve(&args) else {
            return Err(TestCaseError::fail("expected invoke"));
        };
        prop_assert_eq!(arguments.get::<String>("name").ok(), Some(name));
        prop_assert_eq!(arguments.get::<i64>("age").ok(), Some(age));
    }
}
