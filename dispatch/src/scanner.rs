//! Token classification against a command's parameters.
//!
//! A token is an option introducer only when, after one or two leading
//! dashes, it names a *known* option: one of the active command's Named
//! parameters (or their aliases) or a global flag. Everything else,
//! including negative numbers and unknown `-words`, is a plain value.

use command_dispatch_core::CommandDescriptor;

/// Global flags recognized in every context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalOption {
    /// `-help`, `-h`
    Help,
    /// `-version`
    Version,
}

impl GlobalOption {
    /// Looks up a dash-stripped name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("help") || name.eq_ignore_ascii_case("h") {
            Some(GlobalOption::Help)
        } else if name.eq_ignore_ascii_case("version") {
            Some(GlobalOption::Version)
        } else {
            None
        }
    }

    /// Classifies a raw token (`-help`, `--version`, ...).
    pub fn from_token(token: &str) -> Option<Self> {
        option_name(token).and_then(Self::from_name)
    }
}

/// Classification of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Introduces the Named parameter at this index of the command's
    /// `parameters`.
    Option(usize),
    /// Introduces a global flag.
    Global(GlobalOption),
    /// Anything else.
    Value,
}

/// A raw token annotated with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub raw: &'a str,
    pub class: TokenClass,
}

/// Strips one or two leading dashes, returning the remaining name.
///
/// Returns `None` for tokens without a dash prefix and for tokens whose
/// remainder is empty or still dash-prefixed (`-`, `--`, `---x`).
///
/// # Examples
///
/// ```
/// use command_dispatch::scanner::option_name;
///
/// assert_eq!(option_name("-age"), Some("age"));
/// assert_eq!(option_name("--age"), Some("age"));
/// assert_eq!(option_name("age"), None);
/// assert_eq!(option_name("--"), None);
/// ```
pub fn option_name(token: &str) -> Option<&str> {
    let name = token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))?;
    if name.is_empty() || name.starts_with('-') {
        None
    } else {
        Some(name)
    }
}

/// Classifies one token against `command`.
///
/// Command options take precedence over global flags; table validation
/// keeps the two name sets disjoint.
pub fn classify(token: &str, command: &CommandDescriptor) -> TokenClass {
    let Some(name) = option_name(token) else {
        return TokenClass::Value;
    };
    if let Some(index) = command.find_option(name) {
        return TokenClass::Option(index);
    }
    match GlobalOption::from_name(name) {
        Some(global) => TokenClass::Global(global),
        None => TokenClass::Value,
    }
}

/// Classifies every token in order.
pub fn scan<'a>(tokens: &'a [String], command: &CommandDescriptor) -> Vec<Token<'a>> {
    tokens
        .iter()
        .map(|raw| Token {
            raw: raw.as_str(),
            class: classify(raw, command),
        })
        .collect()
}

/// Returns `true` if `token` reads as a signed integer or finite float.
pub fn is_numeric(token: &str) -> bool {
    token.parse::<i64>().is_ok() || token.parse::<f64>().is_ok_and(f64::is_finite)
}
