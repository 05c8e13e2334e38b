//! Application options for the dispatcher.
//!
//! Options are plain data with serde defaults, so a host can build them in
//! code or load them from YAML.
//!
//! # Example YAML
//!
//! ```yaml
//! application_name: greeter
//! strict_options: false
//! sort_commands: true
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Behavior switches for resolution and help rendering.
///
/// # Examples
///
/// ```
/// use command_dispatch::AppOptions;
///
/// let options = AppOptions::from_yaml_str("strict_options: true").unwrap();
/// assert!(options.strict_options);
/// assert!(!options.sort_commands);
/// assert!(options.application_name.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    /// Program name shown in `Usage:` lines. Falls back to the name given
    /// to [`ConsoleApp::builder`](crate::ConsoleApp::builder).
    pub application_name: Option<String>,
    /// Reject dash-prefixed tokens that match no option and are not numbers,
    /// instead of binding them as plain values.
    pub strict_options: bool,
    /// List commands alphabetically in root help instead of in declaration
    /// order.
    pub sort_commands: bool,
}

impl AppOptions {
    /// Loads options from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](OptionsError::Io) if the file cannot be read, or
    /// [`Yaml`](OptionsError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let options = serde_yaml::from_reader(reader)?;
        Ok(options)
    }

    /// Parses options from a YAML string.
    pub fn from_yaml_str(raw: &str) -> Result<Self, OptionsError> {
        Ok(serde_yaml::from_str(raw)?)
    }
}
