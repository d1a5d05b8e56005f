//! Parameter file loading.
//!
//! A parameter file is TOML with a `[parameters]` table keyed by registry key
//! and an optional `[output]` table:
//!
//! ```toml
//! [parameters]
//! sigma_v = 7000.0
//! sigma_H = 6000.0
//! sigma_h = 4000.0
//! alpha = 30.0
//! i = 0.0
//! failure_method = "Mohr"
//!
//! [output]
//! precision = 2
//! format = "text"
//! ```
//!
//! Values may be written as numbers or quoted strings. Strings are kept as raw
//! form text, so a non-numeric string is reported against its key when the
//! form is read, not when the file is parsed.

use crate::error::{Error, Result};
use crate::form::{FailureMethod, Form};
use crate::params::keys;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default number of decimal places in formatted output.
pub const DEFAULT_PRECISION: usize = 2;

/// Raw parameter value as written in the file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Number(f64),
    Text(String),
}

/// Output rendering format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// `[output]` table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Decimal places for each component.
    pub precision: usize,
    pub format: OutputFormat,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            format: OutputFormat::Text,
        }
    }
}

/// Parsed parameter file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterFile {
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterValue>,
    #[serde(default)]
    pub output: OutputSettings,
}

impl ParameterFile {
    /// Parse a parameter file from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed TOML or unknown tables.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ParameterFile = toml::from_str(text)?;
        debug!(parameters = file.parameters.len(), "parameter file parsed");
        Ok(file)
    }

    /// Read and parse a parameter file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading parameter file");
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Fill a form from the `[parameters]` table.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownParameter`] for keys outside the registry
    /// - [`Error::InvalidInput`] for a failure method that is not one of the
    ///   known labels, or given as a number
    pub fn to_form(&self) -> Result<Form> {
        let mut form = Form::new();
        for (key, value) in &self.parameters {
            match (key.as_str(), value) {
                (keys::FAILURE_METHOD, ParameterValue::Text(label)) => {
                    form.set_choice(key, label.parse::<FailureMethod>()?)?;
                }
                (keys::FAILURE_METHOD, ParameterValue::Number(_)) => {
                    return Err(Error::invalid_input(key.as_str(), "expected a failure method name"));
                }
                (_, ParameterValue::Number(v)) => form.set_numeric(key, v.to_string())?,
                (_, ParameterValue::Text(text)) => form.set_numeric(key, text.clone())?,
            }
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StressInput;
    use std::io::Write;

    const SAMPLE: &str = r#"
[parameters]
sigma_v = 7000
sigma_H = 6000.0
sigma_h = "4000"
alpha = 30.0
i = 0.0
phi = 0.28
failure_method = "Mogi-Coulomb"

[output]
precision = 3
format = "json"
"#;

    #[test]
    fn test_parse_sample() {
        let file = ParameterFile::from_toml_str(SAMPLE).unwrap();
        assert_eq!(file.parameters.len(), 7);
        assert_eq!(file.parameters["sigma_v"], ParameterValue::Number(7000.0));
        assert_eq!(file.parameters["sigma_h"], ParameterValue::Text("4000".into()));
        assert_eq!(file.output.precision, 3);
        assert_eq!(file.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_output_defaults() {
        let file = ParameterFile::from_toml_str("[parameters]\nsigma_v = 1.0\n").unwrap();
        assert_eq!(file.output, OutputSettings::default());
        assert_eq!(file.output.precision, DEFAULT_PRECISION);
    }

    #[test]
    fn test_to_form() {
        let form = ParameterFile::from_toml_str(SAMPLE).unwrap().to_form().unwrap();
        assert_eq!(form.failure_method(), Some(FailureMethod::MogiCoulomb));
        assert_eq!(
            form.stress_input().unwrap(),
            StressInput::new(4000.0, 6000.0, 7000.0, 30.0, 0.0)
        );
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let file = ParameterFile::from_toml_str("[parameters]\nporosity = 0.2\n").unwrap();
        assert!(matches!(file.to_form(), Err(Error::UnknownParameter(k)) if k == "porosity"));
    }

    #[test]
    fn test_bad_failure_method() {
        let file = ParameterFile::from_toml_str("[parameters]\nfailure_method = 2\n").unwrap();
        assert!(matches!(file.to_form(), Err(Error::InvalidInput { .. })));

        let file =
            ParameterFile::from_toml_str("[parameters]\nfailure_method = \"Tresca\"\n").unwrap();
        assert!(file.to_form().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            ParameterFile::from_toml_str("[parameters\nsigma_v = 1"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ParameterFile::from_toml_str("[display]\nprecision = 1\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let loaded = ParameterFile::load(file.path()).unwrap();
        assert_eq!(loaded.output.precision, 3);

        let missing = ParameterFile::load("/nonexistent/sandpro/params.toml");
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
