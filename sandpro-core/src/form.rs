//! Input form model.
//!
//! An input sheet is a set of raw entries keyed by registry parameter. Each
//! entry is either free text expected to hold a number, or a choice from a
//! fixed option list. Both expose [`FormField::get_value`], so consumers read
//! a form without caring how a value was entered.

use crate::error::{Error, Result};
use crate::params::{self, keys};
use crate::types::StressInput;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Rock failure criterion selected for the downstream sand-production model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureMethod {
    #[serde(rename = "Mohr")]
    Mohr,
    #[serde(rename = "Mogi-Coulomb")]
    MogiCoulomb,
    #[serde(rename = "Hoek-Brown")]
    HoekBrown,
}

impl FailureMethod {
    pub const ALL: [FailureMethod; 3] = [
        FailureMethod::Mohr,
        FailureMethod::MogiCoulomb,
        FailureMethod::HoekBrown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FailureMethod::Mohr => "Mohr",
            FailureMethod::MogiCoulomb => "Mogi-Coulomb",
            FailureMethod::HoekBrown => "Hoek-Brown",
        }
    }
}

impl fmt::Display for FailureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FailureMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let options: Vec<_> = Self::ALL.iter().map(|m| m.label()).collect();
                Error::invalid_input(
                    keys::FAILURE_METHOD,
                    format!("unknown failure method '{}', expected one of: {}", s, options.join(", ")),
                )
            })
    }
}

/// Parsed value of a form entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Choice(FailureMethod),
}

/// One raw form entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    /// Free text, parsed as a number on read.
    Numeric { key: &'static str, text: String },
    /// Selection from a fixed option list.
    Enumerated { key: &'static str, choice: FailureMethod },
}

impl FormField {
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Numeric { key, .. } | FormField::Enumerated { key, .. } => *key,
        }
    }

    /// Read the entry's value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the key when numeric text is
    /// empty, not a number, or not finite.
    pub fn get_value(&self) -> Result<FieldValue> {
        match self {
            FormField::Numeric { key, text } => parse_number(key, text).map(FieldValue::Number),
            FormField::Enumerated { choice, .. } => Ok(FieldValue::Choice(*choice)),
        }
    }
}

fn parse_number(key: &str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_input(key, "missing value"));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| Error::invalid_input(key, format!("not a number: '{trimmed}'")))?;
    if !value.is_finite() {
        return Err(Error::invalid_input(key, "expected a finite number"));
    }
    Ok(value)
}

/// A filled-in input sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    fields: BTreeMap<&'static str, FormField>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set free-text entry for a numeric parameter.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys and for enumerated parameters.
    pub fn set_numeric(&mut self, key: &str, text: impl Into<String>) -> Result<()> {
        let spec = params::require(key)?;
        if spec.is_enumerated() {
            return Err(Error::invalid_input(key, "expects a choice, not a number"));
        }
        self.fields.insert(
            spec.key,
            FormField::Numeric {
                key: spec.key,
                text: text.into(),
            },
        );
        Ok(())
    }

    /// Set the selection for an enumerated parameter.
    pub fn set_choice(&mut self, key: &str, choice: FailureMethod) -> Result<()> {
        let spec = params::require(key)?;
        if !spec.is_enumerated() {
            return Err(Error::invalid_input(key, "expects a number, not a choice"));
        }
        self.fields.insert(spec.key, FormField::Enumerated { key: spec.key, choice });
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&FormField> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.values()
    }

    /// Numeric value of `key`.
    pub fn number(&self, key: &str) -> Result<f64> {
        match self.fields.get(key) {
            None => Err(Error::invalid_input(key, "missing value")),
            Some(field) => match field.get_value()? {
                FieldValue::Number(v) => Ok(v),
                FieldValue::Choice(_) => Err(Error::invalid_input(key, "expected a number")),
            },
        }
    }

    pub fn failure_method(&self) -> Option<FailureMethod> {
        match self.fields.get(keys::FAILURE_METHOD) {
            Some(FormField::Enumerated { choice, .. }) => Some(*choice),
            _ => None,
        }
    }

    /// Read every entry.
    pub fn values(&self) -> Result<BTreeMap<&'static str, FieldValue>> {
        self.fields
            .values()
            .map(|field| Ok((field.key(), field.get_value()?)))
            .collect()
    }

    /// Check every populated numeric entry against its registry rule.
    ///
    /// Stops at the first failing entry, in key order.
    pub fn validate(&self) -> Result<()> {
        for field in self.fields.values() {
            if let FieldValue::Number(value) = field.get_value()? {
                params::validate(field.key(), value)?;
            }
        }
        debug!(entries = self.fields.len(), "form validated");
        Ok(())
    }

    /// Build the transform input from the stress and orientation entries.
    pub fn stress_input(&self) -> Result<StressInput> {
        Ok(StressInput::new(
            self.number(keys::SIGMA_H_MIN)?,
            self.number(keys::SIGMA_H_MAX)?,
            self.number(keys::SIGMA_V)?,
            self.number(keys::AZIMUTH)?,
            self.number(keys::INCLINATION)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stress_form() -> Form {
        let mut form = Form::new();
        form.set_numeric("sigma_h", "4000").unwrap();
        form.set_numeric("sigma_H", "6000").unwrap();
        form.set_numeric("sigma_v", " 7000.0 ").unwrap();
        form.set_numeric("alpha", "30").unwrap();
        form.set_numeric("i", "0").unwrap();
        form
    }

    #[test]
    fn test_failure_method_parse() {
        assert_eq!("Mohr".parse::<FailureMethod>().unwrap(), FailureMethod::Mohr);
        assert_eq!(
            "mogi-coulomb".parse::<FailureMethod>().unwrap(),
            FailureMethod::MogiCoulomb
        );
        assert_eq!(FailureMethod::HoekBrown.to_string(), "Hoek-Brown");
        assert!("Drucker-Prager".parse::<FailureMethod>().is_err());
    }

    #[test]
    fn test_get_value_uniform() {
        let numeric = FormField::Numeric {
            key: "phi",
            text: "0.25".into(),
        };
        let choice = FormField::Enumerated {
            key: "failure_method",
            choice: FailureMethod::Mohr,
        };
        assert_eq!(numeric.get_value().unwrap(), FieldValue::Number(0.25));
        assert_eq!(choice.get_value().unwrap(), FieldValue::Choice(FailureMethod::Mohr));
    }

    #[test]
    fn test_non_numeric_names_field() {
        let mut form = stress_form();
        form.set_numeric("sigma_v", "seven thousand").unwrap();
        let err = form.stress_input().unwrap_err();
        assert_eq!(err.field(), Some("sigma_v"));
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn test_non_finite_text_rejected() {
        let mut form = stress_form();
        form.set_numeric("alpha", "NaN").unwrap();
        assert_eq!(form.stress_input().unwrap_err().field(), Some("alpha"));
        form.set_numeric("alpha", "inf").unwrap();
        assert_eq!(form.stress_input().unwrap_err().field(), Some("alpha"));
    }

    #[test]
    fn test_missing_field() {
        let mut form = Form::new();
        form.set_numeric("sigma_h", "4000").unwrap();
        let err = form.stress_input().unwrap_err();
        assert_eq!(err.field(), Some("sigma_H"));

        form.set_numeric("sigma_H", "  ").unwrap();
        assert!(form.stress_input().unwrap_err().to_string().contains("missing"));
    }

    #[test]
    fn test_stress_input_from_form() {
        let input = stress_form().stress_input().unwrap();
        assert_eq!(input, StressInput::new(4000.0, 6000.0, 7000.0, 30.0, 0.0));
    }

    #[test]
    fn test_set_rejects_mismatched_kind() {
        let mut form = Form::new();
        assert!(form.set_numeric("failure_method", "1").is_err());
        assert!(form.set_choice("phi", FailureMethod::Mohr).is_err());
        assert!(matches!(form.set_numeric("nope", "1"), Err(Error::UnknownParameter(_))));
        assert!(form.is_empty());
    }

    #[test]
    fn test_validate_boundary_rules() {
        let mut form = stress_form();
        form.set_choice("failure_method", FailureMethod::HoekBrown).unwrap();
        assert!(form.validate().is_ok());

        form.set_numeric("i", "95").unwrap();
        assert!(form.validate().is_ok());

        form.set_numeric("phi", "1.5").unwrap();
        let err = form.validate().unwrap_err();
        assert!(matches!(err, Error::OutOfRange { ref field, .. } if field == "phi"));
    }

    #[test]
    fn test_values_and_failure_method() {
        let mut form = stress_form();
        form.set_choice("failure_method", FailureMethod::MogiCoulomb).unwrap();
        let values = form.values().unwrap();
        assert_eq!(values.len(), 6);
        assert_eq!(values["sigma_H"], FieldValue::Number(6000.0));
        assert_eq!(form.failure_method(), Some(FailureMethod::MogiCoulomb));
    }
}
