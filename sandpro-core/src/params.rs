//! Parameter registry.
//!
//! One canonical table mapping a stable parameter key to its group, display
//! name, unit and validation rule. The table is compiled in and read-only.
//! Keys keep the short names petroleum engineers use on input sheets
//! (`sigma_H`, `p_well`, `UCS`), so lookups are case-sensitive.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Physical unit of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Unit {
    Psi,
    Degree,
    Second,
    Dimensionless,
    Fraction,
    Darcy,
    SecondPerCubicMeter,
    Feet,
    KilogramPerCubicMeter,
    Centipoise,
    Kilogram,
    /// Enumerated (non-numeric) parameter.
    Unitless,
}

impl Unit {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Psi => "Psi",
            Unit::Degree => "Degree",
            Unit::Second => "Second",
            Unit::Dimensionless => "Dimensionless",
            Unit::Fraction => "Fraction",
            Unit::Darcy => "Darcy",
            Unit::SecondPerCubicMeter => "Sec/m³",
            Unit::Feet => "ft",
            Unit::KilogramPerCubicMeter => "Kg/m³",
            Unit::Centipoise => "cP",
            Unit::Kilogram => "Kg",
            Unit::Unitless => "",
        }
    }

    /// Validation rule implied by the unit.
    pub fn rule(self) -> Rule {
        match self {
            Unit::Fraction => Rule::Range { min: 0.0, max: 1.0 },
            Unit::Degree => Rule::Range { min: 0.0, max: 360.0 },
            Unit::Psi
            | Unit::Feet
            | Unit::KilogramPerCubicMeter
            | Unit::Darcy
            | Unit::Centipoise
            | Unit::Second => Rule::NonNegative,
            Unit::Dimensionless | Unit::SecondPerCubicMeter | Unit::Kilogram | Unit::Unitless => {
                Rule::Unrestricted
            }
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepted value range for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Rule {
    /// Inclusive range.
    Range { min: f64, max: f64 },
    NonNegative,
    Unrestricted,
}

impl Rule {
    pub fn check(&self, value: f64) -> bool {
        match *self {
            Rule::Range { min, max } => (min..=max).contains(&value),
            Rule::NonNegative => value >= 0.0,
            Rule::Unrestricted => true,
        }
    }
}

/// Registry entry for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub key: &'static str,
    pub group: &'static str,
    pub display_name: &'static str,
    pub unit: Unit,
}

impl ParameterSpec {
    const fn new(key: &'static str, group: &'static str, display_name: &'static str, unit: Unit) -> Self {
        Self {
            key,
            group,
            display_name,
            unit,
        }
    }

    pub fn rule(&self) -> Rule {
        self.unit.rule()
    }

    /// Whether the parameter takes an enumerated value instead of a number.
    pub fn is_enumerated(&self) -> bool {
        self.unit == Unit::Unitless
    }
}

const INITIAL_STRESSES: &str = "Initial Stresses";
const RESERVOIR_PRESSURES: &str = "Reservoir Pressures";
const ROCK_PROPERTIES: &str = "Rock Properties";
const TIME_SETTINGS: &str = "Time Settings";
const WELL_ORIENTATION: &str = "Well Orientation";
const ELASTIC_PROPERTIES: &str = "Elastic Properties";
const POROSITY: &str = "Porosity";
const PERMEABILITY: &str = "Permeability";
const CRITICAL_PRESSURES: &str = "Critical Pressures";
const GEOMETRY: &str = "Geometry";
const OTHER_PARAMETERS: &str = "Other Parameters";

/// Group names in display order.
pub const GROUPS: [&str; 11] = [
    INITIAL_STRESSES,
    RESERVOIR_PRESSURES,
    ROCK_PROPERTIES,
    TIME_SETTINGS,
    WELL_ORIENTATION,
    ELASTIC_PROPERTIES,
    POROSITY,
    PERMEABILITY,
    CRITICAL_PRESSURES,
    GEOMETRY,
    OTHER_PARAMETERS,
];

/// The full registry, grouped and in display order.
pub static PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec::new("sigma_v", INITIAL_STRESSES, "Vertical Stress", Unit::Psi),
    ParameterSpec::new("sigma_H", INITIAL_STRESSES, "Maximum Horizontal Stress", Unit::Psi),
    ParameterSpec::new("sigma_h", INITIAL_STRESSES, "Minimum Horizontal Stress", Unit::Psi),
    ParameterSpec::new("p_i", RESERVOIR_PRESSURES, "Initial Reservoir Pressure", Unit::Psi),
    ParameterSpec::new("p_res", RESERVOIR_PRESSURES, "Current Reservoir Pressure", Unit::Psi),
    ParameterSpec::new("p_well", RESERVOIR_PRESSURES, "Wellbore Pressure", Unit::Psi),
    ParameterSpec::new("theta", ROCK_PROPERTIES, "Failure Angle", Unit::Degree),
    ParameterSpec::new("UCS", ROCK_PROPERTIES, "UCS", Unit::Psi),
    ParameterSpec::new("time_step", TIME_SETTINGS, "Time Step", Unit::Second),
    ParameterSpec::new("until", TIME_SETTINGS, "Until", Unit::Dimensionless),
    ParameterSpec::new("i", WELL_ORIENTATION, "Inclination", Unit::Degree),
    ParameterSpec::new("alpha", WELL_ORIENTATION, "Azimuth", Unit::Degree),
    ParameterSpec::new("alphap", ELASTIC_PROPERTIES, "Poroelastic Constant", Unit::Dimensionless),
    ParameterSpec::new("nu", ELASTIC_PROPERTIES, "Poisson Ratio", Unit::Dimensionless),
    ParameterSpec::new("phi", POROSITY, "Porosity", Unit::Fraction),
    ParameterSpec::new("phi_c", POROSITY, "Critical Porosity", Unit::Fraction),
    ParameterSpec::new("k", PERMEABILITY, "Permeability", Unit::Darcy),
    ParameterSpec::new("beta", PERMEABILITY, "Sand Production Coefficient", Unit::SecondPerCubicMeter),
    ParameterSpec::new("p_crit_res", CRITICAL_PRESSURES, "Critical Reservoir Pressure", Unit::Psi),
    ParameterSpec::new("p_crit_well", CRITICAL_PRESSURES, "Critical Well Pressure", Unit::Psi),
    ParameterSpec::new("r_well", GEOMETRY, "Wellbore Radius", Unit::Feet),
    ParameterSpec::new("r_ext", GEOMETRY, "External Radius", Unit::Feet),
    ParameterSpec::new("h_res", GEOMETRY, "Reservoir Thickness", Unit::Feet),
    ParameterSpec::new("rho_s", GEOMETRY, "Solid Density", Unit::KilogramPerCubicMeter),
    ParameterSpec::new("mu", OTHER_PARAMETERS, "Viscosity", Unit::Centipoise),
    ParameterSpec::new("COPR", OTHER_PARAMETERS, "COPR", Unit::Dimensionless),
    ParameterSpec::new("ISP", OTHER_PARAMETERS, "ISP", Unit::Kilogram),
    ParameterSpec::new("failure_method", OTHER_PARAMETERS, "Failure Method", Unit::Unitless),
];

/// Registry keys feeding the stress transform.
pub mod keys {
    pub const SIGMA_H_MIN: &str = "sigma_h";
    pub const SIGMA_H_MAX: &str = "sigma_H";
    pub const SIGMA_V: &str = "sigma_v";
    pub const AZIMUTH: &str = "alpha";
    pub const INCLINATION: &str = "i";
    pub const FAILURE_METHOD: &str = "failure_method";
}

/// Look up a parameter by key.
pub fn lookup(key: &str) -> Option<&'static ParameterSpec> {
    PARAMETERS.iter().find(|p| p.key == key)
}

/// Look up a parameter, failing on unknown keys.
pub fn require(key: &str) -> Result<&'static ParameterSpec> {
    lookup(key).ok_or_else(|| Error::UnknownParameter(key.to_string()))
}

pub fn full_name(key: &str) -> Option<&'static str> {
    lookup(key).map(|p| p.display_name)
}

pub fn unit(key: &str) -> Option<Unit> {
    lookup(key).map(|p| p.unit)
}

/// All keys in display order.
pub fn all_keys() -> impl Iterator<Item = &'static str> {
    PARAMETERS.iter().map(|p| p.key)
}

/// Groups in display order, each with its parameters.
pub fn groups() -> impl Iterator<Item = (&'static str, Vec<&'static ParameterSpec>)> {
    GROUPS.iter().map(|&group| {
        let members = PARAMETERS.iter().filter(|p| p.group == group).collect();
        (group, members)
    })
}

/// Check a numeric value against the rule for `key`.
///
/// # Errors
///
/// - [`Error::UnknownParameter`] if `key` is not registered
/// - [`Error::InvalidInput`] if `value` is NaN or infinite
/// - [`Error::OutOfRange`] if the unit rule rejects `value`
pub fn validate(key: &str, value: f64) -> Result<()> {
    let spec = require(key)?;
    if !value.is_finite() {
        return Err(Error::invalid_input(key, "expected a finite number"));
    }
    let rule = spec.rule();
    if rule.check(value) {
        return Ok(());
    }
    let message = match rule {
        Rule::Range { min, max } if spec.unit == Unit::Degree => {
            format!("{key} should be between {min} and {max} degrees")
        }
        Rule::Range { min, max } => format!("{key} should be between {min} and {max}"),
        Rule::NonNegative => format!("{key} should be positive"),
        Rule::Unrestricted => return Ok(()),
    };
    Err(Error::OutOfRange {
        field: key.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_unique() {
        let keys: HashSet<_> = all_keys().collect();
        assert_eq!(keys.len(), PARAMETERS.len());
    }

    #[test]
    fn test_every_parameter_in_known_group() {
        for p in PARAMETERS {
            assert!(GROUPS.contains(&p.group), "{} has unknown group {}", p.key, p.group);
        }
        let grouped: usize = groups().map(|(_, members)| members.len()).sum();
        assert_eq!(grouped, PARAMETERS.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(full_name("sigma_H"), Some("Maximum Horizontal Stress"));
        assert_eq!(full_name("sigma_h"), Some("Minimum Horizontal Stress"));
        assert_eq!(unit("beta"), Some(Unit::SecondPerCubicMeter));
        assert_eq!(unit("rho_s").map(Unit::label), Some("Kg/m³"));
        assert!(lookup("SIGMA_H").is_none());
        assert!(matches!(require("porosity"), Err(Error::UnknownParameter(_))));
    }

    #[test]
    fn test_transform_keys_registered() {
        for key in [
            keys::SIGMA_H_MIN,
            keys::SIGMA_H_MAX,
            keys::SIGMA_V,
            keys::AZIMUTH,
            keys::INCLINATION,
        ] {
            assert!(lookup(key).is_some(), "{key} missing");
        }
        assert!(lookup(keys::FAILURE_METHOD).unwrap().is_enumerated());
    }

    #[test]
    fn test_group_order() {
        let order: Vec<_> = groups().map(|(g, _)| g).collect();
        assert_eq!(order.first(), Some(&"Initial Stresses"));
        assert_eq!(order.last(), Some(&"Other Parameters"));
    }

    #[test]
    fn test_validate_fraction() {
        assert!(validate("phi", 0.0).is_ok());
        assert!(validate("phi", 1.0).is_ok());
        let err = validate("phi", 1.2).unwrap_err();
        assert_eq!(err.to_string(), "out of range for 'phi': phi should be between 0 and 1");
    }

    #[test]
    fn test_validate_degree() {
        assert!(validate("alpha", 360.0).is_ok());
        let err = validate("i", -5.0).unwrap_err();
        assert!(err.to_string().contains("between 0 and 360 degrees"));
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate("sigma_v", 0.0).is_ok());
        assert!(matches!(validate("p_well", -1.0), Err(Error::OutOfRange { .. })));
        assert!(matches!(validate("r_well", -0.1), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn test_validate_unrestricted() {
        assert!(validate("nu", -3.0).is_ok());
        assert!(validate("ISP", -10.0).is_ok());
    }

    #[test]
    fn test_validate_rejects_nan_and_unknown() {
        assert!(matches!(validate("nu", f64::NAN), Err(Error::InvalidInput { .. })));
        assert!(matches!(validate("bogus", 1.0), Err(Error::UnknownParameter(_))));
    }
}
