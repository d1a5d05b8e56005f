//! Core value types for the stress transform.
//!
//! This module defines the input and output records of the transform:
//! - Principal stress state and well orientation ([`StressInput`])
//! - Borehole-frame stress tensor ([`StressTensorResult`])
//!
//! Stresses are in Psi throughout. Angles are degrees at the API surface.

use crate::error::{Error, Result};
use nalgebra::{Matrix3, Vector6};
use serde::{Deserialize, Serialize};

/// The three in-situ principal stresses (Psi).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrincipalStresses {
    /// Minimum horizontal stress σh.
    pub sigma_h: f64,
    /// Maximum horizontal stress σH.
    #[serde(rename = "sigma_H")]
    pub sigma_hmax: f64,
    /// Vertical (overburden) stress σv.
    pub sigma_v: f64,
}

impl PrincipalStresses {
    pub fn new(sigma_h: f64, sigma_hmax: f64, sigma_v: f64) -> Self {
        Self {
            sigma_h,
            sigma_hmax,
            sigma_v,
        }
    }

    /// Principal stress matrix diag(σH, σh, σv) in the in-situ frame.
    pub fn to_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_diagonal(&nalgebra::Vector3::new(
            self.sigma_hmax,
            self.sigma_h,
            self.sigma_v,
        ))
    }
}

/// Input to the stress transform.
///
/// Angles are in degrees: `azimuth_deg` is measured from the σH direction,
/// `inclination_deg` is the deviation of the well axis from vertical. Neither
/// is range-checked here; see [`crate::params::validate`] for the boundary
/// rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressInput {
    /// Minimum horizontal stress σh (Psi).
    pub sigma_h: f64,
    /// Maximum horizontal stress σH (Psi).
    #[serde(rename = "sigma_H")]
    pub sigma_hmax: f64,
    /// Vertical stress σv (Psi).
    pub sigma_v: f64,
    /// Well azimuth relative to σH (degrees).
    pub azimuth_deg: f64,
    /// Well inclination from vertical (degrees).
    pub inclination_deg: f64,
}

impl StressInput {
    pub fn new(
        sigma_h: f64,
        sigma_hmax: f64,
        sigma_v: f64,
        azimuth_deg: f64,
        inclination_deg: f64,
    ) -> Self {
        Self {
            sigma_h,
            sigma_hmax,
            sigma_v,
            azimuth_deg,
            inclination_deg,
        }
    }

    /// Combine a principal stress state with a well orientation.
    pub fn from_principal(
        principal: PrincipalStresses,
        azimuth_deg: f64,
        inclination_deg: f64,
    ) -> Self {
        Self::new(
            principal.sigma_h,
            principal.sigma_hmax,
            principal.sigma_v,
            azimuth_deg,
            inclination_deg,
        )
    }

    pub fn principal(&self) -> PrincipalStresses {
        PrincipalStresses::new(self.sigma_h, self.sigma_hmax, self.sigma_v)
    }

    /// Named fields in declaration order, for validation and error reporting.
    pub fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("sigma_h", self.sigma_h),
            ("sigma_H", self.sigma_hmax),
            ("sigma_v", self.sigma_v),
            ("azimuth", self.azimuth_deg),
            ("inclination", self.inclination_deg),
        ]
    }

    /// Check that every field is a finite number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the first non-finite field.
    pub fn ensure_finite(&self) -> Result<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(Error::invalid_input(
                    field,
                    format!("expected a finite number, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Stress tensor in the borehole-local Cartesian frame (Psi).
///
/// Voigt ordering where an array is needed: [σ_xx, σ_yy, σ_zz, τ_xy, τ_yz, τ_xz]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressTensorResult {
    pub sigma_xx: f64,
    pub sigma_yy: f64,
    pub sigma_zz: f64,
    pub tau_xy: f64,
    pub tau_yz: f64,
    pub tau_xz: f64,
}

impl StressTensorResult {
    /// Component names in Voigt order.
    pub const COMPONENTS: [&'static str; 6] =
        ["sigma_xx", "sigma_yy", "sigma_zz", "tau_xy", "tau_yz", "tau_xz"];

    /// Create a result from Voigt components.
    pub fn from_voigt(components: [f64; 6]) -> Self {
        let [sigma_xx, sigma_yy, sigma_zz, tau_xy, tau_yz, tau_xz] = components;
        Self {
            sigma_xx,
            sigma_yy,
            sigma_zz,
            tau_xy,
            tau_yz,
            tau_xz,
        }
    }

    pub fn voigt(&self) -> [f64; 6] {
        [
            self.sigma_xx,
            self.sigma_yy,
            self.sigma_zz,
            self.tau_xy,
            self.tau_yz,
            self.tau_xz,
        ]
    }

    pub fn to_vector(&self) -> Vector6<f64> {
        Vector6::from_row_slice(&self.voigt())
    }

    /// Extract the full 3x3 symmetric stress matrix.
    pub fn to_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.sigma_xx, self.tau_xy, self.tau_xz,
            self.tau_xy, self.sigma_yy, self.tau_yz,
            self.tau_xz, self.tau_yz, self.sigma_zz,
        )
    }

    /// Mean (hydrostatic) stress.
    pub fn mean_stress(&self) -> f64 {
        (self.sigma_xx + self.sigma_yy + self.sigma_zz) / 3.0
    }

    /// Compute von Mises equivalent stress.
    pub fn von_mises(&self) -> f64 {
        let term1 = (self.sigma_xx - self.sigma_yy).powi(2)
            + (self.sigma_yy - self.sigma_zz).powi(2)
            + (self.sigma_zz - self.sigma_xx).powi(2);
        let term2 = 6.0 * (self.tau_xy.powi(2) + self.tau_yz.powi(2) + self.tau_xz.powi(2));

        ((term1 + term2) / 2.0).sqrt()
    }

    /// Principal values of the tensor, sorted descending.
    pub fn principal_values(&self) -> [f64; 3] {
        let eig = self.to_matrix().symmetric_eigenvalues();
        let mut values = [eig[0], eig[1], eig[2]];
        values.sort_by(|a, b| b.total_cmp(a));
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ensure_finite_names_field() {
        let input = StressInput::new(4000.0, f64::NAN, 7000.0, 30.0, 0.0);
        let err = input.ensure_finite().unwrap_err();
        assert_eq!(err.field(), Some("sigma_H"));

        let input = StressInput::new(4000.0, 6000.0, 7000.0, 30.0, f64::INFINITY);
        let err = input.ensure_finite().unwrap_err();
        assert_eq!(err.field(), Some("inclination"));
    }

    #[test]
    fn test_ensure_finite_accepts_any_real_angle() {
        let input = StressInput::new(4000.0, 6000.0, 7000.0, -725.0, 135.0);
        assert!(input.ensure_finite().is_ok());
    }

    #[test]
    fn test_voigt_round_trip_order() {
        let r = StressTensorResult::from_voigt([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(r.sigma_zz, 3.0);
        assert_eq!(r.tau_yz, 5.0);
        assert_eq!(r.voigt(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_matrix_symmetric() {
        let r = StressTensorResult::from_voigt([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let m = r.to_matrix();
        assert_eq!(m, m.transpose());
        assert_eq!(m[(0, 1)], 4.0);
        assert_eq!(m[(1, 2)], 5.0);
        assert_eq!(m[(0, 2)], 6.0);
    }

    #[test]
    fn test_von_mises_pure_shear() {
        let r = StressTensorResult::from_voigt([0.0, 0.0, 0.0, 100.0, 0.0, 0.0]);
        assert_relative_eq!(r.von_mises(), 100.0 * 3.0_f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_mean_and_principal_of_diagonal_state() {
        let r = StressTensorResult::from_voigt([5000.0, 7000.0, 6000.0, 0.0, 0.0, 0.0]);
        assert_relative_eq!(r.mean_stress(), 6000.0, epsilon = 1e-10);
        let p = r.principal_values();
        assert_relative_eq!(p[0], 7000.0, epsilon = 1e-8);
        assert_relative_eq!(p[1], 6000.0, epsilon = 1e-8);
        assert_relative_eq!(p[2], 5000.0, epsilon = 1e-8);
    }

    #[test]
    fn test_serialize_uses_field_names() {
        let input = StressInput::new(4000.0, 6000.0, 7000.0, 30.0, 0.0);
        let json = serde_json::to_value(input).unwrap();
        assert_eq!(json["sigma_H"], 6000.0);
        assert_eq!(json["azimuth_deg"], 30.0);
    }
}
