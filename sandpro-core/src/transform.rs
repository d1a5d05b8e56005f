//! Principal-stress to borehole-frame transformation.
//!
//! Rotates the in-situ stress state diag(σH, σh, σv) into the Cartesian frame
//! of a deviated well. The borehole frame is reached by two rotations:
//! 1. Azimuth `a` about the vertical axis, measured from σH
//! 2. Inclination `i` about the rotated y axis, tilting z onto the well axis
//!
//! The six components are evaluated in closed form. [`rotation_matrix`] gives
//! the same frame as a direction-cosine matrix so that σ' = R·S·Rᵀ.

use crate::error::Result;
use crate::types::{PrincipalStresses, StressInput, StressTensorResult};
use nalgebra::Matrix3;
use tracing::trace;

/// Well orientation with its trigonometric terms precomputed (radians inside).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Azimuth in radians.
    pub azimuth: f64,
    /// Inclination in radians.
    pub inclination: f64,
    sin_a: f64,
    cos_a: f64,
    sin_i: f64,
    cos_i: f64,
}

impl Orientation {
    /// Build from angles in degrees.
    pub fn from_degrees(azimuth_deg: f64, inclination_deg: f64) -> Self {
        Self::from_radians(azimuth_deg.to_radians(), inclination_deg.to_radians())
    }

    pub fn from_radians(azimuth: f64, inclination: f64) -> Self {
        let (sin_a, cos_a) = azimuth.sin_cos();
        let (sin_i, cos_i) = inclination.sin_cos();
        Self {
            azimuth,
            inclination,
            sin_a,
            cos_a,
            sin_i,
            cos_i,
        }
    }

    /// Horizontal normal stress resolved onto the azimuth direction:
    /// σH·cos²a + σh·sin²a.
    fn horizontal_along(&self, p: &PrincipalStresses) -> f64 {
        p.sigma_hmax * self.cos_a.powi(2) + p.sigma_h * self.sin_a.powi(2)
    }
}

/// Normal components σ_xx, σ_yy, σ_zz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalStresses {
    pub sigma_xx: f64,
    pub sigma_yy: f64,
    pub sigma_zz: f64,
}

impl NormalStresses {
    pub fn compute(p: &PrincipalStresses, o: &Orientation) -> Self {
        let along = o.horizontal_along(p);
        let cos2_i = o.cos_i.powi(2);
        let sin2_i = o.sin_i.powi(2);

        Self {
            sigma_xx: along * cos2_i + p.sigma_v * sin2_i,
            sigma_yy: p.sigma_hmax * o.sin_a.powi(2) + p.sigma_h * o.cos_a.powi(2),
            sigma_zz: along * sin2_i + p.sigma_v * cos2_i,
        }
    }
}

/// Shear components τ_xy, τ_yz, τ_xz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShearStresses {
    pub tau_xy: f64,
    pub tau_yz: f64,
    pub tau_xz: f64,
}

impl ShearStresses {
    pub fn compute(p: &PrincipalStresses, o: &Orientation) -> Self {
        let horizontal = 0.5 * (p.sigma_h - p.sigma_hmax) * (2.0 * o.azimuth).sin();

        Self {
            tau_xy: horizontal * o.cos_i,
            tau_yz: horizontal * o.sin_i,
            tau_xz: 0.5 * ((o.horizontal_along(p) - p.sigma_v) * (2.0 * o.inclination).sin()),
        }
    }
}

/// Transform principal stresses into the borehole-local frame.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidInput`] if any field is NaN or infinite.
/// Angle ranges are not checked.
///
/// # Example
///
/// ```
/// use sandpro_core::{transform, StressInput};
///
/// let input = StressInput::new(4000.0, 6000.0, 7000.0, 30.0, 0.0);
/// let result = transform(&input).unwrap();
/// assert!((result.sigma_yy - 4500.0).abs() < 1e-9);
/// ```
pub fn transform(input: &StressInput) -> Result<StressTensorResult> {
    input.ensure_finite()?;
    let principal = input.principal();
    let orientation = Orientation::from_degrees(input.azimuth_deg, input.inclination_deg);
    Ok(transform_principal(&principal, &orientation))
}

/// Closed-form evaluation for already-validated inputs.
pub fn transform_principal(
    principal: &PrincipalStresses,
    orientation: &Orientation,
) -> StressTensorResult {
    let normal = NormalStresses::compute(principal, orientation);
    let shear = ShearStresses::compute(principal, orientation);
    trace!(?normal, ?shear, "stress transform");
    assemble(normal, shear)
}

fn assemble(normal: NormalStresses, shear: ShearStresses) -> StressTensorResult {
    StressTensorResult {
        sigma_xx: normal.sigma_xx,
        sigma_yy: normal.sigma_yy,
        sigma_zz: normal.sigma_zz,
        tau_xy: shear.tau_xy,
        tau_yz: shear.tau_yz,
        tau_xz: shear.tau_xz,
    }
}

/// Direction-cosine matrix from the in-situ frame (σH, σh, σv) to the
/// borehole frame (x, y, z). Rows are the borehole axes.
pub fn rotation_matrix(azimuth_deg: f64, inclination_deg: f64) -> Matrix3<f64> {
    let o = Orientation::from_degrees(azimuth_deg, inclination_deg);
    Matrix3::new(
        o.cos_a * o.cos_i, o.sin_a * o.cos_i, -o.sin_i,
        -o.sin_a, o.cos_a, 0.0,
        o.cos_a * o.sin_i, o.sin_a * o.sin_i, o.cos_i,
    )
}

/// Stress model for one well: a validated input and its decomposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SandProductionModel {
    input: StressInput,
    orientation: Orientation,
}

impl SandProductionModel {
    /// Create a model from a stress input.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] if any field is non-finite.
    pub fn new(input: StressInput) -> Result<Self> {
        input.ensure_finite()?;
        Ok(Self {
            input,
            orientation: Orientation::from_degrees(input.azimuth_deg, input.inclination_deg),
        })
    }

    pub fn input(&self) -> &StressInput {
        &self.input
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn normal(&self) -> NormalStresses {
        NormalStresses::compute(&self.input.principal(), &self.orientation)
    }

    pub fn shear(&self) -> ShearStresses {
        ShearStresses::compute(&self.input.principal(), &self.orientation)
    }

    /// All six components.
    pub fn compute_all(&self) -> StressTensorResult {
        assemble(self.normal(), self.shear())
    }
}
