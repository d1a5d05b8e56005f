//! Parallel evaluation over many inputs.
//!
//! Each transform is independent, so batches and orientation sweeps are
//! evaluated with Rayon. Output order always matches input order.

use crate::error::{Error, Result};
use crate::transform::{transform, transform_principal, Orientation};
use crate::types::{PrincipalStresses, StressInput, StressTensorResult};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Transform each input independently.
///
/// A failing row yields its own `Err` and does not affect the others.
pub fn transform_batch(inputs: &[StressInput]) -> Vec<Result<StressTensorResult>> {
    debug!(rows = inputs.len(), "batch transform");
    inputs.par_iter().map(transform).collect()
}

/// Largest grid an [`OrientationSweep`] may describe.
pub const MAX_SWEEP_POINTS: usize = 1_000_000;

/// Grid of well orientations to evaluate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationSweep {
    /// Azimuth spacing (degrees). Azimuths cover [0, 360).
    pub azimuth_step_deg: f64,
    /// Inclination spacing (degrees). Inclinations cover [0, max].
    pub inclination_step_deg: f64,
    /// Largest inclination (degrees).
    pub max_inclination_deg: f64,
}

impl Default for OrientationSweep {
    fn default() -> Self {
        Self {
            azimuth_step_deg: 15.0,
            inclination_step_deg: 15.0,
            max_inclination_deg: 90.0,
        }
    }
}

impl OrientationSweep {
    fn validate(&self) -> Result<()> {
        for (field, step) in [
            ("azimuth_step", self.azimuth_step_deg),
            ("inclination_step", self.inclination_step_deg),
        ] {
            if !step.is_finite() || step <= 0.0 {
                return Err(Error::invalid_input(field, "step must be a positive number"));
            }
        }
        if !self.max_inclination_deg.is_finite() || self.max_inclination_deg < 0.0 {
            return Err(Error::invalid_input(
                "max_inclination",
                "must be a non-negative number",
            ));
        }
        // Counted in f64 so huge ratios cannot overflow the usize casts below.
        let azimuths = (360.0 / self.azimuth_step_deg).ceil();
        let inclinations =
            (self.max_inclination_deg / self.inclination_step_deg + 1e-9).floor() + 1.0;
        if azimuths * inclinations > MAX_SWEEP_POINTS as f64 {
            return Err(Error::invalid_input(
                "sweep",
                format!("grid exceeds {MAX_SWEEP_POINTS} orientations"),
            ));
        }
        Ok(())
    }

    fn azimuths(&self) -> Vec<f64> {
        let n = (360.0 / self.azimuth_step_deg).ceil() as usize;
        (0..n)
            .map(|k| k as f64 * self.azimuth_step_deg)
            .filter(|&a| a < 360.0)
            .collect()
    }

    fn inclinations(&self) -> Vec<f64> {
        // Small tolerance so a max that is a multiple of the step is included.
        let n = (self.max_inclination_deg / self.inclination_step_deg + 1e-9).floor() as usize;
        (0..=n).map(|k| k as f64 * self.inclination_step_deg).collect()
    }

    /// Number of grid points (zero for a malformed sweep).
    pub fn len(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        self.azimuths().len() * self.inclinations().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One grid point of an orientation sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrientationSample {
    pub azimuth_deg: f64,
    pub inclination_deg: f64,
    pub stress: StressTensorResult,
}

/// Evaluate the transform over an azimuth × inclination grid.
///
/// Samples are ordered by inclination, then azimuth.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for non-finite stresses or a malformed
/// sweep definition.
pub fn sweep_orientations(
    principal: &PrincipalStresses,
    sweep: &OrientationSweep,
) -> Result<Vec<OrientationSample>> {
    StressInput::from_principal(*principal, 0.0, 0.0).ensure_finite()?;
    sweep.validate()?;

    let azimuths = sweep.azimuths();
    let grid: Vec<(f64, f64)> = sweep
        .inclinations()
        .into_iter()
        .flat_map(|inc| azimuths.iter().map(move |&az| (az, inc)))
        .collect();
    debug!(points = grid.len(), "orientation sweep");

    Ok(grid
        .par_iter()
        .map(|&(azimuth_deg, inclination_deg)| OrientationSample {
            azimuth_deg,
            inclination_deg,
            stress: transform_principal(
                principal,
                &Orientation::from_degrees(azimuth_deg, inclination_deg),
            ),
        })
        .collect())
}
