//! SandPro Core - wellbore stress transformation for sand-production prediction
//!
//! Converts the in-situ principal stress state and a well orientation into
//! the six stress-tensor components in the borehole frame, plus the input
//! plumbing around it:
//! - Closed-form stress rotation (pure, stateless)
//! - Canonical parameter registry with unit-based validation rules
//! - Form model for raw numeric and enumerated entries
//! - TOML parameter files
//! - Parallel batch and orientation-sweep evaluation using Rayon
//!
//! # Architecture
//!
//! - [`transform()`]: `StressInput` → `StressTensorResult`, finiteness checked
//! - [`params`]: static registry of every sheet parameter
//! - [`Form`]: collects raw entries and validates them against the registry
//! - [`ParameterFile`]: reads a form from disk
//! - [`batch`]: many independent transforms at once

pub mod types;
pub mod transform;
pub mod params;
pub mod form;
pub mod config;
pub mod batch;
pub mod report;
pub mod error;

pub use types::{PrincipalStresses, StressInput, StressTensorResult};
pub use transform::{rotation_matrix, transform, NormalStresses, SandProductionModel, ShearStresses};
pub use form::{FailureMethod, FieldValue, Form, FormField};
pub use config::{OutputFormat, OutputSettings, ParameterFile};
pub use batch::{
    sweep_orientations, transform_batch, OrientationSample, OrientationSweep, MAX_SWEEP_POINTS,
};
pub use error::{Error, Result};
