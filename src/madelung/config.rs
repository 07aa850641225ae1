/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Configuration for the Madelung calculation

use super::errors::{MadelungError, Result};
use crate::utils::constants::{
    DEGENERATE_VOLUME, IMAGINARY_TOLERANCE, MAX_SCALING_ITERATIONS, SCALING_STEP,
    TRUNCATION_TOLERANCE,
};
use serde::{Deserialize, Serialize};

/// Numerical settings of a Madelung calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MadelungConfig {
    /// Tail-term tolerance that fixes the truncation bounds
    pub truncation_tolerance: f64,
    /// Step applied to the scaling factor while balancing the two sums
    pub scaling_step: f64,
    /// Upper limit on scaling factor adjustments
    pub max_scaling_iterations: usize,
    /// Cell volumes below this are rejected
    pub degenerate_volume_tolerance: f64,
    /// Imaginary residue on monopole entries that triggers a warning
    pub imaginary_tolerance: f64,
    /// Evaluate atom pairs on the rayon thread pool
    pub parallel: bool,
}

impl Default for MadelungConfig {
    fn default() -> Self {
        Self {
            truncation_tolerance: TRUNCATION_TOLERANCE,
            scaling_step: SCALING_STEP,
            max_scaling_iterations: MAX_SCALING_ITERATIONS,
            degenerate_volume_tolerance: DEGENERATE_VOLUME,
            imaginary_tolerance: IMAGINARY_TOLERANCE,
            parallel: true,
        }
    }
}

impl MadelungConfig {
    /// Check that every setting is usable
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("truncation_tolerance", self.truncation_tolerance),
            ("scaling_step", self.scaling_step),
            ("degenerate_volume_tolerance", self.degenerate_volume_tolerance),
            ("imaginary_tolerance", self.imaginary_tolerance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(MadelungError::InvalidParameter(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.max_scaling_iterations == 0 {
            return Err(MadelungError::InvalidParameter(
                "max_scaling_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
