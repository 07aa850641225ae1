/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Ewald splitting width and scaling factor
//!
//! The lattice is rescaled by 1/s until the real-space and reciprocal-space
//! sums need comparable numbers of lattice vectors. Neither count may drop
//! below half of the other.

use super::config::MadelungConfig;
use super::errors::{MadelungError, Result};
use crate::lattice::{
    count_lattice_vectors, real_space_bounds, reciprocal_space_bounds, truncation_radius,
    BravaisMatrix, TruncationBounds,
};
use log::debug;
use std::f64::consts::PI;

/// Truncation of one of the two Ewald sums
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceTruncation {
    /// Per-axis enumeration bounds
    pub bounds: TruncationBounds,
    /// Radius of the cutoff sphere
    pub radius: f64,
    /// Number of lattice vectors inside the sphere
    pub count: usize,
}

/// Outcome of the scaling factor search
#[derive(Debug, Clone, PartialEq)]
pub struct EwaldSplitting {
    /// Gaussian splitting width in the scaled frame
    pub eta: f64,
    /// Length by which the lattice is divided
    pub scaling_factor: f64,
    /// Scaled direct lattice
    pub scaled_lattice: BravaisMatrix,
    /// Reciprocal lattice of the scaled lattice
    pub reciprocal_lattice: BravaisMatrix,
    pub real_space: SpaceTruncation,
    pub reciprocal_space: SpaceTruncation,
    /// Number of adjustments made before the sums were balanced
    pub iterations: usize,
}

/// Ewald width η = 0.5 + 0.1 max|a_i| / min|a_i|
///
/// Only the anisotropy of the cell enters, so η does not change when the
/// lattice is rescaled.
pub fn ewald_width(bravais: &BravaisMatrix) -> f64 {
    let lengths = bravais.column_lengths();
    let longest = lengths.iter().copied().fold(f64::MIN, f64::max);
    let shortest = lengths.iter().copied().fold(f64::MAX, f64::min);
    0.5 + 0.1 * longest / shortest
}

/// Truncate both sums for a lattice that has already been scaled
///
/// # Arguments
///
/// * `scaled` - Direct lattice divided by the scaling factor
/// * `lmax` - Highest multipole order entering the sums
/// * `eta` - Ewald splitting width
/// * `tolerance` - Tail-term tolerance
///
/// # Returns
///
/// The reciprocal lattice and the truncations of the real and reciprocal sums
pub fn truncate_sums(
    scaled: &BravaisMatrix,
    lmax: usize,
    eta: f64,
    tolerance: f64,
) -> Result<(BravaisMatrix, SpaceTruncation, SpaceTruncation)> {
    let reciprocal = scaled.reciprocal()?;
    let real = space_truncation(scaled, real_space_bounds(scaled, lmax, eta, tolerance)?);
    let recip = space_truncation(
        &reciprocal,
        reciprocal_space_bounds(&reciprocal, lmax, eta, tolerance)?,
    );
    Ok((reciprocal, real, recip))
}

fn space_truncation(bravais: &BravaisMatrix, bounds: TruncationBounds) -> SpaceTruncation {
    let radius = truncation_radius(bravais, &bounds);
    SpaceTruncation {
        bounds,
        radius,
        count: count_lattice_vectors(bravais, radius, &bounds),
    }
}

/// Search the scaling factor that balances the two lattice sums
///
/// Starts from min|a_i| / 2π and moves in steps of `config.scaling_step`
/// towards the side with fewer vectors.
///
/// # Arguments
///
/// * `bravais` - Unscaled direct lattice
/// * `lmax` - Highest multipole order entering the sums
/// * `config` - Tolerance, step and iteration limit
pub fn find_scaling_factor(
    bravais: &BravaisMatrix,
    lmax: usize,
    config: &MadelungConfig,
) -> Result<EwaldSplitting> {
    let eta = ewald_width(bravais);
    let shortest = bravais
        .column_lengths()
        .iter()
        .copied()
        .fold(f64::MAX, f64::min);
    let mut scaling_factor = shortest / (2.0 * PI);
    debug!("Ewald width {:.6}, initial scaling factor {:.6}", eta, scaling_factor);

    for iteration in 0..config.max_scaling_iterations {
        if scaling_factor <= 0.0 {
            break;
        }

        let scaled = bravais.scaled_down(scaling_factor);
        let (reciprocal, real, recip) =
            truncate_sums(&scaled, lmax, eta, config.truncation_tolerance)?;

        if recip.count < real.count / 2 {
            scaling_factor -= config.scaling_step;
        } else if real.count < recip.count / 2 {
            scaling_factor += config.scaling_step;
        } else {
            debug!(
                "Scaling factor {:.14} after {} steps: {} real / {} reciprocal vectors",
                scaling_factor, iteration, real.count, recip.count
            );
            return Ok(EwaldSplitting {
                eta,
                scaling_factor,
                scaled_lattice: scaled,
                reciprocal_lattice: reciprocal,
                real_space: real,
                reciprocal_space: recip,
                iterations: iteration,
            });
        }
    }

    Err(MadelungError::ScalingNotConverged {
        iterations: config.max_scaling_iterations,
        scaling_factor,
    })
}
