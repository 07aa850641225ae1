/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Per-axis truncation of the real- and reciprocal-space Ewald sums
//!
//! Each Bravais axis is extended outward until the magnitude of a single
//! summand, evaluated at that distance, drops below half the tolerance.

use super::bravais::BravaisMatrix;
use super::errors::{LatticeError, Result};
use crate::utils::math::upper_gamma_half;
use serde::{Deserialize, Serialize};

/// Number of cells kept on each side of the origin along the three Bravais axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TruncationBounds([usize; 3]);

impl TruncationBounds {
    pub fn new(bounds: [usize; 3]) -> Self {
        Self(bounds)
    }

    pub fn as_array(&self) -> [usize; 3] {
        self.0
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.0.to_vec()
    }

    /// Bound along a single axis
    pub fn axis(&self, index: usize) -> usize {
        self.0[index]
    }

    /// Signed integer range covered along one axis
    pub fn range(&self, index: usize) -> std::ops::RangeInclusive<i64> {
        let n = self.0[index] as i64;
        -n..=n
    }
}

/// Bounds for the direct-lattice sum
///
/// The tail term along an axis of length r is
/// Γ(lmax + 1/2, (n r / η)²) / (n r / 2)^(lmax + 1).
///
/// # Arguments
///
/// * `bravais` - Scaled direct lattice
/// * `lmax` - Highest multipole order entering the sums
/// * `eta` - Ewald splitting width
/// * `tolerance` - Truncation tolerance
pub fn real_space_bounds(
    bravais: &BravaisMatrix,
    lmax: usize,
    eta: f64,
    tolerance: f64,
) -> Result<TruncationBounds> {
    check_eta(eta)?;
    let exponent = lmax as i32 + 1;
    axis_bounds(bravais, tolerance, |distance| {
        let gamma = upper_gamma_half(distance / eta, lmax);
        gamma[lmax] / (0.5 * distance).powi(exponent)
    })
}

/// Bounds for the reciprocal-lattice sum
///
/// The tail term along an axis of length r is
/// exp(-η² (n r)² / 4) (n r)^(lmax - 2).
pub fn reciprocal_space_bounds(
    reciprocal: &BravaisMatrix,
    lmax: usize,
    eta: f64,
    tolerance: f64,
) -> Result<TruncationBounds> {
    check_eta(eta)?;
    let exponent = lmax as i32 - 2;
    axis_bounds(reciprocal, tolerance, |distance| {
        (-0.25 * eta * eta * distance * distance).exp() * distance.powi(exponent)
    })
}

/// Radius of the sphere that contains every lattice vector needed for the sum
///
/// This is the largest of n_i |a_i| over the three axes.
pub fn truncation_radius(bravais: &BravaisMatrix, bounds: &TruncationBounds) -> f64 {
    bravais
        .column_lengths()
        .iter()
        .zip(bounds.as_array())
        .map(|(length, n)| n as f64 * length)
        .fold(0.0, f64::max)
}

fn check_eta(eta: f64) -> Result<()> {
    if !(eta.is_finite() && eta > 0.0) {
        return Err(LatticeError::InvalidParameter(format!(
            "Ewald width must be positive, got {}",
            eta
        )));
    }
    Ok(())
}

fn axis_bounds<F>(bravais: &BravaisMatrix, tolerance: f64, tail: F) -> Result<TruncationBounds>
where
    F: Fn(f64) -> f64,
{
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(LatticeError::InvalidParameter(format!(
            "Truncation tolerance must be positive, got {}",
            tolerance
        )));
    }

    let threshold = 0.5 * tolerance;
    let mut bounds = [0usize; 3];
    for (bound, length) in bounds.iter_mut().zip(bravais.column_lengths()) {
        if !(length.is_finite() && length > 0.0) {
            return Err(LatticeError::InvalidParameter(format!(
                "Lattice vector length must be positive, got {}",
                length
            )));
        }

        let mut n = 0usize;
        let mut term = f64::INFINITY;
        while term > threshold {
            n += 1;
            term = tail(n as f64 * length);
        }
        *bound = n;
    }
    Ok(TruncationBounds::new(bounds))
}
