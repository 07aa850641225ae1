/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Generalized Ewald sums for multipole structure constants
//!
//! For a separation a between a local atom and a source atom, in the scaled
//! frame, the lattice sum of order (l, m) is
//!
//! ```text
//! S_lm = 2^l / √π Σ_n Y_lm(R̂) Γ(l + 1/2, R² / η²) / R^(l+1),   R = R_n + a
//!      + 4π / Ω (-i)^l Σ_{K ≠ 0} K^(l-2) exp(-η² K² / 4) Y_lm(K̂) exp(i K·a)
//! ```
//!
//! The monopole additionally carries the neutralizing background -πη²/Ω and,
//! for a = 0, the removal of the Gaussian self-interaction -2/(√π η).
//! Both sums run from the longest lattice vector to the shortest.

use crate::lattice::{LatticeVectorSet, Vector3D};
use crate::utils::constants::ZERO_SEPARATION;
use crate::utils::math::{kmax, lm_from_k, spherical_harmonics, upper_gamma_half};
use log::debug;
use ndarray::Array3;
use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::PI;

/// Lattice data shared by every atom pair
#[derive(Debug, Clone)]
pub struct EwaldLattice {
    /// Gaussian splitting width
    pub eta: f64,
    /// Volume of the scaled unit cell
    pub volume: f64,
    /// Scaled direct lattice vectors, shortest first
    pub real_space: LatticeVectorSet,
    /// Reciprocal lattice vectors, shortest first
    pub reciprocal_space: LatticeVectorSet,
}

impl EwaldLattice {
    /// All lattice sums S_lm with l ≤ lmax for one separation
    ///
    /// # Arguments
    ///
    /// * `separation` - r_local - r_source in the scaled frame
    /// * `lmax` - Highest order to evaluate
    ///
    /// # Returns
    ///
    /// S_lm in compound-index order k = l² + l + m
    pub fn multipole_sums(&self, separation: &Vector3D, lmax: usize) -> Vec<Complex64> {
        let mut sums = self.real_space_sums(separation, lmax);
        let reciprocal = self.reciprocal_space_sums(separation, lmax);
        for (sum, term) in sums.iter_mut().zip(reciprocal) {
            *sum += term;
        }

        let y00 = 0.5 / PI.sqrt();
        sums[0] -= PI * self.eta * self.eta / self.volume * y00;
        if separation.length() < ZERO_SEPARATION {
            sums[0] -= 2.0 / (PI.sqrt() * self.eta) * y00;
        }
        sums
    }

    fn real_space_sums(&self, separation: &Vector3D, lmax: usize) -> Vec<Complex64> {
        let mut sums = vec![Complex64::new(0.0, 0.0); kmax(lmax)];
        let mut radial = vec![0.0; lmax + 1];

        for (vector, _) in self.real_space.iter().rev() {
            let shifted = *vector + *separation;
            let distance = shifted.length();
            if distance < ZERO_SEPARATION {
                continue;
            }

            let gamma = upper_gamma_half(distance / self.eta, lmax);
            let mut power = distance;
            for (l, value) in radial.iter_mut().enumerate() {
                *value = gamma[l] / power;
                power *= distance;
            }

            let ylm = spherical_harmonics(lmax, &shifted);
            for (k, (sum, y)) in sums.iter_mut().zip(ylm).enumerate() {
                let (l, _) = lm_from_k(k);
                *sum += y * radial[l];
            }
        }

        for (k, sum) in sums.iter_mut().enumerate() {
            let (l, _) = lm_from_k(k);
            *sum *= 2f64.powi(l as i32) / PI.sqrt();
        }
        sums
    }

    fn reciprocal_space_sums(&self, separation: &Vector3D, lmax: usize) -> Vec<Complex64> {
        let mut sums = vec![Complex64::new(0.0, 0.0); kmax(lmax)];
        let mut radial = vec![0.0; lmax + 1];
        let width = 0.25 * self.eta * self.eta;

        for (vector, norm_squared) in self.reciprocal_space.iter().rev() {
            let length = vector.length();
            if length < ZERO_SEPARATION {
                continue;
            }

            let damping = (-width * norm_squared).exp();
            let mut power = damping / norm_squared;
            for value in radial.iter_mut() {
                *value = power;
                power *= length;
            }

            let phase = Complex64::from_polar(1.0, vector.dot(separation));
            let ylm = spherical_harmonics(lmax, vector);
            for (k, (sum, y)) in sums.iter_mut().zip(ylm).enumerate() {
                let (l, _) = lm_from_k(k);
                *sum += y * phase * radial[l];
            }
        }

        let scale = 4.0 * PI / self.volume;
        for (k, sum) in sums.iter_mut().enumerate() {
            let (l, _) = lm_from_k(k);
            *sum *= minus_i_power(l) * scale;
        }
        sums
    }
}

/// Structure constants for every (source atom, local atom) pair
///
/// The result is indexed `[atom, k, local]` and holds
/// 4π alat^l s^-(l+1) S_lm, which expresses the sums in the units of the
/// unscaled lattice.
///
/// # Arguments
///
/// * `lattice` - Shared lattice sums data in the scaled frame
/// * `positions` - All atom positions in the scaled frame
/// * `local_atoms` - Indices of the atoms the potential is evaluated at
/// * `lmax` - Highest order of the result
/// * `scaling_factor` - Length the lattice was divided by
/// * `alat` - Radius of the sphere with the volume per atom
/// * `parallel` - Whether to spread the pairs over the rayon pool
pub fn dl_matrix(
    lattice: &EwaldLattice,
    positions: &[Vector3D],
    local_atoms: &[usize],
    lmax: usize,
    scaling_factor: f64,
    alat: f64,
    parallel: bool,
) -> Array3<Complex64> {
    let num_atoms = positions.len();
    let pairs: Vec<(usize, usize)> = (0..local_atoms.len())
        .flat_map(|local| (0..num_atoms).map(move |atom| (local, atom)))
        .collect();

    debug!(
        "Evaluating {} atom pairs up to l = {} ({} real, {} reciprocal vectors)",
        pairs.len(),
        lmax,
        lattice.real_space.len(),
        lattice.reciprocal_space.len()
    );

    let evaluate = |&(local, atom): &(usize, usize)| {
        let separation = positions[local_atoms[local]] - positions[atom];
        (local, atom, lattice.multipole_sums(&separation, lmax))
    };

    let results: Vec<_> = if parallel {
        pairs.par_iter().map(evaluate).collect()
    } else {
        pairs.iter().map(evaluate).collect()
    };

    let scale = unit_factors(lmax, scaling_factor, alat);
    let mut dl = Array3::zeros((num_atoms, kmax(lmax), local_atoms.len()));
    for (local, atom, sums) in results {
        for (k, value) in sums.into_iter().enumerate() {
            let (l, _) = lm_from_k(k);
            dl[(atom, k, local)] = value * scale[l];
        }
    }
    dl
}

/// (-i)^l
fn minus_i_power(l: usize) -> Complex64 {
    match l % 4 {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, -1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, 1.0),
    }
}

/// 4π alat^l / s^(l+1) for l = 0..=lmax
fn unit_factors(lmax: usize, scaling_factor: f64, alat: f64) -> Vec<f64> {
    let mut factors = Vec::with_capacity(lmax + 1);
    let mut value = 4.0 * PI / scaling_factor;
    for _ in 0..=lmax {
        factors.push(value);
        value *= alat / scaling_factor;
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{generate_lattice, BravaisMatrix, TruncationBounds};
    use approx::assert_relative_eq;

    fn cubic_lattice(bounds: usize, cutoff: f64) -> EwaldLattice {
        let bravais = BravaisMatrix::from_columns(
            Vector3D::new(1.0, 0.0, 0.0),
            Vector3D::new(0.0, 1.0, 0.0),
            Vector3D::new(0.0, 0.0, 1.0),
        );
        let reciprocal = bravais.reciprocal().unwrap();
        let real_bounds = TruncationBounds::new([bounds; 3]);
        let k_bounds = TruncationBounds::new([bounds; 3]);
        EwaldLattice {
            eta: 0.6,
            volume: 1.0,
            real_space: generate_lattice(&bravais, cutoff, &real_bounds).unwrap(),
            reciprocal_space: generate_lattice(&reciprocal, cutoff * 2.0 * PI, &k_bounds).unwrap(),
        }
    }

    #[test]
    fn test_monopole_sum_matches_closed_form_ewald() {
        let lattice = cubic_lattice(4, 4.0);
        let separation = Vector3D::new(0.5, 0.5, 0.5);
        let sums = lattice.multipole_sums(&separation, 0);

        let eta = lattice.eta;
        let mut expected = 0.0;
        for (vector, _) in lattice.real_space.iter().rev() {
            let d = (*vector + separation).length();
            expected += libm::erfc(d / eta) / d;
        }
        for (vector, norm_squared) in lattice.reciprocal_space.iter().rev() {
            if norm_squared < 1e-12 {
                continue;
            }
            expected += 4.0 * PI * (-0.25 * eta * eta * norm_squared).exp() / norm_squared
                * vector.dot(&separation).cos();
        }
        expected -= PI * eta * eta;

        let y00 = 0.5 / PI.sqrt();
        assert_relative_eq!(sums[0].re, expected * y00, epsilon = 1e-12);
        assert!(sums[0].im.abs() < 1e-12);
    }

    #[test]
    fn test_sums_do_not_depend_on_splitting_width() {
        // converged on both sides for every width below
        let converged = cubic_lattice(6, 6.0);
        let separation = Vector3D::new(0.3, 0.1, 0.2);
        let reference = converged.multipole_sums(&separation, 2);

        for eta in [0.5, 0.65, 0.8] {
            let lattice = EwaldLattice {
                eta,
                ..converged.clone()
            };
            let sums = lattice.multipole_sums(&separation, 2);
            for (k, (value, expected)) in sums.iter().zip(&reference).enumerate() {
                assert!(
                    (value - expected).norm() < 1e-13,
                    "eta = {}, k = {}: {} vs {}",
                    eta,
                    k,
                    value,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_cubic_site_has_no_dipole_or_quadrupole() {
        let lattice = cubic_lattice(4, 4.0);
        let sums = lattice.multipole_sums(&Vector3D::origin(), 3);
        for k in 1..9 {
            assert!(sums[k].norm() < 1e-10, "k = {} gave {}", k, sums[k]);
        }
    }

    #[test]
    fn test_parallel_and_serial_agree() {
        let lattice = cubic_lattice(3, 3.0);
        let positions = [Vector3D::origin(), Vector3D::new(0.5, 0.5, 0.5)];
        let serial = dl_matrix(&lattice, &positions, &[0, 1], 2, 1.0, 0.62, false);
        let parallel = dl_matrix(&lattice, &positions, &[0, 1], 2, 1.0, 0.62, true);
        assert_eq!(serial.dim(), (2, 9, 2));
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_minus_i_power_cycles() {
        let minus_i = Complex64::new(0.0, -1.0);
        let mut expected = Complex64::new(1.0, 0.0);
        for l in 0..9 {
            assert_eq!(minus_i_power(l), expected, "l = {}", l);
            expected *= minus_i;
        }
    }

    #[test]
    fn test_unit_factors() {
        let factors = unit_factors(2, 0.5, 0.25);
        assert_relative_eq!(factors[0], 8.0 * PI);
        assert_relative_eq!(factors[1], 4.0 * PI);
        assert_relative_eq!(factors[2], 2.0 * PI);
    }
}
