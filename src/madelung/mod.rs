/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Multipole Madelung sums for periodic crystals
//!
//! [`MultipoleMadelung`] evaluates, once and eagerly, the generalized Ewald
//! structure constants between every atom of the unit cell and a chosen set
//! of local atoms, together with the monopole Madelung matrix and the
//! normalization factors used to couple two multipole expansions.
//!
//! ```
//! use madelung_rs::lattice::{BravaisMatrix, Vector3D};
//! use madelung_rs::madelung::MultipoleMadelung;
//!
//! let bravais = BravaisMatrix::from_columns(
//!     Vector3D::new(1.0, 0.0, 0.0),
//!     Vector3D::new(0.0, 1.0, 0.0),
//!     Vector3D::new(0.0, 0.0, 1.0),
//! );
//! let positions = vec![Vector3D::origin(), Vector3D::new(0.5, 0.5, 0.5)];
//! let madelung = MultipoleMadelung::new(bravais, positions, 3, vec![0, 1]).unwrap();
//! assert!((madelung.mad_sum(1, 0).unwrap() + 0.801935970028).abs() < 1e-12);
//! ```

pub mod assembler;
pub mod config;
pub mod dl_factor;
pub mod errors;
pub mod scaling;
pub mod structure_constants;

pub use assembler::{format_d_exponent, MadelungMatrix};
pub use config::MadelungConfig;
pub use dl_factor::DlFactorTable;
pub use errors::{MadelungError, PrecisionWarning, Result};
pub use scaling::{ewald_width, find_scaling_factor, EwaldSplitting};
pub use structure_constants::{dl_matrix, EwaldLattice};

use crate::lattice::{create_lattice, BravaisMatrix, Vector3D};
use crate::utils::math::lm_from_k;
use log::{debug, info, warn};
use ndarray::Array3;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Madelung sums and multipole structure constants of one crystal
#[derive(Debug, Clone)]
pub struct MultipoleMadelung {
    lmax: usize,
    num_atoms: usize,
    local_atoms: Vec<usize>,
    splitting: EwaldSplitting,
    real_space_count: usize,
    reciprocal_space_count: usize,
    alat: f64,
    dl_matrix: Array3<Complex64>,
    dl_factor: DlFactorTable,
    madelung: MadelungMatrix,
    warnings: Vec<PrecisionWarning>,
}

impl MultipoleMadelung {
    /// Run the calculation with the default numerical settings
    ///
    /// # Arguments
    ///
    /// * `bravais` - Lattice whose columns are the primitive vectors
    /// * `positions` - Cartesian positions of all atoms in the unit cell
    /// * `lmax` - Highest multipole order of the expansions to couple
    /// * `local_atoms` - Indices into `positions` of the atoms to evaluate at
    pub fn new(
        bravais: BravaisMatrix,
        positions: Vec<Vector3D>,
        lmax: usize,
        local_atoms: Vec<usize>,
    ) -> Result<Self> {
        Self::with_config(bravais, positions, lmax, local_atoms, MadelungConfig::default())
    }

    /// Run the calculation with explicit numerical settings
    pub fn with_config(
        bravais: BravaisMatrix,
        positions: Vec<Vector3D>,
        lmax: usize,
        local_atoms: Vec<usize>,
        config: MadelungConfig,
    ) -> Result<Self> {
        config.validate()?;
        validate_structure(&bravais, &positions, &local_atoms)?;
        bravais.checked_volume(config.degenerate_volume_tolerance)?;

        let splitting = find_scaling_factor(&bravais, lmax, &config)?;
        let scaling_factor = splitting.scaling_factor;

        let real = &splitting.real_space;
        let recip = &splitting.reciprocal_space;
        let lattice = EwaldLattice {
            eta: splitting.eta,
            volume: splitting.scaled_lattice.cell_volume(),
            real_space: create_lattice(&splitting.scaled_lattice, real.radius, &real.bounds, real.count)?,
            reciprocal_space: create_lattice(
                &splitting.reciprocal_lattice,
                recip.radius,
                &recip.bounds,
                recip.count,
            )?,
        };
        debug!(
            "Lattice sets: {} real-space vectors (bounds {:?}), {} reciprocal vectors (bounds {:?})",
            lattice.real_space.len(),
            real.bounds.as_array(),
            lattice.reciprocal_space.len(),
            recip.bounds.as_array()
        );

        let num_atoms = positions.len();
        let alat =
            scaling_factor * (3.0 * lattice.volume / (4.0 * PI * num_atoms as f64)).cbrt();
        let scaled_positions: Vec<Vector3D> =
            positions.iter().map(|p| *p / scaling_factor).collect();

        let dl_matrix = dl_matrix(
            &lattice,
            &scaled_positions,
            &local_atoms,
            2 * lmax,
            scaling_factor,
            alat,
            config.parallel,
        );
        let madelung = MadelungMatrix::from_dl_matrix(&dl_matrix);
        let warnings = precision_warnings(&dl_matrix, config.imaginary_tolerance);
        for warning in &warnings {
            warn!("{}", warning);
        }

        info!(
            "Madelung sums for {} local of {} atoms done (lmax = {}, scaling factor {:.14})",
            local_atoms.len(),
            num_atoms,
            lmax,
            scaling_factor
        );

        Ok(Self {
            lmax,
            num_atoms,
            local_atoms,
            real_space_count: lattice.real_space.len(),
            reciprocal_space_count: lattice.reciprocal_space.len(),
            splitting,
            alat,
            dl_matrix,
            dl_factor: DlFactorTable::new(lmax)?,
            madelung,
            warnings,
        })
    }

    /// Madelung sum between `atom` and the local atom with index `local`
    pub fn mad_sum(&self, atom: usize, local: usize) -> Option<f64> {
        self.madelung.get(atom, local)
    }

    /// Structure constant of compound index k between `atom` and local atom `local`
    ///
    /// k runs over l ≤ 2·lmax.
    pub fn dl_matrix(&self, atom: usize, k: usize, local: usize) -> Option<Complex64> {
        self.dl_matrix.get((atom, k, local)).copied()
    }

    /// Coupling factor for multipole k and non-negative order j
    pub fn dl_factor(&self, k: usize, j: usize) -> Option<f64> {
        self.dl_factor.get(k, j)
    }

    pub fn scaling_factor(&self) -> f64 {
        self.splitting.scaling_factor
    }

    pub fn eta(&self) -> f64 {
        self.splitting.eta
    }

    /// Per-axis bounds of the real-space lattice sum
    pub fn rs_size(&self) -> Vec<usize> {
        self.splitting.real_space.bounds.to_vec()
    }

    /// Per-axis bounds of the reciprocal-space lattice sum
    pub fn kn_size(&self) -> Vec<usize> {
        self.splitting.reciprocal_space.bounds.to_vec()
    }

    pub fn real_space_count(&self) -> usize {
        self.real_space_count
    }

    pub fn reciprocal_space_count(&self) -> usize {
        self.reciprocal_space_count
    }

    pub fn lmax(&self) -> usize {
        self.lmax
    }

    pub fn num_atoms(&self) -> usize {
        self.num_atoms
    }

    pub fn local_atoms(&self) -> &[usize] {
        &self.local_atoms
    }

    /// Radius of the sphere holding the volume of one atom
    pub fn alat(&self) -> f64 {
        self.alat
    }

    pub fn splitting(&self) -> &EwaldSplitting {
        &self.splitting
    }

    pub fn dl_matrix_array(&self) -> &Array3<Complex64> {
        &self.dl_matrix
    }

    pub fn dl_factor_table(&self) -> &DlFactorTable {
        &self.dl_factor
    }

    pub fn madelung_matrix(&self) -> &MadelungMatrix {
        &self.madelung
    }

    pub fn precision_warnings(&self) -> &[PrecisionWarning] {
        &self.warnings
    }
}

fn validate_structure(
    bravais: &BravaisMatrix,
    positions: &[Vector3D],
    local_atoms: &[usize],
) -> Result<()> {
    if !bravais.is_finite() {
        return Err(MadelungError::InvalidParameter(
            "Bravais matrix contains non-finite entries".to_string(),
        ));
    }
    if positions.is_empty() {
        return Err(MadelungError::InvalidParameter(
            "At least one atom position is required".to_string(),
        ));
    }
    if let Some(index) = positions.iter().position(|p| !p.is_finite()) {
        return Err(MadelungError::InvalidParameter(format!(
            "Position of atom {} is not finite",
            index
        )));
    }
    if local_atoms.is_empty() {
        return Err(MadelungError::InvalidParameter(
            "At least one local atom is required".to_string(),
        ));
    }
    if let Some(&index) = local_atoms.iter().find(|&&i| i >= positions.len()) {
        return Err(MadelungError::InvalidParameter(format!(
            "Local atom index {} out of range for {} atoms",
            index,
            positions.len()
        )));
    }
    Ok(())
}

/// Entries with m = 0 are real for lattices with inversion symmetry of the sums
fn precision_warnings(dl_matrix: &Array3<Complex64>, tolerance: f64) -> Vec<PrecisionWarning> {
    let (num_atoms, num_k, num_local) = dl_matrix.dim();
    let mut warnings = Vec::new();
    for k in (0..num_k).filter(|&k| lm_from_k(k).1 == 0) {
        for atom in 0..num_atoms {
            for local in 0..num_local {
                let value = dl_matrix[(atom, k, local)];
                if value.im.abs() > tolerance * value.re.abs().max(1.0) {
                    warnings.push(PrecisionWarning {
                        atom,
                        k,
                        local,
                        imaginary: value.im,
                    });
                }
            }
        }
    }
    warnings
}
