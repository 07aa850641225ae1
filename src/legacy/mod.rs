/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Flat-array entry point for callers that hold the structure in plain arrays
//!
//! A [`MadelungSession`] is created from a column-major Bravais matrix, an
//! atom-major position array and 1-based global indices of the local atoms.
//! Dropping the session releases everything it computed.

use crate::lattice::{BravaisMatrix, Vector3D};
use crate::madelung::{MadelungError, MultipoleMadelung, Result};
use log::{debug, info};

/// Owned replacement for the init / print / end call sequence
#[derive(Debug)]
pub struct MadelungSession {
    madelung: MultipoleMadelung,
    local_atoms: Vec<usize>,
    print_level: i32,
}

impl MadelungSession {
    /// Build the session and run the calculation
    ///
    /// # Arguments
    ///
    /// * `num_local_atoms` - Number of entries in `global_index`
    /// * `num_atoms` - Number of atoms in the unit cell
    /// * `global_index` - 1-based indices of the local atoms
    /// * `lmax_rho` - Highest order of the charge density expansion
    /// * `lmax_pot` - Highest order of the potential expansion
    /// * `bravais` - Nine entries, one lattice vector after the other
    /// * `positions` - 3 · `num_atoms` entries, one atom after the other
    /// * `print_level` - Verbosity of the setup log
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        num_local_atoms: usize,
        num_atoms: usize,
        global_index: &[i32],
        lmax_rho: i32,
        lmax_pot: i32,
        bravais: &[f64],
        positions: &[f64],
        print_level: i32,
    ) -> Result<Self> {
        if global_index.len() != num_local_atoms {
            return Err(MadelungError::InvalidParameter(format!(
                "Expected {} global indices, got {}",
                num_local_atoms,
                global_index.len()
            )));
        }
        if positions.len() != 3 * num_atoms {
            return Err(MadelungError::InvalidParameter(format!(
                "Expected {} position entries for {} atoms, got {}",
                3 * num_atoms,
                num_atoms,
                positions.len()
            )));
        }
        if lmax_rho < 0 || lmax_pot < 0 {
            return Err(MadelungError::InvalidParameter(format!(
                "Angular momentum cutoffs must be non-negative, got {} and {}",
                lmax_rho, lmax_pot
            )));
        }

        let local_atoms = global_index
            .iter()
            .map(|&index| {
                if index >= 1 && index as usize <= num_atoms {
                    Ok(index as usize - 1)
                } else {
                    Err(MadelungError::InvalidParameter(format!(
                        "Global index {} out of range 1..={}",
                        index, num_atoms
                    )))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let bravais = BravaisMatrix::from_column_major(bravais)?;
        let atom_positions = positions.chunks_exact(3).map(Vector3D::from_slice).collect();
        let lmax = lmax_rho.max(lmax_pot) as usize;

        if print_level > 0 {
            debug!(
                "Madelung setup: {} local of {} atoms, lmax = {}, lattice {:?}",
                num_local_atoms,
                num_atoms,
                lmax,
                bravais.columns()
            );
        }

        let madelung = MultipoleMadelung::new(bravais, atom_positions, lmax, local_atoms.clone())?;
        Ok(Self {
            madelung,
            local_atoms,
            print_level,
        })
    }

    /// Report lines of the Madelung matrix, also written to the log
    ///
    /// Nothing is produced for a negative print level.
    pub fn print_madelung_matrix(&self, print_level: i32) -> Vec<String> {
        if print_level < 0 {
            return Vec::new();
        }
        let lines = self.madelung.madelung_matrix().report_lines();
        for line in &lines {
            info!("{}", line);
        }
        lines
    }

    /// Madelung sum between 0-based `atom` and the 0-based local atom `local`
    pub fn mad_sum(&self, atom: usize, local: usize) -> Option<f64> {
        self.madelung.mad_sum(atom, local)
    }

    /// 0-based atom indices of the local atoms
    pub fn local_atoms(&self) -> &[usize] {
        &self.local_atoms
    }

    pub fn print_level(&self) -> i32 {
        self.print_level
    }

    pub fn madelung(&self) -> &MultipoleMadelung {
        &self.madelung
    }

    /// Release the session
    pub fn end(self) {}
}

impl Drop for MadelungSession {
    fn drop(&mut self) {
        debug!("Madelung session for {} local atoms released", self.local_atoms.len());
    }
}
