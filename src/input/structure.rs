/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! JSON description of a crystal structure
//!
//! ```json
//! {
//!   "bravais": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
//!   "positions": [[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]],
//!   "lmax": 3,
//!   "local_atoms": [0, 1]
//! }
//! ```
//!
//! `bravais` lists the three lattice vectors. `local_atoms` defaults to every
//! atom and `config` to the default numerical settings.

use super::errors::{InputError, Result};
use crate::lattice::{BravaisMatrix, Vector3D};
use crate::madelung::{MadelungConfig, MultipoleMadelung};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Crystal structure and calculation settings read from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureInput {
    /// Lattice vectors a0, a1, a2
    pub bravais: [[f64; 3]; 3],
    /// Cartesian atom positions
    pub positions: Vec<[f64; 3]>,
    pub lmax: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_atoms: Option<Vec<usize>>,
    #[serde(default)]
    pub config: MadelungConfig,
}

impl StructureInput {
    /// Read a structure file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let input: Self = serde_json::from_reader(reader)?;
        input.validate()?;
        Ok(input)
    }

    /// Parse a structure from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let input: Self = serde_json::from_str(json)?;
        input.validate()?;
        Ok(input)
    }

    /// Check counts and indices before any numerical work
    pub fn validate(&self) -> Result<()> {
        if self.positions.is_empty() {
            return Err(InputError::Invalid("no atom positions given".to_string()));
        }
        if let Some(local) = &self.local_atoms {
            if local.is_empty() {
                return Err(InputError::Invalid("local_atoms is empty".to_string()));
            }
            if let Some(index) = local.iter().find(|&&i| i >= self.positions.len()) {
                return Err(InputError::Invalid(format!(
                    "local atom {} does not exist, the structure has {} atoms",
                    index,
                    self.positions.len()
                )));
            }
        }
        Ok(())
    }

    pub fn bravais_matrix(&self) -> BravaisMatrix {
        let [a0, a1, a2] = self.bravais;
        BravaisMatrix::from_columns(
            Vector3D::from_slice(&a0),
            Vector3D::from_slice(&a1),
            Vector3D::from_slice(&a2),
        )
    }

    pub fn atom_positions(&self) -> Vec<Vector3D> {
        self.positions.iter().map(|p| Vector3D::from_slice(p)).collect()
    }

    /// Local atoms, all atoms when none were listed
    pub fn local_atoms(&self) -> Vec<usize> {
        self.local_atoms
            .clone()
            .unwrap_or_else(|| (0..self.positions.len()).collect())
    }

    /// Run the Madelung calculation for this structure
    pub fn compute(&self) -> Result<MultipoleMadelung> {
        Ok(MultipoleMadelung::with_config(
            self.bravais_matrix(),
            self.atom_positions(),
            self.lmax,
            self.local_atoms(),
            self.config.clone(),
        )?)
    }
}
