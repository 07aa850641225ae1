/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Error types for the Madelung module

use crate::lattice::LatticeError;
use crate::utils::errors::UtilsError;
use thiserror::Error;

/// Result type for Madelung operations
pub type Result<T> = std::result::Result<T, MadelungError>;

/// Madelung-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MadelungError {
    /// The Bravais vectors span (almost) no volume
    #[error("Degenerate lattice: cell volume {0:e} is numerically zero")]
    DegenerateLattice(f64),

    /// A lattice vector set outgrew the capacity reserved for it
    #[error("Insufficient capacity: {required} lattice vectors do not fit into {capacity} slots")]
    InsufficientCapacity { capacity: usize, required: usize },

    /// Error when parameters are invalid
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The real- and reciprocal-space set sizes could not be balanced
    #[error("Scaling factor search did not converge after {iterations} iterations (last value {scaling_factor})")]
    ScalingNotConverged {
        iterations: usize,
        scaling_factor: f64,
    },

    /// Error from the lattice module
    #[error("Lattice error: {0}")]
    Lattice(LatticeError),

    /// Error from the special functions
    #[error("Math error: {0}")]
    Math(#[from] UtilsError),
}

impl From<LatticeError> for MadelungError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::DegenerateLattice(volume) => MadelungError::DegenerateLattice(volume),
            LatticeError::InsufficientCapacity { capacity, required } => {
                MadelungError::InsufficientCapacity { capacity, required }
            }
            other => MadelungError::Lattice(other),
        }
    }
}

/// Non-fatal diagnostic for an entry that should be real but is not
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionWarning {
    /// Index of the source atom
    pub atom: usize,
    /// Compound multipole index
    pub k: usize,
    /// Index into the local atom list
    pub local: usize,
    /// Size of the imaginary residue
    pub imaginary: f64,
}

impl std::fmt::Display for PrecisionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Dl matrix entry (atom {}, k {}, local {}) has imaginary residue {:e}",
            self.atom, self.k, self.local, self.imaginary
        )
    }
}
