/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the lattice module

use thiserror::Error;

/// Lattice-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// The Bravais vectors span (almost) no volume
    #[error("Degenerate lattice: cell volume {0:e} is numerically zero")]
    DegenerateLattice(f64),

    /// The pre-sized storage cannot hold all vectors inside the cutoff
    #[error("Insufficient capacity: {required} lattice vectors do not fit into {capacity} slots")]
    InsufficientCapacity { capacity: usize, required: usize },

    /// Error when parameters are invalid
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for lattice operations
pub type Result<T> = std::result::Result<T, LatticeError>;
