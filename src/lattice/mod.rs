/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Lattice geometry for periodic crystals
//!
//! This module provides the 3D vector type, Bravais and reciprocal lattices,
//! per-axis truncation of the Ewald sums, and the ordered enumeration of
//! lattice vectors inside a cutoff sphere.

pub mod bravais;
pub mod errors;
pub mod generator;
pub mod truncation;
pub mod vector;

pub use bravais::BravaisMatrix;
pub use errors::{LatticeError, Result};
pub use generator::{
    count_lattice_vectors, create_lattice, generate_lattice, LatticeVectorSet,
    OrderedVectorBuffer,
};
pub use truncation::{
    real_space_bounds, reciprocal_space_bounds, truncation_radius, TruncationBounds,
};
pub use vector::Vector3D;
