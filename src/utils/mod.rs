/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Utility functions for the Madelung calculations
//!
//! This module provides the constants and special functions used throughout
//! the lattice and Madelung code.

pub mod constants;
pub mod errors;
pub mod math;

pub use errors::{Result, UtilsError};
pub use math::{
    double_factorial, gaunt_coefficient, jmax, k_index, kmax, lm_from_j, lm_from_k,
    spherical_harmonics, upper_gamma_half, wigner_3j_symbol,
};
