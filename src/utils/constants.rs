/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Numerical constants shared by the lattice and Madelung modules

/// Slack added to the squared cutoff so that vectors lying on the border of
/// the truncation sphere survive floating-point round-off
pub const BORDER_TOLERANCE: f64 = 1e-6;

/// Separations shorter than this are treated as the zero vector
pub const ZERO_SEPARATION: f64 = 1e-6;

/// Default tolerance for the tail terms that fix the truncation bounds
pub const TRUNCATION_TOLERANCE: f64 = 1e-16;

/// Default step of the scaling-factor search
pub const SCALING_STEP: f64 = 0.02;

/// Default iteration limit of the scaling-factor search
pub const MAX_SCALING_ITERATIONS: usize = 1000;

/// Cell volumes below this are considered degenerate
pub const DEGENERATE_VOLUME: f64 = 1e-10;

/// Largest imaginary residue tolerated on entries that must be real
pub const IMAGINARY_TOLERANCE: f64 = 1e-10;
