/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! # madelung-rs
//!
//! Madelung potentials and multipole structure constants for atoms in
//! periodic crystals, evaluated with the generalized Ewald method.
//!
//! Given the Bravais lattice, the atom positions and a maximum multipole
//! order, [`MultipoleMadelung`] produces the truncated real- and
//! reciprocal-space lattice vector sets, the structure constants (Dl matrix)
//! between every atom and a set of local atoms, the coupling factors of two
//! multipole expansions and the monopole Madelung matrix.

pub mod cli;
pub mod input;
pub mod lattice;
pub mod legacy;
pub mod madelung;
pub mod utils;

pub use madelung::{MadelungConfig, MadelungError, MultipoleMadelung};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_information() {
        assert!(!VERSION.is_empty());
        assert_eq!(AUTHORS, "Ameyanagi");
    }
}
