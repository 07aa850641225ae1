/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Structure input
//!
//! This module reads crystal structures and calculation settings from JSON
//! files for the command line tool.

pub mod errors;
pub mod structure;

pub use errors::{InputError, Result};
pub use structure::StructureInput;
