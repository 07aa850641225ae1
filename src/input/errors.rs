/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Error types for structure input

use crate::madelung::MadelungError;
use std::io;
use thiserror::Error;

/// Errors that can occur while reading a structure file
#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid structure: {0}")]
    Invalid(String),

    #[error("Calculation failed: {0}")]
    Madelung(#[from] MadelungError),
}

/// Result type for input operations
pub type Result<T> = std::result::Result<T, InputError>;
