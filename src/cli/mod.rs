/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Command Line Interface (CLI) module
//!
//! ```sh
//! madelung-rs structure.json --lmax 3 --local 0,2
//! madelung-rs structure.json --json
//! ```

use crate::input::StructureInput;
use crate::madelung::MultipoleMadelung;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "madelung-rs")]
#[command(about = "Madelung sums and multipole structure constants of periodic crystals")]
#[command(version)]
pub struct Cli {
    /// Path to the JSON structure file
    pub structure: PathBuf,

    /// Highest multipole order (overrides the file)
    #[arg(long)]
    pub lmax: Option<usize>,

    /// Comma separated 0-based local atom indices (overrides the file)
    #[arg(long, value_delimiter = ',')]
    pub local: Option<Vec<usize>>,

    /// Print level of the report; negative values suppress it
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub print_level: i32,

    /// Print a JSON summary instead of the text report
    #[arg(long)]
    pub json: bool,
}

/// Machine readable result of one run
#[derive(Debug, Serialize)]
pub struct MadelungSummary {
    pub lmax: usize,
    pub num_atoms: usize,
    pub local_atoms: Vec<usize>,
    pub scaling_factor: f64,
    pub eta: f64,
    pub rs_size: Vec<usize>,
    pub kn_size: Vec<usize>,
    pub real_space_count: usize,
    pub reciprocal_space_count: usize,
    /// Rows are atoms, columns are local atoms
    pub madelung_matrix: Vec<Vec<f64>>,
}

impl From<&MultipoleMadelung> for MadelungSummary {
    fn from(madelung: &MultipoleMadelung) -> Self {
        let madelung_matrix = madelung
            .madelung_matrix()
            .values()
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect();
        Self {
            lmax: madelung.lmax(),
            num_atoms: madelung.num_atoms(),
            local_atoms: madelung.local_atoms().to_vec(),
            scaling_factor: madelung.scaling_factor(),
            eta: madelung.eta(),
            rs_size: madelung.rs_size(),
            kn_size: madelung.kn_size(),
            real_space_count: madelung.real_space_count(),
            reciprocal_space_count: madelung.reciprocal_space_count(),
            madelung_matrix,
        }
    }
}

/// Load the structure, apply command line overrides and compute
pub fn compute(cli: &Cli) -> anyhow::Result<MultipoleMadelung> {
    let mut input = StructureInput::from_file(&cli.structure)?;
    if let Some(lmax) = cli.lmax {
        input.lmax = lmax;
    }
    if let Some(local) = &cli.local {
        input.local_atoms = Some(local.clone());
        input.validate()?;
    }
    Ok(input.compute()?)
}

/// Output lines for a finished calculation
pub fn render(cli: &Cli, madelung: &MultipoleMadelung) -> anyhow::Result<Vec<String>> {
    if cli.json {
        let summary = MadelungSummary::from(madelung);
        return Ok(vec![serde_json::to_string_pretty(&summary)?]);
    }
    if cli.print_level < 0 {
        return Ok(Vec::new());
    }

    let mut lines = vec![
        format!("Scaling factor: {:.14}", madelung.scaling_factor()),
        format!(
            "Real space bounds: {:?} ({} vectors)",
            madelung.rs_size(),
            madelung.real_space_count()
        ),
        format!(
            "Reciprocal space bounds: {:?} ({} vectors)",
            madelung.kn_size(),
            madelung.reciprocal_space_count()
        ),
    ];
    lines.extend(madelung.madelung_matrix().report_lines());
    Ok(lines)
}

/// Entry point of the binary
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let madelung = compute(&cli)?;
    for line in render(&cli, &madelung)? {
        println!("{}", line);
    }
    Ok(())
}
