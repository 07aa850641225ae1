/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Monopole Madelung matrix and its printed report

use ndarray::{Array2, Array3};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Madelung sums indexed by (atom, local atom)
#[derive(Debug, Clone, PartialEq)]
pub struct MadelungMatrix {
    values: Array2<f64>,
}

impl MadelungMatrix {
    /// Extract the monopole sums from a structure constant array
    ///
    /// The monopole entry of the Dl matrix is 4π Y00 times the Madelung sum,
    /// so the sum is recovered as Re(Dl[atom, 0, local]) · Y00.
    pub fn from_dl_matrix(dl_matrix: &Array3<Complex64>) -> Self {
        let y00 = 0.5 / PI.sqrt();
        let (num_atoms, _, num_local) = dl_matrix.dim();
        let values = Array2::from_shape_fn((num_atoms, num_local), |(atom, local)| {
            dl_matrix[(atom, 0, local)].re * y00
        });
        Self { values }
    }

    pub fn num_atoms(&self) -> usize {
        self.values.nrows()
    }

    pub fn num_local(&self) -> usize {
        self.values.ncols()
    }

    pub fn get(&self, atom: usize, local: usize) -> Option<f64> {
        self.values.get((atom, local)).copied()
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Sum over all atoms for one local atom
    pub fn column_sum(&self, local: usize) -> f64 {
        self.values.column(local).sum()
    }

    /// Text report, one line per matrix element plus one sum line per local atom
    ///
    /// Atoms are numbered from 1 and the values use Fortran D-exponent notation.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.num_local() * (self.num_atoms() + 1));
        for local in 0..self.num_local() {
            for atom in 0..self.num_atoms() {
                lines.push(format!(
                    "Madelung Matrix(j,i) for atom {:5}{:5}: {:>20}",
                    atom + 1,
                    local + 1,
                    format_d_exponent(self.values[(atom, local)], 13)
                ));
            }
            lines.push(format!(
                "Sum over j of Madelung Matrix(j,i) for atom {:5}: {:>21}",
                local + 1,
                format_d_exponent(self.column_sum(local), 13)
            ));
        }
        lines
    }
}

/// Format a number as `±0.dddddD±ee` with `digits` significant digits
pub fn format_d_exponent(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return format!("0.{}D+00", "0".repeat(digits));
    }

    let scientific = format!("{:.*e}", digits.saturating_sub(1), value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let mantissa: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent = exponent.parse::<i32>().unwrap_or(0) + 1;

    let sign = if value < 0.0 { "-" } else { "" };
    let exponent_sign = if exponent < 0 { '-' } else { '+' };
    format!("{}0.{}D{}{:02}", sign, mantissa, exponent_sign, exponent.abs())
}
