/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Bravais lattice matrix and cell geometry

use super::errors::{LatticeError, Result};
use super::vector::Vector3D;
use std::f64::consts::PI;

/// Three Bravais basis vectors, stored as the columns of a 3×3 matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BravaisMatrix {
    columns: [Vector3D; 3],
}

impl BravaisMatrix {
    /// Create a lattice from its three basis vectors
    pub fn from_columns(a0: Vector3D, a1: Vector3D, a2: Vector3D) -> Self {
        Self {
            columns: [a0, a1, a2],
        }
    }

    /// Create a lattice from matrix entries, `matrix[row][column]`
    pub fn from_matrix(matrix: [[f64; 3]; 3]) -> Self {
        let column = |c: usize| Vector3D::new(matrix[0][c], matrix[1][c], matrix[2][c]);
        Self::from_columns(column(0), column(1), column(2))
    }

    /// Create a lattice from nine values in column-major order
    pub fn from_column_major(values: &[f64]) -> Result<Self> {
        if values.len() != 9 {
            return Err(LatticeError::InvalidParameter(format!(
                "Bravais matrix needs 9 values, got {}",
                values.len()
            )));
        }

        Ok(Self::from_columns(
            Vector3D::from_slice(&values[0..3]),
            Vector3D::from_slice(&values[3..6]),
            Vector3D::from_slice(&values[6..9]),
        ))
    }

    /// Basis vector `index` (0, 1 or 2)
    pub fn column(&self, index: usize) -> Vector3D {
        self.columns[index]
    }

    /// All three basis vectors
    pub fn columns(&self) -> &[Vector3D; 3] {
        &self.columns
    }

    /// Matrix entry at (`row`, `column`)
    pub fn entry(&self, row: usize, column: usize) -> f64 {
        let v = self.columns[column];
        match row {
            0 => v.x,
            1 => v.y,
            _ => v.z,
        }
    }

    /// Lengths of the three basis vectors
    pub fn column_lengths(&self) -> [f64; 3] {
        [
            self.columns[0].length(),
            self.columns[1].length(),
            self.columns[2].length(),
        ]
    }

    /// Signed cell volume, the scalar triple product (a0 × a1) · a2
    pub fn signed_volume(&self) -> f64 {
        self.columns[0].cross(&self.columns[1]).dot(&self.columns[2])
    }

    /// Absolute cell volume
    ///
    /// Never fails; callers decide which volume counts as degenerate.
    pub fn cell_volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Cell volume, or `DegenerateLattice` if it does not exceed `tolerance`
    pub fn checked_volume(&self, tolerance: f64) -> Result<f64> {
        let volume = self.cell_volume();
        if !volume.is_finite() || volume <= tolerance {
            return Err(LatticeError::DegenerateLattice(volume));
        }
        Ok(volume)
    }

    /// Reciprocal lattice b_i with a_i · b_j = 2π δ_ij
    pub fn reciprocal(&self) -> Result<Self> {
        let volume = self.signed_volume();
        if volume == 0.0 || !volume.is_finite() {
            return Err(LatticeError::DegenerateLattice(volume.abs()));
        }

        let factor = 2.0 * PI / volume;
        let [a0, a1, a2] = self.columns;
        Ok(Self::from_columns(
            a1.cross(&a2) * factor,
            a2.cross(&a0) * factor,
            a0.cross(&a1) * factor,
        ))
    }

    /// The same lattice with every basis vector divided by `scale`
    pub fn scaled_down(&self, scale: f64) -> Self {
        Self::from_columns(
            self.columns[0] / scale,
            self.columns[1] / scale,
            self.columns[2] / scale,
        )
    }

    /// Cartesian lattice point x·a0 + y·a1 + z·a2
    pub fn lattice_point(&self, x: i64, y: i64, z: i64) -> Vector3D {
        let [a0, a1, a2] = self.columns;
        Vector3D::new(
            x as f64 * a0.x + y as f64 * a1.x + z as f64 * a2.x,
            x as f64 * a0.y + y as f64 * a1.y + z as f64 * a2.y,
            x as f64 * a0.z + y as f64 * a1.z + z as f64 * a2.z,
        )
    }

    /// Whether every entry is finite
    pub fn is_finite(&self) -> bool {
        self.columns.iter().all(Vector3D::is_finite)
    }
}
