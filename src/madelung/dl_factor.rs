/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Normalization factors for coupling two multipole expansions
//!
//! Row index k = (l', m') runs over every multipole up to lmax; column index
//! j = (l, m) runs over the non-negative orders m ≥ 0 up to lmax.

use super::errors::Result;
use crate::utils::math::{double_factorial, gaunt_coefficient, jmax, kmax, lm_from_j, lm_from_k};
use ndarray::Array2;

/// Table F[k][j] = G(l, m; l + l', m' - m; l', m') / ((2l + 1)!! (2l' + 1)!!)
///
/// G is the Gaunt integral of Y_lm Y_{l+l', m'-m} Y*_{l'm'}. The table only
/// depends on lmax.
#[derive(Debug, Clone, PartialEq)]
pub struct DlFactorTable {
    lmax: usize,
    values: Array2<f64>,
}

impl DlFactorTable {
    /// Build the table for every l, l' ≤ lmax
    pub fn new(lmax: usize) -> Result<Self> {
        let mut values = Array2::zeros((kmax(lmax), jmax(lmax)));

        for ((k, j), value) in values.indexed_iter_mut() {
            let (lp, mp) = lm_from_k(k);
            let (l, m) = lm_from_j(j);
            let (lp, l) = (lp as i32, l as i32);

            let gaunt = gaunt_coefficient(l, m, l + lp, mp - m, lp, mp)?;
            *value = gaunt / (double_factorial(2 * l + 1) * double_factorial(2 * lp + 1));
        }

        Ok(Self { lmax, values })
    }

    pub fn lmax(&self) -> usize {
        self.lmax
    }

    /// Factor for multipole k and non-negative order j
    pub fn get(&self, k: usize, j: usize) -> Option<f64> {
        self.values.get((k, j)).copied()
    }

    /// The whole table, rows indexed by k and columns by j
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_monopole_factor_does_not_depend_on_lmax() {
        for lmax in 0..5 {
            let table = DlFactorTable::new(lmax).unwrap();
            assert_relative_eq!(table.get(0, 0).unwrap(), 0.28209479177387842, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_table_shape() {
        let table = DlFactorTable::new(3).unwrap();
        assert_eq!(table.values().dim(), (16, 10));
        assert!(table.get(16, 0).is_none());
        assert!(table.get(0, 10).is_none());
    }

    #[test]
    fn test_first_row() {
        let table = DlFactorTable::new(3).unwrap();
        let expected = [
            (1, 9.4031597257959593E-002),
            (2, -9.4031597257959454E-002),
            (3, 1.8806319451591908E-002),
            (4, -1.8806319451591908E-002),
        ];
        for (j, value) in expected {
            assert_relative_eq!(table.get(0, j).unwrap(), value, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_column_of_monopole_order_is_diagonal_normalization() {
        // For j = 0 the Gaunt integral reduces to Y00, divided by (2l'+1)!!
        let table = DlFactorTable::new(3).unwrap();
        let y00 = 0.28209479177387842;
        for k in 0..16 {
            let (lp, _) = lm_from_k(k);
            let expected = y00 / double_factorial(2 * lp as i32 + 1);
            assert_relative_eq!(table.get(k, 0).unwrap(), expected, epsilon = 1e-12);
        }
    }
}
