/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Mathematical utility functions for the lattice sums
//!
//! This module provides the special functions the Ewald summation consumes:
//! factorials, complex spherical harmonics, Wigner 3j symbols and Gaunt
//! coefficients, and the upper incomplete Gamma function at half-integer
//! order.

#![allow(clippy::needless_range_loop)]
use super::errors::{Result, UtilsError};
use crate::lattice::Vector3D;
use num_complex::Complex64;
use libm::erfc;
use std::f64::consts::PI;

/// Largest argument for which `factorial` stays finite in f64
const MAX_FACTORIAL: u32 = 170;

/// Calculate the factorial of n as a floating point number
///
/// # Arguments
///
/// * `n` - The non-negative integer for which to calculate the factorial
///
/// # Returns
///
/// The factorial of n or None if it overflows f64
pub fn factorial(n: u32) -> Option<f64> {
    if n > MAX_FACTORIAL {
        return None;
    }

    let mut result = 1.0;
    for i in 2..=n {
        result *= i as f64;
    }
    Some(result)
}

/// Calculate the double factorial n!!
///
/// The double factorial is defined as:
/// n!! = n × (n-2) × (n-4) × ... × (1 or 2), with (-1)!! = 0!! = 1
pub fn double_factorial(n: i32) -> f64 {
    let mut result = 1.0;
    let mut i = n;
    while i > 1 {
        result *= i as f64;
        i -= 2;
    }
    result
}

/// Number of compound indices k = l² + l + m for all l ≤ lmax
pub fn kmax(lmax: usize) -> usize {
    (lmax + 1) * (lmax + 1)
}

/// Number of indices j = l(l+1)/2 + m with m ≥ 0 for all l ≤ lmax
pub fn jmax(lmax: usize) -> usize {
    (lmax + 1) * (lmax + 2) / 2
}

/// Compound index of (l, m)
pub fn k_index(l: usize, m: i32) -> usize {
    ((l * l + l) as i32 + m) as usize
}

/// Decompose a compound index into (l, m)
pub fn lm_from_k(k: usize) -> (usize, i32) {
    let mut l = 0;
    while (l + 1) * (l + 1) <= k {
        l += 1;
    }
    (l, k as i32 - (l * l + l) as i32)
}

/// Decompose a non-negative-m index into (l, m)
pub fn lm_from_j(j: usize) -> (usize, i32) {
    let mut l = 0;
    while (l + 1) * (l + 2) / 2 <= j {
        l += 1;
    }
    (l, (j - l * (l + 1) / 2) as i32)
}

/// All complex spherical harmonics Y_l^m(r̂) with l ≤ lmax
///
/// The values are returned in compound-index order k = l² + l + m and follow
/// the Condon-Shortley phase convention, so that Y_l^{-m} = (-1)^m Y_l^m*.
/// The direction of the zero vector is taken along +z.
///
/// The normalized associated Legendre functions are built with the standard
/// three-term recurrence, which stays accurate for the orders used here.
pub fn spherical_harmonics(lmax: usize, v: &Vector3D) -> Vec<Complex64> {
    let r = v.length();
    let rho = (v.x * v.x + v.y * v.y).sqrt();
    let (cos_theta, sin_theta) = if r > 0.0 { (v.z / r, rho / r) } else { (1.0, 0.0) };
    let exp_iphi = if rho > 0.0 {
        Complex64::new(v.x / rho, v.y / rho)
    } else {
        Complex64::new(1.0, 0.0)
    };

    // plm[l][m] = sqrt((2l+1)/4π (l-m)!/(l+m)!) P_l^m(cos θ)
    let mut plm = vec![vec![0.0; lmax + 1]; lmax + 1];
    plm[0][0] = 1.0 / (4.0 * PI).sqrt();
    for m in 1..=lmax {
        let mf = m as f64;
        plm[m][m] = -((2.0 * mf + 1.0) / (2.0 * mf)).sqrt() * sin_theta * plm[m - 1][m - 1];
    }
    for m in 0..lmax {
        let mf = m as f64;
        plm[m + 1][m] = (2.0 * mf + 3.0).sqrt() * cos_theta * plm[m][m];
        for l in (m + 2)..=lmax {
            let a = recurrence_coefficient(l, m);
            let a_prev = recurrence_coefficient(l - 1, m);
            plm[l][m] = a * (cos_theta * plm[l - 1][m] - plm[l - 2][m] / a_prev);
        }
    }

    let mut ylm = vec![Complex64::new(0.0, 0.0); kmax(lmax)];
    let mut phase = Complex64::new(1.0, 0.0);
    for m in 0..=lmax {
        let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
        for l in m..=lmax {
            let value = phase * plm[l][m];
            ylm[k_index(l, m as i32)] = value;
            ylm[k_index(l, -(m as i32))] = sign * value.conj();
        }
        phase *= exp_iphi;
    }
    ylm
}

fn recurrence_coefficient(l: usize, m: usize) -> f64 {
    let (l, m) = (l as f64, m as f64);
    ((4.0 * l * l - 1.0) / (l * l - m * m)).sqrt()
}

/// Upper incomplete Gamma function Γ(l + 1/2, x²) for l = 0..=lmax
///
/// Starts from Γ(1/2, x²) = √π erfc(x) and applies the upward recurrence
/// Γ(l + 1/2, x²) = (l - 1/2) Γ(l - 1/2, x²) + x^{2l-1} e^{-x²}.
pub fn upper_gamma_half(x: f64, lmax: usize) -> Vec<f64> {
    let mut gamma = Vec::with_capacity(lmax + 1);
    gamma.push(PI.sqrt() * erfc(x));

    if lmax > 0 {
        let exp_term = (-x * x).exp();
        let mut power = x;
        for l in 1..=lmax {
            let next = (l as f64 - 0.5) * gamma[l - 1] + power * exp_term;
            gamma.push(next);
            power *= x * x;
        }
    }
    gamma
}

/// Gaunt coefficient for the integral of three spherical harmonics
///
/// Calculates the integral of Y_{l1}^{m1} Y_{l2}^{m2} Y_{l3}^{m3}* over the unit sphere
///
/// # Arguments
///
/// * `l1`, `m1` - Degree and order of first spherical harmonic
/// * `l2`, `m2` - Degree and order of second spherical harmonic
/// * `l3`, `m3` - Degree and order of the conjugated spherical harmonic
///
/// # Returns
///
/// The Gaunt coefficient or zero if selection rules are not met
pub fn gaunt_coefficient(l1: i32, m1: i32, l2: i32, m2: i32, l3: i32, m3: i32) -> Result<f64> {
    if l1 < 0 || l2 < 0 || l3 < 0 {
        return Err(UtilsError::Math(format!(
            "Negative degree in Gaunt coefficient: ({}, {}, {})",
            l1, l2, l3
        )));
    }

    if m1 + m2 != m3 || (l1 + l2 + l3) % 2 != 0 || !triangle_condition(l1, l2, l3) {
        return Ok(0.0);
    }

    if m1.abs() > l1 || m2.abs() > l2 || m3.abs() > l3 {
        return Ok(0.0);
    }

    let parity = wigner_3j_symbol(l1, l2, l3, 0, 0, 0)?;
    let projection = wigner_3j_symbol(l1, l2, l3, m1, m2, -m3)?;

    let norm = ((2 * l1 + 1) * (2 * l2 + 1) * (2 * l3 + 1)) as f64 / (4.0 * PI);
    let sign = if m3 % 2 == 0 { 1.0 } else { -1.0 };

    Ok(sign * norm.sqrt() * parity * projection)
}

/// Check the triangle inequality condition for angular momentum addition
fn triangle_condition(l1: i32, l2: i32, l3: i32) -> bool {
    l1 + l2 >= l3 && l1 + l3 >= l2 && l2 + l3 >= l1
}

fn checked_factorial(n: i32) -> Result<f64> {
    if n < 0 {
        return Err(UtilsError::Math(format!("Factorial of negative number {}", n)));
    }
    factorial(n as u32)
        .ok_or_else(|| UtilsError::Math(format!("Factorial overflow for {}", n)))
}

/// Calculate the Wigner 3j symbol with the Racah formula
///
/// # Arguments
///
/// * `j1`, `j2`, `j3` - Angular momentum quantum numbers
/// * `m1`, `m2`, `m3` - Magnetic quantum numbers
pub fn wigner_3j_symbol(j1: i32, j2: i32, j3: i32, m1: i32, m2: i32, m3: i32) -> Result<f64> {
    if m1 + m2 + m3 != 0 || !triangle_condition(j1, j2, j3) {
        return Ok(0.0);
    }

    if m1.abs() > j1 || m2.abs() > j2 || m3.abs() > j3 {
        return Ok(0.0);
    }

    let triangle = checked_factorial(j1 + j2 - j3)?
        * checked_factorial(j1 - j2 + j3)?
        * checked_factorial(-j1 + j2 + j3)?
        / checked_factorial(j1 + j2 + j3 + 1)?;

    let projections = checked_factorial(j1 + m1)?
        * checked_factorial(j1 - m1)?
        * checked_factorial(j2 + m2)?
        * checked_factorial(j2 - m2)?
        * checked_factorial(j3 + m3)?
        * checked_factorial(j3 - m3)?;

    let k_min = 0.max(j2 - j3 - m1).max(j1 - j3 + m2);
    let k_max = (j1 + j2 - j3).min(j1 - m1).min(j2 + m2);

    let mut sum = 0.0;
    for k in k_min..=k_max {
        let denominator = checked_factorial(k)?
            * checked_factorial(j1 + j2 - j3 - k)?
            * checked_factorial(j1 - m1 - k)?
            * checked_factorial(j2 + m2 - k)?
            * checked_factorial(j3 - j2 + m1 + k)?
            * checked_factorial(j3 - j1 - m2 + k)?;
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        sum += sign / denominator;
    }

    let phase = if (j1 - j2 - m3).rem_euclid(2) == 0 { 1.0 } else { -1.0 };
    Ok(phase * (triangle * projections).sqrt() * sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_factorials() {
        assert_eq!(factorial(0), Some(1.0));
        assert_eq!(factorial(5), Some(120.0));
        assert!(factorial(171).is_none());

        assert_eq!(double_factorial(-1), 1.0);
        assert_eq!(double_factorial(0), 1.0);
        assert_eq!(double_factorial(5), 15.0);
        assert_eq!(double_factorial(7), 105.0);
        assert_eq!(double_factorial(6), 48.0);
    }

    #[test]
    fn test_index_helpers() {
        assert_eq!(kmax(3), 16);
        assert_eq!(jmax(3), 10);
        assert_eq!(k_index(2, -2), 4);
        assert_eq!(k_index(2, 2), 8);

        for k in 0..kmax(5) {
            let (l, m) = lm_from_k(k);
            assert_eq!(k_index(l, m), k);
        }

        assert_eq!(lm_from_j(0), (0, 0));
        assert_eq!(lm_from_j(2), (1, 1));
        assert_eq!(lm_from_j(9), (3, 3));
    }

    #[test]
    fn test_spherical_harmonics_closed_forms() {
        let v = Vector3D::new(0.3, -0.7, 0.45);
        let ylm = spherical_harmonics(2, &v);
        let r = v.length();

        assert_relative_eq!(ylm[0].re, 0.5 / PI.sqrt(), epsilon = 1e-15);

        // Y_1^0 = sqrt(3/4π) z/r
        assert_relative_eq!(ylm[2].re, (3.0 / (4.0 * PI)).sqrt() * v.z / r, epsilon = 1e-14);

        // Y_1^1 = -sqrt(3/8π) (x + iy)/r
        let y11 = -(3.0 / (8.0 * PI)).sqrt() * Complex64::new(v.x, v.y) / r;
        assert_relative_eq!(ylm[3].re, y11.re, epsilon = 1e-14);
        assert_relative_eq!(ylm[3].im, y11.im, epsilon = 1e-14);

        // Y_2^0 = sqrt(5/16π) (3z² - r²)/r²
        let y20 = (5.0 / (16.0 * PI)).sqrt() * (3.0 * v.z * v.z - r * r) / (r * r);
        assert_relative_eq!(ylm[6].re, y20, epsilon = 1e-14);
        assert!(ylm[6].im.abs() < 1e-15);
    }

    #[test]
    fn test_spherical_harmonics_conjugation() {
        let ylm = spherical_harmonics(5, &Vector3D::new(-1.2, 0.4, 0.9));
        for l in 0..=5usize {
            for m in 1..=(l as i32) {
                let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
                let plus = ylm[k_index(l, m)];
                let minus = ylm[k_index(l, -m)];
                assert_relative_eq!(minus.re, sign * plus.re, epsilon = 1e-14);
                assert_relative_eq!(minus.im, -sign * plus.im, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_spherical_harmonics_on_axis() {
        let ylm = spherical_harmonics(4, &Vector3D::new(0.0, 0.0, -2.0));
        for l in 0..=4usize {
            let expected = ((2 * l + 1) as f64 / (4.0 * PI)).sqrt() * if l % 2 == 0 { 1.0 } else { -1.0 };
            assert_relative_eq!(ylm[k_index(l, 0)].re, expected, epsilon = 1e-14);
            for m in 1..=(l as i32) {
                assert!(ylm[k_index(l, m)].norm() < 1e-14);
            }
        }
    }

    #[test]
    fn test_upper_gamma_half() {
        let gamma = upper_gamma_half(0.0, 3);
        // Γ(1/2) = √π, Γ(3/2) = √π/2, Γ(5/2) = 3√π/4, Γ(7/2) = 15√π/8
        assert_relative_eq!(gamma[0], PI.sqrt(), epsilon = 1e-14);
        assert_relative_eq!(gamma[1], PI.sqrt() / 2.0, epsilon = 1e-14);
        assert_relative_eq!(gamma[2], 3.0 * PI.sqrt() / 4.0, epsilon = 1e-14);
        assert_relative_eq!(gamma[3], 15.0 * PI.sqrt() / 8.0, epsilon = 1e-14);

        // Γ(3/2, x²) = √π/2 erfc(x) + x e^{-x²}
        let x: f64 = 1.3;
        let gamma = upper_gamma_half(x, 1);
        let expected = PI.sqrt() / 2.0 * erfc(x) + x * (-x * x).exp();
        assert_relative_eq!(gamma[1], expected, epsilon = 1e-14);
    }

    #[test]
    fn test_upper_gamma_half_matches_reference_erfc() {
        // Γ(1/2, x²) = √π erfc(x), erfc values to 20 digits
        let reference = [
            (1.0, 0.15729920705028513066),
            (3.0, 2.2090496998585441373e-5),
            (5.0, 1.5374597944280348502e-12),
        ];
        for (x, erfc_x) in reference {
            let gamma = upper_gamma_half(x, 0);
            assert_relative_eq!(gamma[0], PI.sqrt() * erfc_x, max_relative = 1e-14);
        }
    }

    #[test]
    fn test_wigner_3j_known_values() {
        assert_relative_eq!(
            wigner_3j_symbol(1, 1, 2, 0, 0, 0).unwrap(),
            (2.0f64 / 15.0).sqrt(),
            epsilon = 1e-14
        );
        assert_relative_eq!(
            wigner_3j_symbol(1, 1, 0, 1, -1, 0).unwrap(),
            1.0 / 3.0f64.sqrt(),
            epsilon = 1e-14
        );
        assert_eq!(wigner_3j_symbol(1, 1, 3, 0, 0, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_gaunt_coefficient() {
        // ∫ Y00 Y_lm Y_lm* = Y00
        let y00 = 0.5 / PI.sqrt();
        assert_relative_eq!(gaunt_coefficient(0, 0, 2, 1, 2, 1).unwrap(), y00, epsilon = 1e-14);

        // ∫ Y10 Y20 Y10* = sqrt(45/4π) (1 1 2; 0 0 0)²
        let expected = (45.0 / (4.0 * PI)).sqrt() * 2.0 / 15.0;
        assert_relative_eq!(gaunt_coefficient(1, 0, 2, 0, 1, 0).unwrap(), expected, epsilon = 1e-14);

        // Odd parity and broken m selection both vanish
        assert_eq!(gaunt_coefficient(1, 0, 1, 0, 1, 0).unwrap(), 0.0);
        assert_eq!(gaunt_coefficient(1, 1, 2, 0, 1, 0).unwrap(), 0.0);
        assert!(gaunt_coefficient(-1, 0, 1, 0, 1, 0).is_err());
    }
}
