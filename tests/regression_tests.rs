/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Regression values for two reference structures

use approx::assert_abs_diff_eq;
use madelung_rs::lattice::{BravaisMatrix, Vector3D};
use madelung_rs::madelung::MultipoleMadelung;
use num_complex::Complex64;

const TOLERANCE: f64 = 1e-12;

fn cubic_structure() -> MultipoleMadelung {
    let bravais = BravaisMatrix::from_columns(
        Vector3D::new(1.0, 0.0, 0.0),
        Vector3D::new(0.0, 1.0, 0.0),
        Vector3D::new(0.0, 0.0, 1.0),
    );
    let positions = vec![Vector3D::new(0.0, 0.0, 0.0), Vector3D::new(0.5, 0.5, 0.5)];
    MultipoleMadelung::new(bravais, positions, 3, vec![0, 1]).unwrap()
}

fn triclinic_structure() -> MultipoleMadelung {
    let bravais = BravaisMatrix::from_columns(
        Vector3D::new(1.1, 0.2, 0.5),
        Vector3D::new(-0.1, 1.1, 0.1),
        Vector3D::new(0.0, 0.0, 1.6),
    );
    let positions = vec![
        Vector3D::new(0.0, 0.0, 0.1),
        Vector3D::new(0.5, 0.5, 0.4),
        Vector3D::new(0.75, 0.65, 0.4),
    ];
    MultipoleMadelung::new(bravais, positions, 3, vec![0, 2]).unwrap()
}

#[test]
fn test_cubic_madelung_sums() {
    let madelung = cubic_structure();

    assert_abs_diff_eq!(madelung.mad_sum(0, 0).unwrap(), -0.2837297479481e+01, epsilon = TOLERANCE);
    assert_abs_diff_eq!(madelung.mad_sum(1, 0).unwrap(), -0.8019359700280e+00, epsilon = TOLERANCE);
    assert_abs_diff_eq!(madelung.mad_sum(0, 1).unwrap(), -0.8019359700280e+00, epsilon = TOLERANCE);
    assert_abs_diff_eq!(madelung.mad_sum(1, 1).unwrap(), -0.2837297479481e+01, epsilon = TOLERANCE);
}

#[test]
fn test_cubic_monopole_structure_constant() {
    let madelung = cubic_structure();
    let value = madelung.dl_matrix(0, 0, 0).unwrap();
    assert_abs_diff_eq!(value.re, -10.057957687339862, epsilon = TOLERANCE);
    assert_abs_diff_eq!(value.im, 0.0, epsilon = TOLERANCE);
    assert!(madelung.precision_warnings().is_empty());
}

#[test]
fn test_cubic_dl_factors() {
    let madelung = cubic_structure();
    let expected = [
        0.28209479177387842,
        9.4031597257959593E-002,
        -9.4031597257959454E-002,
        1.8806319451591908E-002,
        -1.8806319451591908E-002,
    ];
    for (j, value) in expected.into_iter().enumerate() {
        assert_abs_diff_eq!(madelung.dl_factor(0, j).unwrap(), value, epsilon = TOLERANCE);
    }
}

#[test]
fn test_triclinic_scaling_and_bounds() {
    let madelung = triclinic_structure();
    assert_abs_diff_eq!(madelung.scaling_factor(), 0.93651137065361856, epsilon = TOLERANCE);
    assert_eq!(madelung.rs_size(), vec![4, 4, 3]);
    assert_eq!(madelung.kn_size(), vec![4, 4, 5]);
}

#[test]
fn test_triclinic_madelung_sums() {
    let madelung = triclinic_structure();

    assert_abs_diff_eq!(madelung.mad_sum(0, 0).unwrap(), -0.2223187728889e+1, epsilon = TOLERANCE);
    assert_abs_diff_eq!(madelung.mad_sum(1, 0).unwrap(), -0.2103456956161, epsilon = TOLERANCE);
    assert_abs_diff_eq!(madelung.mad_sum(2, 0).unwrap(), -0.1084495831085, epsilon = TOLERANCE);

    assert_abs_diff_eq!(madelung.mad_sum(0, 1).unwrap(), -0.1084495831085, epsilon = TOLERANCE);
    assert_abs_diff_eq!(madelung.mad_sum(1, 1).unwrap(), 0.1305464656817e1, epsilon = TOLERANCE);
    assert_abs_diff_eq!(madelung.mad_sum(2, 1).unwrap(), -0.2223187728889e1, epsilon = TOLERANCE);
}

#[test]
fn test_triclinic_dl_factors() {
    let madelung = triclinic_structure();

    let columns: [(usize, [f64; 16]); 4] = [
        (
            0,
            [
                0.28209479177387842,
                9.4031597257959454E-002,
                9.4031597257959579E-002,
                9.4031597257959454E-002,
                1.8806319451591877E-002,
                1.8806319451591905E-002,
                1.8806319451591908E-002,
                1.8806319451591905E-002,
                1.8806319451591877E-002,
                2.6866170645131245E-003,
                2.6866170645131284E-003,
                2.6866170645131276E-003,
                2.6866170645131302E-003,
                2.6866170645131276E-003,
                2.6866170645131284E-003,
                2.6866170645131245E-003,
            ],
        ),
        (
            1,
            [
                9.4031597257959593E-002,
                2.4278854013157353E-002,
                2.8034805800224084E-002,
                2.4278854013157353E-002,
                4.1038753538304908E-003,
                5.1910373406135095E-003,
                5.5059265574105955E-003,
                5.1910373406135095E-003,
                4.1038753538304908E-003,
                5.1703969513536556E-004,
                6.7696386864420153E-004,
                7.5686861429983654E-004,
                7.8169054358676125E-004,
                7.5686861429983654E-004,
                6.7696386864420153E-004,
                5.1703969513536556E-004,
            ],
        ),
        (
            2,
            [
                -9.4031597257959454E-002,
                -3.4335484624283527E-002,
                -2.4278854013157353E-002,
                -1.4017402900111983E-002,
                -7.1081206207641032E-003,
                -5.8037561836757640E-003,
                -4.4955702089649052E-003,
                -3.1788481800593097E-003,
                -1.8353088524701872E-003,
                -1.0340793902707298E-003,
                -8.9553902150437618E-004,
                -7.5686861429983567E-004,
                -6.1798063578732195E-004,
                -4.7868574213659313E-004,
                -3.3848193432210006E-004,
                -1.9542263589668885E-004,
            ],
        ),
        (
            9,
            [
                -2.6866170645131245E-003,
                -1.0340793902707294E-003,
                -5.1703969513536556E-004,
                -1.9542263589668882E-004,
                -2.2046646677429237E-004,
                -1.3943523653932001E-004,
                -8.0502971350495422E-005,
                -4.0251485675247677E-005,
                -1.5213631571083300E-005,
                -3.2684123568626300E-005,
                -2.3111165412514750E-005,
                -1.5581544542482675E-005,
                -9.8546340435222894E-006,
                -5.6895756177928420E-006,
                -2.8447878088964045E-006,
                -1.0752287250125931E-006,
            ],
        ),
    ];

    for (j, expected) in columns {
        for (k, value) in expected.into_iter().enumerate() {
            assert_abs_diff_eq!(madelung.dl_factor(k, j).unwrap(), value, epsilon = TOLERANCE);
        }
    }
}

#[test]
fn test_triclinic_structure_constants() {
    let madelung = triclinic_structure();

    let expected = [
        Complex64::new(-7.8809953027095991, 0.0),
        Complex64::new(1.88966212902900115E-017, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(-1.88966212902900115E-017, 0.0),
        Complex64::new(-1.8097382618160811, 0.27561894928136865),
        Complex64::new(1.8021011211224087, -0.93990993338631279),
        Complex64::new(-4.2970575853540689, 0.0),
        Complex64::new(-1.8021011211224087, -0.93990993338631279),
        Complex64::new(-1.8097382618160811, -0.27561894928136865),
        Complex64::new(-1.92304485683264783E-015, -6.41014952277549244E-016),
        Complex64::new(0.0, -2.20348889845407568E-016),
        Complex64::new(-3.20507476138774622E-016, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(3.20507476138774622E-016, 0.0),
        Complex64::new(0.0, 2.20348889845407568E-016),
        Complex64::new(1.92304485683264783E-015, -6.41014952277549244E-016),
    ];

    for (k, reference) in expected.into_iter().enumerate() {
        let value = madelung.dl_matrix(0, k, 0).unwrap();
        assert_abs_diff_eq!(value.re, reference.re, epsilon = TOLERANCE);
        assert_abs_diff_eq!(value.im, reference.im, epsilon = TOLERANCE);
    }
}

#[test]
fn test_structure_constants_extend_to_twice_lmax() {
    let madelung = cubic_structure();
    assert_eq!(madelung.dl_matrix_array().dim(), (2, 49, 2));
    assert!(madelung.dl_matrix(1, 48, 1).is_some());
    assert!(madelung.dl_matrix(1, 49, 1).is_none());
}
