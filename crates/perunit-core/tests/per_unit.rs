//! Per-unit system behavior: flag composition and the conversion engine.

use perunit_core::catalog::{
    AMPERE, HERTZ, KILOVOLT, OHM, PU, PU_A, PU_HZ, PU_MW, PU_OHM, PU_V, VOLT, WATT,
};
use perunit_core::{convert, convert_with_base, convert_with_power_base};
use pretty_assertions::assert_eq;

const TOLERANCE: f64 = 1e-4;

#[test]
fn basic() {
    assert_eq!(PU * VOLT, PU_V);
    assert_eq!(PU_HZ, PU * HERTZ);
    assert!(PU_HZ.is_per_unit());
}

#[test]
fn per_unit_flag_is_idempotent() {
    assert_eq!(PU_V * PU_A, PU * WATT);
    assert_eq!(PU_V / PU_A, PU_OHM);
}

#[test]
fn textbook_conversions() {
    assert_eq!(convert_with_power_base(1.0, PU_MW, OHM, 10000.0, 100.0), 1.0);
    let pu_v = convert_with_power_base(136.0, KILOVOLT, PU_V, 500.0, 138000.0);
    assert!((pu_v - 0.9855).abs() < TOLERANCE * 100.0);

    let base_power = 100_000_000.0;
    assert!((convert_with_power_base(1.0, OHM, PU_OHM, base_power, 8000.0) - 1.56).abs() < 0.01);
    assert!((convert_with_power_base(24.0, OHM, PU_OHM, base_power, 80000.0) - 0.375).abs() < 0.01);
    assert!((convert_with_power_base(1.0, OHM, PU_OHM, base_power, 16000.0) - 0.39).abs() < 0.01);
    assert!((convert_with_power_base(1.0, PU_OHM, OHM, base_power, 8000.0) - 0.64).abs() < 0.01);
    assert!((convert_with_power_base(1.0, PU_OHM, OHM, base_power, 80000.0) - 64.0).abs() < 0.01);
    assert!((convert_with_power_base(1.0, PU_OHM, OHM, base_power, 16000.0) - 2.56).abs() < 0.01);

    assert!(
        (convert_with_power_base(0.22, PU_A, AMPERE, base_power, 80000.0) - 275.0).abs() < 0.1
    );
}

#[test]
fn conversions_with_just_pu() {
    assert_eq!(convert_with_base(1.0, PU, OHM, 5.0), 5.0);
    let pu_v = convert_with_power_base(136.0, KILOVOLT, PU, 500.0, 138000.0);
    assert!((pu_v - 0.9855).abs() < TOLERANCE * 100.0);
    assert_eq!(convert(2.7, PU, PU_MW), 2.7);
}

#[test]
fn mixed_per_unit_without_a_base_is_invalid() {
    assert!(convert(1.0, VOLT, PU_V).is_nan());
    assert!(convert(1.0, PU_V, VOLT).is_nan());
}
