//! Value conversion between unit systems
//!
//! Three arities cover the observed per-unit (pu) workflows:
//! [`convert`] for units that already share a physical dimension,
//! [`convert_with_base`] when one absolute base quantity normalizes or
//! denormalizes a per-unit value, and [`convert_with_power_base`] for the
//! power-engineering case where base power and base voltage derive the base
//! current, impedance, and admittance.
//!
//! A conversion that is not dimensionally meaningful returns
//! [`INVALID_CONVERSION`] (NaN), never a plausible-looking wrong number.

use crate::catalog::precise;
use crate::types::{PreciseDims, PreciseUnit};

/// Result of a conversion that is not defined for the given units.
pub const INVALID_CONVERSION: f64 = f64::NAN;

/// Convert `value` between two units of the same physical dimension.
///
/// Both-per-unit conversions take this path as well: a bare `pu` on either
/// side passes the already-normalized value through unchanged, while
/// matching flagged dimensions scale by the multiplier ratio. Mixing a
/// per-unit side with an absolute side requires a base quantity and is
/// invalid here.
pub fn convert(value: f64, from: impl Into<PreciseUnit>, to: impl Into<PreciseUnit>) -> f64 {
    let from = from.into();
    let to = to.into();
    if from.is_error() || to.is_error() {
        return INVALID_CONVERSION;
    }
    if from.is_exactly_the_same(&to) {
        return value;
    }
    let from_dims = from.dims().without_per_unit();
    let to_dims = to.dims().without_per_unit();
    if from.is_per_unit() != to.is_per_unit() {
        return INVALID_CONVERSION;
    }
    if from_dims == to_dims {
        return value * from.multiplier() / to.multiplier();
    }
    if from.is_per_unit()
        && to.is_per_unit()
        && (from_dims.is_dimensionless() || to_dims.is_dimensionless())
    {
        return value;
    }
    INVALID_CONVERSION
}

/// Convert between an absolute unit and its per-unit counterpart using one
/// absolute base quantity (for example a base power or a base voltage).
///
/// A bare `pu` side adopts the dimension of the other side. When both sides
/// are absolute or both per-unit the base is not needed and the plain
/// [`convert`] rules apply.
pub fn convert_with_base(
    value: f64,
    from: impl Into<PreciseUnit>,
    to: impl Into<PreciseUnit>,
    base: f64,
) -> f64 {
    let from = from.into();
    let to = to.into();
    if from.is_error() || to.is_error() {
        return INVALID_CONVERSION;
    }
    if from.is_per_unit() == to.is_per_unit() {
        return convert(value, from, to);
    }
    let from_dims = from.dims().without_per_unit();
    let to_dims = to.dims().without_per_unit();
    if from.is_per_unit() {
        if from_dims == to_dims || from_dims.is_dimensionless() {
            return value * from.multiplier() * base / to.multiplier();
        }
    } else if from_dims == to_dims || to_dims.is_dimensionless() {
        return value * from.multiplier() / base / to.multiplier();
    }
    INVALID_CONVERSION
}

/// Convert between absolute and per-unit systems given base power and base
/// voltage.
///
/// The derived base quantities are base current = power/voltage, base
/// impedance = voltage²/power and base admittance = power/voltage². The
/// conversion is scaled by whichever base matches the physical dimension of
/// the absolute side; the per-unit side is treated as an already-normalized
/// ratio.
pub fn convert_with_power_base(
    value: f64,
    from: impl Into<PreciseUnit>,
    to: impl Into<PreciseUnit>,
    base_power: f64,
    base_voltage: f64,
) -> f64 {
    let from = from.into();
    let to = to.into();
    if from.is_error() || to.is_error() {
        return INVALID_CONVERSION;
    }
    if from.is_per_unit() == to.is_per_unit() {
        return convert(value, from, to);
    }
    let from_dims = from.dims().without_per_unit();
    let to_dims = to.dims().without_per_unit();
    if from.is_per_unit() {
        let base = derived_base(to_dims, base_power, base_voltage);
        if base.is_nan() {
            return INVALID_CONVERSION;
        }
        let mut converted = value * base;
        if from_dims == to_dims {
            converted *= from.multiplier();
        }
        converted / to.multiplier()
    } else {
        let base = derived_base(from_dims, base_power, base_voltage);
        if base.is_nan() {
            return INVALID_CONVERSION;
        }
        let mut converted = value * from.multiplier() / base;
        if from_dims == to_dims {
            converted /= to.multiplier();
        }
        converted
    }
}

/// The base quantity matching a physical dimension, derived from base power
/// and base voltage.
fn derived_base(dims: PreciseDims, base_power: f64, base_voltage: f64) -> f64 {
    if dims == precise::VOLT.dims() {
        base_voltage
    } else if dims == precise::AMPERE.dims() {
        base_power / base_voltage
    } else if dims == precise::OHM.dims() {
        base_voltage * base_voltage / base_power
    } else if dims == precise::SIEMENS.dims() {
        base_power / (base_voltage * base_voltage)
    } else if dims == precise::WATT.dims() {
        base_power
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::*;

    #[test]
    fn same_dimension_scales_by_multiplier_ratio() {
        assert_eq!(convert(1.0, KILOMETER, METER), 1000.0);
        assert_eq!(convert(2500.0, precise::MILLIVOLT, precise::VOLT), 2.5);
        assert_eq!(convert(3.0, precise::KILOWATT, precise::MEGAWATT), 0.003);
    }

    #[test]
    fn incompatible_dimensions_are_detectably_invalid() {
        assert!(convert(1.0, METER, KILOGRAM).is_nan());
        assert!(convert(1.0, VOLT, PU_V).is_nan());
        assert!(convert_with_base(1.0, VOLT, KILOGRAM, 5.0).is_nan());
        assert!(convert_with_power_base(1.0, PU_V, KILOGRAM, 100.0, 10.0).is_nan());
        assert!(convert(1.0, INVALID, METER).is_nan());
    }

    #[test]
    fn one_base_quantity_normalizes_and_denormalizes() {
        assert_eq!(convert_with_base(1.0, PU, OHM, 5.0), 5.0);
        assert_eq!(convert_with_base(5.0, OHM, PU, 5.0), 1.0);
        assert_eq!(convert_with_base(0.5, PU_W, WATT, 200.0), 100.0);
        assert_eq!(convert_with_base(100.0, WATT, PU_W, 200.0), 0.5);
    }

    #[test]
    fn two_base_quantities_derive_the_matching_base() {
        assert_eq!(convert_with_power_base(1.0, PU_MW, OHM, 10000.0, 100.0), 1.0);
        let pu_v = convert_with_power_base(136.0, KILOVOLT, PU_V, 500.0, 138000.0);
        assert!((pu_v - 0.9855).abs() < 1e-2);
        let base_power = 100_000_000.0;
        assert!((convert_with_power_base(1.0, OHM, PU_OHM, base_power, 8000.0) - 1.56).abs() < 0.01);
        assert!(
            (convert_with_power_base(24.0, OHM, PU_OHM, base_power, 80000.0) - 0.375).abs() < 0.01
        );
        assert!((convert_with_power_base(1.0, PU_OHM, OHM, base_power, 8000.0) - 0.64).abs() < 0.01);
        assert!((convert_with_power_base(1.0, PU_OHM, OHM, base_power, 80000.0) - 64.0).abs() < 0.01);
        assert!((convert_with_power_base(0.22, PU_A, AMPERE, base_power, 80000.0) - 275.0).abs() < 0.1);
    }

    #[test]
    fn bare_pu_passes_through_between_per_unit_systems() {
        assert_eq!(convert(2.7, PU, PU_MW), 2.7);
        assert_eq!(convert(2.7, PU_MW, PU), 2.7);
        assert_eq!(convert_with_power_base(136.0, KILOVOLT, PU, 500.0, 138000.0), 136000.0 / 138000.0);
    }

    #[test]
    fn admittance_uses_the_inverse_impedance_base() {
        // base admittance = 1e8 / 8000^2 S
        let base_power = 100_000_000.0;
        let s = convert_with_power_base(1.0, SIEMENS, PU_OHM.inv(), base_power, 8000.0);
        assert!((s - 0.64).abs() < 0.01);
    }
}
