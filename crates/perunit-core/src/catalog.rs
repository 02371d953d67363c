//! Named unit constants
//!
//! Immutable constants composed from the dimension primitives, initialized
//! once and safe for concurrent read access. The top level holds the
//! approximate [`Unit`] catalogue; [`precise`] mirrors it with
//! [`PreciseUnit`](crate::PreciseUnit) values.
//!
//! Dimension vector argument order is
//! (meter, kilogram, second, ampere, kelvin, mole, candela).

use crate::types::{Dims, Unit};

/// The default dimensionless unit.
pub const ONE: Unit = Unit::new(1.0, Dims::dimensionless());
/// Sentinel for results that are not meaningfully representable. Distinct
/// from [`ONE`]: its multiplier is NaN.
pub const INVALID: Unit = Unit::new(f32::NAN, Dims::dimensionless());

// SI base units
pub const METER: Unit = Unit::new(1.0, Dims::new(1, 0, 0, 0, 0, 0, 0));
pub const KILOGRAM: Unit = Unit::new(1.0, Dims::new(0, 1, 0, 0, 0, 0, 0));
pub const SECOND: Unit = Unit::new(1.0, Dims::new(0, 0, 1, 0, 0, 0, 0));
pub const AMPERE: Unit = Unit::new(1.0, Dims::new(0, 0, 0, 1, 0, 0, 0));
pub const KELVIN: Unit = Unit::new(1.0, Dims::new(0, 0, 0, 0, 1, 0, 0));
pub const MOLE: Unit = Unit::new(1.0, Dims::new(0, 0, 0, 0, 0, 1, 0));
pub const CANDELA: Unit = Unit::new(1.0, Dims::new(0, 0, 0, 0, 0, 0, 1));

// Derived SI units
pub const HERTZ: Unit = Unit::new(1.0, Dims::new(0, 0, -1, 0, 0, 0, 0));
pub const NEWTON: Unit = Unit::new(1.0, Dims::new(1, 1, -2, 0, 0, 0, 0));
pub const WATT: Unit = Unit::new(1.0, Dims::new(2, 1, -3, 0, 0, 0, 0));
pub const VOLT: Unit = Unit::new(1.0, Dims::new(2, 1, -3, -1, 0, 0, 0));
pub const OHM: Unit = Unit::new(1.0, Dims::new(2, 1, -3, -2, 0, 0, 0));
pub const SIEMENS: Unit = Unit::new(1.0, Dims::new(-2, -1, 3, 2, 0, 0, 0));

// Scaled units
pub const KILOMETER: Unit = METER.with_multiplier(1e3);
pub const MILLIVOLT: Unit = VOLT.with_multiplier(1e-3);
pub const KILOVOLT: Unit = VOLT.with_multiplier(1e3);
pub const KILOWATT: Unit = WATT.with_multiplier(1e3);
pub const MEGAWATT: Unit = WATT.with_multiplier(1e6);

// Non-decimal units
pub const FOOT: Unit = METER.with_multiplier(0.3048);
pub const GALLON: Unit = Unit::new(0.003785411784, Dims::new(3, 0, 0, 0, 0, 0, 0));

// Per-unit family: the bare `pu` tag composed over the absolute units
pub const PU: Unit = Unit::new(1.0, Dims::dimensionless().with_per_unit());
pub const PU_V: Unit = Unit::new(1.0, VOLT.dims().with_per_unit());
pub const PU_A: Unit = Unit::new(1.0, AMPERE.dims().with_per_unit());
pub const PU_W: Unit = Unit::new(1.0, WATT.dims().with_per_unit());
pub const PU_OHM: Unit = Unit::new(1.0, OHM.dims().with_per_unit());
pub const PU_HZ: Unit = Unit::new(1.0, HERTZ.dims().with_per_unit());
pub const PU_MW: Unit = Unit::new(1e6, WATT.dims().with_per_unit());

/// Full-precision mirror of the catalogue.
pub mod precise {
    use crate::types::{PreciseDims, PreciseUnit};

    pub const ONE: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::dimensionless());
    pub const INVALID: PreciseUnit = PreciseUnit::new(f64::NAN, PreciseDims::dimensionless());

    pub const METER: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::new(1, 0, 0, 0, 0, 0, 0));
    pub const KILOGRAM: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::new(0, 1, 0, 0, 0, 0, 0));
    pub const SECOND: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::new(0, 0, 1, 0, 0, 0, 0));
    pub const AMPERE: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::new(0, 0, 0, 1, 0, 0, 0));
    pub const KELVIN: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::new(0, 0, 0, 0, 1, 0, 0));
    pub const MOLE: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::new(0, 0, 0, 0, 0, 1, 0));
    pub const CANDELA: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::new(0, 0, 0, 0, 0, 0, 1));

    pub const HERTZ: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::new(0, 0, -1, 0, 0, 0, 0));
    pub const NEWTON: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::new(1, 1, -2, 0, 0, 0, 0));
    pub const WATT: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::new(2, 1, -3, 0, 0, 0, 0));
    pub const VOLT: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::new(2, 1, -3, -1, 0, 0, 0));
    pub const OHM: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::new(2, 1, -3, -2, 0, 0, 0));
    pub const SIEMENS: PreciseUnit =
        PreciseUnit::new(1.0, PreciseDims::new(-2, -1, 3, 2, 0, 0, 0));

    pub const KILOMETER: PreciseUnit = METER.with_multiplier(1e3);
    pub const MILLIVOLT: PreciseUnit = VOLT.with_multiplier(1e-3);
    pub const KILOVOLT: PreciseUnit = VOLT.with_multiplier(1e3);
    pub const KILOWATT: PreciseUnit = WATT.with_multiplier(1e3);
    pub const MEGAWATT: PreciseUnit = WATT.with_multiplier(1e6);

    pub const FOOT: PreciseUnit = METER.with_multiplier(0.3048);
    pub const GALLON: PreciseUnit =
        PreciseUnit::new(0.003785411784, PreciseDims::new(3, 0, 0, 0, 0, 0, 0));

    pub const RADIAN: PreciseUnit =
        PreciseUnit::new(1.0, PreciseDims::dimensionless().with_radian(1));
    pub const CURRENCY: PreciseUnit =
        PreciseUnit::new(1.0, PreciseDims::dimensionless().with_currency(1));
    pub const COUNT: PreciseUnit =
        PreciseUnit::new(1.0, PreciseDims::dimensionless().with_count(1));

    pub const PU: PreciseUnit = PreciseUnit::new(1.0, PreciseDims::dimensionless().with_per_unit());
    pub const PU_V: PreciseUnit = PreciseUnit::new(1.0, VOLT.dims().with_per_unit());
    pub const PU_A: PreciseUnit = PreciseUnit::new(1.0, AMPERE.dims().with_per_unit());
    pub const PU_W: PreciseUnit = PreciseUnit::new(1.0, WATT.dims().with_per_unit());
    pub const PU_OHM: PreciseUnit = PreciseUnit::new(1.0, OHM.dims().with_per_unit());
    pub const PU_HZ: PreciseUnit = PreciseUnit::new(1.0, HERTZ.dims().with_per_unit());
    pub const PU_MW: PreciseUnit = PreciseUnit::new(1e6, WATT.dims().with_per_unit());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_unit_constants_compose_from_the_pu_tag() {
        assert_eq!(PU * VOLT, PU_V);
        assert_eq!(PU * AMPERE, PU_A);
        assert_eq!(PU * OHM, PU_OHM);
        assert_eq!(PU * HERTZ, PU_HZ);
        assert_eq!(PU * MEGAWATT, PU_MW);
        assert_eq!(precise::PU * precise::VOLT, precise::PU_V);
        assert_eq!(precise::PU * precise::MEGAWATT, precise::PU_MW);
    }

    #[test]
    fn derived_units_match_their_base_compositions() {
        assert_eq!(VOLT / AMPERE, OHM);
        assert_eq!(OHM.inv(), SIEMENS);
        assert_eq!(KILOGRAM * METER / (SECOND * SECOND), NEWTON);
        assert_eq!(ONE / SECOND, HERTZ);
        assert_eq!(VOLT * AMPERE, WATT);
    }

    #[test]
    fn invalid_is_distinct_from_one() {
        assert!(INVALID.is_error());
        assert!(!ONE.is_error());
        assert_ne!(INVALID, ONE);
        assert!(precise::INVALID.is_nan());
        assert!(!precise::INVALID.is_inf());
    }
}
