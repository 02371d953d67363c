//! Custom unit slot allocator
//!
//! Two closed, enumerable slot domains live in reserved regions of the
//! dimension vector: 1024 general custom units and 16 custom count units.
//! A slot is orthogonal to the physical base dimensions, so a custom-tagged
//! unit composes freely with meter/kilogram/second factors without
//! disturbing its slot index or invert bit, and the two domains are
//! mutually exclusive within a single unit.

use crate::error::UnitError;
use crate::types::dims::PreciseDims;
use crate::types::unit::PreciseUnit;

/// Number of general custom unit slots.
pub const CUSTOM_UNIT_SLOTS: u16 = 1024;
/// Number of custom count unit slots.
pub const CUSTOM_COUNT_UNIT_SLOTS: u16 = 16;

/// Deterministic mapping from a slot index to a unit carrying only the
/// general custom tag. Indices wrap into the 1024-slot domain; use
/// [`try_generate_custom_unit`] to reject out-of-range indices instead.
pub const fn generate_custom_unit(index: u16) -> PreciseUnit {
    PreciseUnit::new(1.0, PreciseDims::custom_unit(index % CUSTOM_UNIT_SLOTS))
}

/// Deterministic mapping from a slot index to a unit carrying only the
/// custom count tag, wrapping into the 16-slot domain.
pub const fn generate_custom_count_unit(index: u16) -> PreciseUnit {
    PreciseUnit::new(
        1.0,
        PreciseDims::custom_count_unit(index % CUSTOM_COUNT_UNIT_SLOTS),
    )
}

/// Checked variant of [`generate_custom_unit`].
pub fn try_generate_custom_unit(index: u16) -> Result<PreciseUnit, UnitError> {
    if index >= CUSTOM_UNIT_SLOTS {
        return Err(UnitError::CustomIndexOutOfRange {
            index,
            slots: CUSTOM_UNIT_SLOTS,
        });
    }
    Ok(generate_custom_unit(index))
}

/// Checked variant of [`generate_custom_count_unit`].
pub fn try_generate_custom_count_unit(index: u16) -> Result<PreciseUnit, UnitError> {
    if index >= CUSTOM_COUNT_UNIT_SLOTS {
        return Err(UnitError::CustomIndexOutOfRange {
            index,
            slots: CUSTOM_COUNT_UNIT_SLOTS,
        });
    }
    Ok(generate_custom_count_unit(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_carries_only_the_custom_tag() {
        let unit = generate_custom_unit(42);
        let dims = unit.dims();
        assert!(dims.is_custom_unit());
        assert!(!dims.is_custom_unit_inverted());
        assert!(!dims.is_custom_count_unit());
        assert_eq!(dims.custom_unit_number(), 42);
        assert_eq!(dims.meter(), 0);
        assert_eq!(dims.kilogram(), 0);
        assert_eq!(dims.second(), 0);
        assert_eq!(unit.multiplier(), 1.0);
    }

    #[test]
    fn out_of_range_indices_wrap() {
        assert_eq!(
            generate_custom_unit(CUSTOM_UNIT_SLOTS + 5),
            generate_custom_unit(5)
        );
        assert_eq!(
            generate_custom_count_unit(CUSTOM_COUNT_UNIT_SLOTS + 3),
            generate_custom_count_unit(3)
        );
    }

    #[test]
    fn checked_generation_rejects_out_of_range() {
        assert!(try_generate_custom_unit(CUSTOM_UNIT_SLOTS - 1).is_ok());
        assert_eq!(
            try_generate_custom_unit(CUSTOM_UNIT_SLOTS),
            Err(UnitError::CustomIndexOutOfRange {
                index: CUSTOM_UNIT_SLOTS,
                slots: CUSTOM_UNIT_SLOTS,
            })
        );
        assert!(try_generate_custom_count_unit(16).is_err());
    }
}
