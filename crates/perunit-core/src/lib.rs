//! perunit-core: dimensional analysis engine for perunit
//!
//! This crate provides a compact, immutable value representation for
//! physical units and per-unit electrical quantities: packed dimension
//! vectors with exact algebraic composition, reserved custom-unit slots,
//! a lossy bridge between an approximate and a precise representation, and
//! value conversion between absolute and normalized (per-unit) systems.
//! It has no UI or I/O dependencies and is safe to share across threads.
//!
//! # Example
//!
//! ```
//! use perunit_core::catalog::{KILOMETER, METER, MILLIVOLT, SECOND, VOLT};
//! use perunit_core::convert;
//!
//! // Units compose algebraically
//! let area = METER * METER;
//! assert_eq!(area, METER.pow(2));
//! assert_eq!(area.root(2), METER);
//! assert_eq!(VOLT / KILOMETER, MILLIVOLT / METER);
//!
//! // Values convert between units of the same dimension
//! assert_eq!(convert(3.0, KILOMETER, METER), 3000.0);
//!
//! // Dimensions are tracked exactly
//! let speed = METER / SECOND;
//! assert_eq!(speed.dims().meter(), 1);
//! assert_eq!(speed.dims().second(), -1);
//! ```

pub mod catalog;
pub mod convert;
pub mod error;
pub mod types;

pub use convert::{convert, convert_with_base, convert_with_power_base, INVALID_CONVERSION};
pub use error::UnitError;
pub use types::custom::{
    generate_custom_count_unit, generate_custom_unit, try_generate_custom_count_unit,
    try_generate_custom_unit, CUSTOM_COUNT_UNIT_SLOTS, CUSTOM_UNIT_SLOTS,
};
pub use types::{is_unit_cast_lossless, unit_cast, Dims, PreciseDims, PreciseUnit, Unit};
