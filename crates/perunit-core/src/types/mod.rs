//! Value types for perunit calculations

pub mod custom;
pub mod dims;
mod unit;

pub use custom::{generate_custom_count_unit, generate_custom_unit};
pub use dims::{Dims, PreciseDims};
pub use unit::{is_unit_cast_lossless, unit_cast, PreciseUnit, Unit};
