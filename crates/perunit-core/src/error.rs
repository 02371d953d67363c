//! Errors returned by the checked construction APIs
//!
//! The algebra itself never fails; it encodes indeterminate results as
//! sentinel units. Only explicit checked constructors report errors.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnitError {
    /// A requested exponent does not fit its packed field.
    #[error("exponent {value} for {dimension} is outside the representable range {min}..={max}")]
    ExponentOutOfRange {
        dimension: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
    /// A custom unit index falls outside its closed slot domain.
    #[error("custom unit index {index} is outside the {slots}-slot domain")]
    CustomIndexOutOfRange { index: u16, slots: u16 },
}
