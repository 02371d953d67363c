//! Immutable unit values and their algebra
//!
//! A unit is a multiplier over a packed dimension vector. [`Unit`] keeps an
//! `f32` multiplier over narrow exponents for cheap comparisons;
//! [`PreciseUnit`] keeps an `f64` multiplier over wide exponents wherever
//! exactness matters.
//!
//! No operation here panics or returns an error: indeterminate results are
//! encoded as sentinel multipliers (NaN for 0/0, infinity for x/0) that
//! propagate through further algebra and are inspected with [`Unit::is_nan`],
//! [`Unit::is_inf`] and [`Unit::is_error`].

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::{Div, Mul};

use super::dims::{Dims, PreciseDims};

/// Relative multiplier tolerance for approximate-unit equality.
const UNIT_EQ_TOL: f32 = 1e-6;
/// Relative multiplier tolerance for precise-unit equality.
const PRECISE_EQ_TOL: f64 = 1e-12;

/// Reduced-precision measurement unit: an `f32` multiplier over [`Dims`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Unit {
    multiplier: f32,
    dims: Dims,
}

/// Full-precision measurement unit: an `f64` multiplier over
/// [`PreciseDims`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PreciseUnit {
    multiplier: f64,
    dims: PreciseDims,
}

impl Unit {
    pub const fn new(multiplier: f32, dims: Dims) -> Self {
        Self { multiplier, dims }
    }

    pub const fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub const fn dims(&self) -> Dims {
        self.dims
    }

    /// The same dimensions with a different multiplier.
    pub const fn with_multiplier(self, multiplier: f32) -> Self {
        Self {
            multiplier,
            dims: self.dims,
        }
    }

    /// Multiplicative inverse: exponents negate, the multiplier inverts,
    /// an occupied custom tag flips its invert bit.
    pub fn inv(self) -> Self {
        Self::new(1.0 / self.multiplier, self.dims.recip())
    }

    /// Integer power. `pow(0)` of a normal unit is the dimensionless unit;
    /// NaN and infinite sentinels propagate instead of collapsing.
    pub fn pow(self, n: i32) -> Self {
        if n == 0 && !self.multiplier.is_finite() {
            return Self::new(self.multiplier, Dims::dimensionless());
        }
        Self::new(self.multiplier.powi(n), self.dims.pow(n))
    }

    /// Exact n-th root. When an exponent does not divide evenly by `n` the
    /// result is the invalid sentinel.
    pub fn root(self, n: i32) -> Self {
        match self.dims.root(n) {
            Some(dims) => Self::new(root_f32(self.multiplier, n), dims),
            None => Self::new(f32::NAN, Dims::dimensionless()),
        }
    }

    /// Indeterminate (0/0-form) multiplier.
    pub fn is_nan(&self) -> bool {
        self.multiplier.is_nan()
    }

    /// Unbounded (x/0-form) multiplier.
    pub fn is_inf(&self) -> bool {
        self.multiplier.is_infinite()
    }

    /// True when the unit does not represent a meaningful result.
    pub fn is_error(&self) -> bool {
        self.multiplier.is_nan()
    }

    pub const fn is_per_unit(&self) -> bool {
        self.dims.is_per_unit()
    }

    /// Bit-for-bit structural identity, stricter than `==`.
    pub fn is_exactly_the_same(&self, other: &Self) -> bool {
        self.dims == other.dims && self.multiplier.to_bits() == other.multiplier.to_bits()
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        Unit::new(self.multiplier * rhs.multiplier, self.dims.combine(rhs.dims))
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        Unit::new(self.multiplier / rhs.multiplier, self.dims.divide(rhs.dims))
    }
}

impl PartialEq for Unit {
    /// Dimension vectors compare bit-for-bit; multipliers compare within a
    /// relative tolerance since this representation rounds them.
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims && approx_eq_f32(self.multiplier, other.multiplier)
    }
}

/// NaN-multiplier sentinels compare unequal to themselves, like the floats
/// they carry; do not key maps with sentinel units.
impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dims.hash(state);
        let canonical = if self.multiplier.is_nan() {
            f32::NAN
        } else {
            cround_f32(self.multiplier)
        };
        canonical.to_bits().hash(state);
    }
}

impl PreciseUnit {
    pub const fn new(multiplier: f64, dims: PreciseDims) -> Self {
        Self { multiplier, dims }
    }

    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub const fn dims(&self) -> PreciseDims {
        self.dims
    }

    pub const fn with_multiplier(self, multiplier: f64) -> Self {
        Self {
            multiplier,
            dims: self.dims,
        }
    }

    pub fn inv(self) -> Self {
        Self::new(1.0 / self.multiplier, self.dims.recip())
    }

    /// Integer power; same sentinel behavior as [`Unit::pow`].
    pub fn pow(self, n: i32) -> Self {
        if n == 0 && !self.multiplier.is_finite() {
            return Self::new(self.multiplier, PreciseDims::dimensionless());
        }
        Self::new(self.multiplier.powi(n), self.dims.pow(n))
    }

    pub fn root(self, n: i32) -> Self {
        match self.dims.root(n) {
            Some(dims) => Self::new(root_f64(self.multiplier, n), dims),
            None => Self::new(f64::NAN, PreciseDims::dimensionless()),
        }
    }

    pub fn is_nan(&self) -> bool {
        self.multiplier.is_nan()
    }

    pub fn is_inf(&self) -> bool {
        self.multiplier.is_infinite()
    }

    pub fn is_error(&self) -> bool {
        self.multiplier.is_nan()
    }

    pub const fn is_per_unit(&self) -> bool {
        self.dims.is_per_unit()
    }

    pub fn is_exactly_the_same(&self, other: &Self) -> bool {
        self.dims == other.dims && self.multiplier.to_bits() == other.multiplier.to_bits()
    }
}

impl Mul for PreciseUnit {
    type Output = PreciseUnit;

    fn mul(self, rhs: PreciseUnit) -> PreciseUnit {
        PreciseUnit::new(self.multiplier * rhs.multiplier, self.dims.combine(rhs.dims))
    }
}

impl Div for PreciseUnit {
    type Output = PreciseUnit;

    fn div(self, rhs: PreciseUnit) -> PreciseUnit {
        PreciseUnit::new(self.multiplier / rhs.multiplier, self.dims.divide(rhs.dims))
    }
}

impl Mul<Unit> for PreciseUnit {
    type Output = PreciseUnit;

    fn mul(self, rhs: Unit) -> PreciseUnit {
        self * PreciseUnit::from(rhs)
    }
}

impl Div<Unit> for PreciseUnit {
    type Output = PreciseUnit;

    fn div(self, rhs: Unit) -> PreciseUnit {
        self / PreciseUnit::from(rhs)
    }
}

impl Mul<PreciseUnit> for Unit {
    type Output = PreciseUnit;

    fn mul(self, rhs: PreciseUnit) -> PreciseUnit {
        PreciseUnit::from(self) * rhs
    }
}

impl Div<PreciseUnit> for Unit {
    type Output = PreciseUnit;

    fn div(self, rhs: PreciseUnit) -> PreciseUnit {
        PreciseUnit::from(self) / rhs
    }
}

impl PartialEq for PreciseUnit {
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims && approx_eq_f64(self.multiplier, other.multiplier)
    }
}

/// Same caveat as the approximate type: NaN sentinels are never equal.
impl Eq for PreciseUnit {}

impl Hash for PreciseUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dims.hash(state);
        let canonical = if self.multiplier.is_nan() {
            f64::NAN
        } else {
            cround_f64(self.multiplier)
        };
        canonical.to_bits().hash(state);
    }
}

/// Lifting an approximate unit into the wide representation is exact; it is
/// the lossy direction ([`unit_cast`]) that may round.
impl From<Unit> for PreciseUnit {
    fn from(unit: Unit) -> Self {
        Self::new(unit.multiplier as f64, unit.dims.widened())
    }
}

/// Project a precise unit into the approximate representation: exponents
/// narrow (saturating), the multiplier rounds to `f32`, per-unit and custom
/// tags carry over. NaN/infinity classification is preserved.
pub fn unit_cast(unit: PreciseUnit) -> Unit {
    Unit::new(unit.multiplier() as f32, unit.dims().narrowed())
}

/// True when casting `unit` down and lifting it back reproduces it exactly;
/// distinguishes exact metric-style units from approximated non-decimal
/// ones.
pub fn is_unit_cast_lossless(unit: PreciseUnit) -> bool {
    PreciseUnit::from(unit_cast(unit)).is_exactly_the_same(&unit)
}

fn approx_eq_f32(a: f32, b: f32) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() <= a.abs().max(b.abs()) * UNIT_EQ_TOL
}

fn approx_eq_f64(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() <= a.abs().max(b.abs()) * PRECISE_EQ_TOL
}

/// Round to 6 significant decimal digits, normalizing negative zero.
fn cround_f32(value: f32) -> f32 {
    if value == 0.0 || !value.is_finite() {
        return if value == 0.0 { 0.0 } else { value };
    }
    let exponent = (value.abs() as f64).log10().floor() as i32;
    let scale = 10f64.powi(5 - exponent);
    ((value as f64 * scale).round() / scale) as f32
}

/// Round to 12 significant decimal digits, normalizing negative zero.
fn cround_f64(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return if value == 0.0 { 0.0 } else { value };
    }
    let exponent = value.abs().log10().floor() as i32;
    let scale = 10f64.powi(11 - exponent);
    (value * scale).round() / scale
}

/// Real n-th root of a multiplier, sign-preserving for odd roots so that
/// `root` stays the exact inverse of `pow` over negative multipliers.
fn root_f32(value: f32, n: i32) -> f32 {
    if n < 0 {
        return 1.0 / root_f32(value, -n);
    }
    match n {
        0 => f32::NAN,
        1 => value,
        2 => value.sqrt(),
        3 => value.cbrt(),
        _ => {
            if value < 0.0 && n % 2 == 1 {
                -(-value).powf(1.0 / n as f32)
            } else {
                value.powf(1.0 / n as f32)
            }
        }
    }
}

fn root_f64(value: f64, n: i32) -> f64 {
    if n < 0 {
        return 1.0 / root_f64(value, -n);
    }
    match n {
        0 => f64::NAN,
        1 => value,
        2 => value.sqrt(),
        3 => value.cbrt(),
        _ => {
            if value < 0.0 && n % 2 == 1 {
                -(-value).powf(1.0 / n as f64)
            } else {
                value.powf(1.0 / n as f64)
            }
        }
    }
}
