//! Packed dimension vectors
//!
//! Both unit representations store their base-dimension exponents as signed
//! bit fields packed into a single `u64`, together with a per-unit flag and
//! two reserved regions for custom unit tags. [`Dims`] uses narrow fields for
//! the runtime-cheap approximate representation; [`PreciseDims`] widens every
//! field and adds the non-SI axes (radians, currency, counting units).
//!
//! All exponent arithmetic saturates at each field's representable range.
//! A saturating field never disturbs its neighbours: fields that start at
//! zero stay exactly zero.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::UnitError;

/// A signed exponent field inside a packed dimension vector.
#[derive(Debug, Clone, Copy)]
struct Field {
    shift: u32,
    width: u32,
}

impl Field {
    const fn new(shift: u32, width: u32) -> Self {
        Self { shift, width }
    }

    const fn min(self) -> i64 {
        -(1i64 << (self.width - 1))
    }

    const fn max(self) -> i64 {
        (1i64 << (self.width - 1)) - 1
    }

    const fn mask(self) -> u64 {
        ((1u64 << self.width) - 1) << self.shift
    }

    const fn fits(self, value: i64) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// Sign-extended field value.
    const fn get(self, bits: u64) -> i64 {
        let raw = ((bits >> self.shift) & ((1u64 << self.width) - 1)) as i64;
        let sign = 1i64 << (self.width - 1);
        (raw ^ sign) - sign
    }

    /// Raw unsigned field value, for index fields.
    const fn get_unsigned(self, bits: u64) -> u64 {
        (bits >> self.shift) & ((1u64 << self.width) - 1)
    }

    /// Insert `value`, saturating at the representable range.
    const fn set(self, bits: u64, value: i64) -> u64 {
        let clamped = if value < self.min() {
            self.min()
        } else if value > self.max() {
            self.max()
        } else {
            value
        };
        (bits & !self.mask()) | (((clamped as u64) & ((1u64 << self.width) - 1)) << self.shift)
    }

    const fn set_unsigned(self, bits: u64, value: u64) -> u64 {
        (bits & !self.mask()) | ((value & ((1u64 << self.width) - 1)) << self.shift)
    }
}

/// A reserved custom-tag region: a presence flag, an invert bit, and an
/// unsigned slot-index field, disjoint from every exponent field.
#[derive(Debug, Clone, Copy)]
struct TagRegion {
    flag: u64,
    invert: u64,
    index: Field,
}

impl TagRegion {
    const fn new(flag_bit: u32, invert_bit: u32, index: Field) -> Self {
        Self {
            flag: 1u64 << flag_bit,
            invert: 1u64 << invert_bit,
            index,
        }
    }

    const fn mask(self) -> u64 {
        self.flag | self.invert | self.index.mask()
    }

    const fn present(self, bits: u64) -> bool {
        bits & self.flag != 0
    }

    const fn inverted(self, bits: u64) -> bool {
        self.present(bits) && bits & self.invert != 0
    }

    /// Carry the region bits from whichever operand owns the tag.
    /// If both sides carry one, the left operand wins.
    const fn merge(self, out: u64, lhs: u64, rhs: u64) -> u64 {
        if self.present(lhs) {
            (out & !self.mask()) | (lhs & self.mask())
        } else if self.present(rhs) {
            (out & !self.mask()) | (rhs & self.mask())
        } else {
            out & !self.mask()
        }
    }

    const fn toggle_invert(self, bits: u64) -> u64 {
        if self.present(bits) {
            bits ^ self.invert
        } else {
            bits
        }
    }
}

/// Transplant a tag region between the two layouts, preserving the invert
/// bit and the slot index.
const fn copy_region(src_bits: u64, src: TagRegion, dst_bits: u64, dst: TagRegion) -> u64 {
    if !src.present(src_bits) {
        return dst_bits;
    }
    let mut out = dst_bits | dst.flag;
    if src_bits & src.invert != 0 {
        out |= dst.invert;
    }
    dst.index.set_unsigned(out, src.index.get_unsigned(src_bits))
}

/// Component-wise saturating addition over the exponent fields only.
const fn add_fields(lhs: u64, rhs: u64, fields: &[Field]) -> u64 {
    let mut bits = 0u64;
    let mut i = 0;
    while i < fields.len() {
        let f = fields[i];
        bits = f.set(bits, f.get(lhs) + f.get(rhs));
        i += 1;
    }
    bits
}

/// Saturating negation of every exponent field.
const fn neg_fields(src: u64, fields: &[Field]) -> u64 {
    let mut bits = 0u64;
    let mut i = 0;
    while i < fields.len() {
        let f = fields[i];
        bits = f.set(bits, -f.get(src));
        i += 1;
    }
    bits
}

/// Saturating multiplication of every exponent field by the signed `n`.
const fn scale_fields(src: u64, n: i64, fields: &[Field]) -> u64 {
    let mut bits = 0u64;
    let mut i = 0;
    while i < fields.len() {
        let f = fields[i];
        bits = f.set(bits, f.get(src) * n);
        i += 1;
    }
    bits
}

/// Exact division of every exponent field by `n` (n > 0), or `None` when a
/// nonzero exponent does not divide evenly.
const fn div_fields(src: u64, n: i64, fields: &[Field]) -> Option<u64> {
    let mut bits = 0u64;
    let mut i = 0;
    while i < fields.len() {
        let f = fields[i];
        let value = f.get(src);
        if value % n != 0 {
            return None;
        }
        bits = f.set(bits, value / n);
        i += 1;
    }
    Some(bits)
}

/// Packed dimension vector for the approximate [`Unit`](crate::Unit)
/// representation.
///
/// Seven SI base-dimension exponents in narrow fields, a per-unit flag, and
/// the two custom-tag regions. Equality, ordering into maps, and hashing are
/// all over the canonical bit layout, never over operation history.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dims(u64);

impl Dims {
    const METER: Field = Field::new(0, 4);
    const KILOGRAM: Field = Field::new(4, 3);
    const SECOND: Field = Field::new(7, 4);
    const AMPERE: Field = Field::new(11, 3);
    const KELVIN: Field = Field::new(14, 3);
    const MOLE: Field = Field::new(17, 2);
    const CANDELA: Field = Field::new(19, 2);

    const FIELDS: [Field; 7] = [
        Self::METER,
        Self::KILOGRAM,
        Self::SECOND,
        Self::AMPERE,
        Self::KELVIN,
        Self::MOLE,
        Self::CANDELA,
    ];

    const PER_UNIT: u64 = 1 << 21;
    const CUSTOM: TagRegion = TagRegion::new(22, 23, Field::new(24, 10));
    const CUSTOM_COUNT: TagRegion = TagRegion::new(34, 35, Field::new(36, 4));

    const TAG_MASK: u64 = Self::PER_UNIT | Self::CUSTOM.mask() | Self::CUSTOM_COUNT.mask();

    /// Build a vector from explicit exponents, saturating any exponent that
    /// exceeds its field range. Argument order is
    /// (meter, kilogram, second, ampere, kelvin, mole, candela).
    pub const fn new(
        meter: i32,
        kilogram: i32,
        second: i32,
        ampere: i32,
        kelvin: i32,
        mole: i32,
        candela: i32,
    ) -> Self {
        let mut bits = 0u64;
        bits = Self::METER.set(bits, meter as i64);
        bits = Self::KILOGRAM.set(bits, kilogram as i64);
        bits = Self::SECOND.set(bits, second as i64);
        bits = Self::AMPERE.set(bits, ampere as i64);
        bits = Self::KELVIN.set(bits, kelvin as i64);
        bits = Self::MOLE.set(bits, mole as i64);
        bits = Self::CANDELA.set(bits, candela as i64);
        Self(bits)
    }

    /// Like [`Dims::new`] but rejects out-of-range exponents instead of
    /// saturating them.
    pub fn checked_new(
        meter: i32,
        kilogram: i32,
        second: i32,
        ampere: i32,
        kelvin: i32,
        mole: i32,
        candela: i32,
    ) -> Result<Self, UnitError> {
        let parts = [
            ("meter", meter, Self::METER),
            ("kilogram", kilogram, Self::KILOGRAM),
            ("second", second, Self::SECOND),
            ("ampere", ampere, Self::AMPERE),
            ("kelvin", kelvin, Self::KELVIN),
            ("mole", mole, Self::MOLE),
            ("candela", candela, Self::CANDELA),
        ];
        for (dimension, value, field) in parts {
            if !field.fits(value as i64) {
                return Err(UnitError::ExponentOutOfRange {
                    dimension,
                    value,
                    min: field.min() as i32,
                    max: field.max() as i32,
                });
            }
        }
        Ok(Self::new(meter, kilogram, second, ampere, kelvin, mole, candela))
    }

    /// The all-zero vector.
    pub const fn dimensionless() -> Self {
        Self(0)
    }

    pub const fn meter(&self) -> i32 {
        Self::METER.get(self.0) as i32
    }

    pub const fn kilogram(&self) -> i32 {
        Self::KILOGRAM.get(self.0) as i32
    }

    pub const fn second(&self) -> i32 {
        Self::SECOND.get(self.0) as i32
    }

    pub const fn ampere(&self) -> i32 {
        Self::AMPERE.get(self.0) as i32
    }

    pub const fn kelvin(&self) -> i32 {
        Self::KELVIN.get(self.0) as i32
    }

    pub const fn mole(&self) -> i32 {
        Self::MOLE.get(self.0) as i32
    }

    pub const fn candela(&self) -> i32 {
        Self::CANDELA.get(self.0) as i32
    }

    pub const fn is_per_unit(&self) -> bool {
        self.0 & Self::PER_UNIT != 0
    }

    /// Mark the vector as a per-unit (normalized) quantity.
    pub const fn with_per_unit(self) -> Self {
        Self(self.0 | Self::PER_UNIT)
    }

    /// The same vector with the per-unit flag cleared.
    pub const fn without_per_unit(self) -> Self {
        Self(self.0 & !Self::PER_UNIT)
    }

    /// True when every exponent is zero and no custom tag is set.
    pub const fn is_dimensionless(&self) -> bool {
        self.0 & !Self::PER_UNIT == 0
    }

    pub const fn is_custom_unit(&self) -> bool {
        Self::CUSTOM.present(self.0)
    }

    pub const fn is_custom_unit_inverted(&self) -> bool {
        Self::CUSTOM.inverted(self.0)
    }

    /// Slot index of a general custom tag. Valid whenever
    /// [`is_custom_unit`](Self::is_custom_unit) is true, regardless of any
    /// base-dimension factors composed in since.
    pub const fn custom_unit_number(&self) -> u16 {
        Self::CUSTOM.index.get_unsigned(self.0) as u16
    }

    pub const fn is_custom_count_unit(&self) -> bool {
        Self::CUSTOM_COUNT.present(self.0)
    }

    pub const fn is_custom_count_unit_inverted(&self) -> bool {
        Self::CUSTOM_COUNT.inverted(self.0)
    }

    pub const fn custom_count_unit_number(&self) -> u16 {
        Self::CUSTOM_COUNT.index.get_unsigned(self.0) as u16
    }

    /// Exponents add, per-unit flags OR, custom tags carry through from
    /// whichever operand owns them.
    pub(crate) const fn combine(self, other: Self) -> Self {
        let mut bits = add_fields(self.0, other.0, &Self::FIELDS);
        bits |= (self.0 | other.0) & Self::PER_UNIT;
        bits = Self::CUSTOM.merge(bits, self.0, other.0);
        bits = Self::CUSTOM_COUNT.merge(bits, self.0, other.0);
        Self(bits)
    }

    pub(crate) const fn divide(self, other: Self) -> Self {
        self.combine(other.recip())
    }

    /// Negate every exponent and toggle the invert bit of any occupied
    /// custom region; the per-unit flag is unchanged.
    pub(crate) const fn recip(self) -> Self {
        let mut bits = neg_fields(self.0, &Self::FIELDS);
        bits |= self.0 & Self::TAG_MASK;
        bits = Self::CUSTOM.toggle_invert(bits);
        bits = Self::CUSTOM_COUNT.toggle_invert(bits);
        Self(bits)
    }

    /// Scale every exponent by the signed `n`, saturating each field at its
    /// own range; a negative `n` also toggles the invert bit of any occupied
    /// custom region. `pow(0)` collapses to the dimensionless vector.
    pub(crate) const fn pow(self, n: i32) -> Self {
        if n == 0 {
            return Self::dimensionless();
        }
        let mut bits = scale_fields(self.0, n as i64, &Self::FIELDS) | (self.0 & Self::TAG_MASK);
        if n < 0 {
            bits = Self::CUSTOM.toggle_invert(bits);
            bits = Self::CUSTOM_COUNT.toggle_invert(bits);
        }
        Self(bits)
    }

    /// Exact n-th root of the exponents, or `None` when any exponent does
    /// not divide evenly (or `n` is zero).
    pub(crate) const fn root(self, n: i32) -> Option<Self> {
        if n == 0 {
            return None;
        }
        let bits = match div_fields(self.0, n.unsigned_abs() as i64, &Self::FIELDS) {
            Some(bits) => bits,
            None => return None,
        };
        let rooted = Self(bits | (self.0 & Self::TAG_MASK));
        Some(if n < 0 { rooted.recip() } else { rooted })
    }

    /// Lift into the wide representation. Always exact.
    pub(crate) const fn widened(self) -> PreciseDims {
        let mut bits = 0u64;
        bits = PreciseDims::METER.set(bits, Self::METER.get(self.0));
        bits = PreciseDims::KILOGRAM.set(bits, Self::KILOGRAM.get(self.0));
        bits = PreciseDims::SECOND.set(bits, Self::SECOND.get(self.0));
        bits = PreciseDims::AMPERE.set(bits, Self::AMPERE.get(self.0));
        bits = PreciseDims::KELVIN.set(bits, Self::KELVIN.get(self.0));
        bits = PreciseDims::MOLE.set(bits, Self::MOLE.get(self.0));
        bits = PreciseDims::CANDELA.set(bits, Self::CANDELA.get(self.0));
        if self.is_per_unit() {
            bits |= PreciseDims::PER_UNIT;
        }
        bits = copy_region(self.0, Self::CUSTOM, bits, PreciseDims::CUSTOM);
        bits = copy_region(self.0, Self::CUSTOM_COUNT, bits, PreciseDims::CUSTOM_COUNT);
        PreciseDims(bits)
    }
}

impl fmt::Debug for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Dims");
        s.field("m", &self.meter())
            .field("kg", &self.kilogram())
            .field("s", &self.second())
            .field("A", &self.ampere())
            .field("K", &self.kelvin())
            .field("mol", &self.mole())
            .field("cd", &self.candela())
            .field("pu", &self.is_per_unit());
        if self.is_custom_unit() {
            s.field(
                "custom",
                &(self.custom_unit_number(), self.is_custom_unit_inverted()),
            );
        }
        if self.is_custom_count_unit() {
            s.field(
                "custom_count",
                &(
                    self.custom_count_unit_number(),
                    self.is_custom_count_unit_inverted(),
                ),
            );
        }
        s.finish()
    }
}

/// Packed dimension vector for the precise
/// [`PreciseUnit`](crate::PreciseUnit) representation.
///
/// Wider exponent fields than [`Dims`] plus the non-SI axes (radian,
/// currency, count) used internally. The custom-tag regions mirror the
/// approximate layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PreciseDims(u64);

impl PreciseDims {
    const METER: Field = Field::new(0, 6);
    const KILOGRAM: Field = Field::new(6, 5);
    const SECOND: Field = Field::new(11, 6);
    const AMPERE: Field = Field::new(17, 5);
    const KELVIN: Field = Field::new(22, 4);
    const MOLE: Field = Field::new(26, 3);
    const CANDELA: Field = Field::new(29, 3);
    const RADIAN: Field = Field::new(32, 4);
    const CURRENCY: Field = Field::new(36, 3);
    const COUNT: Field = Field::new(39, 3);

    const FIELDS: [Field; 10] = [
        Self::METER,
        Self::KILOGRAM,
        Self::SECOND,
        Self::AMPERE,
        Self::KELVIN,
        Self::MOLE,
        Self::CANDELA,
        Self::RADIAN,
        Self::CURRENCY,
        Self::COUNT,
    ];

    const PER_UNIT: u64 = 1 << 42;
    const CUSTOM: TagRegion = TagRegion::new(43, 44, Field::new(45, 10));
    const CUSTOM_COUNT: TagRegion = TagRegion::new(55, 56, Field::new(57, 4));

    const TAG_MASK: u64 = Self::PER_UNIT | Self::CUSTOM.mask() | Self::CUSTOM_COUNT.mask();

    /// Build a vector from explicit SI exponents, saturating out-of-range
    /// values. Argument order matches [`Dims::new`]; the non-SI axes start
    /// at zero and are set with the `with_*` builders.
    pub const fn new(
        meter: i32,
        kilogram: i32,
        second: i32,
        ampere: i32,
        kelvin: i32,
        mole: i32,
        candela: i32,
    ) -> Self {
        let mut bits = 0u64;
        bits = Self::METER.set(bits, meter as i64);
        bits = Self::KILOGRAM.set(bits, kilogram as i64);
        bits = Self::SECOND.set(bits, second as i64);
        bits = Self::AMPERE.set(bits, ampere as i64);
        bits = Self::KELVIN.set(bits, kelvin as i64);
        bits = Self::MOLE.set(bits, mole as i64);
        bits = Self::CANDELA.set(bits, candela as i64);
        Self(bits)
    }

    /// Like [`PreciseDims::new`] but rejects out-of-range exponents.
    pub fn checked_new(
        meter: i32,
        kilogram: i32,
        second: i32,
        ampere: i32,
        kelvin: i32,
        mole: i32,
        candela: i32,
    ) -> Result<Self, UnitError> {
        let parts = [
            ("meter", meter, Self::METER),
            ("kilogram", kilogram, Self::KILOGRAM),
            ("second", second, Self::SECOND),
            ("ampere", ampere, Self::AMPERE),
            ("kelvin", kelvin, Self::KELVIN),
            ("mole", mole, Self::MOLE),
            ("candela", candela, Self::CANDELA),
        ];
        for (dimension, value, field) in parts {
            if !field.fits(value as i64) {
                return Err(UnitError::ExponentOutOfRange {
                    dimension,
                    value,
                    min: field.min() as i32,
                    max: field.max() as i32,
                });
            }
        }
        Ok(Self::new(meter, kilogram, second, ampere, kelvin, mole, candela))
    }

    pub const fn dimensionless() -> Self {
        Self(0)
    }

    pub const fn meter(&self) -> i32 {
        Self::METER.get(self.0) as i32
    }

    pub const fn kilogram(&self) -> i32 {
        Self::KILOGRAM.get(self.0) as i32
    }

    pub const fn second(&self) -> i32 {
        Self::SECOND.get(self.0) as i32
    }

    pub const fn ampere(&self) -> i32 {
        Self::AMPERE.get(self.0) as i32
    }

    pub const fn kelvin(&self) -> i32 {
        Self::KELVIN.get(self.0) as i32
    }

    pub const fn mole(&self) -> i32 {
        Self::MOLE.get(self.0) as i32
    }

    pub const fn candela(&self) -> i32 {
        Self::CANDELA.get(self.0) as i32
    }

    pub const fn radian(&self) -> i32 {
        Self::RADIAN.get(self.0) as i32
    }

    pub const fn currency(&self) -> i32 {
        Self::CURRENCY.get(self.0) as i32
    }

    pub const fn count(&self) -> i32 {
        Self::COUNT.get(self.0) as i32
    }

    pub const fn with_radian(self, exponent: i32) -> Self {
        Self(Self::RADIAN.set(self.0, exponent as i64))
    }

    pub const fn with_currency(self, exponent: i32) -> Self {
        Self(Self::CURRENCY.set(self.0, exponent as i64))
    }

    pub const fn with_count(self, exponent: i32) -> Self {
        Self(Self::COUNT.set(self.0, exponent as i64))
    }

    pub const fn is_per_unit(&self) -> bool {
        self.0 & Self::PER_UNIT != 0
    }

    pub const fn with_per_unit(self) -> Self {
        Self(self.0 | Self::PER_UNIT)
    }

    pub const fn without_per_unit(self) -> Self {
        Self(self.0 & !Self::PER_UNIT)
    }

    pub const fn is_dimensionless(&self) -> bool {
        self.0 & !Self::PER_UNIT == 0
    }

    pub const fn is_custom_unit(&self) -> bool {
        Self::CUSTOM.present(self.0)
    }

    pub const fn is_custom_unit_inverted(&self) -> bool {
        Self::CUSTOM.inverted(self.0)
    }

    pub const fn custom_unit_number(&self) -> u16 {
        Self::CUSTOM.index.get_unsigned(self.0) as u16
    }

    pub const fn is_custom_count_unit(&self) -> bool {
        Self::CUSTOM_COUNT.present(self.0)
    }

    pub const fn is_custom_count_unit_inverted(&self) -> bool {
        Self::CUSTOM_COUNT.inverted(self.0)
    }

    pub const fn custom_count_unit_number(&self) -> u16 {
        Self::CUSTOM_COUNT.index.get_unsigned(self.0) as u16
    }

    /// A vector carrying only a general custom tag for `index`.
    pub(crate) const fn custom_unit(index: u16) -> Self {
        Self(Self::CUSTOM.index.set_unsigned(Self::CUSTOM.flag, index as u64))
    }

    /// A vector carrying only a custom count tag for `index`.
    pub(crate) const fn custom_count_unit(index: u16) -> Self {
        Self(Self::CUSTOM_COUNT.index.set_unsigned(Self::CUSTOM_COUNT.flag, index as u64))
    }

    pub(crate) const fn combine(self, other: Self) -> Self {
        let mut bits = add_fields(self.0, other.0, &Self::FIELDS);
        bits |= (self.0 | other.0) & Self::PER_UNIT;
        bits = Self::CUSTOM.merge(bits, self.0, other.0);
        bits = Self::CUSTOM_COUNT.merge(bits, self.0, other.0);
        Self(bits)
    }

    pub(crate) const fn divide(self, other: Self) -> Self {
        self.combine(other.recip())
    }

    pub(crate) const fn recip(self) -> Self {
        let mut bits = neg_fields(self.0, &Self::FIELDS);
        bits |= self.0 & Self::TAG_MASK;
        bits = Self::CUSTOM.toggle_invert(bits);
        bits = Self::CUSTOM_COUNT.toggle_invert(bits);
        Self(bits)
    }

    pub(crate) const fn pow(self, n: i32) -> Self {
        if n == 0 {
            return Self::dimensionless();
        }
        let mut bits = scale_fields(self.0, n as i64, &Self::FIELDS) | (self.0 & Self::TAG_MASK);
        if n < 0 {
            bits = Self::CUSTOM.toggle_invert(bits);
            bits = Self::CUSTOM_COUNT.toggle_invert(bits);
        }
        Self(bits)
    }

    pub(crate) const fn root(self, n: i32) -> Option<Self> {
        if n == 0 {
            return None;
        }
        let bits = match div_fields(self.0, n.unsigned_abs() as i64, &Self::FIELDS) {
            Some(bits) => bits,
            None => return None,
        };
        let rooted = Self(bits | (self.0 & Self::TAG_MASK));
        Some(if n < 0 { rooted.recip() } else { rooted })
    }

    /// Project into the narrow layout. Exponents saturate at the narrow
    /// field ranges; the radian/currency/count axes are dropped; the
    /// per-unit flag and custom tags carry over intact.
    pub(crate) const fn narrowed(self) -> Dims {
        let mut bits = 0u64;
        bits = Dims::METER.set(bits, Self::METER.get(self.0));
        bits = Dims::KILOGRAM.set(bits, Self::KILOGRAM.get(self.0));
        bits = Dims::SECOND.set(bits, Self::SECOND.get(self.0));
        bits = Dims::AMPERE.set(bits, Self::AMPERE.get(self.0));
        bits = Dims::KELVIN.set(bits, Self::KELVIN.get(self.0));
        bits = Dims::MOLE.set(bits, Self::MOLE.get(self.0));
        bits = Dims::CANDELA.set(bits, Self::CANDELA.get(self.0));
        if self.is_per_unit() {
            bits |= Dims::PER_UNIT;
        }
        bits = copy_region(self.0, Self::CUSTOM, bits, Dims::CUSTOM);
        bits = copy_region(self.0, Self::CUSTOM_COUNT, bits, Dims::CUSTOM_COUNT);
        Dims(bits)
    }
}

impl fmt::Debug for PreciseDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("PreciseDims");
        s.field("m", &self.meter())
            .field("kg", &self.kilogram())
            .field("s", &self.second())
            .field("A", &self.ampere())
            .field("K", &self.kelvin())
            .field("mol", &self.mole())
            .field("cd", &self.candela())
            .field("rad", &self.radian())
            .field("cur", &self.currency())
            .field("cnt", &self.count())
            .field("pu", &self.is_per_unit());
        if self.is_custom_unit() {
            s.field(
                "custom",
                &(self.custom_unit_number(), self.is_custom_unit_inverted()),
            );
        }
        if self.is_custom_count_unit() {
            s.field(
                "custom_count",
                &(
                    self.custom_count_unit_number(),
                    self.is_custom_count_unit_inverted(),
                ),
            );
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_roundtrip() {
        let d = Dims::new(2, 1, -3, -1, 0, 0, 0);
        assert_eq!(d.meter(), 2);
        assert_eq!(d.kilogram(), 1);
        assert_eq!(d.second(), -3);
        assert_eq!(d.ampere(), -1);
        assert_eq!(d.kelvin(), 0);
        assert_eq!(d.mole(), 0);
        assert_eq!(d.candela(), 0);
        assert!(!d.is_per_unit());
    }

    #[test]
    fn checked_construction_rejects_out_of_range() {
        assert!(Dims::checked_new(7, 0, 0, 0, 0, 0, 0).is_ok());
        let err = Dims::checked_new(9, 0, 0, 0, 0, 0, 0).unwrap_err();
        assert_eq!(
            err,
            UnitError::ExponentOutOfRange {
                dimension: "meter",
                value: 9,
                min: -8,
                max: 7,
            }
        );
        assert!(PreciseDims::checked_new(31, -16, 0, 0, 0, 0, 0).is_ok());
        assert!(PreciseDims::checked_new(32, 0, 0, 0, 0, 0, 0).is_err());
    }

    #[test]
    fn saturation_is_isolated_per_field() {
        let m = Dims::new(1, 0, 0, 0, 0, 0, 0);
        let sat = m.pow(20);
        assert_eq!(sat.meter(), 7);
        assert_eq!(sat.kilogram(), 0);
        assert_eq!(sat.second(), 0);
        let sat = m.pow(-20);
        assert_eq!(sat.meter(), -8);
        assert_eq!(sat.kilogram(), 0);
    }

    #[test]
    fn combine_adds_and_divide_subtracts() {
        let v = Dims::new(2, 1, -3, -1, 0, 0, 0);
        let a = Dims::new(0, 0, 0, 1, 0, 0, 0);
        let w = v.combine(a);
        assert_eq!(w, Dims::new(2, 1, -3, 0, 0, 0, 0));
        assert_eq!(w.divide(a), v);
    }

    #[test]
    fn recip_negates_and_preserves_per_unit() {
        let d = Dims::new(1, 0, -2, 0, 0, 0, 0).with_per_unit();
        let r = d.recip();
        assert_eq!(r.meter(), -1);
        assert_eq!(r.second(), 2);
        assert!(r.is_per_unit());
        assert_eq!(r.recip(), d);
    }

    #[test]
    fn pow_negative_matches_recip_of_pow() {
        let d = Dims::new(1, 1, -2, 0, 0, 0, 0);
        assert_eq!(d.pow(-3), d.pow(3).recip());
        assert_eq!(d.pow(0), Dims::dimensionless());
    }

    #[test]
    fn negative_pow_saturates_at_the_lower_bound() {
        let c = PreciseDims::custom_unit(5).combine(PreciseDims::new(1, 0, 0, 0, 0, 0, 0));
        let p = c.pow(-40);
        assert_eq!(p.meter(), -32);
        assert_eq!(p.kilogram(), 0);
        assert!(p.is_custom_unit_inverted());
        assert_eq!(p.custom_unit_number(), 5);
    }

    #[test]
    fn root_requires_even_divisibility() {
        let d = Dims::new(4, 2, -6, 0, 0, 0, 0);
        assert_eq!(d.root(2), Some(Dims::new(2, 1, -3, 0, 0, 0, 0)));
        assert_eq!(d.root(4), None);
        assert_eq!(d.root(0), None);
        assert_eq!(d.root(-2), Some(Dims::new(-2, -1, 3, 0, 0, 0, 0)));
    }

    #[test]
    fn custom_tag_survives_base_dimension_arithmetic() {
        let c = PreciseDims::custom_unit(517);
        let m = PreciseDims::new(1, 0, 0, 0, 0, 0, 0);
        let adjusted = c.divide(m.pow(3));
        assert!(adjusted.is_custom_unit());
        assert!(!adjusted.is_custom_unit_inverted());
        assert_eq!(adjusted.custom_unit_number(), 517);
        assert_eq!(adjusted.meter(), -3);
        assert_eq!(adjusted.combine(m.pow(3)), c);
    }

    #[test]
    fn custom_regions_are_mutually_exclusive() {
        let c = PreciseDims::custom_unit(12);
        assert!(c.is_custom_unit());
        assert!(!c.is_custom_count_unit());
        let cc = PreciseDims::custom_count_unit(12);
        assert!(cc.is_custom_count_unit());
        assert!(!cc.is_custom_unit());
        assert_ne!(c, cc);
    }

    #[test]
    fn narrow_widen_preserves_tags() {
        let p = PreciseDims::custom_unit(900)
            .combine(PreciseDims::new(-2, 1, 0, 0, 0, 0, 0))
            .with_per_unit();
        let narrow = p.narrowed();
        assert!(narrow.is_per_unit());
        assert!(narrow.is_custom_unit());
        assert_eq!(narrow.custom_unit_number(), 900);
        assert_eq!(narrow.meter(), -2);
        assert_eq!(narrow.widened(), p);
    }

    #[test]
    fn narrowing_saturates_wide_exponents() {
        let p = PreciseDims::new(20, 0, -20, 0, 0, 0, 0);
        let narrow = p.narrowed();
        assert_eq!(narrow.meter(), 7);
        assert_eq!(narrow.second(), -8);
        assert_eq!(narrow.kilogram(), 0);
    }

    #[test]
    fn non_si_axes_are_orthogonal() {
        let rad = PreciseDims::dimensionless().with_radian(1);
        let cur = PreciseDims::dimensionless().with_currency(1);
        assert_ne!(rad, cur);
        assert_eq!(rad.combine(cur).radian(), 1);
        assert_eq!(rad.combine(cur).currency(), 1);
        assert_eq!(rad.combine(cur).meter(), 0);
    }
}
