//! Conversion between `Half` and the wider IEEE 754 formats.
//!
//! Widening is always exact. Narrowing funnels both source widths
//! through a single rounding engine so that `f32` and `f64` inputs see
//! identical regime handling: overflow to infinity, subnormal
//! production with guard/sticky rounding, and post-round carry
//! promotion.

use std::fmt::{Display, Formatter};

use super::bits;
use super::Half;

/// Largest finite binary16 magnitude.
const MAX_FINITE: f64 = 65504.0;
/// Smallest positive binary16 subnormal, 2^-24.
const MIN_SUBNORMAL: f64 = 5.960_464_477_539_062_5e-8;

/// Direction used when a narrowed mantissa has discarded bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round to nearest, ties to the even mantissa. The IEEE default.
    NearestEven,
    /// Round to nearest, ties away from zero.
    NearestAway,
    /// Truncate toward zero.
    TowardZero,
    /// Round toward positive infinity.
    TowardPositive,
    /// Round toward negative infinity.
    TowardNegative,
}

impl Default for RoundingMode {
    fn default() -> Self {
        RoundingMode::NearestEven
    }
}

/// Policy for inputs that do not fit the finite binary16 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// IEEE behavior: overflow becomes infinity, underflow becomes zero
    /// or a subnormal, NaN and infinity pass through.
    Ieee,
    /// Out-of-range, infinite and NaN inputs are reported as errors
    /// before any rounding happens.
    Strict,
}

impl Default for ConversionMode {
    fn default() -> Self {
        ConversionMode::Ieee
    }
}

/// Errors raised by strict narrowing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConvertError {
    /// Magnitude above the largest finite value, 65504.
    Overflow { value: f64 },
    /// Nonzero magnitude below the smallest subnormal, 2^-24.
    Underflow { value: f64 },
    /// NaN input under strict conversion.
    NanInput,
    /// Infinite input under strict conversion.
    InfiniteInput,
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::Overflow { value } => {
                write!(f, "value {} overflows the half-precision range", value)
            }
            ConvertError::Underflow { value } => {
                write!(f, "value {} underflows the half-precision range", value)
            }
            ConvertError::NanInput => write!(f, "NaN input in strict conversion"),
            ConvertError::InfiniteInput => write!(f, "infinite input in strict conversion"),
        }
    }
}

impl std::error::Error for ConvertError {}

/// A conversion policy bundling strictness and rounding, for callers
/// that bind their modes once instead of passing them at every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Converter {
    pub conversion: ConversionMode,
    pub rounding: RoundingMode,
}

impl Converter {
    pub fn new(conversion: ConversionMode, rounding: RoundingMode) -> Converter {
        Converter {
            conversion,
            rounding,
        }
    }

    /// Narrows with this converter's rounding mode, ignoring strictness.
    pub fn from_f32(&self, value: f32) -> Half {
        narrow_f32(value, ConversionMode::Ieee, self.rounding)
            .unwrap_or(Half::QUIET_NAN)
    }

    /// Narrows honoring both the conversion and rounding modes.
    pub fn try_from_f32(&self, value: f32) -> Result<Half, ConvertError> {
        narrow_f32(value, self.conversion, self.rounding)
    }

    pub fn from_f64(&self, value: f64) -> Half {
        narrow_f64(value, ConversionMode::Ieee, self.rounding)
            .unwrap_or(Half::QUIET_NAN)
    }

    pub fn try_from_f64(&self, value: f64) -> Result<Half, ConvertError> {
        narrow_f64(value, self.conversion, self.rounding)
    }
}

impl Half {
    /// Converts from `f32` with IEEE semantics and round-to-nearest-even.
    pub fn from_f32(value: f32) -> Half {
        narrow_f32(value, ConversionMode::Ieee, RoundingMode::NearestEven)
            .unwrap_or(Half::QUIET_NAN)
    }

    /// Converts from `f32` under explicit conversion and rounding modes.
    ///
    /// Strict-mode checks run before rounding, in the precedence
    /// NaN > infinity > overflow > underflow.
    pub fn from_f32_with(
        value: f32,
        conversion: ConversionMode,
        rounding: RoundingMode,
    ) -> Result<Half, ConvertError> {
        narrow_f32(value, conversion, rounding)
    }

    /// Converts from `f64` with IEEE semantics and round-to-nearest-even.
    ///
    /// The 52-bit mantissa is rounded directly to 10 bits; the value
    /// never takes a detour through `f32`, so there is a single
    /// rounding step.
    pub fn from_f64(value: f64) -> Half {
        narrow_f64(value, ConversionMode::Ieee, RoundingMode::NearestEven)
            .unwrap_or(Half::QUIET_NAN)
    }

    pub fn from_f64_with(
        value: f64,
        conversion: ConversionMode,
        rounding: RoundingMode,
    ) -> Result<Half, ConvertError> {
        narrow_f64(value, conversion, rounding)
    }

    /// Converts from an integer. Values outside the finite range map to
    /// the signed infinity.
    pub fn from_i32(value: i32) -> Half {
        Half::from_f64(value as f64)
    }

    pub fn from_i64(value: i64) -> Half {
        Half::from_f64(value as f64)
    }

    /// Widens to `f32`. Exact for every value.
    pub fn to_f32(self) -> f32 {
        let sign = ((self.0 & bits::SIGN_MASK) as u32) << 16;
        let exponent = bits::exponent(self.0);
        let mantissa = bits::mantissa(self.0) as u32;

        if exponent == bits::EXPONENT_SPECIAL {
            return if mantissa == 0 {
                f32::from_bits(sign | 0x7F80_0000)
            } else {
                f32::from_bits(0x7FC0_0000)
            };
        }
        if exponent == 0 {
            if mantissa == 0 {
                return f32::from_bits(sign);
            }
            // Subnormal: renormalize into the f32 normal range, which
            // always has room for the shifted-out exponent.
            let mut exponent = -14i32;
            let mut mantissa = mantissa;
            while mantissa & 0x400 == 0 {
                mantissa <<= 1;
                exponent -= 1;
            }
            return f32::from_bits(
                sign | (((exponent + 127) as u32) << 23) | ((mantissa & 0x3FF) << 13),
            );
        }
        f32::from_bits(sign | (((exponent as i32 - 15 + 127) as u32) << 23) | (mantissa << 13))
    }

    /// Widens to `f64`. Exact for every value.
    pub fn to_f64(self) -> f64 {
        let sign = ((self.0 & bits::SIGN_MASK) as u64) << 48;
        let exponent = bits::exponent(self.0);
        let mantissa = bits::mantissa(self.0) as u64;

        if exponent == bits::EXPONENT_SPECIAL {
            return if mantissa == 0 {
                f64::from_bits(sign | 0x7FF0_0000_0000_0000)
            } else {
                f64::from_bits(0x7FF8_0000_0000_0000)
            };
        }
        if exponent == 0 {
            if mantissa == 0 {
                return f64::from_bits(sign);
            }
            let mut exponent = -14i64;
            let mut mantissa = mantissa;
            while mantissa & 0x400 == 0 {
                mantissa <<= 1;
                exponent -= 1;
            }
            return f64::from_bits(
                sign | (((exponent + 1023) as u64) << 52) | ((mantissa & 0x3FF) << 42),
            );
        }
        f64::from_bits(sign | (((exponent as i64 - 15 + 1023) as u64) << 52) | (mantissa << 42))
    }

    /// Truncates toward zero. NaN maps to 0; out-of-range magnitudes
    /// saturate at the integer bounds.
    pub fn to_i32(self) -> i32 {
        self.to_f32() as i32
    }

    pub fn to_i64(self) -> i64 {
        self.to_f32() as i64
    }
}

impl From<f32> for Half {
    fn from(value: f32) -> Half {
        Half::from_f32(value)
    }
}

impl From<f64> for Half {
    fn from(value: f64) -> Half {
        Half::from_f64(value)
    }
}

impl From<i32> for Half {
    fn from(value: i32) -> Half {
        Half::from_i32(value)
    }
}

impl From<Half> for f32 {
    fn from(value: Half) -> f32 {
        value.to_f32()
    }
}

impl From<Half> for f64 {
    fn from(value: Half) -> f64 {
        value.to_f64()
    }
}

pub(crate) fn narrow_f32(
    value: f32,
    conversion: ConversionMode,
    rounding: RoundingMode,
) -> Result<Half, ConvertError> {
    let wide = value.to_bits();
    let sign = ((wide >> 31) as u16) << 15;
    let exponent = ((wide >> 23) & 0xFF) as i32;
    let mantissa = (wide & 0x007F_FFFF) as u64;

    if exponent == 0xFF {
        return narrow_special(sign, mantissa != 0, conversion);
    }
    if conversion == ConversionMode::Strict {
        check_finite_range(value as f64)?;
    }
    if exponent == 0 {
        // Zero, or an f32 subnormal: the largest f32 subnormal is far
        // below the smallest binary16 subnormal, so both collapse to
        // the signed zero here.
        return Ok(Half(sign));
    }
    Ok(Half(narrow_parts(sign, exponent - 127, mantissa, 23, rounding)))
}

pub(crate) fn narrow_f64(
    value: f64,
    conversion: ConversionMode,
    rounding: RoundingMode,
) -> Result<Half, ConvertError> {
    let wide = value.to_bits();
    let sign = ((wide >> 63) as u16) << 15;
    let exponent = ((wide >> 52) & 0x7FF) as i32;
    let mantissa = wide & 0x000F_FFFF_FFFF_FFFF;

    if exponent == 0x7FF {
        return narrow_special(sign, mantissa != 0, conversion);
    }
    if conversion == ConversionMode::Strict {
        check_finite_range(value)?;
    }
    if exponent == 0 {
        return Ok(Half(sign));
    }
    Ok(Half(narrow_parts(sign, exponent - 1023, mantissa, 52, rounding)))
}

fn narrow_special(
    sign: u16,
    is_nan: bool,
    conversion: ConversionMode,
) -> Result<Half, ConvertError> {
    if is_nan {
        if conversion == ConversionMode::Strict {
            return Err(ConvertError::NanInput);
        }
        return Ok(Half::QUIET_NAN);
    }
    if conversion == ConversionMode::Strict {
        return Err(ConvertError::InfiniteInput);
    }
    Ok(Half(sign | Half::POSITIVE_INFINITY.0))
}

/// Strict-mode range check, evaluated before rounding. The boundaries
/// are inclusive: exactly 65504 and exactly 2^-24 convert cleanly.
fn check_finite_range(value: f64) -> Result<(), ConvertError> {
    let magnitude = value.abs();
    if magnitude > MAX_FINITE {
        return Err(ConvertError::Overflow { value });
    }
    if magnitude > 0.0 && magnitude < MIN_SUBNORMAL {
        return Err(ConvertError::Underflow { value });
    }
    Ok(())
}

/// The shared narrowing engine for finite, nonzero normal sources.
///
/// `unbiased` is the source's unbiased exponent and `mantissa` its
/// field without the implicit bit; `src_mantissa_bits` is 23 for `f32`
/// and 52 for `f64`.
fn narrow_parts(
    sign: u16,
    unbiased: i32,
    mantissa: u64,
    src_mantissa_bits: u32,
    rounding: RoundingMode,
) -> u16 {
    let negative = sign != 0;
    let target_exponent = unbiased + bits::EXPONENT_BIAS;
    let normal_shift = src_mantissa_bits - bits::MANTISSA_BITS;

    if target_exponent >= bits::EXPONENT_SPECIAL as i32 {
        return sign | Half::POSITIVE_INFINITY.0;
    }

    if target_exponent <= 0 {
        if target_exponent < -10 {
            // Below even the subnormal range; every rounding mode
            // produces the signed zero.
            return sign;
        }
        // Subnormal production: insert the implicit bit, then shift it
        // (1 - target_exponent) positions below the 10-bit window.
        let full = mantissa | (1u64 << src_mantissa_bits);
        let shift = normal_shift + (1 - target_exponent) as u32;
        let kept = (full >> shift) as u16;
        let rounded = kept + round_increment(negative, full, shift, rounding) as u16;
        // A carry out of the subnormal mantissa is exactly the smallest
        // normal pattern, so plain addition promotes it.
        return sign | rounded;
    }

    let kept = (mantissa >> normal_shift) as u16;
    let mut result = kept + round_increment(negative, mantissa, normal_shift, rounding) as u16;
    let mut exponent = target_exponent as u16;
    if result == 0x400 {
        // Mantissa carry: 1.111... rounded up to 10.000...
        result = 0;
        exponent += 1;
        if exponent >= bits::EXPONENT_SPECIAL {
            return sign | Half::POSITIVE_INFINITY.0;
        }
    }
    sign | (exponent << bits::MANTISSA_BITS) | result
}

/// Decides whether the retained mantissa is incremented, from the
/// guard bit (most significant discarded), the sticky bits (the rest)
/// and the retained LSB.
fn round_increment(negative: bool, mantissa: u64, shift: u32, rounding: RoundingMode) -> bool {
    if shift == 0 {
        return false;
    }
    let guard = (mantissa >> (shift - 1)) & 1 != 0;
    let sticky = shift > 1 && mantissa & ((1u64 << (shift - 1)) - 1) != 0;
    let lsb = (mantissa >> shift) & 1 != 0;

    match rounding {
        RoundingMode::NearestEven => guard && (sticky || lsb),
        RoundingMode::NearestAway => guard,
        RoundingMode::TowardZero => false,
        RoundingMode::TowardPositive => (guard || sticky) && !negative,
        RoundingMode::TowardNegative => (guard || sticky) && negative,
    }
}
