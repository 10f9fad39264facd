//! Mathematical functions over `Half`.
//!
//! Every function follows the same contract with the conversion core:
//! resolve the zero/NaN/infinity cases the function's mathematical
//! definition demands, then widen, delegate to the host `f32` routine
//! (or `libm` where stable std has none), and narrow the result
//! permissively with round-to-nearest-even.

use crate::half::{eq, gt, lt, Half};

/// Archimedes' constant, narrowed to half precision.
pub const PI: Half = Half::from_bits(0x4248);
/// pi/2.
pub const FRAC_PI_2: Half = Half::from_bits(0x3E48);
/// Euler's number.
pub const E: Half = Half::from_bits(0x4170);
/// sqrt(2).
pub const SQRT_2: Half = Half::from_bits(0x3DA8);
/// ln(2).
pub const LN_2: Half = Half::from_bits(0x398C);
/// ln(10).
pub const LN_10: Half = Half::from_bits(0x409B);
/// log2(e).
pub const LOG2_E: Half = Half::from_bits(0x3DC5);
/// log10(e).
pub const LOG10_E: Half = Half::from_bits(0x36F3);

fn delegate(x: Half, f: impl FnOnce(f32) -> f32) -> Half {
    Half::from_f32(f(x.to_f32()))
}

/// Square root. Negative inputs (other than -0) yield NaN.
pub fn sqrt(x: Half) -> Half {
    if x.is_zero() || x.is_positive_infinity() {
        return x;
    }
    if x.is_nan() || x.sign_bit() {
        return Half::QUIET_NAN;
    }
    delegate(x, f32::sqrt)
}

/// Cube root. Defined for the whole line; -inf maps to -inf.
pub fn cbrt(x: Half) -> Half {
    if x.is_zero() || x.is_infinite() {
        return x;
    }
    if x.is_nan() {
        return Half::QUIET_NAN;
    }
    delegate(x, f32::cbrt)
}

/// `base` raised to `exponent`.
pub fn pow(base: Half, exponent: Half) -> Half {
    if exponent.is_zero() {
        return Half::ONE;
    }
    if base.is_zero() {
        return if exponent.sign_bit() {
            Half::POSITIVE_INFINITY
        } else {
            Half::POSITIVE_ZERO
        };
    }
    if base.is_nan() || exponent.is_nan() {
        return Half::QUIET_NAN;
    }
    if base.is_infinite() {
        return if exponent.sign_bit() {
            Half::POSITIVE_ZERO
        } else {
            Half::POSITIVE_INFINITY
        };
    }
    Half::from_f32(base.to_f32().powf(exponent.to_f32()))
}

/// e^x.
pub fn exp(x: Half) -> Half {
    if x.is_zero() {
        return Half::ONE;
    }
    if x.is_nan() {
        return Half::QUIET_NAN;
    }
    if x.is_infinite() {
        return if x.sign_bit() {
            Half::POSITIVE_ZERO
        } else {
            Half::POSITIVE_INFINITY
        };
    }
    delegate(x, f32::exp)
}

/// 2^x.
pub fn exp2(x: Half) -> Half {
    if x.is_zero() {
        return Half::ONE;
    }
    if x.is_nan() {
        return Half::QUIET_NAN;
    }
    if x.is_infinite() {
        return if x.sign_bit() {
            Half::POSITIVE_ZERO
        } else {
            Half::POSITIVE_INFINITY
        };
    }
    delegate(x, f32::exp2)
}

fn log_family(x: Half, f: impl FnOnce(f32) -> f32) -> Half {
    if x.is_zero() {
        return Half::NEGATIVE_INFINITY;
    }
    if x.is_nan() || x.sign_bit() {
        return Half::QUIET_NAN;
    }
    if x.is_positive_infinity() {
        return x;
    }
    delegate(x, f)
}

/// Natural logarithm. `ln(0) = -inf`, negative inputs yield NaN.
pub fn ln(x: Half) -> Half {
    log_family(x, f32::ln)
}

pub fn log2(x: Half) -> Half {
    log_family(x, f32::log2)
}

pub fn log10(x: Half) -> Half {
    log_family(x, f32::log10)
}

/// Sine, argument in radians. `sin(+-0) = +-0`.
pub fn sin(x: Half) -> Half {
    if x.is_zero() {
        return x;
    }
    if !x.is_finite() {
        return Half::QUIET_NAN;
    }
    delegate(x, f32::sin)
}

/// Cosine, argument in radians.
pub fn cos(x: Half) -> Half {
    if x.is_zero() {
        return Half::ONE;
    }
    if !x.is_finite() {
        return Half::QUIET_NAN;
    }
    delegate(x, f32::cos)
}

/// Tangent, argument in radians. `tan(+-0) = +-0`.
pub fn tan(x: Half) -> Half {
    if x.is_zero() {
        return x;
    }
    if !x.is_finite() {
        return Half::QUIET_NAN;
    }
    delegate(x, f32::tan)
}

/// Arcsine, defined on [-1, 1].
pub fn asin(x: Half) -> Half {
    if x.is_zero() {
        return x;
    }
    if x.is_nan() || gt(x.abs(), Half::ONE) {
        return Half::QUIET_NAN;
    }
    delegate(x, f32::asin)
}

/// Arccosine, defined on [-1, 1].
pub fn acos(x: Half) -> Half {
    if x.is_nan() || gt(x.abs(), Half::ONE) {
        return Half::QUIET_NAN;
    }
    delegate(x, f32::acos)
}

/// Arctangent. `atan(+-inf) = +-pi/2`.
pub fn atan(x: Half) -> Half {
    if x.is_zero() {
        return x;
    }
    if x.is_nan() {
        return Half::QUIET_NAN;
    }
    if x.is_infinite() {
        return FRAC_PI_2.copysign(x);
    }
    delegate(x, f32::atan)
}

/// Four-quadrant arctangent of `y/x`.
pub fn atan2(y: Half, x: Half) -> Half {
    if y.is_nan() || x.is_nan() {
        return Half::QUIET_NAN;
    }
    Half::from_f32(y.to_f32().atan2(x.to_f32()))
}

/// Hyperbolic sine. Zero, NaN and infinities pass through.
pub fn sinh(x: Half) -> Half {
    if x.is_zero() || x.is_infinite() {
        return x;
    }
    if x.is_nan() {
        return Half::QUIET_NAN;
    }
    delegate(x, f32::sinh)
}

/// Hyperbolic cosine. `cosh(+-inf) = +inf`.
pub fn cosh(x: Half) -> Half {
    if x.is_zero() {
        return Half::ONE;
    }
    if x.is_nan() {
        return Half::QUIET_NAN;
    }
    if x.is_infinite() {
        return Half::POSITIVE_INFINITY;
    }
    delegate(x, f32::cosh)
}

/// Hyperbolic tangent. `tanh(+-inf) = +-1`.
pub fn tanh(x: Half) -> Half {
    if x.is_zero() {
        return x;
    }
    if x.is_nan() {
        return Half::QUIET_NAN;
    }
    if x.is_infinite() {
        return Half::ONE.copysign(x);
    }
    delegate(x, f32::tanh)
}

fn integral(x: Half, f: impl FnOnce(f32) -> f32) -> Half {
    if x.is_zero() || !x.is_finite() {
        return x;
    }
    delegate(x, f)
}

/// Largest integer value not above `x`.
pub fn floor(x: Half) -> Half {
    integral(x, f32::floor)
}

/// Smallest integer value not below `x`.
pub fn ceil(x: Half) -> Half {
    integral(x, f32::ceil)
}

/// Nearest integer, ties away from zero.
pub fn round(x: Half) -> Half {
    integral(x, f32::round)
}

/// Nearest integer, ties to even.
pub fn round_ties_even(x: Half) -> Half {
    integral(x, f32::round_ties_even)
}

/// Integer part of `x`, truncated toward zero.
pub fn trunc(x: Half) -> Half {
    integral(x, f32::trunc)
}

/// Floating-point remainder of `x / divisor`, with the sign of `x`.
pub fn fmod(x: Half, divisor: Half) -> Half {
    if divisor.is_zero() || x.is_nan() || divisor.is_nan() {
        return Half::QUIET_NAN;
    }
    if x.is_zero() {
        return x;
    }
    if x.is_infinite() || divisor.is_infinite() {
        return Half::QUIET_NAN;
    }
    Half::from_f32(x.to_f32() % divisor.to_f32())
}

/// IEEE 754 remainder of `x / divisor` (result within half a divisor
/// of zero).
pub fn ieee_remainder(x: Half, divisor: Half) -> Half {
    if divisor.is_zero() || x.is_nan() || divisor.is_nan() || x.is_infinite() {
        return Half::QUIET_NAN;
    }
    if x.is_zero() || divisor.is_infinite() {
        return x;
    }
    Half::from_f64(libm::remainder(x.to_f64(), divisor.to_f64()))
}

/// sqrt(x^2 + y^2) without intermediate overflow.
pub fn hypot(x: Half, y: Half) -> Half {
    if x.is_infinite() || y.is_infinite() {
        return Half::POSITIVE_INFINITY;
    }
    if x.is_nan() || y.is_nan() {
        return Half::QUIET_NAN;
    }
    Half::from_f32(x.to_f32().hypot(y.to_f32()))
}

/// The Gamma function.
pub fn gamma(x: Half) -> Half {
    if x.is_nan() || x.is_negative_infinity() {
        return Half::QUIET_NAN;
    }
    if x.is_positive_infinity() {
        return x;
    }
    delegate(x, libm::tgammaf)
}

/// Natural log of |Gamma(x)| and the sign of Gamma(x).
pub fn ln_gamma(x: Half) -> (Half, i32) {
    if x.is_nan() {
        return (Half::QUIET_NAN, 1);
    }
    let (value, sign) = libm::lgammaf_r(x.to_f32());
    (Half::from_f32(value), sign)
}

/// The error function. `erf(+-inf) = +-1`, `erf(+-0) = +-0`.
pub fn erf(x: Half) -> Half {
    if x.is_zero() {
        return x;
    }
    if x.is_nan() {
        return Half::QUIET_NAN;
    }
    if x.is_infinite() {
        return Half::ONE.copysign(x);
    }
    delegate(x, libm::erff)
}

/// The complementary error function.
pub fn erfc(x: Half) -> Half {
    if x.is_nan() {
        return Half::QUIET_NAN;
    }
    if x.is_positive_infinity() {
        return Half::POSITIVE_ZERO;
    }
    if x.is_negative_infinity() {
        return Half::from_f32(2.0);
    }
    delegate(x, libm::erfcf)
}

/// Order-zero Bessel function of the first kind.
pub fn j0(x: Half) -> Half {
    if x.is_nan() {
        return Half::QUIET_NAN;
    }
    if x.is_infinite() {
        return Half::POSITIVE_ZERO;
    }
    Half::from_f64(libm::j0(x.to_f64()))
}

/// Order-one Bessel function of the first kind.
pub fn j1(x: Half) -> Half {
    if x.is_nan() {
        return Half::QUIET_NAN;
    }
    if x.is_infinite() {
        return Half::POSITIVE_ZERO;
    }
    Half::from_f64(libm::j1(x.to_f64()))
}

/// Order-zero Bessel function of the second kind, defined for x >= 0.
pub fn y0(x: Half) -> Half {
    if x.is_nan() || x.sign_bit() {
        return Half::QUIET_NAN;
    }
    if x.is_zero() {
        return Half::NEGATIVE_INFINITY;
    }
    if x.is_positive_infinity() {
        return Half::POSITIVE_ZERO;
    }
    Half::from_f64(libm::y0(x.to_f64()))
}

/// Order-one Bessel function of the second kind, defined for x >= 0.
pub fn y1(x: Half) -> Half {
    if x.is_nan() || x.sign_bit() {
        return Half::QUIET_NAN;
    }
    if x.is_zero() {
        return Half::NEGATIVE_INFINITY;
    }
    if x.is_positive_infinity() {
        return Half::POSITIVE_ZERO;
    }
    Half::from_f64(libm::y1(x.to_f64()))
}

/// Restricts `x` to [min, max]. NaN passes through.
pub fn clamp(x: Half, min: Half, max: Half) -> Half {
    if x.is_nan() {
        return x;
    }
    if lt(x, min) {
        return min;
    }
    if gt(x, max) {
        return max;
    }
    x
}

/// Linear interpolation from `a` to `b` by factor `t`.
pub fn lerp(a: Half, b: Half, t: Half) -> Half {
    if t.is_zero() {
        return a;
    }
    if eq(t, Half::ONE) {
        return b;
    }
    let difference = crate::half::sub(b, a);
    crate::half::add(a, crate::half::mul(t, difference))
}

/// Positive difference: `max(x - y, +0)`.
pub fn dim(x: Half, y: Half) -> Half {
    let difference = crate::half::sub(x, y);
    if lt(difference, Half::POSITIVE_ZERO) {
        Half::POSITIVE_ZERO
    } else {
        difference
    }
}
