//! Arithmetic, comparison and min/max over `Half` values.
//!
//! Every binary operator resolves special values in the same order:
//! NaN operands first, then the operator's algebraic special cases,
//! then the general case, which widens both operands to `f32`
//! (losslessly), computes there, and narrows the result once with the
//! caller's rounding mode.

use std::fmt::{Display, Formatter};

use super::cast::{narrow_f32, ConversionMode, ConvertError, RoundingMode};
use super::Half;

/// Precision/performance trade-off for arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithMode {
    /// Full IEEE 754 semantics: compute as if exact, round once.
    Ieee,
    /// Same data path as `Ieee` but skips the special-case ladder and
    /// always narrows permissively. Differs from `Ieee` only in NaN
    /// payload canonicalization.
    Fast,
    /// IEEE semantics, except that indeterminate forms and silent
    /// NaN/infinity production become typed errors, and the result is
    /// narrowed strictly.
    Exact,
}

impl Default for ArithMode {
    fn default() -> Self {
        ArithMode::Ieee
    }
}

/// Errors raised by exact-mode arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArithError {
    /// A NaN operand reached an exact-mode operator.
    NanOperand { op: &'static str },
    /// The mathematical result is indeterminate (0*inf, inf-inf, 0/0,
    /// inf/inf).
    InvalidOperation {
        op: &'static str,
        reason: &'static str,
    },
    /// Nonzero finite numerator over zero.
    DivisionByZero { op: &'static str },
    /// The result failed the strict narrowing of exact mode.
    Convert(ConvertError),
}

impl Display for ArithError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithError::NanOperand { op } => write!(f, "NaN operand in exact {}", op),
            ArithError::InvalidOperation { op, reason } => {
                write!(f, "invalid {}: {}", op, reason)
            }
            ArithError::DivisionByZero { op } => write!(f, "division by zero in {}", op),
            ArithError::Convert(e) => write!(f, "result conversion failed: {}", e),
        }
    }
}

impl std::error::Error for ArithError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArithError::Convert(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConvertError> for ArithError {
    fn from(error: ConvertError) -> Self {
        ArithError::Convert(error)
    }
}

#[derive(Clone, Copy)]
enum Op {
    Add,
    Mul,
    Div,
}

impl Op {
    fn apply(self, x: f32, y: f32) -> f32 {
        match self {
            Op::Add => x + y,
            Op::Mul => x * y,
            Op::Div => x / y,
        }
    }
}

/// Addition with round-to-nearest-even IEEE semantics.
pub fn add(a: Half, b: Half) -> Half {
    add_with(a, b, ArithMode::Ieee, RoundingMode::NearestEven).unwrap_or(Half::QUIET_NAN)
}

/// Addition under explicit arithmetic and rounding modes.
pub fn add_with(
    a: Half,
    b: Half,
    mode: ArithMode,
    rounding: RoundingMode,
) -> Result<Half, ArithError> {
    if mode == ArithMode::Fast {
        return combine(Op::Add, a, b, mode, rounding);
    }
    if a.is_nan() || b.is_nan() {
        return nan_operand("add", mode);
    }
    if a.is_zero() && b.is_zero() {
        // Equal signs keep the sign; opposite signs cancel to +0,
        // except under rounding toward negative infinity.
        if a.sign_bit() == b.sign_bit() {
            return Ok(a);
        }
        return Ok(if rounding == RoundingMode::TowardNegative {
            Half::NEGATIVE_ZERO
        } else {
            Half::POSITIVE_ZERO
        });
    }
    if a.is_zero() {
        return Ok(b);
    }
    if b.is_zero() {
        return Ok(a);
    }
    if a.is_infinite() || b.is_infinite() {
        if a.is_infinite() && b.is_infinite() && a.sign_bit() != b.sign_bit() {
            return indeterminate("add", "infinity minus infinity is undefined", mode);
        }
        return Ok(if a.is_infinite() { a } else { b });
    }
    combine(Op::Add, a, b, mode, rounding)
}

/// Subtraction: addition of the negated second operand.
pub fn sub(a: Half, b: Half) -> Half {
    sub_with(a, b, ArithMode::Ieee, RoundingMode::NearestEven).unwrap_or(Half::QUIET_NAN)
}

pub fn sub_with(
    a: Half,
    b: Half,
    mode: ArithMode,
    rounding: RoundingMode,
) -> Result<Half, ArithError> {
    add_with(a, b.negate(), mode, rounding)
}

/// Multiplication with round-to-nearest-even IEEE semantics.
pub fn mul(a: Half, b: Half) -> Half {
    mul_with(a, b, ArithMode::Ieee, RoundingMode::NearestEven).unwrap_or(Half::QUIET_NAN)
}

pub fn mul_with(
    a: Half,
    b: Half,
    mode: ArithMode,
    rounding: RoundingMode,
) -> Result<Half, ArithError> {
    if mode == ArithMode::Fast {
        return combine(Op::Mul, a, b, mode, rounding);
    }
    if a.is_nan() || b.is_nan() {
        return nan_operand("mul", mode);
    }
    if (a.is_zero() && b.is_infinite()) || (a.is_infinite() && b.is_zero()) {
        return indeterminate("mul", "zero times infinity is undefined", mode);
    }
    let sign_differs = a.sign_bit() != b.sign_bit();
    if a.is_zero() || b.is_zero() {
        return Ok(signed_zero(sign_differs));
    }
    if a.is_infinite() || b.is_infinite() {
        return Ok(signed_infinity(sign_differs));
    }
    combine(Op::Mul, a, b, mode, rounding)
}

/// Division with round-to-nearest-even IEEE semantics.
pub fn div(a: Half, b: Half) -> Half {
    div_with(a, b, ArithMode::Ieee, RoundingMode::NearestEven).unwrap_or(Half::QUIET_NAN)
}

pub fn div_with(
    a: Half,
    b: Half,
    mode: ArithMode,
    rounding: RoundingMode,
) -> Result<Half, ArithError> {
    if mode == ArithMode::Fast {
        return combine(Op::Div, a, b, mode, rounding);
    }
    if a.is_nan() || b.is_nan() {
        return nan_operand("div", mode);
    }
    let sign_differs = a.sign_bit() != b.sign_bit();
    if b.is_zero() {
        if a.is_zero() {
            return indeterminate("div", "zero divided by zero is undefined", mode);
        }
        if mode == ArithMode::Exact {
            return Err(ArithError::DivisionByZero { op: "div" });
        }
        return Ok(signed_infinity(sign_differs));
    }
    if a.is_zero() {
        return Ok(signed_zero(sign_differs));
    }
    if a.is_infinite() {
        if b.is_infinite() {
            return indeterminate("div", "infinity divided by infinity is undefined", mode);
        }
        return Ok(signed_infinity(sign_differs));
    }
    if b.is_infinite() {
        return Ok(signed_zero(sign_differs));
    }
    combine(Op::Div, a, b, mode, rounding)
}

fn combine(
    op: Op,
    a: Half,
    b: Half,
    mode: ArithMode,
    rounding: RoundingMode,
) -> Result<Half, ArithError> {
    let wide = op.apply(a.to_f32(), b.to_f32());
    let conversion = if mode == ArithMode::Exact {
        ConversionMode::Strict
    } else {
        ConversionMode::Ieee
    };
    Ok(narrow_f32(wide, conversion, rounding)?)
}

fn nan_operand(op: &'static str, mode: ArithMode) -> Result<Half, ArithError> {
    if mode == ArithMode::Exact {
        Err(ArithError::NanOperand { op })
    } else {
        Ok(Half::QUIET_NAN)
    }
}

fn indeterminate(
    op: &'static str,
    reason: &'static str,
    mode: ArithMode,
) -> Result<Half, ArithError> {
    if mode == ArithMode::Exact {
        Err(ArithError::InvalidOperation { op, reason })
    } else {
        Ok(Half::QUIET_NAN)
    }
}

fn signed_zero(negative: bool) -> Half {
    if negative {
        Half::NEGATIVE_ZERO
    } else {
        Half::POSITIVE_ZERO
    }
}

fn signed_infinity(negative: bool) -> Half {
    if negative {
        Half::NEGATIVE_INFINITY
    } else {
        Half::POSITIVE_INFINITY
    }
}

/// Equality: both zeros compare equal, NaN compares equal to nothing.
pub fn eq(a: Half, b: Half) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a.is_zero() && b.is_zero() {
        return true;
    }
    a.0 == b.0
}

/// Strict ordering. Any NaN operand makes the comparison false, and the
/// two zeros do not order against each other. Same-sign values order by
/// bit-pattern magnitude, reversed for negatives.
pub fn lt(a: Half, b: Half) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a.is_zero() && b.is_zero() {
        return false;
    }
    match (a.sign_bit(), b.sign_bit()) {
        (true, false) => true,
        (false, true) => false,
        (false, false) => a.0 < b.0,
        (true, true) => a.0 > b.0,
    }
}

pub fn gt(a: Half, b: Half) -> bool {
    lt(b, a)
}

pub fn le(a: Half, b: Half) -> bool {
    lt(a, b) || eq(a, b)
}

pub fn ge(a: Half, b: Half) -> bool {
    gt(a, b) || eq(a, b)
}

/// Smaller operand. A single NaN operand is skipped; -0 counts as
/// smaller than +0.
pub fn min(a: Half, b: Half) -> Half {
    if a.is_nan() {
        return b;
    }
    if b.is_nan() {
        return a;
    }
    if a.is_zero() && b.is_zero() {
        return if a.sign_bit() { a } else { b };
    }
    if lt(a, b) {
        a
    } else {
        b
    }
}

/// Larger operand. A single NaN operand is skipped; +0 counts as
/// larger than -0.
pub fn max(a: Half, b: Half) -> Half {
    if a.is_nan() {
        return b;
    }
    if b.is_nan() {
        return a;
    }
    if a.is_zero() && b.is_zero() {
        return if a.sign_bit() { b } else { a };
    }
    if gt(a, b) {
        a
    } else {
        b
    }
}

impl PartialEq for Half {
    fn eq(&self, other: &Self) -> bool {
        eq(*self, *other)
    }
}

impl PartialOrd for Half {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        if eq(*self, *other) {
            Some(std::cmp::Ordering::Equal)
        } else if lt(*self, *other) {
            Some(std::cmp::Ordering::Less)
        } else {
            Some(std::cmp::Ordering::Greater)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(bits: u16) -> Half {
        Half::from_bits(bits)
    }

    #[test]
    fn test_add_basic() {
        // 1.0 + 2.0 = 3.0
        assert_eq!(add(h(0x3C00), h(0x4000)).to_bits(), 0x4200);
        // 0.5 + 0.25 = 0.75
        assert_eq!(add(h(0x3800), h(0x3400)).to_bits(), 0x3A00);
        // 0 + x and x + 0 preserve the nonzero operand
        assert_eq!(add(h(0x0000), h(0x3C00)).to_bits(), 0x3C00);
        assert_eq!(add(h(0x3C00), h(0x0000)).to_bits(), 0x3C00);
        // subnormal + subnormal stays exact
        assert_eq!(add(h(0x0001), h(0x0001)).to_bits(), 0x0002);
    }

    #[test]
    fn test_add_signed_zeros() {
        assert_eq!(add(h(0x8000), h(0x8000)).to_bits(), 0x8000);
        assert_eq!(add(h(0x0000), h(0x8000)).to_bits(), 0x0000);
        assert_eq!(
            add_with(
                h(0x0000),
                h(0x8000),
                ArithMode::Ieee,
                RoundingMode::TowardNegative
            )
            .unwrap()
            .to_bits(),
            0x8000
        );
    }

    #[test]
    fn test_add_infinities() {
        assert_eq!(add(h(0x7C00), h(0x3C00)).to_bits(), 0x7C00);
        assert_eq!(add(h(0x3C00), h(0x7C00)).to_bits(), 0x7C00);
        assert_eq!(add(h(0xFC00), h(0x7C00)).to_bits(), 0x7E00);
        assert_eq!(add(h(0x7C00), h(0xFC00)).to_bits(), 0x7E00);
        assert_eq!(add(h(0x7C00), h(0x7C00)).to_bits(), 0x7C00);
    }

    #[test]
    fn test_add_nan_absorbs() {
        assert_eq!(add(Half::QUIET_NAN, h(0x3C00)).to_bits(), 0x7E00);
        assert_eq!(add(h(0x3C00), Half::QUIET_NAN).to_bits(), 0x7E00);
    }

    #[test]
    fn test_add_overflow_saturates_to_infinity() {
        assert_eq!(add(Half::MAX, Half::MAX).to_bits(), 0x7C00);
        assert_eq!(add(Half::MIN, Half::MIN).to_bits(), 0xFC00);
    }

    #[test]
    fn test_add_exact_tie_rounds_to_even() {
        // Half(0.1) + Half(0.2): the widened sum ties exactly halfway
        let result = add(h(0x2E66), h(0x3266));
        assert_eq!(result.to_bits(), 0x34CC);
        let away = add_with(
            h(0x2E66),
            h(0x3266),
            ArithMode::Ieee,
            RoundingMode::NearestAway,
        )
        .unwrap();
        assert_eq!(away.to_bits(), 0x34CD);
    }

    #[test]
    fn test_sub_basic() {
        assert_eq!(sub(h(0x3C00), h(0x3800)).to_bits(), 0x3800); // 1.0 - 0.5
        assert_eq!(sub(h(0x3C00), h(0x3C00)).to_bits(), 0x0000); // 1.0 - 1.0
        assert_eq!(sub(h(0x3C00), h(0xBC00)).to_bits(), 0x4000); // 1.0 - -1.0
        assert_eq!(sub(h(0xBC00), h(0x3C00)).to_bits(), 0xC000); // -1.0 - 1.0
        assert_eq!(sub(h(0x0000), h(0x0000)).to_bits(), 0x0000);
        assert_eq!(sub(h(0x3C00), h(0x7C00)).to_bits(), 0xFC00); // 1.0 - inf
    }

    #[test]
    fn test_mul_basic() {
        assert_eq!(mul(h(0x4000), h(0x4200)).to_bits(), 0x4600); // 2*3=6
        assert_eq!(mul(h(0x3800), h(0x3800)).to_bits(), 0x3400); // 0.5*0.5
        assert_eq!(mul(h(0x3C00), h(0x0000)).to_bits(), 0x0000);
        // zero sign is the XOR of the operand signs
        assert_eq!(mul(h(0xBC00), h(0x0000)).to_bits(), 0x8000);
        assert_eq!(mul(h(0x8000), h(0x8000)).to_bits(), 0x0000);
    }

    #[test]
    fn test_mul_special_cases() {
        assert_eq!(mul(h(0x7C00), h(0x4000)).to_bits(), 0x7C00);
        assert_eq!(mul(h(0xFC00), h(0x4000)).to_bits(), 0xFC00);
        assert_eq!(mul(h(0x7C00), h(0xC000)).to_bits(), 0xFC00);
        // 0 * inf is indeterminate
        assert_eq!(mul(h(0x7C00), h(0x0000)).to_bits(), 0x7E00);
        assert_eq!(mul(h(0x8000), h(0x7C00)).to_bits(), 0x7E00);
        assert_eq!(mul(Half::QUIET_NAN, h(0x4000)).to_bits(), 0x7E00);
    }

    #[test]
    fn test_div_basic() {
        assert_eq!(div(h(0x4600), h(0x4000)).to_bits(), 0x4200); // 6/2=3
        assert_eq!(div(h(0x3C00), h(0x4000)).to_bits(), 0x3800); // 1/2=0.5
        assert_eq!(div(h(0x0000), h(0x3C00)).to_bits(), 0x0000);
        assert_eq!(div(h(0x8000), h(0x3C00)).to_bits(), 0x8000);
        assert_eq!(div(h(0x0000), h(0xBC00)).to_bits(), 0x8000);
    }

    #[test]
    fn test_div_special_cases() {
        assert_eq!(div(h(0x3C00), h(0x0000)).to_bits(), 0x7C00); // 1/0 = +inf
        assert_eq!(div(h(0xBC00), h(0x0000)).to_bits(), 0xFC00); // -1/0 = -inf
        assert_eq!(div(h(0x3C00), h(0x8000)).to_bits(), 0xFC00); // 1/-0 = -inf
        assert_eq!(div(h(0x0000), h(0x0000)).to_bits(), 0x7E00); // 0/0 = NaN
        assert_eq!(div(h(0x7C00), h(0x7C00)).to_bits(), 0x7E00); // inf/inf
        assert_eq!(div(h(0x7C00), h(0x4000)).to_bits(), 0x7C00); // inf/2
        assert_eq!(div(h(0x7C00), h(0xC000)).to_bits(), 0xFC00); // inf/-2
        assert_eq!(div(h(0x3C00), h(0x7C00)).to_bits(), 0x0000); // 1/inf = 0
        assert_eq!(div(h(0xBC00), h(0x7C00)).to_bits(), 0x8000); // -1/inf = -0
    }

    #[test]
    fn test_exact_mode_errors() {
        let exact = ArithMode::Exact;
        let rne = RoundingMode::NearestEven;

        assert_eq!(
            add_with(Half::QUIET_NAN, h(0x3C00), exact, rne),
            Err(ArithError::NanOperand { op: "add" })
        );
        assert!(matches!(
            add_with(h(0x7C00), h(0xFC00), exact, rne),
            Err(ArithError::InvalidOperation { op: "add", .. })
        ));
        assert!(matches!(
            mul_with(h(0x7C00), h(0x0000), exact, rne),
            Err(ArithError::InvalidOperation { op: "mul", .. })
        ));
        assert!(matches!(
            div_with(h(0x0000), h(0x0000), exact, rne),
            Err(ArithError::InvalidOperation { op: "div", .. })
        ));
        assert!(matches!(
            div_with(h(0x7C00), h(0xFC00), exact, rne),
            Err(ArithError::InvalidOperation { op: "div", .. })
        ));
        assert_eq!(
            div_with(h(0x3C00), h(0x0000), exact, rne),
            Err(ArithError::DivisionByZero { op: "div" })
        );
        // ordinary arithmetic still succeeds
        assert_eq!(add_with(h(0x3C00), h(0x4000), exact, rne).unwrap().to_bits(), 0x4200);
        assert_eq!(mul_with(h(0x4000), h(0x4200), exact, rne).unwrap().to_bits(), 0x4600);
    }

    #[test]
    fn test_exact_mode_strict_result_narrowing() {
        // 65504 + 65504 overflows the finite range
        assert!(matches!(
            add_with(Half::MAX, Half::MAX, ArithMode::Exact, RoundingMode::NearestEven),
            Err(ArithError::Convert(ConvertError::Overflow { .. }))
        ));
    }

    #[test]
    fn test_fast_mode_matches_ieee_for_ordinary_inputs() {
        let values = [0x3C00u16, 0x4000, 0x4200, 0xB800, 0x0001, 0x7BFF, 0x0000];
        for &x in &values {
            for &y in &values {
                let ieee = add(h(x), h(y));
                let fast =
                    add_with(h(x), h(y), ArithMode::Fast, RoundingMode::NearestEven).unwrap();
                assert_eq!(ieee.to_bits(), fast.to_bits(), "add {:#06x} {:#06x}", x, y);

                let ieee = mul(h(x), h(y));
                let fast =
                    mul_with(h(x), h(y), ArithMode::Fast, RoundingMode::NearestEven).unwrap();
                assert_eq!(ieee.to_bits(), fast.to_bits(), "mul {:#06x} {:#06x}", x, y);
            }
        }
        // fast mode handles specials through f32 arithmetic
        assert!(mul_with(h(0x7C00), h(0x0000), ArithMode::Fast, RoundingMode::NearestEven)
            .unwrap()
            .is_nan());
        assert_eq!(
            div_with(h(0x3C00), h(0x0000), ArithMode::Fast, RoundingMode::NearestEven)
                .unwrap()
                .to_bits(),
            0x7C00
        );
    }

    #[test]
    fn test_directed_rounding_in_arithmetic() {
        // 1.0 + 2^-12: the exact sum falls between 1.0 and 1.0+ulp
        let tiny = h(0x0C00); // 2^-12
        let up = add_with(Half::ONE, tiny, ArithMode::Ieee, RoundingMode::TowardPositive)
            .unwrap();
        assert_eq!(up.to_bits(), 0x3C01);
        let down = add_with(Half::ONE, tiny, ArithMode::Ieee, RoundingMode::TowardZero).unwrap();
        assert_eq!(down.to_bits(), 0x3C00);
    }

    #[test]
    fn test_equality() {
        assert!(eq(h(0x3C00), h(0x3C00)));
        assert!(eq(h(0x0000), h(0x8000)));
        assert!(eq(h(0x8000), h(0x0000)));
        assert!(!eq(Half::QUIET_NAN, Half::QUIET_NAN));
        assert!(!eq(Half::QUIET_NAN, h(0x3C00)));
        assert!(!eq(h(0x3C00), h(0x4000)));
        // operator form goes through the same semantics
        assert!(h(0x0000) == h(0x8000));
        assert!(Half::QUIET_NAN != Half::QUIET_NAN);
    }

    #[test]
    fn test_ordering() {
        assert!(lt(h(0x3C00), h(0x4000))); // 1 < 2
        assert!(!lt(h(0x4000), h(0x3C00)));
        assert!(lt(h(0xC000), h(0xBC00))); // -2 < -1
        assert!(lt(h(0xBC00), h(0x3C00))); // -1 < 1
        assert!(!lt(h(0x0000), h(0x8000)));
        assert!(!lt(h(0x8000), h(0x0000)));
        assert!(!lt(Half::QUIET_NAN, h(0x3C00)));
        assert!(!gt(Half::QUIET_NAN, h(0x3C00)));
        assert!(lt(Half::MIN, Half::MAX));
        assert!(lt(h(0x0001), h(0x0002))); // subnormals order by magnitude
        assert!(le(h(0x3C00), h(0x3C00)));
        assert!(ge(h(0x4000), h(0x3C00)));
        assert!(h(0x3C00) < h(0x4000));
        assert_eq!(
            Half::QUIET_NAN.partial_cmp(&h(0x3C00)),
            None
        );
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min(h(0x3C00), h(0x4000)).to_bits(), 0x3C00);
        assert_eq!(max(h(0x3C00), h(0x4000)).to_bits(), 0x4000);
        // single NaN is skipped, double NaN stays NaN
        assert_eq!(min(Half::QUIET_NAN, h(0x4000)).to_bits(), 0x4000);
        assert_eq!(min(h(0x4000), Half::QUIET_NAN).to_bits(), 0x4000);
        assert!(min(Half::QUIET_NAN, Half::QUIET_NAN).is_nan());
        assert!(max(Half::QUIET_NAN, Half::QUIET_NAN).is_nan());
        // signed zeros are distinguished
        assert_eq!(min(h(0x0000), h(0x8000)).to_bits(), 0x8000);
        assert_eq!(min(h(0x8000), h(0x0000)).to_bits(), 0x8000);
        assert_eq!(max(h(0x0000), h(0x8000)).to_bits(), 0x0000);
        assert_eq!(max(h(0x8000), h(0x0000)).to_bits(), 0x0000);
        assert_eq!(min(h(0xC000), h(0xBC00)).to_bits(), 0xC000);
        assert_eq!(max(h(0xC000), h(0xBC00)).to_bits(), 0xBC00);
    }
}
