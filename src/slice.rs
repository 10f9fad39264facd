//! Batch operations over `Half` slices.
//!
//! These are plain folds over the scalar operators; the only extra rule
//! is that paired slices must have equal lengths, which is always
//! reported as an error rather than truncated or padded away.

use crate::half::{add, div, max, min, mul, sub, ConversionMode, ConvertError, Half, RoundingMode};
use crate::math;
use crate::{F16Result, Float16Error};

fn check_lengths(a: &[Half], b: &[Half]) -> F16Result<()> {
    if a.len() != b.len() {
        return Err(Float16Error::LengthMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    Ok(())
}

/// Element-wise addition of two equal-length slices.
pub fn add_slice(a: &[Half], b: &[Half]) -> F16Result<Vec<Half>> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(&x, &y)| add(x, y)).collect())
}

/// Element-wise subtraction of two equal-length slices.
pub fn sub_slice(a: &[Half], b: &[Half]) -> F16Result<Vec<Half>> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(&x, &y)| sub(x, y)).collect())
}

/// Element-wise multiplication of two equal-length slices.
pub fn mul_slice(a: &[Half], b: &[Half]) -> F16Result<Vec<Half>> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(&x, &y)| mul(x, y)).collect())
}

/// Element-wise division of two equal-length slices.
pub fn div_slice(a: &[Half], b: &[Half]) -> F16Result<Vec<Half>> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(&x, &y)| div(x, y)).collect())
}

/// Multiplies every element by `scalar`.
pub fn scale_slice(values: &[Half], scalar: Half) -> Vec<Half> {
    values.iter().map(|&x| mul(x, scalar)).collect()
}

/// Sums all elements, starting from +0. NaN elements propagate.
pub fn sum_slice(values: &[Half]) -> Half {
    values
        .iter()
        .fold(Half::POSITIVE_ZERO, |acc, &x| add(acc, x))
}

/// Dot product of two equal-length slices.
pub fn dot(a: &[Half], b: &[Half]) -> F16Result<Half> {
    check_lengths(a, b)?;
    let mut sum = Half::POSITIVE_ZERO;
    for (&x, &y) in a.iter().zip(b) {
        sum = add(sum, mul(x, y));
    }
    Ok(sum)
}

/// Euclidean (L2) norm of a slice.
pub fn norm2(values: &[Half]) -> Half {
    let mut sum_of_squares = Half::POSITIVE_ZERO;
    for &x in values {
        sum_of_squares = add(sum_of_squares, mul(x, x));
    }
    math::sqrt(sum_of_squares)
}

/// Summary statistics over a slice.
///
/// `min` and `max` skip NaN elements the way scalar min/max do; `sum`
/// and `mean` propagate NaN. An empty slice has NaN min/max/mean and a
/// +0 sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceStats {
    pub len: usize,
    pub min: Half,
    pub max: Half,
    pub sum: Half,
    pub mean: Half,
}

pub fn slice_stats(values: &[Half]) -> SliceStats {
    if values.is_empty() {
        return SliceStats {
            len: 0,
            min: Half::QUIET_NAN,
            max: Half::QUIET_NAN,
            sum: Half::POSITIVE_ZERO,
            mean: Half::QUIET_NAN,
        };
    }
    let mut lowest = Half::QUIET_NAN;
    let mut highest = Half::QUIET_NAN;
    let mut sum = Half::POSITIVE_ZERO;
    for &x in values {
        lowest = min(lowest, x);
        highest = max(highest, x);
        sum = add(sum, x);
    }
    let mean = div(sum, Half::from_i64(values.len() as i64));
    SliceStats {
        len: values.len(),
        min: lowest,
        max: highest,
        sum,
        mean,
    }
}

/// Converts a slice of `f32` values with IEEE semantics.
pub fn f32s_to_halfs(values: &[f32]) -> Vec<Half> {
    values.iter().map(|&x| Half::from_f32(x)).collect()
}

/// Converts a slice of `f32` values under explicit modes, collecting
/// the index and cause of every element that fails.
pub fn f32s_to_halfs_with(
    values: &[f32],
    conversion: ConversionMode,
    rounding: RoundingMode,
) -> (Vec<Half>, Vec<(usize, ConvertError)>) {
    let mut out = Vec::with_capacity(values.len());
    let mut errors = Vec::new();
    for (index, &value) in values.iter().enumerate() {
        match Half::from_f32_with(value, conversion, rounding) {
            Ok(half) => out.push(half),
            Err(error) => {
                out.push(Half::POSITIVE_ZERO);
                errors.push((index, error));
            }
        }
    }
    (out, errors)
}

pub fn halfs_to_f32s(values: &[Half]) -> Vec<f32> {
    values.iter().map(|&x| x.to_f32()).collect()
}

pub fn f64s_to_halfs(values: &[f64]) -> Vec<Half> {
    values.iter().map(|&x| Half::from_f64(x)).collect()
}

pub fn halfs_to_f64s(values: &[Half]) -> Vec<f64> {
    values.iter().map(|&x| x.to_f64()).collect()
}
