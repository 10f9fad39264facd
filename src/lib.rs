//! IEEE 754 half-precision (binary16) arithmetic in software.
//!
//! The [`Half`] type stores the raw 16-bit pattern and converts
//! losslessly to `f32`/`f64`; narrowing back supports five rounding
//! modes and a strict conversion policy. Arithmetic runs under three
//! fidelity modes: plain IEEE, a fast path that skips the special-case
//! ladder, and an exact mode that turns silent NaN/infinity production
//! into typed errors.

use std::fmt::{Display, Formatter};

pub mod half;
pub mod log;
pub mod math;
pub mod prelude;
pub mod slice;

pub use half::{
    ArithError, ArithMode, ConversionMode, ConvertError, Converter, FpClass, Half, RoundingMode,
};

/// Crate-level error, wrapping the conversion and arithmetic errors and
/// the batch-layer length check.
#[derive(Debug, Clone, PartialEq)]
pub enum Float16Error {
    Convert(ConvertError),
    Arith(ArithError),
    LengthMismatch { expected: usize, got: usize },
}

impl Display for Float16Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Float16Error::Convert(e) => write!(f, "Conversion error: {}", e),
            Float16Error::Arith(e) => write!(f, "Arithmetic error: {}", e),
            Float16Error::LengthMismatch { expected, got } => {
                write!(f, "Slice length mismatch: expected {}, got {}", expected, got)
            }
        }
    }
}

impl std::error::Error for Float16Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Float16Error::Convert(e) => Some(e),
            Float16Error::Arith(e) => Some(e),
            Float16Error::LengthMismatch { .. } => None,
        }
    }
}

impl From<ConvertError> for Float16Error {
    fn from(error: ConvertError) -> Self {
        Float16Error::Convert(error)
    }
}

impl From<ArithError> for Float16Error {
    fn from(error: ArithError) -> Self {
        Float16Error::Arith(error)
    }
}

pub type F16Result<T> = Result<T, Float16Error>;

/// Immutable bundle of default modes.
///
/// Bind one of these at startup (or use [`F16Config::default`], which
/// matches the compiled-in defaults) and pass its parts at call sites;
/// there is no global mutable mode state anywhere in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct F16Config {
    pub conversion: ConversionMode,
    pub rounding: RoundingMode,
    pub arithmetic: ArithMode,
}

impl F16Config {
    pub fn new(
        conversion: ConversionMode,
        rounding: RoundingMode,
        arithmetic: ArithMode,
    ) -> F16Config {
        F16Config {
            conversion,
            rounding,
            arithmetic,
        }
    }

    /// The converter view of this configuration.
    pub fn converter(&self) -> Converter {
        Converter::new(self.conversion, self.rounding)
    }
}
