pub use crate::half::{
    ArithError, ArithMode, ConversionMode, ConvertError, Converter, FpClass, Half, RoundingMode,
};
pub use crate::{F16Config, F16Result, Float16Error};
