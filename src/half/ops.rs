//! Standard operator impls for `Half`.
//!
//! The operators use the default modes (IEEE arithmetic,
//! round-to-nearest-even); callers that need another mode use the
//! `*_with` functions directly.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use super::arith;
use super::Half;
use crate::math;

impl Add for Half {
    type Output = Half;

    fn add(self, rhs: Half) -> Self::Output {
        arith::add(self, rhs)
    }
}

impl Sub for Half {
    type Output = Half;

    fn sub(self, rhs: Half) -> Self::Output {
        arith::sub(self, rhs)
    }
}

impl Mul for Half {
    type Output = Half;

    fn mul(self, rhs: Half) -> Self::Output {
        arith::mul(self, rhs)
    }
}

impl Div for Half {
    type Output = Half;

    fn div(self, rhs: Half) -> Self::Output {
        arith::div(self, rhs)
    }
}

impl Rem for Half {
    type Output = Half;

    fn rem(self, rhs: Half) -> Self::Output {
        math::fmod(self, rhs)
    }
}

impl Neg for Half {
    type Output = Half;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl AddAssign for Half {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Half {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl MulAssign for Half {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl DivAssign for Half {
    fn div_assign(&mut self, other: Self) {
        *self = *self / other;
    }
}

impl RemAssign for Half {
    fn rem_assign(&mut self, other: Self) {
        *self = *self % other;
    }
}
