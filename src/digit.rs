/*
    Digit backends
*/

use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::cast::ToPrimitive;
use rug::ops::Pow as RugPow;
use rug::Float as MpFloat;

use crate::{Error, Result};

/// Working precision, in bits, of the arbitrary-precision digit backend.
pub const MP_PREC: u32 = 128;

/// A mantissa digit.
///
/// The scalar abstraction of this library: a polynomial number is generic
/// over its digit type, and every series routine builds results out of
/// nothing but the operations below. The digit type chosen at construction
/// therefore propagates through all computations.
pub trait Digit:
    Clone
    + Debug
    + Display
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Converts a machine integer to a digit.
    fn from_i64(v: i64) -> Self;

    /// Parses a digit from its textual form.
    fn from_literal(s: &str) -> Result<Self>;

    /// Difference between 1 and the least representable value above 1.
    fn epsilon() -> Self;

    /// The constant pi.
    fn pi() -> Self;

    fn is_zero(&self) -> bool;

    fn abs(&self) -> Self;

    fn floor(&self) -> Self;

    fn sqrt(&self) -> Self;

    fn exp(&self) -> Self;

    fn ln(&self) -> Self;

    /// Complementary error function.
    fn erfc(&self) -> Self;

    /// Raises this digit to a real power.
    fn pow(&self, a: &Self) -> Self;

    /// The digit as a machine integer, if one represents it exactly.
    fn to_i64(&self) -> Option<i64>;

    /// The tolerance comparison underlying PN equality: equal digits are
    /// close, then `|a - b| <= abs_tol`, then `|a - b| <= rel_tol * max`.
    /// Backends whose tolerance types are incompatible with the value type
    /// report [`Error::TypeMismatch`]; both provided backends never do.
    fn is_close(&self, other: &Self, rel_tol: &Self, abs_tol: &Self) -> Result<bool> {
        if self == other {
            return Ok(true);
        }
        let diff = (self.clone() - other.clone()).abs();
        if diff.is_zero() || diff <= *abs_tol {
            return Ok(true);
        }
        let mut scale = self.abs();
        let other_abs = other.abs();
        if scale < other_abs {
            scale = other_abs;
        }
        Ok(diff <= rel_tol.clone() * scale)
    }

    /// Default comparison tolerance, `128 * epsilon`.
    fn default_tol() -> Self {
        Self::epsilon() * Self::from_i64(128)
    }

    /// Default chopping tolerance, `2^20 * epsilon`.
    fn chop_tol() -> Self {
        Self::epsilon() * Self::from_i64(1 << 20)
    }

    /// Replaces a digit within `tol` of zero by an exact zero.
    fn chop(&self, tol: &Self) -> Self {
        if self.abs() > *tol {
            self.clone()
        } else {
            Self::zero()
        }
    }
}

impl Digit for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_i64(v: i64) -> Self {
        v as f64
    }

    fn from_literal(s: &str) -> Result<Self> {
        s.parse::<f64>().map_err(|_| Error::Parse {
            input: s.to_string(),
            reason: "not a floating-point digit",
        })
    }

    fn epsilon() -> Self {
        f64::EPSILON
    }

    fn pi() -> Self {
        std::f64::consts::PI
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn abs(&self) -> Self {
        f64::abs(*self)
    }

    fn floor(&self) -> Self {
        f64::floor(*self)
    }

    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }

    fn exp(&self) -> Self {
        f64::exp(*self)
    }

    fn ln(&self) -> Self {
        f64::ln(*self)
    }

    fn erfc(&self) -> Self {
        libm::erfc(*self)
    }

    fn pow(&self, a: &Self) -> Self {
        f64::powf(*self, *a)
    }

    fn to_i64(&self) -> Option<i64> {
        ToPrimitive::to_i64(self)
    }
}

impl Digit for MpFloat {
    fn zero() -> Self {
        MpFloat::new(MP_PREC)
    }

    fn one() -> Self {
        MpFloat::with_val(MP_PREC, 1)
    }

    fn from_i64(v: i64) -> Self {
        MpFloat::with_val(MP_PREC, v)
    }

    fn from_literal(s: &str) -> Result<Self> {
        match MpFloat::parse(s) {
            Ok(p) => Ok(MpFloat::with_val(MP_PREC, p)),
            Err(_) => Err(Error::Parse {
                input: s.to_string(),
                reason: "not a floating-point digit",
            }),
        }
    }

    fn epsilon() -> Self {
        RugPow::pow(MpFloat::with_val(MP_PREC, 2), 1 - MP_PREC as i32)
    }

    fn pi() -> Self {
        MpFloat::with_val(MP_PREC, rug::float::Constant::Pi)
    }

    fn is_zero(&self) -> bool {
        MpFloat::is_zero(self)
    }

    fn abs(&self) -> Self {
        self.clone().abs()
    }

    fn floor(&self) -> Self {
        self.clone().floor()
    }

    fn sqrt(&self) -> Self {
        self.clone().sqrt()
    }

    fn exp(&self) -> Self {
        self.clone().exp()
    }

    fn ln(&self) -> Self {
        self.clone().ln()
    }

    fn erfc(&self) -> Self {
        self.clone().erfc()
    }

    fn pow(&self, a: &Self) -> Self {
        RugPow::pow(self.clone(), a)
    }

    fn to_i64(&self) -> Option<i64> {
        self.to_integer().and_then(|i| i.to_i64())
    }
}
