/*
    Definition of `PolyNum<D, N>`
*/

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::digit::Digit;
use crate::poly::mantissa::{
    series_eval, series_exp, series_inv, series_ln, series_mul, series_pow, series_sqrt,
};
use crate::{Error, Result};

/// A polynomial number: a truncated power series in `p^-1` with exactly `N`
/// mantissa digits, scaled by an integer power of the operator `p`.
///
/// `D` is the digit type and `N` the mantissa length; both are fixed by the
/// type, so mixed-length arithmetic cannot be expressed. Values are
/// immutable by convention: every operation returns a new PN.
///
/// Invariant: the leading mantissa digit is nonzero, or the value is zero.
/// Operations that produce zero leave the exponent untouched.
#[derive(Clone, Debug)]
pub struct PolyNum<D: Digit, const N: usize> {
    mantissa: Vec<D>, // always exactly N digits
    exponent: i64,
}

impl<D: Digit, const N: usize> PolyNum<D, N> {
    // a PN needs at least one mantissa digit; evaluated at monomorphization
    const VALID: () = assert!(N >= 1, "PolyNum requires at least one mantissa digit");

    /// Constructs zero.
    pub fn new() -> Self {
        let () = Self::VALID;
        Self {
            mantissa: vec![D::zero(); N],
            exponent: 0,
        }
    }

    /// Constructs a PN from mantissa digits and an exponent. Short input is
    /// right-padded with zeros, long input truncated to `N`; the result is
    /// normalized.
    pub fn from_mantissa(digits: Vec<D>, exponent: i64) -> Self {
        let () = Self::VALID;
        let mut mantissa = digits;
        mantissa.truncate(N);
        mantissa.resize(N, D::zero());
        let mut pn = Self { mantissa, exponent };
        pn.normalize();
        pn
    }

    /// Constructs a single-digit PN with exponent 0.
    pub fn from_scalar(d: D) -> Self {
        Self::from_mantissa(vec![d], 0)
    }

    /// Copies this PN with its exponent shifted by `delta`.
    pub fn with_exponent_add(&self, delta: i64) -> Self {
        Self {
            mantissa: self.mantissa.clone(),
            exponent: self.exponent + delta,
        }
    }

    /// The mantissa digits, leading digit first.
    pub fn mantissa(&self) -> &[D] {
        &self.mantissa
    }

    /// The power of `p` scaling the mantissa.
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// True for the zero PN.
    pub fn is_zero(&self) -> bool {
        self.mantissa[0].is_zero()
    }

    // Re-establishes the leading-nonzero invariant: shift the mantissa left
    // past leading zeros and decrement the exponent accordingly. An all-zero
    // mantissa keeps its exponent.
    fn normalize(&mut self) {
        if !self.mantissa[0].is_zero() {
            return;
        }
        if let Some(first) = self.mantissa.iter().position(|d| !d.is_zero()) {
            self.mantissa.rotate_left(first);
            self.exponent -= first as i64;
        }
    }

    // Shifts the mantissa right by `r` digits, dropping the tail.
    fn shift_right(&mut self, r: usize) {
        let r = r.min(N);
        self.mantissa.rotate_right(r);
        for d in &mut self.mantissa[..r] {
            *d = D::zero();
        }
    }

    fn add_pn(&self, other: &Self) -> Self {
        if other.is_zero() {
            return self.clone();
        }
        if self.is_zero() {
            return other.clone();
        }
        let (a1, a2) = if other.exponent <= self.exponent {
            (self, other)
        } else {
            (other, self)
        };
        let diff = a1.exponent - a2.exponent;
        if diff > N as i64 {
            // the smaller-exponent operand falls entirely off the mantissa
            return a1.clone();
        }
        let mut aligned = a2.clone();
        aligned.shift_right(diff as usize);
        let mantissa = a1
            .mantissa
            .iter()
            .zip(aligned.mantissa.iter())
            .map(|(a, b)| a.clone() + b.clone())
            .collect();
        Self::from_mantissa(mantissa, a1.exponent)
    }

    fn mul_pn(&self, other: &Self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        if other.is_zero() {
            return Self::new();
        }
        let m = series_mul(&self.mantissa, &other.mantissa, N);
        Self::from_mantissa(m, self.exponent + other.exponent)
    }

    /// Divides by `other`, failing with [`Error::DivisionByZero`] on a zero
    /// divisor. The `/` operator panics instead, like integer division.
    pub fn checked_div(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(self.clone());
        }
        let inv = series_inv(&other.mantissa, N)?;
        let m = series_mul(&self.mantissa, &inv, N);
        Ok(Self::from_mantissa(m, self.exponent - other.exponent))
    }

    /// The multiplicative inverse `1 / self`.
    pub fn recip(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let inv = series_inv(&self.mantissa, N)?;
        Ok(Self::from_mantissa(inv, -self.exponent))
    }

    /// Raises to a real power.
    ///
    /// With `a == 0` or a zero base the result is the single-digit `m0^a`,
    /// keeping the digit backend's own `0^0` convention. A nonzero exponent
    /// requires an integral `a`, otherwise [`Error::InvalidExponent`].
    pub fn pow(&self, a: &D) -> Result<Self> {
        if a.is_zero() || self.is_zero() {
            return Ok(Self::from_scalar(self.mantissa[0].pow(a)));
        }
        let exponent = if self.exponent == 0 {
            0
        } else {
            match integral(a) {
                Some(ai) => self.exponent * ai,
                None => {
                    return Err(Error::InvalidExponent {
                        op: "pow",
                        exponent: self.exponent,
                    })
                }
            }
        };
        let m = series_pow(&self.mantissa, a, N);
        Ok(Self::from_mantissa(m, exponent))
    }

    /// Integer-power convenience wrapper around [`PolyNum::pow`].
    pub fn powi(&self, a: i64) -> Self {
        // integral powers never reach the InvalidExponent branch
        match self.pow(&D::from_i64(a)) {
            Ok(v) => v,
            Err(_) => unreachable!(),
        }
    }

    /// Series square root. The exponent must be even (it halves) and the
    /// leading digit positive.
    pub fn sqrt(&self) -> Result<Self> {
        if self.exponent % 2 != 0 {
            return Err(Error::InvalidExponent {
                op: "sqrt",
                exponent: self.exponent,
            });
        }
        let m = series_sqrt(&self.mantissa, N)?;
        Ok(Self::from_mantissa(m, self.exponent / 2))
    }

    /// Series exponential, defined for exponents `<= 0`.
    ///
    /// A strictly positive exponent would need the leftward-infinite part of
    /// the series and is rejected rather than silently miscomputed. A
    /// negative exponent shifts the mantissa right first; the result has
    /// exponent 0.
    pub fn exp(&self) -> Result<Self> {
        if self.exponent > 0 {
            return Err(Error::NotImplemented(format!(
                "exp of a PN with positive exponent {}",
                self.exponent
            )));
        }
        if self.exponent == 0 {
            return Ok(Self::from_mantissa(series_exp(&self.mantissa, N), 0));
        }
        let mut arg = self.clone();
        arg.shift_right((-self.exponent) as usize);
        Ok(Self::from_mantissa(series_exp(&arg.mantissa, N), 0))
    }

    /// Exponential combined with an integer-sample pure delay:
    /// `exp(self + K*h*pz) * p^(-K)` where `K = floor(t0 / h)` and `pz` is
    /// the discrete Heaviside operator. `K == 0` reduces to [`PolyNum::exp`].
    pub fn exp_shifted(&self, pz: &Self, t0: &D, h: &D) -> Result<Self> {
        let k = (t0.clone() / h.clone())
            .floor()
            .to_i64()
            .ok_or_else(|| Error::Domain {
                op: "exp_shifted",
                reason: "delay/step ratio is not representable as an integer".to_string(),
            })?;
        if k == 0 {
            return self.exp();
        }
        let kh = D::from_i64(k) * h.clone();
        let arg = self.clone() + pz.clone() * kh;
        Ok(arg.exp()?.with_exponent_add(-k))
    }

    /// Series logarithm; the exponent must be exactly 0.
    pub fn ln(&self) -> Result<Self> {
        if self.exponent != 0 {
            return Err(Error::Domain {
                op: "ln",
                reason: format!("exponent {} is nonzero", self.exponent),
            });
        }
        Ok(Self::from_mantissa(series_ln(&self.mantissa, N)?, 0))
    }

    /// Digit-wise closeness after exponent alignment.
    pub fn is_close(&self, other: &Self, rel_tol: &D, abs_tol: &D) -> Result<bool> {
        if self.is_zero() && other.is_zero() {
            return Ok(true);
        }
        let (a1, a2) = if other.exponent <= self.exponent {
            (self, other)
        } else {
            (other, self)
        };
        let aligned;
        let a2 = if a2.exponent == a1.exponent {
            a2
        } else {
            let mut s = a2.clone();
            s.shift_right((a1.exponent - a2.exponent) as usize);
            aligned = s;
            &aligned
        };
        for (a, b) in a1.mantissa.iter().zip(a2.mantissa.iter()) {
            if !a.is_close(b, rel_tol, abs_tol)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// [`PolyNum::is_close`] with the default `128 * epsilon` tolerances.
    pub fn approx_eq(&self, other: &Self) -> bool {
        let tol = D::default_tol();
        self.is_close(other, &tol, &tol).unwrap_or(false)
    }

    /// True if every mantissa digit is `>= 0` (the operational partial
    /// order on PNs).
    pub fn is_nonnegative(&self) -> bool {
        self.is_zero() || self.mantissa.iter().all(|d| *d >= D::zero())
    }

    /// `self <= other` in the partial order. Some pairs are incomparable:
    /// `partial_le` and `partial_ge` can both be false.
    pub fn partial_le(&self, other: &Self) -> bool {
        (other.clone() - self.clone()).is_nonnegative()
    }

    /// `self >= other` in the partial order.
    pub fn partial_ge(&self, other: &Self) -> bool {
        (self.clone() - other.clone()).is_nonnegative()
    }

    /// Digit-wise absolute value.
    pub fn abs(&self) -> Self {
        Self {
            mantissa: self.mantissa.iter().map(|d| d.abs()).collect(),
            exponent: self.exponent,
        }
    }

    /// Zeroes digits within the default `2^20 * epsilon` tolerance of zero,
    /// then renormalizes. Useful after long float computations whose small
    /// digits are pure rounding noise.
    pub fn chop(&self) -> Self {
        self.chop_with(&D::chop_tol())
    }

    /// [`PolyNum::chop`] with an explicit tolerance.
    pub fn chop_with(&self, tol: &D) -> Self {
        Self::from_mantissa(
            self.mantissa.iter().map(|d| d.chop(tol)).collect(),
            self.exponent,
        )
    }

    /// The `k`-th sample of the value normalized to exponent 0. Positive
    /// exponents have no sample representation.
    pub fn sample(&self, index: usize) -> Result<D> {
        if self.exponent > 0 {
            return Err(Error::InvalidState(format!(
                "exponent {} is positive, samples are undefined",
                self.exponent
            )));
        }
        if index >= N {
            return Err(Error::InvalidState(format!(
                "sample index {index} out of range 0..{N}"
            )));
        }
        let i = index as i64 + self.exponent;
        if i < 0 {
            Ok(D::zero())
        } else {
            Ok(self.mantissa[i as usize].clone())
        }
    }

    /// All `N` samples normalized to exponent 0: `-exponent` zeros followed
    /// by the surviving mantissa digits.
    pub fn samples(&self) -> Result<Vec<D>> {
        if self.exponent > 0 {
            return Err(Error::InvalidState(format!(
                "exponent {} is positive, samples are undefined",
                self.exponent
            )));
        }
        let lead = (-self.exponent).min(N as i64) as usize;
        let mut out = vec![D::zero(); lead];
        out.extend(self.mantissa[..N - lead].iter().cloned());
        Ok(out)
    }

    /// Evaluates the PN at a digit value: Horner on the mantissa in
    /// `val^-1`, times `val^exponent`.
    pub fn eval(&self, val: &D) -> D {
        if self.is_zero() {
            return D::zero();
        }
        let y = series_eval(&self.mantissa, val);
        if self.exponent == 0 {
            return y;
        }
        let mut scale = val.clone();
        for _ in 1..self.exponent.abs() {
            scale = scale * val.clone();
        }
        if self.exponent < 0 {
            y / scale
        } else {
            y * scale
        }
    }

    /// Evaluates the PN at another PN, substituting `val` for `p`.
    pub fn eval_pn(&self, val: &Self) -> Result<Self> {
        if self.is_zero() {
            return Ok(Self::new());
        }
        let inv = val.recip()?;
        let mut y = Self::from_scalar(self.mantissa[N - 1].clone());
        for d in self.mantissa.iter().rev().skip(1) {
            y = y * inv.clone() + Self::from_scalar(d.clone());
        }
        if self.exponent != 0 {
            y = y * val.powi(self.exponent);
        }
        Ok(y)
    }

    /// The discrete trapezoidal-integration Heaviside kernel
    /// `(~2~,-4~4~-4~4~...~)`; divided by the sampling period it
    /// approximates the operator `p`.
    pub fn trapezoid_kernel() -> Self {
        let () = Self::VALID;
        let mantissa = (0..N)
            .map(|i| {
                D::from_i64(if i == 0 {
                    2
                } else if i % 2 == 1 {
                    -4
                } else {
                    4
                })
            })
            .collect();
        Self {
            mantissa,
            exponent: 0,
        }
    }

    /// The flat unit-step kernel `(~1~,2~2~2~...~)`, companion of
    /// [`PolyNum::trapezoid_kernel`].
    pub fn unit_step_kernel() -> Self {
        let () = Self::VALID;
        let mut mantissa = vec![D::from_i64(2); N];
        mantissa[0] = D::one();
        Self {
            mantissa,
            exponent: 0,
        }
    }
}

fn integral<D: Digit>(a: &D) -> Option<i64> {
    if a.floor() == *a {
        a.to_i64()
    } else {
        None
    }
}

impl<D: Digit, const N: usize> Default for PolyNum<D, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digit, const N: usize> PartialEq for PolyNum<D, N> {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl<D: Digit, const N: usize> Neg for PolyNum<D, N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            mantissa: self.mantissa.into_iter().map(|d| -d).collect(),
            exponent: self.exponent,
        }
    }
}

impl<D: Digit, const N: usize> Neg for &PolyNum<D, N> {
    type Output = PolyNum<D, N>;

    fn neg(self) -> PolyNum<D, N> {
        -self.clone()
    }
}

impl<D: Digit, const N: usize> Add for PolyNum<D, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.add_pn(&rhs)
    }
}

impl<D: Digit, const N: usize> Add for &PolyNum<D, N> {
    type Output = PolyNum<D, N>;

    fn add(self, rhs: Self) -> PolyNum<D, N> {
        self.add_pn(rhs)
    }
}

impl<D: Digit, const N: usize> Sub for PolyNum<D, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.add_pn(&-rhs)
    }
}

impl<D: Digit, const N: usize> Sub for &PolyNum<D, N> {
    type Output = PolyNum<D, N>;

    fn sub(self, rhs: Self) -> PolyNum<D, N> {
        self.add_pn(&-rhs.clone())
    }
}

impl<D: Digit, const N: usize> Mul for PolyNum<D, N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.mul_pn(&rhs)
    }
}

impl<D: Digit, const N: usize> Mul for &PolyNum<D, N> {
    type Output = PolyNum<D, N>;

    fn mul(self, rhs: Self) -> PolyNum<D, N> {
        self.mul_pn(rhs)
    }
}

impl<D: Digit, const N: usize> Div for PolyNum<D, N> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        match self.checked_div(&rhs) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<D: Digit, const N: usize> Div for &PolyNum<D, N> {
    type Output = PolyNum<D, N>;

    fn div(self, rhs: Self) -> PolyNum<D, N> {
        match self.checked_div(rhs) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

// Scalar right-hand operands.

impl<D: Digit, const N: usize> Add<D> for PolyNum<D, N> {
    type Output = Self;

    fn add(self, rhs: D) -> Self {
        self.add_pn(&Self::from_scalar(rhs))
    }
}

impl<D: Digit, const N: usize> Sub<D> for PolyNum<D, N> {
    type Output = Self;

    fn sub(self, rhs: D) -> Self {
        self.add_pn(&Self::from_scalar(-rhs))
    }
}

impl<D: Digit, const N: usize> Mul<D> for PolyNum<D, N> {
    type Output = Self;

    fn mul(self, rhs: D) -> Self {
        if self.is_zero() {
            return self;
        }
        if rhs.is_zero() {
            return Self::new();
        }
        Self::from_mantissa(
            self.mantissa.iter().map(|d| d.clone() * rhs.clone()).collect(),
            self.exponent,
        )
    }
}

impl<D: Digit, const N: usize> Div<D> for PolyNum<D, N> {
    type Output = Self;

    fn div(self, rhs: D) -> Self {
        if rhs.is_zero() {
            panic!("{}", Error::DivisionByZero);
        }
        Self::from_mantissa(
            self.mantissa.iter().map(|d| d.clone() / rhs.clone()).collect(),
            self.exponent,
        )
    }
}

/// Double-precision PNs with 32 mantissa digits.
pub type PolyNum32 = PolyNum<f64, 32>;

/// Double-precision PNs with 64 mantissa digits.
pub type PolyNum64 = PolyNum<f64, 64>;

/// Arbitrary-precision PNs with 64 mantissa digits.
pub type BigPolyNum = PolyNum<rug::Float, 64>;
