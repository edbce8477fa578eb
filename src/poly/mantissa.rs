/*
    Mantissa engine: fixed-length truncated power-series algebra
*/

use crate::digit::Digit;
use crate::{Error, Result};

/// Truncated product of two coefficient slices:
/// `y[k] = sum_{j=0..=k} x[k-j] * h[j]`, for `k < n`.
pub fn series_mul<D: Digit>(x: &[D], h: &[D], n: usize) -> Vec<D> {
    let mut y = vec![D::zero(); n];
    for k in 0..n {
        for j in 0..=k {
            if k - j < x.len() && j < h.len() {
                y[k] = y[k].clone() + x[k - j].clone() * h[j].clone();
            }
        }
    }
    y
}

/// Reciprocal series by Newton doubling.
///
/// Works at an internal length rounded up to a power of two; each round
/// doubles the number of correct coefficients, revealing the next half with
/// two convolution passes over the half already known.
pub fn series_inv<D: Digit>(x: &[D], n: usize) -> Result<Vec<D>> {
    if x.is_empty() || x[0].is_zero() {
        return Err(Error::Domain {
            op: "series_inv",
            reason: "leading coefficient is zero".to_string(),
        });
    }

    let m = n.next_power_of_two();
    let mut xp = x.to_vec();
    xp.resize(m, D::zero());

    let mut v = vec![D::zero(); m];
    let mut y = vec![D::zero(); m];
    y[0] = D::one() / x[0].clone();

    let mut nw = 1;
    while nw < m {
        for k in 0..nw {
            v[k] = D::zero();
            for j in 0..nw {
                v[k] = v[k].clone() + y[j].clone() * xp[k + nw - j].clone();
            }
        }
        for k in 0..nw {
            y[k + nw] = D::zero();
            for j in 0..=k {
                y[k + nw] = y[k + nw].clone() - y[k - j].clone() * v[j].clone();
            }
        }
        nw *= 2;
    }

    y.truncate(n);
    Ok(y)
}

/// Series square root by the Newton iteration
/// `outp <- (outp + x * inv(outp)) / 2` at doubling precision.
pub fn series_sqrt<D: Digit>(x: &[D], n: usize) -> Result<Vec<D>> {
    if x.is_empty() || !(x[0] > D::zero()) {
        return Err(Error::Domain {
            op: "series_sqrt",
            reason: "leading coefficient is not positive".to_string(),
        });
    }

    let m = n.next_power_of_two().max(2);
    let mut xp = x.to_vec();
    xp.resize(m, D::zero());

    let mut outp = vec![D::zero(); m];
    outp[0] = x[0].sqrt();
    let two = D::from_i64(2);

    let mut nw = 2;
    while nw <= m {
        let recip = series_inv(&outp, nw)?;
        let y = series_mul(&recip, &xp, nw);
        let half = nw / 2;
        for j in 0..half {
            outp[j] = (outp[j].clone() + y[j].clone()) / two.clone();
        }
        for j in half..nw {
            outp[j] = y[j].clone() / two.clone();
        }
        nw *= 2;
    }

    outp.truncate(n);
    Ok(outp)
}

/// Raises a series to a real power `a` via the generalized-binomial
/// recurrence `outp[k] = (1/x[0]) sum_j x[j]*outp[k-j]*((a+1)*j/k - 1)`.
pub fn series_pow<D: Digit>(x: &[D], a: &D, n: usize) -> Vec<D> {
    let mut outp = vec![D::zero(); n];
    if n == 0 || x.is_empty() {
        return outp;
    }
    outp[0] = x[0].pow(a);
    let a1 = a.clone() + D::one();
    for k in 1..n {
        let kd = D::from_i64(k as i64);
        for j in 1..=k {
            if j >= x.len() {
                break;
            }
            let jd = D::from_i64(j as i64);
            let factor = a1.clone() * jd / kd.clone() - D::one();
            outp[k] = outp[k].clone() + x[j].clone() * outp[k - j].clone() * factor;
        }
        outp[k] = outp[k].clone() / x[0].clone();
    }
    outp
}

/// Series exponential:
/// `outp[k] = sum_{j=1..k-1} x[k-j]*outp[j]*(1 - j/k) + x[k]*exp(x[0])`.
pub fn series_exp<D: Digit>(x: &[D], n: usize) -> Vec<D> {
    let mut outp = vec![D::zero(); n];
    if n == 0 || x.is_empty() {
        return outp;
    }
    let exp_x0 = x[0].exp();
    for (k, o) in outp.iter_mut().enumerate() {
        if k < x.len() {
            *o = exp_x0.clone() * x[k].clone();
        }
    }
    outp[0] = exp_x0;
    for k in 1..n {
        let kd = D::from_i64(k as i64);
        for j in 1..k {
            if k - j >= x.len() {
                continue;
            }
            let jd = D::from_i64(j as i64);
            outp[k] = outp[k].clone()
                + x[k - j].clone() * outp[j].clone() * (D::one() - jd / kd.clone());
        }
    }
    outp
}

/// Series logarithm, inverse of [`series_exp`].
pub fn series_ln<D: Digit>(x: &[D], n: usize) -> Result<Vec<D>> {
    if x.is_empty() || !(x[0] > D::zero()) {
        return Err(Error::Domain {
            op: "series_ln",
            reason: "leading coefficient is not positive".to_string(),
        });
    }

    let mut outp = x.to_vec();
    outp.resize(n, D::zero());
    outp[0] = x[0].ln();
    for k in 1..n {
        let kd = D::from_i64(k as i64);
        for j in 1..k {
            if j >= x.len() {
                break;
            }
            let jd = D::from_i64(j as i64);
            outp[k] = outp[k].clone()
                - x[j].clone() * outp[k - j].clone() * (D::one() - jd / kd.clone());
        }
        outp[k] = outp[k].clone() / x[0].clone();
    }
    Ok(outp)
}

/// Horner evaluation of `sum_k a_k * val^{-k}`.
pub fn series_eval<D: Digit>(x: &[D], val: &D) -> D {
    let inv = D::one() / val.clone();
    let mut y = match x.last() {
        Some(d) => d.clone(),
        None => return D::zero(),
    };
    for d in x.iter().rev().skip(1) {
        y = y * inv.clone() + d.clone();
    }
    y
}
