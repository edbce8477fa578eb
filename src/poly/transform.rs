/*
    Inverse-transform series summation
*/

use crate::digit::Digit;
use crate::poly::number::PolyNum;
use crate::{Error, Result};

// Running state of the local-maximum truncation heuristic: a three-slot
// ring of term magnitudes detects local maxima; once maxima decay
// geometrically below the running sum times epsilon (or the series goes
// quiet for N/4 terms), summation stops and the tail is extrapolated.
struct TailGauge<D: Digit> {
    ring: [D; 3],
    max_term: D,
    max_local: D,
    q_local: D,
    k_local: usize,
    dk_local: i64,
    stop: bool,
}

impl<D: Digit> TailGauge<D> {
    // `slot` is the ring position of the first partial sum's magnitude,
    // one behind the first observed term index.
    fn new(first_abs: D, slot: usize) -> Self {
        let zero = D::zero();
        let mut ring = [zero.clone(), zero.clone(), zero.clone()];
        ring[slot % 3] = first_abs;
        Self {
            ring,
            max_term: zero.clone(),
            max_local: zero.clone(),
            q_local: zero,
            k_local: 0,
            dk_local: -1,
            stop: false,
        }
    }

    // Feeds |a_k| before the term is added to `sum`.
    fn observe(&mut self, k: usize, abs_ak: &D, sum_abs: &D, span: usize) {
        if *abs_ak > self.max_term {
            self.max_term = abs_ak.clone();
        }
        self.ring[(k + 1) % 3] = abs_ak.clone();
        if self.ring[(k + 2) % 3] < self.ring[k % 3] && self.ring[k % 3] >= self.ring[(k + 1) % 3]
        {
            if self.dk_local < 0 {
                self.max_local = self.ring[k % 3].clone();
                self.k_local = k;
                self.dk_local = 0;
            } else {
                self.q_local = self.ring[k % 3].clone() / self.max_local.clone();
                self.max_local = self.ring[k % 3].clone();
                self.dk_local = (k - self.k_local) as i64;
                self.k_local = k;
            }
            let eps = D::epsilon();
            let threshold = sum_abs.clone() * eps;
            self.stop = (self.dk_local > 0
                && self.q_local < D::one()
                && self.max_local < threshold)
                || (k > self.k_local + span && *abs_ak < threshold);
        }
    }

    // Tail estimate after the last summed term |a_k|: geometric
    // extrapolation of the local-maxima decay when one was observed
    // recently, the last magnitude otherwise.
    fn tail(&self, k: usize, abs_ak: D, span: usize) -> D {
        if k <= self.k_local + span && self.dk_local > 0 && self.q_local < D::one() {
            let steps = D::from_i64((k - self.k_local) as i64) / D::from_i64(self.dk_local);
            self.max_local.clone() * self.q_local.pow(&steps)
        } else {
            abs_ak
        }
    }
}

impl<D: Digit, const N: usize> PolyNum<D, N> {
    /// Numerical inverse transform at time `t`, reading the PN as a
    /// transform over the operator `p = (~1~0~)`.
    ///
    /// Sums `sum_k m[k] * t^(k - exponent - 1) / (k - exponent - 1)!` and
    /// returns the value together with a truncation-error estimate from the
    /// local-maximum heuristic. Negative `t` yields `(0, 0)`; `t == 0` is
    /// treated as an infinitesimal positive instant. The exponent must be
    /// negative, otherwise the transform has no function counterpart and
    /// [`Error::Domain`] is raised.
    pub fn inv_transform(&self, t: &D) -> Result<(D, D)> {
        let ex = self.exponent();
        if ex >= 0 {
            return Err(Error::Domain {
                op: "inv_transform",
                reason: format!("exponent {ex} is not negative, no inverse transform exists"),
            });
        }
        let zero = D::zero();
        if *t < zero {
            return Ok((zero.clone(), zero));
        }
        let t = if t.is_zero() {
            // 0 means 0+
            D::epsilon() / D::from_i64(10).pow(&D::from_i64(24))
        } else {
            t.clone()
        };

        let m = self.mantissa();
        let span = N / 4;

        // weight of the first term, t^(-ex-1) / (-ex-1)!
        let mut wk = D::one();
        for k in 1..=(-ex - 1) {
            wk = wk * t.clone() / D::from_i64(k);
        }

        let mut out = m[0].clone() * wk.clone();
        let mut gauge = TailGauge::new(out.abs(), 0);
        let mut abs_ak;
        let mut k: usize = 0;
        loop {
            wk = wk * t.clone() / D::from_i64(k as i64 - ex);
            let ak = m[k + 1].clone() * wk.clone();
            abs_ak = ak.abs();
            gauge.observe(k, &abs_ak, &out.abs(), span);
            out = out + ak;
            k += 1;
            if k >= N - 1 || gauge.stop {
                break;
            }
        }

        let err = gauge.tail(k, abs_ak, span) + (gauge.max_term.clone() + out.clone()) * D::epsilon();
        Ok((out, err))
    }

    /// Numerical inverse transform of `exp(-b0 * sqrt(p)) * self` at time
    /// `t`, reading the PN as a transform over `sqrt(p) = (~1~0~)`.
    ///
    /// The terms are built from the two-slot recurrence over the heat-kernel
    /// pair `exp(-b0^2/(4t)) / sqrt(pi*t)` and `erfc(b0 / (2*sqrt(t)))`.
    /// Same return value and truncation heuristic as
    /// [`PolyNum::inv_transform`].
    pub fn inv_transform_exp_sqrt(&self, t: &D, b0: &D) -> Result<(D, D)> {
        let ex = self.exponent();
        if ex >= 0 {
            return Err(Error::Domain {
                op: "inv_transform_exp_sqrt",
                reason: format!("exponent {ex} is not negative, no inverse transform exists"),
            });
        }
        let zero = D::zero();
        if *t < zero {
            return Ok((zero.clone(), zero));
        }

        let m = self.mantissa();
        let eps = D::epsilon();
        let ce1 = (-ex - 1) as usize;

        if t.is_zero() {
            if !b0.is_zero() {
                return Ok((zero.clone(), zero));
            }
            let i = ex + 2;
            let out = if i >= 0 {
                m[i as usize].clone()
            } else {
                zero.clone()
            };
            let err = out.clone() * eps;
            return Ok((out, err));
        }

        let two = D::from_i64(2);
        let four = D::from_i64(4);
        let mut y = [
            (-(b0.clone() * b0.clone()) / (four * t.clone())).exp()
                / (D::pi() * t.clone()).sqrt(),
            (b0.clone() / (two.clone() * t.clone()).sqrt() / two.clone().sqrt()).erfc(),
        ];
        for k in 1..=ce1 {
            y[(k + 1) % 2] = (two.clone() * t.clone() * y[(k + 1) % 2].clone()
                - b0.clone() * y[k % 2].clone())
                / D::from_i64(k as i64);
        }

        let span = N / 4;
        let mut k = ce1;
        let mut out = m[0].clone() * y[k % 2].clone();
        let mut gauge = TailGauge::new(out.abs(), (ce1 + 1) % 3);
        let mut abs_ak;
        loop {
            k += 1;
            y[(k + 1) % 2] = (two.clone() * t.clone() * y[(k + 1) % 2].clone()
                - b0.clone() * y[k % 2].clone())
                / D::from_i64(k as i64);
            let ak = m[k - ce1].clone() * y[k % 2].clone();
            abs_ak = ak.abs();
            gauge.observe(k, &abs_ak, &out.abs(), span);
            out = out + ak;
            if k >= N - 1 + ce1 || gauge.stop {
                break;
            }
        }

        let err = gauge.tail(k, abs_ak, span) + (gauge.max_term.clone() + out.clone()) * eps;
        Ok((out, err))
    }
}
