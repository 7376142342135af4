use std::fmt;

use num::Float;

use crate::math::{approx_eq, is_even, is_integer, min_max};

/// A closed interval `[lo, hi]`, the primitive of interval arithmetic.
///
/// A single point is the degenerate interval `[v, v]`. Operations whose
/// result is undefined over the reals (division by an interval containing
/// zero, complex powers) return `None` rather than an interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval<F> {
    lo: F,
    hi: F,
}

impl<F: Float> Interval<F> {
    /// `None` when `lo > hi` or either bound is NaN
    pub fn new(lo: F, hi: F) -> Option<Self> {
        if lo <= hi {
            Some(Interval { lo, hi })
        } else {
            None
        }
    }

    pub fn point(value: F) -> Self {
        Interval { lo: value, hi: value }
    }

    pub(crate) fn from_ordered(lo: F, hi: F) -> Self {
        debug_assert!(lo <= hi);

        Interval { lo, hi }
    }

    pub fn lo(&self) -> F {
        self.lo
    }

    pub fn hi(&self) -> F {
        self.hi
    }

    pub fn width(&self) -> F {
        self.hi - self.lo
    }

    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    pub fn contains(&self, x: F) -> bool {
        self.lo <= x && x <= self.hi
    }

    pub fn contains_interval(&self, other: &Self) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }

    pub fn approx_eq(&self, other: &Self, tolerance: F) -> bool {
        approx_eq(self.lo, other.lo, tolerance) && approx_eq(self.hi, other.hi, tolerance)
    }

    pub fn add(self, rhs: Self) -> Self {
        Interval {
            lo: self.lo + rhs.lo,
            hi: self.hi + rhs.hi,
        }
    }

    pub fn sub(self, rhs: Self) -> Self {
        Interval {
            lo: self.lo - rhs.hi,
            hi: self.hi - rhs.lo,
        }
    }

    pub fn mul(self, rhs: Self) -> Self {
        let (lo, hi) = min_max([
            self.lo * rhs.lo,
            self.lo * rhs.hi,
            self.hi * rhs.lo,
            self.hi * rhs.hi,
        ]);

        Interval { lo, hi }
    }

    /// `None` if the interval contains zero
    pub fn recip(self) -> Option<Self> {
        if self.contains(F::zero()) {
            return None;
        }

        Some(Interval {
            lo: self.hi.recip(),
            hi: self.lo.recip(),
        })
    }

    pub fn div(self, rhs: Self) -> Option<Self> {
        Some(self.mul(rhs.recip()?))
    }

    /// Raises every value of `self` to every value of `exponent`.
    ///
    /// A point exponent follows the sign and parity rules of real powers.
    /// A wider exponent is only real-valued for non-negative bases.
    pub fn pow(self, exponent: Self) -> Option<Self> {
        if exponent.is_point() {
            return self.powf(exponent.lo);
        }

        if self.lo > F::zero() {
            // x^y = e^(y ln x), both monotonic
            let ln = Interval::from_ordered(self.lo.ln(), self.hi.ln());
            let product = ln.mul(exponent);

            Some(Interval::from_ordered(product.lo.exp(), product.hi.exp()))
        } else if self.lo == F::zero() && exponent.lo >= F::zero() {
            // 0^y = 0 for y > 0, and x^0 = 1 including 0^0
            let at_zero = if exponent.lo == F::zero() { F::one() } else { F::zero() };
            let (_, hi) = min_max([at_zero, self.hi.powf(exponent.lo), self.hi.powf(exponent.hi)]);

            Some(Interval::from_ordered(F::zero(), hi))
        } else {
            None
        }
    }

    fn powf(self, p: F) -> Option<Self> {
        if p == F::zero() {
            return Some(Interval::point(F::one()));
        }

        if is_integer(p) {
            let n = p.abs();
            let positive = if !is_even(n) || self.lo >= F::zero() {
                // Monotonically increasing over the interval
                Interval::from_ordered(self.lo.powf(n), self.hi.powf(n))
            } else if self.hi <= F::zero() {
                Interval::from_ordered(self.hi.powf(n), self.lo.powf(n))
            } else {
                let (_, hi) = min_max([self.lo.powf(n), self.hi.powf(n)]);

                Interval::from_ordered(F::zero(), hi)
            };

            return if p > F::zero() {
                Some(positive)
            } else {
                Interval::point(F::one()).div(positive)
            };
        }

        // Fractional powers of negative numbers are complex
        if self.lo < F::zero() {
            return None;
        }

        if p > F::zero() {
            Some(Interval::from_ordered(self.lo.powf(p), self.hi.powf(p)))
        } else if self.lo == F::zero() {
            None
        } else {
            Some(Interval::from_ordered(self.hi.powf(p), self.lo.powf(p)))
        }
    }
}

impl<F: Float + fmt::Display> fmt::Display for Interval<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

#[cfg(test)]
fn iv(lo: f64, hi: f64) -> Interval<f64> {
    Interval::new(lo, hi).unwrap()
}

#[test]
fn test_construction() {
    assert!(Interval::new(2., 1.).is_none());
    assert!(Interval::new(f64::NAN, 1.).is_none());
    assert!(Interval::new(1., 1.).unwrap().is_point());
    assert_eq!(Interval::point(3.), iv(3., 3.));
    assert_eq!(iv(-1., 4.).width(), 5.);
    assert!(iv(-1., 4.).contains_interval(&iv(0., 4.)));
    assert!(!iv(-1., 4.).contains_interval(&iv(0., 5.)));
}

#[test]
fn test_add_sub() {
    assert_eq!(iv(1., 2.).add(iv(3., 5.)), iv(4., 7.));
    assert_eq!(iv(1., 2.).sub(iv(3., 5.)), iv(-4., -1.));
    assert_eq!(iv(1., 2.).sub(iv(1., 2.)), iv(-1., 1.));
}

#[test]
fn test_mul() {
    assert_eq!(iv(1., 2.).mul(iv(3., 5.)), iv(3., 10.));
    assert_eq!(iv(-2., 3.).mul(iv(4., 5.)), iv(-10., 15.));
    assert_eq!(iv(-2., -1.).mul(iv(-3., 4.)), iv(-8., 6.));
    assert_eq!(iv(-2., 3.).mul(iv(-1., 1.)), iv(-3., 3.));
}

#[test]
fn test_div() {
    assert_eq!(iv(1., 2.).div(iv(4., 8.)), Some(iv(0.125, 0.5)));
    assert_eq!(iv(1., 2.).div(iv(-2., -1.)), Some(iv(-2., -0.5)));

    // Zero anywhere in the divisor has no real result
    assert_eq!(iv(1., 2.).div(iv(-1., 1.)), None);
    assert_eq!(iv(1., 2.).div(iv(0., 1.)), None);
    assert_eq!(iv(1., 2.).div(iv(-1., 0.)), None);
    assert_eq!(iv(1., 2.).div(Interval::point(0.)), None);
}

#[test]
fn test_integer_powers() {
    assert_eq!(iv(2., 3.).pow(Interval::point(2.)), Some(iv(4., 9.)));
    assert_eq!(iv(-3., -2.).pow(Interval::point(2.)), Some(iv(4., 9.)));
    assert_eq!(iv(-3., 2.).pow(Interval::point(2.)), Some(iv(0., 9.)));
    assert_eq!(iv(-3., 2.).pow(Interval::point(3.)), Some(iv(-27., 8.)));
    assert_eq!(iv(-3., 2.).pow(Interval::point(0.)), Some(Interval::point(1.)));

    assert_eq!(iv(2., 4.).pow(Interval::point(-1.)), Some(iv(0.25, 0.5)));
    assert_eq!(iv(-4., -2.).pow(Interval::point(-2.)), Some(iv(0.0625, 0.25)));
    assert_eq!(iv(-1., 2.).pow(Interval::point(-1.)), None);
    assert_eq!(iv(-1., 2.).pow(Interval::point(-2.)), None);
}

#[test]
fn test_fractional_powers() {
    let root = iv(4., 9.).pow(Interval::point(0.5)).unwrap();
    assert!(root.approx_eq(&iv(2., 3.), 1e-12));

    let root = iv(0., 9.).pow(Interval::point(0.5)).unwrap();
    assert!(root.approx_eq(&iv(0., 3.), 1e-12));

    let inverse_root = iv(4., 16.).pow(Interval::point(-0.5)).unwrap();
    assert!(inverse_root.approx_eq(&iv(0.25, 0.5), 1e-12));

    assert_eq!(iv(-1., 9.).pow(Interval::point(0.5)), None);
    assert_eq!(iv(0., 9.).pow(Interval::point(-0.5)), None);
}

#[test]
fn test_interval_exponent() {
    let result = iv(2., 4.).pow(iv(1., 2.)).unwrap();
    assert!(result.approx_eq(&iv(2., 16.), 1e-9));

    let result = iv(0.5, 2.).pow(iv(-1., 1.)).unwrap();
    assert!(result.approx_eq(&iv(0.5, 2.), 1e-9));

    assert_eq!(iv(0., 3.).pow(iv(1., 2.)), Some(iv(0., 9.)));
    assert_eq!(iv(0., 3.).pow(iv(-1., 2.)), None);

    // A zero base with an exponent starting at zero is still real
    assert_eq!(iv(0., 3.).pow(iv(0., 1.)), Some(iv(0., 3.)));
    assert_eq!(iv(0., 0.5).pow(iv(0., 2.)), Some(iv(0., 1.)));
    assert_eq!(iv(0., 0.).pow(iv(0., 1.)), Some(iv(0., 1.)));
    assert_eq!(iv(-2., 3.).pow(iv(1., 2.)), None);
}
