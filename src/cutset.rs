use std::cmp::Ordering;
use std::fmt;

use crate::interval::Interval;
use crate::math::approx_eq;

/// One connected piece of a [`CutSet`]. Either end may be open, since set
/// difference and complement leave open boundaries behind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Part {
    pub lo: f64,
    pub hi: f64,
    pub lo_closed: bool,
    pub hi_closed: bool,
}

impl Part {
    pub fn closed(lo: f64, hi: f64) -> Self {
        Part {
            lo,
            hi,
            lo_closed: true,
            hi_closed: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        // Also true for NaN bounds
        !(self.lo <= self.hi) || (self.lo == self.hi && !(self.lo_closed && self.hi_closed))
    }

    pub fn contains(&self, x: f64) -> bool {
        let above = if self.lo_closed { self.lo <= x } else { self.lo < x };
        let below = if self.hi_closed { x <= self.hi } else { x < self.hi };

        above && below
    }

    pub fn is_point(&self) -> bool {
        !self.is_empty() && self.lo == self.hi
    }

    fn intersect(&self, other: &Part) -> Part {
        let (lo, lo_closed) = match self.lo.partial_cmp(&other.lo) {
            Some(Ordering::Greater) => (self.lo, self.lo_closed),
            Some(Ordering::Less) => (other.lo, other.lo_closed),
            _ => (self.lo, self.lo_closed && other.lo_closed),
        };
        let (hi, hi_closed) = match self.hi.partial_cmp(&other.hi) {
            Some(Ordering::Less) => (self.hi, self.hi_closed),
            Some(Ordering::Greater) => (other.hi, other.hi_closed),
            _ => (self.hi, self.hi_closed && other.hi_closed),
        };

        Part {
            lo,
            hi,
            lo_closed,
            hi_closed,
        }
    }

    /// Whether `next`, which starts no earlier than `self`, overlaps or touches it
    fn joins(&self, next: &Part) -> bool {
        next.lo < self.hi || (next.lo == self.hi && (self.hi_closed || next.lo_closed))
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.lo_closed { '[' } else { '(' };
        let close = if self.hi_closed { ']' } else { ')' };

        write!(f, "{open}{}, {}{close}", self.lo, self.hi)
    }
}

/// The value of an alpha-cut function at one alpha: a union of disjoint
/// intervals, possibly empty.
///
/// Parts are kept sorted, non-empty and pairwise separated, so two sets
/// describing the same points compare equal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CutSet(Vec<Part>);

impl CutSet {
    pub fn empty() -> Self {
        CutSet(Vec::new())
    }

    pub fn from_parts(parts: impl IntoIterator<Item = Part>) -> Self {
        let mut parts: Vec<_> = parts.into_iter().filter(|p| !p.is_empty()).collect();

        // Closed lower ends first so ties merge into the closed end
        parts.sort_unstable_by(|a, b| {
            a.lo.partial_cmp(&b.lo)
                .expect("not to find unsortable floats")
                .then(b.lo_closed.cmp(&a.lo_closed))
        });

        let mut merged: Vec<Part> = Vec::with_capacity(parts.len());

        for part in parts {
            match merged.last_mut() {
                Some(last) if last.joins(&part) => {
                    if part.hi > last.hi {
                        last.hi = part.hi;
                        last.hi_closed = part.hi_closed;
                    } else if part.hi == last.hi {
                        last.hi_closed |= part.hi_closed;
                    }
                },
                _ => merged.push(part),
            }
        }

        CutSet(merged)
    }

    pub fn parts(&self) -> &[Part] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, x: f64) -> bool {
        self.0.iter().any(|p| p.contains(x))
    }

    /// The smallest closed interval covering the set.
    ///
    /// This is how a multi-part cut enters interval arithmetic.
    pub fn hull(&self) -> Option<Interval<f64>> {
        let first = self.0.first()?;
        let last = self.0.last()?;

        Some(Interval::from_ordered(first.lo, last.hi))
    }

    pub fn intersect(&self, other: &CutSet) -> CutSet {
        let pairs = self
            .0
            .iter()
            .flat_map(|a| other.0.iter().map(move |b| a.intersect(b)));

        CutSet::from_parts(pairs)
    }

    pub fn union(&self, other: &CutSet) -> CutSet {
        CutSet::from_parts(self.0.iter().chain(other.0.iter()).copied())
    }

    /// Everything on the real line outside of this set
    pub fn complement(&self) -> CutSet {
        let mut gaps = Vec::with_capacity(self.0.len() + 1);
        let mut lo = f64::NEG_INFINITY;
        let mut lo_closed = false;

        for part in &self.0 {
            gaps.push(Part {
                lo,
                hi: part.lo,
                lo_closed,
                hi_closed: !part.lo_closed,
            });
            lo = part.hi;
            lo_closed = !part.hi_closed;
        }

        gaps.push(Part {
            lo,
            hi: f64::INFINITY,
            lo_closed,
            hi_closed: false,
        });

        CutSet::from_parts(gaps)
    }

    /// `self` minus `other`
    pub fn difference(&self, other: &CutSet) -> CutSet {
        self.intersect(&other.complement())
    }

    pub fn is_subset_of(&self, other: &CutSet) -> bool {
        self.difference(other).is_empty()
    }

    /// Compares bounds within `tolerance`, endpoint openness exactly
    pub fn approx_eq(&self, other: &CutSet, tolerance: f64) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().zip(other.0.iter()).all(|(a, b)| {
                approx_eq(a.lo, b.lo, tolerance)
                    && approx_eq(a.hi, b.hi, tolerance)
                    && a.lo_closed == b.lo_closed
                    && a.hi_closed == b.hi_closed
            })
    }
}

impl From<Interval<f64>> for CutSet {
    fn from(interval: Interval<f64>) -> Self {
        CutSet(vec![Part::closed(interval.lo(), interval.hi())])
    }
}

impl fmt::Display for CutSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "EmptySet");
        }

        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " U ")?;
            }
            write!(f, "{part}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
fn closed(lo: f64, hi: f64) -> CutSet {
    CutSet::from_parts([Part::closed(lo, hi)])
}

#[test]
fn test_normalization() {
    let set = CutSet::from_parts([Part::closed(5., 6.), Part::closed(1., 3.), Part::closed(2., 4.)]);
    assert_eq!(set.parts(), &[Part::closed(1., 4.), Part::closed(5., 6.)]);

    // Touching closed ends merge, touching open ends do not
    let touching = CutSet::from_parts([Part::closed(0., 1.), Part::closed(1., 2.)]);
    assert_eq!(touching, closed(0., 2.));

    let open_gap = Part {
        lo: 1.,
        hi: 2.,
        lo_closed: false,
        hi_closed: true,
    };
    let split = CutSet::from_parts([
        Part {
            lo: 0.,
            hi: 1.,
            lo_closed: true,
            hi_closed: false,
        },
        open_gap,
    ]);
    assert_eq!(split.parts().len(), 2);
    assert!(!split.contains(1.));

    assert!(CutSet::from_parts([Part::closed(3., 2.)]).is_empty());
    assert!(!closed(2., 2.).is_empty());
}

#[test]
fn test_intersect_union() {
    let a = closed(0., 5.);
    let b = closed(3., 8.);

    assert_eq!(a.intersect(&b), closed(3., 5.));
    assert_eq!(a.union(&b), closed(0., 8.));
    assert_eq!(a.intersect(&closed(6., 7.)), CutSet::empty());

    let union = a.union(&closed(6., 7.));
    assert_eq!(union.parts().len(), 2);
    assert_eq!(union.hull(), Interval::new(0., 7.));

    // Closed ends meeting in a single point
    assert_eq!(a.intersect(&closed(5., 9.)), closed(5., 5.));
}

#[test]
fn test_difference_and_complement() {
    let universe = closed(0., 10.);
    let a = closed(2., 8.);

    let difference = universe.difference(&a);
    assert_eq!(
        difference.parts(),
        &[
            Part {
                lo: 0.,
                hi: 2.,
                lo_closed: true,
                hi_closed: false
            },
            Part {
                lo: 8.,
                hi: 10.,
                lo_closed: false,
                hi_closed: true
            },
        ]
    );
    assert!(!difference.contains(2.));
    assert!(difference.contains(0.));

    // Removing the complement again restores the original
    assert_eq!(universe.difference(&difference), a);

    // A cut sharing the universe edge leaves no stray point behind
    let edge = closed(0., 8.);
    assert_eq!(universe.difference(&edge).parts().len(), 1);
    assert_eq!(universe.difference(&universe.difference(&edge)), edge);

    assert_eq!(CutSet::empty().complement().parts().len(), 1);
    assert!(a.difference(&universe).is_empty());
    assert!(a.is_subset_of(&universe));
    assert!(!universe.is_subset_of(&a));
}

#[test]
fn test_display() {
    assert_eq!(CutSet::empty().to_string(), "EmptySet");
    assert_eq!(closed(0., 10.).difference(&closed(2., 8.)).to_string(), "[0, 2) U (8, 10]");
}
