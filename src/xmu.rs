use std::fmt;

use tracing::trace;

use crate::alpha::Alpha;
use crate::cutset::{CutSet, Part};
use crate::interval::Interval;
use crate::universe::Universe;

/// One end of an alpha-parametrised interval
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bound {
    Fixed(f64),
    /// Moves linearly from `at_zero` (alpha = 0) to `at_one` (alpha = 1)
    Lerp { at_zero: f64, at_one: f64 },
}

impl Bound {
    pub fn at(&self, alpha: Alpha) -> f64 {
        match *self {
            Self::Fixed(v) => v,
            Self::Lerp { at_zero, at_one } => alpha.get() * (at_one - at_zero) + at_zero,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => write!(f, "{v}"),
            Self::Lerp { at_zero, at_one } => write!(f, "alpha*({at_one} - {at_zero}) + {at_zero}"),
        }
    }
}

/// The X-mu function of a fuzzy entity: maps a cut level alpha to the
/// subset of the universe whose membership is at least alpha.
///
/// Alpha stays free in this tree; it is only substituted by [`XmuFunction::at`],
/// so combining two functions is valid for every alpha at once.
#[derive(Clone, Debug, PartialEq)]
pub enum XmuFunction {
    Empty,
    /// The same interval at every alpha
    Crisp(Interval<f64>),
    /// `[lower(alpha), upper(alpha)]`, empty wherever `lower > upper`
    Cut { lower: Bound, upper: Bound },
    Intersection(Box<XmuFunction>, Box<XmuFunction>),
    Union(Box<XmuFunction>, Box<XmuFunction>),
    /// Left minus right
    Difference(Box<XmuFunction>, Box<XmuFunction>),
    Complement { universe: Universe, of: Box<XmuFunction> },
}

impl XmuFunction {
    pub fn cut(lower: Bound, upper: Bound) -> Self {
        XmuFunction::Cut { lower, upper }
    }

    pub fn intersect(&self, other: &XmuFunction) -> Self {
        XmuFunction::Intersection(Box::new(self.clone()), Box::new(other.clone()))
    }

    pub fn union(&self, other: &XmuFunction) -> Self {
        XmuFunction::Union(Box::new(self.clone()), Box::new(other.clone()))
    }

    pub fn difference(&self, other: &XmuFunction) -> Self {
        XmuFunction::Difference(Box::new(self.clone()), Box::new(other.clone()))
    }

    pub fn complement(&self, universe: Universe) -> Self {
        XmuFunction::Complement {
            universe,
            of: Box::new(self.clone()),
        }
    }

    /// Replaces the universe of every complement taken against `from`.
    ///
    /// Operand cuts stay clipped to the universe they were generated in.
    pub fn rebase(&self, from: Universe, to: Universe) -> Self {
        let rebase = |f: &XmuFunction| Box::new(f.rebase(from, to));

        match self {
            Self::Intersection(a, b) => Self::Intersection(rebase(a), rebase(b)),
            Self::Union(a, b) => Self::Union(rebase(a), rebase(b)),
            Self::Difference(a, b) => Self::Difference(rebase(a), rebase(b)),
            Self::Complement { universe, of } => Self::Complement {
                universe: if *universe == from { to } else { *universe },
                of: rebase(of),
            },
            leaf => leaf.clone(),
        }
    }

    /// Substitutes a concrete alpha
    pub fn at(&self, alpha: Alpha) -> CutSet {
        let set = match self {
            Self::Empty => CutSet::empty(),
            Self::Crisp(interval) => CutSet::from(*interval),
            Self::Cut { lower, upper } => CutSet::from_parts([Part::closed(lower.at(alpha), upper.at(alpha))]),
            Self::Intersection(a, b) => a.at(alpha).intersect(&b.at(alpha)),
            Self::Union(a, b) => a.at(alpha).union(&b.at(alpha)),
            Self::Difference(a, b) => a.at(alpha).difference(&b.at(alpha)),
            Self::Complement { universe, of } => universe.cut_set().difference(&of.at(alpha)),
        };

        trace!(%alpha, %set, "evaluated alpha-cut");

        set
    }
}

impl Default for XmuFunction {
    fn default() -> Self {
        XmuFunction::Empty
    }
}

impl fmt::Display for XmuFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "EmptySet"),
            Self::Crisp(interval) => write!(f, "Interval({}, {})", interval.lo(), interval.hi()),
            Self::Cut { lower, upper } => write!(f, "Interval({lower}, {upper})"),
            Self::Intersection(a, b) => write!(f, "Intersection({a}, {b})"),
            Self::Union(a, b) => write!(f, "Union({a}, {b})"),
            Self::Difference(a, b) => write!(f, "Complement({a}, {b})"),
            Self::Complement { universe, of } => {
                write!(f, "Complement(Interval({}, {}), {of})", universe.inf(), universe.sup())
            },
        }
    }
}

#[cfg(test)]
fn alpha(value: f64) -> Alpha {
    Alpha::new(value).unwrap()
}

#[test]
fn test_bounds() {
    let rising = Bound::Lerp { at_zero: 2., at_one: 5. };
    let falling = Bound::Lerp { at_zero: 8., at_one: 5. };

    assert_eq!(rising.at(Alpha::ZERO), 2.);
    assert_eq!(rising.at(Alpha::ONE), 5.);
    assert_eq!(falling.at(alpha(0.5)), 6.5);
    assert_eq!(Bound::Fixed(3.).at(alpha(0.7)), 3.);
}

#[test]
fn test_cut_evaluation() {
    let f = XmuFunction::cut(Bound::Lerp { at_zero: 2., at_one: 5. }, Bound::Fixed(4.));

    assert_eq!(f.at(Alpha::ZERO), CutSet::from(Interval::new(2., 4.).unwrap()));
    // Lower bound has overtaken the upper one
    assert!(f.at(Alpha::ONE).is_empty());
    assert!(XmuFunction::Empty.at(alpha(0.3)).is_empty());
}

#[test]
fn test_composition_keeps_alpha_free() {
    let a = XmuFunction::cut(Bound::Lerp { at_zero: 0., at_one: 4. }, Bound::Fixed(10.));
    let b = XmuFunction::cut(Bound::Fixed(0.), Bound::Lerp { at_zero: 10., at_one: 6. });
    let both = a.intersect(&b);

    for (value, lo, hi) in [(0., 0., 10.), (0.5, 2., 8.), (1., 4., 6.)] {
        assert_eq!(both.at(alpha(value)), CutSet::from(Interval::new(lo, hi).unwrap()));
    }

    assert_eq!(
        both.to_string(),
        "Intersection(Interval(alpha*(4 - 0) + 0, 10), Interval(0, alpha*(6 - 10) + 10))"
    );
}

#[test]
fn test_rebase_complements() {
    let small = Universe::new(0. ..=10.).unwrap();
    let large = Universe::new(0. ..=20.).unwrap();
    let other = Universe::new(0. ..=5.).unwrap();
    let core = XmuFunction::Crisp(Interval::new(4., 6.).unwrap());

    let rebased = core.complement(small).rebase(small, large);
    assert_eq!(rebased, core.complement(large));
    assert!(rebased.at(Alpha::ONE).contains(15.));

    // Complements against some other universe are left alone
    let nested = core.complement(other).union(&core).rebase(small, large);
    assert_eq!(nested, core.complement(other).union(&core));
    assert_eq!(core.rebase(small, large), core);
}

#[test]
fn test_complement_display() {
    let universe = Universe::new(0. ..=10.).unwrap();
    let core = XmuFunction::Crisp(Interval::new(4., 6.).unwrap());

    assert_eq!(
        core.complement(universe).to_string(),
        "Complement(Interval(0, 10), Interval(4, 6))"
    );
}
