use std::fmt;
use std::ops::RangeInclusive;

use crate::cutset::CutSet;
use crate::error::{Result, XmuError};
use crate::interval::Interval;

/// The closed interval every value of a fuzzy set ranges over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Universe {
    inf: f64,
    sup: f64,
}

impl Universe {
    pub fn new(range: RangeInclusive<f64>) -> Result<Self> {
        let (inf, sup) = range.into_inner();

        // NaN fails every comparison, so it's rejected here as well
        if inf.is_finite() && sup.is_finite() && inf <= sup {
            Ok(Universe { inf, sup })
        } else {
            Err(XmuError::InvalidUniverse { inf, sup })
        }
    }

    pub fn inf(&self) -> f64 {
        self.inf
    }

    pub fn sup(&self) -> f64 {
        self.sup
    }

    pub fn contains(&self, x: f64) -> bool {
        self.inf <= x && x <= self.sup
    }

    pub fn interval(&self) -> Interval<f64> {
        Interval::from_ordered(self.inf, self.sup)
    }

    pub fn cut_set(&self) -> CutSet {
        CutSet::from(self.interval())
    }
}

impl TryFrom<RangeInclusive<f64>> for Universe {
    type Error = XmuError;

    fn try_from(range: RangeInclusive<f64>) -> Result<Self> {
        Universe::new(range)
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.inf, self.sup)
    }
}

#[test]
fn test_universe_bounds() {
    let u = Universe::new(0. ..=10.).unwrap();

    assert_eq!(u.inf(), 0.);
    assert_eq!(u.sup(), 10.);
    assert!(u.contains(0.) && u.contains(10.) && u.contains(3.3));
    assert!(!u.contains(-0.1) && !u.contains(10.1));

    // A single point is a valid universe
    assert!(Universe::new(4. ..=4.).is_ok());

    assert_eq!(
        Universe::new(5. ..=1.),
        Err(XmuError::InvalidUniverse { inf: 5., sup: 1. })
    );
    assert!(Universe::new(f64::NAN..=1.).is_err());
    assert!(Universe::new(0. ..=f64::INFINITY).is_err());
}
