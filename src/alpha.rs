use std::fmt;

use crate::error::{Result, XmuError};

/// A cut level between zero and one
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Alpha(f64);

impl Alpha {
    pub const ZERO: Alpha = Alpha(0.);
    pub const ONE: Alpha = Alpha(1.);

    /// Out of range values are rejected, never clamped.
    pub fn new(value: f64) -> Result<Self> {
        if (0. ..=1.).contains(&value) {
            Ok(Alpha(value))
        } else {
            Err(XmuError::AlphaOutOfRange(value))
        }
    }

    /// For values the crate generates itself, which may only be off by rounding
    pub(crate) fn from_unit(value: f64) -> Self {
        debug_assert!((-1e-12..=1. + 1e-12).contains(&value));

        Alpha(value.clamp(0., 1.))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Alpha {
    type Error = XmuError;

    fn try_from(value: f64) -> Result<Self> {
        Alpha::new(value)
    }
}

impl From<Alpha> for f64 {
    fn from(alpha: Alpha) -> Self {
        alpha.0
    }
}

impl fmt::Display for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[test]
fn test_alpha_range() {
    assert_eq!(Alpha::new(0.).unwrap(), Alpha::ZERO);
    assert_eq!(Alpha::new(1.).unwrap(), Alpha::ONE);
    assert_eq!(Alpha::new(0.25).unwrap().get(), 0.25);

    assert_eq!(Alpha::new(-0.1), Err(XmuError::AlphaOutOfRange(-0.1)));
    assert_eq!(Alpha::new(1.5), Err(XmuError::AlphaOutOfRange(1.5)));
    assert!(Alpha::new(f64::NAN).is_err());
    assert!(Alpha::try_from(2.).is_err());
}
