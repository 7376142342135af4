use std::fmt;

use crate::error::{Result, XmuError};

/// The scalar expression of a single branch, in terms of `x`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Expr {
    Constant(f64),
    /// `(x - from) / (to - from)`
    Rising { from: f64, to: f64 },
    /// `(to - x) / (to - from)`
    Falling { from: f64, to: f64 },
}

impl Expr {
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            Self::Constant(c) => c,
            Self::Rising { from, to } => (x - from) / (to - from),
            Self::Falling { from, to } => (to - x) / (to - from),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => write!(f, "{c}"),
            Self::Rising { from, to } => write!(f, "(x - {from})/({to} - {from})"),
            Self::Falling { from, to } => write!(f, "({to} - x)/({to} - {from})"),
        }
    }
}

/// The predicate guarding a branch
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Condition {
    /// `lo < x < hi`
    Between(f64, f64),
    /// `lo <= x <= hi`
    Within(f64, f64),
    /// `x <= v`
    AtMost(f64),
    /// `x >= v`
    AtLeast(f64),
    Always,
}

impl Condition {
    pub fn holds(&self, x: f64) -> bool {
        match *self {
            Self::Between(lo, hi) => lo < x && x < hi,
            Self::Within(lo, hi) => lo <= x && x <= hi,
            Self::AtMost(v) => x <= v,
            Self::AtLeast(v) => x >= v,
            Self::Always => true,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Between(lo, hi) => write!(f, "{lo} < x < {hi}"),
            Self::Within(lo, hi) => write!(f, "{lo} <= x <= {hi}"),
            Self::AtMost(v) => write!(f, "x <= {v}"),
            Self::AtLeast(v) => write!(f, "x >= {v}"),
            Self::Always => write!(f, "True"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    pub expr: Expr,
    pub when: Condition,
}

impl Branch {
    pub fn new(expr: Expr, when: Condition) -> Self {
        Branch { expr, when }
    }
}

/// A piecewise scalar function of `x`.
///
/// Branches are tried in order and the first one whose condition holds is
/// evaluated. When none holds the value is zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Piecewise(Vec<Branch>);

impl Piecewise {
    pub fn new(branches: Vec<Branch>) -> Self {
        Piecewise(branches)
    }

    pub fn branches(&self) -> &[Branch] {
        &self.0
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.0
            .iter()
            .find(|branch| branch.when.holds(x))
            .map_or(0., |branch| branch.expr.eval(x))
    }
}

impl fmt::Display for Piecewise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piecewise(")?;
        for branch in &self.0 {
            write!(f, "({}, {}), ", branch.expr, branch.when)?;
        }
        write!(f, "(0, True))")
    }
}

/// The membership function of a fuzzy entity.
///
/// Entities produced by set algebra or arithmetic only know their alpha-cut
/// function; their membership is `Unavailable` rather than a meaningless
/// placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum Membership {
    Piecewise(Piecewise),
    Unavailable,
}

impl Membership {
    pub fn eval(&self, x: f64) -> Result<f64> {
        match self {
            Self::Piecewise(p) => Ok(p.eval(x)),
            Self::Unavailable => Err(XmuError::MembershipUnavailable),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Piecewise(_))
    }

    pub fn as_piecewise(&self) -> Option<&Piecewise> {
        match self {
            Self::Piecewise(p) => Some(p),
            Self::Unavailable => None,
        }
    }
}

impl Default for Membership {
    fn default() -> Self {
        Membership::Piecewise(Piecewise::default())
    }
}

impl From<Piecewise> for Membership {
    fn from(p: Piecewise) -> Self {
        Membership::Piecewise(p)
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Piecewise(p) => write!(f, "{p}"),
            Self::Unavailable => write!(f, "Unavailable"),
        }
    }
}

#[test]
fn test_branch_order() {
    // The first matching branch wins even when a later one also matches
    let p = Piecewise::new(vec![
        Branch::new(Expr::Constant(0.5), Condition::Within(0., 1.)),
        Branch::new(Expr::Constant(1.), Condition::AtLeast(0.)),
    ]);

    assert_eq!(p.eval(0.5), 0.5);
    assert_eq!(p.eval(1.), 0.5);
    assert_eq!(p.eval(2.), 1.);
    assert_eq!(p.eval(-1.), 0.);
}

#[test]
fn test_linear_exprs() {
    let rising = Expr::Rising { from: 2., to: 6. };
    let falling = Expr::Falling { from: 2., to: 6. };

    assert_eq!(rising.eval(3.), 0.25);
    assert_eq!(falling.eval(3.), 0.75);
    assert_eq!(rising.to_string(), "(x - 2)/(6 - 2)");
}

#[test]
fn test_default_is_zero() {
    let membership = Membership::default();

    assert_eq!(membership.eval(42.), Ok(0.));
    assert_eq!(membership.to_string(), "Piecewise((0, True))");
    assert_eq!(Membership::Unavailable.eval(1.), Err(XmuError::MembershipUnavailable));
    assert!(!Membership::Unavailable.is_available());
}
