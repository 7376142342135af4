use std::fmt;

use num::Float;

use crate::interval::Interval;

/// Interval arithmetic operator applied to two alpha-cuts at a fixed alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl ArithOp {
    pub const ALL: [ArithOp; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::Pow];

    /// `None` when the result is undefined over the reals
    pub fn call<F: Float>(self, u: Interval<F>, v: Interval<F>) -> Option<Interval<F>> {
        match self {
            Self::Add => Some(u.add(v)),
            Self::Sub => Some(u.sub(v)),
            Self::Mul => Some(u.mul(v)),
            Self::Div => u.div(v),
            Self::Pow => u.pow(v),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Binary set operator over alpha-cut functions, valid for every alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetOp {
    Intersect,
    Union,
    /// Left minus right
    Difference,
}

#[test]
fn test_dispatch() {
    let u = Interval::new(1f32, 2.).unwrap();
    let v = Interval::new(2f32, 4.).unwrap();

    assert_eq!(ArithOp::Add.call(u, v), Interval::new(3., 6.));
    assert_eq!(ArithOp::Sub.call(u, v), Interval::new(-3., 0.));
    assert_eq!(ArithOp::Mul.call(u, v), Interval::new(2., 8.));
    assert_eq!(ArithOp::Div.call(u, v), Interval::new(0.25, 1.));
    assert_eq!(ArithOp::Pow.call(u, Interval::point(2.)), Interval::new(1., 4.));
    assert_eq!(ArithOp::Div.call(u, Interval::new(-1., 1.).unwrap()), None);

    assert_eq!(ArithOp::Pow.to_string(), "**");
}
