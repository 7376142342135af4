use crate::entity::FuzzyEntity;
use crate::error::{Result, XmuError};
use crate::membership::{Branch, Condition, Expr, Piecewise};
use crate::universe::Universe;
use crate::xmu::{Bound, XmuFunction};

/// Control points of a straight-line membership shape.
///
/// Each shape derives a membership function and the matching alpha-cut
/// function in closed form, so the two always describe the same set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// `a`: last point where mu is 0, `b`: first point where mu is 1
    UpwardGradient { a: f64, b: f64 },
    /// `a`: last point where mu is 1, `b`: first point where mu is 0
    DownwardGradient { a: f64, b: f64 },
    /// Rises over `(a, b)`, plateaus over `[b, c]`, falls over `(c, d)`
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    /// A trapezoid whose plateau is the single point `b`
    Triangular { a: f64, b: f64, c: f64 },
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpwardGradient { .. } => "upward gradient",
            Self::DownwardGradient { .. } => "downward gradient",
            Self::Trapezoidal { .. } => "trapezoid",
            Self::Triangular { .. } => "triangle",
        }
    }

    pub fn control_points(&self) -> Vec<f64> {
        match *self {
            Self::UpwardGradient { a, b } | Self::DownwardGradient { a, b } => vec![a, b],
            Self::Trapezoidal { a, b, c, d } => vec![a, b, c, d],
            Self::Triangular { a, b, c } => vec![a, b, c],
        }
    }

    /// Points must be finite and non-decreasing.
    ///
    /// Equal points are fine: every linear branch is guarded by an open
    /// interval, which is empty when its ends coincide.
    pub fn validate(&self) -> Result<()> {
        let points = self.control_points();
        let finite = points.iter().all(|p| p.is_finite());
        let ordered = points.windows(2).all(|w| w[0] <= w[1]);

        if finite && ordered {
            Ok(())
        } else {
            Err(XmuError::InvalidControlPoints {
                shape: self.name(),
                points,
            })
        }
    }

    pub fn membership(&self) -> Piecewise {
        match *self {
            Self::UpwardGradient { a, b } => Piecewise::new(vec![
                Branch::new(Expr::Rising { from: a, to: b }, Condition::Between(a, b)),
                Branch::new(Expr::Constant(1.), Condition::AtLeast(b)),
            ]),
            Self::DownwardGradient { a, b } => Piecewise::new(vec![
                Branch::new(Expr::Falling { from: a, to: b }, Condition::Between(a, b)),
                Branch::new(Expr::Constant(1.), Condition::AtMost(a)),
            ]),
            Self::Trapezoidal { a, b, c, d } => trapezoid_membership(a, b, c, d),
            Self::Triangular { a, b, c } => trapezoid_membership(a, b, b, c),
        }
    }

    /// The alpha-cut function, clipped to `universe`
    pub fn alpha_cut(&self, universe: Universe) -> XmuFunction {
        let cut = match *self {
            Self::UpwardGradient { a, b } => {
                XmuFunction::cut(Bound::Lerp { at_zero: a, at_one: b }, Bound::Fixed(universe.sup()))
            },
            Self::DownwardGradient { a, b } => {
                XmuFunction::cut(Bound::Fixed(universe.inf()), Bound::Lerp { at_zero: b, at_one: a })
            },
            Self::Trapezoidal { a, b, c, d } => XmuFunction::cut(
                Bound::Lerp { at_zero: a, at_one: b },
                Bound::Lerp { at_zero: d, at_one: c },
            ),
            Self::Triangular { a, b, c } => XmuFunction::cut(
                Bound::Lerp { at_zero: a, at_one: b },
                Bound::Lerp { at_zero: c, at_one: b },
            ),
        };

        cut.intersect(&XmuFunction::Crisp(universe.interval()))
    }
}

fn trapezoid_membership(a: f64, b: f64, c: f64, d: f64) -> Piecewise {
    Piecewise::new(vec![
        Branch::new(Expr::Rising { from: a, to: b }, Condition::Between(a, b)),
        Branch::new(Expr::Constant(1.), Condition::Within(b, c)),
        Branch::new(Expr::Falling { from: c, to: d }, Condition::Between(c, d)),
    ])
}

pub fn gradient_up(universe: Universe, a: f64, b: f64) -> Result<FuzzyEntity> {
    FuzzyEntity::from_shape(universe, Shape::UpwardGradient { a, b })
}

pub fn gradient_down(universe: Universe, a: f64, b: f64) -> Result<FuzzyEntity> {
    FuzzyEntity::from_shape(universe, Shape::DownwardGradient { a, b })
}

pub fn trapezoidal(universe: Universe, a: f64, b: f64, c: f64, d: f64) -> Result<FuzzyEntity> {
    FuzzyEntity::from_shape(universe, Shape::Trapezoidal { a, b, c, d })
}

pub fn triangular(universe: Universe, a: f64, b: f64, c: f64) -> Result<FuzzyEntity> {
    FuzzyEntity::from_shape(universe, Shape::Triangular { a, b, c })
}
