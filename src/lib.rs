//! Fuzzy numbers and sets through their alpha-cut (X-mu) representation.
//!
//! Instead of only storing a membership function `mu(x)`, every
//! [`FuzzyEntity`] also stores, for each cut level `alpha` in `[0, 1]`, the
//! part of the universe whose membership is at least `alpha`. Set operations
//! then become operations on alpha-parametrised intervals, valid for every
//! alpha at once, and fuzzy arithmetic becomes interval arithmetic at a
//! given alpha.
//!
//! ```
//! use xmu::{triangular, Universe};
//!
//! let u = Universe::new(0. ..=20.)?;
//! let a = triangular(u, 0., 10., 20.)?;
//! let b = triangular(u, 5., 15., 25.)?;
//!
//! let sum = a.add(&b, 0.5)?.expect("both cuts are non-empty");
//! assert_eq!(sum.alpha_cut_at(0.5)?.hull(), xmu::Interval::new(15., 35.));
//! # Ok::<(), xmu::XmuError>(())
//! ```

mod alpha;
mod cutset;
mod entity;
mod error;
mod interval;
mod linspace;
mod math;
mod membership;
mod ops;
mod shapes;
pub mod sweep;
mod universe;
mod xmu;

pub use alpha::Alpha;
pub use cutset::{CutSet, Part};
pub use entity::FuzzyEntity;
pub use error::{Result, XmuError};
pub use interval::Interval;
pub use linspace::Linspace;
pub use math::approx_eq;
pub use membership::{Branch, Condition, Expr, Membership, Piecewise};
pub use ops::{ArithOp, SetOp};
pub use shapes::{gradient_down, gradient_up, trapezoidal, triangular, Shape};
pub use universe::Universe;
pub use xmu::{Bound, XmuFunction};

#[test]
fn test_price_estimates() {
    use crate::sweep::{sample_arithmetic, AlphaGrid};

    // Two rough cost estimates and a discount, in a universe of 0..=100
    let u = Universe::new(0. ..=100.).unwrap();
    let parts = trapezoidal(u, 10., 20., 30., 40.).unwrap();
    let labour = triangular(u, 15., 25., 35.).unwrap();
    let cheap = gradient_down(u, 20., 50.).unwrap();

    let total = parts.add(&labour, 1.).unwrap().unwrap();
    assert_eq!(total.alpha_cut_at(1.).unwrap().hull(), Interval::new(45., 55.));

    let total = parts.add(&labour, 0.).unwrap().unwrap();
    assert_eq!(total.alpha_cut_at(0.).unwrap().hull(), Interval::new(25., 75.));

    // Where parts is cheap but labour isn't
    let cheap_parts = parts.intersect(&cheap);
    let only_parts = cheap_parts.difference(&labour);
    let cut = only_parts.alpha_cut_at(1.).unwrap();
    assert!(cut.contains(20.));
    assert!(!cut.contains(25.));

    let grid = AlphaGrid::new(Some(10));
    let sums = sample_arithmetic(&parts, &labour, ArithOp::Add, &grid).unwrap();
    assert_eq!(sums.len(), 11);
    // Every sum narrows as alpha grows
    for pair in sums.windows(2) {
        assert!(pair[0].1.contains_interval(&pair[1].1));
    }
}
