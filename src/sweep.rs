//! Sampling over a grid of alphas, for consumers such as plotters that draw
//! each cut as a bar at its alpha.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::alpha::Alpha;
use crate::cutset::CutSet;
use crate::entity::FuzzyEntity;
use crate::error::Result;
use crate::interval::Interval;
use crate::linspace::Linspace;
use crate::ops::ArithOp;
use crate::xmu::XmuFunction;

/// Evenly spaced alphas from 0 to 1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlphaGrid {
    granularity: usize,
}

impl AlphaGrid {
    /// If the granularity is not provided, it defaults to 100. It is the
    /// number of steps between 0 and 1, so the grid holds one more alpha.
    pub fn new(granularity: Option<usize>) -> Self {
        AlphaGrid {
            granularity: granularity.unwrap_or(100).max(1),
        }
    }

    pub fn granularity(&self) -> usize {
        self.granularity
    }

    /// Width of one step, i.e. of a bar
    pub fn step(&self) -> f64 {
        1. / self.granularity as f64
    }

    pub fn alphas(&self) -> impl Iterator<Item = Alpha> {
        Linspace::new(0., 1., self.granularity + 1).map(Alpha::from_unit)
    }
}

impl Default for AlphaGrid {
    fn default() -> Self {
        AlphaGrid::new(None)
    }
}

/// One drawable piece of a cut
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub alpha: Alpha,
    pub start: f64,
    pub length: f64,
}

/// The non-empty cuts of `f` over the grid
pub fn sample_cuts(f: &XmuFunction, grid: &AlphaGrid) -> Vec<(Alpha, CutSet)> {
    grid.alphas()
        .map(|alpha| (alpha, f.at(alpha)))
        .filter(|(_, cut)| !cut.is_empty())
        .collect()
}

/// Splits sampled cuts into one bar per interval
pub fn bars<'s>(samples: impl IntoIterator<Item = &'s (Alpha, CutSet)>) -> Vec<Bar> {
    samples
        .into_iter()
        .flat_map(|(alpha, cut)| {
            cut.parts().iter().map(move |part| Bar {
                alpha: *alpha,
                start: part.lo,
                length: part.hi - part.lo,
            })
        })
        .collect()
}

/// `lhs op rhs` at every alpha of the grid, skipping alphas without a result
pub fn sample_arithmetic(
    lhs: &FuzzyEntity,
    rhs: &FuzzyEntity,
    op: ArithOp,
    grid: &AlphaGrid,
) -> Result<Vec<(Alpha, Interval<f64>)>> {
    let mut samples = Vec::with_capacity(grid.granularity + 1);

    for alpha in grid.alphas() {
        if let Some(interval) = arithmetic_at(lhs, rhs, op, alpha)? {
            samples.push((alpha, interval));
        }
    }

    Ok(samples)
}

/// Same as [`sample_arithmetic`], with the alphas evaluated in parallel
#[cfg(feature = "parallel")]
pub fn par_sample_arithmetic(
    lhs: &FuzzyEntity,
    rhs: &FuzzyEntity,
    op: ArithOp,
    grid: &AlphaGrid,
) -> Result<Vec<(Alpha, Interval<f64>)>> {
    let alphas: Vec<_> = grid.alphas().collect();
    let results = alphas
        .par_iter()
        .map(|&alpha| Ok(arithmetic_at(lhs, rhs, op, alpha)?.map(|interval| (alpha, interval))))
        .collect::<Result<Vec<_>>>()?;

    Ok(results.into_iter().flatten().collect())
}

fn arithmetic_at(lhs: &FuzzyEntity, rhs: &FuzzyEntity, op: ArithOp, alpha: Alpha) -> Result<Option<Interval<f64>>> {
    let result = lhs.arithmetic(rhs, alpha.get(), op)?;

    Ok(result.and_then(|entity| entity.alpha_cut().at(alpha).hull()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::triangular;
    use crate::universe::Universe;

    fn universe() -> Universe {
        Universe::new(0. ..=10.).unwrap()
    }

    #[test]
    fn test_grid() {
        let grid = AlphaGrid::default();
        let alphas: Vec<_> = grid.alphas().map(Alpha::get).collect();

        assert_eq!(grid.granularity(), 100);
        assert_eq!(alphas.len(), 101);
        assert_eq!(alphas[0], 0.);
        assert_eq!(alphas[100], 1.);
        assert_eq!(grid.step(), 0.01);

        let grid = AlphaGrid::new(Some(4));
        assert_eq!(grid.alphas().map(Alpha::get).collect::<Vec<_>>(), vec![0., 0.25, 0.5, 0.75, 1.]);
        assert_eq!(AlphaGrid::new(Some(0)).granularity(), 1);
    }

    #[test]
    fn test_sample_cuts_skips_empty() {
        // Leaves the universe above alpha 0.5
        let t = triangular(universe(), 5., 15., 25.).unwrap();
        let samples = sample_cuts(t.alpha_cut(), &AlphaGrid::new(Some(4)));

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[2].0.get(), 0.5);

        let bars = bars(&samples);
        assert_eq!(bars[0], Bar { alpha: Alpha::ZERO, start: 5., length: 5. });
        assert_eq!(bars[2].length, 0.);
    }

    #[test]
    fn test_bars_split_disjoint_cuts() {
        let a = triangular(universe(), 0., 3., 6.).unwrap();
        let b = triangular(universe(), 4., 7., 10.).unwrap();
        let samples = sample_cuts(a.union(&b).alpha_cut(), &AlphaGrid::new(Some(2)));

        // One bar at alpha 0, two at 0.5 and 1
        assert_eq!(bars(&samples).len(), 5);
    }

    #[test]
    fn test_sample_arithmetic() {
        let a = triangular(universe(), 2., 5., 8.).unwrap();
        let b = triangular(universe(), 0., 1., 2.).unwrap();
        let grid = AlphaGrid::new(Some(4));

        let sums = sample_arithmetic(&a, &b, ArithOp::Add, &grid).unwrap();
        assert_eq!(sums.len(), 5);
        assert_eq!(sums[0].1, Interval::new(2., 10.).unwrap());
        assert_eq!(sums[4].1, Interval::point(6.));

        // b's cut contains zero up to alpha 0; from 0.25 on it doesn't
        let quotients = sample_arithmetic(&a, &b, ArithOp::Div, &grid).unwrap();
        assert_eq!(quotients.len(), 4);
        assert_eq!(quotients[0].0.get(), 0.25);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let a = triangular(universe(), 2., 5., 8.).unwrap();
        let b = triangular(universe(), 0., 1., 2.).unwrap();
        let grid = AlphaGrid::default();

        for op in ArithOp::ALL {
            assert_eq!(
                par_sample_arithmetic(&a, &b, op, &grid).unwrap(),
                sample_arithmetic(&a, &b, op, &grid).unwrap()
            );
        }
    }
}
