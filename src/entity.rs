use std::fmt;

use tracing::debug;

use crate::alpha::Alpha;
use crate::cutset::CutSet;
use crate::error::{Result, XmuError};
use crate::membership::{Branch, Condition, Expr, Membership, Piecewise};
use crate::ops::{ArithOp, SetOp};
use crate::shapes::Shape;
use crate::universe::Universe;
use crate::xmu::XmuFunction;

/// A fuzzy set or number: a universe, a membership function and the
/// alpha-cut (X-mu) function describing the same set.
///
/// Entities built from a [`Shape`] keep both functions consistent. Results
/// of set algebra and arithmetic only carry an alpha-cut function, and their
/// membership is [`Membership::Unavailable`].
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzyEntity {
    universe: Universe,
    membership: Membership,
    alpha_cut: XmuFunction,
    shape: Option<Shape>,
}

impl FuzzyEntity {
    /// Membership zero everywhere, empty at every alpha
    pub fn new(universe: Universe) -> Self {
        FuzzyEntity {
            universe,
            membership: Membership::default(),
            alpha_cut: XmuFunction::Empty,
            shape: None,
        }
    }

    /// The crisp set holding the whole universe at every alpha
    pub fn whole(universe: Universe) -> Self {
        FuzzyEntity {
            universe,
            membership: Piecewise::new(vec![Branch::new(Expr::Constant(1.), Condition::Always)]).into(),
            alpha_cut: XmuFunction::Crisp(universe.interval()),
            shape: None,
        }
    }

    pub fn from_shape(universe: Universe, shape: Shape) -> Result<Self> {
        let mut this = Self::new(universe);

        this.reshape(shape)?;

        Ok(this)
    }

    fn derived(universe: Universe, alpha_cut: XmuFunction) -> Self {
        FuzzyEntity {
            universe,
            membership: Membership::Unavailable,
            alpha_cut,
            shape: None,
        }
    }

    /// Regenerates both functions from new control points. On error the
    /// entity is left untouched.
    pub fn reshape(&mut self, shape: Shape) -> Result<()> {
        shape.validate()?;

        self.membership = shape.membership().into();
        self.alpha_cut = shape.alpha_cut(self.universe);
        self.shape = Some(shape);

        debug!(shape = shape.name(), points = ?shape.control_points(), universe = %self.universe, "generated fuzzy entity");

        Ok(())
    }

    pub fn universe(&self) -> Universe {
        self.universe
    }

    /// Shape cuts are clipped to the universe, so they're regenerated for the new one.
    /// On a derived entity, complements taken against the old universe move to the
    /// new one; its operands stay clipped to the universes they were built in.
    pub fn set_universe(&mut self, universe: Universe) {
        let previous = std::mem::replace(&mut self.universe, universe);

        self.alpha_cut = match self.shape {
            Some(shape) => shape.alpha_cut(universe),
            None => self.alpha_cut.rebase(previous, universe),
        };
    }

    /// The control points both functions were generated from, if any
    pub fn shape(&self) -> Option<Shape> {
        self.shape
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    /// Low level; the caller is responsible for keeping it consistent with the alpha-cut function.
    pub fn set_membership(&mut self, membership: impl Into<Membership>) {
        self.membership = membership.into();
        self.shape = None;
    }

    pub fn alpha_cut(&self) -> &XmuFunction {
        &self.alpha_cut
    }

    /// Low level; the caller is responsible for keeping it consistent with the membership function.
    pub fn set_alpha_cut(&mut self, alpha_cut: XmuFunction) {
        self.alpha_cut = alpha_cut;
        self.shape = None;
    }

    pub fn membership_at(&self, x: f64) -> Result<f64> {
        if !self.universe.contains(x) {
            return Err(XmuError::OutsideUniverse {
                x,
                inf: self.universe.inf(),
                sup: self.universe.sup(),
            });
        }

        self.membership.eval(x)
    }

    pub fn alpha_cut_at(&self, alpha: f64) -> Result<CutSet> {
        Ok(self.alpha_cut.at(Alpha::new(alpha)?))
    }

    pub fn combine(&self, target: &FuzzyEntity, op: SetOp) -> FuzzyEntity {
        let alpha_cut = match op {
            SetOp::Intersect => self.alpha_cut.intersect(&target.alpha_cut),
            SetOp::Union => self.alpha_cut.union(&target.alpha_cut),
            SetOp::Difference => self.alpha_cut.difference(&target.alpha_cut),
        };

        Self::derived(self.universe, alpha_cut)
    }

    pub fn intersect(&self, target: &FuzzyEntity) -> FuzzyEntity {
        self.combine(target, SetOp::Intersect)
    }

    pub fn union(&self, target: &FuzzyEntity) -> FuzzyEntity {
        self.combine(target, SetOp::Union)
    }

    /// `self` minus `target`
    pub fn difference(&self, target: &FuzzyEntity) -> FuzzyEntity {
        self.combine(target, SetOp::Difference)
    }

    /// The universe minus `self`
    pub fn negate(&self) -> FuzzyEntity {
        Self::derived(self.universe, self.alpha_cut.complement(self.universe))
    }

    /// Applies `op` to both alpha-cuts at one concrete alpha.
    ///
    /// Interval arithmetic doesn't distribute over a free alpha, so the
    /// result only describes the given level. `Ok(None)` means there is no
    /// result: a cut is empty at that alpha, or the operation is undefined
    /// over the reals. A cut made of several intervals takes part through
    /// its hull.
    pub fn arithmetic(&self, target: &FuzzyEntity, alpha: f64, op: ArithOp) -> Result<Option<FuzzyEntity>> {
        let alpha = Alpha::new(alpha)?;
        let (Some(lhs), Some(rhs)) = (self.alpha_cut.at(alpha).hull(), target.alpha_cut.at(alpha).hull()) else {
            debug!(%alpha, %op, "no result: empty alpha-cut operand");
            return Ok(None);
        };
        let Some(result) = op.call(lhs, rhs) else {
            debug!(%alpha, %op, %lhs, %rhs, "no result: undefined over the reals");
            return Ok(None);
        };

        Ok(Some(Self::derived(self.universe, XmuFunction::Crisp(result))))
    }

    pub fn add(&self, target: &FuzzyEntity, alpha: f64) -> Result<Option<FuzzyEntity>> {
        self.arithmetic(target, alpha, ArithOp::Add)
    }

    pub fn sub(&self, target: &FuzzyEntity, alpha: f64) -> Result<Option<FuzzyEntity>> {
        self.arithmetic(target, alpha, ArithOp::Sub)
    }

    pub fn mul(&self, target: &FuzzyEntity, alpha: f64) -> Result<Option<FuzzyEntity>> {
        self.arithmetic(target, alpha, ArithOp::Mul)
    }

    pub fn div(&self, target: &FuzzyEntity, alpha: f64) -> Result<Option<FuzzyEntity>> {
        self.arithmetic(target, alpha, ArithOp::Div)
    }

    pub fn pow(&self, target: &FuzzyEntity, alpha: f64) -> Result<Option<FuzzyEntity>> {
        self.arithmetic(target, alpha, ArithOp::Pow)
    }
}

/// Shows the membership formula
impl fmt::Display for FuzzyEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.membership)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::cutset::Part;
    use crate::interval::Interval;
    use crate::shapes::{gradient_down, gradient_up, trapezoidal, triangular};

    fn universe() -> Universe {
        Universe::new(0. ..=10.).unwrap()
    }

    fn closed(lo: f64, hi: f64) -> CutSet {
        CutSet::from(Interval::new(lo, hi).unwrap())
    }

    fn interval_of(entity: &FuzzyEntity) -> Interval<f64> {
        match entity.alpha_cut() {
            XmuFunction::Crisp(interval) => *interval,
            other => panic!("expected an arithmetic result, got {other}"),
        }
    }

    #[test]
    fn test_new_entity_defaults() {
        let e = FuzzyEntity::new(universe());

        assert_eq!(e.membership_at(3.), Ok(0.));
        assert!(e.alpha_cut_at(0.).unwrap().is_empty());
        assert_eq!(e.shape(), None);
        assert_eq!(
            e.membership_at(11.),
            Err(XmuError::OutsideUniverse {
                x: 11.,
                inf: 0.,
                sup: 10.
            })
        );
    }

    #[test]
    fn test_reshape_regenerates_both_functions() {
        let mut e = triangular(universe(), 2., 5., 8.).unwrap();

        e.reshape(Shape::Triangular { a: 0., b: 1., c: 2. }).unwrap();
        assert_eq!(e.membership_at(1.), Ok(1.));
        assert_eq!(e.alpha_cut_at(0.).unwrap(), closed(0., 2.));

        // Rejected points leave the entity as it was
        assert!(e.reshape(Shape::Triangular { a: 3., b: 1., c: 2. }).is_err());
        assert_eq!(e.shape(), Some(Shape::Triangular { a: 0., b: 1., c: 2. }));
    }

    #[test]
    fn test_replacing_universe_reclips() {
        let mut e = gradient_up(universe(), 2., 6.).unwrap();

        e.set_universe(Universe::new(0. ..=20.).unwrap());
        assert_eq!(e.alpha_cut_at(1.).unwrap(), closed(6., 20.));
    }

    #[test]
    fn test_replacing_universe_moves_negation() {
        let mut not_a = triangular(universe(), 2., 5., 8.).unwrap().negate();

        not_a.set_universe(Universe::new(0. ..=20.).unwrap());

        let cut = not_a.alpha_cut_at(1.).unwrap();
        assert!(cut.contains(15.) && cut.contains(20.));
        assert!(!cut.contains(5.));
        assert_eq!(cut.hull(), Interval::new(0., 20.));
    }

    #[test]
    fn test_low_level_setters_drop_shape() {
        let mut e = triangular(universe(), 2., 5., 8.).unwrap();

        e.set_alpha_cut(XmuFunction::Crisp(Interval::new(1., 2.).unwrap()));
        assert_eq!(e.shape(), None);
        assert_eq!(e.alpha_cut_at(0.7).unwrap(), closed(1., 2.));

        e.set_membership(Membership::Unavailable);
        assert_eq!(e.membership_at(1.), Err(XmuError::MembershipUnavailable));
    }

    #[test]
    fn test_set_algebra() {
        let a = triangular(universe(), 0., 3., 6.).unwrap();
        let b = triangular(universe(), 4., 7., 10.).unwrap();

        assert_eq!(a.intersect(&b).alpha_cut_at(0.).unwrap(), closed(4., 6.));
        assert!(a.intersect(&b).alpha_cut_at(0.5).unwrap().is_empty());

        let union = a.union(&b).alpha_cut_at(0.5).unwrap();
        assert_eq!(union.parts(), &[Part::closed(1.5, 4.5), Part::closed(5.5, 8.5)]);

        let difference = a.difference(&b).alpha_cut_at(0.).unwrap();
        assert_eq!(
            difference.parts(),
            &[Part {
                lo: 0.,
                hi: 4.,
                lo_closed: true,
                hi_closed: false,
            }]
        );

        // Operand order matters
        let reversed = b.difference(&a).alpha_cut_at(0.).unwrap();
        assert_eq!(reversed.parts()[0].lo, 6.);
    }

    #[test]
    fn test_set_algebra_has_no_membership() {
        let a = gradient_up(universe(), 2., 6.).unwrap();
        let b = gradient_down(universe(), 4., 8.).unwrap();

        for derived in [a.intersect(&b), a.union(&b), a.difference(&b), a.negate()] {
            assert_eq!(derived.membership_at(5.), Err(XmuError::MembershipUnavailable));
            assert_eq!(derived.universe(), universe());
        }
    }

    #[test]
    fn test_negation() {
        let a = trapezoidal(universe(), 2., 4., 6., 8.).unwrap();
        let not_a = a.negate();

        let cut = not_a.alpha_cut_at(1.).unwrap();
        assert!(cut.contains(0.) && cut.contains(3.9) && cut.contains(10.));
        assert!(!cut.contains(4.) && !cut.contains(6.));

        let whole = FuzzyEntity::whole(universe());
        for value in [0., 0.3, 0.5, 1.] {
            assert_eq!(
                not_a.negate().alpha_cut_at(value).unwrap(),
                a.intersect(&whole).alpha_cut_at(value).unwrap()
            );
        }

        assert!(whole.negate().alpha_cut_at(0.5).unwrap().is_empty());
        assert_eq!(FuzzyEntity::new(universe()).negate().alpha_cut_at(0.5).unwrap(), closed(0., 10.));
    }

    #[test]
    fn test_arithmetic_scenario() {
        let u = Universe::new(0. ..=20.).unwrap();
        let a = triangular(u, 0., 10., 20.).unwrap();
        let b = triangular(u, 5., 15., 25.).unwrap();

        assert_eq!(a.alpha_cut_at(0.5).unwrap(), closed(5., 15.));
        // Clipped to the universe
        assert_eq!(b.alpha_cut_at(0.5).unwrap(), closed(10., 20.));

        let sum = a.add(&b, 0.5).unwrap().unwrap();
        assert_eq!(interval_of(&sum), Interval::new(15., 35.).unwrap());
        assert_eq!(sum.universe(), u);
        assert_eq!(sum.membership_at(1.), Err(XmuError::MembershipUnavailable));

        let difference = a.sub(&b, 0.5).unwrap().unwrap();
        assert_eq!(interval_of(&difference), Interval::new(-15., 5.).unwrap());

        let product = a.mul(&b, 0.5).unwrap().unwrap();
        assert_eq!(interval_of(&product), Interval::new(50., 300.).unwrap());

        let quotient = a.div(&b, 0.5).unwrap().unwrap();
        assert!(interval_of(&quotient).approx_eq(&Interval::new(0.25, 1.5).unwrap(), 1e-12));
    }

    #[test]
    fn test_power() {
        let u = Universe::new(-5. ..=5.).unwrap();
        let base = triangular(u, -2., 1., 3.).unwrap();
        let two = triangular(u, 2., 2., 2.).unwrap();
        let half = triangular(u, 0.5, 0.5, 0.5).unwrap();

        let squared = base.pow(&two, 0.).unwrap().unwrap();
        assert_eq!(interval_of(&squared), Interval::new(0., 9.).unwrap());

        // Square root of negative numbers
        assert_eq!(base.pow(&half, 0.), Ok(None));
        assert!(base.pow(&half, 1.).unwrap().is_some());
    }

    #[test]
    fn test_division_by_zero_is_no_result() {
        let a = triangular(universe(), 2., 5., 8.).unwrap();
        let around_zero = gradient_down(universe(), 1., 3.).unwrap();

        assert_eq!(a.div(&around_zero, 0.5), Ok(None));
        assert_eq!(a.div(&around_zero, 1.), Ok(None));
    }

    #[test]
    fn test_empty_operand_is_no_result() {
        let a = triangular(universe(), 2., 5., 8.).unwrap();
        let outside = triangular(universe(), 8., 12., 16.).unwrap();

        for op in ArithOp::ALL {
            assert_eq!(a.arithmetic(&outside, 0.9, op), Ok(None));
            assert_eq!(outside.arithmetic(&a, 0.9, op), Ok(None));
        }
        assert_eq!(a.add(&FuzzyEntity::new(universe()), 0.2), Ok(None));
    }

    #[test]
    fn test_alpha_out_of_range() {
        let a = triangular(universe(), 2., 5., 8.).unwrap();

        assert_eq!(a.add(&a, 1.2), Err(XmuError::AlphaOutOfRange(1.2)));
        assert_eq!(a.add(&a, -0.01), Err(XmuError::AlphaOutOfRange(-0.01)));
        assert_eq!(a.alpha_cut_at(2.), Err(XmuError::AlphaOutOfRange(2.)));
    }

    #[test]
    fn test_add_then_sub_round_trip() {
        let a = triangular(universe(), 2., 5., 8.).unwrap();
        let b = triangular(universe(), 1., 4., 9.).unwrap();

        // Exact when the subtracted cut is a single point
        let sum = a.add(&b, 1.).unwrap().unwrap();
        let back = sum.sub(&b, 1.).unwrap().unwrap();
        assert_eq!(interval_of(&back), Interval::point(5.));

        // Otherwise interval subtraction only encloses the original
        let sum = a.add(&b, 0.5).unwrap().unwrap();
        let back = sum.sub(&b, 0.5).unwrap().unwrap();
        let original = a.alpha_cut_at(0.5).unwrap().hull().unwrap();
        assert!(interval_of(&back).contains_interval(&original));
    }

    #[test]
    fn test_display() {
        let a = gradient_up(universe(), 2., 6.).unwrap();

        assert_eq!(a.to_string(), "Piecewise(((x - 2)/(6 - 2), 2 < x < 6), (1, x >= 6), (0, True))");
        assert_eq!(a.negate().to_string(), "Unavailable");
    }

    fn triangles() -> impl Strategy<Value = FuzzyEntity> {
        proptest::collection::vec(-2f64..12., 3).prop_map(|mut p| {
            p.sort_by(|a, b| a.partial_cmp(b).unwrap());
            triangular(universe(), p[0], p[1], p[2]).unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_union_and_intersection_commute(a in triangles(), b in triangles(), alpha in 0f64..=1.) {
            prop_assert_eq!(a.union(&b).alpha_cut_at(alpha).unwrap(), b.union(&a).alpha_cut_at(alpha).unwrap());
            prop_assert_eq!(
                a.intersect(&b).alpha_cut_at(alpha).unwrap(),
                b.intersect(&a).alpha_cut_at(alpha).unwrap()
            );
        }

        #[test]
        fn prop_double_negation(a in triangles(), alpha in 0f64..=1.) {
            let whole = FuzzyEntity::whole(universe());

            prop_assert_eq!(
                a.negate().negate().alpha_cut_at(alpha).unwrap(),
                a.intersect(&whole).alpha_cut_at(alpha).unwrap()
            );
        }

        #[test]
        fn prop_add_then_sub_encloses(a in triangles(), b in triangles(), alpha in 0f64..=1.) {
            let (Some(lhs), Some(_)) = (a.alpha_cut_at(alpha).unwrap().hull(), b.alpha_cut_at(alpha).unwrap().hull()) else {
                return Ok(());
            };
            let sum = a.add(&b, alpha).unwrap().unwrap();
            let back = interval_of(&sum.sub(&b, alpha).unwrap().unwrap());

            prop_assert!(back.lo() <= lhs.lo() + 1e-9 && lhs.hi() <= back.hi() + 1e-9);
        }
    }
}
