use num::Float;

pub(crate) fn is_integer<F: Float>(x: F) -> bool {
    x.is_finite() && x.fract() == F::zero()
}

/// Only meaningful when `x` is an integer
pub(crate) fn is_even<F: Float>(x: F) -> bool {
    let two = F::one() + F::one();

    (x / two).fract() == F::zero()
}

/// Smallest and largest of a non-empty set of values
pub(crate) fn min_max<F: Float>(values: impl IntoIterator<Item = F>) -> (F, F) {
    values
        .into_iter()
        .fold((F::infinity(), F::neg_infinity()), |(min, max), v| (min.min(v), max.max(v)))
}

/// Absolute comparison, used where results pass through more than one rounding
pub fn approx_eq<F: Float>(a: F, b: F, tolerance: F) -> bool {
    a == b || (a - b).abs() <= tolerance
}

#[test]
fn test_parity() {
    assert!(is_integer(3.));
    assert!(is_integer(-4.));
    assert!(!is_integer(0.5));
    assert!(!is_integer(f64::INFINITY));

    assert!(is_even(2.));
    assert!(is_even(-4.));
    assert!(is_even(0.));
    assert!(!is_even(3.));
    assert!(!is_even(-1.));
}

#[test]
fn test_min_max() {
    assert_eq!(min_max([3., -1., 7.5, 2.]), (-1., 7.5));
    assert_eq!(min_max([4f32]), (4., 4.));
}
