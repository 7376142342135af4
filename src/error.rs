use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum XmuError {
    #[error("invalid universe [{inf}, {sup}]: bounds must be finite with inf <= sup")]
    InvalidUniverse { inf: f64, sup: f64 },
    #[error("invalid control points {points:?} for {shape}: points must be finite and non-decreasing")]
    InvalidControlPoints { shape: &'static str, points: Vec<f64> },
    #[error("alpha {0} is outside [0, 1]")]
    AlphaOutOfRange(f64),
    /// Set algebra and arithmetic results carry only an alpha-cut function.
    #[error("membership function is unavailable for an entity derived from set algebra or arithmetic")]
    MembershipUnavailable,
    #[error("{x} lies outside the universe [{inf}, {sup}]")]
    OutsideUniverse { x: f64, inf: f64, sup: f64 },
}

pub type Result<T, E = XmuError> = std::result::Result<T, E>;
