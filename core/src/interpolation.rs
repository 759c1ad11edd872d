//! Linear interpolation of scalars and [`VectorizedValue`]s.

use crate::error::Result;
use crate::value::{Components, VectorizedValue};

/// Trait for a type that supports the standard `lerp` (**l**inear int**erp**olation) operation.
///
/// `Lerp` assumes a normalized `x` value, such that `x0 = 0` and `x1 = 1`:
///
/// `lerp(y0, y1, x) = y0 + x(y1 - y0)`
///
/// # Example
///
/// ```
/// use kinetic_core::interpolation::Lerp;
///
/// let y0: f32 = 5.0;
/// let y1: f32 = 15.0;
///
/// assert_eq!(y0.lerp(&y1, 0.0), 5.0);
/// assert_eq!(y0.lerp(&y1, 0.25), 7.5);
/// assert_eq!(y0.lerp(&y1, 1.0), 15.0);
/// ```
pub trait Lerp {
    /// Computes the linear interpolation between this value (`y0`) and `y1` at position `x`.
    ///
    /// `x` is not clamped, so values outside `0..=1` extrapolate along the same line.
    fn lerp(&self, y1: &Self, x: f32) -> Self;
}

// `y0 + x(y1 - y0)` and `y0(1 - x) + y1 x` are equal in theory, but only the second one returns
// exactly `y0` and `y1` at the endpoints under floating-point rounding.

impl Lerp for f32 {
    fn lerp(&self, y1: &Self, x: f32) -> Self {
        self * (1.0 - x) + y1 * x
    }
}

impl Lerp for f64 {
    fn lerp(&self, y1: &Self, x: f32) -> Self {
        let x = x as f64;
        self * (1.0 - x) + y1 * x
    }
}

/// Interpolates each component of `from` toward `to` at `progress`.
///
/// Fails with [`TypeMismatch`](crate::error::AnimationError::TypeMismatch) if the two values have
/// different kinds or lengths. `progress` is used as-is; clamping is the caller's responsibility,
/// which lets spring overshoot extrapolate past `to`.
pub fn interpolate(
    from: &VectorizedValue,
    to: &VectorizedValue,
    progress: f32,
) -> Result<VectorizedValue> {
    from.ensure_compatible(to)?;
    let components: Components = from
        .components()
        .iter()
        .zip(to.components())
        .map(|(a, b)| a.lerp(b, progress))
        .collect();
    Ok(VectorizedValue::from_parts(from.kind(), components))
}

impl VectorizedValue {
    /// Method form of [`interpolate`].
    pub fn interpolate(&self, to: &VectorizedValue, progress: f32) -> Result<VectorizedValue> {
        interpolate(self, to, progress)
    }
}
