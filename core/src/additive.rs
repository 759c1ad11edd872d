//! Presentation-relative composition for additive animators.
//!
//! An additive animator does not write its interpolated value directly. It writes only the change
//! since its previous tick on top of whatever the target currently shows, so that several
//! animators on the same property sum their motion instead of fighting over it:
//!
//! `output = presentation + (interpolated - previous)`

use crate::error::Result;
use crate::value::{Components, VectorizedValue};

/// Composes one tick of an additive animator.
///
/// - `interpolated` is the animator's value for this tick.
/// - `previous` is the animator's value for the previous tick (or `from` on the first tick).
/// - `presentation` is the target's live value, read just before applying.
///
/// When there is no presentation value to compose against, `interpolated` is returned unchanged.
/// All three values must be [compatible](VectorizedValue::is_compatible), otherwise this fails with
/// [`TypeMismatch`](crate::error::AnimationError::TypeMismatch).
pub fn compose(
    interpolated: &VectorizedValue,
    previous: &VectorizedValue,
    presentation: Option<&VectorizedValue>,
) -> Result<VectorizedValue> {
    interpolated.ensure_compatible(previous)?;
    let Some(presentation) = presentation else {
        return Ok(interpolated.clone());
    };
    presentation.ensure_compatible(interpolated)?;
    let components: Components = presentation
        .components()
        .iter()
        .zip(interpolated.components())
        .zip(previous.components())
        .map(|((base, current), last)| base + (current - last))
        .collect();
    Ok(VectorizedValue::from_parts(interpolated.kind(), components))
}
