//! Error types shared by every part of the animation core.

use crate::properties::PropertyKey;
use crate::value::ValueKind;
use thiserror::Error;

/// Errors produced while constructing or running animations.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum AnimationError {
    /// Two values could not be combined because their kinds or component counts differ.
    ///
    /// Raised by interpolation and additive composition. Fatal only to the animator that raised it.
    #[error(
        "cannot combine {from_kind:?} ({from_len} components) with {to_kind:?} ({to_len} components)"
    )]
    TypeMismatch {
        from_kind: ValueKind,
        from_len: usize,
        to_kind: ValueKind,
        to_len: usize,
    },

    /// A timing function selector did not name any known easing.
    #[error("unsupported easing: {0}")]
    UnsupportedEasing(String),

    /// A value of a fixed-size kind was created with the wrong number of components.
    #[error("{kind:?} values have {expected} components, got {actual}")]
    ComponentCount {
        kind: ValueKind,
        expected: usize,
        actual: usize,
    },

    /// Spring parameters were negative or not finite.
    #[error("invalid spring parameters: tension = {tension}, friction = {friction}")]
    InvalidSpring { tension: f32, friction: f32 },

    /// The target does not expose the requested property.
    #[error("property '{0}' is not supported by the target")]
    UnsupportedProperty(PropertyKey),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, AnimationError>;
