//! The [`VectorizedValue`] representation shared by every animatable property.
//!
//! Animators never deal with concrete property types such as colors or points. Instead, each value
//! is flattened into a short list of `f32` components tagged with a [`ValueKind`], which is what
//! gets interpolated and composed. Conversion to and from concrete types is handled by the
//! [`Vectorize`](crate::vectorize::Vectorize) trait.

use crate::error::{AnimationError, Result};
use enum_map::{enum_map, Enum, EnumMap};
use lazy_static::lazy_static;
use smallvec::SmallVec;

/// Storage for the components of a [`VectorizedValue`]. Most kinds fit inline.
pub type Components = SmallVec<[f32; 4]>;

/// Semantic tag identifying what a [`VectorizedValue`] represents.
///
/// The set of kinds is closed; values of different kinds can never be interpolated with each
/// other, even if they happen to have the same number of components.
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub enum ValueKind {
    /// A single number, e.g. `x`, `y` or `alpha`.
    Scalar,
    /// A 2D point: `x`, `y`.
    Point,
    /// A 2D size: `width`, `height`.
    Size,
    /// An axis-aligned rectangle: `x`, `y`, `width`, `height`.
    Rect,
    /// An RGBA color with components in the `0..=1` range.
    Color,
    /// A 3D vector, typically a scale or translation.
    Vector3,
    /// An angle (in radians) around an axis: `angle`, `x`, `y`, `z`.
    Rotation,
    /// A decomposed 3D transform: scale (3), rotation (4) and translation (3).
    Transform,
    /// User-defined layout, normally produced by `#[derive(Vectorize)]`. Has no fixed length.
    Custom,
}

/// Per-kind capabilities consulted by the animator and compositor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KindCapabilities {
    /// Number of components every value of this kind has, or `None` for variable-length kinds.
    pub components: Option<usize>,
    /// Whether presentation-relative delta composition produces meaningful results.
    pub additive: bool,
}

lazy_static! {
    static ref CAPABILITIES: EnumMap<ValueKind, KindCapabilities> = enum_map! {
        kind @ (ValueKind::Rotation | ValueKind::Transform) => KindCapabilities {
            // Summing deltas of an axis vector does not describe a rotation.
            components: kind.fixed_components(),
            additive: false,
        },
        kind => KindCapabilities {
            components: kind.fixed_components(),
            additive: true,
        },
    };
}

impl ValueKind {
    /// Fixed component count of this kind, usable in constant expressions.
    pub const fn fixed_components(self) -> Option<usize> {
        match self {
            Self::Scalar => Some(1),
            Self::Point | Self::Size => Some(2),
            Self::Vector3 => Some(3),
            Self::Rect | Self::Color | Self::Rotation => Some(4),
            Self::Transform => Some(10),
            Self::Custom => None,
        }
    }

    /// Gets the capability table entry for this kind.
    pub fn capabilities(self) -> KindCapabilities {
        CAPABILITIES[self]
    }

    /// Gets the fixed component count of this kind, if it has one.
    pub fn component_count(self) -> Option<usize> {
        self.capabilities().components
    }

    /// Whether values of this kind may be composed additively.
    pub fn supports_additive(self) -> bool {
        self.capabilities().additive
    }
}

/// An interpolatable value, flattened into numeric components.
///
/// Immutable once constructed. Interpolation and composition always produce new instances.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorizedValue {
    kind: ValueKind,
    components: Components,
}

impl VectorizedValue {
    /// Creates a value of the given `kind`.
    ///
    /// Fails with [`AnimationError::ComponentCount`] if the kind has a fixed length and the number
    /// of `components` does not match it.
    pub fn new(kind: ValueKind, components: impl IntoIterator<Item = f32>) -> Result<Self> {
        let components: Components = components.into_iter().collect();
        if let Some(expected) = kind.component_count() {
            if components.len() != expected {
                return Err(AnimationError::ComponentCount {
                    kind,
                    expected,
                    actual: components.len(),
                });
            }
        }
        Ok(Self { kind, components })
    }

    /// Creates a [`ValueKind::Scalar`] value.
    pub fn scalar(value: f32) -> Self {
        Self {
            kind: ValueKind::Scalar,
            components: smallvec::smallvec![value],
        }
    }

    // Callers must already have checked the length against `kind`.
    pub(crate) fn from_parts(kind: ValueKind, components: Components) -> Self {
        debug_assert!(kind
            .component_count()
            .map_or(true, |count| count == components.len()));
        Self { kind, components }
    }

    /// Gets the kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Gets the raw components of this value.
    pub fn components(&self) -> &[f32] {
        &self.components
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the value has no components. Only possible for [`ValueKind::Custom`].
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Whether `other` has the same kind and the same number of components.
    pub fn is_compatible(&self, other: &VectorizedValue) -> bool {
        self.kind == other.kind && self.components.len() == other.components.len()
    }

    /// Returns [`AnimationError::TypeMismatch`] unless `other` is [compatible](Self::is_compatible).
    pub fn ensure_compatible(&self, other: &VectorizedValue) -> Result<()> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(AnimationError::TypeMismatch {
                from_kind: self.kind,
                from_len: self.components.len(),
                to_kind: other.kind,
                to_len: other.components.len(),
            })
        }
    }
}
