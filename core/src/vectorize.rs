//! Conversion between concrete property types and [`VectorizedValue`].

use crate::error::{AnimationError, Result};
use crate::value::{Components, ValueKind, VectorizedValue};
use num_traits::{FromPrimitive, ToPrimitive};

/// Trait for types that can be animated by flattening them into a [`VectorizedValue`].
///
/// Implementors only describe their layout; [`vectorize`](Self::vectorize) and
/// [`from_vectorized`](Self::from_vectorized) are provided. Structs composed entirely of
/// vectorizable fields can use `#[derive(Vectorize)]` instead of implementing this by hand.
pub trait Vectorize: Sized {
    /// Kind tag written into every vectorized value of this type.
    const KIND: ValueKind;

    /// Number of components written by [`write_components`](Self::write_components).
    const COMPONENTS: usize;

    /// Appends exactly [`COMPONENTS`](Self::COMPONENTS) values to `out`.
    fn write_components(&self, out: &mut Components);

    /// Rebuilds a value from a slice of exactly [`COMPONENTS`](Self::COMPONENTS) values.
    fn read_components(components: &[f32]) -> Self;

    /// Flattens this value.
    fn vectorize(&self) -> VectorizedValue {
        let mut components = Components::new();
        self.write_components(&mut components);
        VectorizedValue::from_parts(Self::KIND, components)
    }

    /// Rebuilds a value from its vectorized form.
    ///
    /// Fails with [`AnimationError::TypeMismatch`] if `value` has a different kind or length.
    fn from_vectorized(value: &VectorizedValue) -> Result<Self> {
        if value.kind() != Self::KIND || value.len() != Self::COMPONENTS {
            return Err(AnimationError::TypeMismatch {
                from_kind: value.kind(),
                from_len: value.len(),
                to_kind: Self::KIND,
                to_len: Self::COMPONENTS,
            });
        }
        Ok(Self::read_components(value.components()))
    }
}

impl Vectorize for f32 {
    const KIND: ValueKind = ValueKind::Scalar;
    const COMPONENTS: usize = 1;

    fn write_components(&self, out: &mut Components) {
        out.push(*self);
    }

    fn read_components(components: &[f32]) -> Self {
        components[0]
    }
}

impl Vectorize for f64 {
    const KIND: ValueKind = ValueKind::Scalar;
    const COMPONENTS: usize = 1;

    fn write_components(&self, out: &mut Components) {
        out.push(*self as f32);
    }

    fn read_components(components: &[f32]) -> Self {
        components[0] as f64
    }
}

// Integers are stored as f32 and rounded to the nearest value when read back. Results outside the
// range of the type saturate to its bounds.
macro_rules! impl_vectorize_for_integer_types {
    ($($t:ty),*) => {
        $( impl Vectorize for $t {
            const KIND: ValueKind = ValueKind::Scalar;
            const COMPONENTS: usize = 1;

            fn write_components(&self, out: &mut Components) {
                out.push(self.to_f32().unwrap_or(f32::NAN));
            }

            fn read_components(components: &[f32]) -> Self {
                let rounded = components[0].round();
                <$t>::from_f32(rounded)
                    .unwrap_or(if rounded < 0.0 { <$t>::MIN } else { <$t>::MAX })
            }
        }) *
    }
}

impl_vectorize_for_integer_types! { i8, i16, i32, i64, u8, u16, u32, u64, usize }
