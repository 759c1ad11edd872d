//! Property keys and the standard set of animatable value types.

use crate::value::{Components, ValueKind};
use crate::vectorize::Vectorize;
use std::fmt::{self, Display};
use std::sync::Arc;

/// Opaque identifier of an animatable property on a target.
///
/// The core never interprets keys; they are only compared and handed to
/// [`TargetAdapter`](crate::target::TargetAdapter)s. A key may name a component of a larger
/// composite using a `.` separator (e.g. `transform.scale`), in which case all keys that share the
/// same [`composite`](Self::composite) are committed to the target together.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PropertyKey(Arc<str>);

impl PropertyKey {
    /// Creates a new key.
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    /// Gets the full key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Gets the composite this key belongs to: everything before the first `.`, or the whole key
    /// if there is no separator.
    pub fn composite(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// Whether this key names one part of a larger composite.
    pub fn is_component(&self) -> bool {
        self.0.contains('.')
    }
}

impl Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PropertyKey {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl AsRef<str> for PropertyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Well-known property keys understood by typical view adapters.
pub mod keys {
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const POSITION: &str = "position";
    pub const CENTER: &str = "center";
    pub const SIZE: &str = "size";
    pub const FRAME: &str = "frame";
    pub const ALPHA: &str = "alpha";
    pub const BACKGROUND_COLOR: &str = "backgroundColor";
    pub const FILL_COLOR: &str = "fillColor";
    pub const SCALE: &str = "transform.scale";
    pub const ROTATION: &str = "transform.rotation";
    pub const TRANSLATION: &str = "transform.translation";
    pub const TRANSFORM: &str = "transform";
}

macro_rules! impl_vectorize_for_struct {
    ($t:ident, $kind:expr, [$($field:ident),+]) => {
        impl Vectorize for $t {
            const KIND: ValueKind = $kind;
            const COMPONENTS: usize = [$(stringify!($field)),+].len();

            fn write_components(&self, out: &mut Components) {
                $( out.push(self.$field); )+
            }

            fn read_components(components: &[f32]) -> Self {
                let mut values = components.iter().copied();
                Self {
                    $( $field: values.next().unwrap_or_default(), )+
                }
            }
        }
    };
}

/// A 2D point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl_vectorize_for_struct!(Point, ValueKind::Point, [x, y]);

/// A 2D size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl_vectorize_for_struct!(Size, ValueKind::Size, [width, height]);

/// An axis-aligned rectangle given by its origin and size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl_vectorize_for_struct!(Rect, ValueKind::Rect, [x, y, width, height]);

/// An RGBA color with each channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}

impl_vectorize_for_struct!(Color, ValueKind::Color, [r, g, b, a]);

/// A 3D vector, used for scale and translation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    pub const ONE: Vector3 = Vector3::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl_vectorize_for_struct!(Vector3, ValueKind::Vector3, [x, y, z]);

/// A rotation of `angle` radians around the axis `(x, y, z)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    pub angle: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(angle: f32, x: f32, y: f32, z: f32) -> Self {
        Self { angle, x, y, z }
    }

    /// Rotation in the 2D plane, i.e. around the z axis.
    pub const fn z(angle: f32) -> Self {
        Self::new(angle, 0.0, 0.0, 1.0)
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl_vectorize_for_struct!(Rotation, ValueKind::Rotation, [angle, x, y, z]);

/// A 3D transform decomposed into scale, rotation and translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3,
    pub rotation: Rotation,
    pub translation: Vector3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: Vector3::ONE,
        rotation: Rotation::IDENTITY,
        translation: Vector3::ZERO,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Vectorize for Transform {
    const KIND: ValueKind = ValueKind::Transform;
    const COMPONENTS: usize = Vector3::COMPONENTS * 2 + Rotation::COMPONENTS;

    fn write_components(&self, out: &mut Components) {
        self.scale.write_components(out);
        self.rotation.write_components(out);
        self.translation.write_components(out);
    }

    fn read_components(components: &[f32]) -> Self {
        let (scale, rest) = components.split_at(Vector3::COMPONENTS);
        let (rotation, translation) = rest.split_at(Rotation::COMPONENTS);
        Self {
            scale: Vector3::read_components(scale),
            rotation: Rotation::read_components(rotation),
            translation: Vector3::read_components(translation),
        }
    }
}
