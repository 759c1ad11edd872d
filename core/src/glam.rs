//! Support for the Glam library. Adds [Vectorize] implementations for vector and quaternion types.

use crate::value::{Components, ValueKind};
use crate::vectorize::Vectorize;
use glam::{DVec2, DVec3, DVec4, Quat, Vec2, Vec3, Vec3A, Vec4};

macro_rules! impl_vectorize2 {
    ($kind:expr, $elem:ty, $($t:ty),*) => {
        $( impl Vectorize for $t {
            const KIND: ValueKind = $kind;
            const COMPONENTS: usize = 2;

            fn write_components(&self, out: &mut Components) {
                out.extend([self.x as f32, self.y as f32]);
            }

            fn read_components(c: &[f32]) -> Self {
                Self::new(c[0] as $elem, c[1] as $elem)
            }
        }) *
    }
}

macro_rules! impl_vectorize3 {
    ($kind:expr, $elem:ty, $($t:ty),*) => {
        $( impl Vectorize for $t {
            const KIND: ValueKind = $kind;
            const COMPONENTS: usize = 3;

            fn write_components(&self, out: &mut Components) {
                out.extend([self.x as f32, self.y as f32, self.z as f32]);
            }

            fn read_components(c: &[f32]) -> Self {
                Self::new(c[0] as $elem, c[1] as $elem, c[2] as $elem)
            }
        }) *
    }
}

macro_rules! impl_vectorize4 {
    ($kind:expr, $elem:ty, $($t:ty),*) => {
        $( impl Vectorize for $t {
            const KIND: ValueKind = $kind;
            const COMPONENTS: usize = 4;

            fn write_components(&self, out: &mut Components) {
                out.extend([self.x as f32, self.y as f32, self.z as f32, self.w as f32]);
            }

            fn read_components(c: &[f32]) -> Self {
                Self::new(c[0] as $elem, c[1] as $elem, c[2] as $elem, c[3] as $elem)
            }
        }) *
    }
}

impl_vectorize2! { ValueKind::Point, f32, Vec2 }
impl_vectorize2! { ValueKind::Point, f64, DVec2 }
impl_vectorize3! { ValueKind::Vector3, f32, Vec3, Vec3A }
impl_vectorize3! { ValueKind::Vector3, f64, DVec3 }
impl_vectorize4! { ValueKind::Custom, f32, Vec4 }
impl_vectorize4! { ValueKind::Custom, f64, DVec4 }

// Quaternions travel as angle + axis so they share the layout of `Rotation`.
impl Vectorize for Quat {
    const KIND: ValueKind = ValueKind::Rotation;
    const COMPONENTS: usize = 4;

    fn write_components(&self, out: &mut Components) {
        let (axis, angle) = self.to_axis_angle();
        out.extend([angle, axis.x, axis.y, axis.z]);
    }

    fn read_components(c: &[f32]) -> Self {
        let axis = Vec3::new(c[1], c[2], c[3]);
        match axis.try_normalize() {
            Some(axis) => Quat::from_axis_angle(axis, c[0]),
            None => Quat::IDENTITY,
        }
    }
}
