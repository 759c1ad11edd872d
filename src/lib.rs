//! A framework-independent animation engine.
//!
//! Property values of any supported type are flattened into [`VectorizedValue`]s, interpolated
//! over time through an [`Easing`] curve or a spring, and written back to the animated object
//! through a [`TargetAdapter`]. Additive animators compose with whatever the target currently
//! shows, so overlapping animations on one property sum their motion.
//!
//! Most applications create a [`Scheduler`], register their targets, add
//! [`PropertyAnimator`]s and call [`Scheduler::tick`] once per frame.

pub mod prelude;

pub use kinetic_core::{
    additive::compose,
    animator::{AnimatorState, Curve, PropertyAnimator},
    batch::{CompositeWrite, StagedTarget, WriteBatch},
    config::{ConflictPolicy, SchedulerConfig},
    easing::{CubicBezierEasing, Easing, TimingFunction},
    error::{AnimationError, Result},
    interpolation::{interpolate, Lerp},
    properties::{keys, Color, Point, PropertyKey, Rect, Rotation, Size, Transform, Vector3},
    scheduler::{AnimatorId, Scheduler, TargetId, TickReport},
    spring::{SpringConfig, SpringState},
    target::{CallbackTarget, PropertyMap, TargetAdapter},
    value::{Components, KindCapabilities, ValueKind, VectorizedValue},
    vectorize::Vectorize,
};
pub use kinetic_macros::Vectorize;
