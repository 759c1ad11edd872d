//! Includes the types commonly used for building animations.

pub use crate::{
    keys, CallbackTarget, Color, ConflictPolicy, Easing, Point, PropertyAnimator, PropertyKey,
    PropertyMap, Rect, Scheduler, SchedulerConfig, Size, SpringConfig, TargetAdapter, Transform,
    Vector3, Vectorize,
};
