//! The per-property animator: turns elapsed time into a value and writes it to a target.

use crate::additive::compose;
use crate::easing::{Easing, TimingFunction};
use crate::error::Result;
use crate::interpolation::interpolate;
use crate::properties::PropertyKey;
use crate::spring::{SpringConfig, SpringState};
use crate::target::TargetAdapter;
use crate::value::VectorizedValue;
use crate::vectorize::Vectorize;
use tracing::{debug, trace};

/// Spring timeout applied when neither the animator nor its scheduler specifies one.
pub const DEFAULT_SPRING_TIMEOUT_SECONDS: f32 = 10.0;

/// Shortest spring timeout, in durations. A spring always gets at least this many units of
/// simulated time before it is forced to settle, however short the timeout in seconds.
pub const MIN_SPRING_TIMEOUT_DURATIONS: f32 = 4.0;

/// Lifecycle of a [`PropertyAnimator`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum AnimatorState {
    /// Created but not yet advanced.
    #[default]
    Pending,
    /// Advanced at least once and not finished.
    Running,
    /// Reached its end (or its start, when running in reverse).
    Completed,
    /// Stopped before finishing. Cancelled animators ignore further advances.
    Cancelled,
}

/// How progress is shaped before interpolation.
#[derive(Clone, Debug)]
pub enum Curve {
    /// A stateless timing function applied to the linear progress.
    Timing(Easing),
    /// A spring simulation that replaces both the timing function and the duration-based finish.
    Spring(SpringState),
}

impl Default for Curve {
    fn default() -> Self {
        Self::Timing(Easing::default())
    }
}

/// Animates a single property of a target from one value to another.
///
/// Each call to [`advance`](Self::advance) moves the animator's clock by a delta, computes the
/// interpolated value for the new time and writes it to the target through a [`TargetAdapter`].
/// Negative deltas run the animation backward.
///
/// # Timing
///
/// With an [`Easing`] curve, linear progress is `elapsed / duration`, clamped to `0..=1`, and the
/// animator finishes when `elapsed` reaches `duration` (or `0` in reverse).
///
/// With a spring, the duration instead defines the spring's time scale: one duration is one unit
/// of simulated time. The animator finishes when the spring has settled, or when it has run for
/// the [spring deadline](Self::spring_deadline) without settling.
///
/// # Additive animation
///
/// An [additive](Self::additive) animator writes `presentation + (current - previous)`, i.e. only
/// its own change since the last tick on top of the target's live value. This allows several
/// animators on the same property to run at once and sum their motion. The animator's own
/// [`current`](Self::current) value is always the plain interpolation.
///
/// Additive composition is only used for value kinds that support it; see
/// [`ValueKind::supports_additive`](crate::value::ValueKind::supports_additive).
#[derive(Clone, Debug)]
pub struct PropertyAnimator {
    key: PropertyKey,
    from: VectorizedValue,
    to: VectorizedValue,
    duration: f32,
    elapsed: f32,
    reversed: bool,
    additive: bool,
    curve: Curve,
    spring_time: f32,
    spring_timeout: Option<f32>,
    current: VectorizedValue,
    previous: VectorizedValue,
    state: AnimatorState,
}

impl PropertyAnimator {
    /// Creates an animator with a linear curve.
    ///
    /// Fails with [`TypeMismatch`](crate::error::AnimationError::TypeMismatch) if `from` and `to`
    /// are not compatible.
    pub fn new(
        key: impl Into<PropertyKey>,
        from: VectorizedValue,
        to: VectorizedValue,
        duration_seconds: f32,
    ) -> Result<Self> {
        from.ensure_compatible(&to)?;
        Ok(Self::new_unchecked(key.into(), from, to, duration_seconds))
    }

    /// Creates an animator between two values of the same [`Vectorize`] type.
    pub fn between<T: Vectorize>(
        key: impl Into<PropertyKey>,
        from: &T,
        to: &T,
        duration_seconds: f32,
    ) -> Self {
        Self::new_unchecked(key.into(), from.vectorize(), to.vectorize(), duration_seconds)
    }

    fn new_unchecked(
        key: PropertyKey,
        from: VectorizedValue,
        to: VectorizedValue,
        duration: f32,
    ) -> Self {
        Self {
            key,
            current: from.clone(),
            previous: from.clone(),
            from,
            to,
            duration,
            elapsed: 0.0,
            reversed: false,
            additive: false,
            curve: Curve::default(),
            spring_time: 0.0,
            spring_timeout: None,
            state: AnimatorState::Pending,
        }
    }

    /// Configures the timing function. Replaces any spring.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.curve = Curve::Timing(easing);
        self
    }

    /// Configures the timing function by name, e.g. `"quadInOut"`.
    ///
    /// Fails with [`UnsupportedEasing`](crate::error::AnimationError::UnsupportedEasing) if the
    /// name is not recognized.
    pub fn easing_named(self, name: &str) -> Result<Self> {
        Ok(self.easing(name.parse()?))
    }

    /// Drives progress with a spring instead of a timing function.
    pub fn spring(mut self, config: SpringConfig) -> Self {
        self.curve = Curve::Spring(SpringState::new(config));
        self
    }

    /// Configures whether writes are composed against the target's presentation value.
    pub fn additive(mut self, additive: bool) -> Self {
        self.additive = additive;
        self
    }

    /// Configures the longest time a spring may run before it is forced to settle. Ignored for
    /// timing-function curves.
    pub fn spring_timeout_seconds(mut self, timeout_seconds: f32) -> Self {
        self.spring_timeout = Some(timeout_seconds);
        self
    }

    pub(crate) fn inherit_spring_timeout(&mut self, timeout_seconds: f32) {
        self.spring_timeout.get_or_insert(timeout_seconds);
    }

    pub fn key(&self) -> &PropertyKey {
        &self.key
    }

    pub fn from(&self) -> &VectorizedValue {
        &self.from
    }

    pub fn to(&self) -> &VectorizedValue {
        &self.to
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Time on the animator's clock, in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether the most recent non-zero advance moved backward.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Whether writes are actually composed additively: requested via [`additive`](Self::additive)
    /// and supported by the value kind.
    pub fn is_additive(&self) -> bool {
        self.additive && self.from.kind().supports_additive()
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// The plain interpolated value at the current time, before any additive composition.
    pub fn current(&self) -> &VectorizedValue {
        &self.current
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Linear progress in `0..=1`, before the curve is applied.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.reversed { 0.0 } else { 1.0 };
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Whether the animation has reached the end of its current direction of travel.
    pub fn is_finished(&self) -> bool {
        if self.duration <= 0.0 {
            return true;
        }
        match &self.curve {
            Curve::Spring(_) if self.reversed => self.elapsed <= 0.0,
            Curve::Spring(spring) => spring.is_settled(),
            Curve::Timing(_) if self.reversed => self.elapsed <= 0.0,
            Curve::Timing(_) => self.elapsed >= self.duration,
        }
    }

    /// Moves the clock by `delta_seconds`, writes the new value to `target`, and returns whether
    /// the animation has finished.
    ///
    /// A negative delta runs the animation backward; a zero delta re-evaluates the current time
    /// without changing direction. Cancelled animators do nothing and report finished.
    pub fn advance(&mut self, delta_seconds: f32, target: &mut dyn TargetAdapter) -> Result<bool> {
        if self.state == AnimatorState::Cancelled {
            return Ok(true);
        }
        if delta_seconds != 0.0 {
            self.reversed = delta_seconds < 0.0;
        }
        self.elapsed = (self.elapsed + delta_seconds).clamp(0.0, self.max_elapsed());
        self.state = AnimatorState::Running;

        let adjusted = self.adjusted_progress();
        let value = interpolate(&self.from, &self.to, adjusted)?;
        trace!(
            key = %self.key,
            elapsed = self.elapsed,
            progress = self.progress(),
            adjusted,
            "advance"
        );
        self.write(value, target)?;

        let finished = self.is_finished();
        if finished {
            self.state = AnimatorState::Completed;
        }
        Ok(finished)
    }

    /// Jumps to an absolute time and writes the value for that time. Returns whether the
    /// animation is finished at that time.
    pub fn seek(&mut self, time_seconds: f32, target: &mut dyn TargetAdapter) -> Result<bool> {
        self.elapsed = time_seconds;
        self.advance(0.0, target)
    }

    /// Rewinds to the start.
    ///
    /// If the animator had moved past its start, `from` is written to the target as is, additive
    /// or not, replacing whatever the target was presenting.
    pub fn reset(&mut self, target: &mut dyn TargetAdapter) -> Result<()> {
        if let Curve::Spring(spring) = &mut self.curve {
            spring.reset();
        }
        self.spring_time = 0.0;
        if self.elapsed > 0.0 {
            target.apply(&self.key, &self.from);
        }
        self.current = self.from.clone();
        self.previous = self.from.clone();
        self.elapsed = 0.0;
        self.reversed = false;
        if self.state != AnimatorState::Cancelled {
            self.state = AnimatorState::Pending;
        }
        Ok(())
    }

    /// Stops the animator without writing anything further.
    pub fn cancel(&mut self) {
        self.state = AnimatorState::Cancelled;
    }

    /// Completes without writing; used when the target is gone or cannot animate the key.
    pub(crate) fn complete_silently(&mut self) {
        self.state = AnimatorState::Completed;
    }

    fn max_elapsed(&self) -> f32 {
        match &self.curve {
            Curve::Timing(_) => self.duration.max(0.0),
            Curve::Spring(_) => self.spring_deadline().max(0.0),
        }
    }

    /// The configured spring timeout, in seconds.
    pub fn spring_timeout(&self) -> f32 {
        self.spring_timeout.unwrap_or(DEFAULT_SPRING_TIMEOUT_SECONDS)
    }

    /// Elapsed time at which an unsettled spring is forced to settle: the
    /// [spring timeout](Self::spring_timeout), extended to [`MIN_SPRING_TIMEOUT_DURATIONS`]
    /// durations for long animations.
    pub fn spring_deadline(&self) -> f32 {
        self.spring_timeout().max(self.duration * MIN_SPRING_TIMEOUT_DURATIONS)
    }

    fn adjusted_progress(&mut self) -> f32 {
        let duration = self.duration;
        let progress = self.progress();
        let deadline = self.spring_deadline();
        match &mut self.curve {
            Curve::Timing(easing) => easing.solve(progress),
            Curve::Spring(spring) => {
                if duration <= 0.0 {
                    if self.reversed {
                        spring.reset();
                    } else {
                        spring.settle();
                    }
                    return spring.current();
                }
                let time = self.elapsed / duration;
                if time >= self.spring_time {
                    spring.step(time - self.spring_time);
                } else {
                    spring.simulate_to(time);
                }
                self.spring_time = time;
                if !self.reversed && !spring.is_settled() && self.elapsed >= deadline {
                    debug!(key = %self.key, deadline, "spring timed out; forcing settle");
                    spring.settle();
                }
                spring.current()
            }
        }
    }

    fn write(&mut self, value: VectorizedValue, target: &mut dyn TargetAdapter) -> Result<()> {
        let output = if self.is_additive() {
            let presentation = target.current_value(&self.key);
            compose(&value, &self.previous, presentation.as_ref())?
        } else {
            value.clone()
        };
        target.apply(&self.key, &output);
        self.previous = value.clone();
        self.current = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnimationError;
    use crate::properties::{keys, Point};
    use crate::target::PropertyMap;
    use crate::value::ValueKind;
    use approx::assert_abs_diff_eq;

    fn alpha(target: &PropertyMap) -> f32 {
        target.get::<f32>(keys::ALPHA).unwrap()
    }

    fn alpha_animator(from: f32, to: f32, duration: f32) -> PropertyAnimator {
        PropertyAnimator::between(keys::ALPHA, &from, &to, duration)
    }

    mod construction {
        use super::*;

        #[test]
        fn when_values_incompatible_then_type_mismatch() {
            let result = PropertyAnimator::new(
                keys::CENTER,
                Point::new(0.0, 0.0).vectorize(),
                VectorizedValue::scalar(1.0),
                1.0,
            );
            assert!(matches!(result, Err(AnimationError::TypeMismatch { .. })));
        }

        #[test]
        fn when_easing_name_unknown_then_rejected() {
            let result = alpha_animator(0.0, 1.0, 1.0).easing_named("sideways");
            assert!(matches!(result, Err(AnimationError::UnsupportedEasing(_))));
        }

        #[test]
        fn additive_requires_supporting_kind() {
            let rotation = PropertyAnimator::between(
                keys::ROTATION,
                &crate::properties::Rotation::z(0.0),
                &crate::properties::Rotation::z(1.0),
                1.0,
            )
            .additive(true);
            assert!(!rotation.is_additive());
            assert!(alpha_animator(0.0, 1.0, 1.0).additive(true).is_additive());
        }
    }

    mod timing {
        use super::*;

        #[test]
        fn when_advanced_then_writes_eased_value() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 2.0).easing(Easing::InQuad);

            let finished = animator.advance(1.0, &mut target).unwrap();

            assert!(!finished);
            assert_eq!(animator.state(), AnimatorState::Running);
            assert_abs_diff_eq!(alpha(&target), 0.25);
        }

        #[test]
        fn when_elapsed_reaches_duration_then_completed_at_target() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 1.0);

            assert!(!animator.advance(0.6, &mut target).unwrap());
            assert!(animator.advance(0.6, &mut target).unwrap());

            assert_eq!(animator.state(), AnimatorState::Completed);
            assert_eq!(animator.elapsed(), 1.0);
            assert_eq!(alpha(&target), 1.0);
        }

        #[test]
        fn when_reversed_then_finishes_at_start() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 1.0);
            animator.advance(0.5, &mut target).unwrap();

            assert!(!animator.advance(-0.25, &mut target).unwrap());
            assert!(animator.is_reversed());
            assert_abs_diff_eq!(alpha(&target), 0.25);

            assert!(animator.advance(-0.5, &mut target).unwrap());
            assert_eq!(animator.elapsed(), 0.0);
            assert_eq!(alpha(&target), 0.0);
        }

        #[test]
        fn when_zero_delta_then_direction_kept() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 1.0);
            animator.advance(0.5, &mut target).unwrap();
            animator.advance(-0.1, &mut target).unwrap();

            animator.advance(0.0, &mut target).unwrap();

            assert!(animator.is_reversed());
        }

        #[test]
        fn when_duration_zero_then_first_advance_finishes_at_target() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 0.0);

            assert!(animator.advance(0.016, &mut target).unwrap());
            assert_eq!(alpha(&target), 1.0);
            assert_eq!(animator.current(), &VectorizedValue::scalar(1.0));
        }

        #[test]
        fn when_duration_negative_then_finishes_immediately() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, -1.0);

            assert!(animator.advance(0.0, &mut target).unwrap());
            assert_eq!(alpha(&target), 1.0);
        }

        #[test]
        fn when_advanced_after_completion_in_reverse_then_running_again() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 1.0);
            animator.advance(2.0, &mut target).unwrap();
            assert_eq!(animator.state(), AnimatorState::Completed);

            assert!(!animator.advance(-0.5, &mut target).unwrap());
            assert_eq!(animator.state(), AnimatorState::Running);
        }

        #[test]
        fn when_cancelled_then_advance_does_nothing() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 1.0);
            animator.cancel();

            assert!(animator.advance(0.5, &mut target).unwrap());
            assert_eq!(alpha(&target), 0.0);
            assert_eq!(animator.state(), AnimatorState::Cancelled);
        }
    }

    mod seek_and_reset {
        use super::*;

        #[test]
        fn seek_matches_incremental_advance() {
            let mut stepped_target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut stepped = alpha_animator(0.0, 10.0, 1.0).easing(Easing::OutCubic);
            for _ in 0..7 {
                stepped.advance(0.1, &mut stepped_target).unwrap();
            }

            let mut seeked_target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut seeked = alpha_animator(0.0, 10.0, 1.0).easing(Easing::OutCubic);
            seeked.seek(0.7, &mut seeked_target).unwrap();
            seeked.advance(0.0, &mut seeked_target).unwrap();

            assert_abs_diff_eq!(alpha(&seeked_target), alpha(&stepped_target), epsilon = 1e-4);
        }

        #[test]
        fn seek_past_end_finishes() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 1.0);

            assert!(animator.seek(5.0, &mut target).unwrap());
            assert_eq!(animator.elapsed(), 1.0);
            assert_eq!(alpha(&target), 1.0);
        }

        #[test]
        fn reset_after_progress_writes_from() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 1.0);
            animator.advance(0.5, &mut target).unwrap();

            animator.reset(&mut target).unwrap();

            assert_eq!(alpha(&target), 0.0);
            assert_eq!(animator.elapsed(), 0.0);
            assert_eq!(animator.state(), AnimatorState::Pending);
            assert_eq!(animator.current(), animator.from());
        }

        #[test]
        fn reset_before_progress_does_not_write() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.7f32);
            let mut animator = alpha_animator(0.0, 1.0, 1.0);

            animator.reset(&mut target).unwrap();

            assert_eq!(alpha(&target), 0.7);
        }
    }

    mod additive {
        use super::*;

        #[test]
        fn when_presentation_starts_at_from_then_output_matches_interpolation() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.2f32);
            let mut animator = alpha_animator(0.2, 0.8, 1.0)
                .easing(Easing::InOutSine)
                .additive(true);

            for _ in 0..10 {
                animator.advance(0.1, &mut target).unwrap();
                assert_abs_diff_eq!(
                    alpha(&target),
                    animator.current().components()[0],
                    epsilon = 1e-5
                );
            }
        }

        #[test]
        fn when_presentation_moved_externally_then_delta_is_applied_on_top() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 1.0).additive(true);
            animator.advance(0.5, &mut target).unwrap();

            target.set(keys::ALPHA, &10.5f32);
            animator.advance(0.25, &mut target).unwrap();

            assert_abs_diff_eq!(alpha(&target), 10.75);
            assert_abs_diff_eq!(animator.current().components()[0], 0.75);
        }

        #[test]
        fn when_reset_then_target_receives_from_regardless_of_other_animators() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut first = alpha_animator(0.0, 100.0, 1.0).additive(true);
            let mut second = alpha_animator(0.0, 20.0, 1.0).additive(true);
            first.advance(0.5, &mut target).unwrap();
            second.advance(0.5, &mut target).unwrap();
            assert_abs_diff_eq!(alpha(&target), 60.0);

            first.reset(&mut target).unwrap();

            assert_eq!(alpha(&target), 0.0);
            assert_eq!(first.current(), first.from());

            second.advance(0.25, &mut target).unwrap();
            assert_abs_diff_eq!(alpha(&target), 5.0);
        }

        #[test]
        fn when_presentation_missing_then_passthrough() {
            let mut target = PropertyMap::new();
            let mut animator = alpha_animator(0.0, 1.0, 1.0).additive(true);

            animator.advance(0.5, &mut target).unwrap();

            assert_abs_diff_eq!(alpha(&target), 0.5);
        }

        #[test]
        fn when_presentation_kind_differs_then_type_mismatch() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &Point::new(0.0, 0.0));
            let mut animator = alpha_animator(0.0, 1.0, 1.0).additive(true);

            let result = animator.advance(0.5, &mut target);

            assert!(matches!(
                result,
                Err(AnimationError::TypeMismatch {
                    from_kind: ValueKind::Point,
                    ..
                })
            ));
        }
    }

    mod spring {
        use super::*;

        #[test]
        fn when_spring_settles_then_finished_at_target() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 100.0, 1.0).spring(SpringConfig::molasses());

            let mut finished = false;
            for _ in 0..600 {
                finished = animator.advance(1.0 / 60.0, &mut target).unwrap();
                if finished {
                    break;
                }
            }

            assert!(finished);
            assert_eq!(alpha(&target), 100.0);
            assert!(animator.elapsed() < 10.0);
        }

        #[test]
        fn spring_does_not_finish_at_duration() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 0.1).spring(SpringConfig::wobbly());

            assert!(!animator.advance(0.1, &mut target).unwrap());
        }

        #[test]
        fn when_spring_never_settles_then_timeout_forces_completion() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 0.25)
                .spring(SpringConfig::new(100.0, 0.0))
                .spring_timeout_seconds(2.0);

            assert!(!animator.advance(1.0, &mut target).unwrap());
            assert!(animator.advance(1.5, &mut target).unwrap());
            assert_eq!(animator.elapsed(), 2.0);
            assert_eq!(alpha(&target), 1.0);
        }

        #[test]
        fn when_duration_is_long_then_spring_settles_before_deadline() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 100.0, 30.0).spring(SpringConfig::molasses());

            let mut last = 0.0;
            let mut finished = false;
            for _ in 0..(60 * 120) {
                finished = animator.advance(1.0 / 60.0, &mut target).unwrap();
                let value = alpha(&target);
                assert!((value - last).abs() < 1.0);
                last = value;
                if finished {
                    break;
                }
            }

            assert!(finished);
            assert!(animator.elapsed() > 10.0);
            assert!(animator.elapsed() < animator.spring_deadline());
            assert_eq!(alpha(&target), 100.0);
        }

        #[test]
        fn when_duration_is_long_then_deadline_scales_with_it() {
            let animator = alpha_animator(0.0, 1.0, 30.0)
                .spring(SpringConfig::molasses())
                .spring_timeout_seconds(10.0);

            assert_eq!(animator.spring_timeout(), 10.0);
            assert_eq!(animator.spring_deadline(), 120.0);
        }

        #[test]
        fn when_seeking_far_with_tiny_duration_then_returns_settled() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 5e-5).spring(SpringConfig::new(100.0, 0.0));

            assert!(animator.seek(10.0, &mut target).unwrap());
            assert_eq!(alpha(&target), 1.0);
        }

        #[test]
        fn when_spring_is_very_stiff_then_writes_stay_finite() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let config = SpringConfig::try_new(2_000_000.0, 100.0).unwrap();
            let mut animator = alpha_animator(0.0, 1.0, 1.0).spring(config);

            let mut finished = false;
            for _ in 0..60 {
                finished = animator.advance(1.0 / 60.0, &mut target).unwrap();
                assert!(alpha(&target).is_finite());
                if finished {
                    break;
                }
            }

            assert!(finished);
            assert_eq!(alpha(&target), 1.0);
        }

        #[test]
        fn spring_seek_matches_incremental_advance() {
            let mut stepped_target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut stepped = alpha_animator(0.0, 1.0, 1.0).spring(SpringConfig::wobbly());
            for _ in 0..30 {
                stepped.advance(1.0 / 60.0, &mut stepped_target).unwrap();
            }

            let mut seeked_target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut seeked = alpha_animator(0.0, 1.0, 1.0).spring(SpringConfig::wobbly());
            seeked.seek(0.5, &mut seeked_target).unwrap();

            assert_abs_diff_eq!(alpha(&seeked_target), alpha(&stepped_target), epsilon = 1e-3);
        }

        #[test]
        fn reversed_spring_finishes_at_start() {
            let mut target = PropertyMap::new().with(keys::ALPHA, &0.0f32);
            let mut animator = alpha_animator(0.0, 1.0, 1.0).spring(SpringConfig::stiff());
            animator.advance(0.3, &mut target).unwrap();

            assert!(animator.advance(-0.5, &mut target).unwrap());
            assert_eq!(alpha(&target), 0.0);
        }
    }
}
