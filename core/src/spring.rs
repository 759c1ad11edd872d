//! Damped spring used in place of a [`TimingFunction`](crate::easing::TimingFunction).
//!
//! A spring always travels from progress `0` to progress `1`. Its time axis is measured in
//! animation durations, so stepping by `dt / duration` makes one full unit of simulated time
//! correspond to the animator's nominal duration. Unlike an easing curve, a spring decides on its
//! own when it has finished: see [`SpringState::is_settled`].

use crate::error::{AnimationError, Result};
use tracing::debug;

/// Physical parameters of a spring with unit mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Stiffness of the spring. Higher values pull harder toward the end.
    pub tension: f32,
    /// Damping of the spring. Higher values lose energy faster and oscillate less.
    pub friction: f32,
    /// Distance from the end and speed below which the spring counts as settled.
    pub rest_threshold: f32,
}

const DEFAULT_REST_THRESHOLD: f32 = 0.001;

impl SpringConfig {
    /// Creates a spring configuration without validating it.
    pub const fn new(tension: f32, friction: f32) -> Self {
        Self {
            tension,
            friction,
            rest_threshold: DEFAULT_REST_THRESHOLD,
        }
    }

    /// Creates a spring configuration, failing with [`AnimationError::InvalidSpring`] if the
    /// tension is not positive or the friction is negative, or either is not finite.
    pub fn try_new(tension: f32, friction: f32) -> Result<Self> {
        let config = Self::new(tension, friction);
        config.validate()?;
        Ok(config)
    }

    /// Replaces the rest threshold.
    pub fn with_rest_threshold(mut self, rest_threshold: f32) -> Self {
        self.rest_threshold = rest_threshold;
        self
    }

    /// Checks that the parameters describe a spring that can actually move.
    pub fn validate(&self) -> Result<()> {
        let valid = self.tension.is_finite()
            && self.tension > 0.0
            && self.friction.is_finite()
            && self.friction >= 0.0;
        if valid {
            Ok(())
        } else {
            Err(AnimationError::InvalidSpring {
                tension: self.tension,
                friction: self.friction,
            })
        }
    }

    /// Soft spring with a little overshoot.
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0)
    }

    /// Bouncy spring with visible oscillation.
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0)
    }

    /// Fast spring that barely overshoots.
    pub const fn stiff() -> Self {
        Self::new(400.0, 30.0)
    }

    /// Heavily damped spring that approaches the end without overshoot.
    pub const fn slow() -> Self {
        Self::new(280.0, 60.0)
    }

    /// Critically damped, unhurried spring.
    pub const fn molasses() -> Self {
        Self::new(100.0, 20.0)
    }

    /// Friction at which this spring is critically damped.
    pub fn critical_friction(&self) -> f32 {
        2.0 * self.tension.sqrt()
    }

    /// Whether this spring oscillates around the end before settling.
    pub fn is_underdamped(&self) -> bool {
        self.friction < self.critical_friction()
    }

    /// Whether this spring creeps toward the end slower than a critically damped one.
    pub fn is_overdamped(&self) -> bool {
        self.friction > self.critical_friction()
    }

    /// Longest integration step, in durations, that keeps this spring numerically stable.
    ///
    /// Bounded by the natural frequency and by the friction, which dominates the fastest decay of
    /// an overdamped spring.
    pub fn max_step(&self) -> f32 {
        let rate = self.tension.sqrt().max(self.friction);
        if rate > 0.0 {
            MAX_STEP.min(STABLE_STEP / rate)
        } else {
            MAX_STEP
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::stiff()
    }
}

/// Running state of a spring simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringState {
    config: SpringConfig,
    position: f32,
    velocity: f32,
    settled: bool,
}

// Largest integration step, in durations.
const MAX_STEP: f32 = 1.0 / 240.0;

// Upper bound on `h * rate` for the fastest mode of the spring. RK4 diverges past about 2.78.
const STABLE_STEP: f32 = 0.5;

// Integration steps allowed in a single call to `step`. Longer deltas settle the spring.
const MAX_SUBSTEPS: u32 = 1 << 20;

impl SpringState {
    /// Creates a spring at rest at progress `0`.
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            position: 0.0,
            velocity: 0.0,
            settled: false,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Current progress, i.e. the spring's position. May exceed `1` while overshooting.
    pub fn current(&self) -> f32 {
        self.position
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Whether the spring has come to rest at the end. Stays `true` until [`reset`](Self::reset).
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advances the simulation by `delta` durations.
    ///
    /// Non-positive deltas do nothing; springs cannot run backward. Use
    /// [`simulate_to`](Self::simulate_to) to move to an earlier point in time.
    ///
    /// The delta is split into equal sub-steps no longer than the spring's stable step. A delta
    /// that would take more than a bounded number of sub-steps settles the spring instead of
    /// integrating it.
    pub fn step(&mut self, delta: f32) {
        if delta.is_nan() || delta <= 0.0 || self.settled {
            return;
        }
        let steps = (delta / self.config.max_step()).ceil();
        if steps > MAX_SUBSTEPS as f32 {
            debug!(delta, steps, "spring step too long; settling");
            self.settle();
            return;
        }
        let steps = steps.max(1.0) as u32;
        let h = delta / steps as f32;
        for _ in 0..steps {
            self.integrate(h);
            if self.is_at_rest() {
                self.settle();
                return;
            }
        }
    }

    /// Restarts the simulation from rest and runs it for `progress` durations.
    pub fn simulate_to(&mut self, progress: f32) {
        self.reset();
        self.step(progress);
    }

    /// Returns to position `0`, velocity `0`, not settled.
    pub fn reset(&mut self) {
        self.position = 0.0;
        self.velocity = 0.0;
        self.settled = false;
    }

    /// Snaps the spring to its end and marks it settled.
    pub fn settle(&mut self) {
        self.position = 1.0;
        self.velocity = 0.0;
        self.settled = true;
    }

    fn is_at_rest(&self) -> bool {
        let threshold = self.config.rest_threshold;
        (1.0 - self.position).abs() < threshold && self.velocity.abs() < threshold
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        -self.config.tension * (x - 1.0) - self.config.friction * v
    }

    fn integrate(&mut self, h: f32) {
        let (x, v) = (self.position, self.velocity);

        let k1_v = self.acceleration(x, v);
        let k1_x = v;
        let k2_v = self.acceleration(x + k1_x * h * 0.5, v + k1_v * h * 0.5);
        let k2_x = v + k1_v * h * 0.5;
        let k3_v = self.acceleration(x + k2_x * h * 0.5, v + k2_v * h * 0.5);
        let k3_x = v + k2_v * h * 0.5;
        let k4_v = self.acceleration(x + k3_x * h, v + k3_v * h);
        let k4_x = v + k3_v * h;

        self.velocity = v + (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * h / 6.0;
        self.position = x + (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * h / 6.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn run(spring: &mut SpringState, units: f32, frames_per_unit: u32) {
        let frames = (units * frames_per_unit as f32) as u32;
        for _ in 0..frames {
            spring.step(1.0 / frames_per_unit as f32);
        }
    }

    #[test]
    fn presets_have_expected_damping() {
        assert!(SpringConfig::gentle().is_underdamped());
        assert!(SpringConfig::wobbly().is_underdamped());
        assert!(SpringConfig::stiff().is_underdamped());
        assert!(SpringConfig::slow().is_overdamped());
        assert_abs_diff_eq!(
            SpringConfig::molasses().friction,
            SpringConfig::molasses().critical_friction()
        );
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert_eq!(
            SpringConfig::try_new(-1.0, 10.0),
            Err(AnimationError::InvalidSpring {
                tension: -1.0,
                friction: 10.0
            })
        );
        assert!(SpringConfig::try_new(100.0, -0.5).is_err());
        assert!(SpringConfig::try_new(f32::INFINITY, 10.0).is_err());
        assert!(SpringConfig::try_new(100.0, 0.0).is_ok());
    }

    #[test]
    fn critically_damped_spring_settles_at_end() {
        let mut spring = SpringState::new(SpringConfig::molasses());

        run(&mut spring, 5.0, 60);

        assert!(spring.is_settled());
        assert_eq!(spring.current(), 1.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn overdamped_spring_never_overshoots() {
        let mut spring = SpringState::new(SpringConfig::slow());
        for _ in 0..600 {
            spring.step(1.0 / 60.0);
            assert!(spring.current() <= 1.0);
        }
        assert!(spring.is_settled());
    }

    #[test]
    fn underdamped_spring_overshoots_then_settles() {
        let mut spring = SpringState::new(SpringConfig::wobbly());
        let mut peak: f32 = 0.0;
        for _ in 0..600 {
            spring.step(1.0 / 60.0);
            peak = peak.max(spring.current());
        }
        assert!(peak > 1.0);
        assert!(spring.is_settled());
    }

    #[test]
    fn settled_stays_settled_until_reset() {
        let mut spring = SpringState::new(SpringConfig::stiff());
        run(&mut spring, 3.0, 60);
        assert!(spring.is_settled());

        spring.step(1.0);
        assert!(spring.is_settled());

        spring.reset();
        assert!(!spring.is_settled());
        assert_eq!(spring.current(), 0.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn stepping_is_frame_rate_independent() {
        let mut coarse = SpringState::new(SpringConfig::gentle());
        let mut fine = SpringState::new(SpringConfig::gentle());

        run(&mut coarse, 0.5, 30);
        run(&mut fine, 0.5, 120);

        assert_abs_diff_eq!(coarse.current(), fine.current(), epsilon = 1e-3);
    }

    #[test]
    fn simulate_to_matches_incremental_steps() {
        let mut incremental = SpringState::new(SpringConfig::wobbly());
        run(&mut incremental, 0.5, 60);

        let mut direct = SpringState::new(SpringConfig::wobbly());
        direct.step(0.1);
        direct.simulate_to(0.5);

        assert_abs_diff_eq!(direct.current(), incremental.current(), epsilon = 1e-3);
    }

    #[test]
    fn when_delta_is_huge_then_step_returns_settled() {
        let mut spring = SpringState::new(SpringConfig::new(100.0, 0.0));

        spring.step(200_000.0);

        assert!(spring.is_settled());
        assert_eq!(spring.current(), 1.0);
    }

    #[test]
    fn when_undamped_then_long_step_stays_bounded() {
        let mut spring = SpringState::new(SpringConfig::new(100.0, 0.0));

        spring.step(1_000.0);

        assert!(spring.current().is_finite());
        assert!(spring.current().abs() <= 2.1);
    }

    #[test]
    fn when_very_stiff_then_stays_finite_and_settles() {
        let config = SpringConfig::try_new(2_000_000.0, 100.0).unwrap();
        let mut spring = SpringState::new(config);

        for _ in 0..30 {
            spring.step(1.0 / 60.0);
            assert!(spring.current().is_finite());
            assert!(spring.velocity().is_finite());
        }

        assert!(spring.is_settled());
        assert_eq!(spring.current(), 1.0);
    }

    #[test]
    fn when_heavily_overdamped_then_stays_finite() {
        let config = SpringConfig::try_new(100.0, 50_000.0).unwrap();
        let mut spring = SpringState::new(config);

        spring.step(1.0 / 60.0);

        assert!(spring.current().is_finite());
        assert!((0.0..=1.0).contains(&spring.current()));
    }

    #[test]
    fn max_step_shrinks_with_stiffness() {
        assert_eq!(SpringConfig::gentle().max_step(), 1.0 / 240.0);
        assert_abs_diff_eq!(
            SpringConfig::new(1_000_000.0, 10.0).max_step(),
            0.5 / 1000.0
        );
        assert_abs_diff_eq!(SpringConfig::new(100.0, 4_000.0).max_step(), 0.5 / 4000.0);
    }

    #[test]
    fn negative_step_is_ignored() {
        let mut spring = SpringState::new(SpringConfig::stiff());
        spring.step(0.1);
        let position = spring.current();
        spring.step(-0.05);
        assert_eq!(spring.current(), position);
    }
}
