//! Configuration for a [`Scheduler`](crate::scheduler::Scheduler).

/// What happens when an animator is added for a `(target, key)` pair that already has an active
/// animator.
///
/// Two additive animators on the same key never conflict: they run side by side and their deltas
/// are summed by the compositor. The policy only applies when either animator is non-additive.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ConflictPolicy {
    /// Cancel the existing animator and start the new one immediately.
    #[default]
    Replace,
    /// Hold the new animator until the existing one has completed or been removed.
    Queue,
}

/// Configuration for a [`Scheduler`](crate::scheduler::Scheduler).
///
/// Created with [`Default`] and adjusted with the builder methods:
///
/// ```
/// use kinetic_core::config::{ConflictPolicy, SchedulerConfig};
///
/// let config = SchedulerConfig::default()
///     .conflict_policy(ConflictPolicy::Queue)
///     .spring_timeout_seconds(4.0);
///
/// assert_eq!(config.get_conflict_policy(), ConflictPolicy::Queue);
/// assert_eq!(config.get_spring_timeout_seconds(), 4.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
    conflict_policy: ConflictPolicy,
    spring_timeout_seconds: f32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            conflict_policy: ConflictPolicy::default(),
            spring_timeout_seconds: 10.0,
        }
    }
}

impl SchedulerConfig {
    /// Configures how non-additive animators on the same key are reconciled.
    pub fn conflict_policy(mut self, conflict_policy: ConflictPolicy) -> Self {
        self.conflict_policy = conflict_policy;
        self
    }

    /// Configures the longest time, in seconds, that a spring animator may run before it is forced
    /// to settle.
    ///
    /// Applies to animators that do not set their own timeout. Non-positive values are ignored.
    pub fn spring_timeout_seconds(mut self, spring_timeout_seconds: f32) -> Self {
        if spring_timeout_seconds > 0.0 {
            self.spring_timeout_seconds = spring_timeout_seconds;
        }
        self
    }

    pub fn get_conflict_policy(&self) -> ConflictPolicy {
        self.conflict_policy
    }

    pub fn get_spring_timeout_seconds(&self) -> f32 {
        self.spring_timeout_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.get_conflict_policy(), ConflictPolicy::Replace);
        assert_eq!(config.get_spring_timeout_seconds(), 10.0);
    }

    #[test]
    fn non_positive_timeout_is_ignored() {
        let config = SchedulerConfig::default()
            .spring_timeout_seconds(0.0)
            .spring_timeout_seconds(-3.0);
        assert_eq!(config.get_spring_timeout_seconds(), 10.0);
    }
}
