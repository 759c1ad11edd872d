//! Registry of targets and animators, driven one tick at a time.

use crate::animator::{AnimatorState, PropertyAnimator};
use crate::batch::{StagedTarget, WriteBatch};
use crate::config::{ConflictPolicy, SchedulerConfig};
use crate::error::{AnimationError, Result};
use crate::properties::PropertyKey;
use crate::target::TargetAdapter;
use crate::value::VectorizedValue;
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use tracing::{debug, warn};

new_key_type! {
    /// Handle to a target registered with a [`Scheduler`].
    pub struct TargetId;
    /// Handle to an animator added to a [`Scheduler`].
    pub struct AnimatorId;
}

struct AnimatorSlot {
    target: TargetId,
    animator: PropertyAnimator,
    waiting_on: Option<AnimatorId>,
}

/// Outcome of a single [`Scheduler::tick`].
#[derive(Debug, Default)]
pub struct TickReport {
    /// Animators that were advanced, in the order they ran.
    pub advanced: Vec<AnimatorId>,
    /// Animators that finished during this tick and were removed, including those that completed
    /// without writing because their target was gone.
    pub completed: Vec<AnimatorId>,
    /// Animators that failed and were removed, with the reason.
    pub dropped: Vec<(AnimatorId, AnimationError)>,
}

/// Drives a set of [`PropertyAnimator`]s against their targets.
///
/// The scheduler is an ordinary value with no global state; the host calls [`tick`](Self::tick)
/// once per frame from whatever loop it runs.
///
/// Each tick runs every active animator once, in the order the animators were added. Writes are
/// collected per target, and each target receives a single [`commit`](TargetAdapter::commit) at
/// the end of the tick. Animators that finish are removed.
pub struct Scheduler {
    config: SchedulerConfig,
    targets: SlotMap<TargetId, Box<dyn TargetAdapter>>,
    animators: SlotMap<AnimatorId, AnimatorSlot>,
    order: Vec<AnimatorId>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            targets: SlotMap::with_key(),
            animators: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn register_target(&mut self, target: impl TargetAdapter + 'static) -> TargetId {
        let id = self.targets.insert(Box::new(target));
        debug!(?id, "registered target");
        id
    }

    /// Removes a target. Animators still bound to it complete without writing on their next tick.
    pub fn unregister_target(&mut self, id: TargetId) -> Option<Box<dyn TargetAdapter>> {
        let target = self.targets.remove(id);
        if target.is_some() {
            debug!(?id, "unregistered target");
        }
        target
    }

    pub fn target(&self, id: TargetId) -> Option<&dyn TargetAdapter> {
        self.targets.get(id).map(|target| &**target)
    }

    pub fn target_mut(&mut self, id: TargetId) -> Option<&mut (dyn TargetAdapter + 'static)> {
        self.targets.get_mut(id).map(|target| &mut **target)
    }

    /// Adds an animator for a target.
    ///
    /// Fails with [`AnimationError::UnsupportedProperty`] if the target is registered and does not
    /// support the animator's key. An unregistered target is not an error; the animator simply
    /// completes without writing when it first runs.
    ///
    /// If the target already has an active animator on the same key, both run side by side when
    /// both are additive. Otherwise the configured [`ConflictPolicy`] applies.
    pub fn add(&mut self, target: TargetId, mut animator: PropertyAnimator) -> Result<AnimatorId> {
        if let Some(adapter) = self.targets.get(target) {
            if !adapter.supports(animator.key()) {
                return Err(AnimationError::UnsupportedProperty(animator.key().clone()));
            }
        }
        animator.inherit_spring_timeout(self.config.get_spring_timeout_seconds());

        let existing: Vec<AnimatorId> = self
            .order
            .iter()
            .copied()
            .filter(|id| {
                self.animators
                    .get(*id)
                    .is_some_and(|slot| slot.target == target && slot.animator.key() == animator.key())
            })
            .collect();
        let merge = animator.is_additive()
            && existing
                .iter()
                .all(|id| self.animators[*id].animator.is_additive());

        let mut waiting_on = None;
        if !existing.is_empty() && !merge {
            match self.config.get_conflict_policy() {
                ConflictPolicy::Replace => {
                    for id in existing {
                        debug!(?id, key = %animator.key(), "replaced by new animator");
                        self.remove(id);
                    }
                }
                ConflictPolicy::Queue => {
                    waiting_on = existing.last().copied();
                }
            }
        }

        let key = animator.key().clone();
        let id = self.animators.insert(AnimatorSlot {
            target,
            animator,
            waiting_on,
        });
        self.order.push(id);
        debug!(?id, ?target, %key, queued = waiting_on.is_some(), "added animator");
        Ok(id)
    }

    /// Removes an animator immediately. Whatever it would have written next is never applied.
    ///
    /// Returns the animator in the [`Cancelled`](AnimatorState::Cancelled) state, or `None` if the
    /// id is stale.
    pub fn remove(&mut self, id: AnimatorId) -> Option<PropertyAnimator> {
        let mut slot = self.detach(id)?;
        slot.animator.cancel();
        debug!(?id, key = %slot.animator.key(), "removed animator");
        Some(slot.animator)
    }

    /// Same as [`remove`](Self::remove), discarding the animator. Returns whether it existed.
    pub fn cancel(&mut self, id: AnimatorId) -> bool {
        self.remove(id).is_some()
    }

    /// Advances every active animator by `delta_seconds` and commits the results.
    pub fn tick(&mut self, delta_seconds: f32) -> TickReport {
        let mut report = TickReport::default();
        let mut batches: SecondaryMap<TargetId, WriteBatch> = SecondaryMap::new();

        for &id in &self.order {
            let Some(slot) = self.animators.get_mut(id) else {
                continue;
            };
            if slot.waiting_on.is_some() {
                continue;
            }
            let target = match self.targets.get(slot.target) {
                Some(target) if target.is_alive() => target,
                _ => {
                    debug!(?id, key = %slot.animator.key(), "target gone; completing");
                    slot.animator.complete_silently();
                    report.completed.push(id);
                    continue;
                }
            };
            if slot.animator.state() == AnimatorState::Pending
                && !target.supports(slot.animator.key())
            {
                debug!(?id, key = %slot.animator.key(), "property unsupported; completing");
                slot.animator.complete_silently();
                report.completed.push(id);
                continue;
            }

            if !batches.contains_key(slot.target) {
                batches.insert(slot.target, WriteBatch::new());
            }
            let mut staged = StagedTarget::new(&**target, &mut batches[slot.target]);
            match slot.animator.advance(delta_seconds, &mut staged) {
                Ok(finished) => {
                    report.advanced.push(id);
                    if finished {
                        report.completed.push(id);
                    }
                }
                Err(error) => {
                    warn!(?id, key = %slot.animator.key(), %error, "dropping animator");
                    report.dropped.push((id, error));
                }
            }
        }

        for (target_id, batch) in &batches {
            if batch.is_empty() {
                continue;
            }
            if let Some(target) = self.targets.get_mut(target_id) {
                target.commit(batch);
            }
        }

        let finished: Vec<AnimatorId> = report
            .completed
            .iter()
            .copied()
            .chain(report.dropped.iter().map(|(id, _)| *id))
            .collect();
        for id in finished {
            self.detach(id);
        }
        report
    }

    /// Jumps one animator to an absolute time and commits the value for that time.
    ///
    /// Returns `None` if the id is stale, otherwise whether the animator is finished at that time.
    pub fn seek(&mut self, id: AnimatorId, time_seconds: f32) -> Option<Result<bool>> {
        self.with_staged(id, |animator, target| animator.seek(time_seconds, target))
    }

    /// Rewinds one animator to its start. Returns `None` if the id is stale.
    pub fn reset(&mut self, id: AnimatorId) -> Option<Result<()>> {
        self.with_staged(id, |animator, target| animator.reset(target))
    }

    /// Number of animators, including queued ones.
    pub fn len(&self) -> usize {
        self.animators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animators.is_empty()
    }

    /// Whether any animator will run on the next tick.
    pub fn has_active(&self) -> bool {
        self.animators.values().any(|slot| {
            slot.waiting_on.is_none()
                && matches!(
                    slot.animator.state(),
                    AnimatorState::Pending | AnimatorState::Running
                )
        })
    }

    pub fn state(&self, id: AnimatorId) -> Option<AnimatorState> {
        self.animators.get(id).map(|slot| slot.animator.state())
    }

    pub fn animator(&self, id: AnimatorId) -> Option<&PropertyAnimator> {
        self.animators.get(id).map(|slot| &slot.animator)
    }

    /// Whether the animator is held back by [`ConflictPolicy::Queue`].
    pub fn is_queued(&self, id: AnimatorId) -> bool {
        self.animators
            .get(id)
            .is_some_and(|slot| slot.waiting_on.is_some())
    }

    fn with_staged<R>(
        &mut self,
        id: AnimatorId,
        action: impl FnOnce(&mut PropertyAnimator, &mut dyn TargetAdapter) -> Result<R>,
    ) -> Option<Result<R>> {
        let slot = self.animators.get_mut(id)?;
        let Some(target) = self.targets.get_mut(slot.target) else {
            debug!(?id, "target gone; ignoring");
            return Some(action(&mut slot.animator, &mut NullTarget));
        };
        let mut batch = WriteBatch::new();
        let result = action(
            &mut slot.animator,
            &mut StagedTarget::new(&**target, &mut batch),
        );
        if !batch.is_empty() {
            target.commit(&batch);
        }
        Some(result)
    }

    // Removes a slot and releases anything queued behind it.
    fn detach(&mut self, id: AnimatorId) -> Option<AnimatorSlot> {
        let slot = self.animators.remove(id)?;
        self.order.retain(|other| *other != id);
        for (other, waiting) in self.animators.iter_mut() {
            if waiting.waiting_on == Some(id) {
                waiting.waiting_on = None;
                debug!(id = ?other, "released from queue");
            }
        }
        Some(slot)
    }
}

// Stand-in for a target that has been unregistered: knows nothing, accepts nothing.
struct NullTarget;

impl TargetAdapter for NullTarget {
    fn current_value(&self, _key: &PropertyKey) -> Option<VectorizedValue> {
        None
    }

    fn apply(&mut self, _key: &PropertyKey, _value: &VectorizedValue) {}

    fn is_alive(&self) -> bool {
        false
    }
}
