//! Per-tick write batching.
//!
//! During a tick, animators do not write to their targets directly. Each write lands in a
//! [`WriteBatch`] for the target, and the batch is committed once after every animator has run.
//! Reads made through a [`StagedTarget`] see the batch first, so a second animator on the same
//! key composes against the first one's output rather than the stale value on the target.

use crate::properties::PropertyKey;
use crate::target::TargetAdapter;
use crate::value::VectorizedValue;
use smallvec::SmallVec;

/// Ordered set of property writes destined for one target.
///
/// Writing a key that is already present overwrites its value in place, keeping the position of
/// the first write.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteBatch {
    entries: Vec<(PropertyKey, VectorizedValue)>,
}

/// The writes in a [`WriteBatch`] that belong to one composite property.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeWrite<'a> {
    pub composite: &'a str,
    pub entries: SmallVec<[(&'a PropertyKey, &'a VectorizedValue); 3]>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a write, replacing any earlier write to the same key.
    pub fn set(&mut self, key: &PropertyKey, value: VectorizedValue) {
        match self.entries.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key.clone(), value)),
        }
    }

    /// Gets the latest value written for `key`.
    pub fn get(&self, key: &PropertyKey) -> Option<&VectorizedValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Iterates the writes in the order their keys were first written.
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyKey, &VectorizedValue)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    /// Groups the writes by [`PropertyKey::composite`], in order of each composite's first write.
    pub fn by_composite(&self) -> Vec<CompositeWrite<'_>> {
        let mut groups: Vec<CompositeWrite<'_>> = Vec::new();
        for (key, value) in &self.entries {
            let composite = key.composite();
            match groups.iter_mut().find(|group| group.composite == composite) {
                Some(group) => group.entries.push((key, value)),
                None => groups.push(CompositeWrite {
                    composite,
                    entries: smallvec::smallvec![(key, value)],
                }),
            }
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// View of a target for the duration of one tick: reads fall through the pending batch to the
/// target, and writes go into the batch.
pub struct StagedTarget<'a> {
    target: &'a dyn TargetAdapter,
    batch: &'a mut WriteBatch,
}

impl<'a> StagedTarget<'a> {
    pub fn new(target: &'a dyn TargetAdapter, batch: &'a mut WriteBatch) -> Self {
        Self { target, batch }
    }
}

impl TargetAdapter for StagedTarget<'_> {
    fn current_value(&self, key: &PropertyKey) -> Option<VectorizedValue> {
        self.batch
            .get(key)
            .cloned()
            .or_else(|| self.target.current_value(key))
    }

    fn apply(&mut self, key: &PropertyKey, value: &VectorizedValue) {
        self.batch.set(key, value.clone());
    }

    fn supports(&self, key: &PropertyKey) -> bool {
        self.target.supports(key)
    }

    fn is_alive(&self) -> bool {
        self.target.is_alive()
    }
}
