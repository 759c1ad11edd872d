//! Adapters through which animators read and write the properties of animated objects.

use crate::batch::WriteBatch;
use crate::properties::PropertyKey;
use crate::value::VectorizedValue;
use crate::vectorize::Vectorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::rc::Weak;

/// Reads and writes animatable properties on some concrete object.
///
/// Keys are opaque to the animation engine; adapters decide which keys they understand and how
/// a [`VectorizedValue`] maps onto the object's real fields.
pub trait TargetAdapter {
    /// Gets the live (presentation) value of a property, or `None` if the property is unknown or
    /// cannot be queried.
    fn current_value(&self, key: &PropertyKey) -> Option<VectorizedValue>;

    /// Writes a single property.
    fn apply(&mut self, key: &PropertyKey, value: &VectorizedValue);

    /// Whether this target can animate the property at all.
    fn supports(&self, key: &PropertyKey) -> bool {
        self.current_value(key).is_some()
    }

    /// Whether the underlying object still exists. Animators on a dead target complete without
    /// writing anything.
    fn is_alive(&self) -> bool {
        true
    }

    /// Writes all of the values produced for this target during one tick.
    ///
    /// The default implementation calls [`apply`](Self::apply) for each entry in order. Targets
    /// whose properties decompose into a shared composite (e.g. the parts of a transform) can
    /// override this and use [`WriteBatch::by_composite`] to perform one write per composite.
    fn commit(&mut self, batch: &WriteBatch) {
        for (key, value) in batch.iter() {
            self.apply(key, value);
        }
    }
}

/// Weak back-reference to a shared target. Never keeps the target alive; once the target is
/// dropped, it reports no values and ignores writes.
impl<T: TargetAdapter> TargetAdapter for Weak<RefCell<T>> {
    fn current_value(&self, key: &PropertyKey) -> Option<VectorizedValue> {
        self.upgrade()?.borrow().current_value(key)
    }

    fn apply(&mut self, key: &PropertyKey, value: &VectorizedValue) {
        if let Some(target) = self.upgrade() {
            target.borrow_mut().apply(key, value);
        }
    }

    fn supports(&self, key: &PropertyKey) -> bool {
        self.upgrade()
            .map_or(false, |target| target.borrow().supports(key))
    }

    fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }

    fn commit(&mut self, batch: &WriteBatch) {
        if let Some(target) = self.upgrade() {
            target.borrow_mut().commit(batch);
        }
    }
}

/// A simple keyed bag of properties.
///
/// Useful as a target in its own right (e.g. for headless or data-driven animation), and as the
/// backing store of adapters that sync to a real object after each commit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyMap {
    values: HashMap<PropertyKey, VectorizedValue>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a typed property, consuming and returning the map.
    pub fn with<T: Vectorize>(mut self, key: impl Into<PropertyKey>, value: &T) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a typed property.
    pub fn set<T: Vectorize>(&mut self, key: impl Into<PropertyKey>, value: &T) {
        self.values.insert(key.into(), value.vectorize());
    }

    /// Gets a typed property. Returns `None` if the property is missing or holds a value of a
    /// different type.
    pub fn get<T: Vectorize>(&self, key: impl Into<PropertyKey>) -> Option<T> {
        self.values
            .get(&key.into())
            .and_then(|value| T::from_vectorized(value).ok())
    }

    /// Gets the raw value of a property.
    pub fn value(&self, key: &PropertyKey) -> Option<&VectorizedValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TargetAdapter for PropertyMap {
    fn current_value(&self, key: &PropertyKey) -> Option<VectorizedValue> {
        self.values.get(key).cloned()
    }

    fn apply(&mut self, key: &PropertyKey, value: &VectorizedValue) {
        self.values.insert(key.clone(), value.clone());
    }
}

type PresentationQuery = Box<dyn Fn(&PropertyKey) -> Option<VectorizedValue>>;
type ChangeCallback = Box<dyn FnMut(&PropertyKey, &VectorizedValue)>;

/// Target made of closures: a change callback that receives every write, and an optional
/// presentation query.
///
/// Accepts every key. Without a presentation query, additive animators have nothing to compose
/// against and write their interpolated values unchanged.
pub struct CallbackTarget {
    presentation: Option<PresentationQuery>,
    on_change: ChangeCallback,
}

impl CallbackTarget {
    pub fn new(on_change: impl FnMut(&PropertyKey, &VectorizedValue) + 'static) -> Self {
        Self {
            presentation: None,
            on_change: Box::new(on_change),
        }
    }

    /// Adds a presentation query, used as the live value for additive composition.
    pub fn with_presentation(
        mut self,
        presentation: impl Fn(&PropertyKey) -> Option<VectorizedValue> + 'static,
    ) -> Self {
        self.presentation = Some(Box::new(presentation));
        self
    }
}

impl Debug for CallbackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackTarget")
            .field("has_presentation", &self.presentation.is_some())
            .finish_non_exhaustive()
    }
}

impl TargetAdapter for CallbackTarget {
    fn current_value(&self, key: &PropertyKey) -> Option<VectorizedValue> {
        self.presentation.as_ref().and_then(|query| query(key))
    }

    fn apply(&mut self, key: &PropertyKey, value: &VectorizedValue) {
        (self.on_change)(key, value);
    }

    fn supports(&self, _key: &PropertyKey) -> bool {
        true
    }
}
