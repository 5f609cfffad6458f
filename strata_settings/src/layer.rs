// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settings layers.

extern crate alloc;

use alloc::rc::Rc;
use alloc::sync::Arc;
use core::cell::RefCell;

use strata_core::{Value, ValueMap};

use crate::revision::next_revision;

/// A shared, mutable settings layer.
///
/// Layer identity (the `Rc` allocation) is what resolution chains reference.
pub type LayerRef = Rc<RefCell<SettingsLayer>>;

/// Wraps `layer` into a [`LayerRef`].
pub fn layer_ref(layer: SettingsLayer) -> LayerRef {
    Rc::new(RefCell::new(layer))
}

/// A plain key → value map with a revision stamp.
#[derive(Clone, Debug)]
pub struct SettingsLayer {
    values: ValueMap,
    revision: u64,
}

impl SettingsLayer {
    /// Creates an empty layer.
    pub fn new() -> Self {
        Self::from_map(ValueMap::new())
    }

    /// Creates a layer holding `values`.
    pub fn from_map(values: ValueMap) -> Self {
        Self {
            values,
            revision: next_revision(),
        }
    }

    /// Builds a layer from `(key, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Arc<str>>,
        V: Into<Value>,
    {
        Self::from_map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Reads a value; `None` means the key is undefined in this layer.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns `true` if the key is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Writes a value. Returns `false` (and keeps the revision) if the stored value
    /// was already equal.
    pub fn set(&mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> bool {
        let name = name.into();
        let value = value.into();
        if self.values.get(&name) == Some(&value) {
            return false;
        }
        self.values.insert(name, value);
        self.revision = next_revision();
        true
    }

    /// Removes a value, making the key undefined.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let old = self.values.remove(name);
        if old.is_some() {
            self.revision = next_revision();
        }
        old
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        if !self.values.is_empty() {
            self.values.clear();
            self.revision = next_revision();
        }
    }

    /// Iterates over defined keys and values (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &Value)> {
        self.values.iter()
    }

    /// Number of defined keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no key is defined.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Revision stamp, refreshed on every effective edit.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for SettingsLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for SettingsLayer {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}
