// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme trees.

extern crate alloc;

use alloc::sync::Arc;

use strata_core::{Value, ValueMap};

use crate::layer::{LayerRef, SettingsLayer, layer_ref};

/// A nested map of default settings, addressed by dotted paths such as
/// `"chart.labels"`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Theme {
    root: ValueMap,
}

impl Theme {
    /// Creates an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing tree.
    pub fn from_map(root: ValueMap) -> Self {
        Self { root }
    }

    /// The root map.
    pub fn root(&self) -> &ValueMap {
        &self.root
    }

    /// Looks up a dotted path. An empty path is not a value.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut cur = self.root.get(parts.next()?)?;
        for part in parts {
            cur = cur.as_map()?.get(part)?;
        }
        Some(cur)
    }

    /// Materializes the map at `path` as a shared layer.
    ///
    /// Missing paths and non-map values produce an empty layer.
    pub fn layer(&self, path: &str) -> LayerRef {
        let map = self
            .get(path)
            .and_then(Value::as_map)
            .cloned()
            .unwrap_or_default();
        if map.is_empty() {
            tracing::debug!(path, "theme has no settings at path");
        }
        layer_ref(SettingsLayer::from_map(map))
    }

    /// Sets the value at a dotted path, creating intermediate maps.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        set_path(&mut self.root, path, value.into());
    }

    /// Deep-merges `other` into `self`; `other` wins on conflicts between
    /// non-map values.
    pub fn merge(&mut self, other: &Self) {
        merge_maps(&mut self.root, &other.root);
    }
}

fn set_path(map: &mut ValueMap, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            map.insert(Arc::from(path), value);
        }
        Some((head, rest)) => {
            let mut child = map
                .get(head)
                .and_then(Value::as_map)
                .cloned()
                .unwrap_or_default();
            set_path(&mut child, rest, value);
            map.insert(Arc::from(head), Value::from(child));
        }
    }
}

fn merge_maps(dst: &mut ValueMap, src: &ValueMap) {
    for (key, value) in src {
        let merged = match (dst.get(key).and_then(Value::as_map), value.as_map()) {
            (Some(old), Some(new)) => {
                let mut m = old.clone();
                merge_maps(&mut m, new);
                Value::from(m)
            }
            _ => value.clone(),
        };
        dst.insert(key.clone(), merged);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn dotted_paths_walk_nested_maps() {
        let mut t = Theme::new();
        t.set("series.column.strokeWidth", 2.0);
        t.set("series.column.fill", "steelblue");
        t.set("labels.fontSize", 11.0);

        assert_eq!(t.get("series.column.strokeWidth"), Some(&Value::from(2.0)));
        assert_eq!(t.get("series.line"), None);
        assert_eq!(t.get(""), None);
        assert_eq!(t.get("labels.fontSize.x"), None);

        let layer = t.layer("series.column");
        assert_eq!(layer.borrow().len(), 2);
        assert!(t.layer("nope").borrow().is_empty());
    }

    #[test]
    fn merge_is_deep() {
        let mut base = Theme::new();
        base.set("labels.fontSize", 11.0);
        base.set("labels.fontColor", "black");
        let mut over = Theme::new();
        over.set("labels.fontColor", "white");

        base.merge(&over);
        assert_eq!(base.get("labels.fontSize"), Some(&Value::from(11.0)));
        assert_eq!(base.get("labels.fontColor"), Some(&Value::from("white")));
    }
}
