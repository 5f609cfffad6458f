// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-point draw-pass metadata.
//!
//! The series layer resolves each row into pixel and ratio space once per draw
//! pass and stores the results here (`x`, `zero`, `value`, `xRatio`,
//! `valueRatio`, ...). Drawers, labels and tooltips read them back.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::row::RowId;

/// One cached metadata value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetaValue {
    /// A pixel or ratio value.
    Number(f64),
    /// A flag such as `missing`.
    Flag(bool),
    /// An opaque handle (for example a shape group id).
    Handle(u64),
}

/// Metadata attached to one point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointMeta {
    values: HashMap<&'static str, MetaValue>,
}

impl PointMeta {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a value.
    pub fn meta(&self, name: &str) -> Option<MetaValue> {
        self.values.get(name).copied()
    }

    /// Writes a value.
    pub fn set_meta(&mut self, name: &'static str, value: MetaValue) {
        self.values.insert(name, value);
    }

    /// Reads a number, `NaN` if absent or not a number.
    pub fn number(&self, name: &str) -> f64 {
        match self.meta(name) {
            Some(MetaValue::Number(n)) => n,
            _ => f64::NAN,
        }
    }

    /// Writes a number.
    pub fn set_number(&mut self, name: &'static str, value: f64) {
        self.set_meta(name, MetaValue::Number(value));
    }

    /// Reads a flag, `false` if absent.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.meta(name), Some(MetaValue::Flag(true)))
    }

    /// Reads a handle.
    pub fn handle(&self, name: &str) -> Option<u64> {
        match self.meta(name) {
            Some(MetaValue::Handle(h)) => Some(h),
            _ => None,
        }
    }

    /// Drops every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Point metadata for every row of a store, indexed by [`RowId`].
#[derive(Clone, Debug, Default)]
pub struct MetaTable {
    metas: Vec<PointMeta>,
}

impl MetaTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata of `row`, if any was written.
    pub fn get(&self, row: RowId) -> Option<&PointMeta> {
        self.metas.get(row.0)
    }

    /// Mutable metadata of `row`, allocated on first access.
    pub fn get_mut(&mut self, row: RowId) -> &mut PointMeta {
        if self.metas.len() <= row.0 {
            self.metas.resize_with(row.0 + 1, PointMeta::new);
        }
        &mut self.metas[row.0]
    }

    /// Clears every point, keeping allocations.
    pub fn clear(&mut self) {
        for m in &mut self.metas {
            m.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn typed_accessors_default_to_absence() {
        let mut t = MetaTable::new();
        assert!(t.get(RowId(3)).is_none());
        let m = t.get_mut(RowId(3));
        m.set_number("x", 12.5);
        m.set_meta("missing", MetaValue::Flag(true));
        m.set_meta("shapes", MetaValue::Handle(7));

        let m = t.get(RowId(3)).unwrap();
        assert_eq!(m.number("x"), 12.5);
        assert!(m.number("value").is_nan());
        assert!(m.flag("missing"));
        assert_eq!(m.handle("shapes"), Some(7));
        assert_eq!(m.handle("x"), None);

        t.clear();
        assert!(t.get(RowId(3)).unwrap().number("x").is_nan());
    }
}
