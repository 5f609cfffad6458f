// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key-ordered row storage and selection windows.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use strata_core::{Value, ValueMap};

/// Stable identity of a row inside a [`RowStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub usize);

/// Raw field values of a row, either positional or named.
#[derive(Clone, Debug, PartialEq)]
pub enum RowValues {
    /// Positional values, addressed by non-negative column index.
    Array(Vec<Value>),
    /// Named values, addressed by column name.
    Map(ValueMap),
}

/// One node of the key-ordered row chain.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    key: f64,
    values: RowValues,
    computed: Vec<Option<Value>>,
    next: Option<RowId>,
}

impl Row {
    /// Sort key (typically a timestamp or ordinal index).
    pub fn key(&self) -> f64 {
        self.key
    }

    /// Raw field values.
    pub fn values(&self) -> &RowValues {
        &self.values
    }

    /// The next row in key order.
    pub fn next(&self) -> Option<RowId> {
        self.next
    }

    /// Positional raw value.
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        match &self.values {
            RowValues::Array(v) => v.get(index),
            RowValues::Map(_) => None,
        }
    }

    /// Named raw value.
    pub fn value_named(&self, name: &str) -> Option<&Value> {
        match &self.values {
            RowValues::Map(m) => m.get(name),
            RowValues::Array(_) => None,
        }
    }

    /// Derived value stored in computed slot `slot`.
    pub fn computed(&self, slot: usize) -> Option<&Value> {
        self.computed.get(slot)?.as_ref()
    }
}

/// A half-open window `[first_row, post_last_row)` over a row chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    /// First row of the window, `None` for an empty store.
    pub first_row: Option<RowId>,
    /// Exclusive end sentinel; `None` means "until the end of the chain".
    pub post_last_row: Option<RowId>,
    /// Ordinal index of `first_row` within the whole store.
    pub first_index: usize,
}

impl Selection {
    /// An empty window.
    pub const EMPTY: Self = Self {
        first_row: None,
        post_last_row: None,
        first_index: 0,
    };

    /// Counts the rows inside the window.
    pub fn row_count(&self, store: &RowStore) -> usize {
        let mut n = 0;
        let mut cur = self.first_row;
        while let Some(id) = cur {
            if Some(id) == self.post_last_row {
                break;
            }
            n += 1;
            cur = store.row(id).and_then(Row::next);
        }
        n
    }
}

/// Owner of all rows of a table, linked in strictly increasing key order.
#[derive(Clone, Debug, Default)]
pub struct RowStore {
    rows: Vec<Row>,
    head: Option<RowId>,
    tail: Option<RowId>,
}

impl RowStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row at the end of the chain.
    ///
    /// Returns `None` (and stores nothing) if `key` is `NaN` or not strictly
    /// greater than the current last key.
    pub fn push(&mut self, key: f64, values: RowValues) -> Option<RowId> {
        if key.is_nan() {
            return None;
        }
        if let Some(tail) = self.tail
            && self.rows[tail.0].key >= key
        {
            tracing::debug!(key, "rejecting out-of-order row key");
            return None;
        }
        let id = RowId(self.rows.len());
        self.rows.push(Row {
            key,
            values,
            computed: Vec::new(),
            next: None,
        });
        match self.tail {
            Some(tail) => self.rows[tail.0].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        Some(id)
    }

    /// Convenience for pushing a row of positional values.
    pub fn push_values(
        &mut self,
        key: f64,
        values: impl IntoIterator<Item = Value>,
    ) -> Option<RowId> {
        self.push(key, RowValues::Array(values.into_iter().collect()))
    }

    /// Convenience for pushing a row of named values.
    pub fn push_named<K: Into<Arc<str>>>(
        &mut self,
        key: f64,
        values: impl IntoIterator<Item = (K, Value)>,
    ) -> Option<RowId> {
        let map: ValueMap = values.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.push(key, RowValues::Map(map))
    }

    /// Writes a derived value into computed slot `slot` of `row`.
    ///
    /// Returns `false` if `row` does not exist.
    pub fn set_computed(&mut self, row: RowId, slot: usize, value: Value) -> bool {
        let Some(r) = self.rows.get_mut(row.0) else {
            return false;
        };
        if r.computed.len() <= slot {
            r.computed.resize(slot + 1, None);
        }
        r.computed[slot] = Some(value);
        true
    }

    /// Returns a row by id.
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id.0)
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the store has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row in key order.
    pub fn first(&self) -> Option<RowId> {
        self.head
    }

    /// A window over every row.
    pub fn select_all(&self) -> Selection {
        Selection {
            first_row: self.head,
            post_last_row: None,
            first_index: 0,
        }
    }

    /// A window over rows with `from <= key <= to`.
    pub fn select(&self, from: f64, to: f64) -> Selection {
        let mut index = 0;
        let mut cur = self.head;
        while let Some(id) = cur {
            if self.rows[id.0].key >= from {
                break;
            }
            index += 1;
            cur = self.rows[id.0].next;
        }
        let first_row = cur;
        while let Some(id) = cur {
            if self.rows[id.0].key > to {
                break;
            }
            cur = self.rows[id.0].next;
        }
        Selection {
            first_row,
            post_last_row: cur,
            first_index: index,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn store(keys: &[f64]) -> RowStore {
        let mut s = RowStore::new();
        for &k in keys {
            s.push_values(k, [Value::from(k * 10.0)]).unwrap();
        }
        s
    }

    #[test]
    fn push_rejects_non_increasing_keys() {
        let mut s = store(&[1.0, 2.0]);
        assert!(s.push_values(2.0, []).is_none());
        assert!(s.push_values(f64::NAN, []).is_none());
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn select_builds_half_open_windows() {
        let s = store(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let sel = s.select(2.0, 4.0);
        assert_eq!(sel.first_row, Some(RowId(1)));
        assert_eq!(sel.post_last_row, Some(RowId(4)));
        assert_eq!(sel.first_index, 1);
        assert_eq!(sel.row_count(&s), 3);

        let empty = s.select(10.0, 20.0);
        assert_eq!(empty.row_count(&s), 0);
        assert_eq!(s.select_all().row_count(&s), 5);
    }

    #[test]
    fn computed_slots_are_sparse() {
        let mut s = store(&[1.0]);
        assert!(s.set_computed(RowId(0), 2, Value::from(7.0)));
        let row = s.row(RowId(0)).unwrap();
        assert_eq!(row.computed(2), Some(&Value::from(7.0)));
        assert_eq!(row.computed(0), None);
        assert!(!s.set_computed(RowId(9), 0, Value::Null));
    }
}
