// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forward-only row cursors with optional co-iteration.
//!
//! In simple mode a [`RowCursor`] follows the row chain from `first_row` up to
//! (but excluding) `post_last_row`.
//!
//! In co-iteration mode the attached [`CoCursor`] decides whether another
//! position exists. The cursor only consumes a row when the next row's key equals
//! the co-cursor key; otherwise the position is a hole: [`RowCursor::advance`]
//! still returns `true`, but [`RowCursor::current_exists`] is `false`. The
//! co-cursor must enumerate a superset of the window's row keys, in ascending
//! order. Violations are asserted in debug builds and logged in release builds,
//! where the cursor desynchronizes silently.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use strata_core::Value;

use crate::mapping::{Column, FieldMapping};
use crate::row::{Row, RowId, RowStore, Selection};

/// An external index that drives co-iteration.
pub trait CoCursor {
    /// Moves before the first position.
    fn reset(&mut self);
    /// Moves to the next position; `false` once exhausted.
    fn advance(&mut self) -> bool;
    /// Key of the current position (`NaN` when not positioned).
    fn current_key(&self) -> f64;
    /// Index of the current position; before the first position this is the
    /// index preceding it.
    fn current_index(&self) -> isize;
}

/// A [`CoCursor`] over an explicit ascending key list, such as aggregation
/// bucket starts.
#[derive(Clone, Debug)]
pub struct KeyListCoCursor {
    keys: Vec<f64>,
    first_index: usize,
    pos: Option<usize>,
}

impl KeyListCoCursor {
    /// Creates a co-cursor whose first key has ordinal index `first_index`.
    pub fn new(keys: Vec<f64>, first_index: usize) -> Self {
        Self {
            keys,
            first_index,
            pos: None,
        }
    }
}

impl CoCursor for KeyListCoCursor {
    fn reset(&mut self) {
        self.pos = None;
    }

    fn advance(&mut self) -> bool {
        let next = self.pos.map_or(0, |p| p + 1);
        if next < self.keys.len() {
            self.pos = Some(next);
            true
        } else {
            self.pos = Some(self.keys.len());
            false
        }
    }

    fn current_key(&self) -> f64 {
        self.pos
            .and_then(|p| self.keys.get(p).copied())
            .unwrap_or(f64::NAN)
    }

    fn current_index(&self) -> isize {
        let base = self.first_index as isize;
        match self.pos {
            None => base - 1,
            Some(p) => base + p as isize,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    PreFirst,
    Active,
    Exhausted,
}

/// One position yielded by iterating a [`RowCursor`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorPosition<'a> {
    /// Index reported by [`RowCursor::get_index`].
    pub index: isize,
    /// Key reported by [`RowCursor::get_key`].
    pub key: f64,
    /// The backing row; `None` for a co-iteration hole.
    pub row: Option<&'a Row>,
}

/// A forward-only, resettable cursor over a [`Selection`].
pub struct RowCursor<'a> {
    store: &'a RowStore,
    selection: Selection,
    mapping: Option<&'a dyn FieldMapping>,
    aggregated: bool,
    co: Option<Box<dyn CoCursor + 'a>>,
    phase: Phase,
    current: Option<RowId>,
    pending: Option<RowId>,
    index: isize,
}

impl core::fmt::Debug for RowCursor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RowCursor")
            .field("selection", &self.selection)
            .field("mapping", &self.mapping.is_some())
            .field("aggregated", &self.aggregated)
            .field("co", &self.co.is_some())
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("pending", &self.pending)
            .field("index", &self.index)
            .finish()
    }
}

impl<'a> RowCursor<'a> {
    /// Creates a simple-mode cursor, positioned before the first row.
    pub fn new(store: &'a RowStore, selection: Selection) -> Self {
        let mut cursor = Self {
            store,
            selection,
            mapping: None,
            aggregated: false,
            co: None,
            phase: Phase::PreFirst,
            current: None,
            pending: None,
            index: 0,
        };
        cursor.reset();
        cursor
    }

    /// Resolves field names through `mapping`; `aggregated` selects the
    /// aggregate columns.
    pub fn with_mapping(mut self, mapping: &'a dyn FieldMapping, aggregated: bool) -> Self {
        self.mapping = Some(mapping);
        self.aggregated = aggregated;
        self
    }

    /// Switches to co-iteration mode and resets.
    pub fn with_co_cursor(mut self, co: impl CoCursor + 'a) -> Self {
        self.co = Some(Box::new(co));
        self.reset();
        self
    }

    /// Repositions before the first row (and resets the co-cursor).
    pub fn reset(&mut self) {
        self.phase = Phase::PreFirst;
        self.current = None;
        self.pending = self.window_row(self.selection.first_row);
        self.index = match &mut self.co {
            Some(co) => {
                co.reset();
                co.current_index()
            }
            None => self.selection.first_index as isize - 1,
        };
    }

    /// Moves one position forward; `false` once the window is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.phase == Phase::Exhausted {
            return false;
        }
        match self.co.as_mut() {
            None => {
                let candidate = match self.phase {
                    Phase::PreFirst => self.window_row(self.selection.first_row),
                    _ => self.current.and_then(|id| self.following(id)),
                };
                self.index += 1;
                match candidate {
                    Some(id) => {
                        self.current = Some(id);
                        self.phase = Phase::Active;
                        true
                    }
                    None => self.exhaust(),
                }
            }
            Some(co) => {
                let advanced = co.advance();
                self.index = co.current_index();
                if !advanced {
                    if let Some(id) = self.pending {
                        report_desync(self.store, id, f64::NAN);
                    }
                    return self.exhaust();
                }
                let key = co.current_key();
                self.phase = Phase::Active;
                self.current = None;
                if let Some(id) = self.pending
                    && let Some(row) = self.store.row(id)
                {
                    if row.key() == key {
                        self.current = Some(id);
                        self.pending = self.following(id);
                    } else if row.key() < key {
                        report_desync(self.store, id, key);
                    }
                }
                true
            }
        }
    }

    /// Returns `true` if a real row backs the current position.
    pub fn current_exists(&self) -> bool {
        self.current.is_some()
    }

    /// The current row.
    pub fn current(&self) -> Option<&'a Row> {
        self.store.row(self.current?)
    }

    /// The current row id.
    pub fn current_id(&self) -> Option<RowId> {
        self.current
    }

    /// Reads `field` through the mapping (or as a named column without one).
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        let column = match self.mapping {
            Some(m) => m.column(field, self.aggregated)?,
            None => Column::Name(field.into()),
        };
        self.get_column(&column)
    }

    /// Reads a column of the current row.
    pub fn get_column(&self, column: &Column) -> Option<&'a Value> {
        column.read(self.current()?)
    }

    /// Key of the current position.
    ///
    /// `NaN` before the first `advance`, after exhaustion, and in simple mode
    /// when there is no row. A co-iteration hole reports the co-cursor key.
    pub fn get_key(&self) -> f64 {
        if self.phase != Phase::Active {
            return f64::NAN;
        }
        if let Some(row) = self.current() {
            return row.key();
        }
        self.co.as_ref().map_or(f64::NAN, |co| co.current_key())
    }

    /// Index of the current position.
    ///
    /// Simple mode counts from the selection's `first_index`; co-iteration mode
    /// reports the co-cursor's own index.
    pub fn get_index(&self) -> isize {
        self.index
    }

    fn window_row(&self, id: Option<RowId>) -> Option<RowId> {
        id.filter(|id| Some(*id) != self.selection.post_last_row)
    }

    fn following(&self, id: RowId) -> Option<RowId> {
        self.window_row(self.store.row(id)?.next())
    }

    fn exhaust(&mut self) -> bool {
        self.phase = Phase::Exhausted;
        self.current = None;
        self.pending = None;
        false
    }
}

impl<'a> Iterator for RowCursor<'a> {
    type Item = CursorPosition<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.advance() {
            return None;
        }
        Some(CursorPosition {
            index: self.get_index(),
            key: self.get_key(),
            row: self.current(),
        })
    }
}

fn report_desync(store: &RowStore, pending: RowId, co_key: f64) {
    let row_key = store.row(pending).map_or(f64::NAN, Row::key);
    tracing::warn!(
        row_key,
        co_key,
        "co-cursor does not enumerate a superset of the row keys"
    );
    if cfg!(debug_assertions) {
        panic!("co-cursor skipped row key {row_key} (co-cursor key {co_key})");
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::mapping::TableMapping;

    fn store(keys: &[f64]) -> RowStore {
        let mut s = RowStore::new();
        for &k in keys {
            s.push_values(k, [Value::from(k * 10.0)]).unwrap();
        }
        s
    }

    #[test]
    fn window_of_n_rows_advances_exactly_n_times() {
        let s = store(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let sel = s.select(2.0, 4.0);
        let mut c = RowCursor::new(&s, sel);
        assert!(c.get_key().is_nan(), "no row before the first advance");
        assert!(c.get("value").is_none());

        let mut keys = Vec::new();
        for _ in 0..3 {
            assert!(c.advance());
            keys.push(c.get_key());
        }
        assert_eq!(keys, vec![2.0, 3.0, 4.0]);
        assert!(!c.advance());
        assert!(c.get_key().is_nan());
        assert!(!c.advance(), "exhaustion is sticky");
    }

    #[test]
    fn reset_restarts_and_counts_from_first_index() {
        let s = store(&[1.0, 2.0, 3.0]);
        let mut c = RowCursor::new(&s, s.select(2.0, 3.0));
        assert_eq!(c.get_index(), 0);
        while c.advance() {}
        c.reset();
        assert!(c.advance());
        assert_eq!(c.get_index(), 1);
        assert_eq!(c.get_key(), 2.0);
    }

    #[test]
    fn fields_resolve_through_mapping() {
        let mut s = store(&[1.0, 2.0]);
        s.set_computed(RowId(1), 0, Value::from(99.0));
        let mapping = TableMapping::new()
            .with_field("value", Column::Index(0))
            .with_aggregated_field("value", Column::Index(-1));
        let mut c = RowCursor::new(&s, s.select_all()).with_mapping(&mapping, true);
        assert!(c.advance());
        assert_eq!(c.get("value"), None, "no computed value on the first row");
        assert!(c.advance());
        assert_eq!(c.get("value"), Some(&Value::from(99.0)));
        assert_eq!(c.get_column(&Column::Index(0)), Some(&Value::from(20.0)));
    }

    #[test]
    fn co_iteration_reports_holes_with_co_keys() {
        let s = store(&[10.0, 30.0, 40.0]);
        let co = KeyListCoCursor::new(vec![10.0, 20.0, 30.0, 40.0, 50.0], 5);
        let mut c = RowCursor::new(&s, s.select_all()).with_co_cursor(co);
        assert_eq!(c.get_index(), 4);

        let mut seen = Vec::new();
        while c.advance() {
            seen.push((c.get_index(), c.get_key(), c.current_exists()));
        }
        assert_eq!(
            seen,
            vec![
                (5, 10.0, true),
                (6, 20.0, false),
                (7, 30.0, true),
                (8, 40.0, true),
                (9, 50.0, false),
            ]
        );
        assert!(c.get_key().is_nan());
    }

    #[test]
    fn co_iteration_respects_the_selection_window() {
        let s = store(&[10.0, 20.0, 30.0]);
        let co = KeyListCoCursor::new(vec![15.0, 20.0, 25.0], 0);
        let c = RowCursor::new(&s, s.select(15.0, 25.0)).with_co_cursor(co);
        let exists: Vec<bool> = c.map(|p| p.row.is_some()).collect();
        assert_eq!(exists, vec![false, true, false]);
    }

    #[test]
    fn iterator_yields_positions() {
        let s = store(&[1.0, 2.0]);
        let c = RowCursor::new(&s, s.select_all());
        let keys: Vec<f64> = c.map(|p| p.key).collect();
        assert_eq!(keys, vec![1.0, 2.0]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "co-cursor skipped row key")]
    fn co_cursor_that_skips_rows_is_asserted_in_debug() {
        let s = store(&[10.0, 20.0]);
        let co = KeyListCoCursor::new(vec![20.0], 0);
        let mut c = RowCursor::new(&s, s.select_all()).with_co_cursor(co);
        c.advance();
    }
}
