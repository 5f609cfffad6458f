// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row storage and windowed iteration for series data.
//!
//! Series read their data through a [`RowCursor`]: a forward-only, resettable
//! cursor over a key-ordered chain of [`Row`]s, limited to a half-open
//! [`Selection`] window. A cursor can be synchronized with a [`CoCursor`] that
//! enumerates a denser key sequence (for example aggregation buckets), in which
//! case positions without a real row are reported as holes instead of being
//! skipped.
//!
//! Rows are owned by a [`RowStore`] and never mutated by cursors. Per-point pixel
//! data computed while drawing lives next to the store in a [`MetaTable`].

#![no_std]

extern crate alloc;

mod cursor;
mod mapping;
mod meta;
mod row;

pub use cursor::{CoCursor, CursorPosition, KeyListCoCursor, RowCursor};
pub use mapping::{Column, FieldMapping, TableMapping};
pub use meta::{MetaTable, MetaValue, PointMeta};
pub use row::{Row, RowId, RowStore, RowValues, Selection};
