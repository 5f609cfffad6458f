// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field-to-column indirection.

extern crate alloc;

use alloc::sync::Arc;

use hashbrown::HashMap;
use strata_core::Value;

use crate::row::Row;

/// A column reference inside a row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    /// Positional column. Negative indices address computed slots by bitwise
    /// complement: `-1` is slot `0`, `-2` is slot `1`, and so on.
    Index(i64),
    /// Named column.
    Name(Arc<str>),
}

impl Column {
    /// Reads this column from `row`.
    pub fn read<'a>(&self, row: &'a Row) -> Option<&'a Value> {
        match self {
            Self::Index(i) if *i < 0 => row.computed(usize::try_from(!*i).ok()?),
            Self::Index(i) => row.value_at(usize::try_from(*i).ok()?),
            Self::Name(name) => row.value_named(name),
        }
    }
}

/// Resolves series field names (`"value"`, `"high"`, ...) to columns.
///
/// Aggregated series read from the aggregate columns, raw series from the
/// source columns.
pub trait FieldMapping {
    /// Returns the column for `field`, if mapped.
    fn column(&self, field: &str, aggregated: bool) -> Option<Column>;
}

/// A map-backed [`FieldMapping`].
#[derive(Clone, Debug, Default)]
pub struct TableMapping {
    source: HashMap<Arc<str>, Column>,
    aggregated: HashMap<Arc<str>, Column>,
}

impl TableMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `field` to a source column; the aggregate lookup falls back to it.
    pub fn with_field(mut self, field: impl Into<Arc<str>>, column: Column) -> Self {
        self.source.insert(field.into(), column);
        self
    }

    /// Maps `field` to an aggregate column.
    pub fn with_aggregated_field(mut self, field: impl Into<Arc<str>>, column: Column) -> Self {
        self.aggregated.insert(field.into(), column);
        self
    }
}

impl FieldMapping for TableMapping {
    fn column(&self, field: &str, aggregated: bool) -> Option<Column> {
        if aggregated && let Some(c) = self.aggregated.get(field) {
            return Some(c.clone());
        }
        self.source.get(field).cloned()
    }
}
