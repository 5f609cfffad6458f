// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-state tracking.
//!
//! Each stateful component keeps a [`Consistency`] tracker. Mutators set the
//! bits for the aspects they affect; `draw()` redoes only the work implied by the
//! dirty bits and then marks them consistent. This is a flag cache, not a
//! dependency graph: callers pick the right bits.

use core::ops::{BitOr, BitOrAssign};

/// A set of invalidated aspects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConsistencyState(u32);

impl ConsistencyState {
    /// No aspect.
    pub const NONE: Self = Self(0);
    /// Merged settings, text and styling.
    pub const APPEARANCE: Self = Self(1 << 0);
    /// Size and position.
    pub const BOUNDS: Self = Self(1 << 1);
    /// Paint order.
    pub const Z_INDEX: Self = Self(1 << 2);
    /// Attachment to the shared rendering layer.
    pub const CONTAINER: Self = Self(1 << 3);
    /// Connector line geometry.
    pub const CONNECTOR: Self = Self(1 << 4);
    /// Every aspect.
    pub const ALL: Self = Self(0b1_1111);

    /// Returns the raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if no aspect is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if any aspect of `other` is set in `self`.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns the aspects of both; usable in constants.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `self` without the aspects of `other`.
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for ConsistencyState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ConsistencyState {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A per-component dirty-flag cache.
///
/// New trackers start fully invalid so the first `draw()` does everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Consistency {
    dirty: ConsistencyState,
}

impl Consistency {
    /// Creates a tracker with every aspect invalid.
    pub fn new() -> Self {
        Self {
            dirty: ConsistencyState::ALL,
        }
    }

    /// Marks `state` dirty.
    pub fn invalidate(&mut self, state: ConsistencyState) {
        self.dirty |= state;
    }

    /// Returns `true` if any aspect of `state` is dirty.
    pub fn has_invalid(&self, state: ConsistencyState) -> bool {
        self.dirty.intersects(state)
    }

    /// Marks `state` clean.
    pub fn mark_consistent(&mut self, state: ConsistencyState) {
        self.dirty = self.dirty.without(state);
    }

    /// Returns `true` if nothing is dirty.
    pub fn is_consistent(&self) -> bool {
        self.dirty.is_empty()
    }

    /// Returns the currently dirty aspects.
    pub fn dirty(&self) -> ConsistencyState {
        self.dirty
    }
}

impl Default for Consistency {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_dirty_and_clears_per_aspect() {
        let mut c = Consistency::new();
        assert!(c.has_invalid(ConsistencyState::BOUNDS));
        c.mark_consistent(ConsistencyState::ALL.without(ConsistencyState::CONNECTOR));
        assert!(!c.has_invalid(ConsistencyState::BOUNDS | ConsistencyState::APPEARANCE));
        assert!(c.has_invalid(ConsistencyState::CONNECTOR));
        c.mark_consistent(ConsistencyState::CONNECTOR);
        assert!(c.is_consistent());
        c.invalidate(ConsistencyState::Z_INDEX);
        assert_eq!(c.dirty(), ConsistencyState::Z_INDEX);
    }
}
