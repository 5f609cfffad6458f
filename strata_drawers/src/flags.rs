// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declared drawer capabilities.

use core::ops::{BitOr, BitOrAssign};

/// What a geometry kind supports.
///
/// The series layer reads these to decide which metadata to compute (a zero
/// baseline, stacking, per-category distribution) before drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DrawerFlags(u32);

impl DrawerFlags {
    /// No capabilities.
    pub const NONE: Self = Self(0);
    /// Points need a `zero` baseline.
    pub const NEEDS_ZERO: Self = Self(1 << 0);
    /// Values can be stacked.
    pub const SUPPORTS_STACK: Self = Self(1 << 1);
    /// Comparison mode (percent change) is supported.
    pub const SUPPORTS_COMPARISON: Self = Self(1 << 2);
    /// Error bars can be attached.
    pub const SUPPORTS_ERROR: Self = Self(1 << 3);
    /// One shape per point.
    pub const DISCRETE_BASED: Self = Self(1 << 4);
    /// Points occupy a width along the category axis.
    pub const WIDTH_BASED: Self = Self(1 << 5);
    /// Several series can share one category slot side by side.
    pub const DISTRIBUTES_ACROSS_CATEGORIES: Self = Self(1 << 6);
    /// Points form a continuous run broken by missing points.
    pub const CONTINUOUS: Self = Self(1 << 7);
    /// Points are placed on a circle.
    pub const POLAR: Self = Self(1 << 8);

    /// Returns `true` if no capability is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if all capabilities of `other` are set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for DrawerFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DrawerFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
