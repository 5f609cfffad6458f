// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Absolute-or-percent lengths and CSS-like paddings.

use kurbo::Insets;
use strata_core::Value;

/// A length that is either absolute or a percentage of a reference length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dimension {
    /// Pixels.
    Absolute(f64),
    /// Percent of the reference length (`50.0` is half).
    Percent(f64),
}

impl Dimension {
    /// Zero pixels.
    pub const ZERO: Self = Self::Absolute(0.0);

    /// Reads a number, a numeric string, or a `"NN%"` string.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) if n.is_finite() => Some(Self::Absolute(*n)),
            Value::String(s) => Self::parse(s),
            _ => None,
        }
    }

    /// Parses `"12"`, `"12px"` or `"12%"`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(p) = text.strip_suffix('%') {
            return p.trim().parse().ok().map(Self::Percent);
        }
        let text = text.strip_suffix("px").unwrap_or(text);
        text.trim().parse().ok().map(Self::Absolute)
    }

    /// Resolves against `reference`.
    pub fn resolve(self, reference: f64) -> f64 {
        match self {
            Self::Absolute(v) => v,
            Self::Percent(p) => reference * p / 100.0,
        }
    }
}

/// Label padding. Left/right resolve against the width, top/bottom against the
/// height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Padding {
    /// Top padding.
    pub top: Dimension,
    /// Right padding.
    pub right: Dimension,
    /// Bottom padding.
    pub bottom: Dimension,
    /// Left padding.
    pub left: Dimension,
}

impl Padding {
    /// No padding.
    pub const ZERO: Self = Self::uniform(Dimension::ZERO);

    /// The same padding on all sides.
    pub const fn uniform(d: Dimension) -> Self {
        Self {
            top: d,
            right: d,
            bottom: d,
            left: d,
        }
    }

    /// Reads a padding from settings.
    ///
    /// Accepts a single length, a CSS-style list of one to four lengths
    /// (`[all]`, `[vertical, horizontal]`, `[top, horizontal, bottom]`,
    /// `[top, right, bottom, left]`), or a map with `top`/`right`/`bottom`/`left`.
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Some(d) = Dimension::from_value(value) {
            return Some(Self::uniform(d));
        }
        if let Some(list) = value.as_list() {
            let d = |i: usize| list.get(i).and_then(Dimension::from_value);
            return match list.len() {
                1 => Some(Self::uniform(d(0)?)),
                2 => Some(Self {
                    top: d(0)?,
                    right: d(1)?,
                    bottom: d(0)?,
                    left: d(1)?,
                }),
                3 => Some(Self {
                    top: d(0)?,
                    right: d(1)?,
                    bottom: d(2)?,
                    left: d(1)?,
                }),
                4 => Some(Self {
                    top: d(0)?,
                    right: d(1)?,
                    bottom: d(2)?,
                    left: d(3)?,
                }),
                _ => None,
            };
        }
        let map = value.as_map()?;
        let side = |name: &str| {
            map.get(name)
                .and_then(Dimension::from_value)
                .unwrap_or(Dimension::ZERO)
        };
        Some(Self {
            top: side("top"),
            right: side("right"),
            bottom: side("bottom"),
            left: side("left"),
        })
    }

    /// Resolves all sides into pixel insets.
    pub fn resolve(&self, width: f64, height: f64) -> Insets {
        Insets::new(
            self.left.resolve(width),
            self.top.resolve(height),
            self.right.resolve(width),
            self.bottom.resolve(height),
        )
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::ZERO
    }
}
