// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;

use kurbo::{Rect, Vec2};
use strata_core::Value;

/// Which point of a label's bounds is aligned to its formatted position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Top-left corner.
    #[default]
    LeftTop,
    /// Middle of the left edge.
    LeftCenter,
    /// Bottom-left corner.
    LeftBottom,
    /// Middle of the top edge.
    CenterTop,
    /// Center.
    Center,
    /// Middle of the bottom edge.
    CenterBottom,
    /// Top-right corner.
    RightTop,
    /// Middle of the right edge.
    RightCenter,
    /// Bottom-right corner.
    RightBottom,
    /// Use the anchor chosen by auto-placement.
    Auto,
}

impl Anchor {
    /// Parses names like `"left-top"`, `"center"`, `"RightBottom"` or `"auto"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Some(match key.as_str() {
            "lefttop" => Self::LeftTop,
            "leftcenter" => Self::LeftCenter,
            "leftbottom" => Self::LeftBottom,
            "centertop" => Self::CenterTop,
            "center" => Self::Center,
            "centerbottom" => Self::CenterBottom,
            "righttop" => Self::RightTop,
            "rightcenter" => Self::RightCenter,
            "rightbottom" => Self::RightBottom,
            "auto" => Self::Auto,
            _ => return None,
        })
    }

    /// Reads an anchor name from a settings value.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(Self::from_name)
    }

    /// Replaces [`Anchor::Auto`] with `auto`, or [`Anchor::LeftTop`] when no
    /// auto anchor is known.
    pub fn resolve(self, auto: Option<Self>) -> Self {
        match self {
            Self::Auto => match auto {
                Some(a) if a != Self::Auto => a,
                _ => Self::LeftTop,
            },
            a => a,
        }
    }

    /// Position of the anchor point relative to the top-left corner of a box
    /// of the given size.
    pub fn offset(self, width: f64, height: f64) -> Vec2 {
        let (fx, fy) = self.fractions();
        Vec2::new(width * fx, height * fy)
    }

    /// The anchor point of `rect`.
    pub fn point_in(self, rect: Rect) -> kurbo::Point {
        rect.origin() + self.offset(rect.width(), rect.height())
    }

    /// Direction in which positive `offsetX`/`offsetY` move a label.
    ///
    /// Offsets push the label away from the anchored edge: right-anchored labels
    /// move left, bottom-anchored labels move up.
    pub fn offset_signs(self) -> (f64, f64) {
        let (fx, fy) = self.fractions();
        (
            if fx == 1.0 { -1.0 } else { 1.0 },
            if fy == 1.0 { -1.0 } else { 1.0 },
        )
    }

    fn fractions(self) -> (f64, f64) {
        match self {
            Self::LeftTop | Self::Auto => (0.0, 0.0),
            Self::LeftCenter => (0.0, 0.5),
            Self::LeftBottom => (0.0, 1.0),
            Self::CenterTop => (0.5, 0.0),
            Self::Center => (0.5, 0.5),
            Self::CenterBottom => (0.5, 1.0),
            Self::RightTop => (1.0, 0.0),
            Self::RightCenter => (1.0, 0.5),
            Self::RightBottom => (1.0, 1.0),
        }
    }
}
