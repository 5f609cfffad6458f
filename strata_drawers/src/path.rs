// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orientation-aware path helpers and pixel snapping.
//!
//! Drawers compute geometry in "category along x, value along y" terms. For a
//! vertical (bar) layout the helpers transpose every coordinate pair, so one
//! drawing routine serves both orientations.

use kurbo::Point;

#[cfg(not(feature = "std"))]
use strata_core::FloatExt;

use crate::shape::Shape;

fn oriented(vertical: bool, x: f64, y: f64) -> Point {
    if vertical {
        Point::new(y, x)
    } else {
        Point::new(x, y)
    }
}

/// Starts a subpath at `(x, y)`, transposed when `vertical`.
pub fn move_to(shape: &mut Shape, vertical: bool, x: f64, y: f64) {
    shape.move_to(oriented(vertical, x, y));
}

/// Adds line segments through `coords` (`[x0, y0, x1, y1, ...]`), transposed
/// when `vertical`. A trailing odd coordinate is ignored.
pub fn line_to(shape: &mut Shape, vertical: bool, coords: &[f64]) {
    for pair in coords.chunks_exact(2) {
        shape.line_to(oriented(vertical, pair[0], pair[1]));
    }
}

/// Snaps `value` so a stroke of `thickness` lands on whole device pixels.
///
/// Odd-width strokes are centered on half pixels, even-width strokes on whole
/// pixels.
pub fn pixel_shift(value: f64, thickness: f64) -> f64 {
    let shift = (thickness.round() % 2.0).abs() / 2.0;
    value.round() + shift
}
