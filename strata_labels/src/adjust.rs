// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting a font size into an explicit label box.

use core::cmp::Ordering;

use kurbo::Size;
use strata_core::Value;

#[cfg(not(feature = "std"))]
use strata_core::FloatExt;

/// Which dimensions drive font auto-adjustment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdjustFontSize {
    /// Fit the text width.
    pub width: bool,
    /// Fit the text height.
    pub height: bool,
}

impl AdjustFontSize {
    /// Reads `true`/`false`, `[width, height]`, or `{ width, height }`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self {
                width: *b,
                height: *b,
            },
            Value::List(l) => Self {
                width: l.first().and_then(Value::as_bool).unwrap_or(false),
                height: l.get(1).and_then(Value::as_bool).unwrap_or(false),
            },
            Value::Map(m) => Self {
                width: m.get("width").and_then(Value::as_bool).unwrap_or(false),
                height: m.get("height").and_then(Value::as_bool).unwrap_or(false),
            },
            _ => Self::default(),
        }
    }

    /// Returns `true` if either dimension is adjusted.
    pub fn any(self) -> bool {
        self.width || self.height
    }
}

/// Compares a rendered size against a target.
///
/// `Greater` means too big, `Less` too small, `Equal` fits. With both
/// dimensions adjusted, overflowing either is too big, and only being strictly
/// under in both is too small.
pub fn compare_fit(rendered: Size, target: Size, by: AdjustFontSize) -> Ordering {
    match (by.width, by.height) {
        (true, true) => {
            if rendered.width > target.width || rendered.height > target.height {
                Ordering::Greater
            } else if rendered.width < target.width && rendered.height < target.height {
                Ordering::Less
            } else {
                Ordering::Equal
            }
        }
        (true, false) => rendered.width.total_cmp(&target.width),
        (false, true) => rendered.height.total_cmp(&target.height),
        (false, false) => Ordering::Equal,
    }
}

/// Finds the largest integer font size in `[min, max]` whose rendering still
/// fits `target`.
///
/// Bisection starts at the midpoint and follows the comparator until the
/// interval closes or the comparator's sign flips; a ±1 walk then lands on the
/// boundary, since rendered size is not smooth in the font size. If even `min`
/// overflows, `min` is returned.
pub fn fit_font_size(
    min: f64,
    max: f64,
    target: Size,
    by: AdjustFontSize,
    mut measure: impl FnMut(f64) -> Size,
) -> f64 {
    let min = min.round();
    let max = max.round().max(min);
    let mut cmp = |size: f64| compare_fit(measure(size), target, by);

    let (mut from, mut to) = (min, max);
    let mut size = ((from + to) / 2.0).floor();
    let mut sign = cmp(size);
    while sign != Ordering::Equal && from < to {
        if sign == Ordering::Greater {
            to = size;
        } else {
            from = (size + 1.0).min(to);
        }
        let next = ((from + to) / 2.0).floor();
        if next == size {
            break;
        }
        size = next;
        let next_sign = cmp(size);
        if next_sign != sign {
            break;
        }
        sign = next_sign;
    }

    while size > min && cmp(size) == Ordering::Greater {
        size -= 1.0;
    }
    while size < max && cmp(size + 1.0) != Ordering::Greater {
        size += 1.0;
    }
    size
}
