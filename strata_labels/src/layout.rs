// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label geometry: size, font fitting, anchoring, offsets and rotation.
//!
//! Drawing and the measurement probes (`get_dimension`, `measure`,
//! `measure_with_transform`) both go through [`compute_geometry`], so a probe
//! reports exactly the box a drawn label would occupy.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use strata_core::{Value, ValueMap};
use strata_text::{TextMeasurer, TextStyle};

use crate::adjust::{AdjustFontSize, fit_font_size};
use crate::anchor::Anchor;
use crate::dimension::{Dimension, Padding};

/// Default lower bound of font auto-adjustment.
pub const DEFAULT_MIN_FONT_SIZE: f64 = 8.0;
/// Default upper bound of font auto-adjustment.
pub const DEFAULT_MAX_FONT_SIZE: f64 = 72.0;

/// Where and how big a label is.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelGeometry {
    /// Outer bounds including padding, before rotation.
    pub bounds: Rect,
    /// Text box inside the padding.
    pub text_rect: Rect,
    /// Text style after font auto-adjustment.
    pub style: TextStyle,
    /// Resolved anchor.
    pub anchor: Anchor,
    /// Rotation pivot: the anchor point of `bounds`.
    pub pivot: Point,
    /// Rotation in degrees, clockwise in y-down coordinates.
    pub rotation: f64,
    /// Baseline of the first text line, relative to `text_rect.y0`.
    pub baseline: f64,
}

impl LabelGeometry {
    /// Rotation about [`LabelGeometry::pivot`].
    pub fn transform(&self) -> Affine {
        if self.rotation == 0.0 {
            Affine::IDENTITY
        } else {
            Affine::rotate_about(self.rotation.to_radians(), self.pivot)
        }
    }

    /// Axis-aligned bounds of the rotated label.
    pub fn rotated_bounds(&self) -> Rect {
        self.transform().transform_rect_bbox(self.bounds)
    }

    /// Rotated corners as `[x0, y0, ..., x3, y3]`, clockwise from the top-left.
    pub fn corners(&self) -> [f64; 8] {
        let t = self.transform();
        let r = self.bounds;
        let pts = [
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ]
        .map(|p| t * p);
        [
            pts[0].x, pts[0].y, pts[1].x, pts[1].y, pts[2].x, pts[2].y, pts[3].x, pts[3].y,
        ]
    }
}

/// Inputs of a geometry pass.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GeometryInput<'a> {
    pub(crate) settings: &'a ValueMap,
    pub(crate) text: &'a str,
    pub(crate) position: Point,
    pub(crate) parent_bounds: Option<Rect>,
    pub(crate) vertical: bool,
    pub(crate) auto_anchor: Option<Anchor>,
}

fn dimension(settings: &ValueMap, name: &str, reference: f64) -> Option<f64> {
    settings
        .get(name)
        .and_then(Dimension::from_value)
        .map(|d| d.resolve(reference))
}

fn number(settings: &ValueMap, name: &str, default: f64) -> f64 {
    settings
        .get(name)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Computes a label's geometry.
///
/// Width and height are resolved independently: an explicit size is the outer
/// size and the text box is padding-tightened; an auto size is the measured
/// text widened by padding.
pub(crate) fn compute_geometry(
    input: GeometryInput<'_>,
    measurer: &dyn TextMeasurer,
) -> LabelGeometry {
    let s = input.settings;
    let parent = input.parent_bounds.unwrap_or(Rect::ZERO);

    let mut style = TextStyle::default();
    style.apply_settings(|name| s.get(name).cloned());

    let width = dimension(s, "width", parent.width());
    let height = dimension(s, "height", parent.height());
    let padding = s
        .get("padding")
        .and_then(Padding::from_value)
        .unwrap_or_default();

    let mut text = measurer.measure(input.text, &style);

    let adjust = s
        .get("adjustFontSize")
        .map(AdjustFontSize::from_value)
        .unwrap_or_default();
    let by = AdjustFontSize {
        width: adjust.width && width.is_some(),
        height: adjust.height && height.is_some(),
    };
    if by.any() {
        let explicit = padding.resolve(width.unwrap_or(0.0), height.unwrap_or(0.0));
        let target = Size::new(
            width.map_or(0.0, |w| w - explicit.x_value()),
            height.map_or(0.0, |h| h - explicit.y_value()),
        );
        let min = number(s, "minFontSize", DEFAULT_MIN_FONT_SIZE);
        let max = number(s, "maxFontSize", DEFAULT_MAX_FONT_SIZE);
        let probe = style.clone();
        let size = fit_font_size(min, max, target, by, |f| {
            let b = measurer.measure(input.text, &probe.clone().with_font_size(f));
            Size::new(b.width, b.height)
        });
        tracing::debug!(font_size = size, ?target, "font auto-adjusted");
        style.font_size = size;
        text = measurer.measure(input.text, &style);
    }

    let insets = padding.resolve(
        width.unwrap_or(text.width),
        height.unwrap_or(text.height),
    );
    let outer = Size::new(
        width.unwrap_or(text.width + insets.x_value()),
        height.unwrap_or(text.height + insets.y_value()),
    );

    let anchor = s
        .get("anchor")
        .and_then(Anchor::from_value)
        .unwrap_or_default()
        .resolve(input.auto_anchor);

    let mut offset = Vec2::new(
        dimension(s, "offsetX", parent.width()).unwrap_or(0.0),
        dimension(s, "offsetY", parent.height()).unwrap_or(0.0),
    );
    if input.vertical {
        offset = Vec2::new(offset.y, offset.x);
    }
    let (sx, sy) = anchor.offset_signs();
    let origin = input.position - anchor.offset(outer.width, outer.height)
        + Vec2::new(sx * offset.x, sy * offset.y);

    let bounds = Rect::from_origin_size(origin, outer);
    let text_rect = Rect::new(
        bounds.x0 + insets.x0,
        bounds.y0 + insets.y0,
        bounds.x1 - insets.x1,
        bounds.y1 - insets.y1,
    );

    LabelGeometry {
        bounds,
        text_rect,
        style,
        anchor,
        pivot: anchor.point_in(bounds),
        rotation: number(s, "rotation", 0.0),
        baseline: text.baseline,
    }
}
