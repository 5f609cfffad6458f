// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading paints from settings values.

use peniko::Brush;
use peniko::color::palette::css;
use peniko::color::{AlphaColor, Srgb, parse_color};
use strata_core::{Value, ValueMap};

/// Parses a CSS color string (`"#336699"`, `"steelblue"`, `"rgb(...)"`).
pub fn color_from_value(value: &Value) -> Option<AlphaColor<Srgb>> {
    let text = value.as_str()?;
    match parse_color(text) {
        Ok(c) => Some(c.to_alpha_color::<Srgb>()),
        Err(_) => {
            tracing::debug!(color = text, "unparsable color");
            None
        }
    }
}

/// A stroke read from settings.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelStroke {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width.
    pub width: f64,
}

/// Label background paint.
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    /// Fill paint.
    pub fill: Option<Brush>,
    /// Outline.
    pub stroke: Option<LabelStroke>,
    /// Corner radius.
    pub corner_radius: f64,
}

impl Background {
    /// Reads a `background` option: a color string, or a map with `enabled`,
    /// `fill`, `stroke`, `strokeThickness` and `cornerRadius`.
    ///
    /// Returns `None` for disabled or fully transparent backgrounds.
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Some(fill) = color_from_value(value) {
            return Some(Self {
                fill: Some(Brush::Solid(fill)),
                stroke: None,
                corner_radius: 0.0,
            });
        }
        let map = value.as_map()?;
        if map.get("enabled").and_then(Value::as_bool) == Some(false) {
            return None;
        }
        let fill = map.get("fill").and_then(color_from_value).map(Brush::Solid);
        let stroke = stroke_from_map(map, "stroke", "strokeThickness");
        if fill.is_none() && stroke.is_none() {
            return None;
        }
        Some(Self {
            fill,
            stroke,
            corner_radius: map
                .get("cornerRadius")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
        })
    }
}

/// Reads a stroke from `color_key` and `width_key`. Width defaults to 1.
pub(crate) fn stroke_from_map(
    map: &ValueMap,
    color_key: &str,
    width_key: &str,
) -> Option<LabelStroke> {
    let color = map.get(color_key).and_then(color_from_value)?;
    let width = map.get(width_key).and_then(Value::as_f64).unwrap_or(1.0);
    (width > 0.0).then(|| LabelStroke {
        brush: Brush::Solid(color),
        width,
    })
}

/// Reads the label font color, applying `fontOpacity`. Defaults to black.
pub(crate) fn font_brush(settings: &ValueMap) -> Brush {
    let color = settings
        .get("fontColor")
        .and_then(color_from_value)
        .unwrap_or(css::BLACK);
    let opacity = settings
        .get("fontOpacity")
        .and_then(Value::as_f64)
        .map_or(1.0, |o| o.clamp(0.0, 1.0));
    #[allow(
        clippy::cast_possible_truncation,
        reason = "opacity is clamped to [0, 1]"
    )]
    Brush::Solid(color.multiply_alpha(opacity as f32))
}
