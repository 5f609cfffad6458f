// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;

use kurbo::Line;
use peniko::Brush;

use crate::layout::LabelGeometry;
use crate::paint::{Background, LabelStroke};

/// What a drawn label hands to the rendering backend.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelFrame {
    /// Pool slot of the label.
    pub index: usize,
    /// Pool identity of the label instance.
    pub serial: u64,
    /// Formatted text; may contain `\n`.
    pub text: String,
    /// Bounds, text box, style and rotation.
    pub geometry: LabelGeometry,
    /// Text paint.
    pub font: Brush,
    /// Background box, if any.
    pub background: Option<Background>,
    /// Connector line, if the position provider has a connector point.
    pub connector: Option<Connector>,
    /// Render order; higher draws later.
    pub z_index: f64,
}

/// A line from a label to the point it annotates.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    /// From the label's anchor point to the connector point.
    pub line: Line,
    /// Stroke paint.
    pub stroke: LabelStroke,
}
