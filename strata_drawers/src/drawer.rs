// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawer phase contract.

use core::fmt;

use strata_data::{MetaValue, PointMeta};

use crate::flags::DrawerFlags;
use crate::polar::PolarMapper;
use crate::shape::{PointState, Shape, ShapeGroupId, ShapeManager, ShapeRole};

/// Meta key under which drawers store the shape group of a point.
pub(crate) const SHAPES_META: &str = "shapes";

/// Geometry kinds with a built-in drawer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawerKind {
    /// Vertical (or, in vertical layouts, horizontal) bars.
    Column,
    /// A polyline through the points.
    Line,
    /// A filled region between the points and their zero baseline.
    Area,
    /// A line on a circle, interpolated through ratio space.
    PolarLine,
}

impl DrawerKind {
    /// Series type name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Column => "column",
            Self::Line => "line",
            Self::Area => "area",
            Self::PolarLine => "polar-line",
        }
    }

    /// Parses a series type name.
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Column, Self::Line, Self::Area, Self::PolarLine]
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }
}

/// Series-level inputs captured by [`Drawer::start_drawing`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawContext {
    /// Resolved point width in pixels (width-based drawers).
    pub point_width: f64,
    /// Pixels removed between neighbouring points, split across both sides.
    pub points_padding: f64,
    /// Snap edges to device pixels.
    pub crisp_edges: bool,
    /// Category axis runs vertically; coordinates are transposed.
    pub vertical: bool,
    /// State the emitted groups render.
    pub state: PointState,
    /// Circle geometry for radial drawers.
    pub polar: Option<PolarMapper>,
    /// Connect the last point back to the first (radial drawers).
    pub closed: bool,
    /// The x scale is inverted, so radial runs go counter-clockwise.
    pub x_inverted: bool,
}

impl DrawContext {
    /// A context with zero width and no polar geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the point width.
    #[must_use]
    pub fn with_point_width(mut self, width: f64) -> Self {
        self.point_width = width;
        self
    }

    /// Sets the inter-point padding.
    #[must_use]
    pub fn with_points_padding(mut self, padding: f64) -> Self {
        self.points_padding = padding;
        self
    }

    /// Enables pixel snapping.
    #[must_use]
    pub fn with_crisp_edges(mut self, crisp: bool) -> Self {
        self.crisp_edges = crisp;
        self
    }

    /// Transposes coordinates.
    #[must_use]
    pub fn with_vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    /// Sets the state of emitted groups.
    #[must_use]
    pub fn with_state(mut self, state: PointState) -> Self {
        self.state = state;
        self
    }

    /// Sets the circle for radial drawers.
    #[must_use]
    pub fn with_polar(mut self, mapper: PolarMapper) -> Self {
        self.polar = Some(mapper);
        self
    }

    /// Closes radial runs.
    #[must_use]
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Marks the x scale as inverted.
    #[must_use]
    pub fn with_x_inverted(mut self, inverted: bool) -> Self {
        self.x_inverted = inverted;
        self
    }
}

/// One point handed to a drawer.
///
/// `meta` holds the pixel values resolved by the series: `x`, `value`, `zero`,
/// and for radial series `xRatio` and `valueRatio`.
#[derive(Debug)]
pub struct SeriesPoint<'a> {
    /// Cursor index of the point.
    pub index: isize,
    /// Row key.
    pub key: f64,
    /// The resolved data value (not pixels); `NaN` for missing points.
    pub value: f64,
    /// Draw-pass metadata of the point.
    pub meta: &'a mut PointMeta,
}

impl<'a> SeriesPoint<'a> {
    /// Creates a point.
    pub fn new(index: isize, key: f64, value: f64, meta: &'a mut PointMeta) -> Self {
        Self {
            index,
            key,
            value,
            meta,
        }
    }

    /// The shape group a drawer stored for this point.
    pub fn shapes(&self) -> Option<ShapeGroupId> {
        self.meta.handle(SHAPES_META).map(ShapeGroupId)
    }

    pub(crate) fn set_shapes(&mut self, id: ShapeGroupId) {
        self.meta.set_meta(SHAPES_META, MetaValue::Handle(id.0));
    }
}

/// A per-series geometry state machine.
///
/// The caller runs [`Drawer::start_drawing`] once per pass, then feeds points
/// in cursor order: [`Drawer::draw_first_point`] for the first point of a run,
/// [`Drawer::draw_subsequent_point`] for the rest, and
/// [`Drawer::draw_missing_point`] for holes (which end the run). The pass ends
/// with [`Drawer::finalize_drawing`].
pub trait Drawer: fmt::Debug {
    /// The geometry kind.
    fn kind(&self) -> DrawerKind;

    /// Declared capabilities.
    fn flags(&self) -> DrawerFlags;

    /// Roles every shape group of this drawer carries.
    fn required_shapes(&self) -> &'static [ShapeRole];

    /// Captures series-level inputs and configures `shapes`.
    fn start_drawing(&mut self, ctx: &DrawContext, shapes: &mut ShapeManager);

    /// Draws the first point of a run.
    fn draw_first_point(&mut self, point: &mut SeriesPoint<'_>, shapes: &mut ShapeManager);

    /// Draws a point following a drawn one.
    fn draw_subsequent_point(&mut self, point: &mut SeriesPoint<'_>, shapes: &mut ShapeManager);

    /// Handles a point without a value.
    fn draw_missing_point(&mut self, _point: &mut SeriesPoint<'_>, _shapes: &mut ShapeManager) {}

    /// Ends the pass.
    fn finalize_drawing(&mut self, shapes: &mut ShapeManager) {
        self.additional_finalize(shapes);
    }

    /// Drawer-specific work at the end of the pass.
    fn additional_finalize(&mut self, _shapes: &mut ShapeManager) {}

    /// Redraws an already drawn point in place (animation frames).
    fn update_point_on_animate(
        &mut self,
        _point: &mut SeriesPoint<'_>,
        _shapes: &mut ShapeManager,
    ) {
    }
}

/// The shape with `role` in group `id`.
pub(crate) fn shape_mut(
    shapes: &mut ShapeManager,
    id: Option<ShapeGroupId>,
    role: ShapeRole,
) -> Option<&mut Shape> {
    shapes.group_mut(id?)?.get_mut(role)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn kinds_round_trip_through_names() {
        for kind in [
            DrawerKind::Column,
            DrawerKind::Line,
            DrawerKind::Area,
            DrawerKind::PolarLine,
        ] {
            assert_eq!(DrawerKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(DrawerKind::from_name("Column"), Some(DrawerKind::Column));
        assert_eq!(DrawerKind::from_name("ohlc"), None);
    }
}
