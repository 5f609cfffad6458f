// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column drawer.

use strata_data::PointMeta;

use crate::drawer::{DrawContext, Drawer, DrawerKind, SeriesPoint, shape_mut};
use crate::flags::DrawerFlags;
use crate::path::{line_to, move_to, pixel_shift};
use crate::shape::{PointState, ShapeGroupId, ShapeManager, ShapeRole};

const REQUIRED: &[ShapeRole] = &[ShapeRole::Path, ShapeRole::HatchFill];

/// Draws one closed rectangle per point, from the point's `zero` baseline to
/// its `value`, centered on `x`.
///
/// Points whose value is exactly zero emit nothing.
#[derive(Clone, Debug, Default)]
pub struct Column {
    point_width: f64,
    points_padding: f64,
    crisp_edges: bool,
    vertical: bool,
    state: PointState,
}

/// Rectangle edges in category/value space.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Edges {
    left: f64,
    right: f64,
    top: f64,
    zero: f64,
}

impl Column {
    /// Creates a column drawer; geometry inputs come from
    /// [`Drawer::start_drawing`].
    pub fn new() -> Self {
        Self::default()
    }

    fn edges(&self, meta: &PointMeta, thickness: f64) -> Edges {
        let x = meta.number("x");
        let mut left = x - self.point_width / 2.0;
        let mut right = left + self.point_width;
        let available = right - left;
        let padding = if self.points_padding > available {
            available / 2.0
        } else {
            self.points_padding
        };
        left += padding / 2.0;
        right -= padding / 2.0;

        let mut top = meta.number("value");
        let mut zero = meta.number("zero");
        if self.crisp_edges {
            left = pixel_shift(left, thickness);
            right = pixel_shift(right, thickness);
            top = pixel_shift(top, thickness);
            zero = pixel_shift(zero, thickness);
        }
        Edges {
            left,
            right,
            top,
            zero,
        }
    }

    fn draw_into(&self, meta: &PointMeta, id: ShapeGroupId, shapes: &mut ShapeManager) {
        let thickness =
            shape_mut(shapes, Some(id), ShapeRole::Path).map_or(0.0, |s| s.stroke_thickness());
        let e = self.edges(meta, thickness);
        for role in REQUIRED {
            if let Some(shape) = shape_mut(shapes, Some(id), *role) {
                move_to(shape, self.vertical, e.left, e.top);
                line_to(
                    shape,
                    self.vertical,
                    &[e.right, e.top, e.right, e.zero, e.left, e.zero],
                );
                shape.close();
            }
        }
    }

    fn draw_point(&mut self, point: &mut SeriesPoint<'_>, shapes: &mut ShapeManager) {
        if point.value == 0.0 {
            tracing::trace!(index = point.index, "zero column skipped");
            return;
        }
        let id = shapes.add_group(self.state);
        self.draw_into(point.meta, id, shapes);
        point.set_shapes(id);
    }
}

impl Drawer for Column {
    fn kind(&self) -> DrawerKind {
        DrawerKind::Column
    }

    fn flags(&self) -> DrawerFlags {
        DrawerFlags::NEEDS_ZERO
            | DrawerFlags::SUPPORTS_STACK
            | DrawerFlags::SUPPORTS_COMPARISON
            | DrawerFlags::SUPPORTS_ERROR
            | DrawerFlags::DISCRETE_BASED
            | DrawerFlags::WIDTH_BASED
            | DrawerFlags::DISTRIBUTES_ACROSS_CATEGORIES
    }

    fn required_shapes(&self) -> &'static [ShapeRole] {
        REQUIRED
    }

    fn start_drawing(&mut self, ctx: &DrawContext, shapes: &mut ShapeManager) {
        shapes.configure(REQUIRED);
        self.point_width = ctx.point_width;
        self.points_padding = ctx.points_padding;
        self.crisp_edges = ctx.crisp_edges;
        self.vertical = ctx.vertical;
        self.state = ctx.state;
    }

    fn draw_first_point(&mut self, point: &mut SeriesPoint<'_>, shapes: &mut ShapeManager) {
        self.draw_point(point, shapes);
    }

    fn draw_subsequent_point(&mut self, point: &mut SeriesPoint<'_>, shapes: &mut ShapeManager) {
        self.draw_point(point, shapes);
    }

    fn update_point_on_animate(&mut self, point: &mut SeriesPoint<'_>, shapes: &mut ShapeManager) {
        let Some(id) = point.shapes() else {
            return;
        };
        let Some(group) = shapes.group_mut(id) else {
            return;
        };
        group.clear();
        self.draw_into(point.meta, id, shapes);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::{PathEl, Point};
    use peniko::color::palette::css;

    use super::*;
    use crate::shape::{ShapeStyle, StrokeStyle};

    fn meta(x: f64, value: f64, zero: f64) -> PointMeta {
        let mut m = PointMeta::new();
        m.set_number("x", x);
        m.set_number("value", value);
        m.set_number("zero", zero);
        m
    }

    fn corners(shapes: &ShapeManager, id: ShapeGroupId, role: ShapeRole) -> std::vec::Vec<Point> {
        shapes
            .group(id)
            .unwrap()
            .get(role)
            .unwrap()
            .path()
            .elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    fn draw(
        ctx: &DrawContext,
        shapes: &mut ShapeManager,
        m: &mut PointMeta,
        value: f64,
    ) -> Option<ShapeGroupId> {
        let mut col = Column::new();
        col.start_drawing(ctx, shapes);
        let mut p = SeriesPoint::new(0, 0.0, value, m);
        col.draw_first_point(&mut p, shapes);
        col.finalize_drawing(shapes);
        p.shapes()
    }

    #[test]
    fn rectangle_spans_value_to_zero() {
        let ctx = DrawContext::new().with_point_width(20.0);
        let mut shapes = ShapeManager::new();
        let mut m = meta(50.0, 40.0, 100.0);
        let id = draw(&ctx, &mut shapes, &mut m, 3.0).unwrap();

        let expected = [
            Point::new(40.0, 40.0),
            Point::new(60.0, 40.0),
            Point::new(60.0, 100.0),
            Point::new(40.0, 100.0),
        ];
        assert_eq!(corners(&shapes, id, ShapeRole::Path), expected);
        assert_eq!(corners(&shapes, id, ShapeRole::HatchFill), expected);
        assert_eq!(
            shapes.group(id).unwrap().get(ShapeRole::Path).unwrap().path().elements().last(),
            Some(&PathEl::ClosePath)
        );
    }

    #[test]
    fn zero_values_emit_nothing() {
        let ctx = DrawContext::new().with_point_width(20.0);
        let mut shapes = ShapeManager::new();
        let mut m = meta(50.0, 100.0, 100.0);
        assert_eq!(draw(&ctx, &mut shapes, &mut m, 0.0), None);
        assert!(shapes.groups().is_empty());
        assert!(shapes.render_order().is_empty());
    }

    #[test]
    fn padding_splits_and_clamps() {
        let mut shapes = ShapeManager::new();
        let ctx = DrawContext::new().with_point_width(20.0).with_points_padding(4.0);
        let mut m = meta(50.0, 40.0, 100.0);
        let id = draw(&ctx, &mut shapes, &mut m, 1.0).unwrap();
        let c = corners(&shapes, id, ShapeRole::Path);
        assert_eq!((c[0].x, c[1].x), (42.0, 58.0));

        // Padding wider than the column is clamped to half the width.
        let ctx = DrawContext::new().with_point_width(20.0).with_points_padding(30.0);
        let id = draw(&ctx, &mut shapes, &mut m, 1.0).unwrap();
        let c = corners(&shapes, id, ShapeRole::Path);
        assert_eq!((c[0].x, c[1].x), (45.0, 55.0));
    }

    #[test]
    fn crisp_edges_follow_stroke_parity() {
        let mut shapes = ShapeManager::new()
            .with_style(
                ShapeRole::Path,
                ShapeStyle::filled(css::STEEL_BLUE)
                    .with_stroke(StrokeStyle::solid(css::BLACK, 1.0)),
            );
        let ctx = DrawContext::new().with_point_width(20.3).with_crisp_edges(true);
        let mut m = meta(50.0, 40.2, 99.9);
        let id = draw(&ctx, &mut shapes, &mut m, 1.0).unwrap();
        let c = corners(&shapes, id, ShapeRole::Path);
        assert_eq!(c[0], Point::new(40.5, 40.5));
        assert_eq!(c[2], Point::new(60.5, 100.5));
    }

    #[test]
    fn vertical_layout_lays_bars_sideways() {
        let ctx = DrawContext::new().with_point_width(20.0).with_vertical(true);
        let mut shapes = ShapeManager::new();
        let mut m = meta(50.0, 140.0, 100.0);
        let id = draw(&ctx, &mut shapes, &mut m, 3.0).unwrap();
        let c = corners(&shapes, id, ShapeRole::Path);
        assert_eq!(c[0], Point::new(140.0, 40.0));
        assert_eq!(c[2], Point::new(100.0, 60.0));
    }

    #[test]
    fn animation_redraws_in_place() {
        let ctx = DrawContext::new().with_point_width(20.0);
        let mut shapes = ShapeManager::new();
        let mut m = meta(50.0, 40.0, 100.0);
        let mut col = Column::new();
        col.start_drawing(&ctx, &mut shapes);
        let mut p = SeriesPoint::new(0, 0.0, 3.0, &mut m);
        col.draw_first_point(&mut p, &mut shapes);
        let id = p.shapes().unwrap();

        p.meta.set_number("value", 70.0);
        col.update_point_on_animate(&mut p, &mut shapes);
        assert_eq!(shapes.groups().len(), 1);
        let c = corners(&shapes, id, ShapeRole::Path);
        assert_eq!(c.len(), 4);
        assert_eq!(c[0], Point::new(40.0, 70.0));
    }

    #[test]
    fn flags_declare_the_discrete_contract() {
        let f = Column::new().flags();
        assert!(f.contains(DrawerFlags::NEEDS_ZERO | DrawerFlags::WIDTH_BASED));
        assert!(!f.contains(DrawerFlags::CONTINUOUS));
    }
}
