// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polar line drawer.

use kurbo::Point;

use crate::drawer::{DrawContext, Drawer, DrawerKind, SeriesPoint, shape_mut};
use crate::flags::DrawerFlags;
use crate::polar::{PolarMapper, PolarPoint, PolarSegment};
use crate::shape::{PointState, ShapeGroupId, ShapeManager, ShapeRole};

const REQUIRED: &[ShapeRole] = &[ShapeRole::Stroke];

/// Draws a line on a circle (radar and polar line series).
///
/// Consecutive points are not joined by straight pixel segments: the
/// connection interpolates both ratios and is re-projected, so it curves
/// around the center. Points need `x`/`value` pixels and `xRatio`/`valueRatio`
/// ratios in their meta.
#[derive(Clone, Debug, Default)]
pub struct PolarLine {
    mapper: Option<PolarMapper>,
    zero_angle: f64,
    closed: bool,
    counter_clockwise: bool,
    state: PointState,
    current: Option<ShapeGroupId>,
    first: Option<PolarPoint>,
    last: Option<PolarPoint>,
}

impl PolarLine {
    /// Creates a polar line drawer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen angle (radians) of x ratio 0, captured at the start of the pass.
    pub fn zero_angle(&self) -> f64 {
        self.zero_angle
    }

    fn ratios(point: &SeriesPoint<'_>) -> PolarPoint {
        PolarPoint::new(point.meta.number("xRatio"), point.meta.number("valueRatio"))
    }

    fn connect(&mut self, to: PolarPoint, shapes: &mut ShapeManager) {
        let (Some(mapper), Some(from)) = (self.mapper, self.last) else {
            return;
        };
        for segment in mapper.polar_arc(from, to, self.counter_clockwise) {
            match segment {
                PolarSegment::Curve { c1, c2, to } => {
                    if let Some(s) = shape_mut(shapes, self.current, ShapeRole::Stroke) {
                        s.curve_to(c1, c2, to);
                    }
                }
                PolarSegment::Line(p) => {
                    if let Some(s) = shape_mut(shapes, self.current, ShapeRole::Stroke) {
                        s.line_to(p);
                    }
                }
                PolarSegment::Break(p) => {
                    tracing::trace!(x = p.x, y = p.y, "polar line crosses the seam");
                    self.start_group(p, shapes);
                }
            }
        }
        self.last = Some(to);
    }

    fn start_group(&mut self, at: Point, shapes: &mut ShapeManager) -> ShapeGroupId {
        let id = shapes.add_group(self.state);
        if let Some(s) = shape_mut(shapes, Some(id), ShapeRole::Stroke) {
            s.move_to(at);
        }
        self.current = Some(id);
        id
    }
}

impl Drawer for PolarLine {
    fn kind(&self) -> DrawerKind {
        DrawerKind::PolarLine
    }

    fn flags(&self) -> DrawerFlags {
        DrawerFlags::CONTINUOUS | DrawerFlags::POLAR | DrawerFlags::SUPPORTS_STACK
    }

    fn required_shapes(&self) -> &'static [ShapeRole] {
        REQUIRED
    }

    fn start_drawing(&mut self, ctx: &DrawContext, shapes: &mut ShapeManager) {
        shapes.configure(REQUIRED);
        self.mapper = ctx.polar;
        self.zero_angle = ctx.polar.map_or(0.0, |m| m.zero_angle());
        self.closed = ctx.closed;
        self.counter_clockwise = ctx.x_inverted;
        self.state = ctx.state;
        self.current = None;
        self.first = None;
        self.last = None;
        if self.mapper.is_none() {
            tracing::debug!("polar line started without circle geometry");
        }
    }

    fn draw_first_point(&mut self, point: &mut SeriesPoint<'_>, shapes: &mut ShapeManager) {
        let at = Point::new(point.meta.number("x"), point.meta.number("value"));
        let id = self.start_group(at, shapes);
        let ratios = Self::ratios(point);
        self.first.get_or_insert(ratios);
        self.last = Some(ratios);
        point.set_shapes(id);
    }

    fn draw_subsequent_point(&mut self, point: &mut SeriesPoint<'_>, shapes: &mut ShapeManager) {
        self.connect(Self::ratios(point), shapes);
        if let Some(id) = self.current {
            point.set_shapes(id);
        }
    }

    fn additional_finalize(&mut self, shapes: &mut ShapeManager) {
        if self.closed
            && let Some(first) = self.first
        {
            self.connect(first, shapes);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::PathEl;
    use strata_data::PointMeta;

    use super::*;

    fn radar_point(mapper: &PolarMapper, x_ratio: f64, value_ratio: f64) -> PointMeta {
        let p = mapper.point(PolarPoint::new(x_ratio, value_ratio));
        let mut m = PointMeta::new();
        m.set_number("x", p.x);
        m.set_number("value", p.y);
        m.set_number("xRatio", x_ratio);
        m.set_number("valueRatio", value_ratio);
        m
    }

    fn run(ctx: &DrawContext, ratios: &[(f64, f64)]) -> ShapeManager {
        let mapper = ctx.polar.unwrap();
        let mut shapes = ShapeManager::new();
        let mut d = PolarLine::new();
        d.start_drawing(ctx, &mut shapes);
        for (i, &(x, y)) in ratios.iter().enumerate() {
            let mut m = radar_point(&mapper, x, y);
            let mut p = SeriesPoint::new(0, 0.0, 1.0, &mut m);
            if i == 0 {
                d.draw_first_point(&mut p, &mut shapes);
            } else {
                d.draw_subsequent_point(&mut p, &mut shapes);
            }
        }
        d.finalize_drawing(&mut shapes);
        shapes
    }

    #[test]
    fn captures_circle_geometry() {
        let mut d = PolarLine::new();
        let ctx = DrawContext::new().with_polar(PolarMapper::new(Point::ZERO, 10.0, 90.0));
        d.start_drawing(&ctx, &mut ShapeManager::new());
        assert_eq!(d.zero_angle(), 0.0);
        assert!(d.flags().contains(DrawerFlags::POLAR));
    }

    #[test]
    fn closed_runs_return_to_the_first_point() {
        let mapper = PolarMapper::new(Point::new(100.0, 100.0), 50.0, 0.0);
        let ratios = [(0.0, 1.0), (0.25, 0.5), (0.5, 1.0), (0.75, 0.5)];

        let open = run(&DrawContext::new().with_polar(mapper), &ratios);
        let closed = run(&DrawContext::new().with_polar(mapper).with_closed(true), &ratios);

        let open_els = open.groups()[0].get(ShapeRole::Stroke).unwrap().path().elements();
        let closed_els = closed.groups()[0].get(ShapeRole::Stroke).unwrap().path().elements();
        assert_eq!(open_els.len(), 4, "move + one curve per quarter");
        assert_eq!(closed_els.len(), 5);
        let PathEl::CurveTo(_, _, end) = closed_els[4] else {
            panic!("expected a closing curve, got {:?}", closed_els[4]);
        };
        let PathEl::MoveTo(start) = closed_els[0] else {
            panic!("expected a move");
        };
        assert!((end - start).hypot() < 1e-6, "{end:?} vs {start:?}");
    }

    #[test]
    fn seam_crossings_start_a_new_group() {
        let mapper = PolarMapper::new(Point::ZERO, 50.0, 0.0);
        let shapes = run(&DrawContext::new().with_polar(mapper), &[(0.8, 1.0), (1.2, 1.0)]);
        assert_eq!(shapes.groups().len(), 2);
        let second = shapes.groups()[1].get(ShapeRole::Stroke).unwrap().path().elements();
        let PathEl::MoveTo(seam) = second[0] else {
            panic!("expected the new group to start with a move");
        };
        assert!((seam - Point::new(0.0, -50.0)).hypot() < 1e-6, "{seam:?}");
    }

    #[test]
    fn inverted_x_runs_mirror_clockwise_ones() {
        let mapper = PolarMapper::new(Point::ZERO, 50.0, 0.0);
        let cw = run(&DrawContext::new().with_polar(mapper), &[(0.0, 1.0), (0.25, 1.0)]);
        let ccw = run(
            &DrawContext::new().with_polar(mapper).with_x_inverted(true),
            &[(0.0, 1.0), (0.75, 1.0)],
        );
        let cw = cw.groups()[0].get(ShapeRole::Stroke).unwrap().path().elements();
        let ccw = ccw.groups()[0].get(ShapeRole::Stroke).unwrap().path().elements();
        assert_eq!(ccw.len(), 2, "a quarter turn backward is one curve");

        let (PathEl::CurveTo(a1, a2, a3), PathEl::CurveTo(b1, b2, b3)) = (cw[1], ccw[1]) else {
            panic!("expected curves, got {:?} and {:?}", cw[1], ccw[1]);
        };
        for (a, b) in [(a1, b1), (a2, b2), (a3, b3)] {
            let mirrored = Point::new(-a.x, a.y);
            assert!((b - mirrored).hypot() < 1e-6, "{b:?} vs {mirrored:?}");
        }
        assert!(b1.x < 0.0, "the run leaves the top heading left");
    }

    #[test]
    fn without_geometry_only_moves_are_emitted() {
        let mut shapes = ShapeManager::new();
        let mut d = PolarLine::new();
        d.start_drawing(&DrawContext::new().with_closed(true), &mut shapes);
        let mut m = PointMeta::new();
        m.set_number("x", 1.0);
        m.set_number("value", 2.0);
        d.draw_first_point(&mut SeriesPoint::new(0, 0.0, 1.0, &mut m), &mut shapes);
        d.draw_subsequent_point(&mut SeriesPoint::new(1, 1.0, 1.0, &mut m), &mut shapes);
        d.finalize_drawing(&mut shapes);
        assert_eq!(shapes.groups()[0].get(ShapeRole::Stroke).unwrap().path().elements().len(), 1);
    }
}
