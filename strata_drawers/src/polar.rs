// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polar coordinate mapping.
//!
//! Radial series place a point by two ratios: the x ratio runs once around
//! the circle starting at the start angle (ratio 0 points up for a start angle
//! of 0), and the value ratio runs from the center (0) to the rim (1). Zero
//! baselines and data points both go through [`PolarMapper`], so stacked
//! radial shapes line up exactly.

extern crate alloc;

use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use strata_core::standard_angle;

#[cfg(not(feature = "std"))]
use strata_core::FloatExt;

/// Decimal places angles (in radians) are rounded to.
pub const ANGLE_PRECISION: u32 = 8;
const ANGLE_SCALE: f64 = 1e8;

/// A point in ratio space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarPoint {
    /// Position around the circle; one unit is a full turn.
    pub x: f64,
    /// Distance from the center as a fraction of the radius.
    pub y: f64,
}

impl PolarPoint {
    /// Creates a ratio-space point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One step of a polar connection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PolarSegment {
    /// A cubic segment.
    Curve {
        /// First control point.
        c1: Point,
        /// Second control point.
        c2: Point,
        /// End point.
        to: Point,
    },
    /// A straight radial segment (both ends at the same angle).
    Line(Point),
    /// The connection crosses the start seam: continue in a new shape from
    /// this point.
    Break(Point),
}

/// Maps ratio-space points onto a circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarMapper {
    /// Circle center in pixels.
    pub center: Point,
    /// Circle radius in pixels.
    pub radius: f64,
    /// Angle of x ratio 0 in degrees, clockwise from "up".
    pub start_angle: f64,
}

impl PolarMapper {
    /// Creates a mapper.
    pub const fn new(center: Point, radius: f64, start_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
        }
    }

    /// Screen angle (radians) of x ratio 0.
    pub fn zero_angle(&self) -> f64 {
        (standard_angle(self.start_angle) - 90.0).to_radians()
    }

    /// Screen angle (radians, in `[0, 2π)`) of `x_ratio`, rounded to
    /// [`ANGLE_PRECISION`] places.
    pub fn ratio_to_angle(&self, x_ratio: f64) -> f64 {
        let degrees = standard_angle(self.start_angle - 90.0 + 360.0 * x_ratio);
        (degrees.to_radians() * ANGLE_SCALE).round() / ANGLE_SCALE
    }

    /// Pixel pairs `[x0, y0, x1, y1, ...]` for one x ratio and several value
    /// ratios (a value and its zero baseline, for example).
    pub fn ratios_to_pixel_pairs(&self, x_ratio: f64, y_ratios: &[f64]) -> SmallVec<[f64; 4]> {
        let angle = self.ratio_to_angle(x_ratio);
        let (sin, cos) = (angle.sin(), angle.cos());
        let mut out = SmallVec::with_capacity(y_ratios.len() * 2);
        for y in y_ratios {
            let r = self.radius * y;
            out.push(self.center.x + r * cos);
            out.push(self.center.y + r * sin);
        }
        out
    }

    /// Pixel position of a ratio-space point.
    pub fn point(&self, p: PolarPoint) -> Point {
        let pair = self.ratios_to_pixel_pairs(p.x, &[p.y]);
        Point::new(pair[0], pair[1])
    }

    fn spiral_point(&self, theta: f64, r: f64) -> Point {
        self.center + Vec2::new(r * theta.cos(), r * theta.sin())
    }

    /// Connects two ratio-space points by interpolating both ratios linearly,
    /// so the connection curves around the center instead of cutting across.
    ///
    /// The connection runs forward (increasing x ratio) or, when
    /// `counter_clockwise`, backward, wrapping around the circle if needed.
    /// Each full-turn seam crossed inside the connection yields a
    /// [`PolarSegment::Break`]. Curves span at most a quarter turn.
    pub fn polar_arc(
        &self,
        from: PolarPoint,
        to: PolarPoint,
        counter_clockwise: bool,
    ) -> Vec<PolarSegment> {
        let mut out = Vec::new();
        if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
            tracing::trace!(?from, ?to, "non-finite polar connection skipped");
            return out;
        }
        let mut target = to.x;
        if counter_clockwise {
            if target > from.x {
                target -= (target - from.x).ceil();
            }
        } else if target < from.x {
            target += (from.x - target).ceil();
        }
        if target == from.x {
            out.push(PolarSegment::Line(self.point(to)));
            return out;
        }

        let span = target - from.x;
        let y_at = |x: f64| from.y + (to.y - from.y) * (x - from.x) / span;

        let mut stops: SmallVec<[f64; 4]> = SmallVec::new();
        if span > 0.0 {
            let mut n = from.x.floor() + 1.0;
            while n < target {
                stops.push(n);
                n += 1.0;
            }
        } else {
            let mut n = from.x.ceil() - 1.0;
            while n > target {
                stops.push(n);
                n -= 1.0;
            }
        }
        stops.push(target);

        let mut start = from.x;
        for (i, &stop) in stops.iter().enumerate() {
            self.arc_piece(start, y_at(start), stop, y_at(stop), &mut out);
            if i + 1 < stops.len() {
                out.push(PolarSegment::Break(self.point(PolarPoint::new(stop, y_at(stop)))));
            }
            start = stop;
        }
        // Land exactly where the mapper puts the target.
        let end = self.point(to);
        match out.last_mut() {
            Some(PolarSegment::Curve { to, .. }) => *to = end,
            Some(PolarSegment::Line(p)) => *p = end,
            _ => {}
        }
        out
    }

    fn arc_piece(&self, x0: f64, y0: f64, x1: f64, y1: f64, out: &mut Vec<PolarSegment>) {
        let zero = self.zero_angle();
        let (theta0, theta1) = (zero + TAU * x0, zero + TAU * x1);
        let (r0, r1) = (self.radius * y0, self.radius * y1);
        let sweep = theta1 - theta0;
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "piece count is a small positive integer"
        )]
        let pieces = ((sweep.abs() / FRAC_PI_2 - 1e-9).ceil() as usize).max(1);
        #[allow(
            clippy::cast_precision_loss,
            reason = "piece count is at most a handful"
        )]
        let h = sweep / pieces as f64;
        let k = (r1 - r0) / sweep;
        let quarter = h / 4.0;
        let lambda = 4.0 / 3.0 * quarter.sin() / quarter.cos();
        let tangent = |theta: f64, r: f64| {
            Vec2::new(
                k * theta.cos() - r * theta.sin(),
                k * theta.sin() + r * theta.cos(),
            )
        };
        for i in 0..pieces {
            #[allow(
                clippy::cast_precision_loss,
                reason = "piece index is at most a handful"
            )]
            let ta = theta0 + h * i as f64;
            let tb = ta + h;
            let ra = r0 + k * (ta - theta0);
            let rb = r0 + k * (tb - theta0);
            let pa = self.spiral_point(ta, ra);
            let pb = self.spiral_point(tb, rb);
            out.push(PolarSegment::Curve {
                c1: pa + tangent(ta, ra) * lambda,
                c2: pb - tangent(tb, rb) * lambda,
                to: pb,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-6
    }

    fn ends(segments: &[PolarSegment]) -> std::vec::Vec<Point> {
        segments
            .iter()
            .map(|s| match *s {
                PolarSegment::Curve { to, .. }
                | PolarSegment::Line(to)
                | PolarSegment::Break(to) => to,
            })
            .collect()
    }

    #[test]
    fn ratio_zero_points_up() {
        let m = PolarMapper::new(Point::ZERO, 100.0, 0.0);
        let pair = m.ratios_to_pixel_pairs(0.0, &[1.0]);
        assert_eq!(pair.len(), 2);
        assert!(pair[0].abs() < 1e-6, "{pair:?}");
        assert!((pair[1] + 100.0).abs() < 1e-6, "{pair:?}");
    }

    #[test]
    fn pairs_share_one_angle() {
        let m = PolarMapper::new(Point::new(50.0, 50.0), 40.0, 90.0);
        // Start angle 90 moves ratio 0 to the right; a quarter turn points down.
        let pair = m.ratios_to_pixel_pairs(0.25, &[1.0, 0.5, 0.0]);
        assert!(close(Point::new(pair[0], pair[1]), Point::new(50.0, 90.0)));
        assert!(close(Point::new(pair[2], pair[3]), Point::new(50.0, 70.0)));
        assert!(close(Point::new(pair[4], pair[5]), Point::new(50.0, 50.0)));
    }

    #[test]
    fn angles_are_normalized_and_rounded() {
        let m = PolarMapper::new(Point::ZERO, 1.0, -720.0);
        let a = m.ratio_to_angle(0.0);
        assert_eq!(a, (a * 1e8).round() / 1e8);
        assert!((a - 1.5 * core::f64::consts::PI).abs() < 1e-8);
        assert!((m.zero_angle() + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn quarter_turn_on_the_rim_is_one_circular_curve() {
        let m = PolarMapper::new(Point::ZERO, 100.0, 0.0);
        let segs = m.polar_arc(PolarPoint::new(0.0, 1.0), PolarPoint::new(0.25, 1.0), false);
        assert_eq!(segs.len(), 1);
        let PolarSegment::Curve { c1, c2, to } = segs[0] else {
            panic!("expected a curve, got {segs:?}");
        };
        assert!(close(to, Point::new(100.0, 0.0)));
        let handle = 100.0 * 4.0 / 3.0 * (core::f64::consts::PI / 8.0).tan();
        assert!(close(c1, Point::new(handle, -100.0)), "{c1:?}");
        assert!(close(c2, Point::new(100.0, -handle)), "{c2:?}");
    }

    #[test]
    fn radius_interpolates_through_ratio_space() {
        let m = PolarMapper::new(Point::ZERO, 100.0, 0.0);
        let segs = m.polar_arc(PolarPoint::new(0.0, 1.0), PolarPoint::new(0.5, 0.5), false);
        assert_eq!(segs.len(), 2);
        let e = ends(&segs);
        // Halfway around, halfway between the radii.
        assert!(close(e[0], Point::new(75.0, 0.0)), "{e:?}");
        assert!(close(e[1], Point::new(0.0, 50.0)), "{e:?}");
    }

    #[test]
    fn same_angle_is_a_radial_line() {
        let m = PolarMapper::new(Point::ZERO, 100.0, 0.0);
        let segs = m.polar_arc(PolarPoint::new(0.25, 1.0), PolarPoint::new(0.25, 0.5), false);
        assert_eq!(segs.len(), 1);
        assert!(matches!(segs[0], PolarSegment::Line(p) if close(p, Point::new(50.0, 0.0))));
    }

    #[test]
    fn closing_wraps_forward_without_a_break() {
        let m = PolarMapper::new(Point::ZERO, 100.0, 0.0);
        let segs = m.polar_arc(PolarPoint::new(0.75, 1.0), PolarPoint::new(0.0, 1.0), false);
        assert_eq!(segs.len(), 1);
        assert!(close(ends(&segs)[0], Point::new(0.0, -100.0)));
    }

    #[test]
    fn seam_crossing_breaks_the_connection() {
        let m = PolarMapper::new(Point::ZERO, 100.0, 0.0);
        let segs = m.polar_arc(PolarPoint::new(0.9, 1.0), PolarPoint::new(0.1, 1.0), false);
        let breaks: std::vec::Vec<_> = segs
            .iter()
            .filter_map(|s| match s {
                PolarSegment::Break(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(breaks.len(), 1);
        assert!(close(breaks[0], Point::new(0.0, -100.0)), "{breaks:?}");
        assert!(close(*ends(&segs).last().unwrap(), m.point(PolarPoint::new(0.1, 1.0))));
    }

    #[test]
    fn counter_clockwise_runs_backward() {
        let m = PolarMapper::new(Point::ZERO, 100.0, 0.0);
        let segs = m.polar_arc(PolarPoint::new(0.0, 1.0), PolarPoint::new(0.75, 1.0), true);
        // A quarter turn back, not three quarters forward.
        assert_eq!(segs.len(), 1);
        let PolarSegment::Curve { c1, to, .. } = segs[0] else {
            panic!("expected a curve, got {segs:?}");
        };
        assert!(close(to, Point::new(-100.0, 0.0)));
        assert!(c1.x < 0.0, "{c1:?}");
    }

    #[test]
    fn non_finite_ratios_emit_nothing() {
        let m = PolarMapper::new(Point::ZERO, 100.0, 0.0);
        assert!(
            m.polar_arc(PolarPoint::new(f64::NAN, 1.0), PolarPoint::new(0.1, 1.0), false)
                .is_empty()
        );
    }
}
