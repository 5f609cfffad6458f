// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area drawer.

extern crate alloc;

use alloc::vec::Vec;

use crate::drawer::{DrawContext, Drawer, DrawerKind, SeriesPoint, shape_mut};
use crate::flags::DrawerFlags;
use crate::path::{line_to, move_to};
use crate::shape::{PointState, ShapeGroupId, ShapeManager, ShapeRole};

const REQUIRED: &[ShapeRole] = &[ShapeRole::Path, ShapeRole::HatchFill, ShapeRole::Stroke];
const FILLS: &[ShapeRole] = &[ShapeRole::Path, ShapeRole::HatchFill];

/// Fills the region between the points and their zero baseline.
///
/// The fill runs up from the first point's baseline, along the values, and on
/// finalize walks back along the stored baselines to close the shape. A
/// missing point closes the current region; the top edge is also traced on
/// the `Stroke` shape.
#[derive(Clone, Debug, Default)]
pub struct Area {
    vertical: bool,
    state: PointState,
    current: Option<ShapeGroupId>,
    zeros: Vec<(f64, f64)>,
}

impl Area {
    /// Creates an area drawer.
    pub fn new() -> Self {
        Self::default()
    }

    fn group(&mut self, shapes: &mut ShapeManager) -> ShapeGroupId {
        *self
            .current
            .get_or_insert_with(|| shapes.add_group(self.state))
    }

    fn close_region(&mut self, shapes: &mut ShapeManager) {
        if self.zeros.is_empty() {
            return;
        }
        let back: Vec<f64> = self
            .zeros
            .iter()
            .rev()
            .flat_map(|&(x, zero)| [x, zero])
            .collect();
        for role in FILLS {
            if let Some(s) = shape_mut(shapes, self.current, *role) {
                line_to(s, self.vertical, &back);
                s.close();
            }
        }
        self.zeros.clear();
    }
}

impl Drawer for Area {
    fn kind(&self) -> DrawerKind {
        DrawerKind::Area
    }

    fn flags(&self) -> DrawerFlags {
        DrawerFlags::NEEDS_ZERO
            | DrawerFlags::SUPPORTS_STACK
            | DrawerFlags::SUPPORTS_COMPARISON
            | DrawerFlags::CONTINUOUS
    }

    fn required_shapes(&self) -> &'static [ShapeRole] {
        REQUIRED
    }

    fn start_drawing(&mut self, ctx: &DrawContext, shapes: &mut ShapeManager) {
        shapes.configure(REQUIRED);
        self.vertical = ctx.vertical;
        self.state = ctx.state;
        self.current = None;
        self.zeros.clear();
    }

    fn draw_first_point(&mut self, point: &mut SeriesPoint<'_>, shapes: &mut ShapeManager) {
        let id = self.group(shapes);
        let m = &point.meta;
        let (x, y, zero) = (m.number("x"), m.number("value"), m.number("zero"));
        for role in FILLS {
            if let Some(s) = shape_mut(shapes, Some(id), *role) {
                move_to(s, self.vertical, x, zero);
                line_to(s, self.vertical, &[x, y]);
            }
        }
        if let Some(s) = shape_mut(shapes, Some(id), ShapeRole::Stroke) {
            move_to(s, self.vertical, x, y);
        }
        self.zeros.push((x, zero));
        point.set_shapes(id);
    }

    fn draw_subsequent_point(&mut self, point: &mut SeriesPoint<'_>, shapes: &mut ShapeManager) {
        let id = self.group(shapes);
        let m = &point.meta;
        let (x, y, zero) = (m.number("x"), m.number("value"), m.number("zero"));
        for role in REQUIRED {
            if let Some(s) = shape_mut(shapes, Some(id), *role) {
                line_to(s, self.vertical, &[x, y]);
            }
        }
        self.zeros.push((x, zero));
        point.set_shapes(id);
    }

    fn draw_missing_point(&mut self, _point: &mut SeriesPoint<'_>, shapes: &mut ShapeManager) {
        self.close_region(shapes);
    }

    fn additional_finalize(&mut self, shapes: &mut ShapeManager) {
        self.close_region(shapes);
    }
}
