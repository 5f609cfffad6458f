// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line drawer.

use crate::drawer::{DrawContext, Drawer, DrawerKind, SeriesPoint, shape_mut};
use crate::flags::DrawerFlags;
use crate::path::{line_to, move_to};
use crate::shape::{PointState, ShapeGroupId, ShapeManager, ShapeRole};

const REQUIRED: &[ShapeRole] = &[ShapeRole::Stroke];

/// Connects points with straight segments. A missing point ends the current
/// subpath; the next drawn point starts a new one in the same group.
#[derive(Clone, Debug, Default)]
pub struct Line {
    vertical: bool,
    state: PointState,
    current: Option<ShapeGroupId>,
}

impl Line {
    /// Creates a line drawer.
    pub fn new() -> Self {
        Self::default()
    }

    fn group(&mut self, shapes: &mut ShapeManager) -> ShapeGroupId {
        *self
            .current
            .get_or_insert_with(|| shapes.add_group(self.state))
    }
}

impl Drawer for Line {
    fn kind(&self) -> DrawerKind {
        DrawerKind::Line
    }

    fn flags(&self) -> DrawerFlags {
        DrawerFlags::SUPPORTS_STACK
            | DrawerFlags::SUPPORTS_COMPARISON
            | DrawerFlags::SUPPORTS_ERROR
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
    }

    fn draw_first_point(&mut self, point: &mut SeriesPoint<'_>, shapes: &mut ShapeManager) {
        let id = self.group(shapes);
        let (x, y) = (point.meta.number("x"), point.meta.number("value"));
        if let Some(s) = shape_mut(shapes, Some(id), ShapeRole::Stroke) {
            move_to(s, self.vertical, x, y);
        }
        point.set_shapes(id);
    }

    fn draw_subsequent_point(&mut self, point: &mut SeriesPoint<'_>, shapes: &mut ShapeManager) {
        let id = self.group(shapes);
        let (x, y) = (point.meta.number("x"), point.meta.number("value"));
        if let Some(s) = shape_mut(shapes, Some(id), ShapeRole::Stroke) {
            line_to(s, self.vertical, &[x, y]);
        }
        point.set_shapes(id);
    }
}
