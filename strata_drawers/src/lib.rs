// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series drawers.
//!
//! A [`Drawer`] is a per-series state machine. The series pipeline resolves
//! every row to pixel space (stored in the row's [`PointMeta`]) and feeds the
//! points through the drawer's phases:
//!
//! ```text
//! start_drawing -> draw_first_point -> draw_subsequent_point* -> finalize_drawing
//!                        ^                                  |
//!                        +------ draw_missing_point <-------+
//! ```
//!
//! Drawers emit path operations into [`ShapeGroup`]s allocated by a
//! [`ShapeManager`]: one group per point for discrete geometry (columns), one
//! group per continuous run for lines and areas. [`paint_series`] drives the
//! phases from a [`RowCursor`].
//!
//! Radial series map `(x ratio, value ratio)` pairs through a [`PolarMapper`],
//! the single source of truth for where a ratio lands on the circle.
//!
//! [`PointMeta`]: strata_data::PointMeta
//! [`RowCursor`]: strata_data::RowCursor

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod area;
mod column;
mod drawer;
mod flags;
mod line;
mod path;
mod pipeline;
mod polar;
mod polar_line;
mod registry;
mod shape;

#[cfg(test)]
mod pipeline_tests;

pub use area::Area;
pub use column::Column;
pub use drawer::{DrawContext, Drawer, DrawerKind, SeriesPoint};
pub use flags::DrawerFlags;
pub use line::Line;
pub use path::{line_to, move_to, pixel_shift};
pub use pipeline::{PaintStats, paint_series};
pub use polar::{ANGLE_PRECISION, PolarMapper, PolarPoint, PolarSegment};
pub use polar_line::PolarLine;
pub use registry::{DrawerConstructor, DrawerRegistry};
pub use shape::{
    PointState, Shape, ShapeGroup, ShapeGroupId, ShapeManager, ShapeRole, ShapeStyle, StrokeStyle,
};
