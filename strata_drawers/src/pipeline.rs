// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving a drawer from a row cursor.

use strata_data::{MetaTable, MetaValue, PointMeta, RowCursor};

use crate::drawer::{DrawContext, Drawer, SeriesPoint};
use crate::shape::ShapeManager;

/// Counts from one [`paint_series`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Points handed to `draw_first_point` or `draw_subsequent_point`.
    pub drawn: usize,
    /// Points handed to `draw_missing_point` (holes and unlocatable rows).
    pub missing: usize,
}

/// Runs one draw pass of `drawer` over every position of `cursor`.
///
/// `shapes` is cleared first. For each real row, `locate` reads the row through
/// the cursor, writes the row's pixel/ratio meta (`x`, `value`, `zero`, ...)
/// and returns the data value; `None` or `NaN` marks the point missing.
/// Co-iteration holes are missing points with a scratch meta. Metas of real
/// rows are kept in `metas` for labels and animation.
pub fn paint_series<F>(
    drawer: &mut dyn Drawer,
    cursor: &mut RowCursor<'_>,
    metas: &mut MetaTable,
    ctx: &DrawContext,
    shapes: &mut ShapeManager,
    mut locate: F,
) -> PaintStats
where
    F: FnMut(&RowCursor<'_>, &mut PointMeta) -> Option<f64>,
{
    shapes.clear();
    drawer.start_drawing(ctx, shapes);
    cursor.reset();

    let mut scratch = PointMeta::new();
    let mut stats = PaintStats::default();
    let mut prev_drawn = false;
    while cursor.advance() {
        let (index, key) = (cursor.get_index(), cursor.get_key());
        let (meta, value) = match cursor.current_id() {
            Some(id) => {
                let meta = metas.get_mut(id);
                meta.clear();
                let value = locate(cursor, meta);
                (meta, value)
            }
            None => {
                scratch.clear();
                (&mut scratch, None)
            }
        };
        let value = value.filter(|v| !v.is_nan());
        meta.set_meta("missing", MetaValue::Flag(value.is_none()));
        let mut point = SeriesPoint::new(index, key, value.unwrap_or(f64::NAN), meta);
        match value {
            None => {
                tracing::trace!(index, key, "missing point");
                drawer.draw_missing_point(&mut point, shapes);
                stats.missing += 1;
                prev_drawn = false;
            }
            Some(_) if prev_drawn => {
                drawer.draw_subsequent_point(&mut point, shapes);
                stats.drawn += 1;
            }
            Some(_) => {
                drawer.draw_first_point(&mut point, shapes);
                stats.drawn += 1;
                prev_drawn = true;
            }
        }
    }
    drawer.finalize_drawing(shapes);
    tracing::debug!(
        kind = drawer.kind().name(),
        drawn = stats.drawn,
        missing = stats.missing,
        groups = shapes.groups().len(),
        "series painted"
    );
    stats
}
