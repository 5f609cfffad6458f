// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{PathEl, Point};
use strata_core::Value;
use strata_data::{KeyListCoCursor, MetaTable, PointMeta, RowCursor, RowId, RowStore};

use crate::{
    DrawContext, DrawerKind, DrawerRegistry, PaintStats, PolarMapper, PolarPoint, ShapeManager,
    ShapeRole, paint_series,
};

fn store(rows: &[(f64, f64)]) -> RowStore {
    let mut s = RowStore::new();
    for &(key, value) in rows {
        s.push_named(key, [("value", Value::from(value))]).unwrap();
    }
    s
}

/// Cartesian locate: categories 30px apart from x=50, 10px per unit down
/// from a baseline at y=100.
fn cartesian(cursor: &RowCursor<'_>, meta: &mut PointMeta) -> Option<f64> {
    let v = cursor.get("value")?.as_f64()?;
    meta.set_number("x", 50.0 + cursor.get_key() * 30.0);
    meta.set_number("zero", 100.0);
    meta.set_number("value", 100.0 - v * 10.0);
    Some(v)
}

fn moves(shapes: &ShapeManager, role: ShapeRole) -> usize {
    shapes
        .groups()
        .iter()
        .filter_map(|g| g.get(role))
        .flat_map(|s| s.path().elements())
        .filter(|el| matches!(el, PathEl::MoveTo(_)))
        .count()
}

#[test]
fn columns_skip_zero_values_and_record_their_shapes() {
    let rows = store(&[(0.0, 3.0), (1.0, 0.0), (2.0, -2.0), (3.0, 5.0)]);
    let registry = DrawerRegistry::with_defaults();
    let mut drawer = registry.create(DrawerKind::Column).unwrap();
    let mut cursor = RowCursor::new(&rows, rows.select_all());
    let mut metas = MetaTable::new();
    let mut shapes = ShapeManager::new();
    let ctx = DrawContext::new().with_point_width(20.0);

    let stats = paint_series(&mut *drawer, &mut cursor, &mut metas, &ctx, &mut shapes, cartesian);
    assert_eq!(stats, PaintStats { drawn: 4, missing: 0 });
    assert_eq!(shapes.groups().len(), 3);
    assert_eq!(metas.get(RowId(1)).unwrap().handle("shapes"), None);

    // Negative values hang below the baseline.
    let id = metas.get(RowId(2)).unwrap().handle("shapes").unwrap();
    let group = shapes.groups().iter().find(|g| g.id().0 == id).unwrap();
    let bbox = kurbo::Shape::bounding_box(group.get(ShapeRole::Path).unwrap().path());
    assert_eq!(bbox, kurbo::Rect::new(100.0, 100.0, 120.0, 120.0));

    // A second pass replaces the first.
    paint_series(&mut *drawer, &mut cursor, &mut metas, &ctx, &mut shapes, cartesian);
    assert_eq!(shapes.groups().len(), 3);
}

#[test]
fn co_iteration_holes_break_lines() {
    let rows = store(&[(0.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
    let mut cursor = RowCursor::new(&rows, rows.select_all())
        .with_co_cursor(KeyListCoCursor::new(vec![0.0, 1.0, 2.0, 3.0], 0));
    let mut metas = MetaTable::new();
    let mut shapes = ShapeManager::new();
    let mut drawer = DrawerRegistry::with_defaults().create(DrawerKind::Line).unwrap();

    let stats = paint_series(
        &mut *drawer,
        &mut cursor,
        &mut metas,
        &DrawContext::new(),
        &mut shapes,
        cartesian,
    );
    assert_eq!(stats, PaintStats { drawn: 3, missing: 1 });
    assert_eq!(shapes.groups().len(), 1);
    assert_eq!(moves(&shapes, ShapeRole::Stroke), 2);
    assert!(!metas.get(RowId(1)).unwrap().flag("missing"));
}

#[test]
fn unlocatable_rows_close_area_regions() {
    let rows = store(&[(0.0, 1.0), (1.0, 2.0), (2.0, f64::NAN), (3.0, 2.0), (4.0, 1.0)]);
    let mut cursor = RowCursor::new(&rows, rows.select_all());
    let mut metas = MetaTable::new();
    let mut shapes = ShapeManager::new();
    let mut drawer = DrawerRegistry::with_defaults().create_by_name("area").unwrap();

    let stats = paint_series(
        &mut *drawer,
        &mut cursor,
        &mut metas,
        &DrawContext::new(),
        &mut shapes,
        cartesian,
    );
    assert_eq!(stats, PaintStats { drawn: 4, missing: 1 });
    assert!(metas.get(RowId(2)).unwrap().flag("missing"));

    let fill = shapes.groups()[0].get(ShapeRole::Path).unwrap().path().elements();
    let closes = fill.iter().filter(|el| matches!(el, PathEl::ClosePath)).count();
    assert_eq!(closes, 2);
    assert_eq!(moves(&shapes, ShapeRole::Path), 2);
}

#[test]
fn radar_series_closes_on_the_circle() {
    let values = [4.0, 2.0, 3.0, 1.0, 4.0];
    let rows: Vec<(f64, f64)> = values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect();
    let rows = store(&rows);
    let mapper = PolarMapper::new(Point::new(200.0, 200.0), 100.0, 0.0);
    let n = values.len() as f64;
    let locate = |cursor: &RowCursor<'_>, meta: &mut PointMeta| {
        let v = cursor.get("value")?.as_f64()?;
        let ratios = PolarPoint::new(cursor.get_key() / n, v / 4.0);
        let p = mapper.point(ratios);
        meta.set_number("x", p.x);
        meta.set_number("value", p.y);
        meta.set_number("xRatio", ratios.x);
        meta.set_number("valueRatio", ratios.y);
        Some(v)
    };
    let mut cursor = RowCursor::new(&rows, rows.select_all());
    let mut metas = MetaTable::new();
    let mut shapes = ShapeManager::new();
    let mut drawer = DrawerRegistry::with_defaults().create(DrawerKind::PolarLine).unwrap();
    let ctx = DrawContext::new().with_polar(mapper).with_closed(true);

    paint_series(&mut *drawer, &mut cursor, &mut metas, &ctx, &mut shapes, locate);

    assert_eq!(shapes.groups().len(), 1);
    let els = shapes.groups()[0].get(ShapeRole::Stroke).unwrap().path().elements();
    let PathEl::MoveTo(start) = els[0] else {
        panic!("expected a move, got {:?}", els[0]);
    };
    assert!((start - Point::new(200.0, 100.0)).hypot() < 1e-6, "{start:?}");
    let Some(PathEl::CurveTo(_, _, end)) = els.last() else {
        panic!("expected a closing curve");
    };
    assert!((*end - start).hypot() < 1e-6);
    // Every connection spans a fifth of a turn: one cubic each, five in all.
    assert_eq!(els.len(), 6);
}
