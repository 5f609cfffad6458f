// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a column series, a radar series and their point labels to SVG.
//!
//! Usage: `strata_demo [OUT.svg]`. Without a path the SVG goes to stdout.
//! Set `RUST_LOG=strata_drawers=trace` to follow the draw passes.

mod svg;

use std::rc::Rc;

use kurbo::Point;
use peniko::color::palette::css;
use strata_core::Value;
use strata_data::{MetaTable, PointMeta, RowCursor, RowStore};
use strata_drawers::{
    DrawContext, DrawerKind, DrawerRegistry, PolarMapper, PolarPoint, ShapeManager, ShapeRole,
    ShapeStyle, StrokeStyle, paint_series,
};
use strata_labels::LabelFactory;
use strata_settings::Theme;
use strata_text::TextMeasurer;
use tracing_subscriber::EnvFilter;

const THEME: &str = r##"{
  "labels": {
    "fontSize": 11,
    "fontColor": "#333333",
    "anchor": "center-bottom",
    "padding": 2,
    "format": "{%Value}"
  }
}"##;

const SALES: [f64; 6] = [12.0, 19.0, 0.0, 7.0, -4.0, 15.0];
const SKILLS: [f64; 6] = [0.9, 0.6, 0.75, 0.4, 0.85, 0.55];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let theme = Theme::from_json_str(THEME)?;
    let registry = DrawerRegistry::with_defaults();
    let mut scene = svg::SvgScene::default();

    let mut labels = LabelFactory::new(demo_measurer()).with_theme(theme.layer("labels"));

    let shapes = column_series(&registry, &mut labels)?;
    scene.push_shapes(&shapes);
    let shapes = radar_series(&registry)?;
    scene.push_shapes(&shapes);

    labels.draw();
    labels.draw_connectors();
    scene.push_labels(&labels.frames());

    let out = scene.to_svg_string();
    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, out)?;
            tracing::info!(path, "wrote svg");
        }
        None => print!("{out}"),
    }
    Ok(())
}

fn demo_measurer() -> Rc<dyn TextMeasurer> {
    #[cfg(feature = "parley")]
    {
        Rc::new(strata_text_parley::ParleyTextMeasurer::new())
    }

    #[cfg(not(feature = "parley"))]
    {
        Rc::new(strata_text::HeuristicTextMeasurer::new())
    }
}

fn store(values: &[f64]) -> Result<RowStore, Box<dyn std::error::Error>> {
    let mut rows = RowStore::new();
    for (i, &v) in values.iter().enumerate() {
        #[expect(clippy::cast_precision_loss, reason = "row counts are small")]
        let key = i as f64;
        rows.push_named(key, [("value", Value::from(v))])
            .ok_or("row store rejected a row")?;
    }
    Ok(rows)
}

/// Columns over a baseline at y=220, labelled at their tops.
fn column_series(
    registry: &DrawerRegistry,
    labels: &mut LabelFactory,
) -> Result<ShapeManager, Box<dyn std::error::Error>> {
    let rows = store(&SALES)?;
    let mut drawer = registry.create(DrawerKind::Column).ok_or("no column drawer")?;
    let mut cursor = RowCursor::new(&rows, rows.select_all());
    let mut metas = MetaTable::new();
    let mut shapes = ShapeManager::new()
        .with_style(ShapeRole::Path, ShapeStyle::filled(css::STEEL_BLUE))
        .with_style(
            ShapeRole::HatchFill,
            ShapeStyle::stroked(StrokeStyle::solid(css::NAVY, 1.0)),
        );
    let ctx = DrawContext::new()
        .with_point_width(28.0)
        .with_points_padding(4.0)
        .with_crisp_edges(true);

    let locate = |cursor: &RowCursor<'_>, meta: &mut PointMeta| {
        let v = cursor.get("value")?.as_f64()?;
        meta.set_number("x", 40.0 + cursor.get_key() * 40.0);
        meta.set_number("zero", 220.0);
        meta.set_number("value", 220.0 - v * 8.0);
        Some(v)
    };
    let stats = paint_series(&mut *drawer, &mut cursor, &mut metas, &ctx, &mut shapes, locate);
    tracing::info!(drawn = stats.drawn, groups = shapes.groups().len(), "columns painted");

    cursor.reset();
    while cursor.advance() {
        let (Some(id), Some(value)) = (cursor.current_id(), cursor.get("value")) else {
            continue;
        };
        let Some(meta) = metas.get(id) else {
            continue;
        };
        let top = Point::new(meta.number("x"), meta.number("value"));
        let label = labels.add(Rc::new(value.clone()), Rc::new(top), None);
        if value.as_f64().is_some_and(|v| v < 0.0) {
            label.set_auto_option("anchor", "center-top");
        }
    }
    Ok(shapes)
}

/// A closed radar around (420, 140).
fn radar_series(registry: &DrawerRegistry) -> Result<ShapeManager, Box<dyn std::error::Error>> {
    let rows = store(&SKILLS)?;
    let mapper = PolarMapper::new(Point::new(420.0, 140.0), 90.0, 0.0);
    #[expect(clippy::cast_precision_loss, reason = "row counts are small")]
    let n = SKILLS.len() as f64;
    let locate = |cursor: &RowCursor<'_>, meta: &mut PointMeta| {
        let v = cursor.get("value")?.as_f64()?;
        let ratios = PolarPoint::new(cursor.get_key() / n, v);
        let p = mapper.point(ratios);
        meta.set_number("x", p.x);
        meta.set_number("value", p.y);
        meta.set_number("xRatio", ratios.x);
        meta.set_number("valueRatio", ratios.y);
        Some(v)
    };
    let mut drawer = registry.create_by_name("polar-line").ok_or("no polar line drawer")?;
    let mut cursor = RowCursor::new(&rows, rows.select_all());
    let mut metas = MetaTable::new();
    let mut shapes = ShapeManager::new().with_style(
        ShapeRole::Stroke,
        ShapeStyle::stroked(StrokeStyle::solid(css::CRIMSON, 2.0)),
    );
    let ctx = DrawContext::new().with_polar(mapper).with_closed(true);
    paint_series(&mut *drawer, &mut cursor, &mut metas, &ctx, &mut shapes, locate);
    tracing::info!(groups = shapes.groups().len(), "radar painted");
    Ok(shapes)
}
