// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::{Point, Rect};
use strata_core::{ConsistencyState, Signal, Value, ValueMap};
use strata_settings::{SettingsLayer, SettingsSource, layer_ref};
use strata_text::{HeuristicTextMeasurer, TextMeasurer, TextStyle};

use crate::{AnchoredPosition, FormatProvider, LabelFactory, LabelState, text_formatter};

fn factory() -> LabelFactory {
    LabelFactory::new(Rc::new(HeuristicTextMeasurer::new()))
}

fn point_value(v: f64) -> Rc<dyn FormatProvider> {
    Rc::new(Value::map([("value", v)]))
}

fn at(x: f64, y: f64) -> Rc<Point> {
    Rc::new(Point::new(x, y))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn merged_settings_are_cached_until_a_source_changes() {
    let mut f = factory();
    f.set_option("fontSize", 11.0);
    f.add(point_value(1.0), at(0.0, 0.0), None);
    f.add(point_value(2.0), at(0.0, 0.0), None);

    let a = f.merged_settings(0).unwrap();
    let b = f.merged_settings(0).unwrap();
    assert!(Rc::ptr_eq(&a, &b), "unchanged sources reuse the snapshot");

    // Another instance's own settings are not in this plan.
    let other = f.merged_settings(1).unwrap();
    f.get_label_mut(1).unwrap().set_option("fontSize", 30.0);
    assert!(Rc::ptr_eq(&a, &f.merged_settings(0).unwrap()));
    assert!(!Rc::ptr_eq(&other, &f.merged_settings(1).unwrap()));

    f.set_option("fontSize", 13.0);
    let c = f.merged_settings(0).unwrap();
    assert!(!Rc::ptr_eq(&a, &c));
    assert_eq!(c.get("fontSize"), Some(&Value::from(13.0)));
}

#[test]
fn drawing_plan_orders_sources() {
    let theme = layer_ref(SettingsLayer::from_pairs([
        ("fontSize", Value::from(9.0)),
        ("fontColor", Value::from("gray")),
        ("anchor", Value::from("center")),
    ]));
    let mut f = factory().with_theme(theme);
    f.set_option("fontColor", "black");

    let hover = layer_ref(SettingsLayer::from_pairs([("fontColor", "red")]));
    let inst = f.add(point_value(1.0), at(0.0, 0.0), None);
    inst.set_option("fontSize", 14.0);
    inst.set_auto_option("anchor", "left-bottom");
    inst.set_auto_option("fontColor", "blue");

    let m = f.merged_settings(0).unwrap();
    // Point normal beats series theme.
    assert_eq!(m.get("fontSize"), Some(&Value::from(14.0)));
    // Series normal beats auto.
    assert_eq!(m.get("fontColor"), Some(&Value::from("black")));
    // Auto beats series theme.
    assert_eq!(m.get("anchor"), Some(&Value::from("left-bottom")));

    f.set_state_source(LabelState::SeriesState, Some(SettingsSource::Layer(hover.clone())));
    let m = f.merged_settings(0).unwrap();
    assert_eq!(m.get("fontColor"), Some(&Value::from("red")));

    // Editing the state layer in place is picked up through its revision.
    hover.borrow_mut().set("fontColor", "green");
    assert_eq!(
        f.merged_settings(0).unwrap().get("fontColor"),
        Some(&Value::from("green"))
    );

    f.set_state_source(LabelState::SeriesState, None);
    assert_eq!(
        f.merged_settings(0).unwrap().get("fontColor"),
        Some(&Value::from("black"))
    );
}

#[test]
fn centered_box_round_trips_through_draw_and_measurement() {
    let mut f = factory();
    for (k, v) in [
        ("width", Value::from(40.0)),
        ("height", Value::from(20.0)),
        ("anchor", Value::from("center")),
        ("offsetX", Value::from(0.0)),
        ("offsetY", Value::from(0.0)),
    ] {
        f.set_option(k, v);
    }
    f.add(point_value(7.0), at(100.0, 100.0), None);
    f.draw();

    let frame = f.get_label(0).unwrap().frame().unwrap();
    assert_eq!(frame.geometry.bounds.origin(), Point::new(80.0, 90.0));
    assert_eq!(frame.text, "7");

    let measured =
        f.get_dimension(&Value::map([("value", 7.0)]), &Point::new(100.0, 100.0), None, None);
    assert_eq!(measured, frame.geometry.bounds);
    assert_eq!(f.get_label_dimension(0), Some(frame.geometry.bounds));
}

#[test]
fn measurement_applies_rotation_about_the_anchor() {
    let f = factory();
    let settings: ValueMap = [
        ("width", Value::from(20.0)),
        ("height", Value::from(10.0)),
        ("rotation", Value::from(90.0)),
    ]
    .into_iter()
    .map(|(k, v)| (k.into(), v))
    .collect();
    let provider = Value::map([("value", 1.0)]);
    let pos = Point::new(10.0, 10.0);

    let unrotated = f.get_dimension(&provider, &pos, Some(&settings), None);
    assert_eq!(unrotated, Rect::new(10.0, 10.0, 30.0, 20.0));

    let r = f.measure(&provider, &pos, Some(&settings), None);
    assert!(close(r.x0, 0.0) && close(r.x1, 10.0), "{r:?}");
    assert!(close(r.y0, 10.0) && close(r.y1, 30.0), "{r:?}");

    let c = f.measure_with_transform(&provider, &pos, Some(&settings), None);
    assert!(close(c[0], 10.0) && close(c[1], 10.0), "pivot corner is fixed: {c:?}");
    assert!(close(c[2], 10.0) && close(c[3], 30.0), "{c:?}");

    // Probes leave no trace in the pool.
    assert_eq!(f.labels_count(), 0);
}

#[test]
fn cleared_instances_are_recycled_with_their_identity() {
    let mut f = factory();
    let serials: Vec<u64> = [0.0, 1.0, 2.0]
        .into_iter()
        .map(|v| f.add(point_value(v), at(0.0, 0.0), None).serial())
        .collect();
    f.get_label_mut(1).unwrap().set_option("fontSize", 40.0);

    f.clear(Some(1));
    assert!(f.get_label(1).is_none());
    assert_eq!(f.labels_count(), 3);

    let reused = f.add(point_value(9.0), at(0.0, 0.0), None);
    assert_eq!(reused.serial(), serials[1]);
    assert_eq!(reused.index(), 3);
    assert_eq!(reused.own_option("fontSize"), None, "recycled labels start clean");

    // Re-adding at an occupied slot clears the occupant first.
    let replaced = f.add(point_value(5.0), at(0.0, 0.0), Some(0)).serial();
    assert_eq!(replaced, serials[0]);

    f.clear(None);
    assert_eq!(f.labels_count(), 0);
    let again = f.add(point_value(1.0), at(0.0, 0.0), None).serial();
    assert!(serials.contains(&again));
}

#[test]
fn draw_redoes_only_dirty_labels() {
    let calls = Rc::new(Cell::new(0_u32));
    let counter = calls.clone();
    let mut f = factory();
    f.set_option(
        "format",
        text_formatter(move |p| {
            counter.set(counter.get() + 1);
            p.token("value").map(|v| crate::display_value(&v))
        }),
    );
    f.add(point_value(3.0), at(0.0, 0.0), None);
    f.draw();
    assert_eq!(calls.get(), 1);
    assert!(f.get_label(0).unwrap().consistency().is_consistent());

    // Clean labels are skipped; the formatter result is cached per index.
    f.draw();
    f.get_label_mut(0).unwrap().set_option("fontSize", 20.0);
    f.draw();
    assert_eq!(calls.get(), 1);
    assert_eq!(f.get_label(0).unwrap().frame().unwrap().geometry.style.font_size, 20.0);

    f.drop_calls_cache(Some(0));
    f.draw();
    assert_eq!(calls.get(), 2);
}

#[test]
fn own_format_overrides_replace_cached_text() {
    let mut f = factory();
    f.add(point_value(7.0), at(0.0, 0.0), None);
    f.draw();
    assert_eq!(f.get_label(0).unwrap().frame().unwrap().text, "7");

    f.get_label_mut(0).unwrap().set_option("format", "custom {%Value}");
    f.draw();
    assert_eq!(f.get_label(0).unwrap().frame().unwrap().text, "custom 7");
}

#[test]
fn state_source_formats_replace_cached_text() {
    let mut f = factory();
    f.add(point_value(7.0), at(0.0, 0.0), None);
    f.draw();
    assert_eq!(f.get_label(0).unwrap().frame().unwrap().text, "7");

    let hover = layer_ref(SettingsLayer::from_pairs([("format", "hover {%Value}")]));
    f.set_state_source(LabelState::SeriesState, Some(SettingsSource::Layer(hover)));
    f.draw();
    assert_eq!(f.get_label(0).unwrap().frame().unwrap().text, "hover 7");

    // Restoring the plan restores the plain value.
    f.set_state_source(LabelState::SeriesState, None);
    f.draw();
    assert_eq!(f.get_label(0).unwrap().frame().unwrap().text, "7");
}

#[test]
fn disabled_labels_detach_and_come_back() {
    let mut f = factory();
    f.add(point_value(1.0), at(0.0, 0.0), None);
    f.add(point_value(2.0), at(0.0, 0.0), None);
    f.draw();
    assert_eq!(f.frames().len(), 2);

    f.get_label_mut(1).unwrap().set_option("enabled", false);
    f.draw();
    assert_eq!(f.frames().len(), 1);
    assert!(f.get_label(1).unwrap().frame().is_none());

    f.set_option("enabled", false);
    f.draw();
    assert!(f.frames().is_empty());

    f.set_option("enabled", true);
    f.get_label_mut(1).unwrap().set_option("enabled", true);
    f.draw();
    assert_eq!(f.frames().len(), 2);
}

#[test]
fn connectors_run_in_their_own_pass() {
    let mut f = factory();
    f.set_option("connectorStroke", "#888888");
    f.set_option("connectorThickness", 2.0);
    let pos = AnchoredPosition::new(Point::new(50.0, 50.0)).with_connector(Point::new(80.0, 90.0));
    f.add(point_value(1.0), Rc::new(pos), None);
    f.draw();

    let frame = f.get_label(0).unwrap().frame().unwrap();
    let connector = frame.connector.as_ref().unwrap();
    assert_eq!(connector.line.p0, frame.geometry.pivot);
    assert_eq!(connector.line.p1, Point::new(80.0, 90.0));
    assert_eq!(connector.stroke.width, 2.0);

    let moved = AnchoredPosition::new(Point::new(50.0, 50.0)).with_connector(Point::new(0.0, 0.0));
    let inst = f.get_label_mut(0).unwrap();
    inst.set_position_provider(Rc::new(moved));
    inst.invalidate(ConsistencyState::CONNECTOR);
    f.draw_connectors();
    let line = f.get_label(0).unwrap().frame().unwrap().connector.as_ref().unwrap().line;
    assert_eq!(line.p1, Point::ZERO);
}

#[test]
fn font_is_fitted_into_explicit_width() {
    let mut f = factory();
    f.set_option("width", 100.0);
    f.set_option("adjustFontSize", true);
    f.set_option("format", "Hello world");
    f.add(point_value(0.0), at(0.0, 0.0), None);
    f.draw();

    let frame = f.get_label(0).unwrap().frame().unwrap();
    let size = frame.geometry.style.font_size;
    let m = HeuristicTextMeasurer::new();
    let width = |s: f64| m.measure_line("Hello world", &TextStyle::new(s)).advance_width;
    assert!(width(size) <= 100.0, "fits at {size}");
    assert!(width(size + 1.0) > 100.0, "tight at {size}");
}

#[test]
fn signals_coalesce_while_suspended() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let mut f = factory();
    f.listen(move |s| sink.borrow_mut().push(s));

    f.suspend_signals();
    f.set_option("fontColor", "red");
    f.set_option("width", 10.0);
    f.set_option("width", 10.0);
    assert!(seen.borrow().is_empty());
    f.resume_signals();
    assert_eq!(*seen.borrow(), vec![Signal::NEEDS_REDRAW | Signal::BOUNDS_CHANGED]);

    f.set_option("enabled", false);
    let last = *seen.borrow().last().unwrap();
    assert!(last.contains(Signal::ENABLED_STATE_CHANGED));
}

#[test]
fn frames_are_z_ordered() {
    let mut f = factory();
    f.add(point_value(1.0), at(0.0, 0.0), None);
    f.add(point_value(2.0), at(0.0, 0.0), None)
        .set_option("zIndex", -1.0);
    f.add(point_value(3.0), at(0.0, 0.0), None);
    f.draw();
    let order: Vec<_> = f.frames().iter().map(|fr| fr.text.to_string()).collect();
    assert_eq!(order, ["2", "1", "3"]);
}

#[test]
fn percent_sizes_follow_parent_bounds() {
    let mut f = factory();
    f.set_option("width", "50%");
    f.set_option("height", 10.0);
    f.set_parent_bounds(Some(Rect::new(0.0, 0.0, 200.0, 100.0)));
    f.add(point_value(1.0), at(0.0, 0.0), None);
    f.draw();
    assert_eq!(f.frames()[0].geometry.bounds.width(), 100.0);

    f.set_parent_bounds(Some(Rect::new(0.0, 0.0, 300.0, 100.0)));
    f.draw();
    assert_eq!(f.frames()[0].geometry.bounds.width(), 150.0);
}
