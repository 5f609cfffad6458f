// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pooled label instances.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Line, Point};
use peniko::Brush;
use peniko::color::palette::css;
use strata_core::{Consistency, ConsistencyState, Value, ValueMap};
use strata_settings::{Settings, SettingsSource, Tier};

use crate::anchor::Anchor;
use crate::format::{FormatProvider, PositionProvider, format_position};
use crate::frame::{Connector, LabelFrame};
use crate::layout::{GeometryInput, LabelGeometry, compute_geometry};
use crate::paint::{Background, LabelStroke, font_brush, stroke_from_map};
use crate::shared::Shared;
use crate::state::LabelState;

const LAYOUT: ConsistencyState = ConsistencyState::APPEARANCE
    .union(ConsistencyState::BOUNDS)
    .union(ConsistencyState::Z_INDEX)
    .union(ConsistencyState::CONTAINER);

struct NoTokens;

impl FormatProvider for NoTokens {
    fn token(&self, _name: &str) -> Option<Value> {
        None
    }
}

#[derive(Debug)]
struct PlanCache {
    generation: u64,
    sources: Rc<[SettingsSource]>,
}

#[derive(Debug)]
struct MergedCache {
    generation: u64,
    revision: u64,
    map: Rc<ValueMap>,
}

/// One label of a [`LabelFactory`](crate::LabelFactory).
///
/// Instances are owned by their factory; callers address them by index and
/// must not keep using an index after clearing it.
pub struct LabelInstance {
    index: usize,
    serial: u64,
    settings: Settings,
    states: HashMap<LabelState, SettingsSource>,
    generation: u64,
    format_provider: Option<Rc<dyn FormatProvider>>,
    position_provider: Option<Rc<dyn PositionProvider>>,
    vertical: bool,
    plan: RefCell<Option<PlanCache>>,
    merged: RefCell<Option<MergedCache>>,
    drawn_from: Option<Rc<ValueMap>>,
    consistency: Consistency,
    frame: Option<LabelFrame>,
}

impl fmt::Debug for LabelInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelInstance")
            .field("index", &self.index)
            .field("serial", &self.serial)
            .field("settings", &self.settings)
            .field("states", &self.states)
            .field("vertical", &self.vertical)
            .field("consistency", &self.consistency)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl LabelInstance {
    pub(crate) fn new(index: usize, serial: u64) -> Self {
        Self {
            index,
            serial,
            settings: Settings::new(),
            states: HashMap::new(),
            generation: 0,
            format_provider: None,
            position_provider: None,
            vertical: false,
            plan: RefCell::new(None),
            merged: RefCell::new(None),
            drawn_from: None,
            consistency: Consistency::new(),
            frame: None,
        }
    }

    /// Back to pool defaults. Identity (`serial`) and the settings node survive.
    pub(crate) fn reset(&mut self) {
        self.settings.own_layer().borrow_mut().clear();
        self.settings.auto_layer().borrow_mut().clear();
        if !self.states.is_empty() {
            self.states.clear();
            self.generation += 1;
        }
        self.format_provider = None;
        self.position_provider = None;
        self.vertical = false;
        self.drop_merged_settings();
        self.drawn_from = None;
        self.consistency = Consistency::new();
        self.frame = None;
    }

    pub(crate) fn attach(
        &mut self,
        index: usize,
        format: Rc<dyn FormatProvider>,
        position: Rc<dyn PositionProvider>,
    ) {
        self.index = index;
        self.format_provider = Some(format);
        self.position_provider = Some(position);
        self.consistency.invalidate(ConsistencyState::ALL);
    }

    /// Pool slot.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Identity of this instance across recycling.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// The instance's own settings node: own layer is the point-normal slot,
    /// auto layer is the auto slot.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Reads the instance's own layer.
    pub fn own_option(&self, name: &str) -> Option<Value> {
        self.settings.own_option(name)
    }

    /// Writes the instance's own layer.
    pub fn set_option(&mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> bool {
        let changed = self.settings.set_option(name, value);
        if changed {
            self.consistency.invalidate(ConsistencyState::APPEARANCE | ConsistencyState::BOUNDS);
        }
        changed
    }

    /// Writes the auto layer (auto-placement results).
    pub fn set_auto_option(&mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> bool {
        let changed = self.settings.set_auto_option(name, value);
        if changed {
            self.consistency.invalidate(ConsistencyState::BOUNDS);
        }
        changed
    }

    /// Overrides (or with `None`, restores) the source of one drawing-plan slot
    /// for this instance only.
    pub fn set_state_source(&mut self, state: LabelState, source: Option<SettingsSource>) {
        match source {
            Some(s) => {
                self.states.insert(state, s);
            }
            None => {
                self.states.remove(&state);
            }
        }
        self.generation += 1;
        self.consistency.invalidate(ConsistencyState::APPEARANCE | ConsistencyState::BOUNDS);
    }

    /// Marks the label as laid out vertically; offsets swap axes.
    pub fn set_vertical(&mut self, vertical: bool) {
        if self.vertical != vertical {
            self.vertical = vertical;
            self.consistency.invalidate(ConsistencyState::BOUNDS);
        }
    }

    /// Whether offsets are swapped.
    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    /// Replaces the position provider.
    pub fn set_position_provider(&mut self, provider: Rc<dyn PositionProvider>) {
        self.position_provider = Some(provider);
        self.consistency.invalidate(ConsistencyState::BOUNDS | ConsistencyState::CONNECTOR);
    }

    /// Replaces the format provider. Cached formatter results for this index
    /// stay until the factory drops them.
    pub fn set_format_provider(&mut self, provider: Rc<dyn FormatProvider>) {
        self.format_provider = Some(provider);
        self.consistency.invalidate(ConsistencyState::APPEARANCE | ConsistencyState::BOUNDS);
    }

    /// Marks aspects dirty for the next draw.
    pub fn invalidate(&mut self, state: ConsistencyState) {
        self.consistency.invalidate(state);
    }

    /// Dirty-state tracking.
    pub fn consistency(&self) -> &Consistency {
        &self.consistency
    }

    /// The last drawn frame; `None` when never drawn or detached.
    pub fn frame(&self) -> Option<&LabelFrame> {
        self.frame.as_ref()
    }

    /// Forgets the merged settings snapshot.
    pub fn drop_merged_settings(&self) {
        self.merged.borrow_mut().take();
    }

    fn source_for(&self, state: LabelState, cx: &Shared) -> Option<SettingsSource> {
        if let Some(s) = self.states.get(&state).or_else(|| cx.states.get(&state)) {
            return Some(s.clone());
        }
        match state {
            LabelState::PointNormal => {
                Some(SettingsSource::Instance(self.settings.clone(), Tier::High))
            }
            LabelState::Auto => Some(SettingsSource::Instance(self.settings.clone(), Tier::Low)),
            LabelState::SeriesNormal => {
                Some(SettingsSource::Factory(cx.settings.clone(), Tier::High))
            }
            LabelState::SeriesNormalTheme => {
                Some(SettingsSource::Factory(cx.settings.clone(), Tier::Mid))
            }
            _ => None,
        }
    }

    fn plan_sources(&self, cx: &Shared) -> Rc<[SettingsSource]> {
        let generation = cx.generation + self.generation;
        if let Some(p) = self.plan.borrow().as_ref()
            && p.generation == generation
        {
            return p.sources.clone();
        }
        let sources: Rc<[SettingsSource]> = cx
            .plan
            .iter()
            .filter_map(|s| self.source_for(*s, cx))
            .collect::<Vec<_>>()
            .into();
        *self.plan.borrow_mut() = Some(PlanCache {
            generation,
            sources: sources.clone(),
        });
        sources
    }

    /// The drawing plan flattened into one map, highest priority first.
    ///
    /// The snapshot is memoized: repeated calls return the same `Rc` until a
    /// source changes, the plan changes, or it is dropped.
    pub(crate) fn merged_settings(&self, cx: &Shared) -> Rc<ValueMap> {
        let sources = self.plan_sources(cx);
        let generation = cx.generation + self.generation;
        let revision = sources
            .iter()
            .map(SettingsSource::revision)
            .max()
            .unwrap_or(0);
        if let Some(m) = self.merged.borrow().as_ref()
            && m.generation == generation
            && m.revision == revision
        {
            return m.map.clone();
        }

        let mut map = ValueMap::new();
        for source in sources.iter() {
            source.for_each_option(|k, v| {
                map.entry(k.clone()).or_insert_with(|| v.clone());
            });
        }
        tracing::debug!(index = self.index, options = map.len(), "merged label settings");
        let map = Rc::new(map);
        *self.merged.borrow_mut() = Some(MergedCache {
            generation,
            revision,
            map: map.clone(),
        });
        map
    }

    fn auto_anchor(&self) -> Option<Anchor> {
        self.settings
            .auto_layer()
            .borrow()
            .get("anchor")
            .and_then(Anchor::from_value)
    }

    pub(crate) fn text(&self, cx: &Shared, settings: &ValueMap) -> String {
        let provider: &dyn FormatProvider = match &self.format_provider {
            Some(p) => &**p,
            None => &NoTokens,
        };
        cx.call_text_formatter(settings.get("format"), provider, Some(self.index))
    }

    /// Geometry for `settings` with explicit providers.
    pub(crate) fn geometry_with(
        &self,
        cx: &Shared,
        settings: &ValueMap,
        text: &str,
        position: Option<&dyn PositionProvider>,
    ) -> LabelGeometry {
        let position = position.map_or(Point::ZERO, |p| {
            format_position(settings.get("positionFormatter"), p)
        });
        compute_geometry(
            GeometryInput {
                settings,
                text,
                position,
                parent_bounds: cx.parent_bounds,
                vertical: self.vertical,
                auto_anchor: self.auto_anchor(),
            },
            &*cx.measurer,
        )
    }

    /// Geometry this instance would be drawn with.
    pub(crate) fn geometry(&self, cx: &Shared) -> LabelGeometry {
        let merged = self.merged_settings(cx);
        let text = self.text(cx, &merged);
        self.geometry_with(cx, &merged, &text, self.position_provider.as_deref())
    }

    /// Main draw pass. Only dirty aspects are recomputed.
    pub(crate) fn draw(&mut self, cx: &Shared) {
        let merged = self.merged_settings(cx);
        if self
            .drawn_from
            .as_ref()
            .is_none_or(|m| !Rc::ptr_eq(m, &merged))
        {
            self.consistency.invalidate(LAYOUT);
        }

        if merged.get("enabled").and_then(Value::as_bool) == Some(false) {
            if self.frame.take().is_some() {
                tracing::trace!(index = self.index, "label detached");
            }
            self.drawn_from = Some(merged);
            self.consistency.mark_consistent(ConsistencyState::ALL);
            return;
        }
        if self.frame.is_none() {
            self.consistency.invalidate(LAYOUT);
        }
        if !self.consistency.has_invalid(LAYOUT) {
            return;
        }

        let text = self.text(cx, &merged);
        let geometry = self.geometry_with(cx, &merged, &text, self.position_provider.as_deref());
        let z_index = merged.get("zIndex").and_then(Value::as_f64).unwrap_or(0.0);
        self.frame = Some(LabelFrame {
            index: self.index,
            serial: self.serial,
            text,
            geometry,
            font: font_brush(&merged),
            background: merged.get("background").and_then(Background::from_value),
            connector: None,
            z_index,
        });
        self.drawn_from = Some(merged);
        self.consistency.mark_consistent(ConsistencyState::ALL);
        self.consistency.invalidate(ConsistencyState::CONNECTOR);
    }

    /// Connector pass, separate from layout so connectors can be refreshed
    /// without re-measuring.
    pub(crate) fn draw_connector(&mut self, cx: &Shared) {
        if !self.consistency.has_invalid(ConsistencyState::CONNECTOR) {
            return;
        }
        self.consistency.mark_consistent(ConsistencyState::CONNECTOR);
        let target = self
            .position_provider
            .as_ref()
            .and_then(|p| p.connector_point());
        let merged = self.merged_settings(cx);
        let Some(frame) = self.frame.as_mut() else {
            return;
        };
        let from = frame.geometry.pivot;
        frame.connector = target.map(|to| Connector {
            line: Line::new(from, to),
            stroke: stroke_from_map(&merged, "connectorStroke", "connectorThickness")
                .unwrap_or_else(|| LabelStroke {
                    brush: Brush::Solid(css::BLACK),
                    width: 1.0,
                }),
        });
    }
}
