// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The label factory: a pool of instances sharing series-level settings.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use kurbo::Rect;
use strata_core::{
    Consistency, ConsistencyState, ListenerId, Signal, SignalDispatcher, Value, ValueMap,
};
use strata_settings::{LayerRef, Settings, SettingsSource};
use strata_text::TextMeasurer;

use crate::format::{FormatProvider, PositionProvider};
use crate::frame::LabelFrame;
use crate::instance::LabelInstance;
use crate::layout::LabelGeometry;
use crate::shared::Shared;
use crate::state::{DEFAULT_PLAN, LabelState};

/// Options whose change moves or resizes labels.
const BOUNDS_OPTIONS: &[&str] = &[
    "width",
    "height",
    "padding",
    "anchor",
    "offsetX",
    "offsetY",
    "rotation",
    "fontSize",
    "fontFamily",
    "fontWeight",
    "fontStyle",
    "lineHeight",
    "adjustFontSize",
    "minFontSize",
    "maxFontSize",
    "format",
    "positionFormatter",
];

/// A pool of labels sharing settings, text measurement and a render layer.
///
/// The factory's settings node is the `SeriesNormal` slot of every instance's
/// drawing plan, and its theme layer the `SeriesNormalTheme` slot. Other slots
/// are filled with [`LabelFactory::set_state_source`].
///
/// Layout probes ([`LabelFactory::get_dimension`], [`LabelFactory::measure`],
/// [`LabelFactory::measure_with_transform`]) run on a private scratch instance
/// and never touch live labels.
pub struct LabelFactory {
    shared: Shared,
    labels: Vec<Option<LabelInstance>>,
    free: Vec<LabelInstance>,
    measurement: LabelInstance,
    signals: SignalDispatcher,
    consistency: Consistency,
    next_serial: u64,
}

impl fmt::Debug for LabelFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFactory")
            .field("settings", &self.shared.settings)
            .field("plan", &self.shared.plan)
            .field("labels", &self.labels)
            .field("free", &self.free.len())
            .field("parent_bounds", &self.shared.parent_bounds)
            .field("signals", &self.signals)
            .finish_non_exhaustive()
    }
}

impl LabelFactory {
    /// Creates an empty factory measuring text with `measurer`.
    pub fn new(measurer: Rc<dyn TextMeasurer>) -> Self {
        Self {
            shared: Shared {
                settings: Settings::new(),
                states: HashMap::new(),
                plan: DEFAULT_PLAN.to_vec(),
                generation: 0,
                measurer,
                text_cache: RefCell::new(HashMap::new()),
                parent_bounds: None,
            },
            labels: Vec::new(),
            free: Vec::new(),
            measurement: LabelInstance::new(usize::MAX, 0),
            signals: SignalDispatcher::new(),
            consistency: Consistency::new(),
            next_serial: 0,
        }
    }

    /// Sets the theme layer (the `SeriesNormalTheme` slot).
    #[must_use]
    pub fn with_theme(self, theme: LayerRef) -> Self {
        self.shared.settings.set_theme(Some(theme));
        self
    }

    /// The factory's settings node.
    pub fn settings(&self) -> &Settings {
        &self.shared.settings
    }

    /// Links the factory's settings to a parent (a chart-level factory, for
    /// example).
    pub fn set_parent_settings(&mut self, parent: Option<&Settings>) {
        self.shared.settings.set_parent(parent);
        self.signals.dispatch(Signal::NEEDS_REDRAW | Signal::BOUNDS_CHANGED);
    }

    /// Resolves an option through the factory's full chain.
    pub fn option(&self, name: &str) -> Option<Value> {
        self.shared.settings.option(name)
    }

    /// Writes a factory option and notifies listeners.
    ///
    /// Changing `format` drops cached formatter results.
    pub fn set_option(&mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> bool {
        let name = name.into();
        if !self.shared.settings.set_option(name.clone(), value) {
            return false;
        }
        let mut signal = Signal::NEEDS_REDRAW;
        if BOUNDS_OPTIONS.contains(&&*name) {
            signal |= Signal::BOUNDS_CHANGED;
        }
        if &*name == "enabled" {
            signal |= Signal::ENABLED_STATE_CHANGED;
        }
        if &*name == "format" {
            self.drop_calls_cache(None);
        }
        self.signals.dispatch(signal);
        true
    }

    /// Sets (or with `None`, clears) the source of a drawing-plan slot for all
    /// instances.
    pub fn set_state_source(&mut self, state: LabelState, source: Option<SettingsSource>) {
        match source {
            Some(s) => {
                self.shared.states.insert(state, s);
            }
            None => {
                self.shared.states.remove(&state);
            }
        }
        self.shared.generation += 1;
        self.signals.dispatch(Signal::NEEDS_REDRAW | Signal::BOUNDS_CHANGED);
    }

    /// Replaces the drawing plan (highest priority first).
    pub fn set_drawing_plan(&mut self, plan: Vec<LabelState>) {
        self.shared.plan = plan;
        self.shared.generation += 1;
        self.signals.dispatch(Signal::NEEDS_REDRAW | Signal::BOUNDS_CHANGED);
    }

    /// The drawing plan.
    pub fn drawing_plan(&self) -> &[LabelState] {
        &self.shared.plan
    }

    /// Sets the bounds percentages (`width: "50%"`, `offsetX: "10%"`) resolve
    /// against.
    pub fn set_parent_bounds(&mut self, bounds: Option<Rect>) {
        if self.shared.parent_bounds == bounds {
            return;
        }
        self.shared.parent_bounds = bounds;
        for inst in self.labels.iter_mut().flatten() {
            inst.invalidate(ConsistencyState::BOUNDS);
        }
        self.signals.dispatch(Signal::BOUNDS_CHANGED);
    }

    /// The bounds percentages resolve against.
    pub fn parent_bounds(&self) -> Option<Rect> {
        self.shared.parent_bounds
    }

    /// Adds a label at `index` (or after the last slot).
    ///
    /// An instance already at `index` is cleared first. Instances come from the
    /// free list when possible and keep their [`LabelInstance::serial`].
    pub fn add(
        &mut self,
        format: Rc<dyn FormatProvider>,
        position: Rc<dyn PositionProvider>,
        index: Option<usize>,
    ) -> &mut LabelInstance {
        let index = index.unwrap_or(self.labels.len());
        if self.labels.get(index).is_some_and(Option::is_some) {
            self.clear(Some(index));
        }
        let mut inst = match self.free.pop() {
            Some(inst) => {
                tracing::debug!(index, serial = inst.serial(), "reusing pooled label");
                inst
            }
            None => {
                self.next_serial += 1;
                tracing::debug!(index, serial = self.next_serial, "allocating label");
                LabelInstance::new(index, self.next_serial)
            }
        };
        inst.attach(index, format, position);
        if self.labels.len() <= index {
            self.labels.resize_with(index + 1, || None);
        }
        self.consistency.invalidate(ConsistencyState::CONTAINER | ConsistencyState::Z_INDEX);
        self.labels[index].insert(inst)
    }

    /// Clears one label (returning it to the free list) or, with `None`, all.
    pub fn clear(&mut self, index: Option<usize>) {
        match index {
            Some(i) => {
                if let Some(mut inst) = self.labels.get_mut(i).and_then(Option::take) {
                    inst.reset();
                    self.free.push(inst);
                    self.shared.text_cache.borrow_mut().remove(&i);
                }
            }
            None => {
                for mut inst in self.labels.drain(..).flatten() {
                    inst.reset();
                    self.free.push(inst);
                }
                self.shared.text_cache.borrow_mut().clear();
            }
        }
        self.consistency.invalidate(ConsistencyState::CONTAINER);
    }

    /// Number of slots, including cleared ones.
    pub fn labels_count(&self) -> usize {
        self.labels.len()
    }

    /// The label in slot `index`.
    pub fn get_label(&self, index: usize) -> Option<&LabelInstance> {
        self.labels.get(index)?.as_ref()
    }

    /// Mutable access to the label in slot `index`.
    pub fn get_label_mut(&mut self, index: usize) -> Option<&mut LabelInstance> {
        self.labels.get_mut(index)?.as_mut()
    }

    /// Merged settings snapshot of the label in slot `index`.
    pub fn merged_settings(&self, index: usize) -> Option<Rc<ValueMap>> {
        Some(self.get_label(index)?.merged_settings(&self.shared))
    }

    /// Draws every live label, then their connectors.
    pub fn draw(&mut self) {
        let Self { shared, labels, .. } = &mut *self;
        for inst in labels.iter_mut().flatten() {
            inst.draw(shared);
        }
        for inst in labels.iter_mut().flatten() {
            inst.draw_connector(shared);
        }
        self.consistency.mark_consistent(ConsistencyState::CONTAINER | ConsistencyState::Z_INDEX);
    }

    /// Recomputes connectors only.
    pub fn draw_connectors(&mut self) {
        let Self { shared, labels, .. } = &mut *self;
        for inst in labels.iter_mut().flatten() {
            inst.draw_connector(shared);
        }
    }

    /// Marks every connector dirty (connector points moved).
    pub fn invalidate_connectors(&mut self) {
        for inst in self.labels.iter_mut().flatten() {
            inst.invalidate(ConsistencyState::CONNECTOR);
        }
    }

    /// Drawn frames in render order (by `zIndex`, then slot).
    pub fn frames(&self) -> Vec<&LabelFrame> {
        let mut frames: Vec<&LabelFrame> = self
            .labels
            .iter()
            .flatten()
            .filter_map(LabelInstance::frame)
            .collect();
        frames.sort_by(|a, b| a.z_index.total_cmp(&b.z_index).then(a.index.cmp(&b.index)));
        frames
    }

    /// Factory-level dirty state (`CONTAINER`, `Z_INDEX`).
    pub fn consistency(&self) -> &Consistency {
        &self.consistency
    }

    fn probe(
        &self,
        format: &dyn FormatProvider,
        position: &dyn PositionProvider,
        settings: Option<&ValueMap>,
        cache_index: Option<usize>,
    ) -> LabelGeometry {
        let scratch = &self.measurement;
        {
            let own = scratch.settings().own_layer();
            let mut own = own.borrow_mut();
            own.clear();
            for (k, v) in settings.into_iter().flatten() {
                own.set(k.clone(), v.clone());
            }
        }
        let merged = scratch.merged_settings(&self.shared);
        let text = self.shared.call_text_formatter(merged.get("format"), format, cache_index);
        scratch.geometry_with(&self.shared, &merged, &text, Some(position))
    }

    /// Outer bounds (with padding, unrotated) a label would occupy, without
    /// creating one. `settings` act as the probe's own settings.
    pub fn get_dimension(
        &self,
        format: &dyn FormatProvider,
        position: &dyn PositionProvider,
        settings: Option<&ValueMap>,
        cache_index: Option<usize>,
    ) -> Rect {
        self.probe(format, position, settings, cache_index).bounds
    }

    /// Outer bounds of the live label in slot `index`, computed without drawing.
    pub fn get_label_dimension(&self, index: usize) -> Option<Rect> {
        Some(self.get_label(index)?.geometry(&self.shared).bounds)
    }

    /// Bounding box of the rotated label.
    pub fn measure(
        &self,
        format: &dyn FormatProvider,
        position: &dyn PositionProvider,
        settings: Option<&ValueMap>,
        cache_index: Option<usize>,
    ) -> Rect {
        self.probe(format, position, settings, cache_index)
            .rotated_bounds()
    }

    /// Rotated corners `[x0, y0, ..., x3, y3]`, clockwise from the top-left.
    pub fn measure_with_transform(
        &self,
        format: &dyn FormatProvider,
        position: &dyn PositionProvider,
        settings: Option<&ValueMap>,
        cache_index: Option<usize>,
    ) -> [f64; 8] {
        self.probe(format, position, settings, cache_index).corners()
    }

    /// Formats text with `formatter` (a template, a callback, or `None` for the
    /// provider's value). With a `cache_index`, the result is cached until
    /// [`LabelFactory::drop_calls_cache`] or until a different `formatter` is
    /// passed for that index.
    pub fn call_text_formatter(
        &self,
        formatter: Option<&Value>,
        provider: &dyn FormatProvider,
        cache_index: Option<usize>,
    ) -> String {
        self.shared.call_text_formatter(formatter, provider, cache_index)
    }

    /// Drops one cached formatter result, or all of them.
    pub fn drop_calls_cache(&mut self, index: Option<usize>) {
        let mut cache = self.shared.text_cache.borrow_mut();
        match index {
            Some(i) => {
                cache.remove(&i);
            }
            None => cache.clear(),
        }
        drop(cache);
        for (i, inst) in self.labels.iter_mut().enumerate() {
            if let Some(inst) = inst
                && index.is_none_or(|x| x == i)
            {
                inst.invalidate(ConsistencyState::APPEARANCE | ConsistencyState::BOUNDS);
            }
        }
    }

    /// Registers a change listener.
    pub fn listen(&mut self, listener: impl FnMut(Signal) + 'static) -> ListenerId {
        self.signals.listen(listener)
    }

    /// Removes a change listener.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        self.signals.unlisten(id)
    }

    /// Defers notifications until the matching [`LabelFactory::resume_signals`].
    pub fn suspend_signals(&mut self) {
        self.signals.suspend();
    }

    /// Resumes notifications, flushing one coalesced signal.
    pub fn resume_signals(&mut self) {
        self.signals.resume();
    }
}
