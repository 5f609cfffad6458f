// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Factory state every instance reads while drawing.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use hashbrown::HashMap;
use kurbo::Rect;
use strata_core::Value;
use strata_settings::{Settings, SettingsSource};
use strata_text::TextMeasurer;

use crate::format::{FormatProvider, TextFormatter};
use crate::state::LabelState;

/// A formatter result and the `format` value that produced it.
pub(crate) struct CachedText {
    format: Option<Value>,
    text: String,
}

/// The parts of a factory that instances read. Instances never point back at
/// their factory; the factory passes this in.
pub(crate) struct Shared {
    pub(crate) settings: Settings,
    pub(crate) states: HashMap<LabelState, SettingsSource>,
    pub(crate) plan: Vec<LabelState>,
    /// Bumped whenever `states` or `plan` change.
    pub(crate) generation: u64,
    pub(crate) measurer: Rc<dyn TextMeasurer>,
    pub(crate) text_cache: RefCell<HashMap<usize, CachedText>>,
    pub(crate) parent_bounds: Option<Rect>,
}

impl Shared {
    pub(crate) fn call_text_formatter(
        &self,
        formatter: Option<&Value>,
        provider: &dyn FormatProvider,
        cache_index: Option<usize>,
    ) -> String {
        if let Some(i) = cache_index
            && let Some(hit) = self.text_cache.borrow().get(&i)
            && hit.format.as_ref() == formatter
        {
            return hit.text.clone();
        }
        let text = TextFormatter::from_value(formatter)
            .format(provider)
            .unwrap_or_default();
        if let Some(i) = cache_index {
            let entry = CachedText {
                format: formatter.cloned(),
                text: text.clone(),
            };
            self.text_cache.borrow_mut().insert(i, entry);
        }
        text
    }
}
