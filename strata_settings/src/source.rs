// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::sync::Arc;

use strata_core::Value;

use crate::layer::LayerRef;
use crate::settings::{Settings, Tier};

/// One entry of a drawing plan: a place options can be read from.
#[derive(Clone, Debug)]
pub enum SettingsSource {
    /// A standalone layer (a state layer, for example).
    Layer(LayerRef),
    /// One tier of a single node, without ancestors.
    Instance(Settings, Tier),
    /// One tier of a node, walking its ancestors.
    Factory(Settings, Tier),
}

impl SettingsSource {
    /// Reads `name` from this source.
    pub fn option(&self, name: &str) -> Option<Value> {
        match self {
            Self::Layer(layer) => layer.borrow().get(name).cloned(),
            Self::Instance(node, tier) => node.node_layer(*tier)?.borrow().get(name).cloned(),
            Self::Factory(node, tier) => node.tier_option(*tier, name),
        }
    }

    /// Visits every defined option. Keys can repeat when several ancestors
    /// define them; the first visit is the one that wins.
    pub fn for_each_option(&self, mut f: impl FnMut(&Arc<str>, &Value)) {
        let mut visit = |layer: &LayerRef| {
            for (k, v) in layer.borrow().iter() {
                f(k, v);
            }
        };
        match self {
            Self::Layer(layer) => visit(layer),
            Self::Instance(node, tier) => {
                if let Some(layer) = node.node_layer(*tier) {
                    visit(&layer);
                }
            }
            Self::Factory(node, tier) => {
                for layer in node.tier_layers(*tier) {
                    visit(&layer);
                }
            }
        }
    }

    /// Revision stamp of everything this source reads.
    pub fn revision(&self) -> u64 {
        match self {
            Self::Layer(layer) => layer.borrow().revision(),
            Self::Instance(node, tier) => node
                .node_layer(*tier)
                .map_or(0, |l| l.borrow().revision())
                .max(node.tier_revision(*tier)),
            Self::Factory(node, tier) => node.tier_revision(*tier),
        }
    }
}
