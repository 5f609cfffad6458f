// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settings nodes and their memoized resolution chains.

extern crate alloc;

use alloc::rc::{Rc, Weak};
use alloc::sync::Arc;
use core::cell::{Cell, RefCell};

use smallvec::SmallVec;
use strata_core::Value;

use crate::layer::{LayerRef, SettingsLayer, layer_ref};
use crate::revision::next_revision;

/// One of the three priority tiers of a resolution chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Own (explicit) settings.
    High,
    /// Theme settings.
    Mid,
    /// Auto-computed settings.
    Low,
}

/// Which tiers a chain concatenates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChainKind {
    /// High + mid + low.
    Full,
    /// High + low, for values that never inherit theme defaults.
    LowAndHigh,
}

type Layers = SmallVec<[LayerRef; 8]>;

#[derive(Debug)]
struct CachedChain {
    stamp: u64,
    layers: Rc<[LayerRef]>,
}

#[derive(Debug)]
struct Node {
    own: RefCell<LayerRef>,
    theme: RefCell<Option<LayerRef>>,
    auto: RefCell<LayerRef>,
    parent: RefCell<Option<Weak<Node>>>,
    revision: Cell<u64>,
    full: RefCell<Option<CachedChain>>,
    low_and_high: RefCell<Option<CachedChain>>,
}

/// A settings node: own/theme/auto layers plus a non-owning parent link.
///
/// Cloning a `Settings` clones the handle, not the node.
#[derive(Clone, Debug)]
pub struct Settings(Rc<Node>);

impl Settings {
    /// Creates a node with empty own/auto layers and no theme.
    pub fn new() -> Self {
        Self(Rc::new(Node {
            own: RefCell::new(layer_ref(SettingsLayer::new())),
            theme: RefCell::new(None),
            auto: RefCell::new(layer_ref(SettingsLayer::new())),
            parent: RefCell::new(None),
            revision: Cell::new(next_revision()),
            full: RefCell::new(None),
            low_and_high: RefCell::new(None),
        }))
    }

    /// Creates a node whose mid tier starts with `theme`.
    pub fn with_theme(theme: LayerRef) -> Self {
        let s = Self::new();
        s.set_theme(Some(theme));
        s
    }

    /// Returns `true` if both handles point at the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Sets (or clears) the parent node.
    ///
    /// The link is weak: a parent that is dropped simply ends the chain.
    pub fn set_parent(&self, parent: Option<&Self>) {
        debug_assert!(
            parent.is_none_or(|p| !p.has_ancestor(self)),
            "settings parent cycle"
        );
        *self.0.parent.borrow_mut() = parent.map(|p| Rc::downgrade(&p.0));
        self.touch();
    }

    /// The parent node, if set and alive.
    pub fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().as_ref()?.upgrade().map(Self)
    }

    /// The own (high tier) layer.
    pub fn own_layer(&self) -> LayerRef {
        self.0.own.borrow().clone()
    }

    /// The theme (mid tier) layer.
    pub fn theme_layer(&self) -> Option<LayerRef> {
        self.0.theme.borrow().clone()
    }

    /// The auto (low tier) layer.
    pub fn auto_layer(&self) -> LayerRef {
        self.0.auto.borrow().clone()
    }

    /// Replaces the own layer.
    pub fn set_own_layer(&self, layer: LayerRef) {
        *self.0.own.borrow_mut() = layer;
        self.touch();
    }

    /// Replaces (or clears) the theme layer.
    pub fn set_theme(&self, theme: Option<LayerRef>) {
        *self.0.theme.borrow_mut() = theme;
        self.touch();
    }

    /// Replaces the auto layer.
    pub fn set_auto_layer(&self, layer: LayerRef) {
        *self.0.auto.borrow_mut() = layer;
        self.touch();
    }

    /// Resolves `name` through the full chain.
    pub fn option(&self, name: &str) -> Option<Value> {
        find(&self.chain(ChainKind::Full), name)
    }

    /// Resolves `name` through the high + low chain, skipping theme defaults.
    pub fn option_low_and_high(&self, name: &str) -> Option<Value> {
        find(&self.chain(ChainKind::LowAndHigh), name)
    }

    /// Resolves `name` through a single tier, walking ancestors.
    pub fn tier_option(&self, tier: Tier, name: &str) -> Option<Value> {
        find(&self.tier_layers(tier), name)
    }

    /// Reads the own layer only.
    pub fn own_option(&self, name: &str) -> Option<Value> {
        self.0.own.borrow().borrow().get(name).cloned()
    }

    /// Returns `true` if the own layer defines `name`.
    pub fn has_own_option(&self, name: &str) -> bool {
        self.0.own.borrow().borrow().contains(name)
    }

    /// Writes the own layer; inherited layers are never touched.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_option(&self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> bool {
        self.0.own.borrow().borrow_mut().set(name, value)
    }

    /// Makes `name` undefined in the own layer.
    pub fn remove_option(&self, name: &str) -> Option<Value> {
        self.0.own.borrow().borrow_mut().remove(name)
    }

    /// Writes the auto layer.
    pub fn set_auto_option(&self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> bool {
        self.0.auto.borrow().borrow_mut().set(name, value)
    }

    /// The memoized resolution chain of the given kind.
    pub fn chain(&self, kind: ChainKind) -> Rc<[LayerRef]> {
        let stamp = self.structure_stamp();
        let slot = match kind {
            ChainKind::Full => &self.0.full,
            ChainKind::LowAndHigh => &self.0.low_and_high,
        };
        if let Some(cached) = slot.borrow().as_ref()
            && cached.stamp == stamp
        {
            return cached.layers.clone();
        }

        let mut layers = self.tier_layers(Tier::High);
        if kind == ChainKind::Full {
            layers.extend(self.tier_layers(Tier::Mid));
        }
        layers.extend(self.tier_layers(Tier::Low));
        let layers: Rc<[LayerRef]> = layers.into_iter().collect();
        tracing::trace!(?kind, len = layers.len(), "rebuilt settings chain");
        *slot.borrow_mut() = Some(CachedChain {
            stamp,
            layers: layers.clone(),
        });
        layers
    }

    /// The layer of `tier` on this node only.
    pub fn node_layer(&self, tier: Tier) -> Option<LayerRef> {
        match tier {
            Tier::High => Some(self.own_layer()),
            Tier::Mid => self.theme_layer(),
            Tier::Low => Some(self.auto_layer()),
        }
    }

    /// Layers of one tier, this node first, then each ancestor.
    pub fn tier_layers(&self, tier: Tier) -> SmallVec<[LayerRef; 8]> {
        let mut out = Layers::new();
        let mut node = Some(self.clone());
        while let Some(n) = node {
            if let Some(layer) = n.node_layer(tier) {
                out.push(layer);
            }
            node = n.parent();
        }
        out
    }

    /// A stamp that strictly increases whenever anything reachable through the
    /// full chain changes: layer contents, layer identity or parentage.
    pub fn revision(&self) -> u64 {
        let layers = self.chain(ChainKind::Full);
        layers
            .iter()
            .map(|l| l.borrow().revision())
            .fold(self.structure_stamp(), u64::max)
    }

    /// Like [`Settings::revision`], restricted to one tier.
    pub fn tier_revision(&self, tier: Tier) -> u64 {
        self.tier_layers(tier)
            .iter()
            .map(|l| l.borrow().revision())
            .fold(self.structure_stamp(), u64::max)
    }

    fn touch(&self) {
        self.0.revision.set(next_revision());
    }

    fn structure_stamp(&self) -> u64 {
        let mut stamp = self.0.revision.get();
        let mut node = self.parent();
        while let Some(n) = node {
            stamp = stamp.max(n.0.revision.get());
            node = n.parent();
        }
        stamp
    }

    fn has_ancestor(&self, other: &Self) -> bool {
        let mut node = Some(self.clone());
        while let Some(n) = node {
            if n.ptr_eq(other) {
                return true;
            }
            node = n.parent();
        }
        false
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

fn find(layers: &[LayerRef], name: &str) -> Option<Value> {
    layers.iter().find_map(|l| l.borrow().get(name).cloned())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn three_layer_node() -> Settings {
        let s = Settings::with_theme(layer_ref(SettingsLayer::from_pairs([
            ("a", 2.0),
            ("b", 3.0),
        ])));
        s.set_option("a", 1.0);
        s.set_auto_option("b", 4.0);
        s.set_auto_option("c", 5.0);
        s
    }

    #[test]
    fn first_defined_value_wins() {
        let s = three_layer_node();
        assert_eq!(s.option("a"), Some(Value::from(1.0)));
        assert_eq!(s.option("b"), Some(Value::from(3.0)));
        assert_eq!(s.option("c"), Some(Value::from(5.0)));
        assert_eq!(s.option("z"), None);
    }

    #[test]
    fn low_and_high_chain_skips_theme_defaults() {
        let s = three_layer_node();
        assert_eq!(s.option_low_and_high("b"), Some(Value::from(4.0)));
        assert_eq!(s.option_low_and_high("a"), Some(Value::from(1.0)));
    }

    #[test]
    fn own_accessors_bypass_the_chain() {
        let s = three_layer_node();
        assert!(s.has_own_option("a"));
        assert!(!s.has_own_option("b"));
        assert_eq!(s.own_option("b"), None);
        assert_eq!(s.remove_option("a"), Some(Value::from(1.0)));
        assert_eq!(s.option("a"), Some(Value::from(2.0)));
    }

    #[test]
    fn ancestors_are_walked_per_tier() {
        let parent =
            Settings::with_theme(layer_ref(SettingsLayer::from_pairs([("fontSize", 10.0)])));
        parent.set_option("fontColor", "red");
        parent.set_auto_option("anchor", "center");

        let child = Settings::with_theme(layer_ref(SettingsLayer::from_pairs([
            ("fontSize", Value::from(12.0)),
            ("fontColor", Value::from("black")),
        ])));
        child.set_auto_option("fontSize", 99.0);
        child.set_parent(Some(&parent));

        // A parent's explicit value beats the child's theme.
        assert_eq!(child.option("fontColor"), Some(Value::from("red")));
        // Child theme beats parent theme.
        assert_eq!(child.option("fontSize"), Some(Value::from(12.0)));
        // Auto values come from any ancestor when nothing else defines them.
        assert_eq!(child.option("anchor"), Some(Value::from("center")));
        assert_eq!(child.chain(ChainKind::Full).len(), 6);
        assert_eq!(child.chain(ChainKind::LowAndHigh).len(), 4);
    }

    #[test]
    fn chains_are_memoized_and_invalidated_on_structure_changes() {
        let s = three_layer_node();
        let c1 = s.chain(ChainKind::Full);
        let c2 = s.chain(ChainKind::Full);
        assert!(Rc::ptr_eq(&c1, &c2));

        // Editing a layer keeps the chain (same layer identities).
        s.set_option("a", 7.0);
        assert!(Rc::ptr_eq(&c1, &s.chain(ChainKind::Full)));

        let parent = Settings::new();
        s.set_parent(Some(&parent));
        let c3 = s.chain(ChainKind::Full);
        assert!(!Rc::ptr_eq(&c1, &c3));

        // Reparenting an ancestor invalidates descendants too.
        let grand = Settings::new();
        grand.set_option("a", 0.0);
        parent.set_parent(Some(&grand));
        assert!(!Rc::ptr_eq(&c3, &s.chain(ChainKind::Full)));
    }

    #[test]
    fn dropped_parent_ends_the_chain() {
        let child = Settings::new();
        {
            let parent = Settings::new();
            parent.set_option("x", 1.0);
            child.set_parent(Some(&parent));
            assert_eq!(child.option("x"), Some(Value::from(1.0)));
        }
        assert_eq!(child.option("x"), None);
        assert!(child.parent().is_none());
    }

    #[test]
    fn revision_tracks_inherited_edits() {
        let parent = Settings::new();
        let child = Settings::new();
        child.set_parent(Some(&parent));
        let r0 = child.revision();
        assert_eq!(child.revision(), r0);
        parent.set_option("x", 1.0);
        assert!(child.revision() > r0);
    }
}
