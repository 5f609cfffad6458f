// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawer lookup by geometry kind.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::area::Area;
use crate::column::Column;
use crate::drawer::{Drawer, DrawerKind};
use crate::line::Line;
use crate::polar_line::PolarLine;

/// Builds a fresh drawer.
pub type DrawerConstructor = fn() -> Box<dyn Drawer>;

/// Maps geometry kinds to drawer constructors.
///
/// Series receive a registry from their owner; there is no process-wide table.
#[derive(Clone, Debug, Default)]
pub struct DrawerRegistry {
    constructors: HashMap<DrawerKind, DrawerConstructor>,
}

impl DrawerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in drawer.
    pub fn with_defaults() -> Self {
        let mut r = Self::new();
        r.register(DrawerKind::Column, || Box::new(Column::new()));
        r.register(DrawerKind::Line, || Box::new(Line::new()));
        r.register(DrawerKind::Area, || Box::new(Area::new()));
        r.register(DrawerKind::PolarLine, || Box::new(PolarLine::new()));
        tracing::debug!(kinds = r.constructors.len(), "drawer registry built");
        r
    }

    /// Registers (or replaces) the constructor for `kind`.
    pub fn register(&mut self, kind: DrawerKind, constructor: DrawerConstructor) {
        self.constructors.insert(kind, constructor);
    }

    /// Builds a drawer for `kind`.
    pub fn create(&self, kind: DrawerKind) -> Option<Box<dyn Drawer>> {
        self.constructors.get(&kind).map(|c| c())
    }

    /// Builds a drawer for a series type name (`"column"`, `"polar-line"`, ...).
    pub fn create_by_name(&self, name: &str) -> Option<Box<dyn Drawer>> {
        self.create(DrawerKind::from_name(name)?)
    }

    /// Registered kinds, in no particular order.
    pub fn kinds(&self) -> Vec<DrawerKind> {
        self.constructors.keys().copied().collect()
    }
}
