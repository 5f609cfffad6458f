// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layered settings resolution.
//!
//! Every visual object owns a [`Settings`] node with three layers:
//! - **own** settings, written by the user through [`Settings::set_option`],
//! - **theme** settings, materialized from a [`Theme`] tree, and
//! - **auto** settings, computed by the library (auto-placed anchors, ...).
//!
//! Nodes can have a parent. Lookups walk a resolution chain built from three
//! tiers, each walked up through the ancestors: high (own), mid (theme), low
//! (auto). An explicit value anywhere up the own-chain therefore beats every
//! theme default, and any theme default beats an auto value, without per-option
//! "was this set by the user" flags.
//!
//! Chains are memoized per node and rebuilt when parentage or layer identity
//! changes. Layer contents carry revision stamps so caches built on top of the
//! chains (merged label settings, for example) can detect edits.

#![no_std]

extern crate alloc;

#[cfg(feature = "json")]
mod json;
mod layer;
mod revision;
mod settings;
mod source;
mod theme;

#[cfg(feature = "json")]
pub use json::ThemeError;
pub use layer::{LayerRef, SettingsLayer, layer_ref};
pub use settings::{ChainKind, Settings, Tier};
pub use source::SettingsSource;
pub use theme::Theme;
