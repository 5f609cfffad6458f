// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared building blocks for the Strata series pipeline.
//!
//! This crate is the small common denominator used by the data, settings,
//! label and drawer crates:
//! - **Values**: a dynamically typed [`Value`] used for theme trees, settings
//!   layers and row fields.
//! - **Consistency states**: a dirty-flag bitset ([`ConsistencyState`]) so
//!   `draw()` only redoes the aspects that were invalidated.
//! - **Signals**: a [`SignalDispatcher`] that can be suspended so a batch of
//!   mutations produces one coalesced notification.
//!
//! Everything here is single-threaded and `no_std` (with `alloc`).

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod consistency;
mod float;
mod signals;
mod value;

pub use consistency::{Consistency, ConsistencyState};
pub use float::{FloatExt, standard_angle};
pub use signals::{ListenerId, Signal, SignalDispatcher};
pub use value::{Callback, Value, ValueMap};
