// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide revision stamps.
//!
//! Every layer edit and every structural change of a settings node takes a fresh
//! stamp from one monotonic counter, so "the maximum stamp over a set of layers"
//! strictly increases whenever anything in the set changes.

use core::sync::atomic::{AtomicU64, Ordering};

static REVISION: AtomicU64 = AtomicU64::new(0);

pub(crate) fn next_revision() -> u64 {
    REVISION.fetch_add(1, Ordering::Relaxed) + 1
}
