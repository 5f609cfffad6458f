// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notification with suspension.
//!
//! A component that mutates several interdependent settings suspends its
//! dispatcher, performs the batch, then resumes: listeners see one coalesced
//! notification instead of a burst of intermediate ones.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::ops::{BitOr, BitOrAssign};

/// A set of change reasons delivered to listeners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Signal(u32);

impl Signal {
    /// No reason.
    pub const NONE: Self = Self(0);
    /// The component needs to be redrawn.
    pub const NEEDS_REDRAW: Self = Self(1 << 0);
    /// The component's bounds changed.
    pub const BOUNDS_CHANGED: Self = Self(1 << 1);
    /// Settings must be re-applied to dependents.
    pub const NEEDS_REAPPLICATION: Self = Self(1 << 2);
    /// The enabled state flipped.
    pub const ENABLED_STATE_CHANGED: Self = Self(1 << 3);

    /// Returns `true` if no reason is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if all reasons of `other` are set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Signal {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Signal {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Handle returned by [`SignalDispatcher::listen`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(Signal)>;

/// Delivers [`Signal`]s to listeners, coalescing while suspended.
///
/// Suspension nests: only the outermost [`SignalDispatcher::resume`] flushes.
#[derive(Default)]
pub struct SignalDispatcher {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u32,
    suspend_depth: u32,
    pending: Signal,
}

impl core::fmt::Debug for SignalDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SignalDispatcher")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .field("suspend_depth", &self.suspend_depth)
            .field("pending", &self.pending)
            .finish()
    }
}

impl SignalDispatcher {
    /// Creates a dispatcher with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener.
    pub fn listen(&mut self, listener: impl FnMut(Signal) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener; returns `false` if it was not registered.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Sends `signal` now, or queues it while suspended.
    pub fn dispatch(&mut self, signal: Signal) {
        if signal.is_empty() {
            return;
        }
        if self.suspend_depth > 0 {
            self.pending |= signal;
            return;
        }
        self.deliver(signal);
    }

    /// Starts (or nests) a suspension.
    pub fn suspend(&mut self) {
        self.suspend_depth += 1;
    }

    /// Ends a suspension; the outermost resume flushes pending reasons once.
    pub fn resume(&mut self) {
        if self.suspend_depth == 0 {
            return;
        }
        self.suspend_depth -= 1;
        if self.suspend_depth == 0 {
            let pending = core::mem::take(&mut self.pending);
            if !pending.is_empty() {
                tracing::trace!(bits = pending.0, "flushing suspended signals");
                self.deliver(pending);
            }
        }
    }

    /// Returns `true` while suspended.
    pub fn is_suspended(&self) -> bool {
        self.suspend_depth > 0
    }

    fn deliver(&mut self, signal: Signal) {
        for (_, listener) in &mut self.listeners {
            listener(signal);
        }
    }
}
