// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart labels.
//!
//! A [`LabelFactory`] owns a pool of [`LabelInstance`]s: point labels of a
//! series, tick labels of an axis, and so on. Each instance resolves its
//! options through a *drawing plan*, an ordered list of [`LabelState`] slots
//! (point state, series state, ..., point normal, series normal, ..., theme
//! defaults). The plan is flattened into a memoized merged snapshot, so a label
//! redraw reads one map instead of walking chains per option.
//!
//! Drawing is incremental: every instance tracks dirty aspects and
//! [`LabelFactory::draw`] redoes only what changed. The result is a list of
//! [`LabelFrame`]s a renderer can paint directly.
//!
//! Option names follow the theme tree: `enabled`, `format`,
//! `positionFormatter`, `anchor`, `offsetX`, `offsetY`, `width`, `height`,
//! `padding`, `rotation`, `fontSize`, `fontFamily`, `fontWeight`, `fontStyle`,
//! `fontColor`, `fontOpacity`, `lineHeight`, `adjustFontSize`, `minFontSize`,
//! `maxFontSize`, `background`, `connectorStroke`, `connectorThickness`,
//! `zIndex`.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod adjust;
mod anchor;
mod dimension;
mod factory;
mod format;
mod frame;
mod instance;
mod layout;
mod paint;
mod shared;
mod state;

#[cfg(test)]
mod factory_tests;

pub use adjust::{AdjustFontSize, compare_fit, fit_font_size};
pub use anchor::Anchor;
pub use dimension::{Dimension, Padding};
pub use factory::LabelFactory;
pub use format::{
    AnchoredPosition, FormatProvider, PositionProvider, TextFormatter, display_value,
    format_position, position_formatter, text_formatter,
};
pub use frame::{Connector, LabelFrame};
pub use instance::LabelInstance;
pub use layout::{DEFAULT_MAX_FONT_SIZE, DEFAULT_MIN_FONT_SIZE, LabelGeometry};
pub use paint::{Background, LabelStroke, color_from_value};
pub use state::{DEFAULT_PLAN, LabelState};
