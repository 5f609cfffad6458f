// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A named slot of a label's drawing plan.
///
/// `*State` slots hold settings for the current interactivity state (hover,
/// selection); `*Normal` slots hold the regular settings; `*Theme` slots hold
/// the theme defaults behind them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelState {
    /// Per-point state settings.
    PointState,
    /// Series state settings.
    SeriesState,
    /// Chart state settings.
    ChartState,
    /// Per-point settings (the instance's own layer).
    PointNormal,
    /// Series settings (the factory's own chain).
    SeriesNormal,
    /// Chart settings.
    ChartNormal,
    /// Series state theme.
    SeriesStateTheme,
    /// Chart state theme.
    ChartStateTheme,
    /// Auto-placement values (the instance's auto layer).
    Auto,
    /// Series theme (the factory's theme chain).
    SeriesNormalTheme,
    /// Chart theme.
    ChartNormalTheme,
}

/// The default drawing plan, highest priority first.
pub const DEFAULT_PLAN: [LabelState; 11] = [
    LabelState::PointState,
    LabelState::SeriesState,
    LabelState::ChartState,
    LabelState::PointNormal,
    LabelState::SeriesNormal,
    LabelState::ChartNormal,
    LabelState::SeriesStateTheme,
    LabelState::ChartStateTheme,
    LabelState::Auto,
    LabelState::SeriesNormalTheme,
    LabelState::ChartNormalTheme,
];
