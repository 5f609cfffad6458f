// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley-backed text measurement.
//!
//! [`ParleyTextMeasurer`] implements [`strata_text::TextMeasurer`] with real
//! shaping, so font auto-adjustment and label backgrounds follow the glyphs a
//! renderer would actually draw. Multi-line blocks are laid out by Parley in one
//! pass instead of line by line.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use core::cell::RefCell;

use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{Alignment, AlignmentOptions, FontContext, FontStyle as ParleyFontStyle, FontWeight};
use strata_text::{FontFamily, FontStyle, TextBlock, TextMeasurer, TextMetrics, TextStyle};

/// A [`TextMeasurer`] backed by Parley.
pub struct ParleyTextMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<parley::LayoutContext<()>>,
    display_scale: f32,
}

impl core::fmt::Debug for ParleyTextMeasurer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParleyTextMeasurer")
            .field("display_scale", &self.display_scale)
            .finish_non_exhaustive()
    }
}

impl ParleyTextMeasurer {
    /// Creates a measurer using Parley's system font configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(parley::LayoutContext::new()),
            display_scale: 1.0,
        }
    }

    /// Sets the display scale (device pixel ratio) used for shaping.
    ///
    /// Results are always reported in logical pixels.
    #[must_use]
    pub fn with_display_scale(mut self, display_scale: f32) -> Self {
        self.display_scale = display_scale.max(1.0e-6);
        self
    }

    fn layout(&self, text: &str, style: &TextStyle) -> parley::Layout<()> {
        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        // Label sizes feed bisection; unquantized advances keep it monotonic.
        let mut builder = layout_cx.ranged_builder(&mut font_cx, text, self.display_scale, false);
        builder.push_default(StyleProperty::FontSize(font_size_f32(style.font_size)));
        builder.push_default(StyleProperty::FontStack(font_stack(&style.font_family)));
        builder.push_default(StyleProperty::FontStyle(font_style(style.font_style)));
        builder.push_default(StyleProperty::FontWeight(FontWeight::new(f32::from(
            style.font_weight.0,
        ))));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());
        layout
    }

    fn unscale(&self, v: f32) -> f64 {
        f64::from(v) / f64::from(self.display_scale)
    }
}

impl Default for ParleyTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    fn measure_line(&self, text: &str, style: &TextStyle) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::ZERO;
        }
        let layout = self.layout(text, style);
        let Some(line) = layout.lines().next() else {
            return TextMetrics::ZERO;
        };
        let m = line.metrics();
        TextMetrics {
            advance_width: self.unscale(m.advance),
            ascent: self.unscale(m.ascent),
            descent: self.unscale(m.descent),
            leading: self.unscale(m.leading),
        }
    }

    fn measure(&self, text: &str, style: &TextStyle) -> TextBlock {
        if text.is_empty() {
            return TextBlock::EMPTY;
        }
        let layout = self.layout(text, style);
        let mut block = TextBlock::EMPTY;
        for line in layout.lines() {
            let m = line.metrics();
            if block.line_count == 0 {
                block.baseline = self.unscale(m.ascent);
            }
            block.width = block.width.max(self.unscale(m.advance));
            block.height += self.unscale(m.ascent + m.descent + m.leading) * style.line_spacing;
            block.line_count += 1;
        }
        tracing::trace!(
            lines = block.line_count,
            width = block.width,
            "parley block measured"
        );
        block
    }
}

fn font_stack(family: &FontFamily) -> FontStack<'_> {
    let family = match family {
        FontFamily::Serif => ParleyFontFamily::Generic(GenericFamily::Serif),
        FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
        FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
        FontFamily::Named(name) => ParleyFontFamily::Named(Cow::Borrowed(name.as_ref())),
    };
    FontStack::from(family)
}

fn font_style(style: FontStyle) -> ParleyFontStyle {
    match style {
        FontStyle::Normal => ParleyFontStyle::Normal,
        FontStyle::Italic => ParleyFontStyle::Italic,
        FontStyle::Oblique => ParleyFontStyle::Oblique(None),
    }
}

fn font_size_f32(font_size: f64) -> f32 {
    if !font_size.is_finite() || font_size <= 0.0 {
        return 0.0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "label font sizes are far below f32::MAX; larger values saturate"
    )]
    {
        font_size.min(f64::from(f32::MAX)) as f32
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn lines_are_measured_as_one_block() {
        let m = ParleyTextMeasurer::new();
        let style = TextStyle::new(12.0);
        let one = m.measure("Hello", &style);
        let two = m.measure("Hello\nHello world", &style);
        assert_eq!(one.line_count, 1);
        assert_eq!(two.line_count, 2);
        assert!(two.width > one.width, "second line is wider");
        assert!(two.height > one.height, "two lines are taller than one");
    }

    #[test]
    fn empty_text_has_no_extent() {
        let m = ParleyTextMeasurer::new();
        assert_eq!(m.measure_line("", &TextStyle::new(12.0)), TextMetrics::ZERO);
        assert_eq!(font_size_f32(f64::NAN), 0.0);
    }
}
