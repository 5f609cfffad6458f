// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for label layout.
//!
//! Labels need text sizes before anything is attached to a scene: to size
//! auto-width backgrounds, to pick a font size that fits an explicit box, and to
//! answer layout probes (`get_dimension`, `measure`) for axes and legends.
//! Shaping stays in a backend; label code depends only on [`TextMeasurer`].
//!
//! Style inputs can be read straight from resolved settings values
//! ([`TextStyle::apply_settings`]), so the same option names that drive drawing
//! also drive measurement.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

use strata_core::Value;

/// Measures text for label layout.
///
/// Backends implement [`TextMeasurer::measure_line`]; multi-line layout is
/// derived from it by [`TextMeasurer::measure`].
pub trait TextMeasurer {
    /// Measures a single line. `text` must not contain `\n`.
    fn measure_line(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Measures a block of `\n`-separated lines.
    ///
    /// The width is the widest line; the height stacks line heights scaled by
    /// [`TextStyle::line_spacing`]. Empty text measures as an empty block.
    fn measure(&self, text: &str, style: &TextStyle) -> TextBlock {
        if text.is_empty() {
            return TextBlock::EMPTY;
        }
        let mut block = TextBlock::EMPTY;
        for (i, line) in text.split('\n').enumerate() {
            let m = self.measure_line(line, style);
            if i == 0 {
                block.baseline = m.ascent;
            }
            block.width = block.width.max(m.advance_width);
            block.height += m.line_height() * style.line_spacing;
            block.line_count += 1;
        }
        block
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure_line(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure_line(text, style)
    }
}

/// Text styling inputs relevant to measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
    /// Line height multiplier for multi-line blocks.
    pub line_spacing: f64,
}

impl TextStyle {
    /// Creates a default style with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            line_spacing: 1.0,
        }
    }

    /// Returns a copy with a different font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Overrides fields from resolved option values.
    ///
    /// `lookup` is asked for `fontSize`, `fontFamily`, `fontWeight`,
    /// `fontStyle` and `lineHeight`; unknown or ill-typed values are ignored.
    pub fn apply_settings(&mut self, mut lookup: impl FnMut(&str) -> Option<Value>) {
        if let Some(size) = lookup("fontSize").and_then(|v| v.as_f64()) {
            self.font_size = size;
        }
        if let Some(family) = lookup("fontFamily")
            .as_ref()
            .and_then(Value::as_str)
            .map(FontFamily::from_css)
        {
            self.font_family = family;
        }
        if let Some(weight) = lookup("fontWeight").as_ref().and_then(FontWeight::from_value) {
            self.font_weight = weight;
        }
        if let Some(style) = lookup("fontStyle")
            .as_ref()
            .and_then(Value::as_str)
            .and_then(FontStyle::from_css)
        {
            self.font_style = style;
        }
        if let Some(spacing) = lookup("lineHeight").and_then(|v| v.as_f64())
            && spacing > 0.0
        {
            self.line_spacing = spacing;
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Parses the first entry of a CSS family list.
    pub fn from_css(css: &str) -> Self {
        let first = css
            .split(',')
            .next()
            .unwrap_or("")
            .trim()
            .trim_matches(|c| c == '"' || c == '\'');
        match first {
            "serif" => Self::Serif,
            "sans-serif" | "" => Self::SansSerif,
            "monospace" => Self::Monospace,
            name => Self::Named(Arc::from(name)),
        }
    }

    /// The CSS spelling of this family.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);

    /// Reads `"normal"`, `"bold"`, a numeric string, or a number.
    pub fn from_value(value: &Value) -> Option<Self> {
        let n = match value {
            Value::Number(n) => *n,
            Value::String(s) => match s.as_ref() {
                "normal" => return Some(Self::NORMAL),
                "bold" | "bolder" => return Some(Self::BOLD),
                "lighter" => return Some(Self(300)),
                other => other.parse::<f64>().ok()?,
            },
            _ => return None,
        };
        if !(1.0..=1000.0).contains(&n) {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "range checked to 1..=1000 above"
        )]
        Some(Self(n as u16))
    }
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

impl FontStyle {
    /// Parses a CSS `font-style` keyword.
    pub fn from_css(css: &str) -> Option<Self> {
        match css {
            "normal" => Some(Self::Normal),
            "italic" => Some(Self::Italic),
            "oblique" => Some(Self::Oblique),
            _ => None,
        }
    }
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Metrics of an empty line.
    pub const ZERO: Self = Self {
        advance_width: 0.0,
        ascent: 0.0,
        descent: 0.0,
        leading: 0.0,
    };

    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// Size of a measured multi-line block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextBlock {
    /// Width of the widest line.
    pub width: f64,
    /// Sum of line heights.
    pub height: f64,
    /// Baseline offset of the first line from the block top.
    pub baseline: f64,
    /// Number of lines.
    pub line_count: usize,
}

impl TextBlock {
    /// The block of an empty string.
    pub const EMPTY: Self = Self {
        width: 0.0,
        height: 0.0,
        baseline: 0.0,
        line_count: 0,
    };
}

/// A deterministic measurer for demos, tests and headless layout.
///
/// Every glyph is `em_width` ems wide; ascent and descent are 0.8em and 0.2em.
#[derive(Clone, Copy, Debug)]
pub struct HeuristicTextMeasurer {
    /// Average glyph advance in ems.
    pub em_width: f64,
}

impl HeuristicTextMeasurer {
    /// Creates a measurer with an average glyph width of 0.6em.
    pub const fn new() -> Self {
        Self { em_width: 0.6 }
    }
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure_line(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let bold = if style.font_weight >= FontWeight::BOLD {
            1.1
        } else {
            1.0
        };
        TextMetrics {
            advance_width: self.em_width * bold * style.font_size * text.chars().count() as f64,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        }
    }
}
