// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text and position formatters.
//!
//! Formatters live in settings like any other option, so they cascade through
//! the drawing plan. A text formatter is either a template string such as
//! `"{%Value} items"` or a callback created with [`text_formatter`]; a position
//! formatter is a callback created with [`position_formatter`].

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use strata_core::{Callback, Value, ValueMap};

/// Data a text formatter reads from: a point, an axis tick, a legend item.
pub trait FormatProvider {
    /// Value of the token `name`, as used by `{%Name}` templates.
    fn token(&self, name: &str) -> Option<Value>;
}

impl FormatProvider for ValueMap {
    fn token(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl FormatProvider for Value {
    fn token(&self, name: &str) -> Option<Value> {
        match self {
            Self::Map(m) => m.get(name).cloned(),
            // A bare value answers only to `value`.
            v if name == "value" => Some(v.clone()),
            _ => None,
        }
    }
}

/// Where a label goes.
pub trait PositionProvider {
    /// The position the label is anchored at, before offsets.
    fn position(&self) -> Point;

    /// Optional point a connector line is drawn to.
    fn connector_point(&self) -> Option<Point> {
        None
    }
}

impl PositionProvider for Point {
    fn position(&self) -> Point {
        *self
    }
}

/// A position with an optional connector target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnchoredPosition {
    /// Anchor position.
    pub value: Point,
    /// Connector target.
    pub connector_point: Option<Point>,
}

impl AnchoredPosition {
    /// A position without connector.
    pub fn new(value: Point) -> Self {
        Self {
            value,
            connector_point: None,
        }
    }

    /// Adds a connector target.
    pub fn with_connector(mut self, point: Point) -> Self {
        self.connector_point = Some(point);
        self
    }
}

impl PositionProvider for AnchoredPosition {
    fn position(&self) -> Point {
        self.value
    }

    fn connector_point(&self) -> Option<Point> {
        self.connector_point
    }
}

type TextFn = dyn Fn(&dyn FormatProvider) -> Option<String>;
type PositionFn = dyn Fn(&dyn PositionProvider) -> Point;

struct TextFormatFn(Box<TextFn>);
struct PositionFormatFn(Box<PositionFn>);

/// Wraps a closure as a text formatter settings value.
///
/// Returning `None` renders an empty label.
pub fn text_formatter(f: impl Fn(&dyn FormatProvider) -> Option<String> + 'static) -> Value {
    Value::Callback(Callback::new(TextFormatFn(Box::new(f))))
}

/// Wraps a closure as a position formatter settings value.
pub fn position_formatter(f: impl Fn(&dyn PositionProvider) -> Point + 'static) -> Value {
    Value::Callback(Callback::new(PositionFormatFn(Box::new(f))))
}

/// A resolved text formatter.
#[derive(Clone, Copy)]
pub enum TextFormatter<'a> {
    /// A `{%Token}` template.
    Template(&'a str),
    /// A callback.
    Function(&'a TextFn),
    /// Renders the provider's `value` token.
    Value,
}

impl fmt::Debug for TextFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Value => f.write_str("Value"),
        }
    }
}

impl<'a> TextFormatter<'a> {
    /// Interprets a `format` option value. Unknown values fall back to
    /// [`TextFormatter::Value`].
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::String(s)) => Self::Template(s),
            Some(Value::Callback(c)) => c
                .downcast_ref::<TextFormatFn>()
                .map_or(Self::Value, |f| Self::Function(&*f.0)),
            _ => Self::Value,
        }
    }

    /// Produces the text for `provider`.
    pub fn format(self, provider: &dyn FormatProvider) -> Option<String> {
        match self {
            Self::Template(t) => Some(fill_template(t, provider)),
            Self::Function(f) => f(provider),
            Self::Value => provider.token("value").map(|v| display_value(&v)),
        }
    }
}

/// Resolves a `positionFormatter` option against `provider`.
pub fn format_position(value: Option<&Value>, provider: &dyn PositionProvider) -> Point {
    value
        .and_then(Value::as_callback)
        .and_then(Callback::downcast_ref::<PositionFormatFn>)
        .map_or_else(|| provider.position(), |f| (f.0)(provider))
}

/// Renders a value the way labels show it. Lists are comma-joined; maps and
/// callbacks render empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null | Value::Map(_) | Value::Callback(_) => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format!("{n}"),
        Value::String(s) => s.to_string(),
        Value::List(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Replaces `{%Name}` tokens. A token is looked up as written, then with a
/// lower-cased first letter (`{%Value}` reads `value`). Unknown tokens render
/// empty; unterminated ones are kept verbatim.
fn fill_template(template: &str, provider: &dyn FormatProvider) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{%") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        if let Some(v) = lookup_token(provider, name) {
            out.push_str(&display_value(&v));
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

fn lookup_token(provider: &dyn FormatProvider, name: &str) -> Option<Value> {
    provider.token(name).or_else(|| {
        let mut chars = name.chars();
        let first = chars.next()?;
        if first.is_ascii_uppercase() {
            let lowered: String = core::iter::once(first.to_ascii_lowercase())
                .chain(chars)
                .collect();
            provider.token(&lowered)
        } else {
            None
        }
    })
}
