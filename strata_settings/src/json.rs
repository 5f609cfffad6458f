// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading themes from JSON documents.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use serde_json::Value as Json;
use strata_core::{Value, ValueMap};

use crate::theme::Theme;

/// Errors produced while loading a theme document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThemeError {
    /// The document is not valid JSON.
    Parse {
        /// One-based line of the error.
        line: usize,
        /// One-based column of the error.
        column: usize,
        /// Parser message.
        message: String,
    },
    /// The document root is not an object.
    NotAnObject,
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse {
                line,
                column,
                message,
            } => write!(f, "invalid theme JSON at {line}:{column}: {message}"),
            Self::NotAnObject => write!(f, "theme root must be a JSON object"),
        }
    }
}

impl core::error::Error for ThemeError {}

impl Theme {
    /// Parses a theme from a JSON object.
    ///
    /// Numbers become [`Value::Number`], `null` becomes [`Value::Null`].
    pub fn from_json_str(text: &str) -> Result<Self, ThemeError> {
        let doc: Json = serde_json::from_str(text).map_err(|e| ThemeError::Parse {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })?;
        match convert(doc) {
            Value::Map(map) => Ok(Self::from_map(Arc::unwrap_or_clone(map))),
            _ => Err(ThemeError::NotAnObject),
        }
    }
}

fn convert(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        Json::String(s) => Value::from(s),
        Json::Array(items) => Value::from(items.into_iter().map(convert).collect::<Vec<_>>()),
        Json::Object(obj) => {
            let map: ValueMap = obj
                .into_iter()
                .map(|(k, v)| (Arc::from(k), convert(v)))
                .collect();
            Value::from(map)
        }
    }
}
