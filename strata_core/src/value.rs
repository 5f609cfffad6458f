// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamically typed values for theme trees, settings layers and row fields.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;

use hashbrown::HashMap;

/// A nested key/value map, the shape of every theme sub-tree.
pub type ValueMap = HashMap<Arc<str>, Value>;

/// A value looked up from a settings layer, a theme tree or a data row.
///
/// A key that is absent from a layer is "undefined" and is represented by
/// `Option::None` at lookup sites; [`Value::Null`] is an explicitly stored null.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Explicit null.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Number.
    Number(f64),
    /// String.
    String(Arc<str>),
    /// Ordered list.
    List(Arc<[Value]>),
    /// Nested map.
    Map(Arc<ValueMap>),
    /// An opaque function-like value (formatters and other hooks).
    Callback(Callback),
}

impl Value {
    /// Returns the number, if this is a [`Value::Number`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list, if this is a [`Value::List`].
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the nested map, if this is a [`Value::Map`].
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the callback, if this is a [`Value::Callback`].
    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            Self::Callback(c) => Some(c),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Looks up a key if this is a map.
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_map()?.get(key)
    }

    /// Builds a map value from `(key, value)` pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Arc<str>>,
        V: Into<Self>,
    {
        let map: ValueMap = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::Map(Arc::new(map))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value.into())
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value.into())
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Self::Map(Arc::new(value))
    }
}

impl From<Callback> for Value {
    fn from(value: Callback) -> Self {
        Self::Callback(value)
    }
}

/// A type-erased function value.
///
/// Formatter hooks travel through settings chains like any other option; the
/// consumer downcasts to the concrete hook type it expects. Two callbacks are
/// equal only if they share the same allocation.
#[derive(Clone)]
pub struct Callback(Arc<dyn Any>);

impl Callback {
    /// Wraps `hook` in a callback value.
    pub fn new<T: Any>(hook: T) -> Self {
        Self(Arc::new(hook))
    }

    /// Returns the hook if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl core::fmt::Debug for Callback {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Callback(..)")
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}
