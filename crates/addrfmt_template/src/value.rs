/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Values a template can look up.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::Result;

/// Callback handed to a section lambda; renders text against the context
/// the section was found in.
pub type SubRender<'r> = dyn Fn(&str) -> Result<String> + 'r;

/// A value computed at lookup time from the view it was found in.
#[derive(Clone)]
pub struct Computed(Arc<dyn Fn(&Value) -> Value + Send + Sync>);

impl Computed {
    pub fn new(f: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, view: &Value) -> Value {
        (self.0)(view)
    }
}

impl fmt::Debug for Computed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Computed(..)")
    }
}

/// A higher-order section: receives the section's unrendered body and a
/// renderer for arbitrary text, returns the section's output.
#[derive(Clone)]
pub struct Lambda(Arc<dyn Fn(&str, &SubRender<'_>) -> Result<String> + Send + Sync>);

impl Lambda {
    pub fn new(f: impl Fn(&str, &SubRender<'_>) -> Result<String> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, body: &str, render: &SubRender<'_>) -> Result<String> {
        (self.0)(body, render)
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Lambda(..)")
    }
}

/// The result of a lookup.
///
/// Rendering dispatches on the variant: lists iterate, maps and scalars
/// become the new context, lambdas receive their raw section body.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    Computed(Computed),
    Lambda(Lambda),
}

impl Value {
    pub fn computed(f: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        Value::Computed(Computed::new(f))
    }

    pub fn lambda(
        f: impl Fn(&str, &SubRender<'_>) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        Value::Lambda(Lambda::new(f))
    }

    /// Truthiness used by sections: null, `false`, zero, NaN, the empty
    /// string and the empty list are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(_) | Value::Computed(_) | Value::Lambda(_) => true,
        }
    }

    /// Property of a map or list: map keys, list indices and list `length`.
    pub fn property(&self, name: &str) -> Option<Value> {
        match self {
            Value::Map(map) => map.get(name).cloned(),
            Value::List(items) if name == "length" => Some(Value::Number(items.len() as f64)),
            Value::List(items) => name
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index).cloned()),
            _ => None,
        }
    }

    /// Property of a scalar: a string's `length` (in characters) or a
    /// single character by index.
    pub fn primitive_property(&self, name: &str) -> Option<Value> {
        match self {
            Value::String(s) if name == "length" => Some(Value::Number(s.chars().count() as f64)),
            Value::String(s) => name
                .parse::<usize>()
                .ok()
                .and_then(|index| s.chars().nth(index))
                .map(|c| Value::String(c.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Text used when the value is interpolated.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::String(s) => Cow::Borrowed(s),
            Value::Number(n) => Cow::Owned(format_number(*n)),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::List(items) => Cow::Owned(
                items
                    .iter()
                    .map(|item| item.to_text().into_owned())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Value::Null | Value::Map(_) | Value::Computed(_) | Value::Lambda(_) => {
                Cow::Borrowed("")
            }
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::List(items.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(map) => map.into_iter().collect(),
        }
    }
}
