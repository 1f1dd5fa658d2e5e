/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Layered lookup context.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::value::Value;

/// One layer of the rendering context stack.
///
/// A layer wraps a view and points at the layer it was pushed onto. Names
/// that are missing from the view are looked up in the parent chain.
#[derive(Debug)]
pub struct Context<'p> {
    view: Value,
    parent: Option<&'p Context<'p>>,
    cache: RefCell<HashMap<String, Option<Value>>>,
}

impl Context<'static> {
    /// A root context with no parent.
    pub fn new(view: impl Into<Value>) -> Self {
        Context {
            view: view.into(),
            parent: None,
            cache: RefCell::new(HashMap::new()),
        }
    }
}

impl<'p> Context<'p> {
    /// Push `view` as a new layer on top of this one.
    pub fn push(&self, view: impl Into<Value>) -> Context<'_> {
        Context {
            view: view.into(),
            parent: Some(self),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn view(&self) -> &Value {
        &self.view
    }

    pub fn parent(&self) -> Option<&Context<'p>> {
        self.parent
    }

    /// Resolve `name` against this layer and its ancestors.
    ///
    /// - `.` is the current view.
    /// - A bare name must be a property of a view (map key or list
    ///   property); the first layer that has it wins.
    /// - A dotted name walks `view[a][b]...` and hits when the final segment
    ///   exists, including scalar properties such as a string's `length`.
    ///   A hit stops the search even when the value is null.
    ///
    /// Results are memoized per layer. A `Computed` value is invoked with
    /// this layer's view every time it is looked up.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let cached = self.cache.borrow().get(name).cloned();
        let value = match cached {
            Some(value) => value,
            None => {
                let value = self.resolve(name);
                self.cache
                    .borrow_mut()
                    .insert(name.to_string(), value.clone());
                value
            }
        };

        match value {
            Some(Value::Computed(computed)) => Some(computed.call(&self.view)),
            other => other,
        }
    }

    fn resolve(&self, name: &str) -> Option<Value> {
        if name == "." {
            return Some(self.view.clone());
        }

        let dotted = name.find('.').is_some_and(|index| index > 0);
        let segments: Vec<&str> = if dotted {
            name.split('.').collect()
        } else {
            Vec::new()
        };

        let mut layer = Some(self);
        while let Some(context) = layer {
            let hit = if dotted {
                resolve_path(&context.view, &segments)
            } else {
                context.view.property(name)
            };
            if hit.is_some() {
                return hit;
            }
            layer = context.parent;
        }
        None
    }
}

fn resolve_path(view: &Value, segments: &[&str]) -> Option<Value> {
    let (last, intermediate) = segments.split_last()?;
    let mut current = view.clone();
    for segment in intermediate {
        current = current
            .property(segment)
            .or_else(|| current.primitive_property(segment))?;
    }
    current
        .property(last)
        .or_else(|| current.primitive_property(last))
}
