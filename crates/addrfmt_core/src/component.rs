/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Address components and their aliases.

use std::collections::HashMap;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A canonical component name and the alternative keys that mean the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Component {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

/// Lookup from any known key (canonical or alias) to its canonical name.
///
/// When the same alias is listed under two components the first listing
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Component>", into = "Vec<Component>")]
pub struct ComponentTable {
    components: Vec<Component>,
    canonical: HashMap<String, usize>,
}

impl ComponentTable {
    pub fn new(components: Vec<Component>) -> Self {
        let mut canonical = HashMap::new();
        for (index, component) in components.iter().enumerate() {
            canonical.entry(component.name.clone()).or_insert(index);
        }
        for (index, component) in components.iter().enumerate() {
            for alias in &component.aliases {
                canonical.entry(alias.clone()).or_insert(index);
            }
        }
        Self {
            components,
            canonical,
        }
    }

    /// Canonical name for `key`, which may itself be canonical.
    pub fn canonical(&self, key: &str) -> Option<&str> {
        self.canonical
            .get(key)
            .map(|&index| self.components[index].name.as_str())
    }

    /// Whether `key` is a component name or alias.
    pub fn is_known(&self, key: &str) -> bool {
        self.canonical.contains_key(key)
    }

    /// Whether `key` is an alias rather than a canonical name.
    pub fn is_alias(&self, key: &str) -> bool {
        self.canonical(key).is_some_and(|name| name != key)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

impl From<Vec<Component>> for ComponentTable {
    fn from(components: Vec<Component>) -> Self {
        Self::new(components)
    }
}

impl From<ComponentTable> for Vec<Component> {
    fn from(table: ComponentTable) -> Self {
        table.components
    }
}
