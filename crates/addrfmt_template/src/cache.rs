/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Compiled template caches.
//!
//! The renderer owns its cache through [`TemplateCache`], so callers decide
//! whether compiled trees are shared, bounded, or not kept at all.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::token::{CompiledTemplate, Delimiters};

/// Storage for compiled templates, keyed by [`cache_key`].
pub trait TemplateCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Arc<CompiledTemplate>>;
    fn set(&self, key: String, template: Arc<CompiledTemplate>);
    fn clear(&self);
}

/// Cache key for a template compiled with the given delimiters.
pub fn cache_key(source: &str, delimiters: &Delimiters) -> String {
    format!("{}:{}:{}", source, delimiters.open, delimiters.close)
}

/// Unbounded in-memory cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Arc<CompiledTemplate>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Arc<CompiledTemplate>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: String, template: Arc<CompiledTemplate>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, template);
    }

    fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// A cache that never stores anything; every render recompiles.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl TemplateCache for NoCache {
    fn get(&self, _key: &str) -> Option<Arc<CompiledTemplate>> {
        None
    }

    fn set(&self, _key: String, _template: Arc<CompiledTemplate>) {}

    fn clear(&self) {}
}
