// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Name-keyed memo table shared across threads.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

/// Default number of names kept before the table is flushed
pub const DEFAULT_CAPACITY: usize = 4096;

/// Memoizes successful parses by name.
///
/// Failed parses are never stored. When the table reaches its capacity it
/// is cleared before the next insert. A poisoned lock is treated as a
/// miss: the value is recomputed and not stored.
#[derive(Debug)]
pub struct NameCache<T> {
    label: &'static str,
    capacity: usize,
    entries: RwLock<HashMap<String, T>>,
}

impl<T: Clone> NameCache<T> {
    pub fn new(label: &'static str) -> Self {
        Self::with_capacity(label, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(label: &'static str, capacity: usize) -> Self {
        Self {
            label,
            capacity: capacity.max(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key`, computing it with `parse` on a miss.
    ///
    /// `key` should already be normalized by the caller.
    pub fn get_or_parse<F>(&self, key: &str, parse: F) -> Option<T>
    where
        F: FnOnce(&str) -> Option<T>,
    {
        if let Ok(entries) = self.entries.read() {
            if let Some(cached) = entries.get(key) {
                return Some(cached.clone());
            }
        }

        debug!(cache = self.label, key, "cache miss");
        let value = parse(key)?;
        if let Ok(mut entries) = self.entries.write() {
            if entries.len() >= self.capacity && !entries.contains_key(key) {
                debug!(cache = self.label, capacity = self.capacity, "cache full, clearing");
                entries.clear();
            }
            entries
                .entry(key.to_string())
                .or_insert_with(|| value.clone());
        }
        Some(value)
    }

    /// Number of cached names
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all cached results
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}
