//! Interned name types for IDE windows and documents
//!
//! Host objects are converted to stable, comparable name strings by the
//! host integration. The same names recur constantly (every event stamps
//! the active window and document), so names wrap shared `Arc<str>`
//! allocations handed out by an explicit interning table instead of
//! re-allocating per event.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Stable name of an IDE window
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowName(Arc<str>);

/// Stable name of a document open in the IDE
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentName(Arc<str>);

macro_rules! name_impls {
    ($name:ident) => {
        impl $name {
            /// Wrap a raw name string; prefer [`NameInterner`] on hot paths
            pub fn new(value: impl Into<Arc<str>>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

name_impls!(WindowName);
name_impls!(DocumentName);

/// Explicit interning table for name strings
///
/// Maps each canonical string to one shared allocation, so structurally
/// equal names produced by independent host callbacks also share memory.
/// Entries are held with a strong reference; callers decide when to run
/// [`NameInterner::evict_unused`], which drops every entry no live name
/// still points at. Most names in the pipeline are short-lived, so an
/// occasional eviction sweep keeps the table small without weak-reference
/// bookkeeping.
#[derive(Default)]
pub struct NameInterner {
    table: RwLock<HashMap<String, Arc<str>>>,
}

impl NameInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared allocation for `value`, inserting it on first use
    pub fn intern(&self, value: &str) -> Arc<str> {
        if let Some(existing) = self.table.read().get(value) {
            return Arc::clone(existing);
        }

        let mut table = self.table.write();
        // Racing interns of the same string must converge on one allocation.
        Arc::clone(
            table
                .entry(value.to_string())
                .or_insert_with(|| Arc::from(value)),
        )
    }

    /// Intern a window name
    pub fn window(&self, value: &str) -> WindowName {
        WindowName(self.intern(value))
    }

    /// Intern a document name
    pub fn document(&self, value: &str) -> DocumentName {
        DocumentName(self.intern(value))
    }

    /// Number of interned strings currently in the table
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Drop entries no longer referenced outside the table; returns how
    /// many were evicted
    pub fn evict_unused(&self) -> usize {
        let mut table = self.table.write();
        let before = table.len();
        table.retain(|_, shared| Arc::strong_count(shared) > 1);
        before - table.len()
    }
}
