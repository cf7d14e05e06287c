//! # Column Registry
//!
//! Per-scope ordered column definitions, and the two read shapes the
//! host consumes: the display column list (with removal, permission
//! gating, and anchored insertion applied) and the sortable-column
//! mapping.
//!
//! The registry is an explicit service owned by the facade and passed by
//! reference into handlers. It holds no host handle: anything
//! host-dependent (the default permission check) comes in as a closure.
//!
//! ## Ordering Guarantees
//!
//! Columns are kept in registration order. When the host column list is
//! assembled, each registered column is inserted at its anchor in that
//! order, and every insertion sees the list state the previous one left
//! behind. Re-registering an existing key overwrites its configuration
//! in place without creating a duplicate.

use anchorage::insert;
use indexmap::{IndexMap, IndexSet};

use crate::error::{AdmincolsError, Result};
use crate::host::escape_html;
use crate::model::{ColumnDefinition, ColumnSpec, Scope, SortableColumn};

#[derive(Debug, Default)]
pub struct ColumnRegistry {
    scopes: IndexMap<Scope, IndexMap<String, ColumnDefinition>>,
}

impl ColumnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges each spec over the fixed defaults and upserts it under its
    /// key, in the given order. Every key is validated before anything
    /// is inserted, so a failing call leaves the scope untouched.
    ///
    /// Keys must be non-empty and not purely numeric; anything else
    /// fails with [`AdmincolsError::InvalidKey`].
    pub fn add_columns(
        &mut self,
        scope: &Scope,
        specs: impl IntoIterator<Item = (String, ColumnSpec)>,
    ) -> Result<()> {
        let specs: Vec<(String, ColumnSpec)> = specs.into_iter().collect();
        for (key, _) in &specs {
            validate_key(key)?;
        }

        let columns = self.scopes.entry(scope.clone()).or_default();
        for (key, spec) in specs {
            columns.insert(key, ColumnDefinition::from_spec(spec));
        }
        Ok(())
    }

    /// Snapshot of the columns registered for `scope`, in registration
    /// order. Unknown scopes yield an empty map.
    pub fn columns(&self, scope: &Scope) -> IndexMap<String, ColumnDefinition> {
        self.scopes.get(scope).cloned().unwrap_or_default()
    }

    /// Single column lookup.
    pub fn column(&self, scope: &Scope, key: &str) -> Option<&ColumnDefinition> {
        self.scopes.get(scope).and_then(|columns| columns.get(key))
    }

    /// Assembles the column list the host displays.
    ///
    /// Starting from the host's native columns minus `removed`, each
    /// registered column that passes its permission predicate (or
    /// `fallback_permission` when it declares none) is inserted at its
    /// anchor with an HTML-escaped label. Refused columns are skipped
    /// entirely, anchors included.
    ///
    /// An anchor naming a key absent from the working list degrades to
    /// append/prepend; a debug-level diagnostic makes the fallback
    /// visible without breaking the listing.
    pub fn columns_for_host(
        &self,
        scope: &Scope,
        native: &IndexMap<String, String>,
        removed: &IndexSet<String>,
        fallback_permission: impl Fn() -> bool,
    ) -> IndexMap<String, String> {
        let mut working: IndexMap<String, String> = native
            .iter()
            .filter(|(key, _)| !removed.contains(key.as_str()))
            .map(|(key, label)| (key.clone(), label.clone()))
            .collect();

        let Some(columns) = self.scopes.get(scope) else {
            return working;
        };

        for (key, def) in columns {
            let allowed = match &def.permission {
                Some(predicate) => predicate(),
                None => fallback_permission(),
            };
            if !allowed {
                continue;
            }

            if !def.position.resolves_in(&working) {
                log::debug!(
                    "column {:?} in scope {}: anchor \"{}\" matches no column, falling back",
                    key,
                    scope,
                    def.position
                );
            }

            let mut entry = IndexMap::with_capacity(1);
            entry.insert(key.clone(), escape_html(&def.label));
            working = insert(&working, entry, &def.position);
        }

        working
    }

    /// Merges every sortable registered column over the host's sortable
    /// set: `key → (key, numeric)`. Native entries survive unless a
    /// registered column claims the same key.
    pub fn sortable_for_host(
        &self,
        scope: &Scope,
        native: &IndexMap<String, SortableColumn>,
    ) -> IndexMap<String, SortableColumn> {
        let mut merged = native.clone();
        if let Some(columns) = self.scopes.get(scope) {
            for (key, def) in columns {
                if def.sortable {
                    merged.insert(key.clone(), SortableColumn::new(key.clone(), def.numeric));
                }
            }
        }
        merged
    }
}

fn validate_key(key: &str) -> Result<()> {
    let trimmed = key.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(AdmincolsError::InvalidKey(key.to_string()));
    }
    Ok(())
}
