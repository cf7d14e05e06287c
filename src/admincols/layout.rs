//! Declarative column layouts.
//!
//! A [`ColumnLayout`] is the file-backed way to register columns: kind
//! name → target → column key → [`ColumnSpec`], stored as JSON. The
//! callback slots cannot live in a file, so file-driven columns render
//! and gate with the defaults; code can re-register the same keys to
//! attach callbacks on top.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::api::Admincols;
use crate::error::Result;
use crate::handlers::HandlerId;
use crate::host::AdminHost;
use crate::model::ColumnSpec;

type TargetColumns = IndexMap<String, IndexMap<String, ColumnSpec>>;

/// Column sets for any number of tables, keyed by handler kind name
/// ("post", "user", "term", "comment", "media") and target.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ColumnLayout {
    #[serde(default)]
    pub tables: IndexMap<String, TargetColumns>,
}

impl ColumnLayout {
    /// Load a layout file, or return the empty layout if the file does
    /// not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let layout = serde_json::from_str(&content)?;
        Ok(layout)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn set_column(
        &mut self,
        kind: impl Into<String>,
        target: impl Into<String>,
        key: impl Into<String>,
        spec: ColumnSpec,
    ) {
        self.tables
            .entry(kind.into())
            .or_default()
            .entry(target.into())
            .or_default()
            .insert(key.into(), spec);
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<H: AdminHost> Admincols<H> {
    /// Registers every table in `layout`. The usual degradation rules
    /// apply per entry: an unknown kind name or a failing target is
    /// reported through the error sink and the rest still registers.
    pub fn apply_layout(&mut self, layout: &ColumnLayout) -> Vec<HandlerId> {
        let mut ids = Vec::new();
        for (kind_name, targets) in &layout.tables {
            for (target, columns) in targets {
                let columns: Vec<(String, ColumnSpec)> = columns
                    .iter()
                    .map(|(key, spec)| (key.clone(), spec.clone()))
                    .collect();
                ids.extend(self.register_as(kind_name, &[target.as_str()], columns, &[]));
            }
        }
        ids
    }
}
