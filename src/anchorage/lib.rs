//! # Anchorage - Anchored Insertion for Ordered Maps
//!
//! Position new entries in an [`IndexMap`] relative to an entry that is
//! already there, without the caller doing index arithmetic.
//!
//! ## The Problem
//!
//! Ordered maps are append-only as far as position goes: `insert` always
//! places a new key at the end. Code that assembles a display list from
//! several sources ("put this column right after `title`") ends up
//! re-deriving indexes by hand, and has to decide what to do when the
//! reference entry is missing.
//!
//! ## The Solution
//!
//! Anchorage models the placement as an [`Anchor`]:
//! - [`Anchor::End`]: append (the default)
//! - [`Anchor::Before`]: insert immediately before a reference key
//! - [`Anchor::After`]: insert immediately after a reference key
//!
//! and resolves it with [`insert`], a pure function that returns a new
//! map. Unknown reference keys degrade gracefully: `After` falls back to
//! appending, `Before` to prepending. Callers that need to surface that
//! case can check [`Anchor::resolves_in`] first.
//!
//! ## Quick Example
//!
//! ```rust
//! use anchorage::{insert, Anchor};
//! use indexmap::IndexMap;
//!
//! let mut base = IndexMap::new();
//! base.insert("title".to_string(), "Title");
//! base.insert("date".to_string(), "Date");
//!
//! let mut extra = IndexMap::new();
//! extra.insert("views".to_string(), "Views");
//!
//! let merged = insert(&base, extra, &Anchor::after("title"));
//! let keys: Vec<_> = merged.keys().map(String::as_str).collect();
//! assert_eq!(keys, ["title", "views", "date"]);
//! ```
//!
//! ## String Form
//!
//! Anchors cross configuration boundaries as `"before:key"`,
//! `"after:key"` and `"end"`. [`FromStr`]/[`Display`] implement that
//! encoding, and the serde impls reuse it so an anchor serializes as a
//! plain string.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where new entries land relative to the entries already in the map.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Anchor {
    /// Append at the end of the map.
    #[default]
    End,
    /// Insert immediately before the entry with this key.
    Before(String),
    /// Insert immediately after the entry with this key.
    After(String),
}

impl Anchor {
    /// Anchor before `key`.
    pub fn before(key: impl Into<String>) -> Self {
        Anchor::Before(key.into())
    }

    /// Anchor after `key`.
    pub fn after(key: impl Into<String>) -> Self {
        Anchor::After(key.into())
    }

    /// The reference key, if this anchor has one.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Anchor::End => None,
            Anchor::Before(key) | Anchor::After(key) => Some(key),
        }
    }

    /// Whether the reference key is present in `map`.
    ///
    /// `End` trivially resolves. [`insert`] does not require this -
    /// unresolved anchors fall back to append/prepend - but callers can
    /// use it to report typo'd references.
    pub fn resolves_in<V>(&self, map: &IndexMap<String, V>) -> bool {
        match self.reference() {
            None => true,
            Some(key) => map.contains_key(key),
        }
    }

    /// The insertion index `insert` will use for this anchor in `map`.
    fn position<V>(&self, map: &IndexMap<String, V>) -> usize {
        match self {
            Anchor::End => map.len(),
            Anchor::After(key) => map
                .get_index_of(key.as_str())
                .map(|i| i + 1)
                .unwrap_or(map.len()),
            Anchor::Before(key) => map.get_index_of(key.as_str()).unwrap_or(0),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::End => write!(f, "end"),
            Anchor::Before(key) => write!(f, "before:{}", key),
            Anchor::After(key) => write!(f, "after:{}", key),
        }
    }
}

impl FromStr for Anchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "end" {
            return Ok(Anchor::End);
        }
        if let Some(key) = s.strip_prefix("before:") {
            if !key.is_empty() {
                return Ok(Anchor::Before(key.to_string()));
            }
        }
        if let Some(key) = s.strip_prefix("after:") {
            if !key.is_empty() {
                return Ok(Anchor::After(key.to_string()));
            }
        }
        Err(format!("Invalid anchor format: {}", s))
    }
}

impl TryFrom<String> for Anchor {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Anchor> for String {
    fn from(anchor: Anchor) -> Self {
        anchor.to_string()
    }
}

/// Inserts `entries` into a copy of `map` at the position named by
/// `anchor`.
///
/// Rules:
/// - The relative order of entries already in `map` is preserved.
/// - New entries occupy contiguous positions, in their given order.
/// - `After` on a missing key (and `End`) appends; `Before` on a missing
///   key prepends.
/// - A key present in both `entries` and `map` is moved: the incoming
///   value wins and the entry sits at the anchored position.
///
/// The input map is not touched; a new map is returned. Inserting into
/// an empty map yields `entries` unchanged regardless of the anchor.
pub fn insert<V: Clone>(
    map: &IndexMap<String, V>,
    entries: IndexMap<String, V>,
    anchor: &Anchor,
) -> IndexMap<String, V> {
    let at = anchor.position(map);

    let mut merged = IndexMap::with_capacity(map.len() + entries.len());
    for (i, (key, value)) in map.iter().enumerate() {
        if i == at {
            for (new_key, new_value) in &entries {
                merged.insert(new_key.clone(), new_value.clone());
            }
        }
        // An incoming key shadows its old occurrence entirely.
        if !entries.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    if at >= map.len() {
        for (new_key, new_value) in entries {
            merged.insert(new_key, new_value);
        }
    }
    merged
}
