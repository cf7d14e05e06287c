//! In-memory host for tests and experiments: attached values live in
//! hash maps, capabilities in a set. No platform required.

use crate::host::{AdminHost, SortQuery};
use crate::model::ObjectId;
use std::collections::{HashMap, HashSet};

type MetaMap = HashMap<(ObjectId, String), String>;

/// [`AdminHost`] backed by plain maps.
///
/// A fresh host grants every capability, which is what most tests want;
/// use [`MemoryHost::deny_capabilities`] plus [`MemoryHost::grant`] to
/// exercise permission gating.
#[derive(Debug, Default)]
pub struct MemoryHost {
    posts: MetaMap,
    users: MetaMap,
    terms: MetaMap,
    comments: MetaMap,
    capabilities: HashSet<String>,
    grant_all: bool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            grant_all: true,
            ..Self::default()
        }
    }

    /// Stop granting everything; only capabilities added with
    /// [`MemoryHost::grant`] pass afterwards.
    pub fn deny_capabilities(mut self) -> Self {
        self.grant_all = false;
        self
    }

    pub fn grant(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    pub fn set_post_meta(
        &mut self,
        id: ObjectId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.posts.insert((id, key.into()), value.into());
    }

    pub fn set_user_meta(
        &mut self,
        id: ObjectId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.users.insert((id, key.into()), value.into());
    }

    pub fn set_term_meta(
        &mut self,
        id: ObjectId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.terms.insert((id, key.into()), value.into());
    }

    pub fn set_comment_meta(
        &mut self,
        id: ObjectId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.comments.insert((id, key.into()), value.into());
    }
}

fn lookup(map: &MetaMap, id: ObjectId, key: &str) -> Option<String> {
    map.get(&(id, key.to_string())).cloned()
}

impl AdminHost for MemoryHost {
    fn post_meta(&self, id: ObjectId, key: &str) -> Option<String> {
        lookup(&self.posts, id, key)
    }

    fn user_meta(&self, id: ObjectId, key: &str) -> Option<String> {
        lookup(&self.users, id, key)
    }

    fn term_meta(&self, id: ObjectId, key: &str) -> Option<String> {
        lookup(&self.terms, id, key)
    }

    fn comment_meta(&self, id: ObjectId, key: &str) -> Option<String> {
        lookup(&self.comments, id, key)
    }

    fn capability(&self, capability: &str) -> bool {
        self.grant_all || self.capabilities.contains(capability)
    }
}

/// [`SortQuery`] backed by a field map; tests assert on what handlers
/// wrote into it.
#[derive(Debug, Default)]
pub struct MemoryQuery {
    fields: HashMap<String, String>,
}

impl MemoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl SortQuery for MemoryQuery {
    fn get(&self, field: &str) -> Option<String> {
        self.fields.get(field).cloned()
    }

    fn set(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), value.to_string());
    }
}
