//! # Handler Layer
//!
//! One handler per registered list table, translating the generic
//! registry into what the host's table actually consumes. The handler
//! owns nothing but its identity and the set of native columns to
//! suppress; column configuration lives in the
//! [`ColumnRegistry`](crate::registry::ColumnRegistry) and host access
//! comes in per call.
//!
//! Kind-specific behavior (object type constant, attached-value channel,
//! identifier sort field) lives in the kind modules; everything else is
//! shared here.
//!
//! All read operations fail open: an unknown column key renders as the
//! passed-through value and leaves sort queries untouched, so a
//! misconfigured column degrades to inert instead of breaking the
//! listing page.

use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::str::FromStr;

use crate::error::AdmincolsError;
use crate::host::{escape_html, sort, AdminHost, SortQuery, DEFAULT_CAPABILITY, EMPTY_PLACEHOLDER};
use crate::model::{ObjectId, Scope, SortableColumn};
use crate::registry::ColumnRegistry;

pub mod comments;
pub mod media;
pub mod posts;
pub mod terms;
pub mod users;

/// The closed set of list-table kinds this library can wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Posts,
    Users,
    Terms,
    Comments,
    Media,
}

impl HandlerKind {
    pub fn object_type(&self) -> &'static str {
        match self {
            HandlerKind::Posts => posts::OBJECT_TYPE,
            HandlerKind::Users => users::OBJECT_TYPE,
            HandlerKind::Terms => terms::OBJECT_TYPE,
            HandlerKind::Comments => comments::OBJECT_TYPE,
            HandlerKind::Media => media::OBJECT_TYPE,
        }
    }

    /// Field the host sorts on when a numeric column falls back to the
    /// object identifier.
    pub(crate) fn id_sort_field(&self) -> &'static str {
        match self {
            HandlerKind::Posts => posts::ID_SORT_FIELD,
            HandlerKind::Users => users::ID_SORT_FIELD,
            HandlerKind::Terms => terms::ID_SORT_FIELD,
            HandlerKind::Comments => comments::ID_SORT_FIELD,
            HandlerKind::Media => media::ID_SORT_FIELD,
        }
    }

    /// Reads the attached value through this kind's host channel.
    pub(crate) fn fetch_value<H: AdminHost>(
        &self,
        host: &H,
        id: ObjectId,
        key: &str,
    ) -> Option<String> {
        match self {
            HandlerKind::Posts => posts::fetch_value(host, id, key),
            HandlerKind::Users => users::fetch_value(host, id, key),
            HandlerKind::Terms => terms::fetch_value(host, id, key),
            HandlerKind::Comments => comments::fetch_value(host, id, key),
            HandlerKind::Media => media::fetch_value(host, id, key),
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandlerKind::Posts => "post",
            HandlerKind::Users => "user",
            HandlerKind::Terms => "term",
            HandlerKind::Comments => "comment",
            HandlerKind::Media => "media",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for HandlerKind {
    type Err = AdmincolsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "post" | "posts" => Ok(HandlerKind::Posts),
            "user" | "users" => Ok(HandlerKind::Users),
            "term" | "terms" | "taxonomy" => Ok(HandlerKind::Terms),
            "comment" | "comments" => Ok(HandlerKind::Comments),
            "media" | "attachment" => Ok(HandlerKind::Media),
            _ => Err(AdmincolsError::UnknownHandlerKind(s.to_string())),
        }
    }
}

/// Identity of one live handler: at most one handler exists per id for
/// the service lifetime. The optional custom hook distinguishes tables
/// the host exposes through a non-standard extension point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerId {
    pub kind: HandlerKind,
    pub scope: Scope,
    pub custom_hook: Option<String>,
}

impl HandlerId {
    pub(crate) fn new(kind: HandlerKind, scope: Scope, custom_hook: Option<String>) -> Self {
        Self {
            kind,
            scope,
            custom_hook,
        }
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.scope)?;
        if let Some(hook) = &self.custom_hook {
            write!(f, ":{}", hook)?;
        }
        Ok(())
    }
}

/// A list-table handler: the operations the host invokes for one
/// (kind, scope) binding.
#[derive(Debug)]
pub struct ListTableHandler {
    id: HandlerId,
    removed_keys: IndexSet<String>,
}

impl ListTableHandler {
    pub(crate) fn new(id: HandlerId, removed_keys: IndexSet<String>) -> Self {
        Self { id, removed_keys }
    }

    pub fn id(&self) -> &HandlerId {
        &self.id
    }

    pub fn scope(&self) -> &Scope {
        &self.id.scope
    }

    /// Native column keys this handler strips before custom columns
    /// merge in.
    pub fn removed_keys(&self) -> &IndexSet<String> {
        &self.removed_keys
    }

    /// The display column list for the host: native columns minus the
    /// removed keys, with registered columns inserted at their anchors.
    /// Columns without their own permission predicate are gated on the
    /// host's [`DEFAULT_CAPABILITY`].
    pub fn columns<H: AdminHost>(
        &self,
        registry: &ColumnRegistry,
        host: &H,
        native: &IndexMap<String, String>,
    ) -> IndexMap<String, String> {
        registry.columns_for_host(self.scope(), native, &self.removed_keys, || {
            host.capability(DEFAULT_CAPABILITY)
        })
    }

    /// The host's sortable set extended with this scope's sortable
    /// columns.
    pub fn sortable_columns(
        &self,
        registry: &ColumnRegistry,
        native: &IndexMap<String, SortableColumn>,
    ) -> IndexMap<String, SortableColumn> {
        registry.sortable_for_host(self.scope(), native)
    }

    /// Renders one cell. Unknown keys pass `current` through untouched.
    ///
    /// With a display callback the callback output is the cell, raw
    /// value handed over as fetched (`None` when the column has no
    /// source key). Without one, the raw value is escaped for display,
    /// or the placeholder dash stands in for a missing/empty value.
    pub fn render_cell<H: AdminHost>(
        &self,
        registry: &ColumnRegistry,
        host: &H,
        key: &str,
        object_id: ObjectId,
        current: &str,
    ) -> String {
        let Some(def) = registry.column(self.scope(), key) else {
            return current.to_string();
        };

        let raw = def
            .source_key
            .as_deref()
            .and_then(|source_key| self.id.kind.fetch_value(host, object_id, source_key));

        if let Some(display) = &def.display {
            return display(raw.as_deref(), object_id, key);
        }

        match raw.as_deref() {
            Some(value) if !value.trim().is_empty() => escape_html(value),
            _ => EMPTY_PLACEHOLDER.to_string(),
        }
    }

    /// Redirects the host's sort query when `requested_order_by` names a
    /// sortable registered column; otherwise the query is left
    /// untouched.
    ///
    /// Priority: explicit `sort_field` override, then the attached value
    /// under `source_key` (numeric or lexicographic per the column's
    /// flag), then the object identifier for numeric columns with no
    /// source key.
    pub fn apply_sort<Q: SortQuery>(
        &self,
        registry: &ColumnRegistry,
        query: &mut Q,
        requested_order_by: &str,
    ) {
        let Some(def) = registry.column(self.scope(), requested_order_by) else {
            return;
        };
        if !def.sortable {
            return;
        }

        if let Some(field) = &def.sort_field {
            query.set(sort::ORDER_BY, field);
            return;
        }

        if let Some(source_key) = &def.source_key {
            query.set(sort::VALUE_KEY, source_key);
            let mode = if def.numeric {
                sort::BY_VALUE_NUMERIC
            } else {
                sort::BY_VALUE
            };
            query.set(sort::ORDER_BY, mode);
            return;
        }

        if def.numeric {
            query.set(sort::ORDER_BY, self.id.kind.id_sort_field());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryHost, MemoryQuery};
    use crate::model::ColumnSpec;

    fn handler() -> ListTableHandler {
        ListTableHandler::new(
            HandlerId::new(HandlerKind::Posts, Scope::new("post", "page"), None),
            IndexSet::new(),
        )
    }

    fn registry_with(specs: Vec<(String, ColumnSpec)>) -> ColumnRegistry {
        let mut registry = ColumnRegistry::new();
        registry
            .add_columns(&Scope::new("post", "page"), specs)
            .unwrap();
        registry
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("post".parse::<HandlerKind>().unwrap(), HandlerKind::Posts);
        assert_eq!("Users".parse::<HandlerKind>().unwrap(), HandlerKind::Users);
        assert_eq!(
            "taxonomy".parse::<HandlerKind>().unwrap(),
            HandlerKind::Terms
        );
        assert_eq!(
            "attachment".parse::<HandlerKind>().unwrap(),
            HandlerKind::Media
        );

        let err = "widget".parse::<HandlerKind>().unwrap_err();
        assert!(matches!(err, AdmincolsError::UnknownHandlerKind(_)));
    }

    #[test]
    fn test_render_unknown_key_passes_through() {
        let registry = ColumnRegistry::new();
        let host = MemoryHost::new();
        let cell = handler().render_cell(&registry, &host, "ghost", 7, "native content");
        assert_eq!(cell, "native content");
    }

    #[test]
    fn test_render_raw_value_escaped() {
        let registry = registry_with(vec![(
            "views".to_string(),
            ColumnSpec::new("Views").source_key("post_views"),
        )]);
        let mut host = MemoryHost::new();
        host.set_post_meta(7, "post_views", "<1000>");

        let cell = handler().render_cell(&registry, &host, "views", 7, "");
        assert_eq!(cell, "&lt;1000&gt;");
    }

    #[test]
    fn test_render_missing_value_uses_placeholder() {
        let registry = registry_with(vec![(
            "views".to_string(),
            ColumnSpec::new("Views").source_key("post_views"),
        )]);
        let host = MemoryHost::new();

        let cell = handler().render_cell(&registry, &host, "views", 7, "");
        assert_eq!(cell, EMPTY_PLACEHOLDER);
    }

    #[test]
    fn test_render_blank_value_uses_placeholder() {
        let registry = registry_with(vec![(
            "views".to_string(),
            ColumnSpec::new("Views").source_key("post_views"),
        )]);
        let mut host = MemoryHost::new();
        host.set_post_meta(7, "post_views", "   ");

        let cell = handler().render_cell(&registry, &host, "views", 7, "");
        assert_eq!(cell, EMPTY_PLACEHOLDER);
    }

    #[test]
    fn test_render_display_callback_receives_value_and_identity() {
        let registry = registry_with(vec![(
            "views".to_string(),
            ColumnSpec::new("Views")
                .source_key("post_views")
                .display(|raw, id, key| format!("{}:{}:{}", raw.unwrap_or("-"), id, key)),
        )]);
        let mut host = MemoryHost::new();
        host.set_post_meta(7, "post_views", "42");

        let cell = handler().render_cell(&registry, &host, "views", 7, "");
        assert_eq!(cell, "42:7:views");
    }

    #[test]
    fn test_render_display_callback_without_source_key_gets_none() {
        let registry = registry_with(vec![(
            "actions".to_string(),
            ColumnSpec::new("Actions").display(|raw, id, _| {
                assert!(raw.is_none());
                format!("edit-{}", id)
            }),
        )]);
        let host = MemoryHost::new();

        let cell = handler().render_cell(&registry, &host, "actions", 3, "");
        assert_eq!(cell, "edit-3");
    }

    #[test]
    fn test_sort_field_override_wins() {
        let registry = registry_with(vec![(
            "views".to_string(),
            ColumnSpec::new("Views")
                .sortable()
                .numeric()
                .source_key("post_views")
                .sort_field("cached_views"),
        )]);
        let mut query = MemoryQuery::new();

        handler().apply_sort(&registry, &mut query, "views");
        assert_eq!(query.get(sort::ORDER_BY).as_deref(), Some("cached_views"));
        assert_eq!(query.get(sort::VALUE_KEY), None);
    }

    #[test]
    fn test_sort_by_attached_value() {
        let registry = registry_with(vec![
            (
                "views".to_string(),
                ColumnSpec::new("Views").sortable().numeric().source_key("post_views"),
            ),
            (
                "subtitle".to_string(),
                ColumnSpec::new("Subtitle").sortable().source_key("subtitle"),
            ),
        ]);

        let mut query = MemoryQuery::new();
        handler().apply_sort(&registry, &mut query, "views");
        assert_eq!(
            query.get(sort::ORDER_BY).as_deref(),
            Some(sort::BY_VALUE_NUMERIC)
        );
        assert_eq!(query.get(sort::VALUE_KEY).as_deref(), Some("post_views"));

        let mut query = MemoryQuery::new();
        handler().apply_sort(&registry, &mut query, "subtitle");
        assert_eq!(query.get(sort::ORDER_BY).as_deref(), Some(sort::BY_VALUE));
        assert_eq!(query.get(sort::VALUE_KEY).as_deref(), Some("subtitle"));
    }

    #[test]
    fn test_sort_numeric_without_source_falls_back_to_id() {
        let registry = registry_with(vec![(
            "weight".to_string(),
            ColumnSpec::new("Weight").sortable().numeric(),
        )]);
        let mut query = MemoryQuery::new();

        handler().apply_sort(&registry, &mut query, "weight");
        assert_eq!(query.get(sort::ORDER_BY).as_deref(), Some(posts::ID_SORT_FIELD));
    }

    #[test]
    fn test_sort_leaves_query_untouched() {
        let registry = registry_with(vec![
            ("plain".to_string(), ColumnSpec::new("Plain")),
            ("bare".to_string(), ColumnSpec::new("Bare").sortable()),
        ]);

        // Unknown column.
        let mut query = MemoryQuery::new();
        handler().apply_sort(&registry, &mut query, "ghost");
        assert!(query.is_empty());

        // Known but not sortable.
        let mut query = MemoryQuery::new();
        handler().apply_sort(&registry, &mut query, "plain");
        assert!(query.is_empty());

        // Sortable with nothing to sort by.
        let mut query = MemoryQuery::new();
        handler().apply_sort(&registry, &mut query, "bare");
        assert!(query.is_empty());
    }

    #[test]
    fn test_columns_uses_default_capability() {
        let registry = registry_with(vec![("views".to_string(), ColumnSpec::new("Views"))]);
        let native: IndexMap<String, String> =
            [("title".to_string(), "Title".to_string())].into_iter().collect();

        let open_host = MemoryHost::new();
        let list = handler().columns(&registry, &open_host, &native);
        assert!(list.contains_key("views"));

        let locked_host = MemoryHost::new().deny_capabilities();
        let list = handler().columns(&registry, &locked_host, &native);
        assert!(!list.contains_key("views"));
        assert!(list.contains_key("title"));
    }
}
