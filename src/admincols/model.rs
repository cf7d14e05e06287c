use anchorage::Anchor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Host-side object identifier (post id, user id, term id, ...).
pub type ObjectId = u64;

/// Produces the rendered cell string. Arguments: the raw attached value
/// (`None` when the column has no source key), the object id, and the
/// column key.
pub type DisplayFn = Arc<dyn Fn(Option<&str>, ObjectId, &str) -> String + Send + Sync>;

/// Zero-argument predicate; the column is hidden entirely when it
/// returns false.
pub type PermissionFn = Arc<dyn Fn() -> bool + Send + Sync>;

/// The (object type, object subtype) pair a set of columns is registered
/// against, e.g. content kind "post" with subtype "page".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    pub object_type: String,
    pub object_subtype: String,
}

impl Scope {
    pub fn new(object_type: impl Into<String>, object_subtype: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            object_subtype: object_subtype.into(),
        }
    }

    /// Scope whose subtype is the object type itself (kinds without
    /// subtypes: users, comments).
    pub fn of(object_type: impl Into<String>) -> Self {
        let object_type = object_type.into();
        Self {
            object_subtype: object_type.clone(),
            object_type,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.object_type == self.object_subtype {
            write!(f, "{}", self.object_type)
        } else {
            write!(f, "{}/{}", self.object_type, self.object_subtype)
        }
    }
}

/// Partial column configuration as supplied by the caller.
///
/// Everything is optional; [`ColumnDefinition::from_spec`] merges a spec
/// over the fixed defaults. Specs are serde round-trippable for layout
/// files, except the two callback slots, which only exist in code.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    pub label: Option<String>,
    pub source_key: Option<String>,
    pub position: Option<Anchor>,
    pub sortable: bool,
    pub numeric: bool,
    pub sort_field: Option<String>,
    pub width: Option<String>,
    #[serde(skip)]
    pub display: Option<DisplayFn>,
    #[serde(skip)]
    pub permission: Option<PermissionFn>,
}

impl ColumnSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Which attached value feeds the column.
    pub fn source_key(mut self, key: impl Into<String>) -> Self {
        self.source_key = Some(key.into());
        self
    }

    pub fn before(mut self, reference: impl Into<String>) -> Self {
        self.position = Some(Anchor::Before(reference.into()));
        self
    }

    pub fn after(mut self, reference: impl Into<String>) -> Self {
        self.position = Some(Anchor::After(reference.into()));
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sort comparisons treat the value as a number.
    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    /// Overrides the field the sort query targets.
    pub fn sort_field(mut self, field: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self
    }

    /// CSS length for the column header, e.g. "80px" or "10%".
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn display(
        mut self,
        f: impl Fn(Option<&str>, ObjectId, &str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.display = Some(Arc::new(f));
        self
    }

    pub fn permission(mut self, f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.permission = Some(Arc::new(f));
        self
    }
}

/// Equality covers the declarative fields only; the callback slots are
/// code, not data, and two specs that differ only in callbacks compare
/// equal. This is what layout round-trip comparisons need.
impl PartialEq for ColumnSpec {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.source_key == other.source_key
            && self.position == other.position
            && self.sortable == other.sortable
            && self.numeric == other.numeric
            && self.sort_field == other.sort_field
            && self.width == other.width
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("label", &self.label)
            .field("source_key", &self.source_key)
            .field("position", &self.position)
            .field("sortable", &self.sortable)
            .field("numeric", &self.numeric)
            .field("sort_field", &self.sort_field)
            .field("width", &self.width)
            .field("display", &self.display.is_some())
            .field("permission", &self.permission.is_some())
            .finish()
    }
}

/// A registered column: a [`ColumnSpec`] merged over the fixed defaults.
#[derive(Clone, Default)]
pub struct ColumnDefinition {
    pub label: String,
    pub source_key: Option<String>,
    pub position: Anchor,
    pub sortable: bool,
    pub numeric: bool,
    pub sort_field: Option<String>,
    pub width: Option<String>,
    pub display: Option<DisplayFn>,
    pub permission: Option<PermissionFn>,
}

impl ColumnDefinition {
    /// Merges `spec` over the defaults. Fields the spec leaves out come
    /// out empty/false; re-registering a key goes through here again, so
    /// the later registration wins wholesale.
    pub fn from_spec(spec: ColumnSpec) -> Self {
        Self {
            label: spec.label.unwrap_or_default(),
            source_key: spec.source_key,
            position: spec.position.unwrap_or_default(),
            sortable: spec.sortable,
            numeric: spec.numeric,
            sort_field: spec.sort_field,
            width: spec.width,
            display: spec.display,
            permission: spec.permission,
        }
    }
}

impl fmt::Debug for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDefinition")
            .field("label", &self.label)
            .field("source_key", &self.source_key)
            .field("position", &self.position)
            .field("sortable", &self.sortable)
            .field("numeric", &self.numeric)
            .field("sort_field", &self.sort_field)
            .field("width", &self.width)
            .field("display", &self.display.is_some())
            .field("permission", &self.permission.is_some())
            .finish()
    }
}

/// Value shape of the host's sortable-column mapping: which key the
/// query sorts on and whether comparisons are numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortableColumn {
    pub order_by: String,
    pub numeric: bool,
}

impl SortableColumn {
    pub fn new(order_by: impl Into<String>, numeric: bool) -> Self {
        Self {
            order_by: order_by.into(),
            numeric,
        }
    }
}
