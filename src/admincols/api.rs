//! # Registration Facade
//!
//! [`Admincols`] is the single entry point: it owns the host handle, the
//! column registry, and the handler instance cache, and exposes both
//! sides of the contract:
//!
//! - **Registration surface** (embedder-facing): per-kind
//!   `register_*_columns` helpers and the [`Registration`] builder. A
//!   multi-target call degrades per target: a failing target is routed
//!   to the error sink and the remaining targets still register.
//! - **Read surface** (host-facing): `columns`, `sortable_columns`,
//!   `render_cell`, `apply_sort`, all keyed by [`HandlerId`] and all
//!   fail-open - an id or column the cache does not know leaves the
//!   input untouched.
//!
//! ## Instance Identity
//!
//! One handler exists per (kind, object type, object subtype, custom
//! hook) tuple for the lifetime of the service. The first registration
//! for a tuple validates, registers the initial columns, and caches the
//! handler; later registrations for the same tuple only merge further
//! columns - they never rebind the handler or reset its removed-key
//! set.
//!
//! ## Generic Over AdminHost
//!
//! `Admincols<H: AdminHost>` is generic over the host contract:
//! production code hands in the platform adapter, tests use
//! [`MemoryHost`](crate::host::memory::MemoryHost).

use indexmap::{IndexMap, IndexSet};
use std::str::FromStr;

use crate::error::{AdmincolsError, Result};
use crate::handlers::{HandlerId, HandlerKind, ListTableHandler};
use crate::host::{AdminHost, SortQuery};
use crate::model::{ColumnSpec, ObjectId, Scope, SortableColumn};
use crate::registry::ColumnRegistry;

type ErrorSink = Box<dyn Fn(&AdmincolsError) + Send + Sync>;

/// One registration request: a handler kind, the targets to bind (one
/// handler resolves per target), the columns, and the native keys to
/// suppress.
#[derive(Debug)]
pub struct Registration {
    kind: HandlerKind,
    targets: Vec<String>,
    columns: Vec<(String, ColumnSpec)>,
    removed_keys: IndexSet<String>,
    custom_hook: Option<String>,
}

impl Registration {
    pub fn new(kind: HandlerKind) -> Self {
        Self {
            kind,
            targets: Vec::new(),
            columns: Vec::new(),
            removed_keys: IndexSet::new(),
            custom_hook: None,
        }
    }

    /// Adds one target (content type, taxonomy, ...). Without any
    /// target the registration binds the kind's object type itself.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    pub fn targets<T: AsRef<str>>(mut self, targets: impl IntoIterator<Item = T>) -> Self {
        self.targets
            .extend(targets.into_iter().map(|t| t.as_ref().to_string()));
        self
    }

    pub fn column(mut self, key: impl Into<String>, spec: ColumnSpec) -> Self {
        self.columns.push((key.into(), spec));
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = (String, ColumnSpec)>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Native column to strip from the host list before custom columns
    /// merge in.
    pub fn remove_key(mut self, key: impl Into<String>) -> Self {
        self.removed_keys.insert(key.into());
        self
    }

    pub fn remove_keys<T: AsRef<str>>(mut self, keys: impl IntoIterator<Item = T>) -> Self {
        self.removed_keys
            .extend(keys.into_iter().map(|k| k.as_ref().to_string()));
        self
    }

    /// Distinguishes tables the host exposes through a non-standard
    /// extension point; part of the handler identity.
    pub fn custom_hook(mut self, hook: impl Into<String>) -> Self {
        self.custom_hook = Some(hook.into());
        self
    }
}

/// The facade service. Construct one per request at admin bootstrap,
/// register columns, then let the host drive the read surface.
pub struct Admincols<H: AdminHost> {
    host: H,
    registry: ColumnRegistry,
    handlers: IndexMap<HandlerId, ListTableHandler>,
    error_sink: Option<ErrorSink>,
}

impl<H: AdminHost> Admincols<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            registry: ColumnRegistry::new(),
            handlers: IndexMap::new(),
            error_sink: None,
        }
    }

    /// Installs the sink registration errors are reported through.
    /// Without one they go to the log.
    pub fn on_error(mut self, sink: impl Fn(&AdmincolsError) + Send + Sync + 'static) -> Self {
        self.error_sink = Some(Box::new(sink));
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    pub fn handler(&self, id: &HandlerId) -> Option<&ListTableHandler> {
        self.handlers.get(id)
    }

    pub fn handlers(&self) -> impl Iterator<Item = &ListTableHandler> {
        self.handlers.values()
    }

    /// Runs one registration. Each target resolves independently;
    /// failures go to the error sink and do not stop the remaining
    /// targets. Returns the ids that registered.
    pub fn register(&mut self, registration: Registration) -> Vec<HandlerId> {
        let Registration {
            kind,
            targets,
            columns,
            removed_keys,
            custom_hook,
        } = registration;

        let targets = if targets.is_empty() {
            vec![kind.object_type().to_string()]
        } else {
            targets
        };

        let mut ids = Vec::with_capacity(targets.len());
        for target in targets {
            match self.resolve_or_create(kind, &target, &columns, &removed_keys, &custom_hook) {
                Ok(id) => ids.push(id),
                Err(err) => self.report(&err),
            }
        }
        ids
    }

    /// Registration with the kind given by name, for configuration
    /// sources that carry kinds as strings. An unknown name is reported
    /// through the error sink.
    pub fn register_as<T: AsRef<str>>(
        &mut self,
        kind_name: &str,
        targets: &[T],
        columns: Vec<(String, ColumnSpec)>,
        removed_keys: &[T],
    ) -> Vec<HandlerId> {
        match HandlerKind::from_str(kind_name) {
            Ok(kind) => self.register(
                Registration::new(kind)
                    .targets(targets.iter())
                    .columns(columns)
                    .remove_keys(removed_keys.iter()),
            ),
            Err(err) => {
                self.report(&err);
                Vec::new()
            }
        }
    }

    /// Registers columns on content-type tables, one handler per
    /// content type.
    pub fn register_post_columns<T: AsRef<str>>(
        &mut self,
        post_types: &[T],
        columns: Vec<(String, ColumnSpec)>,
        removed_keys: &[&str],
    ) -> Vec<HandlerId> {
        self.register(
            Registration::new(HandlerKind::Posts)
                .targets(post_types.iter())
                .columns(columns)
                .remove_keys(removed_keys.iter().copied()),
        )
    }

    /// Registers columns on taxonomy-term tables, one handler per
    /// taxonomy.
    pub fn register_term_columns<T: AsRef<str>>(
        &mut self,
        taxonomies: &[T],
        columns: Vec<(String, ColumnSpec)>,
        removed_keys: &[&str],
    ) -> Vec<HandlerId> {
        self.register(
            Registration::new(HandlerKind::Terms)
                .targets(taxonomies.iter())
                .columns(columns)
                .remove_keys(removed_keys.iter().copied()),
        )
    }

    pub fn register_user_columns(
        &mut self,
        columns: Vec<(String, ColumnSpec)>,
        removed_keys: &[&str],
    ) -> Vec<HandlerId> {
        self.register(
            Registration::new(HandlerKind::Users)
                .columns(columns)
                .remove_keys(removed_keys.iter().copied()),
        )
    }

    pub fn register_comment_columns(
        &mut self,
        columns: Vec<(String, ColumnSpec)>,
        removed_keys: &[&str],
    ) -> Vec<HandlerId> {
        self.register(
            Registration::new(HandlerKind::Comments)
                .columns(columns)
                .remove_keys(removed_keys.iter().copied()),
        )
    }

    pub fn register_media_columns(
        &mut self,
        columns: Vec<(String, ColumnSpec)>,
        removed_keys: &[&str],
    ) -> Vec<HandlerId> {
        self.register(
            Registration::new(HandlerKind::Media)
                .columns(columns)
                .remove_keys(removed_keys.iter().copied()),
        )
    }

    /// The display column list for the table behind `id`. Unknown ids
    /// return the native list unchanged.
    pub fn columns(
        &self,
        id: &HandlerId,
        native: &IndexMap<String, String>,
    ) -> IndexMap<String, String> {
        match self.handlers.get(id) {
            Some(handler) => handler.columns(&self.registry, &self.host, native),
            None => native.clone(),
        }
    }

    /// The sortable set for the table behind `id`. Unknown ids return
    /// the native set unchanged.
    pub fn sortable_columns(
        &self,
        id: &HandlerId,
        native: &IndexMap<String, SortableColumn>,
    ) -> IndexMap<String, SortableColumn> {
        match self.handlers.get(id) {
            Some(handler) => handler.sortable_columns(&self.registry, native),
            None => native.clone(),
        }
    }

    /// Renders one cell; unknown ids and keys pass `current` through.
    pub fn render_cell(
        &self,
        id: &HandlerId,
        column_key: &str,
        object_id: ObjectId,
        current: &str,
    ) -> String {
        match self.handlers.get(id) {
            Some(handler) => {
                handler.render_cell(&self.registry, &self.host, column_key, object_id, current)
            }
            None => current.to_string(),
        }
    }

    /// Redirects `query` when `requested_order_by` names a sortable
    /// registered column; otherwise a no-op.
    pub fn apply_sort<Q: SortQuery>(
        &self,
        id: &HandlerId,
        query: &mut Q,
        requested_order_by: &str,
    ) {
        if let Some(handler) = self.handlers.get(id) {
            handler.apply_sort(&self.registry, query, requested_order_by);
        }
    }

    fn resolve_or_create(
        &mut self,
        kind: HandlerKind,
        target: &str,
        columns: &[(String, ColumnSpec)],
        removed_keys: &IndexSet<String>,
        custom_hook: &Option<String>,
    ) -> Result<HandlerId> {
        if target.trim().is_empty() {
            return Err(AdmincolsError::InvalidConfiguration(format!(
                "empty target for kind \"{}\"",
                kind
            )));
        }
        if columns.is_empty() {
            return Err(AdmincolsError::InvalidConfiguration(format!(
                "no columns supplied for \"{}\"",
                target
            )));
        }

        let scope = Scope::new(kind.object_type(), target);
        let id = HandlerId::new(kind, scope.clone(), custom_hook.clone());

        if self.handlers.contains_key(&id) {
            // Existing instance: merge the new columns, keep the
            // original binding and removed-key set.
            self.registry.add_columns(&scope, columns.iter().cloned())?;
            return Ok(id);
        }

        // Columns are validated before the instance is cached, so a
        // failed first registration leaves no half-built handler.
        self.registry.add_columns(&scope, columns.iter().cloned())?;
        self.handlers
            .insert(id.clone(), ListTableHandler::new(id.clone(), removed_keys.clone()));
        Ok(id)
    }

    fn report(&self, err: &AdmincolsError) {
        match &self.error_sink {
            Some(sink) => sink(err),
            None => log::warn!("column registration failed: {}", err),
        }
    }
}
