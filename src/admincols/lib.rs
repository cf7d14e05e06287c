//! # Admincols Architecture
//!
//! Admincols is a **registration library**: a host CMS declares extra
//! display columns for its admin list tables (content items, users,
//! taxonomy terms, comments, media) and this crate wires them, instead
//! of every embedder re-implementing the same column plumbing by hand.
//!
//! There is deliberately no platform code here. The host stays behind
//! two small traits, and everything the host would call back into is a
//! plain method on the facade.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Facade Layer (api.rs)                                      │
//! │  - Registration surface and handler instance cache          │
//! │  - One handler per (kind, type, subtype, hook) identity     │
//! │  - Per-target error degradation via the error sink          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Handler Layer (handlers/*.rs)                              │
//! │  - Kind-specific value channels and sort-field mapping      │
//! │  - Cell rendering, sort redirection; fail-open reads        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Registry Layer (registry.rs, anchorage)                    │
//! │  - Per-scope ordered column definitions                     │
//! │  - Anchored insertion, removal, permission gating           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host Contracts (host/)                                     │
//! │  - AdminHost: attached-value reads, capability check        │
//! │  - SortQuery: get/set on the host's list query              │
//! │  - MemoryHost/MemoryQuery for tests                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//!
//! The host environment is one request per thread with nothing shared
//! across requests: build one [`api::Admincols`] per request at admin
//! bootstrap, register columns (code and/or a
//! [`layout::ColumnLayout`] file), then let the host drive the read
//! surface for the rest of the request. Nothing persists and nothing is
//! torn down.
//!
//! ## Error Policy
//!
//! Registration-time problems (bad key, empty configuration, unknown
//! kind name) are real errors, raised synchronously and routed per
//! target through the error sink so one bad target never blocks its
//! siblings. Read-time operations never fail: unknown handlers and
//! columns leave their input untouched, so a stale registration renders
//! the listing page without the column instead of breaking it.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade - registration surface and host-facing reads
//! - [`handlers`]: Handler identity and the per-kind table bindings
//! - [`registry`]: Per-scope ordered column definitions
//! - [`model`]: Core data types (`ColumnSpec`, `Scope`, callbacks)
//! - [`host`]: Host collaborator contracts and the in-memory test host
//! - [`layout`]: JSON-backed declarative column layouts
//! - [`error`]: Error types
//!
//! Anchored ordered-map insertion lives in the `anchorage` crate under
//! `src/anchorage`, published separately; it knows nothing about
//! columns.

pub mod api;
pub mod error;
pub mod handlers;
pub mod host;
pub mod layout;
pub mod model;
pub mod registry;
