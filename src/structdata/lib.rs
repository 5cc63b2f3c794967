//! # Structdata Architecture
//!
//! Structdata gives free-text wiki data a typed surface: column names carry a
//! type, filter lines become predicates for a query engine, and stored values
//! are formatted per type for display. It is a library that happens to have a
//! CLI client, and it never talks to a database or a renderer directly.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, cli/)                         │
//! │  - Parses arguments, prints JSON/HTML, owns stdout/stderr   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - DataApi<S>: owns the store, alias cache, translations    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (column, clean, filter, placeholders, format)         │
//! │  - Pure functions over model types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collaborators (store, render, locale, context, ids)        │
//! │  - Traits implemented by the host application               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Textual Surfaces
//!
//! Two grammars are bit-exact and must stay compatible:
//!
//! - **Column tokens**: `key[_type][s]`, see [`column`].
//! - **Filter lines**: `key<comparator>value`, see [`filter`].
//!
//! ## Failure Model
//!
//! Values that do not validate are not errors: [`clean`] returns an empty
//! string and callers drop the value. Only filter lines produce a reportable
//! [`error::FilterError`], and a bad line never stops its siblings.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade wiring everything together
//! - [`model`]: Column types, descriptors, comparators and predicates
//! - [`aliases`]: Lazily loaded type alias table
//! - [`column`]: Column token parser
//! - [`clean`]: Per-type input validation
//! - [`filter`]: Filter line parser and tag filter links
//! - [`placeholders`]: `%user%`, `%now%` and friends
//! - [`format`]: Per-type display formatting
//! - [`store`], [`render`], [`locale`], [`context`], [`ids`]: Collaborator traits
//! - [`config`]: Configuration
//! - [`error`]: Error types

pub mod aliases;
pub mod api;
pub mod clean;
pub mod column;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod format;
pub mod ids;
pub mod locale;
pub mod model;
pub mod placeholders;
pub mod render;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
