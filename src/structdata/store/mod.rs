//! # Backing Store
//!
//! The store that actually holds rows and runs queries lives outside this
//! crate. The core only needs two things from it:
//!
//! - the rows of the alias table, to build the [`crate::aliases::AliasRegistry`]
//! - a quoting function, so filter values can be embedded in query text
//!
//! Executing predicates, sorting and paging are the host's business.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: alias rows held in memory, SQL-style quoting.
//!   Used by the CLI (rows read from a JSON file) and by tests.

use crate::error::Result;
use serde::{Deserialize, Serialize};

pub mod memory;

/// One row of the alias table as stored.
///
/// All fields are raw; the registry trims them and treats empty strings as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRow {
    pub name: String,
    #[serde(rename = "type", default)]
    pub base_type: String,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub postfix: Option<String>,
    #[serde(rename = "enum", default)]
    pub enumeration: Option<String>,
}

impl AliasRow {
    pub fn new(name: impl Into<String>, base_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: base_type.into(),
            ..Default::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = Some(postfix.into());
        self
    }

    pub fn with_enum(mut self, values: impl Into<String>) -> Self {
        self.enumeration = Some(values.into());
        self
    }
}

/// Abstract interface to the store the predicates are executed against.
pub trait BackingStore {
    /// Read every row of the alias table.
    fn alias_rows(&self) -> Result<Vec<AliasRow>>;

    /// Quote a value so it can be embedded as a literal in query text.
    fn quote_literal(&self, value: &str) -> String;
}
