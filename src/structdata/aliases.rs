//! # Type Aliases
//!
//! Users can name their own column types. An alias maps a name to a base type
//! and may add a prefix, a postfix and an enum constraint:
//!
//! | name | type | prefix | postfix | enum |
//! |------|------|--------|---------|------|
//! | `state` | | | | `open, closed` |
//! | `user` | `page` | `people:` | | |
//!
//! With these, the column `assignee_user` links to `people:<value>` and
//! `status_state` only accepts `open` or `closed`.
//!
//! The table is read from the [`BackingStore`] the first time it is needed and
//! then kept for the lifetime of the registry. A store that cannot be read
//! yields an empty table: callers see "no aliases known", never an error.

use crate::model::{AliasType, BaseType};
use crate::store::{AliasRow, BackingStore};
use once_cell::sync::OnceCell;
use std::collections::HashMap;

/// Lookup table from lower-cased alias name to its definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, AliasType>,
}

impl AliasTable {
    /// Build a table from raw store rows.
    ///
    /// Values are trimmed and empty strings dropped; a row without a type
    /// aliases the plain text type.
    pub fn from_rows(rows: Vec<AliasRow>) -> Self {
        let entries = rows
            .into_iter()
            .filter_map(|row| {
                let name = row.name.trim().to_lowercase();
                if name.is_empty() {
                    return None;
                }
                let alias = AliasType {
                    base: BaseType::from_tag(&row.base_type.trim().to_lowercase()),
                    enumeration: non_empty(row.enumeration),
                    prefix: non_empty(row.prefix),
                    postfix: non_empty(row.postfix),
                    name: name.clone(),
                };
                Some((name, alias))
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&AliasType> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Lazily loaded, immutable-after-load alias table.
#[derive(Debug, Default)]
pub struct AliasRegistry {
    table: OnceCell<AliasTable>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that never consults a store.
    pub fn preloaded(table: AliasTable) -> Self {
        Self {
            table: OnceCell::with_value(table),
        }
    }

    /// The alias table, loading it from `store` on first use.
    pub fn table<S: BackingStore + ?Sized>(&self, store: &S) -> &AliasTable {
        self.table.get_or_init(|| match store.alias_rows() {
            Ok(rows) => {
                let table = AliasTable::from_rows(rows);
                log::debug!("loaded {} type alias(es)", table.len());
                table
            }
            Err(e) => {
                log::debug!("alias table unavailable, continuing without aliases: {}", e);
                AliasTable::default()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn sample_store() -> InMemoryStore {
        InMemoryStore::with_aliases(vec![
            AliasRow::new("State", " ").with_enum("open, closed"),
            AliasRow::new("user", "page")
                .with_prefix(" people: ")
                .with_postfix(""),
            AliasRow::new("  ", "page"),
        ])
    }

    #[test]
    fn rows_are_trimmed_and_lowercased() {
        let registry = AliasRegistry::new();
        let store = sample_store();
        let table = registry.table(&store);

        assert_eq!(table.len(), 2);
        let state = table.get("state").unwrap();
        assert_eq!(state.base, BaseType::Other(String::new()));
        assert_eq!(state.enumeration.as_deref(), Some("open, closed"));

        let user = table.get("user").unwrap();
        assert_eq!(user.base, BaseType::Page);
        assert_eq!(user.prefix.as_deref(), Some("people:"));
        assert!(user.postfix.is_none());
    }

    #[test]
    fn table_is_loaded_once() {
        let registry = AliasRegistry::new();
        let store = sample_store();
        registry.table(&store);
        registry.table(&store);
        assert_eq!(store.alias_reads(), 1);
    }

    #[test]
    fn failing_store_yields_empty_table() {
        let registry = AliasRegistry::new();
        let store = sample_store();
        store.set_simulate_read_error(true);
        assert!(registry.table(&store).is_empty());
    }

    #[test]
    fn preloaded_registry_skips_store() {
        let table = AliasTable::from_rows(vec![AliasRow::new("x", "url")]);
        let registry = AliasRegistry::preloaded(table);
        let store = InMemoryStore::new();
        assert_eq!(registry.table(&store).get("x").unwrap().base, BaseType::Url);
        assert_eq!(store.alias_reads(), 0);
    }
}
