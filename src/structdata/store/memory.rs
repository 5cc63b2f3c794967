use super::{AliasRow, BackingStore};
use crate::error::{DataError, Result};
use std::cell::RefCell;
use std::path::Path;

/// In-memory backing store.
///
/// Uses `RefCell` for interior mutability since structdata is
/// single-threaded. Counts alias table reads so tests can check caching.
#[derive(Default)]
pub struct InMemoryStore {
    aliases: Vec<AliasRow>,
    alias_reads: RefCell<usize>,
    simulate_read_error: RefCell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aliases(aliases: Vec<AliasRow>) -> Self {
        Self {
            aliases,
            ..Default::default()
        }
    }

    /// Load alias rows from a JSON array file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let aliases: Vec<AliasRow> = serde_json::from_str(&content)?;
        Ok(Self::with_aliases(aliases))
    }

    /// Make `alias_rows` fail, to exercise the degraded path.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// Number of times the alias table was read.
    pub fn alias_reads(&self) -> usize {
        *self.alias_reads.borrow()
    }
}

impl BackingStore for InMemoryStore {
    fn alias_rows(&self) -> Result<Vec<AliasRow>> {
        *self.alias_reads.borrow_mut() += 1;
        if *self.simulate_read_error.borrow() {
            return Err(DataError::Store("Simulated read error".to_string()));
        }
        Ok(self.aliases.clone())
    }

    fn quote_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }
}
