use super::backend::StorageBackend;
use crate::error::{MarqueeError, Result};
use crate::model::Scope;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This keeps `StorageBackend` on `&self` for every method.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<HashMap<(Scope, String), String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper to plant a raw (possibly corrupt) value, bypassing encoding.
    pub fn put_raw(&self, scope: Scope, key: &str, raw: &str) {
        self.entries
            .borrow_mut()
            .insert((scope, key.to_string()), raw.to_string());
    }

    /// Number of keys stored in a scope.
    pub fn len(&self, scope: Scope) -> usize {
        self.entries
            .borrow()
            .keys()
            .filter(|(s, _)| *s == scope)
            .count()
    }

    pub fn is_empty(&self, scope: Scope) -> bool {
        self.len(scope) == 0
    }
}

impl StorageBackend for MemBackend {
    fn read_raw(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        let entries = self.entries.borrow();
        Ok(entries.get(&(scope, key.to_string())).cloned())
    }

    fn write_raw(&self, scope: Scope, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(MarqueeError::Store("Simulated write error".to_string()));
        }
        self.put_raw(scope, key, value);
        Ok(())
    }

    fn remove(&self, scope: Scope, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(&(scope, key.to_string()));
        Ok(())
    }

    fn clear_scope(&self, scope: Scope) -> Result<()> {
        self.entries.borrow_mut().retain(|(s, _), _| *s != scope);
        Ok(())
    }

    fn scope_available(&self, _scope: Scope) -> bool {
        true
    }
}
