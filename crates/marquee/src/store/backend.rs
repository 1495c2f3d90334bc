use crate::error::Result;
use crate::model::Scope;

/// Abstract interface for raw key-value storage.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while [`KvStore`](super::kv::KvStore) handles encoding and the
/// fall-back-to-default policy.
pub trait StorageBackend {
    /// Read the raw string stored under `key`.
    /// Returns Ok(None) if nothing is stored.
    fn read_raw(&self, scope: Scope, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing whatever was there.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_raw(&self, scope: Scope, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, scope: Scope, key: &str) -> Result<()>;

    /// Drop every key in the scope. Used to end an ephemeral session.
    fn clear_scope(&self, scope: Scope) -> Result<()>;

    /// Check if a scope is available (e.g. its root directory can be used).
    fn scope_available(&self, scope: Scope) -> bool;
}
