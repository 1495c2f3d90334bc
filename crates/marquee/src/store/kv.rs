//! Key-value persistence adapter.
//!
//! Values are JSON-encoded strings. Reads never fail: a missing, empty,
//! unreadable or undecodable entry yields the caller's default so that
//! corrupt or foreign data can never block startup. Writes are whole-value
//! replacements (last write wins) and do report backend failures.

use super::backend::StorageBackend;
use crate::error::{MarqueeError, Result};
use crate::model::{decode_list, Scope};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

pub struct KvStore<B: StorageBackend> {
    pub(crate) backend: B,
}

impl<B: StorageBackend> KvStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Decode the value under `key`, or return `default`.
    pub fn read<T: DeserializeOwned>(&self, scope: Scope, key: &str, default: T) -> T {
        let Some(raw) = self.read_present(scope, key) else {
            return default;
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(%scope, key, error = %e, "stored value is not valid for its type, using default");
                default
            }
        }
    }

    /// Decode a JSON array under `key`, skipping elements that do not decode
    /// as `T`. Anything that is not an array reads as empty.
    pub fn read_list<T: DeserializeOwned>(&self, scope: Scope, key: &str) -> Vec<T> {
        let Some(value) = self.read_value(scope, key) else {
            return Vec::new();
        };

        let total = value.as_array().map(Vec::len);
        let items: Vec<T> = decode_list(value);
        match total {
            Some(total) if total != items.len() => {
                warn!(%scope, key, dropped = total - items.len(), "skipped malformed list entries");
            }
            None => warn!(%scope, key, "stored value is not a list, using empty list"),
            _ => {}
        }
        items
    }

    /// The stored JSON under `key` without decoding it into a record type.
    /// `None` when absent, empty, unreadable or not JSON.
    pub fn read_value(&self, scope: Scope, key: &str) -> Option<Value> {
        let raw = self.read_present(scope, key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%scope, key, error = %e, "stored value is not valid JSON, ignoring it");
                None
            }
        }
    }

    /// Encode `value` and store it under `key`.
    pub fn write<T: Serialize + ?Sized>(&self, scope: Scope, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(MarqueeError::Serialization)?;
        self.backend.write_raw(scope, key, &raw)?;
        debug!(%scope, key, bytes = raw.len(), "stored value");
        Ok(())
    }

    pub fn remove(&self, scope: Scope, key: &str) -> Result<()> {
        self.backend.remove(scope, key)
    }

    /// Raw string under `key`, treating empty strings and read failures as absent.
    fn read_present(&self, scope: Scope, key: &str) -> Option<String> {
        if !self.backend.scope_available(scope) {
            warn!(%scope, key, "storage scope unavailable, using default");
            return None;
        }

        match self.backend.read_raw(scope, key) {
            Ok(Some(raw)) if !raw.is_empty() => Some(raw),
            Ok(_) => None,
            Err(e) => {
                warn!(%scope, key, error = %e, "failed to read stored value, using default");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Session;
    use crate::store::mem_backend::MemBackend;

    fn kv() -> KvStore<MemBackend> {
        KvStore::with_backend(MemBackend::new())
    }

    #[test]
    fn missing_key_returns_default() {
        let kv = kv();
        let value: Vec<String> = kv.read(Scope::Durable, "nothing", vec!["d".to_string()]);
        assert_eq!(value, vec!["d".to_string()]);
    }

    #[test]
    fn corrupt_json_returns_default() {
        let kv = kv();
        kv.backend().put_raw(Scope::Ephemeral, "app_session", "{not json");
        let session: Option<Session> = kv.read(Scope::Ephemeral, "app_session", None);
        assert_eq!(session, None);
    }

    #[test]
    fn wrong_shape_returns_default() {
        let kv = kv();
        kv.backend().put_raw(Scope::Ephemeral, "app_session", "[1,2,3]");
        let session: Option<Session> = kv.read(Scope::Ephemeral, "app_session", None);
        assert_eq!(session, None);
    }

    #[test]
    fn empty_string_is_treated_as_absent() {
        let kv = kv();
        kv.backend().put_raw(Scope::Durable, "k", "");
        assert_eq!(kv.read(Scope::Durable, "k", 7u32), 7);
    }

    #[test]
    fn write_then_read_returns_value() {
        let kv = kv();
        let session = Session {
            email: "a@b.com".into(),
        };
        kv.write(Scope::Ephemeral, "app_session", &session).unwrap();
        let read: Option<Session> = kv.read(Scope::Ephemeral, "app_session", None);
        assert_eq!(read, Some(session));
    }

    #[test]
    fn write_is_last_write_wins() {
        let kv = kv();
        kv.write(Scope::Durable, "k", &vec![1, 2]).unwrap();
        kv.write(Scope::Durable, "k", &vec![3]).unwrap();
        assert_eq!(kv.read::<Vec<i32>>(Scope::Durable, "k", vec![]), vec![3]);
    }

    #[test]
    fn read_list_skips_malformed_entries() {
        let kv = kv();
        kv.backend().put_raw(
            Scope::Ephemeral,
            "list",
            r#"[{"email":"a@b.com"},{"mail":"x"},"junk"]"#,
        );
        let sessions: Vec<Session> = kv.read_list(Scope::Ephemeral, "list");
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].email, "a@b.com");
    }

    #[test]
    fn read_list_of_non_array_is_empty() {
        let kv = kv();
        kv.backend().put_raw(Scope::Durable, "list", r#"{"a":1}"#);
        assert!(kv.read_list::<Session>(Scope::Durable, "list").is_empty());
    }

    #[test]
    fn read_value_keeps_entries_no_record_type_accepts() {
        let kv = kv();
        kv.backend()
            .put_raw(Scope::Durable, "list", r#"[{"mail":"x"},"junk"]"#);

        let value = kv.read_value(Scope::Durable, "list").unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert!(kv.read_list::<Session>(Scope::Durable, "list").is_empty());
    }

    #[test]
    fn read_value_of_corrupt_json_is_none() {
        let kv = kv();
        kv.backend().put_raw(Scope::Durable, "list", "[{");
        assert!(kv.read_value(Scope::Durable, "list").is_none());
        assert!(kv.read_value(Scope::Durable, "missing").is_none());
    }

    #[test]
    fn write_failure_is_reported() {
        let kv = kv();
        kv.backend().set_simulate_write_error(true);
        assert!(kv.write(Scope::Durable, "k", &1).is_err());
    }
}
