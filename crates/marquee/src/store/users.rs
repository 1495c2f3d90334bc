//! User repository: the `app_users` collection in durable storage.
//!
//! Reads decode leniently and skip records that do not fit [`User`]. Writes
//! work on the stored JSON array instead of the decoded list: the record being
//! created or replaced is serialized into its slot and every other element is
//! written back exactly as it was read.

use super::backend::StorageBackend;
use super::{AppStore, USERS_KEY};
use crate::error::{MarqueeError, Result};
use crate::model::{Scope, User};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

impl<B: StorageBackend> AppStore<B> {
    pub fn list_users(&self) -> Vec<User> {
        self.kv.read_list(Scope::Durable, USERS_KEY)
    }

    /// The stored collection as raw JSON. Not a list (or not JSON) reads as empty.
    fn raw_users(&self) -> Vec<Value> {
        match self.kv.read_value(Scope::Durable, USERS_KEY) {
            Some(Value::Array(records)) => records,
            _ => Vec::new(),
        }
    }

    fn save_raw_users(&self, records: &[Value]) -> Result<()> {
        self.kv.write(Scope::Durable, USERS_KEY, records)
    }

    pub fn find_user(&self, email: &str) -> Option<User> {
        self.list_users().into_iter().find(|u| u.has_email(email))
    }

    /// Append a new user with no profiles. Emails are unique ignoring case,
    /// including among stored records that do not otherwise decode.
    pub fn create_user(&self, email: &str, password: &str) -> Result<User> {
        let mut records = self.raw_users();
        let lowered = email.to_lowercase();
        if records
            .iter()
            .filter_map(stored_email)
            .any(|stored| stored.to_lowercase() == lowered)
        {
            return Err(MarqueeError::DuplicateEmail);
        }

        let user = User::new(email.to_string(), password.to_string());
        records.push(serde_json::to_value(&user)?);
        self.save_raw_users(&records)?;
        debug!(email, "created user");
        Ok(user)
    }

    /// Replace the stored record with the same email. An unknown email is
    /// ignored: callers only update users they obtained from `find_user`.
    pub fn update_user(&self, user: &User) -> Result<()> {
        let mut records = self.raw_users();
        let slot = records.iter().position(|record| {
            User::deserialize(record).is_ok_and(|stored| stored.has_email(&user.email))
        });
        let Some(slot) = slot else {
            warn!(email = %user.email, "update for unknown user ignored");
            return Ok(());
        };

        records[slot] = serde_json::to_value(user)?;
        self.save_raw_users(&records)
    }
}

fn stored_email(record: &Value) -> Option<&str> {
    record.get("email").and_then(Value::as_str)
}
