//! # Storage Layer
//!
//! Two scopes of persistent key-value state, mirroring browser storage:
//!
//! - [`Scope::Durable`]: user accounts and the catalog. Survives restarts.
//! - [`Scope::Ephemeral`]: who is logged in and which profile is active.
//!   Cleared when the session ends.
//!
//! ## Layers
//!
//! - [`backend::StorageBackend`]: raw string I/O. [`fs_backend::FsBackend`]
//!   for real use, [`mem_backend::MemBackend`] for tests.
//! - [`kv::KvStore`]: JSON encoding plus the fall-back-to-default read policy.
//! - [`AppStore`]: the repositories. Users ([`users`]), catalog ([`catalog`])
//!   and session ([`session`]) each live in their own `impl` block.
//!
//! ## Write Granularity
//!
//! Every mutation rewrites a whole collection (the full `app_users` array,
//! the full catalog). There is no merge and no optimistic concurrency: two
//! writers doing read-modify-write on the same collection lose one update.
//! The store assumes a single writer.
//!
//! ## Storage Layout
//!
//! For `FsBackend`:
//! ```text
//! <data_dir>/
//! ├── app_users.json            # JSON array of users
//! └── app_catalog.json          # JSON array of catalog items
//! <session_dir>/
//! ├── app_session.json          # { "email": ... }
//! └── app_selectedProfile.json  # { "id": ... }
//! ```

use crate::error::Result;
use crate::model::Scope;
use backend::StorageBackend;
use kv::KvStore;

pub mod backend;
pub mod catalog;
pub mod fs_backend;
pub mod kv;
pub mod mem_backend;
pub mod session;
pub mod users;

pub const USERS_KEY: &str = "app_users";
pub const CATALOG_KEY: &str = "app_catalog";
pub const SESSION_KEY: &str = "app_session";
pub const SELECTED_PROFILE_KEY: &str = "app_selectedProfile";

/// Repository facade over a [`KvStore`].
pub struct AppStore<B: StorageBackend> {
    kv: KvStore<B>,
}

impl<B: StorageBackend> AppStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            kv: KvStore::with_backend(backend),
        }
    }

    pub fn kv(&self) -> &KvStore<B> {
        &self.kv
    }

    pub fn backend(&self) -> &B {
        self.kv.backend()
    }

    /// End the ephemeral session entirely, as closing the browser tab would.
    pub fn end_browser_session(&self) -> Result<()> {
        self.kv.backend.clear_scope(Scope::Ephemeral)
    }
}
