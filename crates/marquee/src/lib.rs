//! # Marquee Architecture
//!
//! Marquee is the **local data layer of a streaming-service front end**:
//! accounts, profiles with optional PINs, per-profile favorites, a seeded
//! title catalog, and the derived state the home screen shows. It does no
//! rendering and no navigation; a UI (browser, terminal, anything else)
//! sits on top and calls into [`api::MarqueeApi`].
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Resolves the current user and profile from the session   │
//! │  - Dispatches to commands, returns records and view structs │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation and domain rules                              │
//! │  - Operates on typed records, commits whole users           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait: FsBackend, MemBackend (testing)    │
//! │  - KvStore: JSON values with fall-back-to-default reads     │
//! │  - AppStore: users, catalog and session repositories        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Storage Scopes
//!
//! Durable storage holds users and the catalog; ephemeral storage holds the
//! session and the selected profile. Logging out clears the ephemeral pair
//! and nothing else, so favorites survive across sessions.
//!
//! ## Reads Never Fail
//!
//! Missing or corrupt stored data reads as the empty default. Writes can
//! fail (a disk can be full) and report it through [`error::MarqueeError`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Auth, profiles, favorites and browse logic
//! - [`store`]: Storage backends and repositories
//! - [`model`]: Persisted records (`User`, `Profile`, `CatalogItem`, ...)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
