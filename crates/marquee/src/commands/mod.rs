//! # Command Layer
//!
//! Domain rules on top of the [`AppStore`](crate::store::AppStore)
//! repositories. Each area lives in its own submodule as plain functions
//! over typed records.
//!
//! ## Role and Responsibilities
//!
//! - Validate input and report the first failure as a [`MarqueeError`](crate::error::MarqueeError)
//! - Mutate a [`User`](crate::model::User) and commit it back as a whole record
//! - Derive what a screen shows from the catalog and the user's favorites
//!
//! ## What Commands Do NOT Do
//!
//! - Rendering, routing, prompts: the UI decides what to do with results
//! - Resolving "who is logged in": that is the API layer's job
//!
//! ## Commit Discipline
//!
//! Mutating commands take `&mut User`, apply the change to a copy, persist
//! the copy and only then write it back into the caller's value. A failed
//! write leaves the caller's user exactly as it was.
//!
//! ## Testing Strategy
//!
//! Command tests use `MemBackend` and cover every validation branch. This is
//! where most of the testing lives.
//!
//! ## Command Modules
//!
//! - [`auth`]: Registration and login
//! - [`profiles`]: Create, rename, delete profiles and check PINs
//! - [`favorites`]: Per-profile favorite sets
//! - [`browse`]: Search filtering, category rows and the home view

use crate::error::Result;
use crate::model::User;
use crate::store::backend::StorageBackend;
use crate::store::AppStore;

pub mod auth;
pub mod browse;
pub mod favorites;
pub mod profiles;

/// Persist `next` and, once stored, make it the caller's `user`.
pub(crate) fn commit<B: StorageBackend>(
    store: &AppStore<B>,
    user: &mut User,
    next: User,
) -> Result<()> {
    store.update_user(&next)?;
    *user = next;
    Ok(())
}
