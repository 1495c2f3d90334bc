//! Session manager: who is logged in and which profile they picked.
//! Both live in ephemeral storage and are cleared together on logout.

use super::backend::StorageBackend;
use super::{AppStore, SELECTED_PROFILE_KEY, SESSION_KEY};
use crate::error::Result;
use crate::model::{Scope, SelectedProfile, Session, User};
use tracing::debug;

impl<B: StorageBackend> AppStore<B> {
    pub fn login(&self, email: &str) -> Result<()> {
        let session = Session {
            email: email.to_string(),
        };
        self.kv.write(Scope::Ephemeral, SESSION_KEY, &session)
    }

    pub fn current_session(&self) -> Option<Session> {
        self.kv.read(Scope::Ephemeral, SESSION_KEY, None)
    }

    /// The logged-in user, if the session names one that still exists.
    pub fn current_user(&self) -> Option<User> {
        let session = self.current_session()?;
        self.find_user(&session.email)
    }

    pub fn select_profile(&self, profile_id: &str) -> Result<()> {
        let selected = SelectedProfile {
            id: profile_id.to_string(),
        };
        self.kv.write(Scope::Ephemeral, SELECTED_PROFILE_KEY, &selected)
    }

    pub fn current_profile_id(&self) -> Option<String> {
        self.kv
            .read::<Option<SelectedProfile>>(Scope::Ephemeral, SELECTED_PROFILE_KEY, None)
            .map(|selected| selected.id)
    }

    pub fn clear_selected_profile(&self) -> Result<()> {
        self.kv.remove(Scope::Ephemeral, SELECTED_PROFILE_KEY)
    }

    /// Clear session and selected profile. The profile entry is removed
    /// first so a failed second removal never leaves a selection without a
    /// session.
    pub fn logout(&self) -> Result<()> {
        self.kv.remove(Scope::Ephemeral, SELECTED_PROFILE_KEY)?;
        self.kv.remove(Scope::Ephemeral, SESSION_KEY)?;
        debug!("cleared session");
        Ok(())
    }
}
