//! Registration and login.
//!
//! Passwords are stored and compared as plain text; this is a local demo
//! account system, not an authentication service.

use crate::error::{MarqueeError, Result};
use crate::model::User;
use crate::store::backend::StorageBackend;
use crate::store::AppStore;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Full address check used at login.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Create an account and log it in.
///
/// Checks run in order and the first failure is returned: all fields
/// present, email contains `@`, password length, confirmation match,
/// email not already registered.
pub fn register<B: StorageBackend>(
    store: &AppStore<B>,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<User> {
    let email = email.trim();

    if email.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(MarqueeError::FieldsRequired);
    }
    if !email.contains('@') {
        return Err(MarqueeError::InvalidEmailFormat);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(MarqueeError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        });
    }
    if password != confirm {
        return Err(MarqueeError::PasswordMismatch);
    }

    let user = store.create_user(email, password)?;
    store.login(&user.email)?;
    info!(email = %user.email, "registered user");
    Ok(user)
}

/// Check credentials and start a session.
///
/// An unknown email and a wrong password both fail with
/// [`MarqueeError::InvalidCredentials`].
pub fn login<B: StorageBackend>(store: &AppStore<B>, email: &str, password: &str) -> Result<User> {
    let email = email.trim();

    if email.is_empty() || password.is_empty() {
        return Err(MarqueeError::FieldsRequired);
    }
    if !is_valid_email(email) {
        return Err(MarqueeError::InvalidEmailFormat);
    }

    let user = store
        .find_user(email)
        .filter(|u| u.password == password)
        .ok_or(MarqueeError::InvalidCredentials)?;

    store.login(&user.email)?;
    info!(email = %user.email, "logged in");
    Ok(user)
}

pub fn logout<B: StorageBackend>(store: &AppStore<B>) -> Result<()> {
    store.logout()?;
    info!("logged out");
    Ok(())
}

/// Whether the logged-in user still has to pick (or create) a profile:
/// true when they have none or none is selected.
pub fn needs_profile_selection<B: StorageBackend>(store: &AppStore<B>) -> bool {
    match store.current_user() {
        Some(user) => user.profiles.is_empty() || store.current_profile_id().is_none(),
        None => true,
    }
}
