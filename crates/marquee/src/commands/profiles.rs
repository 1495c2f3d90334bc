//! Profile management.
//!
//! A user owns between one and [`MAX_PROFILES`] profiles. Names are trimmed,
//! 2 to 20 characters long and unique within the user ignoring case. An
//! optional PIN of exactly four ASCII digits gates selection.
//!
//! Profile ids are `p_<slug>_<millis>` and never change after creation.

use super::commit;
use crate::error::{MarqueeError, Result};
use crate::model::{make_profile_id, Profile, User};
use crate::store::backend::StorageBackend;
use crate::store::AppStore;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

pub const MAX_PROFILES: usize = 5;
pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 20;

static PIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("pin pattern is valid"));

pub fn is_valid_pin(pin: &str) -> bool {
    PIN_RE.is_match(pin)
}

/// Validate a name against the user's profiles, skipping `except_id` (the
/// profile being renamed). Returns the trimmed name.
pub fn validate_name(user: &User, name: &str, except_id: Option<&str>) -> Result<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(MarqueeError::NameRequired);
    }
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(MarqueeError::NameLength {
            min: NAME_MIN,
            max: NAME_MAX,
        });
    }

    let lowered = name.to_lowercase();
    let taken = user
        .profiles
        .iter()
        .any(|p| Some(p.id.as_str()) != except_id && p.name.to_lowercase() == lowered);
    if taken {
        return Err(MarqueeError::NameTaken);
    }

    Ok(name.to_string())
}

/// Normalize a PIN field: blank means no PIN, anything else must be 4 digits.
pub fn validate_pin(pin: Option<&str>) -> Result<Option<String>> {
    match pin.map(str::trim) {
        None | Some("") => Ok(None),
        Some(pin) if is_valid_pin(pin) => Ok(Some(pin.to_string())),
        Some(_) => Err(MarqueeError::InvalidPin),
    }
}

pub fn create<B: StorageBackend>(
    store: &AppStore<B>,
    user: &mut User,
    name: &str,
    pin: Option<&str>,
) -> Result<Profile> {
    create_at(store, user, name, pin, Utc::now())
}

pub(crate) fn create_at<B: StorageBackend>(
    store: &AppStore<B>,
    user: &mut User,
    name: &str,
    pin: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Profile> {
    if user.profiles.len() >= MAX_PROFILES {
        return Err(MarqueeError::ProfileLimitExceeded { max: MAX_PROFILES });
    }
    let name = validate_name(user, name, None)?;
    let pin = validate_pin(pin)?;

    // Names that slug the same ("Kid", "kid!") created within one
    // millisecond would collide.
    let mut millis = now.timestamp_millis();
    while user.profile(&make_profile_id(&name, millis)).is_some() {
        millis += 1;
    }
    let profile = Profile::new(name, pin, millis);

    let mut next = user.clone();
    next.profiles.push(profile.clone());
    next.favorites.insert(profile.id.clone(), Vec::new());
    commit(store, user, next)?;

    debug!(profile = %profile.id, email = %user.email, "created profile");
    Ok(profile)
}

pub fn rename<B: StorageBackend>(
    store: &AppStore<B>,
    user: &mut User,
    profile_id: &str,
    new_name: &str,
) -> Result<()> {
    let name = validate_name(user, new_name, Some(profile_id))?;

    let mut next = user.clone();
    let Some(profile) = next.profile_mut(profile_id) else {
        warn!(profile = profile_id, email = %user.email, "rename of unknown profile");
        return Err(MarqueeError::ProfileNotFound(profile_id.to_string()));
    };
    profile.name = name;
    commit(store, user, next)?;

    debug!(profile = profile_id, "renamed profile");
    Ok(())
}

/// Remove a profile and its favorites. The last profile cannot be removed.
/// An id that matches no profile changes nothing.
pub fn delete<B: StorageBackend>(
    store: &AppStore<B>,
    user: &mut User,
    profile_id: &str,
) -> Result<()> {
    if user.profiles.len() <= 1 {
        return Err(MarqueeError::LastProfileProtected);
    }

    let mut next = user.clone();
    next.profiles.retain(|p| p.id != profile_id);
    let had_favorites = next.favorites.remove(profile_id).is_some();

    if next.profiles.len() == user.profiles.len() && !had_favorites {
        return Ok(());
    }
    commit(store, user, next)?;

    debug!(profile = profile_id, "deleted profile");
    Ok(())
}

/// True only if `entered` is four digits and equals the profile's PIN.
pub fn verify_pin(profile: &Profile, entered: &str) -> bool {
    is_valid_pin(entered) && profile.pin.as_deref() == Some(entered)
}

/// Check the PIN entered to unlock a profile. Profiles without a PIN always
/// pass.
pub fn check_pin(profile: &Profile, entered: Option<&str>) -> Result<()> {
    if !profile.has_pin() {
        return Ok(());
    }

    let entered = entered.map(str::trim).unwrap_or_default();
    if !is_valid_pin(entered) {
        return Err(MarqueeError::InvalidPin);
    }
    if !verify_pin(profile, entered) {
        return Err(MarqueeError::IncorrectPin);
    }
    Ok(())
}
