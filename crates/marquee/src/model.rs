//! # Data Model
//!
//! Records as they are persisted. Field names and shapes match the JSON the
//! browser front end writes, so a store produced by either side reads on the
//! other.
//!
//! Stored data is not trusted to have the right shape. Instead of checking
//! `profiles` and `favorites` at every call site, the container fields decode
//! leniently: a value of the wrong type becomes an empty collection and a
//! malformed element is dropped. Profile and catalog fields are lenient as
//! well (a numeric PIN reads as its digits, missing item metadata reads as
//! empty), so only records without an identity are dropped. Once a [`User`]
//! exists in memory its collections are well-formed.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Category used for items whose metadata carries none.
pub const DEFAULT_CATEGORY: &str = "More";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Survives restarts (browser `localStorage`).
    Durable,
    /// Cleared when the session ends (browser `sessionStorage`).
    Ephemeral,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Durable => write!(f, "durable"),
            Scope::Ephemeral => write!(f, "ephemeral"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub password: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub profiles: Vec<Profile>,
    /// Profile id -> favorited item ids, in the order they were added.
    #[serde(default, deserialize_with = "lenient_favorites")]
    pub favorites: BTreeMap<String, Vec<String>>,
}

impl User {
    pub fn new(email: String, password: String) -> Self {
        Self {
            email,
            password,
            profiles: Vec::new(),
            favorites: BTreeMap::new(),
        }
    }

    /// Case-insensitive email comparison, the identity rule for users.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }

    pub fn profile(&self, profile_id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == profile_id)
    }

    pub fn profile_mut(&mut self, profile_id: &str) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|p| p.id == profile_id)
    }

    /// Favorites of a profile. A profile without an entry has none.
    pub fn favorites_of(&self, profile_id: &str) -> &[String] {
        self.favorites
            .get(profile_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn favorites_entry(&mut self, profile_id: &str) -> &mut Vec<String> {
        self.favorites.entry(profile_id.to_string()).or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_pin",
        skip_serializing_if = "Option::is_none"
    )]
    pub pin: Option<String>,
}

impl Profile {
    /// A profile whose id is derived from `name` and `created_millis`.
    /// Validation and id uniqueness are the caller's job
    /// (see `commands::profiles::create`).
    pub(crate) fn new(name: String, pin: Option<String>, created_millis: i64) -> Self {
        Self {
            id: make_profile_id(&name, created_millis),
            name,
            pin,
        }
    }

    pub fn has_pin(&self) -> bool {
        self.pin.is_some()
    }

    /// Avatar letter: first character of the trimmed name, uppercased.
    pub fn initial(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// `p_<slug>_<millis>`.
pub fn make_profile_id(name: &str, millis: i64) -> String {
    format!("p_{}_{}", slugify(name), millis)
}

/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single hyphen and strips hyphens from both ends.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.trim().to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub metadata: ItemMetadata,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default)]
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CatalogItem {
    /// Grouping key: the category, or [`DEFAULT_CATEGORY`] when missing or empty.
    pub fn category(&self) -> &str {
        match self.metadata.category.as_deref() {
            Some(cat) if !cat.is_empty() => cat,
            _ => DEFAULT_CATEGORY,
        }
    }

    /// `"<category> • <year>"`, the line shown above titles in the hero and modal.
    pub fn meta_line(&self) -> String {
        format!(
            "{} • {}",
            self.metadata.category.as_deref().unwrap_or_default(),
            self.metadata.year
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedProfile {
    pub id: String,
}

/// Decodes an array, dropping elements that do not fit `T`. Anything other
/// than an array becomes empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decode_list(value))
}

fn lenient_favorites<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };

    Ok(map
        .into_iter()
        .map(|(profile_id, ids)| {
            let ids: Vec<String> = match ids {
                Value::Array(items) => items
                    .into_iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            };
            (profile_id, ids)
        })
        .collect())
}

/// Strings as-is, numbers and booleans as their JSON text. Anything else is
/// rejected so that the enclosing record is treated as malformed.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string, found {other}"
        ))),
    }
}

/// A numeric PIN keeps its digits so the profile stays locked. Null, empty
/// strings and other shapes mean "no PIN".
fn lenient_pin<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub(crate) fn decode_list<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}
