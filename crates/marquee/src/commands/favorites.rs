//! Per-profile favorite sets.
//!
//! Stored as `favorites[profile_id]`, an ordered list treated as a set:
//! toggling removes a present id or appends an absent one, never both.

use super::commit;
use crate::error::Result;
use crate::model::{CatalogItem, User};
use crate::store::backend::StorageBackend;
use crate::store::AppStore;
use tracing::debug;

pub fn is_favorite(user: &User, profile_id: &str, item_id: &str) -> bool {
    user.favorites_of(profile_id).iter().any(|id| id == item_id)
}

/// Flip membership of `item_id` and persist the user. Returns whether the
/// item is a favorite afterwards.
pub fn toggle<B: StorageBackend>(
    store: &AppStore<B>,
    user: &mut User,
    profile_id: &str,
    item_id: &str,
) -> Result<bool> {
    let mut next = user.clone();
    let favorites = next.favorites_entry(profile_id);
    let now_favorite = match favorites.iter().position(|id| id == item_id) {
        Some(idx) => {
            favorites.remove(idx);
            false
        }
        None => {
            favorites.push(item_id.to_string());
            true
        }
    };
    commit(store, user, next)?;

    debug!(profile = profile_id, item = item_id, now_favorite, "toggled favorite");
    Ok(now_favorite)
}

/// The profile's favorites as catalog items, in the order they were added.
/// Ids no longer in the catalog are skipped.
pub fn favorite_items(user: &User, profile_id: &str, catalog: &[CatalogItem]) -> Vec<CatalogItem> {
    user.favorites_of(profile_id)
        .iter()
        .filter_map(|id| catalog.iter().find(|item| &item.id == id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::catalog::demo_catalog;
    use crate::store::mem_backend::MemBackend;

    const PROFILE: &str = "p_kid_1";

    fn setup() -> (AppStore<MemBackend>, User) {
        let store = AppStore::with_backend(MemBackend::new());
        let user = store.create_user("a@b.com", "password1").unwrap();
        (store, user)
    }

    #[test]
    fn missing_entry_means_not_favorite() {
        let (_store, user) = setup();
        assert!(!is_favorite(&user, PROFILE, "hustle-2022"));
    }

    #[test]
    fn toggle_adds_then_removes() {
        let (store, mut user) = setup();

        assert!(toggle(&store, &mut user, PROFILE, "hustle-2022").unwrap());
        assert!(is_favorite(&user, PROFILE, "hustle-2022"));
        let stored = store.find_user("a@b.com").unwrap();
        assert!(is_favorite(&stored, PROFILE, "hustle-2022"));

        assert!(!toggle(&store, &mut user, PROFILE, "hustle-2022").unwrap());
        assert!(!is_favorite(&user, PROFILE, "hustle-2022"));
        let stored = store.find_user("a@b.com").unwrap();
        assert!(!is_favorite(&stored, PROFILE, "hustle-2022"));
    }

    #[test]
    fn double_toggle_restores_original_set() {
        let (store, mut user) = setup();
        toggle(&store, &mut user, PROFILE, "bird-box-2018").unwrap();
        toggle(&store, &mut user, PROFILE, "love-hard-2021").unwrap();

        for item in ["bird-box-2018", "set-it-up-2018"] {
            let before = user.favorites_of(PROFILE).to_vec();
            let was = is_favorite(&user, PROFILE, item);

            toggle(&store, &mut user, PROFILE, item).unwrap();
            toggle(&store, &mut user, PROFILE, item).unwrap();

            assert_eq!(is_favorite(&user, PROFILE, item), was);
            let mut after = user.favorites_of(PROFILE).to_vec();
            let mut before = before;
            after.sort();
            before.sort();
            assert_eq!(after, before);
        }
    }

    #[test]
    fn favorites_are_scoped_per_profile() {
        let (store, mut user) = setup();
        toggle(&store, &mut user, PROFILE, "hustle-2022").unwrap();
        assert!(!is_favorite(&user, "p_mom_2", "hustle-2022"));
    }

    #[test]
    fn favorite_items_follow_insertion_order() {
        let (store, mut user) = setup();
        toggle(&store, &mut user, PROFILE, "love-hard-2021").unwrap();
        toggle(&store, &mut user, PROFILE, "gone-1999").unwrap();
        toggle(&store, &mut user, PROFILE, "bird-box-2018").unwrap();

        let items = favorite_items(&user, PROFILE, &demo_catalog());
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["love-hard-2021", "bird-box-2018"]);
    }
}
