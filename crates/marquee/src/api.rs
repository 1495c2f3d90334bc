//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for a UI. It answers "who is logged in and which profile is
//! active" from the session, then dispatches to the commands.
//!
//! ## Role and Responsibilities
//!
//! - **Resolves context**: current user and current profile from ephemeral storage
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types**: records and view structs, never strings to print
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Navigation**: A UI decides where to go; [`MarqueeApi::needs_profile_selection`]
//!   and the error kinds give it what it needs
//!
//! ## Generic Over StorageBackend
//!
//! `MarqueeApi<B: StorageBackend>`:
//! - Production: `MarqueeApi<FsBackend>` via [`MarqueeApi::open`]
//! - Testing: `MarqueeApi<MemBackend>`
//!
//! ## Testing Strategy
//!
//! API tests verify context resolution (not logged in, no profile selected,
//! stale selection) and that calls land on the right command. Validation
//! rules are tested in the command modules.

use crate::commands::{auth, browse, favorites, profiles};
use crate::config::MarqueeConfig;
use crate::error::{MarqueeError, Result};
use crate::model::{CatalogItem, Profile, User};
use crate::store::backend::StorageBackend;
use crate::store::fs_backend::FsBackend;
use crate::store::AppStore;
use tracing::{debug, warn};

pub use crate::commands::browse::{CategoryRow, HomeRow, HomeView, TitleCard};

/// The main API facade.
///
/// Generic over `StorageBackend` to allow different storage backends.
pub struct MarqueeApi<B: StorageBackend> {
    store: AppStore<B>,
}

impl MarqueeApi<FsBackend> {
    /// Open the filesystem store described by `config`.
    pub fn open(config: &MarqueeConfig) -> Result<Self> {
        let paths = config.resolve_paths()?;
        debug!(durable = %paths.durable.display(), ephemeral = %paths.ephemeral.display(), "opening store");

        let api = Self::with_backend(FsBackend::new(paths.durable, paths.ephemeral));
        if config.seed_catalog {
            api.store.seed_catalog_if_empty()?;
        }
        Ok(api)
    }
}

impl<B: StorageBackend> MarqueeApi<B> {
    pub fn new(store: AppStore<B>) -> Self {
        Self { store }
    }

    pub fn with_backend(backend: B) -> Self {
        Self::new(AppStore::with_backend(backend))
    }

    pub fn store(&self) -> &AppStore<B> {
        &self.store
    }

    // --- Account ---

    pub fn register(&self, email: &str, password: &str, confirm: &str) -> Result<User> {
        auth::register(&self.store, email, password, confirm)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        auth::login(&self.store, email, password)
    }

    pub fn logout(&self) -> Result<()> {
        auth::logout(&self.store)
    }

    pub fn current_user(&self) -> Option<User> {
        self.store.current_user()
    }

    /// The selected profile, if it still belongs to the logged-in user.
    pub fn current_profile(&self) -> Option<Profile> {
        let user = self.store.current_user()?;
        let id = self.store.current_profile_id()?;
        user.profile(&id).cloned()
    }

    pub fn needs_profile_selection(&self) -> bool {
        auth::needs_profile_selection(&self.store)
    }

    // --- Profiles ---

    pub fn profiles(&self) -> Result<Vec<Profile>> {
        Ok(self.require_user()?.profiles)
    }

    /// Create a profile for the logged-in user and make it the active one.
    pub fn create_profile(&self, name: &str, pin: Option<&str>) -> Result<Profile> {
        let mut user = self.require_user()?;
        let profile = profiles::create(&self.store, &mut user, name, pin)?;
        self.store.select_profile(&profile.id)?;
        Ok(profile)
    }

    pub fn rename_profile(&self, profile_id: &str, new_name: &str) -> Result<()> {
        let mut user = self.require_user()?;
        profiles::rename(&self.store, &mut user, profile_id, new_name)
    }

    /// Delete a profile. Deleting the active profile also clears the selection.
    pub fn delete_profile(&self, profile_id: &str) -> Result<()> {
        let mut user = self.require_user()?;
        profiles::delete(&self.store, &mut user, profile_id)?;

        if self.store.current_profile_id().as_deref() == Some(profile_id) {
            self.store.clear_selected_profile()?;
        }
        Ok(())
    }

    /// Make a profile active, checking its PIN if it has one.
    pub fn select_profile(&self, profile_id: &str, pin: Option<&str>) -> Result<Profile> {
        let user = self.require_user()?;
        let Some(profile) = user.profile(profile_id).cloned() else {
            warn!(profile = profile_id, email = %user.email, "selection of unknown profile");
            return Err(MarqueeError::ProfileNotFound(profile_id.to_string()));
        };

        profiles::check_pin(&profile, pin)?;
        self.store.select_profile(&profile.id)?;
        debug!(profile = %profile.id, "selected profile");
        Ok(profile)
    }

    // --- Browse ---

    /// The catalog, seeding the demo titles first if it is empty.
    pub fn catalog(&self) -> Result<Vec<CatalogItem>> {
        self.store.seed_catalog_if_empty()?;
        Ok(self.store.catalog())
    }

    pub fn home(&self, query: &str) -> Result<HomeView> {
        let (user, profile) = self.require_profile()?;
        let catalog = self.catalog()?;
        Ok(browse::home_view(&catalog, &user, &profile.id, query))
    }

    pub fn search(&self, query: &str) -> Result<Vec<CatalogItem>> {
        Ok(browse::filter_by_search(&self.catalog()?, query))
    }

    // --- Favorites ---

    pub fn is_favorite(&self, item_id: &str) -> Result<bool> {
        let (user, profile) = self.require_profile()?;
        Ok(favorites::is_favorite(&user, &profile.id, item_id))
    }

    /// Flip an item in the active profile's list. Returns the new state.
    pub fn toggle_favorite(&self, item_id: &str) -> Result<bool> {
        let (mut user, profile) = self.require_profile()?;
        favorites::toggle(&self.store, &mut user, &profile.id, item_id)
    }

    pub fn my_list(&self) -> Result<Vec<CatalogItem>> {
        let (user, profile) = self.require_profile()?;
        Ok(favorites::favorite_items(
            &user,
            &profile.id,
            &self.store.catalog(),
        ))
    }

    fn require_user(&self) -> Result<User> {
        self.store.current_user().ok_or(MarqueeError::NotLoggedIn)
    }

    fn require_profile(&self) -> Result<(User, Profile)> {
        let user = self.require_user()?;
        let profile = self
            .store
            .current_profile_id()
            .and_then(|id| user.profile(&id).cloned())
            .ok_or(MarqueeError::NoProfileSelected)?;
        Ok((user, profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::TestEnv;

    fn api() -> MarqueeApi<MemBackend> {
        MarqueeApi::with_backend(MemBackend::new())
    }

    fn logged_in() -> MarqueeApi<MemBackend> {
        let api = api();
        api.register("a@b.com", "password1", "password1").unwrap();
        api
    }

    #[test]
    fn profile_calls_require_login() {
        let api = api();
        assert!(matches!(api.profiles(), Err(MarqueeError::NotLoggedIn)));
        assert!(matches!(
            api.create_profile("Kid", None),
            Err(MarqueeError::NotLoggedIn)
        ));
        assert!(matches!(api.home(""), Err(MarqueeError::NotLoggedIn)));
    }

    #[test]
    fn browse_requires_selected_profile() {
        let api = logged_in();
        assert!(matches!(api.home(""), Err(MarqueeError::NoProfileSelected)));
        assert!(matches!(
            api.toggle_favorite("hustle-2022"),
            Err(MarqueeError::NoProfileSelected)
        ));
        assert!(api.needs_profile_selection());
    }

    #[test]
    fn create_profile_selects_it() {
        let api = logged_in();
        let profile = api.create_profile("Kid", None).unwrap();

        assert_eq!(api.current_profile(), Some(profile));
        assert!(!api.needs_profile_selection());
    }

    #[test]
    fn select_profile_checks_pin() {
        let api = logged_in();
        let locked = api.create_profile("Kid", Some("1234")).unwrap();
        api.store().clear_selected_profile().unwrap();

        assert!(matches!(
            api.select_profile(&locked.id, Some("0000")),
            Err(MarqueeError::IncorrectPin)
        ));
        assert!(matches!(
            api.select_profile(&locked.id, None),
            Err(MarqueeError::InvalidPin)
        ));
        assert!(api.current_profile().is_none());

        api.select_profile(&locked.id, Some("1234")).unwrap();
        assert_eq!(api.current_profile().unwrap().id, locked.id);
    }

    #[test]
    fn select_unknown_profile_fails() {
        let api = logged_in();
        assert!(matches!(
            api.select_profile("p_nobody_1", None),
            Err(MarqueeError::ProfileNotFound(_))
        ));
    }

    #[test]
    fn deleting_active_profile_clears_selection() {
        let api = logged_in();
        let kid = api.create_profile("Kid", None).unwrap();
        let mom = api.create_profile("Mom", None).unwrap();
        assert_eq!(api.current_profile().unwrap().id, mom.id);

        api.delete_profile(&mom.id).unwrap();

        assert!(api.current_profile().is_none());
        assert_eq!(api.profiles().unwrap(), vec![kid]);
    }

    #[test]
    fn home_seeds_catalog_and_marks_favorites() {
        let api = logged_in();
        api.create_profile("Kid", None).unwrap();
        assert!(api.toggle_favorite("hustle-2022").unwrap());

        let view = api.home("").unwrap();

        assert_eq!(view.hero.unwrap().id, "bird-box-2018");
        let cards: Vec<&TitleCard> = view.rows.iter().flat_map(|r| &r.cards).collect();
        assert_eq!(cards.len(), 10);
        let favorites: Vec<&str> = cards
            .iter()
            .filter(|c| c.is_favorite)
            .map(|c| c.item.id.as_str())
            .collect();
        assert_eq!(favorites, vec!["hustle-2022"]);
        assert_eq!(api.my_list().unwrap()[0].id, "hustle-2022");
    }

    #[test]
    fn favorites_belong_to_the_active_profile() {
        let api = logged_in();
        api.create_profile("Kid", None).unwrap();
        api.toggle_favorite("hustle-2022").unwrap();

        api.create_profile("Mom", None).unwrap();
        assert!(!api.is_favorite("hustle-2022").unwrap());
    }

    #[test]
    fn rename_goes_through_validation() {
        let api = logged_in();
        let kid = api.create_profile("Kid", None).unwrap();
        api.create_profile("Mom", None).unwrap();

        assert!(matches!(
            api.rename_profile(&kid.id, "MOM"),
            Err(MarqueeError::NameTaken)
        ));
        api.rename_profile(&kid.id, "Junior").unwrap();
        assert_eq!(api.profiles().unwrap()[0].name, "Junior");
    }

    #[test]
    fn fs_store_survives_end_of_browser_session() {
        let env = TestEnv::new();
        let api = MarqueeApi::new(env.store());
        api.register("a@b.com", "password1", "password1").unwrap();
        api.create_profile("Kid", None).unwrap();
        api.toggle_favorite("love-hard-2021").unwrap();

        api.store().end_browser_session().unwrap();
        assert!(api.current_user().is_none());

        let reopened = MarqueeApi::new(env.store());
        reopened.login("a@b.com", "password1").unwrap();
        assert!(reopened.needs_profile_selection());
        let kid = reopened.profiles().unwrap().remove(0);
        reopened.select_profile(&kid.id, None).unwrap();
        assert!(reopened.is_favorite("love-hard-2021").unwrap());
    }

    #[test]
    fn open_uses_configured_directories() {
        let env = TestEnv::new();
        let config = MarqueeConfig {
            data_dir: Some(env.durable_root()),
            session_dir: Some(env.ephemeral_root()),
            seed_catalog: true,
        };

        let api = MarqueeApi::open(&config).unwrap();

        assert_eq!(api.store().catalog().len(), 10);
        assert!(env.durable_root().join("app_catalog.json").exists());
    }
}
