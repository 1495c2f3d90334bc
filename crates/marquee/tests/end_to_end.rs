//! Full account lifecycle through the public API.

use marquee::api::MarqueeApi;
use marquee::commands::profiles::verify_pin;
use marquee::error::MarqueeError;
use marquee::store::fs_backend::FsBackend;
use marquee::store::mem_backend::MemBackend;
use tempfile::TempDir;

#[test]
fn register_profile_favorite_logout_login() {
    let api = MarqueeApi::with_backend(MemBackend::new());

    api.register("a@b.com", "password1", "password1").unwrap();
    let kid = api.create_profile("Kid", Some("1234")).unwrap();

    assert!(verify_pin(&kid, "1234"));
    assert!(!verify_pin(&kid, "0000"));

    api.select_profile(&kid.id, Some("1234")).unwrap();
    api.toggle_favorite("hustle-2022").unwrap();
    assert!(api.is_favorite("hustle-2022").unwrap());

    api.logout().unwrap();
    assert!(api.store().current_session().is_none());
    assert!(api.store().current_profile_id().is_none());
    assert!(matches!(
        api.is_favorite("hustle-2022"),
        Err(MarqueeError::NotLoggedIn)
    ));

    api.login("a@b.com", "password1").unwrap();
    api.select_profile(&kid.id, Some("1234")).unwrap();
    assert!(api.is_favorite("hustle-2022").unwrap());
}

#[test]
fn state_survives_reopening_the_filesystem_store() {
    let dir = TempDir::new().unwrap();
    let open = || {
        MarqueeApi::with_backend(FsBackend::new(
            dir.path().join("data"),
            dir.path().join("session"),
        ))
    };

    let first = open();
    first.register("A@B.com", "password1", "password1").unwrap();
    let kid = first.create_profile("Kid", None).unwrap();
    first.toggle_favorite("bird-box-2018").unwrap();

    // Same session directory: still logged in with the same profile.
    let second = open();
    assert_eq!(second.current_user().unwrap().email, "A@B.com");
    assert_eq!(second.current_profile().unwrap().id, kid.id);
    assert!(second.is_favorite("bird-box-2018").unwrap());

    second.logout().unwrap();
    let third = open();
    assert!(third.current_user().is_none());
    assert!(third.login("a@b.com", "wrong-pass").is_err());
    third.login("a@b.com", "password1").unwrap();
    assert!(third.needs_profile_selection());
}

#[test]
fn search_and_rows_over_seeded_catalog() {
    let api = MarqueeApi::with_backend(MemBackend::new());
    api.register("a@b.com", "password1", "password1").unwrap();
    api.create_profile("Kid", None).unwrap();

    let view = api.home("romantic").unwrap();
    let categories: Vec<&str> = view.rows.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(
        categories,
        vec![
            "Teen Romantic Comedy",
            "Romantic Comedy",
            "Holiday Romantic Comedy"
        ]
    );
    assert_eq!(api.search("").unwrap().len(), 10);
}
