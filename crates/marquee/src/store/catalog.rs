//! Catalog repository: the `app_catalog` collection in durable storage.
//!
//! The catalog is seeded once with a fixed demo list and is read-only after
//! that. The seed data is reproduced verbatim so existing stores and tests
//! agree on ids, titles and categories.

use super::backend::StorageBackend;
use super::{AppStore, CATALOG_KEY};
use crate::error::Result;
use crate::model::{CatalogItem, ItemMetadata, Scope};
use serde_json::Value;
use tracing::info;

impl<B: StorageBackend> AppStore<B> {
    pub fn catalog(&self) -> Vec<CatalogItem> {
        self.kv.read_list(Scope::Durable, CATALOG_KEY)
    }

    /// Write the demo catalog if the stored one is empty. Returns whether it
    /// seeded anything.
    ///
    /// Emptiness is judged on the stored array itself, so entries this crate
    /// cannot decode still count as a catalog and are never overwritten.
    pub fn seed_catalog_if_empty(&self) -> Result<bool> {
        let stored = self.kv.read_value(Scope::Durable, CATALOG_KEY);
        if stored
            .as_ref()
            .and_then(Value::as_array)
            .is_some_and(|items| !items.is_empty())
        {
            return Ok(false);
        }

        let items = demo_catalog();
        self.kv.write(Scope::Durable, CATALOG_KEY, &items)?;
        info!(items = items.len(), "seeded demo catalog");
        Ok(true)
    }
}

fn item(id: &str, title: &str, year: i32, category: &str, description: &str) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        title: title.to_string(),
        metadata: ItemMetadata {
            year,
            category: Some(category.to_string()),
        },
        description: description.to_string(),
        image: None,
    }
}

/// The fixed ten-title demo catalog.
pub fn demo_catalog() -> Vec<CatalogItem> {
    vec![
        item(
            "bird-box-2018",
            "Bird Box",
            2018,
            "Horror Thriller",
            "A mother and her children try to survive a deadly force that strikes when you look at it.",
        ),
        item(
            "spenser-confidential-2020",
            "Spenser Confidential",
            2020,
            "Action Comedy",
            "An ex-cop teams up with a rookie to uncover a citywide conspiracy.",
        ),
        item(
            "enola-holmes-2020",
            "Enola Holmes",
            2020,
            "Mystery",
            "Sherlock Holmes\u{2019} younger sister searches for her missing mother and gets pulled into a larger case.",
        ),
        item(
            "hustle-2022",
            "Hustle",
            2022,
            "Sports Drama",
            "A basketball scout discovers a talented player and bets everything on getting him to the NBA.",
        ),
        item(
            "murder-mystery-2019",
            "Murder Mystery",
            2019,
            "Comedy Mystery",
            "A vacation turns into a whodunit when a billionaire is found dead.",
        ),
        item(
            "to-all-the-boys-ive-loved-before-2018",
            "To All the Boys I've Loved Before",
            2018,
            "Teen Romantic Comedy",
            "A teen\u{2019}s secret love letters get sent out and her love life turns upside down.",
        ),
        item(
            "set-it-up-2018",
            "Set It Up",
            2018,
            "Romantic Comedy",
            "Two assistants try to set up their bosses and accidentally fall for each other.",
        ),
        item(
            "always-be-my-maybe-2019",
            "Always Be My Maybe",
            2019,
            "Romantic Comedy",
            "Childhood friends reconnect years later and old feelings resurface.",
        ),
        item(
            "the-kissing-booth-2018",
            "The Kissing Booth",
            2018,
            "Teen Romantic Comedy",
            "A school fundraiser sparks a romance that complicates friendships.",
        ),
        item(
            "love-hard-2021",
            "Love Hard",
            2021,
            "Holiday Romantic Comedy",
            "A holiday trip to meet an online crush turns into an unexpected romantic mess.",
        ),
    ]
}
