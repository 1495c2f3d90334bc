//! View-state derivation for the home screen: search filtering, category
//! rows, the hero title and favorite markers.

use super::favorites::is_favorite;
use crate::model::{CatalogItem, User};

/// One row of the home screen: a category and its titles in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub category: String,
    pub items: Vec<CatalogItem>,
}

/// Group items by category. Rows appear in the order their category is
/// first seen. Items without a category go under `"More"`.
pub fn group_by_category(items: &[CatalogItem]) -> Vec<CategoryRow> {
    let mut rows: Vec<CategoryRow> = Vec::new();

    for item in items {
        let category = item.category();
        match rows.iter_mut().find(|row| row.category == category) {
            Some(row) => row.items.push(item.clone()),
            None => rows.push(CategoryRow {
                category: category.to_string(),
                items: vec![item.clone()],
            }),
        }
    }

    rows
}

/// Case-insensitive substring match on title or category. A blank query
/// returns every item.
pub fn filter_by_search(items: &[CatalogItem], query: &str) -> Vec<CatalogItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| {
            let title = item.title.to_lowercase();
            let category = item
                .metadata
                .category
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();
            title.contains(&query) || category.contains(&query)
        })
        .cloned()
        .collect()
}

/// The featured title: the first catalog item.
pub fn hero(items: &[CatalogItem]) -> Option<&CatalogItem> {
    items.first()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCard {
    pub item: CatalogItem,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeRow {
    pub category: String,
    pub cards: Vec<TitleCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub hero: Option<CatalogItem>,
    pub rows: Vec<HomeRow>,
}

/// Everything the home screen shows for one profile. The hero comes from
/// the full catalog, the rows from the filtered one.
pub fn home_view(catalog: &[CatalogItem], user: &User, profile_id: &str, query: &str) -> HomeView {
    let rows = group_by_category(&filter_by_search(catalog, query))
        .into_iter()
        .map(|row| HomeRow {
            cards: row
                .items
                .into_iter()
                .map(|item| TitleCard {
                    is_favorite: is_favorite(user, profile_id, &item.id),
                    item,
                })
                .collect(),
            category: row.category,
        })
        .collect();

    HomeView {
        hero: hero(catalog).cloned(),
        rows,
    }
}
