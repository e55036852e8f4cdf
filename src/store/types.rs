//! Core store data types
//!
//! - [`FavoriteItem`]: a catalog entry marked as favorite
//! - [`FavoritesMap`]: favorites keyed by id

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A favorited catalog entry.
///
/// Only `id` and `name` are interpreted. Any other fields sent by clients
/// (sprite urls, types, ...) are kept verbatim in `extra` and flattened back
/// on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FavoriteItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Attach an additional descriptive field
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Favorites keyed by item id.
///
/// Every key equals the `id` of its value. Maps built from arbitrary JSON
/// objects are re-keyed by each item's own id, so a payload such as
/// `{"x": {"id": "25", ...}}` ends up stored under `"25"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, FavoriteItem>",
    into = "BTreeMap<String, FavoriteItem>"
)]
pub struct FavoritesMap {
    entries: BTreeMap<String, FavoriteItem>,
}

impl FavoritesMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&FavoriteItem> {
        self.entries.get(id)
    }

    /// Remove the entry with `item.id` if present, insert `item` otherwise.
    ///
    /// Returns `true` when the item is a favorite afterwards.
    pub fn toggle(&mut self, item: FavoriteItem) -> bool {
        if self.entries.remove(&item.id).is_some() {
            false
        } else {
            self.entries.insert(item.id.clone(), item);
            true
        }
    }

    /// Iterate `(id, item)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FavoriteItem)> {
        self.entries.iter()
    }

    /// Iterate items in id order
    pub fn items(&self) -> impl Iterator<Item = &FavoriteItem> {
        self.entries.values()
    }
}

impl From<BTreeMap<String, FavoriteItem>> for FavoritesMap {
    fn from(raw: BTreeMap<String, FavoriteItem>) -> Self {
        raw.into_values().collect()
    }
}

impl From<FavoritesMap> for BTreeMap<String, FavoriteItem> {
    fn from(map: FavoritesMap) -> Self {
        map.entries
    }
}

impl FromIterator<FavoriteItem> for FavoritesMap {
    fn from_iter<I: IntoIterator<Item = FavoriteItem>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_item_extra_fields_roundtrip() {
        let json = r#"{"id":"1","name":"Bulbasaur","types":["grass","poison"]}"#;
        let item: FavoriteItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, "1");
        assert_eq!(item.name, "Bulbasaur");
        assert!(item.extra.contains_key("types"));
        assert_eq!(serde_json::to_string(&item).unwrap(), json);
    }

    #[test]
    fn test_builder_fields_are_flattened() {
        let item = FavoriteItem::new("6", "Charizard").field("height", 17);
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({"id": "6", "name": "Charizard", "height": 17})
        );
    }

    #[test]
    fn test_plain_item_serializes_without_extras() {
        let item = FavoriteItem::new("25", "Pikachu");
        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#"{"id":"25","name":"Pikachu"}"#
        );
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut map = FavoritesMap::new();

        assert!(map.toggle(FavoriteItem::new("25", "Pikachu")));
        assert!(map.contains("25"));

        // Removal matches on id only
        assert!(!map.toggle(FavoriteItem::new("25", "Raichu")));
        assert!(map.is_empty());
    }

    #[test]
    fn test_deserialize_rekeys_by_id() {
        let json = r#"{"wrong":{"id":"4","name":"Charmander"},"7":{"id":"7","name":"Squirtle"}}"#;
        let map: FavoritesMap = serde_json::from_str(json).unwrap();

        assert_eq!(map.len(), 2);
        assert!(map.contains("4"));
        assert!(!map.contains("wrong"));
        for (key, item) in map.iter() {
            assert_eq!(key, &item.id);
        }
    }

    #[test]
    fn test_empty_map_serializes_as_object() {
        assert_eq!(serde_json::to_string(&FavoritesMap::new()).unwrap(), "{}");
    }
}
