//! Shopping list model
//!
//! The list is ordered category key to food name to [`ShoppingItem`]. A food
//! appears at most once per category. Categories keep insertion order, which
//! for generated lists is the predefined category order.
//!
//! Stored lists are decoded entry by entry, and edits are written back as
//! differences, so an unreadable item survives every mutation untouched.

use crate::error::{PlannerError, PlannerResult};
use indexmap::IndexMap;
use meal_catalog::{category_info, FoodCategory};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One line of the shopping list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// Units to buy, at least 1
    #[serde(deserialize_with = "positive_quantity")]
    pub quantity: u32,
    /// Checked off
    #[serde(default)]
    pub completed: bool,
}

impl ShoppingItem {
    /// Unchecked item with `quantity` units
    #[inline]
    #[must_use]
    pub fn new(quantity: u32) -> Self {
        Self {
            quantity: quantity.max(1),
            completed: false,
        }
    }
}

/// Result of [`ShoppingList::add_manual_item`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualAdd {
    /// New line created
    Inserted,
    /// Existing line had its quantity overwritten
    Updated,
}

/// Progress of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    /// Category key
    pub key: String,
    /// Display icon
    pub icon: &'static str,
    /// Display name
    pub name: &'static str,
    /// Checked-off items
    pub completed: usize,
    /// All items
    pub total: usize,
}

/// Foods of one category, in list order
pub type CategoryItems = IndexMap<String, ShoppingItem>;

/// Shopping list grouped by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShoppingList {
    categories: IndexMap<String, CategoryItems>,
}

impl<'de> Deserialize<'de> for ShoppingList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(&Value::deserialize(deserializer)?))
    }
}

fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

fn positive_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(clamp_quantity(i64::deserialize(deserializer)?))
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced by an object"),
    }
}

impl ShoppingList {
    /// Create empty list with no categories
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every readable entry of a stored list
    ///
    /// Buckets that are not objects and items that do not decode are skipped
    /// with a warning.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let mut list = Self::new();
        let Some(categories) = value.as_object() else {
            tracing::warn!("shopping list is not an object, read as empty");
            return list;
        };
        for (category, items) in categories {
            let Some(items) = items.as_object() else {
                tracing::warn!(category = %category, "category is not an object, skipped");
                continue;
            };
            let bucket = list.categories.entry(category.clone()).or_default();
            for (food, raw) in items {
                match ShoppingItem::deserialize(raw) {
                    Ok(item) => {
                        bucket.insert(food.clone(), item);
                    }
                    Err(e) => tracing::warn!(
                        category = %category,
                        food = %food,
                        error = %e,
                        "unreadable item skipped"
                    ),
                }
            }
        }
        list
    }

    /// Write what changed since `previous` into the stored form `raw`
    ///
    /// Removed items are deleted, new or changed items have their quantity and
    /// completed fields written, and everything else in `raw` is left as is.
    pub fn apply_to(&self, previous: &ShoppingList, raw: &mut Value) {
        let root = ensure_object(raw);

        for (category, food, _) in previous.iter() {
            if self.contains(category, food) {
                continue;
            }
            if let Some(Value::Object(items)) = root.get_mut(category) {
                items.shift_remove(food);
            }
        }

        for (category, items) in &self.categories {
            let bucket = ensure_object(
                root.entry(category.as_str())
                    .or_insert_with(|| Value::Object(Map::new())),
            );
            for (food, item) in items {
                if previous.get(category, food) == Some(item) {
                    continue;
                }
                let stored = ensure_object(
                    bucket
                        .entry(food.as_str())
                        .or_insert_with(|| Value::Object(Map::new())),
                );
                stored.insert("quantity".to_string(), Value::from(item.quantity));
                stored.insert("completed".to_string(), Value::Bool(item.completed));
            }
        }
    }

    /// Empty list holding an empty bucket for every predefined category
    #[must_use]
    pub fn with_predefined_categories() -> Self {
        Self {
            categories: FoodCategory::ALL
                .iter()
                .map(|c| (c.key().to_string(), CategoryItems::new()))
                .collect(),
        }
    }

    /// Items of `category`
    #[inline]
    #[must_use]
    pub fn category(&self, category: &str) -> Option<&CategoryItems> {
        self.categories.get(category)
    }

    /// Category keys in list order, empty buckets included
    pub fn category_keys(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// One item
    #[must_use]
    pub fn get(&self, category: &str, food: &str) -> Option<&ShoppingItem> {
        self.categories.get(category)?.get(food)
    }

    /// Whether `food` is listed under `category`
    #[inline]
    #[must_use]
    pub fn contains(&self, category: &str, food: &str) -> bool {
        self.get(category, food).is_some()
    }

    /// Every item as `(category, food, item)`, in list order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &ShoppingItem)> {
        self.categories.iter().flat_map(|(category, items)| {
            items
                .iter()
                .map(move |(food, item)| (category.as_str(), food.as_str(), item))
        })
    }

    /// Number of items across all categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.values().map(IndexMap::len).sum()
    }

    /// Whether no category holds an item
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.values().all(IndexMap::is_empty)
    }

    fn item_mut(&mut self, category: &str, food: &str) -> PlannerResult<&mut ShoppingItem> {
        self.categories
            .get_mut(category)
            .and_then(|items| items.get_mut(food))
            .ok_or_else(|| PlannerError::not_found(format!("'{food}' not listed under {category}")))
    }

    /// Count one more unit of `food`, creating category and item as needed
    pub fn increment(&mut self, category: &str, food: &str) {
        let items = self.categories.entry(category.to_string()).or_default();
        items
            .entry(food.to_string())
            .and_modify(|item| item.quantity = item.quantity.saturating_add(1))
            .or_insert_with(|| ShoppingItem::new(1));
    }

    /// Insert `item` verbatim, replacing any existing line
    pub fn insert(&mut self, category: &str, food: &str, item: ShoppingItem) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(food.to_string(), item);
    }

    /// Overwrite quantity, clamped to at least 1
    ///
    /// # Errors
    /// Returns [`PlannerError::NotFound`] if the item is not listed.
    pub fn set_quantity(&mut self, category: &str, food: &str, quantity: i64) -> PlannerResult<u32> {
        let item = self.item_mut(category, food)?;
        item.quantity = clamp_quantity(quantity);
        Ok(item.quantity)
    }

    /// Flip the completed flag, returning the new state
    ///
    /// # Errors
    /// Returns [`PlannerError::NotFound`] if the item is not listed.
    pub fn toggle_completed(&mut self, category: &str, food: &str) -> PlannerResult<bool> {
        let item = self.item_mut(category, food)?;
        item.completed = !item.completed;
        Ok(item.completed)
    }

    /// Delete one item; the category bucket stays even if now empty
    ///
    /// # Errors
    /// Returns [`PlannerError::NotFound`] if the item is not listed.
    pub fn remove_item(&mut self, category: &str, food: &str) -> PlannerResult<ShoppingItem> {
        self.categories
            .get_mut(category)
            .and_then(|items| items.shift_remove(food))
            .ok_or_else(|| PlannerError::not_found(format!("'{food}' not listed under {category}")))
    }

    /// Insert or overwrite a manual line
    ///
    /// The name is trimmed and the quantity clamped to at least 1. An existing
    /// line keeps its completed flag.
    ///
    /// # Errors
    /// Returns [`PlannerError::InvalidInput`] if the trimmed name is empty.
    pub fn add_manual_item(
        &mut self,
        category: &str,
        food: &str,
        quantity: i64,
    ) -> PlannerResult<ManualAdd> {
        let food = food.trim();
        if food.is_empty() {
            return Err(PlannerError::invalid_input("item name is empty"));
        }
        let quantity = clamp_quantity(quantity);
        let items = self.categories.entry(category.to_string()).or_default();
        if let Some(item) = items.get_mut(food) {
            item.quantity = quantity;
            return Ok(ManualAdd::Updated);
        }
        items.insert(food.to_string(), ShoppingItem::new(quantity));
        Ok(ManualAdd::Inserted)
    }

    /// Uncheck every item, returning how many changed
    pub fn reset_all_completed(&mut self) -> usize {
        let mut changed = 0;
        for item in self.categories.values_mut().flat_map(IndexMap::values_mut) {
            if item.completed {
                item.completed = false;
                changed += 1;
            }
        }
        changed
    }

    /// Per-category progress, skipping empty categories
    ///
    /// Predefined categories come first in their fixed order, then any other
    /// keys in list order.
    #[must_use]
    pub fn summaries(&self) -> Vec<CategorySummary> {
        let predefined = FoodCategory::ALL.iter().map(|c| c.key());
        let extra = self
            .categories
            .keys()
            .map(String::as_str)
            .filter(|k| FoodCategory::from_key(k).is_none());

        predefined
            .chain(extra)
            .filter_map(|key| {
                let items = self.categories.get(key).filter(|i| !i.is_empty())?;
                let info = category_info(key);
                Some(CategorySummary {
                    key: key.to_string(),
                    icon: info.icon,
                    name: info.name,
                    completed: items.values().filter(|i| i.completed).count(),
                    total: items.len(),
                })
            })
            .collect()
    }

    /// Items of `category` sorted by food name
    #[must_use]
    pub fn items_sorted(&self, category: &str) -> Vec<(&str, &ShoppingItem)> {
        let mut items: Vec<_> = self
            .categories
            .get(category)
            .map(|items| items.iter().map(|(f, i)| (f.as_str(), i)).collect())
            .unwrap_or_default();
        items.sort_by(|a, b| a.0.cmp(b.0));
        items
    }
}
