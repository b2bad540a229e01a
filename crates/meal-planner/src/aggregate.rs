//! Shopping list derivation
//!
//! [`aggregate`] rebuilds the list from one week's menu and merges it with the
//! list already on hand:
//! 1. Every predefined category starts as an empty bucket.
//! 2. Each food occurrence in the menu adds one unit under its bucket.
//! 3. Items present in both lists keep the existing completed flag.
//! 4. Existing items the menu no longer produces are carried over verbatim,
//!    so manual additions survive regeneration.
//!
//! The result is a function of its inputs only, and regenerating from an
//! unchanged menu returns the list unchanged.

use crate::menu::WeekMenu;
use crate::shopping::ShoppingList;
use meal_catalog::Classify;

/// Derive the shopping list for `menu`, merged with `existing`
///
/// A missing menu yields the predefined empty buckets plus whatever
/// `existing` holds.
#[must_use]
pub fn aggregate<C: Classify + ?Sized>(
    menu: Option<&WeekMenu>,
    classifier: &C,
    existing: &ShoppingList,
) -> ShoppingList {
    let mut fresh = ShoppingList::with_predefined_categories();
    for food in menu.into_iter().flat_map(|m| m.foods()) {
        let classification = classifier.classify(food);
        fresh.increment(classification.bucket_key(), food);
    }
    let derived = fresh.len();

    let mut merged = fresh.clone();
    for (category, food, item) in fresh.iter() {
        if let Some(previous) = existing.get(category, food) {
            let mut kept = *item;
            kept.completed = previous.completed;
            merged.insert(category, food, kept);
        }
    }

    let mut carried = 0usize;
    for (category, food, item) in existing.iter() {
        if !fresh.contains(category, food) {
            merged.insert(category, food, *item);
            carried += 1;
        }
    }

    tracing::debug!(derived, carried, total = merged.len(), "shopping list aggregated");
    merged
}
