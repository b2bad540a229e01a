//! Custom food registry
//!
//! Provides [`CustomFoodRegistry`], the user-added foods per category.

use crate::category::FoodCategory;
use crate::error::{CatalogError, CatalogResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// User-defined foods keyed by category key
///
/// Names are stored as typed but compared ignoring case when checking for
/// duplicates. Category keys are kept as strings: persisted data may carry
/// keys that are not in the predefined table.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomFoodRegistry {
    foods: IndexMap<String, Vec<String>>,
}

impl CustomFoodRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom foods registered under `category_key`
    #[inline]
    #[must_use]
    pub fn foods(&self, category_key: &str) -> &[String] {
        self.foods.get(category_key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Category key holding `food` exactly, first match in registry order
    #[must_use]
    pub fn category_of(&self, food: &str) -> Option<&str> {
        self.foods
            .iter()
            .find(|(_, foods)| foods.iter().any(|f| f == food))
            .map(|(key, _)| key.as_str())
    }

    /// Whether any custom food matches `food` ignoring case
    #[must_use]
    pub fn contains_ignore_case(&self, food: &str) -> bool {
        let needle = food.to_lowercase();
        self.foods
            .values()
            .flatten()
            .any(|f| f.to_lowercase() == needle)
    }

    /// Add a custom food to `category`
    ///
    /// The name is trimmed before storing.
    ///
    /// # Errors
    /// - [`CatalogError::EmptyName`] if the trimmed name is empty
    /// - [`CatalogError::DuplicateFood`] if the name matches, ignoring case,
    ///   any predefined food or any custom food in any category
    pub fn add(&mut self, category: FoodCategory, name: &str) -> CatalogResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if FoodCategory::is_predefined_ignore_case(name) || self.contains_ignore_case(name) {
            tracing::debug!(name, "custom food rejected as duplicate");
            return Err(CatalogError::DuplicateFood(name.to_string()));
        }

        self.foods
            .entry(category.key().to_string())
            .or_default()
            .push(name.to_string());
        Ok(())
    }

    /// Remove a custom food by exact name
    ///
    /// Only the first occurrence is removed, scanning categories in registry order.
    /// Returns whether anything was removed.
    ///
    /// # Errors
    /// Returns [`CatalogError::PredefinedFood`] if `name` is a predefined food.
    pub fn remove(&mut self, name: &str) -> CatalogResult<bool> {
        if FoodCategory::of_predefined(name).is_some() {
            return Err(CatalogError::PredefinedFood(name.to_string()));
        }

        for foods in self.foods.values_mut() {
            if let Some(pos) = foods.iter().position(|f| f == name) {
                foods.remove(pos);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Iterate over `(category key, foods)` pairs in registry order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.foods.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Total number of custom foods
    #[must_use]
    pub fn len(&self) -> usize {
        self.foods.values().map(Vec::len).sum()
    }

    /// Check if no custom food is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for CustomFoodRegistry {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        Self {
            foods: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Selectable foods for one category, sorted ignoring case
///
/// Predefined foods come with the custom ones; the `other` bucket lists only
/// custom foods because it has no predefined entries.
#[must_use]
pub fn foods_for_category(category: FoodCategory, registry: &CustomFoodRegistry) -> Vec<String> {
    let mut foods: Vec<String> = category
        .foods()
        .iter()
        .map(|f| (*f).to_string())
        .chain(registry.foods(category.key()).iter().cloned())
        .collect();
    foods.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    foods
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> CustomFoodRegistry {
        let mut registry = CustomFoodRegistry::new();
        registry.add(FoodCategory::Proteins, "Salmone affumicato").unwrap();
        registry.add(FoodCategory::Vegetables, "Carciofi").unwrap();
        registry.add(FoodCategory::Fruits, "Kaki").unwrap();
        registry
    }

    #[test]
    fn registry_new_empty() {
        let registry = CustomFoodRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.foods("fruits").is_empty());
    }

    #[test]
    fn add_appends_to_category() {
        let registry = sample();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.foods("fruits"), &["Kaki"]);
        assert_eq!(registry.category_of("Carciofi"), Some("vegetables"));
    }

    #[test]
    fn add_trims_name() {
        let mut registry = CustomFoodRegistry::new();
        registry.add(FoodCategory::Other, "  Caffè  ").unwrap();
        assert_eq!(registry.foods("other"), &["Caffè"]);
    }

    #[test]
    fn add_rejects_empty() {
        let mut registry = CustomFoodRegistry::new();
        assert_eq!(registry.add(FoodCategory::Other, "   "), Err(CatalogError::EmptyName));
    }

    #[test]
    fn add_rejects_predefined_ignoring_case() {
        let mut registry = CustomFoodRegistry::new();
        assert_eq!(
            registry.add(FoodCategory::Proteins, "uova"),
            Err(CatalogError::DuplicateFood("uova".to_string()))
        );
        // Collision is checked across categories too
        assert!(registry.add(FoodCategory::Other, "TOFU").is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn add_rejects_custom_duplicate_in_other_category() {
        let mut registry = sample();
        assert!(matches!(
            registry.add(FoodCategory::Other, "kaki"),
            Err(CatalogError::DuplicateFood(_))
        ));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn remove_custom_food() {
        let mut registry = sample();
        assert_eq!(registry.remove("Kaki"), Ok(true));
        assert!(registry.foods("fruits").is_empty());
        assert_eq!(registry.remove("Kaki"), Ok(false));
    }

    #[test]
    fn remove_is_exact_match() {
        let mut registry = sample();
        assert_eq!(registry.remove("kaki"), Ok(false));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn remove_first_occurrence_only() {
        let mut registry: CustomFoodRegistry = [
            ("fruits", vec!["Kaki".to_string()]),
            ("other", vec!["Kaki".to_string()]),
        ]
        .into_iter()
        .collect();
        assert_eq!(registry.remove("Kaki"), Ok(true));
        assert!(registry.foods("fruits").is_empty());
        assert_eq!(registry.foods("other"), &["Kaki"]);
    }

    #[test]
    fn remove_predefined_rejected() {
        let mut registry = sample();
        assert_eq!(
            registry.remove("Uova"),
            Err(CatalogError::PredefinedFood("Uova".to_string()))
        );
    }

    #[test]
    fn serde_is_plain_map() {
        let registry = sample();
        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "proteins": ["Salmone affumicato"],
                "vegetables": ["Carciofi"],
                "fruits": ["Kaki"]
            })
        );
        let back: CustomFoodRegistry = serde_json::from_value(json).unwrap();
        assert_eq!(back, registry);
    }

    #[test]
    fn foods_for_category_merges_and_sorts() {
        let mut registry = sample();
        registry.add(FoodCategory::Fruits, "arance rosse").unwrap();
        let foods = foods_for_category(FoodCategory::Fruits, &registry);

        assert_eq!(foods.len(), FoodCategory::Fruits.foods().len() + 2);
        assert_eq!(foods.first().map(String::as_str), Some("Albicocche"));
        let pos_arance = foods.iter().position(|f| f == "Arance").unwrap();
        assert_eq!(foods[pos_arance + 1], "arance rosse");
        assert!(foods.contains(&"Kaki".to_string()));
    }

    #[test]
    fn foods_for_other_lists_only_custom() {
        let mut registry = sample();
        assert!(foods_for_category(FoodCategory::Other, &registry).is_empty());
        registry.add(FoodCategory::Other, "Tè verde").unwrap();
        assert_eq!(foods_for_category(FoodCategory::Other, &registry), vec!["Tè verde"]);
    }
}
