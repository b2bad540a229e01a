//! Food classification
//!
//! Maps a food name to its category, consulting the predefined table first
//! and the custom food registry second.

use crate::category::FoodCategory;
use crate::registry::CustomFoodRegistry;

/// Key reported for foods found nowhere
pub const UNCATEGORIZED_KEY: &str = "uncategorized";

/// Where a classification came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationSource {
    /// Exact match in the predefined table
    Predefined,
    /// Exact match in the custom food registry
    Custom,
    /// No match anywhere
    Uncategorized,
}

/// Result of classifying a food name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Category key; [`UNCATEGORIZED_KEY`] when nothing matched
    pub key: String,
    /// Display icon
    pub icon: &'static str,
    /// Display name
    pub name: &'static str,
    /// Which lookup produced the match
    pub source: ClassificationSource,
}

impl Classification {
    fn predefined(category: FoodCategory) -> Self {
        Self {
            key: category.key().to_string(),
            icon: category.icon(),
            name: category.name(),
            source: ClassificationSource::Predefined,
        }
    }

    fn custom(key: &str) -> Self {
        // Custom foods may sit under a key the predefined table does not know
        let category = FoodCategory::from_key(key).unwrap_or(FoodCategory::Other);
        Self {
            key: key.to_string(),
            icon: category.icon(),
            name: category.name(),
            source: ClassificationSource::Custom,
        }
    }

    fn uncategorized() -> Self {
        Self {
            key: UNCATEGORIZED_KEY.to_string(),
            icon: "🍽️",
            name: "Non categorizzato",
            source: ClassificationSource::Uncategorized,
        }
    }

    /// Predefined category for this classification, if the key is known
    #[inline]
    #[must_use]
    pub fn category(&self) -> Option<FoodCategory> {
        FoodCategory::from_key(&self.key)
    }

    /// Shopping list bucket: uncategorized foods land in `other`
    #[must_use]
    pub fn bucket_key(&self) -> &str {
        match self.source {
            ClassificationSource::Uncategorized => FoodCategory::Other.key(),
            _ => self.key.as_str(),
        }
    }
}

/// Anything able to classify a food name
pub trait Classify {
    /// Classify `food`
    fn classify(&self, food: &str) -> Classification;
}

/// Classify `food` against the predefined table and `custom`
///
/// Lookups are exact and case-sensitive. Pure: the result depends only on
/// `food`, the predefined table and `custom`.
#[must_use]
pub fn classify(food: &str, custom: &CustomFoodRegistry) -> Classification {
    if let Some(category) = FoodCategory::of_predefined(food) {
        return Classification::predefined(category);
    }
    if let Some(key) = custom.category_of(food) {
        return Classification::custom(key);
    }
    Classification::uncategorized()
}

impl Classify for CustomFoodRegistry {
    #[inline]
    fn classify(&self, food: &str) -> Classification {
        classify(food, self)
    }
}
