//! Predefined food categories
//!
//! The category table is an explicit, ordered sequence: [`FoodCategory::ALL`].
//! Classification walks it front to back and the first match wins, so the
//! order here is part of the contract.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Predefined food category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    /// Meat, fish, eggs, plant proteins
    Proteins,
    /// Milk and cheese
    Dairy,
    /// Powders, bars, vitamins
    Supplements,
    /// Nuts and seeds
    Nuts,
    /// Fresh fruit
    Fruits,
    /// Vegetables
    Vegetables,
    /// Grains and bread
    Cereals,
    /// Open-ended bucket, no predefined foods
    Other,
}

impl FoodCategory {
    /// Every category in classification order
    pub const ALL: [FoodCategory; 8] = [
        FoodCategory::Proteins,
        FoodCategory::Dairy,
        FoodCategory::Supplements,
        FoodCategory::Nuts,
        FoodCategory::Fruits,
        FoodCategory::Vegetables,
        FoodCategory::Cereals,
        FoodCategory::Other,
    ];

    /// Storage key
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Proteins => "proteins",
            Self::Dairy => "dairy",
            Self::Supplements => "supplements",
            Self::Nuts => "nuts",
            Self::Fruits => "fruits",
            Self::Vegetables => "vegetables",
            Self::Cereals => "cereals",
            Self::Other => "other",
        }
    }

    /// Display icon
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Proteins => "🥩",
            Self::Dairy => "🥛",
            Self::Supplements => "🧪",
            Self::Nuts => "🥜",
            Self::Fruits => "🍌",
            Self::Vegetables => "🥗",
            Self::Cereals => "🍞",
            Self::Other => "🛒",
        }
    }

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Proteins => "Proteine",
            Self::Dairy => "Latticini",
            Self::Supplements => "Integratori",
            Self::Nuts => "Frutta secca",
            Self::Fruits => "Frutta fresca",
            Self::Vegetables => "Verdure",
            Self::Cereals => "Cereali e pane",
            Self::Other => "Altro",
        }
    }

    /// Predefined foods of this category
    #[must_use]
    pub const fn foods(self) -> &'static [&'static str] {
        match self {
            Self::Proteins => &[
                "Petto di pollo",
                "Tacchino a fette",
                "Uova",
                "Filetto di salmone",
                "Filetto di merluzzo",
                "Filetto di orata",
                "Tonno al naturale",
                "Hamburger magri",
                "Tofu",
                "Seitan",
                "Legumi cotti",
            ],
            Self::Dairy => &[
                "Skyr",
                "Yogurt greco naturale",
                "Ricotta magra",
                "Latte scremato",
                "Parmigiano Reggiano",
                "Fiocchi di latte",
                "Mozzarella light",
                "Formaggio spalmabile light",
            ],
            Self::Supplements => &[
                "Barrette proteiche",
                "Proteine in polvere",
                "Aminoacidi",
                "Creatina",
                "Multivitaminico",
                "Omega-3",
            ],
            Self::Nuts => &[
                "Mandorle",
                "Noci",
                "Nocciole",
                "Anacardi",
                "Pistacchi non salati",
                "Semi di chia",
                "Semi di lino",
                "Semi di zucca",
                "Semi di girasole",
                "Burro di arachidi naturale",
                "Cioccolato fondente 70%",
            ],
            Self::Fruits => &[
                "Mele",
                "Banane",
                "Kiwi",
                "Arance",
                "Mandarini",
                "Frutti di bosco",
                "Pere",
                "Ananas",
                "Mango",
                "Uva",
                "Melone",
                "Anguria",
                "Pesche",
                "Albicocche",
            ],
            Self::Vegetables => &[
                "Zucchine",
                "Broccoli",
                "Spinaci",
                "Carote",
                "Peperoni",
                "Cetrioli",
                "Pomodori",
                "Melanzane",
                "Cavolfiore",
                "Verza",
                "Insalata mista",
                "Rucola",
                "Radicchio",
                "Finocchi",
                "Asparagi",
                "Zucca",
                "Verdure grigliate miste",
                "Patate dolci",
            ],
            Self::Cereals => &[
                "Riso basmati",
                "Riso integrale",
                "Quinoa",
                "Couscous",
                "Bulgur",
                "Farro",
                "Orzo",
                "Avena",
                "Pane integrale",
                "Pane di segale",
                "Fette biscottate integrali",
                "Pasta integrale",
                "Gallette di mais o riso",
            ],
            Self::Other => &[],
        }
    }

    /// Check exact (case-sensitive) membership
    #[inline]
    #[must_use]
    pub fn contains(self, food: &str) -> bool {
        self.foods().contains(&food)
    }

    /// Look up a category by storage key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// First category whose predefined list contains `food` exactly
    #[must_use]
    pub fn of_predefined(food: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.contains(food))
    }

    /// Whether `food` matches any predefined food ignoring case
    #[must_use]
    pub fn is_predefined_ignore_case(food: &str) -> bool {
        let needle = food.to_lowercase();
        Self::ALL
            .iter()
            .flat_map(|c| c.foods())
            .any(|f| f.to_lowercase() == needle)
    }
}

impl Display for FoodCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FoodCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Icon and display name of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    /// Display icon
    pub icon: &'static str,
    /// Display name
    pub name: &'static str,
}

/// Info for a category key; unknown keys get a placeholder
#[must_use]
pub fn category_info(key: &str) -> CategoryInfo {
    match FoodCategory::from_key(key) {
        Some(category) => CategoryInfo {
            icon: category.icon(),
            name: category.name(),
        },
        None => CategoryInfo {
            icon: "❓",
            name: "Categoria sconosciuta",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_roundtrip() {
        for category in FoodCategory::ALL {
            assert_eq!(FoodCategory::from_key(category.key()), Some(category));
            assert_eq!(category.key().parse::<FoodCategory>().unwrap(), category);
        }
    }

    #[test]
    fn serde_uses_storage_key() {
        let encoded = serde_json::to_string(&FoodCategory::Vegetables).unwrap();
        assert_eq!(encoded, "\"vegetables\"");
    }

    #[test]
    fn unknown_key_fails_to_parse() {
        assert!(matches!(
            "snacks".parse::<FoodCategory>(),
            Err(CatalogError::UnknownCategory(_))
        ));
    }

    #[test]
    fn no_food_is_predefined_twice() {
        let mut seen = HashSet::new();
        for food in FoodCategory::ALL.iter().flat_map(|c| c.foods()) {
            assert!(seen.insert(*food), "{food} appears in two categories");
        }
    }

    #[test]
    fn other_has_no_predefined_foods() {
        assert!(FoodCategory::Other.foods().is_empty());
    }

    #[test]
    fn predefined_lookup() {
        assert_eq!(FoodCategory::of_predefined("Uova"), Some(FoodCategory::Proteins));
        assert_eq!(FoodCategory::of_predefined("uova"), None);
        assert!(FoodCategory::is_predefined_ignore_case("uova"));
        assert!(FoodCategory::is_predefined_ignore_case("RISO BASMATI"));
        assert!(!FoodCategory::is_predefined_ignore_case("Kaki"));
    }

    #[test]
    fn category_info_known_and_unknown() {
        assert_eq!(
            category_info("dairy"),
            CategoryInfo {
                icon: "🥛",
                name: "Latticini"
            }
        );
        assert_eq!(category_info("sweets").name, "Categoria sconosciuta");
    }
}
