//! Persisted record names, stored under the configured prefix

/// Week key to [`WeekMenu`](crate::WeekMenu)
pub const WEEKLY_MENUS: &str = "weeklyMenus";

/// Category key to custom food names
pub const CUSTOM_FOODS: &str = "customFoods";

/// Current [`ShoppingList`](crate::ShoppingList)
pub const SHOPPING_LIST: &str = "shoppingList";

/// Set once example data has been seeded
pub const INITIALIZED: &str = "initialized";

/// Data-format version last written
pub const VERSION: &str = "version";
