//! Meal Planner Catalog
//!
//! Food categories and how a food name is mapped onto one.
//!
//! # Core Concepts
//!
//! - [`FoodCategory`]: Predefined categories in a fixed, documented order
//! - [`classify`]: Predefined table first, custom registry second, sentinel last
//! - [`CustomFoodRegistry`]: User-added foods, duplicate-checked ignoring case
//!
//! # Example
//!
//! ```rust,ignore
//! use meal_catalog::{classify, CustomFoodRegistry, FoodCategory};
//!
//! let mut custom = CustomFoodRegistry::new();
//! custom.add(FoodCategory::Fruits, "Kaki")?;
//!
//! assert_eq!(classify("Uova", &custom).key, "proteins");
//! assert_eq!(classify("Kaki", &custom).key, "fruits");
//! ```

#![warn(unreachable_pub)]

mod category;
mod classify;
mod error;
mod registry;

pub use category::{category_info, CategoryInfo, FoodCategory};
pub use classify::{classify, Classification, ClassificationSource, Classify, UNCATEGORIZED_KEY};
pub use error::{CatalogError, CatalogResult};
pub use registry::{foods_for_category, CustomFoodRegistry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
