//! Meal Planner
//!
//! Weekly menus and the shopping list derived from them.
//!
//! # Core Concepts
//!
//! - [`Planner`]: Facade over stored menus, custom foods and the shopping list
//! - [`MenuStore`]: Per-week menus addressed as `weeklyMenus.<week-key>`
//! - [`ShoppingList`]: Category to food to quantity and completed flag
//! - [`aggregate`]: Menu to shopping list, preserving completion and manual items
//! - [`Notifier`] / [`Confirm`]: Feedback and confirmation hooks
//!
//! # Example
//!
//! ```rust,ignore
//! use meal_calendar::Day;
//! use meal_planner::{Meal, Planner, PlannerConfig};
//! use meal_storage::MemoryBackend;
//!
//! let planner = Planner::new(MemoryBackend::new(), PlannerConfig::default());
//! let week = "2025-W20".parse()?;
//! planner.set_meal(week, Day::Monday, Meal::Lunch, &["Riso basmati", "Petto di pollo"])?;
//! let list = planner.generate_shopping_list(week)?;
//! assert_eq!(list.get("cereals", "Riso basmati").unwrap().quantity, 1);
//! ```

#![warn(unreachable_pub)]

mod aggregate;
mod bootstrap;
mod config;
mod error;
mod menu;
mod notify;
mod planner;
pub mod records;
mod shopping;

pub use aggregate::aggregate;
pub use bootstrap::{
    example_custom_foods, example_menu, example_shopping_list, BootstrapOutcome, LEGACY_VERSION,
};
pub use config::{PlannerConfig, APP_VERSION};
pub use error::{PlannerError, PlannerResult};
pub use menu::{day_from_index, DayMenu, Meal, MenuStore, WeekMenu};
pub use notify::{AlwaysConfirm, Confirm, LogNotifier, Notifier};
pub use planner::{ImportOutcome, Planner};
pub use shopping::{CategoryItems, CategorySummary, ManualAdd, ShoppingItem, ShoppingList};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
