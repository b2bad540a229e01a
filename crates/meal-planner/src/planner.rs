//! Planner facade
//!
//! [`Planner`] owns the state store and wires menus, the custom food registry
//! and the shopping list together. Every top-level mutation reports its
//! outcome through the [`Notifier`], and each one persists at most one record,
//! so a failed operation leaves stored state untouched.

use crate::aggregate::aggregate;
use crate::bootstrap::{self, BootstrapOutcome, LEGACY_VERSION};
use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::menu::{Meal, MenuStore, WeekMenu};
use crate::notify::{AlwaysConfirm, Confirm, LogNotifier, Notifier};
use crate::records;
use crate::shopping::{ManualAdd, ShoppingList};
use chrono::NaiveDate;
use meal_calendar::{week_key_of, AvailableWeek, Day, WeekKey};
use meal_catalog::{foods_for_category, Classification, Classify, CustomFoodRegistry, FoodCategory};
use meal_storage::{RecordPath, StateStore, StorageBackend};
use serde_json::{Map, Value};

/// Result of [`Planner::import`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Confirmation refused; nothing changed
    Declined,
    /// Stored records replaced
    Imported {
        /// Records written
        records: usize,
    },
}

/// Meal planner over a storage backend
pub struct Planner<B> {
    store: StateStore<B>,
    config: PlannerConfig,
    notifier: Box<dyn Notifier>,
    confirm: Box<dyn Confirm>,
}

impl<B: StorageBackend> Planner<B> {
    /// Create planner over `backend`, logging notifications and confirming
    /// every prompt
    #[must_use]
    pub fn new(backend: B, config: PlannerConfig) -> Self {
        let store = StateStore::new(backend, config.storage_prefix.clone());
        Self {
            store,
            config,
            notifier: Box::new(LogNotifier),
            confirm: Box::new(AlwaysConfirm),
        }
    }

    /// With notifier
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// With confirmation prompt
    #[must_use]
    pub fn with_confirm(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    /// Underlying state store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &StateStore<B> {
        &self.store
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Menu accessor
    #[inline]
    #[must_use]
    pub fn menus(&self) -> MenuStore<'_, B> {
        MenuStore::new(&self.store)
    }

    fn say(&self, message: &str) {
        self.notifier
            .notify(message, self.config.notification_duration());
    }

    fn report<T>(
        &self,
        result: PlannerResult<T>,
        success: impl FnOnce(&T) -> String,
    ) -> PlannerResult<T> {
        match &result {
            Ok(value) => self.say(&success(value)),
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "operation failed");
                self.say(&format!("Error: {e}"));
            }
        }
        result
    }

    // ---------------------------------------------------------------------
    // Startup
    // ---------------------------------------------------------------------

    /// Seed or migrate stored data
    ///
    /// On first start (no `initialized` record) example data is written for
    /// the week containing `today`, when seeding is enabled. Otherwise a
    /// stored version differing from the configured one triggers migration.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn bootstrap(&self, today: NaiveDate) -> PlannerResult<BootstrapOutcome> {
        let initialized_path = RecordPath::record(records::INITIALIZED);
        let version_path = RecordPath::record(records::VERSION);
        let target = self.config.app_version.as_str();

        let initialized = self
            .store
            .get::<bool>(&initialized_path)?
            .unwrap_or(false);
        if !initialized {
            let outcome = if self.config.seed_example_data {
                let week = week_key_of(today);
                bootstrap::seed_example_data(&self.store, week)?;
                BootstrapOutcome::Seeded(week)
            } else {
                BootstrapOutcome::Initialized
            };
            self.store.set(&initialized_path, &true)?;
            self.store.set(&version_path, target)?;
            return Ok(outcome);
        }

        let stored = self
            .store
            .get::<String>(&version_path)?
            .unwrap_or_else(|| LEGACY_VERSION.to_string());
        if stored == target {
            tracing::debug!(version = target, "stored data up to date");
            return Ok(BootstrapOutcome::UpToDate);
        }
        bootstrap::migrate(&self.store, &stored, target)?;
        self.store.set(&version_path, target)?;
        Ok(BootstrapOutcome::Migrated {
            from: stored,
            to: target.to_string(),
        })
    }

    // ---------------------------------------------------------------------
    // Menus
    // ---------------------------------------------------------------------

    /// Stored menu of `week`
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn week_menu(&self, week: WeekKey) -> PlannerResult<Option<WeekMenu>> {
        self.menus().week(week)
    }

    /// Foods of one meal; empty when unset
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn meal(&self, week: WeekKey, day: Day, meal: Meal) -> PlannerResult<Vec<String>> {
        self.menus().get_meal(week, day, meal)
    }

    /// Replace the foods of one meal
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn set_meal<S: AsRef<str>>(
        &self,
        week: WeekKey,
        day: Day,
        meal: Meal,
        foods: &[S],
    ) -> PlannerResult<()> {
        let result = self.menus().set_meal(week, day, meal, foods);
        self.report(result, |_| {
            format!("{} {} updated for {week}", day.label(), meal.label())
        })
    }

    /// Remove every occurrence of `food` from one meal
    ///
    /// # Errors
    /// Returns [`PlannerError::NotFound`] if the food is not in that meal.
    pub fn remove_food(
        &self,
        week: WeekKey,
        day: Day,
        meal: Meal,
        food: &str,
    ) -> PlannerResult<usize> {
        let result = self.menus().remove_food(week, day, meal, food);
        self.report(result, |_| format!("'{food}' removed"))
    }

    /// Copy the menu of `source` over `target`
    ///
    /// # Errors
    /// Returns [`PlannerError::SourceMissing`] if `source` has no menu.
    pub fn clone_week(&self, source: WeekKey, target: WeekKey) -> PlannerResult<()> {
        let result = self.menus().clone_week(source, target);
        self.report(result, |_| format!("Menu of {source} copied to {target}"))
    }

    /// Stored weeks with approximate date ranges
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn available_weeks(&self) -> PlannerResult<Vec<AvailableWeek>> {
        self.menus().available_weeks()
    }

    // ---------------------------------------------------------------------
    // Foods
    // ---------------------------------------------------------------------

    /// Stored custom food registry, empty when absent
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn custom_foods(&self) -> PlannerResult<CustomFoodRegistry> {
        Ok(self
            .store
            .get_or_default(&RecordPath::record(records::CUSTOM_FOODS))?)
    }

    fn save_custom_foods(&self, registry: &CustomFoodRegistry) -> PlannerResult<()> {
        self.store
            .set(&RecordPath::record(records::CUSTOM_FOODS), registry)?;
        Ok(())
    }

    /// Classify `food` against the predefined table and stored custom foods
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn classify(&self, food: &str) -> PlannerResult<Classification> {
        Ok(self.custom_foods()?.classify(food))
    }

    /// Selectable foods of `category`, predefined and custom, sorted
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn foods_for_category(&self, category: FoodCategory) -> PlannerResult<Vec<String>> {
        Ok(foods_for_category(category, &self.custom_foods()?))
    }

    /// Register a custom food under `category`
    ///
    /// # Errors
    /// Returns [`PlannerError::DuplicateFood`] if the name exists, ignoring
    /// case, as a predefined or custom food.
    pub fn add_custom_food(&self, category: FoodCategory, name: &str) -> PlannerResult<()> {
        let result = self.custom_foods().and_then(|mut registry| {
            registry.add(category, name)?;
            self.save_custom_foods(&registry)
        });
        self.report(result, |_| {
            format!("'{}' added to {}", name.trim(), category.name())
        })
    }

    /// Remove a custom food, reporting whether anything was removed
    ///
    /// # Errors
    /// Returns [`PlannerError::NotFound`] if `name` is a predefined food.
    pub fn remove_custom_food(&self, name: &str) -> PlannerResult<bool> {
        let result = self.custom_foods().and_then(|mut registry| {
            let removed = registry.remove(name)?;
            if removed {
                self.save_custom_foods(&registry)?;
            }
            Ok(removed)
        });
        self.report(result, |removed| {
            if *removed {
                format!("'{name}' removed from custom foods")
            } else {
                format!("'{name}' is not a custom food")
            }
        })
    }

    // ---------------------------------------------------------------------
    // Shopping list
    // ---------------------------------------------------------------------

    /// Stored shopping list, empty when absent
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn shopping_list(&self) -> PlannerResult<ShoppingList> {
        Ok(self
            .store
            .get_or_default(&RecordPath::record(records::SHOPPING_LIST))?)
    }

    /// Apply `change` to the stored list, writing back only what it touched
    fn update_list<T>(
        &self,
        change: impl FnOnce(&mut ShoppingList) -> PlannerResult<T>,
    ) -> PlannerResult<T> {
        let path = RecordPath::record(records::SHOPPING_LIST);
        let mut raw = self
            .store
            .get_value(&path)?
            .unwrap_or_else(|| Value::Object(Map::new()));
        let previous = ShoppingList::from_value(&raw);
        let mut list = previous.clone();
        let value = change(&mut list)?;
        list.apply_to(&previous, &mut raw);
        self.store.set_value(&path, raw)?;
        Ok(value)
    }

    /// Rebuild the shopping list from the menu of `week`
    ///
    /// Completed flags and manual items of the current list are preserved.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn generate_shopping_list(&self, week: WeekKey) -> PlannerResult<ShoppingList> {
        let result = self.derive_shopping_list(week);
        self.report(result, |list| {
            format!("Shopping list generated for {week}: {} items", list.len())
        })
    }

    fn derive_shopping_list(&self, week: WeekKey) -> PlannerResult<ShoppingList> {
        let menu = self.menus().week(week)?;
        let registry = self.custom_foods()?;
        self.update_list(|list| {
            *list = aggregate(menu.as_ref(), &registry, list);
            Ok(list.clone())
        })
    }

    /// Overwrite the quantity of one item, clamped to at least 1
    ///
    /// # Errors
    /// Returns [`PlannerError::NotFound`] if the item is not listed.
    pub fn set_quantity(&self, category: &str, food: &str, quantity: i64) -> PlannerResult<u32> {
        let result = self.update_list(|list| list.set_quantity(category, food, quantity));
        self.report(result, |q| format!("'{food}' quantity set to {q}"))
    }

    /// Flip the completed flag of one item
    ///
    /// # Errors
    /// Returns [`PlannerError::NotFound`] if the item is not listed.
    pub fn toggle_completed(&self, category: &str, food: &str) -> PlannerResult<bool> {
        let result = self.update_list(|list| list.toggle_completed(category, food));
        self.report(result, |done| {
            if *done {
                format!("'{food}' checked off")
            } else {
                format!("'{food}' unchecked")
            }
        })
    }

    /// Delete one item
    ///
    /// # Errors
    /// Returns [`PlannerError::NotFound`] if the item is not listed.
    pub fn remove_item(&self, category: &str, food: &str) -> PlannerResult<()> {
        let result = self.update_list(|list| list.remove_item(category, food).map(|_| ()));
        self.report(result, |_| format!("'{food}' removed from the list"))
    }

    /// Insert or overwrite a manual item
    ///
    /// # Errors
    /// Returns [`PlannerError::InvalidInput`] if the name is empty.
    pub fn add_manual_item(
        &self,
        category: &str,
        food: &str,
        quantity: i64,
    ) -> PlannerResult<ManualAdd> {
        let result = self.update_list(|list| list.add_manual_item(category, food, quantity));
        self.report(result, |outcome| match outcome {
            ManualAdd::Inserted => format!("'{}' added to the list", food.trim()),
            ManualAdd::Updated => format!("'{}' quantity updated", food.trim()),
        })
    }

    /// Uncheck every item
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn reset_all_completed(&self) -> PlannerResult<usize> {
        let result = self.update_list(|list| Ok(list.reset_all_completed()));
        self.report(result, |n| format!("{n} items unchecked"))
    }

    // ---------------------------------------------------------------------
    // Backup
    // ---------------------------------------------------------------------

    /// Every stored record as one JSON document
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn export(&self) -> PlannerResult<String> {
        let result = self.store.export().map_err(PlannerError::from);
        self.report(result, |_| "Data exported".to_string())
    }

    /// Replace every stored record with the contents of `json`
    ///
    /// Asks for confirmation first; a refusal changes nothing.
    ///
    /// # Errors
    /// Returns [`PlannerError::InvalidInput`] if `json` is not a JSON object.
    pub fn import(&self, json: &str) -> PlannerResult<ImportOutcome> {
        if !self
            .confirm
            .confirm("Importing replaces all current data. Continue?")
        {
            tracing::info!("import declined");
            return Ok(ImportOutcome::Declined);
        }
        let result = self
            .store
            .import(json)
            .map(|records| ImportOutcome::Imported { records })
            .map_err(PlannerError::from);
        self.report(result, |_| "Data imported".to_string())
    }

    /// Remove every stored record after confirmation
    ///
    /// Returns `false` when confirmation is refused.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn clear_all_data(&self) -> PlannerResult<bool> {
        if !self
            .confirm
            .confirm("Delete all stored data? This cannot be undone.")
        {
            tracing::info!("clear declined");
            return Ok(false);
        }
        let result = self.store.clear_all().map_err(PlannerError::from);
        self.report(result, |_| "All data deleted".to_string())?;
        Ok(true)
    }
}
