//! First-start seeding and data-format migration

use crate::error::PlannerResult;
use crate::menu::{Meal, WeekMenu};
use crate::records;
use crate::shopping::{ShoppingItem, ShoppingList};
use meal_calendar::{Day, WeekKey};
use meal_catalog::CustomFoodRegistry;
use meal_storage::{RecordPath, StateStore, StorageBackend};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Version assumed when storage carries none
pub const LEGACY_VERSION: &str = "1.0.0";

/// What `bootstrap` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// First start; example data written for the given week
    Seeded(WeekKey),
    /// First start with seeding disabled
    Initialized,
    /// Stored data upgraded between versions
    Migrated {
        /// Version found in storage
        from: String,
        /// Version written
        to: String,
    },
    /// Stored data already current
    UpToDate,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Example menu covering Monday to Wednesday
#[must_use]
pub fn example_menu() -> WeekMenu {
    let mut menu = WeekMenu::new();
    let plan: [(Day, [(Meal, &[&str]); 3]); 3] = [
        (
            Day::Monday,
            [
                (Meal::Lunch, &["Riso basmati", "Petto di pollo", "Zucchine"]),
                (Meal::Snack, &["Skyr", "Frutti di bosco", "Mandorle"]),
                (Meal::Dinner, &["Petto di pollo", "Quinoa", "Zucchine"]),
            ],
        ),
        (
            Day::Tuesday,
            [
                (Meal::Lunch, &["Pasta integrale", "Hamburger magri", "Insalata mista"]),
                (Meal::Snack, &["Barrette proteiche", "Mele"]),
                (Meal::Dinner, &["Filetto di merluzzo", "Patate dolci", "Spinaci"]),
            ],
        ),
        (
            Day::Wednesday,
            [
                (Meal::Lunch, &["Farro", "Tonno al naturale", "Pomodori"]),
                (Meal::Snack, &["Yogurt greco naturale", "Pere", "Noci"]),
                (Meal::Dinner, &["Uova", "Pane integrale", "Insalata mista"]),
            ],
        ),
    ];
    for (day, meals) in plan {
        for (meal, foods) in meals {
            menu.set_meal(day, meal, strings(foods));
        }
    }
    menu
}

/// Example custom foods
#[must_use]
pub fn example_custom_foods() -> CustomFoodRegistry {
    [
        ("proteins", strings(&["Salmone affumicato"])),
        ("vegetables", strings(&["Carciofi"])),
        ("fruits", strings(&["Kaki"])),
    ]
    .into_iter()
    .collect()
}

/// Example shopping list
#[must_use]
pub fn example_shopping_list() -> ShoppingList {
    let mut list = ShoppingList::new();
    let entries: [(&str, &str, u32); 8] = [
        ("proteins", "Petto di pollo", 3),
        ("proteins", "Tonno al naturale", 2),
        ("cereals", "Riso basmati", 1),
        ("cereals", "Quinoa", 1),
        ("cereals", "Pasta integrale", 1),
        ("vegetables", "Zucchine", 2),
        ("vegetables", "Insalata mista", 1),
        ("vegetables", "Spinaci", 1),
    ];
    for (category, food, quantity) in entries {
        list.insert(category, food, ShoppingItem::new(quantity));
    }
    list
}

/// Overwrite menus, custom foods and shopping list with example data
///
/// # Errors
/// Returns error if storage fails.
pub(crate) fn seed_example_data<B: StorageBackend>(
    store: &StateStore<B>,
    week: WeekKey,
) -> PlannerResult<()> {
    tracing::info!(%week, "seeding example data");
    let menus: BTreeMap<String, WeekMenu> = [(week.to_string(), example_menu())].into();
    store.set(&RecordPath::record(records::WEEKLY_MENUS), &menus)?;
    store.set(&RecordPath::record(records::CUSTOM_FOODS), &example_custom_foods())?;
    store.set(&RecordPath::record(records::SHOPPING_LIST), &example_shopping_list())?;
    Ok(())
}

/// Upgrade stored data from `from` to `to`
///
/// Data written before 1.1.0 keys meals in Italian; those keys are renamed in
/// place. Anything else stored in a week, including slots that are not meal
/// lists, is kept as it is.
///
/// # Errors
/// Returns error if storage fails.
pub(crate) fn migrate<B: StorageBackend>(store: &StateStore<B>, from: &str, to: &str) -> PlannerResult<()> {
    tracing::info!(from, to, "migrating stored data");
    if from != LEGACY_VERSION {
        return Ok(());
    }

    let path = RecordPath::record(records::WEEKLY_MENUS);
    let Some(Value::Object(mut menus)) = store.get_value(&path)? else {
        return Ok(());
    };
    let mut renamed = 0usize;
    for (week, raw) in &mut menus {
        let Value::Object(days) = raw else {
            tracing::warn!(%week, "week left in legacy form");
            continue;
        };
        for day in days.values_mut().filter_map(Value::as_object_mut) {
            renamed += rename_meal_keys(day);
        }
    }
    store.set_value(&path, Value::Object(menus))?;
    tracing::debug!(renamed, "weekly menus rewritten");
    Ok(())
}

/// Rename Italian meal keys of one day; an existing current key is kept
fn rename_meal_keys(day: &mut Map<String, Value>) -> usize {
    let legacy: Vec<(String, Meal)> = day
        .keys()
        .filter_map(|key| {
            let meal = key.parse::<Meal>().ok()?;
            (key != meal.key()).then(|| (key.clone(), meal))
        })
        .collect();
    for (key, meal) in &legacy {
        if let Some(foods) = day.remove(key) {
            day.entry(meal.key()).or_insert(foods);
        }
    }
    legacy.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meal_storage::MemoryBackend;
    use pretty_assertions::assert_eq;

    #[test]
    fn example_menu_shape() {
        let menu = example_menu();
        assert_eq!(
            menu.meal(Day::Monday, Meal::Lunch),
            ["Riso basmati", "Petto di pollo", "Zucchine"]
        );
        assert!(menu.day(Day::Thursday).is_none());
        assert_eq!(menu.foods().count(), 26);
    }

    #[test]
    fn seed_writes_three_records() {
        let store = StateStore::new(MemoryBackend::new(), "t_");
        let week: WeekKey = "2025-W20".parse().unwrap();
        seed_example_data(&store, week).unwrap();

        let menu: WeekMenu = store
            .get(&"weeklyMenus.2025-W20".parse().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(menu, example_menu());
        let custom: CustomFoodRegistry = store
            .get(&RecordPath::record(records::CUSTOM_FOODS))
            .unwrap()
            .unwrap();
        assert_eq!(custom.foods("fruits"), ["Kaki"]);
        let list: ShoppingList = store
            .get(&RecordPath::record(records::SHOPPING_LIST))
            .unwrap()
            .unwrap();
        assert_eq!(list.get("proteins", "Petto di pollo").unwrap().quantity, 3);
    }

    #[test]
    fn migrate_rewrites_italian_meal_keys() {
        let store = StateStore::new(MemoryBackend::new(), "t_");
        let legacy: Value = serde_json::from_str(
            r#"{"2025-W01": {"0": {"pranzo": ["Riso"], "merenda": ["Mele"]}, "1": {"cena": "x"}},
                "2025-W02": "garbage"}"#,
        )
        .unwrap();
        store
            .set_value(&RecordPath::record(records::WEEKLY_MENUS), legacy)
            .unwrap();

        migrate(&store, "1.0.0", "1.1.0").unwrap();

        let week = store
            .get_value(&"weeklyMenus.2025-W01.0".parse().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(week, serde_json::json!({"lunch": ["Riso"], "merenda": ["Mele"]}));
        let odd_slot = store
            .get_value(&"weeklyMenus.2025-W01.1".parse().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(odd_slot, serde_json::json!({"dinner": "x"}));
        let untouched = store
            .get_value(&"weeklyMenus.2025-W02".parse().unwrap())
            .unwrap();
        assert_eq!(untouched, Some(Value::String("garbage".into())));
    }

    #[test]
    fn migrate_from_current_is_noop() {
        let store = StateStore::new(MemoryBackend::new(), "t_");
        migrate(&store, "1.1.0", "1.2.0").unwrap();
        assert!(store.record_names().unwrap().is_empty());
    }
}
