//! Weekly menus
//!
//! A [`WeekMenu`] maps day index to [`DayMenu`], and a day maps [`Meal`] to
//! an ordered list of food names. Duplicates within a meal are allowed and
//! each occurrence counts once toward the shopping list.
//!
//! [`MenuStore`] reads and writes menus under the `weeklyMenus` record,
//! addressing a single week with the dotted path `weeklyMenus.<week-key>`.

use crate::error::{PlannerError, PlannerResult};
use crate::records;
use meal_calendar::{list_available_weeks, AvailableWeek, Day, WeekKey};
use meal_storage::{RecordPath, StateStore, StorageBackend};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Meal slot within a day
///
/// Persisted with English keys; Italian keys from older data are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    /// Morning meal
    #[serde(alias = "colazione")]
    Breakfast,
    /// Midday meal
    #[serde(alias = "pranzo")]
    Lunch,
    /// Afternoon snack
    #[serde(alias = "spuntino")]
    Snack,
    /// Evening meal
    #[serde(alias = "cena")]
    Dinner,
}

impl Meal {
    /// Every meal in day order
    pub const ALL: [Meal; 4] = [Meal::Breakfast, Meal::Lunch, Meal::Snack, Meal::Dinner];

    /// Persisted key
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Snack => "snack",
            Self::Dinner => "dinner",
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Colazione",
            Self::Lunch => "Pranzo",
            Self::Snack => "Spuntino",
            Self::Dinner => "Cena",
        }
    }
}

impl Display for Meal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Meal {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" | "colazione" => Ok(Self::Breakfast),
            "lunch" | "pranzo" => Ok(Self::Lunch),
            "snack" | "spuntino" => Ok(Self::Snack),
            "dinner" | "cena" => Ok(Self::Dinner),
            _ => Err(PlannerError::invalid_input(format!("unknown meal '{s}'"))),
        }
    }
}

/// Parse a day index, rejecting anything outside 0..=6
///
/// # Errors
/// Returns [`PlannerError::InvalidInput`] for out-of-range indices.
pub fn day_from_index(index: i64) -> PlannerResult<Day> {
    u8::try_from(index)
        .ok()
        .and_then(Day::from_index)
        .ok_or_else(|| PlannerError::invalid_input(format!("day index {index} outside 0..=6")))
}

/// Foods per meal for one day
pub type DayMenu = BTreeMap<Meal, Vec<String>>;

/// Menu of one week, keyed by day index as persisted (`"0"` = Monday)
///
/// Decoding is lenient: unknown meal keys, slots that are not arrays and
/// non-string entries are skipped, so one bad slot never hides the rest of
/// the week. Skipped data stays in storage untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeekMenu {
    days: BTreeMap<String, DayMenu>,
}

impl<'de> Deserialize<'de> for WeekMenu {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(&Value::deserialize(deserializer)?))
    }
}

fn day_from_value(day: &str, value: &Map<String, Value>) -> DayMenu {
    let mut current = DayMenu::new();
    let mut legacy = DayMenu::new();
    for (key, slot) in value {
        let Ok(meal) = key.parse::<Meal>() else {
            tracing::debug!(day, key = %key, "unknown meal slot skipped");
            continue;
        };
        let Some(entries) = slot.as_array() else {
            tracing::warn!(day, %meal, "meal slot is not a list, skipped");
            continue;
        };
        let foods = entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        if key == meal.key() {
            current.insert(meal, foods);
        } else {
            legacy.entry(meal).or_insert(foods);
        }
    }
    for (meal, foods) in legacy {
        current.entry(meal).or_insert(foods);
    }
    current
}

impl WeekMenu {
    /// Create empty menu
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode whatever is usable in a stored week
    ///
    /// Current meal keys win over their Italian aliases when both are present.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(days) = value.as_object() else {
            tracing::warn!("week menu is not an object, read as empty");
            return Self::default();
        };
        let days = days
            .iter()
            .filter_map(|(day, meals)| match meals.as_object() {
                Some(meals) => Some((day.clone(), day_from_value(day, meals))),
                None => {
                    tracing::warn!(day = %day, "day menu is not an object, skipped");
                    None
                }
            })
            .collect();
        Self { days }
    }

    /// Meals of `day`
    #[must_use]
    pub fn day(&self, day: Day) -> Option<&DayMenu> {
        self.days.get(&day.index().to_string())
    }

    /// Foods of one meal; empty when unset
    #[must_use]
    pub fn meal(&self, day: Day, meal: Meal) -> &[String] {
        self.day(day)
            .and_then(|d| d.get(&meal))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the meal slot has been set (possibly to an empty list)
    #[must_use]
    pub fn has_meal(&self, day: Day, meal: Meal) -> bool {
        self.day(day).is_some_and(|d| d.contains_key(&meal))
    }

    /// Replace the foods of one meal
    pub fn set_meal(&mut self, day: Day, meal: Meal, foods: Vec<String>) {
        self.days
            .entry(day.index().to_string())
            .or_default()
            .insert(meal, foods);
    }

    /// Every food occurrence, day by day and meal by meal
    ///
    /// Days are visited as stored, including indices no [`Day`] names.
    pub fn foods(&self) -> impl Iterator<Item = &str> {
        self.days
            .values()
            .flat_map(|day| day.values())
            .flat_map(|foods| foods.iter().map(String::as_str))
    }

    /// Whether no day has any meal set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.values().all(BTreeMap::is_empty)
    }
}

/// Menu accessor over the `weeklyMenus` record
#[derive(Debug)]
pub struct MenuStore<'a, B> {
    store: &'a StateStore<B>,
}

impl<'a, B: StorageBackend> MenuStore<'a, B> {
    /// Create accessor over `store`
    #[inline]
    #[must_use]
    pub fn new(store: &'a StateStore<B>) -> Self {
        Self { store }
    }

    fn week_path(week: WeekKey) -> RecordPath {
        RecordPath::record(records::WEEKLY_MENUS).child(week.to_string())
    }

    fn slot_path(week: WeekKey, day: Day, meal: Meal) -> RecordPath {
        Self::week_path(week)
            .child(day.index().to_string())
            .child(meal.key())
    }

    /// Stored menu of `week`
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn week(&self, week: WeekKey) -> PlannerResult<Option<WeekMenu>> {
        Ok(self.store.get(&Self::week_path(week))?)
    }

    /// Foods of one meal; empty when week, day or meal is unset
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn get_meal(&self, week: WeekKey, day: Day, meal: Meal) -> PlannerResult<Vec<String>> {
        Ok(self
            .week(week)?
            .map(|menu| menu.meal(day, meal).to_vec())
            .unwrap_or_default())
    }

    /// Replace the foods of one meal, creating week and day as needed
    ///
    /// Only the addressed slot is written; the rest of the week is kept as
    /// stored.
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
        let foods: Vec<&str> = foods.iter().map(AsRef::as_ref).collect();
        tracing::debug!(%week, day = day.index(), %meal, count = foods.len(), "set meal");
        self.store.set(&Self::slot_path(week, day, meal), &foods)?;
        Ok(())
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
        if self.store.get_value(&Self::week_path(week))?.is_none() {
            return Err(PlannerError::not_found(format!("no menu for week {week}")));
        }
        let path = Self::slot_path(week, day, meal);
        let mut entries = match self.store.get_value(&path)? {
            Some(Value::Array(entries)) => entries,
            _ => Vec::new(),
        };
        let before = entries.len();
        entries.retain(|entry| entry.as_str() != Some(food));
        let removed = before - entries.len();
        if removed == 0 {
            return Err(PlannerError::not_found(format!(
                "'{food}' not in {} {} of {week}",
                day.label(),
                meal.label()
            )));
        }
        self.store.set_value(&path, Value::Array(entries))?;
        Ok(removed)
    }

    /// Copy the whole menu of `source` over `target`
    ///
    /// The copy shares nothing with the source; later edits to either week
    /// leave the other untouched.
    ///
    /// # Errors
    /// Returns [`PlannerError::SourceMissing`] if `source` has no stored data.
    pub fn clone_week(&self, source: WeekKey, target: WeekKey) -> PlannerResult<()> {
        let Some(menu) = self.store.get_value(&Self::week_path(source))? else {
            return Err(PlannerError::SourceMissing(source));
        };
        tracing::info!(%source, %target, "clone week");
        self.store.set_value(&Self::week_path(target), menu)?;
        Ok(())
    }

    /// Every week key with stored menu data, in storage order
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn list_weeks(&self) -> PlannerResult<Vec<String>> {
        let menus = self
            .store
            .get_value(&RecordPath::record(records::WEEKLY_MENUS))?;
        Ok(match menus {
            Some(Value::Object(map)) => map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, _)| k)
                .collect(),
            _ => Vec::new(),
        })
    }

    /// Stored weeks with approximate date ranges, sorted by key
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn available_weeks(&self) -> PlannerResult<Vec<AvailableWeek>> {
        Ok(list_available_weeks(self.list_weeks()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meal_storage::MemoryBackend;
    use pretty_assertions::assert_eq;

    fn week(s: &str) -> WeekKey {
        s.parse().unwrap()
    }

    fn store() -> StateStore<MemoryBackend> {
        StateStore::new(MemoryBackend::new(), "t_")
    }

    #[test]
    fn meal_parse_accepts_italian() {
        assert_eq!("pranzo".parse::<Meal>().unwrap(), Meal::Lunch);
        assert_eq!("Dinner".parse::<Meal>().unwrap(), Meal::Dinner);
        assert!("brunch".parse::<Meal>().is_err());
    }

    #[test]
    fn legacy_italian_keys_decode() {
        let menu: WeekMenu =
            serde_json::from_str(r#"{"0": {"colazione": ["Uova"], "cena": ["Riso"]}}"#).unwrap();
        assert_eq!(menu.meal(Day::Monday, Meal::Breakfast), ["Uova"]);
        assert_eq!(menu.meal(Day::Monday, Meal::Dinner), ["Riso"]);
    }

    #[test]
    fn persisted_with_english_keys() {
        let mut menu = WeekMenu::new();
        menu.set_meal(Day::Tuesday, Meal::Snack, vec!["Mela".into()]);
        let json = serde_json::to_string(&menu).unwrap();
        assert_eq!(json, r#"{"1":{"snack":["Mela"]}}"#);
    }

    #[test]
    fn day_index_validation() {
        assert_eq!(day_from_index(0).unwrap(), Day::Monday);
        assert_eq!(day_from_index(6).unwrap(), Day::Sunday);
        assert!(matches!(day_from_index(7), Err(PlannerError::InvalidInput(_))));
        assert!(matches!(day_from_index(-1), Err(PlannerError::InvalidInput(_))));
    }

    #[test]
    fn set_then_get_meal() {
        let store = store();
        let menus = MenuStore::new(&store);
        let w = week("2025-W20");
        menus
            .set_meal(w, Day::Monday, Meal::Lunch, &["Riso basmati", "Petto di pollo"])
            .unwrap();
        assert_eq!(
            menus.get_meal(w, Day::Monday, Meal::Lunch).unwrap(),
            vec!["Riso basmati".to_string(), "Petto di pollo".to_string()]
        );
        assert!(menus.get_meal(w, Day::Friday, Meal::Lunch).unwrap().is_empty());
        assert!(menus
            .get_meal(week("2030-W01"), Day::Monday, Meal::Lunch)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn set_meal_keeps_other_slots() {
        let store = store();
        let menus = MenuStore::new(&store);
        let w = week("2025-W20");
        menus.set_meal(w, Day::Monday, Meal::Lunch, &["Riso"]).unwrap();
        menus.set_meal(w, Day::Monday, Meal::Dinner, &["Pesce"]).unwrap();
        let menu = menus.week(w).unwrap().unwrap();
        assert_eq!(menu.meal(Day::Monday, Meal::Lunch), ["Riso"]);
        assert_eq!(menu.meal(Day::Monday, Meal::Dinner), ["Pesce"]);
    }

    #[test]
    fn set_meal_with_empty_list_is_stored() {
        let store = store();
        let menus = MenuStore::new(&store);
        let w = week("2025-W20");
        menus.set_meal::<&str>(w, Day::Monday, Meal::Lunch, &[]).unwrap();
        let menu = menus.week(w).unwrap().unwrap();
        assert!(menu.has_meal(Day::Monday, Meal::Lunch));
        assert!(menu.meal(Day::Monday, Meal::Lunch).is_empty());
        assert!(!menu.is_empty());
    }

    #[test]
    fn remove_food_removes_all_occurrences() {
        let store = store();
        let menus = MenuStore::new(&store);
        let w = week("2025-W20");
        menus
            .set_meal(w, Day::Monday, Meal::Lunch, &["Riso", "Pollo", "Riso"])
            .unwrap();
        assert_eq!(menus.remove_food(w, Day::Monday, Meal::Lunch, "Riso").unwrap(), 2);
        assert_eq!(menus.get_meal(w, Day::Monday, Meal::Lunch).unwrap(), vec!["Pollo"]);
    }

    #[test]
    fn remove_absent_food_is_not_found() {
        let store = store();
        let menus = MenuStore::new(&store);
        let w = week("2025-W20");
        assert!(matches!(
            menus.remove_food(w, Day::Monday, Meal::Lunch, "Riso"),
            Err(PlannerError::NotFound(_))
        ));
        menus.set_meal(w, Day::Monday, Meal::Lunch, &["Pollo"]).unwrap();
        assert!(matches!(
            menus.remove_food(w, Day::Monday, Meal::Lunch, "Riso"),
            Err(PlannerError::NotFound(_))
        ));
    }

    #[test]
    fn clone_missing_source_fails() {
        let store = store();
        let menus = MenuStore::new(&store);
        let err = menus
            .clone_week(week("2025-W19"), week("2025-W20"))
            .unwrap_err();
        assert!(matches!(err, PlannerError::SourceMissing(w) if w == week("2025-W19")));
        assert!(menus.list_weeks().unwrap().is_empty());
    }

    #[test]
    fn clone_is_independent() {
        let store = store();
        let menus = MenuStore::new(&store);
        let (src, dst) = (week("2025-W19"), week("2025-W20"));
        menus.set_meal(src, Day::Monday, Meal::Lunch, &["Riso"]).unwrap();
        menus.clone_week(src, dst).unwrap();
        menus.set_meal(dst, Day::Monday, Meal::Lunch, &["Pasta"]).unwrap();
        assert_eq!(menus.get_meal(src, Day::Monday, Meal::Lunch).unwrap(), vec!["Riso"]);
        assert_eq!(menus.get_meal(dst, Day::Monday, Meal::Lunch).unwrap(), vec!["Pasta"]);
    }

    #[test]
    fn list_and_describe_weeks() {
        let store = store();
        let menus = MenuStore::new(&store);
        menus.set_meal(week("2025-W20"), Day::Monday, Meal::Lunch, &["Riso"]).unwrap();
        menus.set_meal(week("2025-W02"), Day::Monday, Meal::Lunch, &["Riso"]).unwrap();
        let listed = menus.list_weeks().unwrap();
        assert_eq!(listed.len(), 2);
        let available = menus.available_weeks().unwrap();
        assert_eq!(available[0].key, "2025-W02");
        assert_eq!(available[1].key, "2025-W20");
    }

    #[test]
    fn malformed_slots_are_skipped_on_read() {
        let menu: WeekMenu = serde_json::from_str(
            r#"{"0": {"lunch": ["Riso basmati"], "merenda": ["Mele"], "dinner": "Pesce"},
                "1": {"dinner": ["Uova", 3, "Uova"]},
                "2": "garbage"}"#,
        )
        .unwrap();
        assert_eq!(menu.meal(Day::Monday, Meal::Lunch), ["Riso basmati"]);
        assert!(!menu.has_meal(Day::Monday, Meal::Dinner));
        assert_eq!(menu.meal(Day::Tuesday, Meal::Dinner), ["Uova", "Uova"]);
        assert!(menu.day(Day::Wednesday).is_none());
        assert_eq!(menu.foods().count(), 3);
    }

    #[test]
    fn current_key_wins_over_alias() {
        let menu: WeekMenu =
            serde_json::from_str(r#"{"0": {"pranzo": ["Vecchio"], "lunch": ["Nuovo"]}}"#).unwrap();
        assert_eq!(menu.meal(Day::Monday, Meal::Lunch), ["Nuovo"]);
    }

    #[test]
    fn edits_keep_unknown_stored_data() {
        let store = store();
        let menus = MenuStore::new(&store);
        let w = week("2025-W20");
        let raw = serde_json::json!({
            "0": {"lunch": ["Riso basmati", "Pollo"], "merenda": ["Mele"]},
            "1": {"dinner": ["Uova", "Uova"]},
            "6": "garbage"
        });
        store.set_value(&MenuStore::<MemoryBackend>::week_path(w), raw).unwrap();

        menus.set_meal(w, Day::Wednesday, Meal::Lunch, &["Farro"]).unwrap();
        menus.remove_food(w, Day::Monday, Meal::Lunch, "Pollo").unwrap();

        let stored = store
            .get_value(&MenuStore::<MemoryBackend>::week_path(w))
            .unwrap()
            .unwrap();
        assert_eq!(
            stored,
            serde_json::json!({
                "0": {"lunch": ["Riso basmati"], "merenda": ["Mele"]},
                "1": {"dinner": ["Uova", "Uova"]},
                "6": "garbage",
                "2": {"lunch": ["Farro"]}
            })
        );
    }

    #[test]
    fn foods_iterates_every_occurrence() {
        let mut menu = WeekMenu::new();
        menu.set_meal(Day::Monday, Meal::Lunch, vec!["Riso".into(), "Riso".into()]);
        menu.set_meal(Day::Sunday, Meal::Dinner, vec!["Pesce".into()]);
        let foods: Vec<&str> = menu.foods().collect();
        assert_eq!(foods, vec!["Riso", "Riso", "Pesce"]);
    }
}
