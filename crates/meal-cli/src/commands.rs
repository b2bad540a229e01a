//! Subcommand dispatch
//!
//! Results go to `out`; notifications and prompts go through the planner's
//! hooks.

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::ArgMatches;
use meal_calendar::{week_dates_of, Day, WeekKey, WeekNavigator};
use meal_catalog::FoodCategory;
use meal_planner::{day_from_index, ImportOutcome, Meal, Planner};
use meal_storage::StorageBackend;
use std::io::Write;
use std::path::PathBuf;

fn required<'a>(args: &'a ArgMatches, id: &str) -> Result<&'a String> {
    args.get_one::<String>(id)
        .ok_or_else(|| anyhow!("missing argument <{id}>"))
}

fn navigator(today: NaiveDate, offset: i32) -> WeekNavigator {
    let mut nav = WeekNavigator::new(today);
    nav.step(offset);
    nav
}

fn resolve_week(args: &ArgMatches, today: NaiveDate) -> Result<WeekKey> {
    if let Some(key) = args.get_one::<String>("week") {
        return key.parse().with_context(|| format!("bad week key '{key}'"));
    }
    let offset = args.get_one::<i32>("offset").copied().unwrap_or(0);
    Ok(navigator(today, offset).current_key()?)
}

fn parse_week(key: &str) -> Result<WeekKey> {
    key.parse().with_context(|| format!("bad week key '{key}'"))
}

fn slot(args: &ArgMatches) -> Result<(Day, Meal)> {
    let day = args
        .get_one::<i64>("day")
        .copied()
        .ok_or_else(|| anyhow!("missing argument <day>"))?;
    Ok((day_from_index(day)?, required(args, "meal")?.parse()?))
}

fn category(args: &ArgMatches) -> Result<FoodCategory> {
    let key = required(args, "category")?;
    key.parse()
        .map_err(|_| anyhow!("unknown category '{key}'"))
}

/// Run the selected subcommand
pub(crate) fn run<B: StorageBackend>(
    planner: &Planner<B>,
    matches: &ArgMatches,
    today: NaiveDate,
    out: &mut dyn Write,
) -> Result<()> {
    let Some((name, args)) = matches.subcommand() else {
        bail!("no subcommand given");
    };
    tracing::debug!(command = name, "dispatch");

    match name {
        "week" => {
            let offset = args.get_one::<i32>("offset").copied().unwrap_or(0);
            let nav = navigator(today, offset);
            writeln!(out, "{}  {}", nav.current_key()?, nav.current_range()?)?;
        }
        "weeks" => {
            for week in planner.available_weeks()? {
                writeln!(out, "{}", week.display_name)?;
            }
        }
        "show" => {
            let week = resolve_week(args, today)?;
            print_menu(planner, week, out)?;
        }
        "set" => {
            let week = resolve_week(args, today)?;
            let (day, meal) = slot(args)?;
            let foods: Vec<&String> = args
                .get_many::<String>("foods")
                .map(Iterator::collect)
                .unwrap_or_default();
            planner.set_meal(week, day, meal, &foods)?;
        }
        "remove-food" => {
            let week = resolve_week(args, today)?;
            let (day, meal) = slot(args)?;
            planner.remove_food(week, day, meal, required(args, "food")?)?;
        }
        "clone" => {
            let source = parse_week(required(args, "source")?)?;
            let target = match args.get_one::<String>("target") {
                Some(key) => parse_week(key)?,
                None => navigator(today, 0).current_key()?,
            };
            planner.clone_week(source, target)?;
        }
        "generate" => {
            let week = resolve_week(args, today)?;
            planner.generate_shopping_list(week)?;
            print_list(planner, out)?;
        }
        "list" => print_list(planner, out)?,
        "add-item" => {
            let qty = args.get_one::<i64>("qty").copied().unwrap_or(1);
            planner.add_manual_item(required(args, "category")?, required(args, "name")?, qty)?;
        }
        "set-qty" => {
            let qty = args
                .get_one::<i64>("qty")
                .copied()
                .ok_or_else(|| anyhow!("missing argument <qty>"))?;
            planner.set_quantity(required(args, "category")?, required(args, "name")?, qty)?;
        }
        "toggle" => {
            planner.toggle_completed(required(args, "category")?, required(args, "name")?)?;
        }
        "remove-item" => {
            planner.remove_item(required(args, "category")?, required(args, "name")?)?;
        }
        "reset" => {
            planner.reset_all_completed()?;
        }
        "foods" => {
            for food in planner.foods_for_category(category(args)?)? {
                writeln!(out, "{food}")?;
            }
        }
        "classify" => {
            let food = required(args, "food")?;
            let c = planner.classify(food)?;
            writeln!(out, "{food}: {} {} ({})", c.icon, c.name, c.key)?;
        }
        "custom" => run_custom(planner, args, out)?,
        "export" => {
            let json = planner.export()?;
            match args.get_one::<PathBuf>("output") {
                Some(path) => std::fs::write(path, json)
                    .with_context(|| format!("cannot write {}", path.display()))?,
                None => writeln!(out, "{json}")?,
            }
        }
        "import" => {
            let path = args
                .get_one::<PathBuf>("file")
                .ok_or_else(|| anyhow!("missing argument <file>"))?;
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            match planner.import(&json)? {
                ImportOutcome::Declined => writeln!(out, "Import cancelled")?,
                ImportOutcome::Imported { records } => {
                    writeln!(out, "{records} records imported")?;
                }
            }
        }
        "clear" => {
            if !planner.clear_all_data()? {
                writeln!(out, "Nothing deleted")?;
            }
        }
        other => bail!("unknown command '{other}'"),
    }
    Ok(())
}

fn run_custom<B: StorageBackend>(
    planner: &Planner<B>,
    matches: &ArgMatches,
    out: &mut dyn Write,
) -> Result<()> {
    match matches.subcommand() {
        Some(("add", args)) => planner.add_custom_food(category(args)?, required(args, "name")?)?,
        Some(("remove", args)) => {
            planner.remove_custom_food(required(args, "name")?)?;
        }
        Some(("list", _)) => {
            for (key, foods) in planner.custom_foods()?.iter() {
                if !foods.is_empty() {
                    writeln!(out, "{key}: {}", foods.join(", "))?;
                }
            }
        }
        _ => bail!("expected one of: add, remove, list"),
    }
    Ok(())
}

fn print_menu<B: StorageBackend>(
    planner: &Planner<B>,
    week: WeekKey,
    out: &mut dyn Write,
) -> Result<()> {
    let menu = planner.week_menu(week)?.unwrap_or_default();
    let range = meal_calendar::approx_date_of(week).map(week_dates_of);
    match range {
        Some(range) => writeln!(out, "{week} ({range})")?,
        None => writeln!(out, "{week}")?,
    }
    for day in Day::ALL {
        let meals: Vec<_> = Meal::ALL
            .into_iter()
            .filter(|m| !menu.meal(day, *m).is_empty())
            .collect();
        if meals.is_empty() {
            continue;
        }
        writeln!(out, "{}", day.label())?;
        for meal in meals {
            writeln!(out, "  {}: {}", meal.label(), menu.meal(day, meal).join(", "))?;
        }
    }
    Ok(())
}

fn print_list<B: StorageBackend>(planner: &Planner<B>, out: &mut dyn Write) -> Result<()> {
    let list = planner.shopping_list()?;
    let summaries = list.summaries();
    if summaries.is_empty() {
        writeln!(out, "Shopping list is empty")?;
        return Ok(());
    }
    for summary in summaries {
        writeln!(
            out,
            "{} {} ({}/{})",
            summary.icon, summary.name, summary.completed, summary.total
        )?;
        for (food, item) in list.items_sorted(&summary.key) {
            let mark = if item.completed { "x" } else { " " };
            writeln!(out, "  [{mark}] {food} x{}", item.quantity)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command;
    use meal_planner::PlannerConfig;
    use meal_storage::MemoryBackend;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 14).unwrap()
    }

    fn planner() -> Planner<MemoryBackend> {
        Planner::new(
            MemoryBackend::new(),
            PlannerConfig::new().with_seed_example_data(false),
        )
    }

    fn exec(planner: &Planner<MemoryBackend>, argv: &[&str]) -> Result<String> {
        let matches = command().try_get_matches_from(
            std::iter::once("mealplan").chain(argv.iter().copied()),
        )?;
        let mut out = Vec::new();
        run(planner, &matches, today(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn week_prints_key_and_range() {
        let planner = planner();
        assert_eq!(
            exec(&planner, &["week"]).unwrap(),
            "2025-W20  12/05/2025 - 18/05/2025\n"
        );
        assert!(exec(&planner, &["week", "--offset", "-20"])
            .unwrap()
            .starts_with("2024-W52"));
    }

    #[test]
    fn set_show_generate_list() {
        let planner = planner();
        exec(&planner, &["set", "0", "pranzo", "Riso basmati", "Petto di pollo"]).unwrap();
        exec(&planner, &["set", "0", "dinner", "Petto di pollo"]).unwrap();

        let shown = exec(&planner, &["show"]).unwrap();
        assert!(shown.contains("Lunedì"));
        assert!(shown.contains("  Pranzo: Riso basmati, Petto di pollo"));

        let list = exec(&planner, &["generate"]).unwrap();
        assert!(list.contains("[ ] Petto di pollo x2"));
        assert!(list.contains("[ ] Riso basmati x1"));
    }

    #[test]
    fn invalid_day_rejected() {
        let planner = planner();
        let err = exec(&planner, &["set", "7", "lunch", "Riso"]).unwrap_err();
        assert!(err.to_string().contains("outside 0..=6"));
    }

    #[test]
    fn custom_food_commands() {
        let planner = planner();
        exec(&planner, &["custom", "add", "fruits", "Kaki"]).unwrap();
        assert_eq!(exec(&planner, &["custom", "list"]).unwrap(), "fruits: Kaki\n");
        assert!(exec(&planner, &["classify", "Kaki"])
            .unwrap()
            .contains("(fruits)"));
        assert!(exec(&planner, &["custom", "add", "proteins", "uova"]).is_err());
        assert!(exec(&planner, &["foods", "bogus"]).is_err());
    }

    #[test]
    fn clone_requires_source() {
        let planner = planner();
        assert!(exec(&planner, &["clone", "2025-W19"]).is_err());
        exec(&planner, &["set", "1", "lunch", "Farro", "--week", "2025-W19"]).unwrap();
        exec(&planner, &["clone", "2025-W19"]).unwrap();
        let weeks = exec(&planner, &["weeks"]).unwrap();
        assert_eq!(weeks.lines().count(), 2);
    }

    #[test]
    fn export_then_import_file() {
        let planner = planner();
        exec(&planner, &["add-item", "other", "Sapone", "--qty", "2"]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("backup.json");
        let file_arg = file.to_str().unwrap();
        exec(&planner, &["export", "--output", file_arg]).unwrap();

        let fresh = self::planner();
        assert_eq!(
            exec(&fresh, &["import", file_arg]).unwrap(),
            "1 records imported\n"
        );
        assert!(exec(&fresh, &["list"]).unwrap().contains("Sapone x2"));
    }

    #[test]
    fn empty_list_message() {
        let planner = planner();
        assert_eq!(exec(&planner, &["list"]).unwrap(), "Shopping list is empty\n");
    }
}
