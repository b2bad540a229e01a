//! Command-line definition

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

fn week_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("week")
            .long("week")
            .short('w')
            .value_name("KEY")
            .conflicts_with("offset")
            .help("Week key such as 2025-W20 (default: current week)"),
    )
    .arg(
        Arg::new("offset")
            .long("offset")
            .short('o')
            .value_name("WEEKS")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i32))
            .help("Weeks away from the current one"),
    )
}

fn day_arg() -> Arg {
    Arg::new("day")
        .required(true)
        .value_parser(value_parser!(i64))
        .allow_negative_numbers(true)
        .help("Day index, 0 = Monday .. 6 = Sunday")
}

fn meal_arg() -> Arg {
    Arg::new("meal")
        .required(true)
        .help("breakfast, lunch, snack or dinner")
}

fn item_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("category").required(true).help("Category key"))
        .arg(Arg::new("name").required(true).help("Item name"))
}

/// Build the `mealplan` command
pub(crate) fn command() -> Command {
    Command::new("mealplan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Weekly meal planner and shopping list")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding stored records (default: ./.mealplan)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("yes")
                .long("yes")
                .short('y')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Answer yes to confirmation prompts"),
        )
        .subcommand(
            Command::new("week")
                .about("Show a week key and its date range")
                .arg(
                    Arg::new("offset")
                        .long("offset")
                        .short('o')
                        .default_value("0")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i32))
                        .help("Weeks away from the current one"),
                ),
        )
        .subcommand(Command::new("weeks").about("List weeks with a stored menu"))
        .subcommand(week_args(Command::new("show").about("Print the menu of a week")))
        .subcommand(week_args(
            Command::new("set")
                .about("Replace the foods of one meal")
                .arg(day_arg())
                .arg(meal_arg())
                .arg(Arg::new("foods").num_args(0..).help("Foods, in order")),
        ))
        .subcommand(week_args(
            Command::new("remove-food")
                .about("Remove a food from one meal")
                .arg(day_arg())
                .arg(meal_arg())
                .arg(Arg::new("food").required(true)),
        ))
        .subcommand(
            Command::new("clone")
                .about("Copy a week's menu over another week")
                .arg(Arg::new("source").required(true).help("Source week key"))
                .arg(
                    Arg::new("target")
                        .long("target")
                        .short('t')
                        .value_name("KEY")
                        .help("Target week key (default: current week)"),
                ),
        )
        .subcommand(week_args(
            Command::new("generate").about("Rebuild the shopping list from a week's menu"),
        ))
        .subcommand(Command::new("list").about("Print the shopping list"))
        .subcommand(item_args(
            Command::new("add-item").about("Add or update a manual item").arg(
                Arg::new("qty")
                    .long("qty")
                    .short('q')
                    .default_value("1")
                    .allow_negative_numbers(true)
                    .value_parser(value_parser!(i64)),
            ),
        ))
        .subcommand(
            item_args(Command::new("set-qty").about("Set an item's quantity")).arg(
                Arg::new("qty")
                    .required(true)
                    .allow_negative_numbers(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
        .subcommand(item_args(
            Command::new("toggle").about("Check or uncheck an item"),
        ))
        .subcommand(item_args(
            Command::new("remove-item").about("Delete an item"),
        ))
        .subcommand(Command::new("reset").about("Uncheck every item"))
        .subcommand(
            Command::new("foods")
                .about("List selectable foods of a category")
                .arg(Arg::new("category").required(true)),
        )
        .subcommand(
            Command::new("classify")
                .about("Show the category of a food")
                .arg(Arg::new("food").required(true)),
        )
        .subcommand(
            Command::new("custom")
                .about("Manage custom foods")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("remove").arg(Arg::new("name").required(true)))
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("export").about("Write all data as JSON").arg(
                Arg::new("output")
                    .long("output")
                    .value_name("FILE")
                    .value_parser(value_parser!(PathBuf))
                    .help("Destination file (default: stdout)"),
            ),
        )
        .subcommand(
            Command::new("import")
                .about("Replace all data with a JSON export")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(Command::new("clear").about("Delete all stored data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn parses_set_with_foods() {
        let matches = command()
            .try_get_matches_from([
                "mealplan", "set", "0", "lunch", "Riso basmati", "Petto di pollo", "--week",
                "2025-W20",
            ])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "set");
        assert_eq!(args.get_one::<i64>("day"), Some(&0));
        let foods: Vec<&String> = args.get_many::<String>("foods").unwrap().collect();
        assert_eq!(foods, ["Riso basmati", "Petto di pollo"]);
    }

    #[test]
    fn week_and_offset_conflict() {
        let result = command().try_get_matches_from([
            "mealplan", "show", "--week", "2025-W20", "--offset", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn negative_offset_accepted() {
        let matches = command()
            .try_get_matches_from(["mealplan", "week", "--offset", "-2"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<i32>("offset"), Some(&-2));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let matches = command()
            .try_get_matches_from(["mealplan", "clear", "--yes", "--data-dir", "/tmp/x"])
            .unwrap();
        assert!(matches.get_flag("yes"));
        assert_eq!(
            matches.get_one::<PathBuf>("data-dir"),
            Some(&PathBuf::from("/tmp/x"))
        );
    }
}
