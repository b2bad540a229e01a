//! Meal Planner Calendar
//!
//! Calendar-week addressing for weekly menus.
//!
//! # Core Concepts
//!
//! - [`WeekKey`]: ISO-8601 week identifier (`2025-W20`)
//! - [`WeekRange`]: Monday 00:00:00 to Sunday 23:59:59
//! - [`WeekNavigator`]: Signed week offset from a reference date
//! - [`list_available_weeks`]: Stored keys mapped back to approximate ranges
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use meal_calendar::{week_dates_of, week_key_of};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
//! assert_eq!(week_key_of(date).to_string(), "2025-W01");
//! println!("{}", week_dates_of(date)); // 30/12/2024 - 05/01/2025
//! ```

#![warn(unreachable_pub)]

mod day;
mod error;
mod navigator;
mod week;

pub use day::Day;
pub use error::{WeekKeyError, WeekResult};
pub use navigator::WeekNavigator;
pub use week::{
    approx_date_of, current_week_key, list_available_weeks, shift_weeks, week_dates_of,
    week_key_of, week_key_with_offset, AvailableWeek, WeekKey, WeekRange,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
