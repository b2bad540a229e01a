//! Days of the planning week

use chrono::Weekday;
use std::fmt::{self, Display, Formatter};

/// Day of a Monday-first week, stored as index 0..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    /// Index 0
    Monday,
    /// Index 1
    Tuesday,
    /// Index 2
    Wednesday,
    /// Index 3
    Thursday,
    /// Index 4
    Friday,
    /// Index 5
    Saturday,
    /// Index 6
    Sunday,
}

impl Day {
    /// Every day, Monday first
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Storage index (Monday = 0)
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Day for a storage index
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Lunedì",
            Self::Tuesday => "Martedì",
            Self::Wednesday => "Mercoledì",
            Self::Thursday => "Giovedì",
            Self::Friday => "Venerdì",
            Self::Saturday => "Sabato",
            Self::Sunday => "Domenica",
        }
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        Self::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl TryFrom<u8> for Day {
    type Error = u8;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(index)
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        for (i, day) in Day::ALL.iter().enumerate() {
            assert_eq!(usize::from(day.index()), i);
            assert_eq!(Day::from_index(day.index()), Some(*day));
        }
        assert_eq!(Day::from_index(7), None);
        assert_eq!(Day::try_from(9), Err(9));
    }

    #[test]
    fn from_chrono_weekday() {
        assert_eq!(Day::from(Weekday::Mon), Day::Monday);
        assert_eq!(Day::from(Weekday::Sun), Day::Sunday);
    }

    #[test]
    fn labels() {
        assert_eq!(Day::Wednesday.label(), "Mercoledì");
        assert_eq!(Day::Sunday.to_string(), "Domenica");
    }
}
