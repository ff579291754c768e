use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};

use crate::error::LedgerError;

/// Coarse time-of-day bucket shown next to each recorded transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealPeriod {
    Breakfast,
    Lunch,
    Snacks,
    Dinner,
    Other,
}

impl MealPeriod {
    pub const ALL: [MealPeriod; 5] = [
        MealPeriod::Breakfast,
        MealPeriod::Lunch,
        MealPeriod::Snacks,
        MealPeriod::Dinner,
        MealPeriod::Other,
    ];

    /// Classify a wall-clock time
    ///
    /// Hours 11 and 15 fall into the gaps and map to `Other`.
    /// Snacks end at 18:30 and dinner at 21:30, both inclusive of the :30 minute.
    pub fn of(time: NaiveTime) -> Self {
        let hour = time.hour();
        let minute = time.minute();

        match hour {
            7..=10 => MealPeriod::Breakfast,
            12..=14 => MealPeriod::Lunch,
            16..=18 if !(hour == 18 && minute > 30) => MealPeriod::Snacks,
            19..=21 if !(hour == 21 && minute > 30) => MealPeriod::Dinner,
            _ => MealPeriod::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MealPeriod::Breakfast => "Breakfast",
            MealPeriod::Lunch => "Lunch",
            MealPeriod::Snacks => "Snacks",
            MealPeriod::Dinner => "Dinner",
            MealPeriod::Other => "Other",
        }
    }

    /// Case-insensitive comparison against free-form filter text
    pub fn matches_label(self, text: &str) -> bool {
        self.label().eq_ignore_ascii_case(text.trim())
    }
}

/// Classify an "HH:MM:SS" string; anything unparseable is `Other`
pub fn classify(time: &str) -> MealPeriod {
    NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .map(MealPeriod::of)
        .unwrap_or(MealPeriod::Other)
}

impl fmt::Display for MealPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MealPeriod {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealPeriod::ALL
            .into_iter()
            .find(|period| period.matches_label(s))
            .ok_or_else(|| LedgerError::InvalidInput(format!("unknown meal period '{}'", s)))
    }
}
