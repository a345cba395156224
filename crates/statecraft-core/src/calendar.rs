//! Simulated-era calendar arithmetic.
//!
//! The game runs on its own calendar spanning 2025-01-01 to 2037-12-31.
//! All arithmetic normalizes across month and year boundaries; the era
//! bound is a caller contract, not a runtime error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// First day of the simulated era.
pub const GAME_START: SimDate = SimDate {
    year: 2025,
    month: 1,
    day: 1,
};

/// Last day of the simulated era.
pub const GAME_END: SimDate = SimDate {
    year: 2037,
    month: 12,
    day: 31,
};

/// Federal election dates within the era (September 26).
pub const ELECTION_YEARS: [i32; 3] = [2029, 2033, 2037];

const DAYS_PER_MONTH: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A normalized date within the simulated era.
///
/// Field order gives the natural chronological `Ord`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct SimDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SimDate {
    /// Builds a date, asserting validity in debug builds.
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        let date = Self { year, month, day };
        debug_assert!(date.is_valid(), "invalid sim date {year}-{month}-{day}");
        date
    }

    /// Whether the date is normalized and within the era.
    pub fn is_valid(&self) -> bool {
        (GAME_START.year..=GAME_END.year).contains(&self.year)
            && (1..=12).contains(&self.month)
            && self.day >= 1
            && i64::from(self.day) <= days_in_month(self.year, self.month)
    }

    /// Canonical day index: 0 for 2025-01-01, increasing by one per day.
    ///
    /// Exact inverse of [`SimDate::from_day_number`] for every valid date.
    /// This index drives duration hysteresis and progress percentages.
    pub fn day_number(&self) -> i64 {
        let mut days: i64 = 0;
        for year in GAME_START.year..self.year {
            days += days_in_year(year);
        }
        for month in 1..self.month {
            days += days_in_month(self.year, month);
        }
        days + i64::from(self.day) - 1
    }

    /// Inverse of [`SimDate::day_number`].
    pub fn from_day_number(day_number: i64) -> Self {
        debug_assert!(day_number >= 0, "day number {day_number} precedes the era");
        let mut remaining = day_number;
        let mut year = GAME_START.year;
        while remaining >= days_in_year(year) {
            remaining -= days_in_year(year);
            year += 1;
        }
        let mut month = 1;
        while remaining >= days_in_month(year, month) {
            remaining -= days_in_month(year, month);
            month += 1;
        }
        Self {
            year,
            month,
            day: remaining as u32 + 1,
        }
    }

    /// Adds (or subtracts) days with full normalization.
    pub fn add_days(&self, days: i64) -> Self {
        Self::from_day_number(self.day_number() + days)
    }

    /// Adds months, clamping the day to the target month's length
    /// (e.g. Jan 31 + 1 month = Feb 28).
    pub fn add_months(&self, months: i32) -> Self {
        let total = (self.year * 12 + self.month as i32 - 1) + months;
        let year = total.div_euclid(12);
        let month = total.rem_euclid(12) as u32 + 1;
        let day = self.day.min(days_in_month(year, month) as u32);
        // Normalized by construction; may leave the era (callers clamp).
        Self { year, month, day }
    }

    /// Adds whole years, keeping month and day (Feb 29 clamps to Feb 28).
    pub fn add_years(&self, years: i32) -> Self {
        let year = self.year + years;
        let day = self.day.min(days_in_month(year, self.month) as u32);
        Self {
            year,
            month: self.month,
            day,
        }
    }

    /// Signed day count from `self` to `other`.
    pub fn days_until(&self, other: &SimDate) -> i64 {
        other.day_number() - self.day_number()
    }

    /// Percentage of the current year elapsed, rounded, first day = 1 day in.
    pub fn year_progress(&self) -> u32 {
        let start = SimDate::new(self.year, 1, 1);
        let total = days_in_year(self.year);
        let passed = start.days_until(self) + 1;
        ((passed as f64 / total as f64) * 100.0).round() as u32
    }

    /// The legislature period this date falls into.
    pub fn legislature(&self) -> Legislature {
        let (index, start_year) = if self.year >= 2033 {
            (3, 2033)
        } else if self.year >= 2029 {
            (2, 2029)
        } else {
            (1, 2025)
        };
        Legislature {
            index,
            start: SimDate::new(start_year, 1, 1),
            end: SimDate::new(start_year + 4, 12, 31).min(GAME_END),
        }
    }

    /// Percentage of the current legislature period elapsed, rounded.
    pub fn legislature_progress(&self) -> u32 {
        let leg = self.legislature();
        let total = leg.start.days_until(&leg.end) + 1;
        let passed = leg.start.days_until(self) + 1;
        ((passed as f64 / total as f64) * 100.0).round() as u32
    }

    /// The next regular election date (September 26 of an election year).
    pub fn next_election(&self) -> SimDate {
        for year in ELECTION_YEARS {
            if self.year < year {
                return SimDate::new(year, 9, 26);
            }
        }
        SimDate::new(2037, 9, 26)
    }
}

impl fmt::Display for SimDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:04}", self.day, self.month, self.year)
    }
}

/// A legislature period: four-and-a-bit years ending December 31.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legislature {
    pub index: u8,
    pub start: SimDate,
    pub end: SimDate,
}

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Day count of a month, leap-aware.
pub fn days_in_month(year: i32, month: u32) -> i64 {
    debug_assert!((1..=12).contains(&month), "invalid month {month}");
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_PER_MONTH[(month - 1) as usize]
    }
}

/// Day count of a year, leap-aware.
pub fn days_in_year(year: i32) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}
