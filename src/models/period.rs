//! Recurrence periods
//!
//! A `Period` is the cadence shared by budgets and recurring bills:
//! weekly, monthly, or yearly. It knows the date window containing a given
//! day and how to advance a due date by one cycle.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recurrence cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// ISO week, Monday through Sunday
    Weekly,
    /// Calendar month
    #[default]
    Monthly,
    /// Calendar year
    Yearly,
}

impl Period {
    /// Parse a period from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "weekly" | "week" => Some(Self::Weekly),
            "monthly" | "month" => Some(Self::Monthly),
            "yearly" | "year" | "annual" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// The inclusive (start, end) window of this cadence containing `date`
    pub fn window_containing(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Weekly => {
                let start = date - Duration::days(date.weekday().num_days_from_monday() as i64);
                (start, start + Duration::days(6))
            }
            Self::Monthly => {
                let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                    .unwrap_or(date);
                let end = start
                    .checked_add_months(Months::new(1))
                    .map(|d| d - Duration::days(1))
                    .unwrap_or(date);
                (start, end)
            }
            Self::Yearly => {
                let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
                let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
                (start, end)
            }
        }
    }

    /// Check whether two dates fall in the same window
    pub fn same_window(&self, a: NaiveDate, b: NaiveDate) -> bool {
        let (start, end) = self.window_containing(a);
        b >= start && b <= end
    }

    /// Advance a date by one cycle (used to roll a recurring bill forward).
    /// Month and year advances clamp to the last valid day.
    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Weekly => date + Duration::days(7),
            Self::Monthly => date.checked_add_months(Months::new(1)).unwrap_or(date),
            Self::Yearly => date.checked_add_months(Months::new(12)).unwrap_or(date),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(Period::parse("monthly"), Some(Period::Monthly));
        assert_eq!(Period::parse("WEEK"), Some(Period::Weekly));
        assert_eq!(Period::parse("annual"), Some(Period::Yearly));
        assert_eq!(Period::parse("fortnight"), None);
    }

    #[test]
    fn test_monthly_window() {
        let (start, end) = Period::Monthly.window_containing(d(2025, 2, 14));
        assert_eq!(start, d(2025, 2, 1));
        assert_eq!(end, d(2025, 2, 28));

        let (start, end) = Period::Monthly.window_containing(d(2024, 12, 31));
        assert_eq!(start, d(2024, 12, 1));
        assert_eq!(end, d(2024, 12, 31));
    }

    #[test]
    fn test_weekly_window() {
        // 2025-01-15 is a Wednesday
        let (start, end) = Period::Weekly.window_containing(d(2025, 1, 15));
        assert_eq!(start, d(2025, 1, 13));
        assert_eq!(end, d(2025, 1, 19));
    }

    #[test]
    fn test_yearly_window() {
        let (start, end) = Period::Yearly.window_containing(d(2025, 6, 1));
        assert_eq!(start, d(2025, 1, 1));
        assert_eq!(end, d(2025, 12, 31));
    }

    #[test]
    fn test_same_window() {
        assert!(Period::Monthly.same_window(d(2025, 1, 1), d(2025, 1, 31)));
        assert!(!Period::Monthly.same_window(d(2025, 1, 31), d(2025, 2, 1)));
    }

    #[test]
    fn test_advance() {
        assert_eq!(Period::Weekly.advance(d(2025, 1, 1)), d(2025, 1, 8));
        assert_eq!(Period::Monthly.advance(d(2025, 1, 15)), d(2025, 2, 15));
        // Clamps to the last day of the shorter month
        assert_eq!(Period::Monthly.advance(d(2025, 1, 31)), d(2025, 2, 28));
        assert_eq!(Period::Yearly.advance(d(2024, 2, 29)), d(2025, 2, 28));
    }
}
