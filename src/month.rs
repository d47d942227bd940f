//! Calendar month keys in `YYYY-MM` form.
//!
//! Month keys double as display labels and as lookup keys into the sparse
//! activity table, so parsing is strict: anything that is not
//! `<digits>-<01..=12>` is rejected before any arithmetic happens. Years are
//! written with at least four digits, so every key this module prints parses
//! back to itself. `0000-01` is the earliest key and has no predecessor.

use crate::error::{GridError, Result};
use chrono::{Datelike, Month};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of display months in the activity grid.
pub const GRID_MONTHS: usize = 12;

/// A calendar month. Ordering is calendar order: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: u32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: u32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(GridError::InvalidMonth(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || GridError::InvalidMonth(s.to_string());

        let (year_str, month_str) = s.split_once('-').ok_or_else(invalid)?;
        if year_str.is_empty() || !year_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if month_str.len() != 2 || !month_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: u32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    /// Fails for dates before year 0.
    pub fn from_date<D: Datelike>(date: &D) -> Result<Self> {
        let year = u32::try_from(date.year())
            .map_err(|_| GridError::InvalidMonth(format!("{}-{:02}", date.year(), date.month())))?;
        Self::new(year, date.month())
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The preceding calendar month. January rolls back to December of the
    /// previous year; `0000-01` has none.
    pub fn earlier(self) -> Option<Self> {
        if self.month > 1 {
            return Some(Self {
                year: self.year,
                month: self.month - 1,
            });
        }
        self.year.checked_sub(1).map(|year| Self { year, month: 12 })
    }

    /// Short column label such as `Aug 25`.
    pub fn label(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("???");
        format!("{} {:02}", &name[..3], self.year % 100)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

pub fn shift_month_earlier(month: MonthKey) -> Result<MonthKey> {
    month
        .earlier()
        .ok_or_else(|| GridError::InvalidMonth(format!("{month} has no preceding month")))
}

/// String-level variant of [`shift_month_earlier`]; fails on malformed keys.
pub fn shift_month_str(month: &str) -> Result<String> {
    Ok(shift_month_earlier(MonthKey::parse(month)?)?.to_string())
}

/// The `count` months ending with `latest`, oldest first.
pub fn months_ending(latest: MonthKey, count: usize) -> Result<Vec<MonthKey>> {
    let mut months = Vec::with_capacity(count);
    let mut current = latest;
    for i in 0..count {
        months.push(current);
        if i + 1 < count {
            current = shift_month_earlier(current)?;
        }
    }
    months.reverse();
    Ok(months)
}

/// The twelve months ending with the month of `reference`, oldest first.
pub fn last_twelve_months<D: Datelike>(reference: &D) -> Result<Vec<MonthKey>> {
    months_ending(MonthKey::from_date(reference)?, GRID_MONTHS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn key(s: &str) -> MonthKey {
        MonthKey::parse(s).unwrap()
    }

    #[test]
    fn shift_decrements_month_within_year() {
        for m in 2..=12 {
            let input = format!("2025-{m:02}");
            let expected = format!("2025-{:02}", m - 1);
            assert_eq!(shift_month_str(&input).unwrap(), expected);
        }
        assert_eq!(shift_month_str("2025-07").unwrap(), "2025-06");
    }

    #[test]
    fn shift_rolls_over_year_boundary() {
        assert_eq!(shift_month_str("2024-01").unwrap(), "2023-12");
        assert_eq!(shift_month_earlier(key("2000-01")).unwrap(), key("1999-12"));
    }

    #[test]
    fn shift_output_always_parses_back() {
        assert_eq!(shift_month_str("0001-01").unwrap(), "0000-12");
        assert_eq!(key("0000-12"), MonthKey::new(0, 12).unwrap());
        assert_eq!(shift_month_str("0100-01").unwrap(), "0099-12");
        assert_eq!(key(&shift_month_str("0100-01").unwrap()).year(), 99);
    }

    #[test]
    fn earliest_month_has_no_predecessor() {
        assert!(key("0000-01").earlier().is_none());
        assert!(matches!(shift_month_str("0000-01"), Err(GridError::InvalidMonth(_))));
    }

    #[test]
    fn parse_rejects_malformed_keys() {
        for bad in [
            "2024-13", "2024-00", "2024-1", "abcd-01", "2024/01", "", "-01", "2024-", "2024-1a", "2024-01-01",
            "-1-12", "99999999999-01",
        ] {
            assert!(MonthKey::parse(bad).is_err(), "accepted {bad:?}");
        }
        assert!(shift_month_str("2024-13").is_err());
    }

    #[test]
    fn display_pads_year_and_month() {
        assert_eq!(key("2024-03").to_string(), "2024-03");
        assert_eq!(MonthKey::new(2024, 9).unwrap().to_string(), "2024-09");
        assert_eq!(key("999-12").to_string(), "0999-12");
        assert_eq!(key("300000-05").to_string(), "300000-05");
        assert!(MonthKey::new(2024, 0).is_err());
    }

    #[test]
    fn ordering_is_calendar_order() {
        assert!(key("2023-12") < key("2024-01"));
        assert!(key("999-12") < key("2024-01"));
        assert!(key("2024-12") < key("300000-01"));
    }

    #[test]
    fn label_uses_short_month_and_year() {
        assert_eq!(key("2025-08").label(), "Aug 25");
        assert_eq!(key("2009-01").label(), "Jan 09");
    }

    #[test]
    fn last_twelve_months_ends_at_reference() {
        let reference = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let months = last_twelve_months(&reference).unwrap();
        assert_eq!(months.len(), GRID_MONTHS);
        assert_eq!(months[0], key("2024-04"));
        assert_eq!(months[11], key("2025-03"));
        assert!(months.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn months_ending_steps_without_calendar_dates() {
        let months = months_ending(key("300000-05"), GRID_MONTHS).unwrap();
        assert_eq!(months[11], key("300000-05"));
        assert_eq!(months[0], key("299999-06"));
        assert!(months_ending(key("0000-06"), GRID_MONTHS).is_err());
        assert_eq!(months_ending(key("0000-01"), 1).unwrap(), vec![key("0000-01")]);
    }

    #[test]
    fn serde_round_trips_as_string() {
        let json = serde_json::to_string(&key("2024-05")).unwrap();
        assert_eq!(json, "\"2024-05\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key("2024-05"));
        assert!(serde_json::from_str::<MonthKey>("\"2024-5\"").is_err());
    }
}
