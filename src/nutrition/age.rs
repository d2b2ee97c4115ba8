//! Age derivation from dates of birth

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Completed age between a date of birth and a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeOnDate {
    pub years: u32,
    pub months: u32,
}

/// Completed months from `dob` to `as_of`; `None` when `dob` is in the future
pub fn completed_months(dob: NaiveDate, as_of: NaiveDate) -> Option<u32> {
    if dob > as_of {
        return None;
    }
    let mut months = (as_of.year() - dob.year()) * 12 + as_of.month() as i32 - dob.month() as i32;
    if as_of.day() < dob.day() {
        months -= 1;
    }
    u32::try_from(months).ok()
}

pub fn age_on(dob: NaiveDate, as_of: NaiveDate) -> Option<AgeOnDate> {
    let months = completed_months(dob, as_of)?;
    Some(AgeOnDate {
        years: months / 12,
        months,
    })
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_completed_months() {
        assert_eq!(completed_months(d(2020, 1, 15), d(2020, 1, 15)), Some(0));
        assert_eq!(completed_months(d(2020, 1, 15), d(2020, 2, 14)), Some(0));
        assert_eq!(completed_months(d(2020, 1, 15), d(2020, 2, 15)), Some(1));
        assert_eq!(completed_months(d(2020, 11, 30), d(2021, 2, 28)), Some(2));
    }

    #[test]
    fn test_age_on_birthday_boundary() {
        let age = age_on(d(2014, 6, 10), d(2024, 6, 9)).unwrap();
        assert_eq!(age.years, 9);
        assert_eq!(age.months, 119);

        let age = age_on(d(2014, 6, 10), d(2024, 6, 10)).unwrap();
        assert_eq!(age.years, 10);
    }

    #[test]
    fn test_future_birth_date() {
        assert!(age_on(d(2030, 1, 1), d(2024, 1, 1)).is_none());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(" 2024-03-01 "), Some(d(2024, 3, 1)));
        assert!(parse_date("03/01/2024").is_none());
    }
}
