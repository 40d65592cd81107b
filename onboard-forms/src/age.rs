//! Calendar age.

use chrono::{Datelike, NaiveDate};

/// Whole years between `birth` and `today`.
///
/// Subtracts the years, then takes one off when the birthday has not yet
/// come round this year. Comparing `(month, day)` pairs keeps Feb 29
/// birthdays exact: they turn a year older on Mar 1 in non-leap years.
/// Negative when `birth` is after `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}
