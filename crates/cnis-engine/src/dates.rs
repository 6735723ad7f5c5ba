//! Date and amount normalization for CNIS field values.

use chrono::NaiveDate;
use shared_types::types::BR_DATE_FORMAT;

/// Parse a `dd/mm/yyyy` statement date
pub fn parse_br_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, BR_DATE_FORMAT).ok()
}

/// Last calendar day of a month, leap-aware
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next.and_then(|d| d.pred_opt())
}

/// Normalize a `mm/yyyy` reference to the last day of that month.
///
/// `"05/2020"` becomes `"31/05/2020"`. Returns `None` for out-of-range
/// months so callers can fall through to the next date rule.
pub fn month_year_to_full(value: &str) -> Option<String> {
    let (month, year) = value.split_once('/')?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    if !(1..=12).contains(&month) || !(1900..=2100).contains(&year) {
        return None;
    }
    last_day_of_month(year, month).map(|d| d.format(BR_DATE_FORMAT).to_string())
}

/// Parse a Brazilian-formatted amount: thousands `.`, decimal `,`
pub fn parse_amount(value: &str) -> Option<f64> {
    let normalized = value.replace('.', "").replace(',', ".");
    normalized.parse().ok()
}
