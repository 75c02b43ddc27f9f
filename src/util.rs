// Parsing and formatting helpers.
//
// Everything that touches raw CSV text lives here so the loader and the
// reports can work with typed values.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};
use std::num::ParseFloatError;

/// Date layout used by both collection logs (`2019/01/17`).
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Parse an optional numeric cell.
///
/// - Missing or blank cells yield `Ok(None)`.
/// - `NaN` is treated as a blank cell.
/// - Anything else that is not a number is an error for the caller to report.
pub fn parse_f64_strict(s: Option<&str>) -> Result<Option<f64>, ParseFloatError> {
    let Some(s) = s.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let v = s.parse::<f64>()?;
    Ok(if v.is_nan() { None } else { Some(v) })
}

/// Parse a date cell against `format`, returning `None` instead of failing.
pub fn parse_date_safe(s: Option<&str>, format: &str) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, format).ok()
}

pub fn days_diff(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

pub fn format_number(n: f64, decimals: usize) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    // Fixed decimals first, then thousands separators on the integer part.
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_nan_cells_are_missing() {
        assert_eq!(parse_f64_strict(None), Ok(None));
        assert_eq!(parse_f64_strict(Some("   ")), Ok(None));
        assert_eq!(parse_f64_strict(Some("NaN")), Ok(None));
        assert_eq!(parse_f64_strict(Some(" 12.5 ")), Ok(Some(12.5)));
    }

    #[test]
    fn text_in_numeric_cell_is_an_error() {
        assert!(parse_f64_strict(Some("doce")).is_err());
        assert!(parse_f64_strict(Some("12,5")).is_err());
    }

    #[test]
    fn dates_must_match_the_log_format() {
        let d = parse_date_safe(Some("2019/01/17"), DATE_FORMAT);
        assert_eq!(d, NaiveDate::from_ymd_opt(2019, 1, 17));
        assert_eq!(parse_date_safe(Some("31/02/2020"), DATE_FORMAT), None);
        assert_eq!(parse_date_safe(Some("2020/02/31"), DATE_FORMAT), None);
        assert_eq!(parse_date_safe(Some(""), DATE_FORMAT), None);
    }

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-42.0, 1), "-42.0");
        assert_eq!(format_number(7.0, 0), "7");
        assert_eq!(format_number(f64::NAN, 2), "NaN");
    }

    #[test]
    fn days_between_dates() {
        let a = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(days_diff(a, b), 365);
    }
}
