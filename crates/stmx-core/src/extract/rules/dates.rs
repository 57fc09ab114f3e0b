//! Date normalization for statement cells.

use chrono::NaiveDate;

use super::patterns::{DATE_DMY, DATE_YMD};

/// Parse a statement date, day before month.
///
/// Accepts `DD.MM.YYYY`, `DD/MM/YYYY`, `DD-MM-YYYY`, two-digit years and ISO
/// `YYYY-MM-DD`, each optionally followed by a time part which is ignored.
/// Returns `None` for anything else, including impossible dates.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    // YYYY-MM-DD first: a four-digit leading group is unambiguous
    if let Some(caps) = DATE_YMD.captures(text) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    // DD.MM.YYYY or DD/MM/YYYY or DD-MM-YYYY
    if let Some(caps) = DATE_DMY.captures(text) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year = parse_year(&caps[3])?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

/// Format a date the way statements print it.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() == 2 {
        // Two-digit year: assume 2000s for 00-50, 1900s for 51-99
        if year <= 50 {
            Some(2000 + year)
        } else {
            Some(1900 + year)
        }
    } else {
        Some(year)
    }
}
