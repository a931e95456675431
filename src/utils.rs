use chrono::{Local, NaiveDate, NaiveTime};

/// Parses a shift time as submitted by the form (`HH:MM`, seconds tolerated).
pub fn parse_shift_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();

    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
