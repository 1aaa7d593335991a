// Calendar-day arithmetic shared by the live preview and the submission path
use chrono::{Local, NaiveDate, NaiveDateTime};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// Current local calendar date as YYYY-MM-DD, used by the UI layer to set
// minimum selectable dates.
pub fn today() -> String {
    Local::now()
        .date_naive()
        .format(ISO_DATE_FORMAT)
        .to_string()
}

// Parse a raw field value into a date-only value. Empty input is "absent"
// (None), and any time-of-day component is discarded so that comparisons
// happen at calendar-day precision.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let raw = value.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT) {
        return Some(date);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

// Whole nights between check-in and check-out. Returns 0 when either date
// is absent or checkout <= checkin (not yet a valid stay); otherwise >= 1.
pub fn nights_between(checkin: &str, checkout: &str) -> u32 {
    let (start, end) = match (parse_calendar_date(checkin), parse_calendar_date(checkout)) {
        (Some(start), Some(end)) => (start, end),
        _ => return 0,
    };
    if end <= start {
        return 0;
    }
    (end - start).num_days() as u32
}
