//! "Now" timestamps in the two textual layouts the service uses.

use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

/// Layout returned to API clients, e.g. `2024-03-01T12:30:00Z`.
pub const API_DATE_LAYOUT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

/// Layout stored in the `date_created` column, e.g. `2024-03-01 12:30:00`.
pub const DB_DATE_LAYOUT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

pub fn now_api_string() -> Result<String, time::error::Format> {
    now().format(API_DATE_LAYOUT)
}

pub fn now_db_string() -> Result<String, time::error::Format> {
    now().format(DB_DATE_LAYOUT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{macros::datetime, PrimitiveDateTime};

    #[test]
    fn formats_fixed_instant_in_both_layouts() {
        let at = datetime!(2024-03-01 07:05:09 UTC);
        assert_eq!(at.format(API_DATE_LAYOUT).unwrap(), "2024-03-01T07:05:09Z");
        assert_eq!(at.format(DB_DATE_LAYOUT).unwrap(), "2024-03-01 07:05:09");
    }

    #[test]
    fn now_db_string_parses_back() {
        let s = now_db_string().expect("format now");
        assert_eq!(s.len(), 19);
        PrimitiveDateTime::parse(&s, DB_DATE_LAYOUT).expect("db layout parses");
    }

    #[test]
    fn now_api_string_ends_with_zulu() {
        let s = now_api_string().expect("format now");
        assert_eq!(s.len(), 20);
        assert!(s.ends_with('Z'));
        assert_eq!(&s[10..11], "T");
    }
}
