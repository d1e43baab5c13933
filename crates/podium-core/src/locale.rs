use chrono::{DateTime, Utc};

/// Translated strings and date rendering consumed by the record formatter.
///
/// Games embed their own localization layer; this core only calls it. The
/// default implementation is plain English with an ISO-like date layout.
pub trait Localize {
    /// The word shown in place of the anonymous-player sentinel.
    fn anonymous(&self) -> String;

    /// A date-time rendered for display.
    fn date_time(&self, stamp: &DateTime<Utc>) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLocale;

impl Localize for EnglishLocale {
    fn anonymous(&self) -> String {
        "anonymous".to_string()
    }

    fn date_time(&self, stamp: &DateTime<Utc>) -> String {
        stamp.format("%Y-%m-%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_english_locale_date_time() {
        let stamp = Utc.with_ymd_and_hms(2024, 3, 9, 21, 5, 0).unwrap();
        assert_eq!(EnglishLocale.date_time(&stamp), "2024-03-09 21:05");
    }
}
