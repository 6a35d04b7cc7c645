//! UTC date utilities without timezone dependencies.
//!
//! Provides a lightweight `DateUtc` struct for the sitemap `<lastmod>` value.
//! Only calendar-date granularity is needed, so there is no time part.
//!
//! # Examples
//!
//! ```ignore
//! let today = DateUtc::today();
//! let dt = DateUtc::from_ymd(2024, 6, 15);
//! assert_eq!(dt.to_iso_date(), "2024-06-15");
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

/// UTC calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl DateUtc {
    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Current date in UTC.
    ///
    /// A clock before the unix epoch is treated as the epoch itself.
    pub fn today() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_unix_secs(secs)
    }

    /// Calendar date containing the given unix timestamp.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_unix_secs(secs: u64) -> Self {
        // Howard Hinnant's civil_from_days
        let days = (secs / 86_400) as i64;
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
        let year = yoe + era * 400 + i64::from(month <= 2);

        Self::from_ymd(year as u16, month, day)
    }

    /// Format as ISO 8601 calendar date: `YYYY-MM-DD`
    pub fn to_iso_date(self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for DateUtc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
