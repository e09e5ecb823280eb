//! Offset-aware datetime handling without timezone dependencies.
//!
//! Provides a lightweight [`W3cDateTime`] for the `<lastmod>` and
//! publication/expiration date values sitemap documents carry. The
//! sitemap formats only ever need the W3C datetime profile of ISO 8601,
//! so a full date crate would be dead weight here.
//!
//! # Examples
//!
//! ```
//! use sitemapper::datetime::W3cDateTime;
//!
//! let dt = W3cDateTime::parse("2021-05-27T13:36:34Z").unwrap();
//! assert_eq!(dt.to_string(), "2021-05-27T13:36:34Z");
//!
//! let dt = W3cDateTime::parse("2021-12-30T12:34:56.000+01:00").unwrap();
//! assert_eq!(dt.to_string(), "2021-12-30T12:34:56+01:00");
//! ```

use std::fmt;

/// A calendar datetime with an explicit UTC offset.
///
/// Renders as `YYYY-MM-DDTHH:MM:SSZ` when the offset is zero, otherwise
/// as `YYYY-MM-DDTHH:MM:SS±HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct W3cDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Offset from UTC in minutes. `0` renders as `Z`.
    pub offset_minutes: i16,
}

impl W3cDateTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            offset_minutes: 0,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    pub const fn with_offset_minutes(mut self, offset_minutes: i16) -> Self {
        self.offset_minutes = offset_minutes;
        self
    }

    /// Convert a unix timestamp (seconds since epoch) to a UTC datetime.
    pub fn from_unix_seconds(secs: i64) -> Self {
        let days = secs.div_euclid(86_400);
        let rem = secs.rem_euclid(86_400);

        // Civil-from-days conversion (Gregorian calendar).
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + i64::from(month <= 2);

        Self {
            year: year as u16,
            month: month as u8,
            day: day as u8,
            hour: (rem / 3600) as u8,
            minute: (rem % 3600 / 60) as u8,
            second: (rem % 60) as u8,
            offset_minutes: 0,
        }
    }

    pub fn from_unix_millis(millis: i64) -> Self {
        Self::from_unix_seconds(millis.div_euclid(1000))
    }

    /// Parse `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS[.fff][Z|±HH:MM]`.
    ///
    /// Fractional seconds are accepted and dropped; a missing time part
    /// means midnight UTC.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 {
            return None;
        }

        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        if bytes[7] != b'-' {
            return None;
        }
        let day = parse_u8(&bytes[8..10])?;

        let mut dt = Self::new(year, month, day, 0, 0, 0);
        if bytes.len() > 10 {
            if bytes.len() < 19 || bytes[10] != b'T' || bytes[13] != b':' || bytes[16] != b':' {
                return None;
            }
            dt.hour = parse_u8(&bytes[11..13])?;
            dt.minute = parse_u8(&bytes[14..16])?;
            dt.second = parse_u8(&bytes[17..19])?;

            let mut rest = &bytes[19..];
            if rest.first() == Some(&b'.') {
                let frac_end = rest[1..]
                    .iter()
                    .position(|b| !b.is_ascii_digit())
                    .map(|i| i + 1)?;
                rest = &rest[frac_end..];
            }
            dt.offset_minutes = parse_offset(rest)?;
        }

        dt.validate()?;
        Some(dt)
    }

    fn validate(&self) -> Option<()> {
        if !(1..=12).contains(&self.month) {
            return None;
        }
        let max_days = Self::days_in_month(self.year, self.month);
        if self.day == 0 || self.day > max_days {
            return None;
        }
        if self.hour > 23 || self.minute > 59 || self.second > 59 {
            return None;
        }
        Some(())
    }

    #[inline]
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }
}

impl fmt::Display for W3cDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.offset_minutes == 0 {
            write!(f, "Z")
        } else {
            let sign = if self.offset_minutes < 0 { '-' } else { '+' };
            let abs = self.offset_minutes.unsigned_abs();
            write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
        }
    }
}

/// A date value that may or may not carry a time-of-day.
///
/// The news and video formats accept either a plain date or a full
/// offset datetime; the two render differently, so the distinction is
/// kept rather than defaulting date-only values to midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapDate {
    /// Renders as `YYYY-MM-DD`.
    Day { year: u16, month: u8, day: u8 },
    /// Renders as a full offset datetime.
    Time(W3cDateTime),
}

impl SitemapDate {
    pub const fn day(year: u16, month: u8, day: u8) -> Self {
        Self::Day { year, month, day }
    }

    /// Parse either form, keeping date-only inputs date-only.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() == 10 {
            let dt = W3cDateTime::parse(s)?;
            Some(Self::Day {
                year: dt.year,
                month: dt.month,
                day: dt.day,
            })
        } else {
            W3cDateTime::parse(s).map(Self::Time)
        }
    }
}

impl fmt::Display for SitemapDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day { year, month, day } => write!(f, "{year:04}-{month:02}-{day:02}"),
            Self::Time(dt) => dt.fmt(f),
        }
    }
}

impl From<W3cDateTime> for SitemapDate {
    fn from(dt: W3cDateTime) -> Self {
        Self::Time(dt)
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

/// Parse `Z` or `±HH:MM` into offset minutes.
fn parse_offset(bytes: &[u8]) -> Option<i16> {
    match bytes {
        [b'Z'] | [b'z'] => Some(0),
        [sign @ (b'+' | b'-'), rest @ ..] if rest.len() == 5 && rest[2] == b':' => {
            let hours = parse_u8(&rest[0..2])?;
            let minutes = parse_u8(&rest[3..5])?;
            if hours > 14 || minutes > 59 {
                return None;
            }
            let total = i16::from(hours) * 60 + i16::from(minutes);
            Some(if *sign == b'-' { -total } else { total })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = W3cDateTime::parse("2024-06-15").unwrap();
        assert_eq!((dt.year, dt.month, dt.day), (2024, 6, 15));
        assert_eq!((dt.hour, dt.minute, dt.second), (0, 0, 0));
        assert_eq!(dt.offset_minutes, 0);
    }

    #[test]
    fn test_parse_utc() {
        let dt = W3cDateTime::parse("2021-05-27T13:36:34Z").unwrap();
        assert_eq!(dt.to_string(), "2021-05-27T13:36:34Z");
    }

    #[test]
    fn test_parse_positive_offset() {
        let dt = W3cDateTime::parse("2021-12-30T12:34:56+01:00").unwrap();
        assert_eq!(dt.offset_minutes, 60);
        assert_eq!(dt.to_string(), "2021-12-30T12:34:56+01:00");
    }

    #[test]
    fn test_parse_negative_offset() {
        let dt = W3cDateTime::parse("2021-12-30T12:34:56-05:30").unwrap();
        assert_eq!(dt.offset_minutes, -330);
        assert_eq!(dt.to_string(), "2021-12-30T12:34:56-05:30");
    }

    #[test]
    fn test_parse_drops_fractional_seconds() {
        let dt = W3cDateTime::parse("2021-12-30T12:34:56.000+01:00").unwrap();
        assert_eq!(dt.to_string(), "2021-12-30T12:34:56+01:00");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(W3cDateTime::parse("").is_none());
        assert!(W3cDateTime::parse("2024-13-01").is_none());
        assert!(W3cDateTime::parse("2024-02-30").is_none());
        assert!(W3cDateTime::parse("2024-06-15T25:00:00Z").is_none());
        assert!(W3cDateTime::parse("2024-06-15T10:00:00").is_none());
        assert!(W3cDateTime::parse("2024-06-15T10:00:00+1:00").is_none());
    }

    #[test]
    fn test_leap_year() {
        assert!(W3cDateTime::parse("2024-02-29").is_some());
        assert!(W3cDateTime::parse("2000-02-29").is_some());
        assert!(W3cDateTime::parse("2023-02-29").is_none());
        assert!(W3cDateTime::parse("1900-02-29").is_none());
    }

    #[test]
    fn test_from_unix_seconds() {
        // 2021-05-27T13:36:34Z
        let dt = W3cDateTime::from_unix_seconds(1_622_122_594);
        assert_eq!(dt.to_string(), "2021-05-27T13:36:34Z");

        let epoch = W3cDateTime::from_unix_seconds(0);
        assert_eq!(epoch.to_string(), "1970-01-01T00:00:00Z");

        // leap day and year boundary
        let leap = W3cDateTime::from_unix_seconds(951_782_400);
        assert_eq!(leap.to_string(), "2000-02-29T00:00:00Z");
        let year_end = W3cDateTime::from_unix_seconds(1_640_995_199);
        assert_eq!(year_end.to_string(), "2021-12-31T23:59:59Z");
    }

    #[test]
    fn test_from_unix_seconds_round_trips_parse() {
        for s in ["2021-05-27T13:36:34Z", "1999-12-31T23:59:59Z", "2024-02-29T12:00:00Z"] {
            let dt = W3cDateTime::parse(s).unwrap();
            let days_since_epoch = {
                // day count via the inverse civil conversion
                let y = i64::from(dt.year) - i64::from(dt.month <= 2);
                let era = y.div_euclid(400);
                let yoe = y - era * 400;
                let mp = i64::from(if dt.month > 2 { dt.month - 3 } else { dt.month + 9 });
                let doy = (153 * mp + 2) / 5 + i64::from(dt.day) - 1;
                let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
                era * 146_097 + doe - 719_468
            };
            let secs = days_since_epoch * 86_400
                + i64::from(dt.hour) * 3600
                + i64::from(dt.minute) * 60
                + i64::from(dt.second);
            assert_eq!(W3cDateTime::from_unix_seconds(secs).to_string(), s);
        }
    }

    #[test]
    fn test_from_unix_millis() {
        let dt = W3cDateTime::from_unix_millis(1_622_122_594_000);
        assert_eq!(dt.to_string(), "2021-05-27T13:36:34Z");
    }

    #[test]
    fn test_sitemap_date_day() {
        let date = SitemapDate::parse("2021-12-30").unwrap();
        assert_eq!(date.to_string(), "2021-12-30");
    }

    #[test]
    fn test_sitemap_date_time() {
        let date = SitemapDate::parse("2021-12-30T12:34:56+02:00").unwrap();
        assert_eq!(date.to_string(), "2021-12-30T12:34:56+02:00");
    }
}
