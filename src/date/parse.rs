//! Pattern-driven date parsing.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::date::civil::{self, MONTH_ABBR, WEEKDAY_ABBR, WEEKDAY_FULL};
use crate::date::pattern::{DateFormat, Item};

/// Calendar fields accumulated while matching a pattern.
///
/// Fields a pattern does not mention keep their Unix-epoch defaults.
#[derive(Debug, Clone, Copy)]
struct Fields {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    /// Zone offset from UTC in seconds.
    offset_secs: i64,
    /// Set when the year came from a two-digit field and needs expansion.
    short_year: bool,
}

impl Default for Fields {
    fn default() -> Fields {
        Fields {
            year: 1970,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            offset_secs: 0,
            short_year: false,
        }
    }
}

/// Match `input` against `format` in full.
///
/// Returns the epoch seconds of the parsed instant, or `None` when the input
/// deviates from the layout, leaves unconsumed text, or names an impossible
/// calendar date.
pub(crate) fn parse_with(format: &DateFormat, input: &str) -> Option<i64> {
    let mut cursor = Cursor::new(input);
    let mut fields = Fields::default();

    for item in &format.items {
        match item {
            // the weekday is redundant with the date and not cross-checked
            Item::WeekdayShort => {
                cursor.name(&WEEKDAY_ABBR)?;
            }
            Item::WeekdayFull => {
                cursor.name(&WEEKDAY_FULL)?;
            }
            Item::Day => fields.day = cursor.two_digits()?,
            Item::Month => fields.month = cursor.two_digits()?,
            Item::MonthName => fields.month = cursor.name(&MONTH_ABBR)? as u8 + 1,
            Item::YearShort => {
                fields.year = i64::from(cursor.two_digits()?);
                fields.short_year = true;
            }
            Item::Year => fields.year = cursor.four_digits()?,
            Item::Hour => fields.hour = cursor.two_digits()?,
            Item::Minute => fields.minute = cursor.two_digits()?,
            Item::Second => fields.second = cursor.two_digits()?,
            Item::Zone => fields.offset_secs = cursor.zone()?,
            Item::Literal(lit) => cursor.literal(lit)?,
        }
    }

    // a prefix match is not a match
    if !cursor.is_exhausted() {
        return None;
    }

    resolve(fields)
}

fn resolve(fields: Fields) -> Option<i64> {
    let year = if fields.short_year {
        expand_two_digit_year(fields.year, current_year())
    } else {
        fields.year
    };

    if fields.month < 1 || fields.month > 12 {
        return None;
    }
    if fields.day < 1 || fields.day > civil::days_in_month(year, fields.month) {
        return None;
    }
    if fields.hour > 23 || fields.minute > 59 || fields.second > 59 {
        return None;
    }

    let days = civil::days_from_civil(year, fields.month, fields.day);
    let secs = days * 86_400
        + i64::from(fields.hour) * 3600
        + i64::from(fields.minute) * 60
        + i64::from(fields.second);

    Some(secs - fields.offset_secs)
}

/// Expand a two-digit year: part of the current century if that lands within
/// the next 50 years, the previous century otherwise (RFC 9110 §5.6.7).
fn expand_two_digit_year(short: i64, now_year: i64) -> i64 {
    let century_start = (now_year / 100) * 100;
    let mut expanded = century_start + short;

    if expanded > now_year + 50 {
        expanded -= 100;
    }

    expanded
}

fn current_year() -> i64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_secs() as i64)
        .unwrap_or(0);

    civil::civil_from_days(now.div_euclid(86_400)).0
}

/// Byte-wise scanner over the input text.
struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Cursor<'a> {
        Cursor {
            src: src.as_bytes(),
            pos: 0,
        }
    }

    fn is_exhausted(&self) -> bool {
        self.pos == self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn digit(&mut self) -> Option<u8> {
        match self.peek()? {
            digit @ b'0'..=b'9' => {
                self.pos += 1;
                Some(digit - b'0')
            }
            _ => None,
        }
    }

    fn two_digits(&mut self) -> Option<u8> {
        let tens = self.digit()?;
        Some(tens * 10 + self.digit()?)
    }

    fn four_digits(&mut self) -> Option<i64> {
        let mut value = 0;

        for _ in 0..4 {
            value = value * 10 + i64::from(self.digit()?);
        }

        Some(value)
    }

    /// Consume `expected` verbatim.
    fn literal(&mut self, expected: &str) -> Option<()> {
        let expected = expected.as_bytes();
        let rest = &self.src[self.pos..];

        if rest.len() >= expected.len() && &rest[..expected.len()] == expected {
            self.pos += expected.len();
            Some(())
        } else {
            None
        }
    }

    /// Consume the first entry of `table` found here, ASCII case-insensitive.
    /// Returns the entry's index.
    fn name(&mut self, table: &[&str]) -> Option<usize> {
        let rest = &self.src[self.pos..];

        for (idx, name) in table.iter().enumerate() {
            let name = name.as_bytes();

            if rest.len() >= name.len() && rest[..name.len()].eq_ignore_ascii_case(name) {
                self.pos += name.len();
                return Some(idx);
            }
        }

        None
    }

    /// Consume a timezone: a UTC name or a `±HHMM` / `±HH:MM` offset.
    /// Returns the offset from UTC in seconds.
    fn zone(&mut self) -> Option<i64> {
        // "UTC" before its prefix "UT"
        if self.name(&["GMT", "UTC", "UT", "Z"]).is_some() {
            return Some(0);
        }

        let sign = match self.peek()? {
            b'+' => 1,
            b'-' => -1,
            _ => return None,
        };
        self.pos += 1;

        let hours = self.two_digits()?;
        if self.peek() == Some(b':') {
            self.pos += 1;
        }
        let minutes = self.two_digits()?;

        if hours > 23 || minutes > 59 {
            return None;
        }

        Some(sign * (i64::from(hours) * 3600 + i64::from(minutes) * 60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMF_FIXDATE: &str = "EEE, dd MMM yyyy HH:mm:ss zzz";
    const RFC850_DATE: &str = "EEEE, dd-MMM-yy HH:mm:ss zzz";

    fn parse(pattern: &str, input: &str) -> Option<i64> {
        let format: DateFormat = pattern.parse().unwrap();
        parse_with(&format, input)
    }

    #[test]
    fn parses_rfc1123() {
        assert_eq!(
            parse(IMF_FIXDATE, "Sun, 06 Nov 1994 08:49:37 GMT"),
            Some(784_111_777)
        );
    }

    #[test]
    fn parses_asctime() {
        assert_eq!(
            parse("EEE MMM dd HH:mm:ss yyyy", "Sun Nov 06 08:49:37 1994"),
            Some(784_111_777)
        );

        // the engine requires two day digits, so the traditional
        // space-padded asctime day is not accepted
        assert_eq!(
            parse("EEE MMM dd HH:mm:ss yyyy", "Sun Nov  6 08:49:37 1994"),
            None
        );
    }

    #[test]
    fn parses_rfc3339_date_only() {
        // missing fields fall back to their epoch defaults
        assert_eq!(parse("yyyy-MM-dd", "1994-11-06"), Some(784_080_000));
        assert_eq!(parse("yyyy-MM", "1970-01"), Some(0));
        assert_eq!(parse("yyyy", "1970"), Some(0));
        assert_eq!(parse("yyyy", "2020"), Some(1_577_836_800));
    }

    #[test]
    fn parses_quoted_separator() {
        assert_eq!(
            parse("yyyy-MM-dd'T'HH:mm:ssz", "1994-11-06T08:49:37GMT"),
            Some(784_111_777)
        );
        assert_eq!(
            parse("yyyy-MM-dd'T'HH:mm:ssz", "1994-11-06T08:49:37Z"),
            Some(784_111_777)
        );
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(
            parse(IMF_FIXDATE, "SUN, 06 NOV 1994 08:49:37 gmt"),
            Some(784_111_777)
        );
    }

    #[test]
    fn zone_offsets_shift_to_utc() {
        // 10:49:37 +0200 is 08:49:37 UTC
        assert_eq!(
            parse(IMF_FIXDATE, "Sun, 06 Nov 1994 10:49:37 +0200"),
            Some(784_111_777)
        );
        assert_eq!(
            parse(IMF_FIXDATE, "Sun, 06 Nov 1994 10:49:37 +02:00"),
            Some(784_111_777)
        );
        assert_eq!(
            parse(IMF_FIXDATE, "Sun, 06 Nov 1994 06:49:37 -0200"),
            Some(784_111_777)
        );
        assert_eq!(
            parse("yyyy-MM-dd'T'HH:mm:ssz", "1994-11-06T08:49:37UTC"),
            Some(784_111_777)
        );
    }

    #[test]
    fn named_zones_parse_as_utc() {
        // "UTC" must match ahead of its prefix "UT"
        for zone in ["GMT", "UTC", "UT", "Z"] {
            let input = format!("Sun, 06 Nov 1994 08:49:37 {zone}");
            assert_eq!(parse(IMF_FIXDATE, &input), Some(784_111_777));
        }
    }

    #[test]
    fn rejects_trailing_text() {
        assert_eq!(parse("yyyy-MM-dd", "1994-11-06 extra"), None);
        assert_eq!(parse("yyyy", "19940"), None);
        assert_eq!(parse(IMF_FIXDATE, "Sun, 06 Nov 1994 08:49:37 GMT "), None);
    }

    #[test]
    fn rejects_truncated_input() {
        assert_eq!(parse(IMF_FIXDATE, "Sun, 06 Nov 1994"), None);
        assert_eq!(parse("yyyy-MM-dd", "1994-11"), None);
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(parse("yyyy-MM-dd", "1994-13-01"), None);
        assert_eq!(parse("yyyy-MM-dd", "1994-00-10"), None);
        assert_eq!(parse("yyyy-MM-dd", "1994-11-31"), None);
        assert_eq!(parse("yyyy-MM-dd", "1994-11-00"), None);
        assert_eq!(parse("yyyy-MM-dd", "1900-02-29"), None);
        assert_eq!(parse("yyyy-MM-dd", "2000-02-29"), Some(951_782_400));
        assert_eq!(parse(IMF_FIXDATE, "Sun, 06 Nov 1994 24:00:00 GMT"), None);
        assert_eq!(parse(IMF_FIXDATE, "Sun, 06 Nov 1994 08:49:60 GMT"), None);
    }

    #[test]
    fn rejects_misspelled_names() {
        assert_eq!(parse(IMF_FIXDATE, "Sux, 06 Nov 1994 08:49:37 GMT"), None);
        assert_eq!(parse(IMF_FIXDATE, "Sun, 06 Nop 1994 08:49:37 GMT"), None);
        assert_eq!(parse(IMF_FIXDATE, "Sun, 06 Nov 1994 08:49:37 EST"), None);
    }

    #[test]
    fn expands_two_digit_years() {
        assert_eq!(expand_two_digit_year(94, 2026), 1994);
        assert_eq!(expand_two_digit_year(99, 2026), 1999);
        assert_eq!(expand_two_digit_year(0, 2026), 2000);
        assert_eq!(expand_two_digit_year(21, 2026), 2021);
        // exactly 50 years out stays in the current century
        assert_eq!(expand_two_digit_year(76, 2026), 2076);
        assert_eq!(expand_two_digit_year(77, 2026), 1977);

        // well-known strings keep their documented year for decades to come
        assert_eq!(
            parse(RFC850_DATE, "Sunday, 06-Nov-94 08:49:37 GMT"),
            Some(784_111_777)
        );
    }

    #[test]
    fn full_weekday_names() {
        assert_eq!(
            parse(RFC850_DATE, "Saturday, 01-Jan-00 00:00:00 GMT"),
            Some(946_684_800)
        );
        assert_eq!(parse(RFC850_DATE, "Sat, 01-Jan-00 00:00:00 GMT"), None);
    }
}
