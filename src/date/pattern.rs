//! Date layout patterns and the formatting engine.

use std::{fmt, mem, str::FromStr};

use crate::date::civil::{UtcFields, MONTH_ABBR, WEEKDAY_ABBR, WEEKDAY_FULL};
use crate::error::InvalidDateFormat;

/// One compiled pattern field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Item {
    /// `EEE`: abbreviated weekday name ("Sun").
    WeekdayShort,

    /// `EEEE`: full weekday name ("Sunday").
    WeekdayFull,

    /// `dd`: two-digit day of month.
    Day,

    /// `MM`: two-digit month.
    Month,

    /// `MMM`: abbreviated month name ("Nov").
    MonthName,

    /// `yy`: two-digit year.
    YearShort,

    /// `yyyy`: four-digit year.
    Year,

    /// `HH`: two-digit hour, 24-hour clock.
    Hour,

    /// `mm`: two-digit minute.
    Minute,

    /// `ss`: two-digit second.
    Second,

    /// `z` / `zzz`: timezone, emitted as `GMT`.
    Zone,

    /// Verbatim text between fields.
    Literal(String),
}

/// A compiled date layout such as `EEE, dd MMM yyyy HH:mm:ss zzz`.
///
/// Layouts are compiled from pattern strings with [`FromStr`]:
///
/// ```
/// use http_kit::date::DateFormat;
///
/// let format: DateFormat = "yyyy-MM-dd".parse().unwrap();
/// ```
///
/// Field tokens are `EEE`/`EEEE` (weekday), `dd` (day), `MM`/`MMM` (month),
/// `yy`/`yyyy` (year), `HH`, `mm`, `ss` (time) and `z`/`zzz` (zone). Any
/// other character is matched verbatim; single quotes delimit literal text
/// (`'T'`), with `''` standing for one apostrophe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pub(crate) items: Vec<Item>,
}

impl FromStr for DateFormat {
    type Err = InvalidDateFormat;

    fn from_str(pattern: &str) -> Result<DateFormat, InvalidDateFormat> {
        let mut items = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                'a'..='z' | 'A'..='Z' => {
                    let mut count = 1;
                    while chars.peek() == Some(&ch) {
                        chars.next();
                        count += 1;
                    }

                    let item = match (ch, count) {
                        ('E', 3) => Item::WeekdayShort,
                        ('E', 4) => Item::WeekdayFull,
                        ('d', 2) => Item::Day,
                        ('M', 2) => Item::Month,
                        ('M', 3) => Item::MonthName,
                        ('y', 2) => Item::YearShort,
                        ('y', 4) => Item::Year,
                        ('H', 2) => Item::Hour,
                        ('m', 2) => Item::Minute,
                        ('s', 2) => Item::Second,
                        ('z', 1 | 3) => Item::Zone,
                        _ => return Err(InvalidDateFormat::UnsupportedField { letter: ch, count }),
                    };

                    if !literal.is_empty() {
                        items.push(Item::Literal(mem::take(&mut literal)));
                    }
                    items.push(item);
                }

                '\'' => {
                    let mut quoted = String::new();

                    loop {
                        match chars.next() {
                            // `''` inside a quoted section is an escaped apostrophe
                            Some('\'') if chars.peek() == Some(&'\'') => {
                                chars.next();
                                quoted.push('\'');
                            }
                            Some('\'') => break,
                            Some(ch) => quoted.push(ch),
                            None => return Err(InvalidDateFormat::UnterminatedQuote),
                        }
                    }

                    // a bare `''` is a literal apostrophe
                    if quoted.is_empty() {
                        quoted.push('\'');
                    }

                    literal.push_str(&quoted);
                }

                _ => literal.push(ch),
            }
        }

        if !literal.is_empty() {
            items.push(Item::Literal(literal));
        }

        Ok(DateFormat { items })
    }
}

impl DateFormat {
    /// Render `fields` into `dst` under this layout.
    pub(crate) fn write_fields(
        &self,
        dst: &mut impl fmt::Write,
        fields: &UtcFields,
    ) -> fmt::Result {
        for item in &self.items {
            match item {
                Item::WeekdayShort => dst.write_str(WEEKDAY_ABBR[fields.weekday])?,
                Item::WeekdayFull => dst.write_str(WEEKDAY_FULL[fields.weekday])?,
                Item::Day => write!(dst, "{:02}", fields.day)?,
                Item::Month => write!(dst, "{:02}", fields.month)?,
                Item::MonthName => dst.write_str(MONTH_ABBR[usize::from(fields.month - 1)])?,
                Item::YearShort => write!(dst, "{:02}", fields.year.rem_euclid(100))?,
                Item::Year => write!(dst, "{:04}", fields.year)?,
                Item::Hour => write!(dst, "{:02}", fields.hour)?,
                Item::Minute => write!(dst, "{:02}", fields.minute)?,
                Item::Second => write!(dst, "{:02}", fields.second)?,
                Item::Zone => dst.write_str("GMT")?,
                Item::Literal(lit) => dst.write_str(lit)?,
            }
        }

        Ok(())
    }
}
