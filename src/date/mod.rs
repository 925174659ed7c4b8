//! HTTP date formatting and parsing.
//!
//! HTTP and the web standards around it spell dates in a handful of fixed,
//! English-only layouts. This module converts between [`SystemTime`] and
//! those layouts:
//!
//! - [`format`] renders an instant under a compiled [`DateFormat`];
//! - [`parse`] tries every layout of a pattern family in order and returns
//!   the first full match;
//! - [`after`], [`before`] and [`eq`] compare instants at whole-second
//!   precision, the resolution HTTP dates carry.
//!
//! The families HTTP cares about come predefined: [`RFC_1123`],
//! [`RFC_1036`], [`ASC_TIME`], [`RFC_3339`], [`RFC_822`] and the combined
//! [`HTTP_DATE`]. All conversion is locale-independent: names are US
//! English and the zone is always UTC.
//!
//! ```
//! use std::time::{Duration, SystemTime};
//!
//! use http_kit::date::{self, RFC_1123};
//!
//! let at = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
//!
//! let text = date::format(at, &RFC_1123[0]);
//! assert_eq!(text, "Sun, 06 Nov 1994 08:49:37 GMT");
//! assert_eq!(date::parse(&text, &RFC_1123), Some(at));
//! ```

use std::{
    fmt,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use once_cell::sync::Lazy;

mod civil;
mod http_date;
mod immutable;
mod parse;
mod pattern;

pub use self::http_date::HttpDate;
pub use self::immutable::ImmutableDate;
pub use self::pattern::DateFormat;

use self::civil::UtcFields;

/// The RFC 1123 layout, HTTP's preferred date format.
pub static RFC_1123: Lazy<Vec<DateFormat>> =
    Lazy::new(|| family(&["EEE, dd MMM yyyy HH:mm:ss zzz"]));

/// The RFC 1036 layout with full weekday name and two-digit year, obsolete
/// but still required of HTTP recipients.
pub static RFC_1036: Lazy<Vec<DateFormat>> =
    Lazy::new(|| family(&["EEEE, dd-MMM-yy HH:mm:ss zzz"]));

/// The ANSI C `asctime()` layout.
pub static ASC_TIME: Lazy<Vec<DateFormat>> = Lazy::new(|| family(&["EEE MMM dd HH:mm:ss yyyy"]));

/// RFC 3339 layouts, most complete first.
pub static RFC_3339: Lazy<Vec<DateFormat>> = Lazy::new(|| {
    family(&[
        "yyyy-MM-dd'T'HH:mm:ssz",
        "yyyy-MM-dd'T'HH:mmz",
        "yyyy-MM-dd",
        "yyyy-MM",
        "yyyy",
    ])
});

/// RFC 822 layouts, most complete first.
pub static RFC_822: Lazy<Vec<DateFormat>> = Lazy::new(|| {
    family(&[
        "EEE, dd MMM yy HH:mm:ss z",
        "EEE, dd MMM yy HH:mm z",
        "dd MMM yy HH:mm:ss z",
        "dd MMM yy HH:mm z",
    ])
});

/// Every layout an `HTTP-date` recipient must accept (RFC 9110 §5.6.7):
/// RFC 1123, then RFC 1036, then asctime.
pub static HTTP_DATE: Lazy<Vec<DateFormat>> = Lazy::new(|| {
    family(&[
        "EEE, dd MMM yyyy HH:mm:ss zzz",
        "EEEE, dd-MMM-yy HH:mm:ss zzz",
        "EEE MMM dd HH:mm:ss yyyy",
    ])
});

fn family(patterns: &[&str]) -> Vec<DateFormat> {
    patterns
        .iter()
        .map(|pattern| pattern.parse().unwrap())
        .collect()
}

/// Render `date` under `format`.
///
/// The output is deterministic: UTC fields, US English names and a `GMT`
/// zone, independent of host locale and timezone.
///
/// ```
/// use std::time::{Duration, SystemTime};
///
/// use http_kit::date::{self, RFC_3339};
///
/// let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_592_224_496);
/// assert_eq!(date::format(at, &RFC_3339[2]), "2020-06-15");
/// ```
pub fn format(date: SystemTime, format: &DateFormat) -> String {
    let fields = UtcFields::from_epoch_secs(epoch_secs(date));

    let mut buf = String::with_capacity(32);
    let _ = format.write_fields(&mut buf, &fields);
    buf
}

/// Parse `date` against each layout in `formats`, in listed order.
///
/// The first layout that consumes the input in full and names a possible
/// calendar date wins; a layout matching only a prefix is skipped. Missing
/// time fields default to `00:00:00`, missing zones to UTC. Returns `None`
/// when every layout fails.
pub fn parse(date: &str, formats: &[DateFormat]) -> Option<SystemTime> {
    formats
        .iter()
        .find_map(|format| parse::parse_with(format, date))
        .map(system_time_from_secs)
}

/// Whether `other` is after `base`, at whole-second precision.
///
/// Note the argument roles: `after(base, other)` asks whether *other* is
/// later than *base*, not the reverse.
pub fn after(base: SystemTime, other: SystemTime) -> bool {
    epoch_secs(other) > epoch_secs(base)
}

/// Whether `other` is before `base`, at whole-second precision.
pub fn before(base: SystemTime, other: SystemTime) -> bool {
    epoch_secs(other) < epoch_secs(base)
}

/// Whether both instants fall within the same whole second.
pub fn eq(base: SystemTime, other: SystemTime) -> bool {
    epoch_secs(base) == epoch_secs(other)
}

/// Render `date` in the RFC 1123 layout.
pub(crate) fn write_rfc1123(dst: &mut impl fmt::Write, date: SystemTime) -> fmt::Result {
    let fields = UtcFields::from_epoch_secs(epoch_secs(date));
    RFC_1123[0].write_fields(dst, &fields)
}

/// Milliseconds since the Unix epoch, negative for earlier instants.
pub(crate) fn epoch_millis(date: SystemTime) -> i64 {
    match date.duration_since(UNIX_EPOCH) {
        Ok(dur) => dur.as_millis() as i64,
        Err(err) => -(err.duration().as_millis() as i64),
    }
}

pub(crate) fn system_time_from_millis(millis: i64) -> SystemTime {
    if millis >= 0 {
        UNIX_EPOCH + Duration::from_millis(millis as u64)
    } else {
        UNIX_EPOCH - Duration::from_millis(millis.unsigned_abs())
    }
}

/// Whole seconds since the Unix epoch, floored toward negative infinity.
fn epoch_secs(date: SystemTime) -> i64 {
    epoch_millis(date).div_euclid(1000)
}

fn system_time_from_secs(secs: i64) -> SystemTime {
    if secs >= 0 {
        UNIX_EPOCH + Duration::from_secs(secs as u64)
    } else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs())
    }
}
