use std::{fmt, str::FromStr, time::SystemTime};

use crate::date::{self, HTTP_DATE};
use crate::error::InvalidHttpDate;

/// A timestamp with `HTTP-date` formatting and parsing (RFC 9110 §5.6.7).
///
/// Parsing accepts the three layouts recipients must support: RFC 1123
/// (preferred), RFC 1036 and ANSI C `asctime`. Formatting always emits the
/// RFC 1123 layout with a `GMT` zone.
///
/// ```
/// use http_kit::date::HttpDate;
///
/// let date: HttpDate = "Sun, 06 Nov 1994 08:49:37 GMT".parse().unwrap();
/// assert_eq!(date.to_string(), "Sun, 06 Nov 1994 08:49:37 GMT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HttpDate(SystemTime);

impl FromStr for HttpDate {
    type Err = InvalidHttpDate;

    fn from_str(time: &str) -> Result<HttpDate, InvalidHttpDate> {
        match date::parse(time, &HTTP_DATE) {
            Some(at) => Ok(HttpDate(at)),
            None => Err(InvalidHttpDate),
        }
    }
}

impl fmt::Display for HttpDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        date::write_rfc1123(f, self.0)
    }
}

impl From<SystemTime> for HttpDate {
    fn from(sys_time: SystemTime) -> HttpDate {
        HttpDate(sys_time)
    }
}

impl From<HttpDate> for SystemTime {
    fn from(HttpDate(sys_time): HttpDate) -> SystemTime {
        sys_time
    }
}
