//! `Cache-Control` directive serialization.
//!
//! Renders an ordered list of cache directives into the canonical header
//! value. Directive arguments are double-quoted unless the directive marks
//! them as digits, in which case they appear as bare tokens.
//!
//! # ABNF
//!
//! ```plain
//! Cache-Control   = 1#cache-directive
//! cache-directive = token [ "=" ( token / quoted-string ) ]
//! ```
//!
//! # Example Values
//!
//! - `no-cache`
//! - `max-age=604800, must-revalidate`
//! - `private, community="UCI"`
//!
//! ```
//! use http_kit::cache_control::{format_directives, CacheDirective};
//!
//! let directives = [
//!     CacheDirective::new("no-cache"),
//!     CacheDirective::with_digit_value("max-age", "60"),
//!     CacheDirective::with_value("private", "x"),
//! ];
//!
//! assert_eq!(format_directives(&directives), r#"no-cache, max-age=60, private="x""#);
//! ```

use std::fmt;

/// A single `Cache-Control` directive.
///
/// Implement this to serialize directive types of your own with
/// [`format_directives`] and [`write_directive`]; [`CacheDirective`] is the
/// ready-made carrier.
pub trait Directive {
    /// The directive name, such as `max-age`.
    fn name(&self) -> &str;

    /// The directive argument, if any.
    fn value(&self) -> Option<&str>;

    /// Whether the argument serializes as a bare token instead of a quoted
    /// string.
    fn is_digit(&self) -> bool;
}

/// An owned [`Directive`] carrying its serialization policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDirective {
    name: String,
    value: Option<String>,
    digit: bool,
}

impl CacheDirective {
    /// A bare directive, such as `no-cache`.
    pub fn new(name: impl Into<String>) -> CacheDirective {
        CacheDirective {
            name: name.into(),
            value: None,
            digit: false,
        }
    }

    /// A directive whose argument is emitted double-quoted.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> CacheDirective {
        CacheDirective {
            name: name.into(),
            value: Some(value.into()),
            digit: false,
        }
    }

    /// A directive whose argument is emitted as a bare token, as numeric
    /// arguments like `max-age=60` require.
    ///
    /// The argument is not checked for being numeric; whatever is passed is
    /// emitted unquoted.
    pub fn with_digit_value(name: impl Into<String>, value: impl Into<String>) -> CacheDirective {
        CacheDirective {
            name: name.into(),
            value: Some(value.into()),
            digit: true,
        }
    }
}

impl Directive for CacheDirective {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn is_digit(&self) -> bool {
        self.digit
    }
}

impl fmt::Display for CacheDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_directive(f, self)
    }
}

/// Write one directive to `dst`.
///
/// The name goes out verbatim. An argument, when present and non-empty,
/// follows after `=`, double-quoted unless [`Directive::is_digit`] holds.
/// The argument itself is never escaped; callers keep embedded quotes and
/// control characters out of it. An absent or empty argument leaves just
/// the name.
pub fn write_directive(dst: &mut impl fmt::Write, directive: &impl Directive) -> fmt::Result {
    dst.write_str(directive.name())?;

    match directive.value() {
        Some(value) if !value.is_empty() => {
            if directive.is_digit() {
                write!(dst, "={}", value)
            } else {
                write!(dst, "=\"{}\"", value)
            }
        }
        _ => Ok(()),
    }
}

/// Render `directives` as a `Cache-Control` header value.
///
/// Directives appear in listed order, separated by `", "`. An empty slice
/// renders to the empty string.
pub fn format_directives(directives: &[impl Directive]) -> String {
    let mut buf = String::new();
    let mut iter = directives.iter();

    if let Some(directive) = iter.next() {
        let _ = write_directive(&mut buf, directive);
    }

    for directive in iter {
        buf.push_str(", ");
        let _ = write_directive(&mut buf, directive);
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_directive() {
        assert_eq!(CacheDirective::new("no-cache").to_string(), "no-cache");
        assert_eq!(CacheDirective::new("no-store").to_string(), "no-store");
    }

    #[test]
    fn quoted_and_digit_values() {
        assert_eq!(
            CacheDirective::with_value("private", "v").to_string(),
            "private=\"v\""
        );
        assert_eq!(
            CacheDirective::with_digit_value("max-age", "7").to_string(),
            "max-age=7"
        );

        // the digit flag is policy, not validation
        let directive = CacheDirective::with_digit_value("community", "UCI");
        assert_eq!(directive.to_string(), "community=UCI");
    }

    #[test]
    fn empty_value_renders_name_only() {
        assert_eq!(
            CacheDirective::with_value("no-cache", "").to_string(),
            "no-cache"
        );
        assert_eq!(
            CacheDirective::with_digit_value("max-age", "").to_string(),
            "max-age"
        );
    }

    #[test]
    fn list_rendering() {
        let directives = [
            CacheDirective::new("no-cache"),
            CacheDirective::with_digit_value("max-age", "60"),
            CacheDirective::with_value("private", "x"),
        ];

        let value = format_directives(&directives);
        assert_eq!(value, "no-cache, max-age=60, private=\"x\"");
        assert_eq!(value.matches(", ").count(), 2);
    }

    #[test]
    fn empty_list_renders_empty() {
        assert_eq!(format_directives(&[] as &[CacheDirective]), "");
    }

    #[test]
    fn single_directive_has_no_separator() {
        let directives = [CacheDirective::with_digit_value("s-maxage", "600")];
        assert_eq!(format_directives(&directives), "s-maxage=600");
    }

    #[test]
    fn caller_defined_directives() {
        struct MaxAge {
            secs: String,
        }

        impl Directive for MaxAge {
            fn name(&self) -> &str {
                "max-age"
            }

            fn value(&self) -> Option<&str> {
                Some(&self.secs)
            }

            fn is_digit(&self) -> bool {
                true
            }
        }

        let directives = [
            MaxAge {
                secs: "31536000".to_owned(),
            },
            MaxAge {
                secs: "600".to_owned(),
            },
        ];
        assert_eq!(
            format_directives(&directives),
            "max-age=31536000, max-age=600"
        );
    }

    #[test]
    fn write_into_existing_buffer() {
        let mut buf = String::from("Cache-Control: ");
        let directive = CacheDirective::with_digit_value("max-age", "60");

        write_directive(&mut buf, &directive).unwrap();
        assert_eq!(buf, "Cache-Control: max-age=60");
    }
}
