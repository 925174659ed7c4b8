//! HTTP date codecs and `Cache-Control` serialization.
//!
//! Two self-contained text utilities that every HTTP implementation ends up
//! carrying:
//!
//! - [`date`]: conversion between [`SystemTime`](std::time::SystemTime) and
//!   the date layouts used on the web (RFC 1123, RFC 1036, `asctime`,
//!   RFC 3339, RFC 822), whole-second comparison helpers, and an interned
//!   immutable date wrapper.
//! - [`cache_control`]: rendering of `Cache-Control` directive lists into
//!   the canonical comma-separated header value.
//!
//! All date handling is locale-independent and UTC-only, as HTTP
//! interoperability requires.

#![deny(rust_2018_idioms, nonstandard_style)]
#![warn(future_incompatible)]

pub mod cache_control;
pub mod date;
pub mod error;

pub use self::cache_control::{format_directives, write_directive, CacheDirective, Directive};
pub use self::date::{DateFormat, HttpDate, ImmutableDate};
pub use self::error::{InvalidDateFormat, InvalidHttpDate};
