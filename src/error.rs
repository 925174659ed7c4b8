//! Error types returned by the date codec.

use derive_more::{Display, Error};

/// A set of errors that can occur while compiling a date layout pattern.
///
/// The built-in pattern families ([`RFC_1123`](crate::date::RFC_1123) and
/// friends) are known-good and never produce these; they only surface when
/// compiling caller-supplied pattern strings.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[non_exhaustive]
pub enum InvalidDateFormat {
    /// A field letter or repetition count outside the supported alphabet,
    /// such as `MMMM` or an unquoted `q`.
    #[display("unsupported pattern field `{letter}` repeated {count} time(s)")]
    UnsupportedField {
        /// The offending field letter.
        letter: char,

        /// Length of the letter run.
        count: usize,
    },

    /// A quoted literal was opened with `'` but never closed.
    #[display("unterminated quoted literal in pattern")]
    UnterminatedQuote,
}

/// Error returned when a string matches none of the accepted `HTTP-date`
/// layouts (RFC 1123, RFC 1036, asctime).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("string is not a valid HTTP date")]
#[non_exhaustive]
pub struct InvalidHttpDate;
