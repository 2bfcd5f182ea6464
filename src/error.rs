// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Recoverable failures.
//!
//! Everything here depends on runtime data (a zone name read from settings,
//! calendar fields typed by a user, a format pattern from a translation).
//! Misuse of an unset [`Instant`](crate::Instant) is not an error value; it
//! panics.

use thiserror::Error;

/// Errors returned by the `try_*` family of [`Instant`](crate::Instant)
/// operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The zone name is not an IANA identifier known to the zone database.
    #[error("unknown time zone `{0}`")]
    UnknownZone(String),

    /// The calendar fields do not name a valid date and time.
    #[error(
        "invalid calendar fields {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
    )]
    InvalidFields {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    },

    /// The result falls outside the range the calendar engine can represent.
    #[error("instant is out of range")]
    OutOfRange,

    /// The format pattern contains a specifier the engine does not know.
    #[error("invalid format pattern `{0}`")]
    InvalidPattern(String),

    /// The engine failed while rendering a valid pattern.
    #[error("formatting failed")]
    Format(#[from] std::fmt::Error),
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
