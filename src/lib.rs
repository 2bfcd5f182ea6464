// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Timezone-aware instants for a desktop date/time indicator.
//!
//! # Core types
//!
//! - [`Instant`] — an immutable point in time plus the [`Zone`] it was
//!   observed in, or the *unset* value.
//! - [`Zone`] — a named IANA zone, or the host zone when it has no name.
//! - [`CalendarOffset`] — a `(years, months, days, hours, minutes, seconds)`
//!   shift: the date part moves wall-clock fields, the clock part is elapsed
//!   time.
//! - [`Error`] — recoverable failures returned by the `try_*` methods.
//!
//! # Calendar engine
//!
//! Field arithmetic, formatting and zone rules come from `chrono` and the
//! IANA database bundled by `chrono-tz`. The local zone is taken from `TZ`
//! when set, otherwise from the host through `iana-time-zone`.
//!
//! ```
//! use zoned_instant::Instant;
//!
//! let meeting = Instant::local(2024, 3, 1, 10, 30, 0);
//! let tomorrow = meeting.add_days(1);
//! assert_eq!(tomorrow.ymd(), (2024, 3, 2));
//! assert_eq!((tomorrow.hour(), tomorrow.minute()), (10, 30));
//!
//! let epoch = Instant::from_epoch_seconds(0).to_timezone("UTC");
//! assert_eq!(epoch.format("%Y-%m-%d %H:%M"), "1970-01-01 00:00");
//! ```
//!
//! # Logging
//!
//! Soft failures (an unset result, an empty formatted string) are reported
//! through the `log` facade. No logger is installed by this crate.

mod calendar;
mod error;
mod format;
pub(crate) mod instant;
pub(crate) mod zone;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::CalendarOffset;
pub use error::{Error, Result};
pub use instant::Instant;
pub use zone::Zone;
