// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-zone descriptors.
//!
//! A [`Zone`] is what an [`Instant`](crate::Instant) was observed in. It
//! decides how an absolute moment decomposes into calendar fields and, the
//! other way round, which absolute moment a set of wall-clock fields names.
//!
//! | Variant | Backing engine | Name |
//! |---------|----------------|------|
//! | [`Zone::Named`] | `chrono_tz::Tz` (compiled IANA database) | IANA identifier |
//! | [`Zone::System`] | `chrono::Local` | `"localtime"` |
//!
//! `System` only appears when the host zone cannot be named, e.g. a POSIX
//! rule string in `TZ` such as `CET-1CEST,M3.5.0,M10.5.0/3`.

use chrono::{
    DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeZone, Utc,
};
use chrono_tz::{OffsetComponents, Tz};
use log::debug;
use std::fmt;

use crate::error::{Error, Result};

/// Name reported for [`Zone::System`].
const SYSTEM_ZONE_NAME: &str = "localtime";

/// A named timezone, or the host's unnamed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// An IANA zone such as `Europe/Berlin` or `UTC`.
    Named(Tz),
    /// Whatever `chrono::Local` resolves to on this host.
    System,
}

impl Zone {
    // ── constructors ──────────────────────────────────────────────────

    /// Look up an IANA zone by name.
    pub fn named(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| Error::UnknownZone(name.to_owned()))
    }

    /// Coordinated Universal Time.
    #[inline]
    pub const fn utc() -> Self {
        Zone::Named(Tz::UTC)
    }

    /// The process's local zone, resolved afresh on every call.
    ///
    /// `TZ` wins when set. A `TZ` holding an IANA name (optionally prefixed
    /// with `:`) becomes [`Zone::Named`]; any other non-empty value is left
    /// to `chrono::Local`, which understands POSIX rule strings. With `TZ`
    /// unset the host zone is asked for by name through `iana-time-zone`.
    pub fn local() -> Self {
        if let Ok(tz) = std::env::var("TZ") {
            let name = tz.trim_start_matches(':');
            if !name.is_empty() {
                return match Zone::named(name) {
                    Ok(zone) => zone,
                    Err(_) => {
                        debug!("TZ={tz:?} is not an IANA zone, deferring to the system rules");
                        Zone::System
                    }
                };
            }
        }

        match iana_time_zone::get_timezone() {
            Ok(name) => Zone::named(&name).unwrap_or_else(|err| {
                debug!("host zone is not in the bundled database: {err}");
                Zone::System
            }),
            Err(err) => {
                debug!("could not determine the host zone name: {err}");
                Zone::System
            }
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// IANA identifier, or `"localtime"` for [`Zone::System`].
    pub fn name(&self) -> &'static str {
        match self {
            Zone::Named(tz) => tz.name(),
            Zone::System => SYSTEM_ZONE_NAME,
        }
    }

    // ── engine bridges ────────────────────────────────────────────────

    /// Decompose an absolute moment in this zone.
    pub(crate) fn at(&self, utc: &DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Zone::Named(tz) => utc.with_timezone(tz).fixed_offset(),
            Zone::System => utc.with_timezone(&Local).fixed_offset(),
        }
    }

    /// The absolute moment named by `wall` in this zone, decomposed in it.
    ///
    /// In a fold the candidate whose offset equals `prefer` wins; without a
    /// match standard time wins over DST. Wall times inside a gap are read
    /// with the offset in force before the transition, which moves them
    /// forward by the size of the gap. `None` only at the edges of the
    /// engine's range.
    pub(crate) fn resolve(
        &self,
        wall: &NaiveDateTime,
        prefer: Option<FixedOffset>,
    ) -> Option<DateTime<FixedOffset>> {
        let utc = match self {
            Zone::Named(tz) => resolve_in(tz, wall, prefer, |offset| {
                offset.dst_offset() == Duration::zero()
            })?,
            // chrono::Local does not say which side is DST.
            Zone::System => resolve_in(&Local, wall, prefer, |_| false)?,
        };
        Some(self.at(&utc))
    }
}

fn resolve_in<Z: TimeZone>(
    tz: &Z,
    wall: &NaiveDateTime,
    prefer: Option<FixedOffset>,
    is_standard: impl Fn(&Z::Offset) -> bool,
) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(wall) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(first, second) => {
            let (a, b) = (first.offset(), second.offset());
            let pick_second = if prefer == Some(b.fix()) {
                true
            } else if prefer == Some(a.fix()) {
                false
            } else if is_standard(a) != is_standard(b) {
                is_standard(b)
            } else {
                b.fix().local_minus_utc() < a.fix().local_minus_utc()
            };
            let dt = if pick_second { second } else { first };
            Some(dt.with_timezone(&Utc))
        }
        LocalResult::None => {
            let before = wall.checked_sub_signed(Duration::days(1))?;
            let offset = tz.offset_from_utc_datetime(&before).fix();
            let naive_utc = wall
                .checked_sub_signed(Duration::seconds(offset.local_minus_utc().into()))?;
            Some(Utc.from_utc_datetime(&naive_utc))
        }
    }
}

impl Default for Zone {
    fn default() -> Self {
        Zone::local()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
