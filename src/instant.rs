// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Timezone-qualified instant.
//!
//! [`Instant`] is either *unset* or a point in time together with the
//! [`Zone`] it was observed in. The zone decides the calendar fields
//! ([`hour`](Instant::hour), [`ymd`](Instant::ymd), ...) and is carried
//! through every derived value: [`start_of_day`](Instant::start_of_day),
//! [`add_days`](Instant::add_days) and friends stay in the receiver's zone,
//! while [`to_timezone`](Instant::to_timezone) keeps the absolute moment and
//! swaps the zone.
//!
//! Both parts sit behind shared `Arc` handles, so cloning is O(1) and
//! nothing is ever mutated in place.
//!
//! # Equality and order
//!
//! Equality and order look at the absolute moment only. The same moment
//! seen from Berlin and from Tokyo compares equal, even though the two may
//! disagree on [`Instant::is_same_day`].
//!
//! Two unset instants are `==`. An unset left-hand side is also `!=` to
//! everything, itself included, so `!=` is not the negation of `==` for
//! unset values. Mixed set/unset pairs have no order.
//!
//! # Failure
//!
//! Reading fields, formatting, converting or shifting an unset instant is a
//! bug in the caller and panics. Bad runtime data (unknown zone names,
//! impossible dates, broken patterns) comes back as an unset instant or an
//! empty string, or as an [`Error`] from the matching `try_*` method.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc,
};
use chrono_tz::Tz;
use log::{debug, warn};
use qtty::Seconds;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Sub;
use std::sync::Arc;

use crate::calendar::CalendarOffset;
use crate::error::{Error, Result};
use crate::format;
use crate::zone::Zone;

// ═══════════════════════════════════════════════════════════════════════════
// Instant
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
struct Inner {
    zone: Arc<Zone>,
    moment: Arc<DateTime<FixedOffset>>,
}

/// A point in time in a zone, or unset.
///
/// `Default` is unset.
#[derive(Debug, Clone, Default)]
pub struct Instant {
    inner: Option<Inner>,
}

impl Instant {
    // ── constructors ──────────────────────────────────────────────────

    /// Set instant from an explicit zone and moment.
    ///
    /// The moment is re-expressed in `zone`; only its absolute value is kept.
    pub fn new(zone: Zone, moment: DateTime<FixedOffset>) -> Self {
        let moment = zone.at(&moment.with_timezone(&Utc));
        Self::wrap(Arc::new(zone), moment)
    }

    /// Build from optional parts, which must be both present or both absent.
    ///
    /// # Panics
    ///
    /// If exactly one of `zone` and `moment` is given.
    pub fn from_parts(zone: Option<Zone>, moment: Option<DateTime<FixedOffset>>) -> Self {
        match (zone, moment) {
            (Some(zone), Some(moment)) => Self::new(zone, moment),
            (None, None) => Self::default(),
            (zone, _) => panic!(
                "Instant::from_parts: zone is {} but moment is {}; they must be both present or both absent",
                presence(zone.is_some()),
                presence(zone.is_none()),
            ),
        }
    }

    /// The current moment in the local zone.
    pub fn now_local() -> Self {
        Self::now_in(Zone::local())
    }

    /// The current moment in `zone`.
    pub fn now_in(zone: Zone) -> Self {
        let moment = zone.at(&Utc::now());
        Self::wrap(Arc::new(zone), moment)
    }

    /// Calendar fields read in `zone`.
    pub fn try_in_zone(
        zone: Zone,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        let wall = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or(Error::InvalidFields {
                year,
                month,
                day,
                hour,
                minute,
                second,
            })?;
        let moment = zone.resolve(&wall, None).ok_or(Error::OutOfRange)?;
        Ok(Self::wrap(Arc::new(zone), moment))
    }

    /// Like [`try_in_zone`](Self::try_in_zone), unset on failure.
    pub fn in_zone(
        zone: Zone,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Self {
        Self::try_in_zone(zone, year, month, day, hour, minute, second).unwrap_or_else(|err| {
            warn!("cannot build an instant in {zone}: {err}");
            Self::default()
        })
    }

    /// Calendar fields read in the local zone.
    pub fn try_local(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        Self::try_in_zone(Zone::local(), year, month, day, hour, minute, second)
    }

    /// Like [`try_local`](Self::try_local), unset on failure.
    ///
    /// ```
    /// use zoned_instant::Instant;
    ///
    /// assert!(Instant::local(2024, 3, 1, 10, 30, 0).is_set());
    /// assert!(!Instant::local(2024, 2, 30, 10, 30, 0).is_set());
    /// ```
    pub fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self::in_zone(Zone::local(), year, month, day, hour, minute, second)
    }

    /// Whole seconds since the Unix epoch, in the local zone.
    pub fn try_from_epoch_seconds(seconds: i64) -> Result<Self> {
        let utc = DateTime::from_timestamp(seconds, 0).ok_or(Error::OutOfRange)?;
        let zone = Zone::local();
        Ok(Self::wrap(Arc::new(zone), zone.at(&utc)))
    }

    /// Like [`try_from_epoch_seconds`](Self::try_from_epoch_seconds), unset
    /// on failure.
    pub fn from_epoch_seconds(seconds: i64) -> Self {
        Self::try_from_epoch_seconds(seconds).unwrap_or_else(|err| {
            warn!("cannot build an instant from epoch second {seconds}: {err}");
            Self::default()
        })
    }

    #[inline]
    fn wrap(zone: Arc<Zone>, moment: DateTime<FixedOffset>) -> Self {
        Self {
            inner: Some(Inner {
                zone,
                moment: Arc::new(moment),
            }),
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// `false` for the unset value.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.inner.is_some()
    }

    /// The zone this instant was observed in.
    #[inline]
    pub fn zone(&self) -> Option<&Zone> {
        self.inner.as_ref().map(|inner| &*inner.zone)
    }

    /// The underlying moment, decomposed in [`zone`](Self::zone).
    #[inline]
    pub fn moment(&self) -> Option<&DateTime<FixedOffset>> {
        self.inner.as_ref().map(|inner| &*inner.moment)
    }

    fn expect_set(&self, op: &str) -> &Inner {
        match &self.inner {
            Some(inner) => inner,
            None => panic!("Instant::{op} called on an unset instant"),
        }
    }

    // ── transformations ───────────────────────────────────────────────

    /// The same moment in the IANA zone `name`.
    ///
    /// # Panics
    ///
    /// If `self` is unset.
    pub fn try_to_timezone(&self, name: &str) -> Result<Self> {
        let inner = self.expect_set("to_timezone");
        let zone = Zone::named(name)?;
        Ok(Self::wrap(
            Arc::new(zone),
            zone.at(&inner.moment.with_timezone(&Utc)),
        ))
    }

    /// Like [`try_to_timezone`](Self::try_to_timezone), unset on failure.
    pub fn to_timezone(&self, name: &str) -> Self {
        self.try_to_timezone(name).unwrap_or_else(|err| {
            warn!("cannot convert {self} to another zone: {err}");
            Self::default()
        })
    }

    /// The same moment in `zone`.
    ///
    /// # Panics
    ///
    /// If `self` is unset.
    pub fn to_zone(&self, zone: Zone) -> Self {
        let inner = self.expect_set("to_zone");
        let moment = zone.at(&inner.moment.with_timezone(&Utc));
        Self::wrap(Arc::new(zone), moment)
    }

    /// Midnight starting this instant's calendar day, in its zone.
    ///
    /// When midnight falls in a DST gap the result is the first wall time
    /// after it.
    ///
    /// # Panics
    ///
    /// If `self` is unset.
    pub fn start_of_day(&self) -> Self {
        let inner = self.expect_set("start_of_day");
        let wall = inner.moment.date_naive().and_time(NaiveTime::MIN);
        Self::rezone(inner, wall, "start_of_day")
    }

    /// Second zero of this instant's minute, in its zone.
    ///
    /// The seconds are cut off the absolute moment, so the result keeps the
    /// receiver's offset and is never later than it.
    ///
    /// # Panics
    ///
    /// If `self` is unset.
    pub fn start_of_minute(&self) -> Self {
        let inner = self.expect_set("start_of_minute");
        let moment = &inner.moment;
        let past = Duration::seconds(moment.second().into())
            + Duration::nanoseconds(moment.nanosecond().into());
        match moment.checked_sub_signed(past) {
            Some(start) => Self::wrap(
                Arc::clone(&inner.zone),
                inner.zone.at(&start.with_timezone(&Utc)),
            ),
            None => {
                warn!("Instant::start_of_minute: {moment} is out of range");
                Self::default()
            }
        }
    }

    /// Shift by a calendar offset, in this instant's zone.
    ///
    /// Years, months and days move the wall-clock date, which is resolved
    /// again on the same side of a fold as `self`. Hours, minutes and seconds
    /// are then added as elapsed time. See [`CalendarOffset`] for the
    /// month-end clamping rule.
    ///
    /// # Panics
    ///
    /// If `self` is unset.
    pub fn try_add_offset(&self, offset: CalendarOffset) -> Result<Self> {
        let inner = self.expect_set("add_offset");
        let wall = offset
            .apply_date(inner.moment.naive_local())
            .ok_or(Error::OutOfRange)?;
        let dated = inner
            .zone
            .resolve(&wall, Some(*inner.moment.offset()))
            .ok_or(Error::OutOfRange)?;
        let moment = offset
            .clock()
            .and_then(|clock| dated.checked_add_signed(clock))
            .ok_or(Error::OutOfRange)?;
        Ok(Self::wrap(
            Arc::clone(&inner.zone),
            inner.zone.at(&moment.with_timezone(&Utc)),
        ))
    }

    /// Like [`try_add_offset`](Self::try_add_offset), unset on failure.
    pub fn add_offset(&self, offset: CalendarOffset) -> Self {
        self.try_add_offset(offset).unwrap_or_else(|err| {
            warn!("cannot shift {self} by {offset:?}: {err}");
            Self::default()
        })
    }

    /// [`add_offset`](Self::add_offset) with every component spelled out.
    pub fn add_full(
        &self,
        years: i32,
        months: i32,
        days: i32,
        hours: i32,
        minutes: i32,
        seconds: f64,
    ) -> Self {
        self.add_offset(CalendarOffset::new(
            years, months, days, hours, minutes, seconds,
        ))
    }

    /// Shift by whole calendar days.
    #[inline]
    pub fn add_days(&self, days: i32) -> Self {
        self.add_full(0, 0, days, 0, 0, 0.0)
    }

    fn rezone(inner: &Inner, wall: NaiveDateTime, op: &str) -> Self {
        match inner.zone.resolve(&wall, None) {
            Some(moment) => Self::wrap(Arc::clone(&inner.zone), moment),
            None => {
                warn!("Instant::{op}: {wall} is out of range in {}", inner.zone);
                Self::default()
            }
        }
    }

    // ── queries ───────────────────────────────────────────────────────

    /// `(year, month, day)` in this instant's zone.
    pub fn ymd(&self) -> (i32, u32, u32) {
        let moment = &self.expect_set("ymd").moment;
        (moment.year(), moment.month(), moment.day())
    }

    pub fn year(&self) -> i32 {
        self.expect_set("year").moment.year()
    }

    /// Month, 1 to 12.
    pub fn month(&self) -> u32 {
        self.expect_set("month").moment.month()
    }

    /// Day of month, 1 to 31.
    pub fn day_of_month(&self) -> u32 {
        self.expect_set("day_of_month").moment.day()
    }

    /// Day of year, 1 to 366.
    pub fn day_of_year(&self) -> u32 {
        self.expect_set("day_of_year").moment.ordinal()
    }

    pub fn hour(&self) -> u32 {
        self.expect_set("hour").moment.hour()
    }

    pub fn minute(&self) -> u32 {
        self.expect_set("minute").moment.minute()
    }

    /// Seconds within the minute, with the fraction to microsecond precision.
    pub fn seconds(&self) -> f64 {
        let moment = &self.expect_set("seconds").moment;
        let micros = moment.nanosecond() / 1_000;
        f64::from(moment.second()) + f64::from(micros) / 1e6
    }

    /// Whole seconds since the Unix epoch. Independent of the zone.
    pub fn to_unix(&self) -> i64 {
        self.expect_set("to_unix").moment.timestamp()
    }

    /// Render with a strftime-style pattern (`%Y-%m-%d %H:%M`, `%a %-d`,
    /// `%Z`, ...).
    ///
    /// # Panics
    ///
    /// If `self` is unset.
    pub fn try_format(&self, pattern: &str) -> Result<String> {
        let inner = self.expect_set("format");
        format::render(&inner.zone, &inner.moment, pattern)
    }

    /// Like [`try_format`](Self::try_format), empty on failure.
    pub fn format(&self, pattern: &str) -> String {
        self.try_format(pattern).unwrap_or_else(|err| {
            debug!("cannot format {self}: {err}");
            String::new()
        })
    }

    /// Signed time from `earlier` to `self`.
    ///
    /// # Panics
    ///
    /// If either instant is unset.
    pub fn duration_since(&self, earlier: &Instant) -> Seconds {
        Seconds::new((self - earlier) as f64 / 1e6)
    }

    // ── coincidence ───────────────────────────────────────────────────

    /// Whether both instants fall on the same calendar date, each read in
    /// its own zone. `false` if either is unset.
    pub fn is_same_day(a: &Instant, b: &Instant) -> bool {
        match (&a.inner, &b.inner) {
            (Some(a), Some(b)) => {
                a.moment.year() == b.moment.year() && a.moment.ordinal() == b.moment.ordinal()
            }
            _ => false,
        }
    }

    /// [`is_same_day`](Self::is_same_day) and the same hour and minute.
    pub fn is_same_minute(a: &Instant, b: &Instant) -> bool {
        if !Self::is_same_day(a, b) {
            return false;
        }
        match (&a.inner, &b.inner) {
            (Some(a), Some(b)) => {
                a.moment.hour() == b.moment.hour() && a.moment.minute() == b.moment.minute()
            }
            _ => false,
        }
    }
}

fn presence(present: bool) -> &'static str {
    if present {
        "present"
    } else {
        "absent"
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Comparison ────────────────────────────────────────────────────────────

impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (None, None) => true,
            (Some(a), Some(b)) => *a.moment == *b.moment,
            _ => false,
        }
    }

    // An unset left-hand side is unequal to everything, itself included.
    #[allow(clippy::partial_eq_ne_impl)]
    fn ne(&self, other: &Self) -> bool {
        !self.is_set() || !self.eq(other)
    }
}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (&self.inner, &other.inner) {
            (None, None) => Some(Ordering::Equal),
            (Some(a), Some(b)) => Some(a.moment.cmp(&b.moment)),
            _ => None,
        }
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

/// Microseconds from `rhs` to `self`, saturating at the `i64` bounds.
///
/// # Panics
///
/// If either instant is unset.
impl Sub for &Instant {
    type Output = i64;

    fn sub(self, rhs: &Instant) -> i64 {
        let a = self.expect_set("sub");
        let b = rhs.expect_set("sub");
        let delta = *a.moment - *b.moment;
        delta.num_microseconds().unwrap_or(if delta < Duration::zero() {
            i64::MIN
        } else {
            i64::MAX
        })
    }
}

impl Sub for Instant {
    type Output = i64;

    #[inline]
    fn sub(self, rhs: Instant) -> i64 {
        &self - &rhs
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(inner) => write!(
                f,
                "{}[{}]",
                inner.moment.format("%Y-%m-%dT%H:%M:%S%.f%:z"),
                inner.zone
            ),
            None => f.write_str("unset"),
        }
    }
}

// ── From chrono ───────────────────────────────────────────────────────────

impl From<DateTime<Tz>> for Instant {
    fn from(datetime: DateTime<Tz>) -> Self {
        Self::new(Zone::Named(datetime.timezone()), datetime.fixed_offset())
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::new(Zone::utc(), datetime.fixed_offset())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
