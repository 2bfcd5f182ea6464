// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-aware offsets.
//!
//! A [`CalendarOffset`] has a date part and a clock part.
//!
//! - Years, months and days move the wall-clock date: adding one day across
//!   a DST change keeps the clock reading, and adding months keeps the day
//!   of month where it exists. The shifted wall time is then resolved in the
//!   zone again, keeping the original side of a fold where it can.
//! - Hours, minutes and seconds are elapsed time added to the absolute
//!   moment: one hour later is always 3 600 seconds later, even across a
//!   fall-back.
//!
//! ## Month-end clamping
//!
//! Years and months are applied together first. When the original day does
//! not exist in the target month it is clamped to that month's last day:
//!
//! | Start | Offset | Result |
//! |-------|--------|--------|
//! | 2024-01-31 | +1 month | 2024-02-29 |
//! | 2023-01-31 | +1 month | 2023-02-28 |
//! | 2024-02-29 | +1 year | 2025-02-28 |
//! | 2024-03-31 | −1 month | 2024-02-29 |
//!
//! Days are then added to the clamped wall date.

use chrono::{Duration, Months, NaiveDateTime};

/// Signed offset in calendar units.
///
/// `seconds` is fractional; it is applied with microsecond precision.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CalendarOffset {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub hours: i32,
    pub minutes: i32,
    pub seconds: f64,
}

impl CalendarOffset {
    /// Offset with every component given.
    pub const fn new(
        years: i32,
        months: i32,
        days: i32,
        hours: i32,
        minutes: i32,
        seconds: f64,
    ) -> Self {
        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    pub const fn years(years: i32) -> Self {
        Self::new(years, 0, 0, 0, 0, 0.0)
    }

    pub const fn months(months: i32) -> Self {
        Self::new(0, months, 0, 0, 0, 0.0)
    }

    pub const fn days(days: i32) -> Self {
        Self::new(0, 0, days, 0, 0, 0.0)
    }

    pub const fn hours(hours: i32) -> Self {
        Self::new(0, 0, 0, hours, 0, 0.0)
    }

    pub const fn minutes(minutes: i32) -> Self {
        Self::new(0, 0, 0, 0, minutes, 0.0)
    }

    pub const fn seconds(seconds: f64) -> Self {
        Self::new(0, 0, 0, 0, 0, seconds)
    }

    /// The same offset pointing the other way.
    ///
    /// Integer components saturate, so `i32::MIN` becomes `i32::MAX`.
    pub fn negate(self) -> Self {
        Self::new(
            self.years.saturating_neg(),
            self.months.saturating_neg(),
            self.days.saturating_neg(),
            self.hours.saturating_neg(),
            self.minutes.saturating_neg(),
            -self.seconds,
        )
    }

    /// Apply years, months and days to a wall-clock reading. `None` when the
    /// result leaves the engine's range.
    pub(crate) fn apply_date(&self, wall: NaiveDateTime) -> Option<NaiveDateTime> {
        let months = i64::from(self.years) * 12 + i64::from(self.months);
        let span = u32::try_from(months.unsigned_abs()).ok()?;
        let shifted = if months >= 0 {
            wall.checked_add_months(Months::new(span))?
        } else {
            wall.checked_sub_months(Months::new(span))?
        };
        shifted.checked_add_signed(Duration::try_days(self.days.into())?)
    }

    /// Hours, minutes and seconds as elapsed time.
    pub(crate) fn clock(&self) -> Option<Duration> {
        Duration::try_hours(self.hours.into())?
            .checked_add(&Duration::try_minutes(self.minutes.into())?)?
            .checked_add(&micros(self.seconds)?)
    }
}

/// Fractional seconds as a microsecond-precision duration.
fn micros(seconds: f64) -> Option<Duration> {
    let us = (seconds * 1e6).round();
    if !us.is_finite() || us < i64::MIN as f64 || us >= i64::MAX as f64 {
        return None;
    }
    Some(Duration::microseconds(us as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wall(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn month_end_clamps() {
        let jan31 = wall(2024, 1, 31, 8, 0, 0);
        assert_eq!(
            CalendarOffset::months(1).apply_date(jan31),
            Some(wall(2024, 2, 29, 8, 0, 0))
        );
        assert_eq!(
            CalendarOffset::months(1).apply_date(wall(2023, 1, 31, 8, 0, 0)),
            Some(wall(2023, 2, 28, 8, 0, 0))
        );
        assert_eq!(
            CalendarOffset::months(-1).apply_date(wall(2024, 3, 31, 0, 0, 0)),
            Some(wall(2024, 2, 29, 0, 0, 0))
        );
    }

    #[test]
    fn leap_day_plus_year_clamps() {
        assert_eq!(
            CalendarOffset::years(1).apply_date(wall(2024, 2, 29, 12, 0, 0)),
            Some(wall(2025, 2, 28, 12, 0, 0))
        );
        assert_eq!(
            CalendarOffset::years(4).apply_date(wall(2024, 2, 29, 12, 0, 0)),
            Some(wall(2028, 2, 29, 12, 0, 0))
        );
    }

    #[test]
    fn months_then_days() {
        // Clamp to Feb 29 first, then add a day: Mar 1, not Mar 2.
        let offset = CalendarOffset::new(0, 1, 1, 0, 0, 0.0);
        assert_eq!(
            offset.apply_date(wall(2024, 1, 31, 0, 0, 0)),
            Some(wall(2024, 3, 1, 0, 0, 0))
        );
    }

    #[test]
    fn years_and_months_combine() {
        let offset = CalendarOffset::new(1, -13, 0, 0, 0, 0.0);
        assert_eq!(
            offset.apply_date(wall(2024, 5, 10, 0, 0, 0)),
            Some(wall(2024, 4, 10, 0, 0, 0))
        );
    }

    #[test]
    fn clock_components_sum() {
        let offset = CalendarOffset::new(0, 0, 0, 23, 59, 61.5);
        assert_eq!(
            offset.clock(),
            Some(Duration::days(1) + Duration::milliseconds(1_500))
        );
    }

    #[test]
    fn clock_part_leaves_the_date_alone() {
        let start = wall(2024, 12, 31, 0, 0, 0);
        assert_eq!(CalendarOffset::hours(30).apply_date(start), Some(start));
        assert_eq!(CalendarOffset::days(1).clock(), Some(Duration::zero()));
    }

    #[test]
    fn negate_inverts_days() {
        let start = wall(2024, 3, 1, 10, 30, 0);
        let there = CalendarOffset::days(40).apply_date(start).unwrap();
        assert_eq!(
            CalendarOffset::days(40).negate().apply_date(there),
            Some(start)
        );
    }

    #[test]
    fn negate_saturates_at_the_minimum() {
        let offset = CalendarOffset::new(i32::MIN, i32::MIN, i32::MIN, i32::MIN, i32::MIN, 1.5);
        assert_eq!(
            offset.negate(),
            CalendarOffset::new(i32::MAX, i32::MAX, i32::MAX, i32::MAX, i32::MAX, -1.5)
        );
    }

    #[test]
    fn non_finite_seconds_fail() {
        let start = wall(2024, 3, 1, 10, 30, 0);
        assert_eq!(CalendarOffset::seconds(f64::NAN).clock(), None);
        assert_eq!(CalendarOffset::seconds(f64::INFINITY).clock(), None);
        assert_eq!(CalendarOffset::seconds(f64::NAN).apply_date(start), Some(start));
    }

    #[test]
    fn out_of_range_fails() {
        let start = wall(2024, 3, 1, 10, 30, 0);
        assert_eq!(CalendarOffset::years(i32::MAX).apply_date(start), None);
        assert_eq!(CalendarOffset::days(i32::MAX).apply_date(start), None);
    }
}
