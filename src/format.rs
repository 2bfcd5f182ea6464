// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Pattern formatting.
//!
//! Patterns use `chrono`'s strftime dialect (`%Y-%m-%d`, `%-d`, `%H:%M`,
//! `%a`, `%Z`, ...). Rendering goes through the zone's own type so `%Z`
//! prints the abbreviation (`CET`) rather than a bare offset.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local};
use std::fmt::Write;

use crate::error::{Error, Result};
use crate::zone::Zone;

/// Parse `pattern` into engine items, rejecting unknown specifiers.
fn items(pattern: &str) -> Result<Vec<Item<'_>>> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::InvalidPattern(pattern.to_owned()));
    }
    Ok(items)
}

/// Render `moment`, as seen in `zone`, with a strftime pattern.
pub(crate) fn render(zone: &Zone, moment: &DateTime<FixedOffset>, pattern: &str) -> Result<String> {
    let items = items(pattern)?;
    let mut out = String::with_capacity(pattern.len() * 2);
    match zone {
        Zone::Named(tz) => write!(
            out,
            "{}",
            moment.with_timezone(tz).format_with_items(items.iter())
        )?,
        Zone::System => write!(
            out,
            "{}",
            moment.with_timezone(&Local).format_with_items(items.iter())
        )?,
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn berlin_noon() -> (Zone, DateTime<FixedOffset>) {
        let zone = Zone::named("Europe/Berlin").unwrap();
        let utc = chrono::Utc.with_ymd_and_hms(2024, 1, 15, 11, 0, 0).unwrap();
        (zone, zone.at(&utc))
    }

    #[test]
    fn renders_fields() {
        let (zone, moment) = berlin_noon();
        assert_eq!(
            render(&zone, &moment, "%Y-%m-%d %H:%M").unwrap(),
            "2024-01-15 12:00"
        );
        assert_eq!(render(&zone, &moment, "%a %-d %b").unwrap(), "Mon 15 Jan");
    }

    #[test]
    fn zone_abbreviation() {
        let (zone, moment) = berlin_noon();
        assert_eq!(render(&zone, &moment, "%Z").unwrap(), "CET");
    }

    #[test]
    fn empty_pattern_renders_empty() {
        let (zone, moment) = berlin_noon();
        assert_eq!(render(&zone, &moment, "").unwrap(), "");
    }

    #[test]
    fn unknown_specifier_is_rejected() {
        let (zone, moment) = berlin_noon();
        assert_eq!(
            render(&zone, &moment, "%!"),
            Err(Error::InvalidPattern("%!".into()))
        );
    }
}
